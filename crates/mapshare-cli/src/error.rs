use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let msg = format!("{:#}", err).to_lowercase();

    if msg.contains("must be logged in") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Log in first with:");
        eprintln!(
            "  {} mapshare login --email <email> --password <password>",
            "$".dimmed()
        );
    }

    if msg.contains("map not found") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  List available maps with:");
        eprintln!("  {} mapshare map list", "$".dimmed());
    }

    if msg.contains("corrupt state") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  The database was written by a newer or damaged build.");
        eprintln!("  Point --db-path at a fresh file to start over.");
    }

    std::process::exit(1);
}
