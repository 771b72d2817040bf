use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Output format for CLI commands
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    #[allow(dead_code)]
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// Ordering for map lists
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SortArg {
    /// Most liked first
    Likes,
    /// Newest first
    Date,
}

/// Profile tab to display
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum TabArg {
    #[default]
    Uploaded,
    Liked,
    Saved,
}

#[derive(Parser)]
#[command(name = "mapshare")]
#[command(version, about = "Mapshare - Share and discover map codes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database path (defaults to ~/.mapshare/mapshare.db)
    #[arg(long, global = true, env = "MAPSHARE_DB_PATH")]
    pub db_path: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Create an account and log in
    Register(RegisterArgs),

    /// Log in with an email address
    Login(LoginArgs),

    /// Log out
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Change your password
    Passwd(PasswdArgs),

    /// Browse, upload and react to maps
    Map {
        #[command(subcommand)]
        command: MapCommands,
    },

    /// Show a user's profile
    Profile(ProfileArgs),

    /// Configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub username: String,

    #[arg(short, long)]
    pub email: String,

    #[arg(short, long)]
    pub password: String,
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub email: String,

    #[arg(short, long)]
    pub password: String,
}

#[derive(Args)]
pub struct PasswdArgs {
    /// Current password
    #[arg(long)]
    pub old: String,

    /// New password
    #[arg(long)]
    pub new: String,
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Username whose profile to show
    pub username: String,

    /// Which list to show
    #[arg(long, value_enum, default_value = "uploaded")]
    pub tab: TabArg,
}

#[derive(Subcommand)]
pub enum MapCommands {
    /// List maps, optionally filtered by tags
    List {
        /// Sort order (defaults to config, then date)
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Only maps carrying every given tag
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Search maps by name, description or tag
    Search {
        query: String,
    },

    /// Show a map with its code and comments
    Show {
        id: String,
    },

    /// Upload a new map
    Upload {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        image_url: String,

        /// Comma-separated tags
        #[arg(long)]
        tags: String,

        /// Map code text
        #[arg(long, conflicts_with = "file")]
        code: Option<String>,

        /// Read the map code from a file
        #[arg(long)]
        file: Option<String>,
    },

    /// Like a map
    Like {
        id: String,
    },

    /// Remove your like from a map
    Unlike {
        id: String,
    },

    /// Save a map to your profile
    Save {
        id: String,
    },

    /// Remove a map from your saved list
    Unsave {
        id: String,
    },

    /// Comment on a map
    Comment {
        id: String,
        content: String,
    },

    /// List every tag in use
    Tags,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show system configuration
    Show,

    /// Set a configuration value (auth_delay_ms, strict_credentials)
    Set {
        key: String,
        value: String,
    },
}
