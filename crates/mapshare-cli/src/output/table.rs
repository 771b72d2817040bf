use anyhow::Result;
use comfy_table::{Cell, Table};
use mapshare_core::MapEntry;

use crate::commands::utils::{format_timestamp, preview_text};

pub fn print_table(table: Table) -> Result<()> {
    println!("{table}");
    Ok(())
}

/// Render a list of map entries, or a placeholder when there are none.
pub fn print_maps(maps: &[MapEntry]) -> Result<()> {
    if maps.is_empty() {
        println!("No maps found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Likes", "Tags", "Uploaded By", "Date"]);

    for map in maps {
        table.add_row(vec![
            Cell::new(&map.id),
            Cell::new(preview_text(&map.name, 32)),
            Cell::new(map.likes),
            Cell::new(map.tags.join(", ")),
            Cell::new(&map.uploaded_by),
            Cell::new(format_timestamp(Some(map.upload_date))),
        ]);
    }

    print_table(table)
}
