use anyhow::{Result, anyhow};
use mapshare_core::{AppCore, Identity, MapEntry, NewMapEntry, SortCriterion};
use serde_json::json;
use std::sync::Arc;

use crate::cli::{MapCommands, SortArg};
use crate::commands::utils::{format_timestamp, load_code};
use crate::config::CliConfig;
use crate::output::{OutputFormat, json::print_json, table::print_maps};

pub async fn run(
    core: Arc<AppCore>,
    command: MapCommands,
    config: &CliConfig,
    format: OutputFormat,
) -> Result<()> {
    match command {
        MapCommands::List { sort, tags } => {
            let criterion = resolve_sort(sort, config)?;
            list_maps(&core, &tags, criterion, format)
        }
        MapCommands::Search { query } => search_maps(&core, &query, format),
        MapCommands::Show { id } => show_map(&core, &id, format),
        MapCommands::Upload {
            name,
            description,
            image_url,
            tags,
            code,
            file,
        } => {
            let code = load_code(code, file.as_deref())?;
            upload_map(&core, name, description, image_url, &tags, code, format)
        }
        MapCommands::Like { id } => react(&core, &id, Reaction::Like, format),
        MapCommands::Unlike { id } => react(&core, &id, Reaction::Unlike, format),
        MapCommands::Save { id } => react(&core, &id, Reaction::Save, format),
        MapCommands::Unsave { id } => react(&core, &id, Reaction::Unsave, format),
        MapCommands::Comment { id, content } => comment(&core, &id, &content, format),
        MapCommands::Tags => list_tags(&core, format),
    }
}

fn resolve_sort(sort: Option<SortArg>, config: &CliConfig) -> Result<SortCriterion> {
    if let Some(sort) = sort {
        return Ok(match sort {
            SortArg::Likes => SortCriterion::Likes,
            SortArg::Date => SortCriterion::Date,
        });
    }
    match config.default.sort.as_deref() {
        Some(value) => value.parse().map_err(|e: String| anyhow!(e)),
        None => Ok(SortCriterion::default()),
    }
}

fn list_maps(
    core: &AppCore,
    tags: &[String],
    criterion: SortCriterion,
    format: OutputFormat,
) -> Result<()> {
    let maps = core.catalog.browse(tags, criterion);

    if format.is_json() {
        return print_json(&maps);
    }

    print_maps(&maps)
}

fn search_maps(core: &AppCore, query: &str, format: OutputFormat) -> Result<()> {
    let maps = core.catalog.search(query);

    if format.is_json() {
        return print_json(&maps);
    }

    print_maps(&maps)
}

fn show_map(core: &AppCore, id: &str, format: OutputFormat) -> Result<()> {
    let map = core
        .catalog
        .get(id)
        .ok_or_else(|| anyhow!("Map not found: {}", id))?;
    let viewer = core.identity.current();

    if format.is_json() {
        let (liked, saved) = match &viewer {
            Some(identity) => (
                core.catalog.has_liked(&map.id, &identity.id),
                core.catalog.has_saved(&map.id, &identity.id),
            ),
            None => (false, false),
        };
        return print_json(&json!({ "map": map, "liked": liked, "saved": saved }));
    }

    println!("ID:          {}", map.id);
    println!("Name:        {}", map.name);
    println!("Description: {}", map.description);
    println!("Image:       {}", map.image_url);
    println!("Tags:        {}", map.tags.join(", "));
    println!("Uploaded by: {}", map.uploaded_by);
    println!("Uploaded:    {}", format_timestamp(Some(map.upload_date)));
    println!("Likes:       {}", map.likes);
    if let Some(identity) = &viewer {
        println!("{}", reaction_status(core, &map, identity));
    }
    println!("\nCode:\n{}", map.code);

    println!("\nComments ({}):", map.comments.len());
    for comment in &map.comments {
        println!(
            "  [{}] {}: {}",
            format_timestamp(Some(comment.created_at)),
            comment.username,
            comment.content
        );
    }

    Ok(())
}

fn reaction_status(core: &AppCore, map: &MapEntry, identity: &Identity) -> String {
    let liked = core.catalog.has_liked(&map.id, &identity.id);
    let saved = core.catalog.has_saved(&map.id, &identity.id);
    format!(
        "You:         {}, {}",
        if liked { "liked" } else { "not liked" },
        if saved { "saved" } else { "not saved" }
    )
}

fn upload_map(
    core: &AppCore,
    name: String,
    description: String,
    image_url: String,
    tags: &str,
    code: String,
    format: OutputFormat,
) -> Result<()> {
    let identity = core.require_identity("upload a map")?;
    let map = core.catalog.add_entry(NewMapEntry {
        name,
        code,
        description,
        image_url,
        tags: NewMapEntry::parse_tags(tags),
        uploaded_by: identity.username,
    })?;

    if format.is_json() {
        return print_json(&map);
    }

    println!("Map uploaded: {}", map.id);
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Reaction {
    Like,
    Unlike,
    Save,
    Unsave,
}

impl Reaction {
    fn action(self) -> &'static str {
        match self {
            Reaction::Like => "like maps",
            Reaction::Unlike => "unlike maps",
            Reaction::Save => "save maps",
            Reaction::Unsave => "unsave maps",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Reaction::Like => "Liked",
            Reaction::Unlike => "Unliked",
            Reaction::Save => "Saved",
            Reaction::Unsave => "Unsaved",
        }
    }
}

fn react(core: &AppCore, id: &str, reaction: Reaction, format: OutputFormat) -> Result<()> {
    let identity = core.require_identity(reaction.action())?;
    match reaction {
        Reaction::Like => {
            core.catalog.like(id, &identity.id)?;
        }
        Reaction::Unlike => {
            core.catalog.unlike(id, &identity.id)?;
        }
        Reaction::Save => core.catalog.save(id, &identity.id)?,
        Reaction::Unsave => core.catalog.unsave(id, &identity.id)?,
    }

    let map = core
        .catalog
        .get(id)
        .ok_or_else(|| anyhow!("Map not found: {}", id))?;

    if format.is_json() {
        return print_json(&json!({
            "id": map.id,
            "likes": map.likes,
            "liked": core.catalog.has_liked(&map.id, &identity.id),
            "saved": core.catalog.has_saved(&map.id, &identity.id),
        }));
    }

    println!("{} {} ({} likes)", reaction.past_tense(), map.name, map.likes);
    Ok(())
}

fn comment(core: &AppCore, id: &str, content: &str, format: OutputFormat) -> Result<()> {
    let identity = core.require_identity("comment")?;
    let comment = core
        .catalog
        .add_comment(id, &identity.id, &identity.username, content)?;

    if format.is_json() {
        return print_json(&comment);
    }

    println!("Comment added to {}", id);
    Ok(())
}

fn list_tags(core: &AppCore, format: OutputFormat) -> Result<()> {
    let tags = core.catalog.all_tags();

    if format.is_json() {
        return print_json(&json!({ "tags": tags }));
    }

    for tag in tags {
        println!("{}", tag);
    }
    Ok(())
}
