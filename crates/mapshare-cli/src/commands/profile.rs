use anyhow::Result;
use mapshare_core::{AppCore, ProfileTab};
use serde_json::json;
use std::sync::Arc;

use crate::cli::{ProfileArgs, TabArg};
use crate::output::{OutputFormat, json::print_json, table::print_maps};

pub async fn run(core: Arc<AppCore>, args: ProfileArgs, format: OutputFormat) -> Result<()> {
    let viewer = core.identity.current();
    let profile = core.catalog.profile(&args.username, viewer.as_ref());
    let tab = profile_tab(args.tab);

    if format.is_json() {
        return print_json(&json!({
            "username": profile.username,
            "isOwnProfile": profile.is_own_profile,
            "uploadCount": profile.uploaded.len(),
            "tab": tab,
            "maps": profile.tab(tab),
        }));
    }

    println!("{}", profile.username);
    println!("{} maps uploaded\n", profile.uploaded.len());

    if tab != ProfileTab::Uploaded && !profile.is_own_profile {
        println!("Liked and saved maps are only visible on your own profile.");
        return Ok(());
    }

    print_maps(profile.tab(tab))
}

fn profile_tab(tab: TabArg) -> ProfileTab {
    match tab {
        TabArg::Uploaded => ProfileTab::Uploaded,
        TabArg::Liked => ProfileTab::Liked,
        TabArg::Saved => ProfileTab::Saved,
    }
}
