use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::{contains, starts_with};
use std::path::Path;
use tempfile::TempDir;

fn mapshare(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mapshare"));
    cmd.env("HOME", home)
        .env("MAPSHARE_DIR", home.join(".mapshare"))
        .env_remove("MAPSHARE_DB_PATH")
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG");
    cmd
}

/// A fresh home with the login delay switched off.
fn fresh_home() -> TempDir {
    let home = TempDir::new().unwrap();
    mapshare(home.path())
        .args(["config", "set", "auth_delay_ms", "0"])
        .assert()
        .success();
    home
}

fn register(home: &Path, username: &str) {
    let email = format!("{username}@example.com");
    mapshare(home)
        .args(["register", "-u", username, "-e", &email, "-p", "pw"])
        .assert()
        .success();
}

fn read_logs(home: &Path) -> String {
    let mut logs = String::new();
    for entry in std::fs::read_dir(home.join(".mapshare").join("logs")).unwrap() {
        logs.push_str(&std::fs::read_to_string(entry.unwrap().path()).unwrap());
    }
    logs
}

fn upload(home: &Path, name: &str, tags: &str) -> String {
    let output = mapshare(home)
        .args([
            "--format",
            "json",
            "map",
            "upload",
            "--name",
            name,
            "--description",
            "A test map",
            "--image-url",
            "https://example.com/map.png",
            "--tags",
            tags,
            "--code",
            "MAP-CODE-1",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    value["id"].as_str().unwrap().to_string()
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mapshare"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("Mapshare"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mapshare"));
    cmd.arg("--version").assert().success();
}

#[test]
fn test_cli_completions() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mapshare"));
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(starts_with("_mapshare"));
}

#[test]
fn test_empty_catalog_lists_nothing() {
    let home = fresh_home();
    mapshare(home.path())
        .assert()
        .success()
        .stdout(contains("No maps found."));
}

#[test]
fn test_upload_requires_login() {
    let home = fresh_home();
    mapshare(home.path())
        .args([
            "map",
            "upload",
            "--name",
            "Castle",
            "--description",
            "d",
            "--image-url",
            "u",
            "--tags",
            "pvp",
            "--code",
            "c",
        ])
        .assert()
        .failure()
        .stderr(contains("must be logged in"));
}

#[test]
fn test_register_upload_search_like() {
    let home = fresh_home();
    mapshare(home.path())
        .args(["register", "-u", "alice", "-e", "alice@example.com", "-p", "pw"])
        .assert()
        .success()
        .stdout(contains("alice"));

    let id = upload(home.path(), "Castle Siege", "pvp, castle");

    mapshare(home.path())
        .args(["map", "search", "castle"])
        .assert()
        .success()
        .stdout(contains("Castle Siege"));

    mapshare(home.path())
        .args(["map", "like", &id])
        .assert()
        .success()
        .stdout(contains("1 likes"));

    // Liking twice keeps a single like
    mapshare(home.path())
        .args(["map", "like", &id])
        .assert()
        .success()
        .stdout(contains("1 likes"));

    mapshare(home.path())
        .args(["map", "unlike", &id])
        .assert()
        .success()
        .stdout(contains("0 likes"));

    mapshare(home.path())
        .args(["map", "tags"])
        .assert()
        .success()
        .stdout(contains("castle"))
        .stdout(contains("pvp"));
}

#[test]
fn test_list_filters_by_tag() {
    let home = fresh_home();
    mapshare(home.path())
        .args(["register", "-u", "bob", "-e", "bob@example.com", "-p", "pw"])
        .assert()
        .success();
    upload(home.path(), "Parkour Run", "parkour");
    upload(home.path(), "Arena", "pvp");

    mapshare(home.path())
        .args(["map", "list", "--tag", "parkour"])
        .assert()
        .success()
        .stdout(contains("Parkour Run"))
        .stdout(contains("Arena").not());
}

#[test]
fn test_profile_hides_liked_from_other_viewers() {
    let home = fresh_home();
    mapshare(home.path())
        .args(["register", "-u", "carol", "-e", "carol@example.com", "-p", "pw"])
        .assert()
        .success();
    upload(home.path(), "Maze", "puzzle");

    mapshare(home.path())
        .args(["profile", "carol"])
        .assert()
        .success()
        .stdout(contains("1 maps uploaded"))
        .stdout(contains("Maze"));

    mapshare(home.path())
        .args(["profile", "dave", "--tab", "liked"])
        .assert()
        .success()
        .stdout(contains("only visible on your own profile"));
}

#[test]
fn test_unknown_map_is_reported() {
    let home = fresh_home();
    mapshare(home.path())
        .args(["map", "show", "missing"])
        .assert()
        .failure()
        .stderr(contains("Map not found"));
}

#[test]
fn test_save_and_unsave_show_on_own_profile() {
    let home = fresh_home();
    register(home.path(), "dana");
    let id = upload(home.path(), "Sky Race", "racing");

    mapshare(home.path())
        .args(["map", "save", &id])
        .assert()
        .success()
        .stdout(contains("Saved Sky Race"));

    mapshare(home.path())
        .args(["profile", "dana", "--tab", "saved"])
        .assert()
        .success()
        .stdout(contains("Sky Race"));

    mapshare(home.path())
        .args(["map", "unsave", &id])
        .assert()
        .success()
        .stdout(contains("Unsaved Sky Race"));

    mapshare(home.path())
        .args(["profile", "dana", "--tab", "saved"])
        .assert()
        .success()
        .stdout(contains("No maps found."));
}

#[test]
fn test_liked_tab_on_own_profile() {
    let home = fresh_home();
    register(home.path(), "erin");
    let id = upload(home.path(), "Lava Jump", "parkour");

    mapshare(home.path())
        .args(["profile", "erin", "--tab", "liked"])
        .assert()
        .success()
        .stdout(contains("No maps found."));

    mapshare(home.path())
        .args(["map", "like", &id])
        .assert()
        .success();

    mapshare(home.path())
        .args(["profile", "erin", "--tab", "liked"])
        .assert()
        .success()
        .stdout(contains("Lava Jump"))
        .stdout(contains("only visible on your own profile").not());
}

#[test]
fn test_comment_appears_on_map() {
    let home = fresh_home();
    register(home.path(), "frank");
    let id = upload(home.path(), "Tower", "build");

    mapshare(home.path())
        .args(["map", "comment", &id, "nice jumps"])
        .assert()
        .success()
        .stdout(contains("Comment added"));

    mapshare(home.path())
        .args(["map", "show", &id])
        .assert()
        .success()
        .stdout(contains("Comments (1)"))
        .stdout(contains("frank: nice jumps"));

    mapshare(home.path())
        .args(["map", "comment", &id, "   "])
        .assert()
        .failure()
        .stderr(contains("content is required"));
}

#[test]
fn test_mutations_require_login() {
    let home = fresh_home();
    register(home.path(), "gina");
    let id = upload(home.path(), "Bridge", "build");
    mapshare(home.path()).arg("logout").assert().success();

    for args in [
        vec!["map", "save", id.as_str()],
        vec!["map", "unsave", id.as_str()],
        vec!["map", "comment", id.as_str(), "hi"],
        vec!["passwd", "--old", "a", "--new", "b"],
    ] {
        mapshare(home.path())
            .args(&args)
            .assert()
            .failure()
            .stderr(contains("must be logged in"));
    }
}

#[test]
fn test_passwd_when_logged_in() {
    let home = fresh_home();
    register(home.path(), "hank");

    mapshare(home.path())
        .args(["passwd", "--old", "pw", "--new", "pw2"])
        .assert()
        .success()
        .stdout(contains("Password changed successfully"));
}

#[test]
fn test_invalid_cli_config_is_logged() {
    let home = fresh_home();
    let config_dir = home.path().join(".config").join("mapshare");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "default = 3").unwrap();

    mapshare(home.path())
        .args(["map", "list"])
        .assert()
        .success()
        .stdout(contains("No maps found."));

    assert!(read_logs(home.path()).contains("Ignoring invalid CLI config"));
}
