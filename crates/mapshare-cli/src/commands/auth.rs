use anyhow::{Context, Result};
use mapshare_core::AppCore;
use serde_json::json;
use std::sync::Arc;

use crate::cli::{LoginArgs, PasswdArgs, RegisterArgs};
use crate::output::{OutputFormat, json::print_json};

pub async fn register(
    core: Arc<AppCore>,
    args: RegisterArgs,
    format: OutputFormat,
) -> Result<()> {
    let identity = core
        .identity
        .register(&args.username, &args.email, &args.password)
        .await
        .context("Registration failed")?;

    if format.is_json() {
        return print_json(&identity);
    }

    println!("Registered and logged in as {}", identity.username);
    Ok(())
}

pub async fn login(core: Arc<AppCore>, args: LoginArgs, format: OutputFormat) -> Result<()> {
    let identity = core
        .identity
        .login(&args.email, &args.password)
        .await
        .context("Login failed")?;

    if format.is_json() {
        return print_json(&identity);
    }

    println!("Logged in as {}", identity.username);
    Ok(())
}

pub async fn logout(core: Arc<AppCore>, format: OutputFormat) -> Result<()> {
    let was_logged_in = core.identity.current().is_some();
    core.identity.logout().context("Logout failed")?;

    if format.is_json() {
        return print_json(&json!({ "logged_out": was_logged_in }));
    }

    if was_logged_in {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

pub async fn whoami(core: Arc<AppCore>, format: OutputFormat) -> Result<()> {
    let identity = core.identity.current();

    if format.is_json() {
        return print_json(&identity);
    }

    match identity {
        Some(identity) => {
            println!("Username: {}", identity.username);
            println!("Email:    {}", identity.email);
            println!("ID:       {}", identity.id);
        }
        None => println!("Not logged in"),
    }
    Ok(())
}

pub async fn change_password(
    core: Arc<AppCore>,
    args: PasswdArgs,
    format: OutputFormat,
) -> Result<()> {
    core.require_identity("change your password")?;
    core.identity
        .change_password(&args.old, &args.new)
        .await
        .context("Failed to change password")?;

    if format.is_json() {
        return print_json(&json!({ "changed": true }));
    }

    println!("Password changed successfully");
    Ok(())
}
