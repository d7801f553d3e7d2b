use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;
use vidcat_catalog::types::{Role, User, UserStatus};
use vidcat_db::UserFilter;
use vidcat_import::ImportKind;

use crate::CliError;
use crate::settings::Settings;

use super::{open_db, open_existing_db, print_json, truncate_str};

fn require_user(conn: &Connection, email: &str) -> Result<User, CliError> {
    vidcat_db::find_user_by_email(conn, email)
        .map_err(|e| CliError::database(e.to_string()))?
        .ok_or_else(|| CliError::not_found(format!("user '{}'", email)))
}

fn status_label(status: UserStatus) -> String {
    match status {
        UserStatus::Active => status
            .as_str()
            .if_supports_color(Stdout, |t| t.green())
            .to_string(),
        UserStatus::Pending => status
            .as_str()
            .if_supports_color(Stdout, |t| t.yellow())
            .to_string(),
        UserStatus::Disabled => status
            .as_str()
            .if_supports_color(Stdout, |t| t.dimmed())
            .to_string(),
    }
}

pub(crate) fn run_users_list(
    db_path: &Path,
    filter: &UserFilter,
    json: bool,
) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };
    let users = vidcat_db::list_users(&conn, filter)
        .map_err(|e| CliError::database(format!("Failed to list users: {}", e)))?;

    if json {
        return print_json(&users);
    }

    if users.is_empty() {
        log::info!("No users match.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{} user(s)", users.len()).if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    for user in &users {
        log::info!(
            "  {:<40}  {:<30}  {:<6}  {}",
            truncate_str(&user.email, 40),
            truncate_str(&user.client_name, 30),
            user.role.as_str(),
            status_label(user.status),
        );
    }

    Ok(())
}

pub(crate) fn run_users_import(
    db_path: &Path,
    file: &Path,
    error_log: Option<&Path>,
    settings: &Settings,
    quiet: bool,
) -> Result<(), CliError> {
    super::csv_import::run_csv_import(ImportKind::Users, db_path, file, error_log, settings, quiet)
}

pub(crate) fn run_users_export(
    db_path: &Path,
    output: Option<&Path>,
    separator: char,
) -> Result<(), CliError> {
    let conn = open_db(db_path)?;
    let users = vidcat_db::list_users(&conn, &UserFilter::default())
        .map_err(|e| CliError::database(format!("Failed to list users: {}", e)))?;
    let csv =
        vidcat_import::export_users(&users, separator).map_err(|e| CliError::csv(e.to_string()))?;
    super::write_output(output, &csv)?;

    if let Some(path) = output {
        log::info!(
            "{} Exported {} user(s) to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            users.len(),
            path.display(),
        );
    }
    Ok(())
}

pub(crate) fn run_users_add(
    db_path: &Path,
    email: &str,
    client: &str,
    role: Role,
) -> Result<(), CliError> {
    let email = email.trim();
    let client = client.trim();
    if email.is_empty() || client.is_empty() {
        return Err(CliError::other("Email and client name are required"));
    }

    let conn = open_db(db_path)?;
    vidcat_db::create_user(&conn, email, client, role, UserStatus::Pending).map_err(|e| {
        match e {
            vidcat_db::OperationError::AlreadyExists { .. } => {
                CliError::other(format!("User '{}' already exists", email))
            }
            e => CliError::database(e.to_string()),
        }
    })?;

    log::info!(
        "{} Added {} ({}, {})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        email,
        client,
        role,
    );
    Ok(())
}

pub(crate) fn run_users_status(
    db_path: &Path,
    email: &str,
    status: UserStatus,
) -> Result<(), CliError> {
    let conn = open_db(db_path)?;
    let user = require_user(&conn, email)?;
    vidcat_db::set_user_status(&conn, &user.id, status)
        .map_err(|e| CliError::database(e.to_string()))?;
    log::info!("{} is now {}", email, status_label(status));
    Ok(())
}

pub(crate) fn run_users_delete(db_path: &Path, email: &str) -> Result<(), CliError> {
    let conn = open_db(db_path)?;
    let user = require_user(&conn, email)?;
    vidcat_db::delete_user(&conn, &user.id).map_err(|e| CliError::database(e.to_string()))?;
    log::info!(
        "{} Deleted user {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        email,
    );
    Ok(())
}
