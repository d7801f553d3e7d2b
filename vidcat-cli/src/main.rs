//! vidcat CLI
//!
//! Command-line interface for managing a video catalog: browsing, bulk CSV
//! import/export, and editing of videos, users, series, and categories.

mod cli_types;
mod commands;
mod error;
mod logging;
mod progress;
mod settings;

use clap::Parser;

use cli_types::{
    CatalogAction, CategoriesAction, Cli, Commands, ConfigAction, SeriesAction, UsersAction,
    VideosAction,
};
pub(crate) use error::CliError;
use settings::Settings;

/// Log an empty line (respects `--quiet`).
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let db_path = settings.db_path(cli.db);
    let quiet = cli.quiet;

    match cli.command {
        Commands::Videos { action } => match action {
            VideosAction::List {
                search,
                category,
                series,
                featured,
                success_stories,
                limit,
                json,
            } => {
                let filter = vidcat_db::VideoFilter {
                    text: search,
                    category,
                    series,
                    featured: featured.then_some(true),
                    success_story: success_stories.then_some(true),
                    limit,
                };
                commands::videos::run_videos_list(&db_path, &filter, json)
            }
            VideosAction::Show { id } => commands::videos::run_videos_show(&db_path, &id),
            VideosAction::Add {
                title,
                url,
                description,
                author,
                series,
                categories,
                duration,
                featured,
                success_story,
            } => commands::videos::run_videos_add(
                &db_path,
                commands::videos::AddVideoArgs {
                    title,
                    url,
                    description,
                    author,
                    series,
                    categories,
                    duration,
                    featured,
                    success_story,
                },
            ),
            VideosAction::Import { file, error_log } => commands::videos::run_videos_import(
                &db_path,
                &file,
                error_log.as_deref(),
                &settings,
                quiet,
            ),
            VideosAction::Export { output, separator } => commands::videos::run_videos_export(
                &db_path,
                output.as_deref(),
                settings.separator(separator)?,
            ),
            VideosAction::Feature { id } => commands::videos::run_videos_feature(&db_path, &id),
            VideosAction::Delete { id } => commands::videos::run_videos_delete(&db_path, &id),
        },
        Commands::Users { action } => match action {
            UsersAction::List { search, role, json } => {
                let filter = vidcat_db::UserFilter {
                    text: search,
                    role: role.map(Into::into),
                };
                commands::users::run_users_list(&db_path, &filter, json)
            }
            UsersAction::Import { file, error_log } => commands::users::run_users_import(
                &db_path,
                &file,
                error_log.as_deref(),
                &settings,
                quiet,
            ),
            UsersAction::Export { output, separator } => commands::users::run_users_export(
                &db_path,
                output.as_deref(),
                settings.separator(separator)?,
            ),
            UsersAction::Add {
                email,
                client,
                role,
            } => commands::users::run_users_add(&db_path, &email, &client, role.into()),
            UsersAction::Status { email, status } => {
                commands::users::run_users_status(&db_path, &email, status.into())
            }
            UsersAction::Delete { email } => commands::users::run_users_delete(&db_path, &email),
        },
        Commands::Series { action } => match action {
            SeriesAction::List => commands::series::run_series_list(&db_path),
            SeriesAction::Add { title, description } => {
                commands::series::run_series_add(&db_path, &title, description.as_deref())
            }
            SeriesAction::Rename {
                old_title,
                new_title,
            } => commands::series::run_series_rename(&db_path, &old_title, &new_title),
            SeriesAction::Delete { title } => commands::series::run_series_delete(&db_path, &title),
        },
        Commands::Categories { action } => match action {
            CategoriesAction::List => commands::categories::run_categories_list(&db_path),
            CategoriesAction::Add { names } => {
                commands::categories::run_categories_add(&db_path, &names)
            }
            CategoriesAction::Delete { name } => {
                commands::categories::run_categories_delete(&db_path, &name)
            }
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Seed { dir } => {
                commands::catalog::seed::run_catalog_seed(&db_path, &dir)
            }
            CatalogAction::Stats { json } => {
                commands::catalog::stats::run_catalog_stats(&db_path, json)
            }
            CatalogAction::Imports { limit } => {
                commands::catalog::imports::run_catalog_imports(&db_path, limit)
            }
            CatalogAction::Reset { confirm } => {
                commands::catalog::reset::run_catalog_reset(&db_path, confirm)
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings, &db_path),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }
}
