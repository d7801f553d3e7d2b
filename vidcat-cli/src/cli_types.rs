//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vidcat_catalog::types::{Role, UserStatus};

#[derive(Parser)]
#[command(name = "vidcat")]
#[command(about = "Manage a video catalog and its CSV imports", long_about = None)]
pub(crate) struct Cli {
    /// Path to the catalog database file (overrides settings)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List, import, export, and edit videos
    Videos {
        #[command(subcommand)]
        action: VideosAction,
    },

    /// List, import, export, and edit user accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Manage video series
    Series {
        #[command(subcommand)]
        action: SeriesAction,
    },

    /// Manage category tags
    Categories {
        #[command(subcommand)]
        action: CategoriesAction,
    },

    /// Seed, inspect, and reset the catalog database
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Show settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum VideosAction {
    /// Browse and search videos (newest first)
    List {
        /// Case-insensitive text matched against title and description
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Only videos tagged with this category
        #[arg(long)]
        category: Option<String>,

        /// Only videos in this series
        #[arg(long)]
        series: Option<String>,

        /// Only featured videos
        #[arg(long)]
        featured: bool,

        /// Only success stories
        #[arg(long)]
        success_stories: bool,

        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one video in full
    Show {
        /// Video ID
        id: String,
    },

    /// Add a single video
    Add {
        title: String,

        /// Vimeo URL or numeric id
        url: String,

        #[arg(long)]
        description: Option<String>,

        /// Defaults to "Admin"
        #[arg(long)]
        author: Option<String>,

        /// Series title (must exist)
        #[arg(long)]
        series: Option<String>,

        /// Categories, separated by '|' or ','
        #[arg(long)]
        categories: Option<String>,

        /// Display duration, "MM:SS"
        #[arg(long)]
        duration: Option<String>,

        #[arg(long)]
        featured: bool,

        #[arg(long)]
        success_story: bool,
    },

    /// Import videos from a CSV file
    Import {
        file: PathBuf,

        /// Write every row error to this file
        #[arg(long)]
        error_log: Option<PathBuf>,
    },

    /// Export all videos as CSV (stdout unless --output is given)
    Export {
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Field separator (overrides settings)
        #[arg(long)]
        separator: Option<char>,
    },

    /// Toggle the featured flag of a video
    Feature {
        /// Video ID
        id: String,
    },

    /// Delete a video
    Delete {
        /// Video ID
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum RoleArg {
    Admin,
    Client,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum StatusArg {
    Active,
    Pending,
    Disabled,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => Role::Admin,
            RoleArg::Client => Role::Client,
        }
    }
}

impl From<StatusArg> for UserStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => UserStatus::Active,
            StatusArg::Pending => UserStatus::Pending,
            StatusArg::Disabled => UserStatus::Disabled,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum UsersAction {
    /// List users (newest first)
    List {
        /// Case-insensitive text matched against email and client name
        #[arg(long, short = 's')]
        search: Option<String>,

        #[arg(long, value_enum)]
        role: Option<RoleArg>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Import users from a CSV file
    Import {
        file: PathBuf,

        /// Write every row error to this file
        #[arg(long)]
        error_log: Option<PathBuf>,
    },

    /// Export all users as CSV (stdout unless --output is given)
    Export {
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Field separator (overrides settings)
        #[arg(long)]
        separator: Option<char>,
    },

    /// Create a user account
    Add {
        email: String,

        /// Client (company) name
        client: String,

        #[arg(long, value_enum, default_value = "client")]
        role: RoleArg,
    },

    /// Change a user's status
    Status {
        email: String,

        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Delete a user account
    Delete { email: String },
}

#[derive(Subcommand)]
pub(crate) enum SeriesAction {
    /// List all series
    List,

    /// Create a series
    Add {
        title: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Rename a series (videos stay linked)
    Rename { old_title: String, new_title: String },

    /// Delete a series (videos are kept, unlinked)
    Delete { title: String },
}

#[derive(Subcommand)]
pub(crate) enum CategoriesAction {
    /// List categories with their video counts
    List,

    /// Create categories from a comma-separated list (e.g. "SAP, FIORI, Ventas")
    Add { names: String },

    /// Delete a category (videos are kept, untagged)
    Delete { name: String },
}

#[derive(Subcommand)]
pub(crate) enum CatalogAction {
    /// Load series, categories, and users from a YAML seed directory
    Seed {
        /// Directory containing series.yaml, categories.yaml, users.yaml
        dir: PathBuf,
    },

    /// Show catalog database statistics
    Stats {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show recent CSV import batches
    Imports {
        /// Maximum number of batches to show
        #[arg(long, default_value = "20")]
        limit: u32,
    },

    /// Delete the catalog database
    Reset {
        /// Confirm deletion
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and where they come from
    Show,

    /// Print the settings file path
    Path,
}
