// src/config.rs
use crate::error::AppError;
use crate::types::{ApiKey, DatabaseId, FieldRegistry, TrackedField};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "NOTION_API_KEY";
pub const DATABASE_ID_ENV: &str = "NOTION_DATABASE_ID";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about = "Browse and update a Notion Kanban board", long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Database ID (overrides NOTION_DATABASE_ID)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// JSON file listing the tracked columns: [{"key", "id", "display_name"}]
    #[arg(long, global = true)]
    pub fields: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the database columns with their types and ids
    Schema,
    /// List the options of every status, select and multi-select column
    Options,
    /// List Kanban cards, newest due date first
    Cards {
        /// Only cards with this status name
        #[arg(long)]
        status: Option<String>,
        /// Only cards assigned to this user id
        #[arg(long)]
        responsible: Option<String>,
        /// Print every tracked field of each card
        #[arg(long, default_value_t = false)]
        detailed: bool,
    },
    /// Show one page, by URL or ID
    Page {
        page: String,
        #[arg(long, default_value_t = false)]
        detailed: bool,
    },
    /// Show the comments of a page, by URL or ID
    Comments {
        page: String,
        #[arg(long, default_value_t = false)]
        detailed: bool,
    },
    /// List workspace users
    Users,
    /// Create a card
    Create {
        title: String,
        /// Initial status name
        #[arg(long)]
        status: Option<String>,
    },
    /// Set a status or select column of a page to a named option
    SetOption {
        page: String,
        /// Tracked field key (e.g. "status") or column name
        field: String,
        option: String,
    },
    /// Comment on a page; each '@' in the template becomes a mention
    Comment {
        page: String,
        template: String,
        /// User id to mention, once per '@', in order
        #[arg(long = "mention")]
        mentions: Vec<String>,
    },
}

/// Resolved configuration, fixed for the lifetime of a manager.
#[derive(Debug, Clone)]
pub struct KanbanConfig {
    pub api_key: ApiKey,
    pub database_id: DatabaseId,
    pub fields: FieldRegistry,
}

impl KanbanConfig {
    /// Resolves configuration from CLI input and environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV).ok();
        let database = cli
            .database
            .clone()
            .or_else(|| std::env::var(DATABASE_ID_ENV).ok());
        Self::from_sources(api_key, database, cli.fields.as_deref())
    }

    pub fn from_sources(
        api_key: Option<String>,
        database: Option<String>,
        fields_path: Option<&Path>,
    ) -> Result<Self, AppError> {
        let api_key = api_key.ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", API_KEY_ENV))
        })?;
        let database = database.ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "no database given; pass --database or set {}",
                DATABASE_ID_ENV
            ))
        })?;

        let fields = match fields_path {
            Some(path) => load_field_registry(path)?,
            None => FieldRegistry::default(),
        };

        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            database_id: DatabaseId::parse(&database)?,
            fields,
        })
    }
}

/// Reads a tracked-field list from a JSON file.
pub fn load_field_registry(path: &Path) -> Result<FieldRegistry, AppError> {
    let content = std::fs::read_to_string(path)?;
    let fields: Vec<TrackedField> =
        serde_json::from_str(&content).map_err(|source| AppError::JsonParseError {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!("Loaded {} tracked fields from {}", fields.len(), path.display());
    Ok(FieldRegistry::new(fields)?)
}
