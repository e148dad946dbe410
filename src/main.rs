// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_kanban::config::Command;
use notion_kanban::formatting::{
    describe_field_options, render_cards, render_record, render_records, render_schema,
    render_users,
};
use notion_kanban::{
    AppError, CardFilter, CommandLineInput, KanbanConfig, NotionHttpClient, NotionManager, PageId,
};
use serde_json::Value;
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Console output goes to stderr so command output on stdout stays clean.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_kanban.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// The `id` of a created or updated object, for confirmation messages.
fn object_id(object: &Value) -> &str {
    object.get("id").and_then(Value::as_str).unwrap_or("?")
}

async fn run(manager: &NotionManager, command: Command) -> Result<(), AppError> {
    match command {
        Command::Schema => print!("{}", render_schema(manager.schema())),
        Command::Options => print!("{}", describe_field_options(manager.option_table())),
        Command::Cards {
            status,
            responsible,
            detailed,
        } => {
            let filter = CardFilter {
                responsible_id: responsible,
                status_name: status,
            };
            if detailed {
                let board = manager.fetch_board(&filter).await?;
                if board.is_empty() {
                    print!("{}", render_cards(&[]));
                }
                for (_, record) in &board {
                    print!("{}", render_record(record, manager.fields(), true, true));
                }
            } else {
                print!("{}", render_cards(&manager.fetch_cards(&filter).await?));
            }
        }
        Command::Page { page, detailed } => {
            let page_id = PageId::from_url_or_id(&page)?;
            let raw = manager.fetch_page(&page_id).await?;
            let record = manager.interpret(&raw, true).await?;
            print!("{}", render_record(&record, manager.fields(), detailed, false));
        }
        Command::Comments { page, detailed } => {
            let page_id = PageId::from_url_or_id(&page)?;
            let raw = manager.fetch_comments(&page_id).await?;
            let records = manager.interpret_all(&raw, true).await?;
            if records.is_empty() {
                println!("No comments on this page.");
            }
            print!("{}", render_records(&records, manager.fields(), detailed));
        }
        Command::Users => print!("{}", render_users(&manager.list_users().await?)),
        Command::Create { title, status } => {
            let created = manager.create_card(&title, status.as_deref()).await?;
            println!("✓ Created card '{}' ({})", title, object_id(&created));
        }
        Command::SetOption {
            page,
            field,
            option,
        } => {
            let page_id = PageId::from_url_or_id(&page)?;
            let updated = manager.update_option(&page_id, &field, &option).await?;
            println!("✓ Set '{}' to '{}' on {}", field, option, object_id(&updated));
        }
        Command::Comment {
            page,
            template,
            mentions,
        } => {
            let page_id = PageId::from_url_or_id(&page)?;
            let comment = manager.add_comment(&page_id, &template, &mentions).await?;
            println!("✓ Comment added ({})", object_id(&comment));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = KanbanConfig::resolve(&cli)?;
    let transport = Arc::new(NotionHttpClient::new(&config.api_key)?);

    let manager = NotionManager::connect(transport, config.database_id.clone(), config.fields)
        .await
        .with_context(|| format!("Could not load the schema of database {}", config.database_id))?;

    run(&manager, cli.command).await?;

    Ok(())
}
