pub mod analysis;
pub mod cli;
pub mod error;
pub mod history;
pub mod intake;
pub mod models;
pub mod render;
pub mod settings;
pub mod storage;
pub mod utils;

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use cli::{Cli, Command, ConfigArgs};
use history::{HistoryOptions, HistoryStore, DEFAULT_CAPACITY};
use intake::{FeedbackForm, IntakeController, LatencySimulator, RecordAssembler};
use render::TerminalRenderer;
use settings::{IntakeSettings, SettingsStore, StorageBackend};
use storage::{JsonFileStore, KeyValueStore, MemoryStore, SqliteStore};
use utils::SystemClock;

pub use error::IntakeError;
pub use models::FeedbackRecord;

const CLEAR_PROMPT: &str = "Are you sure you want to clear all feedback history?";

pub(crate) struct AppState {
    pub(crate) controller: IntakeController,
}

impl AppState {
    fn setup(data_dir: &Path, settings: &IntakeSettings) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let storage = open_storage(data_dir, settings.storage)?;
        let clock = Arc::new(SystemClock);
        let history = HistoryStore::load(
            storage,
            clock.clone(),
            HistoryOptions {
                capacity: settings.history_capacity,
                malformed_policy: settings.malformed_history,
            },
        )?;

        let latency = if settings.latency.enabled {
            LatencySimulator::uniform(settings.latency.min_ms..settings.latency.max_ms)
        } else {
            LatencySimulator::disabled()
        };

        let controller = IntakeController::new(
            RecordAssembler::new(clock),
            history,
            latency,
            Arc::new(TerminalRenderer::stdout()),
        );

        Ok(Self { controller })
    }
}

/// Open the durable backend selected in settings.
pub fn open_storage(data_dir: &Path, backend: StorageBackend) -> Result<Arc<dyn KeyValueStore>> {
    let storage: Arc<dyn KeyValueStore> = match backend {
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(
            data_dir.join("feedback-intake.sqlite3"),
        )?),
        StorageBackend::Json => Arc::new(JsonFileStore::new(data_dir.join("history"))?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(storage)
}

fn init_logging() {
    let level = if settings::env_flag(settings::DEBUG_ENV) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Reads RUST_LOG on top of the baseline level.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let data_dir = settings::resolve_data_dir(cli.data_dir.clone());
    let settings_store = SettingsStore::new(data_dir.join("settings.json"))?;

    match cli.command {
        Command::Config(args) => configure(&settings_store, &args),
        Command::Classify { text } => {
            classify(&text);
            Ok(())
        }
        command => {
            let mut settings = settings_store.current().with_env_overrides();
            if cli.no_delay {
                settings.latency.enabled = false;
            }

            let state = AppState::setup(&data_dir, &settings)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;
            runtime.block_on(dispatch(&state, command))
        }
    }
}

async fn dispatch(state: &AppState, command: Command) -> Result<()> {
    let controller = &state.controller;

    match command {
        Command::Submit(args) => {
            let category: models::Category = args.category.into();
            let priority: models::Priority = args.priority.into();
            let form = FeedbackForm::new(args.text, category.as_str(), priority.as_str());
            controller.submit(&form).await?;
        }
        Command::History => controller.show_history(),
        Command::Clear { yes } => {
            let cleared = controller.clear_history(|| yes || confirm_clear())?;
            if !cleared {
                println!("History left unchanged");
            }
        }
        Command::Export { out } => {
            let artifact = controller.export()?;
            let path = artifact.write_to_dir(&out)?;
            println!(
                "Exported {} records to {}",
                artifact.snapshot.total_feedback,
                path.display()
            );
        }
        Command::Classify { text } => classify(&text),
        Command::Config(_) => {}
    }

    Ok(())
}

fn confirm_clear() -> bool {
    dialoguer::Confirm::new()
        .with_prompt(CLEAR_PROMPT)
        .default(false)
        .interact()
        .unwrap_or_else(|err| {
            warn!("Confirmation prompt failed: {err}");
            false
        })
}

fn classify(text: &str) {
    let breakdown = analysis::analyze(text);
    println!(
        "Sentiment: {} ({})",
        breakdown.result.score, breakdown.result.label
    );
    println!("Positive keywords: {:?}", breakdown.positive_hits);
    println!("Negative keywords: {:?}", breakdown.negative_hits);
    println!("Words: {}", analysis::live_word_count(text));
}

fn configure(store: &SettingsStore, args: &ConfigArgs) -> Result<()> {
    let settings = if args.has_changes() {
        store.update(|settings| {
            if let Some(storage) = args.storage {
                settings.storage = storage.into();
            }
            if let Some(capacity) = args.capacity {
                settings.history_capacity = capacity.clamp(1, DEFAULT_CAPACITY);
            }
            if let Some(enabled) = args.latency {
                settings.latency.enabled = enabled;
            }
            if let Some(policy) = args.malformed {
                settings.malformed_history = policy.into();
            }
        })?
    } else {
        store.current()
    };

    println!("{}", serde_json::to_string_pretty(&settings)?);
    println!("(stored at {})", store.path().display());
    Ok(())
}
