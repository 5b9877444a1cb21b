use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{
    history::MalformedHistoryPolicy,
    models::{Category, Priority},
    settings::StorageBackend,
};

#[derive(Parser, Debug)]
#[command(name = "feedback-intake")]
#[command(about = "Keyword-based customer feedback triage with a local history", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory for settings and history (overrides FEEDBACK_INTAKE_HOME)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Skip the simulated processing delay
    #[arg(long, global = true)]
    pub no_delay: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze feedback and add it to the history
    Submit(SubmitArgs),

    /// Show stored feedback, newest first
    History,

    /// Delete all stored feedback
    Clear {
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Write the history to feedback-analysis-<date>.json
    Export {
        /// Target directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Score text without storing anything
    Classify {
        text: String,
    },

    /// Show or change persisted settings
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Feedback text
    #[arg(long, short = 't')]
    pub text: String,

    #[arg(long, short = 'c', value_enum)]
    pub category: CategoryArg,

    #[arg(long, short = 'p', value_enum)]
    pub priority: PriorityArg,
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    #[arg(long, value_enum)]
    pub storage: Option<StorageArg>,

    /// Maximum number of records kept (1-10)
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Enable or disable the simulated delay
    #[arg(long)]
    pub latency: Option<bool>,

    /// Handling of unreadable stored history
    #[arg(long, value_enum)]
    pub malformed: Option<MalformedArg>,
}

impl ConfigArgs {
    pub fn has_changes(&self) -> bool {
        self.storage.is_some()
            || self.capacity.is_some()
            || self.latency.is_some()
            || self.malformed.is_some()
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum CategoryArg {
    Product,
    Service,
    Support,
    General,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Product => Category::Product,
            CategoryArg::Service => Category::Service,
            CategoryArg::Support => Category::Support,
            CategoryArg::General => Category::General,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
    Urgent,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
            PriorityArg::Urgent => Priority::Urgent,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StorageArg {
    Sqlite,
    Json,
    Memory,
}

impl From<StorageArg> for StorageBackend {
    fn from(arg: StorageArg) -> Self {
        match arg {
            StorageArg::Sqlite => StorageBackend::Sqlite,
            StorageArg::Json => StorageBackend::Json,
            StorageArg::Memory => StorageBackend::Memory,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum MalformedArg {
    Reset,
    Fail,
}

impl From<MalformedArg> for MalformedHistoryPolicy {
    fn from(arg: MalformedArg) -> Self {
        match arg {
            MalformedArg::Reset => MalformedHistoryPolicy::Reset,
            MalformedArg::Fail => MalformedHistoryPolicy::Fail,
        }
    }
}
