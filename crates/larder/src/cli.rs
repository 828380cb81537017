use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "larder",
    version,
    about = "Check, preview and announce larder CMS documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Color mode
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the publication checklist
    Validate {
        #[command(subcommand)]
        target: ValidateTarget,
    },

    /// Print a plain-text outline of an article
    Preview {
        /// Article JSON file
        file: PathBuf,

        /// Media fixture file (array of media docs or {"docs": [...]})
        #[arg(long)]
        media: Option<PathBuf>,
    },

    /// Send the rebuild webhook for a committed document
    Webhook {
        /// Collection the document belongs to
        collection: larder_core::Collection,

        /// Committed document JSON file
        file: PathBuf,

        /// Change that was committed
        #[arg(long, value_enum, default_value = "update")]
        operation: OperationArg,

        /// Dispatch even outside production
        #[arg(long)]
        force: bool,
    },

    /// Translate texts through DeepL
    Translate {
        /// Target language (en, fr, es, pt-br, ar, or any DeepL code)
        #[arg(long)]
        target: String,

        /// Texts to translate
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ValidateTarget {
    /// Validate an article draft
    Article {
        /// Incoming change (JSON)
        file: PathBuf,

        /// Stored document the change applies to
        #[arg(long)]
        previous: Option<PathBuf>,

        /// Media fixture file
        #[arg(long, conflicts_with = "media_api")]
        media: Option<PathBuf>,

        /// CMS base URL for media lookups (key from LARDER_API_KEY)
        #[arg(long)]
        media_api: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OperationArg {
    Create,
    Update,
}

impl From<OperationArg> for larder_core::Operation {
    fn from(value: OperationArg) -> Self {
        match value {
            OperationArg::Create => larder_core::Operation::Create,
            OperationArg::Update => larder_core::Operation::Update,
        }
    }
}
