mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "plink", version, about = "Turn phrases into links to the notes they name")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved settings
    Doctor,

    /// Build the link index from the vault and print statistics
    Reindex(ReindexArgs),

    /// Look up link targets by prefix and fuzzy match
    Search(SearchArgs),

    /// Suggest link targets for the phrase around a cursor
    Suggest(SuggestArgs),

    /// Link the phrase around a cursor to an exactly matching target
    Link(LinkArgs),
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Quiet,
}

#[derive(Debug, Args)]
pub struct ReindexArgs {
    /// Print every indexed document
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look up
    pub query: String,

    /// Maximum number of results
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long)]
    pub json: bool,

    /// Print link texts only
    #[arg(short, long)]
    pub quiet: bool,
}

/// A line of text and a byte offset into it.
#[derive(Debug, Args)]
pub struct CursorArgs {
    /// The line being edited
    #[arg(long)]
    pub line: String,

    /// Cursor position as a byte offset into the line (default: end of line)
    #[arg(long)]
    pub cursor: Option<usize>,
}

impl CursorArgs {
    pub fn cursor(&self) -> usize {
        self.cursor.unwrap_or(self.line.len())
    }
}

#[derive(Debug, Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub at: CursorArgs,

    /// Maximum number of targets listed
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Print the suggestion as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct LinkArgs {
    #[command(flatten)]
    pub at: CursorArgs,

    /// Print the edit as JSON instead of the rewritten line
    #[arg(long)]
    pub json: bool,
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::Reindex(args) => cmd::reindex::run(config, profile, args.verbose),
        Commands::Search(args) => cmd::search::run(config, profile, args),
        Commands::Suggest(args) => cmd::suggest::run(config, profile, args),
        Commands::Link(args) => cmd::link::run(config, profile, args),
    }
}
