use clap::{Parser, Subcommand, ValueEnum};

/// sortd — organize a directory by file type, date, or duplicate content
#[derive(Parser, Debug)]
#[command(
    name = "sortd",
    version,
    about = "Organize files by type or date and isolate duplicates",
    long_about = "sortd classifies the files in a directory by extension or by\n\
                  modification date and relocates them into category folders.\n\
                  It can also detect byte-identical duplicates, keep the oldest\n\
                  copy, and move the rest to _duplicates/.",
    after_help = "EXAMPLES:\n  \
        sortd organize ~/Downloads --by-type --dry-run     Preview a sort by file type\n  \
        sortd organize ~/Downloads --duplicates            Isolate duplicate files\n  \
        sortd organize ~/Inbox --by-date -o ~/Sorted       Date buckets, separate output root\n  \
        sortd organize ~/Downloads -r --by-type --by-date  Recursive, duplicates-safe ordering\n  \
        sortd config show                                  Show the active configuration"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode — minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Organize a directory
    Organize {
        /// Directory to organize
        source: String,

        /// Output directory (default: organize in place)
        #[arg(long, short, value_name = "DIR")]
        output: Option<String>,

        /// Preview without moving anything
        #[arg(long, short = 'n')]
        dry_run: bool,

        /// Include subdirectories (flattens into the output root)
        #[arg(long, short)]
        recursive: bool,

        /// Sort files into type categories (images, documents, ...)
        #[arg(long)]
        by_type: bool,

        /// Sort files into date buckets (this_week, this_month, older)
        #[arg(long)]
        by_date: bool,

        /// Detect duplicate content and move extras to _duplicates/
        #[arg(long)]
        duplicates: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset to default configuration
    Reset,

    /// Initialize the sortd data directory and default config
    Init,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
