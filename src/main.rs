use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::time::SystemTime;

use sortd::cli::args::{Cli, Commands, ConfigAction, OutputFormat};
use sortd::cli::output;
use sortd::common::config::Config;
use sortd::common::format;
use sortd::organizer::categorize::CategoryMap;
use sortd::organizer::pipeline::{self, RunOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("sortd=debug")
            .init();
    }

    match cli.command {
        Commands::Organize {
            ref source,
            ref output,
            dry_run,
            recursive,
            by_type,
            by_date,
            duplicates,
        } => cmd_organize(
            &cli,
            source,
            output.as_deref(),
            dry_run,
            recursive,
            by_type,
            by_date,
            duplicates,
        ),

        Commands::Config { ref action } => cmd_config(action),

        Commands::Completions { ref shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                sortd::cli::args::CompletionShell::Bash => clap_complete::Shell::Bash,
                sortd::cli::args::CompletionShell::Zsh => clap_complete::Shell::Zsh,
                sortd::cli::args::CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "sortd", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Expand a leading ~ to the home directory.
fn expand_path(path: &str) -> PathBuf {
    if path.starts_with('~') {
        let home = dirs::home_dir().unwrap_or_default();
        home.join(
            path.strip_prefix("~/")
                .unwrap_or_else(|| path.strip_prefix('~').unwrap_or(path)),
        )
    } else {
        PathBuf::from(path)
    }
}

// ─── Organize ─────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn cmd_organize(
    cli: &Cli,
    source: &str,
    output: Option<&str>,
    dry_run: bool,
    recursive: bool,
    by_type: bool,
    by_date: bool,
    duplicates: bool,
) -> Result<()> {
    let source = expand_path(source);
    if !source.is_dir() {
        anyhow::bail!("'{}' is not a valid directory", source.display());
    }
    let output_root = output.map(expand_path).unwrap_or_else(|| source.clone());

    let config = Config::load()?;
    let map = CategoryMap::default().with_overrides(&config.extensions)?;

    let show_progress = !cli.quiet && matches!(cli.format, OutputFormat::Human);

    if show_progress {
        println!();
        println!("  Source: {}", format::format_path(&source).cyan());
        println!("  Output: {}", format::format_path(&output_root).cyan());
        if dry_run {
            println!("  Mode:   {}", "dry run — no files will be moved".yellow());
        }
        if recursive {
            println!("  Note:   recursive mode flattens into the output root");
        }
    }

    let opts = RunOptions {
        source,
        output: output_root,
        dry_run,
        recursive,
        by_type,
        by_date,
        duplicates,
        show_progress,
    };

    let report = pipeline::run(&opts, &map, SystemTime::now())?;

    match cli.format {
        OutputFormat::Human => output::print_report(&report, cli.quiet),
        OutputFormat::Json => output::print_report_json(&report)?,
        OutputFormat::Quiet => output::print_report_quiet(&report),
    }

    Ok(())
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            Config::init_dirs()?;
            let config = Config::default();
            config.save()?;
            println!("  {} sortd initialized at ~/.sortd", "✓".green());
            Ok(())
        }
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("  {} Configuration reset to defaults", "✓".green());
            Ok(())
        }
    }
}
