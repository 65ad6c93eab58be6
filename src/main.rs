use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use pdfscan::config::{self, Settings};
use pdfscan::error::ScanError;
use pdfscan::matcher::Matcher;
use pdfscan::types::{MatchMode, ScanProgress, SearchCriterion};
use pdfscan::{RunOutcome, format, prompt};

/// pdfscan: find which PDFs contain a string or pattern.
/// Writes one report listing the files that match and one listing those that don't.
/// Run without arguments for a guided prompt.
#[derive(Parser)]
#[command(
    name = "pdfscan",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PDFSCAN_BUILD_COMMIT"), ")"),
    about
)]
struct Cli {
    /// Text to search for (case-insensitive). A regex with --regex.
    pattern: Option<String>,

    /// PDF file or folder to scan.
    path: Option<PathBuf>,

    /// Treat PATTERN as a regular expression.
    #[arg(short = 'e', long)]
    regex: bool,

    /// Only scan PDFs directly inside PATH, not in subfolders.
    #[arg(long)]
    no_recursive: bool,

    /// Follow symbolic links while walking folders.
    #[arg(long)]
    follow_links: bool,

    /// Skip files and folders matching this glob. Repeatable.
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Folder the two reports are written to.
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// File name of the report listing matching PDFs.
    #[arg(long, value_name = "NAME")]
    matched_report: Option<String>,

    /// File name of the report listing PDFs without a match.
    #[arg(long, value_name = "NAME")]
    unmatched_report: Option<String>,

    /// Extra TOML config, layered over ./.pdfscan.toml.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Machine-readable JSON summary on stdout.
    #[arg(long)]
    json: bool,

    /// Don't draw a progress bar.
    #[arg(long)]
    no_progress: bool,

    /// More logging on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print shell completions for the given shell.
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "pdfscan", &mut io::stdout());
        return;
    }

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(outcome) => {
            if cli.json {
                match serde_json::to_string_pretty(&format::json(&outcome)) {
                    Ok(s) => println!("{s}"),
                    Err(e) => {
                        eprintln!("json error: {e}");
                        process::exit(1);
                    }
                }
            } else {
                println!("\n{}", format::summary(&outcome));
            }
        }
        Err(e) => {
            eprintln!("✘ {e}");
            process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<RunOutcome, ScanError> {
    let file_config = config::load_config(cli.config.as_deref())?;

    let mut walk = file_config.walk_options();
    if cli.no_recursive {
        walk.recursive = false;
    }
    if cli.follow_links {
        walk.follow_links = true;
    }
    if !cli.exclude.is_empty() {
        walk.exclude.clone_from(&cli.exclude);
    }

    let mut report = file_config.report_options();
    if let Some(dir) = &cli.output_dir {
        report.output_dir.clone_from(dir);
    }
    if let Some(name) = &cli.matched_report {
        report.matched_name.clone_from(name);
    }
    if let Some(name) = &cli.unmatched_report {
        report.unmatched_name.clone_from(name);
    }

    let fixed_mode = if cli.regex {
        Some(MatchMode::Pattern)
    } else {
        file_config.regex.map(|_| file_config.match_mode())
    };

    let cancel = AtomicBool::new(false);
    let show_progress = !cli.no_progress && !cli.json && io::stderr().is_terminal();
    let progress = progress_sink(show_progress, walk.recursive, cli.json);

    match (&cli.pattern, &cli.path) {
        (Some(pattern), Some(path)) => {
            let criterion =
                SearchCriterion::new(pattern, fixed_mode.unwrap_or(MatchMode::Literal))?;
            warn_if_invalid(&criterion);
            let settings = Settings {
                criterion,
                input: path.clone(),
                walk,
                report,
            };
            pdfscan::run(&settings, &cancel, progress)
        }
        _ if io::stdin().is_terminal() => {
            println!("— Search text in PDFs —\n");
            let answers = prompt::run(&mut io::stdin().lock(), &mut io::stdout(), fixed_mode, &walk)?;
            pdfscan::scan_and_report(
                &answers.criterion,
                &answers.input,
                &answers.candidates,
                &report,
                &cancel,
                progress,
            )
        }
        _ => {
            eprintln!("usage: pdfscan <PATTERN> <PATH> [--regex] [--no-recursive] [-o DIR]");
            process::exit(3);
        }
    }
}

/// A bad regex still runs (nothing will match), but the user hears about it once, up front.
/// The guided prompt does its own warning.
fn warn_if_invalid(criterion: &SearchCriterion) {
    if let Err(e) = Matcher::compile(criterion) {
        eprintln!("{}", format::invalid_pattern_warning(&e));
    }
}

/// Progress callback: announces the PDF count, then drives an indicatif bar.
fn progress_sink(show_bar: bool, recursive: bool, quiet: bool) -> impl FnMut(ScanProgress) {
    let mut bar: Option<ProgressBar> = None;

    move |event| match event {
        ScanProgress::Started { total } => {
            if !quiet {
                println!("{}\n", format::found_line(total, recursive));
            }
            if show_bar {
                let style = ProgressStyle::with_template(
                    "{spinner:.green} {msg} [{bar:40.green/dim}] {pos}/{len} (eta {eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> ");
                let pb = ProgressBar::new(total as u64);
                pb.set_style(style);
                pb.set_message("Scanning PDFs");
                pb.enable_steady_tick(Duration::from_millis(120));
                bar = Some(pb);
            }
        }
        ScanProgress::FileDone { .. } => {
            if let Some(pb) = &bar {
                pb.inc(1);
            }
        }
        ScanProgress::Finished { .. } => {
            if let Some(pb) = bar.take() {
                pb.finish_and_clear();
            }
        }
    }
}
