//! Command-line driver for the roast engine.
//!
//! Reads a commit log from a file or stdin, runs the analysis and prints
//! either a text summary with the roast or the full JSON result.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use roast_core::{AnalyzeOptions, AnalyzerConfig, FormatChoice, RoastResult};

#[derive(Parser, Debug)]
#[command(name = "roast")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Roast a developer from their commit log", long_about = None)]
pub struct Args {
    /// Log file to read (omit or use "-" for stdin)
    pub file: Option<PathBuf>,

    /// Log format: auto, simple or advanced
    #[arg(long, default_value = "auto")]
    pub format: FormatChoice,

    /// Only keep commits whose author matches this regex
    #[arg(long)]
    pub author: Option<String>,

    /// Only keep commits whose message matches this regex
    #[arg(long)]
    pub message: Option<String>,

    /// Only keep commits on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<NaiveDate>,

    /// Only keep commits on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<NaiveDate>,

    /// Analyzer configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        }
    }

    /// Map the flags onto analysis options, loading the config file if given.
    pub fn options(&self) -> Result<AnalyzeOptions> {
        let config = match &self.config {
            Some(path) => load_config(path)?,
            None => AnalyzerConfig::default(),
        };
        Ok(AnalyzeOptions {
            format: self.format,
            config,
            author: self.author.clone(),
            message: self.message.clone(),
            since: self.since,
            until: self.until,
        })
    }

    fn reads_stdin(&self) -> bool {
        match &self.file {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides `level`.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
            .ok();
    }
}

fn load_config(path: &Path) -> Result<AnalyzerConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

fn read_log(args: &Args, mut stdin: impl Read) -> Result<String> {
    match &args.file {
        Some(path) if !args.reads_stdin() => {
            debug!(path = %path.display(), "reading log file");
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read log file {}", path.display()))
        }
        _ => {
            debug!("reading log from stdin");
            let mut input = String::new();
            stdin
                .read_to_string(&mut input)
                .context("Failed to read log from stdin")?;
            Ok(input)
        }
    }
}

/// Run one analysis and write the result to `out`.
pub fn run(args: &Args, stdin: impl Read, out: &mut impl Write) -> Result<()> {
    let options = args.options()?;
    let input = read_log(args, stdin)?;
    let result = roast_core::analyze(&input, &options)?;

    if args.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        writeln!(out, "{}", json)?;
    } else {
        out.write_all(render_text(&result).as_bytes())?;
    }
    Ok(())
}

/// Human-readable summary followed by the roast.
pub fn render_text(result: &RoastResult) -> String {
    let p = &result.profile;
    let mut text = String::new();

    text.push_str(&format!(
        "Format:         {} ({} commits, {} lines skipped)\n",
        p.format, p.total_commits, p.skipped_lines
    ));
    text.push_str(&format!(
        "Period:         {} .. {} ({} active days)\n",
        p.first_commit, p.last_commit, p.active_days
    ));
    text.push_str(&format!(
        "Busiest day:    {} ({} commits)\n",
        p.busiest_day, p.busiest_day_count
    ));
    text.push_str(&format!("Longest streak: {} days\n", p.longest_streak));
    text.push_str(&format!("Commits/day:    {}\n", p.average_commits_per_day()));

    if !p.top_words.is_empty() {
        let words: Vec<String> = p
            .top_words
            .iter()
            .take(5)
            .map(|w| format!("{} ({})", w.word, w.count))
            .collect();
        text.push_str(&format!("Top words:      {}\n", words.join(", ")));
    }

    let dist = &p.time_of_day_distribution;
    text.push_str(&format!(
        "Time of day:    morning {}, afternoon {}, evening {}, night {}\n",
        dist.morning, dist.afternoon, dist.evening, dist.night
    ));

    if let Some(adv) = &p.advanced {
        text.push_str(&format!(
            "Top author:     {} ({} commits)\n",
            adv.top_author.name, adv.top_author.count
        ));
    }

    text.push('\n');
    text.push_str(&result.roast_text);
    text.push_str(&format!(
        "\n\nSeverity: {} (score {})\n",
        result.severity.as_str(),
        result.severity_score
    ));
    text
}
