//! json-lens CLI
//!
//! Path-aware queries over JSON and YAML documents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use json_lens_core::{
    format_output, format_value, match_all_keys, match_first_key, match_index, match_key,
    match_key_pattern, parse_file, parse_str, InputFormat, Matcher, OutputFormat, Path,
    TraversalConfig, Traverser, Value,
};
use regex::Regex;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::fmt::SubscriberBuilder;

/// Path-aware queries over JSON and YAML documents
#[derive(Parser)]
#[command(name = "json-lens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Path-aware queries over JSON and YAML documents")]
#[command(long_about = r#"
json-lens: Path-Aware Queries over JSON Documents

Walks every node of a document, records the path taken to reach it and
reports the nodes a matcher selects, together with their paths.

Input formats:
  - JSON (default, .json)
  - YAML (.yaml, .yml)

Output formats:
  - JSON (default) - Structured JSON for programmatic use
  - YAML - Human-readable YAML format
  - ANSI - Colorful terminal output
  - Summary - One line per match

Exit status is 1 when nothing matched.

Examples:
  json-lens key name data.json          # Every value stored under "name"
  json-lens keys --pattern '^id' -      # Keys matching a regex, from stdin
  json-lens first-key data.yaml         # First key/value pair in the document
  json-lens index 0 data.json           # First element of every array
  json-lens get '["users", 0]' data.json  # Direct lookup by path
"#)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormatArg::Json)]
    pub format: OutputFormatArg,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Input format (default: from file extension, JSON for stdin)
    #[arg(long, global = true, value_enum)]
    pub input_format: Option<InputFormatArg>,

    /// Stop after this many matches
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    /// Do not descend below this depth (0 = root only)
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Find every value stored under a key, at any depth
    Key {
        /// Key to look for
        name: String,

        /// Input file, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Find every key/value pair, at any depth
    Keys {
        /// Only keys matching this regular expression
        #[arg(short, long)]
        pattern: Option<String>,

        /// Input file, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Find the first key/value pair in document order
    FirstKey {
        /// Input file, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Find every array element at an index, at any depth
    Index {
        /// Array index (0-based)
        index: usize,

        /// Input file, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Look up the value at a path given as a JSON array, e.g. '["a", 0]'
    Get {
        /// Path to resolve
        path: String,

        /// Input file, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
}

/// Output format argument
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Ansi,
    Summary,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Ansi => OutputFormat::Ansi,
            OutputFormatArg::Summary => OutputFormat::Summary,
        }
    }
}

/// Input format argument
#[derive(ValueEnum, Clone, Debug)]
pub enum InputFormatArg {
    Json,
    Yaml,
}

impl From<InputFormatArg> for InputFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Json => InputFormat::Json,
            InputFormatArg::Yaml => InputFormat::Yaml,
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match &args.command {
        Commands::Key { name, input } => run_query(input, &mut match_key(name.as_str()), &args),
        Commands::Keys { pattern, input } => match pattern {
            Some(pattern) => {
                let regex = Regex::new(pattern)
                    .with_context(|| format!("Invalid key pattern: {}", pattern))?;
                run_query(input, &mut match_key_pattern(regex), &args)
            }
            None => run_query(input, &mut match_all_keys(), &args),
        },
        Commands::FirstKey { input } => run_query(input, &mut match_first_key(), &args),
        Commands::Index { index, input } => run_query(input, &mut match_index(*index), &args),
        Commands::Get { path, input } => run_get(path, input, &args),
    }
}

/// Install the stderr log subscriber
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build traversal configuration from args
fn build_config(args: &Args) -> TraversalConfig {
    let mut config = TraversalConfig::new();

    if let Some(limit) = args.limit {
        config = config.with_match_limit(limit);
    }

    if let Some(max_depth) = args.max_depth {
        config = config.with_max_depth(max_depth);
    }

    config
}

fn run_query(input: &PathBuf, matcher: &mut dyn Matcher, args: &Args) -> Result<ExitCode> {
    let value = load_input(input, args)?;

    let traverser = Traverser::new(build_config(args)).context("Invalid traversal options")?;
    let result = traverser.run(&value, matcher);

    let format: OutputFormat = args.format.clone().into();
    let output = format_output(&result, format)?;
    write_output(&output, args.output.as_ref())?;

    Ok(if result.is_empty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn run_get(path: &str, input: &PathBuf, args: &Args) -> Result<ExitCode> {
    let path: Path = path
        .parse()
        .with_context(|| format!("Invalid path (expected a JSON array of keys and indices): {}", path))?;
    let value = load_input(input, args)?;

    match value.get(&path) {
        Some(found) => {
            let format: OutputFormat = args.format.clone().into();
            let output = format_value(found, format)?;
            write_output(&output, args.output.as_ref())?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("No value at {}", path);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Read and parse the input document, from a file or stdin
fn load_input(input: &PathBuf, args: &Args) -> Result<Value> {
    let format: Option<InputFormat> = args.input_format.clone().map(Into::into);

    // Show progress spinner
    let spinner = if args.verbose > 0 && atty::is(atty::Stream::Stderr) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Parsing input...");
        Some(pb)
    } else {
        None
    };

    let value = if input.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        parse_str(&source, format.unwrap_or_default()).context("Failed to parse stdin")?
    } else {
        parse_file(input, format)
            .with_context(|| format!("Failed to parse {}", input.display()))?
    };

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!("Parsed {}", input.display()));
    }

    Ok(value)
}

fn write_output(output: &str, path: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, output).context("Failed to write output file")?;
    } else {
        println!("{}", output);
    }
    Ok(())
}
