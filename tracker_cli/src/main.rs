use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracker_core::action_info::{JsonlSink, TracingSink, WriterSink};
use tracker_core::*;

/// Walks shown when no subcommand is given
const DEMO_STEPS: &[&str] = &[
    "678,0h50m",
    "792,1h14m",
    "1078,1h30m",
    "7830,2h40m",
    ",3456",
    "12:40:00, 3456",
    "something is wrong",
];

/// Trainings shown when no subcommand is given
const DEMO_TRAININGS: &[&str] = &[
    "3456,Ходьба,3h00m",
    "something is wrong",
    "678,Бег,0h5m",
    "1078,Бег,0h10m",
    ",3456 Ходьба",
    "7892,Ходьба,3h10m",
    "15392,Бег,0h45m",
    "1000,Плавание,1h",
];

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Activity tracker: distance, speed and calories from step logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the profile name
    #[arg(long, global = true)]
    name: Option<String>,

    /// Override the profile weight (kg)
    #[arg(long, global = true, allow_negative_numbers = true)]
    weight: Option<f64>,

    /// Override the profile height (m)
    #[arg(long, global = true, allow_negative_numbers = true)]
    height: Option<f64>,

    /// Output format for record reports
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Report daily walks ("<steps>,<duration>", e.g. 678,0h50m)
    Steps(RecordArgs),

    /// Report trainings ("<steps>,<type>,<duration>", e.g. 3456,Бег,0h45m)
    Training(RecordArgs),

    /// Show the active profile
    Profile,
}

#[derive(Args)]
struct RecordArgs {
    /// Records to process
    records: Vec<String>,

    /// Read one record per line from a file ("-" for stdin)
    #[arg(long, short)]
    file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain-text reports on stdout
    Text,
    /// One JSON object per record on stdout
    Json,
    /// Reports and errors through the log on stderr
    Log,
}

fn main() -> Result<()> {
    // Initialize logging
    tracker_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let profile = resolve_profile(&config, &cli);
    if let Err(e) = profile.validate() {
        tracing::warn!("Profile is invalid, reports will fail: {}", e);
    }

    match cli.command {
        Some(Commands::Steps(args)) => {
            let records = collect_records(&args)?;
            run_batch("steps", records.as_slice(), &mut DaySteps::new(profile), cli.format)
        }
        Some(Commands::Training(args)) => {
            let records = collect_records(&args)?;
            run_batch("training", records.as_slice(), &mut Training::new(profile), cli.format)
        }
        Some(Commands::Profile) => {
            print!("{}", profile);
            Ok(())
        }
        None => cmd_demo(profile, cli.format),
    }
}

/// Configured profile with command-line overrides applied
fn resolve_profile(config: &Config, cli: &Cli) -> Profile {
    let mut profile = config.profile();
    if let Some(name) = &cli.name {
        profile.name = name.clone();
    }
    if let Some(weight) = cli.weight {
        profile.weight = weight;
    }
    if let Some(height) = cli.height {
        profile.height = height;
    }
    profile
}

fn cmd_demo(profile: Profile, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Text {
        print!("{}", profile);
    }

    run_batch("steps", DEMO_STEPS, &mut DaySteps::new(profile.clone()), format)?;
    run_batch("training", DEMO_TRAININGS, &mut Training::new(profile), format)
}

fn run_batch<S: AsRef<str>>(
    label: &str,
    records: &[S],
    parser: &mut dyn DataParser,
    format: OutputFormat,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = match format {
        OutputFormat::Text => {
            let mut sink = WriterSink::new(&mut out);
            info(records, parser, &mut sink)
        }
        OutputFormat::Json => {
            let mut sink = JsonlSink::new(&mut out);
            info(records, parser, &mut sink)
        }
        OutputFormat::Log => info(records, parser, &mut TracingSink),
    };
    out.flush()?;

    tracing::info!(
        batch = label,
        total = summary.total,
        reported = summary.reported,
        parse_failures = summary.parse_failures,
        report_failures = summary.report_failures,
        "Batch complete"
    );
    Ok(())
}

/// Records from positional arguments followed by those in `--file`
fn collect_records(args: &RecordArgs) -> Result<Vec<String>> {
    let mut records = args.records.clone();

    if let Some(path) = &args.file {
        records.extend(read_records(path)?);
    }

    if records.is_empty() {
        tracing::warn!("No records given");
    }
    Ok(records)
}

fn read_records(path: &Path) -> Result<Vec<String>> {
    let reader: Box<dyn BufRead> = if path == Path::new("-") {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(std::fs::File::open(path)?))
    };

    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(line);
    }

    tracing::debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}
