//! Input Sequence CLI Application
//!
//! Command-line front end for the input-seq library. It loads a profile
//! describing a simulated host and adds:
//! - Code table listing
//! - Binding validation and normalisation
//! - Scripted replay of bindings frame by frame
//! - Scripted recording with optional JSON report

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use input_seq::{grammar, InputClass, RecordMode};
use std::path::PathBuf;

mod config;
mod report;
mod session;

use config::{AppConfig, BindingConfig};
use session::Session;

/// Input Sequence tool - inspect, check, replay and record input bindings
#[derive(Parser, Debug)]
#[command(name = "input-seq-cli")]
#[command(about = "Inspect, check, replay and record input bindings", long_about = None)]
#[command(version)]
struct Args {
    /// Path to profile file (profile.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every code in the registry
    Codes,

    /// Validate every binding in the profile
    Check,

    /// Parse one sequence and show how it normalises
    Parse {
        /// Sequence text, e.g. "KEYCODE_LCONTROL OR JOYCODE_1_BUTTON1"
        text: String,

        /// Class used for the friendly label
        #[arg(long, value_enum, default_value = "digital")]
        class: ClassArg,
    },

    /// Evaluate every binding against the frame script
    Replay,

    /// Run the recorder against the frame script
    Record {
        /// Capture axis movement instead of key presses
        #[arg(long)]
        analog: bool,

        /// Add the recording as a new OR clause instead of replacing
        #[arg(long)]
        append: bool,

        /// Binding to use as the recording target
        #[arg(long, value_name = "NAME")]
        binding: Option<String>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ClassArg {
    Digital,
    Analog,
    AnalogInc,
    AnalogDec,
}

impl From<ClassArg> for InputClass {
    fn from(arg: ClassArg) -> Self {
        match arg {
            ClassArg::Digital => InputClass::Digital,
            ClassArg::Analog => InputClass::Analog,
            ClassArg::AnalogInc => InputClass::AnalogIncrement,
            ClassArg::AnalogDec => InputClass::AnalogDecrement,
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Input Sequence CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using input-seq library v{}", input_seq::VERSION);

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading profile from: {:?}", path);
            config::load_config(path)?
        }
        None => {
            log::debug!("No profile given, using an empty host");
            AppConfig::default()
        }
    };

    let mut session = Session::new(config)?;

    match args.command {
        Command::Codes => report::print_codes(session.registry()),
        Command::Check => {
            let checks = session.check();
            for summary in &checks {
                report::print_summary(summary);
            }
            let invalid = checks.iter().filter(|s| !s.is_valid()).count();
            if invalid > 0 {
                bail!("{} of {} bindings are invalid", invalid, checks.len());
            }
        }
        Command::Parse { text: input, class } => {
            let binding = BindingConfig {
                name: input.clone(),
                seq: input,
                class: class.into(),
            };
            let seq = session.parse(&binding.seq);
            log::debug!(
                "Parsed {} codes, grammar valid: {}",
                seq.len(),
                grammar::is_valid(&seq, session.registry())
            );
            if seq.is_empty() {
                log::warn!("Nothing parsed; the first token is unknown");
            }
            report::print_summary(&session.summarise(&binding, &seq));
        }
        Command::Replay => {
            let frames = session.replay()?;
            report::print_replay(&frames);
        }
        Command::Record {
            analog,
            append,
            binding,
            json,
        } => {
            let mode = if analog { RecordMode::Analog } else { RecordMode::Digital };
            let outcome = session.record(mode, binding.as_deref(), append)?;
            if json {
                println!("{}", report::RecordReport::new(&outcome, mode, append).to_json()?);
            } else {
                report::print_record(&outcome);
            }
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
