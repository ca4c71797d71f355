//! lexa main entry point
//!
//! Reads study content from a file, renders it with the requested reading
//! aids and optionally narrates it through the platform speech engine.

use lexa::content::StudyContent;
use lexa::speech::{create_synth, NarrationState, VoicePreference};
use lexa::state::config::Config;
use lexa::state::ReaderState;
use lexa::{LexaError, Result};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

/// How often the narration loop checks for completion
const PUMP_INTERVAL: Duration = Duration::from_millis(50);

const USAGE: &str = "\
Usage: lexa [OPTIONS] FILE

Options:
  -d, --debug          Write debug logs to lexa.log
  -c, --config PATH    Read startup settings from PATH instead of ~/.lexa.cfg
      --bionic         Bold the start of each word
      --syllables      Break long words into approximate syllables
      --chunk          Turn multi-sentence paragraphs into bullets
      --zen            Enable zen mode (also enables the focus ruler)
      --adhd           Enable ADHD support (calmer narration pitch)
      --voice VOICE    Narrator voice: male or female
      --rate RATE      Narration rate, 0.5 to 1.5
      --speech-text    Print the text exactly as it would be spoken
      --speak          Narrate the content
  -h, --help           Show this help";

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    debug: bool,
    config: Option<PathBuf>,
    bionic: bool,
    syllables: bool,
    chunk: bool,
    zen: bool,
    adhd: bool,
    voice: Option<VoicePreference>,
    rate: Option<f32>,
    speech_text: bool,
    speak: bool,
    file: Option<PathBuf>,
}

impl Args {
    fn parse(mut raw: impl Iterator<Item = String>) -> Result<Self> {
        let mut args = Args::default();

        while let Some(arg) = raw.next() {
            match arg.as_str() {
                "-d" | "--debug" => args.debug = true,
                "-c" | "--config" => {
                    let path = raw.next().ok_or("--config needs a path")?;
                    args.config = Some(PathBuf::from(path));
                }
                "--bionic" => args.bionic = true,
                "--syllables" => args.syllables = true,
                "--chunk" => args.chunk = true,
                "--zen" => args.zen = true,
                "--adhd" => args.adhd = true,
                "--voice" => {
                    let voice = raw.next().ok_or("--voice needs male or female")?;
                    args.voice = Some(voice.parse()?);
                }
                "--rate" => {
                    let rate = raw.next().ok_or("--rate needs a number")?;
                    let rate = rate
                        .parse()
                        .map_err(|_| LexaError::InvalidSetting(format!("bad rate '{}'", rate)))?;
                    args.rate = Some(rate);
                }
                "--speech-text" => args.speech_text = true,
                "--speak" => args.speak = true,
                "-h" | "--help" => {
                    println!("{}", USAGE);
                    process::exit(0);
                }
                _ if arg.starts_with('-') => {
                    return Err(LexaError::Other(format!("Unknown option: {}", arg)));
                }
                _ => args.file = Some(PathBuf::from(arg)),
            }
        }

        Ok(args)
    }
}

fn main() {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    init_logging(args.debug);

    if let Err(e) = run(args) {
        error!("Fatal error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(debug_mode: bool) {
    if debug_mode {
        // Debug mode: write to lexa.log file
        use std::fs::OpenOptions;
        match OpenOptions::new().create(true).append(true).open("lexa.log") {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open lexa.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "lexa version {} starting (debug mode, logging to lexa.log)",
            lexa::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }
}

fn run(args: Args) -> Result<()> {
    let file = args.file.clone().ok_or("No input file given")?;

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    info!("Configuration loaded from {:?}", config.path());

    // Speech is only needed when narrating; without it narration is inert
    let synth = if args.speak {
        match create_synth() {
            Ok(synth) => Some(synth),
            Err(e) => {
                warn!("Speech unavailable: {}", e);
                eprintln!("Speech unavailable: {}", e);
                None
            }
        }
    } else {
        None
    };

    let mut state = ReaderState::from_config(&config, synth);
    apply_overrides(&mut state, &args)?;

    let content = StudyContent::load(&file)?;
    let version = state.load_content(content);
    debug!("Loaded {:?} as narrative v{}", file, version);

    if !state.summary().is_empty() {
        println!("TL;DR");
        for fact in state.summary() {
            println!("  - {}", fact);
        }
        println!();
    }

    if args.speech_text {
        println!("{}", state.speech_text());
    } else {
        println!("{}", state.render());
    }

    if args.speak {
        narrate(&mut state);
    }

    Ok(())
}

/// Command-line flags win over the config file
fn apply_overrides(state: &mut ReaderState, args: &Args) -> Result<()> {
    state.update_settings(|settings| -> Result<()> {
        if args.bionic {
            settings.set_bionic(true);
        }
        if args.syllables {
            settings.set_syllables(true);
        }
        if args.chunk {
            settings.set_micro_chunk(true);
        }
        if args.zen {
            settings.set_zen_mode(true);
        }
        if args.adhd {
            settings.set_adhd_support(true);
        }
        if let Some(voice) = args.voice {
            settings.set_voice(voice);
        }
        if let Some(rate) = args.rate {
            settings.set_speech_rate(rate)?;
        }
        Ok(())
    })
}

/// Narrate and wait for the platform to report completion
fn narrate(state: &mut ReaderState) {
    if state.start_narration() == NarrationState::Idle {
        eprintln!("Nothing was narrated");
        return;
    }

    info!("Narrating");
    while state.pump_narration() != NarrationState::Idle {
        thread::sleep(PUMP_INTERVAL);
    }
    info!("Narration finished");
}
