use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use count_coins::pipeline::{count_coins, TallyError};
use count_coins::sink::{ImageFileSink, ResultSink, WindowSink};
use count_coins::TallyParams;

#[derive(Parser)]
#[command(name = "count_coins")]
#[command(about = "Tally coin money from a photo with four reference markers")]
struct Cli {
    /// Path to the input photograph
    #[arg(value_name = "IMAGE", default_value = "test-img/18.png")]
    image_path: PathBuf,

    /// JSON file overriding the pipeline parameters
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the tally without opening a result window
    #[arg(long)]
    headless: bool,

    /// Save the annotated image here instead of (or besides) showing it
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Override the clustering seed from the config
    #[arg(long)]
    seed: Option<u64>,

    /// Override the expected reference markers per size class
    #[arg(long)]
    refs: Option<u32>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();

    let mut params = match &args.config {
        Some(path) => match TallyParams::from_file(path) {
            Ok(params) => params,
            Err(err) => {
                eprintln!("{err:#}");
                return ExitCode::FAILURE;
            }
        },
        None => TallyParams::default(),
    };
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    if let Some(refs) = args.refs {
        params.refs_per_class = refs;
    }

    let path = args.image_path.to_string_lossy();
    let outcome = match count_coins(&path, &params) {
        Ok(outcome) => outcome,
        Err(err) => {
            // The two recognized terminal failures go to stdout in the
            // report language; anything else is an internal error.
            return match err {
                TallyError::UnreadableImage { .. } => {
                    println!("{err}");
                    ExitCode::from(1)
                }
                TallyError::TooFewObjects { .. } => {
                    println!("{err}");
                    ExitCode::from(2)
                }
                other => {
                    eprintln!("{other}");
                    ExitCode::FAILURE
                }
            };
        }
    };

    println!("{}", outcome.report);

    if let Some(save) = &args.save {
        let mut sink = ImageFileSink {
            path: save.to_string_lossy().into_owned(),
        };
        if let Err(err) = sink.present(&outcome) {
            eprintln!("{err:#}");
            return ExitCode::FAILURE;
        }
    }
    if !args.headless {
        let mut sink = WindowSink::default();
        if let Err(err) = sink.present(&outcome) {
            eprintln!("{err:#}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
