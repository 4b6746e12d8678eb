mod form;
mod render;

use anyhow::{Context, Result};
use artifacts::{
    ArtifactPaths, ArtifactStore, DEFAULT_MAIN_ENCODER_FILE, DEFAULT_MODEL_FILE,
    DEFAULT_SUB_ENCODER_FILE,
};
use clap::{Parser, Subcommand, ValueEnum};
use pipeline::features::{DEFAULT_PRICE, DEFAULT_RATING, DEFAULT_REVIEW_COUNT};
use pipeline::{BookInput, GenreOptions, Predictor, VerdictPolicy};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, error, info};

/// Amazon Bestseller Predictor
#[derive(Parser)]
#[command(name = "bestseller")]
#[command(about = "Predict whether a book will become an Amazon bestseller", long_about = None)]
struct Cli {
    /// Directory holding the model and encoder files
    #[arg(short, long, global = true, default_value = "artifacts")]
    artifacts_dir: PathBuf,

    /// Model file, relative to the artifacts directory
    #[arg(long, global = true, default_value = DEFAULT_MODEL_FILE)]
    model_file: PathBuf,

    /// Main genre encoder file, relative to the artifacts directory
    #[arg(long, global = true, default_value = DEFAULT_MAIN_ENCODER_FILE)]
    main_encoder_file: PathBuf,

    /// Sub genre encoder file, relative to the artifacts directory
    #[arg(long, global = true, default_value = DEFAULT_SUB_ENCODER_FILE)]
    sub_encoder_file: PathBuf,

    /// How text labels are turned into a verdict
    #[arg(long, global = true, value_enum, default_value_t = PolicyArg::NegationAware)]
    verdict_policy: PolicyArg,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// "Not Bestseller" is NOT a bestseller
    NegationAware,
    /// Any label containing "bestseller" is a bestseller
    Substring,
}

impl From<PolicyArg> for VerdictPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::NegationAware => VerdictPolicy::NegationAware,
            PolicyArg::Substring => VerdictPolicy::Substring,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the book form interactively (default)
    Form,

    /// Predict a single book and exit
    Predict {
        /// Price in dollars
        #[arg(long, default_value_t = DEFAULT_PRICE)]
        price: f64,

        /// Average rating, 0.0 to 5.0
        #[arg(long, default_value_t = DEFAULT_RATING)]
        rating: f64,

        /// Number of people who rated the book
        #[arg(long, default_value_t = DEFAULT_REVIEW_COUNT)]
        reviews: u32,

        /// Main genre (defaults to the first known genre)
        #[arg(long)]
        main_genre: Option<String>,

        /// Sub genre (defaults to the first known genre)
        #[arg(long)]
        sub_genre: Option<String>,
    },

    /// Show the loaded model and encoders
    Info,
}

impl Cli {
    fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(
            self.artifacts_dir.join(&self.model_file),
            self.artifacts_dir.join(&self.main_encoder_file),
            self.artifacts_dir.join(&self.sub_encoder_file),
        )
    }
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so they never mix with the form
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(cli, stdin.lock(), &mut stdout.lock())
}

/// Load the artifacts and dispatch the command.
fn run<R: BufRead, W: Write>(cli: Cli, input: R, out: &mut W) -> Result<ExitCode> {
    render::title(out)?;

    let start = Instant::now();
    let store = ArtifactStore::new(cli.artifact_paths());
    let artifacts = match store.load() {
        Ok(artifacts) => artifacts,
        Err(e) => {
            error!("Error loading models: {}", e);
            render::load_failure(out, &e)?;
            return Ok(ExitCode::FAILURE);
        }
    };
    info!("Loaded artifacts in {:?}", start.elapsed());

    let predictor = Predictor::new(artifacts).with_policy(cli.verdict_policy.into());

    match cli.command.unwrap_or(Commands::Form) {
        Commands::Form => handle_form(&predictor, input, out),
        Commands::Predict {
            price,
            rating,
            reviews,
            main_genre,
            sub_genre,
        } => handle_predict(&predictor, out, price, rating, reviews, main_genre, sub_genre),
        Commands::Info => handle_info(&predictor, out),
    }
}

/// Handle the 'form' command
fn handle_form<R: BufRead, W: Write>(predictor: &Predictor, input: R, out: &mut W) -> Result<ExitCode> {
    let mut form = form::Form::new(predictor, input, out);
    form.run().context("Form session failed")?;
    debug!("Form closed with {:?}", form.state());
    Ok(ExitCode::SUCCESS)
}

/// Handle the 'predict' command
fn handle_predict<W: Write>(
    predictor: &Predictor,
    out: &mut W,
    price: f64,
    rating: f64,
    reviews: u32,
    main_genre: Option<String>,
    sub_genre: Option<String>,
) -> Result<ExitCode> {
    let defaults = GenreOptions::from_artifacts(Some(predictor.artifacts())).default_input();
    let main_genre = main_genre.unwrap_or_else(|| defaults.main_genre().to_string());
    let sub_genre = sub_genre.unwrap_or_else(|| defaults.sub_genre().to_string());

    let input = match BookInput::new(price, rating, reviews, main_genre, sub_genre) {
        Ok(input) => input,
        Err(e) => {
            render::input_error(out, &e)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let result = predictor.predict(&input);
    render::prediction(out, &result)?;
    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Handle the 'info' command
fn handle_info<W: Write>(predictor: &Predictor, out: &mut W) -> Result<ExitCode> {
    let options = GenreOptions::from_artifacts(Some(predictor.artifacts()));
    render::model_info(out, &predictor.artifacts().info(), &options)?;
    Ok(ExitCode::SUCCESS)
}
