use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use say_core::runner::exit_code;
use say_core::selector::InvalidVoice;
use say_core::voice::tts::elevenlabs::{ElevenLabs, ElevenLabsConfig};
use say_core::{CacheStore, Config, Player, Request, Runner, Settings, VoiceRequest};

#[derive(Parser, Debug)]
#[command(name = "say")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert text to audible speech")]
struct Args {
    /// Text to speak; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,

    /// Voice name, or one of All, Any, Male, Female, Random
    #[arg(short, long)]
    voice: Option<String>,

    /// Show debug logging on stderr
    #[arg(short, long)]
    debug: bool,

    /// Load settings from a specific file
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Credentials usually come from a local .env file
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    if let Err(e) = setup_tracing(args.debug) {
        eprintln!("say: failed to initialize logging: {e:#}");
    }
    match &dotenv {
        Ok(path) => debug!("Loaded environment from {path:?}"),
        Err(e) => debug!("No .env loaded: {e}"),
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("say: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(async_main(args)) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("say: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn async_main(args: Args) -> Result<u8> {
    let settings = match args.settings.clone().or_else(Settings::default_path) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    let config = Config::from_env(settings);
    debug!(?config, "Resolved configuration");

    // Resolve the player up front: a missing player must not be mistaken for
    // an unplayable cached file
    let player = build_player()?;
    debug!(player = player.name(), "Using audio player");

    let cache = CacheStore::open(&config.cache_dir)?;
    let provider = ElevenLabs::new(
        ElevenLabsConfig::new(config.api_key.clone()).with_base_url(&config.api_base_url),
    );
    let runner = Runner::new(
        cache,
        Arc::new(provider),
        player,
        config.default_voice.clone(),
    );

    let voices = runner.voices().await?;
    let voice = match VoiceRequest::validate(args.voice.as_deref(), &voices) {
        Ok(voice) => voice,
        Err(invalid) => invalid_voice_error(invalid).exit(),
    };

    let request = Request::new(&args.text, voice);
    let result = runner
        .run_with_voices(&request, &voices, &mut rand::thread_rng())
        .await;

    if let Err(e) = &result {
        eprintln!("say: {e}");
    }

    Ok(exit_code(&result))
}

fn invalid_voice_error(invalid: InvalidVoice) -> clap::Error {
    Args::command().error(ErrorKind::InvalidValue, invalid)
}

#[cfg(feature = "rodio")]
fn build_player() -> Result<Arc<dyn Player>> {
    Ok(Arc::new(say_core::voice::audio::playback::RodioPlayer))
}

#[cfg(not(feature = "rodio"))]
fn build_player() -> Result<Arc<dyn Player>> {
    let player = say_core::voice::audio::playback::CommandPlayer::detect()
        .map_err(|e| say_core::SayError::Configuration(format!("{e:#}")))?;
    Ok(Arc::new(player))
}

/// `RUST_LOG` wins when set; otherwise debug logging for our crates with
/// `--debug`, errors only without
fn log_directives(rust_log: Option<String>, debug: bool) -> String {
    match rust_log.filter(|directives| !directives.trim().is_empty()) {
        Some(directives) => directives,
        None if debug => "say=debug,say_core=debug".to_string(),
        None => "error".to_string(),
    }
}

fn setup_tracing(debug: bool) -> Result<()> {
    use tracing_subscriber::fmt;

    let directives = log_directives(std::env::var(EnvFilter::DEFAULT_ENV).ok(), debug);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(filter)
        .try_init()?;

    Ok(())
}
