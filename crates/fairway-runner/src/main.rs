use glam::Vec2;
use rand::Rng;
use tracing_subscriber::EnvFilter;

use fairway_putt::PuttingGreen;
use fairway_putt::config::GreenConfig;
use fairway_runner::ascii::AsciiCanvas;
use fairway_runner::config::RunnerConfig;
use fairway_runner::error::RunnerError;
use fairway_runner::frame_loop::play_putt;
use fairway_runner::render::{draw_green, paint};

const USAGE: &str = "usage: fairway-runner [PULL_X PULL_Y]";

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run(std::env::args().skip(1)).await {
        tracing::error!(error = %e, "Putt failed");
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for event lines and the final frame.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var("FAIRWAY_LOG_FORMAT").is_ok_and(|v| v == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(args: impl Iterator<Item = String>) -> Result<(), RunnerError> {
    let green = PuttingGreen::new(GreenConfig::load())?;
    let runner_config = RunnerConfig::load();

    let pull = match parse_pull(args)? {
        Some(pull) => pull,
        None => random_pull(),
    };
    tracing::info!(pull_x = pull.x, pull_y = pull.y, "Fairway putt starting");

    let theme = green.config().theme.clone();
    let outcome = play_putt(green, &runner_config, pull).await?;

    for event in &outcome.events {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "Failed to encode event"),
        }
    }

    let state = &outcome.final_state;
    let mut canvas = AsciiCanvas::new(
        runner_config.ascii_columns,
        runner_config.ascii_rows,
        state.bounds,
        &theme,
    );
    paint(&mut canvas, &draw_green(state, &theme));
    println!("{}", canvas.render());

    tracing::info!(
        frames = outcome.frames,
        captured = outcome.captured(),
        "Fairway putt finished"
    );
    Ok(())
}

/// Optional pull-back offset from the ball center, in pixels.
fn parse_pull(mut args: impl Iterator<Item = String>) -> Result<Option<Vec2>, RunnerError> {
    let parse = |s: &str| {
        s.parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RunnerError::Usage(format!("{USAGE}: {s:?} is not a number")))
    };
    match (args.next(), args.next(), args.next()) {
        (None, _, _) => Ok(None),
        (Some(x), Some(y), None) => Ok(Some(Vec2::new(parse(&x)?, parse(&y)?))),
        (Some(_), _, _) => Err(RunnerError::Usage(USAGE.to_string())),
    }
}

/// A pull back toward the tee side, so the shot heads for the cup with some wobble.
fn random_pull() -> Vec2 {
    let mut rng = rand::rng();
    Vec2::new(rng.random_range(-60.0..-20.0), rng.random_range(-8.0..8.0))
}
