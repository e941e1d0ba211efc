//! Flappy Sim entry point
//!
//! Headless native runner: plays a few demo games in real time with the
//! autopilot supplying input, logging what happens. A windowed frontend
//! would replace the autopilot with key events and draw each snapshot.

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

/// Games played before exiting
#[cfg(not(target_arch = "wasm32"))]
const DEMO_RUNS: u32 = 3;
/// Restart a run that the autopilot keeps alive this long (one minute at 50 Hz)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_TICK_LIMIT: u64 = 3000;
/// Optional path to a JSON config file
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV: &str = "FLAPPY_CONFIG";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use flappy_sim::sim::{GameEvent, autopilot};
    use flappy_sim::{Config, Driver};

    env_logger::init();
    log::info!("Flappy Sim (native, headless) starting...");

    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    };
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let mut driver = match config.and_then(|c| Driver::new(&c, seed)) {
        Ok(driver) => driver,
        Err(err) => {
            report_config_error(&err);
            return ExitCode::FAILURE;
        }
    };
    let input = driver.input();

    let mut runs = 0;
    let mut best = 0;
    let mut last = Instant::now();
    while runs < DEMO_RUNS {
        std::thread::sleep(driver.tick_period());
        let now = Instant::now();
        let events = driver.advance(now - last);
        last = now;

        for event in events {
            match event {
                GameEvent::Scored { score } => log::debug!("Score: {}", score),
                GameEvent::Crashed { cause, score } => {
                    log::info!("Game Over! Score: {} ({:?})", score, cause);
                    best = best.max(score);
                    runs += 1;
                    if runs < DEMO_RUNS {
                        input.restart();
                    }
                }
                GameEvent::Restarted => log::info!("Run {} starting", runs + 1),
            }
        }

        let snapshot = driver.snapshot();
        if snapshot.is_over() {
            continue;
        }
        if snapshot.tick >= DEMO_TICK_LIMIT {
            log::info!("Run survived {} ticks. Score: {}", snapshot.tick, snapshot.score);
            best = best.max(snapshot.score);
            runs += 1;
            input.restart();
        } else if let Some(command) = autopilot(&snapshot) {
            input.send(command);
        }
    }

    log::info!("Best score over {} runs: {}", DEMO_RUNS, best);

    ExitCode::SUCCESS
}

#[cfg(not(target_arch = "wasm32"))]
fn report_config_error(err: &flappy_sim::ConfigError) {
    use std::error::Error;

    log::error!("Invalid configuration: {}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        log::error!("  caused by: {}", cause);
        source = cause.source();
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser frontends drive `flappy_sim::Driver` directly
}
