//! Zenos headless runner
//!
//! Drives a session at a fixed rate with a scripted demo input and logs the
//! HUD once per simulated second.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::sync::Arc;

    use env_logger::{Builder, Env};
    use log::LevelFilter;

    use zenos::input::{Action, InputBuffer, KeyEvent};
    use zenos::sim::{GameEvent, GameSession, TickInput};
    use zenos::{GameConfig, Settings};

    /// Demo keys as (delay since previous key in ms, key), replayed in a loop
    const DEMO_SCRIPT: &[(u64, &str)] = &[
        (500, "ArrowLeft"),
        (250, "ArrowLeft"),
        (800, "w"),
        (600, "ArrowUp"),
        (900, "q"),
        (400, "w"),
        (1200, "ArrowRight"),
        (200, "ArrowRight"),
        (150, "ArrowRight"),
        (700, "w"),
        (1500, "ArrowDown"),
        (800, " "),
        (400, "w"),
    ];

    pub fn init_logging(verbose: bool) {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        let env = Env::default().default_filter_or(level.to_string());
        let _ = Builder::from_env(env).try_init();
    }

    pub fn run(settings: &Settings) -> Result<(), Box<dyn Error>> {
        let config = match &settings.config_path {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::preset()?,
        };
        let mut session = GameSession::new(Arc::new(config), settings.seed)?;
        let mut buffer = InputBuffer::new(settings.debounce_ms);
        let tick_ms = settings.tick_ms();
        let ticks_per_second = u64::from(settings.tick_hz.max(1));

        let mut script = DEMO_SCRIPT.iter().cycle();
        let mut next_key = script.next().map(|&(delay, key)| (delay, key));

        for frame in 0..settings.max_ticks {
            let now = frame.saturating_mul(tick_ms);
            while let Some((at, key)) = next_key.filter(|&(at, _)| at <= now) {
                if let Some(action) = Action::from_key(key) {
                    buffer.push(KeyEvent::press(action, at));
                }
                next_key = script.next().map(|&(delay, key)| (at + delay, key));
            }

            let input = TickInput {
                now_ms: now,
                actions: buffer.poll(now).into_iter().collect(),
            };
            if let Err(err) = session.advance(&input) {
                log::warn!("Frame {frame} skipped: {err}");
            }
            for event in session.drain_events() {
                log_event(&event);
            }

            if frame % ticks_per_second == 0 {
                log::info!("{}", session.status());
            }
            if session.is_over() {
                log::info!("Final: {}", session.status());
                break;
            }
        }
        Ok(())
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::Hit(report) if report.is_heal() => {
                log::info!("Entity {} healed {} by {}", report.target, -report.amount, report.hitter)
            }
            GameEvent::Hit(report) => log::info!(
                "Entity {} hit by {} for {} (bonus {}, defense {}, reduce {})",
                report.target,
                report.hitter,
                report.amount,
                report.bonus,
                report.defense,
                report.reduce_factor
            ),
            GameEvent::Drain { target, amount, .. } => {
                log::info!("Entity {target} loses {amount} (time)")
            }
            GameEvent::GameOver { tick } => log::info!("Game over at tick {tick}"),
            other => log::debug!("{other:?}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let mut settings = zenos::Settings::from_env();
    if let Err(err) = settings.apply_args(std::env::args().skip(1)) {
        eprintln!("zenos: {err}");
        eprintln!(
            "usage: zenos [--seed N] [--tick-hz N] [--debounce-ms N] [--max-ticks N] [--config PATH] [-v]"
        );
        std::process::exit(2);
    }

    native::init_logging(settings.verbose);
    log::info!("Zenos (native) starting with seed {}", settings.seed);

    if let Err(err) = native::run(&settings) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts embed the library directly
}
