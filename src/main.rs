//! Headless runner: loads (or creates) a save, applies offline catch-up,
//! then drives the tick engine at one tick per second with periodic
//! autosaves. Presentation layers link against the library instead.

use ascend::core::constants::{AUTOSAVE_INTERVAL_SECONDS, TICK_INTERVAL_SECONDS};
use ascend::core::tick::tick;
use ascend::{catch_up, GamePhase, GameState, SaveManager};
use chrono::Utc;
use std::time::{Duration, Instant};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if let Some(arg) = args.get(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!(
                    "ascend {} ({})",
                    ascend::build_info::BUILD_DATE,
                    ascend::build_info::BUILD_COMMIT
                );
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Ascend - Idle Cultivation Simulator\n");
                println!("Usage: ascend [NAME]");
                println!("  NAME         character name for a new save");
                println!("  --version    print build information");
                return Ok(());
            }
            _ => {}
        }
    }

    env_logger::init();

    let manager = SaveManager::new()?;
    let mut state = if manager.save_exists() {
        let mut state = manager.load()?;
        let report = catch_up(&mut state, Utc::now().timestamp());
        if report.credited_seconds > 0 {
            log::info!(
                "offline catch-up: {}s credited, {:.0} xp, {} stones",
                report.credited_seconds,
                report.xp_gained,
                report.stones_granted
            );
        }
        state
    } else {
        let name = args
            .get(1)
            .cloned()
            .unwrap_or_else(|| "Nameless Cultivator".to_string());
        let mut rng = rand::thread_rng();
        let state = GameState::new(name, Utc::now().timestamp(), &mut rng);
        log::info!("created new character {}", state.character_name);
        state
    };

    let mut rng = rand::thread_rng();
    let tick_interval = Duration::from_secs(TICK_INTERVAL_SECONDS);
    let mut last_tick = Instant::now();
    let mut seconds_since_save = 0i64;

    while state.phase == GamePhase::Playing {
        let elapsed = last_tick.elapsed();
        if elapsed < tick_interval {
            std::thread::sleep(tick_interval - elapsed);
        }
        last_tick = Instant::now();

        let result = tick(&mut state, false, &mut rng);
        for event in &result.events {
            log::debug!("{event:?}");
        }

        seconds_since_save += TICK_INTERVAL_SECONDS as i64;
        if seconds_since_save >= AUTOSAVE_INTERVAL_SECONDS as i64 {
            state.last_save_time = Utc::now().timestamp();
            manager.save(&state)?;
            seconds_since_save = 0;
        }
    }

    state.last_save_time = Utc::now().timestamp();
    manager.save(&state)?;
    log::info!("{} has fallen; session over", state.character_name);
    Ok(())
}
