//! Space Intruders headless runner
//!
//! Plays the field with the autopilot on a simulated clock and logs what
//! happens. Usage: `space-intruders [config.json] [seconds] [seed]`

use std::process::ExitCode;

use space_intruders::FieldConfig;
use space_intruders::sim::{Autopilot, Field, ManualClock, RoundReset, SpriteSheet, tick};

/// Simulated frame length (ms)
const FRAME_MS: u64 = 16;
const DEFAULT_SECONDS: u64 = 60;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Space Intruders (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => FieldConfig::load_or_default(path),
        None => FieldConfig::default(),
    };
    let seconds = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SECONDS);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    let sheet = SpriteSheet::arcade();
    let clock = ManualClock::new();
    let mut field = match Field::new(config, &sheet, clock.clone()) {
        Ok(field) => field,
        Err(e) => {
            log::error!("Cannot build field: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut pilot = Autopilot::new(seed);

    let frames = frame_count(seconds);
    let mut best = 0;
    let mut rounds = 0;
    for frame in 0..frames {
        clock.advance_ms(FRAME_MS);
        let input = pilot.next_input(&field);
        let out = tick(&mut field, &sheet, &input, FRAME_MS);

        for intent in &out.audio {
            log::debug!("frame {}: {:?}", frame, intent);
        }
        if out.reset != RoundReset::None {
            rounds += 1;
            log::info!("frame {}: round over ({:?})", frame, out.reset);
        }
        best = best.max(field.current_score());
    }

    log::info!(
        "Done after {} s: score {}, best {}, {} rounds finished, {} lives",
        seconds,
        field.current_score(),
        best,
        rounds,
        field.player_lives()
    );
    ExitCode::SUCCESS
}

/// Number of simulated frames covering `seconds`
fn frame_count(seconds: u64) -> u64 {
    seconds.saturating_mul(1000) / FRAME_MS
}
