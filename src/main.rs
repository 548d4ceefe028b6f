//! Monster Shooter entry point
//!
//! Runs one headless session on autopilot and prints the result as JSON.
//! Rendering and real audio output belong to a frontend.
//!
//! Usage: `monster-shooter [settings.json]`

use std::path::Path;

use monster_shooter::consts::SIM_DT;
use monster_shooter::scene::Scene;
use monster_shooter::sim::{GameEvent, TickInput};
use monster_shooter::{App, Settings};

/// Give up after this many simulated seconds
const MAX_SESSION_SECS: u32 = 600;

fn main() {
    env_logger::init();
    log::info!("Monster Shooter (headless) starting...");

    let mut settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(Path::new(&path)),
        None => Settings::default(),
    };
    settings.idle_mode = true;

    let mut app = App::new(&settings);
    let input = TickInput::default();
    let max_steps = (MAX_SESSION_SECS as f32 / SIM_DT) as u32;

    let mut steps = 0;
    while app.is_playing() && steps < max_steps {
        for event in app.step(&input) {
            if let GameEvent::MonsterDestroyed { monster, .. } = event {
                log::debug!("Monster {} down", monster);
            }
        }
        for request in app.audio.drain_requests() {
            log::trace!("Audio: {} @ {:.2}", request.resource.display(), request.volume);
        }
        steps += 1;
    }

    match app.director.scene() {
        Scene::GameOver(over) => {
            log::info!("{} ({} monsters destroyed)", over.message(), over.monsters_destroyed);
            match serde_json::to_string_pretty(over) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Could not serialize result: {}", e),
            }
        }
        Scene::Playing(state) => {
            log::warn!(
                "Session still running after {}s ({} monsters destroyed)",
                MAX_SESSION_SECS,
                state.monsters_destroyed()
            );
        }
    }
}
