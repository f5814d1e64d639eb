//! Side Striker headless runner
//!
//! Plays one scripted session with a simple autopilot and circle contacts,
//! then logs the outcome. Usage: `side-striker [config.json] [seed]`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;

    use glam::Vec2;
    use side_striker::GameConfig;
    use side_striker::consts::SIM_DT_MS;
    use side_striker::sim::{Collision, GameEvent, GamePhase, GameState, TickInput, tick};

    const MAX_SUBSTEPS: u32 = 5;
    /// Hard stop for sessions that never end (e.g. huge end_x)
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    const PLAYER_RADIUS: f32 = 14.0;
    const DRONE_RADIUS: f32 = 10.0;
    const ENEMY_RADIUS: f32 = 14.0;
    const BULLET_RADIUS: f32 = 4.0;
    const BEAM_HALF_HEIGHT: f32 = 10.0;

    struct Runner {
        state: GameState,
        input: TickInput,
        accumulator: f32,
        frame: u32,
        kills: u32,
        deaths: u32,
    }

    impl Runner {
        fn new(state: GameState) -> Self {
            Self {
                state,
                input: TickInput::default(),
                accumulator: 0.0,
                frame: 0,
                kills: 0,
                deaths: 0,
            }
        }

        /// Run fixed ticks for one display frame
        fn update(&mut self, frame_ms: f32) {
            self.accumulator += frame_ms.min(100.0);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
                let contacts = find_contacts(&self.state);
                let events = tick(&mut self.state, &self.input, &contacts, SIM_DT_MS);
                self.record(&events);
                self.accumulator -= SIM_DT_MS;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.cycle_drone = false;
                self.input.restart = false;
            }
            self.frame += 1;
        }

        fn record(&mut self, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::EnemyDestroyed { .. } => self.kills += 1,
                    GameEvent::PlayerDied { .. } => self.deaths += 1,
                    GameEvent::BeamFired { level, .. } => log::debug!("Beam level {}", level),
                    _ => {}
                }
            }
        }

        /// Chase the nearest enemy's height, tap fire, charge every few seconds
        fn steer(&mut self) {
            let player = self.state.player.pos;
            let target = self
                .state
                .enemies
                .iter()
                .filter(|e| e.pos.x > player.x)
                .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
                .map(|e| e.pos.y);

            self.input.up = target.is_some_and(|y| y < player.y - 4.0);
            self.input.down = target.is_some_and(|y| y > player.y + 4.0);

            let cycle = self.frame % 240;
            self.input.fire_held = if cycle < 120 { cycle % 12 < 6 } else { cycle < 200 };
            if self.frame % 900 == 450 {
                self.input.cycle_drone = true;
            }
        }
    }

    fn overlaps(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
        a.distance_squared(b) <= (ra + rb) * (ra + rb)
    }

    /// Stand-in for the physics layer: report this frame's overlaps
    fn find_contacts(state: &GameState) -> Vec<Collision> {
        let mut contacts = Vec::new();
        let beam_half_width = state.config.beam.width * 0.5;

        for enemy in &state.enemies {
            for bullet in &state.bullets {
                if overlaps(bullet.pos, BULLET_RADIUS, enemy.pos, ENEMY_RADIUS) {
                    contacts.push(Collision::BulletEnemy {
                        bullet_id: bullet.id,
                        enemy_id: enemy.id,
                    });
                }
            }
            for beam in &state.beams {
                let d = (enemy.pos - beam.pos).abs();
                if d.x <= beam_half_width + ENEMY_RADIUS && d.y <= BEAM_HALF_HEIGHT + ENEMY_RADIUS {
                    contacts.push(Collision::BeamEnemy {
                        beam_id: beam.id,
                        enemy_id: enemy.id,
                    });
                }
            }
            if state.player.alive
                && overlaps(state.player.pos, PLAYER_RADIUS, enemy.pos, ENEMY_RADIUS)
            {
                contacts.push(Collision::PlayerEnemy { enemy_id: enemy.id });
            }
            if state.drone.alive
                && overlaps(state.drone.pos, DRONE_RADIUS, enemy.pos, ENEMY_RADIUS)
            {
                contacts.push(Collision::DroneEnemy { enemy_id: enemy.id });
            }
        }
        contacts
    }

    fn load_config(path: Option<String>) -> Result<GameConfig, String> {
        let Some(path) = path else {
            return Ok(GameConfig::default());
        };
        let text = fs::read_to_string(&path).map_err(|e| format!("{}: {}", path, e))?;
        GameConfig::from_json_str(&text).map_err(|e| format!("{}: {}", path, e))
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let config = match load_config(args.next()) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Invalid config: {}", err);
                std::process::exit(1);
            }
        };
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);

        let state = match GameState::new(config, seed) {
            Ok(state) => state,
            Err(err) => {
                log::error!("Cannot start session: {}", err);
                std::process::exit(1);
            }
        };

        let mut runner = Runner::new(state);
        while runner.state.is_running() && runner.frame < MAX_FRAMES {
            runner.steer();
            // Uneven frame pacing exercises the accumulator
            let frame_ms = if runner.frame % 3 == 0 { 20.0 } else { 15.0 };
            runner.update(frame_ms);
        }

        let outcome = match runner.state.phase {
            GamePhase::StageClear => "stage clear",
            GamePhase::GameOver => "game over",
            GamePhase::Playing | GamePhase::Respawning => "time limit",
        };
        log::info!(
            "Finished ({}): {} ticks, {} kills, {} deaths",
            outcome,
            runner.state.tick_count,
            runner.kills,
            runner.deaths
        );
        match serde_json::to_string(&runner.state.hud()) {
            Ok(hud) => println!("{}", hud),
            Err(err) => log::warn!("HUD serialization failed: {}", err),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Side Striker (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is a library on the web; the host page drives `tick`
}
