//! Fixed timestep simulation tick
//!
//! Core game loop that advances one session deterministically. Collision
//! detection happens in the host; it reports this frame's contacts as
//! [`Collision`] events and applies the returned [`GameEvent`]s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::lives::apply_player_death;
use super::state::{GameEvent, GamePhase, GameState};
use super::timeline::TimedEffect;
use crate::input_direction;
use crate::tuning::WaveSpec;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire key is down (level, not edge)
    pub fire_held: bool,
    /// Cycle drone mode (one-shot, caller clears it after the tick)
    pub cycle_drone: bool,
    /// Restart after game over or stage clear (one-shot)
    pub restart: bool,
}

/// A contact reported by the host's collision detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    BulletEnemy { bullet_id: u32, enemy_id: u32 },
    BeamEnemy { beam_id: u32, enemy_id: u32 },
    PlayerEnemy { enemy_id: u32 },
    PlayerTerrain,
    PlayerHazard,
    DroneEnemy { enemy_id: u32 },
    DroneTerrain,
}

/// Advance the session by `dt_ms` and report what happened
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    collisions: &[Collision],
    dt_ms: f32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Ended sessions only listen for restart
    if !state.is_running() {
        if input.restart {
            restart(state, &mut events);
        }
        return events;
    }

    let dt_ms = dt_ms.max(0.0);
    state.time_ms += f64::from(dt_ms);

    run_timeline(state, &mut events);
    resolve_collisions(state, collisions, &mut events);
    if !state.is_running() {
        return events;
    }

    if state.phase == GamePhase::Playing {
        update_player(state, input, dt_ms, &mut events);
    }

    // Camera keeps scrolling while the player is down
    let next_x = state.scroll_x + state.stage.scroll_speed() * (dt_ms / 1000.0);
    state.scroll_x = next_x.min(state.stage.end_x());

    let previous_checkpoint = state.stage.checkpoint_index();
    let waves = state.stage.update(state.scroll_x);
    if state.stage.checkpoint_index() > previous_checkpoint {
        let index = state.stage.checkpoint_index();
        let x = state.stage.checkpoint_x();
        log::info!("Checkpoint {} reached at x={}", index, x);
        events.push(GameEvent::CheckpointReached { index, x });
    }
    for wave in &waves {
        spawn_wave(state, wave, &mut events);
    }

    for pos in state.ambient_spawns(dt_ms) {
        let id = state.spawn_enemy(pos);
        events.push(GameEvent::EnemySpawned { id, pos });
    }

    if state.scroll_x >= state.stage.end_x() {
        state.phase = GamePhase::StageClear;
        state.clear_active_entities();
        log::info!("Stage clear! Score: {}", state.score);
        events.push(GameEvent::StageClear { score: state.score });
        return events;
    }

    move_entities(state, dt_ms);
    cull_offscreen(state);

    state.tick_count += 1;

    // Ensure deterministic ordering
    state.normalize_order();
    events
}

/// Movement, drone, charge and both weapons
fn update_player(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: f32,
    events: &mut Vec<GameEvent>,
) {
    let dt = dt_ms / 1000.0;

    let dir = input_direction(input.up, input.down, input.left, input.right);
    state.player.vel = dir * state.config.player.speed;
    state.player.pos += state.player.vel * dt;
    clamp_player_to_camera(state);

    if input.cycle_drone {
        state.drone_control.cycle_state();
        let drone_state = state.drone_control.state();
        log::debug!("Drone -> {}", drone_state.label());
        events.push(GameEvent::DroneCycled { state: drone_state });
    }

    // Release is read before this frame's update clears the charging flag
    let released = if state.prev_fire_held && !input.fire_held {
        Some(state.charge.release())
    } else {
        None
    };
    state.charge.update(dt_ms, input.fire_held);

    // Normal fire is suppressed once the hold turns into a charge
    if input.fire_held && !state.charge.is_charging() {
        let player_muzzle = state.player.pos + Vec2::new(state.config.bullet.spawn_offset_x, 0.0);
        let drone_muzzle = state.drone.pos + Vec2::new(state.config.drone.bullet_offset_x, 0.0);
        let mut muzzles = Vec::new();
        state
            .weapon
            .try_fire(state.time_ms, true, || muzzles.extend([player_muzzle, drone_muzzle]));

        for pos in muzzles {
            let id = state.spawn_bullet(pos);
            let vel = Vec2::new(state.config.bullet.speed, 0.0);
            events.push(GameEvent::BulletFired { id, pos, vel });
        }
    }

    if let Some(released) = released.filter(|r| r.can_fire_beam) {
        let pos = state.player.pos + Vec2::new(state.config.beam.width * 0.5, 0.0);
        let id = state.spawn_beam(pos, released.level);
        state.timeline.schedule(
            state.time_ms,
            state.config.beam.duration_ms,
            TimedEffect::BeamExpire { beam_id: id },
        );
        log::debug!("Beam fired: level {} ({} ms charge)", released.level, released.charge_ms);
        events.push(GameEvent::BeamFired {
            id,
            pos,
            level: released.level,
        });
    }
    state.prev_fire_held = input.fire_held;

    state.drone.prev_pos = state.drone.pos;
    state.drone.pos = state
        .drone_control
        .target_position(state.player.pos, state.drone.pos);
}

/// Keep the ship inside the visible area
fn clamp_player_to_camera(state: &mut GameState) {
    let view = &state.config.view;
    let player = &state.config.player;
    let min = Vec2::new(state.scroll_x + player.clamp_padding_x, player.clamp_padding_y);
    let max = Vec2::new(
        state.scroll_x + view.width - player.clamp_padding_x,
        view.height - player.clamp_padding_y,
    );
    // max() first so an oversized padding pins to min instead of panicking in clamp()
    state.player.pos = state.player.pos.min(max).max(min);
}

fn run_timeline(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for effect in state.timeline.drain_due(state.time_ms) {
        match effect {
            TimedEffect::BeamExpire { beam_id } => {
                if let Some(idx) = state.beams.iter().position(|b| b.id == beam_id) {
                    state.beams.remove(idx);
                    events.push(GameEvent::BeamExpired { id: beam_id });
                }
            }
            TimedEffect::KnockbackEnd { enemy_id } => {
                let speed = state.config.enemy.speed;
                if let Some(enemy) = state.enemies.iter_mut().find(|e| e.id == enemy_id) {
                    enemy.vel.x = -speed;
                    enemy.knockback = false;
                }
            }
            TimedEffect::Respawn => {
                if state.phase == GamePhase::Respawning {
                    respawn_player(state, events);
                }
            }
        }
    }
}

fn resolve_collisions(
    state: &mut GameState,
    collisions: &[Collision],
    events: &mut Vec<GameEvent>,
) {
    for collision in collisions {
        match *collision {
            Collision::BulletEnemy { bullet_id, enemy_id } => {
                let Some(idx) = state.bullets.iter().position(|b| b.id == bullet_id) else {
                    continue;
                };
                if state.enemy(enemy_id).is_none() {
                    continue;
                }
                state.bullets.remove(idx);
                damage_enemy(state, enemy_id, events);
            }
            Collision::BeamEnemy { beam_id, enemy_id } => {
                // Beams pierce: they stay alive after a hit
                if state.beams.iter().any(|b| b.id == beam_id) {
                    damage_enemy(state, enemy_id, events);
                }
            }
            Collision::PlayerEnemy { enemy_id } => {
                if state.phase != GamePhase::Playing {
                    continue;
                }
                let Some(idx) = state.enemies.iter().position(|e| e.id == enemy_id) else {
                    continue;
                };
                state.enemies.remove(idx);
                on_player_death(state, events);
            }
            Collision::PlayerTerrain | Collision::PlayerHazard => {
                if state.phase == GamePhase::Playing {
                    on_player_death(state, events);
                }
            }
            Collision::DroneEnemy { enemy_id } => {
                if !state.drone.alive {
                    continue;
                }
                let knockback = state.config.knockback.clone();
                let Some(enemy) = state.enemies.iter_mut().find(|e| e.id == enemy_id) else {
                    continue;
                };
                if enemy.knockback {
                    continue;
                }
                enemy.knockback = true;
                enemy.vel.x = knockback.speed_x;
                state.timeline.schedule(
                    state.time_ms,
                    knockback.duration_ms,
                    TimedEffect::KnockbackEnd { enemy_id },
                );
                events.push(GameEvent::EnemyKnockedBack { id: enemy_id });
            }
            Collision::DroneTerrain => {
                if state.drone.alive {
                    state.drone.pos = state.drone.prev_pos;
                }
            }
        }
    }
}

/// One point of damage; scores and removes the enemy when it runs out
fn damage_enemy(state: &mut GameState, enemy_id: u32, events: &mut Vec<GameEvent>) {
    let Some(idx) = state.enemies.iter().position(|e| e.id == enemy_id) else {
        return;
    };
    let enemy = &mut state.enemies[idx];
    enemy.health = enemy.health.saturating_sub(1);
    if enemy.health == 0 {
        state.enemies.remove(idx);
        state.score += state.config.score.enemy_kill;
        events.push(GameEvent::EnemyDestroyed {
            id: enemy_id,
            score: state.score,
        });
    }
}

fn on_player_death(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let result = apply_player_death(state.lives);
    state.lives = result.lives;

    state.player.vel = Vec2::ZERO;
    state.player.alive = false;
    state.drone.alive = false;
    events.push(GameEvent::PlayerDied { lives: result.lives });

    if result.game_over {
        state.phase = GamePhase::GameOver;
        log::info!("Game over. Final score: {}", state.score);
        events.push(GameEvent::GameOver { score: state.score });
        return;
    }

    log::info!("Player down, {} lives left", result.lives);
    state.phase = GamePhase::Respawning;
    state.pending_checkpoint = state.stage.checkpoint_index();
    state.timeline.schedule(
        state.time_ms,
        state.config.player.respawn_delay_ms,
        TimedEffect::Respawn,
    );
}

fn respawn_player(state: &mut GameState, events: &mut Vec<GameEvent>) {
    // Rewind first so checkpoint_x() matches the checkpoint we died under
    state.stage.reset_to_checkpoint(state.pending_checkpoint);
    let checkpoint_x = state.stage.checkpoint_x();
    state.scroll_x = checkpoint_x;

    let offsets = *state.drone_control.offsets();
    state.player.pos = Vec2::new(
        checkpoint_x + state.config.player.spawn_x,
        state.config.view.height * 0.5,
    );
    state.player.vel = Vec2::ZERO;
    state.player.alive = true;
    state.drone.pos = state.player.pos + Vec2::new(offsets.front_x, offsets.offset_y);
    state.drone.prev_pos = state.drone.pos;
    state.drone.alive = true;

    state.weapon.reset();
    state.charge.reset();
    state.clear_active_entities();
    state.phase = GamePhase::Playing;

    log::debug!("Respawned at checkpoint x={}", checkpoint_x);
    events.push(GameEvent::PlayerRespawned {
        pos: state.player.pos,
        checkpoint_x,
    });
}

fn restart(state: &mut GameState, events: &mut Vec<GameEvent>) {
    match GameState::new(state.config.clone(), state.seed) {
        Ok(fresh) => {
            *state = fresh;
            log::info!("Session restarted");
            events.push(GameEvent::Restarted);
        }
        Err(err) => log::error!("Restart failed: {}", err),
    }
}

/// Lay a wave out just past the right edge of the screen at its trigger point
fn spawn_wave(state: &mut GameState, wave: &WaveSpec, events: &mut Vec<GameEvent>) {
    let base_x = wave.trigger_x + state.config.view.width + state.config.enemy.spawn_offset_x;
    for (i, &y) in wave.y_positions.iter().enumerate() {
        let pos = Vec2::new(base_x + i as f32 * wave.spacing_x, y);
        let id = state.spawn_enemy(pos);
        events.push(GameEvent::EnemySpawned { id, pos });
    }
    log::info!("Wave '{}' triggered ({} enemies)", wave.id, wave.y_positions.len());
    events.push(GameEvent::WaveTriggered {
        wave_id: wave.id.clone(),
        count: wave.y_positions.len(),
    });
}

/// Fixed linear motion for everything but the player and drone
fn move_entities(state: &mut GameState, dt_ms: f32) {
    let dt = dt_ms / 1000.0;
    for bullet in &mut state.bullets {
        bullet.pos += bullet.vel * dt;
    }
    for beam in &mut state.beams {
        beam.pos += beam.vel * dt;
    }
    for enemy in &mut state.enemies {
        enemy.pos += enemy.vel * dt;
    }
}

fn cull_offscreen(state: &mut GameState) {
    let left_edge = state.scroll_x;
    let right_edge = state.scroll_x + state.config.view.width;

    let bullet_limit = right_edge + state.config.bullet.cull_padding;
    state.bullets.retain(|b| b.pos.x <= bullet_limit);

    let beam_limit = right_edge + state.config.beam.width;
    state.beams.retain(|b| b.pos.x <= beam_limit);

    let enemy_limit = left_edge - state.config.enemy.cull_padding;
    state.enemies.retain(|e| e.pos.x >= enemy_limit);
}
