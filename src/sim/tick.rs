//! Fixed timestep simulation tick
//!
//! One call advances the session by one logical frame. Movement happens
//! first, then a single resolver pass settles every interaction in a fixed
//! order: fireballs, barrels, power-ups, goal.

use rand::Rng;

use super::collision::circles_overlap;
use super::event::{DestroyReason, GameEvent, ProjectileKind};
use super::projectile::{Barrel, BarrelKind, BarrelSignal, Fireball};
use super::state::{GamePhase, GameState, ScheduledAttack};

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Held: climb up
    pub up: bool,
    /// Held: climb down
    pub down: bool,
    /// Edge: jump this tick
    pub jump: bool,
    /// Edge: pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Simple demo driver: climb the nearest ladder, head for the goal,
    /// hop over barrels rolling close by
    pub fn autopilot(state: &GameState) -> Self {
        let mut input = Self::default();
        let player = &state.player;
        let center = player.center();
        let feet = player.pos.y + player.size.y;

        if player.on_ladder {
            input.up = true;
            return input;
        }

        let ladder = state
            .level()
            .ladders
            .iter()
            .filter(|l| l.y < feet - 5.0 && (l.bottom() - feet).abs() < 40.0)
            .min_by(|a, b| (a.x - center.x).abs().total_cmp(&(b.x - center.x).abs()));

        let target_x = ladder.map_or(state.level().goal.x, |l| l.x);
        if (target_x - center.x).abs() < 4.0 {
            input.up = ladder.is_some();
        } else if target_x < center.x {
            input.left = true;
        } else {
            input.right = true;
        }

        input.jump = player.on_ground
            && state.barrels.iter().any(|b| {
                !b.is_exploding()
                    && (b.pos.x - center.x).abs() < 60.0
                    && (b.pos.y - center.y).abs() < 30.0
            });
        input
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // A pause edge only takes the tick when there is something to toggle
    if input.pause && matches!(state.phase, GamePhase::Playing | GamePhase::Paused) {
        state.toggle_pause();
        return;
    }

    match state.phase {
        GamePhase::Playing => step_playing(state, input),
        GamePhase::LevelTransition { ticks_remaining } => {
            advance_transition(state, ticks_remaining)
        }
        GamePhase::NotStarted | GamePhase::Paused | GamePhase::GameOver | GamePhase::Victory => {}
    }
}

fn advance_transition(state: &mut GameState, ticks_remaining: u32) {
    let remaining = ticks_remaining.saturating_sub(1);
    if remaining > 0 {
        state.phase = GamePhase::LevelTransition {
            ticks_remaining: remaining,
        };
        return;
    }

    let next = state.level_index + 1;
    if next < state.level_count() {
        state.load_level(next);
        state.phase = GamePhase::Playing;
        state.emit(GameEvent::LevelStarted { level: next });
    } else {
        state.phase = GamePhase::Victory;
        state.emit(GameEvent::Victory);
    }
}

fn step_playing(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;
    let now = state.time_ticks;

    // Timers
    state.boss.tick_timers();
    if state.boss.patrol(&state.tuning) {
        state.emit(GameEvent::BossStepped);
    }
    state.player.tick_buffs();

    // Boss attacks
    let interval = state.tuning.throw_interval;
    if interval > 0 && now % interval == 0 {
        boss_attack(state, now);
    }
    for attack in state.pending_attacks.drain_due(now) {
        match attack {
            ScheduledAttack::Fireball => launch_fireball(state),
        }
    }

    // Movement
    {
        let GameState {
            player,
            levels,
            level_index,
            tuning,
            events,
            ..
        } = &mut *state;
        player.step(input, &levels[*level_index], tuning, events);
    }

    let pulse = state.tuning.power_up_pulse_rate;
    for power_up in state.power_ups.iter_mut().filter(|p| !p.collected) {
        power_up.pulse += pulse;
    }

    move_projectiles(state);

    // Resolution
    resolve_fireballs(state);
    if resolve_defeat(state) {
        return;
    }
    resolve_barrels(state);
    if resolve_defeat(state) {
        return;
    }
    resolve_power_ups(state);
    resolve_goal(state);
}

fn boss_attack(state: &mut GameState, now: u64) {
    let kind = BarrelKind::from_roll(state.rng.random::<f32>());
    let direction = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };

    let origin = state.boss.throw(kind, &state.tuning);
    let id = state.next_entity_id();
    state
        .barrels
        .push(Barrel::new(id, kind, origin, direction, &state.tuning));
    state.emit(GameEvent::Thrown { kind });
    state.emit(GameEvent::BossRoared);

    for &delay in &state.tuning.salvo_delays {
        state
            .pending_attacks
            .schedule(now + u64::from(delay), ScheduledAttack::Fireball);
    }
    log::debug!("Boss threw {kind:?} at tick {now}");
}

fn launch_fireball(state: &mut GameState) {
    let origin = state.boss.fireball_origin(&state.tuning);
    let target = state.player.center();
    let id = state.next_entity_id();
    state
        .fireballs
        .push(Fireball::aimed(id, origin, target, &state.tuning));
    state.emit(GameEvent::FireballSpawned);
}

fn move_projectiles(state: &mut GameState) {
    let GameState {
        player,
        barrels,
        fireballs,
        levels,
        level_index,
        tuning,
        events,
        ..
    } = &mut *state;
    let platforms = &levels[*level_index].platforms;
    let target = player.center();

    for fireball in fireballs.iter_mut() {
        fireball.update(tuning);
    }
    for barrel in barrels.iter_mut() {
        if barrel.update(platforms, target, tuning) == Some(BarrelSignal::Detonated) {
            events.push(GameEvent::Exploded);
        }
    }
}

fn resolve_fireballs(state: &mut GameState) {
    let GameState {
        player,
        fireballs,
        score,
        tuning,
        events,
        ..
    } = &mut *state;
    let center = player.center();
    let reach = player.reach();

    fireballs.retain_mut(|fireball| {
        let destroyed = |reason| GameEvent::ProjectileDestroyed {
            kind: ProjectileKind::Fireball,
            reason,
        };

        if let Some(reason) = fireball.fate {
            events.push(destroyed(reason));
            return false;
        }
        if !circles_overlap(center, reach, fireball.pos, fireball.radius) {
            return true;
        }

        if player.is_shielded() {
            *score += tuning.shielded_fireball_score;
            events.push(destroyed(DestroyReason::Shielded));
            false
        } else if !player.is_invulnerable() {
            player.damage(tuning.fireball_damage, tuning);
            events.push(GameEvent::Hit {
                damage: tuning.fireball_damage,
                source: ProjectileKind::Fireball,
            });
            events.push(destroyed(DestroyReason::HitPlayer));
            false
        } else {
            true
        }
    });
}

fn resolve_barrels(state: &mut GameState) {
    let GameState {
        player,
        barrels,
        score,
        tuning,
        events,
        ..
    } = &mut *state;
    let center = player.center();
    let reach = player.reach();

    barrels.retain_mut(|barrel| {
        let kind = ProjectileKind::Barrel(barrel.kind);
        let destroyed = |reason| GameEvent::ProjectileDestroyed { kind, reason };

        if let Some(blast) = barrel.explosion_radius() {
            if circles_overlap(center, reach, barrel.pos, blast)
                && !player.is_shielded()
                && !player.is_invulnerable()
            {
                player.damage(tuning.explosion_damage, tuning);
                events.push(GameEvent::Hit {
                    damage: tuning.explosion_damage,
                    source: kind,
                });
            }
            if barrel.is_burnt_out(tuning) {
                events.push(destroyed(DestroyReason::Burnt));
                return false;
            }
            return true;
        }

        if circles_overlap(center, reach, barrel.pos, barrel.radius) {
            if player.is_shielded() {
                *score += tuning.shielded_barrel_score;
                events.push(destroyed(DestroyReason::Shielded));
                return false;
            }
            if !player.is_invulnerable() {
                let damage = barrel.kind.contact_damage(tuning);
                player.damage(damage, tuning);
                events.push(GameEvent::Hit {
                    damage,
                    source: kind,
                });
                events.push(destroyed(DestroyReason::HitPlayer));
                return false;
            }
        }

        if barrel.is_below_stage() {
            *score += tuning.cleared_barrel_score;
            events.push(destroyed(DestroyReason::FellOffStage));
            return false;
        }
        true
    });
}

/// Spend a life if health ran out. Returns true when the run is over.
fn resolve_defeat(state: &mut GameState) -> bool {
    if !state.player.is_dead() {
        return false;
    }

    if state.lives <= 1 {
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        state.pending_attacks.clear();
        state.emit(GameEvent::GameOver);
        log::info!(
            "Game over on level {} with score {}",
            state.level_index + 1,
            state.score
        );
        return true;
    }

    state.lives -= 1;
    state.respawn_player();
    state.emit(GameEvent::LifeLost {
        lives_remaining: state.lives,
    });
    false
}

fn resolve_power_ups(state: &mut GameState) {
    let GameState {
        player,
        power_ups,
        score,
        tuning,
        events,
        ..
    } = &mut *state;
    let center = player.center();

    for power_up in power_ups.iter_mut().filter(|p| !p.collected) {
        if center.distance(power_up.pos) < tuning.pickup_radius && power_up.collect() {
            player.grant(power_up.kind, tuning);
            *score += tuning.power_up_score;
            events.push(GameEvent::Collected {
                kind: power_up.kind,
            });
        }
    }
}

fn resolve_goal(state: &mut GameState) {
    let offset = (state.player.pos - state.level().goal).abs();
    let reach = state.tuning.goal_reach;
    if offset.x >= reach.x || offset.y >= reach.y {
        return;
    }

    let cleared = state.level_index;
    state.pending_attacks.clear();
    if state.is_last_level() {
        state.phase = GamePhase::Victory;
        state.emit(GameEvent::Victory);
        log::info!("Victory with score {}", state.score);
    } else {
        state.phase = GamePhase::LevelTransition {
            ticks_remaining: state.tuning.level_transition_ticks,
        };
        state.emit(GameEvent::LevelCleared { level: cleared });
        log::info!("Cleared level {}", cleared + 1);
    }
}
