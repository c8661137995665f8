use std::time::Duration;

use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use bevy_time::{Timer, TimerMode};
use rand::Rng;
use tracing::debug;

use crate::constants::{DEATH_THRESHOLD, INFECTED_SPEED_MULTIPLIER, JITTER_STEP, STUN_DURATION};

// ============================================================================
// Target Traits
// ============================================================================

// Anything a sentinel can contaminate by proximity
pub trait Infectable {
    fn is_infected(&self) -> bool;
    fn infect(&mut self);
}

// Anything a missile can hurt
pub trait Damageable {
    // False once the body is gone (dead targets take no more hits)
    fn is_hittable(&self) -> bool;

    // Returns true when this hit was the fatal one
    fn take_damage(&mut self, amount: f32) -> bool;
}

// ============================================================================
// Player Vitals
// ============================================================================

/// Health and contamination state of the pursued player.
///
/// `mass_integrity` stays in `[0, 1]`. Death happens once, the first time an
/// update leaves integrity at or below the death threshold, and is permanent
/// until the level is rebuilt.
#[derive(Component, Debug, Clone)]
pub struct PlayerVitals {
    mass_integrity: f32,
    infected: bool,
    stun: Option<Timer>,
    dead: bool,
    stabilized: bool,
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self {
            mass_integrity: 1.0,
            infected: false,
            stun: None,
            dead: false,
            stabilized: false,
        }
    }
}

impl PlayerVitals {
    #[must_use]
    pub const fn mass_integrity(&self) -> f32 {
        self.mass_integrity
    }

    #[must_use]
    pub const fn is_stunned(&self) -> bool {
        self.stun.is_some()
    }

    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.dead
    }

    #[must_use]
    pub const fn is_stabilized(&self) -> bool {
        self.stabilized
    }

    // Clamp, then check for death. Returns true if this update killed the player.
    fn update_mass(&mut self, value: f32) -> bool {
        self.mass_integrity = value.clamp(0.0, 1.0);
        self.mass_integrity <= DEATH_THRESHOLD && self.die()
    }

    // Every hit stuns and infects, regardless of amount. A hit while stunned re-arms the stun.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let killed = self.update_mass(self.mass_integrity - amount);
        self.stun = Some(Timer::new(STUN_DURATION, TimerMode::Once));
        self.infected = true;
        debug!("player hit for {amount:.2}, integrity now {:.2}", self.mass_integrity);
        killed
    }

    // Returns false (and does nothing) at full integrity or once dead, so the caller keeps the pickup.
    pub fn heal(&mut self, amount: f32) -> bool {
        if self.dead || self.mass_integrity >= 1.0 {
            return false;
        }
        self.mass_integrity = (self.mass_integrity + amount).min(1.0);
        true
    }

    pub fn cleanse(&mut self) -> bool {
        if self.infected {
            self.infected = false;
            true
        } else {
            false
        }
    }

    // Suppresses jitter for the current tick only
    pub const fn stabilize(&mut self) {
        self.stabilized = true;
    }

    pub fn die(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        debug!("player died at integrity {:.2}", self.mass_integrity);
        true
    }

    // Advance the stun window
    pub fn tick(&mut self, delta: Duration) {
        if let Some(stun) = &mut self.stun {
            stun.tick(delta);
            if stun.is_finished() {
                self.stun = None;
            }
        }
    }

    #[must_use]
    pub const fn speed_multiplier(&self) -> f32 {
        if self.infected { INFECTED_SPEED_MULTIPLIER } else { 1.0 }
    }

    // Per-tick infected jitter; always clears the stabilization flag.
    pub fn consume_jitter<R: Rng>(&mut self, rng: &mut R) -> Vec2 {
        let shaken = self.infected && !self.dead && !self.stabilized;
        self.stabilized = false;

        if shaken {
            let dx = rng.random_range(-1..=1) as f32 * JITTER_STEP;
            let dy = rng.random_range(-1..=1) as f32 * JITTER_STEP;
            Vec2::new(dx, dy)
        } else {
            Vec2::ZERO
        }
    }
}

impl Infectable for PlayerVitals {
    fn is_infected(&self) -> bool {
        self.infected
    }

    fn infect(&mut self) {
        self.infected = true;
    }
}

impl Damageable for PlayerVitals {
    fn is_hittable(&self) -> bool {
        !self.dead
    }

    fn take_damage(&mut self, amount: f32) -> bool {
        PlayerVitals::take_damage(self, amount)
    }
}
