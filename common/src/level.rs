use std::time::Duration;

use bevy_ecs::prelude::*;
use bevy_time::{Timer, TimerMode};
use tracing::info;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

use crate::{
    collision::overlap_circle_vs_rect,
    constants::{LEVEL_TRANSITION, PLAYER_RADIUS},
    protocol::{Position, Rect},
    vitals::PlayerVitals,
};

// ============================================================================
// Level Phase
// ============================================================================

#[derive(Debug, Clone)]
pub enum LevelPhase {
    Playing,
    // Waiting out the transition before the next cycle
    Complete(Timer),
    GameOver,
}

// Timer-free view of the phase for snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub enum LevelPhaseKind {
    Playing,
    Complete,
    GameOver,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SafeZoneOutcome {
    pub cleansed: bool,
    pub completed: bool,
}

// ============================================================================
// Level State
// ============================================================================

#[derive(Resource, Debug, Clone)]
pub struct LevelState {
    phase: LevelPhase,
    cycle: u32,
}

impl Default for LevelState {
    fn default() -> Self {
        Self {
            phase: LevelPhase::Playing,
            cycle: 1,
        }
    }
}

impl LevelState {
    #[must_use]
    pub const fn phase(&self) -> &LevelPhase {
        &self.phase
    }

    #[must_use]
    pub const fn kind(&self) -> LevelPhaseKind {
        match self.phase {
            LevelPhase::Playing => LevelPhaseKind::Playing,
            LevelPhase::Complete(_) => LevelPhaseKind::Complete,
            LevelPhase::GameOver => LevelPhaseKind::GameOver,
        }
    }

    #[must_use]
    pub const fn cycle(&self) -> u32 {
        self.cycle
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.phase, LevelPhase::Playing)
    }

    // Called every tick the player overlaps the safe zone
    pub fn handle_safe_zone(&mut self, vitals: &mut PlayerVitals) -> SafeZoneOutcome {
        let cleansed = vitals.cleanse();

        let completed = vitals.mass_integrity() >= 1.0 && self.is_playing();
        if completed {
            info!("cycle {} stabilized", self.cycle);
            self.phase = LevelPhase::Complete(Timer::new(LEVEL_TRANSITION, TimerMode::Once));
        }

        SafeZoneOutcome { cleansed, completed }
    }

    // Returns true the first time it is called for a given life
    pub fn game_over(&mut self) -> bool {
        if matches!(self.phase, LevelPhase::GameOver) {
            return false;
        }
        info!("cycle {} failed", self.cycle);
        self.phase = LevelPhase::GameOver;
        true
    }

    // Returns true when the completion transition has elapsed and the level should restart
    pub fn tick(&mut self, delta: Duration) -> bool {
        match &mut self.phase {
            LevelPhase::Complete(timer) => {
                timer.tick(delta);
                timer.is_finished()
            }
            LevelPhase::Playing | LevelPhase::GameOver => false,
        }
    }

    // A completed level advances the cycle; a failed one replays the first
    pub fn restart(&mut self) {
        self.cycle = match self.phase {
            LevelPhase::Complete(_) => self.cycle + 1,
            LevelPhase::Playing | LevelPhase::GameOver => 1,
        };
        self.phase = LevelPhase::Playing;
    }
}

#[must_use]
pub fn in_safe_zone(zone: &Rect, player_pos: &Position) -> bool {
    overlap_circle_vs_rect(player_pos, PLAYER_RADIUS, zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vitals::Infectable;

    #[test]
    fn safe_zone_cleanses_without_completing_when_hurt() {
        let mut level = LevelState::default();
        let mut vitals = PlayerVitals::default();
        vitals.take_damage(0.15);

        let outcome = level.handle_safe_zone(&mut vitals);
        assert_eq!(
            outcome,
            SafeZoneOutcome {
                cleansed: true,
                completed: false
            }
        );
        assert!(!vitals.is_infected());
        assert!(level.is_playing());

        // Nothing left to cleanse
        assert!(!level.handle_safe_zone(&mut vitals).cleansed);
    }

    #[test]
    fn full_integrity_completes_once_then_restarts_next_cycle() {
        let mut level = LevelState::default();
        let mut vitals = PlayerVitals::default();
        vitals.infect();

        let outcome = level.handle_safe_zone(&mut vitals);
        assert!(outcome.cleansed && outcome.completed);
        assert_eq!(level.kind(), LevelPhaseKind::Complete);
        assert!(!level.handle_safe_zone(&mut vitals).completed);

        assert!(!level.tick(Duration::from_millis(2999)));
        assert!(level.tick(Duration::from_millis(1)));

        level.restart();
        assert!(level.is_playing());
        assert_eq!(level.cycle(), 2);
    }

    #[test]
    fn game_over_is_signalled_once_and_resets_the_cycle() {
        let mut level = LevelState::default();
        level.handle_safe_zone(&mut PlayerVitals::default());
        level.restart();
        assert_eq!(level.cycle(), 2);

        assert!(level.game_over());
        assert!(!level.game_over());
        assert!(!level.tick(Duration::from_secs(10)));

        level.restart();
        assert_eq!(level.cycle(), 1);
        assert_eq!(level.kind(), LevelPhaseKind::Playing);
    }

    #[test]
    fn safe_zone_overlap_uses_player_radius() {
        let zone = Rect::new(640.0, 40.0, 680.0, 640.0);
        assert!(in_safe_zone(&zone, &Position::new(620.0, 340.0)));
        assert!(!in_safe_zone(&zone, &Position::new(619.0, 340.0)));
    }
}
