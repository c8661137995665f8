use std::time::Duration;

use bevy_ecs::prelude::*;
use tracing::debug;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

use crate::{
    awareness::ProximitySensor,
    constants::*,
    projectiles::ProjectilePool,
    protocol::{MissileId, Position, SentinelId, SentinelSnapshot},
    vitals::Infectable,
};

// ============================================================================
// Sentinel State
// ============================================================================

// Behaviour band, derived from awareness every tick and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub enum SentinelState {
    Dormant,
    Alert,
    Contagious,
    Critical,
}

impl SentinelState {
    #[must_use]
    pub fn from_awareness(awareness: f32) -> Self {
        if awareness > CRITICAL_THRESHOLD {
            Self::Critical
        } else if awareness > CONTAGIOUS_THRESHOLD {
            Self::Contagious
        } else if awareness > ALERT_THRESHOLD {
            Self::Alert
        } else {
            Self::Dormant
        }
    }

    // Contagious and above infect a close target
    #[must_use]
    pub fn infects(self) -> bool {
        self >= Self::Contagious
    }
}

// Arpeggio note period for a given awareness, in milliseconds
#[must_use]
pub fn arpeggio_interval_ms(awareness: f32) -> f32 {
    awareness
        .mul_add(-ARPEGGIO_INTERVAL_SPAN_MS, ARPEGGIO_BASE_INTERVAL_MS)
        .clamp(ARPEGGIO_MIN_INTERVAL_MS, ARPEGGIO_BASE_INTERVAL_MS)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency: f32,
    pub gain: f32,
}

// Everything a sentinel did this tick, for the host to turn into sound and light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentinelTick {
    pub state: SentinelState,
    pub note: Option<Note>,
    pub infected_target: bool,
    pub fired: Option<MissileId>,
}

// ============================================================================
// Sentinel
// ============================================================================

/// A stationary watcher that grows aware of the player and, once critical,
/// fires a homing missile every [`CRITICAL_FIRE_INTERVAL`].
#[derive(Component, Debug, Clone)]
pub struct Sentinel {
    pub id: SentinelId,
    pub position: Position,
    sensor: ProximitySensor,
    awareness: f32,
    critical_timer: Duration,
    arpeggio_timer: Duration,
    note_index: usize,
}

impl Sentinel {
    #[must_use]
    pub fn new(id: SentinelId, position: Position) -> Self {
        Self {
            id,
            position,
            sensor: ProximitySensor::default(),
            awareness: 0.0,
            critical_timer: Duration::ZERO,
            arpeggio_timer: Duration::ZERO,
            note_index: 0,
        }
    }

    #[must_use]
    pub const fn awareness(&self) -> f32 {
        self.awareness
    }

    #[must_use]
    pub const fn critical_timer(&self) -> Duration {
        self.critical_timer
    }

    #[must_use]
    pub fn state(&self) -> SentinelState {
        SentinelState::from_awareness(self.awareness)
    }

    // Test and scripting hook; clamped like every other awareness change
    pub fn set_awareness(&mut self, awareness: f32) {
        self.awareness = awareness.clamp(0.0, 1.0);
    }

    pub fn update<T: Infectable>(
        &mut self,
        delta: Duration,
        target_pos: Position,
        target: &mut T,
        pool: &mut ProjectilePool,
    ) -> SentinelTick {
        let distance = self.position.distance(target_pos);

        // Tempo follows the awareness we entered the tick with
        let note = self.advance_arpeggio(delta);

        let previous = self.state();
        self.awareness = self.sensor.update(distance, self.awareness);
        let state = self.state();
        if state != previous {
            debug!("{:?} {previous:?} -> {state:?} (awareness {:.3})", self.id, self.awareness);
        }

        let in_range = distance < self.sensor.radius;

        let mut infected_target = false;
        if in_range && state.infects() && distance < SENTINEL_CRITICAL_DIST && !target.is_infected() {
            target.infect();
            infected_target = true;
        }

        // Out of range the timer is held, neither advanced nor cleared
        let mut fired = None;
        if in_range {
            if state == SentinelState::Critical {
                self.critical_timer += delta;
                if self.critical_timer > CRITICAL_FIRE_INTERVAL {
                    fired = pool.spawn(self.position);
                    self.critical_timer = Duration::ZERO;
                }
            } else {
                self.critical_timer = Duration::ZERO;
            }
        }

        SentinelTick {
            state,
            note,
            infected_target,
            fired,
        }
    }

    fn advance_arpeggio(&mut self, delta: Duration) -> Option<Note> {
        if self.awareness <= ALERT_THRESHOLD {
            return None;
        }

        self.arpeggio_timer += delta;
        if self.arpeggio_timer.as_secs_f32() * 1000.0 <= arpeggio_interval_ms(self.awareness) {
            return None;
        }

        self.arpeggio_timer = Duration::ZERO;
        let frequency = ARPEGGIO_NOTES[self.note_index];
        self.note_index = (self.note_index + 1) % ARPEGGIO_NOTES.len();
        Some(Note {
            frequency,
            gain: self.awareness * ARPEGGIO_GAIN_SCALE,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> SentinelSnapshot {
        SentinelSnapshot {
            id: self.id,
            pos: self.position,
            awareness: self.awareness,
            state: self.state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vitals::PlayerVitals;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const TICK: Duration = Duration::from_millis(16);

    fn sentinel() -> Sentinel {
        Sentinel::new(SentinelId(0), Position::new(100.0, 100.0))
    }

    fn at_distance(d: f32) -> Position {
        Position::new(100.0 + d, 100.0)
    }

    #[rstest]
    #[case(0.0, SentinelState::Dormant)]
    #[case(0.1, SentinelState::Dormant)]
    #[case(0.11, SentinelState::Alert)]
    #[case(0.4, SentinelState::Alert)]
    #[case(0.41, SentinelState::Contagious)]
    #[case(0.75, SentinelState::Contagious)]
    #[case(0.76, SentinelState::Critical)]
    #[case(1.0, SentinelState::Critical)]
    fn state_bands(#[case] awareness: f32, #[case] expected: SentinelState) {
        assert_eq!(SentinelState::from_awareness(awareness), expected);
    }

    #[rstest]
    #[case(0.0, 500.0)]
    #[case(0.5, 300.0)]
    #[case(1.0, 100.0)]
    fn arpeggio_tempo(#[case] awareness: f32, #[case] expected: f32) {
        assert_relative_eq!(arpeggio_interval_ms(awareness), expected, epsilon = 1e-3);
    }

    #[test]
    fn out_of_range_target_is_ignored() {
        let mut s = sentinel();
        let mut vitals = PlayerVitals::default();
        let mut pool = ProjectilePool::default();

        for _ in 0..500 {
            let tick = s.update(TICK, at_distance(500.0), &mut vitals, &mut pool);
            assert_eq!(tick.state, SentinelState::Dormant);
            assert!(tick.note.is_none());
        }
        assert_eq!(s.awareness(), 0.0);
        assert!(!vitals.is_infected());
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn close_target_becomes_infected_once_contagious() {
        let mut s = sentinel();
        let mut vitals = PlayerVitals::default();
        let mut pool = ProjectilePool::default();

        let mut infected_at = None;
        for tick_no in 1..=75 {
            let tick = s.update(TICK, at_distance(100.0), &mut vitals, &mut pool);
            if tick.infected_target {
                assert!(infected_at.is_none(), "infection is reported once");
                infected_at = Some(tick_no);
                assert!(s.awareness() > CONTAGIOUS_THRESHOLD);
            }
        }

        // awareness first exceeds 0.4 around tick 41
        assert!(matches!(infected_at, Some(40..=42)), "infected at {infected_at:?}");
        assert!(vitals.is_infected());
        assert_relative_eq!(s.awareness(), 0.75, epsilon = 0.011);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn contagious_but_far_does_not_infect() {
        let mut s = sentinel();
        s.set_awareness(0.5);
        let mut vitals = PlayerVitals::default();
        let mut pool = ProjectilePool::default();

        // urgency 0.3 at distance 280: pulls back slowly, still contagious for a while
        let tick = s.update(TICK, at_distance(280.0), &mut vitals, &mut pool);
        assert_eq!(tick.state, SentinelState::Contagious);
        assert!(!tick.infected_target);
        assert!(!vitals.is_infected());
    }

    #[test]
    fn critical_fires_every_ninety_four_ticks() {
        let mut s = sentinel();
        s.set_awareness(0.9);
        let mut vitals = PlayerVitals::default();
        let mut pool = ProjectilePool::with_capacity(None);

        let mut fired_on = Vec::new();
        for tick_no in 1..=300 {
            let tick = s.update(TICK, at_distance(20.0), &mut vitals, &mut pool);
            assert_eq!(tick.state, SentinelState::Critical);
            if tick.fired.is_some() {
                fired_on.push(tick_no);
                assert_eq!(s.critical_timer(), Duration::ZERO);
            } else {
                assert!(s.critical_timer() <= CRITICAL_FIRE_INTERVAL);
            }
        }

        assert_eq!(fired_on, vec![94, 188, 282]);
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn leaving_critical_resets_the_timer() {
        let mut s = sentinel();
        s.set_awareness(0.9);
        let mut vitals = PlayerVitals::default();
        let mut pool = ProjectilePool::default();

        for _ in 0..50 {
            s.update(TICK, at_distance(20.0), &mut vitals, &mut pool);
        }
        assert_eq!(s.critical_timer(), TICK * 50);

        s.set_awareness(0.5);
        s.update(TICK, at_distance(20.0), &mut vitals, &mut pool);
        assert_eq!(s.critical_timer(), Duration::ZERO);

        // No partial carry-over into the next critical window
        s.set_awareness(0.9);
        for _ in 0..93 {
            assert!(s.update(TICK, at_distance(20.0), &mut vitals, &mut pool).fired.is_none());
        }
        assert!(s.update(TICK, at_distance(20.0), &mut vitals, &mut pool).fired.is_some());
    }

    #[test]
    fn stepping_out_of_range_holds_the_timer() {
        let mut s = sentinel();
        s.set_awareness(0.9);
        let mut vitals = PlayerVitals::default();
        let mut pool = ProjectilePool::default();

        for _ in 0..50 {
            s.update(TICK, at_distance(20.0), &mut vitals, &mut pool);
        }
        assert_eq!(s.critical_timer(), TICK * 50);

        let away = s.update(TICK, at_distance(500.0), &mut vitals, &mut pool);
        assert_eq!(away.state, SentinelState::Critical);
        assert!(away.fired.is_none());
        assert_eq!(s.critical_timer(), TICK * 50);

        // 800 ms banked, so 44 more ticks cross 1500 ms
        for _ in 0..43 {
            assert!(s.update(TICK, at_distance(20.0), &mut vitals, &mut pool).fired.is_none());
        }
        assert!(s.update(TICK, at_distance(20.0), &mut vitals, &mut pool).fired.is_some());
    }

    #[test]
    fn saturated_pool_still_resets_the_timer() {
        let mut s = sentinel();
        s.set_awareness(0.9);
        let mut vitals = PlayerVitals::default();
        let mut pool = ProjectilePool::with_capacity(Some(0));

        for _ in 0..94 {
            assert!(s.update(TICK, at_distance(20.0), &mut vitals, &mut pool).fired.is_none());
        }
        assert_eq!(s.critical_timer(), Duration::ZERO);
    }

    #[test]
    fn arpeggio_cycles_notes_and_speeds_up() {
        let mut s = sentinel();
        s.set_awareness(0.9);
        let mut vitals = PlayerVitals::default();
        let mut pool = ProjectilePool::default();

        let mut notes = Vec::new();
        for _ in 0..100 {
            if let Some(note) = s.update(TICK, at_distance(20.0), &mut vitals, &mut pool).note {
                notes.push(note.frequency);
                assert!(note.gain > 0.08);
            }
        }

        // ~140 ms interval at awareness 0.9: a note every 9 ticks
        assert!(notes.len() >= 10);
        assert_eq!(&notes[..4], &[220.00, 261.63, 329.63, 220.00]);
    }

    #[test]
    fn dormant_sentinel_stays_silent() {
        let mut s = sentinel();
        s.set_awareness(0.1);
        let mut vitals = PlayerVitals::default();
        let mut pool = ProjectilePool::default();
        let tick = s.update(Duration::from_secs(1), at_distance(500.0), &mut vitals, &mut pool);
        assert!(tick.note.is_none());
    }
}
