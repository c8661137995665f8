use std::time::Duration;

use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use bevy_time::{Timer, TimerMode};
use tracing::{debug, warn};

use crate::{
    collision::{overlap_circle_vs_circle, outside_world, overlaps_any_wall},
    constants::{
        MISSILE_DAMAGE, MISSILE_POOL_CAPACITY, MISSILE_RADIUS, MISSILE_SPEED, MISSILE_TRAIL_CLEANUP, PHYSICS_EPSILON,
        PLAYER_RADIUS,
    },
    protocol::{MissileId, MissileSnapshot, Position, Rect, TrailId},
    vitals::Damageable,
};

// ============================================================================
// Missiles
// ============================================================================

// Particle trail attached to a missile; purely cosmetic, position mirrors the missile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trail {
    pub id: TrailId,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Missile {
    pub id: MissileId,
    pub position: Position,
    pub velocity: Vec2,
    active: bool,
    trail: Option<Trail>,
}

impl Missile {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn trail(&self) -> Option<&Trail> {
        self.trail.as_ref()
    }

    // Pure pursuit: head straight at the target's current position.
    // A step that would pass a stationary target lands on it instead.
    fn steer(&mut self, delta_secs: f32, target: Position) {
        let to_target = target.to_vec2() - self.position.to_vec2();
        let distance = to_target.length();
        if distance <= PHYSICS_EPSILON {
            self.velocity = Vec2::ZERO;
            return;
        }

        self.velocity = to_target / distance * MISSILE_SPEED;
        let step = MISSILE_SPEED * delta_secs;
        self.position = if step >= distance {
            target
        } else {
            self.position.offset(self.velocity * delta_secs)
        };

        if let Some(trail) = &mut self.trail {
            trail.position = self.position;
        }
    }
}

// A trail detached from its destroyed missile, waiting to fade out
#[derive(Debug)]
struct PendingTrail {
    id: TrailId,
    timer: Timer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactKind {
    Wall,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissileImpact {
    pub missile: MissileId,
    pub kind: ImpactKind,
    pub position: Position,
    // True when this impact killed the target
    pub fatal: bool,
}

// What a pool tick did besides moving missiles
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PoolTick {
    pub culled: Vec<MissileId>,
    pub disposed_trails: Vec<TrailId>,
}

// ============================================================================
// Projectile Pool
// ============================================================================

/// Sole owner of every homing missile in the level.
///
/// Sentinels only ask for spawns. Destroyed missiles stay in the collection,
/// flagged inactive, until the start of the next [`ProjectilePool::tick`]; every
/// query skips them, so a collision reported late for an already destroyed
/// missile is a no-op.
#[derive(Resource, Debug)]
pub struct ProjectilePool {
    missiles: Vec<Missile>,
    pending_trails: Vec<PendingTrail>,
    capacity: Option<usize>,
    next_missile_id: u32,
    next_trail_id: u32,
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::with_capacity(Some(MISSILE_POOL_CAPACITY))
    }
}

impl ProjectilePool {
    // `None` leaves the pool unbounded
    #[must_use]
    pub const fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            missiles: Vec::new(),
            pending_trails: Vec::new(),
            capacity,
            next_missile_id: 0,
            next_trail_id: 0,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn active(&self) -> impl Iterator<Item = &Missile> {
        self.missiles.iter().filter(|m| m.active)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    #[must_use]
    pub fn get(&self, id: MissileId) -> Option<&Missile> {
        self.active().find(|m| m.id == id)
    }

    #[must_use]
    pub fn pending_trail_count(&self) -> usize {
        self.pending_trails.len()
    }

    pub fn spawn(&mut self, origin: Position) -> Option<MissileId> {
        if let Some(capacity) = self.capacity
            && self.active_count() >= capacity
        {
            warn!("missile pool full ({capacity}), dropping spawn at ({:.0}, {:.0})", origin.x, origin.y);
            return None;
        }

        let id = MissileId(self.next_missile_id);
        self.next_missile_id += 1;
        let trail = Trail {
            id: TrailId(self.next_trail_id),
            position: origin,
        };
        self.next_trail_id += 1;

        self.missiles.push(Missile {
            id,
            position: origin,
            velocity: Vec2::ZERO,
            active: true,
            trail: Some(trail),
        });
        debug!("spawned {id:?} at ({:.0}, {:.0})", origin.x, origin.y);
        Some(id)
    }

    // Returns false if the missile is unknown or already destroyed.
    pub fn destroy(&mut self, id: MissileId) -> bool {
        let Some(missile) = self.missiles.iter_mut().find(|m| m.id == id && m.active) else {
            return false;
        };

        missile.active = false;
        missile.velocity = Vec2::ZERO;
        if let Some(trail) = missile.trail.take() {
            self.pending_trails.push(PendingTrail {
                id: trail.id,
                timer: Timer::new(MISSILE_TRAIL_CLEANUP, TimerMode::Once),
            });
        }
        true
    }

    // Steer every live missile toward the target, cull those that left the world,
    // and dispose of trails whose fade-out elapsed.
    pub fn tick(&mut self, delta: Duration, target: Position) -> PoolTick {
        self.missiles.retain(|m| m.active);

        let delta_secs = delta.as_secs_f32();
        let mut culled = Vec::new();
        for missile in &mut self.missiles {
            missile.steer(delta_secs, target);
            if outside_world(&missile.position) {
                culled.push(missile.id);
            }
        }
        for id in &culled {
            self.destroy(*id);
        }

        let mut disposed_trails = Vec::new();
        self.pending_trails.retain_mut(|pending| {
            pending.timer.tick(delta);
            if pending.timer.is_finished() {
                disposed_trails.push(pending.id);
                false
            } else {
                true
            }
        });

        PoolTick { culled, disposed_trails }
    }

    // Walls first, then the target. Each missile hits at most one thing.
    pub fn resolve_collisions<T: Damageable>(
        &mut self,
        walls: &[Rect],
        target_pos: Position,
        target: &mut T,
    ) -> Vec<MissileImpact> {
        let mut hits = Vec::new();
        for missile in self.active() {
            if overlaps_any_wall(&missile.position, MISSILE_RADIUS, walls) {
                hits.push((missile.id, ImpactKind::Wall, missile.position));
            } else if target.is_hittable()
                && overlap_circle_vs_circle(&missile.position, MISSILE_RADIUS, &target_pos, PLAYER_RADIUS)
            {
                hits.push((missile.id, ImpactKind::Target, missile.position));
            }
        }

        let mut impacts = Vec::with_capacity(hits.len());
        for (id, kind, position) in hits {
            // A target killed by an earlier missile this tick stops taking hits
            if kind == ImpactKind::Target && !target.is_hittable() {
                continue;
            }
            if !self.destroy(id) {
                continue;
            }
            let fatal = kind == ImpactKind::Target && target.take_damage(MISSILE_DAMAGE);
            impacts.push(MissileImpact {
                missile: id,
                kind,
                position,
                fatal,
            });
        }
        impacts
    }

    // Level restart: forget everything, trails included
    pub fn clear(&mut self) {
        self.missiles.clear();
        self.pending_trails.clear();
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<MissileSnapshot> {
        self.active()
            .map(|m| MissileSnapshot {
                id: m.id,
                pos: m.position,
            })
            .collect()
    }
}
