use std::time::Duration;

// ============================================================================
// Floating-Point Comparisons
// ============================================================================

// Small value for floating-point comparisons (near-zero checks, division guards).
pub const PHYSICS_EPSILON: f32 = 1e-6;

// ============================================================================
// World
// ============================================================================

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;
pub const TILE_SIZE: f32 = 40.0;
pub const TILE_COLS: i32 = 20;
pub const TILE_ROWS: i32 = 15;

// ============================================================================
// Sentinels
// ============================================================================

pub const SENTINEL_RADIUS: f32 = 400.0; // awareness range, world units
pub const SENTINEL_CRITICAL_DIST: f32 = 250.0; // passive infection range

// Awareness ramp (per tick, not per second)
pub const AWARENESS_RAMP_UP: f32 = 0.01;
pub const AWARENESS_PULLBACK: f32 = 0.005; // in range, urgency below awareness
pub const AWARENESS_DECAY: f32 = 0.01; // out of range

// State thresholds (exclusive lower bounds)
pub const ALERT_THRESHOLD: f32 = 0.1;
pub const CONTAGIOUS_THRESHOLD: f32 = 0.4;
pub const CRITICAL_THRESHOLD: f32 = 0.75;

pub const CRITICAL_FIRE_INTERVAL: Duration = Duration::from_millis(1500);

// Arpeggio tempo: interval_ms = BASE - awareness * SPAN, clamped to [MIN, BASE]
pub const ARPEGGIO_BASE_INTERVAL_MS: f32 = 500.0;
pub const ARPEGGIO_INTERVAL_SPAN_MS: f32 = 400.0;
pub const ARPEGGIO_MIN_INTERVAL_MS: f32 = 100.0;
pub const ARPEGGIO_GAIN_SCALE: f32 = 0.1;
pub const ARPEGGIO_NOTES: [f32; 3] = [220.00, 261.63, 329.63]; // A3, C4, E4

// ============================================================================
// Missiles
// ============================================================================

pub const MISSILE_SPEED: f32 = 250.0; // units per second
pub const MISSILE_RADIUS: f32 = 5.0;
pub const MISSILE_DAMAGE: f32 = 0.15;
pub const MISSILE_TRAIL_CLEANUP: Duration = Duration::from_millis(400);
pub const MISSILE_POOL_CAPACITY: usize = 64;

// ============================================================================
// Player
// ============================================================================

pub const PLAYER_SPEED: f32 = 220.0; // units per second
pub const PLAYER_RADIUS: f32 = 20.0;
pub const INFECTED_SPEED_MULTIPLIER: f32 = 0.75;
pub const JITTER_STEP: f32 = 1.0;
pub const STUN_DURATION: Duration = Duration::from_millis(200);
pub const DEATH_THRESHOLD: f32 = 0.15;

// ============================================================================
// Stabilizer
// ============================================================================

pub const STABILIZER_RADIUS: f32 = 20.0;
pub const STABILIZER_SPEED: f32 = 50.0;
pub const STABILIZER_RETARGET_MIN_MS: u64 = 2000;
pub const STABILIZER_RETARGET_MAX_MS: u64 = 4000;
pub const STABILIZER_AREA_X: (f32, f32) = (300.0, 500.0); // stays near center
pub const STABILIZER_AREA_Y: (f32, f32) = (200.0, 400.0);

// ============================================================================
// Food
// ============================================================================

pub const FOOD_SPAWN_INTERVAL: Duration = Duration::from_millis(2000);
pub const FOOD_MAX_ACTIVE: usize = 5;
pub const FOOD_AREA_X: (f32, f32) = (200.0, 600.0); // danger zone
pub const FOOD_AREA_Y: (f32, f32) = (100.0, 500.0);
pub const FOOD_HEAL: f32 = 0.1;
pub const FOOD_RADIUS: f32 = 8.0;

// ============================================================================
// Level Flow
// ============================================================================

pub const LEVEL_TRANSITION: Duration = Duration::from_millis(3000);
