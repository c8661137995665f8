pub mod items;
pub mod level;
pub mod players;
pub mod projectiles;
pub mod report;
pub mod sentinels;
pub mod stabilizer;

pub use items::{food_collection_system, food_spawn_system};
pub use level::{level_is_playing, level_setup_system, level_transition_system, safe_zone_system};
pub use players::{pilot_input_system, players_death_watch_system, players_movement_system, players_timer_system};
pub use projectiles::{projectiles_hit_system, projectiles_movement_system};
pub use report::{stats_system, status_report_system, tick_counter_system};
pub use sentinels::sentinels_update_system;
pub use stabilizer::{stabilizer_contact_system, stabilizer_wander_system};
