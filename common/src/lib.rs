pub mod awareness;
pub mod collision;
pub mod constants;
pub mod io;
pub mod items;
pub mod level;
pub mod map;
pub mod markers;
pub mod players;
pub mod projectiles;
pub mod protocol;
pub mod sentinel;
pub mod stabilizer;
pub mod vitals;
