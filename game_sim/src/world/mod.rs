//! Path: game_sim/src/world/mod.rs
//! Summary: ワールド型（Player, BulletWorld, Obstacle, ItemWorld, ParticleWorld, GameWorld）

mod bullet;
mod death_animation;
mod frame_event;
mod game_world;
mod item;
mod obstacle;
mod particle;
mod player;

pub use bullet::{Bullet, BulletSource, BulletWorld};
pub use death_animation::{DeathAnimationSystem, DeathKind};
pub use frame_event::FrameEvent;
pub use game_world::{GameState, GameWorld, GridEntry};
pub use item::{DroppedItem, ItemWorld, PendingEffect};
pub use obstacle::{Obstacle, ObstacleKind, SPIKE_BASE_DAMAGE};
pub use particle::ParticleWorld;
pub use player::{Companion, Player, WeaponMode};
