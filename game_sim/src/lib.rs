//! Path: game_sim/src/lib.rs
//! Summary: エンティティワールドと権威ティック（モジュール宣言・pub use）

pub mod enemy;
pub mod game_logic;
pub mod render_snapshot;
pub mod world;

pub use game_core::entity_params::{EnemyKind, ItemKind};
pub use game_core::weapon::WeaponTier;
pub use game_logic::tick::{advance, PlayerInput};
pub use render_snapshot::{build_snapshot, RenderSnapshot};
pub use world::{FrameEvent, GameWorld};
