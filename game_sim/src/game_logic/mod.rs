//! Path: game_sim/src/game_logic/mod.rs
//! Summary: ティック進行・衝突解決・部屋生成・アイテム効果

pub mod collision;
pub mod item_effects;
pub mod rooms;
pub mod tick;

pub use tick::PlayerInput;
