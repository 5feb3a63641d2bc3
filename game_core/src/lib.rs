//! Path: game_core/src/lib.rs
//! Summary: シミュレーションコア共通ロジック（定数・パラメータ・武器・物理プリミティブ）

pub mod constants;
pub mod entity_params;
pub mod laser;
pub mod physics;
pub mod vector;
pub mod weapon;
