//! Path: game_core/src/physics/mod.rs
//! Summary: 物理プリミティブ（空間グリッド・幾何判定・決定論 RNG）

pub mod geometry;
pub mod rng;
pub mod spatial_grid;
