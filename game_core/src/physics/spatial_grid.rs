//! Path: game_core/src/physics/spatial_grid.rs
//! Summary: 固定セルの空間グリッド（AABB 範囲挿入・近傍クエリ）

use rustc_hash::FxHashMap;

/// 毎ティック再構築される broad-phase グリッド。
/// エンティティは自身の半径がまたぐ全セルに登録される。
pub struct SpatialGrid<T: Copy> {
    pub cell_size: f32,
    cells: FxHashMap<(i32, i32), Vec<T>>,
}

impl<T: Copy> SpatialGrid<T> {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: FxHashMap::default(),
        }
    }

    pub fn clear(&mut self) {
        // セル Vec を捨てずに使い回す（毎ティックの再確保を避ける）
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
    }

    fn cell_index(&self, v: f32) -> i32 {
        (v / self.cell_size).floor() as i32
    }

    /// `(x, y)` 中心・半径 `radius` の AABB がまたぐ全セルに登録する
    pub fn insert(&mut self, entry: T, x: f32, y: f32, radius: f32) {
        let min_x = self.cell_index(x - radius);
        let max_x = self.cell_index(x + radius);
        let min_y = self.cell_index(y - radius);
        let max_y = self.cell_index(y + radius);
        for ix in min_x..=max_x {
            for iy in min_y..=max_y {
                self.cells.entry((ix, iy)).or_default().push(entry);
            }
        }
    }

    /// 指定円の近傍セルにある全エントリを `buf` へ書き込む（アロケーションなし）。
    /// 複数セルにまたがるエンティティは重複して返ることがある。
    pub fn query_nearby_into(&self, x: f32, y: f32, radius: f32, buf: &mut Vec<T>) {
        buf.clear();
        let min_x = self.cell_index(x - radius);
        let max_x = self.cell_index(x + radius);
        let min_y = self.cell_index(y - radius);
        let max_y = self.cell_index(y + radius);
        for ix in min_x..=max_x {
            for iy in min_y..=max_y {
                if let Some(bucket) = self.cells.get(&(ix, iy)) {
                    buf.extend_from_slice(bucket);
                }
            }
        }
    }
}
