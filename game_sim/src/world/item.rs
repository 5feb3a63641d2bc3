//! Path: game_sim/src/world/item.rs
//! Summary: フィールド上のアイテムと取得後も進行する遅延効果

use game_core::entity_params::ItemKind;
use game_core::vector::Vec2;

#[derive(Clone, Copy, Debug)]
pub struct DroppedItem {
    pub position: Vec2,
    pub kind:     ItemKind,
}

/// 取得後もワールド内で進行する効果。ブラックホールは設置位置で成長して
/// 吸引・爆発し、ヴァルキリーは無敵時間の終わりに広域キルを解決する。
/// 解決し終えたらリストから自己除去される。
#[derive(Clone, Copy, Debug)]
pub enum PendingEffect {
    BlackHole {
        position:    Vec2,
        detonate_at: u64,
    },
    Valkyrie {
        resolve_at: u64,
    },
}

pub struct ItemWorld {
    pub items:   Vec<DroppedItem>,
    pub pending: Vec<PendingEffect>,
}

impl ItemWorld {
    pub fn new() -> Self {
        Self {
            items:   Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn spawn(&mut self, position: Vec2, kind: ItemKind) {
        self.items.push(DroppedItem { position, kind });
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.pending.clear();
    }
}

impl Default for ItemWorld {
    fn default() -> Self {
        Self::new()
    }
}
