//! Path: game_sim/src/world/obstacle.rs
//! Summary: 軸平行矩形の障害物（壁・スパイク・バリア）

use game_core::physics::geometry::Aabb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    /// 通行不可の壁
    Wall,
    /// 通り抜けられるが接触ダメージを与える
    Spike,
    /// 通行不可かつ破壊可能（自前の体力を持つ）
    Barrier,
}

#[derive(Clone, Copy, Debug)]
pub struct Obstacle {
    pub rect:   Aabb,
    pub kind:   ObstacleKind,
    /// Barrier のみ使用
    pub health: f32,
    /// ダンジョン倍率適用後のスパイク接触ダメージ
    pub spike_damage: f32,
}

pub const BARRIER_HEALTH: f32 = 100.0;
pub const SPIKE_BASE_DAMAGE: f32 = 10.0;

impl Obstacle {
    pub fn wall(rect: Aabb) -> Self {
        Obstacle {
            rect,
            kind: ObstacleKind::Wall,
            health: 0.0,
            spike_damage: 0.0,
        }
    }

    pub fn spike(rect: Aabb, damage: f32) -> Self {
        Obstacle {
            rect,
            kind: ObstacleKind::Spike,
            health: 0.0,
            spike_damage: damage,
        }
    }

    pub fn barrier(rect: Aabb) -> Self {
        Obstacle {
            rect,
            kind: ObstacleKind::Barrier,
            health: BARRIER_HEALTH,
            spike_damage: 0.0,
        }
    }

    /// 弾と身体をブロックするか（スパイクはしない）
    pub fn is_solid(&self) -> bool {
        match self.kind {
            ObstacleKind::Wall | ObstacleKind::Barrier => true,
            ObstacleKind::Spike => false,
        }
    }

    /// バリアの被弾。破壊されたら true。
    pub fn damage_barrier(&mut self, amount: f32) -> bool {
        debug_assert_eq!(self.kind, ObstacleKind::Barrier);
        self.health = (self.health - amount).max(0.0);
        self.health <= 0.0
    }
}
