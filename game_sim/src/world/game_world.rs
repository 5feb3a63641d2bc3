//! Path: game_sim/src/world/game_world.rs
//! Summary: ゲームワールド（全サブシステムの所有者）

use game_core::constants::{CELL_SIZE, PARTICLE_RNG_SEED};
use game_core::physics::rng::SimpleRng;
use game_core::physics::spatial_grid::SpatialGrid;

use crate::enemy::{Behavior, Enemy, EnemyId, EnemyShot, SpawnRequest};
use crate::world::{
    BulletWorld, DeathAnimationSystem, FrameEvent, ItemWorld, Obstacle, ParticleWorld, Player,
};

/// 空間グリッドに登録される実体の参照。すべて ID ベースで、
/// 解決はクエリしたティック内でのみ有効。弾・プレイヤーは
/// クエリする側なので登録しない。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridEntry {
    Enemy(EnemyId),
    Obstacle(u32),
}

/// ライフサイクル状態。GameOver / Victory に入ったら tick は何もしない。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
    Victory,
}

/// ゲームワールド内部状態
pub struct GameWorld {
    pub tick:             u64,
    pub state:            GameState,
    pub player:           Player,
    pub enemies:          Vec<Enemy>,
    pub next_enemy_id:    EnemyId,
    pub bullets:          BulletWorld,
    pub obstacles:        Vec<Obstacle>,
    pub items:            ItemWorld,
    pub particles:        ParticleWorld,
    pub death_animations: DeathAnimationSystem,
    pub grid:             SpatialGrid<GridEntry>,
    pub rng:              SimpleRng,
    pub score:            u32,
    /// 連続撃破カウント（上限あり、撃破スコアの倍率になる）
    pub combo:            u32,
    pub combo_expires_at: u64,
    pub dungeon:          u32,
    pub room:             u32,
    /// このティックで発生したイベント（毎ティック drain される）
    pub frame_events:     Vec<FrameEvent>,
    // クエリ・行動出力の再利用バッファ
    pub(crate) query_buf: Vec<GridEntry>,
    pub(crate) shot_buf:  Vec<EnemyShot>,
    pub(crate) spawn_buf: Vec<SpawnRequest>,
}

impl GameWorld {
    pub fn new(seed: u64) -> GameWorld {
        GameWorld {
            tick:             0,
            state:            GameState::Playing,
            player:           Player::new(),
            enemies:          Vec::new(),
            next_enemy_id:    1,
            bullets:          BulletWorld::new(),
            obstacles:        Vec::new(),
            items:            ItemWorld::new(),
            particles:        ParticleWorld::new(PARTICLE_RNG_SEED),
            death_animations: DeathAnimationSystem::new(),
            grid:             SpatialGrid::new(CELL_SIZE),
            rng:              SimpleRng::new(seed),
            score:            0,
            combo:            0,
            combo_expires_at: 0,
            dungeon:          1,
            room:             1,
            frame_events:     Vec::new(),
            query_buf:        Vec::new(),
            shot_buf:         Vec::new(),
            spawn_buf:        Vec::new(),
        }
    }

    pub fn alloc_enemy_id(&mut self) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        id
    }

    pub fn push_event(&mut self, event: FrameEvent) {
        self.frame_events.push(event);
    }

    /// 外側（埋め込み側）が毎フレーム呼んでイベントを回収する
    pub fn drain_events(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.frame_events)
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// 生存していて死亡演出にも入っていない敵の数。
    /// 部屋クリア判定はこの値が 0 かつ演出も全消化のとき。
    pub fn active_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| !e.dying).count()
    }

    /// 衝突判定用の空間グリッドを再構築する
    pub fn rebuild_grid(&mut self) {
        self.grid.clear();
        for enemy in &self.enemies {
            if enemy.dying {
                continue;
            }
            // スネークは胴体が数百単位伸びるため、節ごとに登録する
            if let Behavior::Snake(state) = &enemy.behavior {
                for segment in &state.segments {
                    self.grid.insert(
                        GridEntry::Enemy(enemy.id),
                        segment.position.x,
                        segment.position.y,
                        segment.size,
                    );
                }
                continue;
            }
            self.grid.insert(
                GridEntry::Enemy(enemy.id),
                enemy.position.x,
                enemy.position.y,
                enemy.size,
            );
        }
        for (i, obstacle) in self.obstacles.iter().enumerate() {
            let center = obstacle.rect.center();
            self.grid.insert(
                GridEntry::Obstacle(i as u32),
                center.x,
                center.y,
                obstacle.rect.bounding_radius(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::entity_params::EnemyKind;
    use game_core::vector::Vec2;

    #[test]
    fn enemy_ids_are_unique_and_stable() {
        let mut world = GameWorld::new(1);
        let a = world.alloc_enemy_id();
        let b = world.alloc_enemy_id();
        assert_ne!(a, b);
        world.enemies.push(Enemy::spawn(a, EnemyKind::Swarmer, Vec2::new(100.0, 100.0), 1));
        assert!(world.enemy(a).is_some());
        assert!(world.enemy(b).is_none());
    }

    #[test]
    fn grid_rebuild_registers_live_entities_only() {
        let mut world = GameWorld::new(1);
        let id = world.alloc_enemy_id();
        world.enemies.push(Enemy::spawn(id, EnemyKind::Swarmer, Vec2::new(200.0, 200.0), 1));
        world.rebuild_grid();
        let mut buf = Vec::new();
        world.grid.query_nearby_into(200.0, 200.0, 10.0, &mut buf);
        assert!(buf.contains(&GridEntry::Enemy(id)));

        world.enemies[0].dying = true;
        world.rebuild_grid();
        buf.clear();
        world.grid.query_nearby_into(200.0, 200.0, 10.0, &mut buf);
        assert!(!buf.contains(&GridEntry::Enemy(id)));
    }

    #[test]
    fn grid_rebuild_covers_every_snake_segment() {
        let mut world = GameWorld::new(1);
        let id = world.alloc_enemy_id();
        let snake = Enemy::spawn(id, EnemyKind::SnakeBoss, Vec2::new(700.0, 500.0), 5);
        let tail = match &snake.behavior {
            Behavior::Snake(state) => state.segments.last().unwrap().position,
            _ => unreachable!(),
        };
        world.enemies.push(snake);
        world.rebuild_grid();
        let mut buf = Vec::new();
        world.grid.query_nearby_into(tail.x, tail.y, 10.0, &mut buf);
        assert!(buf.contains(&GridEntry::Enemy(id)));
    }

    #[test]
    fn drain_events_empties_queue() {
        let mut world = GameWorld::new(1);
        world.push_event(FrameEvent::Sound { name: "shoot" });
        let events = world.drain_events();
        assert_eq!(events.len(), 1);
        assert!(world.frame_events.is_empty());
    }
}
