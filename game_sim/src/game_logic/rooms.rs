//! Path: game_sim/src/game_logic/rooms.rs
//! Summary: 部屋の生成と進行（5 ダンジョン × 3 部屋、最終部屋はボス）

use game_core::constants::{
    MAX_DUNGEONS, MAX_ROOMS, ROOM_ENTRY_INVULN_TICKS, WORLD_HEIGHT, WORLD_WIDTH,
};
use game_core::entity_params::{dungeon_scaling, rarity, EnemyKind, ItemKind};
use game_core::physics::geometry::Aabb;
use game_core::physics::rng::SimpleRng;
use game_core::vector::Vec2;

use crate::enemy::Enemy;
use crate::world::{
    DeathAnimationSystem, FrameEvent, GameState, GameWorld, Obstacle, SPIKE_BASE_DAMAGE,
};

/// 部屋あたりのアイテム出現確率
const ITEM_DROP_CHANCE: f32 = 0.3;
/// 障害物がスパイクになる確率の上限
const SPIKE_CHANCE_CAP: f32 = 0.8;
const BARRIER_CHANCE: f32 = 0.2;

/// 現在の dungeon/room に合わせて部屋を作り直す。
/// プレイヤーの位置と状態は持ち越し、入室直後の短い無敵を与える。
pub fn enter_room(world: &mut GameWorld) {
    world.bullets.bullets.clear();
    world.enemies.clear();
    world.obstacles.clear();
    world.items.clear();
    world.death_animations = DeathAnimationSystem::new();

    generate_obstacles(world);

    if world.room == MAX_ROOMS {
        spawn_boss(world);
    } else {
        spawn_enemies(world);
    }

    if world.rng.next_f32() < ITEM_DROP_CHANCE {
        let kind = roll_item_kind(&mut world.rng);
        let x = world.rng.next_range(100.0, WORLD_WIDTH - 100.0);
        let y = world.rng.next_range(100.0, WORLD_HEIGHT - 100.0);
        world.items.spawn(Vec2::new(x, y), kind);
    }

    world.player.invuln_until = world.tick + ROOM_ENTRY_INVULN_TICKS;
    let (dungeon, room) = (world.dungeon, world.room);
    log::info!("entering dungeon {dungeon} room {room}");
    world.push_event(FrameEvent::RoomChanged { dungeon, room });
    world.push_event(FrameEvent::Sound { name: "room_change" });
}

/// 部屋クリア時の進行。最終ダンジョンの最終部屋を抜けたら勝利。
pub fn advance_room(world: &mut GameWorld) {
    world.room += 1;
    if world.room > MAX_ROOMS {
        world.room = 1;
        world.dungeon += 1;
        if world.dungeon > MAX_DUNGEONS {
            world.state = GameState::Victory;
            let score = world.score;
            world.push_event(FrameEvent::Victory { score });
            world.push_event(FrameEvent::Sound { name: "victory" });
            return;
        }
    }
    enter_room(world);
}

fn generate_obstacles(world: &mut GameWorld) {
    let count = 3 + world.dungeon;
    let (_, _, dmg_mult) = dungeon_scaling(world.dungeon);
    let spike_chance =
        (0.3 + world.dungeon as f32 * 0.15).min(SPIKE_CHANCE_CAP);

    for _ in 0..count {
        let width = world.rng.next_range(30.0, 80.0);
        let height = world.rng.next_range(30.0, 80.0);
        let rect = loop {
            let x = world.rng.next_range(100.0, WORLD_WIDTH - 100.0 - width);
            let y = world.rng.next_range(100.0, WORLD_HEIGHT - 100.0 - height);
            let rect = Aabb::new(x, y, width, height);
            // プレイヤーの初期位置（中央）を塞がない
            let center = Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0);
            if rect.closest_point(center).distance_to(center) > 80.0 {
                break rect;
            }
        };

        let roll = world.rng.next_f32();
        let obstacle = if roll < spike_chance {
            Obstacle::spike(rect, SPIKE_BASE_DAMAGE * dmg_mult)
        } else if roll < spike_chance + BARRIER_CHANCE {
            Obstacle::barrier(rect)
        } else {
            Obstacle::wall(rect)
        };
        world.obstacles.push(obstacle);
    }
}

fn spawn_enemies(world: &mut GameWorld) {
    let count = 2 + world.dungeon + (world.room - 1) / 2;
    for _ in 0..count {
        let position = random_open_position(world);
        let kind = random_enemy_kind(world.dungeon, &mut world.rng);
        let id = world.alloc_enemy_id();
        world
            .enemies
            .push(Enemy::spawn(id, kind, position, world.dungeon));
    }
}

fn spawn_boss(world: &mut GameWorld) {
    let kind = if world.dungeon == MAX_DUNGEONS {
        EnemyKind::SnakeBoss
    } else {
        EnemyKind::Boss
    };
    let id = world.alloc_enemy_id();
    world.enemies.push(Enemy::spawn(
        id,
        kind,
        Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 3.0),
        world.dungeon,
    ));
}

/// 障害物とプレイヤーから十分離れた位置を棄却法で選ぶ
fn random_open_position(world: &mut GameWorld) -> Vec2 {
    let player_pos = world.player.position;
    // 棄却が続いても必ず抜ける（最後の候補をそのまま使う）
    let mut candidate = Vec2::ZERO;
    for _ in 0..32 {
        candidate = Vec2::new(
            world.rng.next_range(50.0, WORLD_WIDTH - 50.0),
            world.rng.next_range(50.0, WORLD_HEIGHT - 50.0),
        );
        let near_obstacle = world
            .obstacles
            .iter()
            .any(|o| o.rect.center().distance_to(candidate) < 100.0);
        if !near_obstacle && candidate.distance_to(player_pos) > 150.0 {
            return candidate;
        }
    }
    candidate
}

/// ダンジョン進行で敵種別が解放される
fn random_enemy_kind(dungeon: u32, rng: &mut SimpleRng) -> EnemyKind {
    let mut pool = vec![EnemyKind::Swarmer, EnemyKind::Exploder, EnemyKind::Shooter];
    if dungeon >= 2 {
        pool.push(EnemyKind::Charger);
    }
    if dungeon >= 3 {
        pool.push(EnemyKind::Sniper);
        pool.push(EnemyKind::Protector);
    }
    pool[rng.next_usize(pool.len())]
}

/// レアリティ重み付きのアイテム抽選
pub fn roll_item_kind(rng: &mut SimpleRng) -> ItemKind {
    let roll = rng.next_f32();
    let table: &[ItemKind] = if roll < 0.60 {
        &rarity::COMMON
    } else if roll < 0.85 {
        &rarity::UNCOMMON
    } else if roll < 0.95 {
        &rarity::RARE
    } else {
        &rarity::EPIC
    };
    table[rng.next_usize(table.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_dungeon_rooms_have_base_enemy_kinds_only() {
        let mut world = GameWorld::new(42);
        enter_room(&mut world);
        assert!(!world.enemies.is_empty());
        for enemy in &world.enemies {
            assert!(matches!(
                enemy.kind,
                EnemyKind::Swarmer | EnemyKind::Exploder | EnemyKind::Shooter
            ));
        }
    }

    #[test]
    fn boss_room_spawns_single_boss() {
        let mut world = GameWorld::new(42);
        world.room = MAX_ROOMS;
        enter_room(&mut world);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].kind, EnemyKind::Boss);
    }

    #[test]
    fn final_dungeon_boss_is_snake() {
        let mut world = GameWorld::new(42);
        world.dungeon = MAX_DUNGEONS;
        world.room = MAX_ROOMS;
        enter_room(&mut world);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].kind, EnemyKind::SnakeBoss);
    }

    #[test]
    fn room_advance_rolls_over_to_next_dungeon() {
        let mut world = GameWorld::new(42);
        world.room = MAX_ROOMS;
        advance_room(&mut world);
        assert_eq!(world.dungeon, 2);
        assert_eq!(world.room, 1);
        assert_eq!(world.state, GameState::Playing);
    }

    #[test]
    fn clearing_final_room_of_final_dungeon_wins() {
        let mut world = GameWorld::new(42);
        world.dungeon = MAX_DUNGEONS;
        world.room = MAX_ROOMS;
        advance_room(&mut world);
        assert_eq!(world.state, GameState::Victory);
        assert!(world
            .frame_events
            .iter()
            .any(|e| matches!(e, FrameEvent::Victory { .. })));
    }

    #[test]
    fn entering_room_grants_brief_invulnerability() {
        let mut world = GameWorld::new(42);
        world.tick = 100;
        enter_room(&mut world);
        assert_eq!(world.player.invuln_until, 100 + ROOM_ENTRY_INVULN_TICKS);
    }

    #[test]
    fn item_roll_always_lands_in_a_rarity_table() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..200 {
            // どのレアリティでも必ず既知の種別が返る
            let _ = roll_item_kind(&mut rng);
        }
    }
}
