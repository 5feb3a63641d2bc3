//! Path: game_sim/tests/sim_tests.rs
//! Summary: シミュレーション全体のシナリオテスト

use game_core::constants::{MAX_DUNGEONS, MAX_ROOMS};
use game_core::entity_params::{exploder, EnemyKind, ItemKind};
use game_core::physics::spatial_grid::SpatialGrid;
use game_core::vector::Vec2;
use game_core::weapon::WeaponTier;

use game_sim::enemy::{is_protected, Enemy};
use game_sim::game_logic::rooms;
use game_sim::world::{BulletSource, FrameEvent, GameState, GameWorld};
use game_sim::{advance, PlayerInput};

fn init_logs() {
    let _ = env_logger::Builder::from_default_env().try_init();
}

fn idle() -> PlayerInput {
    PlayerInput::default()
}

/// 部屋遷移を防ぐための、プレイヤーに反応しない遠方の敵
fn push_keeper(world: &mut GameWorld) -> u32 {
    let id = world.alloc_enemy_id();
    world
        .enemies
        .push(Enemy::spawn(id, EnemyKind::Charger, Vec2::new(1300.0, 900.0), 1));
    id
}

#[test]
fn weapon_tier_bands_are_exhaustive() {
    init_logs();
    for hp in 0..=100u32 {
        // どの体力割合でも必ずどれかのティアに解決される
        let tier = WeaponTier::for_health(hp as f32, 100.0);
        let _ = tier.params();
    }
    assert!(!WeaponTier::for_health(95.0, 100.0).is_laser());
    assert!(WeaponTier::for_health(5.0, 100.0).is_laser());
}

#[test]
fn spatial_grid_same_cell_entities_see_each_other() {
    init_logs();
    let mut grid: SpatialGrid<u32> = SpatialGrid::new(100.0);
    grid.insert(1, 150.0, 150.0, 5.0);
    grid.insert(2, 160.0, 160.0, 5.0);
    grid.insert(3, 950.0, 950.0, 5.0);

    let mut out = Vec::new();
    grid.query_nearby_into(150.0, 150.0, 5.0, &mut out);
    assert!(out.contains(&1));
    assert!(out.contains(&2));
    assert!(!out.contains(&3));
}

#[test]
fn protected_enemy_is_invulnerable_until_protector_dies() {
    init_logs();
    let mut world = GameWorld::new(11);
    let protector_id = world.alloc_enemy_id();
    world.enemies.push(Enemy::spawn(
        protector_id,
        EnemyKind::Protector,
        Vec2::new(300.0, 300.0),
        1,
    ));
    let swarmer_id = world.alloc_enemy_id();
    world.enemies.push(Enemy::spawn(
        swarmer_id,
        EnemyKind::Swarmer,
        Vec2::new(310.0, 300.0),
        1,
    ));

    // 最初のティックでプロテクターが護衛対象を選ぶ
    advance(&mut world, &idle());
    let ward = world
        .enemies
        .iter()
        .find(|e| e.kind == EnemyKind::Swarmer)
        .map(|e| e.id)
        .unwrap();
    assert!(is_protected(&world.enemies, ward));

    // プロテクターを殺すと、次のティックから加護が消える
    world
        .enemies
        .iter_mut()
        .find(|e| e.id == protector_id)
        .unwrap()
        .health = 0.0;
    advance(&mut world, &idle());
    assert!(!is_protected(&world.enemies, ward));
}

#[test]
fn exploder_blast_damage_follows_linear_falloff() {
    init_logs();
    let mut world = GameWorld::new(11);
    push_keeper(&mut world);
    let id = world.alloc_enemy_id();
    let distance = 20.0;
    let pos = world.player.position + Vec2::new(distance, 0.0);
    let mut bomb = Enemy::spawn(id, EnemyKind::Exploder, pos, 1);
    bomb.activated = false; // その場に留めて爆心距離を固定する
    bomb.health = 0.0;
    world.enemies.push(bomb);

    let before = world.player.health;
    advance(&mut world, &idle());
    let expected =
        (exploder::EXPLOSION_DAMAGE * (1.0 - distance / exploder::EXPLOSION_RADIUS)).floor();
    assert_eq!(world.player.health, before - expected);
}

#[test]
fn snake_vital_segments_gate_damage() {
    init_logs();
    let mut world = GameWorld::new(11);
    let id = world.alloc_enemy_id();
    world
        .enemies
        .push(Enemy::spawn(id, EnemyKind::SnakeBoss, Vec2::new(700.0, 300.0), 5));
    let snake = &mut world.enemies[0];
    let before = snake.health;

    assert!(!snake.take_segment_damage(50.0, 1));
    assert_eq!(snake.health, before);

    assert!(snake.take_segment_damage(50.0, 3));
    assert_eq!(snake.health, before - 50.0);
}

#[test]
fn non_ricochet_bullet_dies_on_wall_but_ricochet_reflects() {
    init_logs();
    let mut world = GameWorld::new(11);
    push_keeper(&mut world);
    world.obstacles.push(game_sim::world::Obstacle::wall(
        game_core::physics::geometry::Aabb::new(760.0, 450.0, 100.0, 100.0),
    ));

    world.bullets.spawn(
        Vec2::new(750.0, 500.0),
        Vec2::new(8.0, 0.0),
        10.0,
        5.0,
        BulletSource::Player,
    );
    world
        .bullets
        .spawn_ricochet(Vec2::new(750.0, 480.0), Vec2::new(8.0, 0.0), 10.0, 5.0, 3);

    for _ in 0..4 {
        advance(&mut world, &idle());
    }
    let bullets = &world.bullets.bullets;
    // 通常弾は消え、リコシェット弾は反射して生き残る
    assert_eq!(world.bullets.alive_count(), 1);
    let survivor = bullets.iter().find(|b| b.alive).unwrap();
    assert!(survivor.max_bounces > 0);
    assert!(survivor.velocity.x < 0.0);
}

#[test]
fn room_advances_exactly_once_after_all_kills() {
    init_logs();
    let mut world = GameWorld::new(23);
    rooms::enter_room(&mut world);
    assert!(!world.enemies.is_empty());
    assert_eq!(world.room, 1);

    for enemy in &mut world.enemies {
        enemy.health = 0.0;
    }
    world.drain_events(); // 初回入室分の RoomChanged を捨てる
    let mut room_changes = 0;
    for _ in 0..120 {
        advance(&mut world, &idle());
        for event in world.drain_events() {
            if matches!(event, FrameEvent::RoomChanged { .. }) {
                room_changes += 1;
            }
        }
        if world.room == 2 {
            break;
        }
    }
    assert_eq!(world.room, 2);
    assert_eq!(room_changes, 1);
}

#[test]
fn final_room_clear_is_victory() {
    init_logs();
    let mut world = GameWorld::new(23);
    world.dungeon = MAX_DUNGEONS;
    world.room = MAX_ROOMS;
    world.enemies.clear();
    advance(&mut world, &idle());
    assert_eq!(world.state, GameState::Victory);
    let events = world.drain_events();
    assert!(events.iter().any(|e| matches!(e, FrameEvent::Victory { .. })));
}

#[test]
fn boss_room_spawns_single_boss() {
    init_logs();
    let mut world = GameWorld::new(31);
    world.room = MAX_ROOMS;
    rooms::enter_room(&mut world);
    assert_eq!(world.enemies.len(), 1);
    assert_eq!(world.enemies[0].kind, EnemyKind::Boss);

    let mut last = GameWorld::new(31);
    last.dungeon = MAX_DUNGEONS;
    last.room = MAX_ROOMS;
    rooms::enter_room(&mut last);
    assert_eq!(last.enemies.len(), 1);
    assert_eq!(last.enemies[0].kind, EnemyKind::SnakeBoss);
}

#[test]
fn same_seed_same_input_is_deterministic() {
    init_logs();
    let run = |seed: u64| {
        let mut world = GameWorld::new(seed);
        rooms::enter_room(&mut world);
        let input = PlayerInput {
            movement: Vec2::new(1.0, 0.3),
            aim:      Vec2::new(1200.0, 200.0),
            firing:   true,
        };
        for _ in 0..300 {
            advance(&mut world, &input);
        }
        (
            world.tick,
            world.score,
            world.player.position,
            world.player.health,
            world.enemies.len(),
            world.bullets.bullets.len(),
        )
    };
    assert_eq!(run(777), run(777));
}

#[test]
fn item_effect_expires_and_restores_prior_state() {
    init_logs();
    let mut world = GameWorld::new(41);
    push_keeper(&mut world);
    world.items.spawn(world.player.position, ItemKind::Ghost);
    advance(&mut world, &idle());
    assert!(world.player.ghost);

    let duration = game_core::entity_params::ItemParams::get(ItemKind::Ghost).duration_ticks;
    for _ in 0..=duration {
        advance(&mut world, &idle());
    }
    assert!(!world.player.ghost);
}

#[test]
fn death_animation_lifecycle_tracks_and_cleans_up() {
    init_logs();
    let mut world = GameWorld::new(53);
    push_keeper(&mut world);
    let id = world.alloc_enemy_id();
    let mut victim = Enemy::spawn(id, EnemyKind::Swarmer, Vec2::new(200.0, 200.0), 1);
    victim.activated = false;
    victim.health = 0.0;
    world.enemies.push(victim);

    advance(&mut world, &idle());
    assert!(world.death_animations.is_dying(id));
    assert_eq!(world.enemies.len(), 2);

    for _ in 0..60 {
        advance(&mut world, &idle());
    }
    // 死体は演出完了で除去され、追跡情報も掃除される
    assert_eq!(world.enemies.len(), 1);
    assert!(!world.death_animations.is_dying(id));
    assert!(!world.death_animations.is_complete(id));
}
