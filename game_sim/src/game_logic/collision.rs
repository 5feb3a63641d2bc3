//! Path: game_sim/src/game_logic/collision.rs
//! Summary: グリッド補助の衝突解決（弾・障害物・接触ダメージ）

use game_core::constants::BOUNCE_DAMPING;
use game_core::physics::geometry::{circle_aabb_overlap, circles_overlap, reflect};
use game_core::vector::Vec2;

use crate::enemy::{is_protected, Behavior};
use crate::world::{BulletSource, FrameEvent, GameWorld, GridEntry, ObstacleKind};

/// 近傍の障害物インデックスをグリッドから引く。複数セルに跨る障害物は
/// 重複して返るため、ここで一意化する。
fn nearby_obstacles(world: &mut GameWorld, position: Vec2, radius: f32) -> Vec<u32> {
    let mut candidates = std::mem::take(&mut world.query_buf);
    world
        .grid
        .query_nearby_into(position.x, position.y, radius, &mut candidates);
    let mut indices: Vec<u32> = candidates
        .iter()
        .filter_map(|e| match e {
            GridEntry::Obstacle(i) => Some(*i),
            _ => None,
        })
        .collect();
    indices.sort_unstable();
    indices.dedup();
    world.query_buf = candidates;
    indices
}

/// プレイヤーと障害物の解決。壁/バリアは押し出し、スパイクは
/// 通り抜けられるが接触ダメージを与える（ブロックしない）。
pub fn resolve_player_obstacles(world: &mut GameWorld) {
    let tick = world.tick;
    let (player_pos, player_size) = (world.player.position, world.player.size);
    let indices = nearby_obstacles(world, player_pos, player_size);
    for oi in indices {
        let obstacle = &mut world.obstacles[oi as usize];
        if obstacle.is_solid() {
            game_core::physics::geometry::resolve_circle_aabb(
                &mut world.player.position,
                &mut world.player.velocity,
                world.player.size,
                &obstacle.rect,
                BOUNCE_DAMPING,
            );
        } else if circle_aabb_overlap(world.player.position, world.player.size, &obstacle.rect) {
            let applied = world.player.take_damage(obstacle.spike_damage, tick);
            if applied > 0.0 {
                world
                    .frame_events
                    .push(FrameEvent::PlayerDamaged { amount: applied });
            }
        }
    }
}

/// 敵と障害物の解決。押し出しのみで、スパイクは敵に無害。
pub fn resolve_enemy_obstacles(world: &mut GameWorld) {
    for ei in 0..world.enemies.len() {
        if world.enemies[ei].dying {
            continue;
        }
        let (pos, size) = (world.enemies[ei].position, world.enemies[ei].size);
        let indices = nearby_obstacles(world, pos, size);
        for oi in indices {
            let obstacle = &world.obstacles[oi as usize];
            if !obstacle.is_solid() {
                continue;
            }
            let enemy = &mut world.enemies[ei];
            game_core::physics::geometry::resolve_circle_aabb(
                &mut enemy.position,
                &mut enemy.velocity,
                enemy.size,
                &obstacle.rect,
                BOUNCE_DAMPING,
            );
        }
    }
}

/// 弾の狭域判定。障害物 → 敵（プレイヤー弾）/ プレイヤー（敵弾）の順。
/// バリアの破壊はパスの最後でまとめて除去する（ティック内の
/// インデックス安定性を保つため）。
pub fn resolve_bullets(world: &mut GameWorld) {
    let tick = world.tick;

    for bi in 0..world.bullets.bullets.len() {
        if !world.bullets.bullets[bi].alive {
            continue;
        }

        if hit_obstacles(world, bi) {
            continue;
        }

        match world.bullets.bullets[bi].source {
            BulletSource::Player | BulletSource::Companion => hit_enemies(world, bi),
            BulletSource::Enemy => hit_player(world, bi, tick),
        }
    }

    // 壊れたバリアを落とす（弾のインデックスには影響しない）
    world
        .obstacles
        .retain(|o| o.kind != ObstacleKind::Barrier || o.health > 0.0);
}

/// 固体障害物との判定。弾が止まった（死んだ or 反射した）なら true。
fn hit_obstacles(world: &mut GameWorld, bi: usize) -> bool {
    let bullet = world.bullets.bullets[bi];
    let indices = nearby_obstacles(world, bullet.position, bullet.size);
    for oi in indices {
        let obstacle = &mut world.obstacles[oi as usize];
        if !obstacle.is_solid() {
            continue;
        }
        if !circle_aabb_overlap(bullet.position, bullet.size, &obstacle.rect) {
            continue;
        }
        if obstacle.kind == ObstacleKind::Barrier {
            if obstacle.damage_barrier(bullet.damage) {
                world.particles.debris(
                    bullet.position.x,
                    bullet.position.y,
                    [0.6, 0.6, 0.6],
                );
                world.frame_events.push(FrameEvent::Sound { name: "barrier_break" });
            }
        }

        let b = &mut world.bullets.bullets[bi];
        if b.max_bounces > b.bounce_count {
            // リコシェット弾は面法線で反射して生き残る
            b.bounce_count += 1;
            let closest = obstacle.rect.closest_point(b.position);
            let normal = (b.position - closest).normalized();
            if normal != Vec2::ZERO {
                b.velocity = reflect(b.velocity, normal) * BOUNCE_DAMPING;
                b.position += normal * b.size;
            } else {
                b.alive = false;
            }
        } else {
            b.alive = false;
        }
        return true;
    }
    false
}

/// プレイヤー/コンパニオン弾と敵。グリッドで近傍候補を絞り、
/// 加護判定 → スネーク弱点ルーティング → 通常の被弾の順。
/// 弾は最初の命中で消えるため、グリッドの重複エントリは無害。
fn hit_enemies(world: &mut GameWorld, bi: usize) {
    let bullet = world.bullets.bullets[bi];

    let mut candidates = std::mem::take(&mut world.query_buf);
    world.grid.query_nearby_into(
        bullet.position.x,
        bullet.position.y,
        bullet.size + 60.0,
        &mut candidates,
    );

    for entry in &candidates {
        let GridEntry::Enemy(id) = *entry else { continue };
        let Some(ei) = world.enemies.iter().position(|e| e.id == id) else {
            continue;
        };
        if world.enemies[ei].dying {
            continue;
        }

        // スネークボスは節ごとに判定する
        if let Behavior::Snake(state) = &world.enemies[ei].behavior {
            // 節は重なり合う（頭は隣の節まで覆う）ため、命中は
            // 最寄りの節に帰属させる
            let mut hit_segment: Option<(usize, f32)> = None;
            for (si, segment) in state.segments.iter().enumerate() {
                if !circles_overlap(bullet.position, bullet.size, segment.position, segment.size) {
                    continue;
                }
                let d = (segment.position - bullet.position).length_sq();
                if hit_segment.map_or(true, |(_, best)| d < best) {
                    hit_segment = Some((si, d));
                }
            }
            let Some((si, _)) = hit_segment else { continue };
            let kind = world.enemies[ei].kind;
            if is_protected(&world.enemies, id) {
                world.frame_events.push(FrameEvent::DamageBlocked { kind });
            } else {
                let enemy = &mut world.enemies[ei];
                let applied = enemy.take_segment_damage(bullet.damage, si);
                let pos = enemy.position;
                if applied {
                    world.particles.impact_sparks(pos.x, pos.y, [1.0, 1.0, 1.0]);
                } else {
                    world.frame_events.push(FrameEvent::DamageBlocked { kind });
                    world.particles.impact_sparks(pos.x, pos.y, [1.0, 1.0, 0.0]);
                }
            }
            world.bullets.bullets[bi].alive = false;
            break;
        }

        let (pos, size, kind) = {
            let e = &world.enemies[ei];
            (e.position, e.size, e.kind)
        };
        if !circles_overlap(bullet.position, bullet.size, pos, size) {
            continue;
        }
        if is_protected(&world.enemies, id) {
            world.frame_events.push(FrameEvent::DamageBlocked { kind });
            world.particles.impact_sparks(pos.x, pos.y, [1.0, 0.0, 1.0]);
        } else {
            world.enemies[ei].take_damage(bullet.damage);
            let color = world.enemies[ei].color();
            world.particles.impact_sparks(pos.x, pos.y, color);
        }
        world.bullets.bullets[bi].alive = false;
        break;
    }

    world.query_buf = candidates;
}

/// 敵弾とプレイヤー。ゴースト中は素通りし、命中すればコンボが切れる。
fn hit_player(world: &mut GameWorld, bi: usize, tick: u64) {
    if world.player.ghost {
        return;
    }
    let bullet = world.bullets.bullets[bi];
    if !circles_overlap(
        bullet.position,
        bullet.size,
        world.player.position,
        world.player.size,
    ) {
        return;
    }
    world.bullets.bullets[bi].alive = false;
    world.combo = 0;
    world.combo_expires_at = 0;
    let applied = world.player.take_damage(bullet.damage, tick);
    if applied > 0.0 {
        world
            .frame_events
            .push(FrameEvent::PlayerDamaged { amount: applied });
        world.frame_events.push(FrameEvent::Sound { name: "player_hit" });
        let pos = world.player.position;
        world.particles.impact_sparks(pos.x, pos.y, [1.0, 0.3, 0.3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::Enemy;
    use game_core::entity_params::EnemyKind;
    use game_core::physics::geometry::Aabb;
    use crate::world::Obstacle;

    #[test]
    fn player_bullet_damages_enemy_and_dies() {
        let mut world = GameWorld::new(1);
        let id = world.alloc_enemy_id();
        world
            .enemies
            .push(Enemy::spawn(id, EnemyKind::Charger, Vec2::new(300.0, 300.0), 1));
        world
            .bullets
            .spawn(Vec2::new(300.0, 300.0), Vec2::ZERO, 10.0, 5.0, BulletSource::Player);
        let before = world.enemies[0].health;
        world.rebuild_grid();
        resolve_bullets(&mut world);
        assert_eq!(world.enemies[0].health, before - 10.0);
        assert!(!world.bullets.bullets[0].alive);
    }

    #[test]
    fn protected_enemy_blocks_bullet_damage() {
        let mut world = GameWorld::new(1);
        let ward = world.alloc_enemy_id();
        let guard = world.alloc_enemy_id();
        world
            .enemies
            .push(Enemy::spawn(ward, EnemyKind::Charger, Vec2::new(300.0, 300.0), 1));
        world
            .enemies
            .push(Enemy::spawn(guard, EnemyKind::Protector, Vec2::new(330.0, 300.0), 1));
        world.enemies[1].behavior = Behavior::Protector {
            protected:  Some(ward),
            heal_ready: 0,
        };
        world
            .bullets
            .spawn(Vec2::new(300.0, 300.0), Vec2::ZERO, 10.0, 5.0, BulletSource::Player);
        let before = world.enemies[0].health;
        world.rebuild_grid();
        resolve_bullets(&mut world);
        assert_eq!(world.enemies[0].health, before);
        assert!(world
            .frame_events
            .iter()
            .any(|e| matches!(e, FrameEvent::DamageBlocked { .. })));
    }

    #[test]
    fn enemy_bullet_resets_combo_on_hit() {
        let mut world = GameWorld::new(1);
        world.combo = 12;
        let pos = world.player.position;
        world
            .bullets
            .spawn(pos, Vec2::ZERO, 10.0, 3.0, BulletSource::Enemy);
        resolve_bullets(&mut world);
        assert_eq!(world.combo, 0);
        assert!(world.player.health < world.player.max_health);
    }

    #[test]
    fn ghost_player_is_passed_through_by_enemy_bullets() {
        let mut world = GameWorld::new(1);
        world.player.ghost = true;
        let pos = world.player.position;
        world
            .bullets
            .spawn(pos, Vec2::ZERO, 10.0, 3.0, BulletSource::Enemy);
        resolve_bullets(&mut world);
        assert!(world.bullets.bullets[0].alive);
        assert_eq!(world.player.health, world.player.max_health);
    }

    #[test]
    fn barrier_breaks_and_is_removed() {
        let mut world = GameWorld::new(1);
        world
            .obstacles
            .push(Obstacle::barrier(Aabb::new(295.0, 295.0, 20.0, 20.0)));
        world
            .bullets
            .spawn(Vec2::new(300.0, 300.0), Vec2::ZERO, 200.0, 5.0, BulletSource::Player);
        world.rebuild_grid();
        resolve_bullets(&mut world);
        assert!(world.obstacles.is_empty());
    }

    #[test]
    fn ricochet_bullet_reflects_off_wall() {
        let mut world = GameWorld::new(1);
        world
            .obstacles
            .push(Obstacle::wall(Aabb::new(300.0, 200.0, 40.0, 200.0)));
        world
            .bullets
            .spawn_ricochet(Vec2::new(296.0, 300.0), Vec2::new(8.0, 0.0), 10.0, 5.0, 3);
        world.rebuild_grid();
        resolve_bullets(&mut world);
        let b = world.bullets.bullets[0];
        assert!(b.alive);
        assert_eq!(b.bounce_count, 1);
        assert!(b.velocity.x < 0.0);
    }

    #[test]
    fn snake_non_vital_segment_blocks_damage() {
        let mut world = GameWorld::new(1);
        let id = world.alloc_enemy_id();
        let snake = Enemy::spawn(id, EnemyKind::SnakeBoss, Vec2::new(700.0, 500.0), 5);
        let seg1 = match &snake.behavior {
            Behavior::Snake(state) => state.segments[1].position,
            _ => unreachable!(),
        };
        let before = snake.health;
        world.enemies.push(snake);
        world
            .bullets
            .spawn(seg1, Vec2::ZERO, 50.0, 5.0, BulletSource::Player);
        world.rebuild_grid();
        resolve_bullets(&mut world);
        assert_eq!(world.enemies[0].health, before);
        assert!(!world.bullets.bullets[0].alive);
    }

    #[test]
    fn snake_tail_segment_is_reachable_through_grid() {
        let mut world = GameWorld::new(1);
        let id = world.alloc_enemy_id();
        let snake = Enemy::spawn(id, EnemyKind::SnakeBoss, Vec2::new(700.0, 500.0), 5);
        // 弱点節は頭から離れていてもグリッド経由で命中する
        let seg6 = match &snake.behavior {
            Behavior::Snake(state) => state.segments[6].position,
            _ => unreachable!(),
        };
        let before = snake.health;
        world.enemies.push(snake);
        world
            .bullets
            .spawn(seg6, Vec2::ZERO, 50.0, 5.0, BulletSource::Player);
        world.rebuild_grid();
        resolve_bullets(&mut world);
        assert_eq!(world.enemies[0].health, before - 50.0);
        assert!(!world.bullets.bullets[0].alive);
    }

    #[test]
    fn spike_damages_player_without_blocking() {
        let mut world = GameWorld::new(1);
        let pos = world.player.position;
        world.obstacles.push(Obstacle::spike(
            Aabb::new(pos.x - 10.0, pos.y - 10.0, 20.0, 20.0),
            10.0,
        ));
        let before = world.player.position;
        world.rebuild_grid();
        resolve_player_obstacles(&mut world);
        assert_eq!(world.player.position, before);
        assert!(world.player.health < world.player.max_health);
    }
}
