//! Path: game_sim/src/game_logic/tick.rs
//! Summary: 1 ティックの統合更新（入力 → 武器 → 敵 → 衝突 → 部屋遷移 → アイテム）

use game_core::constants::{
    COMBO_MAX, COMBO_WINDOW_TICKS, PLAYER_BULLET_SIZE, PLAYER_BULLET_SPEED, WORLD_HEIGHT,
    WORLD_WIDTH,
};
use game_core::entity_params::{exploder, item, EnemyKind, ItemKind};
use game_core::physics::geometry::{circle_hits_segment, circles_overlap, Aabb};
use game_core::laser::{BeamSegment, LaserEvent, BEAM_WIDTH};
use game_core::vector::Vec2;

use crate::enemy::{is_protected, update_protector, Behavior, BehaviorCtx, Enemy};
use crate::game_logic::{collision, item_effects, rooms};
use crate::world::{
    BulletSource, DeathKind, FrameEvent, GameState, GameWorld, WeaponMode,
};

/// 1 ティック分の入力。movement は正規化前でよい（プレイヤー側で正規化）。
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerInput {
    pub movement: Vec2,
    pub aim:      Vec2,
    pub firing:   bool,
}

/// シミュレーションを 1 ティック進める。更新順は固定:
/// コンボ失効 → 時計 → プレイヤー → 武器ティア → ビーム → 死亡演出 →
/// 敵 → 死亡ラッチ → 死体整理 → グリッド → 障害物 → 弾 → パーティクル →
/// プレイヤー死亡 → 部屋遷移 → アイテム。
pub fn advance(world: &mut GameWorld, input: &PlayerInput) {
    if world.state != GameState::Playing {
        return;
    }

    if world.combo > 0 && world.tick >= world.combo_expires_at {
        world.combo = 0;
    }

    world.tick += 1;
    let tick = world.tick;
    log::trace!(
        "tick {tick}: enemies={} bullets={} score={}",
        world.enemies.len(),
        world.bullets.alive_count(),
        world.score
    );
    let time_scale = if world.player.is_effect_active(ItemKind::TimeBubble, tick) {
        item::TIME_BUBBLE_SLOW
    } else {
        1.0
    };

    world.player.input = input.movement;
    world.player.aim = input.aim;
    world.player.advance(tick);
    if input.firing {
        fire_weapon(world);
    }

    retier_weapon(world);
    advance_beam(world);
    world.death_animations.advance();

    update_enemies(world, time_scale);
    latch_enemy_deaths(world);
    drop_finished_corpses(world);

    world.rebuild_grid();
    collision::resolve_player_obstacles(world);
    collision::resolve_enemy_obstacles(world);

    world.bullets.advance();
    collision::resolve_bullets(world);
    world.bullets.compact();

    world.particles.advance();

    if world.player.is_dead() {
        world.state = GameState::GameOver;
        world.push_event(FrameEvent::GameOver { score: world.score });
        world.push_event(FrameEvent::Sound { name: "game_over" });
        log::info!("game over at dungeon {} room {}", world.dungeon, world.room);
        return;
    }

    if world.enemies.is_empty() {
        rooms::advance_room(world);
        return;
    }

    item_effects::update_items(world);
}

// ─── 武器 ───────────────────────────────────────────────────────

fn fire_weapon(world: &mut GameWorld) {
    let tick = world.tick;
    let origin = world.player.position;
    let direction = (world.player.aim - origin).normalized();
    if direction == Vec2::ZERO {
        return;
    }

    if world.player.weapon.tier.is_laser() {
        let branching = world.player.weapon_mode == WeaponMode::Bazooka;
        if world.player.laser.try_fire(tick, branching) {
            world.push_event(FrameEvent::Sound { name: "laser" });
        }
        return;
    }

    let Some(shot) = world.player.weapon.try_shoot(tick, direction) else {
        return;
    };

    let mut damage = shot.damage * world.player.damage_mult;
    let mut size = PLAYER_BULLET_SIZE;
    let mut speed = PLAYER_BULLET_SPEED;
    if world.player.weapon_mode == WeaponMode::Bazooka {
        damage *= item::BAZOOKA_DAMAGE_MULT;
        size *= item::BAZOOKA_SIZE_MULT;
        speed *= item::BAZOOKA_SPEED_MULT;
    }

    let muzzle = origin + direction * (world.player.size + size);
    if world.player.weapon_mode == WeaponMode::Ricochet {
        world.bullets.spawn_ricochet(
            muzzle,
            direction * speed,
            damage,
            size,
            item::RICOCHET_MAX_BOUNCES,
        );
    } else {
        world
            .bullets
            .spawn(muzzle, direction * speed, damage, size, BulletSource::Player);
    }
    world.player.apply_recoil(shot.direction, shot.recoil);
    world.particles.muzzle_flash(muzzle.x, muzzle.y);
    world.push_event(FrameEvent::Sound { name: "shoot" });
}

/// 体力割合に応じた武器ティアの追従。切り替わったティックだけ通知する。
fn retier_weapon(world: &mut GameWorld) {
    let health = world.player.health;
    let max_health = world.player.max_health;
    if let Some(tier) = world.player.weapon.retier(health, max_health) {
        world.push_event(FrameEvent::tier_changed(tier));
        world.push_event(FrameEvent::Sound { name: "weapon_change" });
    }
}

// ─── ビーム ─────────────────────────────────────────────────────

fn advance_beam(world: &mut GameWorld) {
    let tick = world.tick;
    let origin = world.player.position;
    let aim = world.player.aim;

    let solids: Vec<Aabb> = world
        .obstacles
        .iter()
        .filter(|o| o.is_solid())
        .map(|o| o.rect)
        .collect();

    if let Some(LaserEvent::Expired { recoil }) =
        world
            .player
            .laser
            .update(tick, origin, aim, WORLD_WIDTH, WORLD_HEIGHT, &solids)
    {
        let direction = (aim - origin).normalized();
        world.player.apply_recoil(direction, recoil);
    }

    let mut segments = Vec::new();
    world.player.laser.segments_into(&mut segments);
    if !segments.is_empty() {
        apply_beam_damage(world, &segments);
    }
}

/// ビームセグメントと敵の当たり判定。加護対象はダメージを受けず、
/// スネークボスは弱点セグメント経由でのみ本体へ通る。
fn apply_beam_damage(world: &mut GameWorld, segments: &[BeamSegment]) {
    let damage_mult = world.player.damage_mult;
    let warded: Vec<u32> = world
        .enemies
        .iter()
        .map(|e| e.id)
        .filter(|&id| is_protected(&world.enemies, id))
        .collect();

    let particles = &mut world.particles;
    for enemy in &mut world.enemies {
        if enemy.dying || warded.contains(&enemy.id) {
            continue;
        }
        for segment in segments {
            let damage = segment.damage * damage_mult;
            if let Behavior::Snake(state) = &enemy.behavior {
                let mut hit_index = None;
                for (si, seg) in state.segments.iter().enumerate() {
                    if circle_hits_segment(seg.position, seg.size, segment.start, segment.end, BEAM_WIDTH)
                    {
                        hit_index = Some((si, seg.position));
                        break;
                    }
                }
                if let Some((si, pos)) = hit_index {
                    if enemy.take_segment_damage(damage, si) {
                        particles.impact_sparks(pos.x, pos.y, [1.0, 1.0, 1.0]);
                    }
                }
            } else if circle_hits_segment(
                enemy.position,
                enemy.size,
                segment.start,
                segment.end,
                BEAM_WIDTH,
            ) {
                enemy.take_damage(damage);
                particles.impact_sparks(enemy.position.x, enemy.position.y, enemy.color());
            }
        }
    }
}

// ─── 敵 ─────────────────────────────────────────────────────────

fn update_enemies(world: &mut GameWorld, time_scale: f32) {
    let tick = world.tick;
    let player_pos = world.player.position;
    let player_size = world.player.size;

    let mut enemies = std::mem::take(&mut world.enemies);
    let mut shots = std::mem::take(&mut world.shot_buf);
    let mut spawns = std::mem::take(&mut world.spawn_buf);
    shots.clear();
    spawns.clear();
    let mut contact_damage = 0.0f32;
    let mut phase_changes: Vec<u8> = Vec::new();

    {
        let mut ctx = BehaviorCtx {
            tick,
            player_pos,
            player_size,
            time_scale,
            rng:            &mut world.rng,
            shots:          &mut shots,
            spawn_requests: &mut spawns,
            contact_damage: &mut contact_damage,
        };
        for i in 0..enemies.len() {
            if enemies[i].dying {
                continue;
            }
            if matches!(enemies[i].behavior, Behavior::Protector { .. }) {
                update_protector(&mut enemies, i, &mut ctx);
            } else if let Some(phase) = enemies[i].update(&mut ctx) {
                phase_changes.push(phase);
            }
        }
    }

    for phase in phase_changes {
        world.push_event(FrameEvent::BossPhaseChanged { phase });
        world.push_event(FrameEvent::Sound { name: "boss_phase" });
    }

    for request in spawns.drain(..) {
        let id = world.alloc_enemy_id();
        let mut minion = Enemy::spawn(id, request.kind, request.position, world.dungeon);
        if request.half_health {
            minion.max_health *= 0.5;
            minion.health = minion.max_health;
        }
        enemies.push(minion);
    }

    for shot in shots.drain(..) {
        world.bullets.spawn(
            shot.position,
            shot.velocity,
            shot.damage,
            shot.size,
            BulletSource::Enemy,
        );
    }

    world.enemies = enemies;
    world.shot_buf = shots;
    world.spawn_buf = spawns;

    // 体当たり・毒沼などの直接接触ダメージ。コンボは途切れない。
    if contact_damage > 0.0 {
        let applied = world.player.take_damage(contact_damage, tick);
        if applied > 0.0 {
            world.push_event(FrameEvent::PlayerDamaged { amount: applied });
            world.push_event(FrameEvent::Sound { name: "player_hit" });
        }
    }
}

/// 体力が尽きた敵の一回きりの死亡処理。演出・スコア・コンボはここでだけ
/// 発火し、死体は演出完了まで残る。
fn latch_enemy_deaths(world: &mut GameWorld) {
    let tick = world.tick;
    let mut detonations: Vec<(Vec2, f32)> = Vec::new();

    for i in 0..world.enemies.len() {
        if world.enemies[i].health > 0.0 || world.enemies[i].dying {
            continue;
        }
        world.enemies[i].dying = true;
        let (id, kind, position, size, color, damage_mult) = {
            let e = &world.enemies[i];
            (e.id, e.kind, e.position, e.size, e.color(), e.damage_mult)
        };
        world.death_animations.start(
            id,
            DeathKind::for_enemy(kind),
            position.x,
            position.y,
            size,
            color,
            &mut world.particles,
        );

        register_kill(world, kind);
        if kind == EnemyKind::Exploder {
            detonations.push((position, damage_mult));
            world.push_event(FrameEvent::Sound { name: "explosion" });
        } else {
            world.push_event(FrameEvent::Sound { name: "enemy_death" });
        }
    }

    for (center, damage_mult) in detonations {
        detonate_exploder(world, center, damage_mult, tick);
    }
}

fn register_kill(world: &mut GameWorld, kind: EnemyKind) {
    let tick = world.tick;
    world.combo = if world.combo > 0 && tick < world.combo_expires_at {
        (world.combo + 1).min(COMBO_MAX)
    } else {
        1
    };
    world.combo_expires_at = tick + COMBO_WINDOW_TICKS;

    let points = game_core::entity_params::EnemyParams::get(kind).score * world.combo;
    world.score += points;
    world.push_event(FrameEvent::ScoreAwarded {
        points,
        combo: world.combo,
    });
    world.push_event(FrameEvent::EnemyKilled { kind });
}

/// エクスプローダーの死亡爆発。距離減衰するが最低ダメージは保証される。
fn detonate_exploder(world: &mut GameWorld, center: Vec2, damage_mult: f32, tick: u64) {
    world.particles.explosion(center.x, center.y, [1.0, 0.5, 0.0]);
    let player = &mut world.player;
    if !circles_overlap(
        center,
        exploder::EXPLOSION_RADIUS,
        player.position,
        player.size,
    ) {
        return;
    }
    let distance = center.distance_to(player.position);
    let falloff = 1.0 - distance / exploder::EXPLOSION_RADIUS;
    let damage = (exploder::EXPLOSION_DAMAGE * damage_mult * falloff)
        .floor()
        .max(exploder::DAMAGE_FLOOR);
    let applied = player.take_damage(damage, tick);
    if applied > 0.0 {
        world.push_event(FrameEvent::PlayerDamaged { amount: applied });
        world.push_event(FrameEvent::Sound { name: "player_hit" });
    }
}

/// 演出が終わった死体をワールドから除去する
fn drop_finished_corpses(world: &mut GameWorld) {
    let animations = &mut world.death_animations;
    world.enemies.retain(|enemy| {
        if enemy.dying && animations.is_complete(enemy.id) {
            animations.cleanup(enemy.id);
            false
        } else {
            true
        }
    });
}
