//! Path: game_sim/src/game_logic/item_effects.rs
//! Summary: アイテムの取得処理・遅延解決（ブラックホール/ヴァルキリー）・コンパニオン射撃

use game_core::constants::{
    COMPANION_BULLET_SPEED, COMPANION_DAMAGE, COMPANION_FIRE_TICKS, COMPANION_RANGE,
    PLAYER_BULLET_SIZE,
};
use game_core::entity_params::{item, ItemKind, ItemParams};
use game_core::vector::Vec2;

use crate::world::{BulletSource, FrameEvent, GameWorld, PendingEffect, WeaponMode};

/// アイテム系の毎ティック処理。取得 → ワールド内効果の進行 →
/// コンパニオンの自動射撃の順。
pub fn update_items(world: &mut GameWorld) {
    pickup_items(world);
    advance_pending_effects(world);
    companion_fire(world);
}

// ─── 取得 ───────────────────────────────────────────────────────

fn pickup_items(world: &mut GameWorld) {
    let tick = world.tick;
    let player_pos = world.player.position;
    let player_size = world.player.size;

    let reach = item::PICKUP_RADIUS + player_size;
    let player = &world.player;
    let mut picked = Vec::new();
    world.items.items.retain(|dropped| {
        if dropped.position.distance_to(player_pos) > reach {
            return true;
        }
        // クールダウン中の種類は拾えない（アイテムは残る）
        if player.is_item_on_cooldown(dropped.kind, tick) {
            return true;
        }
        picked.push(*dropped);
        false
    });

    for dropped in picked {
        apply_pickup(world, dropped.kind, dropped.position);
        let cooldown = ItemParams::get(dropped.kind).cooldown_ticks;
        world.player.set_item_cooldown(dropped.kind, tick, cooldown);
        world.push_event(FrameEvent::ItemPickedUp { kind: dropped.kind });
        world.push_event(FrameEvent::Sound { name: "item_pickup" });
    }
}

fn apply_pickup(world: &mut GameWorld, kind: ItemKind, position: Vec2) {
    let tick = world.tick;
    let duration = ItemParams::get(kind).duration_ticks;
    let player = &mut world.player;

    match kind {
        ItemKind::Medkit => player.heal(item::MEDKIT_HEAL),
        ItemKind::Shield => {
            player.shield = item::SHIELD_POINTS;
            player.activate_effect(kind, tick, duration);
        }
        ItemKind::Ghost => {
            player.ghost = true;
            player.activate_effect(kind, tick, duration);
        }
        ItemKind::Bazooka => {
            player.weapon_mode = WeaponMode::Bazooka;
            player.activate_effect(kind, tick, duration);
        }
        ItemKind::Ricochet => {
            player.weapon_mode = WeaponMode::Ricochet;
            player.activate_effect(kind, tick, duration);
        }
        ItemKind::TimeBubble => {
            // 効果は有効フラグだけ。敵側の減速はティックが参照する。
            player.activate_effect(kind, tick, duration);
        }
        ItemKind::BlackHole => {
            player.activate_effect(kind, tick, duration);
            world.items.pending.push(PendingEffect::BlackHole {
                position,
                detonate_at: tick + duration,
            });
        }
        ItemKind::Valkyrie => {
            player.invincible = true;
            player.activate_effect(kind, tick, duration);
            world.items.pending.push(PendingEffect::Valkyrie {
                resolve_at: tick + duration,
            });
        }
        ItemKind::Companion => {
            if !player.add_companion(tick) {
                log::debug!("companion cap reached, pickup wasted");
            }
        }
        ItemKind::GodPlan => {
            player.invincible = true;
            player.activate_effect(kind, tick, duration);
        }
        ItemKind::RandomBox => roll_random_box(world),
    }
}

/// ランダムボックス: 回復 / シールド / 加速 / スロー / 火力弱体のいずれか。
/// 乗算系は適用前の値を保持し、失効時に正確に戻す。
fn roll_random_box(world: &mut GameWorld) {
    let tick = world.tick;
    let roll = world.rng.next_usize(5);
    let player = &mut world.player;
    match roll {
        0 => player.heal(item::MEDKIT_HEAL),
        1 => {
            player.shield = item::SHIELD_POINTS;
            player.activate_effect(
                ItemKind::Shield,
                tick,
                ItemParams::get(ItemKind::Shield).duration_ticks,
            );
        }
        2 => {
            let prior = player.speed_mult;
            player.speed_mult *= item::RANDOM_BOX_SPEED_MULT;
            player.activate_effect_with_priors(
                ItemKind::RandomBox,
                tick,
                item::RANDOM_BOX_EFFECT_TICKS,
                Some(prior),
                None,
            );
        }
        3 => {
            let prior = player.speed_mult;
            player.speed_mult *= item::RANDOM_BOX_SLOW_MULT;
            player.activate_effect_with_priors(
                ItemKind::RandomBox,
                tick,
                item::RANDOM_BOX_EFFECT_TICKS,
                Some(prior),
                None,
            );
        }
        _ => {
            let prior = player.damage_mult;
            player.damage_mult *= item::RANDOM_BOX_WEAKNESS_MULT;
            player.activate_effect_with_priors(
                ItemKind::RandomBox,
                tick,
                item::RANDOM_BOX_EFFECT_TICKS,
                None,
                Some(prior),
            );
        }
    }
}

// ─── 取得後もワールド内で進行する効果 ───────────────────────────

fn advance_pending_effects(world: &mut GameWorld) {
    let tick = world.tick;
    let mut pending = std::mem::take(&mut world.items.pending);

    pending.retain(|effect| match *effect {
        PendingEffect::BlackHole { position, detonate_at } => {
            if tick < detonate_at {
                attract_enemies(world, position);
                true
            } else {
                detonate_black_hole(world, position);
                false
            }
        }
        PendingEffect::Valkyrie { resolve_at } => {
            if tick < resolve_at {
                true
            } else {
                resolve_valkyrie(world);
                false
            }
        }
    });

    world.items.pending = pending;
}

/// 範囲内の敵を距離減衰する力で引き寄せる
fn attract_enemies(world: &mut GameWorld, center: Vec2) {
    let particles = &mut world.particles;
    for enemy in &mut world.enemies {
        if enemy.dying {
            continue;
        }
        let to_center = center - enemy.position;
        let distance = to_center.length();
        if distance <= 0.0 || distance > item::BLACK_HOLE_RANGE {
            continue;
        }
        let force = item::BLACK_HOLE_FORCE * (1.0 - distance / item::BLACK_HOLE_RANGE);
        enemy.position += to_center.normalized() * force;
        particles.energy_drain(enemy.position.x, enemy.position.y, center.x, center.y);
    }
}

fn detonate_black_hole(world: &mut GameWorld, center: Vec2) {
    for enemy in &mut world.enemies {
        if enemy.dying {
            continue;
        }
        if enemy.position.distance_to(center) <= item::BLACK_HOLE_RANGE {
            enemy.take_damage(item::ANNIHILATE_DAMAGE);
        }
    }
    world.particles.shockwave(center.x, center.y, [0.4, 0.2, 0.8]);
    world.push_event(FrameEvent::Sound { name: "explosion" });
}

/// 無敵時間の終わりに広域キルを解決する
fn resolve_valkyrie(world: &mut GameWorld) {
    let center = world.player.position;
    for enemy in &mut world.enemies {
        if enemy.dying {
            continue;
        }
        if enemy.position.distance_to(center) <= item::VALKYRIE_KILL_RADIUS {
            enemy.take_damage(item::ANNIHILATE_DAMAGE);
        }
    }
    world.particles.shockwave(center.x, center.y, [1.0, 0.8, 0.0]);
    world.push_event(FrameEvent::Sound { name: "valkyrie" });
}

// ─── コンパニオン ───────────────────────────────────────────────

/// 周回するコンパニオンが射程内の最寄りの敵へ自動射撃する
fn companion_fire(world: &mut GameWorld) {
    let tick = world.tick;
    let player_pos = world.player.position;

    for ci in 0..world.player.companions.len() {
        if tick < world.player.companions[ci].next_shot_tick {
            continue;
        }
        let origin = world.player.companions[ci].position(player_pos);

        let mut nearest: Option<(Vec2, f32)> = None;
        for enemy in &world.enemies {
            if enemy.dying {
                continue;
            }
            let d = enemy.position.distance_to(origin);
            if d <= COMPANION_RANGE && nearest.map_or(true, |(_, best)| d < best) {
                nearest = Some((enemy.position, d));
            }
        }
        let Some((target, _)) = nearest else { continue };

        world.player.companions[ci].next_shot_tick = tick + COMPANION_FIRE_TICKS;
        let direction = (target - origin).normalized();
        world.bullets.spawn(
            origin,
            direction * COMPANION_BULLET_SPEED,
            COMPANION_DAMAGE,
            PLAYER_BULLET_SIZE - 1.0,
            BulletSource::Companion,
        );
        world.particles.muzzle_flash(origin.x, origin.y);
    }
}
