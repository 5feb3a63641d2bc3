//! Path: game_sim/src/enemy/boss.rs
//! Summary: ダンジョンボスの 4 フェーズ戦闘ステートマシン

use game_core::constants::{
    ENEMY_BULLET_SIZE, TICKS_PER_SECOND, WORLD_HEIGHT, WORLD_WIDTH,
};
use game_core::entity_params::{boss, EnemyKind};
use game_core::vector::Vec2;

use super::{BehaviorCtx, EnemyShot, SpawnRequest};

/// ボス固有の状態。フェーズは体力しきい値で一方向にしか進まない。
#[derive(Clone, Debug)]
pub struct BossState {
    pub phase:          u8,
    pub next_attack:    u64,
    pub minion_ready:   u64,
    pub teleport_ready: u64,
    pub shield_active:  bool,
    pub shield_expires: u64,
    pub shield_ready:   u64,
}

impl BossState {
    pub fn new() -> BossState {
        BossState {
            phase:          1,
            next_attack:    0,
            minion_ready:   0,
            teleport_ready: 0,
            shield_active:  false,
            shield_expires: 0,
            shield_ready:   0,
        }
    }
}

impl Default for BossState {
    fn default() -> Self {
        BossState::new()
    }
}

/// 1 ティック分のボス更新。フェーズが進んだ場合は新フェーズ番号を返す。
///
/// `speed_scale` はダンジョン倍率（フェーズ別の基礎速度に掛かる）。
pub fn update(
    state: &mut BossState,
    position: &mut Vec2,
    size: f32,
    speed_scale: f32,
    damage_mult: f32,
    health: f32,
    ctx: &mut BehaviorCtx<'_>,
) -> Option<u8> {
    let phase_change = update_phase(state, health);
    update_movement(state, position, size, speed_scale, ctx);
    update_attacks(state, *position, damage_mult, ctx);
    update_minions(state, *position, ctx);
    update_shield(state, ctx.tick);
    update_teleport(state, position, ctx);
    phase_change
}

fn update_phase(state: &mut BossState, health: f32) -> Option<u8> {
    let target = if health <= boss::PHASE_THRESHOLDS[2] {
        4
    } else if health <= boss::PHASE_THRESHOLDS[1] {
        3
    } else if health <= boss::PHASE_THRESHOLDS[0] {
        2
    } else {
        1
    };
    // 回復で体力が戻ってもフェーズは巻き戻らない
    if target > state.phase {
        state.phase = target;
        log::info!("boss entered phase {target}");
        Some(target)
    } else {
        None
    }
}

fn update_movement(
    state: &BossState,
    position: &mut Vec2,
    size: f32,
    speed_scale: f32,
    ctx: &mut BehaviorCtx<'_>,
) {
    let speed = boss::PHASE_SPEEDS[(state.phase - 1) as usize] * speed_scale * ctx.time_scale;
    let to_player = ctx.player_pos - *position;
    let distance = to_player.length();

    // 近すぎれば離れ、遠すぎれば詰める。中間距離では停滞気味に旋回する。
    let target = if distance < boss::NEAR_DISTANCE {
        *position - to_player.normalized() * 150.0
    } else if distance > boss::FAR_DISTANCE {
        *position + to_player.normalized() * (speed * 2.0)
    } else {
        ctx.player_pos
    };

    let direction = (target - *position).normalized();
    *position += direction * speed;
    position.x = position.x.clamp(size, WORLD_WIDTH - size);
    position.y = position.y.clamp(size, WORLD_HEIGHT - size);
}

fn update_attacks(
    state: &mut BossState,
    position: Vec2,
    damage_mult: f32,
    ctx: &mut BehaviorCtx<'_>,
) {
    if ctx.tick < state.next_attack {
        return;
    }
    let cooldown = boss::ATTACK_COOLDOWNS[(state.phase - 1) as usize];
    state.next_attack = ctx.tick + cooldown;

    match state.phase {
        1 => circle_attack(state.phase, position, damage_mult, ctx.shots),
        2 => spiral_attack(state.phase, position, damage_mult, ctx.tick, ctx.shots),
        3 => homing_attack(state.phase, position, ctx.player_pos, damage_mult, ctx.shots),
        _ => {
            circle_attack(state.phase, position, damage_mult, ctx.shots);
            spiral_attack(state.phase, position, damage_mult, ctx.tick, ctx.shots);
            homing_attack(state.phase, position, ctx.player_pos, damage_mult, ctx.shots);
        }
    }
}

/// 全方位リング弾（8 + フェーズ×2 発）
fn circle_attack(phase: u8, position: Vec2, damage_mult: f32, shots: &mut Vec<EnemyShot>) {
    let count = 8 + phase as usize * 2;
    for i in 0..count {
        let angle = (i as f32 / count as f32) * std::f32::consts::TAU;
        let direction = Vec2::from_angle(angle);
        shots.push(EnemyShot {
            position: position + direction * 50.0,
            velocity: direction * 4.0,
            damage:   20.0 * damage_mult,
            size:     ENEMY_BULLET_SIZE + 2.0,
        });
    }
}

/// 時間で回転する渦巻き弾（6 + フェーズ発）
fn spiral_attack(
    phase: u8,
    position: Vec2,
    damage_mult: f32,
    tick: u64,
    shots: &mut Vec<EnemyShot>,
) {
    let count = 6 + phase as usize;
    let rotation = tick as f32 / TICKS_PER_SECOND as f32;
    for i in 0..count {
        let angle = (i as f32 / count as f32) * std::f32::consts::TAU + rotation;
        let direction = Vec2::from_angle(angle);
        shots.push(EnemyShot {
            position: position + direction * 40.0,
            velocity: direction * 3.0,
            damage:   15.0 * damage_mult,
            size:     ENEMY_BULLET_SIZE + 1.0,
        });
    }
}

/// プレイヤー狙いの高威力弾（3 + フェーズ発）
fn homing_attack(
    phase: u8,
    position: Vec2,
    player_pos: Vec2,
    damage_mult: f32,
    shots: &mut Vec<EnemyShot>,
) {
    let count = 3 + phase as usize;
    let direction = (player_pos - position).normalized();
    for _ in 0..count {
        shots.push(EnemyShot {
            position,
            velocity: direction * 3.0,
            damage:   25.0 * damage_mult,
            size:     ENEMY_BULLET_SIZE + 3.0,
        });
    }
}

fn update_minions(state: &mut BossState, position: Vec2, ctx: &mut BehaviorCtx<'_>) {
    if state.phase < 3 || ctx.tick < state.minion_ready {
        return;
    }
    state.minion_ready = ctx.tick + boss::MINION_SPAWN_COOLDOWN;

    let angle = ctx.rng.next_range(0.0, std::f32::consts::TAU);
    let spawn_pos = position + Vec2::from_angle(angle) * 100.0;
    let kind = if state.phase == 3 {
        EnemyKind::Swarmer
    } else {
        match ctx.rng.next_usize(3) {
            0 => EnemyKind::Swarmer,
            1 => EnemyKind::Shooter,
            _ => EnemyKind::Exploder,
        }
    };
    ctx.spawn_requests.push(SpawnRequest {
        kind,
        position: spawn_pos,
        half_health: true,
    });
}

fn update_shield(state: &mut BossState, tick: u64) {
    if state.shield_active && tick >= state.shield_expires {
        state.shield_active = false;
    }
    if state.phase >= 2 && !state.shield_active && tick >= state.shield_ready {
        state.shield_active = true;
        state.shield_expires = tick + boss::SHIELD_DURATION;
        state.shield_ready = tick + boss::SHIELD_COOLDOWN;
    }
}

fn update_teleport(state: &mut BossState, position: &mut Vec2, ctx: &mut BehaviorCtx<'_>) {
    if state.phase < 3 || ctx.tick < state.teleport_ready {
        return;
    }
    if position.distance_to(ctx.player_pos) < boss::NEAR_DISTANCE {
        state.teleport_ready = ctx.tick + boss::TELEPORT_COOLDOWN;
        position.x = ctx.rng.next_range(100.0, WORLD_WIDTH - 100.0);
        position.y = ctx.rng.next_range(100.0, WORLD_HEIGHT - 100.0);
        log::debug!("boss teleported to ({:.0}, {:.0})", position.x, position.y);
    }
}
