//! Path: game_sim/src/enemy/snake_boss.rs
//! Summary: 最終ボス（蛇型・多節ボディと弱点セグメント）

use game_core::constants::{ENEMY_BULLET_SIZE, WORLD_HEIGHT, WORLD_WIDTH};
use game_core::entity_params::snake_boss;
use game_core::vector::Vec2;

use super::{BehaviorCtx, EnemyShot};

/// ボディの 1 節。先頭（index 0）が頭
#[derive(Clone, Copy, Debug)]
pub struct SnakeSegment {
    pub position: Vec2,
    pub size:     f32,
}

/// 残留毒霧。半径は上限まで成長し、内側のプレイヤーに毎ティック被害。
#[derive(Clone, Copy, Debug)]
pub struct PoisonCloud {
    pub position:   Vec2,
    pub radius:     f32,
    pub expires_at: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum MovementPattern {
    Chase,
    Circle,
    Evade,
}

impl MovementPattern {
    fn next(self) -> MovementPattern {
        match self {
            MovementPattern::Chase => MovementPattern::Circle,
            MovementPattern::Circle => MovementPattern::Evade,
            MovementPattern::Evade => MovementPattern::Chase,
        }
    }
}

/// 5 種の攻撃。フェーズが進むごとに 1 つずつ解放される。
const ATTACK_COUNT: usize = 5;

#[derive(Clone, Debug)]
pub struct SnakeState {
    pub segments:      Vec<SnakeSegment>,
    pub poison_clouds: Vec<PoisonCloud>,
    pub phase:         u8,
    pattern:           MovementPattern,
    next_pattern_at:   u64,
    circle_angle:      f32,
    /// 攻撃ごとの再使用可能ティック: basic / sweep / homing / poison / ultimate
    attack_ready:      [u64; ATTACK_COUNT],
}

impl SnakeState {
    /// 頭の後ろへ一直線にセグメントを並べて初期化する
    pub fn new(head_position: Vec2, head_size: f32) -> SnakeState {
        let mut segments = Vec::with_capacity(snake_boss::SEGMENT_COUNT);
        for i in 0..snake_boss::SEGMENT_COUNT {
            segments.push(SnakeSegment {
                position: Vec2::new(
                    head_position.x - i as f32 * snake_boss::FOLLOW_DISTANCE,
                    head_position.y,
                ),
                size: if i == 0 { head_size } else { snake_boss::SEGMENT_SIZE },
            });
        }
        SnakeState {
            segments,
            poison_clouds: Vec::new(),
            phase: 1,
            pattern: MovementPattern::Chase,
            next_pattern_at: snake_boss::MOVEMENT_PATTERN_TICKS,
            circle_angle: 0.0,
            attack_ready: [0; ATTACK_COUNT],
        }
    }

    pub fn is_vital_segment(&self, index: usize) -> bool {
        index < self.segments.len() && snake_boss::is_vital(index)
    }

    pub fn head_position(&self) -> Vec2 {
        self.segments[0].position
    }
}

/// 1 ティック分の更新。フェーズが進んだ場合は新フェーズ番号を返し、
/// `position` には頭の位置が書き戻される。
pub fn update(
    state: &mut SnakeState,
    position: &mut Vec2,
    speed: f32,
    damage_mult: f32,
    health: f32,
    max_health: f32,
    ctx: &mut BehaviorCtx<'_>,
) -> Option<u8> {
    let phase_change = update_phase(state, health, max_health);
    update_movement(state, speed, ctx);
    update_attacks(state, damage_mult, ctx);
    update_poison_clouds(state, damage_mult, ctx);
    *position = state.head_position();
    phase_change
}

fn update_phase(state: &mut SnakeState, health: f32, max_health: f32) -> Option<u8> {
    let percent = health / max_health * 100.0;
    let target = if percent <= snake_boss::PHASE_THRESHOLDS_PCT[2] {
        4
    } else if percent <= snake_boss::PHASE_THRESHOLDS_PCT[1] {
        3
    } else if percent <= snake_boss::PHASE_THRESHOLDS_PCT[0] {
        2
    } else {
        1
    };
    if target > state.phase {
        state.phase = target;
        log::info!("snake boss entered phase {target}");
        Some(target)
    } else {
        None
    }
}

// ─── 移動: 追尾 / 周回 / 回避のローテーション ───────────────────

fn update_movement(state: &mut SnakeState, speed: f32, ctx: &mut BehaviorCtx<'_>) {
    if ctx.tick >= state.next_pattern_at {
        state.pattern = state.pattern.next();
        state.next_pattern_at = ctx.tick + snake_boss::MOVEMENT_PATTERN_TICKS;
    }

    let phase_idx = (state.phase - 1) as usize;
    let move_speed =
        speed * snake_boss::PHASE_SPEED_MULT[phase_idx] * ctx.time_scale;
    let head = state.segments[0].position;

    let step = match state.pattern {
        MovementPattern::Chase => {
            let to_player = ctx.player_pos - head;
            if to_player.length() > 100.0 {
                to_player.normalized() * move_speed
            } else {
                Vec2::ZERO
            }
        }
        MovementPattern::Circle => {
            // プレイヤーの周囲を回る目標点へ半減速で向かう
            state.circle_angle += 0.02 * [1.0, 1.2, 1.5, 2.0][phase_idx] * ctx.time_scale;
            let target = ctx.player_pos
                + Vec2::from_angle(state.circle_angle) * snake_boss::CIRCLE_RADIUS;
            (target - head).normalized() * (move_speed * 0.5)
        }
        MovementPattern::Evade => {
            let away = head - ctx.player_pos;
            away.normalized() * move_speed
        }
    };

    let head_size = state.segments[0].size;
    let mut new_head = head + step;
    new_head.x = new_head.x.clamp(head_size, WORLD_WIDTH - head_size);
    new_head.y = new_head.y.clamp(head_size, WORLD_HEIGHT - head_size);
    state.segments[0].position = new_head;

    // 各節は前の節との距離が開いたときだけ引き寄せられる（剛体追従）
    for i in 1..state.segments.len() {
        let prev = state.segments[i - 1].position;
        let current = state.segments[i].position;
        let gap = prev - current;
        if gap.length() > snake_boss::FOLLOW_DISTANCE {
            state.segments[i].position =
                prev - gap.normalized() * snake_boss::FOLLOW_DISTANCE;
        }
    }
}

// ─── 攻撃: フェーズで段階解放、確率トリガ + 個別クールダウン ────

fn available_attacks(phase: u8) -> usize {
    // フェーズ 1 で basic/sweep、以降 1 フェーズごとに 1 種解放
    (phase as usize + 1).min(ATTACK_COUNT)
}

fn cooldown_for(attack: usize, phase: u8) -> u64 {
    let base = snake_boss::BASE_COOLDOWNS[attack] as f32;
    (base * snake_boss::PHASE_COOLDOWN_MULT[(phase - 1) as usize]) as u64
}

fn update_attacks(state: &mut SnakeState, damage_mult: f32, ctx: &mut BehaviorCtx<'_>) {
    if ctx.rng.next_f32() >= 0.02 {
        return;
    }
    let pool = available_attacks(state.phase);
    let attack = ctx.rng.next_usize(pool);
    if ctx.tick < state.attack_ready[attack] {
        return;
    }
    state.attack_ready[attack] = ctx.tick + cooldown_for(attack, state.phase);
    fire_attack(state, attack, damage_mult, ctx);
}

fn fire_attack(state: &mut SnakeState, attack: usize, damage_mult: f32, ctx: &mut BehaviorCtx<'_>) {
    let head = state.head_position();
    match attack {
        0 => basic_ring(head, state.phase, damage_mult, ctx.shots),
        1 => sweep_arc(head, damage_mult, ctx.shots),
        2 => homing_missiles(head, state.phase, ctx.player_pos, damage_mult, ctx),
        3 => state.poison_clouds.push(PoisonCloud {
            position:   head,
            radius:     snake_boss::POISON_CLOUD_RADIUS,
            expires_at: ctx.tick + snake_boss::POISON_CLOUD_TICKS,
        }),
        _ => {
            // アルティメット: 既存攻撃の総和 + 大型リング
            basic_ring(head, state.phase, damage_mult, ctx.shots);
            sweep_arc(head, damage_mult, ctx.shots);
            homing_missiles(head, state.phase, ctx.player_pos, damage_mult, ctx);
            state.poison_clouds.push(PoisonCloud {
                position:   head,
                radius:     snake_boss::POISON_CLOUD_RADIUS,
                expires_at: ctx.tick + snake_boss::POISON_CLOUD_TICKS,
            });
            ultimate_ring(head, damage_mult, ctx.shots);
        }
    }
}

/// 全方位リング弾（6 + フェーズ×2 発）
fn basic_ring(head: Vec2, phase: u8, damage_mult: f32, shots: &mut Vec<EnemyShot>) {
    let count = 6 + phase as usize * 2;
    for i in 0..count {
        let angle = (i as f32 / count as f32) * std::f32::consts::TAU;
        let direction = Vec2::from_angle(angle);
        shots.push(EnemyShot {
            position: head + direction * 30.0,
            velocity: direction * 4.0,
            damage:   15.0 * damage_mult,
            size:     ENEMY_BULLET_SIZE + 2.0,
        });
    }
}

/// 前方半円への 12 発の扇状掃射
fn sweep_arc(head: Vec2, damage_mult: f32, shots: &mut Vec<EnemyShot>) {
    for i in 0..12 {
        let angle = (i as f32 / 12.0) * std::f32::consts::PI - std::f32::consts::FRAC_PI_2;
        let direction = Vec2::from_angle(angle);
        shots.push(EnemyShot {
            position: head + direction * 30.0,
            velocity: direction * 3.0,
            damage:   12.0 * damage_mult,
            size:     ENEMY_BULLET_SIZE + 1.0,
        });
    }
}

/// プレイヤー狙い（角度に僅かな散らばり）の高速弾 2 + フェーズ発
fn homing_missiles(
    head: Vec2,
    phase: u8,
    player_pos: Vec2,
    damage_mult: f32,
    ctx: &mut BehaviorCtx<'_>,
) {
    let count = 2 + phase as usize;
    let base_angle = (player_pos - head).angle();
    for _ in 0..count {
        let angle = base_angle + ctx.rng.next_range(-0.25, 0.25);
        ctx.shots.push(EnemyShot {
            position: head,
            velocity: Vec2::from_angle(angle) * 3.0,
            damage:   20.0 * damage_mult,
            size:     ENEMY_BULLET_SIZE + 4.0,
        });
    }
}

/// アルティメット専用の 36 発大型リング
fn ultimate_ring(head: Vec2, damage_mult: f32, shots: &mut Vec<EnemyShot>) {
    for i in 0..36 {
        let angle = (i as f32 / 36.0) * std::f32::consts::TAU;
        let direction = Vec2::from_angle(angle);
        shots.push(EnemyShot {
            position: head + direction * 50.0,
            velocity: direction * 5.0,
            damage:   25.0 * damage_mult,
            size:     ENEMY_BULLET_SIZE + 5.0,
        });
    }
}

// ─── 毒霧: 成長・失効・内側のプレイヤーへの継続被害 ─────────────

fn update_poison_clouds(state: &mut SnakeState, damage_mult: f32, ctx: &mut BehaviorCtx<'_>) {
    let tick = ctx.tick;
    state.poison_clouds.retain_mut(|cloud| {
        cloud.radius =
            (cloud.radius + snake_boss::POISON_CLOUD_GROWTH).min(snake_boss::POISON_CLOUD_MAX_RADIUS);
        if tick >= cloud.expires_at {
            return false;
        }
        if ctx.player_pos.distance_to(cloud.position) <= cloud.radius {
            *ctx.contact_damage += snake_boss::POISON_DAMAGE_PER_TICK * damage_mult;
        }
        true
    });
}
