//! Path: game_sim/src/enemy/mod.rs
//! Summary: 敵エンティティと行動ステートマシン（タグ付きユニオンでディスパッチ）

mod boss;
mod snake_boss;

pub use boss::BossState;
pub use snake_boss::{SnakeSegment, SnakeState};

use game_core::constants::{ENEMY_BULLET_SIZE, WORLD_HEIGHT, WORLD_WIDTH};
use game_core::entity_params::{
    charger, dungeon_scaling, exploder, protector, shooter, sniper, EnemyKind, EnemyParams,
};
use game_core::physics::rng::SimpleRng;
use game_core::vector::Vec2;

/// 安定 ID。敵同士の参照（プロテクターの護衛対象など）は
/// 直接参照ではなく必ずこの ID ＋ルックアップで行う。
pub type EnemyId = u32;

/// 敵が 1 ティックで発射した弾の仕様
#[derive(Clone, Copy, Debug)]
pub struct EnemyShot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub damage:   f32,
    pub size:     f32,
}

/// ボスのミニオン召喚要求。敵リストへの追加はオーケストレータが行う。
#[derive(Clone, Copy, Debug)]
pub struct SpawnRequest {
    pub kind:        EnemyKind,
    pub position:    Vec2,
    /// ミニオンは基礎体力の半分で生まれる
    pub half_health: bool,
}

/// 行動更新の入出力。弾と召喚要求はここへ積まれ、ティック側が回収する。
pub struct BehaviorCtx<'a> {
    pub tick:           u64,
    pub player_pos:     Vec2,
    pub player_size:    f32,
    /// タイムバブル中は 1.0 未満（敵の移動・攻撃進行が遅くなる）
    pub time_scale:     f32,
    pub rng:            &'a mut SimpleRng,
    pub shots:          &'a mut Vec<EnemyShot>,
    pub spawn_requests: &'a mut Vec<SpawnRequest>,
    /// プレイヤーへの直接接触ダメージ（チャージャー体当たりなど）
    pub contact_damage: &'a mut f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChargePhase {
    Seek,
    Charging { direction: Vec2, remaining: u64 },
    Cooldown { until: u64 },
}

/// 種別ごとの行動状態。共通フィールドは `Enemy` 側に置き、
/// ここには各ステートマシンの固有状態だけを持たせる。
#[derive(Clone, Debug)]
pub enum Behavior {
    Swarmer,
    Charger { phase: ChargePhase },
    Shooter { next_shot: u64 },
    Sniper { next_shot: u64 },
    Exploder { armed: bool },
    Protector {
        protected:  Option<EnemyId>,
        heal_ready: u64,
    },
    Boss(BossState),
    Snake(SnakeState),
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id:          EnemyId,
    pub kind:        EnemyKind,
    pub position:    Vec2,
    pub velocity:    Vec2,
    pub size:        f32,
    pub health:      f32,
    pub max_health:  f32,
    pub speed:       f32,
    /// ダンジョン倍率適用後の与ダメージ倍率
    pub damage_mult: f32,
    pub activated:   bool,
    /// 死亡ラッチ。一度立ったら戻らず、スコア・演出はこの遷移時に一度だけ発火。
    pub dying:       bool,
    pub behavior:    Behavior,
}

impl Enemy {
    /// ダンジョン倍率を適用して敵を生成する
    pub fn spawn(id: EnemyId, kind: EnemyKind, position: Vec2, dungeon: u32) -> Enemy {
        let params = EnemyParams::get(kind);
        let (hp_mult, speed_mult, dmg_mult) = dungeon_scaling(dungeon);
        let size = params.size;
        let behavior = match kind {
            EnemyKind::Swarmer => Behavior::Swarmer,
            EnemyKind::Charger => Behavior::Charger { phase: ChargePhase::Seek },
            EnemyKind::Shooter => Behavior::Shooter { next_shot: 0 },
            EnemyKind::Sniper => Behavior::Sniper { next_shot: 0 },
            EnemyKind::Exploder => Behavior::Exploder { armed: false },
            EnemyKind::Protector => Behavior::Protector {
                protected:  None,
                heal_ready: 0,
            },
            EnemyKind::Boss => Behavior::Boss(BossState::new()),
            EnemyKind::SnakeBoss => Behavior::Snake(SnakeState::new(position, size)),
        };
        Enemy {
            id,
            kind,
            position,
            velocity: Vec2::ZERO,
            size,
            health: params.max_health * hp_mult,
            max_health: params.max_health * hp_mult,
            speed: params.speed * speed_mult,
            damage_mult: dmg_mult,
            activated: true,
            dying: false,
            behavior,
        }
    }

    pub fn color(&self) -> [f32; 3] {
        EnemyParams::get(self.kind).color
    }

    /// 被弾処理。体力は 0 で止まり、増えることはない。
    /// スネークボスは `take_segment_damage` を使うこと（本体は弱点経由のみ）。
    pub fn take_damage(&mut self, amount: f32) {
        let amount = match &self.behavior {
            Behavior::Boss(state) if state.shield_active => {
                amount * game_core::entity_params::boss::SHIELD_DAMAGE_REDUCTION
            }
            _ => amount,
        };
        self.health = (self.health - amount).max(0.0);
    }

    /// スネークボスのセグメント被弾。弱点セグメントのみ本体へダメージが
    /// 通り、適用されたかどうかを返す。
    pub fn take_segment_damage(&mut self, amount: f32, segment_index: usize) -> bool {
        let vital = match &self.behavior {
            Behavior::Snake(state) => state.is_vital_segment(segment_index),
            _ => true,
        };
        if vital {
            self.health = (self.health - amount).max(0.0);
            true
        } else {
            log::debug!("snake segment {segment_index} absorbed {amount} damage");
            false
        }
    }

    /// 1 ティックの行動更新。dying の敵には呼ばれない。
    /// ボス系でフェーズが進んだ場合は新フェーズ番号を返す。
    pub fn update(&mut self, ctx: &mut BehaviorCtx<'_>) -> Option<u8> {
        if !self.activated {
            return None;
        }
        match &mut self.behavior {
            Behavior::Swarmer => update_swarmer(
                &mut self.position,
                &mut self.velocity,
                self.size,
                self.speed,
                ctx,
            ),
            Behavior::Charger { phase } => {
                let mut p = *phase;
                update_charger(
                    &mut self.position,
                    self.size,
                    self.speed,
                    self.damage_mult,
                    &mut p,
                    ctx,
                );
                self.behavior = Behavior::Charger { phase: p };
            }
            Behavior::Shooter { next_shot } => update_shooter(
                &mut self.position,
                self.size,
                self.speed,
                self.damage_mult,
                next_shot,
                ctx,
            ),
            Behavior::Sniper { next_shot } => update_sniper(
                &mut self.position,
                self.size,
                self.speed,
                self.damage_mult,
                next_shot,
                ctx,
            ),
            Behavior::Exploder { armed } => update_exploder(
                &mut self.position,
                self.size,
                self.speed,
                armed,
                &mut self.health,
                ctx,
            ),
            // プロテクターは敵リスト全体を見る必要があるため、
            // オーケストレータ側の専用パス（update_protector）で更新する
            Behavior::Protector { .. } => {}
            Behavior::Boss(state) => {
                let scale = self.speed / EnemyParams::get(EnemyKind::Boss).speed;
                return boss::update(
                    state,
                    &mut self.position,
                    self.size,
                    scale,
                    self.damage_mult,
                    self.health,
                    ctx,
                );
            }
            Behavior::Snake(state) => {
                return snake_boss::update(
                    state,
                    &mut self.position,
                    self.speed,
                    self.damage_mult,
                    self.health,
                    self.max_health,
                    ctx,
                );
            }
        }
        None
    }
}

fn clamp_to_world(position: &mut Vec2, size: f32) {
    position.x = position.x.clamp(size, WORLD_WIDTH - size);
    position.y = position.y.clamp(size, WORLD_HEIGHT - size);
}

// ─── Swarmer: 単純追尾 ─────────────────────────────────────────

fn update_swarmer(
    position: &mut Vec2,
    velocity: &mut Vec2,
    size: f32,
    speed: f32,
    ctx: &mut BehaviorCtx<'_>,
) {
    let direction = (ctx.player_pos - *position).normalized();
    *velocity = direction * (speed * ctx.time_scale);
    *position += *velocity;
    clamp_to_world(position, size);
}

// ─── Charger: 索敵 → 突進 → クールダウンの 3 状態 ───────────────

fn update_charger(
    position: &mut Vec2,
    size: f32,
    speed: f32,
    damage_mult: f32,
    phase: &mut ChargePhase,
    ctx: &mut BehaviorCtx<'_>,
) {
    let to_player = ctx.player_pos - *position;
    let distance = to_player.length();

    match *phase {
        ChargePhase::Seek => {
            if distance < charger::CHARGE_RANGE {
                *phase = ChargePhase::Charging {
                    direction: to_player.normalized(),
                    remaining: charger::MAX_CHARGE_TICKS,
                };
            } else if distance < charger::DETECTION_RANGE {
                *position += to_player.normalized() * (speed * ctx.time_scale);
                clamp_to_world(position, size);
            }
        }
        ChargePhase::Charging { direction, remaining } => {
            *position += direction * (charger::CHARGE_SPEED * ctx.time_scale);
            // 体当たりは 1 回だけ通り、その後は強制クールダウン
            if position.distance_to(ctx.player_pos) < size + ctx.player_size {
                *ctx.contact_damage += charger::CHARGE_DAMAGE * damage_mult;
                *phase = ChargePhase::Cooldown {
                    until: ctx.tick + charger::CHARGE_COOLDOWN,
                };
                return;
            }
            let out = position.x < 0.0
                || position.x > WORLD_WIDTH
                || position.y < 0.0
                || position.y > WORLD_HEIGHT;
            if out || remaining <= 1 {
                clamp_to_world(position, size);
                *phase = ChargePhase::Cooldown {
                    until: ctx.tick + charger::CHARGE_COOLDOWN,
                };
            } else {
                *phase = ChargePhase::Charging {
                    direction,
                    remaining: remaining - 1,
                };
            }
        }
        ChargePhase::Cooldown { until } => {
            if ctx.tick >= until {
                *phase = ChargePhase::Seek;
            }
        }
    }
}

// ─── Shooter: 接近しつつ一定間隔で射撃 ──────────────────────────

fn update_shooter(
    position: &mut Vec2,
    size: f32,
    speed: f32,
    damage_mult: f32,
    next_shot: &mut u64,
    ctx: &mut BehaviorCtx<'_>,
) {
    let to_player = ctx.player_pos - *position;
    let distance = to_player.length();
    if distance >= shooter::SHOOT_RANGE {
        return;
    }
    let direction = to_player.normalized();
    *position += direction * (speed * ctx.time_scale);
    clamp_to_world(position, size);

    if ctx.tick >= *next_shot {
        *next_shot = ctx.tick + shooter::SHOOT_COOLDOWN;
        ctx.shots.push(EnemyShot {
            position: *position + direction * size,
            velocity: direction * shooter::BULLET_SPEED,
            damage:   shooter::BULLET_DAMAGE * damage_mult,
            size:     ENEMY_BULLET_SIZE,
        });
    }
}

// ─── Sniper: 距離帯で接近/後退/静止射撃を切り替える ─────────────

fn update_sniper(
    position: &mut Vec2,
    size: f32,
    speed: f32,
    damage_mult: f32,
    next_shot: &mut u64,
    ctx: &mut BehaviorCtx<'_>,
) {
    let to_player = ctx.player_pos - *position;
    let distance = to_player.length();
    let direction = to_player.normalized();

    if distance < sniper::RETREAT_DISTANCE {
        *position += direction * (-speed * ctx.time_scale);
    } else if distance > sniper::SHOOT_RANGE {
        *position += direction * (speed * ctx.time_scale);
    }
    clamp_to_world(position, size);

    if distance <= sniper::SHOOT_RANGE && ctx.tick >= *next_shot {
        *next_shot = ctx.tick + sniper::SHOOT_COOLDOWN;
        ctx.shots.push(EnemyShot {
            position: *position + direction * (size + 5.0),
            velocity: direction * sniper::BULLET_SPEED,
            damage:   sniper::BULLET_DAMAGE * damage_mult,
            size:     ENEMY_BULLET_SIZE + 1.0,
        });
    }
}

// ─── Exploder: 接近して自爆（ダメージ適用は死亡ラッチ側） ───────

fn update_exploder(
    position: &mut Vec2,
    size: f32,
    speed: f32,
    armed: &mut bool,
    health: &mut f32,
    ctx: &mut BehaviorCtx<'_>,
) {
    let to_player = ctx.player_pos - *position;
    let distance = to_player.length();

    if *armed {
        // 起爆: 体力を 0 にして死亡ラッチへ委ねる
        *health = 0.0;
        return;
    }
    if distance < exploder::DETECTION_RANGE {
        *position += to_player.normalized() * (speed * ctx.time_scale);
        clamp_to_world(position, size);
        if distance < exploder::DETONATION_RANGE {
            *armed = true;
        }
    }
}

// ─── Protector: 敵リスト全体を見る専用パス ──────────────────────

/// 護衛対象の加護判定。生きているプロテクターの護衛対象から
/// PROTECTION_RADIUS 以内にいる敵は無敵。プロテクターが死ねば
/// 次のティックから自然に失効する（状態の復元は不要）。
pub fn is_protected(enemies: &[Enemy], target_id: EnemyId) -> bool {
    let target_pos = match enemies.iter().find(|e| e.id == target_id) {
        Some(e) => e.position,
        None => return false,
    };
    for enemy in enemies {
        if enemy.dying || enemy.health <= 0.0 {
            continue;
        }
        let protected_id = match &enemy.behavior {
            Behavior::Protector { protected: Some(id), .. } => *id,
            _ => continue,
        };
        // プロテクター自身は自分の加護の対象外
        if target_id == enemy.id {
            continue;
        }
        if let Some(ward) = enemies.iter().find(|e| e.id == protected_id) {
            if !ward.dying
                && ward.health > 0.0
                && target_pos.distance_to(ward.position) <= protector::PROTECTION_RADIUS
            {
                return true;
            }
        }
    }
    false
}

/// プロテクターの行動更新。護衛対象の選定（未選定なら生きている
/// 非プロテクターから無作為に 1 体）、追従、周囲の敵の回復、牽制射撃。
pub fn update_protector(enemies: &mut [Enemy], index: usize, ctx: &mut BehaviorCtx<'_>) {
    let (position, size, speed, damage_mult, id) = {
        let e = &enemies[index];
        (e.position, e.size, e.speed, e.damage_mult, e.id)
    };
    let (mut protected, mut heal_ready) = match &enemies[index].behavior {
        Behavior::Protector { protected, heal_ready } => (*protected, *heal_ready),
        _ => return,
    };

    // 護衛対象が消えていたら選び直す
    let ward_alive = protected
        .and_then(|pid| enemies.iter().find(|e| e.id == pid))
        .map_or(false, |e| !e.dying && e.health > 0.0);
    if !ward_alive {
        protected = choose_ward(enemies, id, ctx.rng);
    }

    let mut new_pos = position;
    match protected.and_then(|pid| enemies.iter().find(|e| e.id == pid)) {
        Some(ward) => {
            let to_ward = ward.position - position;
            if to_ward.length() > protector::FOLLOW_DISTANCE {
                new_pos += to_ward.normalized() * (speed * 0.5 * ctx.time_scale);
            }
        }
        None => {
            // 護衛対象がいなければプレイヤーから離れる
            let away = position - ctx.player_pos;
            if away.length() < 400.0 {
                new_pos += away.normalized() * (speed * ctx.time_scale);
            }
        }
    }
    clamp_to_world(&mut new_pos, size);

    // 周囲の敵を定期回復
    if ctx.tick >= heal_ready {
        heal_ready = ctx.tick + protector::HEAL_COOLDOWN;
        for other in enemies.iter_mut() {
            if other.id == id || other.dying || other.health <= 0.0 {
                continue;
            }
            if other.position.distance_to(new_pos) <= protector::HEAL_RANGE {
                other.health = (other.health + protector::HEAL_AMOUNT).min(other.max_health);
            }
        }
    }

    // 牽制射撃（確率発火）
    let to_player = ctx.player_pos - new_pos;
    if to_player.length() <= protector::SHOOT_RANGE && ctx.rng.next_f32() < protector::SHOOT_CHANCE {
        let direction = to_player.normalized();
        ctx.shots.push(EnemyShot {
            position: new_pos + direction * size,
            velocity: direction * protector::BULLET_SPEED,
            damage:   protector::BULLET_DAMAGE * damage_mult,
            size:     ENEMY_BULLET_SIZE,
        });
    }

    let enemy = &mut enemies[index];
    enemy.position = new_pos;
    enemy.behavior = Behavior::Protector { protected, heal_ready };
}

fn choose_ward(enemies: &[Enemy], self_id: EnemyId, rng: &mut SimpleRng) -> Option<EnemyId> {
    let candidates: Vec<EnemyId> = enemies
        .iter()
        .filter(|e| {
            e.id != self_id
                && !e.dying
                && e.health > 0.0
                && !matches!(e.behavior, Behavior::Protector { .. })
        })
        .map(|e| e.id)
        .collect();
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.next_usize(candidates.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_parts() -> (SimpleRng, Vec<EnemyShot>, Vec<SpawnRequest>, f32) {
        (SimpleRng::new(42), Vec::new(), Vec::new(), 0.0)
    }

    fn make_ctx<'a>(
        tick: u64,
        player_pos: Vec2,
        rng: &'a mut SimpleRng,
        shots: &'a mut Vec<EnemyShot>,
        spawns: &'a mut Vec<SpawnRequest>,
        contact: &'a mut f32,
    ) -> BehaviorCtx<'a> {
        BehaviorCtx {
            tick,
            player_pos,
            player_size: 15.0,
            time_scale: 1.0,
            rng,
            shots,
            spawn_requests: spawns,
            contact_damage: contact,
        }
    }

    #[test]
    fn swarmer_chases_player() {
        let mut enemy = Enemy::spawn(1, EnemyKind::Swarmer, Vec2::new(100.0, 100.0), 1);
        let (mut rng, mut shots, mut spawns, mut contact) = ctx_parts();
        let player = Vec2::new(300.0, 100.0);
        let before = enemy.position.distance_to(player);
        let mut ctx = make_ctx(0, player, &mut rng, &mut shots, &mut spawns, &mut contact);
        enemy.update(&mut ctx);
        assert!(enemy.position.distance_to(player) < before);
    }

    #[test]
    fn charger_cycles_seek_charge_cooldown() {
        let mut enemy = Enemy::spawn(1, EnemyKind::Charger, Vec2::new(100.0, 500.0), 1);
        let (mut rng, mut shots, mut spawns, mut contact) = ctx_parts();
        // 射程内 → 突進開始
        let player = Vec2::new(200.0, 500.0);
        let mut ctx = make_ctx(0, player, &mut rng, &mut shots, &mut spawns, &mut contact);
        enemy.update(&mut ctx);
        assert!(matches!(
            enemy.behavior,
            Behavior::Charger { phase: ChargePhase::Charging { .. } }
        ));
        // 突進が外れたら持続時間切れでクールダウンへ
        let far = Vec2::new(100.0, 100.0);
        for t in 1..=charger::MAX_CHARGE_TICKS {
            let mut ctx = make_ctx(t, far, &mut rng, &mut shots, &mut spawns, &mut contact);
            enemy.update(&mut ctx);
        }
        assert!(matches!(
            enemy.behavior,
            Behavior::Charger { phase: ChargePhase::Cooldown { .. } }
        ));
        assert_eq!(contact, 0.0);
    }

    #[test]
    fn charger_contact_damages_once_then_cooldown() {
        let mut enemy = Enemy::spawn(1, EnemyKind::Charger, Vec2::new(200.0, 500.0), 1);
        let (mut rng, mut shots, mut spawns, mut contact) = ctx_parts();
        let player = Vec2::new(230.0, 500.0);
        // 突進開始
        let mut ctx = make_ctx(0, player, &mut rng, &mut shots, &mut spawns, &mut contact);
        enemy.update(&mut ctx);
        // 数ティックで接触する
        for t in 1..10 {
            let mut ctx = make_ctx(t, player, &mut rng, &mut shots, &mut spawns, &mut contact);
            enemy.update(&mut ctx);
        }
        assert!((contact - charger::CHARGE_DAMAGE).abs() < 1e-6);
        assert!(matches!(
            enemy.behavior,
            Behavior::Charger { phase: ChargePhase::Cooldown { .. } }
        ));
    }

    #[test]
    fn shooter_fires_on_cooldown() {
        let mut enemy = Enemy::spawn(1, EnemyKind::Shooter, Vec2::new(400.0, 500.0), 1);
        let (mut rng, mut shots, mut spawns, mut contact) = ctx_parts();
        let player = Vec2::new(700.0, 500.0);
        let mut ctx = make_ctx(0, player, &mut rng, &mut shots, &mut spawns, &mut contact);
        enemy.update(&mut ctx);
        assert_eq!(shots.len(), 1);
        // クールダウン中は撃たない
        let mut ctx = make_ctx(1, player, &mut rng, &mut shots, &mut spawns, &mut contact);
        enemy.update(&mut ctx);
        assert_eq!(shots.len(), 1);
        let mut ctx = make_ctx(
            shooter::SHOOT_COOLDOWN,
            player,
            &mut rng,
            &mut shots,
            &mut spawns,
            &mut contact,
        );
        enemy.update(&mut ctx);
        assert_eq!(shots.len(), 2);
    }

    #[test]
    fn sniper_retreats_when_player_close() {
        let mut enemy = Enemy::spawn(1, EnemyKind::Sniper, Vec2::new(700.0, 500.0), 1);
        let (mut rng, mut shots, mut spawns, mut contact) = ctx_parts();
        let player = Vec2::new(650.0, 500.0);
        let before = enemy.position.distance_to(player);
        let mut ctx = make_ctx(0, player, &mut rng, &mut shots, &mut spawns, &mut contact);
        enemy.update(&mut ctx);
        assert!(enemy.position.distance_to(player) > before);
    }

    #[test]
    fn exploder_arms_then_zeroes_health() {
        let mut enemy = Enemy::spawn(1, EnemyKind::Exploder, Vec2::new(700.0, 500.0), 1);
        let (mut rng, mut shots, mut spawns, mut contact) = ctx_parts();
        let player = Vec2::new(715.0, 500.0);
        let mut ctx = make_ctx(0, player, &mut rng, &mut shots, &mut spawns, &mut contact);
        enemy.update(&mut ctx);
        assert!(matches!(enemy.behavior, Behavior::Exploder { armed: true }));
        assert!(enemy.health > 0.0);
        let mut ctx = make_ctx(1, player, &mut rng, &mut shots, &mut spawns, &mut contact);
        enemy.update(&mut ctx);
        assert_eq!(enemy.health, 0.0);
    }

    #[test]
    fn protection_predicate_tracks_protector_liveness() {
        let mut enemies = vec![
            Enemy::spawn(1, EnemyKind::Swarmer, Vec2::new(500.0, 500.0), 1),
            Enemy::spawn(2, EnemyKind::Protector, Vec2::new(520.0, 500.0), 1),
        ];
        enemies[1].behavior = Behavior::Protector {
            protected:  Some(1),
            heal_ready: 0,
        };
        // 護衛対象自身も加護半径内なので無敵
        assert!(is_protected(&enemies, 1));
        // プロテクター死亡 → 即座に失効（状態の復元は発生しない）
        enemies[1].health = 0.0;
        assert!(!is_protected(&enemies, 1));
    }

    #[test]
    fn protector_never_protects_itself() {
        let mut enemies = vec![
            Enemy::spawn(1, EnemyKind::Swarmer, Vec2::new(500.0, 500.0), 1),
            Enemy::spawn(2, EnemyKind::Protector, Vec2::new(510.0, 500.0), 1),
        ];
        enemies[1].behavior = Behavior::Protector {
            protected:  Some(1),
            heal_ready: 0,
        };
        assert!(!is_protected(&enemies, 2));
    }

    #[test]
    fn boss_shield_reduces_damage() {
        let mut enemy = Enemy::spawn(1, EnemyKind::Boss, Vec2::new(700.0, 500.0), 1);
        if let Behavior::Boss(state) = &mut enemy.behavior {
            state.shield_active = true;
        }
        let before = enemy.health;
        enemy.take_damage(100.0);
        assert!((before - enemy.health - 30.0).abs() < 1e-3);
    }

    #[test]
    fn dungeon_scaling_applies_to_spawn() {
        let base = Enemy::spawn(1, EnemyKind::Swarmer, Vec2::new(100.0, 100.0), 1);
        let scaled = Enemy::spawn(2, EnemyKind::Swarmer, Vec2::new(100.0, 100.0), 3);
        assert!(scaled.max_health > base.max_health);
        assert!(scaled.speed > base.speed);
        assert!(scaled.damage_mult > base.damage_mult);
    }
}
