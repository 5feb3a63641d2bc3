//! Path: game_sim/src/world/player.rs
//! Summary: プレイヤー状態（移動・反動・多層ダメージ・アイテム効果・お供）

use rustc_hash::FxHashMap;

use game_core::constants::{
    BOUNCE_DAMPING, COMPANION_DISTANCE, COMPANION_HEALTH, COMPANION_MAX, COMPANION_SIZE,
    PLAYER_FRICTION, PLAYER_MAX_HEALTH, PLAYER_SIZE, PLAYER_SPEED, PLAYER_VELOCITY_DAMP,
    WORLD_HEIGHT, WORLD_WIDTH,
};
use game_core::entity_params::ItemKind;
use game_core::laser::Laser;
use game_core::vector::Vec2;
use game_core::weapon::Weapon;

/// 発射モード。バズーカとリコシェットは排他（後着が上書き）。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponMode {
    Normal,
    Bazooka,
    Ricochet,
}

/// プレイヤーを周回するお供。近くの敵に自動射撃する。
#[derive(Clone, Copy, Debug)]
pub struct Companion {
    pub angle:          f32,
    pub health:         f32,
    pub next_shot_tick: u64,
}

impl Companion {
    pub fn position(&self, player_pos: Vec2) -> Vec2 {
        player_pos + Vec2::from_angle(self.angle) * COMPANION_DISTANCE
    }
}

/// 時限効果 1 件。乗算系の効果は適用前の値を保持し、失効時に正確に戻す。
/// 再取得は expires_at の上書きで、prior は最初の適用時のまま維持する。
#[derive(Clone, Copy, Debug, Default)]
struct ActiveEffect {
    expires_at:   u64,
    prior_speed:  Option<f32>,
    prior_damage: Option<f32>,
}

pub struct Player {
    pub position:      Vec2,
    pub velocity:      Vec2,
    pub recoil_force:  Vec2,
    pub aim:           Vec2,
    pub input:         Vec2,
    pub health:        f32,
    pub max_health:    f32,
    pub shield:        f32,
    pub size:          f32,
    pub invincible:    bool,
    pub ghost:         bool,
    pub weapon_mode:   WeaponMode,
    pub weapon:        Weapon,
    pub laser:         Laser,
    pub companions:    Vec<Companion>,
    /// RandomBox の速度強化/スロー用の移動倍率
    pub speed_mult:    f32,
    /// RandomBox の火力弱体用のダメージ倍率
    pub damage_mult:   f32,
    /// 入室直後の無敵が切れるティック
    pub invuln_until:  u64,
    item_cooldowns:    FxHashMap<ItemKind, u64>,
    item_effects:      FxHashMap<ItemKind, ActiveEffect>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            position:     Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0),
            velocity:     Vec2::ZERO,
            recoil_force: Vec2::ZERO,
            aim:          Vec2::new(WORLD_WIDTH / 2.0, 0.0),
            input:        Vec2::ZERO,
            health:       PLAYER_MAX_HEALTH,
            max_health:   PLAYER_MAX_HEALTH,
            shield:       0.0,
            size:         PLAYER_SIZE,
            invincible:   false,
            ghost:        false,
            weapon_mode:  WeaponMode::Normal,
            weapon:       Weapon::new(),
            laser:        Laser::new(),
            companions:   Vec::new(),
            speed_mult:   1.0,
            damage_mult:  1.0,
            invuln_until: 0,
            item_cooldowns: FxHashMap::default(),
            item_effects:   FxHashMap::default(),
        }
    }

    /// 移動と反動の統合更新。入力は正規化済みの方向ベクトル。
    pub fn advance(&mut self, tick: u64) {
        let accel = self.input.normalized() * (PLAYER_SPEED * self.speed_mult);
        self.velocity += accel;

        let total = self.velocity + self.recoil_force;
        self.position += total;

        // 境界で減衰バウンド（進入している成分だけ反転する）
        if self.position.x - self.size < 0.0 {
            self.position.x = self.size;
            if total.x < 0.0 {
                self.velocity.x *= -BOUNCE_DAMPING;
                self.recoil_force.x *= -BOUNCE_DAMPING;
            }
        } else if self.position.x + self.size > WORLD_WIDTH {
            self.position.x = WORLD_WIDTH - self.size;
            if total.x > 0.0 {
                self.velocity.x *= -BOUNCE_DAMPING;
                self.recoil_force.x *= -BOUNCE_DAMPING;
            }
        }
        if self.position.y - self.size < 0.0 {
            self.position.y = self.size;
            if total.y < 0.0 {
                self.velocity.y *= -BOUNCE_DAMPING;
                self.recoil_force.y *= -BOUNCE_DAMPING;
            }
        } else if self.position.y + self.size > WORLD_HEIGHT {
            self.position.y = WORLD_HEIGHT - self.size;
            if total.y > 0.0 {
                self.velocity.y *= -BOUNCE_DAMPING;
                self.recoil_force.y *= -BOUNCE_DAMPING;
            }
        }

        self.recoil_force = self.recoil_force * PLAYER_FRICTION;
        self.velocity = self.velocity * PLAYER_VELOCITY_DAMP;

        self.expire_effects(tick);
        self.advance_companions(tick);
    }

    fn advance_companions(&mut self, _tick: u64) {
        for companion in &mut self.companions {
            companion.angle += 0.05;
        }
    }

    pub fn add_companion(&mut self, tick: u64) -> bool {
        if self.companions.len() >= COMPANION_MAX {
            return false;
        }
        let slot = self.companions.len() as f32;
        self.companions.push(Companion {
            angle:          slot * std::f32::consts::TAU / COMPANION_MAX as f32,
            health:         COMPANION_HEALTH,
            next_shot_tick: tick,
        });
        true
    }

    pub fn companion_size(&self) -> f32 {
        COMPANION_SIZE
    }

    /// 反動を加算。発射方向の逆向きに働く。
    pub fn apply_recoil(&mut self, direction: Vec2, magnitude: f32) {
        self.recoil_force += direction.normalized() * -magnitude;
    }

    // ─── ダメージ・回復 ─────────────────────────────────────────

    /// 多層ダメージパイプライン: 無敵/ゴースト → シールド吸収 → 体力。
    /// 実際に体力へ届いたダメージ量を返す（回避・全吸収なら 0）。
    pub fn take_damage(&mut self, amount: f32, tick: u64) -> f32 {
        if self.invincible || self.ghost || tick < self.invuln_until {
            log::debug!("player damage dodged: {amount}");
            return 0.0;
        }
        let mut remaining = amount;
        if self.shield > 0.0 {
            if self.shield >= remaining {
                self.shield -= remaining;
                return 0.0;
            }
            remaining -= self.shield;
            self.shield = 0.0;
        }
        self.health = (self.health - remaining).max(0.0);
        remaining
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    // ─── アイテムクールダウン・時限効果 ─────────────────────────

    pub fn is_item_on_cooldown(&self, kind: ItemKind, tick: u64) -> bool {
        self.item_cooldowns.get(&kind).map_or(false, |&until| tick < until)
    }

    pub fn set_item_cooldown(&mut self, kind: ItemKind, tick: u64, cooldown_ticks: u64) {
        self.item_cooldowns.insert(kind, tick + cooldown_ticks);
    }

    pub fn is_effect_active(&self, kind: ItemKind, tick: u64) -> bool {
        self.item_effects.get(&kind).map_or(false, |e| tick < e.expires_at)
    }

    /// 時限効果を起動する。既に有効なら失効時刻だけ上書きし（明示的な
    /// supersede）、prior は最初の適用時の値を保持し続ける。
    pub fn activate_effect(&mut self, kind: ItemKind, tick: u64, duration_ticks: u64) {
        self.activate_effect_with_priors(kind, tick, duration_ticks, None, None);
    }

    pub fn activate_effect_with_priors(
        &mut self,
        kind: ItemKind,
        tick: u64,
        duration_ticks: u64,
        prior_speed: Option<f32>,
        prior_damage: Option<f32>,
    ) {
        match self.item_effects.get_mut(&kind) {
            Some(effect) => effect.expires_at = tick + duration_ticks,
            None => {
                self.item_effects.insert(kind, ActiveEffect {
                    expires_at: tick + duration_ticks,
                    prior_speed,
                    prior_damage,
                });
            }
        }
    }

    /// 失効した効果の巻き戻し。乗算系は保存した適用前の値をそのまま戻す。
    fn expire_effects(&mut self, tick: u64) {
        let expired: Vec<(ItemKind, ActiveEffect)> = self
            .item_effects
            .iter()
            .filter(|(_, e)| tick >= e.expires_at)
            .map(|(&k, &e)| (k, e))
            .collect();
        for (kind, effect) in expired {
            self.item_effects.remove(&kind);
            match kind {
                ItemKind::Shield => self.shield = 0.0,
                ItemKind::Ghost => self.ghost = false,
                ItemKind::Bazooka | ItemKind::Ricochet => {
                    if self.weapon_mode != WeaponMode::Normal {
                        self.weapon_mode = WeaponMode::Normal;
                    }
                }
                ItemKind::GodPlan | ItemKind::Valkyrie => self.invincible = false,
                ItemKind::RandomBox => {
                    if let Some(speed) = effect.prior_speed {
                        self.speed_mult = speed;
                    }
                    if let Some(damage) = effect.prior_damage {
                        self.damage_mult = damage;
                    }
                }
                _ => {}
            }
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
