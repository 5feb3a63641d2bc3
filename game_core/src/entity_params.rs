//! Path: game_core/src/entity_params.rs
//! Summary: 敵・ボス・アイテムのパラメータテーブル

use crate::constants::ms_to_ticks;

// ─── EnemyKind / EnemyParams ───────────────────────────────────

/// 敵の種別。ボスも同じ敵リストに入る（部屋クリア判定を一本化するため）。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Swarmer,
    Charger,
    Shooter,
    Sniper,
    Exploder,
    Protector,
    Boss,
    SnakeBoss,
}

/// 敵の基礎パラメータ（ダンジョン倍率適用前）
#[derive(Clone, Copy, Debug)]
pub struct EnemyParams {
    pub max_health: f32,
    pub speed:      f32,
    pub size:       f32,
    pub score:      u32,
    /// 描画用 [r, g, b]
    pub color:      [f32; 3],
}

static ENEMY_TABLE: [EnemyParams; 8] = [
    EnemyParams { max_health: 10.0,   speed: 4.0, size: 8.0,  score: 50,   color: [1.0, 0.4, 0.0] },  // Swarmer
    EnemyParams { max_health: 80.0,   speed: 3.0, size: 25.0, score: 150,  color: [1.0, 0.27, 0.27] },// Charger
    EnemyParams { max_health: 50.0,   speed: 1.5, size: 18.0, score: 100,  color: [0.27, 1.0, 0.27] },// Shooter
    EnemyParams { max_health: 60.0,   speed: 0.8, size: 16.0, score: 200,  color: [0.53, 0.27, 1.0] },// Sniper
    EnemyParams { max_health: 30.0,   speed: 2.0, size: 15.0, score: 100,  color: [1.0, 0.4, 0.0] },  // Exploder
    EnemyParams { max_health: 40.0,   speed: 1.0, size: 20.0, score: 250,  color: [1.0, 0.0, 1.0] },  // Protector
    EnemyParams { max_health: 500.0,  speed: 1.2, size: 45.0, score: 1000, color: [0.55, 0.0, 0.0] }, // Boss
    EnemyParams { max_health: 2000.0, speed: 2.5, size: 35.0, score: 5000, color: [0.0, 0.8, 0.4] },  // SnakeBoss
];

impl EnemyParams {
    pub fn get(kind: EnemyKind) -> &'static EnemyParams {
        &ENEMY_TABLE[kind as usize]
    }
}

/// ダンジョン進行に応じた指数スケーリング倍率 (health, speed, damage)
pub fn dungeon_scaling(dungeon: u32) -> (f32, f32, f32) {
    let d = dungeon.saturating_sub(1) as i32;
    (
        crate::constants::HEALTH_SCALE_PER_DUNGEON.powi(d),
        crate::constants::SPEED_SCALE_PER_DUNGEON.powi(d),
        crate::constants::DAMAGE_SCALE_PER_DUNGEON.powi(d),
    )
}

// ─── 敵ごとの行動パラメータ ─────────────────────────────────────

pub mod charger {
    pub const CHARGE_SPEED:       f32 = 8.0;
    pub const CHARGE_RANGE:       f32 = 250.0;
    pub const CHARGE_DAMAGE:      f32 = 25.0;
    pub const CHARGE_COOLDOWN:    u64 = 60;
    pub const MAX_CHARGE_TICKS:   u64 = 30;
    pub const DETECTION_RANGE:    f32 = 400.0;
}

pub mod shooter {
    pub const SHOOT_RANGE:    f32 = 800.0;
    pub const SHOOT_COOLDOWN: u64 = 30;
    pub const BULLET_DAMAGE:  f32 = 15.0;
    pub const BULLET_SPEED:   f32 = 5.0;
}

pub mod sniper {
    pub const SHOOT_RANGE:      f32 = 1000.0;
    pub const RETREAT_DISTANCE: f32 = 200.0;
    pub const SHOOT_COOLDOWN:   u64 = 90;
    pub const BULLET_DAMAGE:    f32 = 30.0;
    pub const BULLET_SPEED:     f32 = 7.0;
}

pub mod exploder {
    pub const EXPLOSION_DAMAGE: f32 = 75.0;
    pub const EXPLOSION_RADIUS: f32 = 50.0;
    pub const DETONATION_RANGE: f32 = 30.0;
    pub const DETECTION_RANGE:  f32 = 200.0;
    /// 減衰後のダメージ下限
    pub const DAMAGE_FLOOR:     f32 = 5.0;
}

pub mod protector {
    pub const PROTECTION_RADIUS: f32 = 80.0;
    pub const HEAL_AMOUNT:       f32 = 20.0;
    pub const HEAL_RANGE:        f32 = 100.0;
    pub const HEAL_COOLDOWN:     u64 = 120;
    pub const FOLLOW_DISTANCE:   f32 = 30.0;
    pub const SHOOT_RANGE:       f32 = 800.0;
    pub const BULLET_DAMAGE:     f32 = 15.0;
    pub const BULLET_SPEED:      f32 = 4.0;
    /// ティックごとの射撃確率
    pub const SHOOT_CHANCE:      f32 = 0.02;
}

pub mod boss {
    /// フェーズ移行の残り体力しきい値（フェーズ 2/3/4）
    pub const PHASE_THRESHOLDS: [f32; 3] = [350.0, 200.0, 100.0];
    /// フェーズ別の攻撃クールダウン（ティック）
    pub const ATTACK_COOLDOWNS: [u64; 4] = [90, 60, 45, 30];
    pub const MINION_SPAWN_COOLDOWN:   u64 = 180;
    pub const TELEPORT_COOLDOWN:       u64 = 180;
    pub const SHIELD_COOLDOWN:         u64 = 300;
    pub const SHIELD_DURATION:         u64 = super::ms_to_ticks(2000);
    pub const SHIELD_DAMAGE_REDUCTION: f32 = 0.3;
    pub const NEAR_DISTANCE:           f32 = 100.0;
    pub const FAR_DISTANCE:            f32 = 200.0;
    /// フェーズ別の移動速度
    pub const PHASE_SPEEDS: [f32; 4] = [1.2, 1.4, 1.6, 2.0];
}

pub mod snake_boss {
    pub const SEGMENT_COUNT: usize = 12;
    pub const SEGMENT_SIZE:  f32 = 20.0;
    /// セグメント間の追従距離 = SEGMENT_SIZE * 1.5
    pub const FOLLOW_DISTANCE: f32 = SEGMENT_SIZE * 1.5;
    /// フェーズ移行しきい値（残り体力の割合）: フェーズ 2/3/4
    pub const PHASE_THRESHOLDS_PCT: [f32; 3] = [70.0, 40.0, 20.0];
    /// 移動パターン切り替え間隔
    pub const MOVEMENT_PATTERN_TICKS: u64 = 180;
    pub const CIRCLE_RADIUS: f32 = 150.0;
    /// フェーズ別の移動速度倍率
    pub const PHASE_SPEED_MULT: [f32; 4] = [1.0, 1.5, 2.0, 3.0];
    /// フェーズ別のクールダウン倍率（小さいほど速い）
    pub const PHASE_COOLDOWN_MULT: [f32; 4] = [1.0, 0.8, 0.6, 0.4];
    /// 攻撃ごとの基礎クールダウン（ティック）:
    /// basic / sweep / homing / poison / ultimate
    pub const BASE_COOLDOWNS: [u64; 5] = [120, 180, 240, 300, 600];
    pub const POISON_CLOUD_RADIUS:     f32 = 50.0;
    pub const POISON_CLOUD_MAX_RADIUS: f32 = 150.0;
    pub const POISON_CLOUD_GROWTH:     f32 = 2.0;
    pub const POISON_CLOUD_TICKS:      u64 = 180;
    pub const POISON_DAMAGE_PER_TICK:  f32 = 2.0;

    /// 3 セグメントごと（頭を含む）が弱点
    pub const fn is_vital(segment_index: usize) -> bool {
        segment_index % 3 == 0
    }
}

// ─── ItemKind / ItemParams ─────────────────────────────────────

/// アイテム種別。クールダウン・効果時間のキーもこの enum で一本化する。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Medkit,
    Shield,
    Ghost,
    Bazooka,
    Ricochet,
    TimeBubble,
    BlackHole,
    Valkyrie,
    Companion,
    GodPlan,
    RandomBox,
}

#[derive(Clone, Copy, Debug)]
pub struct ItemParams {
    /// 再取得クールダウン（ティック）
    pub cooldown_ticks: u64,
    /// 効果時間（ティック）。即時効果は 0
    pub duration_ticks: u64,
    pub color:          [f32; 3],
}

static ITEM_TABLE: [ItemParams; 11] = [
    ItemParams { cooldown_ticks: ms_to_ticks(10_000), duration_ticks: 0,                  color: [0.0, 1.0, 0.6] },  // Medkit
    ItemParams { cooldown_ticks: ms_to_ticks(30_000), duration_ticks: ms_to_ticks(10_000), color: [0.4, 1.0, 1.0] }, // Shield
    ItemParams { cooldown_ticks: ms_to_ticks(20_000), duration_ticks: ms_to_ticks(5_000),  color: [0.8, 0.8, 0.8] }, // Ghost
    ItemParams { cooldown_ticks: ms_to_ticks(45_000), duration_ticks: ms_to_ticks(15_000), color: [1.0, 0.2, 0.2] }, // Bazooka
    ItemParams { cooldown_ticks: ms_to_ticks(45_000), duration_ticks: ms_to_ticks(15_000), color: [0.0, 0.8, 1.0] }, // Ricochet
    ItemParams { cooldown_ticks: ms_to_ticks(20_000), duration_ticks: ms_to_ticks(5_000),  color: [0.6, 0.8, 1.0] }, // TimeBubble
    ItemParams { cooldown_ticks: ms_to_ticks(30_000), duration_ticks: ms_to_ticks(3_000),  color: [0.2, 0.2, 0.6] }, // BlackHole
    ItemParams { cooldown_ticks: ms_to_ticks(30_000), duration_ticks: ms_to_ticks(3_000),  color: [1.0, 0.8, 0.0] }, // Valkyrie
    ItemParams { cooldown_ticks: 0,                   duration_ticks: 0,                  color: [1.0, 0.6, 0.8] },  // Companion
    ItemParams { cooldown_ticks: ms_to_ticks(60_000), duration_ticks: ms_to_ticks(20_000), color: [1.0, 1.0, 1.0] }, // GodPlan
    ItemParams { cooldown_ticks: ms_to_ticks(10_000), duration_ticks: 0,                  color: [0.6, 0.4, 1.0] },  // RandomBox
];

impl ItemParams {
    pub fn get(kind: ItemKind) -> &'static ItemParams {
        &ITEM_TABLE[kind as usize]
    }
}

pub mod item {
    use super::ms_to_ticks;

    pub const PICKUP_RADIUS:    f32 = 25.0;
    pub const MEDKIT_HEAL:      f32 = 50.0;
    pub const SHIELD_POINTS:    f32 = 200.0;
    pub const BAZOOKA_DAMAGE_MULT: f32 = 2.0;
    pub const BAZOOKA_SIZE_MULT:   f32 = 3.0;
    pub const BAZOOKA_SPEED_MULT:  f32 = 1.5;
    pub const RICOCHET_MAX_BOUNCES: u32 = 3;
    pub const TIME_BUBBLE_SLOW:     f32 = 0.3;
    pub const BLACK_HOLE_RANGE:     f32 = 300.0;
    pub const BLACK_HOLE_FORCE:     f32 = 0.5;
    pub const VALKYRIE_KILL_RADIUS: f32 = 800.0;
    /// ブラックホール爆発・ヴァルキリー衝撃波の確殺ダメージ
    pub const ANNIHILATE_DAMAGE:    f32 = 9999.0;
    /// ランダムボックスの一時効果（速度・スロー・火力弱体）は一律 15 秒
    pub const RANDOM_BOX_EFFECT_TICKS: u64 = ms_to_ticks(15_000);
    pub const RANDOM_BOX_SPEED_MULT:   f32 = 1.5;
    pub const RANDOM_BOX_SLOW_MULT:    f32 = 0.75;
    pub const RANDOM_BOX_WEAKNESS_MULT: f32 = 0.5;
}

/// レアリティ別の出現テーブル（重み付き抽選用）
pub mod rarity {
    use super::ItemKind;

    pub static COMMON:   [ItemKind; 4] = [ItemKind::Medkit, ItemKind::Ricochet, ItemKind::Bazooka, ItemKind::Ghost];
    pub static UNCOMMON: [ItemKind; 3] = [ItemKind::Shield, ItemKind::BlackHole, ItemKind::Companion];
    pub static RARE:     [ItemKind; 2] = [ItemKind::Valkyrie, ItemKind::TimeBubble];
    pub static EPIC:     [ItemKind; 2] = [ItemKind::GodPlan, ItemKind::RandomBox];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_table_matches_kinds() {
        assert_eq!(EnemyParams::get(EnemyKind::Swarmer).size, 8.0);
        assert_eq!(EnemyParams::get(EnemyKind::Boss).max_health, 500.0);
        assert_eq!(EnemyParams::get(EnemyKind::SnakeBoss).score, 5000);
    }

    #[test]
    fn dungeon_scaling_is_exponential() {
        let (h1, s1, d1) = dungeon_scaling(1);
        assert_eq!((h1, s1, d1), (1.0, 1.0, 1.0));
        let (h3, _, _) = dungeon_scaling(3);
        assert!((h3 - 1.4_f32.powi(2)).abs() < 1e-6);
    }

    #[test]
    fn snake_vital_points_every_third_segment() {
        assert!(snake_boss::is_vital(0));
        assert!(!snake_boss::is_vital(1));
        assert!(!snake_boss::is_vital(2));
        assert!(snake_boss::is_vital(3));
        assert!(snake_boss::is_vital(9));
    }

    #[test]
    fn item_cooldowns_are_tick_counted() {
        assert_eq!(ItemParams::get(ItemKind::Medkit).cooldown_ticks, 600);
        assert_eq!(ItemParams::get(ItemKind::GodPlan).duration_ticks, 1200);
        assert_eq!(ItemParams::get(ItemKind::Shield).duration_ticks, 600);
    }
}
