//! Path: game_core/src/weapon.rs
//! Summary: 体力連動の武器ティアと発射レート制御
//!
//! 武器ティアは現在体力の割合だけで決まる: 体力が減るほど発射は遅く
//! 一発は重くなり、10% 以下でレーザーに切り替わる。

use crate::constants::ms_to_ticks;
use crate::vector::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeaponTier {
    Minigun,
    Auto,
    Burst,
    Semi,
    Single,
    Laser,
}

#[derive(Clone, Copy, Debug)]
pub struct TierParams {
    pub name:           &'static str,
    pub fire_interval:  u64,
    pub damage:         f32,
    pub recoil_mult:    f32,
}

static TIER_TABLE: [TierParams; 6] = [
    TierParams { name: "MINI GUN",    fire_interval: ms_to_ticks(50),   damage: 6.0,   recoil_mult: 0.1 },
    TierParams { name: "AUTO RIFLE",  fire_interval: ms_to_ticks(100),  damage: 10.0,  recoil_mult: 0.3 },
    TierParams { name: "BURST RIFLE", fire_interval: ms_to_ticks(300),  damage: 35.0,  recoil_mult: 0.5 },
    TierParams { name: "SEMI-AUTO",   fire_interval: ms_to_ticks(600),  damage: 80.0,  recoil_mult: 0.6 },
    TierParams { name: "SINGLE SHOT", fire_interval: ms_to_ticks(1200), damage: 200.0, recoil_mult: 0.7 },
    TierParams { name: "LASER",       fire_interval: 0,                 damage: 100.0, recoil_mult: 0.9 },
];

impl WeaponTier {
    /// 体力割合（0〜100）から現在のティアを返す。帯は重なりなく全域を覆う。
    pub fn for_health(health: f32, max_health: f32) -> WeaponTier {
        let pct = if max_health > 0.0 {
            (health / max_health * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        if pct >= 90.0 {
            WeaponTier::Minigun
        } else if pct >= 75.0 {
            WeaponTier::Auto
        } else if pct >= 50.0 {
            WeaponTier::Burst
        } else if pct >= 25.0 {
            WeaponTier::Semi
        } else if pct > 10.0 {
            WeaponTier::Single
        } else {
            WeaponTier::Laser
        }
    }

    pub fn params(self) -> &'static TierParams {
        &TIER_TABLE[self as usize]
    }

    pub fn is_laser(self) -> bool {
        self == WeaponTier::Laser
    }
}

/// 1 発分の弾仕様。速度・サイズ・ダメージは武器モード倍率適用前の基礎値。
#[derive(Clone, Copy, Debug)]
pub struct ShotSpec {
    pub direction: Vec2,
    pub damage:    f32,
    pub recoil:    f32,
}

/// 発射レート制御。ティアの切り替わり検出は呼び出し側が
/// `retier` の戻り値（変化時のみ Some）で行う。
pub struct Weapon {
    pub tier:        WeaponTier,
    next_ready_tick: u64,
}

impl Weapon {
    pub fn new() -> Self {
        Self {
            tier:            WeaponTier::Minigun,
            next_ready_tick: 0,
        }
    }

    /// 体力に応じてティアを更新。変化したときだけ新ティアを返す。
    pub fn retier(&mut self, health: f32, max_health: f32) -> Option<WeaponTier> {
        let next = WeaponTier::for_health(health, max_health);
        if next != self.tier {
            self.tier = next;
            Some(next)
        } else {
            None
        }
    }

    /// レート制限付きの発射。間隔が満ちていなければ None。
    /// レーザーティアでは常に None（ビームは別系統で扱う）。
    pub fn try_shoot(&mut self, tick: u64, direction: Vec2) -> Option<ShotSpec> {
        if self.tier.is_laser() {
            return None;
        }
        if tick < self.next_ready_tick {
            return None;
        }
        let params = self.tier.params();
        self.next_ready_tick = tick + params.fire_interval;
        Some(ShotSpec {
            direction: direction.normalized(),
            damage:    params.damage,
            recoil:    params.damage * params.recoil_mult,
        })
    }
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_bands_cover_full_health_range() {
        // 0〜100% を総当たりして、どの体力でも必ず 1 つのティアに落ちる
        for pct in 0..=100 {
            let tier = WeaponTier::for_health(pct as f32, 100.0);
            let expected = match pct {
                90..=100 => WeaponTier::Minigun,
                75..=89  => WeaponTier::Auto,
                50..=74  => WeaponTier::Burst,
                25..=49  => WeaponTier::Semi,
                11..=24  => WeaponTier::Single,
                _        => WeaponTier::Laser,
            };
            assert_eq!(tier, expected, "pct={pct}");
        }
    }

    #[test]
    fn boundary_ten_percent_is_laser() {
        assert_eq!(WeaponTier::for_health(10.0, 100.0), WeaponTier::Laser);
        assert_eq!(WeaponTier::for_health(10.1, 100.0), WeaponTier::Single);
    }

    #[test]
    fn retier_fires_only_on_change() {
        let mut weapon = Weapon::new();
        assert_eq!(weapon.retier(100.0, 100.0), None); // 初期値が Minigun
        assert_eq!(weapon.retier(80.0, 100.0), Some(WeaponTier::Auto));
        assert_eq!(weapon.retier(80.0, 100.0), None);
        assert_eq!(weapon.retier(30.0, 100.0), Some(WeaponTier::Semi));
    }

    #[test]
    fn shoot_respects_fire_interval() {
        let mut weapon = Weapon::new();
        weapon.retier(80.0, 100.0); // Auto: 6 ティック間隔
        let dir = Vec2::new(1.0, 0.0);
        assert!(weapon.try_shoot(0, dir).is_some());
        assert!(weapon.try_shoot(1, dir).is_none());
        assert!(weapon.try_shoot(5, dir).is_none());
        assert!(weapon.try_shoot(6, dir).is_some());
    }

    #[test]
    fn laser_tier_never_shoots_bullets() {
        let mut weapon = Weapon::new();
        weapon.retier(5.0, 100.0);
        assert!(weapon.try_shoot(100, Vec2::new(1.0, 0.0)).is_none());
    }

    #[test]
    fn recoil_scales_with_damage() {
        let mut weapon = Weapon::new();
        weapon.retier(30.0, 100.0); // Semi: damage 80, recoil_mult 0.6
        let shot = weapon.try_shoot(0, Vec2::new(0.0, 1.0)).unwrap();
        assert!((shot.recoil - 48.0).abs() < 1e-6);
    }
}
