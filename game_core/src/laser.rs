//! Path: game_core/src/laser.rs
//! Summary: クリティカル体力時のビーム兵器と分岐ビームツリー
//!
//! ビームは毎ティック照準へ追従し、ワールド境界または最寄りの障害物で
//! クリップされる。バズーカ強化中は主ビーム上の固定位置に 5 本の一次分岐、
//! 各一次分岐に ±90° の二次分岐 2 本が生え、ビーム寿命にあわせて伸びる。
//! 反動は失効時に一度だけ適用する。

use crate::constants::ms_to_ticks;
use crate::physics::geometry::{ray_aabb_intersect, Aabb};
use crate::vector::Vec2;

pub const BEAM_DURATION_TICKS: u64 = ms_to_ticks(1500);
pub const BEAM_COOLDOWN_TICKS: u64 = ms_to_ticks(5000);
pub const BEAM_DAMAGE_PER_TICK: f32 = 100.0;
pub const BEAM_WIDTH: f32 = 8.0;
pub const BEAM_RECOIL: f32 = BEAM_DAMAGE_PER_TICK * 0.9;

/// 分岐ダメージは主ビームの 30%
pub const BRANCH_DAMAGE_RATIO: f32 = 0.3;
/// 一次分岐のビーム上の位置（始点からの割合）
pub const PRIMARY_POSITIONS: [f32; 5] = [0.20, 0.35, 0.50, 0.65, 0.80];
pub const PRIMARY_MAX_LENGTH: f32 = 150.0;
pub const SUB_MAX_LENGTH: f32 = 75.0;
/// 二次分岐は親の中間点から生える
const SUB_ATTACH_FRACTION: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchLevel {
    Primary,
    Sub,
}

/// 分岐 1 本。位置・角度は毎ティック親の現在の変換から再計算され、
/// 絶対座標は保持しない（保持するのは親に対する相対値のみ）。
#[derive(Clone, Copy, Debug)]
struct Branch {
    level: BranchLevel,
    /// Primary: 主ビーム上の割合 / Sub: 親分岐上の割合
    attach_fraction: f32,
    /// 親の角度からの相対角
    relative_angle: f32,
    max_length: f32,
    /// Sub のみ: 親 Primary のインデックス
    parent: Option<usize>,
}

/// 判定出力: 1 セグメント = 始点・終点・毎ティックダメージ
#[derive(Clone, Copy, Debug)]
pub struct BeamSegment {
    pub start:  Vec2,
    pub end:    Vec2,
    pub damage: f32,
}

pub struct Laser {
    active:          bool,
    start:           Vec2,
    end:             Vec2,
    age_ticks:       u64,
    next_ready_tick: u64,
    recoil_applied:  bool,
    branching:       bool,
    branches:        Vec<Branch>,
}

/// ビーム失効の通知。反動量は一度だけ返る。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LaserEvent {
    Expired { recoil: f32 },
}

impl Laser {
    pub fn new() -> Self {
        Self {
            active:          false,
            start:           Vec2::ZERO,
            end:             Vec2::ZERO,
            age_ticks:       0,
            next_ready_tick: 0,
            recoil_applied:  false,
            branching:       false,
            branches:        Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_ready(&self, tick: u64) -> bool {
        !self.active && tick >= self.next_ready_tick
    }

    /// ビーム起動。発射中またはクールダウン中は失敗する。
    /// `branching` はバズーカ強化の有無（起動時に固定）。
    pub fn try_fire(&mut self, tick: u64, branching: bool) -> bool {
        if !self.is_ready(tick) {
            return false;
        }
        self.active = true;
        self.age_ticks = 0;
        self.recoil_applied = false;
        self.branching = branching;
        self.branches.clear();
        if branching {
            self.build_branch_tree();
        }
        true
    }

    /// 固定形状の分岐ツリーを構築する。一次分岐は主ビームから
    /// 1/4 回転オフセット（符号は交互）、二次分岐は親から ±90°。
    fn build_branch_tree(&mut self) {
        for (i, &fraction) in PRIMARY_POSITIONS.iter().enumerate() {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            let parent_idx = self.branches.len();
            self.branches.push(Branch {
                level:           BranchLevel::Primary,
                attach_fraction: fraction,
                relative_angle:  sign * std::f32::consts::FRAC_PI_2,
                max_length:      PRIMARY_MAX_LENGTH,
                parent:          None,
            });
            for &sub_sign in &[1.0f32, -1.0] {
                self.branches.push(Branch {
                    level:           BranchLevel::Sub,
                    attach_fraction: SUB_ATTACH_FRACTION,
                    relative_angle:  sub_sign * std::f32::consts::FRAC_PI_2,
                    max_length:      SUB_MAX_LENGTH,
                    parent:          Some(parent_idx),
                });
            }
        }
    }

    /// 毎ティックの更新。照準に追従してレイを引き直し、寿命が尽きれば
    /// クールダウンを開始して失効イベント（反動つき、一度だけ）を返す。
    pub fn update(
        &mut self,
        tick: u64,
        origin: Vec2,
        aim: Vec2,
        world_width: f32,
        world_height: f32,
        obstacles: &[Aabb],
    ) -> Option<LaserEvent> {
        if !self.active {
            return None;
        }
        self.age_ticks += 1;
        if self.age_ticks > BEAM_DURATION_TICKS {
            self.active = false;
            self.next_ready_tick = tick + BEAM_COOLDOWN_TICKS;
            self.branches.clear();
            if !self.recoil_applied {
                self.recoil_applied = true;
                return Some(LaserEvent::Expired { recoil: BEAM_RECOIL });
            }
            return None;
        }

        let dir = (aim - origin).normalized();
        let dir = if dir == Vec2::ZERO { Vec2::new(1.0, 0.0) } else { dir };
        let mut t = clip_to_world(origin, dir, world_width, world_height);
        for rect in obstacles {
            if let Some(hit) = ray_aabb_intersect(origin, dir, rect) {
                if hit > 0.0 && hit < t {
                    t = hit;
                }
            }
        }
        self.start = origin;
        self.end = origin + dir * t;
        None
    }

    /// 当たり判定用のセグメント一覧を `out` に書き込む。
    /// 分岐長はビーム寿命の進行にあわせて成長する。
    pub fn segments_into(&self, out: &mut Vec<BeamSegment>) {
        out.clear();
        if !self.active {
            return;
        }
        out.push(BeamSegment {
            start:  self.start,
            end:    self.end,
            damage: BEAM_DAMAGE_PER_TICK,
        });
        if !self.branching {
            return;
        }

        let growth = (self.age_ticks as f32 / BEAM_DURATION_TICKS as f32).min(1.0);
        let main_dir = (self.end - self.start).normalized();
        let main_angle = main_dir.angle();
        let main_len = self.start.distance_to(self.end);
        let branch_damage = BEAM_DAMAGE_PER_TICK * BRANCH_DAMAGE_RATIO;

        // 一次分岐のセグメントを先に確定し、二次分岐は親の変換から導出する
        let mut primaries: Vec<(Vec2, f32, f32)> = Vec::with_capacity(PRIMARY_POSITIONS.len());
        for branch in &self.branches {
            if branch.level != BranchLevel::Primary {
                continue;
            }
            let start = self.start + main_dir * (main_len * branch.attach_fraction);
            let angle = main_angle + branch.relative_angle;
            let length = branch.max_length * growth;
            primaries.push((start, angle, length));
            out.push(BeamSegment {
                start,
                end: start + Vec2::from_angle(angle) * length,
                damage: branch_damage,
            });
        }
        for branch in &self.branches {
            let parent_idx = match (branch.level, branch.parent) {
                (BranchLevel::Sub, Some(idx)) => idx,
                _ => continue,
            };
            // 一次分岐は 3 エントリおき（primary, sub, sub）に並ぶ
            let (p_start, p_angle, p_len) = primaries[parent_idx / 3];
            let start = p_start + Vec2::from_angle(p_angle) * (p_len * branch.attach_fraction);
            let angle = p_angle + branch.relative_angle;
            let length = branch.max_length * growth;
            out.push(BeamSegment {
                start,
                end: start + Vec2::from_angle(angle) * length,
                damage: branch_damage,
            });
        }
    }
}

impl Default for Laser {
    fn default() -> Self {
        Self::new()
    }
}

/// レイがワールド矩形の境界に達するまでの距離
fn clip_to_world(origin: Vec2, dir: Vec2, width: f32, height: f32) -> f32 {
    let mut t = f32::INFINITY;
    if dir.x > f32::EPSILON {
        t = t.min((width - origin.x) / dir.x);
    } else if dir.x < -f32::EPSILON {
        t = t.min(-origin.x / dir.x);
    }
    if dir.y > f32::EPSILON {
        t = t.min((height - origin.y) / dir.y);
    } else if dir.y < -f32::EPSILON {
        t = t.min(-origin.y / dir.y);
    }
    if t.is_finite() {
        t.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_at(laser: &mut Laser, tick: u64, origin: Vec2, aim: Vec2) -> Option<LaserEvent> {
        laser.update(tick, origin, aim, 1400.0, 1000.0, &[])
    }

    fn step(laser: &mut Laser, origin: Vec2, aim: Vec2) -> Option<LaserEvent> {
        step_at(laser, 0, origin, aim)
    }

    #[test]
    fn fire_fails_while_active_or_cooling() {
        let mut laser = Laser::new();
        assert!(laser.try_fire(0, false));
        assert!(!laser.try_fire(1, false)); // 発射中
        // 失効させてクールダウンに入れる
        for t in 1..=(BEAM_DURATION_TICKS + 1) {
            step_at(&mut laser, t, Vec2::new(700.0, 500.0), Vec2::new(800.0, 500.0));
            if !laser.is_active() {
                break;
            }
        }
        assert!(!laser.is_active());
        let expiry = BEAM_DURATION_TICKS + 1;
        assert!(!laser.try_fire(expiry + 1, false)); // クールダウン中
        assert!(laser.try_fire(expiry + BEAM_COOLDOWN_TICKS + 1, false));
    }

    #[test]
    fn beam_clips_to_world_boundary() {
        let mut laser = Laser::new();
        laser.try_fire(0, false);
        step(&mut laser, Vec2::new(700.0, 500.0), Vec2::new(800.0, 500.0));
        let mut segs = Vec::new();
        laser.segments_into(&mut segs);
        assert_eq!(segs.len(), 1);
        assert!((segs[0].end.x - 1400.0).abs() < 1e-3);
        assert!((segs[0].end.y - 500.0).abs() < 1e-3);
    }

    #[test]
    fn beam_clips_to_nearest_obstacle() {
        let mut laser = Laser::new();
        laser.try_fire(0, false);
        let rects = [
            Aabb::new(1000.0, 450.0, 50.0, 100.0),
            Aabb::new(900.0, 450.0, 50.0, 100.0), // より近い
        ];
        laser.update(
            0,
            Vec2::new(700.0, 500.0),
            Vec2::new(800.0, 500.0),
            1400.0,
            1000.0,
            &rects,
        );
        let mut segs = Vec::new();
        laser.segments_into(&mut segs);
        assert!((segs[0].end.x - 900.0).abs() < 1e-3);
    }

    #[test]
    fn beam_reaims_every_tick() {
        let mut laser = Laser::new();
        laser.try_fire(0, false);
        step(&mut laser, Vec2::new(700.0, 500.0), Vec2::new(800.0, 500.0));
        step(&mut laser, Vec2::new(700.0, 500.0), Vec2::new(700.0, 600.0));
        let mut segs = Vec::new();
        laser.segments_into(&mut segs);
        assert!((segs[0].end.x - 700.0).abs() < 1e-3);
        assert!((segs[0].end.y - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn branching_builds_fifteen_segments() {
        let mut laser = Laser::new();
        laser.try_fire(0, true);
        step(&mut laser, Vec2::new(100.0, 500.0), Vec2::new(200.0, 500.0));
        let mut segs = Vec::new();
        laser.segments_into(&mut segs);
        // 主ビーム 1 + 一次 5 + 二次 10
        assert_eq!(segs.len(), 16);
        let branch_damage = BEAM_DAMAGE_PER_TICK * BRANCH_DAMAGE_RATIO;
        assert_eq!(segs[0].damage, BEAM_DAMAGE_PER_TICK);
        for seg in &segs[1..] {
            assert!((seg.damage - branch_damage).abs() < 1e-6);
        }
    }

    #[test]
    fn branches_grow_over_beam_life() {
        let mut laser = Laser::new();
        laser.try_fire(0, true);
        let origin = Vec2::new(100.0, 500.0);
        let aim = Vec2::new(200.0, 500.0);
        step(&mut laser, origin, aim);
        let mut early = Vec::new();
        laser.segments_into(&mut early);
        for _ in 0..40 {
            step(&mut laser, origin, aim);
        }
        let mut later = Vec::new();
        laser.segments_into(&mut later);
        let early_len = early[1].start.distance_to(early[1].end);
        let later_len = later[1].start.distance_to(later[1].end);
        assert!(later_len > early_len);
    }

    #[test]
    fn recoil_reported_exactly_once() {
        let mut laser = Laser::new();
        laser.try_fire(0, false);
        let origin = Vec2::new(700.0, 500.0);
        let aim = Vec2::new(800.0, 500.0);
        let mut recoils = 0;
        for _ in 0..(BEAM_DURATION_TICKS + 10) {
            if let Some(LaserEvent::Expired { recoil }) = step(&mut laser, origin, aim) {
                assert!((recoil - BEAM_RECOIL).abs() < 1e-6);
                recoils += 1;
            }
        }
        assert_eq!(recoils, 1);
        assert!(!laser.is_active());
    }
}
