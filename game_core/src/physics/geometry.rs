//! Path: game_core/src/physics/geometry.rs
//! Summary: 円・線分の幾何判定と反射ベクトル計算

use crate::vector::Vec2;

/// 軸平行矩形（障害物の形状）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width:  f32,
    pub height: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Aabb { x, y, width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// 矩形内（辺上を含む）への最近接点
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.x, self.x + self.width),
            p.y.clamp(self.y, self.y + self.height),
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// 対角線の半分（グリッド登録用の包含半径）
    pub fn bounding_radius(&self) -> f32 {
        (self.width * self.width + self.height * self.height).sqrt() * 0.5
    }
}

/// 円同士の重なり判定
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_sq_to(b) <= r * r
}

/// 円と矩形の重なり判定
pub fn circle_aabb_overlap(center: Vec2, radius: f32, rect: &Aabb) -> bool {
    let closest = rect.closest_point(center);
    center.distance_sq_to(closest) <= radius * radius
}

/// 円を矩形から押し出す。押し出しが起きたら接触法線を返す。
pub fn resolve_circle_aabb(
    pos: &mut Vec2,
    vel: &mut Vec2,
    radius: f32,
    rect: &Aabb,
    damping: f32,
) -> Option<Vec2> {
    if !circle_aabb_overlap(*pos, radius, rect) {
        return None;
    }
    let n = if rect.contains(*pos) {
        // 中心が矩形内に沈んだ場合は最も浅い面へ押し出す
        let left   = pos.x - rect.x;
        let right  = rect.x + rect.width - pos.x;
        let top    = pos.y - rect.y;
        let bottom = rect.y + rect.height - pos.y;
        let min = left.min(right).min(top).min(bottom);
        if min == left {
            pos.x = rect.x - radius;
            Vec2::new(-1.0, 0.0)
        } else if min == right {
            pos.x = rect.x + rect.width + radius;
            Vec2::new(1.0, 0.0)
        } else if min == top {
            pos.y = rect.y - radius;
            Vec2::new(0.0, -1.0)
        } else {
            pos.y = rect.y + rect.height + radius;
            Vec2::new(0.0, 1.0)
        }
    } else {
        let closest = rect.closest_point(*pos);
        let n = (*pos - closest).normalized();
        *pos = closest + n * radius;
        n
    };
    let into = vel.dot(n);
    if into < 0.0 {
        *vel = *vel - n * (into * (1.0 + damping));
    }
    Some(n)
}

/// レイと矩形の交差（slab 法）。最初の交差距離 `t`（`origin + dir * t`）を返す。
/// `dir` は正規化済みであること。交差しない、または矩形が後方なら None。
pub fn ray_aabb_intersect(origin: Vec2, dir: Vec2, rect: &Aabb) -> Option<f32> {
    let inv_x = if dir.x.abs() > f32::EPSILON { 1.0 / dir.x } else { f32::INFINITY };
    let inv_y = if dir.y.abs() > f32::EPSILON { 1.0 / dir.y } else { f32::INFINITY };

    let mut t1 = (rect.x - origin.x) * inv_x;
    let mut t2 = (rect.x + rect.width - origin.x) * inv_x;
    if t1 > t2 {
        std::mem::swap(&mut t1, &mut t2);
    }
    let mut t3 = (rect.y - origin.y) * inv_y;
    let mut t4 = (rect.y + rect.height - origin.y) * inv_y;
    if t3 > t4 {
        std::mem::swap(&mut t3, &mut t4);
    }
    // 軸に平行なレイはその軸の slab 内にいなければ交差しない
    if dir.x.abs() <= f32::EPSILON && (origin.x < rect.x || origin.x > rect.x + rect.width) {
        return None;
    }
    if dir.y.abs() <= f32::EPSILON && (origin.y < rect.y || origin.y > rect.y + rect.height) {
        return None;
    }

    let t_min = t1.max(t3);
    let t_max = t2.min(t4);
    if t_max < 0.0 || t_min > t_max {
        return None;
    }
    Some(t_min.max(0.0))
}

/// 点 `p` から線分 `a`-`b` への最短距離
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance_to(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    p.distance_to(closest)
}

/// 円が線分（太さ `width`）に触れているか（ビーム当たり判定用）
pub fn circle_hits_segment(center: Vec2, radius: f32, a: Vec2, b: Vec2, width: f32) -> bool {
    point_segment_distance(center, a, b) <= radius + width * 0.5
}

/// 法線 `n`（正規化済み）に対する入射ベクトルの反射
pub fn reflect(v: Vec2, n: Vec2) -> Vec2 {
    v - n * (2.0 * v.dot(n))
}

/// 位置を矩形ワールド内にクランプし、端に当たった軸の速度を減衰反転する。
/// 戻り値は壁に接触したかどうか。
pub fn bounce_in_bounds(
    pos: &mut Vec2,
    vel: &mut Vec2,
    radius: f32,
    width: f32,
    height: f32,
    damping: f32,
) -> bool {
    let mut hit = false;
    if pos.x < radius {
        pos.x = radius;
        vel.x = -vel.x * damping;
        hit = true;
    } else if pos.x > width - radius {
        pos.x = width - radius;
        vel.x = -vel.x * damping;
        hit = true;
    }
    if pos.y < radius {
        pos.y = radius;
        vel.y = -vel.y * damping;
        hit = true;
    } else if pos.y > height - radius {
        pos.y = height - radius;
        vel.y = -vel.y * damping;
        hit = true;
    }
    hit
}

/// 円形障害物から動体を押し出し、進入速度成分を反転する
pub fn resolve_circle_obstacle(
    pos: &mut Vec2,
    vel: &mut Vec2,
    radius: f32,
    obstacle: Vec2,
    obstacle_radius: f32,
    damping: f32,
) -> bool {
    let delta = *pos - obstacle;
    let min_dist = radius + obstacle_radius;
    let dist_sq = delta.length_sq();
    if dist_sq >= min_dist * min_dist {
        return false;
    }
    let n = if dist_sq > f32::EPSILON {
        delta.normalized()
    } else {
        Vec2::new(1.0, 0.0)
    };
    *pos = obstacle + n * min_dist;
    let into = vel.dot(n);
    if into < 0.0 {
        *vel = *vel - n * (into * (1.0 + damping));
    }
    true
}
