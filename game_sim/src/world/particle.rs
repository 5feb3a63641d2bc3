//! Path: game_sim/src/world/particle.rs
//! Summary: パーティクル SoA プール（フリーリスト再利用）とトリガー面

use game_core::physics::rng::SimpleRng;

/// パーティクル SoA（Structure of Arrays）。完全に演出専用で、
/// シミュレーション本体はこの状態を一切読まない。
pub struct ParticleWorld {
    pub positions_x:  Vec<f32>,
    pub positions_y:  Vec<f32>,
    pub velocities_x: Vec<f32>,
    pub velocities_y: Vec<f32>,
    pub lifetime:     Vec<f32>,
    pub max_lifetime: Vec<f32>,
    pub color:        Vec<[f32; 3]>,
    pub size:         Vec<f32>,
    pub alive:        Vec<bool>,
    pub count:        usize,
    /// 画面揺れの蓄積量（毎ティック減衰）
    pub screen_shake: f32,
    rng:              SimpleRng,
    /// 空きスロットのインデックススタック — O(1) でスロットを取得・返却
    free_list:        Vec<usize>,
}

impl ParticleWorld {
    pub fn new(seed: u64) -> Self {
        Self {
            positions_x:  Vec::new(),
            positions_y:  Vec::new(),
            velocities_x: Vec::new(),
            velocities_y: Vec::new(),
            lifetime:     Vec::new(),
            max_lifetime: Vec::new(),
            color:        Vec::new(),
            size:         Vec::new(),
            alive:        Vec::new(),
            count:        0,
            screen_shake: 0.0,
            rng:          SimpleRng::new(seed),
            free_list:    Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn spawn_one(
        &mut self,
        x: f32, y: f32,
        vx: f32, vy: f32,
        lifetime: f32,
        color: [f32; 3],
        size: f32,
    ) {
        if let Some(i) = self.free_list.pop() {
            // O(1): フリーリストから空きスロットを取得
            self.positions_x[i]  = x;
            self.positions_y[i]  = y;
            self.velocities_x[i] = vx;
            self.velocities_y[i] = vy;
            self.lifetime[i]     = lifetime;
            self.max_lifetime[i] = lifetime;
            self.color[i]        = color;
            self.size[i]         = size;
            self.alive[i]        = true;
        } else {
            // フリーリストが空なら末尾に追加
            self.positions_x.push(x);
            self.positions_y.push(y);
            self.velocities_x.push(vx);
            self.velocities_y.push(vy);
            self.lifetime.push(lifetime);
            self.max_lifetime.push(lifetime);
            self.color.push(color);
            self.size.push(size);
            self.alive.push(true);
        }
        self.count += 1;
    }

    fn scatter(&mut self, x: f32, y: f32, count: usize, speed: (f32, f32), life: f32, size: (f32, f32), color: [f32; 3]) {
        for _ in 0..count {
            let angle = self.rng.next_f32() * std::f32::consts::TAU;
            let v = self.rng.next_range(speed.0, speed.1);
            let particle_size = self.rng.next_range(size.0, size.1);
            self.spawn_one(
                x, y,
                angle.cos() * v,
                angle.sin() * v,
                life,
                color,
                particle_size,
            );
        }
    }

    // ─── トリガー面（シミュレーション側から呼ばれる） ───────────

    pub fn explosion(&mut self, x: f32, y: f32, color: [f32; 3]) {
        self.scatter(x, y, 20, (1.0, 4.0), 30.0, (2.0, 6.0), color);
        self.screen_shake += 4.0;
    }

    pub fn muzzle_flash(&mut self, x: f32, y: f32) {
        self.scatter(x, y, 10, (0.5, 2.0), 10.0, (1.0, 4.0), [1.0, 1.0, 0.6]);
    }

    pub fn impact_sparks(&mut self, x: f32, y: f32, color: [f32; 3]) {
        self.scatter(x, y, 6, (0.5, 2.5), 10.0, (1.0, 3.0), color);
    }

    pub fn death_burst(&mut self, x: f32, y: f32, enemy_size: f32, color: [f32; 3]) {
        let count = (enemy_size as usize).saturating_mul(3).min(90);
        self.scatter(x, y, count, (1.0, 5.0), 60.0, (1.0, 4.0), color);
    }

    pub fn dissolve(&mut self, x: f32, y: f32, enemy_size: f32, color: [f32; 3]) {
        let count = (enemy_size as usize).saturating_mul(3).min(90);
        self.scatter(x, y, count, (0.2, 1.0), 40.0, (1.0, 3.0), color);
    }

    pub fn debris(&mut self, x: f32, y: f32, color: [f32; 3]) {
        self.scatter(x, y, 12, (1.0, 3.0), 45.0, (1.0, 4.0), color);
    }

    pub fn energy_drain(&mut self, x: f32, y: f32, toward_x: f32, toward_y: f32) {
        for _ in 0..8 {
            let t = self.rng.next_f32();
            let px = x + (toward_x - x) * t;
            let py = y + (toward_y - y) * t;
            let vx = (toward_x - x) * 0.02;
            let vy = (toward_y - y) * 0.02;
            self.spawn_one(px, py, vx, vy, 20.0, [0.2, 0.2, 0.6], 2.0);
        }
    }

    pub fn shockwave(&mut self, x: f32, y: f32, color: [f32; 3]) {
        self.scatter(x, y, 36, (4.0, 6.0), 25.0, (2.0, 4.0), color);
        self.screen_shake += 8.0;
    }

    // ─── 更新 ───────────────────────────────────────────────────

    pub fn advance(&mut self) {
        for i in 0..self.len() {
            if !self.alive[i] {
                continue;
            }
            self.positions_x[i] += self.velocities_x[i];
            self.positions_y[i] += self.velocities_y[i];
            self.velocities_x[i] *= 0.95;
            self.velocities_y[i] *= 0.95;
            self.lifetime[i] -= 1.0;
            if self.lifetime[i] <= 0.0 {
                self.alive[i] = false;
                self.count = self.count.saturating_sub(1);
                self.free_list.push(i);
            }
        }
        self.screen_shake *= 0.9;
        if self.screen_shake < 0.05 {
            self.screen_shake = 0.0;
        }
    }
}
