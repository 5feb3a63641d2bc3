//! Path: game_sim/src/world/bullet.rs
//! Summary: 弾丸ワールド（発射元タグ・寿命・リコシェット状態）

use game_core::constants::{BOUNCE_DAMPING, BULLET_LIFETIME_TICKS, WORLD_HEIGHT, WORLD_WIDTH};
use game_core::vector::Vec2;

/// 弾丸の発射元。当たり判定の対象がこれで決まる。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletSource {
    Player,
    Enemy,
    Companion,
}

#[derive(Clone, Copy, Debug)]
pub struct Bullet {
    pub position:     Vec2,
    pub velocity:     Vec2,
    pub damage:       f32,
    pub size:         f32,
    pub source:       BulletSource,
    pub lifetime:     u64,
    /// リコシェット弾のみ > 0。壁に当たるたび消費する。
    pub max_bounces:  u32,
    pub bounce_count: u32,
    pub alive:        bool,
}

pub struct BulletWorld {
    pub bullets: Vec<Bullet>,
}

impl BulletWorld {
    pub fn new() -> Self {
        Self { bullets: Vec::new() }
    }

    pub fn spawn(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        damage: f32,
        size: f32,
        source: BulletSource,
    ) {
        self.bullets.push(Bullet {
            position,
            velocity,
            damage,
            size,
            source,
            lifetime:     BULLET_LIFETIME_TICKS,
            max_bounces:  0,
            bounce_count: 0,
            alive:        true,
        });
    }

    pub fn spawn_ricochet(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        damage: f32,
        size: f32,
        max_bounces: u32,
    ) {
        self.bullets.push(Bullet {
            position,
            velocity,
            damage,
            size,
            source:       BulletSource::Player,
            lifetime:     BULLET_LIFETIME_TICKS,
            max_bounces,
            bounce_count: 0,
            alive:        true,
        });
    }

    pub fn alive_count(&self) -> usize {
        self.bullets.iter().filter(|b| b.alive).count()
    }

    /// 位置更新と寿命・境界処理。リコシェット弾は境界で反射し、
    /// 残弾数が尽きるか通常弾が画面外に出たら消える。
    pub fn advance(&mut self) {
        for bullet in &mut self.bullets {
            if !bullet.alive {
                continue;
            }
            bullet.position += bullet.velocity;
            if bullet.lifetime == 0 {
                bullet.alive = false;
                continue;
            }
            bullet.lifetime -= 1;

            let out = bullet.position.x < 0.0
                || bullet.position.x > WORLD_WIDTH
                || bullet.position.y < 0.0
                || bullet.position.y > WORLD_HEIGHT;
            if !out {
                continue;
            }
            if bullet.max_bounces > bullet.bounce_count {
                bullet.bounce_count += 1;
                if bullet.position.x < 0.0 || bullet.position.x > WORLD_WIDTH {
                    bullet.velocity.x = -bullet.velocity.x * BOUNCE_DAMPING;
                    bullet.position.x = bullet.position.x.clamp(0.0, WORLD_WIDTH);
                }
                if bullet.position.y < 0.0 || bullet.position.y > WORLD_HEIGHT {
                    bullet.velocity.y = -bullet.velocity.y * BOUNCE_DAMPING;
                    bullet.position.y = bullet.position.y.clamp(0.0, WORLD_HEIGHT);
                }
            } else {
                bullet.alive = false;
            }
        }
    }

    /// 死んだ弾をまとめて除去する（ティック末尾で呼ぶ）
    pub fn compact(&mut self) {
        self.bullets.retain(|b| b.alive);
    }
}

impl Default for BulletWorld {
    fn default() -> Self {
        Self::new()
    }
}
