//! Path: game_sim/src/world/death_animation.rs
//! Summary: 死亡演出の進行管理（dying → complete → 所有者が cleanup）

use rustc_hash::FxHashMap;

use super::particle::ParticleWorld;
use game_core::entity_params::EnemyKind;

/// 演出の見た目種別。トリガーするパーティクルの組み合わせが変わるだけで、
/// 進行のセマンティクスは全種別で同じ。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathKind {
    Standard,
    Exploder,
    Boss,
    SnakeBoss,
}

impl DeathKind {
    pub fn for_enemy(kind: EnemyKind) -> DeathKind {
        match kind {
            EnemyKind::Exploder => DeathKind::Exploder,
            EnemyKind::Boss => DeathKind::Boss,
            EnemyKind::SnakeBoss => DeathKind::SnakeBoss,
            _ => DeathKind::Standard,
        }
    }
}

const DEFAULT_SPEED: f32 = 0.08;
const SNAKE_BOSS_SPEED: f32 = 0.05;

struct Animation {
    progress: f32,
    speed:    f32,
    complete: bool,
}

/// 敵 ID をキーにした死亡演出の追跡。敵本体は演出完了まで
/// `dying` のままワールドに残り、完了後に所有者が除去と `cleanup` を行う。
pub struct DeathAnimationSystem {
    animations: FxHashMap<u32, Animation>,
}

impl DeathAnimationSystem {
    pub fn new() -> Self {
        Self {
            animations: FxHashMap::default(),
        }
    }

    /// 演出開始。一度きりのパーティクルバーストもここで発火する。
    /// 同じ ID で二重に開始しても最初の進行を維持する。
    pub fn start(
        &mut self,
        id: u32,
        kind: DeathKind,
        x: f32,
        y: f32,
        size: f32,
        color: [f32; 3],
        particles: &mut ParticleWorld,
    ) {
        if self.animations.contains_key(&id) {
            return;
        }
        let speed = match kind {
            DeathKind::SnakeBoss => SNAKE_BOSS_SPEED,
            _ => DEFAULT_SPEED,
        };
        self.animations.insert(id, Animation {
            progress: 0.0,
            speed,
            complete: false,
        });

        match kind {
            DeathKind::Standard => {
                particles.explosion(x, y, color);
                particles.dissolve(x, y, size, color);
            }
            DeathKind::Exploder => {
                particles.explosion(x, y, [1.0, 0.4, 0.0]);
                particles.shockwave(x, y, [1.0, 0.4, 0.0]);
                particles.dissolve(x, y, size, [1.0, 0.4, 0.0]);
            }
            DeathKind::Boss => {
                particles.explosion(x, y, color);
                particles.shockwave(x, y, color);
                particles.debris(x, y, color);
                particles.dissolve(x, y, size * 2.0, color);
            }
            DeathKind::SnakeBoss => {
                particles.explosion(x, y, color);
                particles.shockwave(x, y, color);
                particles.debris(x, y, color);
            }
        }
    }

    /// 全演出を 1 ティック進める。完了は progress が実際に 1.0 に
    /// 達したときのみ報告される。
    pub fn advance(&mut self) {
        for anim in self.animations.values_mut() {
            if anim.complete {
                continue;
            }
            anim.progress += anim.speed;
            if anim.progress >= 1.0 {
                anim.progress = 1.0;
                anim.complete = true;
            }
        }
    }

    pub fn is_dying(&self, id: u32) -> bool {
        self.animations.contains_key(&id)
    }

    pub fn is_complete(&self, id: u32) -> bool {
        self.animations.get(&id).map_or(false, |a| a.complete)
    }

    pub fn progress(&self, id: u32) -> f32 {
        self.animations.get(&id).map_or(0.0, |a| a.progress)
    }

    /// 完了した演出の追跡を破棄する。敵を除去する側が必ず呼ぶこと。
    pub fn cleanup(&mut self, id: u32) {
        self.animations.remove(&id);
    }

    pub fn tracked(&self) -> usize {
        self.animations.len()
    }
}

impl Default for DeathAnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_one(system: &mut DeathAnimationSystem, id: u32) {
        let mut particles = ParticleWorld::new(1);
        system.start(id, DeathKind::Standard, 0.0, 0.0, 12.0, [1.0, 0.0, 0.0], &mut particles);
    }

    #[test]
    fn lifecycle_dying_then_complete_then_cleaned() {
        let mut system = DeathAnimationSystem::new();
        start_one(&mut system, 7);
        assert!(system.is_dying(7));
        assert!(!system.is_complete(7));

        // 0.08/tick → 13 ティックで完了
        for _ in 0..13 {
            system.advance();
        }
        assert!(system.is_complete(7));
        assert!((system.progress(7) - 1.0).abs() < 1e-6);

        system.cleanup(7);
        assert!(!system.is_dying(7));
        assert_eq!(system.tracked(), 0);
    }

    #[test]
    fn completion_requires_full_progress() {
        let mut system = DeathAnimationSystem::new();
        start_one(&mut system, 1);
        for _ in 0..5 {
            system.advance();
        }
        assert!(system.is_dying(1));
        assert!(!system.is_complete(1));
        assert!(system.progress(1) > 0.0 && system.progress(1) < 1.0);
    }

    #[test]
    fn double_start_keeps_original_progress() {
        let mut system = DeathAnimationSystem::new();
        start_one(&mut system, 3);
        for _ in 0..5 {
            system.advance();
        }
        let before = system.progress(3);
        start_one(&mut system, 3);
        assert_eq!(system.progress(3), before);
    }

    #[test]
    fn unknown_id_reports_not_dying() {
        let system = DeathAnimationSystem::new();
        assert!(!system.is_dying(99));
        assert!(!system.is_complete(99));
        assert_eq!(system.progress(99), 0.0);
    }
}
