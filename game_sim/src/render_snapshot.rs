//! Path: game_sim/src/render_snapshot.rs
//! Summary: GameWorld から描画用スナップショットを構築（書き出し専用の境界）
//!
//! シミュレーション本体は描画面を一切持たない。外側のレンダラは
//! 毎フレームこのスナップショットだけを読み、ワールドへは書き戻さない。

use game_core::entity_params::ItemParams;
use game_core::laser::{BeamSegment, BEAM_WIDTH};

use crate::enemy::Behavior;
use crate::world::{BulletSource, GameState, GameWorld, ObstacleKind};

/// スプライト 1 枚分の描画指示
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpriteKind {
    Player,
    Companion,
    Enemy,
    /// スネークボスの体節。弱点は外側で強調表示する。
    SnakeSegment { vital: bool },
    Bullet { source: BulletSource },
    Item,
    PoisonCloud,
}

#[derive(Clone, Copy, Debug)]
pub struct SpriteInstance {
    pub kind:   SpriteKind,
    pub x:      f32,
    pub y:      f32,
    pub radius: f32,
    pub color:  [f32; 3],
    /// 死亡演出の進行度（生存中は 0.0）。フェードに使う。
    pub progress: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct ParticleInstance {
    pub x:     f32,
    pub y:     f32,
    pub size:  f32,
    pub color: [f32; 3],
    pub alpha: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct ObstacleInstance {
    pub x:      f32,
    pub y:      f32,
    pub width:  f32,
    pub height: f32,
    pub kind:   ObstacleKind,
    /// バリアのみ意味を持つ（ひび割れ表現用）
    pub health: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct BeamInstance {
    pub x1:    f32,
    pub y1:    f32,
    pub x2:    f32,
    pub y2:    f32,
    pub width: f32,
}

/// HUD が読むメタデータ
#[derive(Clone, Debug)]
pub struct HudData {
    pub health:      f32,
    pub max_health:  f32,
    pub shield:      f32,
    pub score:       u32,
    pub combo:       u32,
    pub dungeon:     u32,
    pub room:        u32,
    pub weapon_name: &'static str,
    pub state:       GameState,
    /// ボス体力バー（ボス部屋のみ Some）
    pub boss_health: Option<(f32, f32)>,
}

#[derive(Clone, Debug)]
pub struct RenderSnapshot {
    pub sprites:      Vec<SpriteInstance>,
    pub particles:    Vec<ParticleInstance>,
    pub obstacles:    Vec<ObstacleInstance>,
    pub beams:        Vec<BeamInstance>,
    pub screen_shake: f32,
    pub hud:          HudData,
}

/// GameWorld 全体をフラットな描画指示列に写し取る。
pub fn build_snapshot(world: &GameWorld) -> RenderSnapshot {
    let mut sprites = Vec::with_capacity(
        1 + world.player.companions.len()
            + world.enemies.len()
            + world.bullets.bullets.len()
            + world.items.items.len(),
    );

    sprites.push(SpriteInstance {
        kind:     SpriteKind::Player,
        x:        world.player.position.x,
        y:        world.player.position.y,
        radius:   world.player.size,
        color:    [0.3, 0.9, 1.0],
        progress: 0.0,
    });

    for companion in &world.player.companions {
        let pos = companion.position(world.player.position);
        sprites.push(SpriteInstance {
            kind:     SpriteKind::Companion,
            x:        pos.x,
            y:        pos.y,
            radius:   world.player.companion_size(),
            color:    [1.0, 0.6, 0.8],
            progress: 0.0,
        });
    }

    let mut boss_health = None;
    for enemy in &world.enemies {
        let progress = if enemy.dying {
            world.death_animations.progress(enemy.id)
        } else {
            0.0
        };
        match &enemy.behavior {
            Behavior::Snake(state) => {
                boss_health = Some((enemy.health, enemy.max_health));
                for (si, segment) in state.segments.iter().enumerate() {
                    sprites.push(SpriteInstance {
                        kind:     SpriteKind::SnakeSegment { vital: state.is_vital_segment(si) },
                        x:        segment.position.x,
                        y:        segment.position.y,
                        radius:   segment.size,
                        color:    enemy.color(),
                        progress,
                    });
                }
                for cloud in &state.poison_clouds {
                    sprites.push(SpriteInstance {
                        kind:     SpriteKind::PoisonCloud,
                        x:        cloud.position.x,
                        y:        cloud.position.y,
                        radius:   cloud.radius,
                        color:    [0.4, 0.8, 0.2],
                        progress: 0.0,
                    });
                }
            }
            behavior => {
                if matches!(behavior, Behavior::Boss(_)) {
                    boss_health = Some((enemy.health, enemy.max_health));
                }
                sprites.push(SpriteInstance {
                    kind:     SpriteKind::Enemy,
                    x:        enemy.position.x,
                    y:        enemy.position.y,
                    radius:   enemy.size,
                    color:    enemy.color(),
                    progress,
                });
            }
        }
    }

    for bullet in &world.bullets.bullets {
        if !bullet.alive {
            continue;
        }
        let color = match bullet.source {
            BulletSource::Player => [1.0, 1.0, 0.4],
            BulletSource::Companion => [1.0, 0.6, 0.8],
            BulletSource::Enemy => [1.0, 0.3, 0.3],
        };
        sprites.push(SpriteInstance {
            kind:     SpriteKind::Bullet { source: bullet.source },
            x:        bullet.position.x,
            y:        bullet.position.y,
            radius:   bullet.size,
            color,
            progress: 0.0,
        });
    }

    for item in &world.items.items {
        sprites.push(SpriteInstance {
            kind:     SpriteKind::Item,
            x:        item.position.x,
            y:        item.position.y,
            radius:   10.0,
            color:    ItemParams::get(item.kind).color,
            progress: 0.0,
        });
    }

    let mut particles = Vec::with_capacity(world.particles.count);
    for i in 0..world.particles.len() {
        if !world.particles.alive[i] {
            continue;
        }
        let alpha = (world.particles.lifetime[i] / world.particles.max_lifetime[i])
            .clamp(0.0, 1.0);
        particles.push(ParticleInstance {
            x:     world.particles.positions_x[i],
            y:     world.particles.positions_y[i],
            size:  world.particles.size[i],
            color: world.particles.color[i],
            alpha,
        });
    }

    let obstacles = world
        .obstacles
        .iter()
        .map(|o| ObstacleInstance {
            x:      o.rect.x,
            y:      o.rect.y,
            width:  o.rect.width,
            height: o.rect.height,
            kind:   o.kind,
            health: o.health,
        })
        .collect();

    let mut segments: Vec<BeamSegment> = Vec::new();
    world.player.laser.segments_into(&mut segments);
    let beams = segments
        .iter()
        .map(|s| BeamInstance {
            x1:    s.start.x,
            y1:    s.start.y,
            x2:    s.end.x,
            y2:    s.end.y,
            width: BEAM_WIDTH,
        })
        .collect();

    let hud = HudData {
        health:      world.player.health,
        max_health:  world.player.max_health,
        shield:      world.player.shield,
        score:       world.score,
        combo:       world.combo,
        dungeon:     world.dungeon,
        room:        world.room,
        weapon_name: world.player.weapon.tier.params().name,
        state:       world.state,
        boss_health,
    };

    RenderSnapshot {
        sprites,
        particles,
        obstacles,
        beams,
        screen_shake: world.particles.screen_shake,
        hud,
    }
}
