//! Path: game_sim/src/world/frame_event.rs
//! Summary: フレーム内で発生したゲームイベント（組み込み側が毎フレーム drain する）

use game_core::entity_params::{EnemyKind, ItemKind};
use game_core::weapon::WeaponTier;

/// 外向き境界。サウンド・HUD・画面遷移はすべてこのイベント経由で通知し、
/// シミュレーション本体は描画や音声を一切保持しない。
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// サウンド再生要求（名前のみ、再生自体は組み込み側）
    Sound { name: &'static str },
    /// スコア加算（コンボ適用後）
    ScoreAwarded { points: u32, combo: u32 },
    EnemyKilled { kind: EnemyKind },
    /// 武器ティアの切り替わり（変化したティックのみ）
    WeaponTierChanged { name: &'static str },
    /// プロテクターの加護などでダメージが無効化された
    DamageBlocked { kind: EnemyKind },
    ItemPickedUp { kind: ItemKind },
    RoomChanged { dungeon: u32, room: u32 },
    BossPhaseChanged { phase: u8 },
    PlayerDamaged { amount: f32 },
    GameOver { score: u32 },
    Victory { score: u32 },
}

impl FrameEvent {
    pub fn tier_changed(tier: WeaponTier) -> FrameEvent {
        FrameEvent::WeaponTierChanged {
            name: tier.params().name,
        }
    }
}
