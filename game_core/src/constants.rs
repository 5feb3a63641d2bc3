//! Path: game_core/src/constants.rs
//! Summary: ワールドサイズ・ティックレート・プレイヤー/進行の定数定義

// World size (部屋は固定サイズの単一画面)
pub const WORLD_WIDTH:  f32 = 1400.0;
pub const WORLD_HEIGHT: f32 = 1000.0;

// Fixed tick rate: すべてのタイマーはティック数で表現する（壁時計は使わない）
pub const TICKS_PER_SECOND: u64 = 60;
pub const TICK_MS: f64 = 1000.0 / TICKS_PER_SECOND as f64;

/// ミリ秒設定値をティック数へ変換（端数切り上げ: 0ms 以外が 0 ティックにならない）
pub const fn ms_to_ticks(ms: u64) -> u64 {
    (ms * TICKS_PER_SECOND + 999) / 1000
}

// Player
pub const PLAYER_SIZE:           f32 = 15.0;
pub const PLAYER_MAX_HEALTH:     f32 = 500.0;
/// 入力 1 ティックあたりの加速量（最終速度は減衰との釣り合いで決まる）
pub const PLAYER_SPEED:          f32 = 1.0;
pub const PLAYER_FRICTION:       f32 = 0.85;
pub const PLAYER_VELOCITY_DAMP:  f32 = 0.8;
pub const BOUNCE_DAMPING:        f32 = 0.9;
/// 入室直後の無敵時間（ティック）
pub const ROOM_ENTRY_INVULN_TICKS: u64 = ms_to_ticks(1000);

// Spatial grid
pub const CELL_SIZE: f32 = 100.0;

// Bullets
pub const PLAYER_BULLET_SIZE:   f32 = 5.0;
pub const ENEMY_BULLET_SIZE:    f32 = 3.0;
pub const BULLET_LIFETIME_TICKS: u64 = 150;
pub const PLAYER_BULLET_SPEED:  f32 = 8.0;

// Companion（お供）
pub const COMPANION_MAX:        usize = 3;
pub const COMPANION_HEALTH:     f32 = 150.0;
pub const COMPANION_SIZE:       f32 = 8.0;
pub const COMPANION_DISTANCE:   f32 = 40.0;
pub const COMPANION_FIRE_TICKS: u64 = ms_to_ticks(200);
pub const COMPANION_RANGE:      f32 = 300.0;
pub const COMPANION_DAMAGE:     f32 = 20.0;
pub const COMPANION_BULLET_SPEED: f32 = 6.0;

// Rooms / progression
pub const MAX_DUNGEONS: u32 = 5;
pub const MAX_ROOMS:    u32 = 3;
/// ダンジョンごとの敵ステータス倍率（指数スケーリング）
pub const HEALTH_SCALE_PER_DUNGEON: f32 = 1.4;
pub const SPEED_SCALE_PER_DUNGEON:  f32 = 1.2;
pub const DAMAGE_SCALE_PER_DUNGEON: f32 = 1.3;

// Combo
pub const COMBO_WINDOW_TICKS: u64 = ms_to_ticks(2000);
pub const COMBO_MAX: u32 = 50;

/// パーティクル用 RNG シード（ワールド生成時に使用）
pub const PARTICLE_RNG_SEED: u64 = 67890;
