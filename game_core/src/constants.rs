//! Path: game_core/src/constants.rs
//! Summary: マップサイズ・タイマー・バランス調整用の定数定義

// ─── マップ / 時間 ───────────────────────────────────────────────

pub const MAP_WIDTH:  f32 = 2400.0;
pub const MAP_HEIGHT: f32 = 2400.0;

/// 弾丸がこの余白を超えてマップ外に出たら消す
pub const PROJECTILE_BOUNDS_MARGIN: f32 = 64.0;

/// 1 ステップで進める最大 dt（秒）。サスペンド復帰時の暴走を防ぐ
pub const MAX_DELTA_SECS: f32 = 0.1;

/// 方向正規化のゼロ除算ガード
pub const MIN_DIST_EPSILON: f32 = 0.001;

/// パーティクル・スポーン用 RNG シード
pub const DEFAULT_RNG_SEED: u64 = 67890;

// Spatial hash cell size
pub const CELL_SIZE: f32 = 96.0;

// ─── プレイヤー ───────────────────────────────────────────────────

pub const PLAYER_BASE_MAX_HP:          f32 = 200.0;
pub const PLAYER_BASE_DAMAGE:          f32 = 35.0;
pub const PLAYER_BASE_ATTACK_INTERVAL: f32 = 0.55;
pub const PLAYER_BASE_SPEED:           f32 = 220.0;

/// 当たり判定半径は最大 HP から導出する（基準 HP 200 で 16px）
pub const PLAYER_BASE_RADIUS: f32 = 16.0;
pub const PLAYER_MIN_RADIUS:  f32 = 14.0;
pub const PLAYER_MAX_RADIUS:  f32 = 28.0;

/// 自動攻撃の索敵半径 / 暗闇中の索敵半径
pub const PLAYER_ATTACK_RANGE: f32 = 460.0;
pub const BLIND_SIGHT_RANGE:   f32 = 180.0;

/// レベル由来の攻撃速度倍率の下限（逓減）
pub const LEVEL_ATTACK_SPEED_STEP:  f32 = 0.04;
pub const LEVEL_ATTACK_SPEED_FLOOR: f32 = 0.6;
pub const MIN_ATTACK_INTERVAL:      f32 = 0.12;

/// クールダウン倍率のクランプ範囲
pub const MIN_COOLDOWN_MULT: f32 = 0.4;

pub const INVENTORY_CAPACITY: usize = 6;

// Leveling
pub const EXP_INITIAL_THRESHOLD: u32 = 5;
pub const LEVEL_UP_MAX_HP_BONUS: f32 = 10.0;
pub const LEVEL_UP_DAMAGE_BONUS: f32 = 2.0;
pub const LEVEL_UP_HEAL_RATIO:   f32 = 0.5;
pub const SKILL_CHOICE_COUNT:    usize = 3;

// ─── 弾丸 ─────────────────────────────────────────────────────────

pub const PLAYER_BULLET_SPEED:  f32 = 520.0;
pub const PLAYER_BULLET_RADIUS: f32 = 6.0;
pub const ENEMY_BULLET_SPEED:   f32 = 230.0;
pub const ENEMY_BULLET_RADIUS:  f32 = 7.0;
pub const DART_STUN_DURATION:   f32 = 1.0;

// ─── 敵 ───────────────────────────────────────────────────────────

/// 遠距離敵の射撃間隔（秒）
pub const RANGED_FIRE_INTERVAL: f32 = 2.0;
/// 遠距離敵が保とうとする距離帯（射程比）
pub const RANGED_KEEP_MIN: f32 = 0.5;
pub const RANGED_KEEP_MAX: f32 = 0.8;

/// スキル未設定ボスのレガシー行動
pub const LEGACY_SPECIAL_INTERVAL: f32 = 5.0;
pub const LEGACY_PULSE_RADIUS:     f32 = 150.0;
pub const LEGACY_PULSE_DAMAGE_MULT: f32 = 2.0;
pub const LEGACY_BOOST_MULT:       f32 = 1.8;
pub const LEGACY_BOOST_DURATION:   f32 = 1.0;

/// ボス / エリートが持てるスキル数の上限
pub const MAX_BOSS_SKILLS: usize = 3;

// ─── AoE ゾーン / トラップ ────────────────────────────────────────

pub const ZONE_TICK_INTERVAL: f32 = 0.5;
/// 敵対象ゾーンのヒット時スタン
pub const ZONE_ENEMY_STUN: f32 = 0.3;
pub const TRAP_ARM_DELAY: f32 = 1.0;
pub const TRAP_TRIGGER_RADIUS: f32 = 36.0;

// ─── ドロップ ────────────────────────────────────────────────────

pub const POTION_DROP_CHANCE: f32 = 0.05;
pub const POTION_HEAL_AMOUNT: f32 = 30.0;
pub const PICKUP_RADIUS:      f32 = 10.0;
pub const ORB_MAGNET_RADIUS:  f32 = 90.0;
pub const ORB_DRIFT_SPEED:    f32 = 360.0;

// ─── ウェーブ / ステージ ─────────────────────────────────────────

pub const WAVE_DURATION:   f32 = 30.0;
pub const WAVES_PER_STAGE: u32 = 10;

/// 難易度係数（sin 波）の周期（秒）
pub const DIFFICULTY_PERIOD: f32 = 25.0;
pub const DIFFICULTY_SPEED_SWING: f32 = 0.3;
pub const FRENZY_SPAWN_INTERVAL:  f32 = 0.2;

/// ウェーブ帯ごとのスポーン間隔（1-3 / 4-6 / 7-9）
pub const SPAWN_INTERVAL_EARLY: f32 = 1.1;
pub const SPAWN_INTERVAL_MID:   f32 = 0.85;
pub const SPAWN_INTERVAL_LATE:  f32 = 0.65;

/// 基本スポーン重みと解禁ウェーブ
pub const BASIC_WEIGHT:  u32 = 10;
pub const RUNNER_WEIGHT: u32 = 4;
pub const RUNNER_WAVE:   u32 = 3;
pub const TANK_WEIGHT:   u32 = 3;
pub const TANK_WAVE:     u32 = 5;
pub const RANGER_WEIGHT: u32 = 3;
pub const RANGER_WAVE:   u32 = 7;
pub const MAX_ELITE_WEIGHT: u32 = 6;

/// 弱点狙いの重み調整が有効になる条件（調整済みの値。導出値ではない）
pub const WEAKNESS_GRACE_WAVE:  u32 = 4;
pub const HARD_PHASE_THRESHOLD: f32 = 0.5;
pub const WEAK_SPEED_THRESHOLD: f32 = 240.0;
pub const WEAK_DPS_THRESHOLD:   f32 = 90.0;
pub const WEAK_HP_THRESHOLD:    f32 = 260.0;
pub const WEAK_SPEED_BONUS:     u32 = 5;
pub const WEAK_DPS_BONUS:       u32 = 4;
pub const WEAK_HP_BONUS:        u32 = 4;

/// スポーンバッチ・敵上限（パフォーマンス保護のためクランプ）
pub const MIN_SPAWN_BATCH: u32 = 1;
pub const MAX_SPAWN_BATCH: u32 = 6;
pub const MIN_ENEMY_CAP:   usize = 30;
pub const MAX_ENEMY_CAP:   usize = 160;

/// プレイヤー周囲のスポーン距離帯
pub const SPAWN_MIN_DIST: f32 = 520.0;
pub const SPAWN_MAX_DIST: f32 = 720.0;
pub const BOSS_SPAWN_DIST: f32 = 480.0;

// ─── コンボ / フレンジー ─────────────────────────────────────────

pub const COMBO_DECAY_SECS:     f32 = 3.0;
pub const FRENZY_KILL_MILESTONE: u32 = 30;
pub const FRENZY_DURATION:      f32 = 5.0;
pub const FRENZY_HEAL_RATIO:    f32 = 0.05;

// ─── ボス撃破報酬 ────────────────────────────────────────────────

pub const BOSS_CURRENCY_PER_STAGE: u32 = 10;
pub const HEIRLOOM_LOOT_CHANCE:    f32 = 0.2;
/// ゲームオーバー時の生存ボーナス（この秒数ごとに 1 ポイント）
pub const SURVIVAL_POINT_SECS:     f32 = 30.0;
