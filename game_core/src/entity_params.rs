//! Path: game_core/src/entity_params.rs
//! Summary: 敵種別ごとの基礎パラメータテーブルとボススキルのレベル別パラメータ
//!
//! 敵の基礎値は `EnemyKind` を添字にした静的テーブルで参照する。
//! レベルスケーリングは `enemy::EnemyKind::stats_at` が行う。

use crate::enemy::EnemyKind;

/// 敵の基礎パラメータ（レベル 1 / ステージ 1 時点）
#[derive(Clone, Copy, Debug)]
pub struct EnemyParams {
    pub max_hp:         f32,
    pub speed:          f32,
    pub damage_per_sec: f32,
    pub radius:         f32,
    pub exp_reward:     u32,
    /// 遠隔攻撃の射程。None は近接のみ
    pub attack_range:   Option<f32>,
    /// 描画色 [r, g, b, a]
    pub color:          [f32; 4],
}

static ENEMY_TABLE: [EnemyParams; 6] = [
    EnemyParams { max_hp: 40.0,   speed: 90.0,  damage_per_sec: 12.0, radius: 14.0, exp_reward: 1,  attack_range: None,        color: [0.85, 0.30, 0.30, 1.0] }, // Basic
    EnemyParams { max_hp: 24.0,   speed: 165.0, damage_per_sec: 8.0,  radius: 11.0, exp_reward: 1,  attack_range: None,        color: [0.95, 0.65, 0.20, 1.0] }, // Runner
    EnemyParams { max_hp: 160.0,  speed: 55.0,  damage_per_sec: 20.0, radius: 22.0, exp_reward: 4,  attack_range: None,        color: [0.45, 0.45, 0.55, 1.0] }, // Tank
    EnemyParams { max_hp: 35.0,   speed: 80.0,  damage_per_sec: 10.0, radius: 13.0, exp_reward: 2,  attack_range: Some(340.0), color: [0.40, 0.75, 0.35, 1.0] }, // Ranger
    EnemyParams { max_hp: 260.0,  speed: 85.0,  damage_per_sec: 18.0, radius: 20.0, exp_reward: 12, attack_range: None,        color: [0.70, 0.35, 0.90, 1.0] }, // Elite（色はブループリントで上書き）
    EnemyParams { max_hp: 1800.0, speed: 70.0,  damage_per_sec: 26.0, radius: 40.0, exp_reward: 60, attack_range: None,        color: [0.90, 0.15, 0.45, 1.0] }, // Boss
];

impl EnemyParams {
    pub fn get(kind: EnemyKind) -> &'static EnemyParams {
        &ENEMY_TABLE[kind as usize]
    }
}

/// 近傍クエリの余白。スケーリング後の最大半径（基礎半径の 2 倍）以上
pub const MAX_ENEMY_RADIUS: f32 = 80.0;

/// 敵弾 1 発のダメージ（接触 DPS に対する倍率）
pub const ENEMY_SHOT_DAMAGE_MULT: f32 = 0.8;

// ─── ボススキル（レベル別） ─────────────────────────────────────

/// split_shot: クールダウン max(1.5, 4 - 0.4 * lv)
pub fn split_shot_cooldown(level: u32) -> f32 {
    (4.0 - 0.4 * level as f32).max(1.5)
}

/// split_shot: 直撃弾の左右に撃つ拡散弾のペア数
pub fn split_shot_spread_pairs(level: u32) -> usize {
    level.max(1) as usize
}

/// 拡散弾ペアごとの角度間隔（ラジアン）
pub const SPLIT_SHOT_SPREAD_STEP: f32 = 0.18;

/// blinding_dart: クールダウン max(3, 7 - 0.6 * lv)
pub fn blinding_dart_cooldown(level: u32) -> f32 {
    (7.0 - 0.6 * level as f32).max(3.0)
}

/// blinding_dart: 命中時の盲目時間
pub fn blind_duration(level: u32) -> f32 {
    1.5 + 0.5 * level as f32
}

/// mushroom_trap: クールダウン max(4, 9 - 0.8 * lv)
pub fn mushroom_trap_cooldown(level: u32) -> f32 {
    (9.0 - 0.8 * level as f32).max(4.0)
}

/// プレイヤーの足元ではなく、この距離範囲だけずらして設置する
pub const TRAP_OFFSET_MIN: f32 = 60.0;
pub const TRAP_OFFSET_MAX: f32 = 120.0;

/// mushroom_trap: 爆発時のスロウ倍率
pub const TRAP_SLOW_MULT: f32 = 0.5;

/// mushroom_trap: スロウ時間
pub fn trap_slow_duration(level: u32) -> f32 {
    1.5 + 0.5 * level as f32
}

/// mushroom_trap: 爆発半径
pub const TRAP_BURST_RADIUS: f32 = 90.0;

/// poison_nova: クールダウン max(4, 10 - lv)
pub fn poison_nova_cooldown(level: u32) -> f32 {
    (10.0 - level as f32).max(4.0)
}

/// poison_nova: 半径 120 + 20 * lv
pub fn poison_nova_radius(level: u32) -> f32 {
    120.0 + 20.0 * level as f32
}

pub const POISON_NOVA_DURATION: f32 = 3.0;

/// poison_nova: 0.5 秒ごとのダメージ 4 + 3 * lv
pub fn poison_nova_tick_damage(level: u32) -> f32 {
    4.0 + 3.0 * level as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_kind() {
        for kind in EnemyKind::ALL {
            let p = EnemyParams::get(kind);
            assert!(p.max_hp > 0.0);
            assert!(p.radius > 0.0);
            assert!(p.radius * 2.0 <= MAX_ENEMY_RADIUS);
        }
        assert!(EnemyParams::get(EnemyKind::Ranger).attack_range.is_some());
        assert!(EnemyParams::get(EnemyKind::Basic).attack_range.is_none());
    }

    #[test]
    fn boss_skill_cooldowns_are_floor_clamped() {
        assert!((split_shot_cooldown(1) - 3.6).abs() < 0.001);
        assert!((split_shot_cooldown(50) - 1.5).abs() < 0.001);
        assert!((blinding_dart_cooldown(50) - 3.0).abs() < 0.001);
        assert!((mushroom_trap_cooldown(50) - 4.0).abs() < 0.001);
        assert!((poison_nova_cooldown(2) - 8.0).abs() < 0.001);
        assert!((poison_nova_cooldown(50) - 4.0).abs() < 0.001);
    }

    #[test]
    fn boss_skill_magnitudes_grow_with_level() {
        assert!(blind_duration(3) > blind_duration(2));
        assert!(poison_nova_radius(3) > poison_nova_radius(1));
        assert!((poison_nova_tick_damage(2) - 10.0).abs() < 0.001);
        assert_eq!(split_shot_spread_pairs(3), 3);
    }
}
