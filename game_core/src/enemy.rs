//! Path: game_core/src/enemy.rs
//! Summary: 敵種別とレベル算出・レベルスケーリング

use crate::constants::WAVES_PER_STAGE;
use crate::entity_params::EnemyParams;
use serde::{Deserialize, Serialize};

/// 敵の種類（セーブデータ互換のため #[repr(u8)] と明示値で固定）
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EnemyKind {
    #[default]
    Basic  = 0,
    Runner = 1,
    Tank   = 2,
    Ranger = 3,
    Elite  = 4,
    Boss   = 5,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::Basic,
        EnemyKind::Runner,
        EnemyKind::Tank,
        EnemyKind::Ranger,
        EnemyKind::Elite,
        EnemyKind::Boss,
    ];

    /// ディレクターの重み付き抽選対象（ボスは別経路で出現）
    pub const SPAWNABLE: [EnemyKind; 5] = [
        EnemyKind::Basic,
        EnemyKind::Runner,
        EnemyKind::Tank,
        EnemyKind::Ranger,
        EnemyKind::Elite,
    ];

    pub fn params(self) -> &'static EnemyParams {
        EnemyParams::get(self)
    }

    /// エリートとボスはボス用のスケーリング指数とスキルローテーションを持つ
    pub fn is_boss_like(self) -> bool {
        matches!(self, Self::Elite | Self::Boss)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Runner => "runner",
            Self::Tank => "tank",
            Self::Ranger => "ranger",
            Self::Elite => "elite",
            Self::Boss => "boss",
        }
    }

    /// レベル・ステージを反映した実ステータス
    pub fn stats_at(self, level: u32, stage: u32) -> EnemyStats {
        let p = self.params();
        let (hp_e, dmg_e, spd_e) = if self.is_boss_like() {
            BOSS_LIKE_EXPONENTS
        } else {
            REGULAR_EXPONENTS
        };
        let mut max_hp = p.max_hp * level_factor(level, hp_e);
        let mut damage = p.damage_per_sec * level_factor(level, dmg_e);
        if self == Self::Boss {
            let s = stage.max(1) as f32 - 1.0;
            max_hp *= 1.0 + 0.75 * s;
            damage *= 1.0 + 0.25 * s;
        }
        let radius = (p.radius * (max_hp / p.max_hp).powf(0.2)).clamp(p.radius, p.radius * 2.0);
        let exp_reward = (p.exp_reward as f32 * (1.0 + 0.15 * (level.max(1) - 1) as f32)).ceil() as u32;
        EnemyStats {
            level: level.max(1),
            max_hp,
            damage_per_sec: damage,
            speed: p.speed * level_factor(level, spd_e),
            radius,
            exp_reward: exp_reward.max(1),
        }
    }
}

/// (hp, damage, speed) のスケーリング指数
const REGULAR_EXPONENTS: (f32, f32, f32) = (1.15, 1.0, 0.25);
const BOSS_LIKE_EXPONENTS: (f32, f32, f32) = (1.45, 1.1, 0.15);

/// スケーリング後の敵ステータス
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub level:          u32,
    pub max_hp:         f32,
    pub damage_per_sec: f32,
    pub speed:          f32,
    pub radius:         f32,
    pub exp_reward:     u32,
}

/// `(1 + 0.2 (level - 1))^exponent`
pub fn level_factor(level: u32, exponent: f32) -> f32 {
    (1.0 + 0.2 * (level.max(1) - 1) as f32).powf(exponent)
}

/// ステージとウェーブから決まる進行レベル
pub fn progression_level(stage: u32, wave: u32) -> u32 {
    let wave = wave.min(WAVES_PER_STAGE);
    stage.saturating_sub(1) * 5 + wave.div_ceil(2)
}

/// プレイヤーレベルに追従するレベル（低レベル放置の暴走を抑える）
pub fn player_driven_level(player_level: u32) -> u32 {
    player_level * 3 / 4
}

pub fn enemy_level(stage: u32, wave: u32, player_level: u32) -> u32 {
    progression_level(stage, wave)
        .max(player_driven_level(player_level))
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn level_one_stats_match_table() {
        let s = EnemyKind::Basic.stats_at(1, 1);
        assert!((s.max_hp - 40.0).abs() < 0.001);
        assert!((s.speed - 90.0).abs() < 0.001);
        assert!((s.radius - 14.0).abs() < 0.001);
        assert_eq!(s.exp_reward, 1);
    }

    #[test]
    fn boss_scales_with_stage() {
        let s1 = EnemyKind::Boss.stats_at(5, 1);
        let s3 = EnemyKind::Boss.stats_at(5, 3);
        assert!((s3.max_hp / s1.max_hp - 2.5).abs() < 0.001);
        assert!((s3.damage_per_sec / s1.damage_per_sec - 1.5).abs() < 0.001);
    }

    #[test]
    fn radius_stays_within_double_base() {
        let s = EnemyKind::Tank.stats_at(200, 1);
        assert!(s.radius <= 44.0 + 0.001);
    }

    #[test]
    fn level_is_max_of_both_components() {
        assert_eq!(progression_level(1, 1), 1);
        assert_eq!(progression_level(2, 4), 7);
        assert_eq!(enemy_level(1, 1, 1), 1);
        assert_eq!(enemy_level(1, 1, 20), 15);
        assert_eq!(enemy_level(3, 10, 4), 15);
    }

    proptest! {
        #[test]
        fn enemy_level_components_are_monotonic(stage in 1u32..20, wave in 1u32..10, plv in 1u32..100) {
            let lv = enemy_level(stage, wave, plv);
            prop_assert_eq!(lv, progression_level(stage, wave).max(player_driven_level(plv)).max(1));
            prop_assert!(progression_level(stage, wave + 1) >= progression_level(stage, wave));
            prop_assert!(progression_level(stage + 1, wave) >= progression_level(stage, wave));
            prop_assert!(player_driven_level(plv + 1) >= player_driven_level(plv));
        }

        #[test]
        fn stats_grow_with_level(level in 1u32..80, kind_idx in 0usize..6) {
            let kind = EnemyKind::ALL[kind_idx];
            let a = kind.stats_at(level, 1);
            let b = kind.stats_at(level + 1, 1);
            prop_assert!(b.max_hp > a.max_hp);
            prop_assert!(b.damage_per_sec >= a.damage_per_sec);
            prop_assert!(b.speed >= a.speed);
        }
    }
}
