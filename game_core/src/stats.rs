//! Path: game_core/src/stats.rs
//! Summary: ステータス差分（StatDelta）と派生ステータスの再計算インタプリタ
//!
//! 派生ステータスは (基礎ステータス, レベル, スキルレベル, インベントリ) の純関数。
//! 入力が変わるたびに `derive_stats` で丸ごと再計算し、差分パッチはしない。

use crate::constants::{
    LEVEL_ATTACK_SPEED_FLOOR, LEVEL_ATTACK_SPEED_STEP, MIN_ATTACK_INTERVAL, MIN_COOLDOWN_MULT,
    PLAYER_BASE_ATTACK_INTERVAL, PLAYER_BASE_DAMAGE, PLAYER_BASE_MAX_HP, PLAYER_BASE_RADIUS,
    PLAYER_BASE_SPEED, PLAYER_MAX_RADIUS, PLAYER_MIN_RADIUS,
};
use crate::item::InventorySlot;
use crate::skill::{SkillId, SkillKind, SkillLevels};
use serde::{Deserialize, Serialize};

/// ステータスの加算差分。スキル・タレント・アイテムの効果を表すデータ
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatDelta {
    pub max_hp:             f32,
    pub damage:             f32,
    pub speed:              f32,
    pub damage_reduction:   f32,
    /// 攻撃速度ボーナス（0.1 = 10%）。攻撃間隔を 1 / (1 + 合計) 倍する
    pub attack_speed:       f32,
    /// クールダウン短縮率。加算せず (1 - x) を乗算で重ねる
    pub cooldown_reduction: f32,
    pub exp_mult:           f32,
    pub pickup_mult:        f32,
    /// 撃破ごとの回復量
    pub kill_heal:          f32,
}

impl StatDelta {
    pub const ZERO: StatDelta = StatDelta {
        max_hp:             0.0,
        damage:             0.0,
        speed:              0.0,
        damage_reduction:   0.0,
        attack_speed:       0.0,
        cooldown_reduction: 0.0,
        exp_mult:           0.0,
        pickup_mult:        0.0,
        kill_heal:          0.0,
    };

    /// 加算系のフィールドだけを `times` 倍して足し込む
    fn add_flat(&mut self, other: &StatDelta, times: f32) {
        self.max_hp           += other.max_hp * times;
        self.damage           += other.damage * times;
        self.speed            += other.speed * times;
        self.damage_reduction += other.damage_reduction * times;
        self.attack_speed     += other.attack_speed * times;
        self.exp_mult         += other.exp_mult * times;
        self.pickup_mult      += other.pickup_mult * times;
        self.kill_heal        += other.kill_heal * times;
    }
}

/// 永続的な基礎ステータス（タレント・レベルアップボーナスが積まれる）
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub max_hp:             f32,
    pub damage:             f32,
    pub speed:              f32,
    pub attack_interval:    f32,
    pub damage_reduction:   f32,
    pub cooldown_reduction: f32,
    pub exp_mult:           f32,
    pub pickup_mult:        f32,
    pub kill_heal:          f32,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            max_hp:             PLAYER_BASE_MAX_HP,
            damage:             PLAYER_BASE_DAMAGE,
            speed:              PLAYER_BASE_SPEED,
            attack_interval:    PLAYER_BASE_ATTACK_INTERVAL,
            damage_reduction:   0.0,
            cooldown_reduction: 0.0,
            exp_mult:           1.0,
            pickup_mult:        1.0,
            kill_heal:          0.0,
        }
    }
}

impl BaseStats {
    /// タレント 1 レベル分などの恒久差分を `times` 回適用する
    pub fn apply_permanent(&mut self, delta: &StatDelta, times: u32) {
        let t = times as f32;
        self.max_hp           += delta.max_hp * t;
        self.damage           += delta.damage * t;
        self.speed            += delta.speed * t;
        self.damage_reduction += delta.damage_reduction * t;
        self.exp_mult         += delta.exp_mult * t;
        self.pickup_mult      += delta.pickup_mult * t;
        self.kill_heal        += delta.kill_heal * t;
        // 攻撃速度は攻撃間隔へ直接反映
        self.attack_interval /= 1.0 + delta.attack_speed * t;
        // 基礎 CDR は 1 - Π(1 - x) で合成
        let keep = (1.0 - self.cooldown_reduction) * (1.0 - delta.cooldown_reduction).max(0.0).powi(times as i32);
        self.cooldown_reduction = 1.0 - keep;
    }
}

/// 戦闘で実際に使う派生ステータス
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub max_hp:           f32,
    pub damage:           f32,
    pub speed:            f32,
    pub attack_interval:  f32,
    pub damage_reduction: f32,
    /// 全クールダウンに掛ける倍率（[MIN_COOLDOWN_MULT, 1.0]）
    pub cooldown_mult:    f32,
    pub exp_mult:         f32,
    pub pickup_mult:      f32,
    pub kill_heal:        f32,
    pub radius:           f32,
}

impl DerivedStats {
    /// 秒間ダメージの推定値（難易度ディレクターの戦力評価用）
    pub fn dps_estimate(&self) -> f32 {
        self.damage / self.attack_interval.max(MIN_ATTACK_INTERVAL)
    }
}

/// レベル由来の攻撃間隔倍率（逓減・下限あり）
pub fn level_attack_interval_mult(level: u32) -> f32 {
    let lv = level.max(1) as f32;
    (1.0 / (1.0 + LEVEL_ATTACK_SPEED_STEP * (lv - 1.0))).max(LEVEL_ATTACK_SPEED_FLOOR)
}

/// 最大 HP から当たり判定半径を導出する（比率は上下限でクランプ）
pub fn player_radius_for(max_hp: f32) -> f32 {
    (PLAYER_BASE_RADIUS * (max_hp.max(1.0) / PLAYER_BASE_MAX_HP).sqrt())
        .clamp(PLAYER_MIN_RADIUS, PLAYER_MAX_RADIUS)
}

/// 派生ステータスの完全再計算。
///
/// 順序: 基礎 → レベル攻撃速度 → パッシブスキル（レベル倍） → アイテム（スタック倍。
/// CDR はスタックごとに乗算） → 全体 CDR → 半径の再導出。
/// スキルは `SkillId::ALL` 順で走査するため、同じ入力なら常にビット単位で同じ結果になる。
pub fn derive_stats(
    base: &BaseStats,
    level: u32,
    skills: &SkillLevels,
    inventory: &[InventorySlot],
) -> DerivedStats {
    let mut flat = StatDelta::ZERO;
    let mut cooldown_keep = (1.0 - base.cooldown_reduction).clamp(0.0, 1.0);

    for id in SkillId::ALL {
        let Some(&lv) = skills.get(&id) else { continue };
        if lv == 0 {
            continue;
        }
        if let SkillKind::Passive(delta) = id.def().kind {
            let lv = lv.min(id.max_level()) as f32;
            flat.add_flat(&delta, lv);
            cooldown_keep *= (1.0 - delta.cooldown_reduction * lv).max(0.0);
        }
    }

    for slot in inventory {
        let bundle = slot.item.def().bundle;
        flat.add_flat(&bundle, slot.stack as f32);
        cooldown_keep *= (1.0 - bundle.cooldown_reduction).max(0.0).powi(slot.stack as i32);
    }

    let cooldown_mult = cooldown_keep.clamp(MIN_COOLDOWN_MULT, 1.0);
    let max_hp = (base.max_hp + flat.max_hp).max(1.0);
    let attack_interval = (base.attack_interval * level_attack_interval_mult(level)
        / (1.0 + flat.attack_speed.max(0.0))
        * cooldown_mult)
        .max(MIN_ATTACK_INTERVAL);

    DerivedStats {
        max_hp,
        damage:           (base.damage + flat.damage).max(0.0),
        speed:            (base.speed + flat.speed).max(0.0),
        attack_interval,
        damage_reduction: (base.damage_reduction + flat.damage_reduction).max(0.0),
        cooldown_mult,
        exp_mult:         (base.exp_mult + flat.exp_mult).max(0.0),
        pickup_mult:      (base.pickup_mult + flat.pickup_mult).max(0.0),
        kill_heal:        (base.kill_heal + flat.kill_heal).max(0.0),
        radius:           player_radius_for(max_hp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemId;
    use proptest::prelude::*;

    #[test]
    fn level_one_defaults_match_starting_loadout() {
        let d = derive_stats(&BaseStats::default(), 1, &SkillLevels::default(), &[]);
        assert!((d.damage - 35.0).abs() < 1e-4);
        assert!((d.attack_interval - 0.55).abs() < 1e-4);
        assert!((d.max_hp - 200.0).abs() < 1e-4);
        assert!((d.radius - PLAYER_BASE_RADIUS).abs() < 1e-4);
        assert!((d.cooldown_mult - 1.0).abs() < 1e-6);
    }

    #[test]
    fn passive_skill_scales_with_level() {
        let mut skills = SkillLevels::default();
        skills.insert(SkillId::Might, 3);
        let d = derive_stats(&BaseStats::default(), 1, &skills, &[]);
        assert!((d.damage - (35.0 + 18.0)).abs() < 1e-4);
    }

    #[test]
    fn item_cooldown_reduction_stacks_multiplicatively() {
        let inv = [InventorySlot { item: ItemId::Hourglass, stack: 2 }];
        let d = derive_stats(&BaseStats::default(), 1, &SkillLevels::default(), &inv);
        assert!((d.cooldown_mult - 0.95 * 0.95).abs() < 1e-5);
    }

    #[test]
    fn cooldown_mult_is_floor_clamped() {
        let inv = [InventorySlot { item: ItemId::Hourglass, stack: 40 }];
        let d = derive_stats(&BaseStats::default(), 1, &SkillLevels::default(), &inv);
        assert!((d.cooldown_mult - MIN_COOLDOWN_MULT).abs() < 1e-6);
    }

    #[test]
    fn level_attack_speed_has_diminishing_floor() {
        assert!((level_attack_interval_mult(1) - 1.0).abs() < 1e-6);
        assert!(level_attack_interval_mult(5) < level_attack_interval_mult(4));
        assert!((level_attack_interval_mult(500) - LEVEL_ATTACK_SPEED_FLOOR).abs() < 1e-6);
    }

    #[test]
    fn radius_is_bounded() {
        assert!((player_radius_for(1.0) - PLAYER_MIN_RADIUS).abs() < 1e-6);
        assert!((player_radius_for(1.0e6) - PLAYER_MAX_RADIUS).abs() < 1e-6);
    }

    #[test]
    fn talent_cooldown_composes_multiplicatively() {
        let mut base = BaseStats::default();
        let delta = StatDelta { cooldown_reduction: 0.1, ..StatDelta::ZERO };
        base.apply_permanent(&delta, 2);
        assert!((base.cooldown_reduction - (1.0 - 0.81)).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn derive_stats_is_idempotent(
            level in 1u32..60,
            might in 0u32..6,
            haste in 0u32..6,
            focus in 0u32..6,
            swords in 0u32..5,
            glasses in 0u32..5,
        ) {
            let mut skills = SkillLevels::default();
            skills.insert(SkillId::Might, might);
            skills.insert(SkillId::Haste, haste);
            skills.insert(SkillId::Focus, focus);
            let mut inv = Vec::new();
            if swords > 0 { inv.push(InventorySlot { item: ItemId::IronSword, stack: swords }); }
            if glasses > 0 { inv.push(InventorySlot { item: ItemId::Hourglass, stack: glasses }); }
            let base = BaseStats::default();
            let a = derive_stats(&base, level, &skills, &inv);
            let b = derive_stats(&base, level, &skills, &inv);
            prop_assert_eq!(a, b);
            prop_assert!(a.max_hp >= 1.0);
            prop_assert!(a.attack_interval >= MIN_ATTACK_INTERVAL);
        }
    }
}
