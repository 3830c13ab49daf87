//! Path: game_sim/src/world/player.rs
//! Summary: プレイヤー状態（座標・入力・HP・成長・スキル・インベントリ・状態異常タイマー）

use game_core::constants::{BLIND_SIGHT_RANGE, PLAYER_ATTACK_RANGE};
use game_core::item::InventorySlot;
use game_core::skill::{SkillId, SkillLevels};
use game_core::stats::{derive_stats, BaseStats, DerivedStats};
use game_core::util::exp_threshold_for_level;
use rustc_hash::FxHashMap;

/// ダメージ軽減込みの実ダメージ。チップダメージは必ず 1 以上通る
#[inline]
pub fn mitigated_damage(amount: f32, damage_reduction: f32) -> f32 {
    (amount - damage_reduction).max(1.0)
}

/// プレイヤー状態
pub struct PlayerState {
    /// 中心座標
    pub x:                  f32,
    pub y:                  f32,
    /// 移動入力（各軸 [-1, 1]、大きさ 1 未満はアナログ減速）
    pub input_dx:           f32,
    pub input_dy:           f32,
    pub hp:                 f32,
    /// タレント・レベルアップで積まれる恒久ステータス
    pub base:               BaseStats,
    /// base + スキル + アイテムからの再計算結果
    pub stats:              DerivedStats,
    pub level:              u32,
    pub exp:                f32,
    pub exp_to_next:        u32,
    pub skills:             SkillLevels,
    /// アクティブスキルの経過タイマー（クールダウンに達したら発動）
    pub skill_timers:       FxHashMap<SkillId, f32>,
    pub attack_timer:       f32,
    pub inventory:          Vec<InventorySlot>,
    pub inventory_capacity: usize,
    pub slow_timer:         f32,
    pub slow_mult:          f32,
    pub blind_timer:        f32,
}

impl PlayerState {
    pub fn new(base: BaseStats, x: f32, y: f32, inventory_capacity: usize) -> Self {
        let skills = SkillLevels::default();
        let stats = derive_stats(&base, 1, &skills, &[]);
        Self {
            x,
            y,
            input_dx: 0.0,
            input_dy: 0.0,
            hp: stats.max_hp,
            base,
            stats,
            level: 1,
            exp: 0.0,
            exp_to_next: exp_threshold_for_level(1),
            skills,
            skill_timers: FxHashMap::default(),
            attack_timer: 0.0,
            inventory: Vec::with_capacity(inventory_capacity),
            inventory_capacity,
            slow_timer: 0.0,
            slow_mult: 1.0,
            blind_timer: 0.0,
        }
    }

    /// 派生ステータスを丸ごと再計算し、HP を新しい上限に収める
    pub fn recalculate_stats(&mut self) {
        self.stats = derive_stats(&self.base, self.level, &self.skills, &self.inventory);
        self.hp = self.hp.clamp(0.0, self.stats.max_hp);
    }

    /// 軽減後の実ダメージを返す
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = mitigated_damage(amount, self.stats.damage_reduction);
        self.hp = (self.hp - actual).max(0.0);
        actual
    }

    pub fn heal(&mut self, amount: f32) {
        if amount > 0.0 {
            self.hp = (self.hp + amount).min(self.stats.max_hp);
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    pub fn skill_level(&self, id: SkillId) -> u32 {
        self.skills.get(&id).copied().unwrap_or(0)
    }

    /// スロウ込みの移動速度
    pub fn effective_speed(&self) -> f32 {
        if self.slow_timer > 0.0 {
            self.stats.speed * self.slow_mult
        } else {
            self.stats.speed
        }
    }

    /// 自動攻撃の索敵範囲（盲目中は縮む）
    pub fn sight_range(&self) -> f32 {
        if self.blind_timer > 0.0 {
            BLIND_SIGHT_RANGE.min(PLAYER_ATTACK_RANGE)
        } else {
            PLAYER_ATTACK_RANGE
        }
    }

    pub fn apply_slow(&mut self, mult: f32, duration: f32) {
        self.slow_mult = mult.clamp(0.0, 1.0);
        self.slow_timer = self.slow_timer.max(duration);
    }

    pub fn apply_blind(&mut self, duration: f32) {
        self.blind_timer = self.blind_timer.max(duration);
    }

    /// 状態異常タイマーを進める
    pub fn tick_status(&mut self, dt: f32) {
        if self.slow_timer > 0.0 {
            self.slow_timer = (self.slow_timer - dt).max(0.0);
            if self.slow_timer <= 0.0 {
                self.slow_mult = 1.0;
            }
        }
        if self.blind_timer > 0.0 {
            self.blind_timer = (self.blind_timer - dt).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fresh() -> PlayerState {
        PlayerState::new(BaseStats::default(), 100.0, 100.0, 6)
    }

    #[test]
    fn scenario_a_raw_damage_without_reduction() {
        let mut p = fresh();
        assert!((p.stats.damage - 35.0).abs() < 1e-4);
        assert!((p.stats.attack_interval - 0.55).abs() < 1e-4);
        assert!((p.stats.max_hp - 200.0).abs() < 1e-4);
        let before = p.hp;
        p.take_damage(10.0);
        assert!((before - p.hp - 10.0).abs() < 1e-4);
    }

    #[test]
    fn scenario_b_chip_damage_always_lands() {
        let mut p = fresh();
        p.base.damage_reduction = 5.0;
        p.recalculate_stats();
        let dealt = p.take_damage(3.0);
        assert!((dealt - 1.0).abs() < 1e-6);
    }

    #[test]
    fn hp_clamps_to_new_max_on_recalculate() {
        let mut p = fresh();
        p.base.max_hp = 50.0;
        p.recalculate_stats();
        assert!((p.hp - 50.0).abs() < 1e-4);
    }

    #[test]
    fn slow_reverts_when_timer_expires() {
        let mut p = fresh();
        p.apply_slow(0.5, 1.0);
        assert!((p.effective_speed() - p.stats.speed * 0.5).abs() < 1e-4);
        p.tick_status(0.6);
        p.tick_status(0.6);
        assert!((p.effective_speed() - p.stats.speed).abs() < 1e-4);
    }

    #[test]
    fn blind_shrinks_sight() {
        let mut p = fresh();
        assert!((p.sight_range() - PLAYER_ATTACK_RANGE).abs() < 1e-4);
        p.apply_blind(2.0);
        assert!((p.sight_range() - BLIND_SIGHT_RANGE).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn take_damage_matches_formula(
            hp in 0.0f32..400.0,
            amount in 0.0f32..300.0,
            dr in 0.0f32..50.0,
        ) {
            let mut p = fresh();
            p.base.damage_reduction = dr;
            p.base.max_hp = 400.0;
            p.recalculate_stats();
            p.hp = hp;
            p.take_damage(amount);
            let expected = (hp - (amount - dr).max(1.0)).max(0.0);
            prop_assert!((p.hp - expected).abs() < 1e-3);
            prop_assert!(p.hp >= 0.0);
        }
    }
}
