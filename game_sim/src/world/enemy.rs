//! Path: game_sim/src/world/enemy.rs
//! Summary: 敵 SoA（EnemyWorld）と種別ごとの行動状態（EnemyBehavior）

use super::retain_by_mask;
use game_core::boss::BlueprintSkill;
use game_core::constants::RANGED_FIRE_INTERVAL;
use game_core::enemy::{EnemyKind, EnemyStats};
use game_core::skill::SkillId;

/// ボス / エリートのスキル 1 枠（独立したクールダウンタイマーを持つ）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossSkillSlot {
    pub skill: SkillId,
    pub level: u32,
    /// 前回発動からの経過秒
    pub timer: f32,
}

/// ボス / エリートの行動状態
#[derive(Clone, Debug, PartialEq, Default)]
pub struct BossBrain {
    /// 空ならレガシー行動（パルス / 加速）にフォールバック
    pub skills:       Vec<BossSkillSlot>,
    pub legacy_timer: f32,
    /// 加速の残り時間。0 になった時点で元の速度に戻る
    pub boost_timer:  f32,
}

impl BossBrain {
    pub fn from_blueprint(skills: &[BlueprintSkill]) -> Self {
        Self {
            skills: skills
                .iter()
                .map(|s| BossSkillSlot { skill: s.skill, level: s.level, timer: 0.0 })
                .collect(),
            legacy_timer: 0.0,
            boost_timer: 0.0,
        }
    }
}

/// 種別ごとの行動。パターンマッチで分岐する
#[derive(Clone, Debug, PartialEq)]
pub enum EnemyBehavior {
    Melee,
    Ranged { range: f32, fire_timer: f32 },
    Boss(BossBrain),
}

impl EnemyBehavior {
    /// 種別の既定行動（ボス系はスキルなしのブレイン）
    pub fn for_kind(kind: EnemyKind) -> Self {
        if kind.is_boss_like() {
            return Self::Boss(BossBrain::default());
        }
        match kind.params().attack_range {
            Some(range) => Self::Ranged { range, fire_timer: RANGED_FIRE_INTERVAL * 0.5 },
            None => Self::Melee,
        }
    }
}

/// 敵 SoA（Structure of Arrays）
///
/// 削除は 2 段階: `kill` で `alive` を落とし、ティック末尾の `prune` で詰める。
/// ティック途中でインデックスが動くことはない。
#[derive(Clone, Default)]
pub struct EnemyWorld {
    pub positions_x:    Vec<f32>,
    pub positions_y:    Vec<f32>,
    pub kinds:          Vec<EnemyKind>,
    pub levels:         Vec<u32>,
    pub hp:             Vec<f32>,
    pub max_hp:         Vec<f32>,
    pub speeds:         Vec<f32>,
    pub damage_per_sec: Vec<f32>,
    pub radius:         Vec<f32>,
    pub exp_reward:     Vec<u32>,
    pub stun_timer:     Vec<f32>,
    pub behaviors:      Vec<EnemyBehavior>,
    pub colors:         Vec<[f32; 4]>,
    pub alive:          Vec<bool>,
    pub count:          usize,
}

impl EnemyWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions_x.is_empty()
    }

    /// 1 体スポーンしてインデックスを返す
    pub fn spawn(
        &mut self,
        x: f32,
        y: f32,
        kind: EnemyKind,
        stats: &EnemyStats,
        behavior: EnemyBehavior,
        color: [f32; 4],
    ) -> usize {
        self.positions_x.push(x);
        self.positions_y.push(y);
        self.kinds.push(kind);
        self.levels.push(stats.level);
        self.hp.push(stats.max_hp);
        self.max_hp.push(stats.max_hp);
        self.speeds.push(stats.speed);
        self.damage_per_sec.push(stats.damage_per_sec);
        self.radius.push(stats.radius);
        self.exp_reward.push(stats.exp_reward);
        self.stun_timer.push(0.0);
        self.behaviors.push(behavior);
        self.colors.push(color);
        self.alive.push(true);
        self.count += 1;
        self.len() - 1
    }

    /// 死亡マークのみ。実際の削除は `prune`
    pub fn kill(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.count = self.count.saturating_sub(1);
        }
    }

    /// ダメージを与え、今回の攻撃で倒れたら true（軽減なし、最低 1）
    pub fn take_damage(&mut self, i: usize, amount: f32) -> bool {
        if !self.alive[i] {
            return false;
        }
        self.hp[i] = (self.hp[i] - amount.max(1.0)).max(0.0);
        self.hp[i] <= 0.0
    }

    pub fn stun(&mut self, i: usize, duration: f32) {
        self.stun_timer[i] = self.stun_timer[i].max(duration);
    }

    /// 生存中のボスのインデックス
    pub fn boss_index(&self) -> Option<usize> {
        (0..self.len()).find(|&i| self.alive[i] && self.kinds[i] == EnemyKind::Boss)
    }

    /// 死亡済みの敵を取り除いて詰める
    pub fn prune(&mut self) {
        if self.count == self.len() {
            return;
        }
        let keep = std::mem::take(&mut self.alive);
        retain_by_mask(&mut self.positions_x, &keep);
        retain_by_mask(&mut self.positions_y, &keep);
        retain_by_mask(&mut self.kinds, &keep);
        retain_by_mask(&mut self.levels, &keep);
        retain_by_mask(&mut self.hp, &keep);
        retain_by_mask(&mut self.max_hp, &keep);
        retain_by_mask(&mut self.speeds, &keep);
        retain_by_mask(&mut self.damage_per_sec, &keep);
        retain_by_mask(&mut self.radius, &keep);
        retain_by_mask(&mut self.exp_reward, &keep);
        retain_by_mask(&mut self.stun_timer, &keep);
        retain_by_mask(&mut self.behaviors, &keep);
        retain_by_mask(&mut self.colors, &keep);
        self.alive = vec![true; self.positions_x.len()];
        self.count = self.alive.len();
    }
}
