//! Path: game_core/src/boss.rs
//! Summary: ボスブループリント（スキル構成テンプレート）とエリートへの継承

use crate::constants::MAX_BOSS_SKILLS;
use crate::physics::rng::SimpleRng;
use crate::skill::{SkillId, SkillLevels};
use serde::{Deserialize, Serialize};

/// ブループリント内のスキル 1 件
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BlueprintSkill {
    pub skill: SkillId,
    pub level: u32,
}

/// ボス出現時に生成するスキル構成
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BossBlueprint {
    pub stage:  u32,
    pub skills: Vec<BlueprintSkill>,
    pub color:  [f32; 4],
}

/// 撃破されたボスから昇格したエリート用テンプレート
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct EliteBlueprint {
    pub skills: Vec<BlueprintSkill>,
    pub color:  [f32; 4],
}

impl EliteBlueprint {
    /// スキル ID とレベルをそのまま引き継ぐ
    pub fn from_boss(boss: &BossBlueprint) -> Self {
        Self {
            skills: boss.skills.clone(),
            color:  boss.color,
        }
    }
}

pub const BOSS_PALETTE: [[f32; 4]; 6] = [
    [0.90, 0.15, 0.45, 1.0],
    [0.20, 0.55, 0.95, 1.0],
    [0.95, 0.80, 0.15, 1.0],
    [0.30, 0.85, 0.55, 1.0],
    [0.75, 0.30, 0.95, 1.0],
    [0.95, 0.45, 0.10, 1.0],
];

/// プレイヤーが所持しているスキルの抽選重み
const OWNED_SKILL_WEIGHT: u32 = 3;

/// ボスのスキル構成を決める。
/// プールから重複なしで 1〜3 個抽選し（所持スキルは重み 3）、
/// レベルは `clamp(stage, 1, min(max_level, 所持レベル + 2))`。
pub fn generate_blueprint(stage: u32, player_skills: &SkillLevels, rng: &mut SimpleRng) -> BossBlueprint {
    let count = (1 + rng.below(MAX_BOSS_SKILLS as u32) as usize).min(SkillId::BOSS_POOL.len());
    let mut pool: Vec<SkillId> = SkillId::BOSS_POOL.to_vec();
    let mut skills = Vec::with_capacity(count);

    while skills.len() < count {
        let weights: Vec<u32> = pool
            .iter()
            .map(|s| if player_skills.get(s).copied().unwrap_or(0) > 0 { OWNED_SKILL_WEIGHT } else { 1 })
            .collect();
        let Some(idx) = rng.pick_weighted(&weights) else { break };
        let skill = pool.remove(idx);
        let owned = player_skills.get(&skill).copied().unwrap_or(0);
        let cap = skill.max_level().min(owned + 2).max(1);
        skills.push(BlueprintSkill { skill, level: stage.clamp(1, cap) });
    }

    let color = BOSS_PALETTE[rng.below(BOSS_PALETTE.len() as u32) as usize];
    BossBlueprint { stage, skills, color }
}
