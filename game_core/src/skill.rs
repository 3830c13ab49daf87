//! Path: game_core/src/skill.rs
//! Summary: スキル定義（データのみのカタログ）とスキル ID
//!
//! 効果は `StatDelta`（パッシブ）または `ActiveParams`（アクティブ）として
//! データで保持し、適用は `stats::derive_stats` とシミュレーション側の
//! スキル発動処理が ID ベースで解釈する。

use crate::stats::StatDelta;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// スキル ID → 所持レベル（キーは一意・順序は無関係）
pub type SkillLevels = FxHashMap<SkillId, u32>;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SkillId {
    // パッシブ
    Might        = 0,
    Swiftness    = 1,
    Haste        = 2,
    Vitality     = 3,
    Armor        = 4,
    Wisdom       = 5,
    Magnetism    = 6,
    Focus        = 7,
    Vampirism    = 8,
    // アクティブ（ボススキルプールと共通）
    SplitShot    = 9,
    BlindingDart = 10,
    MushroomTrap = 11,
    PoisonNova   = 12,
}

impl SkillId {
    /// カタログ順。集計はこの順で走査して決定論性を保つ
    pub const ALL: [SkillId; 13] = [
        SkillId::Might,
        SkillId::Swiftness,
        SkillId::Haste,
        SkillId::Vitality,
        SkillId::Armor,
        SkillId::Wisdom,
        SkillId::Magnetism,
        SkillId::Focus,
        SkillId::Vampirism,
        SkillId::SplitShot,
        SkillId::BlindingDart,
        SkillId::MushroomTrap,
        SkillId::PoisonNova,
    ];

    /// ボス / エリートが使えるスキル
    pub const BOSS_POOL: [SkillId; 4] = [
        SkillId::SplitShot,
        SkillId::BlindingDart,
        SkillId::MushroomTrap,
        SkillId::PoisonNova,
    ];

    pub fn def(self) -> &'static SkillDef {
        &SKILL_TABLE[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.def().key
    }

    /// 外部入力（UI / セーブ）からの ID 解決。未知の ID は None
    pub fn parse(key: &str) -> Option<Self> {
        SKILL_TABLE.iter().find(|d| d.key == key).map(|d| d.id)
    }

    pub fn max_level(self) -> u32 {
        self.def().max_level
    }

    pub fn is_active(self) -> bool {
        matches!(self.def().kind, SkillKind::Active(_))
    }
}

/// アクティブスキルのレベル別パラメータ
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveParams {
    pub base_cooldown: f32,
    pub cooldown_step: f32,
    pub min_cooldown:  f32,
    /// プレイヤー攻撃力に対する倍率
    pub power:         f32,
    pub power_step:    f32,
}

impl ActiveParams {
    /// レベルが上がるほど短くなる（下限あり）
    pub fn cooldown(&self, level: u32) -> f32 {
        let lv = level.max(1) as f32;
        (self.base_cooldown - self.cooldown_step * (lv - 1.0)).max(self.min_cooldown)
    }

    pub fn power(&self, level: u32) -> f32 {
        let lv = level.max(1) as f32;
        self.power + self.power_step * (lv - 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SkillKind {
    /// 1 レベルあたりのステータス変化
    Passive(StatDelta),
    Active(ActiveParams),
}

#[derive(Clone, Copy, Debug)]
pub struct SkillDef {
    pub id:          SkillId,
    pub key:         &'static str,
    pub name:        &'static str,
    pub description: &'static str,
    pub max_level:   u32,
    pub kind:        SkillKind,
}

const fn passive(delta: StatDelta) -> SkillKind {
    SkillKind::Passive(delta)
}

static SKILL_TABLE: [SkillDef; 13] = [
    SkillDef { id: SkillId::Might,     key: "might",     name: "Might",     description: "+6 damage per level",
               max_level: 5, kind: passive(StatDelta { damage: 6.0, ..StatDelta::ZERO }) },
    SkillDef { id: SkillId::Swiftness, key: "swiftness", name: "Swiftness", description: "+18 move speed per level",
               max_level: 5, kind: passive(StatDelta { speed: 18.0, ..StatDelta::ZERO }) },
    SkillDef { id: SkillId::Haste,     key: "haste",     name: "Haste",     description: "+7% attack speed per level",
               max_level: 5, kind: passive(StatDelta { attack_speed: 0.07, ..StatDelta::ZERO }) },
    SkillDef { id: SkillId::Vitality,  key: "vitality",  name: "Vitality",  description: "+25 max HP per level",
               max_level: 5, kind: passive(StatDelta { max_hp: 25.0, ..StatDelta::ZERO }) },
    SkillDef { id: SkillId::Armor,     key: "armor",     name: "Armor",     description: "+1.5 damage reduction per level",
               max_level: 5, kind: passive(StatDelta { damage_reduction: 1.5, ..StatDelta::ZERO }) },
    SkillDef { id: SkillId::Wisdom,    key: "wisdom",    name: "Wisdom",    description: "+12% experience per level",
               max_level: 5, kind: passive(StatDelta { exp_mult: 0.12, ..StatDelta::ZERO }) },
    SkillDef { id: SkillId::Magnetism, key: "magnetism", name: "Magnetism", description: "+30% pickup radius per level",
               max_level: 5, kind: passive(StatDelta { pickup_mult: 0.3, ..StatDelta::ZERO }) },
    SkillDef { id: SkillId::Focus,     key: "focus",     name: "Focus",     description: "-6% cooldowns per level",
               max_level: 5, kind: passive(StatDelta { cooldown_reduction: 0.06, ..StatDelta::ZERO }) },
    SkillDef { id: SkillId::Vampirism, key: "vampirism", name: "Vampirism", description: "Heal 1 HP per kill per level",
               max_level: 5, kind: passive(StatDelta { kill_heal: 1.0, ..StatDelta::ZERO }) },
    SkillDef { id: SkillId::SplitShot, key: "split_shot", name: "Split Shot",
               description: "Fires a fan of extra bolts at the nearest enemy",
               max_level: 5,
               kind: SkillKind::Active(ActiveParams { base_cooldown: 2.6, cooldown_step: 0.25, min_cooldown: 1.0, power: 0.6, power_step: 0.1 }) },
    SkillDef { id: SkillId::BlindingDart, key: "blinding_dart", name: "Blinding Dart",
               description: "Throws a dart that stuns its target",
               max_level: 5,
               kind: SkillKind::Active(ActiveParams { base_cooldown: 3.5, cooldown_step: 0.35, min_cooldown: 1.5, power: 0.8, power_step: 0.15 }) },
    SkillDef { id: SkillId::MushroomTrap, key: "mushroom_trap", name: "Mushroom Trap",
               description: "Plants a mushroom that bursts when an enemy steps close",
               max_level: 5,
               kind: SkillKind::Active(ActiveParams { base_cooldown: 5.0, cooldown_step: 0.5, min_cooldown: 2.5, power: 1.5, power_step: 0.3 }) },
    SkillDef { id: SkillId::PoisonNova, key: "poison_nova", name: "Poison Nova",
               description: "Releases a poison cloud that damages and staggers enemies",
               max_level: 5,
               kind: SkillKind::Active(ActiveParams { base_cooldown: 7.0, cooldown_step: 0.6, min_cooldown: 3.5, power: 0.3, power_step: 0.08 }) },
];
