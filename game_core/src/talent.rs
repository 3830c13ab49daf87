//! Path: game_core/src/talent.rs
//! Summary: タレント定義（永続強化）。購入レベルごとに基礎ステータスへ加算する

use crate::stats::StatDelta;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TalentId {
    Toughness = 0,
    Power     = 1,
    Agility   = 2,
    Scholar   = 3,
    Reach     = 4,
    Guard     = 5,
    Tempo     = 6,
}

impl TalentId {
    pub const ALL: [TalentId; 7] = [
        TalentId::Toughness,
        TalentId::Power,
        TalentId::Agility,
        TalentId::Scholar,
        TalentId::Reach,
        TalentId::Guard,
        TalentId::Tempo,
    ];

    pub fn def(self) -> &'static TalentDef {
        &TALENT_TABLE[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.def().key
    }

    pub fn parse(key: &str) -> Option<Self> {
        TALENT_TABLE.iter().find(|d| d.key == key).map(|d| d.id)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TalentDef {
    pub id:          TalentId,
    pub key:         &'static str,
    pub name:        &'static str,
    pub description: &'static str,
    pub max_level:   u32,
    /// 次レベルの価格 = base_cost * (現在レベル + 1)
    pub base_cost:   u32,
    pub per_level:   StatDelta,
}

impl TalentDef {
    /// `current_level` から 1 段階上げる価格。上限なら None
    pub fn next_cost(&self, current_level: u32) -> Option<u32> {
        if current_level >= self.max_level {
            return None;
        }
        Some(self.base_cost * (current_level + 1))
    }
}

static TALENT_TABLE: [TalentDef; 7] = [
    TalentDef { id: TalentId::Toughness, key: "toughness", name: "Toughness", description: "+20 max HP",
                max_level: 10, base_cost: 5, per_level: StatDelta { max_hp: 20.0, ..StatDelta::ZERO } },
    TalentDef { id: TalentId::Power,     key: "power",     name: "Power",     description: "+3 damage",
                max_level: 10, base_cost: 5, per_level: StatDelta { damage: 3.0, ..StatDelta::ZERO } },
    TalentDef { id: TalentId::Agility,   key: "agility",   name: "Agility",   description: "+10 move speed",
                max_level: 5,  base_cost: 6, per_level: StatDelta { speed: 10.0, ..StatDelta::ZERO } },
    TalentDef { id: TalentId::Scholar,   key: "scholar",   name: "Scholar",   description: "+10% experience",
                max_level: 5,  base_cost: 8, per_level: StatDelta { exp_mult: 0.1, ..StatDelta::ZERO } },
    TalentDef { id: TalentId::Reach,     key: "reach",     name: "Reach",     description: "+15% pickup radius",
                max_level: 5,  base_cost: 4, per_level: StatDelta { pickup_mult: 0.15, ..StatDelta::ZERO } },
    TalentDef { id: TalentId::Guard,     key: "guard",     name: "Guard",     description: "+1 damage reduction",
                max_level: 5,  base_cost: 10, per_level: StatDelta { damage_reduction: 1.0, ..StatDelta::ZERO } },
    TalentDef { id: TalentId::Tempo,     key: "tempo",     name: "Tempo",     description: "-3% cooldowns",
                max_level: 5,  base_cost: 10, per_level: StatDelta { cooldown_reduction: 0.03, ..StatDelta::ZERO } },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for id in TalentId::ALL {
            assert_eq!(TalentId::parse(id.as_str()), Some(id));
        }
        assert_eq!(TalentId::parse("luck"), None);
    }

    #[test]
    fn next_cost_grows_and_stops_at_max() {
        let def = TalentId::Guard.def();
        assert_eq!(def.next_cost(0), Some(10));
        assert_eq!(def.next_cost(2), Some(30));
        assert_eq!(def.next_cost(def.max_level), None);
    }
}
