//! Path: game_core/src/item.rs
//! Summary: 装備アイテム定義（スタックレベルで線形にスケールするステータス束）と家宝フラグ

use crate::stats::StatDelta;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ItemId {
    IronSword      = 0,
    LeatherBoots   = 1,
    HeartAmulet    = 2,
    Buckler        = 3,
    Hourglass      = 4,
    LuckyCoin      = 5,
    LodestoneRing  = 6,
    QuickGloves    = 7,
    BloodChalice   = 8,
    // 家宝（一度入手すると次回以降のランにも持ち越す）
    AncestorBlade  = 9,
    PhoenixFeather = 10,
    ChronoCrest    = 11,
}

impl ItemId {
    pub const ALL: [ItemId; 12] = [
        ItemId::IronSword,
        ItemId::LeatherBoots,
        ItemId::HeartAmulet,
        ItemId::Buckler,
        ItemId::Hourglass,
        ItemId::LuckyCoin,
        ItemId::LodestoneRing,
        ItemId::QuickGloves,
        ItemId::BloodChalice,
        ItemId::AncestorBlade,
        ItemId::PhoenixFeather,
        ItemId::ChronoCrest,
    ];

    pub fn def(self) -> &'static ItemDef {
        &ITEM_TABLE[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.def().key
    }

    pub fn parse(key: &str) -> Option<Self> {
        ITEM_TABLE.iter().find(|d| d.key == key).map(|d| d.id)
    }

    pub fn is_heirloom(self) -> bool {
        self.def().heirloom
    }

    pub fn heirlooms() -> impl Iterator<Item = ItemId> {
        Self::ALL.into_iter().filter(|i| i.is_heirloom())
    }

    pub fn non_heirlooms() -> impl Iterator<Item = ItemId> {
        Self::ALL.into_iter().filter(|i| !i.is_heirloom())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ItemDef {
    pub id:       ItemId,
    pub key:      &'static str,
    pub name:     &'static str,
    /// スタック 1 あたりの効果
    pub bundle:   StatDelta,
    pub heirloom: bool,
}

/// インベントリの 1 スロット
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct InventorySlot {
    pub item:  ItemId,
    pub stack: u32,
}

static ITEM_TABLE: [ItemDef; 12] = [
    ItemDef { id: ItemId::IronSword,      key: "iron_sword",      name: "Iron Sword",
              bundle: StatDelta { damage: 5.0, ..StatDelta::ZERO }, heirloom: false },
    ItemDef { id: ItemId::LeatherBoots,   key: "leather_boots",   name: "Leather Boots",
              bundle: StatDelta { speed: 15.0, ..StatDelta::ZERO }, heirloom: false },
    ItemDef { id: ItemId::HeartAmulet,    key: "heart_amulet",    name: "Heart Amulet",
              bundle: StatDelta { max_hp: 30.0, ..StatDelta::ZERO }, heirloom: false },
    ItemDef { id: ItemId::Buckler,        key: "buckler",         name: "Buckler",
              bundle: StatDelta { damage_reduction: 2.0, ..StatDelta::ZERO }, heirloom: false },
    ItemDef { id: ItemId::Hourglass,      key: "hourglass",       name: "Hourglass",
              bundle: StatDelta { cooldown_reduction: 0.05, ..StatDelta::ZERO }, heirloom: false },
    ItemDef { id: ItemId::LuckyCoin,      key: "lucky_coin",      name: "Lucky Coin",
              bundle: StatDelta { exp_mult: 0.1, ..StatDelta::ZERO }, heirloom: false },
    ItemDef { id: ItemId::LodestoneRing,  key: "lodestone_ring",  name: "Lodestone Ring",
              bundle: StatDelta { pickup_mult: 0.25, ..StatDelta::ZERO }, heirloom: false },
    ItemDef { id: ItemId::QuickGloves,    key: "quick_gloves",    name: "Quick Gloves",
              bundle: StatDelta { attack_speed: 0.06, ..StatDelta::ZERO }, heirloom: false },
    ItemDef { id: ItemId::BloodChalice,   key: "blood_chalice",   name: "Blood Chalice",
              bundle: StatDelta { kill_heal: 0.5, max_hp: 10.0, ..StatDelta::ZERO }, heirloom: false },
    ItemDef { id: ItemId::AncestorBlade,  key: "ancestor_blade",  name: "Ancestor Blade",
              bundle: StatDelta { damage: 10.0, ..StatDelta::ZERO }, heirloom: true },
    ItemDef { id: ItemId::PhoenixFeather, key: "phoenix_feather", name: "Phoenix Feather",
              bundle: StatDelta { max_hp: 50.0, kill_heal: 0.5, ..StatDelta::ZERO }, heirloom: true },
    ItemDef { id: ItemId::ChronoCrest,    key: "chrono_crest",    name: "Chrono Crest",
              bundle: StatDelta { cooldown_reduction: 0.08, attack_speed: 0.05, ..StatDelta::ZERO }, heirloom: true },
];
