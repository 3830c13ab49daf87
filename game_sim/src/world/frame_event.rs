//! Path: game_sim/src/world/frame_event.rs
//! Summary: フレーム内で発生したイベント（UI 向け・永続化向け）

use game_core::enemy::EnemyKind;
use game_core::item::{InventorySlot, ItemId};
use game_core::skill::SkillId;
use game_core::talent::TalentId;
use serde::Serialize;

/// フレーム内で発生したイベント。毎フレーム drain される
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FrameEvent {
    EnemyKilled       { kind: EnemyKind, x: f32, y: f32 },
    PlayerDamaged     { damage: f32 },
    LevelUp           { new_level: u32 },
    SkillChoicesReady { choices: Vec<SkillId> },
    BossSpawned       { stage: u32 },
    /// ボスの残り HP 比率 [0, 1]
    BossHpChanged     { ratio: f32 },
    BossDefeated      { stage: u32, loot: ItemId },
    InventoryFull     { item: ItemId, slots: Vec<InventorySlot> },
    ComboChanged      { count: u32 },
    FrenzyChanged     { active: bool },
    WaveChanged       { stage: u32, wave: u32 },
    GameOver          { survival_secs: f32, points_earned: u32 },
    // ─── 永続化コラボレータ向け ───
    CurrencyEarned          { amount: u32 },
    HeirloomUnlocked        { item: ItemId },
    TalentPurchaseRequested { talent: TalentId, cost: u32 },
}

impl FrameEvent {
    /// 永続化側が保存すべきイベントか
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::CurrencyEarned { .. } | Self::HeirloomUnlocked { .. } | Self::TalentPurchaseRequested { .. }
        )
    }
}
