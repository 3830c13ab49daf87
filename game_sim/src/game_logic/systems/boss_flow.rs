//! Path: game_sim/src/game_logic/systems/boss_flow.rs
//! Summary: ボス撃破フロー（エリート昇格・通貨・報酬候補・ステージ進行）と報酬確定

use super::inventory::{add_item, AddItemOutcome};
use crate::world::{FrameEvent, GameWorld};
use game_core::boss::EliteBlueprint;
use game_core::constants::{BOSS_CURRENCY_PER_STAGE, HEIRLOOM_LOOT_CHANCE};
use game_core::item::ItemId;

/// ボスの残り HP 比率が変わったときだけ通知する
pub(crate) fn report_boss_hp(w: &mut GameWorld) {
    let Some(i) = w.enemies.boss_index() else {
        return;
    };
    let ratio = (w.enemies.hp[i] / w.enemies.max_hp[i].max(1.0)).clamp(0.0, 1.0);
    if (ratio - w.director.last_boss_ratio).abs() > 1e-4 {
        w.director.last_boss_ratio = ratio;
        w.frame_events.push(FrameEvent::BossHpChanged { ratio });
    }
}

pub(crate) fn on_boss_defeated(w: &mut GameWorld) {
    let stage = w.director.stage;
    let d = &mut w.director;
    d.boss_active = false;
    if let Some(bp) = d.current_blueprint.take() {
        d.elite_blueprints.push(EliteBlueprint::from_boss(&bp));
    }
    d.bosses_defeated += 1;
    d.last_boss_ratio = 1.0;
    w.frame_events.push(FrameEvent::BossHpChanged { ratio: 0.0 });

    let currency = BOSS_CURRENCY_PER_STAGE * stage;
    w.run_currency += currency;
    w.frame_events.push(FrameEvent::CurrencyEarned { amount: currency });

    let loot = loot_candidate(w);
    w.pending_loot = Some(loot);
    w.frame_events.push(FrameEvent::BossDefeated { stage, loot });

    let d = &mut w.director;
    d.stage += 1;
    d.wave = 1;
    d.wave_timer = 0.0;
    d.spawn_timer = 0.0;
    w.frame_events.push(FrameEvent::WaveChanged { stage: d.stage, wave: d.wave });
    log::info!("boss defeated on stage {stage}, loot candidate {}", loot.as_str());
}

/// 報酬候補: 20% で未解放かつ未所持の家宝、それ以外は通常アイテムから一様に
pub fn loot_candidate(w: &mut GameWorld) -> ItemId {
    let locked: Vec<ItemId> = ItemId::heirlooms()
        .filter(|i| !w.unlocked_heirlooms.contains(i) && !w.player.inventory.iter().any(|s| s.item == *i))
        .collect();
    if !locked.is_empty() && w.rng.chance(HEIRLOOM_LOOT_CHANCE) {
        return locked[w.rng.below(locked.len() as u32) as usize];
    }
    let common: Vec<ItemId> = ItemId::non_heirlooms().collect();
    common[w.rng.below(common.len() as u32) as usize]
}

/// 保留中の報酬を受け取る。家宝なら解放イベントも出す
pub fn confirm_loot(w: &mut GameWorld) -> Option<AddItemOutcome> {
    let item = w.pending_loot.take()?;
    if item.is_heirloom() && w.unlocked_heirlooms.insert(item) {
        w.frame_events.push(FrameEvent::HeirloomUnlocked { item });
        log::info!("heirloom unlocked: {}", item.as_str());
    }
    Some(add_item(w, item))
}
