//! Path: game_sim/src/game_logic/systems/inventory.rs
//! Summary: アイテム追加（スタック / 挿入 / 満杯）と入れ替え判断

use crate::world::{FrameEvent, GameWorld};
use game_core::item::{InventorySlot, ItemId};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AddItemOutcome {
    Stacked { slot: usize, stack: u32 },
    Inserted { slot: usize },
    /// 入れ替え待ち（`pending_swap` に保持。シミュレーションは止めない）
    InventoryFull,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SwapChoice {
    Replace(usize),
    Discard,
}

pub fn add_item(w: &mut GameWorld, item: ItemId) -> AddItemOutcome {
    let p = &mut w.player;
    if let Some(slot) = p.inventory.iter().position(|s| s.item == item) {
        p.inventory[slot].stack += 1;
        let stack = p.inventory[slot].stack;
        p.recalculate_stats();
        log::debug!("item stacked: {} x{stack}", item.as_str());
        return AddItemOutcome::Stacked { slot, stack };
    }
    if p.inventory.len() < p.inventory_capacity {
        p.inventory.push(InventorySlot { item, stack: 1 });
        p.recalculate_stats();
        log::debug!("item added: {}", item.as_str());
        return AddItemOutcome::Inserted { slot: p.inventory.len() - 1 };
    }
    if w.pending_swap.is_some() {
        log::debug!("item queued behind pending swap: {}", item.as_str());
        w.swap_backlog.push_back(item);
        return AddItemOutcome::InventoryFull;
    }
    w.pending_swap = Some(item);
    w.frame_events.push(FrameEvent::InventoryFull { item, slots: p.inventory.clone() });
    AddItemOutcome::InventoryFull
}

/// 保留中のアイテムでスロットを置き換えるか、捨てる。保留が無い・範囲外なら false
pub fn resolve_inventory_swap(w: &mut GameWorld, choice: SwapChoice) -> bool {
    let Some(item) = w.pending_swap else {
        return false;
    };
    match choice {
        SwapChoice::Discard => {
            log::debug!("item discarded: {}", item.as_str());
        }
        SwapChoice::Replace(slot) => {
            let Some(target) = w.player.inventory.get_mut(slot) else {
                return false;
            };
            log::debug!("item swapped: {} -> {}", target.item.as_str(), item.as_str());
            *target = InventorySlot { item, stack: 1 };
            w.player.recalculate_stats();
        }
    }
    w.pending_swap = None;
    // 待ち行列の次のアイテムを改めて追加する（満杯なら次の入れ替え待ちになる）
    if let Some(next) = w.swap_backlog.pop_front() {
        add_item(w, next);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::super::test_support::world;
    use super::*;

    #[test]
    fn stacking_and_insertion_recompute_stats() {
        let mut w = world();
        let base_damage = w.player.stats.damage;
        assert_eq!(add_item(&mut w, ItemId::IronSword), AddItemOutcome::Inserted { slot: 0 });
        let one = w.player.stats.damage;
        assert!(one > base_damage);
        assert_eq!(add_item(&mut w, ItemId::IronSword), AddItemOutcome::Stacked { slot: 0, stack: 2 });
        assert!(w.player.stats.damage > one);
    }

    #[test]
    fn full_inventory_waits_for_swap() {
        let mut w = world();
        let items: Vec<ItemId> = ItemId::non_heirlooms().collect();
        for &item in items.iter().take(w.player.inventory_capacity) {
            add_item(&mut w, item);
        }
        let extra = items[w.player.inventory_capacity];
        assert_eq!(add_item(&mut w, extra), AddItemOutcome::InventoryFull);
        assert_eq!(w.pending_swap, Some(extra));
        assert!(!w.awaiting_decision());
        assert!(matches!(w.frame_events.last(), Some(FrameEvent::InventoryFull { .. })));

        assert!(!resolve_inventory_swap(&mut w, SwapChoice::Replace(99)));
        assert!(resolve_inventory_swap(&mut w, SwapChoice::Replace(2)));
        assert_eq!(w.player.inventory[2], InventorySlot { item: extra, stack: 1 });
        assert_eq!(w.pending_swap, None);
        assert!(!resolve_inventory_swap(&mut w, SwapChoice::Discard));
    }

    #[test]
    fn discard_keeps_inventory() {
        let mut w = world();
        w.player.inventory_capacity = 1;
        add_item(&mut w, ItemId::Buckler);
        add_item(&mut w, ItemId::Hourglass);
        assert!(resolve_inventory_swap(&mut w, SwapChoice::Discard));
        assert_eq!(w.player.inventory, vec![InventorySlot { item: ItemId::Buckler, stack: 1 }]);
    }

    #[test]
    fn second_full_arrival_waits_its_turn() {
        let mut w = world();
        w.player.inventory_capacity = 1;
        add_item(&mut w, ItemId::Buckler);
        assert_eq!(add_item(&mut w, ItemId::Hourglass), AddItemOutcome::InventoryFull);
        assert_eq!(add_item(&mut w, ItemId::IronSword), AddItemOutcome::InventoryFull);
        assert_eq!(w.pending_swap, Some(ItemId::Hourglass));
        assert_eq!(w.swap_backlog.len(), 1);
        let full_events = w.frame_events.iter().filter(|e| matches!(e, FrameEvent::InventoryFull { .. })).count();
        assert_eq!(full_events, 1);

        assert!(resolve_inventory_swap(&mut w, SwapChoice::Discard));
        assert_eq!(w.pending_swap, Some(ItemId::IronSword));
        assert!(w.swap_backlog.is_empty());
        assert!(matches!(w.frame_events.last(), Some(FrameEvent::InventoryFull { item: ItemId::IronSword, .. })));

        assert!(resolve_inventory_swap(&mut w, SwapChoice::Replace(0)));
        assert_eq!(w.player.inventory, vec![InventorySlot { item: ItemId::IronSword, stack: 1 }]);
        assert_eq!(w.pending_swap, None);
    }
}
