use crate::world::{FrameEvent, GameWorld, PlayerState};
use game_core::constants::{LEVEL_UP_DAMAGE_BONUS, LEVEL_UP_HEAL_RATIO, LEVEL_UP_MAX_HP_BONUS, SKILL_CHOICE_COUNT};
use game_core::physics::rng::SimpleRng;
use game_core::skill::SkillId;
use game_core::util::exp_threshold_for_level;

/// 経験値を加算し、閾値を超えた分だけレベルアップする（経験値倍率込み）
pub fn gain_experience(w: &mut GameWorld, amount: f32) {
    if amount <= 0.0 || !amount.is_finite() {
        return;
    }
    let p = &mut w.player;
    p.exp += amount * p.stats.exp_mult;

    let mut gained = 0;
    while p.exp >= p.exp_to_next as f32 {
        p.exp -= p.exp_to_next as f32;
        p.level += 1;
        p.exp_to_next = exp_threshold_for_level(p.level);
        p.base.max_hp += LEVEL_UP_MAX_HP_BONUS;
        p.base.damage += LEVEL_UP_DAMAGE_BONUS;
        p.recalculate_stats();
        p.heal(p.stats.max_hp * LEVEL_UP_HEAL_RATIO);
        w.frame_events.push(FrameEvent::LevelUp { new_level: p.level });
        log::info!("level up: {} (next at {})", p.level, p.exp_to_next);
        gained += 1;
    }

    if gained > 0 {
        w.pending_level_ups += gained;
        if w.skill_choices.is_empty() {
            offer_next_skill_choices(w);
        }
    }
}

/// 未所持優先 → 低レベル順（同順位は乱数で並べる）、最大レベル到達済みは除外
pub(crate) fn compute_skill_choices(player: &PlayerState, rng: &mut SimpleRng) -> Vec<SkillId> {
    let mut ranked: Vec<(i64, u32, SkillId)> = SkillId::ALL
        .iter()
        .filter_map(|&id| {
            let lv = player.skill_level(id);
            if lv >= id.max_level() {
                return None;
            }
            let sort_key = if lv == 0 { -1 } else { lv as i64 };
            Some((sort_key, rng.next_u32(), id))
        })
        .collect();

    ranked.sort_by_key(|&(k, tie, _)| (k, tie));
    ranked.into_iter().take(SKILL_CHOICE_COUNT).map(|(_, _, id)| id).collect()
}

/// 未消化のレベルアップがあれば次の選択肢を提示する
pub(crate) fn offer_next_skill_choices(w: &mut GameWorld) {
    if w.pending_level_ups == 0 {
        return;
    }
    let choices = compute_skill_choices(&w.player, &mut w.rng);
    if choices.is_empty() {
        // 全スキルが最大レベル
        w.pending_level_ups = 0;
        return;
    }
    w.skill_choices = choices.clone();
    w.frame_events.push(FrameEvent::SkillChoicesReady { choices });
}

/// 提示中の選択肢からスキルを 1 つ上げる。提示されていない ID は false
pub fn choose_skill_upgrade(w: &mut GameWorld, id: SkillId) -> bool {
    if !w.skill_choices.contains(&id) {
        return false;
    }
    let level = {
        let lv = w.player.skills.entry(id).or_insert(0);
        *lv += 1;
        *lv
    };
    if id.is_active() {
        w.player.skill_timers.entry(id).or_insert(0.0);
    }
    w.player.recalculate_stats();
    log::info!("skill upgraded: {} -> lv {level}", id.as_str());

    w.skill_choices.clear();
    w.pending_level_ups = w.pending_level_ups.saturating_sub(1);
    offer_next_skill_choices(w);
    true
}

/// 外部（UI）から文字列キーで選ぶ
pub fn choose_skill_upgrade_key(w: &mut GameWorld, key: &str) -> bool {
    match SkillId::parse(key) {
        Some(id) => choose_skill_upgrade(w, id),
        None => {
            log::warn!("unknown skill id from ui: {key}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::world;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scenario_c_threshold_doubles() {
        let mut w = world();
        assert_eq!(w.player.exp_to_next, 5);
        gain_experience(&mut w, 5.0);
        assert_eq!(w.player.level, 2);
        assert_eq!(w.player.exp, 0.0);
        assert_eq!(w.player.exp_to_next, 10);
        assert_eq!(
            w.frame_events.iter().filter(|e| matches!(e, FrameEvent::LevelUp { .. })).count(),
            1
        );
    }

    #[test]
    fn level_up_grants_flat_bonus_and_heal() {
        let mut w = world();
        w.player.hp = 10.0;
        gain_experience(&mut w, 5.0);
        assert!((w.player.base.max_hp - 210.0).abs() < 1e-4);
        assert!((w.player.base.damage - 37.0).abs() < 1e-4);
        assert!((w.player.hp - 115.0).abs() < 1e-4);
    }

    #[test]
    fn choices_prefer_unowned_and_skip_maxed() {
        let mut w = world();
        for id in SkillId::ALL {
            w.player.skills.insert(id, 1);
        }
        w.player.skills.insert(SkillId::Might, SkillId::Might.max_level());
        w.player.skills.remove(&SkillId::Armor);
        let choices = compute_skill_choices(&w.player, &mut w.rng);
        assert_eq!(choices.len(), SKILL_CHOICE_COUNT);
        assert_eq!(choices[0], SkillId::Armor);
        assert!(!choices.contains(&SkillId::Might));
    }

    #[test]
    fn choosing_consumes_pending_level_ups_in_order() {
        let mut w = world();
        // 5 + 10 で 2 レベル分
        gain_experience(&mut w, 15.0);
        assert_eq!(w.player.level, 3);
        assert_eq!(w.pending_level_ups, 2);
        assert!(w.awaiting_decision());

        let first = w.skill_choices[0];
        assert!(choose_skill_upgrade(&mut w, first));
        assert_eq!(w.player.skill_level(first), 1);
        assert_eq!(w.pending_level_ups, 1);
        assert_eq!(w.skill_choices.len(), SKILL_CHOICE_COUNT);

        let second = w.skill_choices[0];
        assert!(choose_skill_upgrade(&mut w, second));
        assert_eq!(w.pending_level_ups, 0);
        assert!(!w.awaiting_decision());
    }

    #[test]
    fn unoffered_or_unknown_choice_is_ignored() {
        let mut w = world();
        assert!(!choose_skill_upgrade(&mut w, SkillId::Might));
        assert!(!choose_skill_upgrade_key(&mut w, "does_not_exist"));
        assert!(w.player.skills.is_empty());
    }

    proptest! {
        #[test]
        fn residual_experience_stays_below_threshold(amounts in proptest::collection::vec(0.0f32..400.0, 1..20)) {
            let mut w = world();
            for a in amounts {
                let before_threshold = w.player.exp_to_next;
                let before_level = w.player.level;
                gain_experience(&mut w, a);
                prop_assert!(w.player.exp >= 0.0);
                prop_assert!(w.player.exp < w.player.exp_to_next as f32);
                let levels = w.player.level - before_level;
                prop_assert_eq!(w.player.exp_to_next, before_threshold << levels);
            }
        }
    }
}
