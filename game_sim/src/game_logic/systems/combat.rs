//! Path: game_sim/src/game_logic/systems/combat.rs
//! Summary: ダメージ適用・撃破処理・接触ダメージ

use super::boss_flow::on_boss_defeated;
use super::combo::register_kill;
use crate::world::{mitigated_damage, FrameEvent, GameWorld, PickupKind};
use game_core::constants::{POTION_DROP_CHANCE, POTION_HEAL_AMOUNT};
use game_core::enemy::EnemyKind;
use game_core::entity_params::MAX_ENEMY_RADIUS;
use game_core::physics::spatial_hash::circles_overlap;

/// プレイヤーへの単発ダメージ（軽減あり）。実ダメージを返す
pub(crate) fn damage_player(w: &mut GameWorld, amount: f32) -> f32 {
    if w.player.is_dead() {
        return 0.0;
    }
    let actual = w.player.take_damage(amount);
    w.frame_events.push(FrameEvent::PlayerDamaged { damage: actual });
    actual
}

/// 敵へダメージを与え、倒れたら撃破処理まで行う
pub(crate) fn damage_enemy(w: &mut GameWorld, i: usize, amount: f32) -> bool {
    if w.enemies.take_damage(i, amount) {
        kill_enemy(w, i);
        return true;
    }
    false
}

/// 撃破: 死亡マーク → イベント → ドロップ → キル回復 → コンボ → ボス撃破フロー
pub(crate) fn kill_enemy(w: &mut GameWorld, i: usize) {
    if !w.enemies.alive[i] {
        return;
    }
    let kind = w.enemies.kinds[i];
    let x = w.enemies.positions_x[i];
    let y = w.enemies.positions_y[i];
    let exp = w.enemies.exp_reward[i];

    w.enemies.kill(i);
    w.kill_count += 1;
    w.frame_events.push(FrameEvent::EnemyKilled { kind, x, y });

    w.pickups.spawn(x, y, PickupKind::ExpOrb, exp as f32);
    if w.rng.chance(POTION_DROP_CHANCE) {
        w.pickups.spawn(x, y, PickupKind::Potion, POTION_HEAL_AMOUNT);
    }
    w.player.heal(w.player.stats.kill_heal);

    register_kill(w);
    if kind == EnemyKind::Boss {
        on_boss_defeated(w);
    }
}

/// 重なっている敵から継続ダメージ（DPS × dt）。1 ティック分を 1 イベントにまとめる
pub(crate) fn apply_contact_damage(w: &mut GameWorld, dt: f32) {
    if w.player.is_dead() || dt <= 0.0 {
        return;
    }
    let px = w.player.x;
    let py = w.player.y;
    let pr = w.player.stats.radius;
    let dr = w.player.stats.damage_reduction;

    let mut buf = std::mem::take(&mut w.query_buf);
    w.spatial.query_nearby_into(px, py, pr + MAX_ENEMY_RADIUS, &mut buf);
    let mut total = 0.0;
    for &e in &buf {
        if !w.enemies.alive[e] {
            continue;
        }
        if circles_overlap(px, py, pr, w.enemies.positions_x[e], w.enemies.positions_y[e], w.enemies.radius[e]) {
            total += mitigated_damage(w.enemies.damage_per_sec[e], dr) * dt;
        }
    }
    w.query_buf = buf;

    if total > 0.0 {
        w.player.hp = (w.player.hp - total).max(0.0);
        w.frame_events.push(FrameEvent::PlayerDamaged { damage: total });
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{spawn_at, world};
    use super::*;

    #[test]
    fn contact_damage_scales_with_dt() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        let e = spawn_at(&mut w, EnemyKind::Basic, px + 5.0, py);
        w.rebuild_spatial();
        let dps = w.enemies.damage_per_sec[e];
        let before = w.player.hp;
        apply_contact_damage(&mut w, 0.1);
        assert!((before - w.player.hp - dps * 0.1).abs() < 1e-3);
        assert_eq!(
            w.frame_events.iter().filter(|e| matches!(e, FrameEvent::PlayerDamaged { .. })).count(),
            1
        );
    }

    #[test]
    fn distant_enemies_deal_no_contact_damage() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        spawn_at(&mut w, EnemyKind::Basic, px + 300.0, py);
        w.rebuild_spatial();
        let before = w.player.hp;
        apply_contact_damage(&mut w, 0.1);
        assert_eq!(w.player.hp, before);
        assert!(w.frame_events.is_empty());
    }

    #[test]
    fn kill_drops_orb_and_counts() {
        let mut w = world();
        let e = spawn_at(&mut w, EnemyKind::Tank, 100.0, 100.0);
        assert!(damage_enemy(&mut w, e, 1.0e6));
        assert!(!w.enemies.alive[e]);
        assert_eq!(w.kill_count, 1);
        assert_eq!(w.director.combo, 1);
        assert!(w.pickups.kinds.contains(&PickupKind::ExpOrb));
        assert!(matches!(w.frame_events[0], FrameEvent::EnemyKilled { kind: EnemyKind::Tank, .. }));
        // 死亡済みの敵へのダメージは何も起こさない
        assert!(!damage_enemy(&mut w, e, 1.0e6));
        assert_eq!(w.kill_count, 1);
    }

    #[test]
    fn kill_heal_applies_on_kill() {
        let mut w = world();
        w.player.base.kill_heal = 4.0;
        w.player.recalculate_stats();
        w.player.hp = 50.0;
        let e = spawn_at(&mut w, EnemyKind::Basic, 100.0, 100.0);
        damage_enemy(&mut w, e, 1.0e6);
        assert!((w.player.hp - 54.0).abs() < 1e-4);
    }

    #[test]
    fn dead_player_takes_no_further_damage() {
        let mut w = world();
        w.player.hp = 0.0;
        assert_eq!(damage_player(&mut w, 50.0), 0.0);
        assert!(w.frame_events.is_empty());
    }
}
