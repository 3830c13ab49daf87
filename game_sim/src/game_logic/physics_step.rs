//! Path: game_sim/src/game_logic/physics_step.rs
//! Summary: 1 ステップ分のシミュレーション（ディレクター → 移動/AI → 衝突・ダメージ → 拾得 → 刈り取り）

use super::enemy_ai::update_enemy_ai;
use super::systems::boss_flow::report_boss_hp;
use super::systems::combat::apply_contact_damage;
use super::systems::combo::update_combo;
use super::systems::director::update_director;
use super::systems::pickups::update_pickups;
use super::systems::player_attack::update_player_attacks;
use super::systems::projectiles::update_projectiles;
use super::systems::traps::update_traps;
use super::systems::zones::update_zones;
use crate::world::{FrameEvent, GameWorld};
use game_core::constants::{MIN_DIST_EPSILON, SURVIVAL_POINT_SECS};
use game_core::util::clamp_to_map;

/// シミュレーションを 1 ステップ進める。
/// 一時停止中・ゲームオーバー後・スキル選択/報酬確定待ちの間は何も進めない（全タイマーも凍結）。
pub fn step(w: &mut GameWorld, dt: f32) {
    if w.game_over || w.control.is_paused() || w.awaiting_decision() {
        return;
    }
    let dt = if dt.is_finite() { dt.max(0.0).min(w.config.max_dt.max(0.0)) } else { 0.0 };

    log::trace!("step frame={} dt={dt:.4} enemies={}", w.frame_id, w.enemies.count);
    w.frame_id = w.frame_id.wrapping_add(1);
    w.elapsed_seconds += dt;

    update_director(w, dt);
    update_combo(w, dt);

    move_player(w, dt);
    w.player.tick_status(dt);
    update_enemy_ai(w, dt);
    w.rebuild_spatial();

    apply_contact_damage(w, dt);
    update_player_attacks(w, dt);
    update_projectiles(w, dt);
    update_traps(w, dt);
    update_zones(w, dt);
    update_pickups(w, dt);
    report_boss_hp(w);

    if w.player.is_dead() {
        finish_run(w);
    }
    w.prune();
}

/// 入力の大きさ 1 未満はアナログ減速として扱う
fn move_player(w: &mut GameWorld, dt: f32) {
    let dx = w.player.input_dx.clamp(-1.0, 1.0);
    let dy = w.player.input_dy.clamp(-1.0, 1.0);
    let mag = (dx * dx + dy * dy).sqrt();
    if mag < MIN_DIST_EPSILON {
        return;
    }
    let speed = w.player.effective_speed() * mag.min(1.0);
    let (x, y) = clamp_to_map(
        w.player.x + dx / mag * speed * dt,
        w.player.y + dy / mag * speed * dt,
        w.player.stats.radius,
        w.config.map_width,
        w.config.map_height,
    );
    w.player.x = x;
    w.player.y = y;
}

/// ゲームオーバー: 生存ボーナスを加え、獲得ポイントを通知する
fn finish_run(w: &mut GameWorld) {
    w.game_over = true;
    let survival = (w.elapsed_seconds / SURVIVAL_POINT_SECS).floor() as u32;
    if survival > 0 {
        w.run_currency += survival;
        w.frame_events.push(FrameEvent::CurrencyEarned { amount: survival });
    }
    w.frame_events.push(FrameEvent::GameOver {
        survival_secs: w.elapsed_seconds,
        points_earned: w.run_currency,
    });
    log::info!(
        "game over after {:.1}s: level {}, {} kills, {} points",
        w.elapsed_seconds,
        w.player.level,
        w.kill_count,
        w.run_currency
    );
}

#[cfg(test)]
mod tests {
    use super::super::systems::test_support::{spawn_at, world};
    use super::*;
    use game_core::enemy::EnemyKind;

    #[test]
    fn paused_step_freezes_everything() {
        let mut w = world();
        w.player.input_dx = 1.0;
        w.player.apply_slow(0.5, 1.0);
        w.control.pause();
        let x = w.player.x;
        step(&mut w, 0.05);
        assert_eq!(w.player.x, x);
        assert_eq!(w.frame_id, 0);
        assert_eq!(w.player.slow_timer, 1.0);
        w.control.resume();
        step(&mut w, 0.05);
        assert!(w.player.x > x);
        assert!(w.player.slow_timer < 1.0);
    }

    #[test]
    fn large_delta_is_clamped() {
        let mut w = world();
        step(&mut w, 5.0);
        assert!((w.elapsed_seconds - w.config.max_dt).abs() < 1e-6);
        step(&mut w, f32::NAN);
        assert!((w.elapsed_seconds - w.config.max_dt).abs() < 1e-6);
    }

    #[test]
    fn negative_max_dt_never_panics() {
        let cfg = crate::config::SimConfig { max_dt: -0.5, ..crate::config::SimConfig::default() };
        let mut w = GameWorld::new(cfg, &crate::meta::MetaProgress::default());
        assert!(w.config.max_dt > 0.0);
        step(&mut w, 0.016);
        assert!((w.elapsed_seconds - 0.016).abs() < 1e-6);

        // 構築後に書き換えられても step は落ちない
        w.config.max_dt = -0.5;
        step(&mut w, 0.016);
        assert!((w.elapsed_seconds - 0.016).abs() < 1e-6);
        assert_eq!(w.frame_id, 2);
    }

    #[test]
    fn analog_input_moves_slower() {
        let mut full = world();
        full.player.input_dx = 1.0;
        let mut half = world();
        half.player.input_dx = 0.5;
        let x0 = full.player.x;
        step(&mut full, 0.05);
        step(&mut half, 0.05);
        let full_d = full.player.x - x0;
        let half_d = half.player.x - x0;
        assert!((half_d - full_d * 0.5).abs() < 1e-3);
    }

    #[test]
    fn skill_choice_is_modal() {
        let mut w = world();
        w.skill_choices = vec![game_core::skill::SkillId::Might];
        step(&mut w, 0.05);
        assert_eq!(w.frame_id, 0);
    }

    #[test]
    fn death_ends_the_run_with_points() {
        let mut w = world();
        w.elapsed_seconds = 95.0;
        w.run_currency = 10;
        let (px, py) = (w.player.x, w.player.y);
        spawn_at(&mut w, EnemyKind::Tank, px, py);
        w.player.hp = 0.5;
        step(&mut w, 0.1);
        assert!(w.game_over);
        assert_eq!(w.run_currency, 13);
        assert!(w.frame_events.iter().any(|e| matches!(e, FrameEvent::GameOver { points_earned: 13, .. })));
        let frame = w.frame_id;
        step(&mut w, 0.1);
        assert_eq!(w.frame_id, frame);
    }

    #[test]
    fn dead_enemies_are_pruned_at_end_of_step() {
        let mut w = world();
        let e = spawn_at(&mut w, EnemyKind::Basic, 100.0, 100.0);
        w.enemies.kill(e);
        step(&mut w, 0.016);
        assert_eq!(w.enemies.len(), 0);
    }
}
