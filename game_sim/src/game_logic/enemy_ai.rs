//! Path: game_sim/src/game_logic/enemy_ai.rs
//! Summary: 敵 AI（スタン・近接追跡・遠隔の間合い維持と射撃・ボスのスキルローテーション）と最近接探索

use super::systems::boss_skills::{execute_boss_action, tick_rotation, BossAction};
use crate::world::{Aim, EnemyBehavior, EnemyWorld, Faction, GameWorld, NewProjectile, ProjectileKind};
use game_core::constants::{
    ENEMY_BULLET_RADIUS, ENEMY_BULLET_SPEED, LEGACY_BOOST_MULT, RANGED_FIRE_INTERVAL, RANGED_KEEP_MAX,
    RANGED_KEEP_MIN,
};
use game_core::entity_params::ENEMY_SHOT_DAMAGE_MULT;
use game_core::physics::spatial_hash::SpatialHash;
use game_core::util::{clamp_to_map, direction_to};

/// 二乗距離（sqrt を避ける）
#[inline]
fn dist_sq(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    dx * dx + dy * dy
}

/// 最近接の生存敵インデックスを返す（全探索）
pub fn find_nearest_enemy(enemies: &EnemyWorld, px: f32, py: f32) -> Option<usize> {
    let mut min_dist = f32::MAX;
    let mut nearest  = None;
    for i in 0..enemies.len() {
        if !enemies.alive[i] {
            continue;
        }
        let dist = dist_sq(enemies.positions_x[i], enemies.positions_y[i], px, py);
        if dist < min_dist {
            min_dist = dist;
            nearest  = Some(i);
        }
    }
    nearest
}

/// Spatial Hash を使った範囲内の最近接探索。範囲外なら None
pub(crate) fn find_nearest_enemy_within(
    spatial: &SpatialHash,
    enemies: &EnemyWorld,
    px: f32,
    py: f32,
    range: f32,
    buf: &mut Vec<usize>,
) -> Option<usize> {
    spatial.query_nearby_into(px, py, range, buf);
    let range_sq = range * range;
    let mut min_dist = f32::MAX;
    let mut nearest  = None;
    for &i in buf.iter() {
        if !enemies.alive[i] {
            continue;
        }
        let dist = dist_sq(enemies.positions_x[i], enemies.positions_y[i], px, py);
        if dist <= range_sq && dist < min_dist {
            min_dist = dist;
            nearest  = Some(i);
        }
    }
    nearest
}

/// 全敵の行動を 1 ステップ進める。
/// 発射する弾とボスの発動内容は収集してから、敵の借用が終わった後に反映する。
pub fn update_enemy_ai(w: &mut GameWorld, dt: f32) {
    let px = w.player.x;
    let py = w.player.y;
    let map_w = w.config.map_width;
    let map_h = w.config.map_height;

    let mut shots: Vec<NewProjectile> = Vec::new();
    let mut actions: Vec<BossAction> = Vec::new();

    let enemies = &mut w.enemies;
    let rng = &mut w.rng;
    for i in 0..enemies.len() {
        if !enemies.alive[i] {
            continue;
        }
        if enemies.stun_timer[i] > 0.0 {
            enemies.stun_timer[i] = (enemies.stun_timer[i] - dt).max(0.0);
            continue;
        }

        let ex = enemies.positions_x[i];
        let ey = enemies.positions_y[i];
        let (nx, ny, dist) = direction_to(ex, ey, px, py);
        let dps = enemies.damage_per_sec[i];
        let mut speed = enemies.speeds[i];

        // +1: 接近, -1: 後退, 0: その場
        let heading: f32 = match &mut enemies.behaviors[i] {
            EnemyBehavior::Melee => 1.0,
            EnemyBehavior::Ranged { range, fire_timer } => {
                *fire_timer = (*fire_timer + dt).min(RANGED_FIRE_INTERVAL);
                if dist <= *range && *fire_timer >= RANGED_FIRE_INTERVAL {
                    *fire_timer = 0.0;
                    shots.push(NewProjectile {
                        x: ex,
                        y: ey,
                        aim: Aim::Target(px, py),
                        speed: ENEMY_BULLET_SPEED,
                        radius: ENEMY_BULLET_RADIUS,
                        damage: dps * ENEMY_SHOT_DAMAGE_MULT,
                        faction: Faction::Enemy,
                        kind: ProjectileKind::Normal,
                        on_hit: None,
                    });
                }
                if dist > *range * RANGED_KEEP_MAX {
                    1.0
                } else if dist < *range * RANGED_KEEP_MIN {
                    -1.0
                } else {
                    0.0
                }
            }
            EnemyBehavior::Boss(brain) => {
                if brain.boost_timer > 0.0 {
                    speed *= LEGACY_BOOST_MULT;
                    brain.boost_timer = (brain.boost_timer - dt).max(0.0);
                }
                tick_rotation(brain, ex, ey, dps, dt, rng, &mut actions);
                1.0
            }
        };

        let mut step = speed * dt * heading;
        if heading > 0.0 {
            step = step.min(dist);
        }
        let (x, y) = clamp_to_map(ex + nx * step, ey + ny * step, enemies.radius[i], map_w, map_h);
        enemies.positions_x[i] = x;
        enemies.positions_y[i] = y;
    }

    for shot in shots {
        w.projectiles.spawn(shot);
    }
    for action in actions {
        execute_boss_action(w, action);
    }
}

#[cfg(test)]
mod tests {
    use super::super::systems::test_support::{spawn_at, world};
    use super::*;
    use crate::world::{BossBrain, BossSkillSlot};
    use game_core::enemy::EnemyKind;
    use game_core::skill::SkillId;

    #[test]
    fn melee_chases_the_player() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        let e = spawn_at(&mut w, EnemyKind::Basic, px + 300.0, py);
        update_enemy_ai(&mut w, 0.1);
        assert!(w.enemies.positions_x[e] < px + 300.0);
    }

    #[test]
    fn stunned_enemy_skips_its_turn() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        let e = spawn_at(&mut w, EnemyKind::Basic, px + 300.0, py);
        w.enemies.stun(e, 0.5);
        update_enemy_ai(&mut w, 0.1);
        assert_eq!(w.enemies.positions_x[e], px + 300.0);
        assert!((w.enemies.stun_timer[e] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn ranger_keeps_distance_and_fires() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        let close = spawn_at(&mut w, EnemyKind::Ranger, px + 50.0, py);
        let held = spawn_at(&mut w, EnemyKind::Ranger, px + 220.0, py);
        update_enemy_ai(&mut w, 0.1);
        assert!(w.enemies.positions_x[close] > px + 50.0);
        assert_eq!(w.enemies.positions_x[held], px + 220.0);

        for _ in 0..20 {
            update_enemy_ai(&mut w, 0.1);
        }
        assert!(w.projectiles.count >= 2);
        assert!(w.projectiles.faction.iter().all(|&f| f == Faction::Enemy));
    }

    #[test]
    fn boss_casts_through_rotation() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        let e = spawn_at(&mut w, EnemyKind::Elite, px + 400.0, py);
        w.enemies.behaviors[e] = EnemyBehavior::Boss(BossBrain {
            skills: vec![BossSkillSlot { skill: SkillId::PoisonNova, level: 1, timer: 8.95 }],
            ..BossBrain::default()
        });
        update_enemy_ai(&mut w, 0.1);
        assert_eq!(w.zones.len(), 1);
    }

    #[test]
    fn legacy_boost_expires_after_its_timer() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        let e = spawn_at(&mut w, EnemyKind::Boss, px + 600.0, py);
        w.enemies.behaviors[e] = EnemyBehavior::Boss(BossBrain { boost_timer: 1.0, ..BossBrain::default() });
        let base = w.enemies.speeds[e] * 0.1;

        let x0 = w.enemies.positions_x[e];
        update_enemy_ai(&mut w, 0.1);
        let boosted = x0 - w.enemies.positions_x[e];
        assert!((boosted - base * LEGACY_BOOST_MULT).abs() < 1e-3);

        for _ in 0..11 {
            update_enemy_ai(&mut w, 0.1);
        }
        let EnemyBehavior::Boss(brain) = &w.enemies.behaviors[e] else {
            panic!("boss behavior replaced");
        };
        assert_eq!(brain.boost_timer, 0.0);

        let x1 = w.enemies.positions_x[e];
        update_enemy_ai(&mut w, 0.1);
        assert!((x1 - w.enemies.positions_x[e] - base).abs() < 1e-3);
    }

    #[test]
    fn nearest_within_range() {
        let mut w = world();
        spawn_at(&mut w, EnemyKind::Basic, 100.0, 100.0);
        let near = spawn_at(&mut w, EnemyKind::Basic, 40.0, 40.0);
        w.rebuild_spatial();
        let mut buf = Vec::new();
        assert_eq!(find_nearest_enemy_within(&w.spatial, &w.enemies, 0.0, 0.0, 100.0, &mut buf), Some(near));
        assert_eq!(find_nearest_enemy_within(&w.spatial, &w.enemies, 0.0, 0.0, 20.0, &mut buf), None);
        assert_eq!(find_nearest_enemy(&w.enemies, 0.0, 0.0), Some(near));
    }
}
