use super::combat::{damage_enemy, damage_player};
use crate::world::{Faction, GameWorld, OnHit, ProjectileKind};
use game_core::constants::{DART_STUN_DURATION, PROJECTILE_BOUNDS_MARGIN};
use game_core::entity_params::MAX_ENEMY_RADIUS;
use game_core::physics::spatial_hash::circles_overlap;

/// 移動 → 敵弾 vs プレイヤー → プレイヤー弾 vs 敵（1 発 1 体まで）
pub(crate) fn update_projectiles(w: &mut GameWorld, dt: f32) {
    move_projectiles(w, dt);
    enemy_shots_vs_player(w);
    player_shots_vs_enemies(w);
}

fn move_projectiles(w: &mut GameWorld, dt: f32) {
    let min_x = -PROJECTILE_BOUNDS_MARGIN;
    let min_y = -PROJECTILE_BOUNDS_MARGIN;
    let max_x = w.config.map_width + PROJECTILE_BOUNDS_MARGIN;
    let max_y = w.config.map_height + PROJECTILE_BOUNDS_MARGIN;
    let p = &mut w.projectiles;
    for i in 0..p.len() {
        if !p.alive[i] {
            continue;
        }
        p.positions_x[i] += p.velocities_x[i] * dt;
        p.positions_y[i] += p.velocities_y[i] * dt;
        let (x, y) = (p.positions_x[i], p.positions_y[i]);
        if x < min_x || x > max_x || y < min_y || y > max_y {
            p.kill(i);
        }
    }
}

fn enemy_shots_vs_player(w: &mut GameWorld) {
    let px = w.player.x;
    let py = w.player.y;
    let pr = w.player.stats.radius;
    for i in 0..w.projectiles.len() {
        if !w.projectiles.alive[i] || w.projectiles.faction[i] != Faction::Enemy {
            continue;
        }
        let p = &w.projectiles;
        if !circles_overlap(p.positions_x[i], p.positions_y[i], p.radius[i], px, py, pr) {
            continue;
        }
        let damage = p.damage[i];
        let on_hit = p.on_hit[i];
        w.projectiles.kill(i);
        damage_player(w, damage);
        if let Some(OnHit::Blind { duration }) = on_hit {
            w.player.apply_blind(duration);
        }
    }
}

fn player_shots_vs_enemies(w: &mut GameWorld) {
    let mut buf = std::mem::take(&mut w.query_buf);
    for i in 0..w.projectiles.len() {
        if !w.projectiles.alive[i] || w.projectiles.faction[i] != Faction::Player {
            continue;
        }
        let bx = w.projectiles.positions_x[i];
        let by = w.projectiles.positions_y[i];
        let br = w.projectiles.radius[i];
        w.spatial.query_nearby_into(bx, by, br + MAX_ENEMY_RADIUS, &mut buf);
        let hit = buf.iter().copied().find(|&e| {
            w.enemies.alive[e]
                && circles_overlap(bx, by, br, w.enemies.positions_x[e], w.enemies.positions_y[e], w.enemies.radius[e])
        });
        let Some(e) = hit else {
            continue;
        };
        if w.projectiles.kind[i] == ProjectileKind::Dart {
            w.enemies.stun(e, DART_STUN_DURATION);
        }
        let damage = w.projectiles.damage[i];
        w.projectiles.kill(i);
        damage_enemy(w, e, damage);
    }
    w.query_buf = buf;
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{spawn_at, world};
    use super::*;
    use crate::world::{Aim, FrameEvent, NewProjectile};
    use game_core::enemy::EnemyKind;

    fn shot(x: f32, y: f32, faction: Faction, kind: ProjectileKind, on_hit: Option<OnHit>) -> NewProjectile {
        NewProjectile {
            x,
            y,
            aim: Aim::Angle(0.0),
            speed: 0.0,
            radius: 6.0,
            damage: 12.0,
            faction,
            kind,
            on_hit,
        }
    }

    #[test]
    fn enemy_dart_blinds_and_is_consumed() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        w.projectiles.spawn(shot(px, py, Faction::Enemy, ProjectileKind::Dart, Some(OnHit::Blind { duration: 2.0 })));
        let before = w.player.hp;
        update_projectiles(&mut w, 0.016);
        assert!((before - w.player.hp - 12.0).abs() < 1e-4);
        assert!(w.player.blind_timer > 0.0);
        assert_eq!(w.projectiles.count, 0);
        assert!(matches!(w.frame_events[0], FrameEvent::PlayerDamaged { .. }));
    }

    #[test]
    fn player_shot_hits_only_one_enemy() {
        let mut w = world();
        let a = spawn_at(&mut w, EnemyKind::Tank, 500.0, 500.0);
        let b = spawn_at(&mut w, EnemyKind::Tank, 505.0, 500.0);
        w.rebuild_spatial();
        w.projectiles.spawn(shot(502.0, 500.0, Faction::Player, ProjectileKind::Normal, None));
        update_projectiles(&mut w, 0.016);
        let damaged = [a, b].iter().filter(|&&e| w.enemies.hp[e] < w.enemies.max_hp[e]).count();
        assert_eq!(damaged, 1);
        assert_eq!(w.projectiles.count, 0);
    }

    #[test]
    fn player_dart_stuns() {
        let mut w = world();
        let e = spawn_at(&mut w, EnemyKind::Tank, 500.0, 500.0);
        w.rebuild_spatial();
        w.projectiles.spawn(shot(500.0, 500.0, Faction::Player, ProjectileKind::Dart, None));
        update_projectiles(&mut w, 0.016);
        assert!((w.enemies.stun_timer[e] - DART_STUN_DURATION).abs() < 1e-6);
    }

    #[test]
    fn leaving_the_map_removes_projectiles() {
        let mut w = world();
        w.projectiles.spawn(NewProjectile { speed: 1000.0, ..shot(w.config.map_width, 10.0, Faction::Player, ProjectileKind::Normal, None) });
        update_projectiles(&mut w, 0.1);
        assert_eq!(w.projectiles.count, 0);
    }
}
