use super::combat::{damage_enemy, damage_player};
use crate::world::GameWorld;
use game_core::constants::ZONE_ENEMY_STUN;
use game_core::entity_params::MAX_ENEMY_RADIUS;
use game_core::physics::spatial_hash::circles_overlap;

/// 0.5 秒ごとのダメージティック。敵対象ゾーンは命中した敵を短くスタンさせる
pub(crate) fn update_zones(w: &mut GameWorld, dt: f32) {
    let mut zones = std::mem::take(&mut w.zones);
    let mut buf = std::mem::take(&mut w.query_buf);

    for z in zones.iter_mut() {
        let ticks = z.advance(dt);
        for _ in 0..ticks {
            if z.target.hits_player()
                && circles_overlap(z.x, z.y, z.radius, w.player.x, w.player.y, w.player.stats.radius)
            {
                damage_player(w, z.damage_per_tick);
            }
            if z.target.hits_enemies() {
                w.spatial.query_nearby_into(z.x, z.y, z.radius + MAX_ENEMY_RADIUS, &mut buf);
                for &e in &buf {
                    if !w.enemies.alive[e] {
                        continue;
                    }
                    if circles_overlap(z.x, z.y, z.radius, w.enemies.positions_x[e], w.enemies.positions_y[e], w.enemies.radius[e]) {
                        w.enemies.stun(e, ZONE_ENEMY_STUN);
                        damage_enemy(w, e, z.damage_per_tick);
                    }
                }
            }
        }
    }

    // 更新中に追加されたゾーンは後ろに並べる
    zones.append(&mut w.zones);
    w.zones = zones;
    w.query_buf = buf;
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{spawn_at, world};
    use super::*;
    use crate::world::{AreaZone, ZoneKind, ZoneTarget};
    use game_core::enemy::EnemyKind;

    #[test]
    fn enemy_zone_damages_and_stuns_enemies_only() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        let near = spawn_at(&mut w, EnemyKind::Tank, px + 40.0, py);
        let far = spawn_at(&mut w, EnemyKind::Tank, px + 400.0, py);
        w.rebuild_spatial();
        w.zones.push(AreaZone::lingering(ZoneKind::Poison, px, py, 100.0, 3.0, 10.0, ZoneTarget::Enemies));
        let hp = w.player.hp;

        update_zones(&mut w, 0.25);
        assert_eq!(w.enemies.hp[near], w.enemies.max_hp[near]);
        update_zones(&mut w, 0.25);
        assert!((w.enemies.max_hp[near] - w.enemies.hp[near] - 10.0).abs() < 1e-4);
        assert!(w.enemies.stun_timer[near] > 0.0);
        assert_eq!(w.enemies.hp[far], w.enemies.max_hp[far]);
        assert_eq!(w.player.hp, hp);
    }

    #[test]
    fn player_zone_hits_with_reduction() {
        let mut w = world();
        w.player.base.damage_reduction = 3.0;
        w.player.recalculate_stats();
        let (px, py) = (w.player.x, w.player.y);
        w.zones.push(AreaZone::burst(ZoneKind::Pulse, px, py, 150.0, 20.0, ZoneTarget::Player));
        let hp = w.player.hp;
        update_zones(&mut w, 0.016);
        assert!((hp - w.player.hp - 17.0).abs() < 1e-4);
        assert!(!w.zones[0].alive);
    }

    #[test]
    fn both_zone_hits_player_and_enemies() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        let e = spawn_at(&mut w, EnemyKind::Tank, px + 30.0, py);
        w.rebuild_spatial();
        w.zones.push(AreaZone::burst(ZoneKind::Burst, px, py, 120.0, 12.0, ZoneTarget::Both));
        let hp = w.player.hp;
        update_zones(&mut w, 0.016);
        assert!((hp - w.player.hp - 12.0).abs() < 1e-4);
        assert!((w.enemies.max_hp[e] - w.enemies.hp[e] - 12.0).abs() < 1e-4);
        assert!(w.enemies.stun_timer[e] > 0.0);
    }
}
