use crate::world::{AreaZone, GameWorld, TrapTarget, ZoneKind, ZoneTarget};
use game_core::entity_params::MAX_ENEMY_RADIUS;
use game_core::physics::spatial_hash::circles_overlap;

/// 起動タイマーを進め、起動済みの罠は最初に踏んだ対象で爆発させる
pub(crate) fn update_traps(w: &mut GameWorld, dt: f32) {
    let mut buf = std::mem::take(&mut w.query_buf);
    for t in 0..w.traps.len() {
        let trap = &mut w.traps[t];
        if !trap.alive {
            continue;
        }
        trap.arm_timer += dt;
        if !trap.is_armed() {
            continue;
        }
        let (x, y, r) = (trap.x, trap.y, trap.trigger_radius);
        let triggered = match trap.target {
            TrapTarget::Player => circles_overlap(x, y, r, w.player.x, w.player.y, w.player.stats.radius),
            TrapTarget::Enemies => {
                w.spatial.query_nearby_into(x, y, r + MAX_ENEMY_RADIUS, &mut buf);
                buf.iter().any(|&e| {
                    w.enemies.alive[e]
                        && circles_overlap(x, y, r, w.enemies.positions_x[e], w.enemies.positions_y[e], w.enemies.radius[e])
                })
            }
        };
        if triggered {
            detonate(w, t);
        }
    }
    w.query_buf = buf;
}

/// 爆発ゾーンに変換し、プレイヤー対象ならスロウも付与する
fn detonate(w: &mut GameWorld, t: usize) {
    let trap = &mut w.traps[t];
    trap.alive = false;
    let trap = trap.clone();

    let target = match trap.target {
        TrapTarget::Enemies => ZoneTarget::Enemies,
        TrapTarget::Player => ZoneTarget::Player,
    };
    w.zones.push(AreaZone::burst(ZoneKind::Burst, trap.x, trap.y, trap.burst_radius, trap.burst_damage, target));
    if let (TrapTarget::Player, Some(slow)) = (trap.target, trap.slow) {
        w.player.apply_slow(slow.mult, slow.duration);
    }
    log::debug!("trap detonated at ({:.0}, {:.0}) targeting {:?}", trap.x, trap.y, trap.target);
}
