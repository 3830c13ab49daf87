use super::leveling::gain_experience;
use crate::world::{GameWorld, PickupKind};
use game_core::constants::{ORB_DRIFT_SPEED, ORB_MAGNET_RADIUS, PICKUP_RADIUS};
use game_core::util::direction_to;

/// 経験値オーブの吸い寄せと拾得
pub(crate) fn update_pickups(w: &mut GameWorld, dt: f32) {
    let px = w.player.x;
    let py = w.player.y;
    let collect_r = w.player.stats.radius + PICKUP_RADIUS;
    let magnet_r = ORB_MAGNET_RADIUS * w.player.stats.pickup_mult;

    let mut exp = 0.0;
    let mut heal = 0.0;
    let pk = &mut w.pickups;
    for i in 0..pk.len() {
        if !pk.alive[i] {
            continue;
        }
        let (nx, ny, mut dist) = direction_to(pk.positions_x[i], pk.positions_y[i], px, py);
        if pk.kinds[i] == PickupKind::ExpOrb && dist < magnet_r {
            let step = (ORB_DRIFT_SPEED * dt).min(dist);
            pk.positions_x[i] += nx * step;
            pk.positions_y[i] += ny * step;
            dist -= step;
        }
        if dist < collect_r {
            match pk.kinds[i] {
                PickupKind::ExpOrb => exp += pk.value[i],
                PickupKind::Potion => heal += pk.value[i],
            }
            pk.kill(i);
        }
    }

    if heal > 0.0 {
        w.player.heal(heal);
    }
    if exp > 0.0 {
        gain_experience(w, exp);
    }
}
