use crate::game_logic::enemy_ai::find_nearest_enemy_within;
use crate::world::{Aim, AreaZone, Faction, GameWorld, NewProjectile, ProjectileKind, Trap, TrapTarget, ZoneKind, ZoneTarget};
use game_core::constants::{PLAYER_BULLET_RADIUS, PLAYER_BULLET_SPEED};
use game_core::entity_params::{
    poison_nova_radius, split_shot_spread_pairs, POISON_NOVA_DURATION, SPLIT_SHOT_SPREAD_STEP, TRAP_BURST_RADIUS,
};
use game_core::skill::{SkillId, SkillKind};

/// 自動攻撃とアクティブスキル
pub(crate) fn update_player_attacks(w: &mut GameWorld, dt: f32) {
    auto_attack(w, dt);
    fire_active_skills(w, dt);
}

fn player_shot(w: &GameWorld, aim: Aim, damage: f32, kind: ProjectileKind) -> NewProjectile {
    NewProjectile {
        x: w.player.x,
        y: w.player.y,
        aim,
        speed: PLAYER_BULLET_SPEED,
        radius: PLAYER_BULLET_RADIUS,
        damage,
        faction: Faction::Player,
        kind,
        on_hit: None,
    }
}

/// 索敵範囲内の最近接敵の座標
fn nearest_target(w: &mut GameWorld) -> Option<(f32, f32)> {
    let mut buf = std::mem::take(&mut w.query_buf);
    let found = find_nearest_enemy_within(&w.spatial, &w.enemies, w.player.x, w.player.y, w.player.sight_range(), &mut buf);
    w.query_buf = buf;
    found.map(|i| (w.enemies.positions_x[i], w.enemies.positions_y[i]))
}

fn auto_attack(w: &mut GameWorld, dt: f32) {
    let interval = w.player.stats.attack_interval;
    w.player.attack_timer += dt;
    if w.player.attack_timer < interval {
        return;
    }
    let Some((tx, ty)) = nearest_target(w) else {
        // 標的が現れたら即撃てるよう待機
        w.player.attack_timer = interval;
        return;
    };
    w.player.attack_timer = (w.player.attack_timer - interval).min(interval);
    let shot = player_shot(w, Aim::Target(tx, ty), w.player.stats.damage, ProjectileKind::Normal);
    w.projectiles.spawn(shot);
}

fn fire_active_skills(w: &mut GameWorld, dt: f32) {
    for id in SkillId::ALL {
        let level = w.player.skill_level(id);
        if level == 0 {
            continue;
        }
        let SkillKind::Active(params) = id.def().kind else {
            continue;
        };
        let cooldown = params.cooldown(level) * w.player.stats.cooldown_mult;
        let timer = {
            let t = w.player.skill_timers.entry(id).or_insert(0.0);
            *t = (*t + dt).min(cooldown);
            *t
        };
        if timer < cooldown {
            continue;
        }
        let power = w.player.stats.damage * params.power(level);
        if cast_player_skill(w, id, level, power) {
            w.player.skill_timers.insert(id, 0.0);
            log::debug!("player cast {} lv {level}", id.as_str());
        }
    }
}

/// 発動できたら true（標的が必要なスキルは標的不在だと待機）
fn cast_player_skill(w: &mut GameWorld, id: SkillId, level: u32, power: f32) -> bool {
    let (px, py) = (w.player.x, w.player.y);
    match id {
        SkillId::SplitShot => {
            let Some((tx, ty)) = nearest_target(w) else {
                return false;
            };
            let base = (ty - py).atan2(tx - px);
            let shot = player_shot(w, Aim::Angle(base), power, ProjectileKind::Normal);
            w.projectiles.spawn(shot);
            for k in 1..=split_shot_spread_pairs(level) {
                let offset = SPLIT_SHOT_SPREAD_STEP * k as f32;
                w.projectiles.spawn(NewProjectile { aim: Aim::Angle(base + offset), ..shot });
                w.projectiles.spawn(NewProjectile { aim: Aim::Angle(base - offset), ..shot });
            }
            true
        }
        SkillId::BlindingDart => {
            let Some((tx, ty)) = nearest_target(w) else {
                return false;
            };
            let dart = player_shot(w, Aim::Target(tx, ty), power, ProjectileKind::Dart);
            w.projectiles.spawn(dart);
            true
        }
        SkillId::MushroomTrap => {
            w.traps.push(Trap::new(px, py, TrapTarget::Enemies, TRAP_BURST_RADIUS, power, None));
            true
        }
        SkillId::PoisonNova => {
            w.zones.push(AreaZone::lingering(
                ZoneKind::Poison,
                px,
                py,
                poison_nova_radius(level),
                POISON_NOVA_DURATION,
                power,
                ZoneTarget::Enemies,
            ));
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{spawn_at, world};
    use super::*;
    use game_core::enemy::EnemyKind;

    #[test]
    fn auto_attack_waits_for_a_target() {
        let mut w = world();
        w.rebuild_spatial();
        update_player_attacks(&mut w, 1.0);
        assert!(w.projectiles.is_empty());

        let (px, py) = (w.player.x, w.player.y);
        spawn_at(&mut w, EnemyKind::Basic, px + 200.0, py);
        w.rebuild_spatial();
        update_player_attacks(&mut w, 0.01);
        assert_eq!(w.projectiles.len(), 1);
        assert!(w.projectiles.velocities_x[0] > 0.0);
        assert_eq!(w.projectiles.faction[0], Faction::Player);
    }

    #[test]
    fn blind_shrinks_targeting_range() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        spawn_at(&mut w, EnemyKind::Basic, px + 300.0, py);
        w.rebuild_spatial();
        w.player.apply_blind(5.0);
        update_player_attacks(&mut w, 1.0);
        assert!(w.projectiles.is_empty());
    }

    #[test]
    fn active_skill_fires_on_cooldown() {
        let mut w = world();
        w.player.skills.insert(SkillId::PoisonNova, 1);
        w.rebuild_spatial();
        update_player_attacks(&mut w, 0.1);
        assert!(w.zones.is_empty());
        for _ in 0..200 {
            update_player_attacks(&mut w, 0.1);
        }
        assert!(!w.zones.is_empty());
        assert!(w.zones.iter().all(|z| z.target == ZoneTarget::Enemies));
    }
}
