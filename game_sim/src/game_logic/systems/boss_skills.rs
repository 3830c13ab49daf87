//! Path: game_sim/src/game_logic/systems/boss_skills.rs
//! Summary: ボス / エリートのスキルローテーションと発動処理
//!
//! ローテーションは敵 SoA を借用したまま回すので、発動内容を `BossAction` として
//! 集めておき、借用が終わってから `execute_boss_action` で反映する。

use crate::world::{
    Aim, AreaZone, BossBrain, Faction, GameWorld, NewProjectile, OnHit, ProjectileKind, SlowPayload, Trap,
    TrapTarget, ZoneKind, ZoneTarget,
};
use game_core::constants::{
    ENEMY_BULLET_RADIUS, ENEMY_BULLET_SPEED, LEGACY_BOOST_DURATION, LEGACY_PULSE_DAMAGE_MULT, LEGACY_PULSE_RADIUS,
    LEGACY_SPECIAL_INTERVAL,
};
use game_core::entity_params::{
    blind_duration, blinding_dart_cooldown, mushroom_trap_cooldown, poison_nova_cooldown, poison_nova_radius,
    poison_nova_tick_damage, split_shot_cooldown, split_shot_spread_pairs, trap_slow_duration,
    ENEMY_SHOT_DAMAGE_MULT, POISON_NOVA_DURATION, SPLIT_SHOT_SPREAD_STEP, TRAP_BURST_RADIUS, TRAP_OFFSET_MAX,
    TRAP_OFFSET_MIN, TRAP_SLOW_MULT,
};
use game_core::physics::rng::SimpleRng;
use game_core::skill::SkillId;
use game_core::util::clamp_to_map;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum BossAction {
    Cast { skill: SkillId, level: u32, x: f32, y: f32, damage_per_sec: f32 },
    /// スキル未設定ボスの範囲攻撃
    Pulse { x: f32, y: f32, damage_per_sec: f32 },
}

/// ボスプールのスキルのみクールダウンを持つ
pub(crate) fn boss_skill_cooldown(skill: SkillId, level: u32) -> Option<f32> {
    match skill {
        SkillId::SplitShot => Some(split_shot_cooldown(level)),
        SkillId::BlindingDart => Some(blinding_dart_cooldown(level)),
        SkillId::MushroomTrap => Some(mushroom_trap_cooldown(level)),
        SkillId::PoisonNova => Some(poison_nova_cooldown(level)),
        _ => None,
    }
}

/// スキルごとの独立タイマーを進め、クールダウンに達したものを発動する
pub(crate) fn tick_rotation(
    brain: &mut BossBrain,
    x: f32,
    y: f32,
    damage_per_sec: f32,
    dt: f32,
    rng: &mut SimpleRng,
    out: &mut Vec<BossAction>,
) {
    if brain.skills.is_empty() {
        brain.legacy_timer += dt;
        if brain.legacy_timer >= LEGACY_SPECIAL_INTERVAL {
            brain.legacy_timer -= LEGACY_SPECIAL_INTERVAL;
            if rng.chance(0.5) {
                out.push(BossAction::Pulse { x, y, damage_per_sec });
            } else {
                brain.boost_timer = LEGACY_BOOST_DURATION;
            }
        }
        return;
    }

    for slot in brain.skills.iter_mut() {
        let Some(cooldown) = boss_skill_cooldown(slot.skill, slot.level) else {
            continue;
        };
        slot.timer += dt;
        if slot.timer >= cooldown {
            slot.timer = 0.0;
            out.push(BossAction::Cast { skill: slot.skill, level: slot.level, x, y, damage_per_sec });
        }
    }
}

fn enemy_shot(x: f32, y: f32, aim: Aim, damage: f32) -> NewProjectile {
    NewProjectile {
        x,
        y,
        aim,
        speed: ENEMY_BULLET_SPEED,
        radius: ENEMY_BULLET_RADIUS,
        damage,
        faction: Faction::Enemy,
        kind: ProjectileKind::Normal,
        on_hit: None,
    }
}

pub(crate) fn execute_boss_action(w: &mut GameWorld, action: BossAction) {
    let px = w.player.x;
    let py = w.player.y;
    match action {
        BossAction::Pulse { x, y, damage_per_sec } => {
            w.zones.push(AreaZone::burst(
                ZoneKind::Pulse,
                x,
                y,
                LEGACY_PULSE_RADIUS,
                damage_per_sec * LEGACY_PULSE_DAMAGE_MULT,
                ZoneTarget::Player,
            ));
            log::debug!("boss pulse at ({x:.0}, {y:.0})");
        }
        BossAction::Cast { skill, level, x, y, damage_per_sec } => {
            let shot_damage = damage_per_sec * ENEMY_SHOT_DAMAGE_MULT;
            match skill {
                SkillId::SplitShot => {
                    w.projectiles.spawn(enemy_shot(x, y, Aim::Target(px, py), shot_damage));
                    let base = (py - y).atan2(px - x);
                    for k in 1..=split_shot_spread_pairs(level) {
                        let offset = SPLIT_SHOT_SPREAD_STEP * k as f32;
                        w.projectiles.spawn(enemy_shot(x, y, Aim::Angle(base + offset), shot_damage));
                        w.projectiles.spawn(enemy_shot(x, y, Aim::Angle(base - offset), shot_damage));
                    }
                }
                SkillId::BlindingDart => {
                    w.projectiles.spawn(NewProjectile {
                        kind: ProjectileKind::Dart,
                        on_hit: Some(OnHit::Blind { duration: blind_duration(level) }),
                        ..enemy_shot(x, y, Aim::Target(px, py), shot_damage)
                    });
                }
                SkillId::MushroomTrap => {
                    let angle = w.rng.next_f32() * std::f32::consts::TAU;
                    let dist = TRAP_OFFSET_MIN + w.rng.next_f32() * (TRAP_OFFSET_MAX - TRAP_OFFSET_MIN);
                    let (tx, ty) = clamp_to_map(
                        px + angle.cos() * dist,
                        py + angle.sin() * dist,
                        0.0,
                        w.config.map_width,
                        w.config.map_height,
                    );
                    w.traps.push(Trap::new(
                        tx,
                        ty,
                        TrapTarget::Player,
                        TRAP_BURST_RADIUS,
                        damage_per_sec,
                        Some(SlowPayload { mult: TRAP_SLOW_MULT, duration: trap_slow_duration(level) }),
                    ));
                }
                SkillId::PoisonNova => {
                    w.zones.push(AreaZone::lingering(
                        ZoneKind::Poison,
                        x,
                        y,
                        poison_nova_radius(level),
                        POISON_NOVA_DURATION,
                        poison_nova_tick_damage(level),
                        ZoneTarget::Player,
                    ));
                }
                _ => return,
            }
            log::debug!("boss cast {} lv {level}", skill.as_str());
        }
    }
}
