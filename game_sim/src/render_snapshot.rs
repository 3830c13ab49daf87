//! Path: game_sim/src/render_snapshot.rs
//! Summary: GameWorld から描画・HUD 用スナップショットを構築
//!
//! レンダラーはスナップショットだけを読む。ワールドを可変で渡すことはない。

use crate::world::{Faction, GameWorld, PickupKind, ProjectileKind, TrapTarget, ZoneKind, ZoneTarget};
use game_core::enemy::EnemyKind;
use game_core::item::{InventorySlot, ItemId};
use game_core::skill::SkillId;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerSprite {
    pub x:       f32,
    pub y:       f32,
    pub radius:  f32,
    pub blinded: bool,
    pub slowed:  bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnemySprite {
    pub x:        f32,
    pub y:        f32,
    pub radius:   f32,
    pub kind:     EnemyKind,
    pub level:    u32,
    pub color:    [f32; 4],
    pub hp_ratio: f32,
    pub stunned:  bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectileSprite {
    pub x:       f32,
    pub y:       f32,
    pub radius:  f32,
    pub faction: Faction,
    pub kind:    ProjectileKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ZoneSprite {
    pub x:      f32,
    pub y:      f32,
    pub radius: f32,
    pub kind:   ZoneKind,
    pub target: ZoneTarget,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrapSprite {
    pub x:      f32,
    pub y:      f32,
    pub radius: f32,
    pub armed:  bool,
    pub target: TrapTarget,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PickupSprite {
    pub x:    f32,
    pub y:    f32,
    pub kind: PickupKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HudData {
    pub hp:            f32,
    pub max_hp:        f32,
    pub level:         u32,
    pub exp:           f32,
    pub exp_to_next:   u32,
    pub stage:         u32,
    pub wave:          u32,
    pub combo:         u32,
    pub frenzy:        bool,
    pub kill_count:    u32,
    pub elapsed_secs:  f32,
    pub run_currency:  u32,
    /// ボス戦中のみ
    pub boss_hp_ratio: Option<f32>,
    /// ID 順
    pub skills:        Vec<(SkillId, u32)>,
    pub inventory:     Vec<InventorySlot>,
    pub skill_choices: Vec<SkillId>,
    pub pending_loot:  Option<ItemId>,
    pub pending_swap:  Option<ItemId>,
    pub paused:        bool,
    pub game_over:     bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub frame_id:    u32,
    pub map_width:   f32,
    pub map_height:  f32,
    pub player:      PlayerSprite,
    pub enemies:     Vec<EnemySprite>,
    pub projectiles: Vec<ProjectileSprite>,
    pub zones:       Vec<ZoneSprite>,
    pub traps:       Vec<TrapSprite>,
    pub pickups:     Vec<PickupSprite>,
    pub hud:         HudData,
}

/// 生存中のエンティティだけをコピーする
pub fn build_snapshot(w: &GameWorld) -> WorldSnapshot {
    let e = &w.enemies;
    let enemies = (0..e.len())
        .filter(|&i| e.alive[i])
        .map(|i| EnemySprite {
            x:        e.positions_x[i],
            y:        e.positions_y[i],
            radius:   e.radius[i],
            kind:     e.kinds[i],
            level:    e.levels[i],
            color:    e.colors[i],
            hp_ratio: (e.hp[i] / e.max_hp[i].max(1.0)).clamp(0.0, 1.0),
            stunned:  e.stun_timer[i] > 0.0,
        })
        .collect();

    let p = &w.projectiles;
    let projectiles = (0..p.len())
        .filter(|&i| p.alive[i])
        .map(|i| ProjectileSprite {
            x:       p.positions_x[i],
            y:       p.positions_y[i],
            radius:  p.radius[i],
            faction: p.faction[i],
            kind:    p.kind[i],
        })
        .collect();

    let zones = w
        .zones
        .iter()
        .filter(|z| z.alive)
        .map(|z| ZoneSprite { x: z.x, y: z.y, radius: z.radius, kind: z.kind, target: z.target })
        .collect();

    let traps = w
        .traps
        .iter()
        .filter(|t| t.alive)
        .map(|t| TrapSprite { x: t.x, y: t.y, radius: t.trigger_radius, armed: t.is_armed(), target: t.target })
        .collect();

    let pk = &w.pickups;
    let pickups = (0..pk.len())
        .filter(|&i| pk.alive[i])
        .map(|i| PickupSprite { x: pk.positions_x[i], y: pk.positions_y[i], kind: pk.kinds[i] })
        .collect();

    let mut skills: Vec<(SkillId, u32)> = w.player.skills.iter().map(|(&id, &lv)| (id, lv)).collect();
    skills.sort_unstable();

    let boss_hp_ratio = w
        .enemies
        .boss_index()
        .map(|i| (e.hp[i] / e.max_hp[i].max(1.0)).clamp(0.0, 1.0));

    WorldSnapshot {
        frame_id: w.frame_id,
        map_width: w.config.map_width,
        map_height: w.config.map_height,
        player: PlayerSprite {
            x:       w.player.x,
            y:       w.player.y,
            radius:  w.player.stats.radius,
            blinded: w.player.blind_timer > 0.0,
            slowed:  w.player.slow_timer > 0.0,
        },
        enemies,
        projectiles,
        zones,
        traps,
        pickups,
        hud: HudData {
            hp:            w.player.hp,
            max_hp:        w.player.stats.max_hp,
            level:         w.player.level,
            exp:           w.player.exp,
            exp_to_next:   w.player.exp_to_next,
            stage:         w.director.stage,
            wave:          w.director.wave,
            combo:         w.director.combo,
            frenzy:        w.director.frenzy_active(),
            kill_count:    w.kill_count,
            elapsed_secs:  w.elapsed_seconds,
            run_currency:  w.run_currency,
            boss_hp_ratio,
            skills,
            inventory:     w.player.inventory.clone(),
            skill_choices: w.skill_choices.clone(),
            pending_loot:  w.pending_loot,
            pending_swap:  w.pending_swap,
            paused:        w.control.is_paused(),
            game_over:     w.game_over,
        },
    }
}
