//! Path: game_sim/src/game_logic/systems/combo.rs
//! Summary: コンボカウンターとフレンジー（30 キルごとに 5 秒）

use crate::world::{FrameEvent, GameWorld};
use game_core::constants::{COMBO_DECAY_SECS, FRENZY_DURATION, FRENZY_HEAL_RATIO, FRENZY_KILL_MILESTONE};

pub(crate) fn register_kill(w: &mut GameWorld) {
    let d = &mut w.director;
    d.combo += 1;
    d.combo_timer = COMBO_DECAY_SECS;
    w.frame_events.push(FrameEvent::ComboChanged { count: d.combo });

    if d.combo % FRENZY_KILL_MILESTONE == 0 && !d.frenzy_active() {
        d.frenzy_timer = FRENZY_DURATION;
        w.frame_events.push(FrameEvent::FrenzyChanged { active: true });
        w.player.heal(w.player.stats.max_hp * FRENZY_HEAL_RATIO);
        log::info!("frenzy started at combo {}", d.combo);
    }
}

/// コンボの失効とフレンジー終了
pub(crate) fn update_combo(w: &mut GameWorld, dt: f32) {
    let d = &mut w.director;
    if d.combo_timer > 0.0 {
        d.combo_timer = (d.combo_timer - dt).max(0.0);
        if d.combo_timer <= 0.0 && d.combo > 0 {
            d.combo = 0;
            w.frame_events.push(FrameEvent::ComboChanged { count: 0 });
        }
    }
    if d.frenzy_timer > 0.0 {
        d.frenzy_timer = (d.frenzy_timer - dt).max(0.0);
        if d.frenzy_timer <= 0.0 {
            w.frame_events.push(FrameEvent::FrenzyChanged { active: false });
        }
    }
}
