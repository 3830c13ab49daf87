//! Path: game_sim/src/game_logic/events.rs
//! Summary: フレームイベントの drain

use crate::world::{FrameEvent, GameWorld};

/// フレームイベントを取り出す（UI / 永続化コラボレータへの配送用）
pub fn drain_frame_events(w: &mut GameWorld) -> Vec<FrameEvent> {
    w.frame_events.drain(..).collect()
}
