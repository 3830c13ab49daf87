//! Path: game_sim/src/world/trap.rs
//! Summary: キノコ罠（設置 1 秒後に起動し、最初に近づいた対象で 1 回だけ爆発）

use game_core::constants::{TRAP_ARM_DELAY, TRAP_TRIGGER_RADIUS};
use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrapTarget {
    Enemies,
    Player,
}

/// 爆発時にプレイヤーへ付与するスロウ
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SlowPayload {
    pub mult:     f32,
    pub duration: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trap {
    pub x:              f32,
    pub y:              f32,
    pub trigger_radius: f32,
    /// 設置からの経過秒。`TRAP_ARM_DELAY` 以上で起動済み
    pub arm_timer:      f32,
    pub target:         TrapTarget,
    pub burst_radius:   f32,
    pub burst_damage:   f32,
    pub slow:           Option<SlowPayload>,
    pub alive:          bool,
}

impl Trap {
    pub fn new(x: f32, y: f32, target: TrapTarget, burst_radius: f32, burst_damage: f32, slow: Option<SlowPayload>) -> Self {
        Self {
            x,
            y,
            trigger_radius: TRAP_TRIGGER_RADIUS,
            arm_timer: 0.0,
            target,
            burst_radius,
            burst_damage,
            slow,
            alive: true,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.arm_timer >= TRAP_ARM_DELAY
    }
}
