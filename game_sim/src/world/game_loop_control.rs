//! Path: game_sim/src/world/game_loop_control.rs
//! Summary: ゲームループ制御（pause/resume）

/// 一時停止中の `step` は何も進めない（全タイマーが止まる）
#[derive(Debug, Default)]
pub struct GameLoopControl {
    paused: bool,
}

impl GameLoopControl {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn pause(&mut self) {
        self.paused = true;
    }
    pub fn resume(&mut self) {
        self.paused = false;
    }
    pub fn toggle(&mut self) {
        self.paused = !self.paused;
    }
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
