//! Path: game_sim/src/game_logic/clock.rs
//! Summary: フレーム間隔をクランプしてステップ用デルタに変換するクロック

/// 大きな間隔（プロセス停止など）は上限で切り詰める。時間を飛ばすことはしない
#[derive(Debug, Clone)]
pub struct SimulationClock {
    max_dt:      f32,
    total_secs:  f64,
    frame_count: u64,
}

impl SimulationClock {
    pub fn new(max_dt: f32) -> Self {
        Self { max_dt: max_dt.max(0.0), total_secs: 0.0, frame_count: 0 }
    }

    /// 生のフレーム間隔からステップ用デルタを返す（負値・NaN は 0）
    pub fn advance(&mut self, raw_dt: f32) -> f32 {
        let dt = if raw_dt.is_finite() { raw_dt.clamp(0.0, self.max_dt) } else { 0.0 };
        self.total_secs += dt as f64;
        self.frame_count += 1;
        dt
    }

    pub fn total_secs(&self) -> f64 {
        self.total_secs
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
