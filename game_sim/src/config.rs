//! Path: game_sim/src/config.rs
//! Summary: ラン単位の設定（シード・最大デルタ・マップサイズ・インベントリ容量）

use game_core::constants::{DEFAULT_RNG_SEED, INVENTORY_CAPACITY, MAP_HEIGHT, MAP_WIDTH, MAX_DELTA_SECS};
use serde::{Deserialize, Serialize};

/// 欠けたフィールドは既定値で埋める
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed:               u64,
    /// 1 ステップあたりのデルタ上限（秒）
    pub max_dt:             f32,
    pub map_width:          f32,
    pub map_height:         f32,
    pub inventory_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:               DEFAULT_RNG_SEED,
            max_dt:             MAX_DELTA_SECS,
            map_width:          MAP_WIDTH,
            map_height:         MAP_HEIGHT,
            inventory_capacity: INVENTORY_CAPACITY,
        }
    }
}

impl SimConfig {
    /// 欠けたフィールドは既定値、範囲外の値は既定値に置き換える
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(text).map(Self::validated)
    }

    /// 非有限・0 以下のデルタ上限とマップサイズを既定値に戻す
    pub fn validated(mut self) -> Self {
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            log::warn!("invalid max_dt {} replaced with {MAX_DELTA_SECS}", self.max_dt);
            self.max_dt = MAX_DELTA_SECS;
        }
        if !(self.map_width.is_finite() && self.map_width > 0.0) {
            log::warn!("invalid map_width {} replaced with {MAP_WIDTH}", self.map_width);
            self.map_width = MAP_WIDTH;
        }
        if !(self.map_height.is_finite() && self.map_height > 0.0) {
            log::warn!("invalid map_height {} replaced with {MAP_HEIGHT}", self.map_height);
            self.map_height = MAP_HEIGHT;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = SimConfig::from_json(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.inventory_capacity, INVENTORY_CAPACITY);
        assert!((cfg.max_dt - MAX_DELTA_SECS).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_values_fall_back_to_defaults() {
        let cfg = SimConfig::from_json(r#"{ "max_dt": -0.5, "map_width": 0.0, "map_height": 900.0 }"#).unwrap();
        assert!((cfg.max_dt - MAX_DELTA_SECS).abs() < 1e-6);
        assert!((cfg.map_width - MAP_WIDTH).abs() < 1e-6);
        assert!((cfg.map_height - 900.0).abs() < 1e-6);

        let direct = SimConfig { max_dt: f32::NAN, ..SimConfig::default() }.validated();
        assert!((direct.max_dt - MAX_DELTA_SECS).abs() < 1e-6);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SimConfig::from_json("{ seed: ").is_err());
    }
}
