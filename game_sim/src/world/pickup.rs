//! Path: game_sim/src/world/pickup.rs
//! Summary: フィールド上の拾得物 SoA（回復ポーション・経験値オーブ）

use super::retain_by_mask;
use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupKind {
    /// 接触で `value` 回復
    Potion,
    /// 磁力範囲内でプレイヤーへ寄っていき、接触で `value` の経験値
    ExpOrb,
}

#[derive(Default)]
pub struct PickupWorld {
    pub positions_x: Vec<f32>,
    pub positions_y: Vec<f32>,
    pub kinds:       Vec<PickupKind>,
    pub value:       Vec<f32>,
    pub alive:       Vec<bool>,
    pub count:       usize,
}

impl PickupWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions_x.is_empty()
    }

    pub fn spawn(&mut self, x: f32, y: f32, kind: PickupKind, value: f32) {
        self.positions_x.push(x);
        self.positions_y.push(y);
        self.kinds.push(kind);
        self.value.push(value);
        self.alive.push(true);
        self.count += 1;
    }

    pub fn kill(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.count = self.count.saturating_sub(1);
        }
    }

    pub fn prune(&mut self) {
        if self.count == self.len() {
            return;
        }
        let keep = std::mem::take(&mut self.alive);
        retain_by_mask(&mut self.positions_x, &keep);
        retain_by_mask(&mut self.positions_y, &keep);
        retain_by_mask(&mut self.kinds, &keep);
        retain_by_mask(&mut self.value, &keep);
        self.alive = vec![true; self.positions_x.len()];
        self.count = self.alive.len();
    }
}
