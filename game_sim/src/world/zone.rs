//! Path: game_sim/src/world/zone.rs
//! Summary: 範囲ダメージゾーン（毒ノヴァ・罠の爆発・ボスのパルス）

use game_core::constants::ZONE_TICK_INTERVAL;
use serde::Serialize;

/// ゾーンが影響する陣営
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneTarget {
    Enemies,
    Player,
    Both,
}

impl ZoneTarget {
    pub fn hits_enemies(self) -> bool {
        matches!(self, Self::Enemies | Self::Both)
    }

    pub fn hits_player(self) -> bool {
        matches!(self, Self::Player | Self::Both)
    }
}

/// 描画・ログ用の種別タグ
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Poison,
    Burst,
    Pulse,
}

/// 範囲ダメージゾーン（データのみ。更新は systems::zones）
#[derive(Clone, Debug, PartialEq)]
pub struct AreaZone {
    pub kind:            ZoneKind,
    pub x:               f32,
    pub y:               f32,
    pub radius:          f32,
    pub duration:        f32,
    pub age:             f32,
    /// 次のダメージティックまでの蓄積時間
    pub tick_acc:        f32,
    pub damage_per_tick: f32,
    pub target:          ZoneTarget,
    pub alive:           bool,
}

impl AreaZone {
    /// 持続ゾーン（0.5 秒ごとにダメージ）
    pub fn lingering(kind: ZoneKind, x: f32, y: f32, radius: f32, duration: f32, damage_per_tick: f32, target: ZoneTarget) -> Self {
        Self {
            kind,
            x,
            y,
            radius,
            duration,
            age: 0.0,
            tick_acc: 0.0,
            damage_per_tick,
            target,
            alive: true,
        }
    }

    /// 次の更新で 1 回だけダメージを与えて消える爆発
    pub fn burst(kind: ZoneKind, x: f32, y: f32, radius: f32, damage: f32, target: ZoneTarget) -> Self {
        Self {
            tick_acc: ZONE_TICK_INTERVAL,
            ..Self::lingering(kind, x, y, radius, 0.0, damage, target)
        }
    }

    /// 時間を進め、この更新で発生したダメージティック数を返す
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.alive {
            return 0;
        }
        self.age += dt;
        self.tick_acc += dt;
        let mut ticks = 0;
        while self.tick_acc >= ZONE_TICK_INTERVAL {
            self.tick_acc -= ZONE_TICK_INTERVAL;
            ticks += 1;
        }
        if self.age >= self.duration {
            self.alive = false;
        }
        ticks
    }
}
