//! Path: game_sim/src/ports.rs
//! Summary: 外部コラボレータとの境界（入力・UI イベント・永続化・描画）と 1 フレーム分の配線
//!
//! コアは入力を読み、イベントを送り出すだけ。UI の応答は `Session` の
//! 再入口（スキル選択・入れ替え・報酬確定）から戻ってくる。

use crate::config::SimConfig;
use crate::game_logic::{
    choose_skill_upgrade, choose_skill_upgrade_key, confirm_loot, drain_frame_events, resolve_inventory_swap, step,
    AddItemOutcome, SimulationClock, SwapChoice,
};
use crate::meta::MetaProgress;
use crate::render_snapshot::{build_snapshot, WorldSnapshot};
use crate::save::{RunSnapshot, SnapshotError};
use crate::world::{FrameEvent, GameWorld};
use game_core::skill::SkillId;

/// 離散キー
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Key {
    Pause,
}

pub trait InputSource {
    /// キーボードとアナログ入力を合成した移動軸（各軸 [-1, 1]）
    fn movement_axis(&self) -> (f32, f32);
    fn is_key_down(&self, key: Key) -> bool;
}

pub trait UiEventSink {
    fn on_event(&mut self, event: &FrameEvent);
}

/// 通貨獲得・家宝解放・タレント購入リクエストを受け取って保存する
pub trait PersistenceSink {
    fn persist(&mut self, event: &FrameEvent);
}

pub trait Renderer {
    fn render(&mut self, snapshot: &WorldSnapshot);
}

/// 1 ランぶんのワールドとクロック
pub struct Session {
    world:      GameWorld,
    clock:      SimulationClock,
    pause_held: bool,
}

impl Session {
    pub fn new(config: SimConfig, meta: &MetaProgress) -> Self {
        let clock = SimulationClock::new(config.max_dt);
        log::info!(
            "run started: seed {} with {} talents and {} heirlooms",
            config.seed,
            meta.talents.len(),
            meta.heirlooms.len()
        );
        Self { world: GameWorld::new(config, meta), clock, pause_held: false }
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn is_over(&self) -> bool {
        self.world.game_over
    }

    /// デルタのクランプ → 入力反映 → ステップ → イベント配送
    pub fn frame(
        &mut self,
        raw_dt: f32,
        input: &impl InputSource,
        ui: &mut impl UiEventSink,
        persistence: &mut impl PersistenceSink,
    ) {
        let dt = self.clock.advance(raw_dt);

        // 押した瞬間だけ切り替える
        let pause_down = input.is_key_down(Key::Pause);
        if pause_down && !self.pause_held {
            self.world.control.toggle();
        }
        self.pause_held = pause_down;

        let (dx, dy) = input.movement_axis();
        self.world.player.input_dx = if dx.is_finite() { dx.clamp(-1.0, 1.0) } else { 0.0 };
        self.world.player.input_dy = if dy.is_finite() { dy.clamp(-1.0, 1.0) } else { 0.0 };

        step(&mut self.world, dt);
        self.dispatch_events(ui, persistence);
    }

    /// 溜まったイベントを UI / 永続化に振り分ける
    pub fn dispatch_events(&mut self, ui: &mut impl UiEventSink, persistence: &mut impl PersistenceSink) {
        for event in drain_frame_events(&mut self.world) {
            if event.is_persistence() {
                persistence.persist(&event);
            } else {
                ui.on_event(&event);
            }
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        build_snapshot(&self.world)
    }

    pub fn render(&self, renderer: &mut impl Renderer) {
        renderer.render(&self.snapshot());
    }

    pub fn pause(&mut self) {
        self.world.control.pause();
    }

    pub fn resume(&mut self) {
        self.world.control.resume();
    }

    pub fn choose_skill_upgrade(&mut self, id: SkillId) -> bool {
        choose_skill_upgrade(&mut self.world, id)
    }

    pub fn choose_skill_upgrade_key(&mut self, key: &str) -> bool {
        choose_skill_upgrade_key(&mut self.world, key)
    }

    pub fn resolve_inventory_swap(&mut self, choice: SwapChoice) -> bool {
        resolve_inventory_swap(&mut self.world, choice)
    }

    pub fn confirm_loot(&mut self) -> Option<AddItemOutcome> {
        confirm_loot(&mut self.world)
    }

    pub fn save(&self) -> Result<Vec<u8>, SnapshotError> {
        RunSnapshot::capture(&self.world).to_bytes()
    }

    pub fn load(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        RunSnapshot::from_bytes(bytes)?.restore_into(&mut self.world);
        Ok(())
    }
}
