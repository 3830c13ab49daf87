//! Path: game_sim/src/main.rs
//! Summary: ヘッドレス実行（バランス確認用）。円を描く移動入力でランを最後まで回す
//!
//! 使い方: `headless [config.json] [meta.json]`
//! ログは RUST_LOG で制御する（例: `RUST_LOG=info`）。

use game_sim::{
    FrameEvent, InputSource, Key, MetaProgress, PersistenceSink, Session, SimConfig, SwapChoice, UiEventSink,
};
use std::path::Path;

const FRAME_DT: f32 = 1.0 / 60.0;
/// 1 ラン最大 30 分
const MAX_FRAMES: u32 = 60 * 60 * 30;

/// 一定周期で円を描く入力
struct CirclingInput {
    angle: f32,
}

impl InputSource for CirclingInput {
    fn movement_axis(&self) -> (f32, f32) {
        (self.angle.cos(), self.angle.sin())
    }

    fn is_key_down(&self, _key: Key) -> bool {
        false
    }
}

/// UI の代わりに判断待ちを記録しておき、フレーム後に自動で応答する
#[derive(Default)]
struct AutoPilot {
    skill_choice: Option<String>,
    loot_pending: bool,
    swap_pending: bool,
    levels:       u32,
    bosses:       u32,
}

impl UiEventSink for AutoPilot {
    fn on_event(&mut self, event: &FrameEvent) {
        match event {
            FrameEvent::SkillChoicesReady { choices } => {
                self.skill_choice = choices.first().map(|s| s.as_str().to_string());
            }
            FrameEvent::BossDefeated { .. } => {
                self.loot_pending = true;
                self.bosses += 1;
            }
            FrameEvent::InventoryFull { .. } => self.swap_pending = true,
            FrameEvent::LevelUp { .. } => self.levels += 1,
            FrameEvent::WaveChanged { stage, wave } => log::debug!("wave changed: stage {stage} wave {wave}"),
            FrameEvent::GameOver { survival_secs, points_earned } => {
                log::info!("game over event: survived {survival_secs:.1}s, {points_earned} points");
            }
            _ => {}
        }
    }
}

#[derive(Default)]
struct CurrencyLog {
    earned: u32,
}

impl PersistenceSink for CurrencyLog {
    fn persist(&mut self, event: &FrameEvent) {
        match event {
            FrameEvent::CurrencyEarned { amount } => self.earned += amount,
            other => log::debug!("persistence event: {other:?}"),
        }
    }
}

fn load_config(path: Option<&String>) -> SimConfig {
    let Some(path) = path else {
        return SimConfig::default();
    };
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| SimConfig::from_json(&text).map_err(|e| e.to_string()));
    match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("config {path} ignored: {e}");
            SimConfig::default()
        }
    }
}

fn main() {
    let _ = env_logger::Builder::from_default_env().try_init();

    let args: Vec<String> = std::env::args().collect();
    let config = load_config(args.get(1));
    let meta = args
        .get(2)
        .map(|p| MetaProgress::load_or_default(Path::new(p)))
        .unwrap_or_default();

    let mut session = Session::new(config, &meta);
    let mut input = CirclingInput { angle: 0.0 };
    let mut ui = AutoPilot::default();
    let mut store = CurrencyLog::default();

    let mut frames = 0;
    while !session.is_over() && frames < MAX_FRAMES {
        input.angle += 0.6 * FRAME_DT;
        session.frame(FRAME_DT, &input, &mut ui, &mut store);

        if let Some(key) = ui.skill_choice.take() {
            session.choose_skill_upgrade_key(&key);
        }
        if std::mem::take(&mut ui.loot_pending) {
            session.confirm_loot();
        }
        if std::mem::take(&mut ui.swap_pending) {
            session.resolve_inventory_swap(SwapChoice::Discard);
        }
        // 応答で発生したイベント（次の選択肢など）も同じフレームで配送する
        session.dispatch_events(&mut ui, &mut store);
        if let Some(key) = ui.skill_choice.take() {
            session.choose_skill_upgrade_key(&key);
        }
        frames += 1;
    }

    let w = session.world();
    log::info!(
        "headless run finished after {frames} frames ({:.1}s simulated): level {}, stage {} wave {}, {} kills, {} level-ups, {} bosses, {} currency",
        session.clock().total_secs(),
        w.player.level,
        w.director.stage,
        w.director.wave,
        w.kill_count,
        ui.levels,
        ui.bosses,
        store.earned
    );

    match serde_json::to_string_pretty(&session.snapshot().hud) {
        Ok(text) => println!("{text}"),
        Err(e) => log::error!("failed to encode summary: {e}"),
    }
}
