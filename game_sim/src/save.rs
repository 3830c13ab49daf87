//! Path: game_sim/src/save.rs
//! Summary: ランの再開用スナップショット（bincode）
//!
//! 保存するのは進行に関わる状態のみ。敵・弾・ゾーン・罠・拾得物は保存せず、
//! 読み込み時にはウェーブ開始時と同じく空の状態から再開する。

use crate::world::GameWorld;
use game_core::boss::EliteBlueprint;
use game_core::item::InventorySlot;
use game_core::physics::rng::SimpleRng;
use game_core::skill::SkillId;
use game_core::stats::BaseStats;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode run snapshot: {0}")]
    Encode(#[source] bincode::Error),
    #[error("failed to decode run snapshot: {0}")]
    Decode(#[source] bincode::Error),
    #[error("unsupported run snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub version:          u32,
    pub player_hp:        f32,
    pub player_x:         f32,
    pub player_y:         f32,
    pub base:             BaseStats,
    pub level:            u32,
    pub exp:              f32,
    pub exp_to_next:      u32,
    /// ID 順
    pub skills:           Vec<(SkillId, u32)>,
    pub inventory:        Vec<InventorySlot>,
    pub stage:            u32,
    pub wave:             u32,
    pub wave_timer:       f32,
    pub bosses_defeated:  u32,
    pub elite_blueprints: Vec<EliteBlueprint>,
    pub elapsed_seconds:  f32,
    pub kill_count:       u32,
    pub run_currency:     u32,
    pub rng_state:        u64,
}

impl RunSnapshot {
    pub fn capture(w: &GameWorld) -> Self {
        let mut skills: Vec<(SkillId, u32)> = w.player.skills.iter().map(|(&id, &lv)| (id, lv)).collect();
        skills.sort_unstable();
        Self {
            version:          SNAPSHOT_VERSION,
            player_hp:        w.player.hp,
            player_x:         w.player.x,
            player_y:         w.player.y,
            base:             w.player.base,
            level:            w.player.level,
            exp:              w.player.exp,
            exp_to_next:      w.player.exp_to_next,
            skills,
            inventory:        w.player.inventory.clone(),
            stage:            w.director.stage,
            wave:             w.director.wave,
            wave_timer:       w.director.wave_timer,
            bosses_defeated:  w.director.bosses_defeated,
            elite_blueprints: w.director.elite_blueprints.clone(),
            elapsed_seconds:  w.elapsed_seconds,
            kill_count:       w.kill_count,
            run_currency:     w.run_currency,
            rng_state:        w.rng.state(),
        }
    }

    /// ワールドへ書き戻す。一時エンティティ・状態異常・タイマーはリセットする
    pub fn restore_into(&self, w: &mut GameWorld) {
        w.clear_transient();

        let p = &mut w.player;
        p.x = self.player_x;
        p.y = self.player_y;
        p.input_dx = 0.0;
        p.input_dy = 0.0;
        p.base = self.base;
        p.level = self.level.max(1);
        p.exp = self.exp.max(0.0);
        p.exp_to_next = self.exp_to_next.max(1);
        p.skills = self.skills.iter().copied().filter(|&(_, lv)| lv > 0).collect();
        p.skill_timers = p.skills.keys().filter(|id| id.is_active()).map(|&id| (id, 0.0)).collect();
        p.attack_timer = 0.0;
        p.inventory = self.inventory.iter().copied().take(p.inventory_capacity).collect();
        p.slow_timer = 0.0;
        p.slow_mult = 1.0;
        p.blind_timer = 0.0;
        p.hp = self.player_hp;
        p.recalculate_stats();

        let d = &mut w.director;
        d.stage = self.stage.max(1);
        d.wave = self.wave.max(1);
        d.wave_timer = self.wave_timer;
        d.spawn_timer = 0.0;
        d.boss_active = false;
        d.current_blueprint = None;
        d.bosses_defeated = self.bosses_defeated;
        d.elite_blueprints = self.elite_blueprints.clone();
        d.last_boss_ratio = 1.0;
        d.combo = 0;
        d.combo_timer = 0.0;
        d.frenzy_timer = 0.0;

        w.elapsed_seconds = self.elapsed_seconds;
        w.kill_count = self.kill_count;
        w.run_currency = self.run_currency;
        w.rng = SimpleRng::new(self.rng_state);
        w.game_over = false;
        log::info!("run restored at stage {} wave {}", d.stage, d.wave);
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes).map_err(SnapshotError::Decode)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion { found: snapshot.version, expected: SNAPSHOT_VERSION });
        }
        Ok(snapshot)
    }
}
