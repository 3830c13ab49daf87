//! Path: game_sim/src/game_logic/systems/director.rs
//! Summary: 難易度ディレクター（ウェーブ進行・スポーン間隔・バッチ/上限・種別の重み付け）
//!
//! スポーンはウェーブ 1〜9 の間だけ。ウェーブ 10 でボスを出し、
//! ステージ進行はボス撃破（`boss_flow::on_boss_defeated`）で行う。

use super::spawn::{spawn_boss, spawn_enemy};
use crate::world::{FrameEvent, GameWorld};
use game_core::constants::{
    BASIC_WEIGHT, DIFFICULTY_PERIOD, DIFFICULTY_SPEED_SWING, FRENZY_SPAWN_INTERVAL, HARD_PHASE_THRESHOLD,
    MAX_ELITE_WEIGHT, MAX_ENEMY_CAP, MAX_SPAWN_BATCH, MIN_ENEMY_CAP, MIN_SPAWN_BATCH, RANGER_WAVE, RANGER_WEIGHT,
    RUNNER_WAVE, RUNNER_WEIGHT, SPAWN_INTERVAL_EARLY, SPAWN_INTERVAL_LATE, SPAWN_INTERVAL_MID, TANK_WAVE,
    TANK_WEIGHT, WAVES_PER_STAGE, WAVE_DURATION, WEAKNESS_GRACE_WAVE, WEAK_DPS_BONUS, WEAK_DPS_THRESHOLD,
    WEAK_HP_BONUS, WEAK_HP_THRESHOLD, WEAK_SPEED_BONUS, WEAK_SPEED_THRESHOLD,
};
use game_core::enemy::EnemyKind;
use game_core::stats::DerivedStats;

/// 周期 25 秒の sin 波 [-1, 1]
pub fn difficulty_factor(elapsed_secs: f32) -> f32 {
    (std::f32::consts::TAU * elapsed_secs / DIFFICULTY_PERIOD).sin()
}

pub fn base_spawn_interval(wave: u32) -> f32 {
    match wave {
        0..=3 => SPAWN_INTERVAL_EARLY,
        4..=6 => SPAWN_INTERVAL_MID,
        _ => SPAWN_INTERVAL_LATE,
    }
}

/// 難易度係数が高いほど間隔が縮む。フレンジー中は固定の高速間隔
pub fn spawn_interval(wave: u32, difficulty: f32, frenzy: bool) -> f32 {
    if frenzy {
        return FRENZY_SPAWN_INTERVAL;
    }
    base_spawn_interval(wave) * (1.0 - DIFFICULTY_SPEED_SWING * difficulty.clamp(-1.0, 1.0))
}

/// プレイヤー戦力 = level * 2 + dps / 10 + max_hp / 50
pub fn player_power(level: u32, stats: &DerivedStats) -> f32 {
    level as f32 * 2.0 + stats.dps_estimate() / 10.0 + stats.max_hp / 50.0
}

pub fn spawn_batch_size(power: f32) -> u32 {
    (1 + (power.max(0.0) / 10.0) as u32).clamp(MIN_SPAWN_BATCH, MAX_SPAWN_BATCH)
}

pub fn enemy_cap(power: f32) -> usize {
    (MIN_ENEMY_CAP + (power.max(0.0) * 2.0) as usize).clamp(MIN_ENEMY_CAP, MAX_ENEMY_CAP)
}

/// 種別の重み付けに使う入力
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnContext {
    pub wave:             u32,
    pub difficulty:       f32,
    pub frenzy:           bool,
    pub bosses_defeated:  u32,
    pub elite_blueprints: usize,
    pub player_speed:     f32,
    pub player_dps:       f32,
    pub player_max_hp:    f32,
}

impl SpawnContext {
    pub fn from_world(w: &GameWorld) -> Self {
        Self {
            wave:             w.director.wave,
            difficulty:       difficulty_factor(w.elapsed_seconds),
            frenzy:           w.director.frenzy_active(),
            bosses_defeated:  w.director.bosses_defeated,
            elite_blueprints: w.director.elite_blueprints.len(),
            player_speed:     w.player.stats.speed,
            player_dps:       w.player.stats.dps_estimate(),
            player_max_hp:    w.player.stats.max_hp,
        }
    }
}

/// `EnemyKind::SPAWNABLE` と同じ並びの重み
pub fn spawn_weights(ctx: &SpawnContext) -> [u32; 5] {
    let mut weights = [BASIC_WEIGHT, 0, 0, 0, 0];
    if ctx.frenzy {
        weights[1] = RUNNER_WEIGHT;
        return weights;
    }
    if ctx.wave >= RUNNER_WAVE {
        weights[1] = RUNNER_WEIGHT;
    }
    if ctx.wave >= TANK_WAVE {
        weights[2] = TANK_WEIGHT;
    }
    if ctx.wave >= RANGER_WAVE {
        weights[3] = RANGER_WEIGHT;
    }

    // 弱点狙い（ハードフェーズかつ序盤の猶予後のみ）
    if ctx.wave > WEAKNESS_GRACE_WAVE && ctx.difficulty > HARD_PHASE_THRESHOLD {
        if ctx.player_speed < WEAK_SPEED_THRESHOLD {
            weights[1] += WEAK_SPEED_BONUS;
        }
        if ctx.player_dps < WEAK_DPS_THRESHOLD {
            weights[2] += WEAK_DPS_BONUS;
        }
        if ctx.player_max_hp < WEAK_HP_THRESHOLD {
            weights[3] += WEAK_HP_BONUS;
        }
    }

    if ctx.bosses_defeated > 0 && ctx.elite_blueprints > 0 {
        weights[4] = (1 + ctx.elite_blueprints as u32).min(MAX_ELITE_WEIGHT);
    }
    weights
}

/// ウェーブ進行・ボス出現・通常スポーン
pub(crate) fn update_director(w: &mut GameWorld, dt: f32) {
    let d = &mut w.director;
    if !d.boss_active && d.wave < WAVES_PER_STAGE {
        d.wave_timer += dt;
        if d.wave_timer >= WAVE_DURATION {
            d.wave_timer -= WAVE_DURATION;
            d.wave += 1;
            w.frame_events.push(FrameEvent::WaveChanged { stage: d.stage, wave: d.wave });
            log::info!("stage {} wave {}", d.stage, d.wave);
        }
    }

    if w.director.wave >= WAVES_PER_STAGE {
        if !w.director.boss_active && w.enemies.boss_index().is_none() {
            spawn_boss(w);
        }
        return;
    }
    if w.director.boss_active {
        return;
    }

    let ctx = SpawnContext::from_world(w);
    w.director.spawn_timer += dt;
    if w.director.spawn_timer < spawn_interval(ctx.wave, ctx.difficulty, ctx.frenzy) {
        return;
    }
    w.director.spawn_timer = 0.0;

    let power = player_power(w.player.level, &w.player.stats);
    let room = enemy_cap(power).saturating_sub(w.enemies.count);
    let batch = (spawn_batch_size(power) as usize).min(room);
    if batch == 0 {
        return;
    }
    let weights = spawn_weights(&ctx);
    for _ in 0..batch {
        if let Some(idx) = w.rng.pick_weighted(&weights) {
            spawn_enemy(w, EnemyKind::SPAWNABLE[idx]);
        }
    }
}
