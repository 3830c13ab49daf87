//! Path: game_sim/src/world/director.rs
//! Summary: 難易度ディレクターの状態（ウェーブ・ステージ・スポーン・コンボ/フレンジー・ブループリント）

use game_core::boss::{BossBlueprint, EliteBlueprint};
use game_core::physics::rng::SimpleRng;

#[derive(Clone, Debug)]
pub struct DirectorState {
    pub stage:             u32,
    /// 1 始まり。`WAVES_PER_STAGE` に達するとボス戦
    pub wave:              u32,
    pub wave_timer:        f32,
    pub spawn_timer:       f32,
    pub boss_active:       bool,
    pub bosses_defeated:   u32,
    /// 出現中のボスのスキル構成
    pub current_blueprint: Option<BossBlueprint>,
    /// 撃破済みボスから昇格したエリート用テンプレート
    pub elite_blueprints:  Vec<EliteBlueprint>,
    pub last_boss_ratio:   f32,
    pub combo:             u32,
    pub combo_timer:       f32,
    pub frenzy_timer:      f32,
}

impl Default for DirectorState {
    fn default() -> Self {
        Self {
            stage:             1,
            wave:              1,
            wave_timer:        0.0,
            spawn_timer:       0.0,
            boss_active:       false,
            bosses_defeated:   0,
            current_blueprint: None,
            elite_blueprints:  Vec::new(),
            last_boss_ratio:   1.0,
            combo:             0,
            combo_timer:       0.0,
            frenzy_timer:      0.0,
        }
    }
}

impl DirectorState {
    pub fn frenzy_active(&self) -> bool {
        self.frenzy_timer > 0.0
    }

    /// エリート用ブループリントを 1 つ選ぶ。まだ無ければ None
    pub fn pick_elite_blueprint(&self, rng: &mut SimpleRng) -> Option<EliteBlueprint> {
        if self.elite_blueprints.is_empty() {
            return None;
        }
        let idx = rng.below(self.elite_blueprints.len() as u32) as usize;
        self.elite_blueprints.get(idx).cloned()
    }
}
