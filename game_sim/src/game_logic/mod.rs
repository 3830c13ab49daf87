//! Path: game_sim/src/game_logic/mod.rs
//! Summary: 物理ステップ・クロック・敵 AI・各システム・イベント drain

mod clock;
mod enemy_ai;
mod events;
mod physics_step;
pub(crate) mod systems;

pub use clock::SimulationClock;
pub use enemy_ai::{find_nearest_enemy, update_enemy_ai};
pub use events::drain_frame_events;
pub use physics_step::step;
pub use systems::boss_flow::{confirm_loot, loot_candidate};
pub use systems::director::{
    base_spawn_interval, difficulty_factor, enemy_cap, player_power, spawn_batch_size,
    spawn_interval, spawn_weights, SpawnContext,
};
pub use systems::inventory::{add_item, resolve_inventory_swap, AddItemOutcome, SwapChoice};
pub use systems::leveling::{choose_skill_upgrade, choose_skill_upgrade_key, gain_experience};
