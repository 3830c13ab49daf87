//! Path: game_sim/src/lib.rs
//! Summary: モジュール宣言・pub use のみ

pub use game_core::enemy::EnemyKind;
pub use game_core::item::ItemId;
pub use game_core::skill::SkillId;
pub use game_core::talent::TalentId;

pub mod config;
mod game_logic;
pub mod meta;
pub mod ports;
pub mod render_snapshot;
pub mod save;
mod world;

pub use config::SimConfig;
pub use game_logic::{
    add_item, base_spawn_interval, choose_skill_upgrade, choose_skill_upgrade_key, confirm_loot, difficulty_factor,
    drain_frame_events, enemy_cap, find_nearest_enemy, gain_experience, loot_candidate, player_power,
    resolve_inventory_swap, spawn_batch_size, spawn_interval, spawn_weights, step, update_enemy_ai,
    AddItemOutcome, SimulationClock, SpawnContext, SwapChoice,
};
pub use meta::{request_talent_purchase, MetaLoadError, MetaProgress, PurchaseRejected};
pub use ports::{InputSource, Key, PersistenceSink, Renderer, Session, UiEventSink};
pub use render_snapshot::{build_snapshot, WorldSnapshot};
pub use save::{RunSnapshot, SnapshotError};
pub use world::{
    mitigated_damage, Aim, AreaZone, BossBrain, BossSkillSlot, DirectorState, EnemyBehavior, EnemyWorld, Faction,
    FrameEvent, GameLoopControl, GameWorld, NewProjectile, OnHit, PickupKind, PickupWorld, PlayerState,
    ProjectileKind, ProjectileWorld, SlowPayload, Trap, TrapTarget, ZoneKind, ZoneTarget,
};
