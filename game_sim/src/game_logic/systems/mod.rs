//! Path: game_sim/src/game_logic/systems/mod.rs
//! Summary: ステップ内で呼ばれる各システム（戦闘・弾・ゾーン・罠・拾得物・成長・ディレクター）

pub(crate) mod boss_flow;
pub(crate) mod boss_skills;
pub(crate) mod combat;
pub(crate) mod combo;
pub(crate) mod director;
pub(crate) mod inventory;
pub(crate) mod leveling;
pub(crate) mod pickups;
pub(crate) mod player_attack;
pub(crate) mod projectiles;
pub(crate) mod spawn;
pub(crate) mod traps;
pub(crate) mod zones;
