//! Path: game_core/src/lib.rs
//! Summary: ゲームコア共通ロジック（定数・敵パラメータ・カタログ・ステータス計算・物理プリミティブ）

pub mod boss;
pub mod constants;
pub mod enemy;
pub mod entity_params;
pub mod item;
pub mod physics;
pub mod skill;
pub mod stats;
pub mod talent;
pub mod util;
