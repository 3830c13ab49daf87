//! Path: game_sim/src/world/mod.rs
//! Summary: ワールド型（PlayerState, EnemyWorld, ProjectileWorld, ゾーン, 罠, 拾得物, GameWorld）

mod director;
mod enemy;
mod frame_event;
mod game_loop_control;
mod game_world;
mod pickup;
mod player;
mod projectile;
mod trap;
mod zone;

pub use director::DirectorState;
pub use enemy::{BossBrain, BossSkillSlot, EnemyBehavior, EnemyWorld};
pub use frame_event::FrameEvent;
pub use game_loop_control::GameLoopControl;
pub use game_world::GameWorld;
pub use pickup::{PickupKind, PickupWorld};
pub use player::{mitigated_damage, PlayerState};
pub use projectile::{Aim, Faction, NewProjectile, OnHit, ProjectileKind, ProjectileWorld};
pub use trap::{SlowPayload, Trap, TrapTarget};
pub use zone::{AreaZone, ZoneKind, ZoneTarget};

/// `keep[i]` が false の要素を取り除く（SoA の各列を同じマスクで詰める）
pub(crate) fn retain_by_mask<T>(v: &mut Vec<T>, keep: &[bool]) {
    let mut i = 0;
    v.retain(|_| {
        let k = keep[i];
        i += 1;
        k
    });
}
