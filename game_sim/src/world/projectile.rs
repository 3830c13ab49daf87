//! Path: game_sim/src/world/projectile.rs
//! Summary: 弾 SoA（ProjectileWorld）・陣営・弾種・命中時効果

use super::retain_by_mask;
use game_core::util::direction_to;
use serde::Serialize;

/// 弾の持ち主
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Player,
    Enemy,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileKind {
    Normal,
    /// プレイヤーのダートは命中した敵をスタンさせる
    Dart,
}

/// 命中時の追加効果（敵弾 → プレイヤー）
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum OnHit {
    Blind { duration: f32 },
}

/// 初速の決め方。生成時に一度だけ速度ベクトルへ変換する
#[derive(Clone, Copy, Debug)]
pub enum Aim {
    Angle(f32),
    Target(f32, f32),
}

#[derive(Clone, Copy, Debug)]
pub struct NewProjectile {
    pub x:       f32,
    pub y:       f32,
    pub aim:     Aim,
    pub speed:   f32,
    pub radius:  f32,
    pub damage:  f32,
    pub faction: Faction,
    pub kind:    ProjectileKind,
    pub on_hit:  Option<OnHit>,
}

/// 弾 SoA（Structure of Arrays）
#[derive(Default)]
pub struct ProjectileWorld {
    pub positions_x:  Vec<f32>,
    pub positions_y:  Vec<f32>,
    pub velocities_x: Vec<f32>,
    pub velocities_y: Vec<f32>,
    pub radius:       Vec<f32>,
    pub damage:       Vec<f32>,
    pub faction:      Vec<Faction>,
    pub kind:         Vec<ProjectileKind>,
    pub on_hit:       Vec<Option<OnHit>>,
    pub alive:        Vec<bool>,
    pub count:        usize,
}

impl ProjectileWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions_x.is_empty()
    }

    pub fn spawn(&mut self, p: NewProjectile) {
        let (dir_x, dir_y) = match p.aim {
            Aim::Angle(a) => (a.cos(), a.sin()),
            Aim::Target(tx, ty) => {
                let (nx, ny, _) = direction_to(p.x, p.y, tx, ty);
                (nx, ny)
            }
        };
        self.positions_x.push(p.x);
        self.positions_y.push(p.y);
        self.velocities_x.push(dir_x * p.speed);
        self.velocities_y.push(dir_y * p.speed);
        self.radius.push(p.radius);
        self.damage.push(p.damage);
        self.faction.push(p.faction);
        self.kind.push(p.kind);
        self.on_hit.push(p.on_hit);
        self.alive.push(true);
        self.count += 1;
    }

    pub fn kill(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.count = self.count.saturating_sub(1);
        }
    }

    pub fn prune(&mut self) {
        if self.count == self.len() {
            return;
        }
        let keep = std::mem::take(&mut self.alive);
        retain_by_mask(&mut self.positions_x, &keep);
        retain_by_mask(&mut self.positions_y, &keep);
        retain_by_mask(&mut self.velocities_x, &keep);
        retain_by_mask(&mut self.velocities_y, &keep);
        retain_by_mask(&mut self.radius, &keep);
        retain_by_mask(&mut self.damage, &keep);
        retain_by_mask(&mut self.faction, &keep);
        retain_by_mask(&mut self.kind, &keep);
        retain_by_mask(&mut self.on_hit, &keep);
        self.alive = vec![true; self.positions_x.len()];
        self.count = self.alive.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(aim: Aim) -> NewProjectile {
        NewProjectile {
            x: 0.0,
            y: 0.0,
            aim,
            speed: 100.0,
            radius: 5.0,
            damage: 1.0,
            faction: Faction::Player,
            kind: ProjectileKind::Normal,
            on_hit: None,
        }
    }

    #[test]
    fn velocity_from_target() {
        let mut w = ProjectileWorld::new();
        w.spawn(shot(Aim::Target(0.0, 50.0)));
        assert!(w.velocities_x[0].abs() < 1e-4);
        assert!((w.velocities_y[0] - 100.0).abs() < 1e-4);
    }

    #[test]
    fn velocity_from_angle() {
        let mut w = ProjectileWorld::new();
        w.spawn(shot(Aim::Angle(std::f32::consts::PI)));
        assert!((w.velocities_x[0] + 100.0).abs() < 1e-3);
    }

    #[test]
    fn prune_drops_dead_projectiles() {
        let mut w = ProjectileWorld::new();
        w.spawn(shot(Aim::Angle(0.0)));
        w.spawn(shot(Aim::Angle(1.0)));
        w.kill(0);
        w.prune();
        assert_eq!(w.len(), 1);
        assert_eq!(w.count, 1);
    }
}
