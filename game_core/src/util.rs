//! Path: game_core/src/util.rs
//! Summary: 経験値カーブ・方向ベクトル・スポーン位置などの共通ユーティリティ

use crate::constants::{EXP_INITIAL_THRESHOLD, MIN_DIST_EPSILON};
use crate::physics::rng::SimpleRng;

/// `level` から次のレベルに上がるための必要経験値（レベルごとに 2 倍）
pub fn exp_threshold_for_level(level: u32) -> u32 {
    let shift = level.max(1) - 1;
    EXP_INITIAL_THRESHOLD.saturating_mul(1u32.checked_shl(shift).unwrap_or(u32::MAX))
}

/// (from → to) の正規化方向と距離。距離はイプシロンで下限を取る
#[inline]
pub fn direction_to(from_x: f32, from_y: f32, to_x: f32, to_y: f32) -> (f32, f32, f32) {
    let dx = to_x - from_x;
    let dy = to_y - from_y;
    let dist = (dx * dx + dy * dy).sqrt().max(MIN_DIST_EPSILON);
    (dx / dist, dy / dist, dist)
}

/// 座標をマップ内に収める
#[inline]
pub fn clamp_to_map(x: f32, y: f32, radius: f32, map_width: f32, map_height: f32) -> (f32, f32) {
    (
        x.clamp(radius, (map_width - radius).max(radius)),
        y.clamp(radius, (map_height - radius).max(radius)),
    )
}

/// プレイヤー周囲の円周上に配置（画面外から寄ってくる距離）
pub fn spawn_position_around_player(
    rng: &mut SimpleRng,
    player_x: f32,
    player_y: f32,
    min_dist: f32,
    max_dist: f32,
) -> (f32, f32) {
    let angle = rng.next_f32() * std::f32::consts::TAU;
    let dist = min_dist + rng.next_f32() * (max_dist - min_dist);
    (
        player_x + angle.cos() * dist,
        player_y + angle.sin() * dist,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exp_threshold_doubles() {
        assert_eq!(exp_threshold_for_level(1), 5);
        assert_eq!(exp_threshold_for_level(2), 10);
        assert_eq!(exp_threshold_for_level(5), 80);
        assert_eq!(exp_threshold_for_level(64), u32::MAX);
    }

    #[test]
    fn test_direction_to_same_point_is_finite() {
        let (nx, ny, dist) = direction_to(3.0, 3.0, 3.0, 3.0);
        assert!(nx.is_finite() && ny.is_finite());
        assert!((dist - MIN_DIST_EPSILON).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_position_distance() {
        let mut rng = SimpleRng::new(5);
        for _ in 0..50 {
            let (x, y) = spawn_position_around_player(&mut rng, 100.0, 100.0, 500.0, 700.0);
            let d = ((x - 100.0).powi(2) + (y - 100.0).powi(2)).sqrt();
            assert!((499.0..=701.0).contains(&d));
        }
    }

    #[test]
    fn test_clamp_to_map() {
        let (x, y) = clamp_to_map(-50.0, 5000.0, 10.0, 2400.0, 2400.0);
        assert!((x - 10.0).abs() < 0.001);
        assert!((y - 2390.0).abs() < 0.001);
    }
}
