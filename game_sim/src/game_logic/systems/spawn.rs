use crate::world::{BossBrain, EnemyBehavior, FrameEvent, GameWorld};
use game_core::boss::generate_blueprint;
use game_core::constants::{BOSS_SPAWN_DIST, SPAWN_MAX_DIST, SPAWN_MIN_DIST};
use game_core::enemy::{enemy_level, EnemyKind};
use game_core::util::{clamp_to_map, spawn_position_around_player};

/// プレイヤー周囲の距離帯に置き、マップ内へ収める
fn spawn_position(w: &mut GameWorld, min_dist: f32, max_dist: f32, radius: f32) -> (f32, f32) {
    let (x, y) = spawn_position_around_player(&mut w.rng, w.player.x, w.player.y, min_dist, max_dist);
    clamp_to_map(x, y, radius, w.config.map_width, w.config.map_height)
}

fn current_enemy_level(w: &GameWorld) -> u32 {
    enemy_level(w.director.stage, w.director.wave, w.player.level)
}

/// 通常敵 / エリートを 1 体出す。エリート用ブループリントが無ければ Basic に差し替える
pub(crate) fn spawn_enemy(w: &mut GameWorld, kind: EnemyKind) {
    let (kind, behavior, color) = if kind == EnemyKind::Elite {
        match w.director.pick_elite_blueprint(&mut w.rng) {
            Some(bp) => (kind, EnemyBehavior::Boss(BossBrain::from_blueprint(&bp.skills)), bp.color),
            None => (EnemyKind::Basic, EnemyBehavior::for_kind(EnemyKind::Basic), EnemyKind::Basic.params().color),
        }
    } else {
        (kind, EnemyBehavior::for_kind(kind), kind.params().color)
    };

    let stats = kind.stats_at(current_enemy_level(w), w.director.stage);
    let (x, y) = spawn_position(w, SPAWN_MIN_DIST, SPAWN_MAX_DIST, stats.radius);
    w.enemies.spawn(x, y, kind, &stats, behavior, color);
    log::debug!("spawned {} lv {} at ({x:.0}, {y:.0})", kind.as_str(), stats.level);
}

/// ステージボスを出す（プレイヤーのスキル構成に寄せたブループリント）
pub(crate) fn spawn_boss(w: &mut GameWorld) {
    let stage = w.director.stage;
    let blueprint = generate_blueprint(stage, &w.player.skills, &mut w.rng);
    let stats = EnemyKind::Boss.stats_at(current_enemy_level(w), stage);
    let (x, y) = spawn_position(w, BOSS_SPAWN_DIST, BOSS_SPAWN_DIST, stats.radius);
    w.enemies.spawn(
        x,
        y,
        EnemyKind::Boss,
        &stats,
        EnemyBehavior::Boss(BossBrain::from_blueprint(&blueprint.skills)),
        blueprint.color,
    );

    let skills: Vec<String> = blueprint
        .skills
        .iter()
        .map(|s| format!("{}:{}", s.skill.as_str(), s.level))
        .collect();
    log::info!("boss spawned on stage {stage} (hp {:.0}, skills [{}])", stats.max_hp, skills.join(", "));

    let d = &mut w.director;
    d.current_blueprint = Some(blueprint);
    d.boss_active = true;
    d.last_boss_ratio = 1.0;
    w.frame_events.push(FrameEvent::BossSpawned { stage });
    w.frame_events.push(FrameEvent::BossHpChanged { ratio: 1.0 });
}
