//! 敵 AI ベンチマーク: 近接・遠隔・ボス混在

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use game_sim::{update_enemy_ai, EnemyBehavior, EnemyKind, GameWorld, MetaProgress, SimConfig};

fn setup_world(n: usize) -> GameWorld {
    let mut w = GameWorld::new(SimConfig::default(), &MetaProgress::default());
    for i in 0..n {
        let kind = match i % 50 {
            0 => EnemyKind::Elite,
            1..=10 => EnemyKind::Ranger,
            _ => EnemyKind::Basic,
        };
        let x = (i as f32 * 1.7) % 2400.0;
        let y = (i as f32 * 2.3) % 2400.0;
        let stats = kind.stats_at(1, 1);
        w.enemies.spawn(x, y, kind, &stats, EnemyBehavior::for_kind(kind), kind.params().color);
    }
    w
}

fn bench_enemy_ai(c: &mut Criterion) {
    let n = 10_000;
    let dt = 0.016;

    c.bench_function("enemy_ai_mixed", |b| {
        b.iter_batched(
            || setup_world(n),
            |mut w| {
                update_enemy_ai(&mut w, dt);
                w
            },
            BatchSize::PerIteration,
        )
    });
}

criterion_group!(benches, bench_enemy_ai);
criterion_main!(benches);
