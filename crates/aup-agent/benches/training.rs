use aup_agent::{AupAgent, AupConfig};
use aup_gridworld::VaseWorld;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_training(c: &mut Criterion) {
    let sampled = AupConfig {
        num_episodes: 50,
        num_rpenalties: 5,
        ..AupConfig::default()
    };
    c.bench_function("aup-agent/train(sampled, penalties=5, episodes=50)", |b| {
        b.iter(|| {
            let mut env = VaseWorld::new();
            let agent = AupAgent::train(&mut env, sampled.clone()).expect("train");
            black_box(agent.training_performance().final_performance());
        })
    });

    let reachability = AupConfig {
        num_episodes: 50,
        state_penalties: true,
        ..AupConfig::default()
    };
    c.bench_function("aup-agent/train(reachability, episodes=50)", |b| {
        b.iter(|| {
            let mut env = VaseWorld::new();
            let agent = AupAgent::train(&mut env, reachability.clone()).expect("train");
            black_box(agent.training_performance().final_performance());
        })
    });
}

criterion_group!(benches, bench_training);
criterion_main!(benches);
