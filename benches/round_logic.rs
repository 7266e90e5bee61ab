use criterion::{black_box, criterion_group, criterion_main, Criterion};
use speed_duel::core::{
    select_round, DifficultyProfile, GameRng, Player, Question, Round, RoundEngine, RoundRules,
    RoundSnapshot, ShortfallPolicy,
};
use speed_duel::types::{Difficulty, PlayerId, TICK_MS, WAVE_COUNT};

fn pool() -> Vec<Question> {
    let mut out = Vec::new();
    for wave in 1..=WAVE_COUNT as u8 {
        for n in 0..20u32 {
            let answer = (n * u32::from(wave)).to_string();
            let wrong = [1, 2, 3].map(|d| format!("{}{}", answer, d));
            let q = Question::new(
                format!("{} x {}", n, wave),
                [answer.as_str(), &wrong[0], &wrong[1], &wrong[2]],
                answer.as_str(),
                1,
            );
            if let Ok(q) = q {
                out.push(q.with_wave(wave));
            }
        }
    }
    out
}

fn engine(pool: &[Question], rng: &mut GameRng) -> RoundEngine {
    let profile = DifficultyProfile::from(Difficulty::Medium);
    let round = select_round(pool, &profile, ShortfallPolicy::Abort, rng).unwrap();
    RoundEngine::new(
        [Player::new("Ada", "blue"), Player::new("Bo", "green")],
        round,
        RoundRules::default(),
    )
}

fn bench_select(c: &mut Criterion) {
    let pool = pool();
    let mut rng = GameRng::new(12345);
    let profile = DifficultyProfile::from(Difficulty::Hard);

    c.bench_function("select_round_hard", |b| {
        b.iter(|| select_round(black_box(&pool), &profile, ShortfallPolicy::Abort, &mut rng))
    });
}

fn bench_tick(c: &mut Criterion) {
    let pool = pool();
    let mut rng = GameRng::new(12345);
    let mut game = engine(&pool, &mut rng);
    game.submit(PlayerId::One, 0);

    c.bench_function("round_tick_16ms", |b| {
        b.iter(|| {
            let _ = game.tick(black_box(TICK_MS));
        })
    });
}

fn bench_full_round(c: &mut Criterion) {
    let pool = pool();
    let mut rng = GameRng::new(12345);

    c.bench_function("play_full_round", |b| {
        b.iter(|| {
            let mut game = engine(&pool, &mut rng);
            while let Some(q) = game.current_question() {
                let correct = q.correct_index();
                game.submit(PlayerId::Two, (correct + 1) % 4);
                game.submit(PlayerId::One, correct);
                game.tick(RoundRules::default().feedback_ms);
            }
            black_box(game.outcome())
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let pool = pool();
    let mut rng = GameRng::new(12345);
    let game = engine(&pool, &mut rng);
    let mut snap = RoundSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            game.snapshot_into(&mut snap);
            black_box(&snap);
        })
    });
}

criterion_group!(benches, bench_select, bench_tick, bench_full_round, bench_snapshot);
criterion_main!(benches);
