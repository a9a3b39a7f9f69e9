use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use rpg_dice_expr::{evaluate_det_with, parse, Dice};

pub fn benchmark_parsing(c: &mut Criterion) {
    c.bench_function("parse cursed dice", |b| b.iter(|| parse(black_box("999d444"))));
    c.bench_function("parse multiple expressions", |b| {
        b.iter(|| parse(black_box("10d6 * (3d4 + 3) / 100d100 % 2d6 + 100")))
    });
    c.bench_function("parse nested functions", |b| {
        b.iter(|| parse(black_box("round(avg(4d8)/2) + adv(1d20) + int(sqrt(2d100))")))
    });
    c.bench_function("parse notation with text", |b| {
        b.iter(|| parse(black_box("The ogre hits you for 2d8+4 bludgeoning damage")))
    });
}

pub fn benchmark_rolling(c: &mut Criterion) {
    c.bench_function("roll cursed dice", |b| {
        b.iter(|| {
            let dice = Dice::new(999, 444);
            let mut rng = StdRng::seed_from_u64(1);
            dice.roll_all(&mut rng)
        });
    });
    c.bench_function("roll deterministic trace", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(1);
            evaluate_det_with(black_box("adv(1d20) + 5 + round(avg(4d8)/2)"), &mut rng)
        });
    });
}

criterion_group!(benches, benchmark_parsing, benchmark_rolling);
criterion_main!(benches);
