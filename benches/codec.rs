use std::{hint::black_box, sync::Arc};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kiss::{
    cayley::{MeetInTheMiddle, ShortestPath},
    generators::GeneratorSet,
    permutation::Perm,
    rank::{rank, unrank, DOMAIN_SIZE},
};
use rand::{rngs::SmallRng, SeedableRng};

fn sample(n: usize) -> Vec<Perm> {
    let mut rng = SmallRng::seed_from_u64(239_500_800);
    (0..n).map(|_| Perm::random_even(&mut rng)).collect()
}

fn bench_codec(c: &mut Criterion) {
    let perms = sample(1024);
    let ranks: Vec<u64> = perms.iter().map(|p| rank(p).unwrap().get().into()).collect();

    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements(perms.len() as u64));
    group.bench_function("rank", |b| {
        b.iter(|| {
            for p in &perms {
                black_box(rank(black_box(p)).unwrap());
            }
        })
    });
    group.bench_function("unrank", |b| {
        b.iter(|| {
            for &r in &ranks {
                black_box(unrank(black_box(r)).unwrap());
            }
        })
    });
    group.bench_function("compose", |b| {
        b.iter(|| {
            perms
                .iter()
                .fold(Perm::id(), |acc, p| acc.compose(black_box(p)))
        })
    });
    group.finish();

    c.bench_function("unrank_last", |b| {
        b.iter(|| unrank(black_box(u64::from(DOMAIN_SIZE) - 1)).unwrap())
    });
}

fn bench_meet_in_the_middle(c: &mut Criterion) {
    let gens = Arc::new(GeneratorSet::icosahedral().unwrap());
    let mitm = MeetInTheMiddle::new(gens.clone(), 3);
    let targets = sample(8);

    let mut group = c.benchmark_group("meet_in_the_middle");
    group.sample_size(10);
    for (i, target) in targets.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("radius_3", i), target, |b, t| {
            b.iter(|| mitm.shortest_path(black_box(t)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codec, bench_meet_in_the_middle);
criterion_main!(benches);
