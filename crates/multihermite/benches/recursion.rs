//! Benchmark: value and gradient sweeps for growing cutoffs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex64;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use multihermite::{partition, Cutoff, HermiteEngine, Matrix, PartitionCache};

fn random_inputs(n: usize) -> (Matrix<Complex64>, Vec<Complex64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut r = Matrix::zeros(n, n);
    for i in 0..n {
        for j in i..n {
            let z = Complex64::new(rng.gen_range(-0.3..0.3), rng.gen_range(-0.3..0.3));
            r[[i, j]] = z;
            r[[j, i]] = z;
        }
    }
    let y = (0..n)
        .map(|_| Complex64::new(rng.gen_range(-0.3..0.3), rng.gen_range(-0.3..0.3)))
        .collect();
    (r, y)
}

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill");
    for &(n, cutoff) in &[(2usize, 20usize), (3, 10), (4, 6)] {
        let (r, y) = random_inputs(n);
        let cutoff = Cutoff::Uniform(cutoff);
        group.bench_with_input(
            BenchmarkId::new(format!("modes{n}"), format!("{cutoff:?}")),
            &cutoff,
            |b, cutoff| {
                let mut engine = HermiteEngine::new();
                b.iter(|| {
                    engine
                        .fill(black_box(&r), black_box(&y), cutoff, Complex64::new(1.0, 0.0))
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

fn bench_fill_gradients(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_gradients");
    for &(n, cutoff) in &[(2usize, 20usize), (3, 10)] {
        let (r, y) = random_inputs(n);
        let cutoff = Cutoff::Uniform(cutoff);
        let one = Complex64::new(1.0, 0.0);
        let mut engine = HermiteEngine::new();
        let array = engine.fill(&r, &y, &cutoff, one).unwrap();
        group.bench_with_input(
            BenchmarkId::new(format!("modes{n}"), format!("{cutoff:?}")),
            &cutoff,
            |b, cutoff| {
                b.iter(|| {
                    engine
                        .fill_gradients(black_box(&array), &r, &y, cutoff, one)
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

fn bench_partition(c: &mut Criterion) {
    let cutoff = vec![8usize; 4];
    c.bench_function("partition_uncached", |b| {
        b.iter(|| {
            (1..=28)
                .map(|p| partition(black_box(p), &cutoff).len())
                .sum::<usize>()
        })
    });
    c.bench_function("partition_cached", |b| {
        let mut cache = PartitionCache::new();
        b.iter(|| {
            (1..=28)
                .map(|p| cache.get(black_box(p), &cutoff).len())
                .sum::<usize>()
        })
    });
}

criterion_group!(benches, bench_fill, bench_fill_gradients, bench_partition);
criterion_main!(benches);
