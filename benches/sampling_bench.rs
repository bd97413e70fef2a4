#[macro_use]
extern crate bencher;

use bencher::Bencher;
use qcirc_utils::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn uniform(n: usize) -> Vec<f64> {
    let len = 1 << n;
    vec![1.0 / len as f64; len]
}

fn bench_generate_bitstrings(b: &mut Bencher) {
    let p = uniform(12);
    b.iter(|| generate_bitstrings(&p));
}

fn bench_sample_bitstrings(b: &mut Bencher) {
    let p = uniform(10);
    let mut rng = SmallRng::seed_from_u64(0);
    b.iter(|| sample_bitstrings_with_rng(&p, 1000, &mut rng));
}

fn bench_sample_psi(b: &mut Bencher) {
    let n = 10;
    let amp = (1.0 / (1 << n) as f64).sqrt();
    let psi = vec![Complex::new(amp, 0.0); 1 << n];
    let mut rng = SmallRng::seed_from_u64(0);
    b.iter(|| sample_psi_with_rng(&psi, 1000, &mut rng));
}

fn bench_count_occurrences(b: &mut Bencher) {
    let p = uniform(6);
    let mut rng = SmallRng::seed_from_u64(0);
    let samples = sample_bitstrings_with_rng(&p, 10_000, &mut rng).unwrap();
    b.iter(|| count_bitstring_occurrences(&samples));
}

benchmark_group!(
    benches,
    bench_generate_bitstrings,
    bench_sample_bitstrings,
    bench_sample_psi,
    bench_count_occurrences
);
benchmark_main!(benches);
