use criterion::{Criterion, criterion_group, criterion_main};
use ff::Field;
use polyarith::{
  EvaluationDomain, RayonExecutor,
  fft::{coset_fft, coset_fft_extended, fft},
  opening::compute_efficient_interpolation,
  provider::bn254::Scalar as Fr,
};
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;

fn random_poly(rng: &mut StdRng, n: usize) -> Vec<Fr> {
  (0..n).map(|_| Fr::random(&mut *rng)).collect()
}

fn benchmarks_fft(c: &mut Criterion) {
  let mut rng = StdRng::seed_from_u64(0);
  let mut group = c.benchmark_group("fft");
  (10..=18).step_by(2).for_each(|log2| {
    let n = 1usize << log2;
    let coeffs = random_poly(&mut rng, n);
    let sequential = EvaluationDomain::<Fr>::new(n).unwrap();
    let parallel = EvaluationDomain::<Fr>::new(n)
      .unwrap()
      .with_executor(Arc::new(RayonExecutor::new()));

    group.bench_function(format!("sequential/2^{log2}"), |b| {
      b.iter(|| {
        let mut evals = coeffs.clone();
        fft(&mut evals, &sequential);
      });
    });
    group.bench_function(format!("rayon/2^{log2}"), |b| {
      b.iter(|| {
        let mut evals = coeffs.clone();
        fft(&mut evals, &parallel);
      });
    });
  });
}

fn benchmarks_coset_extension(c: &mut Criterion) {
  let mut rng = StdRng::seed_from_u64(1);
  let mut group = c.benchmark_group("coset_fft_extension");
  let log2 = 14;
  let n = 1usize << log2;
  let executor = Arc::new(RayonExecutor::new());
  let small = EvaluationDomain::<Fr>::new(n)
    .unwrap()
    .with_executor(executor.clone());
  let large = EvaluationDomain::<Fr>::new(4 * n)
    .unwrap()
    .with_executor(executor);
  let mut padded = random_poly(&mut rng, n);
  padded.resize(4 * n, Fr::ZERO);

  group.bench_function(format!("padded/2^{log2}"), |b| {
    b.iter(|| {
      let mut evals = padded.clone();
      coset_fft(&mut evals, &large);
    });
  });
  group.bench_function(format!("extended/2^{log2}"), |b| {
    b.iter(|| {
      let mut evals = padded.clone();
      coset_fft_extended(&mut evals, &small, &large, 4);
    });
  });
}

fn benchmarks_interpolation(c: &mut Criterion) {
  let mut rng = StdRng::seed_from_u64(2);
  let mut group = c.benchmark_group("compute_efficient_interpolation");
  for n in [16usize, 64, 256] {
    let points = random_poly(&mut rng, n);
    let values = random_poly(&mut rng, n);
    group.bench_function(format!("{n}"), |b| {
      b.iter(|| {
        let mut dest = vec![Fr::ZERO; n];
        compute_efficient_interpolation(&values, &mut dest, &points, n).unwrap();
      });
    });
  }
}

criterion_group!(
  benches,
  benchmarks_fft,
  benchmarks_coset_extension,
  benchmarks_interpolation
);
criterion_main!(benches);
