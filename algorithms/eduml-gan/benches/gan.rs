use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eduml_datasets::generate;
use eduml_gan::{sample_latent, Gan};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

const SIDE: usize = 28;
const NLATENT: usize = 10;

fn bench(c: &mut Criterion) {
    let mut rng = Xoshiro256Plus::seed_from_u64(42);
    let mut group = c.benchmark_group("GAN train step");
    group
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(10);

    for batch in [16, 64, 256] {
        let images = generate::stripes(batch, SIDE, &mut rng);
        let z = sample_latent(batch, NLATENT, &mut rng);
        let mut gan = Gan::params()
            .ndims(SIDE * SIDE)
            .nlatent(NLATENT)
            .build()
            .unwrap();

        group.bench_with_input(
            BenchmarkId::new("train_step", batch),
            &(images, z),
            |b, (images, z)| {
                b.iter(|| gan.train_step(black_box(images), black_box(z), 1e-3).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
