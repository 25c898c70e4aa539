use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sickle_sim::simulation::SimulationBuilder;

fn bench_simulation_init(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_init");

    for pop_size in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(pop_size as u64));
        group.bench_with_input(
            BenchmarkId::new("founders", pop_size),
            &pop_size,
            |b, &size| {
                b.iter(|| {
                    black_box(
                        SimulationBuilder::new()
                            .population_size(black_box(size))
                            .generations(black_box(10))
                            .seed(42)
                            .build()
                            .unwrap(),
                    );
                })
            },
        );
    }

    group.finish();
}

fn bench_simulation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");

    for pop_size in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(pop_size as u64));
        group.bench_with_input(
            BenchmarkId::new("step_all_stages", pop_size),
            &pop_size,
            |b, &size| {
                b.iter_batched(
                    || {
                        SimulationBuilder::new()
                            .population_size(size)
                            .generations(10)
                            .allow_growth(true)
                            .drift(true)
                            .seed(42)
                            .build()
                            .unwrap()
                    },
                    |mut sim| {
                        sim.step().unwrap();
                        black_box(sim)
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_simulation_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_run");
    let pop_size = 500;
    let generations = 100;

    group.throughput(Throughput::Elements((pop_size * generations) as u64));

    group.bench_with_input(
        BenchmarkId::new("run_full", generations),
        &generations,
        |b, &gens| {
            b.iter_batched(
                || {
                    SimulationBuilder::new()
                        .population_size(pop_size)
                        .generations(gens)
                        .allow_growth(true)
                        .reproduction_rate(0.05)
                        .seed(7)
                        .build()
                        .unwrap()
                },
                |mut sim| {
                    sim.run().unwrap();
                    black_box(sim)
                },
                criterion::BatchSize::SmallInput,
            )
        },
    );

    group.finish();
}

criterion_group!(
    benches,
    bench_simulation_init,
    bench_simulation_step,
    bench_simulation_run
);
criterion_main!(benches);
