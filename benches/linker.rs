//! Benchmarks for similarity scoring and all-pairs linking.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use kinlink::linker::{link_parallel, link_sequential};
use kinlink::record::{Field, RecordSet, UserRecord};
use kinlink::similarity::similarity;

const FIRSTS: [&str; 8] = [
    "Jon", "John", "Jonathan", "Jonathon", "Kate", "Cate", "Mia", "Maya",
];
const LASTS: [&str; 6] = ["Smith", "Smyth", "Anderson", "Andersen", "Lee", "Li"];
const JOBS: [&str; 6] = [
    "Software Engineer",
    "Software Engineering",
    "Nurse",
    "Nursing Assistant",
    "Teacher",
    "Teaching Assistant",
];

fn synthetic_records(n: i64) -> RecordSet {
    let mut rng = StdRng::seed_from_u64(0);
    let records = (0..n)
        .map(|i| {
            UserRecord::new(i)
                .with(Field::FirstName, FIRSTS[rng.gen_range(0..FIRSTS.len())])
                .with(Field::LastName, LASTS[rng.gen_range(0..LASTS.len())])
                .with(Field::Employment, JOBS[rng.gen_range(0..JOBS.len())])
                .with(Field::Email, format!("user{}@x.com", rng.gen_range(0..n)))
        })
        .collect();
    RecordSet::new(records).expect("synthetic ids are unique")
}

fn bench_similarity(c: &mut Criterion) {
    c.bench_function("similarity_names", |bench| {
        bench.iter(|| black_box(similarity(black_box("jonathan"), black_box("jonathon"))))
    });
    c.bench_function("similarity_employment", |bench| {
        bench.iter(|| {
            black_box(similarity(
                black_box("senior software engineer, teamwork"),
                black_box("software engineering lead, communication"),
            ))
        })
    });
}

fn bench_link(c: &mut Criterion) {
    let mut group = c.benchmark_group("link");
    for n in [100, 500] {
        let records = synthetic_records(n);
        group.bench_with_input(BenchmarkId::new("sequential", n), &records, |bench, r| {
            bench.iter(|| black_box(link_sequential(r.as_slice())))
        });
        group.bench_with_input(BenchmarkId::new("parallel", n), &records, |bench, r| {
            bench.iter(|| black_box(link_parallel(r.as_slice())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_similarity, bench_link);
criterion_main!(benches);
