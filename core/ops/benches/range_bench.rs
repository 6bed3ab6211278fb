use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndops_ops::{helpers, DataType, IndexSource, LaunchContext, NDArray, TensorList};

fn mk_list(height: usize) -> TensorList {
    TensorList::from_arrays(
        (0..height)
            .map(|i| NDArray::from_vec(&[4], vec![i as f32; 4]).unwrap())
            .collect(),
    )
}

fn bench_range(c: &mut Criterion) {
    let launch = LaunchContext::cpu();
    let start = NDArray::scalar(0.0f32);
    let delta = NDArray::scalar(0.25f32);

    for len in [1_000usize, 100_000, 1_000_000] {
        let mut output = NDArray::zeros(&[len], DataType::Float32);
        c.bench_function(&format!("range f32 {}", len), |b| {
            b.iter(|| {
                helpers::range(&launch, black_box(&start), black_box(&delta), &mut output);
                black_box(&output);
            })
        });
    }
}

fn bench_range_strided(c: &mut Criterion) {
    let launch = LaunchContext::cpu();
    let start = NDArray::scalar(1i64);
    let delta = NDArray::scalar(3i64);
    let mut output = NDArray::zeros(&[512, 512], DataType::Int64).transposed();
    c.bench_function("range i64 512x512 transposed", |b| {
        b.iter(|| {
            helpers::range(&launch, black_box(&start), black_box(&delta), &mut output);
            black_box(&output);
        })
    });
}

fn bench_pick(c: &mut Criterion) {
    let list = mk_list(4_096);
    let source = IndexSource::Literal((0..4_096i64).rev().collect());
    c.bench_function("pick_list 4096 reversed", |b| {
        b.iter(|| {
            let picked = ndops_ops::list::pick(black_box(&list), black_box(&source)).unwrap();
            black_box(picked);
        })
    });
}

criterion_group!(benches, bench_range, bench_range_strided, bench_pick);
criterion_main!(benches);
