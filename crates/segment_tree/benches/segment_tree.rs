use bench::apply_runtime_config_for_size;
use bench::default_rng;
use bench::generate_ranges;
use bench::generate_updates;
use bench::generate_values;
use criterion::BenchmarkGroup;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::measurement::Measurement;
use segment_tree::AggregatePolicy;
use segment_tree::InRangeCount;
use segment_tree::MaxSubarraySum;
use segment_tree::SegmentTree;
use segment_tree::Sum;
use segment_tree::ValueRange;
use segment_tree::Xor;
use std::hint::black_box;

const SIZES: [usize; 4] = [1_024, 4_096, 16_384, 65_536];
const VALUE_RANGE: std::ops::RangeInclusive<i64> = -1_000_000..=1_000_000;

fn bench_build<M, P>(group: &mut BenchmarkGroup<'_, M>, name: &str, size: usize, values: &[i64])
where
    M: Measurement,
    P: AggregatePolicy<Value = i64>,
    P::Args: Default,
{
    group.bench_function(BenchmarkId::new(name, size), |bencher| {
        bencher.iter(|| black_box(SegmentTree::<P>::new(black_box(values))))
    });
}

fn bench_mixed<M, P>(
    group: &mut BenchmarkGroup<'_, M>,
    name: &str,
    size: usize,
    values: &[i64],
    ranges: &[(usize, usize)],
    updates: &[(usize, i64)],
) where
    M: Measurement,
    P: AggregatePolicy<Value = i64, Args = ()>,
{
    group.bench_function(BenchmarkId::new(name, size), |bencher| {
        bencher.iter_batched(
            || SegmentTree::<P>::new(values),
            |mut tree| {
                for (&(l, r), &(i, v)) in ranges.iter().zip(updates) {
                    tree.update(black_box(i), black_box(v)).unwrap();
                    black_box(tree.query(black_box(l), black_box(r)).unwrap());
                }
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

fn bench_segment_tree(c: &mut Criterion) {
    let mut rng = default_rng();

    let mut build = c.benchmark_group("segment_tree/build");
    for &size in &SIZES {
        apply_runtime_config_for_size(&mut build, size);
        let values = generate_values(&mut rng, size, VALUE_RANGE);

        bench_build::<_, Sum<i64>>(&mut build, "sum", size, &values);
        bench_build::<_, MaxSubarraySum<i64>>(&mut build, "max_subarray", size, &values);
        bench_build::<_, InRangeCount<i64>>(&mut build, "in_range_count", size, &values);
    }
    build.finish();

    let mut mixed = c.benchmark_group("segment_tree/update_query");
    for &size in &SIZES {
        apply_runtime_config_for_size(&mut mixed, size);
        let values = generate_values(&mut rng, size, VALUE_RANGE);
        let ranges = generate_ranges(&mut rng, size, size);
        let updates = generate_updates(&mut rng, size, size, VALUE_RANGE);

        bench_mixed::<_, Sum<i64>>(&mut mixed, "sum", size, &values, &ranges, &updates);
        bench_mixed::<_, Xor<i64>>(&mut mixed, "xor", size, &values, &ranges, &updates);
        bench_mixed::<_, MaxSubarraySum<i64>>(
            &mut mixed,
            "max_subarray",
            size,
            &values,
            &ranges,
            &updates,
        );
    }
    mixed.finish();

    let mut count = c.benchmark_group("segment_tree/in_range_count_query");
    for &size in &SIZES {
        apply_runtime_config_for_size(&mut count, size);
        let values = generate_values(&mut rng, size, VALUE_RANGE);
        let ranges = generate_ranges(&mut rng, size, size);
        let filters = generate_ranges(&mut rng, size, size);
        let tree = SegmentTree::<InRangeCount<i64>>::new(&values);

        count.bench_function(BenchmarkId::new("in_range_count", size), |bencher| {
            bencher.iter(|| {
                let mut acc = 0_usize;
                for (&(l, r), &(a, b)) in ranges.iter().zip(&filters) {
                    let filter = ValueRange::new(values[a], values[b]);
                    acc ^= tree.query_with(black_box(l), black_box(r), &filter).unwrap();
                }
                black_box(acc);
            })
        });
    }
    count.finish();
}

criterion_group!(benches, bench_segment_tree);
criterion_main!(benches);
