/*
    Run this benchmark with:
    cargo bench --bench stats_record

    Each recording targets a view with four columns; the random tag values
    span 4*4*10*10 = 1600 tag-value combinations.
*/

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use opentelemetry_stats::stats::{
    Aggregation, BucketBoundaries, MeasureDouble, MeasureMap, StatsCollectionState,
    StatsProvider, View, ViewName,
};
use opentelemetry_stats::tags::{TagContext, TagKey};
use rand::{
    rngs::{self},
    Rng, SeedableRng,
};
use std::cell::RefCell;

thread_local! {
    /// Store random number generator for each thread
    static CURRENT_RNG: RefCell<rngs::SmallRng> = RefCell::new(rngs::SmallRng::from_os_rng());
}

static ATTRIBUTE_VALUES: [&str; 10] = [
    "value1", "value2", "value3", "value4", "value5", "value6", "value7", "value8", "value9",
    "value10",
];

fn setup(
    state: StatsCollectionState,
    aggregation: Aggregation,
) -> (StatsProvider, MeasureMap) {
    let provider = StatsProvider::builder().with_state(state).build();
    let latency = MeasureDouble::new("bench/latency", "Latency", "ms").unwrap();
    let view = View::new(
        ViewName::new("bench/latency/view").unwrap(),
        "",
        latency.clone(),
        aggregation,
        (1..=4)
            .map(|i| TagKey::new(format!("attribute{}", i)))
            .collect(),
    )
    .unwrap();
    provider.view_manager().register_view(&view).unwrap();
    let map = provider
        .stats_recorder()
        .new_measure_map()
        .put_f64(&latency, 12.5);
    (provider, map)
}

fn random_tags() -> TagContext {
    // 4*4*10*10 = 1600 tag-value combinations.
    let rands = CURRENT_RNG.with(|rng| {
        let mut rng = rng.borrow_mut();
        [
            rng.random_range(0..4),
            rng.random_range(0..4),
            rng.random_range(0..10),
            rng.random_range(0..10),
        ]
    });
    TagContext::builder()
        .with_tag("attribute1", ATTRIBUTE_VALUES[rands[0]])
        .with_tag("attribute2", ATTRIBUTE_VALUES[rands[1]])
        .with_tag("attribute3", ATTRIBUTE_VALUES[rands[2]])
        .with_tag("attribute4", ATTRIBUTE_VALUES[rands[3]])
        .build()
}

fn record_with(c: &mut Criterion, name: &str, state: StatsCollectionState, aggregation: Aggregation) {
    let (_provider, map) = setup(state, aggregation);
    c.bench_function(name, |b| {
        b.iter_batched(random_tags, |tags| map.record(&tags), BatchSize::SmallInput);
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    record_with(
        c,
        "Record_Sum",
        StatsCollectionState::Enabled,
        Aggregation::Sum,
    );
    record_with(
        c,
        "Record_Distribution",
        StatsCollectionState::Enabled,
        Aggregation::Distribution(
            BucketBoundaries::new(vec![0.0, 5.0, 10.0, 25.0, 50.0, 75.0, 100.0]).unwrap(),
        ),
    );
    record_with(
        c,
        "Record_Disabled",
        StatsCollectionState::Disabled,
        Aggregation::Sum,
    );

    let (provider, map) = setup(StatsCollectionState::Enabled, Aggregation::Mean);
    for _ in 0..10_000 {
        map.record(&random_tags());
    }
    let manager = provider.view_manager();
    c.bench_function("GetView_1600_Combinations", |b| {
        b.iter(|| manager.get_view("bench/latency/view").unwrap());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
