/*
    Stress test results:
    Run this stress test with:
    cargo run --release --bin stats

    Records one value per iteration against a view with three columns of
    ten values each, so 1000 tag-value combinations are aggregated.
*/

use lazy_static::lazy_static;
use opentelemetry_stats::stats::{
    Aggregation, BucketBoundaries, MeasureDouble, MeasureMap, StatsCollectionState,
    StatsProvider, View, ViewName,
};
use opentelemetry_stats::tags::{TagContext, TagKey};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::cell::RefCell;

mod throughput;

lazy_static! {
    static ref PROVIDER: StatsProvider = StatsProvider::builder()
        .with_state(StatsCollectionState::Enabled)
        .build();
    static ref LATENCY: MeasureDouble =
        MeasureDouble::new("stress/latency", "Stress test latency", "ms")
            .expect("valid measure");
    static ref MEASURE_MAP: MeasureMap = PROVIDER
        .stats_recorder()
        .new_measure_map()
        .put_f64(&LATENCY, 12.5);
    static ref ATTRIBUTE_VALUES: [&'static str; 10] = [
        "value1", "value2", "value3", "value4", "value5", "value6", "value7", "value8", "value9",
        "value10"
    ];
}

thread_local! {
    /// Store random number generator for each thread
    static CURRENT_RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let view = View::new(
        ViewName::new("stress/latency/distribution").expect("valid view name"),
        "Stress test latency distribution",
        LATENCY.clone(),
        Aggregation::Distribution(
            BucketBoundaries::new(vec![0.0, 5.0, 10.0, 25.0, 50.0, 100.0])
                .expect("valid boundaries"),
        ),
        vec![
            TagKey::new("attribute1"),
            TagKey::new("attribute2"),
            TagKey::new("attribute3"),
        ],
    )
    .expect("valid view");
    PROVIDER
        .view_manager()
        .register_view(&view)
        .expect("view registration");

    throughput::test_throughput(test_record);
}

fn test_record() {
    let len = ATTRIBUTE_VALUES.len();
    let rands = CURRENT_RNG.with(|rng| {
        let mut rng = rng.borrow_mut();
        [
            rng.random_range(0..len),
            rng.random_range(0..len),
            rng.random_range(0..len),
        ]
    });
    let tags: TagContext = [
        ("attribute1", ATTRIBUTE_VALUES[rands[0]]),
        ("attribute2", ATTRIBUTE_VALUES[rands[1]]),
        ("attribute3", ATTRIBUTE_VALUES[rands[2]]),
    ]
    .into_iter()
    .collect();

    MEASURE_MAP.record(&tags);
}
