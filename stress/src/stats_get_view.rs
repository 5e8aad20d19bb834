/*
    Stress test results:
    Run this stress test with:
    cargo run --release --bin stats_get_view

    Same as the `stats` stress test, with an extra thread continuously
    snapshotting the view while the workers record into it.
*/

use lazy_static::lazy_static;
use opentelemetry_stats::stats::{
    Aggregation, MeasureLong, MeasureMap, StatsCollectionState, StatsProvider, View, ViewName,
};
use opentelemetry_stats::tags::{TagContext, TagKey};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::cell::RefCell;
use std::thread;
use std::time::Duration;

mod throughput;

const VIEW_NAME: &str = "stress/bytes/sum";

lazy_static! {
    static ref PROVIDER: StatsProvider = StatsProvider::builder()
        .with_state(StatsCollectionState::Enabled)
        .build();
    static ref BYTES: MeasureLong =
        MeasureLong::new("stress/bytes", "Stress test bytes", "By").expect("valid measure");
    static ref MEASURE_MAP: MeasureMap = PROVIDER
        .stats_recorder()
        .new_measure_map()
        .put_i64(&BYTES, 1024);
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
        ViewName::new(VIEW_NAME).expect("valid view name"),
        "Bytes by attribute",
        BYTES.clone(),
        Aggregation::Sum,
        vec![TagKey::new("attribute1"), TagKey::new("attribute2")],
    )
    .expect("valid view");
    PROVIDER
        .view_manager()
        .register_view(&view)
        .expect("view registration");

    thread::spawn(|| {
        let manager = PROVIDER.view_manager();
        loop {
            if let Ok(Some(data)) = manager.get_view(VIEW_NAME) {
                assert!(data.aggregation_map().len() <= 100);
            }
            thread::sleep(Duration::from_millis(1));
        }
    });

    throughput::test_throughput(test_record);
}

fn test_record() {
    let len = ATTRIBUTE_VALUES.len();
    let rands = CURRENT_RNG.with(|rng| {
        let mut rng = rng.borrow_mut();
        [rng.random_range(0..len), rng.random_range(0..len)]
    });
    let tags: TagContext = [
        ("attribute1", ATTRIBUTE_VALUES[rands[0]]),
        ("attribute2", ATTRIBUTE_VALUES[rands[1]]),
    ]
    .into_iter()
    .collect();

    MEASURE_MAP.record(&tags);
}
