use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use opentelemetry_stats::stats::{
    Aggregation, AggregationData, BucketBoundaries, MeasureDouble, StatsCollectionState,
    StatsExporter, StatsProvider, TagValues, View, ViewData, ViewName,
};
use opentelemetry_stats::tags::{TagContext, TagKey, TagValue};
use opentelemetry_stats::{StatsError, StatsResult};

fn enabled_provider() -> StatsProvider {
    StatsProvider::builder()
        .with_state(StatsCollectionState::Enabled)
        .build()
}

fn measure() -> MeasureDouble {
    MeasureDouble::new("rpc/latency", "RPC latency", "ms").unwrap()
}

fn view_with(name: &'static str, description: &'static str, aggregation: Aggregation) -> View {
    View::new(
        ViewName::new(name).unwrap(),
        description,
        measure(),
        aggregation,
        vec![TagKey::new("method")],
    )
    .unwrap()
}

fn method(value: &'static str) -> TagValues {
    vec![Some(value)].into_iter().collect()
}

fn record_all(provider: &StatsProvider, tags: &TagContext, values: &[f64]) {
    let recorder = provider.stats_recorder();
    let latency = measure();
    for value in values {
        recorder
            .new_measure_map()
            .put_f64(&latency, *value)
            .record(tags);
    }
}

#[test]
fn registering_equal_view_twice_changes_nothing() {
    let provider = enabled_provider();
    let manager = provider.view_manager();
    let view = view_with("rpc/latency/sum", "Sum", Aggregation::Sum);

    manager.register_view(&view).unwrap();
    let tags = TagContext::builder().with_tag("method", "Get").build();
    record_all(&provider, &tags, &[1.0]);
    let before = manager.get_view("rpc/latency/sum").unwrap().unwrap();

    manager
        .register_view(&view_with("rpc/latency/sum", "Sum", Aggregation::Sum))
        .unwrap();

    assert_eq!(manager.all_exported_views().len(), 1);
    let after = manager.get_view("rpc/latency/sum").unwrap().unwrap();
    assert_eq!(before.aggregation_map(), after.aggregation_map());
}

#[test]
fn conflicting_registration_keeps_original() {
    let manager = enabled_provider().view_manager();
    let original = view_with("rpc/latency/view", "Sum", Aggregation::Sum);
    manager.register_view(&original).unwrap();

    let different_description = view_with("rpc/latency/view", "Other", Aggregation::Sum);
    let different_aggregation = view_with("rpc/latency/view", "Sum", Aggregation::Mean);
    for conflict in [different_description, different_aggregation] {
        assert!(matches!(
            manager.register_view(&conflict),
            Err(StatsError::ViewConflict(_))
        ));
    }

    let data = manager.get_view("rpc/latency/view").unwrap().unwrap();
    assert_eq!(data.view(), &original);
    assert_eq!(manager.all_exported_views().len(), 1);
}

#[test]
fn sum_of_recorded_values() {
    let provider = enabled_provider();
    provider
        .view_manager()
        .register_view(&view_with("rpc/latency/sum", "", Aggregation::Sum))
        .unwrap();

    let tags = TagContext::builder().with_tag("method", "Get").build();
    record_all(&provider, &tags, &[10.0, 20.0, 30.0, 40.0]);

    let data = provider
        .view_manager()
        .get_view("rpc/latency/sum")
        .unwrap()
        .unwrap();
    assert_eq!(
        data.aggregation_map().get(&method("Get")),
        Some(&AggregationData::SumDouble(100.0))
    );
}

#[test]
fn mean_and_distribution_of_recorded_values() {
    let provider = enabled_provider();
    let manager = provider.view_manager();
    manager
        .register_view(&view_with("rpc/latency/mean", "", Aggregation::Mean))
        .unwrap();
    manager
        .register_view(&view_with(
            "rpc/latency/distribution",
            "",
            Aggregation::Distribution(BucketBoundaries::new(vec![-10.0, 0.0, 10.0]).unwrap()),
        ))
        .unwrap();

    let tags = TagContext::builder().with_tag("method", "Get").build();
    record_all(&provider, &tags, &[-1.0, 1.0, -5.0, 20.0, 5.0]);

    let mean = manager.get_view("rpc/latency/mean").unwrap().unwrap();
    match mean.aggregation_map().get(&method("Get")) {
        Some(AggregationData::Mean { mean, count }) => {
            assert!((mean - 4.0).abs() < 1e-9);
            assert_eq!(*count, 5);
        }
        other => panic!("expected mean data, got {:?}", other),
    }

    let distribution = manager
        .get_view("rpc/latency/distribution")
        .unwrap()
        .unwrap();
    match distribution.aggregation_map().get(&method("Get")) {
        Some(AggregationData::Distribution(d)) => {
            assert_eq!(d.bucket_counts, vec![0, 2, 2, 1]);
            assert!((d.min - -5.0).abs() < 1e-9);
            assert!((d.max - 20.0).abs() < 1e-9);
            assert_eq!(d.count, 5);
        }
        other => panic!("expected distribution data, got {:?}", other),
    }
}

#[test]
fn missing_tag_is_recorded_under_unknown_value() {
    let provider = enabled_provider();
    provider
        .view_manager()
        .register_view(&view_with("rpc/latency/count", "", Aggregation::Count))
        .unwrap();

    let unrelated = TagContext::builder().with_tag("service", "frontend").build();
    record_all(&provider, &unrelated, &[1.0, 2.0]);
    record_all(&provider, &TagContext::new(), &[3.0]);

    let data = provider
        .view_manager()
        .get_view("rpc/latency/count")
        .unwrap()
        .unwrap();
    let unknown = TagValues::new(vec![None::<TagValue>]);
    assert_eq!(data.aggregation_map().len(), 1);
    assert_eq!(
        data.aggregation_map().get(&unknown),
        Some(&AggregationData::Count(3))
    );
}

#[test]
fn disable_clears_and_reenable_starts_empty() {
    let provider = enabled_provider();
    let manager = provider.view_manager();
    manager
        .register_view(&view_with("rpc/latency/sum", "", Aggregation::Sum))
        .unwrap();
    let tags = TagContext::builder().with_tag("method", "Get").build();

    record_all(&provider, &tags, &[1.0, 2.0]);
    assert!(provider
        .set_state(StatsCollectionState::Disabled)
        .unwrap());

    let disabled = manager.get_view("rpc/latency/sum").unwrap().unwrap();
    assert!(disabled.aggregation_map().is_empty());
    record_all(&provider, &tags, &[100.0]);

    assert!(provider.set_state(StatsCollectionState::Enabled).unwrap());
    assert!(manager
        .get_view("rpc/latency/sum")
        .unwrap()
        .unwrap()
        .aggregation_map()
        .is_empty());

    record_all(&provider, &tags, &[4.0]);
    let data = manager.get_view("rpc/latency/sum").unwrap().unwrap();
    assert_eq!(
        data.aggregation_map().get(&method("Get")),
        Some(&AggregationData::SumDouble(4.0))
    );
}

#[test]
fn state_read_locks_against_concurrent_writers() {
    let provider = enabled_provider();
    let stop = Arc::new(AtomicBool::new(false));

    let writer = {
        let provider = provider.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                for state in [StatsCollectionState::Disabled, StatsCollectionState::Enabled] {
                    let _ = provider.set_state(state);
                }
            }
        })
    };

    let first = provider.state();
    for _ in 0..10_000 {
        assert_eq!(provider.state(), first);
    }
    stop.store(true, Ordering::Relaxed);
    writer.join().unwrap();

    assert_eq!(
        provider.set_state(StatsCollectionState::Disabled),
        Err(StatsError::StateLocked)
    );
    assert_eq!(provider.state(), first);
}

#[test]
fn same_measure_map_records_against_two_tag_sets() {
    let provider = enabled_provider();
    provider
        .view_manager()
        .register_view(&view_with("rpc/latency/sum", "", Aggregation::Sum))
        .unwrap();

    let map = provider
        .stats_recorder()
        .new_measure_map()
        .put_f64(&measure(), 5.0);
    map.record(&TagContext::builder().with_tag("method", "Get").build());
    map.record(&TagContext::builder().with_tag("method", "Put").build());

    let data = provider
        .view_manager()
        .get_view("rpc/latency/sum")
        .unwrap()
        .unwrap();
    assert_eq!(
        data.aggregation_map().get(&method("Get")),
        Some(&AggregationData::SumDouble(5.0))
    );
    assert_eq!(
        data.aggregation_map().get(&method("Put")),
        Some(&AggregationData::SumDouble(5.0))
    );
}

#[derive(Default)]
struct CountingExporter {
    batches: Mutex<Vec<usize>>,
}

impl StatsExporter for CountingExporter {
    fn export(&self, batch: &[ViewData]) -> StatsResult<()> {
        self.batches.lock()?.push(batch.len());
        Ok(())
    }
}

#[test]
fn export_hands_every_view_to_exporter() {
    let provider = enabled_provider();
    let manager = provider.view_manager();
    manager
        .register_view(&view_with("rpc/latency/sum", "", Aggregation::Sum))
        .unwrap();
    manager
        .register_view(&view_with("rpc/latency/count", "", Aggregation::Count))
        .unwrap();

    let exporter = CountingExporter::default();
    manager.export_to(&exporter).unwrap();
    assert_eq!(*exporter.batches.lock().unwrap(), vec![2]);
}
