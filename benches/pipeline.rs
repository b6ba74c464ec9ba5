use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use attribute_filter::codec::{event_from_json, predicate_from_json};
use attribute_filter::filter::{AttributeValueFilter, EntityIdFilter};
use attribute_filter::geo::GeoPoint;
use attribute_filter::predicate::{NumberPredicate, RadialGeofencePredicate, StringMatch, StringPredicate};
use attribute_filter::{AttributeEvent, FilterPipeline, MatchMode, Value};

fn make_events(n: u32) -> Vec<AttributeEvent> {
    // Rotate over three attributes so each value filter sees a third of the stream.
    (0..n)
        .map(|i| {
            let entity_id = format!("asset-{}", i % 64);
            let timestamp = i64::from(i);
            match i % 3 {
                0 => AttributeEvent::for_attribute_at(
                    entity_id,
                    "temperature",
                    Some(Value::Float(15.0 + f64::from(i % 40))),
                    timestamp,
                ),
                1 => AttributeEvent::for_attribute_at(
                    entity_id,
                    "status",
                    Some(Value::from(if i % 7 == 0 { "ALARM: overheat" } else { "running" })),
                    timestamp,
                ),
                _ => {
                    let point = GeoPoint::new(52.0 + f64::from(i % 100) * 0.001, 4.9)
                        .map_or(Value::Null, Value::from);
                    AttributeEvent::for_attribute_at(entity_id, "location", Some(point), timestamp)
                }
            }
        })
        .collect()
}

fn make_pipeline(mode: MatchMode) -> FilterPipeline {
    FilterPipeline::new(mode)
        .with_filter(EntityIdFilter::new((0..32).map(|i| format!("asset-{i}"))))
        .with_filter(AttributeValueFilter::new("temperature", NumberPredicate::between(40.0, 50.0)))
        .with_filter(AttributeValueFilter::new(
            "status",
            StringPredicate::new(StringMatch::Begin, "alarm").case_insensitive(),
        ))
        .with_filter(AttributeValueFilter::new(
            "location",
            RadialGeofencePredicate::new(5_000.0, 52.0, 4.9).outside(),
        ))
}

fn bench_pipeline_matches(c: &mut Criterion) {
    let events = make_events(4096);
    let mut group = c.benchmark_group("pipeline/matches");
    group.throughput(Throughput::Elements(events.len() as u64));

    for mode in [MatchMode::All, MatchMode::Any] {
        let pipeline = make_pipeline(mode);
        group.bench_function(mode.to_string(), |b| {
            b.iter(|| pipeline.select(&events).count());
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let predicate = r#"{"predicateType": "radial", "radius": 250.0, "lat": 48.85, "lng": 2.35}"#;
    let event = r#"{"attributeState": {"attributeRef": {"entityId": "asset-1", "attributeName": "temperature"}, "value": 21.5}, "timestamp": 1700000000000}"#;

    c.bench_function("codec/predicate_from_json", |b| {
        b.iter(|| predicate_from_json(black_box(predicate)));
    });
    c.bench_function("codec/event_from_json", |b| {
        b.iter(|| event_from_json(black_box(event)));
    });
}

criterion_group!(benches, bench_pipeline_matches, bench_decode);
criterion_main!(benches);
