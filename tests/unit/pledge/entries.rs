use super::*;

#[test]
fn memory_sink_appends_and_counts() {
    let mut sink = MemoryEntrySink::new();
    assert_eq!(sink.count().unwrap(), 0);
    sink.append(&EntryRecord {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        timestamp: 1.5,
    })
    .unwrap();
    sink.append(&EntryRecord {
        name: "Ben".to_string(),
        email: String::new(),
        timestamp: 2.0,
    })
    .unwrap();
    assert_eq!(sink.count().unwrap(), 2);
    assert_eq!(sink.records()[0].name, "Ada");
    assert_eq!(sink.records()[1].timestamp, 2.0);
}

#[test]
fn record_round_trips_through_json() {
    let record = EntryRecord {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        timestamp: 3.25,
    };
    let json = serde_json::to_string(&record).unwrap();
    let back: EntryRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}
