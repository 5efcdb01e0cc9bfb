use bom_core::{ComponentRow, ItemId};
use bom_explode::{ExplodeSettings, explode_rows};
use bom_report::*;

fn id(s: &str) -> ItemId {
    ItemId::new(s).unwrap()
}

fn sample_rows() -> Vec<ComponentRow> {
    vec![
        ComponentRow::root(id("R")).with_name("Frame"),
        ComponentRow::new(id("P"), Some(id("R")), 3.0)
            .with_procurement("Production")
            .with_line_type("Phantom"),
        ComponentRow::new(id("L"), Some(id("P")), 5.0)
            .with_procurement("Purchased")
            .with_template("Tube 10mm")
            .with_name("Tube"),
        ComponentRow::new(id("B"), Some(id("R")), 4.0)
            .with_procurement("Purchased")
            .with_name("Bolt, M6"),
    ]
}

#[test]
fn save_and_load_report() {
    let dir = tempfile::tempdir().unwrap();
    let store = ReportStore::new(dir.path().join("reports")).unwrap();

    let rows = sample_rows();
    let settings = ExplodeSettings::default();
    let report_id = compute_report_id(&rows, &settings, "test");
    let aggregation = explode_rows(rows, &settings).unwrap();
    let report = OrderReport::from_aggregation(
        &aggregation,
        report_id.clone(),
        "Frame",
        "2026-10-17T12:00:00Z".to_string(),
    );

    assert!(!store.has_report(&report_id));
    let report_dir = store.save_report(&report, &aggregation.traces).unwrap();
    assert!(store.has_report(&report_id));
    assert!(report_dir.join("order_list.csv").exists());
    assert!(report_dir.join("length_list.csv").exists());

    let loaded = store.load_report(&report_id).unwrap();
    assert_eq!(loaded, report);
    assert_eq!(loaded.orders.len(), 1);
    assert_eq!(loaded.lengths[0].total_mm, 15.0);

    let traces = store.load_traces(&report_id).unwrap();
    assert_eq!(traces.len(), 2);

    let orders_csv = std::fs::read_to_string(report_dir.join("order_list.csv")).unwrap();
    let mut lines = orders_csv.lines();
    assert_eq!(lines.next(), Some("item,name,total_quantity"));
    assert_eq!(lines.next(), Some("B,\"Bolt, M6\",4.0"));

    let listed = store.list_reports().unwrap();
    assert_eq!(listed.len(), 1);

    store.delete_report(&report_id).unwrap();
    assert!(!store.has_report(&report_id));
}

#[test]
fn missing_report_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = ReportStore::new(dir.path().to_path_buf()).unwrap();
    assert!(matches!(
        store.load_report("nope"),
        Err(ReportError::ReportNotFound { .. })
    ));
    assert!(matches!(
        store.load_traces("nope"),
        Err(ReportError::ReportNotFound { .. })
    ));
}
