//! End-to-end: index documents, fetch and search them, project onto records.

use searchbind::store::{ClientRegistry, MemoryConnector, StoreError};
use searchbind::{BindError, Bindable};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Bindable)]
struct Line {
    #[bind]
    sku: String,
    #[bind]
    qty: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Bindable)]
struct Invoice {
    #[bind]
    number: String,
    #[bind]
    total: f64,
    #[bind]
    lines: Vec<Line>,
    #[serde(skip)]
    cached_label: String,
}

fn invoices() -> searchbind::store::DocType {
    let mut registry = ClientRegistry::new(MemoryConnector::new());
    registry.register("db", "mem://billing");
    let index = registry.index("billing", "db").unwrap();
    index.check_structure().unwrap();
    index.doc_type("invoice")
}

fn sample(number: &str, total: f64) -> Invoice {
    Invoice {
        number: number.into(),
        total,
        lines: vec![
            Line {
                sku: "pen".into(),
                qty: 2,
            },
            Line {
                sku: "ink".into(),
                qty: 1,
            },
        ],
        cached_label: String::new(),
    }
}

#[test]
fn stored_record_projects_back() {
    let docs = invoices();
    let invoice = sample("INV-1", 12.5);
    let id = docs.index_doc(&invoice, None).unwrap();

    let mut fetched = Invoice {
        cached_label: "kept".into(),
        ..Invoice::default()
    };
    assert!(docs.get_into(&id, &mut fetched).unwrap());
    assert_eq!(fetched.number, "INV-1");
    assert_eq!(fetched.total, 12.5);
    assert_eq!(fetched.lines, invoice.lines);
    assert_eq!(fetched.cached_label, "kept");
}

#[test]
fn missing_document_leaves_target_untouched() {
    let docs = invoices();
    let mut target = sample("LOCAL", 1.0);
    let before = target.clone();
    assert!(!docs.get_into("nope", &mut target).unwrap());
    assert_eq!(target, before);
}

#[test]
fn search_hits_project_in_order() {
    let docs = invoices();
    docs.index_doc(&sample("INV-1", 10.0), Some("a")).unwrap();
    docs.index_doc(&sample("INV-2", 20.0), Some("b")).unwrap();
    docs.index_doc(&sample("INV-3", 30.0), Some("c")).unwrap();

    let hits: Vec<Invoice> = docs
        .search_into(&json!({"query": {"bool": {"must_not": {"term": {"number": "INV-2"}}}}}))
        .unwrap();
    let numbers: Vec<&str> = hits.iter().map(|i| i.number.as_str()).collect();
    assert_eq!(numbers, vec!["INV-1", "INV-3"]);

    let result = docs
        .search(&json!({"query": {"match": {"number": "inv-3"}}}))
        .unwrap();
    assert_eq!(result.total_hits, 1);
    assert_eq!(result.hits[0].id, "c");
}

#[test]
fn malformed_document_surfaces_bind_error() {
    let docs = invoices();
    docs.index_raw(r#"{"number": "INV-9", "lines": [1, 2, 3]}"#, Some("bad"))
        .unwrap();

    let mut target = Invoice::default();
    let err = docs.get_into("bad", &mut target).unwrap_err();
    match err {
        StoreError::Bind(BindError::ShapeMismatch { path, .. }) => {
            assert_eq!(path.as_str(), "lines[0]")
        }
        other => panic!("expected a shape mismatch, got {:?}", other),
    }
}
