//! Integration tests for flattening cube results into rows.

#[path = "../common/mod.rs"]
mod common;

use common::{execute_response, fault_response, grid_2x2, m};
use olapflat::document::parse_document;
use olapflat::rows::{flatten, FlatRow, RecordLimit};
use olapflat::{CubeModel, Dialect, XmlaError};
use serde_json::json;

fn cube(xml: &str) -> CubeModel {
    CubeModel::new(parse_document(xml).unwrap(), Dialect::Mondrian)
}

fn json_rows(xml: &str, limit: RecordLimit) -> Vec<serde_json::Value> {
    flatten(cube(xml), limit)
        .unwrap()
        .map(|row| row.to_json())
        .collect()
}

#[test]
fn test_2x2_grid() {
    let rows = json_rows(&grid_2x2(false), RecordLimit::unlimited());
    assert_eq!(
        rows,
        vec![
            json!({"H1": "R1", "C1": "10", "C2": "20"}),
            json!({"H1": "R2", "C1": "30", "C2": "40"}),
        ]
    );
}

#[test]
fn test_column_order() {
    let rows = flatten(cube(&grid_2x2(false)), RecordLimit::unlimited()).unwrap();
    assert_eq!(rows.column_names(), vec!["H1", "C1", "C2"]);
    let first: Vec<FlatRow> = rows.take(1).collect();
    assert_eq!(first[0].columns().collect::<Vec<_>>(), vec!["H1", "C1", "C2"]);
}

#[test]
fn test_limit_one_yields_one_row() {
    let rows = json_rows(&grid_2x2(false), RecordLimit::new(1));
    assert_eq!(rows, vec![json!({"H1": "R1", "C1": "10", "C2": "20"})]);
}

#[test]
fn test_limit_zero_yields_nothing() {
    assert!(json_rows(&grid_2x2(false), RecordLimit::new(0)).is_empty());
}

#[test]
fn test_unlimited_yields_all() {
    assert_eq!(json_rows(&grid_2x2(false), RecordLimit::new(-1)).len(), 2);
}

#[test]
fn test_limit_above_row_count() {
    assert_eq!(json_rows(&grid_2x2(false), RecordLimit::new(10)).len(), 2);
}

#[test]
fn test_fault_fails_before_any_row() {
    let result = flatten(cube(&fault_response("Syntax error")), RecordLimit::unlimited());
    match result {
        Err(XmlaError::Fault(description)) => assert_eq!(description, "Syntax error"),
        other => panic!("expected fault, got {:?}", other.map(|r| r.count())),
    }
}

#[test]
fn test_ordinals_place_sparse_cells() {
    let xml = execute_response(
        &[vec![m("[Measures]", "C1")], vec![m("[Measures]", "C2")]],
        &[vec![m("H1", "R1")], vec![m("H1", "R2")]],
        &[Some("10"), None, None, Some("40")],
        true,
    );
    let rows = json_rows(&xml, RecordLimit::unlimited());
    assert_eq!(
        rows,
        vec![
            json!({"H1": "R1", "C1": "10", "C2": null}),
            json!({"H1": "R2", "C1": null, "C2": "40"}),
        ]
    );
}

#[test]
fn test_short_cell_data_yields_nulls() {
    let xml = execute_response(
        &[vec![m("[Measures]", "C1")], vec![m("[Measures]", "C2")]],
        &[vec![m("H1", "R1")], vec![m("H1", "R2")]],
        &[Some("10"), Some("20"), Some("30")],
        false,
    );
    let rows = json_rows(&xml, RecordLimit::unlimited());
    assert_eq!(rows[1], json!({"H1": "R2", "C1": "30", "C2": null}));
}

#[test]
fn test_colliding_column_names_overwrite() {
    let xml = execute_response(
        &[vec![m("[Measures]", "Same")], vec![m("[Measures]", "Same")]],
        &[vec![m("H1", "R1")]],
        &[Some("1"), Some("2")],
        false,
    );
    let rows: Vec<FlatRow> = flatten(cube(&xml), RecordLimit::unlimited()).unwrap().collect();
    assert_eq!(rows[0].len(), 2);
    assert_eq!(rows[0].get("Same"), Some("2"));
}

#[test]
fn test_multi_hierarchy_rows() {
    let xml = execute_response(
        &[vec![m("[Measures]", "Unit Sales")]],
        &[
            vec![m("[Store]", "USA"), m("[Time]", "1997")],
            vec![m("[Store]", "USA"), m("[Time]", "1998")],
        ],
        &[Some("5"), Some("6")],
        false,
    );
    let rows = json_rows(&xml, RecordLimit::unlimited());
    assert_eq!(
        rows[1],
        json!({"[Store]": "USA", "[Time]": "1998", "Unit Sales": "6"})
    );
}

#[test]
fn test_iterator_is_lazy_and_stoppable() {
    let mut rows = flatten(cube(&grid_2x2(false)), RecordLimit::unlimited()).unwrap();
    assert_eq!(rows.size_hint(), (2, Some(2)));
    let first = rows.next().unwrap();
    assert_eq!(first.get("H1"), Some("R1"));
    assert_eq!(rows.produced(), 1);
    drop(rows);
}

#[test]
fn test_exhausted_iterator_stays_exhausted() {
    let mut rows = flatten(cube(&grid_2x2(false)), RecordLimit::new(1)).unwrap();
    assert!(rows.next().is_some());
    assert!(rows.next().is_none());
    assert!(rows.next().is_none());
}

#[test]
fn test_sap_bw_cube_flattens_the_same() {
    let sap = CubeModel::new(parse_document(&grid_2x2(false)).unwrap(), Dialect::SapBw);
    let rows: Vec<_> = flatten(sap, RecordLimit::unlimited())
        .unwrap()
        .map(|r| r.to_json())
        .collect();
    assert_eq!(rows, json_rows(&grid_2x2(false), RecordLimit::unlimited()));
}
