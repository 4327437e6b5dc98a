//! Integration tests for MDX generation across server dialects.

use insta::assert_snapshot;
use olapflat::mdx::{build, build_mdx, AxisItem, MdxQuery, MdxRequest};
use olapflat::Dialect;

#[test]
fn test_default_dialect_with_one_matched_property() {
    let mdx = build_mdx(
        "Cube",
        &["D1", "D2"],
        &["M1", "M2"],
        &["D2.P"],
        Dialect::default(),
    );
    assert_eq!(
        mdx,
        "SELECT NON EMPTY {M1, M2} ON COLUMNS, NON EMPTY {D1.Children * D2.CurrentMember.Properties(\"P\")} ON ROWS FROM [Cube]"
    );
}

#[test]
fn test_sap_bw_properties_clause_before_from() {
    let mdx = build_mdx("Cube", &["Dim1"], &["M"], &["Dim1.Prop"], Dialect::SapBw);
    assert!(mdx.ends_with("DIMENSION PROPERTIES Dim1.Prop ON ROWS FROM [Cube]"), "{mdx}");
    assert!(mdx.contains("{Dim1.Children}"));
}

#[test]
fn test_sap_bw_without_properties_has_no_clause() {
    let mdx = build_mdx::<&str>("Cube", &["Dim1", "Dim2"], &["M"], &[], Dialect::SapBw);
    assert!(!mdx.contains("DIMENSION PROPERTIES"));
    assert_snapshot!(mdx, @"SELECT NON EMPTY {M} ON COLUMNS, NON EMPTY {Dim1.Children * Dim2.Children} ON ROWS FROM [Cube]");
}

#[test]
fn test_sap_bw_lists_every_property() {
    let mdx = build_mdx(
        "Cube",
        &["D1", "D2"],
        &["M"],
        &["D1.A", "D2.B"],
        Dialect::SapBw,
    );
    assert_snapshot!(mdx, @"SELECT NON EMPTY {M} ON COLUMNS, NON EMPTY {D1.Children * D2.Children} ON ROWS DIMENSION PROPERTIES D1.A, D2.B ON ROWS FROM [Cube]");
}

#[test]
fn test_power_bi_uses_embedded_properties() {
    let request = MdxRequest::new("Model")
        .dimensions(["[Customer].[City]"])
        .measures(["[Measures].[Revenue]"])
        .properties(["[Customer].[City].[Population]"]);
    assert_snapshot!(build(&request, Dialect::PowerBi), @r#"SELECT NON EMPTY {[Measures].[Revenue]} ON COLUMNS, NON EMPTY {[Customer].[City].CurrentMember.Properties("[Population]")} ON ROWS FROM [Model]"#);
}

#[test]
fn test_last_matching_property_wins() {
    let mdx = build_mdx("C", &["D"], &["M"], &["D.First", "D.Second"], Dialect::Mondrian);
    assert!(mdx.contains("D.CurrentMember.Properties(\"Second\")"), "{mdx}");
}

#[test]
fn test_unmatched_property_is_ignored_outside_sap() {
    let mdx = build_mdx("C", &["D"], &["M"], &["Other.P"], Dialect::Mondrian);
    assert!(mdx.contains("{D.Children}"));
    assert!(!mdx.contains("Other"));
}

#[test]
fn test_empty_dimension_falls_back_to_children_when_last_property_is_empty() {
    let mdx = build_mdx("C", &[""], &["M"], &["D.P", ""], Dialect::Mondrian);
    assert_eq!(
        mdx,
        "SELECT NON EMPTY {M} ON COLUMNS, NON EMPTY {.Children} ON ROWS FROM [C]"
    );
}

#[test]
fn test_empty_inputs_never_fail() {
    for dialect in Dialect::all() {
        let mdx = build(&MdxRequest::new("C"), dialect);
        assert_eq!(
            mdx,
            "SELECT NON EMPTY {} ON COLUMNS, NON EMPTY {} ON ROWS FROM [C]",
            "{dialect}"
        );
    }
}

#[test]
fn test_identifiers_are_not_validated() {
    let mdx = build_mdx::<&str>("we]ird", &["not a dim"], &["1 + 1"], &[], Dialect::Mondrian);
    assert_eq!(
        mdx,
        "SELECT NON EMPTY {1 + 1} ON COLUMNS, NON EMPTY {not a dim.Children} ON ROWS FROM [we]ird]"
    );
}

#[test]
fn test_query_builder_directly() {
    let query = MdxQuery::new("Sales")
        .columns(["[Measures].[Unit Sales]"])
        .rows(vec![
            AxisItem::children("[Store]"),
            AxisItem::member_property("[Time]", "Quarter"),
        ])
        .dimension_properties(["[Store].[Store Sqft]"]);
    assert_snapshot!(query.to_mdx(), @r#"SELECT NON EMPTY {[Measures].[Unit Sales]} ON COLUMNS, NON EMPTY {[Store].Children * [Time].CurrentMember.Properties("Quarter")} ON ROWS DIMENSION PROPERTIES [Store].[Store Sqft] ON ROWS FROM [Sales]"#);
}

#[test]
fn test_request_deserializes_with_defaults() {
    let request: MdxRequest = serde_json::from_str(r#"{"cube": "Sales", "measures": ["M"]}"#).unwrap();
    assert_eq!(request.cube, "Sales");
    assert!(request.dimensions.is_empty());
    assert_eq!(build(&request, Dialect::Mondrian), "SELECT NON EMPTY {M} ON COLUMNS, NON EMPTY {} ON ROWS FROM [Sales]");
}
