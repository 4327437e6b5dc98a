//! Integration tests for the XMLA client over an in-memory transport.

#[path = "../common/mod.rs"]
mod common;

use common::{discover_response, fault_response, grid_2x2, MockTransport};
use olapflat::client::XmlaClient;
use olapflat::dialect::RequestType;
use olapflat::{Dialect, MdxRequest, RecordLimit, XmlaError};

fn client(transport: MockTransport, dialect: Dialect) -> XmlaClient<MockTransport> {
    XmlaClient::new(transport, dialect)
}

#[tokio::test]
async fn test_discover_sends_request_type_and_returns_rows() {
    let transport = MockTransport::with_responses([discover_response(&[
        &[("CATALOG_NAME", "FoodMart")],
        &[("CATALOG_NAME", "Steelwheels")],
    ])]);
    let client = client(transport, Dialect::Mondrian);

    let rows = client.discover(RequestType::Catalogs).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].text_of("CATALOG_NAME"), Some("Steelwheels"));

    let body = client.transport().last_request().unwrap();
    assert!(body.contains("<RequestType>DBSCHEMA_CATALOGS</RequestType>"));
    assert!(body.starts_with("<?xml version='1.0' encoding='utf-8'?>\n<soap-env:Envelope"));
}

#[tokio::test]
async fn test_discover_empty_rowset() {
    let transport = MockTransport::with_responses([discover_response(&[])]);
    let rows = client(transport, Dialect::SapBw)
        .discover(RequestType::Cubes)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_execute_uses_catalog_and_escapes_statement() {
    let transport = MockTransport::with_responses([grid_2x2(false)]);
    let client = client(transport, Dialect::Mondrian).with_catalog("Sales & Co");

    client.execute("SELECT {[M]} ON COLUMNS FROM [C] WHERE x < 1").await.unwrap();

    let body = client.transport().last_request().unwrap();
    assert!(body.contains("<Statement>SELECT {[M]} ON COLUMNS FROM [C] WHERE x &lt; 1</Statement>"));
    assert!(body.contains("<Catalog>Sales &amp; Co</Catalog>"));
    assert!(body.contains("<Format>Multidimensional</Format><AxisFormat>TupleFormat</AxisFormat>"));
}

#[tokio::test]
async fn test_default_catalog() {
    let transport = MockTransport::with_responses([grid_2x2(false)]);
    let client = client(transport, Dialect::PowerBi);
    assert_eq!(client.catalog(), "FoodMart");

    client.execute_cube("SELECT").await.unwrap();
    assert!(client
        .transport()
        .last_request()
        .unwrap()
        .contains("<Catalog>FoodMart</Catalog>"));
}

#[tokio::test]
async fn test_execute_cube() {
    let transport = MockTransport::with_responses([grid_2x2(true)]);
    let cube = client(transport, Dialect::Mondrian)
        .execute_cube("SELECT")
        .await
        .unwrap();
    assert_eq!(cube.size(), (2, 2));
    assert_eq!(cube.dialect(), Dialect::Mondrian);
}

#[tokio::test]
async fn test_query_builds_executes_and_flattens() {
    let transport = MockTransport::with_responses([grid_2x2(false)]);
    let client = client(transport, Dialect::SapBw);
    let request = MdxRequest::new("Sales")
        .dimensions(["H1"])
        .measures(["C1", "C2"])
        .properties(["H1.P"]);

    let rows: Vec<_> = client
        .query(&request, RecordLimit::unlimited())
        .await
        .unwrap()
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("C2"), Some("20"));

    let body = client.transport().last_request().unwrap();
    assert!(body.contains(
        "<Statement>SELECT NON EMPTY {C1, C2} ON COLUMNS, NON EMPTY {H1.Children} ON ROWS DIMENSION PROPERTIES H1.P ON ROWS FROM [Sales]</Statement>"
    ));
}

#[tokio::test]
async fn test_query_reports_fault() {
    let transport = MockTransport::with_responses([fault_response("Member not found")]);
    let result = client(transport, Dialect::Mondrian)
        .query(&MdxRequest::new("Sales"), RecordLimit::unlimited())
        .await;
    assert!(matches!(result, Err(XmlaError::Fault(d)) if d == "Member not found"));
}

#[tokio::test]
async fn test_http_error_propagates() {
    let transport = MockTransport::new();
    transport.push_http_error(500);
    let result = client(transport, Dialect::Mondrian)
        .discover(RequestType::Catalogs)
        .await;
    let err = result.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_malformed_body_is_xml_error() {
    let transport = MockTransport::with_responses(["<Envelope><Body></Envelope>"]);
    let result = client(transport, Dialect::Mondrian).execute("SELECT").await;
    assert!(matches!(result, Err(XmlaError::Xml(_))));
}

#[test]
fn test_build_mdx_query_follows_dialect() {
    let request = MdxRequest::new("C").dimensions(["D"]).measures(["M"]).properties(["D.P"]);
    let mondrian = client(MockTransport::new(), Dialect::Mondrian).build_mdx_query(&request);
    let sap = client(MockTransport::new(), Dialect::SapBw).build_mdx_query(&request);
    assert!(mondrian.contains("D.CurrentMember.Properties(\"P\")"));
    assert!(sap.contains("DIMENSION PROPERTIES D.P ON ROWS"));
}
