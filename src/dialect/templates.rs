//! Shared SOAP templates and response paths for dialect implementations.
//!
//! Servers validate request shape strictly, so the templates are kept byte
//! for byte: no whitespace between elements and single-quoted XML
//! declaration attributes.

use std::borrow::Cow;

use quick_xml::escape::partial_escape;

// =============================================================================
// Request Templates
// =============================================================================

/// Discover request body. `{request_type}` is substituted.
pub const DISCOVER_REQUEST: &str = concat!(
    "<?xml version='1.0' encoding='utf-8'?>\n",
    "<soap-env:Envelope xmlns:soap-env=\"http://schemas.xmlsoap.org/soap/envelope/\" ",
    "xmlns=\"urn:schemas-microsoft-com:xml-analysis\">",
    "<soap-env:Body><Discover><RequestType>{request_type}</RequestType>",
    "<Restrictions xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xsi:nil=\"true\"/>",
    "<Properties xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xsi:nil=\"true\"/>",
    "</Discover></soap-env:Body></soap-env:Envelope>",
);

/// Execute request body. `{statement}` and `{catalog}` are substituted.
pub const EXECUTE_REQUEST: &str = concat!(
    "<?xml version='1.0' encoding='utf-8'?>\n",
    "<soap-env:Envelope xmlns:soap-env=\"http://schemas.xmlsoap.org/soap/envelope/\" ",
    "xmlns=\"urn:schemas-microsoft-com:xml-analysis\">",
    "<soap-env:Body><Execute><Command><Statement>{statement}</Statement></Command>",
    "<Properties><PropertyList><Format>Multidimensional</Format>",
    "<AxisFormat>TupleFormat</AxisFormat><Catalog>{catalog}</Catalog>",
    "</PropertyList></Properties></Execute></soap-env:Body></soap-env:Envelope>",
);

/// Catalog sent with Execute requests when none is configured.
pub const DEFAULT_CATALOG: &str = "FoodMart";

/// SOAPAction header value. Execute requests are sent with it as well.
pub const SOAP_ACTION: &str = "\"urn:schemas-microsoft-com:xml-analysis:Discover\"";

/// Content-Type header value for SOAP 1.1.
pub const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

// =============================================================================
// Response Paths
// =============================================================================

/// Rows of a Discover response.
pub const DISCOVER_ROWS_PATH: &[&str] =
    &["Envelope", "Body", "DiscoverResponse", "return", "root", "row"];

/// Flat cell list of an Execute response.
pub const CELLS_PATH: &[&str] = &[
    "Envelope",
    "Body",
    "ExecuteResponse",
    "return",
    "root",
    "CellData",
    "Cell",
];

/// Axes of an Execute response.
pub const AXES_PATH: &[&str] = &[
    "Envelope",
    "Body",
    "ExecuteResponse",
    "return",
    "root",
    "Axes",
    "Axis",
];

/// SOAP fault description.
pub const FAULT_PATH: &[&str] = &["Envelope", "Body", "Fault", "detail", "Error", "@Description"];

// =============================================================================
// Rendering
// =============================================================================

fn escape(text: &str) -> Cow<'_, str> {
    partial_escape(text)
}

/// Render a Discover body.
pub fn render_discover(template: &str, request_type: &str) -> String {
    template.replace("{request_type}", &escape(request_type))
}

/// Render an Execute body.
///
/// Placeholders are filled in a single pass over the template, so text that
/// looks like a placeholder inside either value is copied as is.
pub fn render_execute(template: &str, statement: &str, catalog: &str) -> String {
    let mut out = String::with_capacity(template.len() + statement.len() + catalog.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{statement}") {
            out.push_str(&escape(statement));
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{catalog}") {
            out.push_str(&escape(catalog));
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
