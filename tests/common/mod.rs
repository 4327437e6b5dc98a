//! Shared fixtures for integration tests: canned XMLA responses and an
//! in-memory transport.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use olapflat::client::{Transport, XmlaError, XmlaResult};

// =============================================================================
// In-memory transport
// =============================================================================

/// Replays canned response bodies and records every request body.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<XmlaResult<String>>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that answers every request, in order, with `bodies`.
    pub fn with_responses<S: Into<String>>(bodies: impl IntoIterator<Item = S>) -> Self {
        let transport = Self::new();
        for body in bodies {
            transport.push(body);
        }
        transport
    }

    pub fn push(&self, body: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(body.into()));
    }

    pub fn push_http_error(&self, status: u16) {
        self.responses.lock().unwrap().push_back(Err(XmlaError::Http {
            status,
            url: "http://mock/xmla".to_string(),
        }));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<String> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, body: String) -> XmlaResult<String> {
        self.requests.lock().unwrap().push(body);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(XmlaError::fault("no canned response left")))
    }
}

// =============================================================================
// Canned responses
// =============================================================================

const ENVELOPE_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" SOAP-ENV:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
  <SOAP-ENV:Header/>
  <SOAP-ENV:Body>"#;

const ENVELOPE_CLOSE: &str = r#"
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// A member on a result axis.
pub struct M<'a> {
    pub hierarchy: &'a str,
    pub caption: &'a str,
}

pub fn m<'a>(hierarchy: &'a str, caption: &'a str) -> M<'a> {
    M { hierarchy, caption }
}

fn axis(name: &str, tuples: &[Vec<M<'_>>]) -> String {
    let mut out = format!("\n        <Axis name=\"{}\">\n          <Tuples>", name);
    for tuple in tuples {
        out.push_str("\n            <Tuple>");
        for member in tuple {
            out.push_str(&format!(
                "\n              <Member Hierarchy=\"{h}\"><UName>{h}.[{c}]</UName><Caption>{c}</Caption><LName>{h}</LName><LNum>1</LNum></Member>",
                h = escape(member.hierarchy),
                c = escape(member.caption),
            ));
        }
        out.push_str("\n            </Tuple>");
    }
    out.push_str("\n          </Tuples>\n        </Axis>");
    out
}

/// An Execute response.
///
/// `cells` are row-major; `None` entries are left out of `CellData`. With
/// `ordinals` every emitted cell carries its `CellOrdinal`.
pub fn execute_response(
    columns: &[Vec<M<'_>>],
    rows: &[Vec<M<'_>>],
    cells: &[Option<&str>],
    ordinals: bool,
) -> String {
    let mut out = String::from(ENVELOPE_OPEN);
    out.push_str(
        r#"
    <cxmla:ExecuteResponse xmlns:cxmla="urn:schemas-microsoft-com:xml-analysis">
      <cxmla:return>
      <root xmlns="urn:schemas-microsoft-com:xml-analysis:mddataset" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
      <OlapInfo><CubeInfo><Cube><CubeName>Sales</CubeName></Cube></CubeInfo></OlapInfo>
      <Axes>"#,
    );
    out.push_str(&axis("Axis0", columns));
    out.push_str(&axis("Axis1", rows));
    out.push_str("\n        <Axis name=\"SlicerAxis\"><Tuples><Tuple/></Tuples></Axis>");
    out.push_str("\n      </Axes>\n      <CellData>");
    for (ordinal, cell) in cells.iter().enumerate() {
        let Some(value) = cell else { continue };
        if ordinals {
            out.push_str(&format!(
                "\n        <Cell CellOrdinal=\"{}\"><Value xsi:type=\"xsd:double\">{}</Value><FmtValue>{}</FmtValue></Cell>",
                ordinal,
                escape(value),
                escape(value)
            ));
        } else {
            out.push_str(&format!(
                "\n        <Cell><Value xsi:type=\"xsd:double\">{}</Value></Cell>",
                escape(value)
            ));
        }
    }
    out.push_str("\n      </CellData>\n      </root>\n      </cxmla:return>\n    </cxmla:ExecuteResponse>");
    out.push_str(ENVELOPE_CLOSE);
    out
}

/// The 2x2 grid used across tests: rows R1/R2 of hierarchy H1, columns
/// C1/C2, values 10 20 / 30 40.
pub fn grid_2x2(ordinals: bool) -> String {
    execute_response(
        &[vec![m("[Measures]", "C1")], vec![m("[Measures]", "C2")]],
        &[vec![m("H1", "R1")], vec![m("H1", "R2")]],
        &[Some("10"), Some("20"), Some("30"), Some("40")],
        ordinals,
    )
}

/// A SOAP fault with an XMLA error description.
pub fn fault_response(description: &str) -> String {
    format!(
        r#"{open}
    <SOAP-ENV:Fault>
      <faultcode>SOAP-ENV:Server.00HSBE02</faultcode>
      <faultstring>XMLA MDX parse failed</faultstring>
      <faultactor>Mondrian</faultactor>
      <detail>
        <XA:error xmlns:XA="http://mondrian.sourceforge.net">
          <code>00HSBE02</code>
          <desc>{d}</desc>
        </XA:error>
        <Error ErrorCode="3238658121" Description="{d}" Source="Mondrian" HelpFile=""/>
      </detail>
    </SOAP-ENV:Fault>{close}"#,
        open = ENVELOPE_OPEN,
        close = ENVELOPE_CLOSE,
        d = escape(description),
    )
}

/// A Discover response with one `row` per entry.
pub fn discover_response(rows: &[&[(&str, &str)]]) -> String {
    let mut out = String::from(ENVELOPE_OPEN);
    out.push_str(
        r#"
    <cxmla:DiscoverResponse xmlns:cxmla="urn:schemas-microsoft-com:xml-analysis">
      <cxmla:return>
        <root xmlns="urn:schemas-microsoft-com:xml-analysis:rowset" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    );
    for row in rows {
        out.push_str("\n          <row>");
        for (key, value) in row.iter() {
            out.push_str(&format!("<{k}>{v}</{k}>", k = key, v = escape(value)));
        }
        out.push_str("</row>");
    }
    out.push_str("\n        </root>\n      </cxmla:return>\n    </cxmla:DiscoverResponse>");
    out.push_str(ENVELOPE_CLOSE);
    out
}
