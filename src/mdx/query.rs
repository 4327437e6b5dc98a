//! Query builder - construct MDX SELECT statements with a fluent API.

use super::property::resolve_property;
use super::token::{Token, TokenStream};
use super::MdxRequest;
use crate::dialect::{Dialect, RowsStyle, XmlaDialect};

// =============================================================================
// Rows Axis Items
// =============================================================================

/// One cross-joined term of the rows axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisItem {
    /// `<dimension>.Children`
    Children(String),
    /// `<dimension>.CurrentMember.Properties("<property>")`
    MemberProperty { dimension: String, property: String },
}

impl AxisItem {
    pub fn children(dimension: &str) -> Self {
        AxisItem::Children(dimension.into())
    }

    pub fn member_property(dimension: &str, property: &str) -> Self {
        AxisItem::MemberProperty {
            dimension: dimension.into(),
            property: property.into(),
        }
    }

    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        match self {
            AxisItem::Children(dimension) => {
                ts.push(Token::Name(dimension.clone()))
                    .dot()
                    .push(Token::Children);
            }
            AxisItem::MemberProperty {
                dimension,
                property,
            } => {
                ts.push(Token::Name(dimension.clone()))
                    .dot()
                    .push(Token::CurrentMember)
                    .dot()
                    .push(Token::Properties)
                    .lparen()
                    .push(Token::LitString(property.clone()))
                    .rparen();
            }
        }
        ts
    }
}

// =============================================================================
// Query Builder
// =============================================================================

/// An MDX SELECT over one cube with a columns axis and a rows axis.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "MdxQuery has no effect until converted to MDX with to_mdx()"]
pub struct MdxQuery {
    pub cube: String,
    /// Measures on the columns axis.
    pub columns: Vec<String>,
    /// Cross-joined terms on the rows axis.
    pub rows: Vec<AxisItem>,
    /// Member properties requested with `DIMENSION PROPERTIES ... ON ROWS`.
    pub dimension_properties: Vec<String>,
}

impl MdxQuery {
    /// Create a new query over `cube`.
    pub fn new(cube: &str) -> Self {
        Self {
            cube: cube.into(),
            ..Default::default()
        }
    }

    /// Set the columns axis.
    pub fn columns<S: Into<String>>(mut self, measures: impl IntoIterator<Item = S>) -> Self {
        self.columns = measures.into_iter().map(Into::into).collect();
        self
    }

    /// Set the rows axis.
    pub fn rows(mut self, items: Vec<AxisItem>) -> Self {
        self.rows = items;
        self
    }

    /// Set the `DIMENSION PROPERTIES` list.
    pub fn dimension_properties<S: Into<String>>(
        mut self,
        properties: impl IntoIterator<Item = S>,
    ) -> Self {
        self.dimension_properties = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Lay out a request the way `dialect` expects it.
    pub fn from_request(request: &MdxRequest, dialect: Dialect) -> Self {
        let rows = match dialect.rows_style() {
            RowsStyle::CrossJoinChildren => request
                .dimensions
                .iter()
                .map(|d| AxisItem::children(d))
                .collect(),
            RowsStyle::EmbeddedProperties => request
                .dimensions
                .iter()
                .map(|d| match resolve_property(d, &request.properties) {
                    Some(property) => AxisItem::member_property(d, &property),
                    None => AxisItem::children(d),
                })
                .collect(),
        };

        let query = MdxQuery::new(&request.cube)
            .columns(request.measures.iter().cloned())
            .rows(rows);

        if dialect.supports_dimension_properties_clause() {
            query.dimension_properties(request.properties.iter().cloned())
        } else {
            query
        }
    }

    fn columns_tokens(&self) -> TokenStream {
        let parts: Vec<TokenStream> = self
            .columns
            .iter()
            .map(|m| {
                let mut ts = TokenStream::new();
                ts.push(Token::Name(m.clone()));
                ts
            })
            .collect();
        let mut ts = TokenStream::new();
        ts.join(&parts, &[Token::Comma, Token::Space]);
        ts
    }

    fn rows_tokens(&self) -> TokenStream {
        let parts: Vec<TokenStream> = self.rows.iter().map(AxisItem::to_tokens).collect();
        let mut ts = TokenStream::new();
        ts.join(&parts, &[Token::Space, Token::Star, Token::Space]);
        ts
    }

    /// Convert to tokens.
    ///
    /// `SELECT NON EMPTY {..} ON COLUMNS, NON EMPTY {..} ON ROWS
    /// [DIMENSION PROPERTIES .. ON ROWS] FROM [cube]`
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        ts.push(Token::Select)
            .space()
            .push(Token::NonEmpty)
            .space()
            .push(Token::LBrace)
            .append(&self.columns_tokens())
            .push(Token::RBrace)
            .space()
            .push(Token::On)
            .space()
            .push(Token::Columns)
            .comma()
            .space();

        ts.push(Token::NonEmpty)
            .space()
            .push(Token::LBrace)
            .append(&self.rows_tokens())
            .push(Token::RBrace)
            .space()
            .push(Token::On)
            .space()
            .push(Token::Rows)
            .space();

        if !self.dimension_properties.is_empty() {
            let parts: Vec<TokenStream> = self
                .dimension_properties
                .iter()
                .map(|p| {
                    let mut ts = TokenStream::new();
                    ts.push(Token::Name(p.clone()));
                    ts
                })
                .collect();
            ts.push(Token::DimensionProperties)
                .space()
                .join(&parts, &[Token::Comma, Token::Space])
                .space()
                .push(Token::On)
                .space()
                .push(Token::Rows)
                .space();
        }

        ts.push(Token::From)
            .space()
            .push(Token::Cube(self.cube.clone()));

        ts
    }

    /// Generate the MDX string.
    pub fn to_mdx(&self) -> String {
        self.to_tokens().serialize()
    }
}

impl std::fmt::Display for MdxQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_mdx())
    }
}
