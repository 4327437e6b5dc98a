//! MDX Tokens - the atomic units of MDX output.
//!
//! Unique names (`[Store].[Store Country]`) are emitted verbatim. The server
//! is the only judge of their legality.

/// MDX Token - every element the statement builder emits.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    NonEmpty,
    On,
    Columns,
    Rows,
    From,
    DimensionProperties,

    // === Member Functions ===
    Children,
    CurrentMember,
    Properties,

    // === Punctuation ===
    Comma,
    Dot,
    Star,
    LBrace,
    RBrace,
    LParen,
    RParen,

    // === Whitespace ===
    Space,

    // === Dynamic Content ===
    /// Unique name of a dimension, hierarchy, level or measure.
    Name(String),
    /// Cube reference, rendered in brackets.
    Cube(String),
    /// Double-quoted string argument.
    LitString(String),
}

impl Token {
    /// Serialize this token to MDX text.
    pub fn serialize(&self) -> String {
        match self {
            // Keywords
            Token::Select => "SELECT".into(),
            Token::NonEmpty => "NON EMPTY".into(),
            Token::On => "ON".into(),
            Token::Columns => "COLUMNS".into(),
            Token::Rows => "ROWS".into(),
            Token::From => "FROM".into(),
            Token::DimensionProperties => "DIMENSION PROPERTIES".into(),

            // Member functions
            Token::Children => "Children".into(),
            Token::CurrentMember => "CurrentMember".into(),
            Token::Properties => "Properties".into(),

            // Punctuation
            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::Star => "*".into(),
            Token::LBrace => "{".into(),
            Token::RBrace => "}".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),

            Token::Space => " ".into(),

            // Dynamic
            Token::Name(name) => name.clone(),
            Token::Cube(name) => format!("[{}]", name),
            Token::LitString(s) => format!("\"{}\"", s),
        }
    }
}

/// A stream of tokens that can be serialized to MDX.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Extend with multiple tokens.
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) -> &mut Self {
        self.tokens.extend(tokens);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Append streams separated by `sep` tokens.
    pub fn join(&mut self, parts: &[TokenStream], sep: &[Token]) -> &mut Self {
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                self.extend(sep.iter().cloned());
            }
            self.append(part);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Serialize all tokens to an MDX string.
    pub fn serialize(&self) -> String {
        self.tokens.iter().map(Token::serialize).collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn dot(&mut self) -> &mut Self {
        self.push(Token::Dot)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}
