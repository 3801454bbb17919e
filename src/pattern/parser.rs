use std::mem;

use super::lexer::{lex, Kind, Token};
use super::{Error, Options, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `?`
    Optional,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
}

impl Modifier {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "?" => Some(Self::Optional),
            "*" => Some(Self::ZeroOrMore),
            "+" => Some(Self::OneOrMore),
            _ => None,
        }
    }

    pub fn is_repeat(&self) -> bool {
        matches!(self, Self::ZeroOrMore | Self::OneOrMore)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Optional => "?",
            Self::ZeroOrMore => "*",
            Self::OneOrMore => "+",
        }
    }
}

/// A parameter declared by a template, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub name: String,
    pub prefix: String,
    pub suffix: String,
    pub pattern: String,
    pub modifier: Option<Modifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Param(Key),
    /// A `{...}` group without a parameter, e.g. `{/api}?`.
    Group {
        prefix: String,
        suffix: String,
        modifier: Option<Modifier>,
    },
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn try_consume(&mut self, kind: Kind) -> Option<String> {
        match self.tokens.get(self.position) {
            Some(token) if token.kind == kind => {
                self.position += 1;
                Some(token.value.clone())
            }
            _ => None,
        }
    }

    fn must_consume(&mut self, kind: Kind) -> Result<String> {
        if let Some(value) = self.try_consume(kind) {
            return Ok(value);
        }
        let (found, index) = self
            .tokens
            .get(self.position)
            .map(|token| (token.kind, token.index))
            .unwrap_or((Kind::End, 0));
        Err(Error::UnexpectedToken {
            found,
            index,
            expected: kind,
        })
    }

    fn try_modifier(&mut self) -> Option<Modifier> {
        self.try_consume(Kind::Modifier)
            .and_then(|value| Modifier::parse(&value))
    }

    fn consume_text(&mut self) -> String {
        let mut text = String::new();
        while let Some(value) = self
            .try_consume(Kind::Char)
            .or_else(|| self.try_consume(Kind::EscapedChar))
        {
            text.push_str(&value);
        }
        text
    }

    fn has_more(&self) -> bool {
        self.position < self.tokens.len()
    }
}

fn default_pattern(options: &Options) -> String {
    format!("[^{}]+?", super::escape_class(&options.delimiter))
}

/// Parses a path template into literal text, parameters and groups.
pub fn parse(template: &str, options: &Options) -> Result<Vec<Segment>> {
    let mut parser = Parser {
        tokens: lex(template)?,
        position: 0,
    };
    let default_pattern = default_pattern(options);
    let mut segments = Vec::new();
    let mut unnamed = 0usize;
    let mut path = String::new();
    let mut next_unnamed = || {
        let name = unnamed.to_string();
        unnamed += 1;
        name
    };

    while parser.has_more() {
        let char = parser.try_consume(Kind::Char);
        let name = parser.try_consume(Kind::Name);
        let pattern = parser.try_consume(Kind::Pattern);

        if name.is_some() || pattern.is_some() {
            let mut prefix = char.unwrap_or_default();
            if !options.prefixes.contains(prefix.as_str()) {
                path.push_str(&prefix);
                prefix.clear();
            }
            if !path.is_empty() {
                segments.push(Segment::Text(mem::take(&mut path)));
            }
            segments.push(Segment::Param(Key {
                name: name.unwrap_or_else(&mut next_unnamed),
                prefix,
                suffix: String::new(),
                pattern: pattern.unwrap_or_else(|| default_pattern.clone()),
                modifier: parser.try_modifier(),
            }));
            continue;
        }

        if let Some(value) = char.or_else(|| parser.try_consume(Kind::EscapedChar)) {
            path.push_str(&value);
            continue;
        }

        if !path.is_empty() {
            segments.push(Segment::Text(mem::take(&mut path)));
        }

        if parser.try_consume(Kind::Open).is_some() {
            let prefix = parser.consume_text();
            let name = parser.try_consume(Kind::Name);
            let pattern = parser.try_consume(Kind::Pattern);
            let suffix = parser.consume_text();
            parser.must_consume(Kind::Close)?;
            let modifier = parser.try_modifier();

            let segment = match (name, pattern) {
                (None, None) => Segment::Group {
                    prefix,
                    suffix,
                    modifier,
                },
                (name, pattern) => Segment::Param(Key {
                    name: name.unwrap_or_else(&mut next_unnamed),
                    prefix,
                    suffix,
                    pattern: pattern.unwrap_or_else(|| default_pattern.clone()),
                    modifier,
                }),
            };
            segments.push(segment);
            continue;
        }

        parser.must_consume(Kind::End)?;
    }

    Ok(segments)
}
