//! Path templates such as `/users/:id` and the compilers turning them into
//! matchers.
//!
//! The [Router](crate::Router) only depends on the [Compiler] and [Matcher]
//! traits, so any path matching engine can be plugged in. [RegexCompiler] is
//! the default one.

use std::fmt::Debug;

pub use compiler::{RegexCompiler, RegexMatcher};
pub use error::{Error, Result};
pub use lexer::Kind;
pub use parser::{parse, Key, Modifier, Segment};

mod compiler;
mod error;
mod lexer;
mod parser;

/// Options used when compiling a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Anchor the match at the start of the input.
    pub start: bool,
    /// Require the match to consume the whole input. When `false` the
    /// template only has to match a delimited prefix.
    pub end: bool,
    /// Case sensitive matching.
    pub sensitive: bool,
    /// Disallow an optional trailing delimiter.
    pub strict: bool,
    /// Characters separating path segments.
    pub delimiter: String,
    /// Characters that are treated as a parameter prefix when they directly
    /// precede it, e.g. the `/` in `/:id`.
    pub prefixes: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            start: true,
            end: true,
            sensitive: false,
            strict: false,
            delimiter: "/#?".to_string(),
            prefixes: "./".to_string(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: bool) -> Self {
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: bool) -> Self {
        self.end = end;
        self
    }

    pub fn with_sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_delimiter<S: Into<String>>(mut self, delimiter: S) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_prefixes<S: Into<String>>(mut self, prefixes: S) -> Self {
        self.prefixes = prefixes.into();
        self
    }
}

/// Successful match of a [Matcher] against a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The part of the input consumed by the template.
    pub path: String,
    /// One entry per key, in declaration order. Optional parameters that did
    /// not participate in the match are `None`.
    pub groups: Vec<Option<String>>,
}

pub trait Matcher: Debug + Send + Sync {
    fn exec(&self, path: &str) -> Option<Match>;

    /// Human readable form of the compiled expression.
    fn source(&self) -> &str;
}

/// Output of a [Compiler]: the matcher and the keys its groups map to.
#[derive(Debug)]
pub struct Compiled {
    pub matcher: Box<dyn Matcher>,
    pub keys: Vec<Key>,
}

impl Compiled {
    pub fn param_names(&self) -> Vec<String> {
        self.keys.iter().map(|key| key.name.clone()).collect()
    }
}

pub type CompilerService = Box<dyn Compiler>;

pub trait Compiler: Send + Sync {
    fn compile(&self, template: &str, options: &Options) -> Result<Compiled>;
}

impl<C: Compiler + ?Sized> Compiler for Box<C> {
    fn compile(&self, template: &str, options: &Options) -> Result<Compiled> {
        (**self).compile(template, options)
    }
}

pub(crate) fn escape_class(chars: &str) -> String {
    chars
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect()
}
