use std::fmt::Display;

use super::lexer::Kind;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure raised while turning a path template into a matcher.
#[derive(Debug)]
pub enum Error {
    MissingParameterName(usize),
    MissingPattern(usize),
    UnbalancedPattern(usize),
    PatternStartsWithModifier(usize),
    CapturingGroup(usize),
    TrailingEscape(usize),
    UnexpectedToken {
        found: Kind,
        index: usize,
        expected: Kind,
    },
    RepeatWithoutAffix(String),
    EmptyDelimiter,
    Regex(regex::Error),
    Message(String),
}

impl Error {
    pub fn new<S: AsRef<str>>(message: S) -> Self {
        Self::Message(message.as_ref().to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(value: regex::Error) -> Self {
        Self::Regex(value)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingParameterName(index) => write!(f, "Missing parameter name at {index}"),
            Self::MissingPattern(index) => write!(f, "Missing pattern at {index}"),
            Self::UnbalancedPattern(index) => write!(f, "Unbalanced pattern at {index}"),
            Self::PatternStartsWithModifier(index) => {
                write!(f, "Pattern cannot start with \"?\" at {index}")
            }
            Self::CapturingGroup(index) => write!(f, "Capturing groups are not allowed at {index}"),
            Self::TrailingEscape(index) => write!(f, "Nothing to escape at {index}"),
            Self::UnexpectedToken {
                found,
                index,
                expected,
            } => write!(f, "Unexpected {found} at {index}, expected {expected}"),
            Self::RepeatWithoutAffix(name) => {
                write!(f, "Can not repeat \"{name}\" without a prefix and suffix")
            }
            Self::EmptyDelimiter => "Delimiter must contain at least one character".fmt(f),
            Self::Regex(error) => write!(f, "Invalid route expression: {error}"),
            Self::Message(message) => message.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Regex(error) => Some(error),
            _ => None,
        }
    }
}
