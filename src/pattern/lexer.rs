use std::fmt::Display;

use super::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Open,
    Close,
    Pattern,
    Name,
    Char,
    EscapedChar,
    Modifier,
    End,
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Open => "OPEN",
            Self::Close => "CLOSE",
            Self::Pattern => "PATTERN",
            Self::Name => "NAME",
            Self::Char => "CHAR",
            Self::EscapedChar => "ESCAPED_CHAR",
            Self::Modifier => "MODIFIER",
            Self::End => "END",
        };
        name.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: Kind,
    pub index: usize,
    pub value: String,
}

impl Token {
    fn new(kind: Kind, index: usize, value: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            value: value.into(),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits a path template into tokens. Indices are character positions.
pub fn lex(template: &str) -> Result<Vec<Token>> {
    let chars = template.chars().collect::<Vec<_>>();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' | '+' | '?' => {
                tokens.push(Token::new(Kind::Modifier, i, c));
                i += 1;
            }
            '\\' => {
                let escaped = chars.get(i + 1).ok_or(Error::TrailingEscape(i))?;
                tokens.push(Token::new(Kind::EscapedChar, i, *escaped));
                i += 2;
            }
            '{' => {
                tokens.push(Token::new(Kind::Open, i, c));
                i += 1;
            }
            '}' => {
                tokens.push(Token::new(Kind::Close, i, c));
                i += 1;
            }
            ':' => {
                let name = chars[i + 1..]
                    .iter()
                    .take_while(|c| is_name_char(**c))
                    .collect::<String>();
                if name.is_empty() {
                    return Err(Error::MissingParameterName(i));
                }
                let next = i + 1 + name.chars().count();
                tokens.push(Token::new(Kind::Name, i, name));
                i = next;
            }
            '(' => {
                let (pattern, next) = lex_pattern(&chars, i)?;
                tokens.push(Token::new(Kind::Pattern, i, pattern));
                i = next;
            }
            _ => {
                tokens.push(Token::new(Kind::Char, i, c));
                i += 1;
            }
        }
    }

    tokens.push(Token::new(Kind::End, i, ""));
    Ok(tokens)
}

/// Reads a balanced `( ... )` starting at `start`, returning its body and the
/// index just past the closing parenthesis.
fn lex_pattern(chars: &[char], start: usize) -> Result<(String, usize)> {
    let mut depth = 1;
    let mut pattern = String::new();
    let mut j = start + 1;

    if chars.get(j) == Some(&'?') {
        return Err(Error::PatternStartsWithModifier(j));
    }

    while j < chars.len() {
        match chars[j] {
            '\\' => {
                pattern.push('\\');
                if let Some(escaped) = chars.get(j + 1) {
                    pattern.push(*escaped);
                }
                j += 2;
                continue;
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    j += 1;
                    break;
                }
            }
            '(' => {
                depth += 1;
                if chars.get(j + 1) != Some(&'?') {
                    return Err(Error::CapturingGroup(j));
                }
            }
            _ => {}
        }
        pattern.push(chars[j]);
        j += 1;
    }

    if depth != 0 {
        return Err(Error::UnbalancedPattern(start));
    }
    if pattern.is_empty() {
        return Err(Error::MissingPattern(start));
    }
    Ok((pattern, j))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(template: &str) -> Vec<Kind> {
        lex(template)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_lex_named_parameters() {
        let tokens = lex("/users/:id").unwrap();
        assert_eq!(tokens.len(), 9);
        assert_eq!(tokens[7], Token::new(Kind::Name, 7, "id"));
        assert_eq!(tokens[8], Token::new(Kind::End, 10, ""));
    }

    #[test]
    fn test_lex_modifiers_and_groups() {
        assert_eq!(
            kinds("{/:id}?"),
            vec![
                Kind::Open,
                Kind::Char,
                Kind::Name,
                Kind::Close,
                Kind::Modifier,
                Kind::End
            ]
        );
        assert_eq!(kinds("\\:x"), vec![Kind::EscapedChar, Kind::Char, Kind::End]);
    }

    #[test]
    fn test_lex_custom_pattern() {
        let tokens = lex("/:id(\\d+)").unwrap();
        assert_eq!(tokens[2], Token::new(Kind::Pattern, 4, "\\d+"));
        let tokens = lex("/(a(?:b|c))").unwrap();
        assert_eq!(tokens[1].value, "a(?:b|c)");
    }

    #[test]
    fn test_lex_errors() {
        assert!(matches!(lex("/:"), Err(Error::MissingParameterName(1))));
        assert!(matches!(lex("/()"), Err(Error::MissingPattern(1))));
        assert!(matches!(lex("/(abc"), Err(Error::UnbalancedPattern(1))));
        assert!(matches!(lex("/(?:a)"), Err(Error::PatternStartsWithModifier(2))));
        assert!(matches!(lex("/(a(b))"), Err(Error::CapturingGroup(3))));
        assert!(matches!(lex("/a\\"), Err(Error::TrailingEscape(2))));
    }
}
