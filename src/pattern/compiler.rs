use regex::{Regex, RegexBuilder};

use super::{
    escape_class, parse, Compiled, Compiler, Error, Key, Match, Matcher, Modifier, Options,
    Result, Segment,
};

/// Compiles templates into [Regex] based matchers.
///
/// The generated expression wraps the consumed part of the path in the first
/// group, followed by one group per key. Prefix routes consume the delimiter
/// following the match outside of that group.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexCompiler;

impl RegexCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl Compiler for RegexCompiler {
    fn compile(&self, template: &str, options: &Options) -> Result<Compiled> {
        if options.delimiter.is_empty() {
            return Err(Error::EmptyDelimiter);
        }
        let segments = parse(template, options)?;
        let source = to_source(&segments, options)?;
        let regex = RegexBuilder::new(&source)
            .case_insensitive(!options.sensitive)
            .build()?;
        let keys = segments
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Param(key) => Some(key),
                _ => None,
            })
            .collect::<Vec<_>>();
        // custom patterns may still smuggle in named groups such as `(?P<x>..)`
        if regex.captures_len() != keys.len() + 2 {
            return Err(Error::CapturingGroup(0));
        }
        Ok(Compiled {
            matcher: Box::new(RegexMatcher {
                regex,
                groups: keys.len(),
            }),
            keys,
        })
    }
}

fn modifier(modifier: Option<Modifier>) -> &'static str {
    modifier.map(|m| m.as_str()).unwrap_or_default()
}

fn key_to_source(key: &Key) -> Result<String> {
    let prefix = regex::escape(&key.prefix);
    let suffix = regex::escape(&key.suffix);
    let pattern = &key.pattern;

    if prefix.is_empty() && suffix.is_empty() {
        if key.modifier.is_some_and(|m| m.is_repeat()) {
            return Err(Error::RepeatWithoutAffix(key.name.clone()));
        }
        return Ok(format!("({pattern}){}", modifier(key.modifier)));
    }

    Ok(match key.modifier {
        Some(Modifier::ZeroOrMore) | Some(Modifier::OneOrMore) => {
            let optional = if key.modifier == Some(Modifier::ZeroOrMore) {
                "?"
            } else {
                ""
            };
            format!(
                "(?:{prefix}((?:{pattern})(?:{suffix}{prefix}(?:{pattern}))*){suffix}){optional}"
            )
        }
        other => format!("(?:{prefix}({pattern}){suffix}){}", modifier(other)),
    })
}

/// Builds the regular expression source for parsed segments.
pub(crate) fn to_source(segments: &[Segment], options: &Options) -> Result<String> {
    let delimiter = format!("[{}]", escape_class(&options.delimiter));
    let mut body = String::new();

    for segment in segments {
        match segment {
            Segment::Text(text) => body.push_str(&regex::escape(text)),
            Segment::Param(key) => body.push_str(&key_to_source(key)?),
            Segment::Group {
                prefix,
                suffix,
                modifier: m,
            } => body.push_str(&format!(
                "(?:{}{}){}",
                regex::escape(prefix),
                regex::escape(suffix),
                modifier(*m)
            )),
        }
    }

    let (trailer, boundary) = if options.end {
        let trailer = if options.strict {
            String::new()
        } else {
            format!("{delimiter}?")
        };
        (trailer, "$".to_string())
    } else {
        let trailer = if options.strict {
            String::new()
        } else {
            format!("(?:{delimiter}$)?")
        };
        let end_delimited = match segments.last() {
            Some(Segment::Text(text)) => text
                .chars()
                .last()
                .is_some_and(|c| options.delimiter.contains(c)),
            Some(_) => false,
            None => true,
        };
        let boundary = if end_delimited {
            String::new()
        } else {
            format!("(?:{delimiter}|$)")
        };
        (trailer, boundary)
    };

    let start = if options.start { "^" } else { "" };
    Ok(format!("{start}({body}{trailer}){boundary}"))
}

#[derive(Debug)]
pub struct RegexMatcher {
    regex: Regex,
    groups: usize,
}

impl RegexMatcher {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl Matcher for RegexMatcher {
    fn exec(&self, path: &str) -> Option<Match> {
        let captures = self.regex.captures(path)?;
        let matched = captures.get(1)?;
        let groups = (0..self.groups)
            .map(|index| captures.get(index + 2).map(|m| m.as_str().to_string()))
            .collect();
        Some(Match {
            path: matched.as_str().to_string(),
            groups,
        })
    }

    fn source(&self) -> &str {
        self.regex.as_str()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn compile(template: &str, options: Options) -> Compiled {
        RegexCompiler.compile(template, &options).unwrap()
    }

    fn strict(end: bool) -> Options {
        Options::default()
            .with_end(end)
            .with_sensitive(true)
            .with_strict(true)
    }

    fn groups(compiled: &Compiled, path: &str) -> Option<Vec<Option<String>>> {
        compiled.matcher.exec(path).map(|m| m.groups)
    }

    #[test]
    fn test_source() {
        assert_eq!(
            compile("/test", strict(false)).matcher.source(),
            "^(/test)(?:[/\\#\\?]|$)"
        );
        assert_eq!(compile("/test", strict(true)).matcher.source(), "^(/test)$");
    }

    #[test]
    fn test_exact_match() {
        let compiled = compile("/test", strict(true));
        assert!(compiled.matcher.exec("/test").is_some());
        assert!(compiled.matcher.exec("/test/").is_none());
        assert!(compiled.matcher.exec("/test/x").is_none());
        assert!(compiled.matcher.exec("/TEST").is_none());
    }

    #[test]
    fn test_prefix_match() {
        let compiled = compile("/test", strict(false));
        assert_eq!(compiled.matcher.exec("/test/x").unwrap().path, "/test");
        assert!(compiled.matcher.exec("/test").is_some());
        assert!(compiled.matcher.exec("/test?q=1").is_some());
        assert!(compiled.matcher.exec("/test#top").is_some());
        assert!(compiled.matcher.exec("/testx").is_none());
        assert!(compiled.matcher.exec("/other/test").is_none());
    }

    #[test]
    fn test_prefix_ending_with_delimiter() {
        let compiled = compile("/test/", strict(false));
        assert!(compiled.matcher.exec("/test/x").is_some());
        assert!(compiled.matcher.exec("/test").is_none());
    }

    #[test]
    fn test_parameters() {
        let compiled = compile("/test/:id/:group", strict(false));
        assert_eq!(compiled.param_names(), vec!["id", "group"]);
        assert_eq!(
            groups(&compiled, "/test/123/abc/more"),
            Some(vec![Some("123".to_string()), Some("abc".to_string())])
        );
        assert_eq!(groups(&compiled, "/test/123"), None);
    }

    #[test]
    fn test_optional_parameter() {
        let compiled = compile("/users/:id?", strict(true));
        assert_eq!(groups(&compiled, "/users"), Some(vec![None]));
        assert_eq!(
            groups(&compiled, "/users/7"),
            Some(vec![Some("7".to_string())])
        );
    }

    #[test]
    fn test_repeated_parameter() {
        let compiled = compile("/files/:path+", strict(true));
        assert_eq!(
            groups(&compiled, "/files/a/b/c"),
            Some(vec![Some("a/b/c".to_string())])
        );
        assert_eq!(groups(&compiled, "/files"), None);
        let compiled = compile("/files/:path*", strict(true));
        assert_eq!(groups(&compiled, "/files"), Some(vec![None]));
    }

    #[test]
    fn test_custom_pattern() {
        let compiled = compile("/users/:id(\\d+)", strict(true));
        assert!(compiled.matcher.exec("/users/42").is_some());
        assert!(compiled.matcher.exec("/users/abc").is_none());
    }

    #[test]
    fn test_loose_options() {
        let compiled = compile("/test", Options::default());
        assert!(compiled.matcher.exec("/TEST").is_some());
        assert!(compiled.matcher.exec("/test/").is_some());
        assert!(compiled.matcher.exec("/test/x").is_none());
        let compiled = compile("/test", Options::default().with_end(false));
        assert_eq!(compiled.matcher.exec("/test/").unwrap().path, "/test/");
    }

    #[test]
    fn test_compile_errors() {
        let result = RegexCompiler.compile("/:id+", &Options::default().with_prefixes(""));
        assert!(matches!(result, Err(Error::RepeatWithoutAffix(name)) if name == "id"));
        let result = RegexCompiler.compile("/:id((?P<x>a))", &Options::default());
        assert!(matches!(result, Err(Error::CapturingGroup(_))));
        let result = RegexCompiler.compile("/:id([)", &Options::default());
        assert!(matches!(result, Err(Error::Regex(_))));
        let result = RegexCompiler.compile("/test", &Options::default().with_delimiter(""));
        assert!(matches!(result, Err(Error::EmptyDelimiter)));
    }
}
