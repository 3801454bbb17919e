use std::collections::{hash_map, HashMap};

/// Parameters extracted from a matched path, keyed by parameter name.
///
/// Optional parameters that did not take part in the match are kept with a
/// `None` value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(HashMap<String, Option<String>>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Option::as_deref)
    }

    /// Whether the route declares `name`, regardless of whether it matched.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: String, value: Option<String>) {
        self.0.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn into_inner(self) -> HashMap<String, Option<String>> {
        self.0
    }
}

impl FromIterator<(String, Option<String>)> for Params {
    fn from_iter<T: IntoIterator<Item = (String, Option<String>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Params {
    fn from(values: [(&str, &str); N]) -> Self {
        values
            .into_iter()
            .map(|(name, value)| (name.to_string(), Some(value.to_string())))
            .collect()
    }
}

impl IntoIterator for Params {
    type Item = (String, Option<String>);
    type IntoIter = hash_map::IntoIter<String, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_params() {
        let mut params = Params::from([("id", "123")]);
        params.insert("format".to_string(), None);
        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.get("format"), None);
        assert!(params.contains("format"));
        assert!(!params.contains("group"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_later_values_win() {
        let params = vec![
            ("id".to_string(), Some("1".to_string())),
            ("id".to_string(), Some("2".to_string())),
        ]
        .into_iter()
        .collect::<Params>();
        assert_eq!(params, Params::from([("id", "2")]));
    }
}
