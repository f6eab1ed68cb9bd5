//! Ordered translation parameters and `{name}` substitution

/// Ordered `name -> value` pairs substituted into `{name}` placeholders.
///
/// Iteration follows insertion order. When a name is inserted twice the
/// first value wins during substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, builder style
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    /// Append a parameter
    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.entries.push((name.into(), value.to_string()));
    }

    /// Value of the first parameter called `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply `f` to every value, keeping names and order
    pub(crate) fn map_values(&self, mut f: impl FnMut(&str) -> String) -> Self {
        Self {
            entries: self.entries.iter().map(|(n, v)| (n.clone(), f(v))).collect(),
        }
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl<K: Into<String>, V: ToString, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Build [`Params`] from `name => value` pairs
///
/// ```
/// use polyglot_i18n::params;
///
/// let params = params!["name" => "Sam", "count" => 3];
/// assert_eq!(params.get("count"), Some("3"));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $(
            params.insert($name, $value);
        )+
        params
    }};
}

/// Replace every exact `{name}` in `template` with its value.
///
/// Single left-to-right pass: inserted values are never re-scanned, and
/// braces that do not enclose a known name are kept verbatim.
pub fn substitute(template: &str, params: &Params) -> String {
    if params.is_empty() || !template.contains('{') {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let replaced = after_open.find('}').and_then(|close| {
            params
                .get(&after_open[..close])
                .map(|value| (value, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}
