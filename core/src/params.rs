//! Method parameters and their normalization into query pairs.
//!
//! VK expects list-valued parameters (`user_ids`, `fields`, ...) as a single
//! comma-separated string. `ParamValue` keeps the distinction between scalars
//! and lists until `normalize` flattens everything into `(String, String)`
//! pairs ready for the query string.

use crate::config::ClientConfig;

/// Query key carrying the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Query key carrying the API version.
pub const VERSION_KEY: &str = "v";
/// Query key carrying the response language.
pub const LANG_KEY: &str = "lang";

const RESERVED_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, VERSION_KEY, LANG_KEY];

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

impl ParamValue {
    /// Collect any sequence of displayable items into a list value.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        ParamValue::List(items.into_iter().map(|item| item.to_string()).collect())
    }

    /// The wire form: scalars as-is, lists joined with `,` in order.
    pub fn to_query_value(&self) -> String {
        match self {
            ParamValue::Scalar(value) => value.clone(),
            ParamValue::List(items) => items.join(","),
        }
    }
}

macro_rules! scalar_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Scalar(value.to_string())
                }
            }

            impl From<Vec<$ty>> for ParamValue {
                fn from(values: Vec<$ty>) -> Self {
                    ParamValue::list(values)
                }
            }

            impl From<&[$ty]> for ParamValue {
                fn from(values: &[$ty]) -> Self {
                    ParamValue::list(values)
                }
            }

            impl<const N: usize> From<[$ty; N]> for ParamValue {
                fn from(values: [$ty; N]) -> Self {
                    ParamValue::list(values)
                }
            }
        )*
    };
}

scalar_from!(&str, String, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, bool);

/// Parameters for one API call, in insertion order.
///
/// Inserting a key that already exists replaces its value in place, so the
/// key keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `insert`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Flatten `params` and stamp the token, version and language from `config`.
///
/// The three reserved keys come first and always carry the configured
/// values; caller entries under the same keys are dropped. Remaining entries
/// follow in insertion order.
pub fn normalize(config: &ClientConfig, params: Params) -> Vec<(String, String)> {
    let mut query = Vec::with_capacity(params.len() + RESERVED_KEYS.len());
    query.push((ACCESS_TOKEN_KEY.to_string(), config.token.clone()));
    query.push((VERSION_KEY.to_string(), config.api_version.clone()));
    query.push((LANG_KEY.to_string(), config.lang.clone()));

    query.extend(
        params
            .entries
            .into_iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| {
                let value = value.to_query_value();
                (key, value)
            }),
    );
    query
}
