//! Named-parameter lookup over a URL-encoded parameter string.

use jose_probe::core::ParameterSource;

/// Parameters parsed from a query string or form body, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    pairs: Vec<(String, String)>,
}

impl QueryParameters {
    /// Parse `name=value` pairs separated by `&`. A leading `?` is ignored.
    ///
    /// Names are form-decoded; values are kept raw, exactly as they appear
    /// on the wire.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_name(name), value.to_string())
            })
            .collect();
        Self { pairs }
    }
}

fn decode_name(raw: &str) -> String {
    url::form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(name, _)| name.into_owned())
        .unwrap_or_default()
}

impl ParameterSource for QueryParameters {
    /// The first value given for `name`.
    fn parameter_value(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
