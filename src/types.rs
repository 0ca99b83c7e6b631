use serde::Deserialize;

/// Url-encoded fields in the order they were sent. Repeated names are kept,
/// so lookups can take the first occurrence.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct FormFields(pub Vec<(String, String)>);

impl FormFields {
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The `url` field as a form submission sees it: body values win over query
/// values, only the first value counts, and an empty first value means no URL.
pub fn submitted_url(body: &FormFields, query: &FormFields) -> Option<String> {
    body.first("url")
        .or_else(|| query.first("url"))
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}
