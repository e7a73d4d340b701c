use serde::Serialize;

/// Raw submitted form fields, in submission order.
///
/// Lookups follow HTML form semantics: a repeated field yields its first value,
/// and an absent field yields `None` (distinct from an empty string).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormData {
  fields: Vec<(String, String)>,
}

impl FormData {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .fields
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }

  pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    self
      .fields
      .iter()
      .filter(move |(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }

  pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.fields.push((name.into(), value.into()));
  }

  pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.append(name, value);
    self
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }
}

impl From<Vec<(String, String)>> for FormData {
  fn from(fields: Vec<(String, String)>) -> Self {
    Self { fields }
  }
}
