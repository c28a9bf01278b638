//! Typed path parameters extracted during dispatch.
//!
//! Integer placeholders (`{id:i}`) coerce to [`ParamValue::Int`] at match
//! time; every other placeholder class yields [`ParamValue::Str`].

use std::collections::HashMap;
use std::fmt;

/// A single extracted path-parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
	/// Value captured by an `{name:i}` placeholder.
	Int(i64),
	/// Value captured by any non-integer placeholder.
	Str(String),
}

impl ParamValue {
	/// Returns the integer value, if this parameter was captured as one.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(v) => Some(*v),
			Self::Str(_) => None,
		}
	}

	/// Returns the string value, if this parameter was captured as one.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Int(_) => None,
			Self::Str(v) => Some(v),
		}
	}
}

impl fmt::Display for ParamValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(v) => write!(f, "{}", v),
			Self::Str(v) => write!(f, "{}", v),
		}
	}
}

impl From<i64> for ParamValue {
	fn from(v: i64) -> Self {
		Self::Int(v)
	}
}

impl From<&str> for ParamValue {
	fn from(v: &str) -> Self {
		Self::Str(v.to_string())
	}
}

/// Map of placeholder names to extracted values for one matched request.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use mindy_routers::Router;
///
/// let mut router = Router::new();
/// router.get("/blog/view/{id:i}", "blog-view").unwrap();
///
/// let result = router.dispatch(&Method::GET, "/blog/view/7");
/// let params = result.params().unwrap();
/// assert_eq!(params.get_int("id"), Some(7));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
	values: HashMap<String, ParamValue>,
}

impl PathParams {
	pub fn new() -> Self {
		Self {
			values: HashMap::new(),
		}
	}

	pub(crate) fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
		self.values.insert(name.into(), value);
	}

	/// Returns the raw value for a parameter, if it was captured.
	pub fn get(&self, name: &str) -> Option<&ParamValue> {
		self.values.get(name)
	}

	/// Returns the integer value for a parameter captured by an `i` placeholder.
	pub fn get_int(&self, name: &str) -> Option<i64> {
		self.values.get(name).and_then(ParamValue::as_int)
	}

	/// Returns the string value for a parameter captured by a non-integer placeholder.
	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.values.get(name).and_then(ParamValue::as_str)
	}

	/// True when the parameter was captured, regardless of its type.
	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterates over captured `(name, value)` pairs in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn typed_accessors() {
		let mut params = PathParams::new();
		params.insert("id", ParamValue::Int(42));
		params.insert("slug", ParamValue::Str("hello-world".to_string()));

		assert_eq!(params.get_int("id"), Some(42));
		assert_eq!(params.get_str("id"), None);
		assert_eq!(params.get_str("slug"), Some("hello-world"));
		assert_eq!(params.get_int("slug"), None);
		assert!(params.get("missing").is_none());
	}

	#[rstest]
	fn capture_conversions() {
		assert_eq!(ParamValue::from(7i64), ParamValue::Int(7));
		assert_eq!(ParamValue::from("joe"), ParamValue::Str("joe".to_string()));
	}

	#[rstest]
	fn display_renders_both_variants() {
		assert_eq!(ParamValue::Int(7).to_string(), "7");
		assert_eq!(ParamValue::Str("joe".to_string()).to_string(), "joe");
	}

	#[rstest]
	fn len_and_contains() {
		let mut params = PathParams::new();
		assert!(params.is_empty());
		params.insert("a", ParamValue::Int(1));
		assert_eq!(params.len(), 1);
		assert!(params.contains("a"));
		assert!(!params.contains("b"));
	}
}
