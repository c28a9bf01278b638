//! Reverse resolution: route name plus parameter values back to a URI.
//!
//! `reverse(name, params)` walks the named route's compiled tokens, emitting
//! literal text verbatim and substituting placeholder values. Values are
//! validated against each placeholder's declared type class, which is what
//! makes the round-trip law hold: dispatching the reversed URI always matches
//! the original route with equal parameters.

use crate::error::ReverseError;
use crate::pattern::PatternToken;
use crate::router::Router;
use std::collections::HashMap;

/// Parameter values supplied to [`Router::reverse`].
///
/// A single scalar, a positional sequence, or a name→value map; built via
/// `From` conversions at the call site.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use mindy_routers::Router;
///
/// let mut router = Router::new();
/// router
/// 	.named(Method::GET, "/users/{id:i}/posts/{slug:c}", "post", "h")
/// 	.unwrap();
///
/// // Positional sequence...
/// assert_eq!(
/// 	router.reverse("post", vec!["7", "intro"]).unwrap(),
/// 	"/users/7/posts/intro"
/// );
/// // ...or named pairs.
/// assert_eq!(
/// 	router
/// 		.reverse_with("post", &[("slug", "intro"), ("id", "7")])
/// 		.unwrap(),
/// 	"/users/7/posts/intro"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub enum ReverseParams {
	/// No values; only literal-only or fully-optional patterns reverse.
	#[default]
	None,
	/// Values consumed left to right by the pattern's placeholders.
	Positional(Vec<String>),
	/// Values looked up by placeholder name.
	Named(HashMap<String, String>),
}

impl ReverseParams {
	/// Builds a named map from `(name, value)` pairs.
	pub fn named<K: AsRef<str>, V: ToString>(pairs: &[(K, V)]) -> Self {
		Self::Named(
			pairs
				.iter()
				.map(|(k, v)| (k.as_ref().to_string(), v.to_string()))
				.collect(),
		)
	}
}

impl From<()> for ReverseParams {
	fn from(_: ()) -> Self {
		Self::None
	}
}

impl From<i32> for ReverseParams {
	fn from(v: i32) -> Self {
		Self::Positional(vec![v.to_string()])
	}
}

impl From<i64> for ReverseParams {
	fn from(v: i64) -> Self {
		Self::Positional(vec![v.to_string()])
	}
}

impl From<u64> for ReverseParams {
	fn from(v: u64) -> Self {
		Self::Positional(vec![v.to_string()])
	}
}

impl From<&str> for ReverseParams {
	fn from(v: &str) -> Self {
		Self::Positional(vec![v.to_string()])
	}
}

impl From<String> for ReverseParams {
	fn from(v: String) -> Self {
		Self::Positional(vec![v])
	}
}

impl From<Vec<String>> for ReverseParams {
	fn from(values: Vec<String>) -> Self {
		Self::Positional(values)
	}
}

impl From<Vec<&str>> for ReverseParams {
	fn from(values: Vec<&str>) -> Self {
		Self::Positional(values.into_iter().map(str::to_string).collect())
	}
}

impl From<&[&str]> for ReverseParams {
	fn from(values: &[&str]) -> Self {
		Self::Positional(values.iter().map(|v| v.to_string()).collect())
	}
}

impl From<Vec<i64>> for ReverseParams {
	fn from(values: Vec<i64>) -> Self {
		Self::Positional(values.iter().map(i64::to_string).collect())
	}
}

impl From<HashMap<String, String>> for ReverseParams {
	fn from(map: HashMap<String, String>) -> Self {
		Self::Named(map)
	}
}

impl<H> Router<H> {
	/// Reconstructs the URI for a named route.
	///
	/// An optional placeholder with no supplied value is omitted along with
	/// the literal run trailing it; everything after the first omitted
	/// optional is unreachable by construction, so emission stops there.
	///
	/// # Errors
	///
	/// [`ReverseError::UnknownRoute`] for an unregistered name,
	/// [`ReverseError::MissingParameter`] when a required placeholder has no
	/// value, [`ReverseError::InvalidParameter`] when a value fails its
	/// placeholder's type class. All recoverable; callers may fall back.
	///
	/// # Examples
	///
	/// ```
	/// use http::Method;
	/// use mindy_routers::Router;
	///
	/// let mut router = Router::new();
	/// router
	/// 	.named(Method::GET, "/blog/view/{id:i}", "blog:view", "view")
	/// 	.unwrap();
	/// router
	/// 	.named(Method::GET, "/user/{name:c}?", "user", "profile")
	/// 	.unwrap();
	///
	/// assert_eq!(router.reverse("blog:view", 1).unwrap(), "/blog/view/1");
	/// assert_eq!(router.reverse("user", "joe").unwrap(), "/user/joe");
	/// // Omitted optional drops its leading slash too.
	/// assert_eq!(router.reverse("user", ()).unwrap(), "/user");
	/// ```
	pub fn reverse(
		&self,
		name: &str,
		params: impl Into<ReverseParams>,
	) -> Result<String, ReverseError> {
		let route = self
			.route_by_name(name)
			.ok_or_else(|| ReverseError::UnknownRoute(name.to_string()))?;
		let params = params.into();

		let mut out = String::new();
		let mut pending = String::new();
		let mut position = 0usize;

		for token in route.pattern().tokens() {
			match token {
				PatternToken::Literal(text) => pending.push_str(text),
				PatternToken::Param(spec) => {
					let value = match &params {
						ReverseParams::None => None,
						ReverseParams::Positional(values) => {
							let v = values.get(position).cloned();
							position += 1;
							v
						}
						ReverseParams::Named(map) => map.get(&spec.name).cloned(),
					};
					match value {
						Some(value) => {
							if !spec.ty.accepts(&value) {
								return Err(ReverseError::InvalidParameter {
									param: spec.name.clone(),
									value,
								});
							}
							out.push_str(&pending);
							pending.clear();
							out.push_str(&value);
						}
						None if spec.optional => {
							// Mirror the pattern compiler: the literal run
							// from its last `/` belongs to the omitted group.
							let split = pending.rfind('/').unwrap_or(0);
							out.push_str(&pending[..split]);
							return Ok(out);
						}
						None => {
							return Err(ReverseError::MissingParameter {
								route: name.to_string(),
								param: spec.name.clone(),
							});
						}
					}
				}
			}
		}
		out.push_str(&pending);
		Ok(out)
	}

	/// Convenience wrapper taking `(name, value)` pairs.
	pub fn reverse_with<K: AsRef<str>, V: ToString>(
		&self,
		name: &str,
		pairs: &[(K, V)],
	) -> Result<String, ReverseError> {
		self.reverse(name, ReverseParams::named(pairs))
	}
}
