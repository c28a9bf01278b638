//! Route definition: a method spec, a compiled pattern and an opaque handler.

use crate::pattern::PathPattern;
use http::Method;
use std::fmt;

/// Which HTTP methods a route answers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodSpec {
	/// Answers every method.
	Any,
	/// Answers exactly one method.
	Only(Method),
}

impl MethodSpec {
	pub fn allows(&self, method: &Method) -> bool {
		match self {
			Self::Any => true,
			Self::Only(m) => m == method,
		}
	}
}

impl fmt::Display for MethodSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Any => write!(f, "ANY"),
			Self::Only(m) => write!(f, "{}", m),
		}
	}
}

impl From<Method> for MethodSpec {
	fn from(method: Method) -> Self {
		Self::Only(method)
	}
}

/// A single (method, pattern, handler) binding, optionally named.
///
/// The handler type `H` is opaque to the routing core: dispatch hands the
/// matched handler back to the caller and never invokes it. Routes are built
/// during table construction and read-only during dispatch.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use mindy_routers::{MethodSpec, PathPattern, Route};
///
/// let pattern = PathPattern::new("/blog/view/{id:i}").unwrap();
/// let route = Route::new(MethodSpec::Only(Method::GET), pattern, "blog-view")
/// 	.with_name("blog:view");
/// assert_eq!(route.name(), Some("blog:view"));
/// assert!(!route.is_csrf_exempt());
/// ```
#[derive(Debug, Clone)]
pub struct Route<H> {
	method: MethodSpec,
	pattern: PathPattern,
	handler: H,
	name: Option<String>,
	csrf_exempt: bool,
}

impl<H> Route<H> {
	pub fn new(method: impl Into<MethodSpec>, pattern: PathPattern, handler: H) -> Self {
		Self {
			method: method.into(),
			pattern,
			handler,
			name: None,
			csrf_exempt: false,
		}
	}

	/// Sets the route name used for reverse resolution.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Marks the route exempt from CSRF verification.
	///
	/// The routing core only carries the flag; enforcement belongs to the
	/// HTTP layer consuming the match.
	pub fn with_csrf_exempt(mut self) -> Self {
		self.csrf_exempt = true;
		self
	}

	pub fn method(&self) -> &MethodSpec {
		&self.method
	}

	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	pub fn handler(&self) -> &H {
		&self.handler
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn is_csrf_exempt(&self) -> bool {
		self.csrf_exempt
	}
}
