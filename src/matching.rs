//! Dispatch: resolving `(method, path)` against the route table.
//!
//! Dispatch is a pure read over the immutable table. The only interior state
//! is a memo of trailing-slash lookups, which is a pure cache: behavior is
//! identical whether it is populated or not.

use crate::params::PathParams;
use crate::route::{MethodSpec, Route};
use crate::router::Router;
use http::{Method, StatusCode};

/// Maximum number of entries the trailing-slash memo retains.
///
/// Keys derive from request paths, so the memo must not grow without bound.
/// Once full it stops admitting new keys and lookups fall through to the
/// table scan, which is always correct (the cache is pure).
const SLASH_MEMO_CAPACITY: usize = 1024;

/// Outcome of one dispatch call.
///
/// "No match" is a normal, non-exceptional outcome: the HTTP layer turns
/// [`NotFound`](Self::NotFound) into a 404, [`MethodNotAllowed`](Self::MethodNotAllowed)
/// into a 405 with an `Allow` header, and [`Redirect`](Self::Redirect) into a
/// redirect response.
#[derive(Debug)]
pub enum MatchResult<'r, H> {
	/// A route matched; carries the route (handler, flags) and the extracted,
	/// type-coerced parameters.
	Matched {
		route: &'r Route<H>,
		params: PathParams,
	},
	/// No pattern matched under any method.
	NotFound,
	/// Some pattern matched, but only under other methods.
	MethodNotAllowed { allowed: Vec<Method> },
	/// The path matches with its trailing slash toggled and the
	/// trailing-slash hook asked for a redirect.
	Redirect {
		location: String,
		status: StatusCode,
	},
}

impl<'r, H> MatchResult<'r, H> {
	pub fn is_matched(&self) -> bool {
		matches!(self, Self::Matched { .. })
	}

	/// The matched route, if any.
	pub fn route(&self) -> Option<&'r Route<H>> {
		match self {
			Self::Matched { route, .. } => Some(route),
			_ => None,
		}
	}

	/// The matched handler, if any.
	pub fn handler(&self) -> Option<&'r H> {
		self.route().map(Route::handler)
	}

	/// The extracted parameters, if a route matched.
	pub fn params(&self) -> Option<&PathParams> {
		match self {
			Self::Matched { params, .. } => Some(params),
			_ => None,
		}
	}

	/// The allowed-method set, for a 405 outcome.
	pub fn allowed(&self) -> Option<&[Method]> {
		match self {
			Self::MethodNotAllowed { allowed } => Some(allowed),
			_ => None,
		}
	}
}

impl<H> Router<H> {
	/// Resolves `(method, path)` to a [`MatchResult`].
	///
	/// Any query string is stripped first. Routes are scanned in registration
	/// order and the first match wins; captures are coerced per their type
	/// tag. When nothing matches under `method`, the table is rescanned for
	/// other methods (405), and finally the trailing-slash toggle is tried.
	///
	/// # Examples
	///
	/// ```
	/// use http::Method;
	/// use mindy_routers::{MatchResult, Router};
	///
	/// let mut router = Router::new();
	/// router.get("/user/{name:c}?", "profile").unwrap();
	///
	/// let result = router.dispatch(&Method::GET, "/user/joe");
	/// assert_eq!(result.params().unwrap().get_str("name"), Some("joe"));
	///
	/// // The optional tail may be omitted entirely.
	/// let result = router.dispatch(&Method::GET, "/user");
	/// assert!(result.is_matched());
	/// assert!(!result.params().unwrap().contains("name"));
	/// ```
	pub fn dispatch(&self, method: &Method, path: &str) -> MatchResult<'_, H> {
		let path = match path.split_once('?') {
			Some((before, _)) => before,
			None => path,
		};

		for route in &self.routes {
			if route.method().allows(method)
				&& let Some(params) = route.pattern().match_path(path)
			{
				tracing::trace!(%method, path, pattern = route.pattern().source(), "matched route");
				return MatchResult::Matched { route, params };
			}
		}

		let mut allowed: Vec<Method> = Vec::new();
		for route in &self.routes {
			if let MethodSpec::Only(m) = route.method()
				&& m != method
				&& route.pattern().matches(path)
				&& !allowed.contains(m)
			{
				allowed.push(m.clone());
			}
		}
		if !allowed.is_empty() {
			return MatchResult::MethodNotAllowed { allowed };
		}

		if let Some(toggled) = toggle_trailing_slash(path)
			&& self.toggled_would_match(method, &toggled)
			&& let Some(status) = (self.trailing_slash)(path)
		{
			tracing::debug!(from = path, to = toggled.as_str(), %status, "trailing-slash redirect");
			return MatchResult::Redirect {
				location: toggled,
				status,
			};
		}

		MatchResult::NotFound
	}

	/// Memoized "would the slash-toggled path match" lookup.
	fn toggled_would_match(&self, method: &Method, toggled: &str) -> bool {
		let key = format!("{} {}", method, toggled);
		if let Some(&hit) = self.slash_memo.lock().get(&key) {
			return hit;
		}
		let hit = self
			.routes
			.iter()
			.any(|r| r.method().allows(method) && r.pattern().matches(toggled));
		let mut memo = self.slash_memo.lock();
		if memo.len() < SLASH_MEMO_CAPACITY {
			memo.insert(key, hit);
		}
		hit
	}
}

/// Appends a trailing slash if absent, strips it if present.
///
/// The root path `/` has no useful toggle (the empty path can never match)
/// and returns `None`.
fn toggle_trailing_slash(path: &str) -> Option<String> {
	if let Some(stripped) = path.strip_suffix('/') {
		if stripped.is_empty() {
			return None;
		}
		Some(stripped.to_string())
	} else {
		Some(format!("{}/", path))
	}
}
