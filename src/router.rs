//! Route table construction: registration, groups and prefix composition.
//!
//! A [`Router`] is built once at application bootstrap. Registration-time
//! errors (bad patterns, duplicate names) are fatal and surface as
//! [`RouterError`]; after registration the table is read-only and
//! [`dispatch`](Router::dispatch) takes `&self`, so a `Router` behind an
//! `Arc` is safe to share across request-handling threads. Hot reload is an
//! atomic swap of that `Arc` by the caller.

use crate::error::RouterError;
use crate::pattern::PathPattern;
use crate::route::{MethodSpec, Route};
use http::{Method, StatusCode};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Hook consulted when a path only matches with its trailing slash toggled.
///
/// Receives the original request path. `Some(status)` turns the dispatch into
/// a [`Redirect`](crate::MatchResult::Redirect) to the toggled path with that
/// status; `None` means no redirect and the dispatch falls through to
/// [`NotFound`](crate::MatchResult::NotFound).
pub type TrailingSlashHook = Arc<dyn Fn(&str) -> Option<StatusCode> + Send + Sync>;

/// The route table: an ordered sequence of routes plus a name index.
///
/// Registration order is priority order: when several patterns could match
/// the same URI, the earliest-registered route wins, including across
/// flattened groups.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use mindy_routers::Router;
///
/// let mut router = Router::new();
/// router.named(Method::GET, "/blog/", "blog:index", "index").unwrap();
/// router.named(Method::GET, "/blog/view/{id:i}", "blog:view", "view").unwrap();
///
/// let result = router.dispatch(&Method::GET, "/blog/view/1");
/// assert_eq!(result.handler(), Some(&"view"));
/// assert_eq!(router.reverse("blog:view", 1).unwrap(), "/blog/view/1");
/// ```
pub struct Router<H> {
	pub(crate) routes: Vec<Route<H>>,
	pub(crate) names: HashMap<String, usize>,
	pub(crate) trailing_slash: TrailingSlashHook,
	pub(crate) slash_memo: Mutex<HashMap<String, bool>>,
}

impl<H> Router<H> {
	pub fn new() -> Self {
		Self {
			routes: Vec::new(),
			names: HashMap::new(),
			trailing_slash: Arc::new(|_| Some(StatusCode::MOVED_PERMANENTLY)),
			slash_memo: Mutex::new(HashMap::new()),
		}
	}

	/// Replaces the trailing-slash hook.
	///
	/// # Examples
	///
	/// ```
	/// use http::{Method, StatusCode};
	/// use mindy_routers::{MatchResult, Router};
	///
	/// let mut router = Router::new().with_trailing_slash_hook(|_| None);
	/// router.get("/blog/", "index").unwrap();
	///
	/// // Hook returning None disables the redirect.
	/// assert!(matches!(
	/// 	router.dispatch(&Method::GET, "/blog"),
	/// 	MatchResult::NotFound
	/// ));
	/// ```
	pub fn with_trailing_slash_hook<F>(mut self, hook: F) -> Self
	where
		F: Fn(&str) -> Option<StatusCode> + Send + Sync + 'static,
	{
		self.trailing_slash = Arc::new(hook);
		self
	}

	/// Adds a pre-built route to the table.
	///
	/// Fails with [`RouterError::DuplicateRouteName`] if the route carries a
	/// name that is already taken.
	pub fn add_route(&mut self, route: Route<H>) -> Result<(), RouterError> {
		if let Some(name) = route.name() {
			if self.names.contains_key(name) {
				return Err(RouterError::DuplicateRouteName(name.to_string()));
			}
			self.names.insert(name.to_string(), self.routes.len());
		}
		tracing::debug!(
			pattern = route.pattern().source(),
			method = %route.method(),
			name = route.name().unwrap_or(""),
			"registered route"
		);
		self.routes.push(route);
		Ok(())
	}

	pub(crate) fn register(
		&mut self,
		method: MethodSpec,
		pattern: &str,
		name: Option<&str>,
		handler: H,
	) -> Result<(), RouterError> {
		let pattern = PathPattern::new(pattern)?;
		let mut route = Route::new(method, pattern, handler);
		if let Some(name) = name {
			route = route.with_name(name);
		}
		self.add_route(route)
	}

	/// Registers a route for one HTTP method.
	pub fn route(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), RouterError> {
		self.register(MethodSpec::Only(method), pattern, None, handler)
	}

	/// Registers a named route for one HTTP method.
	pub fn named(
		&mut self,
		method: Method,
		pattern: &str,
		name: &str,
		handler: H,
	) -> Result<(), RouterError> {
		self.register(MethodSpec::Only(method), pattern, Some(name), handler)
	}

	/// Registers a route answering every HTTP method.
	pub fn any(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
		self.register(MethodSpec::Any, pattern, None, handler)
	}

	/// Registers a named route answering every HTTP method.
	pub fn any_named(&mut self, pattern: &str, name: &str, handler: H) -> Result<(), RouterError> {
		self.register(MethodSpec::Any, pattern, Some(name), handler)
	}

	pub fn get(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
		self.route(Method::GET, pattern, handler)
	}

	pub fn post(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
		self.route(Method::POST, pattern, handler)
	}

	pub fn put(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
		self.route(Method::PUT, pattern, handler)
	}

	pub fn patch(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
		self.route(Method::PATCH, pattern, handler)
	}

	pub fn delete(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
		self.route(Method::DELETE, pattern, handler)
	}

	/// Opens a registration scope whose routes get `prefix` prepended.
	///
	/// Prefixes compose across nested scopes with duplicate slashes collapsed
	/// (`"/blog//"` plus a child `"/"` yields a single `/blog/...`). Scope
	/// contents keep their relative order; the scope's position in its
	/// enclosing scope fixes overall priority.
	///
	/// # Examples
	///
	/// ```
	/// use http::Method;
	/// use mindy_routers::Router;
	///
	/// let mut router = Router::new();
	/// router
	/// 	.group("/blog", |blog| {
	/// 		blog.named(Method::GET, "/", "blog:index", "index")?;
	/// 		blog.group("/admin", |admin| {
	/// 			admin.named(Method::GET, "/stats", "blog:stats", "stats")
	/// 		})
	/// 	})
	/// 	.unwrap();
	///
	/// assert!(router.dispatch(&Method::GET, "/blog/").is_matched());
	/// assert!(router.dispatch(&Method::GET, "/blog/admin/stats").is_matched());
	/// ```
	pub fn group<F>(&mut self, prefix: &str, f: F) -> Result<(), RouterError>
	where
		F: FnOnce(&mut RouteScope<'_, H>) -> Result<(), RouterError>,
	{
		let mut scope = RouteScope {
			router: self,
			prefix: prefix.to_string(),
		};
		f(&mut scope)
	}

	/// All registered routes, in registration (priority) order.
	pub fn routes(&self) -> &[Route<H>] {
		&self.routes
	}

	/// All registered route names, in unspecified order.
	pub fn route_names(&self) -> Vec<&str> {
		self.names.keys().map(String::as_str).collect()
	}

	/// Looks up a route by its registered name.
	pub fn route_by_name(&self, name: &str) -> Option<&Route<H>> {
		self.names.get(name).map(|&i| &self.routes[i])
	}
}

impl<H> Default for Router<H> {
	fn default() -> Self {
		Self::new()
	}
}

impl<H> fmt::Debug for Router<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.routes.len())
			.field("names", &self.names.len())
			.finish()
	}
}

/// A nested registration scope opened by [`Router::group`].
///
/// Exists only during registration; its routes land on the flat table with
/// the composed prefix already applied.
pub struct RouteScope<'r, H> {
	router: &'r mut Router<H>,
	prefix: String,
}

impl<H> RouteScope<'_, H> {
	pub fn route(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), RouterError> {
		let full = join_paths(&self.prefix, pattern);
		self.router
			.register(MethodSpec::Only(method), &full, None, handler)
	}

	pub fn named(
		&mut self,
		method: Method,
		pattern: &str,
		name: &str,
		handler: H,
	) -> Result<(), RouterError> {
		let full = join_paths(&self.prefix, pattern);
		self.router
			.register(MethodSpec::Only(method), &full, Some(name), handler)
	}

	pub fn any(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
		let full = join_paths(&self.prefix, pattern);
		self.router.register(MethodSpec::Any, &full, None, handler)
	}

	pub fn any_named(&mut self, pattern: &str, name: &str, handler: H) -> Result<(), RouterError> {
		let full = join_paths(&self.prefix, pattern);
		self.router
			.register(MethodSpec::Any, &full, Some(name), handler)
	}

	pub fn get(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
		self.route(Method::GET, pattern, handler)
	}

	pub fn post(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
		self.route(Method::POST, pattern, handler)
	}

	pub fn put(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
		self.route(Method::PUT, pattern, handler)
	}

	pub fn patch(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
		self.route(Method::PATCH, pattern, handler)
	}

	pub fn delete(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
		self.route(Method::DELETE, pattern, handler)
	}

	/// Opens a nested scope; prefixes compose with `//` collapsed.
	pub fn group<F>(&mut self, prefix: &str, f: F) -> Result<(), RouterError>
	where
		F: FnOnce(&mut RouteScope<'_, H>) -> Result<(), RouterError>,
	{
		let mut scope = RouteScope {
			router: self.router,
			prefix: join_paths(&self.prefix, prefix),
		};
		f(&mut scope)
	}

	pub(crate) fn router_and_prefix(&mut self) -> (&mut Router<H>, &str) {
		(self.router, &self.prefix)
	}
}

/// Joins a prefix and a pattern, collapsing duplicate slashes.
pub(crate) fn join_paths(prefix: &str, path: &str) -> String {
	let mut out = String::with_capacity(prefix.len() + path.len());
	for c in prefix.chars().chain(path.chars()) {
		if c == '/' && out.ends_with('/') {
			continue;
		}
		out.push(c);
	}
	out
}
