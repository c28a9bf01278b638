//! RESTful binding: synthesizing routes from a controller's action table.
//!
//! Controllers declare their actions explicitly with the PHP-era naming
//! convention `{httpVerb}{ActionName}` (`getIndex`, `postCreate`, `anyView`).
//! [`Router::restful`] parses the verb prefix, kebab-cases the action name
//! into a path segment (`Index` maps to the bare prefix), and appends the
//! declared parameters (required ones as required placeholders, defaulted
//! ones as optional placeholders). Entries with an unrecognized verb prefix
//! are skipped without error.

use crate::error::RouterError;
use crate::route::MethodSpec;
use crate::router::{Router, RouteScope, join_paths};
use convert_case::{Case, Casing};
use http::Method;

/// One declared action parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestParam {
	name: String,
	required: bool,
}

/// One controller action: method name, handler, declared parameters.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use mindy_routers::{RestAction, Router};
///
/// let mut router = Router::new();
/// router
/// 	.restful(
/// 		"/user",
/// 		vec![
/// 			RestAction::new("getIndex", "index"),
/// 			RestAction::new("getView", "view").with_param("id"),
/// 			RestAction::new("postCreate", "create"),
/// 		],
/// 	)
/// 	.unwrap();
///
/// assert!(router.dispatch(&Method::GET, "/user").is_matched());
/// assert!(router.dispatch(&Method::GET, "/user/view/3").is_matched());
/// assert!(router.dispatch(&Method::POST, "/user").is_matched());
/// ```
#[derive(Debug, Clone)]
pub struct RestAction<H> {
	method_name: String,
	handler: H,
	params: Vec<RestParam>,
	name: Option<String>,
}

impl<H> RestAction<H> {
	pub fn new(method_name: impl Into<String>, handler: H) -> Self {
		Self {
			method_name: method_name.into(),
			handler,
			params: Vec::new(),
			name: None,
		}
	}

	/// Declares a required parameter, appended as a required placeholder.
	pub fn with_param(mut self, name: impl Into<String>) -> Self {
		self.params.push(RestParam {
			name: name.into(),
			required: true,
		});
		self
	}

	/// Declares a defaulted parameter, appended as an optional placeholder.
	///
	/// Only the leading run of optional parameters is reachable through URL
	/// segments; a later optional after an omitted one cannot be addressed.
	pub fn with_optional_param(mut self, name: impl Into<String>) -> Self {
		self.params.push(RestParam {
			name: name.into(),
			required: false,
		});
		self
	}

	/// Names the synthesized route for reverse resolution.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Path fragment below the controller prefix, e.g. `/view/{id}`.
	///
	/// `Index` and `Create` are collection-level actions bound to the bare
	/// prefix (the verb disambiguates them); every other action gets its
	/// kebab-cased segment.
	fn path_fragment(&self, action: &str) -> String {
		let mut path = String::new();
		if action != "Index" && action != "Create" {
			path.push('/');
			path.push_str(&action.to_case(Case::Kebab));
		}
		for param in &self.params {
			path.push_str("/{");
			path.push_str(&param.name);
			path.push('}');
			if !param.required {
				path.push('?');
			}
		}
		path
	}
}

/// Splits `getIndex` into a method spec and the action name `Index`.
///
/// Returns `None` for an unrecognized verb prefix or a missing action name.
fn split_verb(method_name: &str) -> Option<(MethodSpec, &str)> {
	let split = method_name.find(|c: char| c.is_ascii_uppercase())?;
	let (verb, action) = method_name.split_at(split);
	let spec = match verb {
		"get" => MethodSpec::Only(Method::GET),
		"post" => MethodSpec::Only(Method::POST),
		"put" => MethodSpec::Only(Method::PUT),
		"patch" => MethodSpec::Only(Method::PATCH),
		"delete" => MethodSpec::Only(Method::DELETE),
		"head" => MethodSpec::Only(Method::HEAD),
		"options" => MethodSpec::Only(Method::OPTIONS),
		"any" => MethodSpec::Any,
		_ => return None,
	};
	Some((spec, action))
}

fn register_actions<H>(
	router: &mut Router<H>,
	prefix: &str,
	actions: Vec<RestAction<H>>,
) -> Result<(), RouterError> {
	for action in actions {
		let Some((method, action_name)) = split_verb(&action.method_name) else {
			tracing::debug!(
				method_name = action.method_name.as_str(),
				prefix,
				"skipping restful entry with unrecognized verb prefix"
			);
			continue;
		};
		let pattern = join_paths(prefix, &action.path_fragment(action_name));
		router.register(
			method,
			&pattern,
			action.name.as_deref(),
			action.handler,
		)?;
	}
	Ok(())
}

impl<H> Router<H> {
	/// Registers a controller's action table under `prefix`.
	pub fn restful(
		&mut self,
		prefix: &str,
		actions: Vec<RestAction<H>>,
	) -> Result<(), RouterError> {
		register_actions(self, prefix, actions)
	}
}

impl<H> RouteScope<'_, H> {
	/// Registers a controller's action table under the scope prefix.
	pub fn restful(
		&mut self,
		prefix: &str,
		actions: Vec<RestAction<H>>,
	) -> Result<(), RouterError> {
		let (router, scope_prefix) = self.router_and_prefix();
		let full = join_paths(scope_prefix, prefix);
		register_actions(router, &full, actions)
	}
}
