//! # Mindy Routers
//!
//! URL routing for the Mindy web framework: pattern compilation, route
//! collection with nested groups and RESTful binding, request dispatch, and
//! reverse resolution of route names back into URIs.
//!
//! The route table is built once at application bootstrap and is immutable
//! afterwards; dispatch is a pure read over it, safe to share behind an
//! `Arc` across request-handling threads. Handlers are opaque to the core:
//! the table is generic over a handler type, and dispatch hands the matched
//! handler back to the HTTP layer together with the extracted, type-coerced
//! parameters.
//!
//! # Examples
//!
//! ## Registration and dispatch
//!
//! ```
//! use http::Method;
//! use mindy_routers::{MatchResult, Router};
//!
//! let mut router = Router::new();
//! router.named(Method::GET, "/blog/", "blog:index", "index").unwrap();
//! router
//! 	.named(Method::GET, "/blog/view/{id:i}", "blog:view", "view")
//! 	.unwrap();
//!
//! let result = router.dispatch(&Method::GET, "/blog/view/1");
//! assert_eq!(result.handler(), Some(&"view"));
//! assert_eq!(result.params().unwrap().get_int("id"), Some(1));
//!
//! // Type mismatch on the `i` class is an ordinary NotFound.
//! assert!(matches!(
//! 	router.dispatch(&Method::GET, "/blog/view/abc"),
//! 	MatchResult::NotFound
//! ));
//! ```
//!
//! ## Groups and reverse resolution
//!
//! ```
//! use http::Method;
//! use mindy_routers::Router;
//!
//! let mut router = Router::new();
//! router
//! 	.group("/blog", |blog| {
//! 		blog.named(Method::GET, "/", "blog:index", "index")?;
//! 		blog.named(Method::GET, "/view/{id:i}", "blog:view", "view")
//! 	})
//! 	.unwrap();
//!
//! assert_eq!(router.reverse("blog:view", 1).unwrap(), "/blog/view/1");
//! assert!(router.dispatch(&Method::GET, "/blog/view/1").is_matched());
//! ```

pub mod error;
pub mod matching;
pub mod params;
pub mod pattern;
pub mod restful;
pub mod reverse;
pub mod route;
pub mod router;

pub use error::{PatternError, ReverseError, RouterError};
pub use matching::MatchResult;
pub use params::{ParamValue, PathParams};
pub use pattern::{ParamSpec, ParamType, PathPattern, PatternToken};
pub use restful::RestAction;
pub use reverse::ReverseParams;
pub use route::{MethodSpec, Route};
pub use router::{RouteScope, Router, TrailingSlashHook};
