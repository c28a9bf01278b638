//! Error types for route registration and reverse resolution.
//!
//! Registration-time errors ([`PatternError`], [`RouterError`]) indicate a
//! mistake in route configuration and are meant to abort application startup.
//! Reverse-resolution errors ([`ReverseError`]) are recoverable; callers may
//! catch them and render a fallback link. "No match" during dispatch is never
//! an error; see [`MatchResult`](crate::MatchResult).

use thiserror::Error;

/// Error raised while compiling a route pattern string.
///
/// Always surfaces at registration time, never during dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
	/// A `{` without a matching `}`, or a stray `}`.
	#[error("unbalanced braces in pattern `{0}`")]
	UnbalancedBraces(String),

	/// A placeholder with an empty or malformed parameter name.
	#[error("invalid parameter name `{name}` in pattern `{pattern}`")]
	InvalidParamName { pattern: String, name: String },

	/// A type tag that is not one of `i`, `c`, `*`.
	#[error("unknown type tag `{tag}` in pattern `{pattern}`")]
	UnknownTypeTag { pattern: String, tag: String },

	/// The same parameter name used twice within one pattern.
	#[error("duplicate parameter `{name}` in pattern `{pattern}`")]
	DuplicateParam { pattern: String, name: String },

	/// Pattern exceeds the maximum allowed length.
	#[error("pattern length {len} exceeds maximum allowed length of {max} bytes")]
	PatternTooLong { len: usize, max: usize },

	/// Pattern has too many path segments.
	#[error("pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments { count: usize, max: usize },

	/// The derived regex failed to compile.
	#[error("failed to compile pattern `{pattern}`: {reason}")]
	Regex { pattern: String, reason: String },
}

/// Error raised while registering routes on a [`Router`](crate::Router).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// The route pattern string failed to compile.
	#[error(transparent)]
	Pattern(#[from] PatternError),

	/// Two routes registered under the same name.
	#[error("duplicate route name `{0}`")]
	DuplicateRouteName(String),
}

/// Error raised while reversing a route name into a URI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
	/// No route registered under this name.
	#[error("no route named `{0}`")]
	UnknownRoute(String),

	/// A required placeholder had no supplied value.
	#[error("missing parameter `{param}` for route `{route}`")]
	MissingParameter { route: String, param: String },

	/// A supplied value does not satisfy the placeholder's type class.
	#[error("parameter `{param}` value `{value}` does not match its declared type")]
	InvalidParameter { param: String, value: String },
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn pattern_error_display() {
		let err = PatternError::UnknownTypeTag {
			pattern: "/user/{id:x}".to_string(),
			tag: "x".to_string(),
		};
		assert!(err.to_string().contains("unknown type tag `x`"));
		assert!(err.to_string().contains("/user/{id:x}"));
	}

	#[rstest]
	fn router_error_display() {
		assert_eq!(
			RouterError::DuplicateRouteName("blog:index".to_string()).to_string(),
			"duplicate route name `blog:index`"
		);
	}

	#[rstest]
	fn reverse_error_display() {
		let err = ReverseError::MissingParameter {
			route: "blog:view".to_string(),
			param: "id".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"missing parameter `id` for route `blog:view`"
		);
	}

	#[rstest]
	fn pattern_error_converts_into_router_error() {
		let err: RouterError = PatternError::UnbalancedBraces("/x/{y".to_string()).into();
		assert!(matches!(err, RouterError::Pattern(_)));
	}
}
