//! Route-pattern compilation.
//!
//! A pattern string mixes literal path text with placeholders:
//!
//! - `{name}`: captures one path segment (`[^/]+`)
//! - `{name:i}`: captures an integer (`[0-9]+`), coerced to `i64` on match
//! - `{name:c}`: captures an alphanumeric/underscore/hyphen run
//! - `{name:*}`: wildcard, captures the rest of the path including `/`
//! - a trailing `?` after the closing brace marks the placeholder optional
//!
//! Patterns compile once at registration time into an anchored regex with one
//! named capture group per placeholder; malformed patterns fail with a
//! [`PatternError`] before any request is served.
//!
//! # Optional placeholders
//!
//! The literal run from its last `/` (inclusive) before an optional
//! placeholder moves inside a non-capturing group that stays open to the end
//! of the pattern, so a trailing optional placeholder makes everything after
//! it optional too: `/user/{name:c}?` compiles to
//! `^/user(?:/(?P<name>[A-Za-z0-9_-]+))?$` and matches both `/user` and
//! `/user/joe`.

use crate::error::PatternError;
use crate::params::PathParams;
use std::fmt;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Character class a placeholder captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
	/// `{name:i}`: `[0-9]+`, coerced to `i64`.
	Int,
	/// `{name:c}`: `[A-Za-z0-9_-]+`.
	Slug,
	/// `{name}`: one path segment, `[^/]+`.
	Segment,
	/// `{name:*}`: `.*`, matches across `/`.
	Wildcard,
}

impl ParamType {
	fn from_tag(pattern: &str, tag: &str) -> Result<Self, PatternError> {
		match tag {
			"i" => Ok(Self::Int),
			"c" => Ok(Self::Slug),
			"*" => Ok(Self::Wildcard),
			_ => Err(PatternError::UnknownTypeTag {
				pattern: pattern.to_string(),
				tag: tag.to_string(),
			}),
		}
	}

	fn regex_class(self) -> &'static str {
		match self {
			Self::Int => "[0-9]+",
			Self::Slug => "[A-Za-z0-9_-]+",
			Self::Segment => "[^/]+",
			Self::Wildcard => ".*",
		}
	}

	/// Whether a reverse-supplied value satisfies this class.
	///
	/// Query and fragment delimiters are rejected everywhere so that a
	/// reversed URI always dispatches back to the same route.
	pub(crate) fn accepts(self, value: &str) -> bool {
		match self {
			Self::Int => {
				!value.is_empty()
					&& value.bytes().all(|b| b.is_ascii_digit())
					&& value.parse::<i64>().is_ok()
			}
			Self::Slug => {
				!value.is_empty()
					&& value
						.bytes()
						.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
			}
			Self::Segment => {
				!value.is_empty() && !value.contains(['/', '?', '#'])
			}
			Self::Wildcard => !value.contains(['?', '#']),
		}
	}
}

/// One placeholder slot in a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
	pub name: String,
	pub ty: ParamType,
	pub optional: bool,
}

/// One token of a compiled pattern, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternToken {
	Literal(String),
	Param(ParamSpec),
}

/// A compiled route pattern: ordered tokens plus the derived anchored regex.
///
/// Created once at registration time and immutable thereafter.
///
/// # Examples
///
/// ```
/// use mindy_routers::PathPattern;
///
/// let pattern = PathPattern::new("/blog/view/{id:i}").unwrap();
/// let params = pattern.match_path("/blog/view/42").unwrap();
/// assert_eq!(params.get_int("id"), Some(42));
/// assert!(pattern.match_path("/blog/view/abc").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
	source: String,
	tokens: Vec<PatternToken>,
	params: Vec<ParamSpec>,
	regex: regex::Regex,
}

impl PathPattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns a [`PatternError`] for unbalanced braces, invalid or duplicate
	/// parameter names, unknown type tags, or a pattern exceeding the size
	/// guards.
	pub fn new(source: &str) -> Result<Self, PatternError> {
		if source.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::PatternTooLong {
				len: source.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}
		let segment_count = source.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: segment_count,
				max: MAX_PATH_SEGMENTS,
			});
		}

		let tokens = Self::tokenize(source)?;
		let params: Vec<ParamSpec> = tokens
			.iter()
			.filter_map(|t| match t {
				PatternToken::Param(spec) => Some(spec.clone()),
				PatternToken::Literal(_) => None,
			})
			.collect();

		for (i, spec) in params.iter().enumerate() {
			if params[..i].iter().any(|other| other.name == spec.name) {
				return Err(PatternError::DuplicateParam {
					pattern: source.to_string(),
					name: spec.name.clone(),
				});
			}
		}

		let regex_str = Self::build_regex(&tokens);
		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| PatternError::Regex {
				pattern: source.to_string(),
				reason: e.to_string(),
			})?;

		Ok(Self {
			source: source.to_string(),
			tokens,
			params,
			regex,
		})
	}

	fn tokenize(source: &str) -> Result<Vec<PatternToken>, PatternError> {
		let mut tokens = Vec::new();
		let mut literal = String::new();
		let mut chars = source.chars().peekable();

		while let Some(c) = chars.next() {
			match c {
				'{' => {
					let mut body = String::new();
					let mut closed = false;
					for inner in chars.by_ref() {
						if inner == '}' {
							closed = true;
							break;
						}
						if inner == '{' {
							return Err(PatternError::UnbalancedBraces(source.to_string()));
						}
						body.push(inner);
					}
					if !closed {
						return Err(PatternError::UnbalancedBraces(source.to_string()));
					}

					let (name, tag) = match body.split_once(':') {
						Some((name, tag)) => (name, Some(tag)),
						None => (body.as_str(), None),
					};
					if !is_valid_param_name(name) {
						return Err(PatternError::InvalidParamName {
							pattern: source.to_string(),
							name: name.to_string(),
						});
					}
					let ty = match tag {
						Some(tag) => ParamType::from_tag(source, tag)?,
						None => ParamType::Segment,
					};
					let optional = chars.peek() == Some(&'?');
					if optional {
						chars.next();
					}

					if !literal.is_empty() {
						tokens.push(PatternToken::Literal(std::mem::take(&mut literal)));
					}
					tokens.push(PatternToken::Param(ParamSpec {
						name: name.to_string(),
						ty,
						optional,
					}));
				}
				'}' => return Err(PatternError::UnbalancedBraces(source.to_string())),
				_ => literal.push(c),
			}
		}
		if !literal.is_empty() {
			tokens.push(PatternToken::Literal(literal));
		}
		Ok(tokens)
	}

	fn build_regex(tokens: &[PatternToken]) -> String {
		let mut re = String::from("^");
		let mut pending = String::new();
		let mut open_groups = 0usize;

		for token in tokens {
			match token {
				PatternToken::Literal(text) => pending.push_str(text),
				PatternToken::Param(spec) => {
					if spec.optional {
						// The literal run from its last `/` (inclusive) moves
						// inside the optional group with the placeholder.
						let split = pending.rfind('/').unwrap_or(0);
						re.push_str(&regex::escape(&pending[..split]));
						re.push_str("(?:");
						re.push_str(&regex::escape(&pending[split..]));
						open_groups += 1;
					} else {
						re.push_str(&regex::escape(&pending));
					}
					pending.clear();
					re.push_str(&format!("(?P<{}>{})", spec.name, spec.ty.regex_class()));
				}
			}
		}
		re.push_str(&regex::escape(&pending));
		for _ in 0..open_groups {
			re.push_str(")?");
		}
		re.push('$');
		re
	}

	/// The original pattern string.
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Ordered literal/placeholder tokens.
	pub fn tokens(&self) -> &[PatternToken] {
		&self.tokens
	}

	/// Placeholder specs in source order.
	pub fn params(&self) -> &[ParamSpec] {
		&self.params
	}

	/// Attempts to match a path, extracting typed parameters on success.
	///
	/// An `{name:i}` capture that overflows `i64` is treated as a non-match.
	pub fn match_path(&self, path: &str) -> Option<PathParams> {
		let caps = self.regex.captures(path)?;
		let mut params = PathParams::new();
		for spec in &self.params {
			if let Some(m) = caps.name(&spec.name) {
				match spec.ty {
					ParamType::Int => match m.as_str().parse::<i64>() {
						Ok(v) => params.insert(spec.name.as_str(), v.into()),
						Err(_) => return None,
					},
					_ => params.insert(spec.name.as_str(), m.as_str().into()),
				}
			}
		}
		Some(params)
	}

	/// Whether this pattern matches the given path.
	pub fn matches(&self, path: &str) -> bool {
		self.match_path(path).is_some()
	}
}

impl fmt::Display for PathPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.source)
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.source == other.source
	}
}

impl Eq for PathPattern {}

fn is_valid_param_name(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn literal_pattern_matches_exactly() {
		let pattern = PathPattern::new("/blog/").unwrap();
		assert!(pattern.matches("/blog/"));
		assert!(!pattern.matches("/blog"));
		assert!(!pattern.matches("/blog/x"));
	}

	#[test]
	fn default_class_captures_one_segment() {
		let pattern = PathPattern::new("/users/{id}/").unwrap();
		let params = pattern.match_path("/users/abc/").unwrap();
		assert_eq!(params.get_str("id"), Some("abc"));
		assert!(!pattern.matches("/users/a/b/"));
	}

	#[test]
	fn integer_class_coerces_and_rejects() {
		let pattern = PathPattern::new("/blog/view/{id:i}").unwrap();
		let params = pattern.match_path("/blog/view/1").unwrap();
		assert_eq!(params.get_int("id"), Some(1));
		assert!(pattern.match_path("/blog/view/abc").is_none());
	}

	#[test]
	fn integer_overflow_is_a_non_match() {
		let pattern = PathPattern::new("/n/{v:i}").unwrap();
		assert!(pattern.match_path("/n/99999999999999999999999999").is_none());
	}

	#[test]
	fn slug_class_allows_underscore_and_hyphen() {
		let pattern = PathPattern::new("/user/{name:c}").unwrap();
		assert!(pattern.matches("/user/joe_smith-1"));
		assert!(!pattern.matches("/user/joe.smith"));
	}

	#[test]
	fn wildcard_crosses_slashes() {
		let pattern = PathPattern::new("/static/{path:*}").unwrap();
		let params = pattern.match_path("/static/css/site/main.css").unwrap();
		assert_eq!(params.get_str("path"), Some("css/site/main.css"));
	}

	#[test]
	fn trailing_optional_placeholder() {
		let pattern = PathPattern::new("/user/{name:c}?").unwrap();
		assert!(pattern.matches("/user"));

		let params = pattern.match_path("/user/joe").unwrap();
		assert_eq!(params.get_str("name"), Some("joe"));

		let params = pattern.match_path("/user").unwrap();
		assert!(!params.contains("name"));
	}

	#[test]
	fn optional_placeholder_makes_tail_optional() {
		let pattern = PathPattern::new("/a/{x:i}?/b/{y:i}?").unwrap();
		assert!(pattern.matches("/a"));
		assert!(pattern.matches("/a/1/b"));
		assert!(pattern.matches("/a/1/b/2"));
		// The tail cannot appear without the first optional segment.
		assert!(!pattern.matches("/a/b/2"));

		let params = pattern.match_path("/a/1/b").unwrap();
		assert_eq!(params.get_int("x"), Some(1));
		assert!(!params.contains("y"));
	}

	#[test]
	fn regex_metacharacters_in_literals_are_escaped() {
		let pattern = PathPattern::new("/api/v1.0/{id:i}").unwrap();
		assert!(pattern.matches("/api/v1.0/3"));
		assert!(!pattern.matches("/api/v1X0/3"));
	}

	#[rstest]
	#[case("/user/{name")]
	#[case("/user/name}")]
	#[case("/user/{a{b}}")]
	fn unbalanced_braces_are_rejected(#[case] source: &str) {
		assert!(matches!(
			PathPattern::new(source),
			Err(PatternError::UnbalancedBraces(_))
		));
	}

	#[rstest]
	#[case("/user/{}")]
	#[case("/user/{1abc}")]
	#[case("/user/{a b}")]
	fn invalid_param_names_are_rejected(#[case] source: &str) {
		assert!(matches!(
			PathPattern::new(source),
			Err(PatternError::InvalidParamName { .. })
		));
	}

	#[test]
	fn unknown_type_tag_is_rejected() {
		assert!(matches!(
			PathPattern::new("/user/{id:z}"),
			Err(PatternError::UnknownTypeTag { .. })
		));
	}

	#[test]
	fn duplicate_param_names_are_rejected() {
		assert!(matches!(
			PathPattern::new("/a/{x}/b/{x}"),
			Err(PatternError::DuplicateParam { .. })
		));
	}

	#[test]
	fn oversized_patterns_are_rejected() {
		let long = format!("/{}", "a".repeat(1025));
		assert!(matches!(
			PathPattern::new(&long),
			Err(PatternError::PatternTooLong { .. })
		));

		let segments = vec!["seg"; 35].join("/");
		assert!(matches!(
			PathPattern::new(&format!("/{}/", segments)),
			Err(PatternError::TooManySegments { .. })
		));
	}

	#[test]
	fn tokens_preserve_source_order() {
		let pattern = PathPattern::new("/users/{id:i}/posts/{slug:c}?").unwrap();
		let tokens = pattern.tokens();
		assert_eq!(tokens.len(), 4);
		assert!(matches!(&tokens[0], PatternToken::Literal(s) if s == "/users/"));
		assert!(matches!(
			&tokens[1],
			PatternToken::Param(spec) if spec.name == "id" && spec.ty == ParamType::Int
		));
		assert!(matches!(
			&tokens[3],
			PatternToken::Param(spec) if spec.optional
		));
	}

	#[rstest]
	#[case(ParamType::Int, "42", true)]
	#[case(ParamType::Int, "4a", false)]
	#[case(ParamType::Int, "", false)]
	#[case(ParamType::Slug, "joe_smith-1", true)]
	#[case(ParamType::Slug, "joe.smith", false)]
	#[case(ParamType::Segment, "anything else", true)]
	#[case(ParamType::Segment, "a/b", false)]
	#[case(ParamType::Segment, "a?b", false)]
	#[case(ParamType::Wildcard, "a/b/c", true)]
	#[case(ParamType::Wildcard, "a#b", false)]
	fn type_class_acceptance(#[case] ty: ParamType, #[case] value: &str, #[case] ok: bool) {
		assert_eq!(ty.accepts(value), ok);
	}
}
