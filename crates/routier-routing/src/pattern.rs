//! Route template compilation.
//!
//! Templates use three placeholder forms:
//!
//! - `{name}` matches one path segment's worth of word characters, dots
//!   and hyphens,
//! - `{name:regex}` matches a custom regex, which may itself contain
//!   braces (`{id:\d{3,4}}`),
//! - a trailing `...name` captures the remainder of the path, slashes
//!   included.
//!
//! Everything else in the template is matched literally. The compiled
//! regex is anchored at both ends.

use once_cell::sync::Lazy;
use regex::Regex;

use routier_core::{Error, Result, RouteArgs};

// Sentinels standing in for braces nested inside custom regexes while the
// placeholder rewrites run. Chosen to never appear in a sane template.
const LEFT_BRACE: &str = "§§§€§§§";
const RIGHT_BRACE: &str = "§§§£§§§";

static SIMPLE_PLACEHOLDER: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"\{(\w+?)\}").unwrap());
static TYPED_PLACEHOLDER: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"\{(\w+?):(.+?)\}").unwrap());
static REMAINDER_PLACEHOLDER: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"\.\.\.(\w+?)$").unwrap());

/// A compiled route template.
///
/// # Examples
///
/// ```
/// use routier_routing::PathPattern;
///
/// let pattern = PathPattern::compile("/albums/{name}").unwrap();
/// let args = pattern.match_path("/albums/leprosy").unwrap();
/// assert_eq!(args.get("name"), Some("leprosy"));
/// assert!(pattern.match_path("/albums/a/b").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
	template: String,
	regex: Regex,
}

impl PathPattern {
	/// Compile a template into an anchored matcher.
	///
	/// Fails on unbalanced braces, escaped braces, or a custom regex that
	/// does not compile.
	pub fn compile(template: &str) -> Result<Self> {
		// Ensure a leading slash so "albums" and "/albums" compile alike.
		let normalized = format!("/{}", template.trim_start_matches('/'));

		let hidden = hide_inner_braces(&normalized, template)?;
		let replaced = SIMPLE_PLACEHOLDER.replace_all(&hidden, "(?P<$1>[.\\w-]+)");
		let replaced = TYPED_PLACEHOLDER.replace_all(&replaced, "(?P<$1>$2)");
		let replaced = REMAINDER_PLACEHOLDER.replace_all(&replaced, "(?P<$1>.*)");
		let anchored = format!("^{replaced}$");
		let restored = restore_inner_braces(&anchored);

		let regex = Regex::new(&restored)
			.map_err(|e| Error::Pattern(format!("'{template}' does not compile: {e}")))?;

		Ok(Self {
			template: template.to_string(),
			regex,
		})
	}

	/// Match a decoded request path, returning the captured arguments.
	pub fn match_path(&self, path: &str) -> Option<RouteArgs> {
		let captures = self.regex.captures(path)?;
		let mut args = RouteArgs::new();

		for name in self.regex.capture_names().flatten() {
			if let Some(value) = captures.name(name) {
				args.insert(name, value.as_str());
			}
		}

		Some(args)
	}

	pub fn template(&self) -> &str {
		&self.template
	}
}

/// Replace braces nested inside custom regexes with sentinels so the
/// placeholder rewrites only see the outermost pair. Also used by reverse
/// URL generation, where the same misparse would otherwise occur.
pub(crate) fn hide_inner_braces(normalized: &str, template: &str) -> Result<String> {
	if normalized.contains("\\{") || normalized.contains("\\}") {
		return Err(Error::Pattern(format!(
			"escaped braces are not allowed: {template}"
		)));
	}

	let mut out = String::with_capacity(normalized.len());
	let mut level = 0i32;

	for c in normalized.chars() {
		match c {
			'{' => {
				level += 1;
				out.push_str(if level > 1 { LEFT_BRACE } else { "{" });
			}
			'}' => {
				out.push_str(if level > 1 { RIGHT_BRACE } else { "}" });
				level -= 1;
			}
			_ => out.push(c),
		}
	}

	if level != 0 {
		return Err(Error::Pattern(format!(
			"unbalanced braces in route pattern: {template}"
		)));
	}

	Ok(out)
}

pub(crate) fn restore_inner_braces(s: &str) -> String {
	s.replace(LEFT_BRACE, "{").replace(RIGHT_BRACE, "}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn literal_template_matches_exactly() {
		let pattern = PathPattern::compile("/evil/chuck").unwrap();
		assert!(pattern.match_path("/evil/chuck").is_some());
		assert!(pattern.match_path("/evil/chuck/").is_none());
		assert!(pattern.match_path("/evil").is_none());
	}

	#[test]
	fn missing_leading_slash_is_normalized() {
		let pattern = PathPattern::compile("albums").unwrap();
		assert!(pattern.match_path("/albums").is_some());
	}

	#[test]
	fn simple_placeholder_allows_words_dots_and_hyphens() {
		let pattern = PathPattern::compile("/albums/{name}").unwrap();
		assert!(pattern.match_path("/albums/human-1991").is_some());
		assert!(pattern.match_path("/albums/sound.of.perseverance").is_some());
		assert!(pattern.match_path("/albums/a/b").is_none());
	}

	#[test]
	fn typed_placeholder_uses_the_custom_regex() {
		let pattern = PathPattern::compile("/year/{year:\\d{4}}").unwrap();

		let args = pattern.match_path("/year/1987").unwrap();
		assert_eq!(args.get("year"), Some("1987"));
		assert!(pattern.match_path("/year/87").is_none());
		assert!(pattern.match_path("/year/nineteen").is_none());
	}

	#[test]
	fn remainder_captures_across_slashes() {
		let pattern = PathPattern::compile("/files/...path").unwrap();

		let args = pattern.match_path("/files/a/b/c.txt").unwrap();
		assert_eq!(args.get("path"), Some("a/b/c.txt"));

		let args = pattern.match_path("/files/").unwrap();
		assert_eq!(args.get("path"), Some(""));
	}

	#[test]
	fn mixed_placeholders_capture_independently() {
		let pattern = PathPattern::compile("/{category}/{id:\\d+}/...rest").unwrap();

		let args = pattern.match_path("/albums/13/covers/front").unwrap();
		assert_eq!(args.get("category"), Some("albums"));
		assert_eq!(args.get("id"), Some("13"));
		assert_eq!(args.get("rest"), Some("covers/front"));
	}

	#[test]
	fn unbalanced_braces_are_rejected() {
		assert!(matches!(
			PathPattern::compile("/albums/{name"),
			Err(Error::Pattern(_))
		));
		assert!(matches!(
			PathPattern::compile("/albums/{id:\\d{3,4}"),
			Err(Error::Pattern(_))
		));
	}

	#[test]
	fn escaped_braces_are_rejected() {
		assert!(matches!(
			PathPattern::compile("/albums/\\{name\\}"),
			Err(Error::Pattern(_))
		));
	}
}
