//! Segment-based path patterns.
//!
//! Screens in the linking configuration declare their path as a pattern:
//!
//! - `literal` segments must match exactly,
//! - `:name` segments capture one path segment into [`RouteParams`],
//! - `:name?` segments are optional and may only be omitted at the tail.
//!
//! ```
//! use stack_navigation::matching::PathPattern;
//! use stack_navigation::RouteParams;
//!
//! let pattern = PathPattern::parse("r/:reportID/:reportActionID?").unwrap();
//!
//! let params = pattern.match_segments(&["r", "42"]).unwrap();
//! assert_eq!(params.get("reportID"), Some("42"));
//! assert!(!params.contains("reportActionID"));
//!
//! let path = pattern.build(&RouteParams::new().with("reportID", "42")).unwrap();
//! assert_eq!(path, "r/42");
//! ```

use crate::error::NavigationError;
use crate::params::{decode_path_segment, encode_uri_component};
use crate::RouteParams;
use std::borrow::Cow;

/// One segment of a [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text.
    Static(String),
    /// Captured parameter.
    Param { name: String, optional: bool },
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix(':') {
            Some(param) => match param.strip_suffix('?') {
                Some(name) => Segment::Param {
                    name: name.to_string(),
                    optional: true,
                },
                None => Segment::Param {
                    name: param.to_string(),
                    optional: false,
                },
            },
            None => Segment::Static(raw.to_string()),
        }
    }
}

/// A parsed screen path such as `r/:reportID/:reportActionID?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern. Leading and trailing slashes are ignored.
    ///
    /// Fails on empty parameter names and on a required parameter that
    /// follows an optional one.
    pub fn parse(pattern: &str) -> Result<Self, NavigationError> {
        let segments: Vec<Segment> = split_path(pattern).into_iter().map(Segment::parse).collect();

        let mut seen_optional = false;
        for segment in &segments {
            match segment {
                Segment::Param { name, .. } if name.is_empty() => {
                    return Err(NavigationError::InvalidPattern {
                        pattern: pattern.to_string(),
                        reason: "empty parameter name".to_string(),
                    });
                }
                Segment::Param { optional: true, .. } => seen_optional = true,
                _ if seen_optional => {
                    return Err(NavigationError::InvalidPattern {
                        pattern: pattern.to_string(),
                        reason: "only trailing segments may be optional".to_string(),
                    });
                }
                _ => {}
            }
        }

        Ok(Self {
            raw: trim_slashes(pattern).to_string(),
            segments,
        })
    }

    /// The pattern without surrounding slashes.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of literal segments, used to rank competing patterns.
    pub fn static_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Static(_)))
            .count()
    }

    /// Join a parent pattern with a child pattern.
    pub fn join(&self, child: &PathPattern) -> PathPattern {
        let raw = match (self.raw.is_empty(), child.raw.is_empty()) {
            (true, _) => child.raw.clone(),
            (false, true) => self.raw.clone(),
            (false, false) => format!("{}/{}", self.raw, child.raw),
        };
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());
        PathPattern { raw, segments }
    }

    /// Match already-split path segments, returning captured params.
    ///
    /// Every path segment must be consumed. Captured values are
    /// percent-decoded.
    pub fn match_segments<S: AsRef<str>>(&self, path: &[S]) -> Option<RouteParams> {
        let mut params = RouteParams::new();
        let mut consumed = 0;

        for segment in &self.segments {
            let current = path.get(consumed).map(AsRef::as_ref);
            match (segment, current) {
                (Segment::Static(text), Some(value)) if text == value => consumed += 1,
                (Segment::Static(_), _) => return None,
                (Segment::Param { name, .. }, Some(value)) => {
                    params.insert(name.as_str(), decode_path_segment(value));
                    consumed += 1;
                }
                (Segment::Param { optional: true, .. }, None) => {}
                (Segment::Param { optional: false, .. }, None) => return None,
            }
        }

        (consumed == path.len()).then_some(params)
    }

    /// Fill the pattern from `params`. Missing optional params end the path.
    ///
    /// Param values are percent-encoded.
    pub fn build(&self, params: &RouteParams) -> Result<String, NavigationError> {
        let mut out: Vec<String> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Static(text) => out.push(text.clone()),
                Segment::Param { name, optional } => match params.get(name) {
                    Some(value) => out.push(encode_uri_component(value)),
                    None if *optional => break,
                    None => {
                        return Err(NavigationError::MissingParam {
                            param: name.clone(),
                            pattern: self.raw.clone(),
                        })
                    }
                },
            }
        }
        Ok(out.join("/"))
    }

    /// Names of every parameter in the pattern.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param { name, .. } => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }
}

/// Split a path into segments, filtering empty segments.
///
/// ```
/// use stack_navigation::matching::split_path;
///
/// assert_eq!(split_path("/r/123/"), vec!["r", "123"]);
/// assert!(split_path("/").is_empty());
/// ```
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Strip leading and trailing slashes.
#[inline]
pub(crate) fn trim_slashes(path: &str) -> &str {
    path.trim_start_matches('/').trim_end_matches('/')
}

/// Normalize a path to a single leading slash and no trailing slash.
///
/// Returns `Cow<str>` to avoid allocation when the path is already normalized.
///
/// ```
/// use stack_navigation::matching::normalize_path;
///
/// assert_eq!(normalize_path("r/1"), "/r/1");
/// assert_eq!(normalize_path("/r/1/"), "/r/1");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(path: &'_ str) -> Cow<'_, str> {
    if path == "/" || (path.starts_with('/') && !path.ends_with('/') && !path.starts_with("//"))
    {
        return Cow::Borrowed(path);
    }
    let trimmed = trim_slashes(path);
    if trimmed.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{trimmed}"))
    }
}

/// Split `path?query` into the path and the optional query.
pub fn split_query(path: &str) -> (&str, Option<&str>) {
    match path.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/r/123"), vec!["r", "123"]);
        assert_eq!(split_path("settings/profile/"), vec!["settings", "profile"]);
        assert_eq!(split_path(""), Vec::<&str>::new());
    }

    #[test]
    fn test_parse_segments() {
        let pattern = PathPattern::parse("/r/:reportID/:reportActionID?").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Static("r".to_string()),
                Segment::Param {
                    name: "reportID".to_string(),
                    optional: false
                },
                Segment::Param {
                    name: "reportActionID".to_string(),
                    optional: true
                },
            ]
        );
        assert_eq!(pattern.as_str(), "r/:reportID/:reportActionID?");
        assert_eq!(pattern.static_count(), 1);
    }

    #[test]
    fn test_parse_rejects_required_after_optional() {
        assert!(PathPattern::parse("a/:x?/:y").is_err());
        assert!(PathPattern::parse("a/:").is_err());
    }

    #[test]
    fn test_match_static() {
        let pattern = PathPattern::parse("settings/profile").unwrap();
        assert!(pattern.match_segments(&["settings", "profile"]).is_some());
        assert!(pattern.match_segments(&["settings"]).is_none());
        assert!(pattern.match_segments(&["settings", "profile", "x"]).is_none());
    }

    #[test]
    fn test_match_optional_tail() {
        let pattern = PathPattern::parse("r/:reportID/:reportActionID?").unwrap();

        let params = pattern.match_segments(&["r", "1", "99"]).unwrap();
        assert_eq!(params.get("reportID"), Some("1"));
        assert_eq!(params.get("reportActionID"), Some("99"));

        assert!(pattern.match_segments(&["r"]).is_none());
    }

    #[test]
    fn test_empty_pattern_matches_root() {
        let pattern = PathPattern::parse("").unwrap();
        assert!(pattern.match_segments::<&str>(&[]).is_some());
        assert!(pattern.match_segments(&["home"]).is_none());
    }

    #[test]
    fn test_join() {
        let parent = PathPattern::parse("settings").unwrap();
        let child = PathPattern::parse(":section").unwrap();
        let joined = parent.join(&child);
        assert_eq!(joined.as_str(), "settings/:section");
        assert_eq!(joined.segments().len(), 2);

        let empty = PathPattern::parse("").unwrap();
        assert_eq!(empty.join(&child).as_str(), ":section");
    }

    #[test]
    fn test_build_missing_required() {
        let pattern = PathPattern::parse("r/:reportID").unwrap();
        let err = pattern.build(&RouteParams::new()).unwrap_err();
        assert_eq!(
            err,
            NavigationError::MissingParam {
                param: "reportID".to_string(),
                pattern: "r/:reportID".to_string()
            }
        );
    }

    #[test]
    fn test_param_values_are_percent_encoded() {
        let pattern = PathPattern::parse("r/:reportID").unwrap();
        let built = pattern
            .build(&RouteParams::new().with("reportID", "a/b?c#d e+f"))
            .unwrap();
        assert_eq!(built, "r/a%2Fb%3Fc%23d%20e%2Bf");

        let params = pattern.match_segments(&split_path(&built)).unwrap();
        assert_eq!(params.get("reportID"), Some("a/b?c#d e+f"));
    }

    #[test]
    fn test_plus_in_path_segment_is_literal() {
        let pattern = PathPattern::parse("r/:reportID").unwrap();
        let params = pattern.match_segments(&["r", "1+2"]).unwrap();
        assert_eq!(params.get("reportID"), Some("1+2"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("//r//"), "/r");
        assert_eq!(normalize_path("/home"), "/home");
    }

    #[test]
    fn test_split_query() {
        assert_eq!(split_query("r/1?x=2"), ("r/1", Some("x=2")));
        assert_eq!(split_query("r/1"), ("r/1", None));
    }
}
