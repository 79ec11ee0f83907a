//! Route matching module
//!
//! Exact and regular-expression path patterns. Patterns always match the whole
//! path; a pattern route captures its groups for the handler.

use hyper::Method;
use regex::Regex;

use super::table::Route;
use crate::error::ServerError;

/// Path pattern of a route
#[derive(Debug, Clone)]
pub enum PathPattern {
    /// Path must equal the string
    Exact(String),
    /// Path must match the whole expression
    Regex(Regex),
}

impl PathPattern {
    pub fn exact(path: impl Into<String>) -> Self {
        Self::Exact(path.into())
    }

    /// Compile a pattern such as `/numbers/(\d+)`, anchored at both ends
    pub fn regex(pattern: &str) -> Result<Self, ServerError> {
        Regex::new(&format!("^(?:{pattern})$"))
            .map(Self::Regex)
            .map_err(|e| ServerError::Configuration(format!("Invalid route pattern '{pattern}': {e}")))
    }

    /// Match a path, returning its captures (index 0 is the whole path)
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        match self {
            Self::Exact(exact) => (path == exact).then(|| vec![path.to_string()]),
            Self::Regex(re) => re.captures(path).map(|caps| {
                caps.iter()
                    .map(|m| m.map_or_else(String::new, |m| m.as_str().to_string()))
                    .collect()
            }),
        }
    }
}

/// A route selected for a request, with its path captures
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub captures: Vec<String>,
}

impl RouteMatch<'_> {
    /// Capture group `index`, empty if the group did not participate
    pub fn capture(&self, index: usize) -> &str {
        self.captures.get(index).map_or("", String::as_str)
    }
}

/// Find the first route, in registration order, matching method and path
pub fn match_route<'a>(routes: &'a [Route], method: &Method, path: &str) -> Option<RouteMatch<'a>> {
    routes
        .iter()
        .filter(|route| method_matches(&route.method, method))
        .find_map(|route| {
            route
                .pattern
                .captures(path)
                .map(|captures| RouteMatch { route, captures })
        })
}

/// HEAD is answered by GET routes
fn method_matches(route_method: &Method, method: &Method) -> bool {
    route_method == method || (*route_method == Method::GET && *method == Method::HEAD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::table::RouteAction;

    fn make_route(method: Method, pattern: PathPattern, body: &str) -> Route {
        Route {
            method,
            pattern,
            action: RouteAction::Text {
                body: body.to_string(),
            },
        }
    }

    #[test]
    fn test_exact_pattern() {
        let pattern = PathPattern::exact("/hi");
        assert_eq!(pattern.captures("/hi"), Some(vec!["/hi".to_string()]));
        assert!(pattern.captures("/hi/").is_none());
        assert!(pattern.captures("/hit").is_none());
    }

    #[test]
    fn test_regex_pattern_captures_digits() {
        let pattern = PathPattern::regex(r"/numbers/(\d+)").unwrap();
        let caps = pattern.captures("/numbers/42").unwrap();
        assert_eq!(caps, vec!["/numbers/42".to_string(), "42".to_string()]);
    }

    #[test]
    fn test_regex_pattern_is_anchored() {
        let pattern = PathPattern::regex(r"/numbers/(\d+)").unwrap();
        assert!(pattern.captures("/numbers/abc").is_none());
        assert!(pattern.captures("/numbers/12abc").is_none());
        assert!(pattern.captures("/x/numbers/12").is_none());
        assert!(pattern.captures("/numbers/").is_none());
    }

    #[test]
    fn test_invalid_regex_is_configuration_error() {
        assert!(matches!(
            PathPattern::regex("/broken/(\\d+"),
            Err(ServerError::Configuration(_))
        ));
    }

    #[test]
    fn test_match_route_order() {
        let routes = vec![
            make_route(Method::GET, PathPattern::regex(r"/items/(\d+)").unwrap(), "first"),
            make_route(Method::GET, PathPattern::regex(r"/items/(.+)").unwrap(), "second"),
        ];

        let matched = match_route(&routes, &Method::GET, "/items/7").unwrap();
        assert!(std::ptr::eq(matched.route, &routes[0]));
        assert_eq!(matched.capture(1), "7");

        let matched = match_route(&routes, &Method::GET, "/items/seven").unwrap();
        assert!(std::ptr::eq(matched.route, &routes[1]));
        assert_eq!(matched.capture(1), "seven");
        assert_eq!(matched.capture(5), "");
    }

    #[test]
    fn test_match_route_method() {
        let routes = vec![make_route(Method::GET, PathPattern::exact("/hi"), "hi")];

        assert!(match_route(&routes, &Method::GET, "/hi").is_some());
        assert!(match_route(&routes, &Method::HEAD, "/hi").is_some());
        assert!(match_route(&routes, &Method::POST, "/hi").is_none());
    }
}
