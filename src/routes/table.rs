use crate::config::types::{DEFAULT_LOGIN_PATH, MergedConfig, Route, RouteWithSource};
use crate::matcher::PathMatcher;
use crate::routes::conditions::{ConditionContext, Outcome, run_conditions};
use std::path::Path;

/// A route selected for a request path.
#[derive(Debug, Clone, Copy)]
pub struct MatchedRoute<'a> {
	/// The route whose pattern matched, possibly a nested one.
	pub route: &'a Route,

	/// Config file the enclosing top-level route came from.
	pub source: &'a Path,
}

/// The result of resolving a request path.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
	pub matched: Option<MatchedRoute<'a>>,
	pub outcome: Outcome,
}

/// Ordered route tree used to pick a route and run its conditions.
#[derive(Debug, Clone)]
pub struct RouteTable {
	matcher: PathMatcher,
	routes: Vec<RouteWithSource>,
	login_path: String,
}

impl RouteTable {
	pub fn new(matcher: PathMatcher, routes: Vec<RouteWithSource>) -> Self {
		RouteTable {
			matcher,
			routes,
			login_path: DEFAULT_LOGIN_PATH.to_string(),
		}
	}

	/// Build a table from a merged config.
	pub fn from_config(config: &MergedConfig) -> Self {
		RouteTable::new(
			PathMatcher::with_separator(config.separator),
			config.routes.clone(),
		)
		.with_login_path(&config.login_path)
	}

	pub fn with_login_path(mut self, login_path: &str) -> Self {
		self.login_path = login_path.to_string();
		self
	}

	pub fn matcher(&self) -> &PathMatcher {
		&self.matcher
	}

	pub fn routes(&self) -> &[RouteWithSource] {
		&self.routes
	}

	/// Find the route for `path`.
	///
	/// Top-level routes are tried in order. Within each, sub-routes are
	/// searched depth-first before the route itself, so the most nested
	/// match wins over its parent.
	pub fn find_matching_route(&self, path: &str) -> Option<MatchedRoute<'_>> {
		self.routes.iter().find_map(|entry| {
			self.find_in(&entry.route, path).map(|route| MatchedRoute {
				route,
				source: &entry.source,
			})
		})
	}

	fn find_in<'r>(&self, route: &'r Route, path: &str) -> Option<&'r Route> {
		route
			.sub_routes
			.iter()
			.find_map(|sub_route| self.find_in(sub_route, path))
			.or_else(|| self.matcher.matches(&route.path, path).then_some(route))
	}

	/// Find the route for `path` and run its conditions.
	pub fn resolve(&self, path: &str) -> Resolution<'_> {
		let Some(matched) = self.find_matching_route(path) else {
			tracing::debug!(path, "no route matched");
			return Resolution {
				matched: None,
				outcome: Outcome::Next,
			};
		};

		tracing::debug!(path, pattern = %matched.route.path, source = %matched.source.display(), "route matched");

		let ctx = ConditionContext {
			matcher: &self.matcher,
			pattern: &matched.route.path,
			path,
		};
		let outcome = run_conditions(&matched.route.conditions, &ctx, &self.login_path);

		Resolution {
			matched: Some(matched),
			outcome,
		}
	}
}
