use crate::error::{AntpathError, Result};
use crate::matcher::{DEFAULT_SEPARATOR, tokenize};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Where a denied request is sent when the config does not say otherwise.
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";

/// Top-level configuration from a `.antpath.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop directory cascade and jump directly to ~/.antpath.toml.
	#[serde(default)]
	pub root: bool,

	/// If true, ignore every other config file, including ~/.antpath.toml.
	#[serde(default)]
	pub no_external_lookup: bool,

	/// Environment variable name that, if truthy, skips ~/.antpath.toml lookup.
	/// Useful for CI environments.
	#[serde(default)]
	pub root_config_lookup_disable_env_var: Option<String>,

	/// Path separator, a single character. Defaults to "/".
	#[serde(default)]
	pub separator: Option<String>,

	/// Redirect target for denied requests. Defaults to "/auth/login".
	#[serde(default)]
	pub login_path: Option<String>,

	/// Upper bound on the number of segments in a route pattern.
	#[serde(default)]
	pub max_pattern_segments: Option<usize>,

	/// Top-level routes, in lookup order.
	#[serde(default)]
	pub routes: Vec<Route>,
}

/// A route pattern with its guards and nested routes.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Route {
	/// Ant-style pattern the request path must fully match.
	pub path: String,

	/// Guards evaluated in order once this route is selected.
	#[serde(default)]
	pub conditions: Vec<Condition>,

	/// More specific routes, tried before this one.
	#[serde(default)]
	pub sub_routes: Vec<Route>,
}

/// A declarative guard attached to a route.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
	/// Always continue to the next condition.
	Allow,

	/// Send the request to the login path.
	Deny,

	/// Send the request somewhere else.
	Redirect {
		to: String,

		/// Append the part of the path matched by the route's wildcards.
		#[serde(default)]
		keep_wildcard: bool,
	},

	/// Continue only if the environment variable is truthy, otherwise deny.
	RequireEnv { var: String },
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Merged configuration from multiple config files in the cascade.
#[derive(Debug, Clone)]
pub struct MergedConfig {
	/// Top-level routes from all configs, in cascade order.
	pub routes: Vec<RouteWithSource>,

	/// Effective separator.
	pub separator: char,

	/// Effective redirect target for denied requests.
	pub login_path: String,

	/// Effective pattern size limit, if any.
	pub max_pattern_segments: Option<usize>,
}

impl Default for MergedConfig {
	fn default() -> Self {
		MergedConfig {
			routes: Vec::new(),
			separator: DEFAULT_SEPARATOR,
			login_path: DEFAULT_LOGIN_PATH.to_string(),
			max_pattern_segments: None,
		}
	}
}

/// A top-level route with its source config path for debugging/display.
#[derive(Debug, Clone)]
pub struct RouteWithSource {
	/// The route itself.
	pub route: Route,

	/// The config file this route came from.
	pub source: PathBuf,
}

/// Turn a configured separator string into the single character it must be.
pub fn parse_separator(value: &str) -> Result<char> {
	let mut chars = value.chars();
	match (chars.next(), chars.next()) {
		(Some(ch), None) => Ok(ch),
		_ => Err(AntpathError::InvalidSeparator {
			value: value.to_string(),
		}),
	}
}

impl Route {
	/// Validate this route and all of its sub-routes.
	pub fn validate(&self, separator: char, max_segments: Option<usize>) -> Result<()> {
		if self.path.is_empty() {
			return Err(AntpathError::EmptyRoutePath);
		}

		if let Some(limit) = max_segments {
			let segments = tokenize(&self.path, separator).len();
			if segments > limit {
				return Err(AntpathError::PatternTooComplex {
					pattern: self.path.clone(),
					segments,
					limit,
				});
			}
		}

		for condition in &self.conditions {
			if let Condition::Redirect { to, .. } = condition
				&& to.is_empty()
			{
				return Err(AntpathError::EmptyRedirectTarget {
					route: self.path.clone(),
				});
			}
		}

		for sub_route in &self.sub_routes {
			sub_route.validate(separator, max_segments)?;
		}

		Ok(())
	}
}

impl MergedConfig {
	/// Validate every route against the effective separator and size limit.
	///
	/// A single file is only checked against its own settings, so this has to
	/// run again once the cascade is merged or the separator is overridden.
	pub fn validate(&self) -> Result<()> {
		for entry in &self.routes {
			entry
				.route
				.validate(self.separator, self.max_pattern_segments)?;
		}
		Ok(())
	}
}

impl Config {
	/// The configured separator, or the default when unset.
	pub fn separator(&self) -> Result<char> {
		self.separator
			.as_deref()
			.map_or(Ok(DEFAULT_SEPARATOR), parse_separator)
	}

	/// Validate the separator and all routes in this config.
	pub fn validate(&self) -> Result<()> {
		let separator = self.separator()?;

		let mut seen = HashSet::new();
		for route in &self.routes {
			route.validate(separator, self.max_pattern_segments)?;
			if !seen.insert(route.path.as_str()) {
				return Err(AntpathError::DuplicateRoute {
					path: route.path.clone(),
				});
			}
		}

		Ok(())
	}
}
