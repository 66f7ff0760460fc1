use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, MergedConfig, RouteWithSource, parse_separator};
use crate::error::{AntpathError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File name looked up in each directory of the cascade.
pub const CONFIG_FILE_NAME: &str = ".antpath.toml";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.antpath.toml`
/// 2. If found and `root = true`, skip to user config only
/// 3. Otherwise, continue up the directory tree
/// 4. Finally, check ~/.antpath.toml (unless disabled)
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = start_dir.to_path_buf();

	// Walk up the directory tree
	loop {
		let config_path = current_dir.join(CONFIG_FILE_NAME);

		if config_path.exists() {
			let config = parse_config_file(&config_path)?;
			tracing::debug!(path = %config_path.display(), routes = config.routes.len(), "loaded config");

			if config.no_external_lookup {
				configs.push(LoadedConfig {
					config,
					path: config_path,
				});
				return Ok(configs);
			}

			let stop = config.root;
			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if stop {
				break;
			}
		}

		match current_dir.parent() {
			Some(parent) => current_dir = parent.to_path_buf(),
			None => break,
		}
	}

	if let Some(user_config) = load_user_config(&configs, user_config_path()?)? {
		configs.push(user_config);
	}

	Ok(configs)
}

/// Load the user's ~/.antpath.toml if it exists and isn't disabled.
fn load_user_config(
	existing_configs: &[LoadedConfig],
	user_config_path: PathBuf,
) -> Result<Option<LoadedConfig>> {
	for loaded in existing_configs {
		if let Some(ref env_var) = loaded.config.root_config_lookup_disable_env_var
			&& is_env_truthy(env_var)
		{
			tracing::debug!(env_var = %env_var, "user config lookup disabled");
			return Ok(None);
		}
	}

	// Already picked up while walking a home-rooted directory tree.
	if existing_configs
		.iter()
		.any(|loaded| loaded.path == user_config_path)
	{
		return Ok(None);
	}

	if user_config_path.exists() {
		let config = parse_config_file(&user_config_path)?;
		tracing::debug!(path = %user_config_path.display(), "loaded user config");
		Ok(Some(LoadedConfig {
			config,
			path: user_config_path,
		}))
	} else {
		Ok(None)
	}
}

/// Check if an environment variable is set to a truthy value.
pub fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Merge multiple configs into a single effective config.
///
/// Routes are collected in cascade order. When two files define the same
/// top-level path, the more specific file wins. Scalar settings come from
/// the first file that sets them, and every route is checked against the
/// effective separator and size limit.
pub fn merge_configs(configs: &[LoadedConfig]) -> Result<MergedConfig> {
	let mut merged = MergedConfig::default();
	let mut separator = None;
	let mut login_path = None;
	let mut seen = HashSet::new();

	for loaded in configs {
		let config = &loaded.config;

		for route in &config.routes {
			if !seen.insert(route.path.clone()) {
				tracing::debug!(
					path = %route.path,
					source = %loaded.path.display(),
					"route shadowed by a more specific config"
				);
				continue;
			}
			merged.routes.push(RouteWithSource {
				route: route.clone(),
				source: loaded.path.clone(),
			});
		}

		if separator.is_none() {
			separator = config.separator.as_deref();
		}
		if login_path.is_none() {
			login_path = config.login_path.clone();
		}
		if merged.max_pattern_segments.is_none() {
			merged.max_pattern_segments = config.max_pattern_segments;
		}
	}

	if let Some(separator) = separator {
		merged.separator = parse_separator(separator)?;
	}
	if let Some(login_path) = login_path {
		merged.login_path = login_path;
	}

	merged.validate()?;

	Ok(merged)
}

/// Convenience function to discover, load, and merge configs from a directory.
pub fn load_merged_config(start_dir: &Path) -> Result<MergedConfig> {
	let configs = discover_configs(start_dir)?;
	merge_configs(&configs)
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(AntpathError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parser::parse_config_str;

	fn loaded(content: &str, path: &str) -> LoadedConfig {
		LoadedConfig {
			config: parse_config_str(content, Path::new(path)).unwrap(),
			path: PathBuf::from(path),
		}
	}

	#[test]
	fn test_is_env_truthy() {
		// SAFETY: These env var operations are safe in single-threaded test context
		unsafe {
			// Not set
			std::env::remove_var("TEST_ANTPATH_ENV_1");
			assert!(!is_env_truthy("TEST_ANTPATH_ENV_1"));

			// Empty string
			std::env::set_var("TEST_ANTPATH_ENV_2", "");
			assert!(!is_env_truthy("TEST_ANTPATH_ENV_2"));

			// "0"
			std::env::set_var("TEST_ANTPATH_ENV_3", "0");
			assert!(!is_env_truthy("TEST_ANTPATH_ENV_3"));

			// "FALSE"
			std::env::set_var("TEST_ANTPATH_ENV_4", "FALSE");
			assert!(!is_env_truthy("TEST_ANTPATH_ENV_4"));

			// "no"
			std::env::set_var("TEST_ANTPATH_ENV_5", "no");
			assert!(!is_env_truthy("TEST_ANTPATH_ENV_5"));

			// "1" - truthy
			std::env::set_var("TEST_ANTPATH_ENV_6", "1");
			assert!(is_env_truthy("TEST_ANTPATH_ENV_6"));

			// Any other value - truthy
			std::env::set_var("TEST_ANTPATH_ENV_7", "yes");
			assert!(is_env_truthy("TEST_ANTPATH_ENV_7"));

			// Cleanup
			for i in 1..=7 {
				std::env::remove_var(format!("TEST_ANTPATH_ENV_{}", i));
			}
		}
	}

	#[test]
	fn test_user_config_path() {
		let path = user_config_path();
		assert!(path.is_ok());
		let path = path.unwrap();
		assert!(path.ends_with(".antpath.toml"));
	}

	#[test]
	fn test_merge_empty() {
		let merged = merge_configs(&[]).unwrap();
		assert!(merged.routes.is_empty());
		assert_eq!(merged.separator, '/');
		assert_eq!(merged.login_path, "/auth/login");
		assert!(merged.max_pattern_segments.is_none());
	}

	#[test]
	fn test_merge_keeps_cascade_order() {
		let project = loaded(
			r#"
[[routes]]
path = "/a/**"
"#,
			"/work/project/.antpath.toml",
		);
		let user = loaded(
			r#"
[[routes]]
path = "/b/**"
"#,
			"/home/user/.antpath.toml",
		);

		let merged = merge_configs(&[project, user]).unwrap();
		let paths: Vec<_> = merged.routes.iter().map(|r| r.route.path.as_str()).collect();
		assert_eq!(paths, vec!["/a/**", "/b/**"]);
		assert_eq!(
			merged.routes[1].source,
			PathBuf::from("/home/user/.antpath.toml")
		);
	}

	#[test]
	fn test_merge_more_specific_route_wins() {
		let project = loaded(
			r#"
[[routes]]
path = "/admin/**"
conditions = [{ type = "allow" }]
"#,
			"/work/project/.antpath.toml",
		);
		let user = loaded(
			r#"
[[routes]]
path = "/admin/**"
conditions = [{ type = "deny" }]
"#,
			"/home/user/.antpath.toml",
		);

		let merged = merge_configs(&[project, user]).unwrap();
		assert_eq!(merged.routes.len(), 1);
		assert_eq!(
			merged.routes[0].source,
			PathBuf::from("/work/project/.antpath.toml")
		);
	}

	#[test]
	fn test_merge_scalars_from_most_specific() {
		let project = loaded("login-path = \"/sign-in\"\n", "/p/.antpath.toml");
		let parent = loaded(
			"separator = \".\"\nlogin-path = \"/ignored\"\nmax-pattern-segments = 8\n",
			"/.antpath.toml",
		);

		let merged = merge_configs(&[project, parent]).unwrap();
		assert_eq!(merged.separator, '.');
		assert_eq!(merged.login_path, "/sign-in");
		assert_eq!(merged.max_pattern_segments, Some(8));
	}

	#[test]
	fn test_merge_applies_limit_to_routes_from_other_files() {
		let project = loaded("max-pattern-segments = 2\n", "/p/.antpath.toml");
		let parent = loaded(
			r#"
[[routes]]
path = "/**/a/**/b/**/c/**/d"
"#,
			"/.antpath.toml",
		);

		match merge_configs(&[project, parent]).unwrap_err() {
			AntpathError::PatternTooComplex {
				pattern,
				segments,
				limit,
			} => {
				assert_eq!(pattern, "/**/a/**/b/**/c/**/d");
				assert_eq!(segments, 9);
				assert_eq!(limit, 2);
			}
			other => panic!("Expected PatternTooComplex error, got {other:?}"),
		}
	}

	#[test]
	fn test_merge_counts_segments_with_effective_separator() {
		let project = loaded("separator = \".\"\nmax-pattern-segments = 1\n", "/p/.antpath.toml");
		let parent = loaded(
			r#"
[[routes]]
path = "/a/b/c"
"#,
			"/.antpath.toml",
		);

		let merged = merge_configs(&[project, parent]).unwrap();
		assert_eq!(merged.routes.len(), 1);
	}

	#[test]
	fn test_merged_config_validate_after_separator_change() {
		let project = loaded(
			r#"
max-pattern-segments = 1

[[routes]]
path = "/a.b"
"#,
			"/p/.antpath.toml",
		);

		let mut merged = merge_configs(&[project]).unwrap();
		assert!(merged.validate().is_ok());

		merged.separator = '.';
		assert!(matches!(
			merged.validate().unwrap_err(),
			AntpathError::PatternTooComplex { segments: 2, .. }
		));
	}

	#[test]
	fn test_load_merged_config_limit_from_child_applies_to_parent() {
		let temp_dir = tempfile::tempdir().unwrap();
		std::fs::write(
			temp_dir.path().join(CONFIG_FILE_NAME),
			"root = true\n\n[[routes]]\npath = \"/**/a/**/b/**/c/**/d\"\n",
		)
		.unwrap();
		let child = temp_dir.path().join("child");
		std::fs::create_dir(&child).unwrap();
		std::fs::write(child.join(CONFIG_FILE_NAME), "max-pattern-segments = 2\n").unwrap();

		let result = load_merged_config(&child);
		assert!(matches!(
			result.unwrap_err(),
			AntpathError::PatternTooComplex { limit: 2, .. }
		));
	}

	/// Create `<root>/outer/inner` with a config in each directory.
	fn nested_configs(outer: &str, inner: &str) -> (tempfile::TempDir, PathBuf, PathBuf) {
		let temp_dir = tempfile::tempdir().unwrap();
		let outer_dir = temp_dir.path().join("outer");
		let inner_dir = outer_dir.join("inner");
		std::fs::create_dir_all(&inner_dir).unwrap();
		std::fs::write(outer_dir.join(CONFIG_FILE_NAME), outer).unwrap();
		std::fs::write(inner_dir.join(CONFIG_FILE_NAME), inner).unwrap();
		(temp_dir, outer_dir, inner_dir)
	}

	#[test]
	fn test_walk_continues_to_parent_without_root() {
		let (_temp_dir, outer_dir, inner_dir) = nested_configs(
			"root = true\n\n[[routes]]\npath = \"/outer/**\"\n",
			"[[routes]]\npath = \"/inner/**\"\n",
		);

		let configs = discover_configs(&inner_dir).unwrap();
		assert_eq!(configs[0].path, inner_dir.join(CONFIG_FILE_NAME));
		assert_eq!(configs[1].path, outer_dir.join(CONFIG_FILE_NAME));
	}

	#[test]
	fn test_root_stops_upward_walk() {
		let (_temp_dir, outer_dir, inner_dir) = nested_configs(
			"root = true\n\n[[routes]]\npath = \"/**\"\n",
			"root = true\n\n[[routes]]\npath = \"/inner/**\"\n",
		);

		let configs = discover_configs(&inner_dir).unwrap();
		assert_eq!(configs[0].path, inner_dir.join(CONFIG_FILE_NAME));
		assert!(
			!configs
				.iter()
				.any(|loaded| loaded.path == outer_dir.join(CONFIG_FILE_NAME))
		);

		let merged = merge_configs(&configs).unwrap();
		assert!(!merged.routes.iter().any(|entry| entry.route.path == "/**"));
	}

	#[test]
	fn test_no_external_lookup_uses_only_its_own_file() {
		let (_temp_dir, _outer_dir, inner_dir) = nested_configs(
			"root = true\n\n[[routes]]\npath = \"/**\"\n",
			"no-external-lookup = true\n\n[[routes]]\npath = \"/inner/**\"\n",
		);

		let configs = discover_configs(&inner_dir).unwrap();
		assert_eq!(configs.len(), 1);
		assert_eq!(configs[0].path, inner_dir.join(CONFIG_FILE_NAME));
	}

	#[test]
	fn test_user_config_loaded_once() {
		let home = tempfile::tempdir().unwrap();
		let user_path = home.path().join(CONFIG_FILE_NAME);
		std::fs::write(&user_path, "[[routes]]\npath = \"/home/**\"\n").unwrap();

		let user = load_user_config(&[], user_path.clone()).unwrap().unwrap();
		assert_eq!(user.path, user_path);
		assert_eq!(user.config.routes.len(), 1);

		let already_walked = LoadedConfig {
			config: user.config.clone(),
			path: user_path.clone(),
		};
		assert!(load_user_config(&[already_walked], user_path).unwrap().is_none());
	}

	#[test]
	fn test_user_config_missing() {
		let home = tempfile::tempdir().unwrap();
		let result = load_user_config(&[], home.path().join(CONFIG_FILE_NAME)).unwrap();
		assert!(result.is_none());
	}

	#[test]
	fn test_user_config_disabled_by_env_var() {
		let home = tempfile::tempdir().unwrap();
		let user_path = home.path().join(CONFIG_FILE_NAME);
		std::fs::write(&user_path, "").unwrap();
		let project = loaded(
			"root-config-lookup-disable-env-var = \"TEST_ANTPATH_SKIP_USER\"\n",
			"/p/.antpath.toml",
		);

		// SAFETY: only this test touches this variable
		unsafe {
			std::env::set_var("TEST_ANTPATH_SKIP_USER", "1");
			assert!(load_user_config(&[project.clone()], user_path.clone()).unwrap().is_none());

			std::env::remove_var("TEST_ANTPATH_SKIP_USER");
			assert!(load_user_config(&[project], user_path).unwrap().is_some());
		}
	}
}
