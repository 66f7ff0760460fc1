//! Configuration loading and parsing for antpath.
//!
//! This module handles:
//! - TOML config file parsing and validation
//! - Directory cascade discovery
//! - Config merging

pub mod cascade;
pub mod parser;
pub mod template;
pub mod types;

pub use cascade::{
	CONFIG_FILE_NAME, discover_configs, is_env_truthy, load_merged_config, merge_configs,
	user_config_path,
};
pub use parser::{parse_config_file, parse_config_str};
pub use template::generate_init_template;
pub use types::{
	Condition, Config, DEFAULT_LOGIN_PATH, LoadedConfig, MergedConfig, Route, RouteWithSource,
	parse_separator,
};
