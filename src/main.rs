use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use antpath_cli::config::{
	CONFIG_FILE_NAME, Condition, Route, discover_configs, generate_init_template,
	load_merged_config, user_config_path,
};
use antpath_cli::matcher::PathMatcher;
use antpath_cli::routes::{Outcome, RouteTable};

#[derive(Parser)]
#[command(name = "antpath")]
#[command(
	author,
	version,
	about = "Ant-style path pattern matching and route resolution"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template .antpath.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .antpath.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Path separator character (overrides the configured one)
	#[arg(long, global = true, value_name = "CHAR")]
	separator: Option<char>,

	/// Increase log verbosity (-v, -vv, -vvv); ANTPATH_LOG takes precedence
	#[arg(short, long, global = true, action = ArgAction::Count)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Check whether a path matches a pattern
	Match {
		pattern: String,
		path: String,

		/// Only require the path to match the start of the pattern
		#[arg(long)]
		prefix: bool,
	},

	/// Check whether a string contains wildcard characters
	IsPattern { candidate: String },

	/// Print the part of a path matched by the wildcard part of a pattern
	Extract { pattern: String, path: String },

	/// Resolve a path against the configured routes
	Route { path: String },

	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the configuration cascade with source annotations
	Show,
	/// Check all config files for errors without resolving anything
	Validate,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_logging(verbose: u8) {
	let default_level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter =
		EnvFilter::try_from_env("ANTPATH_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	if cli.init {
		return handle_init(cli.force);
	}

	let matcher = cli
		.separator
		.map_or_else(PathMatcher::new, PathMatcher::with_separator);

	match cli.command {
		Some(Commands::Match {
			pattern,
			path,
			prefix,
		}) => handle_match(&matcher, &pattern, &path, prefix),
		Some(Commands::IsPattern { candidate }) => Ok(report(matcher.is_pattern(&candidate), "true", "false")),
		Some(Commands::Extract { pattern, path }) => {
			println!("{}", matcher.extract_path_within_pattern(&pattern, &path));
			Ok(ExitCode::SUCCESS)
		}
		Some(Commands::Route { path }) => handle_route(&path, cli.separator),
		Some(Commands::Config { action }) => match action {
			ConfigAction::Show => handle_config_show(),
			ConfigAction::Validate => handle_config_validate(),
		},
		// No command specified - this shouldn't happen due to arg_required_else_help
		None => Ok(ExitCode::SUCCESS),
	}
}

/// Print `yes` or `no` and turn the answer into an exit code, grep style.
fn report(answer: bool, yes: &str, no: &str) -> ExitCode {
	if answer {
		println!("{yes}");
		ExitCode::SUCCESS
	} else {
		println!("{no}");
		ExitCode::from(1)
	}
}

fn handle_match(matcher: &PathMatcher, pattern: &str, path: &str, prefix: bool) -> Result<ExitCode> {
	let matched = if prefix {
		matcher.matches_start(pattern, path)
	} else {
		matcher.matches(pattern, path)
	};
	tracing::info!(pattern, path, prefix, matched, "matched");
	Ok(report(matched, "match", "no match"))
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	let template = generate_init_template();
	std::fs::write(&config_path, template)
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_route(path: &str, separator: Option<char>) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let mut config = load_merged_config(&cwd).context("Failed to load configuration")?;
	if let Some(separator) = separator {
		config.separator = separator;
		config
			.validate()
			.with_context(|| format!("Routes are invalid with separator {separator:?}"))?;
	}

	let table = RouteTable::from_config(&config);
	let resolution = table.resolve(path);

	let Some(matched) = resolution.matched else {
		println!("no route");
		return Ok(ExitCode::from(1));
	};

	println!("route: {}", matched.route.path);
	println!("source: {}", matched.source.display());
	match resolution.outcome {
		Outcome::Next => println!("outcome: next"),
		Outcome::Redirect { location } => println!("outcome: redirect {location}"),
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = discover_configs(&cwd).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	println!("Configuration files (in cascade order):\n");

	for loaded in &configs {
		let config = &loaded.config;
		println!("# Source: {}", loaded.path.display());
		println!("# root: {}", config.root);
		println!("# no-external-lookup: {}", config.no_external_lookup);
		if let Some(ref env_var) = config.root_config_lookup_disable_env_var {
			println!("# root-config-lookup-disable-env-var: {}", env_var);
		}
		if let Some(ref separator) = config.separator {
			println!("# separator: {}", separator);
		}
		if let Some(ref login_path) = config.login_path {
			println!("# login-path: {}", login_path);
		}
		if let Some(limit) = config.max_pattern_segments {
			println!("# max-pattern-segments: {}", limit);
		}
		println!("# routes: {}", config.routes.len());
		println!();

		for route in &config.routes {
			print_route(route, 1);
		}
		println!();
	}

	// Show user config path
	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn print_route(route: &Route, depth: usize) {
	let indent = "  ".repeat(depth);
	println!("{indent}route: {}", route.path);
	for condition in &route.conditions {
		println!("{indent}  condition: {}", describe_condition(condition));
	}
	for sub_route in &route.sub_routes {
		print_route(sub_route, depth + 1);
	}
}

fn describe_condition(condition: &Condition) -> String {
	match condition {
		Condition::Allow => "allow".to_string(),
		Condition::Deny => "deny".to_string(),
		Condition::Redirect { to, keep_wildcard } => {
			if *keep_wildcard {
				format!("redirect {to} (keep wildcard)")
			} else {
				format!("redirect {to}")
			}
		}
		Condition::RequireEnv { var } => format!("require_env {var}"),
	}
}

fn handle_config_validate() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	match discover_configs(&cwd) {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!(
						"  {} ({} routes)",
						loaded.path.display(),
						loaded.config.routes.len()
					);
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}
