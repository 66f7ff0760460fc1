//! Antpath - Ant-style path pattern matching and route resolution.
//!
//! This library provides:
//! - A path matcher supporting `?`, `*` and `**` wildcards
//! - Wildcard path extraction
//! - Configuration file parsing and cascade discovery
//! - Route lookup with declarative condition chains
//!
//! # Example
//!
//! ```no_run
//! use antpath_cli::config::load_merged_config;
//! use antpath_cli::routes::{Outcome, RouteTable};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let config = load_merged_config(&cwd).unwrap();
//! let table = RouteTable::from_config(&config);
//!
//! let resolution = table.resolve("/admin/users/42");
//! if let Outcome::Redirect { location } = resolution.outcome {
//!     println!("Redirect to {location}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod matcher;
pub mod routes;

pub use error::{AntpathError, Result};
pub use matcher::PathMatcher;
