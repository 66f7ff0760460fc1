//! Route lookup and condition chains for antpath.
//!
//! This module handles:
//! - Picking the first matching route from an ordered, nested route tree
//! - Running the matched route's conditions into an outcome

pub mod conditions;
pub mod table;

pub use conditions::{ConditionContext, Outcome, Verdict, run_conditions};
pub use table::{MatchedRoute, Resolution, RouteTable};
