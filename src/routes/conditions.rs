use crate::config::types::Condition;
use crate::config::cascade::is_env_truthy;
use crate::matcher::PathMatcher;

/// What the caller should do with a request after route resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	/// Let the request through unchanged.
	Next,

	/// Send the client to `location`.
	Redirect { location: String },
}

/// The result of evaluating a single condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
	/// Move on to the next condition.
	Continue,

	/// Reject the request; it is sent to the login path.
	Deny,

	/// Stop and answer with this outcome.
	Respond(Outcome),
}

/// What a condition gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct ConditionContext<'a> {
	pub matcher: &'a PathMatcher,

	/// Pattern of the route that matched.
	pub pattern: &'a str,

	/// The request path.
	pub path: &'a str,
}

impl Condition {
	pub fn evaluate(&self, ctx: &ConditionContext) -> Verdict {
		match self {
			Condition::Allow => Verdict::Continue,
			Condition::Deny => Verdict::Deny,
			Condition::Redirect { to, keep_wildcard } => {
				let location = if *keep_wildcard {
					append_wildcard_path(ctx, to)
				} else {
					to.clone()
				};
				Verdict::Respond(Outcome::Redirect { location })
			}
			Condition::RequireEnv { var } => {
				if is_env_truthy(var) {
					Verdict::Continue
				} else {
					Verdict::Deny
				}
			}
		}
	}
}

fn append_wildcard_path(ctx: &ConditionContext, to: &str) -> String {
	let rest = ctx
		.matcher
		.extract_path_within_pattern(ctx.pattern, ctx.path);
	if rest.is_empty() {
		return to.to_string();
	}

	let separator = ctx.matcher.separator();
	let mut location = to.trim_end_matches(separator).to_string();
	location.push(separator);
	location.push_str(rest.trim_start_matches(separator));
	location
}

/// Run `conditions` in order and stop at the first one that does not continue.
pub fn run_conditions(conditions: &[Condition], ctx: &ConditionContext, login_path: &str) -> Outcome {
	for condition in conditions {
		match condition.evaluate(ctx) {
			Verdict::Continue => continue,
			Verdict::Deny => {
				tracing::debug!(pattern = ctx.pattern, path = ctx.path, ?condition, "denied");
				return Outcome::Redirect {
					location: login_path.to_string(),
				};
			}
			Verdict::Respond(outcome) => {
				tracing::debug!(pattern = ctx.pattern, path = ctx.path, ?outcome, "responded");
				return outcome;
			}
		}
	}

	Outcome::Next
}
