//! Guard predicates for controlling transitions.
//!
//! Guards are pure boolean functions over the context that determine whether
//! a transition may fire. A transition whose guard refuses is skipped and the
//! lookup continues up the active branch.

use super::context::Context;
use std::fmt;
use std::sync::Arc;

/// Pure predicate that decides whether a transition can fire.
///
/// Guards are evaluated against the context as it stands when the transition
/// search begins; no action from the same microstep has run yet. They must be
/// deterministic and thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```rust
/// use statecraft::{Context, Guard};
/// use serde_json::json;
///
/// let has_credit = Guard::new(|ctx: &Context| {
///     ctx.get("credit").and_then(|v| v.as_i64()).unwrap_or(0) > 0
/// });
///
/// assert!(!has_credit.check(&Context::new()));
/// assert!(has_credit.check(&Context::new().put("credit", json!(5))));
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn(&Context) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Context) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check whether the guard allows the transition under this context.
    pub fn check(&self, ctx: &Context) -> bool {
        (self.predicate)(ctx)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard")
    }
}
