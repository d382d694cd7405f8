//! Pure context-transforming actions.
//!
//! Entry, exit, and transition behaviors are all expressed as `Action`
//! values: pure functions from one context to the next. The interpreter
//! threads the context through them in a strict order, so an action never
//! observes a partially applied microstep.

use super::context::Context;
use std::fmt;
use std::sync::Arc;

/// A pure `Context -> Context` function.
///
/// Actions take the context by value and return the next context; the
/// interpreter folds them in sequence. They must be deterministic and
/// thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```rust
/// use statecraft::{Action, Context};
/// use serde_json::json;
///
/// let increment = Action::new(|ctx: Context| {
///     let count = ctx.get("count").and_then(|v| v.as_i64()).unwrap_or(0);
///     ctx.put("count", json!(count + 1))
/// });
///
/// let ctx = increment.apply(Context::new());
/// assert_eq!(ctx.get("count"), Some(&json!(1)));
/// ```
#[derive(Clone)]
pub struct Action {
    func: Arc<dyn Fn(Context) -> Context + Send + Sync>,
}

impl Action {
    /// Create an action from a pure function.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Context) -> Context + Send + Sync + 'static,
    {
        Action {
            func: Arc::new(func),
        }
    }

    /// Apply the action, producing the next context.
    pub fn apply(&self, ctx: Context) -> Context {
        (self.func)(ctx)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action")
    }
}
