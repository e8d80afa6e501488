//! Immutable execution context and logger attachment.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::logger::Logger;

/// Immutable, cheaply cloneable carrier of request-scoped values.
///
/// A context is a persistent chain of typed entries: [`with_value`](Context::with_value)
/// prepends one entry and returns a new context, leaving the original
/// untouched. Lookup walks the chain, so the most recently attached value
/// of a type shadows earlier ones. Values are stored under their type, which
/// keeps unrelated attachments from colliding.
///
/// # Example
///
/// ```
/// use integrations_logging::Context;
///
/// struct RequestId(String);
///
/// let ctx = Context::new().with_value(RequestId("r-42".to_string()));
/// assert_eq!(ctx.value::<RequestId>().unwrap().0, "r-42");
/// ```
#[derive(Clone)]
pub struct Context {
    head: Option<Arc<Entry>>,
}

struct Entry {
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Entry>>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self { head: None }
    }

    /// Returns a new context that additionally carries `value`, stored under
    /// its type. O(1); the original context is not modified.
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        Self {
            head: Some(Arc::new(Entry {
                key: TypeId::of::<T>(),
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Looks up the most recently attached value of type `T`.
    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        let mut current = self.head.as_deref();
        while let Some(entry) = current {
            if entry.key == TypeId::of::<T>() {
                return entry.value.downcast_ref::<T>();
            }
            current = entry.parent.as_deref();
        }
        None
    }

    fn depth(&self) -> usize {
        let mut count = 0;
        let mut current = self.head.as_deref();
        while let Some(entry) = current {
            count += 1;
            current = entry.parent.as_deref();
        }
        count
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("entries", &self.depth())
            .finish()
    }
}

/// Private slot type for the logger attachment. Storing the handle under a
/// type callers cannot name keeps it from colliding with any value they
/// attach themselves.
struct LoggerSlot(Logger);

/// Returns a new context that carries `logger`; the original context is not
/// modified. O(1), never blocks.
pub fn with_logger(ctx: &Context, logger: Logger) -> Context {
    ctx.with_value(LoggerSlot(logger))
}

/// Retrieves the logger attached to `ctx`.
///
/// When no logger was attached, returns [`Logger::noop`] so call sites can
/// log unconditionally. Never fails.
pub fn from_context(ctx: &Context) -> Logger {
    match ctx.value::<LoggerSlot>() {
        Some(slot) => slot.0.clone(),
        None => Logger::noop(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_round_trip() {
        let ctx = Context::new().with_value(8080_u32);
        assert_eq!(ctx.value::<u32>(), Some(&8080));
    }

    #[test]
    fn test_missing_value_is_none() {
        let ctx = Context::new().with_value(8080_u32);
        assert!(ctx.value::<String>().is_none());
    }

    #[test]
    fn test_latest_value_shadows_earlier() {
        let ctx = Context::new().with_value(1_u32).with_value(2_u32);
        assert_eq!(ctx.value::<u32>(), Some(&2));
    }

    #[test]
    fn test_with_value_leaves_original_untouched() {
        let ctx = Context::new();
        let _derived = ctx.with_value(8080_u32);

        assert!(ctx.value::<u32>().is_none());
    }

    #[test]
    fn test_clone_shares_entries() {
        let ctx = Context::new().with_value("shared".to_string());
        let cloned = ctx.clone();

        assert_eq!(cloned.value::<String>().map(String::as_str), Some("shared"));
    }

    #[test]
    fn test_from_context_without_logger_is_silent() {
        let logger = from_context(&Context::new());

        logger.info("dropped", &[]);
        assert!(logger.persistent_fields().is_empty());
    }

    #[test]
    fn test_debug_reports_entry_count() {
        let ctx = Context::new().with_value(1_u8).with_value(2_u16);
        assert_eq!(format!("{:?}", ctx), "Context { entries: 2 }");
    }
}
