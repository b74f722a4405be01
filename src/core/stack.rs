//! Bookkeeping for screens suspended beneath modal and overlay layers.
//!
//! Pure operations over the suspended-screen stack; the synchronous dismiss
//! path (dispatch-time reconciliation) and the asynchronous path (lifecycle
//! reconciliation) both go through these, so a desynchronized stack fails
//! the same way everywhere.

use crate::core::error::NavigationError;
use crate::engine::ComponentId;

/// Pop the most recently suspended screen: the one a single dismissal
/// should reveal. Returns the restored id and the shortened stack.
pub(crate) fn pop_top(
    stack: &[ComponentId],
) -> Result<(ComponentId, Vec<ComponentId>), NavigationError> {
    match stack.split_last() {
        Some((top, rest)) => Ok((top.clone(), rest.to_vec())),
        None => Err(NavigationError::EmptyStack),
    }
}

/// The first suspended screen: the one revealed when every layer goes away.
/// The caller is responsible for clearing the stack.
pub(crate) fn pop_bottom(stack: &[ComponentId]) -> Result<ComponentId, NavigationError> {
    stack.first().cloned().ok_or(NavigationError::EmptyStack)
}
