//! Page navigation collaborator.

use crate::types::route::Route;

/// Page-navigation facility driven by auth transitions.
pub trait Navigator: Send + Sync + std::fmt::Debug + 'static {
    /// The route currently displayed.
    fn current_route(&self) -> Route;

    /// Navigate to `target`.
    fn push(&self, target: Route);
}
