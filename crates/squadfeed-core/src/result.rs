//! Convenience result type alias for SquadFeed.

use crate::error::AppError;

/// A specialized `Result` type for SquadFeed operations.
pub type AppResult<T> = Result<T, AppError>;
