//! Feed post domain entities.

pub mod comment;
pub mod item;
pub mod model;

pub use comment::{Comment, Comments};
pub use item::CatalogItem;
pub use model::{Likes, Post, PostKind};
