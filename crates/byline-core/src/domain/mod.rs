//! Domain entities - the core business objects.

mod author;

mod post;

pub mod validate;

pub use author::{Author, AuthorPatch, NewAuthor};
pub use post::{NewPost, Post, PostPatch};
