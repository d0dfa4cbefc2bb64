pub mod operations;
mod requests;
mod types;

pub use requests::{ContentChanges, CreateContentRequest, UpdateContentRequest};
pub use types::{Author, Category, NewCategory, NewPost, Post, PostView};
