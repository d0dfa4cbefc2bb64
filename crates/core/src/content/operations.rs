//! The gated operations of the content API.
//!
//! Operation names are HTTP verbs so that permission maps read like route
//! tables: `{"posts": ["GET", "POST"]}`.

use crate::auth::Operation;

pub const CATEGORIES: &str = "categories";
pub const POSTS: &str = "posts";

pub const LIST_CATEGORIES: Operation = Operation::required(CATEGORIES, "GET");
pub const GET_CATEGORY: Operation = Operation::required(CATEGORIES, "GET");
pub const CREATE_CATEGORY: Operation = Operation::required(CATEGORIES, "POST");
pub const UPDATE_CATEGORY: Operation = Operation::required(CATEGORIES, "PUT");
pub const DELETE_CATEGORY: Operation = Operation::required(CATEGORIES, "DELETE");

pub const LIST_POSTS: Operation = Operation::required(POSTS, "GET");
pub const GET_POST: Operation = Operation::required(POSTS, "GET");
pub const CREATE_POST: Operation = Operation::required(POSTS, "POST");
pub const UPDATE_POST: Operation = Operation::required(POSTS, "PUT");
pub const DELETE_POST: Operation = Operation::required(POSTS, "DELETE");
