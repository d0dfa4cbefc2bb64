//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL,
    permissions TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Categories table
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Posts table
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    author_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (author_id) REFERENCES users(id)
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_posts_author_id ON posts(author_id);
CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (id, first_name, last_name, email, password_hash, role, permissions, created_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, first_name, last_name, email, password_hash, role, permissions, created_at
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_EMAIL: &str = r#"
SELECT id, first_name, last_name, email, password_hash, role, permissions, created_at
FROM users
WHERE email = ?1
"#;

pub const UPDATE_USER: &str = r#"
UPDATE users
SET first_name = ?2, last_name = ?3, email = ?4, password_hash = ?5, role = ?6, permissions = ?7
WHERE id = ?1
"#;

// Category queries
pub const INSERT_CATEGORY: &str = r#"
INSERT INTO categories (title, content, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_CATEGORIES: &str = r#"
SELECT id, title, content, created_at, updated_at
FROM categories
ORDER BY id ASC
"#;

pub const SELECT_CATEGORY_BY_ID: &str = r#"
SELECT id, title, content, created_at, updated_at
FROM categories
WHERE id = ?1
"#;

pub const UPDATE_CATEGORY: &str = r#"
UPDATE categories
SET title = ?2, content = ?3, updated_at = ?4
WHERE id = ?1
"#;

pub const DELETE_CATEGORY: &str = r#"
DELETE FROM categories
WHERE id = ?1
"#;

// Post queries
pub const INSERT_POST: &str = r#"
INSERT INTO posts (title, content, author_id, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_POST_BY_ID: &str = r#"
SELECT id, title, content, author_id, created_at, updated_at
FROM posts
WHERE id = ?1
"#;

pub const SELECT_POST_VIEWS: &str = r#"
SELECT p.id, p.title, p.content, u.first_name, u.email
FROM posts p
INNER JOIN users u ON u.id = p.author_id
ORDER BY p.id ASC
"#;

pub const SELECT_POST_VIEW_BY_ID: &str = r#"
SELECT p.id, p.title, p.content, u.first_name, u.email
FROM posts p
INNER JOIN users u ON u.id = p.author_id
WHERE p.id = ?1
"#;

pub const UPDATE_POST: &str = r#"
UPDATE posts
SET title = ?2, content = ?3, updated_at = ?4
WHERE id = ?1
"#;

pub const DELETE_POST: &str = r#"
DELETE FROM posts
WHERE id = ?1
"#;
