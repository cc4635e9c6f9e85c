//! Contest microsite with a moderated community Q&A board.
//!
//! Anonymous visitors post questions and ideas; an administrator who
//! knows the shared secret replies, deletes posts, blocks author names
//! and publishes notices. Posts live in a remote table store or a local
//! SQLite file, and the board keeps working from memory when neither
//! answers.

pub mod auth;
pub mod board;
pub mod config;
pub mod controller;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod moderation;
pub mod notice;
pub mod site;
pub mod store;
pub mod web;

pub use auth::{AccessGate, Role, Session, SessionManager};
pub use board::{Category, Post, PostRecord, PostStatus, Reply};
pub use config::Config;
pub use controller::{BoardController, BoardSnapshot, Submission};
pub use error::{BoardError, Result};
pub use store::BoardStore;
