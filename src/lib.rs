//! Japanese vocabulary quiz: a word bank indexed by category and level, a
//! timed quiz session, flashcards, and the terminal front end that drives them.

pub mod app;
pub mod bank;
pub mod config;
pub mod engine;
pub mod event;
pub mod logging;
pub mod session;
pub mod store;
pub mod ui;
