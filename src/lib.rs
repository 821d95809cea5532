//! nodechat - a terminal client for agent chat conversations
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod flow;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
pub mod traits;
pub mod ui;
pub mod view;
