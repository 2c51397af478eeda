//! Interface Monitor
//!
//! Stores run records of recurring integration jobs ("interfaces") and serves
//! dashboard aggregations and a filterable log browser over a JSON API.

#![allow(missing_docs)]

pub mod api;
pub mod app;
pub mod boot;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod database;
pub mod environment;
pub mod interface_logs;
pub mod router;
pub mod seed;
pub mod setup_tracing;
