//! PAUSE: think-before-you-trade analysis service.
//!
//! Fetches a daily price history, computes a fixed set of technical
//! indicators, asks a recommendation policy for a GO/WAIT verdict and
//! sanitizes the answer into a decision that is always safe to render.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod ledger;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
