//! Rank resolution for the portfolio contact card.
//!
//! `domain` holds the artifact record, `ports` the traits adapters implement,
//! and `application` the resolver chain plus the two services built on it:
//! the build-time artifact writer and the page-load presentation updater.

pub mod application;
pub mod config;
pub mod domain;
pub mod extract;
pub mod ports;
pub mod utils;
