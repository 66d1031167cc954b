//! Relational store for the pds application: configuration, pool setup,
//! embedded migrations, row models and per-table query functions.

pub mod config;
pub mod error;
pub mod models;
pub mod pool;
pub mod queries;

pub use error::{StoreError, StoreResult};
