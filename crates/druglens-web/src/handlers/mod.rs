//! HTTP handlers for all web routes.

pub mod evaluate;
