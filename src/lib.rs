//! Battery-backed storm-resilience simulation service.

pub mod api;
pub mod config;
/// Dataset loading: energy series and station registry.
pub mod data;
pub mod sim;
