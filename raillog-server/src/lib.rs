//! Rail trip log server.
//!
//! Records the trains a user has travelled on and answers: "which
//! train-set ran this service on that day?" by asking upstream providers
//! in priority order.

pub mod canonical;
pub mod config;
pub mod domain;
pub mod providers;
pub mod resolver;
pub mod trips;
pub mod web;
