//! Core components and types for overseerr-notify.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling, environment variables and the docker setup step.
//! - Upstream item types and common result handling.

pub mod config;
pub mod types;
