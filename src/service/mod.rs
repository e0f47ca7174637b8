//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services used by overseerr-notify:
//! - Media request services (e.g., Overseerr)
//! - Notification webhooks (e.g., Discord)
//!
//! Each service module defines both a generic trait and a concrete implementation,
//! allowing for extensibility and easy testing.

pub mod media;
pub mod webhook;
