//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the completion-service conversation so route
//! handlers can stay focused on protocol translation.

pub mod proxy;
