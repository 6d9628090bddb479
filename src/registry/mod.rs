//! Registry client adapter
//!
//! Wraps the Docker engine's control API behind the [`ImageEngine`] trait:
//! pull, tag and push as independent operations, each draining the engine's
//! progress stream to completion before reporting success.

pub mod auth;
pub mod client;

pub use auth::RegistryAuth;
pub use client::{DockerEngine, ImageEngine};
