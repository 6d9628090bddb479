//! Docker Image Migrator Library
//!
//! This file serves as the library root for the docker-image-migrator crate,
//! organizing and exposing the modules that make up the application.

pub mod cli;
pub mod config;
pub mod error;
pub mod migrate;
pub mod output;
pub mod registry;

pub use config::{MigrationPlan, MigrationUnit};
pub use error::{MigrateError, Result};
pub use migrate::{MigrateOptions, MigrationSummary, Migrator};
pub use output::OutputManager;
pub use registry::{DockerEngine, ImageEngine, RegistryAuth};
