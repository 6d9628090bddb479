//! Migration orchestrator
//!
//! Drives one migration unit at a time through pull, tag and push. A unit
//! that fails at any step is logged and abandoned; the run always continues
//! to the next unit and proceeds to plan exhaustion. There are no retries
//! and no cleanup of partially pulled or tagged images.

use crate::config::{MigrationPlan, MigrationUnit};
use crate::error::Result;
use crate::output::OutputManager;
use crate::registry::{ImageEngine, RegistryAuth};
use futures_util::StreamExt;
use futures_util::stream;

/// Run options resolved once at startup and passed into the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    /// Credentials attached to every pull, `None` for anonymous access.
    pub pull_auth: Option<RegistryAuth>,
    /// Credentials attached to every push, `None` for anonymous access.
    pub push_auth: Option<RegistryAuth>,
    /// Upper bound on units migrated in parallel; 0 and 1 both mean
    /// strictly sequential processing.
    pub concurrency: usize,
}

/// Outcome tally of a full run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl MigrationSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Orchestrates a migration plan against an [`ImageEngine`].
///
/// The engine must be per-call stateless or internally thread-safe when the
/// concurrency limit is raised above one; within a unit the pull, tag and
/// push steps always run strictly in order.
pub struct Migrator<E> {
    engine: E,
    options: MigrateOptions,
    output: OutputManager,
}

impl<E: ImageEngine> Migrator<E> {
    pub fn new(engine: E, options: MigrateOptions, output: OutputManager) -> Self {
        Self {
            engine,
            options,
            output,
        }
    }

    /// Process every unit of the plan in order and tally the outcomes.
    ///
    /// A unit's failure never prevents processing of the units after it.
    pub async fn run(&self, plan: &MigrationPlan) -> MigrationSummary {
        let limit = self.options.concurrency.max(1);
        let total = plan.len();
        let mut summary = MigrationSummary::default();

        let mut outcomes = stream::iter(plan.units())
            .map(|unit| self.migrate_unit(unit))
            .buffer_unordered(limit);

        while let Some(outcome) = outcomes.next().await {
            match outcome {
                Ok(()) => summary.succeeded += 1,
                Err(_) => summary.failed += 1,
            }
            self.output.verbose(&format!(
                "processed {}/{} units ({} failed)",
                summary.total(),
                total,
                summary.failed
            ));
        }

        summary
    }

    /// Run the per-unit protocol end to end, logging start and outcome.
    async fn migrate_unit(&self, unit: &MigrationUnit) -> Result<()> {
        self.output.info(&format!("start migrate image. unit={}", unit));

        match self.run_unit_steps(unit).await {
            Ok(()) => {
                self.output
                    .success(&format!("migrate image successfully. unit={}", unit));
                Ok(())
            }
            Err(e) => {
                self.output
                    .error(&format!("migrate image with a error: {}. unit={}", e, unit));
                Err(e)
            }
        }
    }

    /// Pull, tag, push in strict order; abandon on first failure.
    async fn run_unit_steps(&self, unit: &MigrationUnit) -> Result<()> {
        let pull_token = auth_token(&self.options.pull_auth)?;
        self.engine
            .pull(&unit.source_image, pull_token.as_deref())
            .await?;

        self.engine
            .tag(&unit.source_image, &unit.destination_image)
            .await?;

        let push_token = auth_token(&self.options.push_auth)?;
        self.engine
            .push(&unit.destination_image, push_token.as_deref())
            .await?;

        Ok(())
    }
}

/// Encode the opaque auth token for one operation.
///
/// Recomputed per call; the token itself is never stored or logged.
fn auth_token(auth: &Option<RegistryAuth>) -> Result<Option<String>> {
    auth.as_ref().map(RegistryAuth::token).transpose()
}
