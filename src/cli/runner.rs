//! Run wiring: plan loading, engine setup and orchestration

use crate::cli::args::Args;
use crate::config::MigrationPlan;
use crate::error::{MigrateError, Result};
use crate::migrate::{MigrateOptions, MigrationSummary, Migrator};
use crate::output::OutputManager;
use crate::registry::{DockerEngine, RegistryAuth};

pub struct Runner {
    args: Args,
    output: OutputManager,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        let output = if args.quiet {
            OutputManager::new_quiet()
        } else {
            OutputManager::new(args.verbose)
        };

        Self { args, output }
    }

    /// Load the plan, connect the engine and process every unit.
    ///
    /// Errors returned here are fatal: nothing was migrated. Per-unit
    /// failures never surface as an error, only in the summary.
    pub async fn run(&self) -> Result<MigrationSummary> {
        match self.execute().await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                self.output.error(&e.to_string());
                Err(e)
            }
        }
    }

    async fn execute(&self) -> Result<MigrationSummary> {
        self.output.section("Docker Image Migrator");

        if self.args.config_path.is_empty() {
            return Err(MigrateError::config_load(
                "--configPath",
                "no migration plan path given",
            ));
        }

        let plan = MigrationPlan::load(&self.args.config_path)?;
        self.output.info(&format!(
            "loaded migration plan with {} units from {}",
            plan.len(),
            self.args.config_path
        ));

        let engine = DockerEngine::connect(self.output.clone()).await?;

        let options = MigrateOptions {
            pull_auth: RegistryAuth::from_flags(&self.args.pull_username, &self.args.pull_password),
            push_auth: RegistryAuth::from_flags(&self.args.push_username, &self.args.push_password),
            concurrency: self.args.concurrency,
        };

        let migrator = Migrator::new(engine, options, self.output.clone());
        let summary = migrator.run(&plan).await;

        self.output.summary(
            "Migration summary",
            &[
                ("units", summary.total().to_string()),
                ("succeeded", summary.succeeded.to_string()),
                ("failed", summary.failed.to_string()),
                ("elapsed", self.output.elapsed_time()),
            ],
        );

        Ok(summary)
    }
}

/// Map a run outcome to the process exit status.
///
/// Fatal errors and runs with at least one failed unit both exit non-zero;
/// only a fully successful run exits zero.
pub fn exit_code(outcome: &Result<MigrationSummary>) -> i32 {
    match outcome {
        Ok(summary) if summary.has_failures() => 1,
        Ok(_) => 0,
        Err(_) => 1,
    }
}
