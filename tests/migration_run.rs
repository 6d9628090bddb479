//! End-to-end run over a plan file with a scripted engine.

use async_trait::async_trait;
use docker_image_migrator::cli::exit_code;
use docker_image_migrator::{
    ImageEngine, MigrateError, MigrateOptions, MigrationPlan, MigrationSummary, Migrator,
    OutputManager, RegistryAuth, Result,
};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Engine double: succeeds everywhere except for sources listed as missing.
struct ScriptedEngine {
    missing_sources: Vec<String>,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ImageEngine for ScriptedEngine {
    async fn pull(&self, image: &str, auth: Option<&str>) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("pull {} auth={}", image, auth.is_some()));
        if self.missing_sources.iter().any(|m| m == image) {
            return Err(MigrateError::pull(image, "repository does not exist"));
        }
        Ok(())
    }

    async fn tag(&self, source: &str, destination: &str) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("tag {} {}", source, destination));
        Ok(())
    }

    async fn push(&self, image: &str, auth: Option<&str>) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("push {} auth={}", image, auth.is_some()));
        Ok(())
    }
}

fn write_plan(yaml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn plan_file_drives_a_full_run() {
    let plan_file = write_plan(
        r#"
migrationUnits:
  - sourceImage: registry-a.example.com/team/app:1.4.2
    destinationImage: registry-b.example.com/mirror/app:1.4.2
  - sourceImage: registry-a.example.com/team/gone:0.1
    destinationImage: registry-b.example.com/mirror/gone:0.1
"#,
    );

    let plan = MigrationPlan::load(plan_file.path()).unwrap();
    assert_eq!(plan.len(), 2);

    let log = Arc::new(Mutex::new(Vec::new()));
    let engine = ScriptedEngine {
        missing_sources: vec!["registry-a.example.com/team/gone:0.1".to_string()],
        log: log.clone(),
    };
    let options = MigrateOptions {
        pull_auth: RegistryAuth::from_flags("mirror-bot", "pull-secret"),
        push_auth: None,
        concurrency: 1,
    };

    let migrator = Migrator::new(engine, options, OutputManager::new_quiet());
    let summary = migrator.run(&plan).await;

    assert_eq!(
        summary,
        MigrationSummary {
            succeeded: 1,
            failed: 1
        }
    );
    assert_eq!(exit_code(&Ok(summary)), 1);

    let log = log.lock().unwrap();
    assert_eq!(
        *log,
        vec![
            "pull registry-a.example.com/team/app:1.4.2 auth=true",
            "tag registry-a.example.com/team/app:1.4.2 registry-b.example.com/mirror/app:1.4.2",
            "push registry-b.example.com/mirror/app:1.4.2 auth=false",
            "pull registry-a.example.com/team/gone:0.1 auth=true",
        ]
    );
}

#[tokio::test]
async fn empty_plan_exits_clean() {
    let plan_file = write_plan("migrationUnits: []\n");
    let plan = MigrationPlan::load(plan_file.path()).unwrap();

    let log = Arc::new(Mutex::new(Vec::new()));
    let engine = ScriptedEngine {
        missing_sources: vec![],
        log: log.clone(),
    };

    let migrator = Migrator::new(engine, MigrateOptions::default(), OutputManager::new_quiet());
    let summary = migrator.run(&plan).await;

    assert_eq!(summary, MigrationSummary::default());
    assert_eq!(exit_code(&Ok(summary)), 0);
    assert!(log.lock().unwrap().is_empty());
}
