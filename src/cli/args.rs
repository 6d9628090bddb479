//! Command-line argument parsing

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "docker-image-migrator")]
#[command(about = "A tool to migrate Docker images between registries from a YAML plan")]
#[command(version)]
pub struct Args {
    /// Path to the YAML migration plan
    #[arg(
        long = "configPath",
        default_value = "",
        help = "Path to the YAML file describing the migration units"
    )]
    pub config_path: String,

    /// Username for registry login in pull actions
    #[arg(
        long = "pull-username",
        default_value = "",
        help = "Username for docker login in pull actions"
    )]
    pub pull_username: String,

    /// Password for registry login in pull actions
    #[arg(
        long = "pull-password",
        default_value = "",
        help = "Password for docker login in pull actions"
    )]
    pub pull_password: String,

    /// Username for registry login in push actions
    #[arg(
        long = "push-username",
        default_value = "",
        help = "Username for docker login in push actions"
    )]
    pub push_username: String,

    /// Password for registry login in push actions
    #[arg(
        long = "push-password",
        default_value = "",
        help = "Password for docker login in push actions"
    )]
    pub push_password: String,

    /// Number of units migrated in parallel
    #[arg(
        long = "concurrency",
        short = 'j',
        default_value = "1",
        help = "Upper bound on units migrated in parallel"
    )]
    pub concurrency: usize,

    /// Verbose output
    #[arg(long = "verbose", short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long = "quiet", short = 'q', help = "Suppress status and progress output")]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Fill credentials from environment variables when the flags are unset.
    pub fn from_env(mut self) -> Self {
        if self.pull_username.is_empty() {
            if let Ok(val) = std::env::var("IMAGE_MIGRATOR_PULL_USERNAME") {
                self.pull_username = val;
            }
        }
        if self.pull_password.is_empty() {
            if let Ok(val) = std::env::var("IMAGE_MIGRATOR_PULL_PASSWORD") {
                self.pull_password = val;
            }
        }
        if self.push_username.is_empty() {
            if let Ok(val) = std::env::var("IMAGE_MIGRATOR_PUSH_USERNAME") {
                self.push_username = val;
            }
        }
        if self.push_password.is_empty() {
            if let Ok(val) = std::env::var("IMAGE_MIGRATOR_PUSH_PASSWORD") {
                self.push_password = val;
            }
        }
        self
    }
}
