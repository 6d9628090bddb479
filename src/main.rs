use docker_image_migrator::cli::{Args, Runner, exit_code};

#[tokio::main]
async fn main() {
    let args = Args::parse_args().from_env();
    let runner = Runner::new(args);

    let outcome = runner.run().await;
    std::process::exit(exit_code(&outcome));
}
