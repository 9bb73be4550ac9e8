#![forbid(unsafe_code)]

use clap::Parser;
use tracing_subscriber::EnvFilter;

use zk_workflow::config::WorkflowConfig;
use zk_workflow::engine::{MockConfig, MockEngine, SnarkjsConfig, SnarkjsEngine};
use zk_workflow::{WorkflowError, workflow};

#[derive(Parser, Debug)]
#[command(name = "zk-workflow")]
#[command(about = "Interactive driver for a Groth16 proof-request/verify workflow", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set ZK_WORKFLOW_LOG)
    #[arg(long)]
    verbose: bool,

    /// Root directory holding the compiled-circuit artifacts
    #[arg(long, default_value = "build")]
    build_dir: std::path::PathBuf,

    /// Circuit name (determines artifact file names under the build dir)
    #[arg(long, default_value = "private_multiplication")]
    circuit: String,

    /// Engine name (snarkjs, mock)
    #[arg(long, default_value = "snarkjs")]
    engine: String,

    /// Path to the engine binary
    #[arg(long, default_value = "snarkjs")]
    engine_path: std::path::PathBuf,

    /// Additional args appended to every engine invocation
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    engine_args: Vec<String>,
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("ZK_WORKFLOW_LOG").unwrap_or_else(|_| {
        if verbose {
            "zk_workflow=debug".to_string()
        } else {
            "zk_workflow=info".to_string()
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = WorkflowConfig::new(cli.build_dir, cli.circuit);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    let result = match cli.engine.as_str() {
        "snarkjs" => {
            let engine =
                SnarkjsEngine::new(SnarkjsConfig::new(cli.engine_path).with_args(cli.engine_args));
            workflow::run(&config, &engine, &engine, &mut input, &mut output)
        }
        "mock" => {
            let engine = MockEngine::new(MockConfig::new("mock"));
            workflow::run(&config, &engine, &engine, &mut input, &mut output)
        }
        other => Err(WorkflowError::Message(format!("unknown engine '{other}'"))),
    };

    // Every completed outcome is a successful exit; only fatal errors
    // (verification-key load, stream I/O, engine spawn) are nonzero.
    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
