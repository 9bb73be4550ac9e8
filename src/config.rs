//! Run configuration and artifact path resolution.

use std::path::PathBuf;

/// Configuration for a single workflow run.
///
/// Resolved once at startup and passed into the workflow controller; the
/// artifact layout underneath `build_dir` follows the snarkjs build
/// convention for a compiled circuit.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Root directory holding the compiled-circuit artifacts
    pub build_dir: PathBuf,
    /// Logical circuit identifier (e.g. "private_multiplication")
    pub circuit_name: String,
}

impl WorkflowConfig {
    /// Create a config from an artifact root and circuit name.
    pub fn new(build_dir: impl Into<PathBuf>, circuit_name: impl Into<String>) -> Self {
        WorkflowConfig {
            build_dir: build_dir.into(),
            circuit_name: circuit_name.into(),
        }
    }

    /// Resolve the on-disk locations of the three artifacts this run reads.
    pub fn artifact_paths(&self) -> ArtifactPaths {
        let circuit = &self.circuit_name;
        ArtifactPaths {
            circuit_wasm: self
                .build_dir
                .join(format!("{circuit}_js"))
                .join(format!("{circuit}.wasm")),
            proving_key: self.build_dir.join(format!("{circuit}_final.zkey")),
            verification_key: self.build_dir.join("verification_key.json"),
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        WorkflowConfig::new("build", "private_multiplication")
    }
}

/// Resolved artifact locations, all read-only for the lifetime of a run.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    /// Compiled circuit program (witness calculator)
    pub circuit_wasm: PathBuf,
    /// Proving key produced by the trusted setup
    pub proving_key: PathBuf,
    /// Verification key JSON document
    pub verification_key: PathBuf,
}
