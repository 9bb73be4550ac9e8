//! Snarkjs engine implementation.
//!
//! Drives the `snarkjs` CLI as a subprocess; proof and key artifacts cross
//! the boundary as JSON files in a per-invocation temp directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::witness::Witness;
use crate::{WorkflowError, WorkflowResult};

use super::traits::{
    Proof, ProveError, ProveOutput, ProvingEngine, PublicSignals, VerificationEngine,
    VerificationKey,
};

/// Configuration for the snarkjs engine.
#[derive(Debug, Clone)]
pub struct SnarkjsConfig {
    /// Path to the snarkjs binary
    pub snarkjs_path: PathBuf,
    /// Extra arguments appended to every snarkjs command
    pub extra_args: Vec<String>,
}

impl Default for SnarkjsConfig {
    fn default() -> Self {
        SnarkjsConfig {
            snarkjs_path: PathBuf::from("snarkjs"),
            extra_args: Vec::new(),
        }
    }
}

impl SnarkjsConfig {
    /// Create a new config with the given snarkjs path.
    pub fn new(snarkjs_path: impl Into<PathBuf>) -> Self {
        SnarkjsConfig {
            snarkjs_path: snarkjs_path.into(),
            ..Default::default()
        }
    }

    /// Add extra arguments.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
}

/// Groth16 proving and verification via the snarkjs CLI.
pub struct SnarkjsEngine {
    config: SnarkjsConfig,
}

impl SnarkjsEngine {
    /// Create a new snarkjs engine with the given configuration.
    pub fn new(config: SnarkjsConfig) -> Self {
        SnarkjsEngine { config }
    }

    /// Create an engine with just the snarkjs path.
    pub fn from_path(snarkjs_path: impl Into<PathBuf>) -> Self {
        Self::new(SnarkjsConfig::new(snarkjs_path))
    }

    fn finish_command(&self, cmd: &mut Command) {
        for arg in &self.config.extra_args {
            cmd.arg(arg);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
    }

    /// Detect snarkjs version. Lenient: any failure reads as unknown.
    fn detect_version(&self) -> Option<String> {
        Command::new(&self.config.snarkjs_path)
            .arg("--version")
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

impl ProvingEngine for SnarkjsEngine {
    fn name(&self) -> &str {
        "snarkjs"
    }

    fn version(&self) -> Option<String> {
        self.detect_version()
    }

    fn full_prove(
        &self,
        witness: &Witness,
        circuit_wasm: &Path,
        proving_key: &Path,
    ) -> Result<ProveOutput, ProveError> {
        // Missing artifacts are detected up front but surface to the user
        // with the same message as an unsatisfying witness.
        for artifact in [circuit_wasm, proving_key] {
            if !artifact.exists() {
                return Err(ProveError::Artifacts(format!(
                    "{} not found",
                    artifact.display()
                )));
            }
        }

        let dir = tempfile::tempdir()
            .map_err(|e| ProveError::Engine(format!("failed to create temp dir: {e}")))?;
        let input_path = dir.path().join("input.json");
        let proof_path = dir.path().join("proof.json");
        let public_path = dir.path().join("public.json");

        let input_json = serde_json::to_vec(witness)
            .map_err(|e| ProveError::Engine(format!("failed to encode witness: {e}")))?;
        fs::write(&input_path, input_json)
            .map_err(|e| ProveError::Engine(format!("failed to write witness input: {e}")))?;

        let mut cmd = Command::new(&self.config.snarkjs_path);
        cmd.arg("groth16")
            .arg("fullprove")
            .arg(&input_path)
            .arg(circuit_wasm)
            .arg(proving_key)
            .arg(&proof_path)
            .arg(&public_path);
        self.finish_command(&mut cmd);

        let output = cmd
            .output()
            .map_err(|e| ProveError::Engine(format!("failed to spawn snarkjs: {e}")))?;

        if !output.status.success() {
            debug!(
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr),
                "snarkjs fullprove failed"
            );
            return Err(ProveError::UnsatisfiedWitness);
        }

        let proof: serde_json::Value = read_json(&proof_path)
            .map_err(|e| ProveError::Engine(format!("failed to read proof output: {e}")))?;
        let signals: Vec<String> = read_json(&public_path)
            .map_err(|e| ProveError::Engine(format!("failed to read public signals: {e}")))?;

        Ok(ProveOutput {
            proof: Proof::new(proof),
            public_signals: PublicSignals::new(signals),
        })
    }
}

impl VerificationEngine for SnarkjsEngine {
    fn verify(
        &self,
        vkey: &VerificationKey,
        public_signals: &PublicSignals,
        proof: &Proof,
    ) -> WorkflowResult<bool> {
        let dir = tempfile::tempdir()?;
        let vkey_path = dir.path().join("verification_key.json");
        let public_path = dir.path().join("public.json");
        let proof_path = dir.path().join("proof.json");

        write_json(&vkey_path, vkey)?;
        write_json(&public_path, public_signals)?;
        write_json(&proof_path, proof)?;

        let mut cmd = Command::new(&self.config.snarkjs_path);
        cmd.arg("groth16")
            .arg("verify")
            .arg(&vkey_path)
            .arg(&public_path)
            .arg(&proof_path);
        self.finish_command(&mut cmd);

        let output = cmd
            .output()
            .map_err(|e| WorkflowError::Message(format!("failed to spawn snarkjs: {e}")))?;

        // snarkjs exits nonzero for an invalid proof
        debug!(status = %output.status, "snarkjs verify finished");
        Ok(output.status.success())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> WorkflowResult<()> {
    let bytes = serde_json::to_vec(value)
        .map_err(|e| WorkflowError::Message(format!("failed to encode {}: {e}", path.display())))?;
    fs::write(path, bytes)?;
    Ok(())
}
