//! Workflow controller: one witness-to-verification cycle.
//!
//! The whole protocol is a single sequential function; the only branch
//! points with user-visible policy are the recoverable proving failure and
//! the optional verification step. Every other failure mode indicates a
//! broken deployment and propagates as a fatal [`WorkflowError`].

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::config::WorkflowConfig;
use crate::engine::{ProvingEngine, VerificationEngine, VerificationKey};
use crate::witness::{WitnessCollector, read_trimmed_line};
use crate::{WorkflowError, WorkflowResult};

/// The circuit's declared input signals, prompted in this order.
pub const INPUT_SIGNALS: [&str; 2] = ["a", "b"];

/// How a completed run ended. Every variant maps to a successful process
/// exit; only a fatal error escapes [`run`] as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The witness did not satisfy the circuit (or the proving artifacts
    /// were unusable; the two are deliberately not distinguished here).
    ProofFailed,
    /// Proof succeeded, user declined verification.
    VerificationSkipped,
    /// Proof succeeded and the verifier accepted it.
    VerificationPassed,
    /// Proof succeeded but the verifier rejected it.
    VerificationFailed,
}

/// Run one witness-to-verification cycle over the given streams.
///
/// `input`/`output` are generic so tests can drive the protocol over
/// in-memory buffers; main passes locked stdin/stdout.
pub fn run<R: BufRead, W: Write>(
    config: &WorkflowConfig,
    prover: &dyn ProvingEngine,
    verifier: &dyn VerificationEngine,
    input: &mut R,
    output: &mut W,
) -> WorkflowResult<Outcome> {
    let paths = config.artifact_paths();

    let collector = WitnessCollector::new(&INPUT_SIGNALS);
    let witness = collector.collect(input, output)?;

    info!(engine = prover.name(), circuit = %config.circuit_name, "requesting proof");
    let prove_output = match prover.full_prove(&witness, &paths.circuit_wasm, &paths.proving_key) {
        Ok(out) => out,
        Err(err) => {
            // Expected domain failure: report and end the run cleanly.
            debug!(error = %err, "proof generation failed");
            writeln!(output, "Incorrect inputs to the circuit")?;
            return Ok(Outcome::ProofFailed);
        }
    };

    writeln!(output, "Proof: ")?;
    writeln!(
        output,
        "{}",
        prove_output
            .proof
            .to_pretty_json()
            .map_err(|e| WorkflowError::Message(format!("failed to render proof: {e}")))?
    )?;
    writeln!(
        output,
        "Public signals: c = {}",
        prove_output.public_signals
    )?;

    write!(output, "Verify? (y/n) ")?;
    output.flush()?;
    let answer = read_trimmed_line(input)?;
    // Exact token only; anything else means no.
    if answer != "y" {
        debug!(%answer, "verification skipped");
        return Ok(Outcome::VerificationSkipped);
    }

    // Fatal if the key is missing or malformed: unlike a bad witness this
    // is a broken deployment, and it propagates.
    let vkey = load_verification_key(&paths.verification_key)?;

    if verifier.verify(&vkey, &prove_output.public_signals, &prove_output.proof)? {
        writeln!(output, "Verification OK")?;
        Ok(Outcome::VerificationPassed)
    } else {
        writeln!(output, "Invalid proof")?;
        Ok(Outcome::VerificationFailed)
    }
}

/// Load the verification key, holding no handle afterward.
pub fn load_verification_key(path: &Path) -> WorkflowResult<VerificationKey> {
    let bytes = fs::read(path).map_err(|source| WorkflowError::VerificationKeyIo {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_slice(&bytes).map_err(|source| {
        WorkflowError::VerificationKeyFormat {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(VerificationKey::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::engine::{MockConfig, MockEngine};

    fn run_mock(config: &WorkflowConfig, engine: &MockEngine, stdin: &str) -> (Outcome, String) {
        let mut input = Cursor::new(stdin.to_string());
        let mut output = Vec::new();
        let outcome = run(config, engine, engine, &mut input, &mut output).unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    fn config_with_vkey() -> (tempfile::TempDir, WorkflowConfig) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("verification_key.json"),
            r#"{"protocol":"groth16","curve":"bn128"}"#,
        )
        .unwrap();
        let config = WorkflowConfig::new(dir.path(), "private_multiplication");
        (dir, config)
    }

    #[test]
    fn test_proof_failure_reports_and_ends_cleanly() {
        let (_dir, config) = config_with_vkey();
        let engine = MockEngine::default_mock();
        let (outcome, out) = run_mock(&config, &engine, "x\n4\ny\n");
        assert_eq!(outcome, Outcome::ProofFailed);
        assert!(out.ends_with("Incorrect inputs to the circuit\n"));
        assert!(!out.contains("Proof: "));
    }

    #[test]
    fn test_skip_verification_on_anything_but_y() {
        let (_dir, config) = config_with_vkey();
        let engine = MockEngine::default_mock();
        for answer in ["n", "Y", "yes", "", " y"] {
            let stdin = format!("3\n4\n{answer}\n");
            let (outcome, out) = run_mock(&config, &engine, &stdin);
            assert_eq!(outcome, Outcome::VerificationSkipped, "answer {answer:?}");
            assert!(!out.contains("Verification OK"));
            assert!(!out.contains("Invalid proof"));
        }
    }

    #[test]
    fn test_verification_passes() {
        let (_dir, config) = config_with_vkey();
        let engine = MockEngine::default_mock();
        let (outcome, out) = run_mock(&config, &engine, "3\n4\ny\n");
        assert_eq!(outcome, Outcome::VerificationPassed);
        assert!(out.contains("Public signals: c = 12"));
        assert!(out.ends_with("Verification OK\n"));
    }

    #[test]
    fn test_verification_failure_prints_invalid_proof() {
        let (_dir, config) = config_with_vkey();
        let engine = MockEngine::new(MockConfig::new("mock").with_verify_result(false));
        let (outcome, out) = run_mock(&config, &engine, "3\n4\ny\n");
        assert_eq!(outcome, Outcome::VerificationFailed);
        assert!(out.ends_with("Invalid proof\n"));
    }

    #[test]
    fn test_missing_vkey_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = WorkflowConfig::new(dir.path(), "private_multiplication");
        let engine = MockEngine::default_mock();
        let mut input = Cursor::new("3\n4\ny\n".to_string());
        let mut output = Vec::new();
        let result = run(&config, &engine, &engine, &mut input, &mut output);
        assert!(matches!(
            result,
            Err(WorkflowError::VerificationKeyIo { .. })
        ));
    }

    #[test]
    fn test_malformed_vkey_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("verification_key.json"), "not json").unwrap();
        let config = WorkflowConfig::new(dir.path(), "private_multiplication");
        let engine = MockEngine::default_mock();
        let mut input = Cursor::new("3\n4\ny\n".to_string());
        let mut output = Vec::new();
        let result = run(&config, &engine, &engine, &mut input, &mut output);
        assert!(matches!(
            result,
            Err(WorkflowError::VerificationKeyFormat { .. })
        ));
    }

    #[test]
    fn test_vkey_not_loaded_when_skipping() {
        // No key on disk, but the "n" path never touches it.
        let dir = tempfile::tempdir().unwrap();
        let config = WorkflowConfig::new(dir.path(), "private_multiplication");
        let engine = MockEngine::default_mock();
        let (outcome, _) = run_mock(&config, &engine, "3\n4\nn\n");
        assert_eq!(outcome, Outcome::VerificationSkipped);
    }
}
