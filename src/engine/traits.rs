//! Engine traits and the value types that cross the engine boundary.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::WorkflowResult;
use crate::witness::Witness;

/// An opaque proof artifact.
///
/// The internal shape (curve points, field elements) is protocol-defined;
/// this crate only renders it and passes it unchanged to verification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Proof(serde_json::Value);

impl Proof {
    pub fn new(value: serde_json::Value) -> Self {
        Proof(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Pretty-print with 1-space indentation, the display form the original
    /// snarkjs driver used for proofs.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.0.serialize(&mut ser)?;
        Ok(String::from_utf8(buf).expect("serde_json emits valid utf-8"))
    }
}

/// Ordered field-element outputs revealed alongside the proof, in the
/// decimal-string wire form snarkjs uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PublicSignals(Vec<String>);

impl PublicSignals {
    pub fn new(signals: Vec<String>) -> Self {
        PublicSignals(signals)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for PublicSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

/// An opaque verification key loaded from disk, constant for the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VerificationKey(serde_json::Value);

impl VerificationKey {
    pub fn new(value: serde_json::Value) -> Self {
        VerificationKey(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Output from a successful proof request.
#[derive(Debug, Clone)]
pub struct ProveOutput {
    pub proof: Proof,
    pub public_signals: PublicSignals,
}

/// Recoverable proof-request failure, consumed locally by the workflow
/// controller. Distinct from [`crate::WorkflowError`]: nothing here aborts
/// the process.
#[derive(Debug, Error)]
pub enum ProveError {
    #[error("witness does not satisfy the circuit")]
    UnsatisfiedWitness,
    #[error("proving artifacts unavailable: {0}")]
    Artifacts(String),
    #[error("proving engine failure: {0}")]
    Engine(String),
}

/// Produces a proof and public signals for a witness, or reports that the
/// witness does not satisfy the circuit.
///
/// A satisfying witness must always yield a valid proof; an unsatisfying
/// witness must always yield an error.
pub trait ProvingEngine {
    /// Engine name (e.g. "snarkjs", "mock").
    fn name(&self) -> &str;

    /// Engine version, if detectable.
    fn version(&self) -> Option<String>;

    /// Generate a proof for the witness using the compiled circuit and
    /// proving key artifacts.
    fn full_prove(
        &self,
        witness: &Witness,
        circuit_wasm: &Path,
        proving_key: &Path,
    ) -> Result<ProveOutput, ProveError>;
}

/// Checks a proof against public signals and a verification key.
///
/// Must be a pure function of its three inputs with no side effects; only
/// an engine-level fault (e.g. the verifier cannot be invoked at all) is an
/// error, and that one is fatal.
pub trait VerificationEngine {
    fn verify(
        &self,
        vkey: &VerificationKey,
        public_signals: &PublicSignals,
        proof: &Proof,
    ) -> WorkflowResult<bool>;
}
