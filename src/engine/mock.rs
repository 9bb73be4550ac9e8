//! Mock engine for tests and dry runs.

use std::path::Path;

use serde_json::json;

use crate::sha256_hex;
use crate::witness::{SignalValue, Witness};
use crate::{WorkflowError, WorkflowResult};

use super::traits::{
    Proof, ProveError, ProveOutput, ProvingEngine, PublicSignals, VerificationEngine,
    VerificationKey,
};

/// Configuration for mock engine responses.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Name to report
    pub name: String,
    /// Version to report
    pub version: Option<String>,
    /// Whether full_prove should fail regardless of the witness
    pub prove_fails: bool,
    /// Force the verify result instead of checking the proof
    pub verify_result: Option<bool>,
}

impl MockConfig {
    /// Create a new mock config with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        MockConfig {
            name: name.into(),
            version: Some("mock-1.0.0".to_string()),
            prove_fails: false,
            verify_result: None,
        }
    }

    /// Make full_prove fail.
    pub fn prove_fails(mut self) -> Self {
        self.prove_fails = true;
        self
    }

    /// Force the verify result.
    pub fn with_verify_result(mut self, result: bool) -> Self {
        self.verify_result = Some(result);
        self
    }

    /// Set the reported version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// Deterministic in-process model of the multiplication circuit.
///
/// No real cryptography: the proof's curve-point strings are derived from a
/// digest over the public signals, so the proof commits to the signals and
/// tampering with either side flips verification to false. Proving enforces
/// the circuit relation `c = a * b` and rejects non-numeric witness values,
/// which keeps the engine the single source of truth for witness validity.
pub struct MockEngine {
    config: MockConfig,
}

impl MockEngine {
    /// Create a new mock engine with the given configuration.
    pub fn new(config: MockConfig) -> Self {
        MockEngine { config }
    }

    /// Create a mock engine with default configuration.
    pub fn default_mock() -> Self {
        Self::new(MockConfig::new("mock"))
    }

    /// The proof the default mock would emit for the given signals.
    fn derive_proof(signals: &PublicSignals) -> serde_json::Value {
        let commitment = sha256_hex(signals.to_string().as_bytes());
        let coord = |tag: &str| sha256_hex(format!("{commitment}:{tag}").as_bytes());
        json!({
            "protocol": "groth16",
            "curve": "bn128",
            "pi_a": [coord("a0"), coord("a1"), "1"],
            "pi_b": [
                [coord("b00"), coord("b01")],
                [coord("b10"), coord("b11")],
                ["1", "0"],
            ],
            "pi_c": [coord("c0"), coord("c1"), "1"],
        })
    }
}

impl ProvingEngine for MockEngine {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn version(&self) -> Option<String> {
        self.config.version.clone()
    }

    fn full_prove(
        &self,
        witness: &Witness,
        _circuit_wasm: &Path,
        _proving_key: &Path,
    ) -> Result<ProveOutput, ProveError> {
        if self.config.prove_fails {
            return Err(ProveError::Engine("mock prove failed".into()));
        }

        let numeric = |name: &str| match witness.get(name) {
            Some(SignalValue::Num(n)) => Ok(n),
            _ => Err(ProveError::UnsatisfiedWitness),
        };
        let a = numeric("a")?;
        let b = numeric("b")?;

        let c = a as i128 * b as i128;
        let public_signals = PublicSignals::new(vec![c.to_string()]);
        let proof = Proof::new(Self::derive_proof(&public_signals));

        Ok(ProveOutput {
            proof,
            public_signals,
        })
    }
}

impl VerificationEngine for MockEngine {
    fn verify(
        &self,
        vkey: &VerificationKey,
        public_signals: &PublicSignals,
        proof: &Proof,
    ) -> WorkflowResult<bool> {
        if let Some(forced) = self.config.verify_result {
            return Ok(forced);
        }
        if !vkey.as_value().is_object() {
            return Err(WorkflowError::Message(
                "mock verify requires a JSON-object verification key".into(),
            ));
        }
        Ok(Self::derive_proof(public_signals) == *proof.as_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn witness(a: SignalValue, b: SignalValue) -> Witness {
        let mut w = Witness::new();
        w.push("a", a);
        w.push("b", b);
        w
    }

    fn prove(engine: &MockEngine, w: &Witness) -> Result<ProveOutput, ProveError> {
        engine.full_prove(w, Path::new("circuit.wasm"), Path::new("circuit.zkey"))
    }

    fn test_vkey() -> VerificationKey {
        VerificationKey::new(json!({"protocol": "groth16", "curve": "bn128"}))
    }

    #[test]
    fn test_prove_multiplies_signals() {
        let engine = MockEngine::default_mock();
        let w = witness(SignalValue::Num(3), SignalValue::Num(4));
        let out = prove(&engine, &w).unwrap();
        assert_eq!(out.public_signals.as_slice(), ["12"]);
    }

    #[test]
    fn test_prove_rejects_sentinel() {
        let engine = MockEngine::default_mock();
        let w = witness(SignalValue::NotANumber, SignalValue::Num(4));
        assert!(matches!(
            prove(&engine, &w),
            Err(ProveError::UnsatisfiedWitness)
        ));
    }

    #[test]
    fn test_prove_rejects_missing_signal() {
        let engine = MockEngine::default_mock();
        let mut w = Witness::new();
        w.push("a", SignalValue::Num(3));
        assert!(matches!(
            prove(&engine, &w),
            Err(ProveError::UnsatisfiedWitness)
        ));
    }

    #[test]
    fn test_prove_fails_flag() {
        let engine = MockEngine::new(MockConfig::new("mock").prove_fails());
        let w = witness(SignalValue::Num(3), SignalValue::Num(4));
        assert!(prove(&engine, &w).is_err());
    }

    #[test]
    fn test_prove_then_verify_roundtrip() {
        let engine = MockEngine::default_mock();
        let w = witness(SignalValue::Num(3), SignalValue::Num(4));
        let out = prove(&engine, &w).unwrap();
        let ok = engine
            .verify(&test_vkey(), &out.public_signals, &out.proof)
            .unwrap();
        assert!(ok);
    }

    #[test]
    fn test_verify_is_pure() {
        let engine = MockEngine::default_mock();
        let w = witness(SignalValue::Num(6), SignalValue::Num(7));
        let out = prove(&engine, &w).unwrap();
        let vkey = test_vkey();
        let first = engine.verify(&vkey, &out.public_signals, &out.proof).unwrap();
        let second = engine.verify(&vkey, &out.public_signals, &out.proof).unwrap();
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn test_tampered_signal_fails_verify() {
        let engine = MockEngine::default_mock();
        let w = witness(SignalValue::Num(3), SignalValue::Num(4));
        let out = prove(&engine, &w).unwrap();
        let tampered = PublicSignals::new(vec!["13".into()]);
        let ok = engine.verify(&test_vkey(), &tampered, &out.proof).unwrap();
        assert!(!ok);
    }

    #[test]
    fn test_tampered_proof_fails_verify() {
        let engine = MockEngine::default_mock();
        let w = witness(SignalValue::Num(3), SignalValue::Num(4));
        let out = prove(&engine, &w).unwrap();

        let mut value = out.proof.as_value().clone();
        value["pi_a"][0] = json!("0");
        let tampered = Proof::new(value);

        let ok = engine
            .verify(&test_vkey(), &out.public_signals, &tampered)
            .unwrap();
        assert!(!ok);
    }

    #[test]
    fn test_forced_verify_result() {
        let engine = MockEngine::new(MockConfig::new("mock").with_verify_result(false));
        let w = witness(SignalValue::Num(3), SignalValue::Num(4));
        let out = prove(&MockEngine::default_mock(), &w).unwrap();
        let ok = engine
            .verify(&test_vkey(), &out.public_signals, &out.proof)
            .unwrap();
        assert!(!ok);
    }

    #[test]
    fn test_negative_inputs_multiply() {
        let engine = MockEngine::default_mock();
        let w = witness(SignalValue::Num(-3), SignalValue::Num(4));
        let out = prove(&engine, &w).unwrap();
        assert_eq!(out.public_signals.as_slice(), ["-12"]);
    }
}
