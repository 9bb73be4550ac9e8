//! Engine abstraction for the external proving and verification
//! collaborators.
//!
//! The workflow controller only depends on the two traits here; the snarkjs
//! engine is the production implementation and the mock engine serves tests
//! and dry runs.

pub mod mock;
pub mod snarkjs;
pub mod traits;

// Re-export key types
pub use mock::{MockConfig, MockEngine};
pub use snarkjs::{SnarkjsConfig, SnarkjsEngine};
pub use traits::{
    Proof, ProveError, ProveOutput, ProvingEngine, PublicSignals, VerificationEngine,
    VerificationKey,
};
