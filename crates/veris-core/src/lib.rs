// crates/veris-core/src/lib.rs
//
// veris-core: Core types, proof generation, and lifecycle tracking for the
// Veris trust network.
//
// This is the leaf crate the rest of the workspace depends on. It defines
// identities, proof-sealed claims, the claim factory, the lifecycle state
// machine, the error type, and the persistence/archival trait contracts.

pub mod cancel;
pub mod claim;
pub mod error;
pub mod factory;
pub mod identity;
pub mod lifecycle;
pub mod proof;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use veris_core::Claim;`

pub use cancel::CancelToken;
pub use claim::{Claim, ClaimContent, Proof};
pub use error::VerisError;
pub use factory::ClaimFactory;
pub use identity::{Identity, NodePayload};
pub use lifecycle::{can_transition, LifecycleEvent, LifecycleState, LifecycleTracker};
pub use proof::{verify_proof, ProofGenerator, PROOF_ALGORITHM};
pub use traits::{ArchiveSink, ClaimStore};
