// crates/veris-store/src/lib.rs
//
// veris-store: Claim persistence backends for the Veris trust network.
//
// Implements the `ClaimStore` contract from veris-core: an in-memory store
// for tests and embedding, and an append-only JSON-lines file store the CLI
// uses for durability. The graph treats either one the same way — load on
// startup, persist after accept.

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlClaimStore;
pub use memory::MemoryClaimStore;
