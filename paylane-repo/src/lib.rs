//! # Payment Repository
//!
//! Concrete repository adapters implementing the `PaymentRepository` port.
//! The in-memory adapter backs tests and the sandbox runtime; a database
//! adapter slots in beside it without touching the engine.

pub mod memory;

pub use memory::MemoryRepo;
