//! Signing engine.
//!
//! Leaf-first:
//! - `clock`: wall-clock seam
//! - `credential`: per-protocol key material
//! - `protocol`: closed set of remote APIs and their wire endpoints
//! - `canonical`: exact signing-base strings
//! - `crypto`: HMAC, MD5 and AES primitives
//! - `assembler`: per-strategy URL/field assembly
//! - `encryption`: optional result masking keyed from the caller's token
//! - `signer`: the orchestrator

pub mod assembler;
pub mod canonical;
pub mod clock;
pub mod credential;
pub mod crypto;
pub mod encryption;
pub mod protocol;
pub mod signer;

pub use assembler::{ResultField, SigningResult};
pub use clock::{Clock, FixedClock, SystemClock};
pub use credential::Credential;
pub use encryption::{EncryptionGate, derive_field_key};
pub use protocol::{Method, Protocol, Strategy};
pub use signer::Signer;
