//! Existential member-access checking.
//!
//! Given a value typed as a protocol composition (`P & Q`, optionally
//! class-bounded), decide per member whether its signature can be expressed
//! using only what the existential guarantees, and rewrite it if so.
//!
//! The decision procedure is purely functional over the immutable
//! declarations in a [`vela_types::TypeEnv`]: independent checks share no
//! state and can run in parallel without coordination.
//!
//! - `constraint`: flattens an existential's protocol closure into a
//!   constraint graph keyed by canonical associated-type identity.
//! - `variance`: classifies every `Self`/associated-type occurrence in a
//!   member signature by the variance of its position.
//! - `resolve`: expands fixed bindings to a fixed point, with cycle
//!   detection.
//! - `access`: combines the above into an accept/reject decision with a
//!   rewritten signature.
//! - `diagnostics`: maps decisions to stable-coded diagnostics for the
//!   external renderer.

mod access;
mod constraint;
mod diagnostics;
mod resolve;
mod variance;

pub use access::{check_access, lookup_member, AcceptedAccess, AccessDecision, RejectedAccess};
pub use constraint::{Binding, ConstraintError, ConstraintGraph};
pub use diagnostics::{
    access_diagnostics, constraint_diagnostic, EXISTENTIAL_CONFLICT, EXISTENTIAL_MEMBER,
};
pub use resolve::resolve_bindings;
pub use variance::{
    analyze_signature, analyze_signature_at, ErasedEntity, Occurrence, PathStep,
    SignatureVariance, Variance,
};
