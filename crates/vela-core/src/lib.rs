//! Core shared types for Vela.
//!
//! This crate is intentionally small: identifier names and the raw ids used
//! to key the declaration store. Everything else lives in `vela-types`.

use std::fmt;

/// An identifier: a protocol, nominal type, member, or associated type name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Name(String);

impl Name {
    pub fn new(text: impl Into<String>) -> Self {
        Name(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Name(text.to_owned())
    }
}

impl From<String> for Name {
    fn from(text: String) -> Self {
        Name(text)
    }
}

/// Index of a protocol declaration in its owning store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolId(u32);

impl ProtocolId {
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        ProtocolId(raw)
    }

    #[must_use]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProtocolId({})", self.0)
    }
}

/// Index of a nominal type declaration (struct, class, enum) in its owning
/// store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NominalId(u32);

impl NominalId {
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        NominalId(raw)
    }

    #[must_use]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NominalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NominalId({})", self.0)
    }
}
