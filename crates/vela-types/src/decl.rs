use serde::{Deserialize, Serialize};

use vela_core::{Name, NominalId, ProtocolId};

use crate::ty::{Param, Type};

/// A protocol declaration, fully linked by the loader: inherited protocols
/// are referenced by id, not by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolDef {
    pub name: Name,
    pub assoc_types: Vec<AssocTypeDef>,
    pub members: Vec<MemberDef>,
    pub inherits: Vec<ProtocolId>,
    /// Class bound (`protocol P: SomeClass`). Does not fix associated types;
    /// it only bounds `Self`.
    pub superclass: Option<NominalId>,
    pub where_clauses: Vec<WhereClause>,
}

/// An associated-type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssocTypeDef {
    pub name: Name,
    /// Conformance bounds (`associatedtype A: Sequence`). Stored for
    /// well-formedness checking; they never fix a binding.
    pub bounds: Vec<ProtocolId>,
}

impl AssocTypeDef {
    #[must_use]
    pub fn new(name: impl Into<Name>) -> AssocTypeDef {
        AssocTypeDef {
            name: name.into(),
            bounds: Vec::new(),
        }
    }
}

/// A same-type requirement: `where name == ty`.
///
/// `name` resolves against the canonical associated-type identities visible
/// to the declaring protocol (its own and every inherited declaration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhereClause {
    pub name: Name,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDef {
    pub name: Name,
    pub kind: MemberKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKind {
    Method {
        params: Vec<Param>,
        result: Type,
    },
    Property {
        ty: Type,
        settable: bool,
    },
    Subscript {
        params: Vec<Param>,
        result: Type,
        settable: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NominalKind {
    Struct,
    Class,
    Enum,
}

/// A nominal type declaration (struct, class, enum).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominalDef {
    pub name: Name,
    pub kind: NominalKind,
    /// Number of generic parameters; `Type::Nominal` applications carry the
    /// matching argument list.
    pub type_params: usize,
    pub superclass: Option<NominalId>,
    pub conformances: Vec<Conformance>,
}

/// A conformance supplied by a nominal type, with the concrete witness it
/// provides for each associated type of the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conformance {
    pub protocol: ProtocolId,
    pub assoc_bindings: Vec<(Name, Type)>,
}
