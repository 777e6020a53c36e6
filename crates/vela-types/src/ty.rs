use serde::{Deserialize, Serialize};

use vela_core::{Name, NominalId, ProtocolId};

/// A structural type.
///
/// Trees are immutable once constructed; equality is value-based. Unresolved
/// `SelfRef`/`Assoc` leaves are valid everywhere: they mean the reference was
/// not (or cannot be) erased at the current use site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// A nominal type application: `Bool`, `Struct<Bool>`.
    Nominal(NominalType),
    /// `Self` inside a protocol member signature.
    SelfRef,
    /// An associated type, rooted at the protocol that declares it: `P.A`.
    Assoc(AssocRef),
    Function(FunctionType),
    /// Unit is the empty tuple.
    Tuple(Vec<Type>),
    /// A protocol composition used as a value type: `P & Q`, `P & SomeClass`.
    Existential(ExistentialType),
    /// Error-recovery placeholder; keeps downstream checks from cascading.
    Unknown,
}

impl Type {
    #[must_use]
    pub fn nominal(def: NominalId, args: Vec<Type>) -> Type {
        Type::Nominal(NominalType { def, args })
    }

    #[must_use]
    pub fn assoc(protocol: ProtocolId, name: impl Into<Name>) -> Type {
        Type::Assoc(AssocRef {
            protocol,
            name: name.into(),
        })
    }

    #[must_use]
    pub fn function(params: Vec<Param>, result: Type) -> Type {
        Type::Function(FunctionType {
            params,
            result: Box::new(result),
        })
    }

    #[must_use]
    pub fn unit() -> Type {
        Type::Tuple(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NominalType {
    pub def: NominalId,
    pub args: Vec<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssocRef {
    pub protocol: ProtocolId,
    pub name: Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionType {
    pub params: Vec<Param>,
    pub result: Box<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    pub ty: Type,
    pub inout: bool,
}

impl Param {
    #[must_use]
    pub fn new(ty: Type) -> Param {
        Param { ty, inout: false }
    }

    #[must_use]
    pub fn inout(ty: Type) -> Param {
        Param { ty, inout: true }
    }
}

/// "Some value whose concrete type conforms to all listed protocols (and
/// subclasses the bound, if present)."
///
/// The protocol list is sorted and deduplicated at construction so that
/// `P & Q` and `Q & P` are structurally identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExistentialType {
    protocols: Vec<ProtocolId>,
    class_bound: Option<NominalId>,
}

impl ExistentialType {
    #[must_use]
    pub fn new(
        protocols: impl IntoIterator<Item = ProtocolId>,
        class_bound: Option<NominalId>,
    ) -> ExistentialType {
        let mut protocols: Vec<ProtocolId> = protocols.into_iter().collect();
        protocols.sort();
        protocols.dedup();
        ExistentialType {
            protocols,
            class_bound,
        }
    }

    #[must_use]
    pub fn protocols(&self) -> &[ProtocolId] {
        &self.protocols
    }

    #[must_use]
    pub fn class_bound(&self) -> Option<NominalId> {
        self.class_bound
    }
}
