use vela_core::{Name, NominalId, ProtocolId};

use crate::decl::{NominalDef, ProtocolDef};

/// Read-only view of loaded declarations.
///
/// Every check takes an explicit `&dyn TypeEnv`; there is no ambient or
/// global lookup.
pub trait TypeEnv {
    fn protocol(&self, id: ProtocolId) -> Option<&ProtocolDef>;
    fn nominal(&self, id: NominalId) -> Option<&NominalDef>;
}

/// Arena-style store of protocol and nominal declarations.
///
/// Written once by the declaration loader, then read through [`TypeEnv`]
/// during checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeStore {
    protocols: Vec<ProtocolDef>,
    nominals: Vec<NominalDef>,
}

impl TypeStore {
    #[must_use]
    pub fn new() -> TypeStore {
        TypeStore::default()
    }

    pub fn add_protocol(&mut self, def: ProtocolDef) -> ProtocolId {
        let id = ProtocolId::from_raw(self.protocols.len() as u32);
        self.protocols.push(def);
        id
    }

    /// Reserve an id for a protocol whose definition needs to reference
    /// itself (e.g. members mentioning its own associated types).
    pub fn intern_protocol(&mut self, name: impl Into<Name>) -> ProtocolId {
        self.add_protocol(ProtocolDef {
            name: name.into(),
            assoc_types: Vec::new(),
            members: Vec::new(),
            inherits: Vec::new(),
            superclass: None,
            where_clauses: Vec::new(),
        })
    }

    /// Replace the definition reserved by [`TypeStore::intern_protocol`].
    pub fn define_protocol(&mut self, id: ProtocolId, def: ProtocolDef) {
        self.protocols[id.idx()] = def;
    }

    pub fn add_nominal(&mut self, def: NominalDef) -> NominalId {
        let id = NominalId::from_raw(self.nominals.len() as u32);
        self.nominals.push(def);
        id
    }

    #[must_use]
    pub fn protocol_id(&self, name: &str) -> Option<ProtocolId> {
        self.protocols
            .iter()
            .position(|def| def.name.as_str() == name)
            .map(|idx| ProtocolId::from_raw(idx as u32))
    }

    #[must_use]
    pub fn nominal_id(&self, name: &str) -> Option<NominalId> {
        self.nominals
            .iter()
            .position(|def| def.name.as_str() == name)
            .map(|idx| NominalId::from_raw(idx as u32))
    }
}

impl TypeEnv for TypeStore {
    fn protocol(&self, id: ProtocolId) -> Option<&ProtocolDef> {
        self.protocols.get(id.idx())
    }

    fn nominal(&self, id: NominalId) -> Option<&NominalDef> {
        self.nominals.get(id.idx())
    }
}
