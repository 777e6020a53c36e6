use std::collections::BTreeMap;

use vela_core::Name;

use crate::ty::{FunctionType, NominalType, Param, Type};

/// Replacements for `Self` and associated types, keyed by canonical
/// (name-unified) associated-type identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    pub assoc: BTreeMap<Name, Type>,
    pub self_ty: Option<Type>,
}

impl Substitution {
    #[must_use]
    pub fn new() -> Substitution {
        Substitution::default()
    }

    /// A substitution that only replaces `Self`.
    #[must_use]
    pub fn for_self(self_ty: Type) -> Substitution {
        Substitution {
            assoc: BTreeMap::new(),
            self_ty: Some(self_ty),
        }
    }

    pub fn insert_assoc(&mut self, name: impl Into<Name>, ty: Type) {
        self.assoc.insert(name.into(), ty);
    }
}

/// Replace `Self` and matching associated-type references throughout `ty`.
///
/// Unmatched references are left in place: unresolved output is valid and
/// means the reference is not erasable at this use site. There is no partial
/// substitution error.
#[must_use]
pub fn substitute(ty: &Type, subst: &Substitution) -> Type {
    match ty {
        Type::SelfRef => subst.self_ty.clone().unwrap_or(Type::SelfRef),
        Type::Assoc(assoc) => match subst.assoc.get(&assoc.name) {
            Some(replacement) => replacement.clone(),
            None => ty.clone(),
        },
        Type::Nominal(nominal) => Type::Nominal(NominalType {
            def: nominal.def,
            args: nominal
                .args
                .iter()
                .map(|arg| substitute(arg, subst))
                .collect(),
        }),
        Type::Function(function) => Type::Function(FunctionType {
            params: function
                .params
                .iter()
                .map(|param| Param {
                    ty: substitute(&param.ty, subst),
                    inout: param.inout,
                })
                .collect(),
            result: Box::new(substitute(&function.result, subst)),
        }),
        Type::Tuple(elems) => Type::Tuple(elems.iter().map(|e| substitute(e, subst)).collect()),
        Type::Existential(_) | Type::Unknown => ty.clone(),
    }
}
