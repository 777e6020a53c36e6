use serde::{Deserialize, Serialize};

use vela_core::{Name, ProtocolId};
use vela_types::{
    substitute, ExistentialType, MemberDef, MemberKind, Substitution, Type, TypeEnv,
};

use crate::constraint::{protocol_closure, ConstraintError, ConstraintGraph};
use crate::resolve::resolve_bindings;
use crate::variance::{analyze_signature_at, ErasedEntity, PathStep, Variance};

/// Outcome of checking one member access against an existential base type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessDecision {
    Accepted(AcceptedAccess),
    Rejected(RejectedAccess),
}

impl AccessDecision {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, AccessDecision::Accepted(_))
    }
}

/// The member is usable; `signature` is its interface type as seen through
/// the existential, ready for the surrounding expression check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedAccess {
    pub signature: Type,
}

/// The member depends on erased type information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedAccess {
    pub member: Name,
    pub protocol: ProtocolId,
    pub existential: ExistentialType,
    /// First unresolvable occurrence, in signature walk order.
    pub entity: ErasedEntity,
    pub variance: Variance,
    /// Best-effort substituted signature with opaque references left in
    /// place. The call checker shows this as the expected type when the
    /// rejected member is nonetheless given arguments.
    pub expected: Type,
}

impl RejectedAccess {
    /// Recovery signature for the surrounding expression check: opaque
    /// references collapse to [`Type::Unknown`] so one rejected access does
    /// not cascade into unrelated diagnostics.
    #[must_use]
    pub fn recovery_signature(&self) -> Type {
        erase_opaque(&self.expected)
    }
}

fn erase_opaque(ty: &Type) -> Type {
    match ty {
        Type::SelfRef | Type::Assoc(_) => Type::Unknown,
        Type::Nominal(nominal) => Type::Nominal(vela_types::NominalType {
            def: nominal.def,
            args: nominal.args.iter().map(erase_opaque).collect(),
        }),
        Type::Function(function) => Type::Function(vela_types::FunctionType {
            params: function
                .params
                .iter()
                .map(|param| vela_types::Param {
                    ty: erase_opaque(&param.ty),
                    inout: param.inout,
                })
                .collect(),
            result: Box::new(erase_opaque(&function.result)),
        }),
        Type::Tuple(elems) => Type::Tuple(elems.iter().map(erase_opaque).collect()),
        Type::Existential(_) | Type::Unknown => ty.clone(),
    }
}

/// Decide whether `member` (declared by `protocol`) can be used on a value
/// of the given existential type.
///
/// The decision depends only on the static existential type, never on how
/// the value reached the use site. Covariant `Self` is always usable and
/// rewrites to the existential itself; everything else must be fixed by the
/// constraint graph. An `Err` means the existential itself is ill-formed.
pub fn check_access(
    env: &dyn TypeEnv,
    existential: &ExistentialType,
    protocol: ProtocolId,
    member: &MemberDef,
) -> Result<AccessDecision, ConstraintError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("query", name = "check_access", member = %member.name).entered();

    let graph = ConstraintGraph::build(env, existential)?;
    let bindings = resolve_bindings(&graph)?;

    let (signature, root) = implicit_signature(member);
    let substituted = substitute(&signature, &bindings);

    let mut variance = analyze_signature_at(&substituted, root);
    // A settable subscript's element flows both ways.
    if let MemberKind::Subscript { settable: true, .. } = member.kind {
        for occ in &mut variance.occurrences {
            if occ.path.first() == Some(&PathStep::Result) {
                occ.variance = Variance::Invariant;
            }
        }
    }

    for occ in &variance.occurrences {
        // Covariant `Self` is the one opaque reference that is always
        // representable: the caller only ever needs "a value of this same
        // existential type", never the concrete identity. A plain
        // associated type is payload, not identity, and stays rejected
        // even when covariant.
        if occ.entity == ErasedEntity::SelfRef && occ.variance == Variance::Covariant {
            continue;
        }
        return Ok(AccessDecision::Rejected(RejectedAccess {
            member: member.name.clone(),
            protocol,
            existential: existential.clone(),
            entity: occ.entity.clone(),
            variance: occ.variance,
            expected: expected_signature(&graph, &substituted),
        }));
    }

    // Every remaining occurrence is a covariant `Self`.
    let rewritten = substitute(
        &substituted,
        &Substitution::for_self(Type::Existential(existential.clone())),
    );
    Ok(AccessDecision::Accepted(AcceptedAccess {
        signature: rewritten,
    }))
}

/// A member's signature as used at an access site: methods and subscripts
/// as function types, properties as their value type.
fn implicit_signature(member: &MemberDef) -> (Type, Variance) {
    match &member.kind {
        MemberKind::Method { params, result }
        | MemberKind::Subscript { params, result, .. } => (
            Type::function(params.clone(), result.clone()),
            Variance::Covariant,
        ),
        MemberKind::Property { ty, settable } => (
            ty.clone(),
            if *settable {
                Variance::Invariant
            } else {
                Variance::Covariant
            },
        ),
    }
}

/// The expected-type payload for a rejection: `Self` renders as the class
/// bound when one exists, opaque associated types stay spelled `P.A`.
fn expected_signature(graph: &ConstraintGraph, substituted: &Type) -> Type {
    match graph.class_bound() {
        Some(class) => substitute(
            substituted,
            &Substitution::for_self(Type::nominal(class, vec![])),
        ),
        None => substituted.clone(),
    }
}

/// Find `name` among the members of every protocol the existential reaches,
/// in deterministic (declaration id) order.
///
/// Disambiguating same-named members across composed protocols is the
/// resolver's job upstream; this helper exists for callers that already
/// know the name is unique, and for tests.
#[must_use]
pub fn lookup_member<'env>(
    env: &'env dyn TypeEnv,
    existential: &ExistentialType,
    name: &str,
) -> Option<(ProtocolId, &'env MemberDef)> {
    for id in protocol_closure(env, existential) {
        let Some(protocol) = env.protocol(id) else {
            continue;
        };
        if let Some(member) = protocol.members.iter().find(|m| m.name.as_str() == name) {
            return Some((id, member));
        }
    }
    None
}
