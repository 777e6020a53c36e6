use std::collections::{BTreeMap, BTreeSet, VecDeque};

use thiserror::Error;

use vela_core::{Name, NominalId, ProtocolId};
use vela_types::{format_type, ExistentialType, Type, TypeEnv};

use crate::resolve::expand_fixed;

/// An ill-formed existential composition.
///
/// Both cases reject the existential itself, independently of any particular
/// member access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// Two reachable requirements fix the same associated-type identity to
    /// structurally different types.
    #[error("conflicting requirements for associated type '{name}': '{first}' vs '{second}'")]
    Conflict {
        name: Name,
        first: String,
        second: String,
    },
    /// An associated type's fixed binding reaches itself through expansion.
    #[error("associated type '{name}' is constrained through itself")]
    Cycle { name: Name },
}

/// Resolved view of one associated-type identity within an existential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Every conforming type is forced to the same type.
    Fixed(Type),
    /// Nothing in the existential pins the associated type down.
    Unbound,
}

/// Equality and conformance information collected from every protocol an
/// existential reaches, keyed by canonical associated-type identity.
///
/// Associated types unify by name across the closure: inheritance shares the
/// base declaration, and composition merges same-named declarations from
/// otherwise unrelated protocols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintGraph {
    bindings: BTreeMap<Name, Binding>,
    protocols: BTreeSet<ProtocolId>,
    class_bound: Option<NominalId>,
}

impl ConstraintGraph {
    /// Flatten the existential's transitive protocol closure into one graph.
    ///
    /// Every `where name == T` clause reachable through inheritance or
    /// composition fixes `name`; a class bound additionally forces the
    /// concrete witnesses its conformances supply. Iteration is over sorted
    /// id sets throughout, so `P & Q` and `Q & P` build identical graphs.
    pub fn build(
        env: &dyn TypeEnv,
        existential: &ExistentialType,
    ) -> Result<ConstraintGraph, ConstraintError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("query", name = "constraint_graph").entered();

        let protocols = protocol_closure(env, existential);

        // The use-site class bound wins over a protocol-declared one; either
        // way only `Self` is bounded, associated types are not.
        let mut class_bound = existential.class_bound();
        if class_bound.is_none() {
            for &id in &protocols {
                let Some(protocol) = env.protocol(id) else {
                    continue;
                };
                if let Some(superclass) = protocol.superclass {
                    class_bound = Some(superclass);
                    break;
                }
            }
        }

        let mut bindings: BTreeMap<Name, Binding> = BTreeMap::new();
        let mut candidates: BTreeMap<Name, Vec<Type>> = BTreeMap::new();
        for &id in &protocols {
            let Some(protocol) = env.protocol(id) else {
                continue;
            };
            for assoc in &protocol.assoc_types {
                bindings.entry(assoc.name.clone()).or_insert(Binding::Unbound);
            }
            for clause in &protocol.where_clauses {
                bindings.entry(clause.name.clone()).or_insert(Binding::Unbound);
                candidates
                    .entry(clause.name.clone())
                    .or_default()
                    .push(clause.ty.clone());
            }
        }

        // Witnesses forced by the class bound, walking its superclass chain.
        let mut class = class_bound;
        let mut seen_classes: BTreeSet<NominalId> = BTreeSet::new();
        while let Some(id) = class {
            if !seen_classes.insert(id) {
                break;
            }
            let Some(def) = env.nominal(id) else {
                break;
            };
            for conformance in &def.conformances {
                if !protocols.contains(&conformance.protocol) {
                    continue;
                }
                for (name, ty) in &conformance.assoc_bindings {
                    bindings.entry(name.clone()).or_insert(Binding::Unbound);
                    candidates
                        .entry(name.clone())
                        .or_default()
                        .push(ty.clone());
                }
            }
            class = def.superclass;
        }

        for (name, list) in &candidates {
            bindings.insert(name.clone(), Binding::Fixed(list[0].clone()));
        }

        let graph = ConstraintGraph {
            bindings,
            protocols,
            class_bound,
        };

        // Conflicts are judged after each candidate expands to its own fixed
        // point, so reaching the same type through different paths is fine.
        for (name, list) in &candidates {
            if list.len() < 2 {
                continue;
            }
            let first = expand_fixed(&graph, name, &list[0])?;
            for other in &list[1..] {
                let other = expand_fixed(&graph, name, other)?;
                if other != first {
                    return Err(ConstraintError::Conflict {
                        name: name.clone(),
                        first: format_type(env, &first),
                        second: format_type(env, &other),
                    });
                }
            }
        }

        Ok(graph)
    }

    #[must_use]
    pub fn binding(&self, name: &Name) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// All canonical identities and their bindings, in name order.
    pub fn bindings(&self) -> impl Iterator<Item = (&Name, &Binding)> {
        self.bindings.iter()
    }

    /// The transitive protocol closure, in id order.
    pub fn protocols(&self) -> impl Iterator<Item = ProtocolId> + '_ {
        self.protocols.iter().copied()
    }

    #[must_use]
    pub fn contains_protocol(&self, id: ProtocolId) -> bool {
        self.protocols.contains(&id)
    }

    /// The most specific known class bound on `Self`, if any.
    #[must_use]
    pub fn class_bound(&self) -> Option<NominalId> {
        self.class_bound
    }
}

/// Transitive protocol closure of an existential: the listed protocols,
/// everything they inherit, and every conformance the class bound (and its
/// superclass chain) brings in.
pub(crate) fn protocol_closure(
    env: &dyn TypeEnv,
    existential: &ExistentialType,
) -> BTreeSet<ProtocolId> {
    let mut queue: VecDeque<ProtocolId> = existential.protocols().iter().copied().collect();

    let mut class = existential.class_bound();
    let mut seen_classes: BTreeSet<NominalId> = BTreeSet::new();
    while let Some(id) = class {
        if !seen_classes.insert(id) {
            break;
        }
        let Some(def) = env.nominal(id) else {
            break;
        };
        for conformance in &def.conformances {
            queue.push_back(conformance.protocol);
        }
        class = def.superclass;
    }

    let mut closure = BTreeSet::new();
    while let Some(id) = queue.pop_front() {
        if !closure.insert(id) {
            continue;
        }
        let Some(protocol) = env.protocol(id) else {
            continue;
        };
        for &parent in &protocol.inherits {
            queue.push_back(parent);
        }
    }
    closure
}
