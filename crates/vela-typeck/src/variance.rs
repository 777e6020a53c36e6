use serde::{Deserialize, Serialize};

use vela_core::Name;
use vela_types::Type;

/// Variance of a syntactic position with respect to substitutability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variance {
    Covariant,
    Contravariant,
    Invariant,
}

impl Variance {
    /// Composition when stepping into a function parameter position.
    /// Invariance is absorbing.
    #[must_use]
    pub fn flipped(self) -> Variance {
        match self {
            Variance::Covariant => Variance::Contravariant,
            Variance::Contravariant => Variance::Covariant,
            Variance::Invariant => Variance::Invariant,
        }
    }
}

/// What an unresolved occurrence refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErasedEntity {
    SelfRef,
    Assoc(Name),
}

/// One step of the path from the signature root to an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathStep {
    Param(usize),
    Result,
    TypeArg(usize),
    TupleElem(usize),
}

/// A `Self` or associated-type reference found in a member signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub path: Vec<PathStep>,
    pub entity: ErasedEntity,
    pub variance: Variance,
}

/// All `Self`/associated-type occurrences of one signature, in walk order
/// (parameters left to right, then the result).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureVariance {
    pub occurrences: Vec<Occurrence>,
}

impl SignatureVariance {
    /// True when every occurrence sits in a purely covariant position.
    #[must_use]
    pub fn covariant_only(&self) -> bool {
        self.occurrences
            .iter()
            .all(|occ| occ.variance == Variance::Covariant)
    }
}

/// Classify every `Self`/associated-type occurrence in a member signature.
///
/// Function results preserve the surrounding variance, parameters flip it
/// (so a parameter of a parameter is covariant again), `inout` parameters
/// and generic nominal arguments are invariant.
#[must_use]
pub fn analyze_signature(signature: &Type) -> SignatureVariance {
    analyze_signature_at(signature, Variance::Covariant)
}

/// Like [`analyze_signature`], with an explicit root position. A settable
/// property is walked invariant: its value flows both ways.
#[must_use]
pub fn analyze_signature_at(signature: &Type, root: Variance) -> SignatureVariance {
    let mut occurrences = Vec::new();
    walk(signature, root, &mut Vec::new(), &mut occurrences);
    SignatureVariance { occurrences }
}

fn walk(ty: &Type, variance: Variance, path: &mut Vec<PathStep>, out: &mut Vec<Occurrence>) {
    match ty {
        Type::SelfRef => out.push(Occurrence {
            path: path.clone(),
            entity: ErasedEntity::SelfRef,
            variance,
        }),
        Type::Assoc(assoc) => out.push(Occurrence {
            path: path.clone(),
            entity: ErasedEntity::Assoc(assoc.name.clone()),
            variance,
        }),
        Type::Function(function) => {
            for (index, param) in function.params.iter().enumerate() {
                let param_variance = if param.inout {
                    Variance::Invariant
                } else {
                    variance.flipped()
                };
                path.push(PathStep::Param(index));
                walk(&param.ty, param_variance, path, out);
                path.pop();
            }
            path.push(PathStep::Result);
            walk(&function.result, variance, path, out);
            path.pop();
        }
        Type::Nominal(nominal) => {
            for (index, arg) in nominal.args.iter().enumerate() {
                path.push(PathStep::TypeArg(index));
                walk(arg, Variance::Invariant, path, out);
                path.pop();
            }
        }
        Type::Tuple(elems) => {
            for (index, elem) in elems.iter().enumerate() {
                path.push(PathStep::TupleElem(index));
                walk(elem, variance, path, out);
                path.pop();
            }
        }
        Type::Existential(_) | Type::Unknown => {}
    }
}
