use vela_core::Name;
use vela_types::{FunctionType, NominalType, Param, Substitution, Type};

use crate::constraint::{Binding, ConstraintError, ConstraintGraph};

/// Expand every fixed binding in `graph` to a fixed point.
///
/// A fixed type may reference other associated types (`B == Struct<A>`) or
/// `Self` (`C == Self`); expansion chases the former through the graph and
/// leaves the latter in place for position-aware handling by the caller.
/// Unbound references also stay in place: they are opaque at this use site,
/// not an error. An identity reachable from its own expansion is a genuine
/// cycle and rejects the existential.
pub fn resolve_bindings(graph: &ConstraintGraph) -> Result<Substitution, ConstraintError> {
    let mut subst = Substitution::new();
    for (name, binding) in graph.bindings() {
        let Binding::Fixed(ty) = binding else {
            continue;
        };
        let expanded = expand_fixed(graph, name, ty)?;
        subst.insert_assoc(name.clone(), expanded);
    }
    Ok(subst)
}

/// Expand one fixed binding for `name`, detecting cycles through `name`
/// itself and through any identity visited along the way.
pub(crate) fn expand_fixed(
    graph: &ConstraintGraph,
    name: &Name,
    ty: &Type,
) -> Result<Type, ConstraintError> {
    let mut in_progress = vec![name.clone()];
    expand(graph, ty, &mut in_progress)
}

fn expand(
    graph: &ConstraintGraph,
    ty: &Type,
    in_progress: &mut Vec<Name>,
) -> Result<Type, ConstraintError> {
    match ty {
        Type::Assoc(assoc) => match graph.binding(&assoc.name) {
            Some(Binding::Fixed(fixed)) => {
                if in_progress.contains(&assoc.name) {
                    return Err(ConstraintError::Cycle {
                        name: assoc.name.clone(),
                    });
                }
                in_progress.push(assoc.name.clone());
                let expanded = expand(graph, fixed, in_progress);
                in_progress.pop();
                expanded
            }
            _ => Ok(ty.clone()),
        },
        Type::Nominal(nominal) => {
            let mut args = Vec::with_capacity(nominal.args.len());
            for arg in &nominal.args {
                args.push(expand(graph, arg, in_progress)?);
            }
            Ok(Type::Nominal(NominalType {
                def: nominal.def,
                args,
            }))
        }
        Type::Function(function) => {
            let mut params = Vec::with_capacity(function.params.len());
            for param in &function.params {
                params.push(Param {
                    ty: expand(graph, &param.ty, in_progress)?,
                    inout: param.inout,
                });
            }
            let result = expand(graph, &function.result, in_progress)?;
            Ok(Type::Function(FunctionType {
                params,
                result: Box::new(result),
            }))
        }
        Type::Tuple(elems) => {
            let mut out = Vec::with_capacity(elems.len());
            for elem in elems {
                out.push(expand(graph, elem, in_progress)?);
            }
            Ok(Type::Tuple(out))
        }
        Type::SelfRef | Type::Existential(_) | Type::Unknown => Ok(ty.clone()),
    }
}
