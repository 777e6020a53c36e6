use crate::store::TypeEnv;
use crate::ty::{Param, Type};

/// Render `ty` for diagnostics.
///
/// Unresolved references render the way the surface language spells them:
/// `Self`, `P.A`, `P & Q`. Missing declarations never panic; they render as
/// `<unknown>`.
#[must_use]
pub fn format_type(env: &dyn TypeEnv, ty: &Type) -> String {
    match ty {
        Type::Nominal(nominal) => {
            let name = env
                .nominal(nominal.def)
                .map(|def| def.name.to_string())
                .unwrap_or_else(|| "<unknown>".to_owned());
            if nominal.args.is_empty() {
                name
            } else {
                let args: Vec<String> = nominal
                    .args
                    .iter()
                    .map(|arg| format_type(env, arg))
                    .collect();
                format!("{}<{}>", name, args.join(", "))
            }
        }
        Type::SelfRef => "Self".to_owned(),
        Type::Assoc(assoc) => {
            let protocol = env
                .protocol(assoc.protocol)
                .map(|def| def.name.to_string())
                .unwrap_or_else(|| "<unknown>".to_owned());
            format!("{}.{}", protocol, assoc.name)
        }
        Type::Function(function) => {
            let params: Vec<String> = function
                .params
                .iter()
                .map(|param| format_param(env, param))
                .collect();
            format!(
                "({}) -> {}",
                params.join(", "),
                format_type(env, &function.result)
            )
        }
        Type::Tuple(elems) => {
            let elems: Vec<String> = elems.iter().map(|e| format_type(env, e)).collect();
            format!("({})", elems.join(", "))
        }
        Type::Existential(existential) => {
            let mut parts: Vec<String> = existential
                .protocols()
                .iter()
                .map(|&id| {
                    env.protocol(id)
                        .map(|def| def.name.to_string())
                        .unwrap_or_else(|| "<unknown>".to_owned())
                })
                .collect();
            if let Some(class) = existential.class_bound() {
                parts.push(
                    env.nominal(class)
                        .map(|def| def.name.to_string())
                        .unwrap_or_else(|| "<unknown>".to_owned()),
                );
            }
            parts.join(" & ")
        }
        Type::Unknown => "_".to_owned(),
    }
}

fn format_param(env: &dyn TypeEnv, param: &Param) -> String {
    if param.inout {
        format!("inout {}", format_type(env, &param.ty))
    } else {
        format_type(env, &param.ty)
    }
}
