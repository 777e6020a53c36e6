use vela_types::{format_type, Diagnostic, Type, TypeEnv};

use crate::access::AccessDecision;
use crate::constraint::ConstraintError;

/// Stable diagnostic code for members rejected on an existential base.
pub const EXISTENTIAL_MEMBER: &str = "existential-member";
/// Stable diagnostic code for ill-formed existential compositions.
pub const EXISTENTIAL_CONFLICT: &str = "existential-conflict";

/// Produce diagnostics for a member-access decision.
///
/// Accepted accesses produce none. Rejections are reported but not fatal:
/// the caller keeps checking with the decision's recovery information, so
/// one bad access does not cascade.
#[must_use]
pub fn access_diagnostics(env: &dyn TypeEnv, decision: &AccessDecision) -> Vec<Diagnostic> {
    match decision {
        AccessDecision::Accepted(_) => Vec::new(),
        AccessDecision::Rejected(rejected) => {
            let base = format_type(env, &Type::Existential(rejected.existential.clone()));
            vec![Diagnostic::error(
                EXISTENTIAL_MEMBER,
                format!(
                    "member '{}' cannot be used on value of protocol type '{}'; \
                     use a generic constraint instead",
                    rejected.member, base
                ),
                None,
            )]
        }
    }
}

/// The diagnostic for an ill-formed existential composition.
#[must_use]
pub fn constraint_diagnostic(err: &ConstraintError) -> Diagnostic {
    Diagnostic::error(EXISTENTIAL_CONFLICT, err.to_string(), None)
}
