//! Guard rejections.

use cordon_ir::{NodeKind, Span};
use thiserror::Error;

/// Why a tree was refused. One variant per rule category; the guard reports
/// only the first violation it meets.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum SafetyViolation {
    /// A statement kind that is never allowed (`import`, `global`, `exec`).
    #[error("{kind} not safe")]
    ForbiddenNode { kind: NodeKind, span: Span },

    /// A bare name that is dunder-prefixed or a forbidden builtin.
    #[error("Access to special names not allowed: \"{name}\"")]
    SpecialName { name: String, span: Span },

    /// A call whose target is not a bare name.
    #[error("Function has no identifier")]
    CallWithoutIdentifier { span: Span },

    /// A call to a dunder-prefixed name or a forbidden builtin.
    #[error("Access to special functions not allowed: \"{name}\"")]
    SpecialFunction { name: String, span: Span },

    /// A member access with no member name.
    #[error("Access denied to attribute")]
    AttributeWithoutIdentifier { span: Span },

    /// A member access reaching for runtime internals.
    #[error("Access to special attributes not allowed: \"{name}\"")]
    SpecialAttribute { name: String, span: Span },
}

impl SafetyViolation {
    /// Location of the offending node.
    pub fn span(&self) -> Span {
        match self {
            Self::ForbiddenNode { span, .. }
            | Self::SpecialName { span, .. }
            | Self::CallWithoutIdentifier { span }
            | Self::SpecialFunction { span, .. }
            | Self::AttributeWithoutIdentifier { span }
            | Self::SpecialAttribute { span, .. } => *span,
        }
    }

    /// The node-kind name or identifier the violation is about, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::ForbiddenNode { kind, .. } => Some(kind.as_str()),
            Self::SpecialName { name, .. }
            | Self::SpecialFunction { name, .. }
            | Self::SpecialAttribute { name, .. } => Some(name),
            Self::CallWithoutIdentifier { .. } | Self::AttributeWithoutIdentifier { .. } => None,
        }
    }

    /// Short category name, stable across message wording.
    pub fn category(&self) -> &'static str {
        match self {
            Self::ForbiddenNode { .. } => "forbidden statement",
            Self::SpecialName { .. } => "forbidden name",
            Self::CallWithoutIdentifier { .. } | Self::SpecialFunction { .. } => {
                "forbidden call"
            }
            Self::AttributeWithoutIdentifier { .. } | Self::SpecialAttribute { .. } => {
                "forbidden attribute"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nameless_attribute_has_no_label() {
        let violation = SafetyViolation::AttributeWithoutIdentifier {
            span: Span::new(0, 2),
        };
        assert_eq!(violation.to_string(), "Access denied to attribute");
        assert_eq!(violation.label(), None);
        assert_eq!(violation.category(), "forbidden attribute");
        assert_eq!(violation.span(), Span::new(0, 2));
    }
}
