use crate::MalformedTermError;
use oxrdf::{Term, Variable};
use spargebra::term::{NamedNodePattern, TermPattern};

/// One position of a triple pattern, normalized for matching.
///
/// Every position is resolved exactly once per pattern and the join loop
/// dispatches on the result with a single exhaustive `match`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternTerm {
    /// The position must equal this term.
    Bound(Term),
    /// The position binds this variable, or must agree with its current value.
    Variable(Variable),
}

impl PatternTerm {
    /// Normalizes a subject or object position of a parsed triple pattern.
    pub fn resolve(pattern: &TermPattern) -> Result<Self, MalformedTermError> {
        match pattern {
            TermPattern::Variable(variable) => Ok(Self::Variable(variable.clone())),
            TermPattern::NamedNode(node) => Ok(Self::Bound(node.clone().into())),
            TermPattern::Literal(literal) => Ok(Self::Bound(literal.clone().into())),
            pattern => Err(MalformedTermError::new(pattern.to_string())),
        }
    }

    /// Normalizes the predicate position, which the grammar restricts to an
    /// IRI or a variable.
    pub fn resolve_predicate(pattern: &NamedNodePattern) -> Self {
        match pattern {
            NamedNodePattern::Variable(variable) => Self::Variable(variable.clone()),
            NamedNodePattern::NamedNode(node) => Self::Bound(node.clone().into()),
        }
    }

    /// Returns the variable of this position, if it is one.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(variable) => Some(variable),
            Self::Bound(_) => None,
        }
    }
}
