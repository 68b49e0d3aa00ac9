use quarry_model::{MalformedTermError, Variable};
use spargebra::algebra::Expression;
use spargebra::SparqlSyntaxError;

/// A SPARQL evaluation error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QueryEvaluationError {
    /// An error in SPARQL parsing.
    #[error(transparent)]
    Parsing(#[from] SparqlSyntaxError),
    /// A query was submitted before fact loading completed.
    #[error("Data not loaded. Load data before executing queries.")]
    NotLoaded,
    /// The query is not a SELECT query.
    #[error("Unsupported query form: {0}")]
    UnsupportedQueryForm(&'static str),
    /// A where-clause entry is neither a basic graph pattern nor a filter.
    #[error("Unsupported graph pattern: {0}")]
    UnsupportedPattern(&'static str),
    /// A filter referenced a variable with no value in the current row.
    #[error("Variable {0} is unbound in FILTER")]
    UnboundFilterVariable(Variable),
    /// A filter or order expression uses an operator outside the supported
    /// binary comparison set.
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(&'static str),
    /// An expression has a shape this engine cannot evaluate.
    #[error("Unsupported expression: {0}")]
    UnsupportedExpression(&'static str),
    /// A pattern term does not match any recognized term kind.
    #[error(transparent)]
    MalformedTerm(#[from] MalformedTermError),
}

impl QueryEvaluationError {
    pub(crate) fn unsupported_operator(expression: &Expression) -> Self {
        Self::UnsupportedOperator(expression_name(expression))
    }

    pub(crate) fn unsupported_expression(expression: &Expression) -> Self {
        Self::UnsupportedExpression(expression_name(expression))
    }
}

fn expression_name(expression: &Expression) -> &'static str {
    match expression {
        Expression::NamedNode(_) => "IRI",
        Expression::Literal(_) => "literal",
        Expression::Variable(_) => "variable",
        Expression::Or(..) => "||",
        Expression::And(..) => "&&",
        Expression::Equal(..) => "=",
        Expression::SameTerm(..) => "sameTerm",
        Expression::Greater(..) => ">",
        Expression::GreaterOrEqual(..) => ">=",
        Expression::Less(..) => "<",
        Expression::LessOrEqual(..) => "<=",
        Expression::In(..) => "IN",
        Expression::Add(..) => "+",
        Expression::Subtract(..) => "-",
        Expression::Multiply(..) => "*",
        Expression::Divide(..) => "/",
        Expression::UnaryPlus(_) => "unary +",
        Expression::UnaryMinus(_) => "unary -",
        Expression::Not(_) => "!",
        Expression::Exists(_) => "EXISTS",
        Expression::Bound(_) => "BOUND",
        Expression::If(..) => "IF",
        Expression::Coalesce(_) => "COALESCE",
        Expression::FunctionCall(..) => "function call",
    }
}
