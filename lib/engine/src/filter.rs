use crate::error::QueryEvaluationError;
use crate::join::BindingRow;
use itertools::Itertools;
use quarry_model::ComparisonValue;
use spargebra::algebra::Expression;
use std::cmp::Ordering;

/// Checks that a filter is a binary comparison over variables and literals.
///
/// This runs during plan extraction so that an unsupported filter fails the
/// query even when no binding row survives to be evaluated against it.
pub(crate) fn validate(expression: &Expression) -> Result<(), QueryEvaluationError> {
    match expression {
        Expression::Equal(left, right)
        | Expression::Greater(left, right)
        | Expression::GreaterOrEqual(left, right)
        | Expression::Less(left, right)
        | Expression::LessOrEqual(left, right) => {
            validate_operand(left)?;
            validate_operand(right)
        }
        Expression::Not(inner) => match inner.as_ref() {
            Expression::Equal(left, right) => {
                validate_operand(left)?;
                validate_operand(right)
            }
            inner => Err(QueryEvaluationError::unsupported_operator(inner)),
        },
        expression => Err(QueryEvaluationError::unsupported_operator(expression)),
    }
}

fn validate_operand(expression: &Expression) -> Result<(), QueryEvaluationError> {
    match expression {
        Expression::Variable(_) | Expression::Literal(_) => Ok(()),
        expression => Err(QueryEvaluationError::unsupported_expression(expression)),
    }
}

/// Evaluates a filter against one binding row.
///
/// `!=` reaches this engine as `Not(Equal(..))`, which is the only supported
/// use of negation.
pub(crate) fn evaluate(
    expression: &Expression,
    row: &BindingRow,
) -> Result<bool, QueryEvaluationError> {
    match expression {
        Expression::Equal(left, right) => Ok(comparison(left, right, row)? == Ordering::Equal),
        Expression::Greater(left, right) => Ok(comparison(left, right, row)? == Ordering::Greater),
        Expression::GreaterOrEqual(left, right) => {
            Ok(comparison(left, right, row)? != Ordering::Less)
        }
        Expression::Less(left, right) => Ok(comparison(left, right, row)? == Ordering::Less),
        Expression::LessOrEqual(left, right) => {
            Ok(comparison(left, right, row)? != Ordering::Greater)
        }
        Expression::Not(inner) => match inner.as_ref() {
            Expression::Equal(left, right) => Ok(comparison(left, right, row)? != Ordering::Equal),
            inner => Err(QueryEvaluationError::unsupported_operator(inner)),
        },
        expression => Err(QueryEvaluationError::unsupported_operator(expression)),
    }
}

/// Keeps the rows for which every filter evaluates to true.
pub(crate) fn apply_filters(
    rows: Vec<BindingRow>,
    filters: &[Expression],
) -> Result<Vec<BindingRow>, QueryEvaluationError> {
    if filters.is_empty() {
        return Ok(rows);
    }
    let mut surviving = Vec::with_capacity(rows.len());
    for row in rows {
        if passes_all(&row, filters)? {
            surviving.push(row);
        }
    }
    Ok(surviving)
}

/// Every conjunct is evaluated, so an evaluation error surfaces regardless of
/// the clause order or of earlier conjuncts being false.
fn passes_all(row: &BindingRow, filters: &[Expression]) -> Result<bool, QueryEvaluationError> {
    filters
        .iter()
        .map(|filter| evaluate(filter, row))
        .fold_ok(true, |survives, passed| survives && passed)
}

fn comparison(
    left: &Expression,
    right: &Expression,
    row: &BindingRow,
) -> Result<Ordering, QueryEvaluationError> {
    Ok(operand(left, row)?.compare(&operand(right, row)?))
}

fn operand(
    expression: &Expression,
    row: &BindingRow,
) -> Result<ComparisonValue, QueryEvaluationError> {
    match expression {
        Expression::Variable(variable) => row
            .get(variable)
            .map(|term| ComparisonValue::from_term(term.as_ref()))
            .ok_or_else(|| QueryEvaluationError::UnboundFilterVariable(variable.clone())),
        Expression::Literal(literal) => Ok(ComparisonValue::new(literal.value())),
        expression => Err(QueryEvaluationError::unsupported_expression(expression)),
    }
}
