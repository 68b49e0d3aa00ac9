use crate::solution::QuerySolution;
use quarry_model::{ComparisonValue, Term, Variable};
use std::cmp::Ordering;

/// One ORDER BY key: a variable and its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderKey {
    pub variable: Variable,
    pub descending: bool,
}

/// Stably sorts solutions by the given keys, later keys breaking ties.
///
/// Values compare with the same numeral-or-text coercion as filters. Rows
/// where a key's variable is absent compare equal to each other and sort
/// before bound values. With no keys the input order is left unchanged.
pub(crate) fn sort_solutions(solutions: &mut [QuerySolution], keys: &[OrderKey]) {
    if keys.is_empty() {
        return;
    }
    solutions.sort_by(|left, right| {
        keys.iter()
            .map(|key| {
                let ordering = compare_values(
                    left.get(key.variable.as_str()),
                    right.get(key.variable.as_str()),
                );
                if key.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

fn compare_values(left: Option<&Term>, right: Option<&Term>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => ComparisonValue::from_term(left.as_ref())
            .compare(&ComparisonValue::from_term(right.as_ref())),
    }
}
