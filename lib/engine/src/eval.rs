use crate::error::QueryEvaluationError;
use crate::plan::QueryPlan;
use crate::solution::QuerySolution;
use crate::{filter, join, order, solution};
use quarry_model::Variable;
use quarry_storage::MemTripleStore;
use std::sync::Arc;

/// Runs a prepared plan against the store: match, filter, project, sort.
///
/// The store is only read and every row is allocated freshly per call, so
/// concurrent evaluations over the same store need no synchronization.
pub fn evaluate_plan(
    store: &MemTripleStore,
    plan: &QueryPlan,
) -> Result<Vec<QuerySolution>, QueryEvaluationError> {
    let rows = join::match_patterns(store, &plan.patterns)?;
    let rows = filter::apply_filters(rows, &plan.filters)?;
    let variables: Arc<[Variable]> = Arc::from(plan.variables.as_slice());
    let mut solutions = solution::project(rows, &variables);
    order::sort_solutions(&mut solutions, &plan.order);
    Ok(solutions)
}
