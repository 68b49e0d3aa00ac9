use crate::join::BindingRow;
use quarry_model::{Term, TermRef, Variable, VariableRef};
use std::sync::Arc;

/// One result row of a SELECT query.
///
/// Every projected variable is present, mapped to its bound term or to an
/// explicit absence when no matched pattern ever bound it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySolution {
    variables: Arc<[Variable]>,
    values: Vec<Option<Term>>,
}

impl QuerySolution {
    /// The projected variables, in query order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Returns the value bound to the variable with the given name.
    pub fn get(&self, variable: &str) -> Option<&Term> {
        self.variables
            .iter()
            .position(|candidate| candidate.as_str() == variable)
            .and_then(|index| self.values[index].as_ref())
    }

    /// Iterates over all projected variables and their optional values.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, Option<&Term>)> {
        self.variables
            .iter()
            .zip(self.values.iter().map(Option::as_ref))
    }

    /// Iterates over the bound pairs only, in the shape result serializers
    /// expect.
    pub fn bound(&self) -> impl Iterator<Item = (VariableRef<'_>, TermRef<'_>)> {
        self.iter()
            .filter_map(|(variable, value)| value.map(|term| (variable.as_ref(), term.as_ref())))
    }
}

/// Projects the requested variables out of each surviving binding row.
pub(crate) fn project(rows: Vec<BindingRow>, variables: &Arc<[Variable]>) -> Vec<QuerySolution> {
    rows.into_iter()
        .map(|mut row| QuerySolution {
            variables: Arc::clone(variables),
            values: variables
                .iter()
                .map(|variable| row.remove(variable))
                .collect(),
        })
        .collect()
}
