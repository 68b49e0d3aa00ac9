use crate::error::QueryEvaluationError;
use crate::filter;
use crate::order::OrderKey;
use quarry_model::Variable;
use spargebra::algebra::{Expression, GraphPattern, OrderExpression};
use spargebra::term::TriplePattern;

/// The flattened execution plan of a SELECT query.
///
/// The parser yields a nested algebra tree; the supported subset flattens into
/// an ordered pattern list, a filter conjunction, a projection and an optional
/// sort. Everything outside that subset is rejected here, before matching
/// starts.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    /// The projected variables, in query order.
    pub variables: Vec<Variable>,
    /// The triple patterns, in where-clause order.
    pub patterns: Vec<TriplePattern>,
    /// The filter conjuncts. A row survives only if every one holds.
    pub filters: Vec<Expression>,
    /// The sort keys, outermost first.
    pub order: Vec<OrderKey>,
}

impl QueryPlan {
    /// Extracts the plan from a parsed query, rejecting non-SELECT forms and
    /// unsupported pattern shapes.
    pub fn try_from_query(query: &spargebra::Query) -> Result<Self, QueryEvaluationError> {
        let pattern = match query {
            spargebra::Query::Select { pattern, .. } => pattern,
            spargebra::Query::Construct { .. } => {
                return Err(QueryEvaluationError::UnsupportedQueryForm("CONSTRUCT"))
            }
            spargebra::Query::Describe { .. } => {
                return Err(QueryEvaluationError::UnsupportedQueryForm("DESCRIBE"))
            }
            spargebra::Query::Ask { .. } => {
                return Err(QueryEvaluationError::UnsupportedQueryForm("ASK"))
            }
        };

        // `SELECT *` has no projection node; it projects the in-scope
        // variables in first-appearance order.
        let (pattern, variables) = match pattern {
            GraphPattern::Project { inner, variables } => (inner.as_ref(), variables.clone()),
            pattern => (pattern, in_scope_variables(pattern)),
        };

        let (pattern, order) = match pattern {
            GraphPattern::OrderBy { inner, expression } => {
                (inner.as_ref(), order_keys(expression)?)
            }
            pattern => (pattern, Vec::new()),
        };

        let mut patterns = Vec::new();
        let mut filters = Vec::new();
        collect_clauses(pattern, &mut patterns, &mut filters)?;
        for expression in &filters {
            filter::validate(expression)?;
        }

        Ok(Self {
            variables,
            patterns,
            filters,
            order,
        })
    }
}

/// Collects the BGP triples and filter conjuncts of the where clause.
fn collect_clauses(
    pattern: &GraphPattern,
    patterns: &mut Vec<TriplePattern>,
    filters: &mut Vec<Expression>,
) -> Result<(), QueryEvaluationError> {
    match pattern {
        GraphPattern::Bgp { patterns: triples } => {
            patterns.extend(triples.iter().cloned());
            Ok(())
        }
        GraphPattern::Join { left, right } => {
            collect_clauses(left, patterns, filters)?;
            collect_clauses(right, patterns, filters)
        }
        GraphPattern::Filter { expr, inner } => {
            collect_clauses(inner, patterns, filters)?;
            collect_conjuncts(expr, filters);
            Ok(())
        }
        pattern => Err(QueryEvaluationError::UnsupportedPattern(pattern_name(
            pattern,
        ))),
    }
}

/// Splits a conjunction back into clauses. Adjacent `FILTER`s arrive from the
/// parser folded into a single `And`.
fn collect_conjuncts(expression: &Expression, filters: &mut Vec<Expression>) {
    if let Expression::And(left, right) = expression {
        collect_conjuncts(left, filters);
        collect_conjuncts(right, filters);
    } else {
        filters.push(expression.clone());
    }
}

fn order_keys(expressions: &[OrderExpression]) -> Result<Vec<OrderKey>, QueryEvaluationError> {
    expressions
        .iter()
        .map(|expression| {
            let (inner, descending) = match expression {
                OrderExpression::Asc(inner) => (inner, false),
                OrderExpression::Desc(inner) => (inner, true),
            };
            match inner {
                Expression::Variable(variable) => Ok(OrderKey {
                    variable: variable.clone(),
                    descending,
                }),
                expression => Err(QueryEvaluationError::unsupported_expression(expression)),
            }
        })
        .collect()
}

fn in_scope_variables(pattern: &GraphPattern) -> Vec<Variable> {
    let mut variables: Vec<Variable> = Vec::new();
    pattern.on_in_scope_variable(|variable| {
        if !variables.contains(variable) {
            variables.push(variable.clone());
        }
    });
    variables
}

fn pattern_name(pattern: &GraphPattern) -> &'static str {
    match pattern {
        GraphPattern::Path { .. } => "property path",
        GraphPattern::LeftJoin { .. } => "OPTIONAL",
        GraphPattern::Union { .. } => "UNION",
        GraphPattern::Graph { .. } => "GRAPH",
        GraphPattern::Extend { .. } => "BIND",
        GraphPattern::Minus { .. } => "MINUS",
        GraphPattern::Values { .. } => "VALUES",
        GraphPattern::Group { .. } => "GROUP BY",
        GraphPattern::Service { .. } => "SERVICE",
        GraphPattern::OrderBy { .. } => "nested ORDER BY",
        GraphPattern::Distinct { .. } | GraphPattern::Reduced { .. } => "DISTINCT",
        GraphPattern::Slice { .. } => "LIMIT/OFFSET",
        GraphPattern::Project { .. } => "nested SELECT",
        _ => "this graph pattern",
    }
}
