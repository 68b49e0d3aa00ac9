use crate::error::QueryEvaluationError;
use quarry_model::{NamedNodeRef, PatternTerm, SubjectRef, Term, TermRef, Variable};
use quarry_storage::MemTripleStore;
use rustc_hash::FxHashMap;
use spargebra::term::TriplePattern;

/// A partial assignment of values to variables, grown one pattern at a time.
///
/// Rows are copied on extension, so the branching exploration of one pattern
/// never aliases the rows produced for another.
pub(crate) type BindingRow = FxHashMap<Variable, Term>;

/// Matches an ordered pattern sequence against the store.
///
/// The working set starts as a single empty row. Each pattern replaces the
/// working set with every consistent extension of its rows; patterns are
/// processed strictly in input order. An empty pattern sequence therefore
/// yields exactly one empty row, and a stage without matches ends the query
/// with no rows.
pub(crate) fn match_patterns(
    store: &MemTripleStore,
    patterns: &[TriplePattern],
) -> Result<Vec<BindingRow>, QueryEvaluationError> {
    let mut rows = vec![BindingRow::default()];
    for pattern in patterns {
        let subject = PatternTerm::resolve(&pattern.subject)?;
        let predicate = PatternTerm::resolve_predicate(&pattern.predicate);
        let object = PatternTerm::resolve(&pattern.object)?;

        let mut extended = Vec::new();
        for row in &rows {
            extend_row(store, row, &subject, &predicate, &object, &mut extended);
        }
        rows = extended;
        if rows.is_empty() {
            break;
        }
    }
    Ok(rows)
}

/// Pushes every consistent extension of `row` by facts matching the pattern.
///
/// Values already bound in the row become store filters, unbound variables
/// stay wildcards. The consistency check on binding still applies, for
/// variables that occur in more than one position of the same pattern.
fn extend_row(
    store: &MemTripleStore,
    row: &BindingRow,
    subject: &PatternTerm,
    predicate: &PatternTerm,
    object: &PatternTerm,
    extended: &mut Vec<BindingRow>,
) {
    let subject_filter = match filter_value(subject, row) {
        Some(term) => match subject_ref(term) {
            Some(value) => Some(value),
            // A literal can never be a fact's subject, so nothing matches.
            None => return,
        },
        None => None,
    };
    let predicate_filter = match filter_value(predicate, row) {
        Some(term) => match predicate_ref(term) {
            Some(value) => Some(value),
            None => return,
        },
        None => None,
    };
    let object_filter = filter_value(object, row).map(Term::as_ref);

    for fact in store.matching(subject_filter, predicate_filter, object_filter) {
        let mut next = row.clone();
        if bind(&mut next, subject, fact.subject.into())
            && bind(&mut next, predicate, fact.predicate.into())
            && bind(&mut next, object, fact.object)
        {
            extended.push(next);
        }
    }
}

/// The concrete value a position contributes to the store lookup, if any.
fn filter_value<'a>(position: &'a PatternTerm, row: &'a BindingRow) -> Option<&'a Term> {
    match position {
        PatternTerm::Bound(term) => Some(term),
        PatternTerm::Variable(variable) => row.get(variable),
    }
}

/// Binds a variable position to the fact's value, or checks agreement with an
/// existing binding. Returns `false` when the extension is inconsistent.
fn bind(row: &mut BindingRow, position: &PatternTerm, value: TermRef<'_>) -> bool {
    match position {
        PatternTerm::Bound(_) => true,
        PatternTerm::Variable(variable) => match row.get(variable) {
            Some(existing) => existing.as_ref() == value,
            None => {
                row.insert(variable.clone(), value.into_owned());
                true
            }
        },
    }
}

fn subject_ref(term: &Term) -> Option<SubjectRef<'_>> {
    match term {
        Term::NamedNode(node) => Some(node.as_ref().into()),
        Term::BlankNode(node) => Some(node.as_ref().into()),
        Term::Literal(_) => None,
    }
}

fn predicate_ref(term: &Term) -> Option<NamedNodeRef<'_>> {
    match term {
        Term::NamedNode(node) => Some(node.as_ref()),
        Term::BlankNode(_) | Term::Literal(_) => None,
    }
}
