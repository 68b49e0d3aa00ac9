//! API to access an in-memory set of subject-predicate-object facts.
//!
//! The entry point of the module is the [`Store`] struct.

use crate::error::LoaderError;
use oxrdfio::RdfParser;
use quarry_engine::{evaluate_plan, QueryEvaluationError, QueryPlan, QuerySolution};
use quarry_model::{NamedNodeRef, Term, Triple};
use quarry_storage::MemTripleStore;
use std::io::Read;

/// The load lifecycle of a [`Store`].
///
/// Queries are only accepted once loading has completed; checking this state
/// is what distinguishes "no data yet" from "no matches".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Unloaded,
    Loading,
    Ready,
}

/// An in-memory store of facts, queried with a restricted SPARQL subset.
///
/// The store is populated exactly once from an RDF document and is read-only
/// afterwards. Supported queries are SELECT over basic graph patterns with
/// comparison filters and ORDER BY.
///
/// Usage example:
/// ```
/// use quarry::io::RdfFormat;
/// use quarry::store::Store;
///
/// let file = b"<http://example.com/b1> <http://example.com/year> \"1980\" .";
///
/// let mut store = Store::new();
/// store.load_from_reader(RdfFormat::Turtle, file.as_ref())?;
///
/// let solutions =
///     store.query("SELECT ?s ?y WHERE { ?s <http://example.com/year> ?y }")?;
/// assert_eq!(solutions.len(), 1);
/// assert_eq!(
///     solutions[0].get("y").map(ToString::to_string),
///     Some("\"1980\"".to_owned())
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    storage: MemTripleStore,
    state: LoadState,
}

impl Store {
    /// Creates an empty, unloaded store.
    pub fn new() -> Self {
        Self {
            storage: MemTripleStore::new(),
            state: LoadState::Unloaded,
        }
    }

    /// Loads an RDF document into the store.
    ///
    /// The whole document is parsed before anything is stored: a parse error
    /// aborts the load, leaves the store unloaded and may be retried. Loading
    /// an already loaded store is a no-op. Named graphs are not supported.
    ///
    /// Usage example:
    /// ```
    /// use quarry::io::RdfFormat;
    /// use quarry::store::Store;
    ///
    /// let file = b"<http://example.com/s> <http://example.com/p> \"o\" .";
    ///
    /// let mut store = Store::new();
    /// store.load_from_reader(RdfFormat::Turtle, file.as_ref())?;
    /// assert_eq!(store.len(), 1);
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn load_from_reader(
        &mut self,
        parser: impl Into<RdfParser>,
        reader: impl Read,
    ) -> Result<(), LoaderError> {
        if self.state == LoadState::Ready {
            return Ok(());
        }
        self.state = LoadState::Loading;
        let parsed = parser
            .into()
            .without_named_graphs()
            .rename_blank_nodes()
            .for_reader(reader)
            .map(|quad| quad.map(|quad| Triple::new(quad.subject, quad.predicate, quad.object)))
            .collect::<Result<Vec<_>, _>>();
        match parsed {
            Ok(triples) => {
                self.storage.extend(triples);
                self.state = LoadState::Ready;
                Ok(())
            }
            Err(error) => {
                self.state = LoadState::Unloaded;
                Err(error.into())
            }
        }
    }

    /// Returns whether loading has completed.
    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Executes a SPARQL SELECT query and returns its solutions.
    ///
    /// Fails with [`QueryEvaluationError::NotLoaded`] until
    /// [`load_from_reader`](Self::load_from_reader) has completed. Parse
    /// errors are surfaced verbatim. Evaluation reads the store only and
    /// allocates all rows freshly, so a shared store can serve queries from
    /// several threads at once.
    ///
    /// Usage example:
    /// ```
    /// use quarry::io::RdfFormat;
    /// use quarry::store::Store;
    ///
    /// let file = b"
    /// <http://example.com/b1> <http://example.com/year> \"1980\" .
    /// <http://example.com/b2> <http://example.com/year> \"2005\" .
    /// ";
    ///
    /// let mut store = Store::new();
    /// store.load_from_reader(RdfFormat::Turtle, file.as_ref())?;
    ///
    /// let solutions = store.query(
    ///     "SELECT ?s WHERE { ?s <http://example.com/year> ?y . FILTER(?y < 2000) }",
    /// )?;
    /// assert_eq!(solutions.len(), 1);
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn query(&self, query: &str) -> Result<Vec<QuerySolution>, QueryEvaluationError> {
        self.ensure_loaded()?;
        let query = spargebra::Query::parse(query, None)?;
        let plan = QueryPlan::try_from_query(&query)?;
        evaluate_plan(&self.storage, &plan)
    }

    /// Returns the distinct object values observed for `predicate`, in
    /// first-seen order.
    ///
    /// This is a convenience lookup for building value pickers; it does not
    /// take part in query evaluation.
    pub fn objects_for_predicate<'a>(
        &self,
        predicate: impl Into<NamedNodeRef<'a>>,
    ) -> Result<Vec<Term>, QueryEvaluationError> {
        self.ensure_loaded()?;
        Ok(self.storage.objects_for_predicate(predicate.into()))
    }

    /// Returns the number of stored facts.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns whether the store holds no facts.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    fn ensure_loaded(&self) -> Result<(), QueryEvaluationError> {
        if self.state == LoadState::Ready {
            Ok(())
        } else {
            Err(QueryEvaluationError::NotLoaded)
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_sync() {
        fn is_send_sync<T: Send + Sync>() {}
        is_send_sync::<Store>();
    }

    #[test]
    fn a_new_store_is_unloaded_and_empty() {
        let store = Store::new();
        assert!(!store.is_loaded());
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }
}
