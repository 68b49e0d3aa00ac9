use quarry_model::{NamedNodeRef, SubjectRef, Term, TermRef, Triple, TripleRef};
use rustc_hash::FxHashSet;

/// An append-only, insertion-ordered collection of triples.
///
/// The store answers pattern-shaped lookups with a linear scan. Every filter
/// position is optional; an absent filter matches any value. There is no
/// de-duplication and no indexing, which is adequate for datasets that fit
/// comfortably in memory.
#[derive(Debug, Default, Clone)]
pub struct MemTripleStore {
    triples: Vec<Triple>,
}

impl MemTripleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single triple.
    pub fn insert(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Appends a batch of triples, preserving their order.
    pub fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) {
        self.triples.extend(triples);
    }

    /// Returns the triples equal to each given filter, in insertion order.
    pub fn matching<'a>(
        &'a self,
        subject: Option<SubjectRef<'a>>,
        predicate: Option<NamedNodeRef<'a>>,
        object: Option<TermRef<'a>>,
    ) -> impl Iterator<Item = TripleRef<'a>> + 'a {
        self.triples
            .iter()
            .filter(move |triple| {
                subject.map_or(true, |subject| triple.subject.as_ref() == subject)
                    && predicate.map_or(true, |predicate| triple.predicate.as_ref() == predicate)
                    && object.map_or(true, |object| triple.object.as_ref() == object)
            })
            .map(Triple::as_ref)
    }

    /// Returns the distinct object values observed for `predicate`, in
    /// first-seen order.
    pub fn objects_for_predicate(&self, predicate: NamedNodeRef<'_>) -> Vec<Term> {
        let mut seen = FxHashSet::default();
        self.matching(None, Some(predicate), None)
            .filter(|triple| seen.insert(triple.object))
            .map(|triple| triple.object.into_owned())
            .collect()
    }

    /// Returns an iterator over all stored triples.
    pub fn iter(&self) -> impl Iterator<Item = TripleRef<'_>> {
        self.triples.iter().map(Triple::as_ref)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_model::{Literal, NamedNode};

    fn triple(subject: &str, predicate: &str, object: &str) -> Triple {
        Triple::new(
            NamedNode::new_unchecked(format!("http://example.com/{subject}")),
            NamedNode::new_unchecked(format!("http://example.com/{predicate}")),
            Literal::new_simple_literal(object),
        )
    }

    #[test]
    fn matching_without_filters_returns_everything_in_order() {
        let mut store = MemTripleStore::new();
        store.insert(triple("s1", "p", "a"));
        store.insert(triple("s2", "p", "b"));
        store.insert(triple("s1", "p", "a"));

        let all: Vec<_> = store.matching(None, None, None).collect();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], all[2]);
    }

    #[test]
    fn matching_applies_each_present_filter() {
        let mut store = MemTripleStore::new();
        store.insert(triple("s1", "p1", "a"));
        store.insert(triple("s1", "p2", "b"));
        store.insert(triple("s2", "p1", "c"));

        let s1 = NamedNode::new_unchecked("http://example.com/s1");
        let p1 = NamedNode::new_unchecked("http://example.com/p1");

        assert_eq!(store.matching(Some(s1.as_ref().into()), None, None).count(), 2);
        assert_eq!(store.matching(None, Some(p1.as_ref()), None).count(), 2);
        assert_eq!(
            store
                .matching(Some(s1.as_ref().into()), Some(p1.as_ref()), None)
                .count(),
            1
        );

        let absent = Literal::new_simple_literal("nope");
        assert_eq!(
            store.matching(None, None, Some(absent.as_ref().into())).count(),
            0
        );
    }

    #[test]
    fn objects_for_predicate_deduplicates_in_first_seen_order() {
        let mut store = MemTripleStore::new();
        store.insert(triple("s1", "genre", "Fantasy"));
        store.insert(triple("s2", "genre", "Science Fiction"));
        store.insert(triple("s3", "genre", "Fantasy"));
        store.insert(triple("s3", "title", "A"));

        let genre = NamedNode::new_unchecked("http://example.com/genre");
        let objects = store.objects_for_predicate(genre.as_ref());
        assert_eq!(
            objects,
            vec![
                Literal::new_simple_literal("Fantasy").into(),
                Literal::new_simple_literal("Science Fiction").into(),
            ]
        );
    }
}
