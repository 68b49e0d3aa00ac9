use oxrdf::TermRef;
use std::cmp::Ordering;

/// Returns the lexical form a term contributes to comparisons.
///
/// IRIs and blank nodes compare by their identifier, literals by their lexical
/// value. Datatypes and language tags do not take part in comparisons.
pub fn lexical_value(term: TermRef<'_>) -> &str {
    match term {
        TermRef::NamedNode(node) => node.as_str(),
        TermRef::BlankNode(node) => node.as_str(),
        TermRef::Literal(literal) => literal.value(),
    }
}

/// A value coerced for filter and sort comparisons.
///
/// Two values that both parse as finite numerals compare numerically, every
/// other pairing compares by lexical form. `"1950" < "2000"` therefore holds
/// numerically even though the plain string order would agree, and
/// `"100" < "20"` holds where the string order would not.
#[derive(Debug, Clone)]
pub struct ComparisonValue {
    lexical: String,
    numeral: Option<f64>,
}

impl ComparisonValue {
    pub fn new(lexical: impl Into<String>) -> Self {
        let lexical = lexical.into();
        let numeral = lexical.parse::<f64>().ok().filter(|n| n.is_finite());
        Self { lexical, numeral }
    }

    pub fn from_term(term: TermRef<'_>) -> Self {
        Self::new(lexical_value(term))
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.numeral, other.numeral) {
            (Some(left), Some(right)) => left.total_cmp(&right),
            _ => self.lexical.cmp(&other.lexical),
        }
    }
}
