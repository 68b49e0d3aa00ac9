#![doc = include_str!("../README.md")]

pub mod error;
pub mod store;

pub mod model {
    pub use quarry_model::*;
}

pub mod storage {
    pub use quarry_storage::*;
}

pub mod sparql {
    pub use quarry_engine::{OrderKey, QueryEvaluationError, QueryPlan, QuerySolution};
    pub use spargebra::{Query, SparqlSyntaxError};
}

pub mod io {
    pub use oxrdfio::{RdfFormat, RdfParseError, RdfParser};
}
