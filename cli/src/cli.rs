use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "quarry")]
/// Quarry command line tool
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a SPARQL SELECT query against an RDF file
    Query {
        /// File to load the facts from
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// The format of the fact file
        ///
        /// It can be an extension like "ttl" or a MIME type like "text/turtle".
        ///
        /// By default the format is guessed from the file extension.
        #[arg(long)]
        format: Option<String>,
        /// The query to run
        #[arg(short, long, conflicts_with = "query_file")]
        query: Option<String>,
        /// File to read the query from
        #[arg(long, required_unless_present = "query", value_hint = ValueHint::FilePath)]
        query_file: Option<PathBuf>,
        /// The serialization of the results
        ///
        /// It can be an extension like "csv" or a MIME type like "text/csv".
        ///
        /// By default the results are printed as an aligned table.
        #[arg(long)]
        results_format: Option<String>,
    },
    /// List the distinct object values of a predicate
    Objects {
        /// File to load the facts from
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// The format of the fact file
        ///
        /// By default the format is guessed from the file extension.
        #[arg(long)]
        format: Option<String>,
        /// IRI of the predicate to look up
        #[arg(short, long, value_hint = ValueHint::Url)]
        predicate: String,
    },
}
