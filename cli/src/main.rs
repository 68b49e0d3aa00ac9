#![allow(clippy::print_stdout, clippy::print_stderr)]
use crate::cli::{Args, Command};
use anyhow::{bail, Context};
use clap::Parser;
use prettytable::{Cell, Row, Table};
use quarry::io::{RdfFormat, RdfParser};
use quarry::model::{lexical_value, NamedNode};
use quarry::sparql::{QueryPlan, QuerySolution};
use quarry::store::Store;
use sparesults::{QueryResultsFormat, QueryResultsSerializer};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::stdout;
use std::path::Path;

mod cli;

fn main() -> anyhow::Result<()> {
    let matches = Args::parse();
    match matches.command {
        Command::Query {
            file,
            format,
            query,
            query_file,
            results_format,
        } => {
            let store = load_store(&file, format.as_deref())?;
            let query = match (query, query_file) {
                (Some(query), _) => query,
                (None, Some(path)) => fs::read_to_string(&path)
                    .with_context(|| format!("Cannot read the query file {}", path.display()))?,
                (None, None) => bail!("Either --query or --query-file must be given"),
            };
            let solutions = store.query(&query)?;
            if let Some(name) = results_format {
                let format = results_format_from_name(&name)?;
                serialize_solutions(&query, &solutions, format)
            } else {
                print_table(&solutions);
                Ok(())
            }
        }
        Command::Objects {
            file,
            format,
            predicate,
        } => {
            let store = load_store(&file, format.as_deref())?;
            let predicate = NamedNode::new(&predicate)
                .with_context(|| format!("The predicate {predicate} is invalid"))?;
            for object in store.objects_for_predicate(predicate.as_ref())? {
                println!("{}", lexical_value(object.as_ref()));
            }
            Ok(())
        }
    }
}

fn load_store(path: &Path, format: Option<&str>) -> anyhow::Result<Store> {
    let format = if let Some(name) = format {
        rdf_format_from_name(name)?
    } else {
        rdf_format_from_path(path)?
    };
    let file =
        File::open(path).with_context(|| format!("Cannot open the file {}", path.display()))?;
    let mut store = Store::new();
    store
        .load_from_reader(RdfParser::from_format(format), file)
        .with_context(|| format!("Cannot load the file {}", path.display()))?;
    Ok(store)
}

fn print_table(solutions: &[QuerySolution]) {
    let Some(first) = solutions.first() else {
        return;
    };
    let mut table = Table::new();
    table.set_titles(Row::new(
        first
            .variables()
            .iter()
            .map(|variable| Cell::new(variable.as_str()))
            .collect(),
    ));
    for solution in solutions {
        table.add_row(Row::new(
            solution
                .iter()
                .map(|(_, value)| {
                    Cell::new(value.map_or("", |term| lexical_value(term.as_ref())))
                })
                .collect(),
        ));
    }
    table.printstd();
}

fn serialize_solutions(
    query: &str,
    solutions: &[QuerySolution],
    format: QueryResultsFormat,
) -> anyhow::Result<()> {
    // The projection is taken from the plan so that headers are written even
    // when no row survived.
    let parsed = quarry::sparql::Query::parse(query, None)?;
    let variables = QueryPlan::try_from_query(&parsed)?.variables;

    let mut serializer = QueryResultsSerializer::from_format(format)
        .serialize_solutions_to_writer(stdout().lock(), variables)?;
    for solution in solutions {
        serializer.serialize(solution.bound())?;
    }
    serializer.finish()?;
    Ok(())
}

fn format_from_path<T>(
    path: &Path,
    from_extension: impl FnOnce(&str) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    if let Some(ext) = path.extension().and_then(OsStr::to_str) {
        from_extension(ext).map_err(|e| {
            e.context(format!(
                "Not able to guess the file format from file name extension '{ext}'"
            ))
        })
    } else {
        bail!(
            "The path {} has no extension to guess a file format from",
            path.display()
        )
    }
}

fn rdf_format_from_path(path: &Path) -> anyhow::Result<RdfFormat> {
    format_from_path(path, |ext| {
        RdfFormat::from_extension(ext)
            .with_context(|| format!("The file extension '{ext}' is unknown"))
    })
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    if let Some(t) = RdfFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = RdfFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The file format '{name}' is unknown")
}

fn results_format_from_name(name: &str) -> anyhow::Result<QueryResultsFormat> {
    if let Some(t) = QueryResultsFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = QueryResultsFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The results format '{name}' is unknown")
}

#[cfg(test)]
#[allow(clippy::panic_in_result_fn)]
mod tests {
    use anyhow::Result;
    use assert_cmd::Command;
    use assert_fs::prelude::*;
    use assert_fs::NamedTempFile;
    use predicates::prelude::*;

    const BOOKS: &str = "@prefix : <http://example.org/books/> .\n\
        :b1 :title \"A\" ; :year \"1980\" .\n\
        :b2 :title \"B\" ; :year \"2005\" .\n";

    fn cli_command() -> Command {
        Command::cargo_bin("quarry").expect("Binary not built")
    }

    fn books_file() -> Result<NamedTempFile> {
        let file = NamedTempFile::new("books.ttl")?;
        file.write_str(BOOKS)?;
        Ok(file)
    }

    #[test]
    fn cli_query_prints_a_table() -> Result<()> {
        let file = books_file()?;
        cli_command()
            .arg("query")
            .arg("--file")
            .arg(file.path())
            .arg("--query")
            .arg(
                "PREFIX : <http://example.org/books/> \
                 SELECT ?t ?y WHERE { ?x :title ?t . ?x :year ?y } ORDER BY DESC(?y)",
            )
            .assert()
            .success()
            .stdout(predicate::str::contains("2005").and(predicate::str::contains("1980")));
        Ok(())
    }

    #[test]
    fn cli_query_serializes_csv() -> Result<()> {
        let file = books_file()?;
        cli_command()
            .arg("query")
            .arg("--file")
            .arg(file.path())
            .arg("--query")
            .arg(
                "PREFIX : <http://example.org/books/> \
                 SELECT ?t ?y WHERE { ?x :title ?t . ?x :year ?y . FILTER(?y < 2000) }",
            )
            .arg("--results-format")
            .arg("csv")
            .assert()
            .success()
            .stdout(predicate::str::contains("t,y").and(predicate::str::contains("A,1980")));
        Ok(())
    }

    #[test]
    fn cli_rejects_non_select_queries() -> Result<()> {
        let file = books_file()?;
        cli_command()
            .arg("query")
            .arg("--file")
            .arg(file.path())
            .arg("--query")
            .arg("ASK { ?s ?p ?o }")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unsupported query form"));
        Ok(())
    }

    #[test]
    fn cli_lists_distinct_objects() -> Result<()> {
        let file = NamedTempFile::new("genres.ttl")?;
        file.write_str(
            "@prefix : <http://example.org/books/> .\n\
             :b1 :genre \"Fantasy\" .\n\
             :b2 :genre \"Science Fiction\" .\n\
             :b3 :genre \"Fantasy\" .\n",
        )?;
        cli_command()
            .arg("objects")
            .arg("--file")
            .arg(file.path())
            .arg("--predicate")
            .arg("http://example.org/books/genre")
            .assert()
            .success()
            .stdout("Fantasy\nScience Fiction\n");
        Ok(())
    }

    #[test]
    fn clap_debug() {
        use clap::CommandFactory;

        super::Args::command().debug_assert();
    }
}
