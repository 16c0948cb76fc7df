use crate::cli::Args;
use anyhow::Context;
use clap::{CommandFactory, Parser};
use log::debug;
use sparqly::engine::{Engine, EngineConfig};
use sparqly::logging::{init_logging, LogConfig};
use sparqly::renderer::{render, OutputFormat};
use std::env;
use std::fs;
use std::io::{stdout, Write};
use std::path::Path;
use std::process::ExitCode;

mod cli;

const ENDPOINT_VARIABLE: &str = "sparqly_endpoint";
const DEFAULT_ENDPOINT: &str = "https://dbpedia.org/sparql";

#[tokio::main(flavor = "current_thread")]
pub async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    if args.example {
        print_example();
        return Ok(ExitCode::from(1));
    }
    let Some(query) = &args.query else {
        eprintln!("{}", Args::command().render_usage());
        return Ok(ExitCode::from(1));
    };

    init_logging(&LogConfig {
        log_file: args.log_file.clone(),
        log_level: args.log_level.clone(),
        quiet: args.quiet,
    })
    .context("Could not set up logging")?;

    let query = if Path::new(query).exists() {
        debug!("Reading query from {}", query);
        fs::read_to_string(query).with_context(|| format!("Could not read query file {query}"))?
    } else {
        query.clone()
    };
    let query = format!("{} {}", query, args.append_query);

    let sources = if args.source.is_empty() {
        vec![env::var(ENDPOINT_VARIABLE).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string())]
    } else {
        args.source
    };

    let mut engine = Engine::from_config(EngineConfig::for_working_directory(
        args.union_default_graph,
    ))?;
    let results = engine.query(&sources, &query).await?;

    let mut out = stdout().lock();
    render(&results, OutputFormat::from_name(&args.format), &mut out)?;
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn print_example() {
    println!(
        r#"   # sparqly - Run SPARQL query against the RDF files or the SPARQL endpoint

    # default endpoint {DEFAULT_ENDPOINT} and use query file dbpedia/sample.rq
    sparqly dbpedia/sample.rq

    # custom endpoint or file and query from the command line
    sparqly -s https://dbpedia.org/sparql 'query_string'
    sparqly -s data.ttl -s more.ttl -f json 'query_string'
    "#
    );
}
