use clap::{Parser, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "sparqly")]
/// Run SPARQL queries against RDF files or a SPARQL endpoint
pub struct Args {
    /// Query string, or a file containing the query
    pub query: Option<String>,
    /// Text appended to the end of the query
    #[arg(short, long, default_value = "")]
    pub append_query: String,
    /// Output format: json or table
    ///
    /// Unknown formats are printed as JSON.
    #[arg(short, long, default_value = "table")]
    pub format: String,
    /// SPARQL endpoint or RDF file
    ///
    /// May be repeated to query several RDF files at once. Defaults to the endpoint named by
    /// the `sparqly_endpoint` environment variable, or DBpedia.
    #[arg(short, long, value_hint = ValueHint::AnyPath)]
    pub source: Vec<String>,
    /// Use the union of all graphs as default graph when querying RDF files
    #[arg(long)]
    pub union_default_graph: bool,
    /// Print usage examples then exit
    #[arg(short, long)]
    pub example: bool,
    /// Append log lines to this file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,
    /// debug, info, warn, error, critical
    #[arg(long, default_value = "info")]
    pub log_level: String,
    /// Do not write log lines to stderr
    #[arg(short, long)]
    pub quiet: bool,
}
