pub mod dataset_loader;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod normalizer;
pub mod query_text;
pub mod renderer;
pub mod source;

pub use sparql_database::results;
