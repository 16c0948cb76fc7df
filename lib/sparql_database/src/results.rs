//! The SPARQL 1.1 query results JSON format as plain serde structures.
//!
//! Members the format allows but this crate does not interpret (`link`, `distinct`, `ordered`,
//! `xml:lang`, ...) are kept in the `extra` maps so a document survives a parse/serialize cycle.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const URI_TERM_TYPE: &str = "uri";
pub const LITERAL_TERM_TYPE: &str = "literal";
pub const TYPED_LITERAL_TERM_TYPE: &str = "typed-literal";

/// One solution: variable name to bound term. Unbound variables are absent.
pub type Binding = IndexMap<String, Term>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub head: Head,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Results>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Head {
    /// Absent in boolean results, present (possibly empty) in solution results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Results {
    #[serde(default)]
    pub bindings: Vec<Binding>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    #[serde(rename = "type")]
    pub term_type: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultSet {
    pub fn from_solutions(vars: Vec<String>, bindings: Vec<Binding>) -> ResultSet {
        ResultSet {
            head: Head {
                vars: Some(vars),
                extra: Map::new(),
            },
            results: Some(Results {
                bindings,
                extra: Map::new(),
            }),
            boolean: None,
        }
    }

    pub fn from_boolean(value: bool) -> ResultSet {
        ResultSet {
            head: Head::default(),
            results: None,
            boolean: Some(value),
        }
    }

    pub fn vars(&self) -> &[String] {
        self.head.vars.as_deref().unwrap_or(&[])
    }

    /// The solutions of a SELECT result, empty for ASK results.
    pub fn bindings(&self) -> &[Binding] {
        match &self.results {
            Some(results) => &results.bindings,
            None => &[],
        }
    }

    pub fn bindings_mut(&mut self) -> Option<&mut Vec<Binding>> {
        self.results.as_mut().map(|r| &mut r.bindings)
    }
}

impl Term {
    pub fn new(term_type: &str, value: &str, datatype: Option<&str>) -> Term {
        Term {
            term_type: term_type.to_string(),
            value: value.to_string(),
            datatype: datatype.map(|d| d.to_string()),
            extra: Map::new(),
        }
    }

    pub fn uri(value: &str) -> Term {
        Term::new(URI_TERM_TYPE, value, None)
    }

    pub fn literal(value: &str) -> Term {
        Term::new(LITERAL_TERM_TYPE, value, None)
    }

    pub fn typed_literal(value: &str, datatype: &str) -> Term {
        Term::new(TYPED_LITERAL_TERM_TYPE, value, Some(datatype))
    }

    /// SPARQL 1.0 endpoints report `typed-literal`, SPARQL 1.1 serializers a `literal` with a
    /// `datatype` member. Both denote the same thing.
    pub fn is_typed_literal(&self) -> bool {
        self.term_type == TYPED_LITERAL_TERM_TYPE
            || (self.term_type == LITERAL_TERM_TYPE && self.datatype.is_some())
    }
}
