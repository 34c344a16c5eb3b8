//! Schema validation gateway.
//!
//! XSD validation itself is delegated to an external validator behind
//! [`SchemaGateway`]. This module owns the boundary: mapping a rejected
//! document to [`XmlError::SchemaValidationFailed`], and a schema cache that
//! loads each schema identifier at most once even under concurrent first
//! use.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::{Result, XmlError};

/// One finding reported by the external validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub line: Option<u64>,
    pub column: Option<u64>,
    /// Location inside the document, when the validator reports one.
    pub path: Option<String>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
            path: None,
        }
    }

    pub fn at_line(mut self, line: u64, column: u64) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, "{line}:{column}: ")?;
        }
        if let Some(path) = &self.path {
            write!(f, "{path}: ")?;
        }
        f.write_str(&self.message)
    }
}

/// Checks XML bytes against the schema named by `schema_id` (an official
/// file name such as `eCH-0020-3-0.xsd`).
pub trait SchemaGateway: Send + Sync {
    fn validate(&self, xml: &[u8], schema_id: &str) -> std::result::Result<(), Vec<Diagnostic>>;
}

/// Runs a gateway and maps a rejection into the crate error.
pub fn validate_with(gateway: &dyn SchemaGateway, xml: &[u8], schema_id: &str) -> Result<()> {
    gateway.validate(xml, schema_id).map_err(|diagnostics| {
        warn!(schema_id, count = diagnostics.len(), "schema validation failed");
        XmlError::SchemaValidationFailed {
            schema_id: schema_id.to_string(),
            diagnostics,
        }
    })
}

/// Where schema documents come from (files, a bundled set, a download).
pub trait SchemaSource: Send + Sync {
    fn fetch(&self, schema_id: &str) -> std::result::Result<Vec<u8>, String>;
}

type Compile<S> = dyn Fn(&str, &[u8]) -> std::result::Result<S, String> + Send + Sync;

/// Compiled schemas keyed by identifier.
///
/// Concurrent first requests for one identifier wait on the same cell, so
/// the source is hit once per identifier. A failed load leaves the cell
/// empty and the next request retries.
pub struct SchemaCache<S> {
    source: Box<dyn SchemaSource>,
    compile: Box<Compile<S>>,
    entries: Mutex<HashMap<String, Arc<OnceCell<Arc<S>>>>>,
}

impl<S: Send + Sync> SchemaCache<S> {
    pub fn new<F>(source: impl SchemaSource + 'static, compile: F) -> Self
    where
        F: Fn(&str, &[u8]) -> std::result::Result<S, String> + Send + Sync + 'static,
    {
        Self {
            source: Box::new(source),
            compile: Box::new(compile),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, schema_id: &str) -> Result<Arc<S>> {
        let cell = {
            let mut entries = self.entries.lock();
            entries.entry(schema_id.to_string()).or_default().clone()
        };
        cell.get_or_try_init(|| {
            info!(schema_id, "loading schema");
            let bytes = self.source.fetch(schema_id)?;
            (self.compile)(schema_id, &bytes).map(Arc::new)
        })
        .cloned()
        .map_err(|reason| XmlError::SchemaUnavailable {
            schema_id: schema_id.to_string(),
            reason,
        })
    }

    pub fn is_loaded(&self, schema_id: &str) -> bool {
        self.entries
            .lock()
            .get(schema_id)
            .is_some_and(|cell| cell.get().is_some())
    }

    /// Identifiers with a compiled schema, sorted.
    pub fn loaded(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .entries
            .lock()
            .iter()
            .filter(|(_, cell)| cell.get().is_some())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }
}

type Check<S> = dyn Fn(&S, &[u8]) -> std::result::Result<(), Vec<Diagnostic>> + Send + Sync;

/// A gateway that compiles schemas through a [`SchemaCache`] and hands
/// documents to a validator function.
pub struct CachedGateway<S> {
    cache: SchemaCache<S>,
    check: Box<Check<S>>,
}

impl<S: Send + Sync> CachedGateway<S> {
    pub fn new<F>(cache: SchemaCache<S>, check: F) -> Self
    where
        F: Fn(&S, &[u8]) -> std::result::Result<(), Vec<Diagnostic>> + Send + Sync + 'static,
    {
        Self {
            cache,
            check: Box::new(check),
        }
    }

    pub fn cache(&self) -> &SchemaCache<S> {
        &self.cache
    }
}

impl<S: Send + Sync> SchemaGateway for CachedGateway<S> {
    fn validate(&self, xml: &[u8], schema_id: &str) -> std::result::Result<(), Vec<Diagnostic>> {
        let schema = self
            .cache
            .get(schema_id)
            .map_err(|e| vec![Diagnostic::new(e.to_string())])?;
        (self.check)(&schema, xml)
    }
}
