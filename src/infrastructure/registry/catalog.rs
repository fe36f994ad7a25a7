//! Load-by-reference support
//!
//! Models are looked up by a dotted reference such as
//! `ml_base.models.IrisModel`. Instead of importing code at runtime, the
//! references map to constructor functions registered at startup.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::domain::{MlModel, ModelError, ModelResult};
use crate::infrastructure::models::IrisModel;

#[cfg(test)]
use mockall::automock;

/// Constructor for a model, called with no arguments
pub type ModelFactory = Arc<dyn Fn() -> ModelResult<Arc<dyn MlModel>> + Send + Sync>;

/// Reference under which the builtin iris model is registered
pub const IRIS_MODEL_REFERENCE: &str = "ml_base.models.IrisModel";

/// Dotted path with at least a module and an attribute segment
static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)+$").unwrap()
});

/// Resolves a dotted reference to a model constructor
#[cfg_attr(test, automock)]
pub trait ModelResolver: Send + Sync {
    fn resolve(&self, reference: &str) -> ModelResult<ModelFactory>;
}

/// In-process mapping from dotted references to model constructors
pub struct ModelCatalog {
    factories: RwLock<HashMap<String, ModelFactory>>,
}

impl ModelCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
        }
    }

    /// Catalog holding the models shipped with this crate
    pub fn builtin() -> Self {
        let mut factories: HashMap<String, ModelFactory> = HashMap::new();
        factories.insert(IRIS_MODEL_REFERENCE.to_string(), Arc::new(iris_model));

        Self {
            factories: RwLock::new(factories),
        }
    }

    /// Register a constructor under `reference`, replacing any previous one
    pub fn register<F>(&self, reference: &str, factory: F) -> ModelResult<()>
    where
        F: Fn() -> ModelResult<Arc<dyn MlModel>> + Send + Sync + 'static,
    {
        validate_reference(reference)?;

        let mut factories = self
            .factories
            .write()
            .map_err(|_| ModelError::internal("Failed to acquire catalog lock"))?;

        if factories
            .insert(reference.to_string(), Arc::new(factory))
            .is_some()
        {
            warn!(reference = %reference, "Replacing registered model constructor");
        } else {
            debug!(reference = %reference, "Registered model constructor");
        }

        Ok(())
    }

    /// Register a model type constructed through `Default`
    pub fn register_default<M>(&self, reference: &str) -> ModelResult<()>
    where
        M: MlModel + Default + 'static,
    {
        self.register(reference, || Ok(Arc::new(M::default()) as Arc<dyn MlModel>))
    }

    /// Registered references, sorted
    pub fn references(&self) -> Vec<String> {
        let mut references: Vec<String> = match self.factories.read() {
            Ok(factories) => factories.keys().cloned().collect(),
            Err(_) => Vec::new(),
        };
        references.sort();
        references
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.factories
            .read()
            .map(|factories| factories.contains_key(reference))
            .unwrap_or(false)
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for ModelCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCatalog")
            .field("references", &self.references())
            .finish()
    }
}

impl ModelResolver for ModelCatalog {
    fn resolve(&self, reference: &str) -> ModelResult<ModelFactory> {
        validate_reference(reference)?;

        let factories = self
            .factories
            .read()
            .map_err(|_| ModelError::internal("Failed to acquire catalog lock"))?;

        if let Some(factory) = factories.get(reference) {
            return Ok(factory.clone());
        }

        Err(ModelError::resolution(
            reference,
            describe_missing(factories.keys().map(String::as_str), reference),
        ))
    }
}

fn iris_model() -> ModelResult<Arc<dyn MlModel>> {
    Ok(Arc::new(IrisModel::new()))
}

/// Validate the shape of a dotted reference
pub fn validate_reference(reference: &str) -> ModelResult<()> {
    if REFERENCE_PATTERN.is_match(reference) {
        Ok(())
    } else {
        Err(ModelError::resolution(
            reference,
            "malformed reference: expected a dotted path like 'package.module.ClassName'",
        ))
    }
}

/// Explain which part of `reference` is unknown: the deepest missing module,
/// or the attribute when its module is known
fn describe_missing<'a>(known: impl Iterator<Item = &'a str> + Clone, reference: &str) -> String {
    let (module, attribute) = reference
        .rsplit_once('.')
        .unwrap_or(("", reference));

    let segments: Vec<&str> = module.split('.').collect();
    for depth in 1..=segments.len() {
        let prefix = segments[..depth].join(".");
        let dotted = format!("{prefix}.");
        if !known.clone().any(|r| r.starts_with(&dotted)) {
            return format!("no module named '{prefix}'");
        }
    }

    format!("module '{module}' has no attribute '{attribute}'")
}
