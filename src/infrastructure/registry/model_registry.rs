//! Model Registry
//!
//! Holds the live model instances of a process, keyed by qualified name.
//!
//! One registry per process is reached through [`ModelRegistry::instance`].
//! Creation of that instance is guarded by a mutex held only for the
//! check-and-create step. Each registry operation takes the entry lock for
//! its own duration, but sequences of operations (check then remove, get then
//! decorate) are not atomic across threads; callers that need that must
//! synchronise externally.

use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use super::catalog::{ModelCatalog, ModelResolver};
use crate::domain::{
    MlModel, ModelDetails, ModelError, ModelMetadata, ModelResult, ModelWrapper,
    validate_qualified_name,
};

static INSTANCE: Mutex<Option<Arc<ModelRegistry>>> = Mutex::new(None);

/// Entry in the model registry
#[derive(Debug)]
struct RegistryEntry {
    /// Qualified name read when the model was added
    qualified_name: String,

    /// Bare model or decorator chain
    model: Arc<dyn MlModel>,
}

/// Registry of live model instances
#[derive(Debug)]
pub struct ModelRegistry {
    /// Entries in insertion order
    entries: RwLock<Vec<RegistryEntry>>,

    /// Constructors used by `load_model`
    catalog: ModelCatalog,
}

impl ModelRegistry {
    /// Create a standalone registry with the builtin catalog
    pub fn new() -> Self {
        Self::with_catalog(ModelCatalog::builtin())
    }

    /// Create a standalone registry resolving references through `catalog`
    pub fn with_catalog(catalog: ModelCatalog) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            catalog,
        }
    }

    /// The process-wide registry, created on first access
    pub fn instance() -> Arc<ModelRegistry> {
        let mut slot = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);

        slot.get_or_insert_with(|| {
            info!("Creating process model registry");
            Arc::new(ModelRegistry::new())
        })
        .clone()
    }

    /// Empty the process-wide registry and forget it; the next `instance()`
    /// call creates a fresh one
    pub fn clear_instance() {
        let previous = INSTANCE
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(registry) = previous {
            registry.clear();
            info!("Cleared process model registry");
        }
    }

    /// Constructors available to `load_model`
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Register a model under its qualified name
    pub fn add_model(&self, model: Arc<dyn MlModel>) -> ModelResult<()> {
        let qualified_name = model.qualified_name()?;
        validate_qualified_name(&qualified_name)?;

        let mut entries = self.write_entries()?;

        if entries.iter().any(|e| e.qualified_name == qualified_name) {
            return Err(ModelError::already_registered(qualified_name));
        }

        info!(
            qualified_name = %qualified_name,
            model = %model.repr(),
            "Registering model"
        );

        entries.push(RegistryEntry {
            qualified_name,
            model,
        });

        Ok(())
    }

    /// Construct a model from a dotted reference using the registry's catalog
    /// and register it
    pub fn load_model(&self, reference: &str) -> ModelResult<()> {
        self.load_model_with(&self.catalog, reference)
    }

    /// Construct a model from a dotted reference using `resolver` and
    /// register it; nothing is registered if any step fails
    pub fn load_model_with(
        &self,
        resolver: &dyn ModelResolver,
        reference: &str,
    ) -> ModelResult<()> {
        debug!(reference = %reference, "Loading model");

        let factory = resolver.resolve(reference)?;
        let model = factory().map_err(|e| ModelError::resolution(reference, e.to_string()))?;

        self.add_model(model)
    }

    /// Deregister a model
    pub fn remove_model(&self, qualified_name: &str) -> ModelResult<()> {
        let mut entries = self.write_entries()?;

        let position = entries
            .iter()
            .position(|e| e.qualified_name == qualified_name)
            .ok_or_else(|| ModelError::not_found(qualified_name))?;

        entries.remove(position);
        info!(qualified_name = %qualified_name, "Removed model");

        Ok(())
    }

    /// Get the live model (possibly a decorator chain)
    pub fn get_model(&self, qualified_name: &str) -> ModelResult<Arc<dyn MlModel>> {
        let entries = self.read_entries()?;

        entries
            .iter()
            .find(|e| e.qualified_name == qualified_name)
            .map(|e| e.model.clone())
            .ok_or_else(|| ModelError::not_found(qualified_name))
    }

    /// Details of every registered model, in insertion order
    pub fn get_models(&self) -> ModelResult<Vec<ModelDetails>> {
        let models: Vec<Arc<dyn MlModel>> = {
            let entries = self.read_entries()?;
            entries.iter().map(|e| e.model.clone()).collect()
        };

        models.iter().map(|m| m.details()).collect()
    }

    /// Full metadata of one model, including rendered schemas where declared
    pub fn get_model_metadata(&self, qualified_name: &str) -> ModelResult<ModelMetadata> {
        self.get_model(qualified_name)?.metadata()
    }

    /// Wrap the registered model with `decorator` and store the decorator in
    /// its place
    ///
    /// The entry stays keyed by the qualified name read at `add_model`. A
    /// decorator that rewrites `qualified_name` changes what `get_models`
    /// lists, but the model is still fetched and removed under the old name.
    pub fn add_decorator<W>(&self, qualified_name: &str, mut decorator: W) -> ModelResult<()>
    where
        W: ModelWrapper + 'static,
    {
        let mut entries = self.write_entries()?;

        let entry = entries
            .iter_mut()
            .find(|e| e.qualified_name == qualified_name)
            .ok_or_else(|| ModelError::not_found(qualified_name))?;

        decorator.set_model(entry.model.clone());
        entry.model = Arc::new(decorator);

        info!(
            qualified_name = %qualified_name,
            model = %entry.model.repr(),
            "Decorated model"
        );

        Ok(())
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.read_entries()
            .map(|entries| entries.iter().any(|e| e.qualified_name == qualified_name))
            .unwrap_or(false)
    }

    /// Qualified names in insertion order
    pub fn qualified_names(&self) -> Vec<String> {
        self.read_entries()
            .map(|entries| entries.iter().map(|e| e.qualified_name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.read_entries().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every registered model
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        debug!(count = entries.len(), "Clearing model registry");
        entries.clear();
    }

    fn read_entries(&self) -> ModelResult<RwLockReadGuard<'_, Vec<RegistryEntry>>> {
        self.entries
            .read()
            .map_err(|_| ModelError::internal("Failed to acquire registry lock"))
    }

    fn write_entries(&self) -> ModelResult<RwLockWriteGuard<'_, Vec<RegistryEntry>>> {
        self.entries
            .write()
            .map_err(|_| ModelError::internal("Failed to acquire registry lock"))
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
