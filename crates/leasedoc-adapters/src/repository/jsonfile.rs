//! JSON-file backed template repository.
//!
//! Keeps the whole template set in one JSON document:
//!
//! ```json
//! {
//!   "savedAt": "2026-02-13T10:00:00Z",
//!   "templates": [
//!     { "id": "…", "name": "…", "type": "text", "contents": "…", "html": "…",
//!       "linkedResourceIds": ["L1", "L2"] }
//!   ]
//! }
//! ```
//!
//! The file is read once on open and rewritten after every mutation. Good
//! enough for a single-user CLI; a multi-writer deployment belongs behind a
//! real backing service.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use leasedoc_core::{
    application::{ApplicationError, ports::TemplateRepository},
    domain::{DomainValidator as validator, NewTemplate, ResourceId, Template, TemplateId},
    error::LeasedocResult,
};

/// On-disk shape of the store file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    saved_at: DateTime<Utc>,
    templates: Vec<Template>,
}

/// Template repository persisted to a single JSON file.
pub struct JsonFileRepository {
    path: PathBuf,
    // BTreeMap so the file content is deterministic across runs.
    inner: Mutex<BTreeMap<TemplateId, Template>>,
}

impl JsonFileRepository {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty store; it is written on the first
    /// mutation. A present but unreadable or unparsable file is an error —
    /// silently starting empty would drop the user's templates on the next
    /// save.
    pub fn open(path: impl Into<PathBuf>) -> LeasedocResult<Self> {
        let path = path.into();
        let inner = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| storage_failed(&path, e))?;
            let file: StoreFile =
                serde_json::from_str(&raw).map_err(|e| storage_failed(&path, e))?;
            file.templates
                .into_iter()
                .map(|t| (t.id.clone(), t))
                .collect()
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), "Template store opened");
        Ok(Self {
            path,
            inner: Mutex::new(inner),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full template set back to disk.
    fn persist(&self, items: &BTreeMap<TemplateId, Template>) -> LeasedocResult<()> {
        let file = StoreFile {
            saved_at: Utc::now(),
            templates: items.values().cloned().collect(),
        };
        let raw = serde_json::to_string_pretty(&file)
            .map_err(|e| storage_failed(&self.path, e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| storage_failed(&self.path, e))?;
            }
        }
        fs::write(&self.path, raw).map_err(|e| storage_failed(&self.path, e))
    }
}

fn storage_failed(path: &Path, e: impl std::fmt::Display) -> leasedoc_core::error::LeasedocError {
    ApplicationError::StorageFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

impl TemplateRepository for JsonFileRepository {
    fn create(&self, candidate: &NewTemplate) -> LeasedocResult<Template> {
        validator::validate_candidate(candidate)?;

        let template = Template {
            id: TemplateId::new(Uuid::new_v4().to_string()),
            name: candidate.name.clone(),
            payload: candidate.payload.clone(),
            linked_resource_ids: candidate.linked_resource_ids.clone(),
        };

        let mut inner = self.inner.lock().map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(template.id.clone(), template.clone());
        self.persist(&inner)?;
        Ok(template)
    }

    fn update(&self, template: &Template) -> LeasedocResult<()> {
        validator::validate_template(template)?;

        let mut inner = self.inner.lock().map_err(|_| ApplicationError::StoreLockError)?;
        if !inner.contains_key(&template.id) {
            return Err(ApplicationError::TemplateNotFound {
                id: template.id.to_string(),
            }
            .into());
        }
        inner.insert(template.id.clone(), template.clone());
        self.persist(&inner)
    }

    fn delete(&self, ids: &[TemplateId]) -> LeasedocResult<()> {
        let mut inner = self.inner.lock().map_err(|_| ApplicationError::StoreLockError)?;
        for id in ids {
            inner.remove(id);
        }
        self.persist(&inner)
    }

    fn get(&self, id: &TemplateId) -> LeasedocResult<Template> {
        let inner = self.inner.lock().map_err(|_| ApplicationError::StoreLockError)?;
        inner
            .get(id)
            .cloned()
            .ok_or_else(|| ApplicationError::TemplateNotFound { id: id.to_string() }.into())
    }

    fn items(&self) -> LeasedocResult<Vec<Template>> {
        let inner = self.inner.lock().map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.values().cloned().collect())
    }

    fn find_for_resource(&self, resource: &ResourceId) -> LeasedocResult<Vec<Template>> {
        let inner = self.inner.lock().map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner
            .values()
            .filter(|t| t.is_linked_to(resource))
            .cloned()
            .collect())
    }
}
