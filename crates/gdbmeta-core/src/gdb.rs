//! The geodatabase accessor.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::backend::{self, Backend, BackendKind};
use crate::catalog::CatalogBackend;
use crate::dataset::{FeatureClassInfo, TableInfo};
use crate::domain::Domain;
use crate::error::Result;
use crate::generic::GenericBackend;
use crate::mappings::WorkspaceType;
use crate::props::{Properties, PropertyValue};

/// Read-only accessor over one geodatabase container.
///
/// Opening resolves the backend and the workspace-level metadata once; the
/// query methods re-enumerate the container on every call and cache
/// nothing. Two accessors opened on the same path report the same release
/// and workspace type.
pub struct Geodatabase {
    path: PathBuf,
    release: String,
    workspace_type: WorkspaceType,
    backend: Box<dyn Backend>,
}

impl std::fmt::Debug for Geodatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geodatabase")
            .field("path", &self.path)
            .field("release", &self.release)
            .field("workspace_type", &self.workspace_type)
            .finish()
    }
}

impl Geodatabase {
    /// Open `path`, selecting the richest backend the container supports.
    ///
    /// # Errors
    ///
    /// Fails when the path cannot be opened as a SQLite container, or when
    /// resolving the workspace metadata fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Geodatabase> {
        let path = path.as_ref();
        let conn = backend::open_connection(path)?;
        let kind = BackendKind::probe(&conn)?;
        Self::with_backend(path, kind, conn)
    }

    /// Open `path` with an explicitly chosen backend instead of probing.
    ///
    /// # Errors
    ///
    /// Fails like [`Geodatabase::open`], and additionally with
    /// [`crate::GdbError::BackendUnavailable`] when the container lacks
    /// what the requested backend needs.
    pub fn open_with(path: impl AsRef<Path>, kind: BackendKind) -> Result<Geodatabase> {
        let path = path.as_ref();
        let conn = backend::open_connection(path)?;
        Self::with_backend(path, kind, conn)
    }

    fn with_backend(path: &Path, kind: BackendKind, conn: Connection) -> Result<Geodatabase> {
        let backend: Box<dyn Backend> = match kind {
            BackendKind::Catalog => Box::new(CatalogBackend::over(conn, path)?),
            BackendKind::Generic => Box::new(GenericBackend::over(conn)),
        };
        let release = backend.release()?;
        let workspace_type = backend.workspace_type()?;
        Ok(Geodatabase {
            path: path.to_path_buf(),
            release,
            workspace_type,
            backend,
        })
    }

    /// Path the accessor was opened on.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release label, empty when the container's version is unknown.
    #[must_use]
    pub fn release(&self) -> &str {
        &self.release
    }

    /// Storage format variant.
    #[must_use]
    pub fn workspace_type(&self) -> WorkspaceType {
        self.workspace_type
    }

    /// Which backend serves this accessor.
    #[must_use]
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Fixed-order projection of the accessor's own attributes (see
    /// [`crate::mappings::GDB_PROPS`]). Pure; touches no I/O.
    #[must_use]
    pub fn pretty_props(&self) -> Properties {
        let mut props = Properties::new();
        props.push("Path", PropertyValue::text(&self.path.display().to_string()));
        props.push("Release", PropertyValue::text(&self.release));
        props.push(
            "Workspace type",
            PropertyValue::Text(self.workspace_type.as_str().to_string()),
        );
        props
    }

    /// All attribute domains.
    ///
    /// # Errors
    ///
    /// Fails when the catalog cannot be queried or a domain definition is
    /// malformed; malformed definitions are not skipped.
    pub fn domains(&self) -> Result<Vec<Domain>> {
        self.backend.domains()
    }

    /// All non-spatial tables. Unreadable tables are logged and skipped.
    ///
    /// # Errors
    ///
    /// Fails only when the enumeration itself cannot run; per-table
    /// failures do not surface here.
    pub fn tables(&self) -> Result<Vec<TableInfo>> {
        self.backend.tables()
    }

    /// All spatial layers, feature-dataset members first (catalog backend),
    /// each tagged with its dataset name. Unreadable layers are logged and
    /// skipped.
    ///
    /// # Errors
    ///
    /// Fails only when the enumeration itself cannot run; per-layer
    /// failures do not surface here.
    pub fn feature_classes(&self) -> Result<Vec<FeatureClassInfo>> {
        self.backend.feature_classes()
    }
}

/// Backends able to serve the container at `path`, richest first. The
/// first entry is what [`Geodatabase::open`] would select.
///
/// # Errors
///
/// Fails when the path cannot be opened as a SQLite container.
pub fn available_backends(path: impl AsRef<Path>) -> Result<Vec<BackendKind>> {
    let conn = backend::open_connection(path.as_ref())?;
    let mut kinds = Vec::new();
    if BackendKind::probe(&conn)? == BackendKind::Catalog {
        kinds.push(BackendKind::Catalog);
    }
    kinds.push(BackendKind::Generic);
    Ok(kinds)
}
