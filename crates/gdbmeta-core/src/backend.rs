//! Backend selection and the common introspection interface.
//!
//! A container is read through exactly one backend, chosen when the
//! accessor is constructed: the structured catalog walk when the Esri
//! system tables are present, the generic SQL walk otherwise. Query methods
//! never re-probe or branch; the decision is made once and injected.

use std::fmt;
use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::dataset::{FeatureClassInfo, FieldSchema, TableInfo};
use crate::domain::Domain;
use crate::error::{GdbError, Result};
use crate::mappings::WorkspaceType;

/// The two interchangeable ways of reading a geodatabase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Structured enumeration through the Esri system catalog
    /// (`GDB_Items` joined to `GDB_ItemTypes`). The richer path: it alone
    /// resolves feature-dataset membership and workspace metadata.
    Catalog,
    /// Generic SQLite enumeration over `sqlite_master` and whichever
    /// geometry-column registry the container carries. Works for any
    /// SQLite-backed container, with a flat view of its layers.
    Generic,
}

impl BackendKind {
    /// Short name used on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Catalog => "catalog",
            BackendKind::Generic => "generic",
        }
    }

    /// One-line description for listings.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            BackendKind::Catalog => "Structured walk of the Esri system catalog",
            BackendKind::Generic => "Generic SQLite table and layer enumeration",
        }
    }

    /// Pick the richest backend the container supports.
    pub(crate) fn probe(conn: &Connection) -> rusqlite::Result<BackendKind> {
        if table_exists(conn, "GDB_Items")? && table_exists(conn, "GDB_ItemTypes")? {
            Ok(BackendKind::Catalog)
        } else {
            Ok(BackendKind::Generic)
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The interface both backends implement. All methods re-enumerate on each
/// call; nothing is cached between calls.
pub(crate) trait Backend {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;
    /// Release label of the container, empty when unresolvable.
    fn release(&self) -> Result<String>;
    /// Storage format variant.
    fn workspace_type(&self) -> Result<WorkspaceType>;
    /// All attribute domains.
    fn domains(&self) -> Result<Vec<Domain>>;
    /// All non-spatial tables.
    fn tables(&self) -> Result<Vec<TableInfo>>;
    /// All spatial layers.
    fn feature_classes(&self) -> Result<Vec<FeatureClassInfo>>;
}

/// Open a read-only connection to the container.
pub(crate) fn open_connection(path: &Path) -> Result<Connection> {
    Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(|source| {
        GdbError::Open {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Case-insensitive table existence check.
pub(crate) fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
        [name],
        |row| row.get::<_, i64>(0),
    )
    .map(|count| count > 0)
}

/// Double-quote an identifier for embedding into SQL text.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Count the rows of a table.
pub(crate) fn row_count(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", quote_ident(table)),
        [],
        |row| row.get(0),
    )
}

/// Column names and declared types of a table, in column order.
///
/// An unknown table yields an empty list rather than an error; callers that
/// need existence guarantees get them from [`row_count`].
pub(crate) fn table_fields(conn: &Connection, table: &str) -> rusqlite::Result<Vec<FieldSchema>> {
    let mut stmt = conn.prepare("SELECT name, type FROM pragma_table_info(?1)")?;
    let rows = stmt.query_map([table], |row| {
        Ok(FieldSchema {
            name: row.get(0)?,
            field_type: row.get(1)?,
        })
    })?;
    rows.collect()
}
