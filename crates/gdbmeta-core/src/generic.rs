//! Generic SQLite enumeration.
//!
//! The fallback when the full Esri system catalog is absent (or explicitly
//! bypassed): user tables come from `sqlite_master`, spatial layers from
//! whichever geometry-column registry the container carries, and domains
//! from a raw scan of `GDB_Items` classified by XML root tag. The view is
//! flat — feature-dataset membership is not recoverable on this path.

use rusqlite::Connection;
use tracing::warn;

use crate::backend::{self, Backend, BackendKind};
use crate::dataset::{FeatureClassInfo, TableInfo};
use crate::definition::{DomainDefinition, WorkspaceDefinition, XmlElement};
use crate::domain::Domain;
use crate::error::Result;
use crate::mappings::WorkspaceType;

/// Table-name prefixes that mark internal bookkeeping tables, lowercase.
const SYSTEM_PREFIXES: &[&str] = &["gdb_", "st_", "gpkg_", "sqlite_", "rtree_", "idx_"];

/// A spatial layer as the geometry-column registry describes it.
struct SpatialLayer {
    name: String,
    geometry_type: String,
    spatial_reference: String,
}

pub(crate) struct GenericBackend {
    conn: Connection,
}

impl GenericBackend {
    /// Wrap an open connection. Always available: any SQLite database can
    /// be walked this way.
    pub(crate) fn over(conn: Connection) -> Self {
        GenericBackend { conn }
    }

    fn is_system_table(name: &str) -> bool {
        let lowered = name.to_ascii_lowercase();
        SYSTEM_PREFIXES
            .iter()
            .any(|prefix| lowered.starts_with(prefix))
    }

    /// All non-internal tables, in name order.
    fn user_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut names = Vec::new();
        for row in rows {
            let name = row?;
            if !Self::is_system_table(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Spatial layers from the container's geometry-column registry.
    ///
    /// GeoPackage registries carry geometry type and spatial reference;
    /// the Esri ST registry only names the layers.
    fn spatial_layers(&self) -> Result<Vec<SpatialLayer>> {
        if backend::table_exists(&self.conn, "gpkg_geometry_columns")? {
            let mut stmt = self.conn.prepare(
                "SELECT g.table_name, g.geometry_type_name, s.srs_name \
                 FROM gpkg_geometry_columns g \
                 LEFT JOIN gpkg_spatial_ref_sys s ON g.srs_id = s.srs_id \
                 ORDER BY g.table_name",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(SpatialLayer {
                    name: row.get(0)?,
                    geometry_type: title_case(
                        &row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    ),
                    spatial_reference: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })?;
            return Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?);
        }
        if backend::table_exists(&self.conn, "st_geometry_columns")? {
            let mut stmt = self
                .conn
                .prepare("SELECT table_name FROM st_geometry_columns ORDER BY table_name")?;
            let rows = stmt.query_map([], |row| {
                Ok(SpatialLayer {
                    name: row.get(0)?,
                    geometry_type: String::new(),
                    spatial_reference: String::new(),
                })
            })?;
            return Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?);
        }
        Ok(Vec::new())
    }

    /// Raw scan of `GDB_Items` definitions, when that table exists at all.
    fn scan_definitions(&self) -> Result<Vec<XmlElement>> {
        if !backend::table_exists(&self.conn, "GDB_Items")? {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare("SELECT Definition FROM GDB_Items")?;
        let rows = stmt.query_map([], |row| row.get::<_, Option<String>>(0))?;
        let mut definitions = Vec::new();
        for row in rows {
            let Some(definition) = row? else { continue };
            if definition.is_empty() {
                continue;
            }
            definitions.push(XmlElement::parse(&definition)?);
        }
        Ok(definitions)
    }

    fn describe_table(&self, name: &str) -> Result<TableInfo> {
        let fields = backend::table_fields(&self.conn, name)?;
        let row_count = backend::row_count(&self.conn, name)?;
        Ok(TableInfo {
            name: name.to_string(),
            alias: String::new(),
            fields,
            row_count,
        })
    }
}

impl Backend for GenericBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Generic
    }

    fn release(&self) -> Result<String> {
        for root in self.scan_definitions()? {
            if root.tag == WorkspaceDefinition::ROOT_TAG {
                return Ok(WorkspaceDefinition::from_element(&root)
                    .release_label()
                    .to_string());
            }
        }
        Ok(String::new())
    }

    fn workspace_type(&self) -> Result<WorkspaceType> {
        // The workspace factory ProgID is only visible to the catalog walk;
        // everything this backend reads is a SQLite-backed container.
        Ok(WorkspaceType::Mobile)
    }

    fn domains(&self) -> Result<Vec<Domain>> {
        let mut domains = Vec::new();
        for root in self.scan_definitions()? {
            if let Some(def) = DomainDefinition::from_element(&root)? {
                domains.push(Domain::from_definition(def));
            }
        }
        Ok(domains)
    }

    fn tables(&self) -> Result<Vec<TableInfo>> {
        let spatial: Vec<String> = self
            .spatial_layers()?
            .into_iter()
            .map(|layer| layer.name)
            .collect();
        let mut tables = Vec::new();
        for name in self.user_tables()? {
            if spatial.iter().any(|layer| layer.eq_ignore_ascii_case(&name)) {
                continue;
            }
            match self.describe_table(&name) {
                Ok(table) => tables.push(table),
                Err(error) => warn!(table = %name, %error, "skipping unreadable table"),
            }
        }
        Ok(tables)
    }

    fn feature_classes(&self) -> Result<Vec<FeatureClassInfo>> {
        let mut fcs = Vec::new();
        for layer in self.spatial_layers()? {
            let described = self.describe_table(&layer.name);
            match described {
                Ok(table) => fcs.push(FeatureClassInfo {
                    name: table.name,
                    alias: String::new(),
                    geometry_type: layer.geometry_type,
                    spatial_reference: layer.spatial_reference,
                    fields: table.fields,
                    row_count: table.row_count,
                    feature_dataset: String::new(),
                }),
                Err(error) => {
                    warn!(feature_class = %layer.name, %error, "skipping unreadable feature class");
                },
            }
        }
        Ok(fcs)
    }
}

/// `MULTIPOLYGON` → `Multipolygon`; registry tokens are shouty by
/// convention.
fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
