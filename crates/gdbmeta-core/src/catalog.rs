//! Structured enumeration through the Esri system catalog.
//!
//! `GDB_Items` holds one row per catalog object with a serialized XML
//! definition; `GDB_ItemTypes` names each object's type. Joining the two
//! gives a typed object listing, and the catalog path of an item encodes
//! feature-dataset containment (`\WaterNetwork\Mains` is a member of
//! `WaterNetwork`, `\Hydrants` lives at the root).

use std::path::Path;

use rusqlite::Connection;
use tracing::warn;

use crate::backend::{self, Backend, BackendKind};
use crate::dataset::{FeatureClassInfo, TableInfo};
use crate::definition::{
    DomainDefinition, FeatureClassDefinition, WorkspaceDefinition, XmlElement,
};
use crate::domain::Domain;
use crate::error::{GdbError, Result};
use crate::mappings::{self, WorkspaceType};

const ITEM_TYPE_WORKSPACE: &str = "Workspace";
const ITEM_TYPE_TABLE: &str = "Table";
const ITEM_TYPE_FEATURE_CLASS: &str = "Feature Class";
const ITEM_TYPE_FEATURE_DATASET: &str = "Feature Dataset";
const ITEM_TYPE_CODED_DOMAIN: &str = "Coded Value Domain";
const ITEM_TYPE_RANGE_DOMAIN: &str = "Range Domain";

/// One row of `GDB_Items`, as far as this backend cares.
struct CatalogItem {
    name: String,
    physical_name: String,
    path: String,
    definition: String,
}

pub(crate) struct CatalogBackend {
    conn: Connection,
}

impl CatalogBackend {
    /// Wrap an open connection, verifying the system catalog is present.
    pub(crate) fn over(conn: Connection, path: &Path) -> Result<Self> {
        for required in ["GDB_Items", "GDB_ItemTypes"] {
            if !backend::table_exists(&conn, required)? {
                return Err(GdbError::BackendUnavailable {
                    kind: BackendKind::Catalog,
                    path: path.to_path_buf(),
                    reason: format!("system table '{required}' is missing"),
                });
            }
        }
        Ok(CatalogBackend { conn })
    }

    /// Rows of `GDB_Items` holding the given item type, in catalog order.
    fn items_of_type(&self, type_name: &str) -> Result<Vec<CatalogItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT i.Name, i.PhysicalName, i.Path, i.Definition \
             FROM GDB_Items i JOIN GDB_ItemTypes t ON i.Type = t.UUID \
             WHERE t.Name = ?1 ORDER BY i.rowid",
        )?;
        let rows = stmt.query_map([type_name], |row| {
            Ok(CatalogItem {
                name: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                physical_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                path: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                definition: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn workspace_definition(&self) -> Result<WorkspaceDefinition> {
        for item in self.items_of_type(ITEM_TYPE_WORKSPACE)? {
            if item.definition.is_empty() {
                continue;
            }
            let root = XmlElement::parse(&item.definition)?;
            if root.tag == WorkspaceDefinition::ROOT_TAG {
                return Ok(WorkspaceDefinition::from_element(&root));
            }
        }
        Ok(WorkspaceDefinition::default())
    }

    /// The SQL table backing an item. Physical names may carry a schema
    /// prefix (`main.ASSETS`); the bare table name is what SQLite resolves.
    fn physical_table(item: &CatalogItem) -> &str {
        let physical = if item.physical_name.is_empty() {
            item.name.as_str()
        } else {
            item.physical_name.as_str()
        };
        physical.rsplit('.').next().unwrap_or(physical)
    }

    /// Feature dataset a catalog path belongs to; empty at the root.
    fn dataset_of(path: &str) -> &str {
        let mut parts = path.split('\\').filter(|part| !part.is_empty());
        let first = parts.next().unwrap_or("");
        if parts.next().is_some() { first } else { "" }
    }

    fn describe_table(&self, item: &CatalogItem) -> Result<TableInfo> {
        let physical = Self::physical_table(item);
        let fields = backend::table_fields(&self.conn, physical)?;
        let row_count = backend::row_count(&self.conn, physical)?;
        let alias = Self::alias_from_definition(&item.definition)?;
        Ok(TableInfo {
            name: item.name.clone(),
            alias,
            fields,
            row_count,
        })
    }

    fn alias_from_definition(definition: &str) -> Result<String> {
        if definition.is_empty() {
            return Ok(String::new());
        }
        let root = XmlElement::parse(definition)?;
        Ok(root.child_text("AliasName").unwrap_or("").to_string())
    }

    fn describe_feature_class(&self, item: &CatalogItem, dataset: &str) -> Result<FeatureClassInfo> {
        let physical = Self::physical_table(item);
        let fields = backend::table_fields(&self.conn, physical)?;
        let row_count = backend::row_count(&self.conn, physical)?;
        let def = if item.definition.is_empty() {
            FeatureClassDefinition::default()
        } else {
            FeatureClassDefinition::from_element(&XmlElement::parse(&item.definition)?)
        };
        Ok(FeatureClassInfo {
            name: item.name.clone(),
            alias: def.alias.unwrap_or_default(),
            geometry_type: def
                .shape_type
                .as_deref()
                .map(|token| mappings::geometry_type_label(token).to_string())
                .unwrap_or_default(),
            spatial_reference: def.spatial_reference.unwrap_or_default(),
            fields,
            row_count,
            feature_dataset: dataset.to_string(),
        })
    }

    fn push_feature_class(&self, out: &mut Vec<FeatureClassInfo>, item: &CatalogItem, dataset: &str) {
        match self.describe_feature_class(item, dataset) {
            Ok(fc) => out.push(fc),
            Err(error) => {
                warn!(feature_class = %item.name, %error, "skipping unreadable feature class");
            },
        }
    }
}

impl Backend for CatalogBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Catalog
    }

    fn release(&self) -> Result<String> {
        Ok(self.workspace_definition()?.release_label().to_string())
    }

    fn workspace_type(&self) -> Result<WorkspaceType> {
        let ws = self.workspace_definition()?;
        Ok(ws
            .factory_progid
            .as_deref()
            .and_then(WorkspaceType::from_factory_progid)
            .unwrap_or(WorkspaceType::Mobile))
    }

    fn domains(&self) -> Result<Vec<Domain>> {
        let mut domains = Vec::new();
        for type_name in [ITEM_TYPE_CODED_DOMAIN, ITEM_TYPE_RANGE_DOMAIN] {
            for item in self.items_of_type(type_name)? {
                if item.definition.is_empty() {
                    continue;
                }
                let root = XmlElement::parse(&item.definition)?;
                if let Some(def) = DomainDefinition::from_element(&root)? {
                    domains.push(Domain::from_definition(def));
                }
            }
        }
        Ok(domains)
    }

    fn tables(&self) -> Result<Vec<TableInfo>> {
        let mut tables = Vec::new();
        for item in self.items_of_type(ITEM_TYPE_TABLE)? {
            match self.describe_table(&item) {
                Ok(table) => tables.push(table),
                Err(error) => warn!(table = %item.name, %error, "skipping unreadable table"),
            }
        }
        Ok(tables)
    }

    fn feature_classes(&self) -> Result<Vec<FeatureClassInfo>> {
        let items = self.items_of_type(ITEM_TYPE_FEATURE_CLASS)?;
        let datasets: Vec<String> = self
            .items_of_type(ITEM_TYPE_FEATURE_DATASET)?
            .into_iter()
            .map(|dataset| dataset.name)
            .collect();

        let mut fcs = Vec::new();
        // Members of each feature dataset first, then the root-level classes.
        for dataset in &datasets {
            for item in items.iter().filter(|item| Self::dataset_of(&item.path) == dataset.as_str()) {
                self.push_feature_class(&mut fcs, item, dataset);
            }
        }
        for item in items.iter().filter(|item| Self::dataset_of(&item.path).is_empty()) {
            self.push_feature_class(&mut fcs, item, "");
        }
        Ok(fcs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_of_catalog_paths() {
        assert_eq!(CatalogBackend::dataset_of(r"\WaterNetwork\Mains"), "WaterNetwork");
        assert_eq!(CatalogBackend::dataset_of(r"\Hydrants"), "");
        assert_eq!(CatalogBackend::dataset_of(""), "");
    }

    #[test]
    fn test_physical_table_strips_schema_prefix() {
        let item = CatalogItem {
            name: "Assets".to_string(),
            physical_name: "main.ASSETS".to_string(),
            path: String::new(),
            definition: String::new(),
        };
        assert_eq!(CatalogBackend::physical_table(&item), "ASSETS");

        let unnamed = CatalogItem {
            name: "Assets".to_string(),
            physical_name: String::new(),
            path: String::new(),
            definition: String::new(),
        };
        assert_eq!(CatalogBackend::physical_table(&unnamed), "Assets");
    }
}
