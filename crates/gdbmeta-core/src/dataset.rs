//! Table and feature class descriptors.
//!
//! Both are plain snapshots: they are rebuilt on every enumeration call and
//! carry no handle back to the container.

use crate::props::{Properties, PropertyValue};

/// One column of a dataset: name plus declared type.
///
/// The declared type is whatever the backend can see — a translated esri
/// token or a raw SQL column type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// Column name.
    pub name: String,
    /// Declared type.
    pub field_type: String,
}

/// A non-spatial table.
#[derive(Debug, Clone)]
pub struct TableInfo {
    /// Table name as the catalog (or SQL schema) names it.
    pub name: String,
    /// Display alias; empty when the backend cannot see one.
    pub alias: String,
    /// Column list.
    pub fields: Vec<FieldSchema>,
    /// Row count computed at enumeration time.
    pub row_count: i64,
}

impl TableInfo {
    /// Fixed-order property projection (see [`crate::mappings::TABLE_PROPS`]).
    #[must_use]
    pub fn pretty_props(&self) -> Properties {
        let mut props = Properties::new();
        props.push("Name", PropertyValue::text(&self.name));
        props.push("Alias", PropertyValue::text(&self.alias));
        props.push("Fields", fields_value(&self.fields));
        props.push("Row count", PropertyValue::Int(self.row_count));
        props
    }
}

/// A spatial dataset: geometry plus attributes.
#[derive(Debug, Clone)]
pub struct FeatureClassInfo {
    /// Feature class name.
    pub name: String,
    /// Display alias; empty when the backend cannot see one.
    pub alias: String,
    /// Geometry type label; empty when the backend cannot see it.
    pub geometry_type: String,
    /// Spatial reference label; empty when the backend cannot see it.
    pub spatial_reference: String,
    /// Column list.
    pub fields: Vec<FieldSchema>,
    /// Row count computed at enumeration time.
    pub row_count: i64,
    /// Name of the containing feature dataset; empty at the root and on
    /// backends that cannot resolve containment.
    pub feature_dataset: String,
}

impl FeatureClassInfo {
    /// Fixed-order property projection (see [`crate::mappings::FC_PROPS`]).
    #[must_use]
    pub fn pretty_props(&self) -> Properties {
        let mut props = Properties::new();
        props.push("Name", PropertyValue::text(&self.name));
        props.push("Alias", PropertyValue::text(&self.alias));
        props.push("Geometry type", PropertyValue::text(&self.geometry_type));
        props.push("Spatial reference", PropertyValue::text(&self.spatial_reference));
        props.push("Fields", fields_value(&self.fields));
        props.push("Row count", PropertyValue::Int(self.row_count));
        props.push("Feature dataset", PropertyValue::text(&self.feature_dataset));
        props
    }
}

fn fields_value(fields: &[FieldSchema]) -> PropertyValue {
    if fields.is_empty() {
        PropertyValue::Empty
    } else {
        PropertyValue::Pairs(
            fields
                .iter()
                .map(|field| (field.name.clone(), field.field_type.clone()))
                .collect(),
        )
    }
}
