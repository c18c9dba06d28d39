//! Display utilities for formatting CLI output.
//!
//! This module provides table row structures and formatting functions for
//! presenting geodatabase metadata in a human-readable format.

use tabled::{Table, Tabled};

use gdbmeta_core::{BackendKind, Domain, FeatureClassInfo, Properties, TableInfo};

/// Table row representation for displaying an attribute domain.
#[derive(Tabled)]
pub struct DomainRow {
    /// Domain name.
    #[tabled(rename = "Name")]
    pub name: String,
    /// Coded value or range.
    #[tabled(rename = "Domain type")]
    pub kind: String,
    /// Field type the domain constrains.
    #[tabled(rename = "Field type")]
    pub field_type: String,
    /// Free-form description.
    #[tabled(rename = "Description")]
    pub description: String,
    /// Range bounds or coded-value summary.
    #[tabled(rename = "Values")]
    pub values: String,
}

/// Table row representation for displaying a non-spatial table.
#[derive(Tabled)]
pub struct DatasetRow {
    /// Table name.
    #[tabled(rename = "Name")]
    pub name: String,
    /// Display alias, if any.
    #[tabled(rename = "Alias")]
    pub alias: String,
    /// Number of columns.
    #[tabled(rename = "Fields")]
    pub fields: usize,
    /// Number of rows.
    #[tabled(rename = "Rows")]
    pub rows: i64,
}

/// Table row representation for displaying a feature class.
#[derive(Tabled)]
pub struct FeatureClassRow {
    /// Feature class name.
    #[tabled(rename = "Name")]
    pub name: String,
    /// Geometry type label.
    #[tabled(rename = "Geometry type")]
    pub geometry_type: String,
    /// Spatial reference label.
    #[tabled(rename = "Spatial reference")]
    pub spatial_reference: String,
    /// Number of rows.
    #[tabled(rename = "Rows")]
    pub rows: i64,
    /// Containing feature dataset, if any.
    #[tabled(rename = "Feature dataset")]
    pub feature_dataset: String,
}

/// Table row representation for displaying backend availability.
#[derive(Tabled)]
pub struct BackendRow {
    /// Backend short name.
    #[tabled(rename = "Backend")]
    pub name: String,
    /// One-line description.
    #[tabled(rename = "Description")]
    pub description: String,
    /// Whether `open` would pick this backend.
    #[tabled(rename = "Selected")]
    pub selected: String,
}

/// Print a property list as aligned `label: value` lines.
pub fn print_properties(props: &Properties) {
    for (label, value) in props.iter() {
        println!("{label}: {value}");
    }
}

/// Print the domain listing as a table.
pub fn print_domains(domains: &[Domain]) {
    if domains.is_empty() {
        println!("No attribute domains.");
        return;
    }

    let rows: Vec<DomainRow> = domains
        .iter()
        .map(|domain| DomainRow {
            name: domain.name.clone(),
            kind: domain.kind.as_str().to_string(),
            field_type: domain.field_type.clone(),
            description: domain.description.clone(),
            values: domain_values_summary(domain),
        })
        .collect();

    let table = Table::new(rows).to_string();
    println!("{table}");
}

fn domain_values_summary(domain: &Domain) -> String {
    if let Some((min, max)) = domain.range {
        format!("{min} to {max}")
    } else if domain.coded_values.len() == 1 {
        "1 coded value".to_string()
    } else if !domain.coded_values.is_empty() {
        format!("{} coded values", domain.coded_values.len())
    } else {
        String::new()
    }
}

/// Print the table listing as a table.
pub fn print_tables(tables: &[TableInfo]) {
    if tables.is_empty() {
        println!("No tables.");
        return;
    }

    let rows: Vec<DatasetRow> = tables
        .iter()
        .map(|table| DatasetRow {
            name: table.name.clone(),
            alias: table.alias.clone(),
            fields: table.fields.len(),
            rows: table.row_count,
        })
        .collect();

    let table = Table::new(rows).to_string();
    println!("{table}");
}

/// Print the feature class listing as a table.
pub fn print_feature_classes(fcs: &[FeatureClassInfo]) {
    if fcs.is_empty() {
        println!("No feature classes.");
        return;
    }

    let rows: Vec<FeatureClassRow> = fcs
        .iter()
        .map(|fc| FeatureClassRow {
            name: fc.name.clone(),
            geometry_type: fc.geometry_type.clone(),
            spatial_reference: fc.spatial_reference.clone(),
            rows: fc.row_count,
            feature_dataset: fc.feature_dataset.clone(),
        })
        .collect();

    let table = Table::new(rows).to_string();
    println!("{table}");
}

/// Print backend availability, richest first.
pub fn print_backends(kinds: &[BackendKind]) {
    let rows: Vec<BackendRow> = kinds
        .iter()
        .enumerate()
        .map(|(index, kind)| BackendRow {
            name: kind.as_str().to_string(),
            description: kind.description().to_string(),
            selected: if index == 0 { "yes" } else { "" }.to_string(),
        })
        .collect();

    let table = Table::new(rows).to_string();
    println!("{table}");
}
