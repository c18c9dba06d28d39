//! `gdbmeta-core` reads descriptive metadata out of Esri geodatabase
//! containers: release version, workspace type, attribute domains, tables
//! and feature classes.
//!
//! Two backends serve the same interface. The **catalog** backend walks the
//! Esri system catalog (`GDB_Items` joined to `GDB_ItemTypes`) and is the
//! richer path; the **generic** backend enumerates any SQLite-backed
//! container through `sqlite_master` and its geometry-column registry. One
//! backend is selected when the accessor is constructed, and both project
//! their results through the same fixed label tables, so the output shape is
//! identical either way.
//!
//! ```no_run
//! use gdbmeta_core::Geodatabase;
//!
//! # fn main() -> gdbmeta_core::Result<()> {
//! let gdb = Geodatabase::open("water_utility.geodatabase")?;
//! for (label, value) in gdb.pretty_props().iter() {
//!     println!("{label}: {value}");
//! }
//! for domain in gdb.domains()? {
//!     println!("{} ({})", domain.name, domain.kind.as_str());
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
mod catalog;
pub mod dataset;
pub mod definition;
pub mod domain;
pub mod error;
pub mod gdb;
mod generic;
pub mod mappings;
pub mod props;

pub use backend::BackendKind;
pub use dataset::{FeatureClassInfo, FieldSchema, TableInfo};
pub use domain::{Domain, DomainKind};
pub use error::{DefinitionError, GdbError, Result};
pub use gdb::{Geodatabase, available_backends};
pub use mappings::WorkspaceType;
pub use props::{Properties, PropertyValue};
