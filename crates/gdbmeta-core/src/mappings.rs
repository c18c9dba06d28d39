//! Static lookup tables translating native geodatabase tokens into
//! human-readable labels.
//!
//! Every property-producing method in this crate projects its results
//! through these tables, so the displayed keys and enum labels are fixed and
//! independent of which backend read the container.

/// Geodatabase release labels keyed by the `major,minor,bugfix` version
/// triplet stored in the workspace definition.
///
/// Triplets not listed here resolve to the empty label rather than an error;
/// newer containers should still be readable even when their release is
/// unknown to this table.
const RELEASES: &[(&str, &str)] = &[
    ("2,2,0", "9.2"),
    ("2,3,0", "9.3, 9.3.1"),
    ("3,0,0", "10.0, 10.1, 10.2, 10.3, 10.4, 10.5, 10.6, 10.7, 10.8"),
    ("4,0,0", "ArcGIS Pro 2.x, 3.x"),
];

/// Resolve a version triplet to its release label.
///
/// # Examples
///
/// ```
/// use gdbmeta_core::mappings::release_label;
///
/// assert_eq!(release_label("4", "0", "0"), "ArcGIS Pro 2.x, 3.x");
/// assert_eq!(release_label("99", "0", "0"), "");
/// ```
#[must_use]
pub fn release_label(major: &str, minor: &str, bugfix: &str) -> &'static str {
    let triplet = format!("{major},{minor},{bugfix}");
    RELEASES
        .iter()
        .find(|(candidate, _)| *candidate == triplet)
        .map_or("", |(_, label)| label)
}

/// Storage format variant of a geodatabase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceType {
    /// Access-backed personal geodatabase.
    Personal,
    /// File geodatabase directory.
    File,
    /// RDBMS-backed enterprise geodatabase.
    Enterprise,
    /// SQLite-backed mobile geodatabase.
    Mobile,
}

/// Workspace factory ProgID fragments and the workspace type each denotes.
const WORKSPACE_FACTORIES: &[(&str, WorkspaceType)] = &[
    ("accessworkspacefactory", WorkspaceType::Personal),
    ("filegdbworkspacefactory", WorkspaceType::File),
    ("sdeworkspacefactory", WorkspaceType::Enterprise),
    ("sqliteworkspacefactory", WorkspaceType::Mobile),
];

impl WorkspaceType {
    /// Display label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceType::Personal => "Personal geodatabase",
            WorkspaceType::File => "File geodatabase",
            WorkspaceType::Enterprise => "Enterprise geodatabase",
            WorkspaceType::Mobile => "Mobile geodatabase",
        }
    }

    /// Classify a workspace factory ProgID
    /// (e.g. `esriDataSourcesGDB.FileGDBWorkspaceFactory.1`).
    ///
    /// The match is a case-insensitive substring test, since ProgIDs carry a
    /// namespace prefix and sometimes a version suffix.
    #[must_use]
    pub fn from_factory_progid(progid: &str) -> Option<Self> {
        let progid = progid.to_ascii_lowercase();
        WORKSPACE_FACTORIES
            .iter()
            .find(|(fragment, _)| progid.contains(fragment))
            .map(|(_, workspace_type)| *workspace_type)
    }
}

/// Field type tokens (`esriFieldType*`) and their display labels.
const FIELD_TYPES: &[(&str, &str)] = &[
    ("esriFieldTypeSmallInteger", "Small integer"),
    ("esriFieldTypeInteger", "Integer"),
    ("esriFieldTypeSingle", "Single"),
    ("esriFieldTypeDouble", "Double"),
    ("esriFieldTypeString", "String"),
    ("esriFieldTypeDate", "Date"),
    ("esriFieldTypeOID", "Object ID"),
    ("esriFieldTypeGeometry", "Geometry"),
    ("esriFieldTypeBlob", "Blob"),
    ("esriFieldTypeRaster", "Raster"),
    ("esriFieldTypeGUID", "GUID"),
    ("esriFieldTypeGlobalID", "Global ID"),
    ("esriFieldTypeXML", "XML"),
];

/// Geometry type tokens (`esriGeometry*`) and their display labels.
const GEOMETRY_TYPES: &[(&str, &str)] = &[
    ("esriGeometryPoint", "Point"),
    ("esriGeometryMultipoint", "Multipoint"),
    ("esriGeometryPolyline", "Polyline"),
    ("esriGeometryPolygon", "Polygon"),
    ("esriGeometryMultiPatch", "Multipatch"),
];

/// Merge policy tokens and their display labels.
const MERGE_POLICIES: &[(&str, &str)] = &[
    ("esriMPTDefaultValue", "Default value"),
    ("esriMPTSumValues", "Sum values"),
    ("esriMPTAreaWeighted", "Area weighted"),
];

/// Split policy tokens and their display labels.
const SPLIT_POLICIES: &[(&str, &str)] = &[
    ("esriSPTDefaultValue", "Default value"),
    ("esriSPTDuplicate", "Duplicate"),
    ("esriSPTGeometryRatio", "Geometry ratio"),
];

fn lookup<'a>(table: &[(&str, &'static str)], token: &'a str) -> &'a str {
    table
        .iter()
        .find(|(candidate, _)| *candidate == token)
        .map_or(token, |(_, label)| label)
}

/// Display label for a field type token; unknown tokens pass through as-is.
#[must_use]
pub fn field_type_label(token: &str) -> &str {
    lookup(FIELD_TYPES, token)
}

/// Display label for a geometry type token; unknown tokens pass through.
#[must_use]
pub fn geometry_type_label(token: &str) -> &str {
    lookup(GEOMETRY_TYPES, token)
}

/// Display label for a merge policy token; unknown tokens pass through.
#[must_use]
pub fn merge_policy_label(token: &str) -> &str {
    lookup(MERGE_POLICIES, token)
}

/// Display label for a split policy token; unknown tokens pass through.
#[must_use]
pub fn split_policy_label(token: &str) -> &str {
    lookup(SPLIT_POLICIES, token)
}

/// Property labels of a geodatabase, in presentation order.
pub const GDB_PROPS: [&str; 3] = ["Path", "Release", "Workspace type"];

/// Property labels of an attribute domain, in presentation order.
pub const DOMAIN_PROPS: [&str; 9] = [
    "Name",
    "Owner",
    "Description",
    "Domain type",
    "Field type",
    "Merge policy",
    "Split policy",
    "Range",
    "Coded values",
];

/// Property labels of a table, in presentation order.
pub const TABLE_PROPS: [&str; 4] = ["Name", "Alias", "Fields", "Row count"];

/// Property labels of a feature class, in presentation order.
pub const FC_PROPS: [&str; 7] = [
    "Name",
    "Alias",
    "Geometry type",
    "Spatial reference",
    "Fields",
    "Row count",
    "Feature dataset",
];
