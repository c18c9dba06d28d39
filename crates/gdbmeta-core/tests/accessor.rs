//! End-to-end checks over synthetic geodatabase containers.
//!
//! The fixtures mimic a mobile geodatabase: an Esri system catalog
//! (`GDB_Items` + `GDB_ItemTypes`) with serialized XML definitions, the
//! physical tables behind it, and an `st_geometry_columns` registry so the
//! generic backend can classify spatial layers too.

use std::path::Path;

use rusqlite::{Connection, params};
use tempfile::TempDir;

use gdbmeta_core::{
    BackendKind, GdbError, Geodatabase, PropertyValue, WorkspaceType, available_backends,
};

const WORKSPACE_DEF: &str = r#"<DEWorkspace xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="typens:DEWorkspace">
    <CatalogPath>\</CatalogPath>
    <Name>Workspace</Name>
    <WorkspaceType>esriLocalDatabaseWorkspace</WorkspaceType>
    <WorkspaceFactoryProgID>esriDataSourcesGDB.SqliteWorkspaceFactory</WorkspaceFactoryProgID>
    <MajorVersion>4</MajorVersion>
    <MinorVersion>0</MinorVersion>
    <BugfixVersion>0</BugfixVersion>
</DEWorkspace>"#;

const MATERIAL_DOMAIN_DEF: &str = r#"<GPCodedValueDomain2 xsi:type="typens:GPCodedValueDomain2" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <DomainName>Material</DomainName>
    <FieldType>esriFieldTypeString</FieldType>
    <MergePolicy>esriMPTDefaultValue</MergePolicy>
    <SplitPolicy>esriSPTDuplicate</SplitPolicy>
    <Description>Pipe material</Description>
    <Owner></Owner>
    <CodedValues xsi:type="typens:ArrayOfCodedValue">
        <CodedValue><Code>CI</Code><Name>Cast iron</Name></CodedValue>
        <CodedValue><Code>DI</Code><Name>Ductile iron</Name></CodedValue>
        <CodedValue><Code>PVC</Code><Name>Polyvinyl chloride</Name></CodedValue>
    </CodedValues>
</GPCodedValueDomain2>"#;

const DIAMETER_DOMAIN_DEF: &str = r#"<GPRangeDomain2 xsi:type="typens:GPRangeDomain2" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <DomainName>PipeDiameter</DomainName>
    <FieldType>esriFieldTypeDouble</FieldType>
    <MergePolicy>esriMPTDefaultValue</MergePolicy>
    <SplitPolicy>esriSPTDefaultValue</SplitPolicy>
    <Description>Diameter in inches</Description>
    <MinValue>0</MinValue>
    <MaxValue>48</MaxValue>
</GPRangeDomain2>"#;

const INSPECTIONS_DEF: &str = r"<DETableInfo>
    <Name>Inspections</Name>
    <AliasName>Pipe inspections</AliasName>
</DETableInfo>";

const MAINS_DEF: &str = r#"<DEFeatureClassInfo>
    <Name>Mains</Name>
    <AliasName>Water mains</AliasName>
    <ShapeType>esriGeometryPolyline</ShapeType>
    <SpatialReference>
        <WKT>GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984"]]</WKT>
        <WKID>4326</WKID>
    </SpatialReference>
</DEFeatureClassInfo>"#;

const HYDRANTS_DEF: &str = r"<DEFeatureClassInfo>
    <Name>Hydrants</Name>
    <ShapeType>esriGeometryPoint</ShapeType>
    <SpatialReference>
        <WKID>4326</WKID>
        <LatestWKID>4326</LatestWKID>
    </SpatialReference>
</DEFeatureClassInfo>";

/// Build a synthetic mobile geodatabase at `path`.
fn create_fixture_gdb(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE GDB_ItemTypes (UUID TEXT PRIMARY KEY, Name TEXT NOT NULL);
         CREATE TABLE GDB_Items (
             ObjectID INTEGER PRIMARY KEY,
             UUID TEXT,
             Type TEXT,
             Name TEXT,
             PhysicalName TEXT,
             Path TEXT,
             Definition TEXT
         );
         INSERT INTO GDB_ItemTypes (UUID, Name) VALUES
             ('t-workspace', 'Workspace'),
             ('t-table', 'Table'),
             ('t-fc', 'Feature Class'),
             ('t-fd', 'Feature Dataset'),
             ('t-cvd', 'Coded Value Domain'),
             ('t-rd', 'Range Domain');

         CREATE TABLE Inspections (OBJECTID INTEGER PRIMARY KEY, PipeID TEXT, Passed INTEGER);
         INSERT INTO Inspections (PipeID, Passed) VALUES ('M-1', 1), ('M-2', 0), ('M-1', 1);

         CREATE TABLE Mains (OBJECTID INTEGER PRIMARY KEY, SHAPE BLOB, Material TEXT);
         INSERT INTO Mains (SHAPE, Material) VALUES (x'00', 'CI'), (x'00', 'PVC');

         CREATE TABLE Hydrants (OBJECTID INTEGER PRIMARY KEY, SHAPE BLOB);
         INSERT INTO Hydrants (SHAPE) VALUES (x'00');

         CREATE TABLE st_geometry_columns (table_name TEXT, column_name TEXT);
         INSERT INTO st_geometry_columns VALUES ('Hydrants', 'SHAPE'), ('Mains', 'SHAPE');",
    )
    .unwrap();

    let mut insert = conn
        .prepare(
            "INSERT INTO GDB_Items (UUID, Type, Name, PhysicalName, Path, Definition) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .unwrap();
    for (uuid, item_type, name, physical, item_path, definition) in [
        ("i-ws", "t-workspace", "Workspace", "", "\\", WORKSPACE_DEF),
        ("i-mat", "t-cvd", "Material", "", "\\Material", MATERIAL_DOMAIN_DEF),
        ("i-dia", "t-rd", "PipeDiameter", "", "\\PipeDiameter", DIAMETER_DOMAIN_DEF),
        (
            "i-insp",
            "t-table",
            "Inspections",
            "main.Inspections",
            "\\Inspections",
            INSPECTIONS_DEF,
        ),
        ("i-ghost", "t-table", "Ghost", "GhostTable", "\\Ghost", ""),
        ("i-wn", "t-fd", "WaterNetwork", "", "\\WaterNetwork", ""),
        (
            "i-mains",
            "t-fc",
            "Mains",
            "main.Mains",
            "\\WaterNetwork\\Mains",
            MAINS_DEF,
        ),
        ("i-hyd", "t-fc", "Hydrants", "", "\\Hydrants", HYDRANTS_DEF),
    ] {
        insert
            .execute(params![uuid, item_type, name, physical, item_path, definition])
            .unwrap();
    }
}

/// Plain SQLite database with no geodatabase catalog at all.
fn create_plain_sqlite(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE readings (id INTEGER PRIMARY KEY, value REAL);
         INSERT INTO readings (value) VALUES (1.5), (2.5);",
    )
    .unwrap();
}

#[test]
fn open_selects_catalog_backend_and_resolves_workspace_metadata() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("utility.geodatabase");
    create_fixture_gdb(&path);

    let gdb = Geodatabase::open(&path).unwrap();
    assert_eq!(gdb.backend_kind(), BackendKind::Catalog);
    assert_eq!(gdb.release(), "ArcGIS Pro 2.x, 3.x");
    assert_eq!(gdb.workspace_type(), WorkspaceType::Mobile);

    let props = gdb.pretty_props();
    assert_eq!(props.labels(), vec!["Path", "Release", "Workspace type"]);
    assert_eq!(
        props.get("Workspace type"),
        Some(&PropertyValue::Text("Mobile geodatabase".to_string()))
    );
}

#[test]
fn both_backends_yield_identical_key_sets_and_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("utility.geodatabase");
    create_fixture_gdb(&path);

    let primary = Geodatabase::open(&path).unwrap();
    let fallback = Geodatabase::open_with(&path, BackendKind::Generic).unwrap();
    assert_eq!(primary.backend_kind(), BackendKind::Catalog);
    assert_eq!(fallback.backend_kind(), BackendKind::Generic);

    assert_eq!(
        primary.pretty_props().labels(),
        fallback.pretty_props().labels()
    );

    let primary_domains = primary.domains().unwrap();
    let fallback_domains = fallback.domains().unwrap();
    assert_eq!(primary_domains.len(), fallback_domains.len());
    for (a, b) in primary_domains.iter().zip(&fallback_domains) {
        assert_eq!(a.pretty_props().labels(), b.pretty_props().labels());
    }

    let primary_tables = primary.tables().unwrap();
    let fallback_tables = fallback.tables().unwrap();
    assert_eq!(primary_tables.len(), 1);
    assert_eq!(fallback_tables.len(), 1);
    assert_eq!(
        primary_tables[0].pretty_props().labels(),
        fallback_tables[0].pretty_props().labels()
    );

    let primary_fcs = primary.feature_classes().unwrap();
    let fallback_fcs = fallback.feature_classes().unwrap();
    assert_eq!(primary_fcs.len(), 2);
    assert_eq!(fallback_fcs.len(), 2);
    for (a, b) in primary_fcs.iter().zip(&fallback_fcs) {
        assert_eq!(a.pretty_props().labels(), b.pretty_props().labels());
    }
}

#[test]
fn coded_domain_values_keep_definition_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("utility.geodatabase");
    create_fixture_gdb(&path);

    let gdb = Geodatabase::open(&path).unwrap();
    let domains = gdb.domains().unwrap();
    let material = domains.iter().find(|d| d.name == "Material").unwrap();
    assert_eq!(
        material.coded_values,
        vec![
            ("CI".to_string(), "Cast iron".to_string()),
            ("DI".to_string(), "Ductile iron".to_string()),
            ("PVC".to_string(), "Polyvinyl chloride".to_string()),
        ]
    );
    assert_eq!(material.field_type, "String");
    assert_eq!(material.range, None);
}

#[test]
fn range_domain_reports_ordered_bounds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("utility.geodatabase");
    create_fixture_gdb(&path);

    let gdb = Geodatabase::open(&path).unwrap();
    let domains = gdb.domains().unwrap();
    let diameter = domains.iter().find(|d| d.name == "PipeDiameter").unwrap();
    let (min, max) = diameter.range.unwrap();
    assert!(min <= max);
    assert_eq!((min, max), (0.0, 48.0));
    assert_eq!(
        diameter.pretty_props().get("Range"),
        Some(&PropertyValue::Range(0.0, 48.0))
    );
    assert_eq!(
        diameter.pretty_props().get("Coded values"),
        Some(&PropertyValue::Empty)
    );
}

#[test]
fn tables_report_row_counts_and_skip_unreadable_items() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("utility.geodatabase");
    create_fixture_gdb(&path);

    let gdb = Geodatabase::open(&path).unwrap();
    // The Ghost item points at a table that does not exist; the scan must
    // drop it and still return the readable one.
    let tables = gdb.tables().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "Inspections");
    assert_eq!(tables[0].alias, "Pipe inspections");
    assert_eq!(tables[0].row_count, 3);
    assert!(tables[0].fields.iter().any(|f| f.name == "PipeID"));
}

#[test]
fn feature_classes_walk_datasets_first_and_tag_membership() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("utility.geodatabase");
    create_fixture_gdb(&path);

    let gdb = Geodatabase::open(&path).unwrap();
    let fcs = gdb.feature_classes().unwrap();
    assert_eq!(fcs.len(), 2);

    assert_eq!(fcs[0].name, "Mains");
    assert_eq!(fcs[0].feature_dataset, "WaterNetwork");
    assert_eq!(fcs[0].geometry_type, "Polyline");
    assert_eq!(fcs[0].spatial_reference, "GCS_WGS_1984");
    assert_eq!(fcs[0].alias, "Water mains");
    assert_eq!(fcs[0].row_count, 2);

    assert_eq!(fcs[1].name, "Hydrants");
    assert_eq!(fcs[1].feature_dataset, "");
    assert_eq!(fcs[1].geometry_type, "Point");
    assert_eq!(fcs[1].spatial_reference, "EPSG:4326");
    assert_eq!(fcs[1].row_count, 1);
}

#[test]
fn generic_backend_sees_a_flat_container() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("utility.geodatabase");
    create_fixture_gdb(&path);

    let gdb = Geodatabase::open_with(&path, BackendKind::Generic).unwrap();
    assert_eq!(gdb.release(), "ArcGIS Pro 2.x, 3.x");
    assert_eq!(gdb.workspace_type(), WorkspaceType::Mobile);

    let tables = gdb.tables().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "Inspections");
    assert_eq!(tables[0].alias, "");
    assert_eq!(tables[0].row_count, 3);

    let fcs = gdb.feature_classes().unwrap();
    let names: Vec<&str> = fcs.iter().map(|fc| fc.name.as_str()).collect();
    assert_eq!(names, vec!["Hydrants", "Mains"]);
    assert!(fcs.iter().all(|fc| fc.feature_dataset.is_empty()));

    let domains = gdb.domains().unwrap();
    let names: Vec<&str> = domains.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Material", "PipeDiameter"]);
}

#[test]
fn reopening_the_same_container_is_stable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("utility.geodatabase");
    create_fixture_gdb(&path);

    let first = Geodatabase::open(&path).unwrap();
    let second = Geodatabase::open(&path).unwrap();
    assert_eq!(first.release(), second.release());
    assert_eq!(first.workspace_type(), second.workspace_type());
}

#[test]
fn plain_sqlite_falls_back_to_the_generic_backend() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.sqlite");
    create_plain_sqlite(&path);

    assert_eq!(
        available_backends(&path).unwrap(),
        vec![BackendKind::Generic]
    );

    let gdb = Geodatabase::open(&path).unwrap();
    assert_eq!(gdb.backend_kind(), BackendKind::Generic);
    assert_eq!(gdb.release(), "");
    assert!(gdb.domains().unwrap().is_empty());
    assert!(gdb.feature_classes().unwrap().is_empty());

    let tables = gdb.tables().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "readings");
    assert_eq!(tables[0].row_count, 2);
}

#[test]
fn requesting_the_catalog_backend_without_a_catalog_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.sqlite");
    create_plain_sqlite(&path);

    let err = Geodatabase::open_with(&path, BackendKind::Catalog).unwrap_err();
    assert!(matches!(err, GdbError::BackendUnavailable { .. }));
}

#[test]
fn opening_a_missing_container_propagates_the_native_error() {
    let dir = TempDir::new().unwrap();
    let err = Geodatabase::open(dir.path().join("nope.geodatabase")).unwrap_err();
    assert!(matches!(err, GdbError::Open { .. }));
}

#[test]
fn fixture_backends_are_listed_richest_first() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("utility.geodatabase");
    create_fixture_gdb(&path);

    assert_eq!(
        available_backends(&path).unwrap(),
        vec![BackendKind::Catalog, BackendKind::Generic]
    );
}
