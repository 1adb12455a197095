use solreg::core::import::{ColumnMap, ImportOutcome, import_csv};
use solreg::core::project::ProjectDraft;
use solreg::core::store::{FetchOrder, ProjectStore};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn open_initialized(tmp: &TempDir) -> ProjectStore {
    let store = ProjectStore::open(&tmp.path().join("registry.db")).expect("open store");
    store.initialize().expect("initialize");
    store
}

fn write_csv(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, content).expect("write csv");
    path
}

#[test]
fn import_with_default_headers_appends_all_rows() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_initialized(&tmp);
    let csv = write_csv(
        &tmp,
        "proyectos.csv",
        "Nombre,Potencia (kW),Ubicacion,Cliente\n\
         Planta Uno,120.5,Jalisco,CFE\n\
         Planta Dos,80,Sonora,Oxxo\n",
    );

    let outcome = import_csv(&store, &csv, &ColumnMap::default()).expect("import");
    assert_eq!(outcome, ImportOutcome::Imported { rows: 2 });

    let rows = store.fetch_all(FetchOrder::Insertion).expect("fetch_all");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Planta Uno");
    assert_eq!(rows[0].power_kw, 120.5);
    assert_eq!(rows[0].location, "Jalisco");
    assert_eq!(rows[0].owner, "CFE");
    assert_eq!(rows[1].name, "Planta Dos");
}

#[test]
fn header_matching_is_case_and_whitespace_normalized() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_initialized(&tmp);
    let csv = write_csv(
        &tmp,
        "proyectos.csv",
        "  NOMBRE ,potencia (kw),UBICACION,cliente\n\
         Planta Uno,10,Jalisco,CFE\n",
    );

    let outcome = import_csv(&store, &csv, &ColumnMap::default()).expect("import");
    assert_eq!(outcome, ImportOutcome::Imported { rows: 1 });
}

#[test]
fn missing_required_column_fails_listing_found_headers() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_initialized(&tmp);
    let csv = write_csv(
        &tmp,
        "proyectos.csv",
        "Nombre,Ubicacion\nPlanta Uno,Jalisco\n",
    );

    let err = import_csv(&store, &csv, &ColumnMap::default()).expect_err("must fail");
    let msg = err.to_string();
    assert!(msg.contains("Potencia (kW)"), "{msg}");
    assert!(msg.contains("Nombre"), "{msg}");
    assert!(msg.contains("Ubicacion"), "{msg}");

    // The registry stays as it was: empty.
    assert_eq!(store.count().expect("count"), 0);
}

#[test]
fn import_is_skipped_when_the_registry_is_not_empty() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_initialized(&tmp);
    store
        .insert(&ProjectDraft {
            name: "existing".to_string(),
            power_kw: 5.0,
            location: "Jalisco".to_string(),
            owner: String::new(),
        })
        .expect("insert");

    let csv = write_csv(
        &tmp,
        "proyectos.csv",
        "Nombre,Potencia (kW),Ubicacion,Cliente\nPlanta Uno,10,Jalisco,CFE\n",
    );

    let outcome = import_csv(&store, &csv, &ColumnMap::default()).expect("import");
    assert_eq!(outcome, ImportOutcome::SkippedNotEmpty);
    assert_eq!(store.count().expect("count"), 1, "no rows appended");
}

#[test]
fn custom_column_map_overrides_the_default_headers() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_initialized(&tmp);
    let csv = write_csv(
        &tmp,
        "sites.csv",
        "site,kw,state\nPlanta Uno,42.5,Queretaro\n",
    );

    let map = ColumnMap {
        name: "site".to_string(),
        power_kw: "kw".to_string(),
        location: "state".to_string(),
        owner: None,
    };
    let outcome = import_csv(&store, &csv, &map).expect("import");
    assert_eq!(outcome, ImportOutcome::Imported { rows: 1 });

    let rows = store.fetch_all(FetchOrder::Insertion).expect("fetch_all");
    assert_eq!(rows[0].location, "Queretaro");
    assert_eq!(rows[0].owner, "", "no owner mapping means empty owner");
}

#[test]
fn unparsable_power_cell_fails_naming_the_row() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_initialized(&tmp);
    let csv = write_csv(
        &tmp,
        "proyectos.csv",
        "Nombre,Potencia (kW),Ubicacion,Cliente\n\
         Planta Uno,10,Jalisco,CFE\n\
         Planta Dos,mucho,Sonora,Oxxo\n",
    );

    let err = import_csv(&store, &csv, &ColumnMap::default()).expect_err("must fail");
    let msg = err.to_string();
    assert!(msg.contains("row 2"), "{msg}");
    assert!(msg.contains("mucho"), "{msg}");
}
