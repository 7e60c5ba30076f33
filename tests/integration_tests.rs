// Integration tests for planotui
//
// These tests exercise the persistence and transfer stack end to end:
// - PlanStore mutations survive a reload through a FileStore
// - Export/import file round-trips keep the plan intact
// - The reset operation clears the snapshot on disk

use tempfile::tempdir;

use planotui::plan::{HeaderField, RowField};
use planotui::store::{FileStore, PlanStore, STORAGE_KEY};
use planotui::transfer;
use planotui::types::{Priority, Status};

fn open(dir: &std::path::Path) -> PlanStore {
    PlanStore::load(Box::new(FileStore::new(dir)))
}

#[test]
fn test_edits_survive_reload() {
    let dir = tempdir().unwrap();

    let mut store = open(dir.path());
    store.set_header_field(HeaderField::Project, "Community garden");
    store.set_header_field(HeaderField::StartDate, "2024-03-01");
    let id = store.rows()[0].id.clone();
    store.set_row_field(&id, RowField::Action, "Order seedlings");
    store.cycle_row_status(&id);
    store.cycle_row_priority(&id);
    store.set_goal_target(90.0);
    store.set_goal_date("2024-06-30");
    drop(store);

    let reloaded = open(dir.path());
    assert_eq!(reloaded.header().project, "Community garden");
    assert_eq!(reloaded.header().start_date, "2024-03-01");
    assert_eq!(reloaded.rows()[0].action, "Order seedlings");
    assert_eq!(reloaded.rows()[0].status, Status::InProgress);
    assert_eq!(reloaded.rows()[0].priority, Priority::Low);
    assert_eq!(reloaded.goal().target_percent, 90.0);
    assert_eq!(reloaded.goal().target_date, "2024-06-30");
}

#[test]
fn test_added_and_removed_rows_survive_reload() {
    let dir = tempdir().unwrap();

    let mut store = open(dir.path());
    let added = store.add_row();
    store.set_row_field(&added, RowField::Action, "Last action");
    let first = store.rows()[0].id.clone();
    store.remove_row(&first);
    drop(store);

    let reloaded = open(dir.path());
    assert_eq!(reloaded.rows().len(), 5);
    let numbers: Vec<u32> = reloaded.rows().iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    assert_eq!(reloaded.rows().last().unwrap().action, "Last action");
}

#[test]
fn test_reset_removes_snapshot_file() {
    let dir = tempdir().unwrap();
    let snapshot = dir.path().join(format!("{STORAGE_KEY}.json"));

    let mut store = open(dir.path());
    store.set_header_field(HeaderField::Project, "Ephemeral");
    assert!(snapshot.exists());

    store.reset();
    assert!(!snapshot.exists());
    drop(store);

    let reloaded = open(dir.path());
    assert_eq!(reloaded.header().project, "");
    assert_eq!(reloaded.rows().len(), 5);
}

#[test]
fn test_export_then_import_into_fresh_store() {
    let dir = tempdir().unwrap();
    let export_path = dir.path().join("plan.json");

    let mut source = PlanStore::load(Box::new(planotui::store::MemoryStore::new()));
    source.set_header_field(HeaderField::Project, "Reunião TBN");
    let id = source.rows()[2].id.clone();
    source.set_row_field(&id, RowField::Owner, "João");
    source.cycle_row_status(&id);
    transfer::export_to_file(source.plan(), &export_path).unwrap();

    let imported = transfer::import_from_file(&export_path).unwrap();
    let target_dir = tempdir().unwrap();
    let mut target = open(target_dir.path());
    target.import(imported);

    assert_eq!(target.header().project, "Reunião TBN");
    assert_eq!(target.rows()[2].owner, "João");
    assert_eq!(target.rows()[2].status, Status::InProgress);

    // The import itself was persisted
    drop(target);
    let reloaded = open(target_dir.path());
    assert_eq!(reloaded.header().project, "Reunião TBN");
}

#[test]
fn test_import_rejects_garbage_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "not json at all").unwrap();
    assert!(transfer::import_from_file(&path).is_err());

    let path = dir.path().join("wrong_shape.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(transfer::import_from_file(&path).is_err());
}

#[test]
fn test_snapshot_file_uses_original_schema_names() {
    let dir = tempdir().unwrap();

    let mut store = open(dir.path());
    store.set_header_field(HeaderField::Project, "Schema check");
    drop(store);

    let text = std::fs::read_to_string(dir.path().join(format!("{STORAGE_KEY}.json"))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value.get("cabecalho").is_some());
    assert!(value.get("linhas").is_some());
    assert!(value.get("metas").is_some());
    assert_eq!(value["cabecalho"]["projeto"], "Schema check");
}
