// ==========================================
// 排程仓储集成测试
// ==========================================
// 测试目标: 收集 → 持久化 → 读取的完整链路，以及覆盖/追加两种写入语义
// ==========================================

mod test_helpers;

use furnace_schedule::domain::{CycleType, ScheduleEntry, TemperatureBounds};
use furnace_schedule::engine::EntryCollector;
use furnace_schedule::logging;
use furnace_schedule::repository::{RepositoryError, SaveMode, ScheduleRepository};
use test_helpers::{anneal_rows, create_legacy_schedule, create_test_db, open_test_connection};

fn collector() -> EntryCollector {
    EntryCollector::new(TemperatureBounds::new(0, 1300))
}

#[test]
fn test_collect_then_round_trip() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = ScheduleRepository::new(&db_path).expect("Failed to create repo");

    let entries = collector().collect(&anneal_rows()).expect("rows should be valid");
    assert_eq!(entries.len(), 3, "末尾空行应被跳过");

    repo.save("Anneal_1045", &entries, SaveMode::Replace)
        .expect("save should succeed");
    let loaded = repo.load("Anneal_1045").expect("load should succeed");

    assert_eq!(loaded, entries);
    let indices: Vec<u32> = loaded.iter().map(|e| e.cycle_index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert_eq!(loaded[0].notes.as_deref(), Some("heat up"));
    assert_eq!(loaded[1].notes, None);
}

#[test]
fn test_save_twice_append_accumulates() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = ScheduleRepository::new(&db_path).expect("Failed to create repo");

    let first = collector().collect(&anneal_rows()).unwrap();
    let second = vec![ScheduleEntry::new(1, CycleType::Soak, 300, 300, "0:20:0", None)];

    repo.save("T1", &first, SaveMode::Append).unwrap();
    repo.save("T1", &second, SaveMode::Append).unwrap();

    let loaded = repo.load("T1").unwrap();
    assert_eq!(loaded.len(), 4);
    // 追加时序号接续，不产生重复的 Cycle
    let indices: Vec<u32> = loaded.iter().map(|e| e.cycle_index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);
    assert_eq!(loaded[3].start_temp, 300);
    assert_eq!(repo.list().unwrap()[0].cycle_count, 4);
}

#[test]
fn test_save_twice_replace_keeps_latest() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = ScheduleRepository::new(&db_path).expect("Failed to create repo");

    let first = collector().collect(&anneal_rows()).unwrap();
    let second = vec![ScheduleEntry::new(1, CycleType::Soak, 300, 300, "0:20:0", None)];

    repo.save("T1", &first, SaveMode::Replace).unwrap();
    repo.save("T1", &second, SaveMode::Replace).unwrap();

    assert_eq!(repo.load("T1").unwrap(), second);
    assert_eq!(repo.list().unwrap()[0].cycle_count, 1);
}

#[test]
fn test_schedule_names_are_case_insensitive() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = ScheduleRepository::new(&db_path).expect("Failed to create repo");

    let entries = collector().collect(&anneal_rows()).unwrap();
    repo.save("Temper", &entries, SaveMode::Replace).unwrap();

    assert!(repo.exists("TEMPER").unwrap());
    assert_eq!(repo.load("temper").unwrap(), entries);

    repo.save("TEMPER", &entries[..1], SaveMode::Replace).unwrap();
    let list = repo.list().unwrap();
    assert_eq!(list.len(), 1, "同名（忽略大小写）只保留一条清单记录");
    assert_eq!(list[0].cycle_count, 1);
}

#[test]
fn test_legacy_table_is_readable_and_updatable() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    create_legacy_schedule(
        &conn,
        "OldCurve",
        &[
            ("Ramp", 25, 600, "01:00:00", Some("")),
            ("Soak", 600, 600, "00:30:00", None),
        ],
    )
    .expect("Failed to create legacy table");
    drop(conn);

    let repo = ScheduleRepository::new(&db_path).expect("Failed to create repo");
    assert!(repo.exists("OldCurve").unwrap());
    assert!(repo.list().unwrap().is_empty(), "旧表不在清单中");

    let loaded = repo.load("OldCurve").unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].notes, None, "空备注读回为 None");

    // 覆盖写入后登记到清单
    repo.save("OldCurve", &loaded[..1], SaveMode::Replace).unwrap();
    assert_eq!(repo.list().unwrap()[0].name, "OldCurve");
    assert_eq!(repo.load("OldCurve").unwrap().len(), 1);
}

#[test]
fn test_legacy_table_with_unknown_cycle_type_fails_cleanly() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    create_legacy_schedule(&conn, "Broken", &[("Hold", 25, 25, "01:00:00", None)])
        .expect("Failed to create legacy table");
    drop(conn);

    let repo = ScheduleRepository::new(&db_path).expect("Failed to create repo");
    match repo.load("Broken") {
        Err(RepositoryError::FieldValueError { field, .. }) => assert_eq!(field, "CycleType"),
        other => panic!("Expected FieldValueError, got {:?}", other),
    }
}

#[test]
fn test_repository_instances_share_storage() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let writer = ScheduleRepository::new(&db_path).unwrap();
    let reader = ScheduleRepository::new(&db_path).unwrap();

    let entries = collector().collect(&anneal_rows()).unwrap();
    writer.save("Shared", &entries, SaveMode::Replace).unwrap();
    assert_eq!(reader.load("Shared").unwrap(), entries);
}
