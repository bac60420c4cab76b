use std::collections::HashMap;

use keel_core::{ObjectId, RefLog};
use keel_store::reflog::{parse_reflog, read_reflog_file, serialize_reflog};
use keel_store::walk::{EntryQueue, ObjectSource};
use keel_store::{RefLogManager, StoreError};

const SIMPLE_REFLOG: &str = "\
0000000000000000000000000000000000000000 fdf4fc3344e67ab068f836878b6c4951e3b15f3d Scott Chacon <schacon@gmail.com> 1243041744 -0700\tfirst commit
fdf4fc3344e67ab068f836878b6c4951e3b15f3d cac0cab538b970a37ea1e769cbbde608743bc96d Scott Chacon <schacon@gmail.com> 1243041324 -0700\tsecond commit
cac0cab538b970a37ea1e769cbbde608743bc96d 1a410efbd13591db07496601ebc7a059dd55cfe9 Scott Chacon <schacon@gmail.com> 1243041124 -0700\tthird commit
1a410efbd13591db07496601ebc7a059dd55cfe9 484a59275031909e19aadb7c92262719cfcdf19a Scott Chacon <schacon@gmail.com> 1243041024 -0700\tadded repo.rb
484a59275031909e19aadb7c92262719cfcdf19a ab1afef80fac8e34258ff41fc1b867c702daa24b Scott Chacon <schacon@gmail.com> 1243041000 -0700\tmodified repo a bit
";

fn sha(byte: u8) -> ObjectId {
    ObjectId::from_bytes([byte; 20])
}

struct MemStore(HashMap<ObjectId, String>);

impl ObjectSource for MemStore {
    type Object = String;

    fn resolve(&self, id: &ObjectId) -> Result<Option<String>, StoreError> {
        Ok(self.0.get(id).cloned())
    }
}

// === Scenario 1: five chained lines survive a parse/serialize cycle ===
#[test]
fn fixture_roundtrips_byte_for_byte() {
    let log = parse_reflog(SIMPLE_REFLOG);
    assert_eq!(log.len(), 5);
    assert_eq!(serialize_reflog(&log).unwrap(), SIMPLE_REFLOG);
}

// === Scenario 2: one add_entry reproduces the fixture's first line ===
#[test]
fn add_entry_serializes_to_fixture_line() {
    let mut log = RefLog::new();
    log.add_entry(
        ObjectId::ZERO,
        ObjectId::from_hex("fdf4fc3344e67ab068f836878b6c4951e3b15f3d").unwrap(),
        "Scott Chacon <schacon@gmail.com>",
        1243041744,
        -25200,
        false,
        "first commit",
    );
    let expected = "0000000000000000000000000000000000000000 fdf4fc3344e67ab068f836878b6c4951e3b15f3d Scott Chacon <schacon@gmail.com> 1243041744 -0700\tfirst commit\n";
    assert_eq!(serialize_reflog(&log).unwrap(), expected);
}

// === Scenario 3: repeated middle deletes converge to the endpoints ===
#[test]
fn repeated_delete_converges() {
    let mut log = parse_reflog(SIMPLE_REFLOG);
    let oldest_old = log.get(4).unwrap().old;
    let newest_new = log.get(0).unwrap().new;
    assert!(oldest_old.is_zero());

    for _ in 0..4 {
        log.delete_entry(1, true).unwrap();
    }
    assert_eq!(log.len(), 1);
    assert_eq!(log.get(0).unwrap().old, oldest_old);
    assert_eq!(log.get(0).unwrap().new, newest_new);
}

// === Scenario 4: a corrupt line truncates everything older ===
#[test]
fn corrupt_log_file_keeps_recent_history() {
    let tmp = tempfile::tempdir().unwrap();
    let mgr = RefLogManager::init(tmp.path()).unwrap();

    let mut lines: Vec<&str> = SIMPLE_REFLOG.lines().collect();
    lines[2] = "%% corrupted by a crash %%";
    let text = format!("{}\n", lines.join("\n"));
    let path = mgr.layout().logs_dir().join("heads/main");
    std::fs::write(&path, text).unwrap();

    let log = read_reflog_file(mgr.layout(), "heads/main").unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log.get(0).unwrap().message, "modified repo a bit");
    assert_eq!(log.get(1).unwrap().message, "added repo.rb");
}

// === Scenario 5: manager end to end, across instances ===
#[test]
fn manager_records_and_replays_updates() {
    let tmp = tempfile::tempdir().unwrap();
    {
        let mut mgr = RefLogManager::init(tmp.path()).unwrap();
        mgr.update_ref("heads/main", sha(1), "a <a@b>", 1000, -25200, "first")
            .unwrap();
        mgr.update_ref("heads/main", sha(2), "a <a@b>", 1001, -25200, "second")
            .unwrap();
        mgr.update_ref("heads/main", sha(3), "a <a@b>", 1002, -25200, "third")
            .unwrap();
    }

    let mut mgr = RefLogManager::open(tmp.path()).unwrap();
    assert_eq!(mgr.get_sha_by_index("heads/main", 0).unwrap(), sha(3));
    assert_eq!(mgr.get_sha_by_index("heads/main", 1).unwrap(), sha(2));
    assert_eq!(mgr.get_sha_by_index("heads/main", 2).unwrap(), sha(1));
    assert_eq!(
        mgr.get_sha_by_index("heads/main", 3).unwrap(),
        ObjectId::ZERO
    );

    let entry = mgr.get_log_by_index("heads/main", 1).unwrap();
    assert_eq!(entry.old, sha(1));
    assert_eq!(entry.new, sha(2));
    assert_eq!(entry.message, "second");

    assert!(matches!(
        mgr.get_sha_by_index("heads/gone", 0),
        Err(StoreError::RefNotFound(_))
    ));
}

// === Scenario 6: walking a log yields objects newest-first, stopping at the sentinel ===
#[test]
fn walk_resolves_in_log_order_and_skips_sentinel() {
    let tmp = tempfile::tempdir().unwrap();
    let mut mgr = RefLogManager::init(tmp.path()).unwrap();
    // Values held: ZERO -> s1 -> s2 -> s3
    mgr.update_ref("heads/main", sha(1), "a <a@b>", 1000, 0, "one")
        .unwrap();
    mgr.update_ref("heads/main", sha(2), "a <a@b>", 1001, 0, "two")
        .unwrap();
    mgr.update_ref("heads/main", sha(3), "a <a@b>", 1002, 0, "three")
        .unwrap();

    let store = MemStore(
        [1u8, 2, 3]
            .iter()
            .map(|&b| (sha(b), format!("object-{b}")))
            .collect(),
    );

    let mut walk = mgr.walk(&store, "heads/main").unwrap();
    assert_eq!(walk.next_entry().unwrap().id, sha(3));
    assert_eq!(walk.next_entry().unwrap().id, sha(2));
    let last = walk.next_entry().unwrap();
    assert_eq!(last.id, sha(1));
    assert_eq!(last.object, "object-1");
    assert!(walk.next_entry().is_none());
}

// === Scenario 7: a log naming an unknown object fails the walk ===
#[test]
fn walk_fails_on_missing_object() {
    let tmp = tempfile::tempdir().unwrap();
    let mut mgr = RefLogManager::init(tmp.path()).unwrap();
    mgr.update_ref("heads/main", sha(1), "a <a@b>", 1000, 0, "one")
        .unwrap();
    mgr.update_ref("heads/main", sha(2), "a <a@b>", 1001, 0, "two")
        .unwrap();

    // Store only knows s2; s1 is gone
    let store = MemStore([(sha(2), "object-2".to_string())].into_iter().collect());
    let err = mgr.walk(&store, "heads/main").unwrap_err();
    assert!(matches!(err, StoreError::MissingObject(id) if id == sha(1)));
}
