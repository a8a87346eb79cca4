use multiverse::{BoardId, RULESET_COUNT};
use rusqlite::Connection;

use crate::{GraphStore, ParentOutcome, StoreError, StoreOptions, MAX_PARENTS};

fn id(hex: &str) -> BoardId {
    hex.parse().unwrap()
}

/// Canonical identifiers of the given byte width, in numeric order.
fn ids_of_width(width: usize) -> impl Iterator<Item = BoardId> {
    (1u64..1 << (8 * width))
        .map(move |n| BoardId::from_bytes(&n.to_be_bytes()[8 - width..]))
        .filter(BoardId::is_canonical)
}

/// 330 children of the seed: the ring for even ids, the zero board for odd.
fn seed_children() -> Vec<BoardId> {
    (0..RULESET_COUNT)
        .map(|r| if r % 2 == 0 { id("60") } else { BoardId::zero() })
        .collect()
}

fn seeded_store() -> (GraphStore, BoardId) {
    let store = GraphStore::open_in_memory().unwrap();
    let seed = BoardId::single_cell();
    store.insert(&seed, true).unwrap();
    (store, seed)
}

// -----------------------------------------------------------------------
// Insertion and flags
// -----------------------------------------------------------------------
#[test]
fn test_insert_is_idempotent() {
    let (store, seed) = seeded_store();
    assert!(store.exists(&seed).unwrap());
    assert!(!store.insert(&seed, false).unwrap());
    assert!(store.is_root(&seed).unwrap());
    assert_eq!(store.total_boards().unwrap(), 1);
}

#[test]
fn test_flags_of_absent_board() {
    let store = GraphStore::open_in_memory().unwrap();
    let ring = id("60");
    assert!(!store.exists(&ring).unwrap());
    assert!(!store.is_expanded(&ring).unwrap());
    assert!(!store.is_root(&ring).unwrap());
    assert_eq!(store.node(&ring).unwrap(), None);
    assert!(store.get_parents(&ring).unwrap().is_empty());
}

#[test]
fn test_non_root_insert() {
    let (store, _) = seeded_store();
    let ring = id("60");
    assert!(store.insert(&ring, false).unwrap());
    assert!(!store.is_root(&ring).unwrap());
    assert_eq!(store.root_boards().unwrap(), vec![BoardId::single_cell()]);
    assert_eq!(store.total_boards().unwrap(), 2);
}

// -----------------------------------------------------------------------
// Evolutions
// -----------------------------------------------------------------------
#[test]
fn test_set_and_get_evolutions() {
    let (store, seed) = seeded_store();
    assert_eq!(store.get_all_evolutions(&seed).unwrap(), None);
    assert_eq!(store.get_evolution(&seed, 0).unwrap(), None);

    let children = seed_children();
    store.set_evolutions(&seed, &children).unwrap();

    assert!(store.is_expanded(&seed).unwrap());
    let stored = store.get_all_evolutions(&seed).unwrap().unwrap();
    assert_eq!(stored, children);
    for (rule_id, child) in stored.iter().enumerate() {
        assert_eq!(store.get_evolution(&seed, rule_id).unwrap().as_ref(), Some(child));
    }
    assert_eq!(store.get_evolution(&seed, RULESET_COUNT).unwrap(), None);
    assert!(store.unexpanded_boards().unwrap().is_empty());
    assert_eq!(store.unexpanded_count().unwrap(), 0);
}

#[test]
fn test_set_evolutions_replaces_children() {
    let (store, seed) = seeded_store();
    store.set_evolutions(&seed, &seed_children()).unwrap();
    let zeros = vec![BoardId::zero(); RULESET_COUNT];
    store.set_evolutions(&seed, &zeros).unwrap();
    assert_eq!(store.get_all_evolutions(&seed).unwrap(), Some(zeros));
}

#[test]
fn test_set_evolutions_requires_every_rule() {
    let (store, seed) = seeded_store();
    let err = store.set_evolutions(&seed, &seed_children()[..329]).unwrap_err();
    assert!(matches!(
        err,
        StoreError::ChildCount {
            expected: 330,
            got: 329
        }
    ));
    assert!(!store.is_expanded(&seed).unwrap());
}

#[test]
fn test_set_evolutions_on_absent_board() {
    let store = GraphStore::open_in_memory().unwrap();
    let err = store
        .set_evolutions(&BoardId::single_cell(), &seed_children())
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn test_set_evolutions_rejects_wide_child() {
    let (store, seed) = seeded_store();
    let mut children = seed_children();
    children[3] = id("2440");
    let err = store.set_evolutions(&seed, &children).unwrap_err();
    assert!(matches!(err, StoreError::ChildTooWide { width: 1, .. }));
}

#[test]
fn test_set_evolutions_rejects_non_canonical_board() {
    let store = GraphStore::open_in_memory().unwrap();
    let padded = id("6000");
    store.insert(&padded, false).unwrap();
    let err = store.set_evolutions(&padded, &seed_children()).unwrap_err();
    assert!(matches!(err, StoreError::NonCanonical(_)));
    assert_eq!(store.unexpanded_boards().unwrap(), vec![padded]);
}

#[test]
fn test_set_evolutions_rejects_non_canonical_child() {
    let (store, seed) = seeded_store();
    let mut children = seed_children();
    children[0] = id("03");
    let err = store.set_evolutions(&seed, &children).unwrap_err();
    assert!(matches!(err, StoreError::NonCanonical(child) if child == id("03")));
    assert!(!store.is_expanded(&seed).unwrap());
    assert_eq!(store.get_evolution(&seed, 0).unwrap(), None);
    assert_eq!(store.unexpanded_boards().unwrap(), vec![seed]);
}

#[test]
fn test_children_of_larger_board_are_padded() {
    let store = GraphStore::open_in_memory().unwrap();
    let cross = id("24"); // 5x5, children up to 7x7
    store.insert(&cross, false).unwrap();
    let mut children = vec![BoardId::zero(); RULESET_COUNT];
    children[0] = id("0200");
    children[1] = id("60");
    children[2] = id("2440");
    store.set_evolutions(&cross, &children).unwrap();
    assert_eq!(store.get_all_evolutions(&cross).unwrap(), Some(children));
    assert_eq!(store.get_evolution(&cross, 1).unwrap(), Some(id("60")));
}

// -----------------------------------------------------------------------
// Parents
// -----------------------------------------------------------------------
#[test]
fn test_add_parent_to_absent_child() {
    let store = GraphStore::open_in_memory().unwrap();
    let err = store
        .add_parent(&id("60"), &BoardId::single_cell())
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn test_absent_child_reported_before_parent_width() {
    let store = GraphStore::open_in_memory().unwrap();
    let wide = ids_of_width(3).next().unwrap();
    let err = store.add_parent(&wide, &id("60")).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn test_add_parent_rejects_unsizable_parent() {
    let (store, seed) = seeded_store();
    for parent in [id("ff"), id("6000"), BoardId::zero()] {
        let err = store.add_parent(&seed, &parent).unwrap_err();
        assert!(matches!(err, StoreError::NonCanonical(_)), "{parent}");
    }
    assert!(store.get_parents(&seed).unwrap().is_empty());
    assert_eq!(store.add_parent(&seed, &id("60")).unwrap(), ParentOutcome::Added);
    assert_eq!(store.get_parents(&seed).unwrap(), vec![id("60")]);
}

#[test]
fn test_add_parent_deduplicates() {
    let (store, seed) = seeded_store();
    let ring = id("60");
    store.insert(&ring, false).unwrap();
    assert_eq!(store.add_parent(&ring, &seed).unwrap(), ParentOutcome::Added);
    assert_eq!(
        store.add_parent(&ring, &seed).unwrap(),
        ParentOutcome::AlreadyPresent
    );
    assert_eq!(store.parent_count(&ring).unwrap(), 1);
    assert_eq!(store.get_parents(&ring).unwrap(), vec![seed]);
}

#[test]
fn test_parents_sorted_largest_first() {
    let (store, seed) = seeded_store();
    for parent in ["80", "2440", "60", "0200"] {
        store.add_parent(&seed, &id(parent)).unwrap();
    }
    assert_eq!(
        store.get_parents(&seed).unwrap(),
        vec![id("2440"), id("0200"), id("80"), id("60")]
    );
}

#[test]
fn test_parent_narrower_than_any_real_parent() {
    let store = GraphStore::open_in_memory().unwrap();
    let wide = ids_of_width(3).next().unwrap(); // 11x11, parents are at least 9x9
    assert_eq!(wide.side(), Some(11));
    store.insert(&wide, false).unwrap();
    let err = store.add_parent(&wide, &id("60")).unwrap_err();
    assert!(matches!(err, StoreError::ParentTooNarrow { min_width: 2, .. }));
    assert_eq!(
        store.add_parent(&wide, &id("2440")).unwrap(),
        ParentOutcome::Added
    );
}

#[test]
fn test_parent_capacity_keeps_smallest() {
    let (store, seed) = seeded_store();
    let wide: Vec<BoardId> = ids_of_width(3).take(MAX_PARENTS + 1).collect();
    for parent in &wide[..MAX_PARENTS] {
        assert_eq!(store.add_parent(&seed, parent).unwrap(), ParentOutcome::Added);
    }
    assert_eq!(store.parent_count(&seed).unwrap(), MAX_PARENTS);
    let full = store.get_parents(&seed).unwrap();

    // Same length as the largest: declined, set unchanged.
    assert_eq!(
        store.add_parent(&seed, &wide[MAX_PARENTS]).unwrap(),
        ParentOutcome::Declined
    );
    assert_eq!(store.get_parents(&seed).unwrap(), full);

    // Strictly smaller: evicts the largest.
    let narrow = id("0200");
    assert_eq!(
        store.add_parent(&seed, &narrow).unwrap(),
        ParentOutcome::Replaced {
            evicted: wide[0].clone()
        }
    );
    let parents = store.get_parents(&seed).unwrap();
    assert_eq!(parents.len(), MAX_PARENTS);
    assert_eq!(parents.last(), Some(&narrow));
    assert!(!parents.contains(&wide[0]));
    assert_eq!(
        store.add_parent(&seed, &narrow).unwrap(),
        ParentOutcome::AlreadyPresent
    );
    assert_eq!(store.parent_count(&seed).unwrap(), MAX_PARENTS);
}

// -----------------------------------------------------------------------
// Tolerance of damaged rows
// -----------------------------------------------------------------------
#[test]
fn test_damaged_children_read_as_unexpanded() {
    let (store, seed) = seeded_store();
    store.set_evolutions(&seed, &seed_children()).unwrap();
    store
        .connection()
        .execute("UPDATE boards SET children = x'6000'", [])
        .unwrap();

    assert!(!store.is_expanded(&seed).unwrap());
    assert_eq!(store.get_all_evolutions(&seed).unwrap(), None);
    assert_eq!(store.get_evolution(&seed, 0).unwrap(), None);
    assert_eq!(store.unexpanded_boards().unwrap(), vec![seed.clone()]);
    let node = store.node(&seed).unwrap().unwrap();
    assert!(!node.expanded);
    assert_eq!(node.children, None);

    // Re-expansion repairs the row.
    store.set_evolutions(&seed, &seed_children()).unwrap();
    assert!(store.is_expanded(&seed).unwrap());
}

#[test]
fn test_unreadable_child_entry_reads_as_unexpanded() {
    let (store, seed) = seeded_store();
    store.set_evolutions(&seed, &seed_children()).unwrap();
    // Right length, but the first entry has bits outside its ring.
    store
        .connection()
        .execute("UPDATE boards SET children = x'03' || zeroblob(329)", [])
        .unwrap();

    assert!(!store.is_expanded(&seed).unwrap());
    assert_eq!(store.get_evolution(&seed, 0).unwrap(), None);
    assert_eq!(store.get_evolution(&seed, 1).unwrap(), None);
    assert_eq!(store.get_all_evolutions(&seed).unwrap(), None);
    assert_eq!(store.unexpanded_boards().unwrap(), vec![seed.clone()]);
    assert_eq!(store.node(&seed).unwrap().unwrap().children, None);
}

#[test]
fn test_damaged_parents_read_as_empty() {
    let (store, seed) = seeded_store();
    store.add_parent(&seed, &id("60")).unwrap();
    store
        .connection()
        .execute("UPDATE boards SET parent_size = 2, parents = x'808080'", [])
        .unwrap();

    assert!(store.get_parents(&seed).unwrap().is_empty());
    assert_eq!(store.parent_count(&seed).unwrap(), 0);
    assert_eq!(store.add_parent(&seed, &id("a0")).unwrap(), ParentOutcome::Added);
    assert_eq!(store.get_parents(&seed).unwrap(), vec![id("a0")]);

    // Right shape, unreadable entry.
    store
        .connection()
        .execute("UPDATE boards SET parent_size = 1, parents = x'80ff'", [])
        .unwrap();
    assert!(store.get_parents(&seed).unwrap().is_empty());
}

// -----------------------------------------------------------------------
// Records and persistence
// -----------------------------------------------------------------------
#[test]
fn test_node_record() {
    let (store, seed) = seeded_store();
    let ring = id("60");
    store.insert(&ring, false).unwrap();
    store.add_parent(&ring, &seed).unwrap();
    store.set_evolutions(&seed, &seed_children()).unwrap();

    let node = store.node(&seed).unwrap().unwrap();
    assert!(node.expanded);
    assert!(node.is_root);
    assert_eq!(node.children, Some(seed_children()));
    assert!(node.parents.is_empty());

    let node = store.node(&ring).unwrap().unwrap();
    assert_eq!(node.id, ring);
    assert!(!node.expanded);
    assert!(!node.is_root);
    assert_eq!(node.children, None);
    assert_eq!(node.parents, vec![seed]);
}

#[test]
fn test_unexpanded_in_insertion_order() {
    let (store, seed) = seeded_store();
    for hex in ["e0", "60", "a0"] {
        store.insert(&id(hex), false).unwrap();
    }
    store.set_evolutions(&seed, &seed_children()).unwrap();
    assert_eq!(
        store.unexpanded_boards().unwrap(),
        vec![id("e0"), id("60"), id("a0")]
    );
    assert_eq!(store.unexpanded_count().unwrap(), 3);
    assert_eq!(store.total_boards().unwrap(), 4);
}

#[test]
fn test_reopen_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("multiverse.db");
    let seed = BoardId::single_cell();
    {
        let store = GraphStore::open(&path).unwrap();
        store.insert(&seed, true).unwrap();
        store.insert(&id("60"), false).unwrap();
        store.add_parent(&id("60"), &seed).unwrap();
        store.set_evolutions(&seed, &seed_children()).unwrap();
    }
    let store = GraphStore::open_with(&path, StoreOptions { wal: false }).unwrap();
    assert!(store.is_expanded(&seed).unwrap());
    assert_eq!(store.get_all_evolutions(&seed).unwrap(), Some(seed_children()));
    assert_eq!(store.get_parents(&id("60")).unwrap(), vec![seed]);
    assert_eq!(store.unexpanded_boards().unwrap(), vec![id("60")]);
}

#[test]
fn test_open_rejects_foreign_boards_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foreign.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE boards (board_id BLOB PRIMARY KEY, size INTEGER)")
        .unwrap();
    match GraphStore::open(&path) {
        Err(StoreError::Schema(msg)) => assert!(msg.contains("expanded")),
        Err(other) => panic!("expected a schema error, got {other}"),
        Ok(_) => panic!("expected a schema error"),
    }
}
