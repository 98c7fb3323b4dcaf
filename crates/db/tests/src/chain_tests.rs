use bitcoin::{hashes::Hash, Txid};
use overseer_db_types::{traits::ChainDatabase, types::ChainWriteBatch, DbError};
use overseer_primitives::{ChainEntry, ChainPosition};

pub fn test_empty_db(db: &impl ChainDatabase) {
    assert_eq!(db.get_chain_tip().unwrap(), None, "tip of empty db should be unset");
    assert_eq!(db.get_processed_height().unwrap(), None);
    assert_eq!(db.get_entry_at(1).unwrap(), None);
    assert_eq!(db.get_position_by_txid(&txid(1)).unwrap(), None);
    assert!(db.get_entries_range(0, 100).unwrap().is_empty());
}

pub fn test_commit_entries_and_height(db: &impl ChainDatabase) {
    let mut batch = ChainWriteBatch::new();
    batch.push_entry(ChainEntry::genesis(txid(1)));
    batch.push_entry(ChainEntry::new(2, txid(2)));
    batch.set_height(100);

    let res = db.commit_batch(batch);
    assert!(res.is_ok(), "commit should work but got: {}", res.unwrap_err());

    assert_eq!(db.get_position_by_txid(&txid(1)).unwrap(), Some(1));
    assert_eq!(db.get_position_by_txid(&txid(2)).unwrap(), Some(2));
    assert_eq!(
        db.get_entry_at(2).unwrap(),
        Some(ChainEntry::new(2, txid(2)))
    );
    assert_eq!(
        db.get_chain_tip().unwrap(),
        Some(ChainEntry::new(2, txid(2)))
    );
    assert_eq!(db.get_processed_height().unwrap(), Some(100));
}

pub fn test_height_only_commit(db: &impl ChainDatabase) {
    let mut batch = ChainWriteBatch::new();
    batch.set_height(7);
    db.commit_batch(batch).unwrap();
    assert_eq!(db.get_processed_height().unwrap(), Some(7));
    assert_eq!(db.get_chain_tip().unwrap(), None);

    // Height is overwritten, not kept at the max.
    let mut batch = ChainWriteBatch::new();
    batch.set_height(5);
    db.commit_batch(batch).unwrap();
    assert_eq!(db.get_processed_height().unwrap(), Some(5));
}

pub fn test_position_conflict_leaves_db_unchanged(db: &impl ChainDatabase) {
    commit_entries(db, &[(1, 1)], Some(10));

    let mut batch = ChainWriteBatch::new();
    batch.push_entry(ChainEntry::new(2, txid(2)));
    batch.push_entry(ChainEntry::new(1, txid(3)));
    batch.set_height(11);

    let err = db.commit_batch(batch).unwrap_err();
    assert_eq!(err, DbError::PositionConflict(1));
    assert!(err.is_conflict());

    assert_eq!(db.get_position_by_txid(&txid(2)).unwrap(), None);
    assert_eq!(db.get_position_by_txid(&txid(3)).unwrap(), None);
    assert_eq!(db.get_entry_at(1).unwrap(), Some(ChainEntry::genesis(txid(1))));
    assert_eq!(db.get_processed_height().unwrap(), Some(10));
}

pub fn test_txid_conflict_leaves_db_unchanged(db: &impl ChainDatabase) {
    commit_entries(db, &[(1, 1)], Some(10));

    let mut batch = ChainWriteBatch::new();
    batch.push_entry(ChainEntry::new(2, txid(1)));
    batch.set_height(11);

    let err = db.commit_batch(batch).unwrap_err();
    assert_eq!(err, DbError::TxidConflict(txid(1)));

    assert_eq!(db.get_entry_at(2).unwrap(), None);
    assert_eq!(db.get_processed_height().unwrap(), Some(10));
}

pub fn test_conflict_within_batch(db: &impl ChainDatabase) {
    let mut batch = ChainWriteBatch::new();
    batch.push_entry(ChainEntry::new(1, txid(1)));
    batch.push_entry(ChainEntry::new(1, txid(2)));
    batch.set_height(3);

    let err = db.commit_batch(batch).unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {err}");
    assert_eq!(db.get_chain_tip().unwrap(), None);
    assert_eq!(db.get_processed_height().unwrap(), None);
}

pub fn test_entries_range(db: &impl ChainDatabase) {
    commit_entries(db, &[(1, 1), (2, 2), (3, 3), (4, 4)], Some(1));

    let range = db.get_entries_range(2, 4).unwrap();
    assert_eq!(
        range,
        vec![ChainEntry::new(2, txid(2)), ChainEntry::new(3, txid(3))]
    );

    let all = db.get_entries_range(0, ChainPosition::MAX).unwrap();
    assert_eq!(all.len(), 4);

    assert!(db.get_entries_range(3, 1).unwrap().is_empty());
    assert!(db.get_entries_range(2, 2).unwrap().is_empty());
}

pub fn test_scope_reads_staged_writes(db: &impl ChainDatabase) {
    commit_entries(db, &[(1, 1)], Some(1));

    let mut scope = db.begin_scope();
    scope.insert_entry(ChainEntry::new(2, txid(2))).unwrap();

    // Visible inside the scope, invisible outside until commit.
    assert_eq!(scope.lookup_position(&txid(2)).unwrap(), Some(2));
    assert_eq!(scope.lookup_position(&txid(1)).unwrap(), Some(1));
    assert_eq!(db.get_position_by_txid(&txid(2)).unwrap(), None);

    scope.set_height(2).unwrap();
    scope.commit().unwrap();

    assert_eq!(db.get_position_by_txid(&txid(2)).unwrap(), Some(2));
    assert_eq!(db.get_processed_height().unwrap(), Some(2));
}

pub fn test_scope_insert_conflicts(db: &impl ChainDatabase) {
    commit_entries(db, &[(1, 1)], None);

    let mut scope = db.begin_scope();

    // Committed position and txid.
    assert_eq!(
        scope.insert_entry(ChainEntry::new(1, txid(9))),
        Err(DbError::PositionConflict(1))
    );
    assert_eq!(
        scope.insert_entry(ChainEntry::new(5, txid(1))),
        Err(DbError::TxidConflict(txid(1)))
    );

    // Staged position and txid.
    scope.insert_entry(ChainEntry::new(2, txid(2))).unwrap();
    assert_eq!(
        scope.insert_entry(ChainEntry::new(2, txid(3))),
        Err(DbError::PositionConflict(2))
    );
    assert_eq!(
        scope.insert_entry(ChainEntry::new(3, txid(2))),
        Err(DbError::TxidConflict(txid(2)))
    );

    assert_eq!(scope.pending().entries().len(), 1);
    scope.commit().unwrap();
    assert_eq!(db.get_chain_tip().unwrap(), Some(ChainEntry::new(2, txid(2))));
}

pub fn test_scope_rollback_discards(db: &impl ChainDatabase) {
    commit_entries(db, &[(1, 1)], Some(4));

    let mut scope = db.begin_scope();
    scope.insert_entry(ChainEntry::new(2, txid(2))).unwrap();
    scope.set_height(5).unwrap();
    scope.rollback();

    assert_eq!(db.get_entry_at(2).unwrap(), None);
    assert_eq!(db.get_processed_height().unwrap(), Some(4));

    {
        let mut scope = db.begin_scope();
        scope.insert_entry(ChainEntry::new(2, txid(3))).unwrap();
        scope.set_height(6).unwrap();
        // dropped without commit
    }

    assert_eq!(db.get_entry_at(2).unwrap(), None);
    assert_eq!(db.get_position_by_txid(&txid(3)).unwrap(), None);
    assert_eq!(db.get_processed_height().unwrap(), Some(4));
}

pub fn test_scope_progress(db: &impl ChainDatabase) {
    let mut scope = db.begin_scope();
    assert!(!scope.progress().unwrap().is_started());

    scope.insert_entry(ChainEntry::genesis(txid(1))).unwrap();
    assert!(scope.progress().unwrap().is_started());
    scope.commit().unwrap();

    let scope = db.begin_scope();
    assert!(scope.progress().unwrap().is_started());
}

/// Commits `(position, txid seed)` pairs and an optional height in one batch.
fn commit_entries(db: &impl ChainDatabase, entries: &[(ChainPosition, u8)], height: Option<u64>) {
    let mut batch = ChainWriteBatch::new();
    for (pos, seed) in entries {
        batch.push_entry(ChainEntry::new(*pos, txid(*seed)));
    }
    if let Some(height) = height {
        batch.set_height(height);
    }

    let res = db.commit_batch(batch);
    assert!(res.is_ok(), "commit should work but got: {}", res.unwrap_err());
}

fn txid(seed: u8) -> Txid {
    Txid::from_byte_array([seed; 32])
}

#[macro_export]
macro_rules! chain_db_tests {
    ($setup_expr:expr) => {
        #[test]
        fn test_empty_db() {
            let db = $setup_expr;
            $crate::chain_tests::test_empty_db(&db);
        }

        #[test]
        fn test_commit_entries_and_height() {
            let db = $setup_expr;
            $crate::chain_tests::test_commit_entries_and_height(&db);
        }

        #[test]
        fn test_height_only_commit() {
            let db = $setup_expr;
            $crate::chain_tests::test_height_only_commit(&db);
        }

        #[test]
        fn test_position_conflict_leaves_db_unchanged() {
            let db = $setup_expr;
            $crate::chain_tests::test_position_conflict_leaves_db_unchanged(&db);
        }

        #[test]
        fn test_txid_conflict_leaves_db_unchanged() {
            let db = $setup_expr;
            $crate::chain_tests::test_txid_conflict_leaves_db_unchanged(&db);
        }

        #[test]
        fn test_conflict_within_batch() {
            let db = $setup_expr;
            $crate::chain_tests::test_conflict_within_batch(&db);
        }

        #[test]
        fn test_entries_range() {
            let db = $setup_expr;
            $crate::chain_tests::test_entries_range(&db);
        }

        #[test]
        fn test_scope_reads_staged_writes() {
            let db = $setup_expr;
            $crate::chain_tests::test_scope_reads_staged_writes(&db);
        }

        #[test]
        fn test_scope_insert_conflicts() {
            let db = $setup_expr;
            $crate::chain_tests::test_scope_insert_conflicts(&db);
        }

        #[test]
        fn test_scope_rollback_discards() {
            let db = $setup_expr;
            $crate::chain_tests::test_scope_rollback_discards(&db);
        }

        #[test]
        fn test_scope_progress() {
            let db = $setup_expr;
            $crate::chain_tests::test_scope_progress(&db);
        }
    };
}
