mod support;

use moviedeck::{
    AddRecord, CollectionError, CollectionStore, Command, CommandManager, DeleteRecord,
    EditRecord, RecordChanges, Status,
};
use support::{barbie, event_log, inception, shelf, store_with, titles};

#[test]
fn add_then_undo_leaves_collection_unchanged() {
    let store = store_with(&shelf());
    let before = store.get_all().unwrap();
    let mut manager = CommandManager::new(10);

    let record = barbie();
    manager
        .execute_command(Box::new(AddRecord::new(store.clone(), record.clone())))
        .unwrap();
    assert_eq!(store.get(record.id()).unwrap(), Some(record));

    let undone = manager.undo().unwrap().unwrap();
    assert_eq!(undone.description(), "Add: Barbie");
    assert_eq!(store.get_all().unwrap(), before);
}

#[test]
fn delete_then_undo_restores_same_record() {
    let records = shelf();
    let store = store_with(&records);
    let mut manager = CommandManager::new(10);
    let target = records[2].clone();

    manager
        .execute_command(Box::new(DeleteRecord::new(store.clone(), target.clone())))
        .unwrap();
    assert!(store.get(target.id()).unwrap().is_none());

    manager.undo().unwrap();
    assert_eq!(store.get(target.id()).unwrap(), Some(target));
    assert_eq!(store.len().unwrap(), records.len());
}

#[test]
fn delete_undo_keeps_edits_made_before_deletion() {
    let original = inception();
    let store = store_with(&[original.clone()]);
    let mut manager = CommandManager::new(10);

    let edit = EditRecord::from_changes(
        store.clone(),
        &original,
        &RecordChanges {
            rating: Some(2),
            ..RecordChanges::default()
        },
    )
    .unwrap();
    manager.execute_command(Box::new(edit)).unwrap();

    // Built from the stale copy; the store holds the edited one.
    manager
        .execute_command(Box::new(DeleteRecord::new(store.clone(), original.clone())))
        .unwrap();
    manager.undo().unwrap();

    assert_eq!(store.get(original.id()).unwrap().unwrap().rating(), 2);
}

#[test]
fn edit_then_undo_restores_every_field() {
    let original = inception();
    let store = store_with(&[original.clone(), barbie()]);
    let mut manager = CommandManager::new(10);

    let changes = RecordChanges {
        title: Some("Tenet".into()),
        author: Some("C. Nolan".into()),
        year: Some(2020),
        category: Some("Thriller".into()),
        rating: Some(3),
        status: Some(Status::Watching),
    };
    let edit = EditRecord::from_changes(store.clone(), &original, &changes).unwrap();
    manager.execute_command(Box::new(edit)).unwrap();

    let edited = store.get(original.id()).unwrap().unwrap();
    assert_eq!(edited.title(), "Tenet");
    assert_eq!(edited.status(), Status::Watching);
    assert_eq!(titles(&store.get_all().unwrap()), vec!["Tenet", "Barbie"]);

    let undone = manager.undo().unwrap().unwrap();
    assert_eq!(undone.description(), "Edit: Tenet");
    assert_eq!(store.get(original.id()).unwrap(), Some(original));
}

#[test]
fn undone_command_can_be_resubmitted_as_redo() {
    let store = CollectionStore::new();
    let mut manager = CommandManager::new(10);
    let record = barbie();

    manager
        .execute_command(Box::new(AddRecord::new(store.clone(), record.clone())))
        .unwrap();
    let undone = manager.undo().unwrap().unwrap();
    assert!(store.is_empty().unwrap());

    manager.execute_command(undone).unwrap();
    assert_eq!(store.get_all().unwrap(), vec![record]);
    assert_eq!(manager.history_size(), 1);
}

#[test]
fn undone_edit_can_be_resubmitted_as_redo() {
    let original = inception();
    let store = store_with(&[original.clone()]);
    let mut manager = CommandManager::new(10);

    let edit = EditRecord::from_changes(
        store.clone(),
        &original,
        &RecordChanges {
            rating: Some(2),
            status: Some(Status::Watching),
            ..RecordChanges::default()
        },
    )
    .unwrap();
    manager.execute_command(Box::new(edit)).unwrap();

    let undone = manager.undo().unwrap().unwrap();
    assert_eq!(store.get(original.id()).unwrap(), Some(original.clone()));

    manager.execute_command(undone).unwrap();
    let redone = store.get(original.id()).unwrap().unwrap();
    assert_eq!(redone.rating(), 2);
    assert_eq!(redone.status(), Status::Watching);
    assert_eq!(redone.title(), original.title());
}

#[test]
fn edit_undo_with_foreign_snapshot_leaves_store_unchanged() {
    let target = inception();
    let other = barbie();
    let store = store_with(&[target.clone(), other.clone()]);
    let mut manager = CommandManager::new(10);

    let mut edited = target.clone();
    edited.set_rating(1).unwrap();
    manager
        .execute_command(Box::new(EditRecord::new(
            store.clone(),
            edited.clone(),
            other.snapshot(),
        )))
        .unwrap();

    assert!(matches!(
        manager.undo(),
        Err(CollectionError::InvalidSnapshot { .. })
    ));
    assert_eq!(store.get(target.id()).unwrap(), Some(edited));
    assert_eq!(store.get(other.id()).unwrap(), Some(other));
    assert!(!manager.can_undo());
}

#[test]
fn invalid_edit_is_rejected_before_anything_runs() {
    let original = inception();
    let store = store_with(&[original.clone()]);
    let log = event_log(&store);

    let result = EditRecord::from_changes(
        store.clone(),
        &original,
        &RecordChanges {
            title: Some(String::new()),
            ..RecordChanges::default()
        },
    );
    assert!(matches!(result, Err(CollectionError::Validation(_))));
    assert_eq!(store.get(original.id()).unwrap(), Some(original));
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn commands_fail_cleanly_on_missing_or_duplicate_records() {
    let store = CollectionStore::new();
    let mut manager = CommandManager::new(10);
    let stranger = inception();

    let err = manager
        .execute_command(Box::new(DeleteRecord::new(store.clone(), stranger.clone())))
        .unwrap_err();
    assert!(matches!(err, CollectionError::NotFound { .. }));

    let mut edit = EditRecord::new(store.clone(), stranger.clone(), stranger.snapshot());
    assert!(matches!(edit.execute(), Err(CollectionError::NotFound { .. })));

    manager
        .execute_command(Box::new(AddRecord::new(store.clone(), stranger.clone())))
        .unwrap();
    let err = manager
        .execute_command(Box::new(AddRecord::new(store.clone(), stranger)))
        .unwrap_err();
    assert!(matches!(err, CollectionError::DuplicateId { .. }));
    assert_eq!(manager.history_size(), 1);
}

#[test]
fn history_cap_forgets_the_oldest_command() {
    let store = CollectionStore::new();
    let cap = 3;
    let mut manager = CommandManager::new(cap);
    let records = shelf();

    for record in records.iter().take(cap + 1) {
        manager
            .execute_command(Box::new(AddRecord::new(store.clone(), record.clone())))
            .unwrap();
    }
    assert_eq!(manager.history_size(), cap);

    while manager.undo().unwrap().is_some() {}

    // The first add was evicted and stays applied.
    assert_eq!(titles(&store.get_all().unwrap()), vec!["Inception"]);
}

#[test]
fn undo_notifies_observers() {
    let store = CollectionStore::new();
    let log = event_log(&store);
    let mut manager = CommandManager::default();

    manager
        .execute_command(Box::new(AddRecord::new(store.clone(), barbie())))
        .unwrap();
    manager.undo().unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["added Barbie", "removed Barbie"]);
}
