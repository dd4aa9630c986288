#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use moviedeck::{observer_fn, CollectionEvent, CollectionStore, Record, Status};

pub fn movie(
    title: &str,
    author: &str,
    year: i32,
    category: &str,
    rating: u8,
    status: Status,
) -> Record {
    Record::new(title, author, year, category, rating, status).unwrap()
}

pub fn inception() -> Record {
    movie("Inception", "Nolan", 2010, "Sci-Fi", 5, Status::Watched)
}

pub fn barbie() -> Record {
    movie("Barbie", "Gerwig", 2023, "Comedy", 4, Status::ToWatch)
}

/// Six records with known attributes, in a fixed order.
pub fn shelf() -> Vec<Record> {
    vec![
        movie("Inception", "Nolan", 2010, "Sci-Fi", 5, Status::Watched),
        movie("Barbie", "Gerwig", 2023, "Comedy", 4, Status::ToWatch),
        movie("Interstellar", "Nolan", 2014, "Sci-Fi", 4, Status::ToWatch),
        movie("Arrival", "Villeneuve", 2016, "sci-fi", 5, Status::ToWatch),
        movie("Lady Bird", "Gerwig", 2017, "Comedy", 3, Status::Watching),
        movie("Dune", "Villeneuve", 2021, "Sci-Fi", 5, Status::ToWatch),
    ]
}

pub fn store_with(records: &[Record]) -> CollectionStore {
    let store = CollectionStore::new();
    for record in records {
        assert!(store.add(record.clone()).unwrap());
    }
    store
}

pub fn titles(records: &[Record]) -> Vec<&str> {
    records.iter().map(Record::title).collect()
}

/// Register an observer that records every event as a short line.
pub fn event_log(store: &CollectionStore) -> Arc<Mutex<Vec<String>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    store
        .add_observer(observer_fn(move |event| {
            let line = match event {
                CollectionEvent::Added(r) => format!("added {}", r.title()),
                CollectionEvent::Removed(r) => format!("removed {}", r.title()),
                CollectionEvent::Updated(r) => format!("updated {}", r.title()),
                CollectionEvent::BulkLoaded => "loaded".to_string(),
            };
            sink.lock().unwrap().push(line);
        }))
        .unwrap();
    log
}
