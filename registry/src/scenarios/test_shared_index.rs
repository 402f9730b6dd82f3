//! Test sharing an index across threads behind one exclusive lock.

use std::sync::{Arc, RwLock};
use std::thread;

use crate::index::{IndexKind, PlotIndex};
use crate::testing::{plot_numbers, record};

#[test]
#[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected
fn test_index_behind_rwlock() {
    let index = Arc::new(RwLock::new(PlotIndex::new(IndexKind::Plot)));

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let index = Arc::clone(&index);
            thread::spawn(move || {
                for i in 0..50 {
                    let plot = worker * 50 + i;
                    index
                        .write()
                        .expect("lock")
                        .add(record(plot, 10.0))
                        .expect("add");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("join");
    }

    let index = index.read().expect("lock");
    assert_eq!(index.len(), 200);
    assert_eq!(
        plot_numbers(&index.list_all()),
        (0..200).collect::<Vec<_>>()
    );
}
