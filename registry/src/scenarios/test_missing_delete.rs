//! Test deleting keys that are not present.

use crate::index::{IndexError, IndexKind, PlotIndex};
use crate::testing::{plot_numbers, record};
use crate::types::PlotNumber;

#[test]
fn test_missing_delete_leaves_index_unchanged() {
    let mut index = PlotIndex::new(IndexKind::Plot);
    for plot in [8, 3, 11] {
        index.add(record(plot, 50.0)).expect("add");
    }

    assert_eq!(
        index.delete_by_plot(PlotNumber(4)),
        Err(IndexError::NotFound)
    );
    assert_eq!(index.delete_by_area(51.0), Err(IndexError::NotFound));
    assert_eq!(plot_numbers(&index.list_all()), vec![3, 8, 11]);
}

#[test]
fn test_delete_twice() {
    let mut index = PlotIndex::new(IndexKind::Area);
    index.add(record(1, 50.0)).expect("add");

    index.delete_by_plot(PlotNumber(1)).expect("first delete");
    assert_eq!(
        index.delete_by_plot(PlotNumber(1)),
        Err(IndexError::NotFound)
    );
    assert!(index.is_empty());
}
