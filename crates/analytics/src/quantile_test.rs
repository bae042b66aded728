//! Tests for the quantile bucketer

use crate::quantile::{QuantileBucketer, percentile};

const LABELS: [&str; 5] = ["a", "b", "c", "d", "e"];

#[test]
fn test_percentile_linear_interpolation() {
    let values = [10.0, 20.0, 30.0, 40.0];
    assert_eq!(percentile(&values, 0.0), 10.0);
    assert_eq!(percentile(&values, 0.5), 25.0);
    assert_eq!(percentile(&values, 1.0), 40.0);
    assert_eq!(percentile(&values, 0.25), 17.5);
}

#[test]
fn test_percentile_single_value() {
    assert_eq!(percentile(&[7.0], 0.25), 7.0);
    assert_eq!(percentile(&[7.0], 0.75), 7.0);
}

#[test]
fn test_edges_strictly_increasing() {
    let values = [5.0, 10.0, 15.0, 20.0, 100.0, 0.0, 0.0];
    let bucketer = QuantileBucketer::new(&values, &[0.25, 0.5, 0.75], &LABELS).unwrap();

    let edges = bucketer.edges();
    assert_eq!(edges[0], 0.0);
    assert_eq!(*edges.last().unwrap(), f64::INFINITY);
    for pair in edges.windows(2) {
        assert!(pair[0] < pair[1], "edges not strictly increasing: {:?}", edges);
    }
    assert!(bucketer.labels().len() <= edges.len() - 1);
}

#[test]
fn test_duplicate_percentiles_collapse_bins() {
    // Every positive value identical: all percentiles equal, one bin
    // survives between 0 and that value plus the +inf bin... the single
    // percentile is accepted once, so two bins remain.
    let values = [4.0, 4.0, 4.0, 4.0, 0.0];
    let bucketer = QuantileBucketer::new(&values, &[0.25, 0.5, 0.75], &LABELS).unwrap();

    assert_eq!(bucketer.edges(), &[0.0, 4.0, f64::INFINITY]);
    assert_eq!(bucketer.labels(), &["a", "b"]);
    assert_eq!(bucketer.bucket(4.0), Some("a"));
    assert_eq!(bucketer.bucket(5.0), Some("b"));
}

#[test]
fn test_all_zero_column_skips_binning() {
    assert!(QuantileBucketer::new(&[0.0, 0.0, 0.0], &[0.5], &LABELS).is_none());
    assert!(QuantileBucketer::new(&[], &[0.5], &LABELS).is_none());
}

#[test]
fn test_zero_value_has_no_bin() {
    let values = [1.0, 2.0, 3.0, 4.0];
    let bucketer = QuantileBucketer::new(&values, &[0.5], &LABELS).unwrap();
    assert_eq!(bucketer.bucket(0.0), None);
    assert_eq!(bucketer.bucket(-1.0), None);
}

#[test]
fn test_intervals_right_closed() {
    let values = [10.0, 20.0, 30.0];
    let bucketer = QuantileBucketer::new(&values, &[0.5], &LABELS).unwrap();
    // Edges: [0, 20, inf]. A value exactly on an inner edge belongs to
    // the lower bin.
    assert_eq!(bucketer.bucket(20.0), Some("a"));
    assert_eq!(bucketer.bucket(20.0001), Some("b"));
}

#[test]
fn test_labels_truncated_to_bin_count() {
    let values = [1.0, 100.0, 200.0, 300.0];
    let bucketer = QuantileBucketer::new(&values, &[0.25, 0.5, 0.75], &LABELS).unwrap();
    // Four bins from three distinct percentiles; the fifth label is
    // dropped from the end.
    assert_eq!(bucketer.labels().len(), 4);
    assert_eq!(bucketer.labels(), &["a", "b", "c", "d"]);
}

#[test]
fn test_bins_beyond_label_list_unlabeled() {
    static SHORT: [&str; 1] = ["only"];
    let values = [1.0, 100.0];
    let bucketer = QuantileBucketer::new(&values, &[0.5], &SHORT).unwrap();
    // Edges [0, 50.5, inf]: two bins, one label.
    assert_eq!(bucketer.bucket(10.0), Some("only"));
    assert_eq!(bucketer.bucket(99.0), None);
}
