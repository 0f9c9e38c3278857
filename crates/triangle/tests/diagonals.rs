use approx::assert_relative_eq;
use chrono::NaiveDate;
use vintage_calendar::{month_sequence, parse_month_label, reference_date};
use vintage_triangle::{TriangularMatrix, parse_cell};

/// Value of reference month `j` after `k` revisions.
fn truth(j: usize, k: usize) -> f64 {
    150_000.0 + 25.0 * j as f64 + 0.5 * k as f64
}

/// Builds a triangle over `n` months from `start` where every cell at or
/// below the diagonal holds `truth(col, row - col)`.
fn synthetic(start: NaiveDate, n: usize) -> TriangularMatrix {
    let labels = month_sequence(start, n).unwrap();
    let rows = (0..n)
        .map(|r| {
            (0..n)
                .map(|c| (r >= c).then(|| truth(c, r - c)))
                .collect()
        })
        .collect();
    TriangularMatrix::from_rows(labels.clone(), labels, rows).unwrap()
}

#[test]
fn diagonals_reproduce_each_revision() {
    let start = reference_date(2016, 1).unwrap();
    let m = synthetic(start, 24);
    let labels = month_sequence(start, 24).unwrap();

    for k in 0..3u8 {
        let points = m.extract(k).unwrap();
        assert_eq!(points.len(), 24 - usize::from(k));
        for (j, p) in points.iter().enumerate() {
            assert_eq!(p.reference_date, labels[j]);
            assert_eq!(p.revision_index, k);
            assert_relative_eq!(p.value, truth(j, usize::from(k)));
        }
    }
}

#[test]
fn merged_revisions_sorted_and_complete() {
    let m = synthetic(reference_date(2016, 1).unwrap(), 6);
    let points = m.extract_revisions(2).unwrap();
    // 6 + 5 + 4 cells on the first three diagonals.
    assert_eq!(points.len(), 15);
    let keys: Vec<(NaiveDate, u8)> = points
        .iter()
        .map(|p| (p.reference_date, p.revision_index))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn trimming_pre_2016_history() {
    let m = synthetic(reference_date(2014, 1).unwrap(), 36);
    let trimmed = m.starting_at(reference_date(2016, 1).unwrap());
    assert_eq!(trimmed.n_releases(), 12);
    assert_eq!(trimmed.n_columns(), 12);

    let first = trimmed.extract(0).unwrap();
    assert_eq!(first[0].reference_date, reference_date(2016, 1).unwrap());
    // Month index 24 in the untrimmed calendar.
    assert_relative_eq!(first[0].value, truth(24, 0));

    let points = trimmed.extract_revisions(2).unwrap();
    let n_third = points.iter().filter(|p| p.revision_index == 2).count();
    assert_eq!(n_third, 10);
}

#[test]
fn labelled_csv_style_triangle() {
    let columns: Vec<NaiveDate> = ["Jan_16", "Feb_16", "Mar_16"]
        .iter()
        .map(|l| parse_month_label(l).unwrap())
        .collect();
    let raw = [
        ["143000.5", "", ""],
        ["143010.0", "143200.0", "Not yet published"],
        ["143020.0", "143210.0", "143400.0"],
    ];
    let rows = raw
        .iter()
        .map(|r| r.iter().map(|c| parse_cell(c).unwrap()).collect())
        .collect();
    let m = TriangularMatrix::from_rows(columns.clone(), columns, rows).unwrap();

    let first: Vec<f64> = m.extract(0).unwrap().iter().map(|p| p.value).collect();
    assert_eq!(first, vec![143000.5, 143200.0, 143400.0]);
    let third = m.extract(2).unwrap();
    assert_eq!(third.len(), 1);
    assert_relative_eq!(third[0].value, 143020.0);
}
