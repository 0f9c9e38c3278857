use chrono::{Datelike, NaiveDate};
use vintage_calendar::{add_months, month_sequence, parse_month_label, quarter, reference_date};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn monthly_revision_offsets() {
    // A June release published 2023-07-07 is revised one and two months later.
    let published = ymd(2023, 7, 7);
    let dates: Vec<NaiveDate> = (0..3).map(|k| add_months(published, k).unwrap()).collect();
    assert_eq!(
        dates,
        vec![ymd(2023, 7, 7), ymd(2023, 8, 7), ymd(2023, 9, 7)]
    );
}

#[test]
fn month_addition_is_monotone() {
    // Adding more months never moves the date backwards, even with clamping.
    for day in [1, 15, 28, 29, 30, 31] {
        let Some(base) = NaiveDate::from_ymd_opt(2023, 1, day) else {
            continue;
        };
        let dates: Vec<NaiveDate> = (0..24).map(|k| add_months(base, k).unwrap()).collect();
        assert!(
            dates.windows(2).all(|w| w[0] < w[1]),
            "dates from day {day} must be strictly increasing"
        );
    }
}

#[test]
fn labels_match_sequence() {
    let seq = month_sequence(reference_date(2016, 1).unwrap(), 24).unwrap();
    let labels = [
        "Jan_16", "Feb_16", "Mar_16", "Apr_16", "May_16", "Jun_16", "Jul_16", "Aug_16", "Sep_16",
        "Oct_16", "Nov_16", "Dec_16", "Jan_17", "Feb_17", "Mar_17", "Apr_17", "May_17", "Jun_17",
        "Jul_17", "Aug_17", "Sep_17", "Oct_17", "Nov_17", "Dec_17",
    ];
    let parsed: Vec<NaiveDate> = labels.iter().map(|l| parse_month_label(l).unwrap()).collect();
    assert_eq!(parsed, seq);
}

#[test]
fn quarter_of_sequence() {
    let seq = month_sequence(reference_date(2020, 1).unwrap(), 12).unwrap();
    let counts = seq.iter().fold([0usize; 4], |mut acc, d| {
        acc[quarter(d.month()).unwrap() as usize - 1] += 1;
        acc
    });
    assert_eq!(counts, [3, 3, 3, 3]);
}
