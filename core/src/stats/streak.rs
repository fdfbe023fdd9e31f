use chrono::NaiveDate;

/// Length of the longest run of consecutive calendar dates.
///
/// `dates` must be sorted ascending and free of duplicates. Any gap other
/// than exactly one day starts a new run.
pub fn longest_streak(dates: &[NaiveDate]) -> usize {
    if dates.is_empty() {
        return 0;
    }

    let mut longest = 1;
    let mut current = 1;
    for pair in dates.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }
    longest
}
