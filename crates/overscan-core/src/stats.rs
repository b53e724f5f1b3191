//! Small order statistics shared by plateau detection, frame combination
//! and overscan subtraction.

/// Median of `values`, reordering them in place.
///
/// Uses `select_nth_unstable` for O(n) median without full sort.
/// Returns 0.0 for an empty slice.
pub(crate) fn median_in_place(values: &mut [f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return values[0];
    }
    let mid = n / 2;
    if n % 2 == 1 {
        *values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b)).1
    } else {
        values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
        let upper = values[mid];
        let lower = *values[..mid]
            .select_nth_unstable_by(mid - 1, |a, b| a.total_cmp(b))
            .1;
        (lower + upper) / 2.0
    }
}

/// Mean and population standard deviation of the values where `mask` is set.
pub(crate) fn masked_mean_stddev(values: &[f64], mask: &[bool]) -> (f64, f64) {
    let mut sum = 0.0;
    let mut count = 0u32;
    for (&v, &keep) in values.iter().zip(mask) {
        if keep {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        return (0.0, 0.0);
    }
    let mean = sum / count as f64;

    let mut var_sum = 0.0;
    for (&v, &keep) in values.iter().zip(mask) {
        if keep {
            let d = v - mean;
            var_sum += d * d;
        }
    }
    (mean, (var_sum / count as f64).sqrt())
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
