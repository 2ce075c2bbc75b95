//! Statistical helper functions for Boreas climate index processing.
//!
//! Plain reducers propagate NaN; the `nan*` variants skip missing values
//! (marked by NaN), matching the `skipna` behaviour of the reference
//! methodology.

/// Arithmetic mean of a slice. Returns NaN if empty; NaN values propagate.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Arithmetic mean skipping NaN values. Returns NaN if no non-NaN value
/// remains.
pub fn nanmean(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut n = 0_usize;
    for &x in data {
        if !x.is_nan() {
            sum += x;
            n += 1;
        }
    }
    if n == 0 {
        return f64::NAN;
    }
    sum / n as f64
}

/// Sample standard deviation with N-1 denominator. Returns NaN if fewer than
/// 2 elements; NaN values propagate.
pub fn sd(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    (ss / (n as f64 - 1.0)).sqrt()
}

/// Sample standard deviation (N-1) skipping NaN values. Returns NaN if fewer
/// than 2 non-NaN elements remain.
pub fn nansd(data: &[f64]) -> f64 {
    let kept: Vec<f64> = data.iter().copied().filter(|x| !x.is_nan()).collect();
    sd(&kept)
}

/// Median. Returns NaN if empty; a NaN in the input makes the result NaN.
pub fn median(data: &[f64]) -> f64 {
    if data.iter().any(|x| x.is_nan()) {
        return f64::NAN;
    }
    nanmedian(data)
}

/// Median skipping NaN values. Returns NaN if no non-NaN value remains.
pub fn nanmedian(data: &[f64]) -> f64 {
    let mut kept: Vec<f64> = data.iter().copied().filter(|x| !x.is_nan()).collect();
    if kept.is_empty() {
        return f64::NAN;
    }
    kept.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = kept.len();
    if n % 2 == 1 {
        kept[n / 2]
    } else {
        (kept[n / 2 - 1] + kept[n / 2]) / 2.0
    }
}

/// Offsets of a centered window of `window` samples around its label index.
///
/// Odd windows are symmetric: `(window - 1) / 2` on both sides. Even windows
/// are asymmetric by one sample: `window / 2` before and `window / 2 - 1`
/// after, so the label index is the later of the two middle samples.
pub fn centered_window_offsets(window: usize) -> (usize, usize) {
    if window % 2 == 1 {
        ((window - 1) / 2, (window - 1) / 2)
    } else {
        (window / 2, window / 2 - 1)
    }
}

/// Centered rolling mean over `window` samples.
///
/// The output has the same length as the input; positions where the full
/// window does not fit are NaN. NaN inputs propagate into every window that
/// contains them. A `window` of zero yields all-NaN output.
pub fn rolling_mean_centered(data: &[f64], window: usize) -> Vec<f64> {
    let n = data.len();
    let mut out = vec![f64::NAN; n];
    if window == 0 || window > n {
        return out;
    }

    let (before, after) = centered_window_offsets(window);

    for (i, slot) in out.iter_mut().enumerate() {
        if i < before || i + after >= n {
            continue;
        }
        *slot = mean(&data[i - before..=i + after]);
    }

    out
}
