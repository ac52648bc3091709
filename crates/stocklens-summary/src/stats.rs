//! Column reductions over sanitized bars.
//!
//! Every reduction skips missing values: a column is treated as only its
//! present entries, and a column with no present entries reduces to
//! `None` rather than a default or a panic.

/// Maximum of the present values.
pub fn max_of(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    values
        .into_iter()
        .flatten()
        .fold(None, |best, value| match best {
            None => Some(value),
            Some(current) => Some(current.max(value)),
        })
}

/// Minimum of the present values.
pub fn min_of(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    values
        .into_iter()
        .flatten()
        .fold(None, |best, value| match best {
            None => Some(value),
            Some(current) => Some(current.min(value)),
        })
}

/// Arithmetic mean of the present values.
pub fn mean_of(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0_f64, 0_usize), |(sum, count), value| {
            (sum + value, count + 1)
        });
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Percentage change between the first and last close of a series,
/// under the established `(first - last) / first * 100` convention.
///
/// Note the sign: a price that *rose* yields a *negative* result. The
/// convention is preserved as the legacy contract; consumers
/// rely on it, counter-intuitive as it reads.
///
/// `None` when the first close is zero or non-finite — division is
/// guarded, never attempted.
pub fn percentage_change(first: f64, last: f64) -> Option<f64> {
    if first == 0.0 || !first.is_finite() || !last.is_finite() {
        return None;
    }
    Some((first - last) / first * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reductions_skip_missing_values() {
        let column = [Some(3.0), None, Some(1.0), Some(2.0)];
        assert_eq!(max_of(column), Some(3.0));
        assert_eq!(min_of(column), Some(1.0));
        assert_eq!(mean_of(column), Some(2.0));
    }

    #[test]
    fn empty_columns_reduce_to_none() {
        let column: [Option<f64>; 2] = [None, None];
        assert_eq!(max_of(column), None);
        assert_eq!(min_of(column), None);
        assert_eq!(mean_of(column), None);
    }

    #[test]
    fn falling_price_yields_positive_change() {
        // close went 100 -> 80: (100 - 80) / 100 * 100 = 20
        assert_eq!(percentage_change(100.0, 80.0), Some(20.0));
    }

    #[test]
    fn rising_price_yields_negative_change() {
        assert_eq!(percentage_change(100.0, 125.0), Some(-25.0));
    }

    #[test]
    fn zero_first_close_is_guarded() {
        assert_eq!(percentage_change(0.0, 80.0), None);
    }
}
