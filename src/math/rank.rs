//! Stable index ordering over float scores.

use std::cmp::Ordering;

/// Indices of `values` sorted ascending.
///
/// The sort is stable, so ties keep index order (lower index first). NaNs
/// compare equal to everything.
pub fn ascending_order(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));
    order
}

/// Index of the first maximum, or `None` for an empty slice.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, v) in values.iter().enumerate() {
        match best {
            Some(b) if values[b] >= *v || v.is_nan() => {}
            _ => best = Some(i),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_index_order() {
        assert_eq!(ascending_order(&[1.0, 0.5, 1.0, 0.5]), vec![1, 3, 0, 2]);
    }

    #[test]
    fn argmax_prefers_first() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0]), Some(1));
        assert_eq!(argmax(&[]), None);
    }
}
