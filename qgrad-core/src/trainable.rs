//! Trainable parameter selection

use std::collections::BTreeMap;

/// Ordered set of global parameter indices selected for differentiation
///
/// Each selected index maps to a Jacobian column: its ordinal position in
/// ascending order.
///
/// # Example
/// ```
/// use qgrad_core::TrainableParams;
///
/// let trainable = TrainableParams::new([4, 1, 4, 2]);
/// assert_eq!(trainable.len(), 3);
/// assert_eq!(trainable.column(1), Some(0));
/// assert_eq!(trainable.column(4), Some(2));
/// assert_eq!(trainable.column(3), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainableParams {
    columns: BTreeMap<usize, usize>,
}

impl TrainableParams {
    /// Build the set from any collection of indices; duplicates collapse
    pub fn new<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        let mut columns: BTreeMap<usize, usize> = indices.into_iter().map(|i| (i, 0)).collect();
        for (column, slot) in columns.values_mut().enumerate() {
            *slot = column;
        }
        Self { columns }
    }

    /// Select every index in `0..num_params`
    pub fn all(num_params: usize) -> Self {
        Self::new(0..num_params)
    }

    /// Number of trainable parameters (Jacobian columns)
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Jacobian column for a global parameter index, if trainable
    #[inline]
    pub fn column(&self, param_index: usize) -> Option<usize> {
        self.columns.get(&param_index).copied()
    }

    #[inline]
    pub fn contains(&self, param_index: usize) -> bool {
        self.columns.contains_key(&param_index)
    }

    /// Selected indices in ascending order
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.keys().copied()
    }

    /// Largest selected index
    pub fn max_index(&self) -> Option<usize> {
        self.columns.keys().next_back().copied()
    }
}

impl FromIterator<usize> for TrainableParams {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_follow_ascending_order() {
        let trainable: TrainableParams = [7, 3, 5].into_iter().collect();
        assert_eq!(trainable.indices().collect::<Vec<_>>(), vec![3, 5, 7]);
        assert_eq!(trainable.column(3), Some(0));
        assert_eq!(trainable.column(5), Some(1));
        assert_eq!(trainable.column(7), Some(2));
        assert_eq!(trainable.max_index(), Some(7));
    }

    #[test]
    fn test_all() {
        let trainable = TrainableParams::all(4);
        assert_eq!(trainable.len(), 4);
        assert!((0..4).all(|i| trainable.column(i) == Some(i)));
        assert!(!trainable.contains(4));
    }

    #[test]
    fn test_empty() {
        let trainable = TrainableParams::default();
        assert!(trainable.is_empty());
        assert_eq!(trainable.max_index(), None);
    }
}
