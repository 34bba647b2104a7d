/// Error enumerates over all the ways [`RbTree::validate`] can find
/// a broken tree.
///
/// [`RbTree::validate`]: crate::RbTree::validate
#[derive(Debug, PartialEq)]
pub enum Error<K>
where
    K: Clone + Ord,
{
    /// Fatal case, root node is colored red.
    RedRoot,
    /// Fatal case, a red node has a red child.
    ConsecutiveReds,
    /// Fatal case, number of blacks differ between left and right
    /// subtree. The String component can be used for debugging.
    UnbalancedBlacks(String),
    /// Fatal case, index entries are not in sort-order, (child, parent).
    SortError(K, K),
    /// Fatal case, subtree size augmentation is stale.
    SizeMismatch(String),
    /// Fatal case, parent link does not point back to the parent.
    BrokenLink(String),
    /// Fatal case, (counted, reported) number of entries differ.
    CountMismatch(usize, usize),
}
