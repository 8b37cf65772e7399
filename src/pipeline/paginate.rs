//! Pagination: split the ordered item mapping into one group per form page.

use indexmap::IndexMap;
use std::hash::Hash;

/// Split `items` into consecutive groups of at most `capacity` entries.
///
/// Relative order is preserved and every entry lands in exactly one group.
/// An empty mapping yields a single empty group, so a blank form is still
/// produced. A `capacity` of 0 is treated as 1.
pub fn paginate<K, V>(items: &IndexMap<K, V>, capacity: usize) -> Vec<IndexMap<K, V>>
where
    K: Clone + Hash + Eq,
    V: Clone,
{
    let capacity = capacity.max(1);
    if items.is_empty() {
        return vec![IndexMap::new()];
    }

    let mut pages = Vec::with_capacity(items.len().div_ceil(capacity));
    let mut current = IndexMap::with_capacity(capacity);
    for (k, v) in items {
        current.insert(k.clone(), v.clone());
        if current.len() == capacity {
            pages.push(std::mem::replace(&mut current, IndexMap::with_capacity(capacity)));
        }
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbered(n: usize) -> IndexMap<String, usize> {
        // Descending keys make any accidental sorting visible.
        (0..n).map(|i| (format!("part-{:03}", n - i), i)).collect()
    }

    #[test]
    fn page_count_is_ceil_of_len_over_capacity() {
        for n in [1, 9, 10, 11, 20, 25, 99, 100, 101] {
            let pages = paginate(&numbered(n), 10);
            assert_eq!(pages.len(), n.div_ceil(10), "n = {n}");
            assert!(pages.iter().all(|p| !p.is_empty() && p.len() <= 10));
        }
    }

    #[test]
    fn pages_concatenate_back_to_the_input() {
        for n in [0, 1, 10, 25, 37] {
            let items = numbered(n);
            let rebuilt: IndexMap<String, usize> = paginate(&items, 10)
                .into_iter()
                .flat_map(IndexMap::into_iter)
                .collect();
            assert_eq!(rebuilt.len(), items.len());
            assert!(rebuilt.iter().eq(items.iter()), "order changed for n = {n}");
        }
    }

    #[test]
    fn only_the_last_page_is_short() {
        let sizes: Vec<usize> = paginate(&numbered(25), 10).iter().map(IndexMap::len).collect();
        assert_eq!(sizes, vec![10, 10, 5]);
    }

    #[test]
    fn empty_input_yields_one_empty_page() {
        let pages = paginate(&IndexMap::<String, usize>::new(), 10);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn zero_capacity_is_treated_as_one() {
        let pages = paginate(&numbered(3), 0);
        assert_eq!(pages.len(), 3);
    }
}
