//! Relational operators used to compose the admission reports.
//!
//! Every operator evaluates eagerly into a `Vec`, so the order of each intermediate
//! sequence can be inspected and asserted on. None of them allocate shared state or
//! fail for well-typed input.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::domain::Score;

/// Keeps the records satisfying `predicate`, in their original relative order.
pub fn filter<T, I, P>(input: I, predicate: P) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    P: Fn(&T) -> bool,
{
    input.into_iter().filter(|item| predicate(item)).collect()
}

/// Inner equality join.
///
/// Left records are visited in order and each one is paired with every matching right
/// record, again in order. Records without a partner on the other side are dropped.
/// Key extraction runs once per record.
pub fn join<'r, L, R, K, I, FL, FR>(
    left: I,
    right: &'r [R],
    left_key: FL,
    right_key: FR,
) -> Vec<(L, &'r R)>
where
    I: IntoIterator<Item = L>,
    L: Clone,
    K: PartialEq,
    FL: Fn(&L) -> K,
    FR: Fn(&R) -> K,
{
    let right_keys: Vec<K> = right.iter().map(&right_key).collect();
    let mut joined = Vec::new();

    for record in left {
        let key = left_key(&record);
        for (candidate, candidate_key) in right.iter().zip(&right_keys) {
            if *candidate_key == key {
                joined.push((record.clone(), candidate));
            }
        }
    }

    joined
}

/// Aggregates accumulated for one group. Count, sum and max are gathered in the same pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats<K> {
    pub key: K,
    pub count: usize,
    pub sum: Score,
    pub max: Score,
}

/// Groups `input` by `key` and aggregates `value` over each group's members.
///
/// Groups are returned in the order their key first appears in the input.
pub fn group_aggregate<T, K, I, FK, FV>(input: I, key: FK, value: FV) -> Vec<GroupStats<K>>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash + Clone,
    FK: Fn(&T) -> K,
    FV: Fn(&T) -> Score,
{
    let mut groups: Vec<GroupStats<K>> = Vec::new();
    let mut positions: HashMap<K, usize> = HashMap::new();

    for record in input {
        let group_key = key(&record);
        let amount = value(&record);
        match positions.get(&group_key) {
            Some(&position) => {
                let group = &mut groups[position];
                group.count += 1;
                group.sum = group.sum + amount;
                group.max = group.max.max(amount);
            }
            None => {
                positions.insert(group_key.clone(), groups.len());
                groups.push(GroupStats {
                    key: group_key,
                    count: 1,
                    sum: amount,
                    max: amount,
                });
            }
        }
    }

    groups
}

/// Count-only form of [`group_aggregate`].
pub fn group_count<T, K, I, FK>(input: I, key: FK) -> Vec<(K, usize)>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash + Clone,
    FK: Fn(&T) -> K,
{
    group_aggregate(input, key, |_| Score::ZERO)
        .into_iter()
        .map(|group| (group.key, group.count))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// One ordering key of a [`sort`] call.
pub struct SortKey<'k, T> {
    order: SortOrder,
    compare: Box<dyn Fn(&T, &T) -> Ordering + 'k>,
}

impl<'k, T> SortKey<'k, T> {
    pub fn ascending<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'k,
    {
        Self::by_key(SortOrder::Ascending, key)
    }

    pub fn descending<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'k,
    {
        Self::by_key(SortOrder::Descending, key)
    }

    /// Comparator form, for keys that borrow from the record.
    pub fn ascending_by<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'k,
    {
        Self::new(SortOrder::Ascending, compare)
    }

    pub fn descending_by<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'k,
    {
        Self::new(SortOrder::Descending, compare)
    }

    pub fn new<F>(order: SortOrder, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'k,
    {
        Self {
            order,
            compare: Box::new(compare),
        }
    }

    fn by_key<K, F>(order: SortOrder, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'k,
    {
        Self::new(order, move |a, b| key(a).cmp(&key(b)))
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        let ordering = (self.compare)(a, b);
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Stable multi-key sort. Keys are applied primary first; records equal on every key
/// keep their input order.
pub fn sort<T, I>(input: I, keys: &[SortKey<'_, T>]) -> Vec<T>
where
    I: IntoIterator<Item = T>,
{
    let mut sorted: Vec<T> = input.into_iter().collect();
    sorted.sort_by(|a, b| {
        keys.iter()
            .fold(Ordering::Equal, |ordering, key| {
                ordering.then_with(|| key.compare(a, b))
            })
    });
    sorted
}

/// First `k` records of an already sorted sequence.
pub fn top_k<T>(sorted: Vec<T>, k: usize) -> Vec<T> {
    let mut head = sorted;
    head.truncate(k);
    head
}

/// Keeps the first occurrence of each value.
pub fn distinct<T, I>(input: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    distinct_by(input, T::clone)
}

/// Keeps the first record for each distinct projection.
pub fn distinct_by<T, K, I, F>(input: I, key: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    input
        .into_iter()
        .filter(|record| seen.insert(key(record)))
        .collect()
}
