use std::fmt;

use log::debug;
use thiserror::Error;

use crate::constants::{GROWTH_DENOMINATOR, GROWTH_NUMERATOR, INITIAL_CAPACITY};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SetError {
    #[error("iterator advanced past the last element")]
    IteratorExhausted,
}

fn grown_capacity(capacity: usize) -> usize {
    capacity * GROWTH_NUMERATOR / GROWTH_DENOMINATOR
}

/// An insertion-ordered set that only asks its elements for `PartialEq`.
///
/// Membership is a linear scan over the occupied slots, so every lookup is
/// O(n). Removal closes the gap by shifting later elements left, which keeps
/// the survivors in the order they were added.
///
/// The set tracks its own capacity rather than trusting the allocator: it
/// starts at [`INITIAL_CAPACITY`] and grows to `floor(capacity * 1.3)` only
/// when an insertion would overflow.
#[derive(Debug)]
pub struct ApplianceSet<T> {
    elements: Vec<T>,
    capacity: usize,
}

impl<T> ApplianceSet<T> {
    pub fn new() -> Self {
        ApplianceSet {
            elements: Vec::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            elements: &self.elements,
            index: 0,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Drops every element and goes back to a brand new backing store of
    /// [`INITIAL_CAPACITY`] slots, discarding any capacity grown so far.
    pub fn clear(&mut self) {
        debug!(
            "clearing set of {} elements ({} slots)",
            self.elements.len(),
            self.capacity
        );
        self.elements = Vec::with_capacity(INITIAL_CAPACITY);
        self.capacity = INITIAL_CAPACITY;
    }

    fn ensure_capacity(&mut self) {
        if self.elements.len() < self.capacity {
            return;
        }
        let new_capacity = grown_capacity(self.capacity);
        debug!("growing set from {} to {} slots", self.capacity, new_capacity);
        let mut grown = Vec::with_capacity(new_capacity);
        grown.extend(self.elements.drain(..));
        self.elements = grown;
        self.capacity = new_capacity;
    }

    /// Copies the elements out, in order, into a new vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.elements.to_vec()
    }

    /// Fills `buffer` with the elements in order.
    ///
    /// If `buffer` is too short a freshly sized one is returned instead. If it
    /// is longer than the set, the slot right after the last element is set to
    /// `None` and anything past that is left alone.
    pub fn to_buffer(&self, mut buffer: Vec<Option<T>>) -> Vec<Option<T>>
    where
        T: Clone,
    {
        let len = self.elements.len();
        if buffer.len() < len {
            return self.elements.iter().cloned().map(Some).collect();
        }
        for (slot, element) in buffer.iter_mut().zip(&self.elements) {
            *slot = Some(element.clone());
        }
        if let Some(terminator) = buffer.get_mut(len) {
            *terminator = None;
        }
        buffer
    }
}

impl<T> ApplianceSet<T>
where
    T: PartialEq,
{
    pub fn with_item(item: T) -> Self {
        let mut set = Self::new();
        set.add(item);
        set
    }

    /// Builds a set from `items` in order. Later duplicates are dropped.
    pub fn from_items<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut set = Self::new();
        set.add_all(items);
        set
    }

    pub fn contains<'a>(&self, item: impl Into<Option<&'a T>>) -> bool
    where
        T: 'a,
    {
        match item.into() {
            Some(item) => self.elements.iter().any(|element| element == item),
            None => false,
        }
    }

    /// Appends `item` unless it is `None` or already present.
    pub fn add(&mut self, item: impl Into<Option<T>>) -> bool {
        let item = match item.into() {
            Some(item) => item,
            None => return false,
        };
        if self.contains(&item) {
            return false;
        }
        self.ensure_capacity();
        self.elements.push(item);
        true
    }

    /// Removes the element equal to `item`, shifting everything after it one
    /// slot to the left.
    pub fn remove<'a>(&mut self, item: impl Into<Option<&'a T>>) -> bool
    where
        T: 'a,
    {
        let item = match item.into() {
            Some(item) => item,
            None => return false,
        };
        match self.elements.iter().position(|element| element == item) {
            Some(index) => {
                self.elements.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains_all<'a, I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        items.into_iter().all(|item| self.contains(item))
    }

    /// Adds each of `items` in turn. Duplicates are judged against the set as
    /// it grows, so a repeat inside `items` is rejected too.
    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, items: I) -> bool {
        let mut modified = false;
        for item in items {
            if self.add(item) {
                modified = true;
            }
        }
        modified
    }

    /// Keeps only the elements that also appear in `items`.
    pub fn retain_all<'a, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let keep: Vec<&T> = items.into_iter().collect();
        let mut modified = false;
        let mut index = 0;
        while index < self.elements.len() {
            if keep.iter().any(|kept| **kept == self.elements[index]) {
                index += 1;
            } else {
                // the next survivor shifts into `index`, so don't advance
                self.elements.remove(index);
                modified = true;
            }
        }
        modified
    }

    pub fn remove_all<'a, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut modified = false;
        for item in items {
            if self.remove(item) {
                modified = true;
            }
        }
        modified
    }
}

impl<T> Default for ApplianceSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ApplianceSet<T> {
    fn clone(&self) -> Self {
        let mut elements = Vec::with_capacity(self.capacity);
        elements.extend(self.elements.iter().cloned());
        ApplianceSet {
            elements,
            capacity: self.capacity,
        }
    }
}

impl<T: PartialEq> FromIterator<T> for ApplianceSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl<T: PartialEq> Extend<T> for ApplianceSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T: fmt::Display> fmt::Display for ApplianceSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{{ ")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, " }}")
    }
}

/// A snapshot cursor over the occupied slots. Each call to
/// [`ApplianceSet::iter`] starts a new one from the first element.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    elements: &'a [T],
    index: usize,
}

impl<'a, T> Iter<'a, T> {
    pub fn has_next(&self) -> bool {
        self.index < self.elements.len()
    }

    /// Like [`Iterator::next`], but running off the end is an error rather
    /// than `None`.
    pub fn try_next(&mut self) -> Result<&'a T, SetError> {
        self.next().ok_or(SetError::IteratorExhausted)
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let element = self.elements.get(self.index)?;
        self.index += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.elements.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a ApplianceSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for ApplianceSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appliance::{Appliance, ApplianceKind};

    fn appliance(kind: ApplianceKind, brand: &str) -> Appliance {
        let (power, emission) = match kind {
            ApplianceKind::ElectricStove => (2000.0, 45.0),
            ApplianceKind::Hairdryer => (750.0, 1750.0),
            ApplianceKind::Microwave => (800.0, 175.0),
            ApplianceKind::VacuumCleaner => (1200.0, 700.0),
            ApplianceKind::WashingMachine => (900.0, 42.0),
        };
        Appliance::new(kind, brand, power, emission).unwrap()
    }

    fn ordered(set: &ApplianceSet<&'static str>) -> Vec<&'static str> {
        set.iter().copied().collect()
    }

    #[test]
    fn empty_set() {
        let set: ApplianceSet<i32> = ApplianceSet::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert_eq!(set.capacity(), INITIAL_CAPACITY);
        assert!(!set.contains(&1));
    }

    #[test]
    fn add_rejects_duplicates() {
        let stove = appliance(ApplianceKind::ElectricStove, "Bosch");
        let mut set: ApplianceSet<Appliance> = ApplianceSet::new();
        assert!(set.add(stove.clone()));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&stove));

        assert!(!set.add(stove.clone()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn absent_operands_are_rejected() {
        let mut set = ApplianceSet::from_items(["a", "b"]);
        assert!(!set.add(None::<&str>));
        assert!(!set.remove(None::<&&str>));
        assert!(!set.contains(None::<&&str>));
        assert_eq!(ordered(&set), vec!["a", "b"]);
    }

    #[test]
    fn size_counts_distinct_values() {
        let mut set: ApplianceSet<i32> = ApplianceSet::new();
        let inputs = [3, 1, 3, 4, 1, 5, 9, 2, 6, 5, 3, 5];
        let mut seen = Vec::new();
        for n in inputs {
            set.add(n);
            if !seen.contains(&n) {
                seen.push(n);
            }
            assert_eq!(set.len(), seen.len());
        }
        assert_eq!(set.to_vec(), seen);
    }

    #[test]
    fn with_item_and_from_items() {
        let set = ApplianceSet::with_item("only");
        assert_eq!(ordered(&set), vec!["only"]);

        let set = ApplianceSet::from_items(["x", "y", "x", "z", "y"]);
        assert_eq!(ordered(&set), vec!["x", "y", "z"]);
    }

    #[test]
    fn add_all_judges_against_growing_set() {
        let hairdryer = appliance(ApplianceKind::Hairdryer, "Samsung");
        let washing_machine = appliance(ApplianceKind::WashingMachine, "Panasonic");
        let vacuum = appliance(ApplianceKind::VacuumCleaner, "Philips");
        let microwave = appliance(ApplianceKind::Microwave, "LG");

        let mut set = ApplianceSet::from_items([hairdryer.clone(), washing_machine.clone()]);
        assert_eq!(set.len(), 2);

        assert!(set.add_all([vacuum.clone(), washing_machine.clone(), microwave.clone()]));
        assert_eq!(set.len(), 4);
        assert_eq!(
            set.to_vec(),
            vec![hairdryer, washing_machine, vacuum, microwave]
        );

        let mut set: ApplianceSet<&str> = ApplianceSet::new();
        assert!(set.add_all(["a", "a", "b"]));
        assert_eq!(ordered(&set), vec!["a", "b"]);
        assert!(!set.add_all(["b", "a"]));
    }

    #[test]
    fn remove_closes_gap() {
        let mut set = ApplianceSet::from_items(["a", "b", "c", "d"]);
        assert!(set.remove(&"b"));
        assert_eq!(ordered(&set), vec!["a", "c", "d"]);
        assert_eq!(set.len(), 3);

        assert!(!set.remove(&"b"));
        assert_eq!(set.len(), 3);

        assert!(set.remove(&"d"));
        assert!(set.remove(&"a"));
        assert_eq!(ordered(&set), vec!["c"]);
    }

    #[test]
    fn grows_by_thirty_percent_when_full() {
        let mut set: ApplianceSet<usize> = ApplianceSet::new();
        for n in 0..INITIAL_CAPACITY {
            set.add(n);
        }
        assert_eq!(set.capacity(), INITIAL_CAPACITY);

        set.add(INITIAL_CAPACITY);
        assert_eq!(set.capacity(), 19);
        assert_eq!(set.to_vec(), (0..=INITIAL_CAPACITY).collect::<Vec<_>>());

        for n in INITIAL_CAPACITY + 1..19 {
            set.add(n);
        }
        assert_eq!(set.capacity(), 19);
        set.add(19usize);
        assert_eq!(set.capacity(), 24);

        for n in 20..24usize {
            set.add(n);
        }
        set.add(24usize);
        assert_eq!(set.capacity(), 31);
        assert_eq!(set.len(), 25);
        assert_eq!(set.to_vec(), (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn rejected_add_does_not_grow() {
        let mut set: ApplianceSet<usize> = (0..INITIAL_CAPACITY).collect();
        assert!(!set.add(0usize));
        assert_eq!(set.capacity(), INITIAL_CAPACITY);
    }

    #[test]
    fn removal_keeps_capacity() {
        let mut set: ApplianceSet<usize> = (0..20).collect();
        assert_eq!(set.capacity(), 24);
        for n in 0..20usize {
            set.remove(&n);
        }
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 24);
    }

    #[test]
    fn clear_resets_capacity() {
        let mut set: ApplianceSet<usize> = (0..40).collect();
        assert!(set.capacity() > INITIAL_CAPACITY);

        set.clear();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert_eq!(set.capacity(), INITIAL_CAPACITY);

        assert!(set.add(7usize));
        assert_eq!(set.to_vec(), vec![7]);
    }

    #[test]
    fn contains_all() {
        let set = ApplianceSet::from_items(["a", "b", "c"]);
        assert!(set.contains_all(&["c", "a"]));
        assert!(set.contains_all(&[]));
        assert!(!set.contains_all(&["a", "q"]));
    }

    #[test]
    fn retain_all_keeps_common_elements() {
        let mut set = ApplianceSet::from_items(["a", "b", "c", "d", "e"]);
        assert!(set.retain_all(&["e", "b", "c", "x"]));
        assert_eq!(ordered(&set), vec!["b", "c", "e"]);

        assert!(!set.retain_all(&["b", "c", "e"]));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn retain_all_handles_adjacent_removals() {
        let mut set = ApplianceSet::from_items(["a", "b", "c", "d", "e", "f"]);
        assert!(set.retain_all(&["a", "f"]));
        assert_eq!(ordered(&set), vec!["a", "f"]);

        assert!(set.retain_all(&[]));
        assert!(set.is_empty());
    }

    #[test]
    fn remove_all_drops_listed_elements() {
        let mut set = ApplianceSet::from_items(["a", "b", "c", "d"]);
        assert!(set.remove_all(&["d", "x", "b"]));
        assert_eq!(ordered(&set), vec!["a", "c"]);

        assert!(!set.remove_all(&["x", "y"]));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn iteration_is_restartable() {
        let set = ApplianceSet::from_items([10, 20, 30]);
        let first: Vec<_> = set.iter().collect();
        let second: Vec<_> = (&set).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(set.iter().len(), 3);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[test]
    fn exhausted_iterator_reports_error() {
        let set = ApplianceSet::with_item(1);
        let mut iter = set.iter();
        assert!(iter.has_next());
        assert_eq!(iter.try_next(), Ok(&1));
        assert!(!iter.has_next());
        assert_eq!(iter.try_next(), Err(SetError::IteratorExhausted));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn to_vec_round_trip() {
        let mut set = ApplianceSet::from_items(["d", "a", "c", "b"]);
        set.remove(&"a");
        let copy = ApplianceSet::from_items(set.to_vec());
        assert_eq!(copy.len(), set.len());
        assert_eq!(ordered(&copy), ordered(&set));
    }

    #[test]
    fn to_buffer_reallocates_when_short() {
        let set = ApplianceSet::from_items(["a", "b", "c"]);
        let buffer = set.to_buffer(vec![Some("z")]);
        assert_eq!(buffer, vec![Some("a"), Some("b"), Some("c")]);

        let buffer = set.to_buffer(Vec::new());
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn to_buffer_terminates_long_buffer() {
        let set = ApplianceSet::from_items(["a", "b"]);
        let buffer = set.to_buffer(vec![Some("x"); 5]);
        assert_eq!(
            buffer,
            vec![Some("a"), Some("b"), None, Some("x"), Some("x")]
        );

        let buffer = set.to_buffer(vec![None, None]);
        assert_eq!(buffer, vec![Some("a"), Some("b")]);
    }

    #[test]
    fn display_format() {
        let empty: ApplianceSet<&str> = ApplianceSet::new();
        assert_eq!(empty.to_string(), "\n{  }");

        let set = ApplianceSet::from_items(["a", "b", "c"]);
        assert_eq!(set.to_string(), "\n{ a; b; c }");

        let stove = appliance(ApplianceKind::ElectricStove, "Bosch");
        let hairdryer = appliance(ApplianceKind::Hairdryer, "Samsung");
        let set = ApplianceSet::from_items([stove, hairdryer]);
        assert_eq!(set.to_string(), "\n{ Electric stove; Hairdryer }");
    }

    #[test]
    fn clone_is_independent() {
        let set: ApplianceSet<usize> = (0..16).collect();
        let mut copy = set.clone();
        assert_eq!(copy.capacity(), set.capacity());
        copy.remove(&0usize);
        assert_eq!(set.len(), 16);
        assert_eq!(copy.len(), 15);
    }
}
