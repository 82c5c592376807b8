//! Borrowing and owning iterators.
//!
//! Borrowing iterators walk at most two physical runs, so they are as
//! cheap as iterating two slices. They hold a borrow of the buffer, which
//! statically rules out mutation while they are alive.

use std::iter::FusedIterator;
use std::slice;

use crate::ring::RingBuf;

fn occupied<T>(slot: &Option<T>) -> &T {
    slot.as_ref()
        .expect("live slot inside [head, tail) is always occupied")
}

fn occupied_mut<T>(slot: &mut Option<T>) -> &mut T {
    slot.as_mut()
        .expect("live slot inside [head, tail) is always occupied")
}

/// Front-to-back iterator over shared references.
///
/// Created by [`RingBuf::iter`] and [`RingBuf::iter_range`].
pub struct Iter<'a, T> {
    first: slice::Iter<'a, Option<T>>,
    second: slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new((first, second): (&'a [Option<T>], &'a [Option<T>])) -> Self {
        Self {
            first: first.iter(),
            second: second.iter(),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match self.first.next() {
            Some(slot) => Some(occupied(slot)),
            None => self.second.next().map(occupied),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.first.len() + self.second.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self.second.next_back() {
            Some(slot) => Some(occupied(slot)),
            None => self.first.next_back().map(occupied),
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Front-to-back iterator over mutable references.
///
/// Created by [`RingBuf::iter_mut`].
pub struct IterMut<'a, T> {
    first: slice::IterMut<'a, Option<T>>,
    second: slice::IterMut<'a, Option<T>>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new((first, second): (&'a mut [Option<T>], &'a mut [Option<T>])) -> Self {
        Self {
            first: first.iter_mut(),
            second: second.iter_mut(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        match self.first.next() {
            Some(slot) => Some(occupied_mut(slot)),
            None => self.second.next().map(occupied_mut),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.first.len() + self.second.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self.second.next_back() {
            Some(slot) => Some(occupied_mut(slot)),
            None => self.first.next_back().map(occupied_mut),
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning front-to-back iterator.
///
/// Created by `RingBuf::into_iter`. Elements handed out are owned by the
/// caller and never reach the disposer; elements left when the iterator is
/// dropped are disposed as usual.
pub struct IntoIter<T> {
    ring: RingBuf<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(ring: RingBuf<T>) -> Self {
        Self { ring }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.ring.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.ring.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.ring.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use crate::config::RingConfig;
    use crate::ring::RingBuf;

    fn wrapped() -> RingBuf<u32> {
        // Capacity 4: head ends at slot 3, elements wrap.
        let mut ring = RingBuf::new(RingConfig::new(4).with_min_capacity(1)).unwrap();
        for v in 0..3 {
            ring.insert_back(v).unwrap();
        }
        for _ in 0..3 {
            ring.pop_front();
        }
        for v in 1..=4 {
            ring.insert_back(v).unwrap();
        }
        ring
    }

    #[test]
    fn iter_crosses_physical_end() {
        let ring = wrapped();
        let v: Vec<u32> = ring.iter().copied().collect();
        assert_eq!(v, vec![1, 2, 3, 4]);
        assert_eq!(ring.iter().len(), 4);
    }

    #[test]
    fn iter_backwards() {
        let ring = wrapped();
        let v: Vec<u32> = ring.iter().rev().copied().collect();
        assert_eq!(v, vec![4, 3, 2, 1]);
    }

    #[test]
    fn iter_mut_updates_in_place() {
        let mut ring = wrapped();
        for v in ring.iter_mut() {
            *v *= 10;
        }
        let v: Vec<u32> = ring.iter().copied().collect();
        assert_eq!(v, vec![10, 20, 30, 40]);
    }

    #[test]
    fn into_iter_from_both_ends() {
        let ring = wrapped();
        let mut it = ring.into_iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next_back(), Some(4));
        assert_eq!(it.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn iter_of_empty_ring() {
        let ring: RingBuf<u32> = RingBuf::with_capacity(4).unwrap();
        assert_eq!(ring.iter().next(), None);
        assert_eq!(ring.iter().len(), 0);
    }
}
