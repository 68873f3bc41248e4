//! Arena-backed doubly linked recency list.
//!
//! Nodes live in a slot arena owned by the list and are linked through
//! [`Slot`] handles instead of pointers. A handle stays valid from the
//! `push_front` that returned it until the node is removed; freed slots are
//! recycled by later insertions.
//!
//! The front of the list is the most recently used position, the back is the
//! least recently used one.

use core::fmt;

/// Stable handle to a node in a [`List`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Slot(usize);

struct Node<T> {
    value: T,
    prev: Option<Slot>,
    next: Option<Slot>,
}

/// A doubly linked list whose nodes are stored in a local arena.
pub(crate) struct List<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<Slot>,
    tail: Option<Slot>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub(crate) fn new() -> Self {
        List {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the handle of the least recently used node.
    #[cfg(test)]
    pub(crate) fn back(&self) -> Option<Slot> {
        self.tail
    }

    /// Returns the handle of the most recently used node.
    #[cfg(test)]
    pub(crate) fn front(&self) -> Option<Slot> {
        self.head
    }

    pub(crate) fn get(&self, slot: Slot) -> Option<&T> {
        self.node(slot).map(|node| &node.value)
    }

    #[cfg(test)]
    pub(crate) fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        self.nodes
            .get_mut(slot.0)
            .and_then(Option::as_mut)
            .map(|node| &mut node.value)
    }

    /// Inserts `value` at the front and returns its handle.
    pub(crate) fn push_front(&mut self, value: T) -> Slot {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        let slot = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                Slot(idx)
            }
            None => {
                self.nodes.push(Some(node));
                Slot(self.nodes.len() - 1)
            }
        };
        self.attach_front(slot);
        self.len += 1;
        slot
    }

    /// Moves an existing node to the front. Unknown handles are ignored.
    pub(crate) fn move_to_front(&mut self, slot: Slot) {
        if self.head == Some(slot) || self.node(slot).is_none() {
            return;
        }
        self.detach(slot);
        self.attach_front(slot);
    }

    /// Unlinks the node behind `slot` and returns its value.
    pub(crate) fn remove(&mut self, slot: Slot) -> Option<T> {
        self.node(slot)?;
        self.detach(slot);
        let node = self.nodes[slot.0].take()?;
        self.free.push(slot.0);
        self.len -= 1;
        Some(node.value)
    }

    /// Unlinks the least recently used node and returns its value.
    pub(crate) fn remove_last(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(tail)
    }

    /// Drops every node and releases the arena.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates values from the front (most recent) to the back.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn node(&self, slot: Slot) -> Option<&Node<T>> {
        self.nodes.get(slot.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, slot: Slot) -> &mut Node<T> {
        match self.nodes[slot.0].as_mut() {
            Some(node) => node,
            None => unreachable!("linked slot {} is vacant", slot.0),
        }
    }

    fn detach(&mut self, slot: Slot) {
        let (prev, next) = {
            let node = self.node_mut(slot);
            (node.prev.take(), node.next.take())
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }

    fn attach_front(&mut self, slot: Slot) {
        let old_head = self.head;
        {
            let node = self.node_mut(slot);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head) => self.node_mut(head).prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        List::new()
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("len", &self.len)
            .field("slots", &self.nodes.len())
            .finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct Iter<'a, T> {
    list: &'a List<T>,
    cursor: Option<Slot>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(list: &List<u32>) -> Vec<u32> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_push_front_orders_most_recent_first() {
        let mut list = List::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);
        assert_eq!(values(&list), vec![3, 2, 1]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::new();
        let a = list.push_front(1);
        let b = list.push_front(2);
        list.push_front(3);

        list.move_to_front(a);
        assert_eq!(values(&list), vec![1, 3, 2]);

        // Moving the head is a no-op.
        list.move_to_front(a);
        assert_eq!(values(&list), vec![1, 3, 2]);

        list.move_to_front(b);
        assert_eq!(values(&list), vec![2, 1, 3]);
        assert_eq!(list.get(list.back().unwrap()), Some(&3));
    }

    #[test]
    fn test_remove_last() {
        let mut list = List::new();
        list.push_front(1);
        list.push_front(2);
        assert_eq!(list.remove_last(), Some(1));
        assert_eq!(list.remove_last(), Some(2));
        assert_eq!(list.remove_last(), None);
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn test_remove_middle_and_stale_handle() {
        let mut list = List::new();
        list.push_front(1);
        let mid = list.push_front(2);
        list.push_front(3);

        assert_eq!(list.remove(mid), Some(2));
        assert_eq!(values(&list), vec![3, 1]);
        assert_eq!(list.remove(mid), None);
        assert_eq!(list.get(mid), None);
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut list = List::new();
        let a = list.push_front(1);
        list.remove(a);
        let b = list.push_front(2);
        assert_eq!(a, b);
        assert_eq!(list.get(b), Some(&2));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_get_mut_and_clear() {
        let mut list = List::new();
        let a = list.push_front(10);
        *list.get_mut(a).unwrap() += 5;
        assert_eq!(list.get(a), Some(&15));

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        let b = list.push_front(7);
        assert_eq!(values(&list), vec![7]);
        assert_eq!(list.front(), Some(b));
    }
}
