use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use tracing::trace;

use crate::node::Node;

/// A singly linked list implementation using unsafe pointers
///
/// The list owns every node reachable from `head`. `tail` never owns anything,
/// it only locates the last node so that `append` and `back` stay O(1).
/// There is no back link: `pop` walks from the head to find the new tail.
pub struct SinglyLinkedList<T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    length: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

// The list owns its nodes like a Box does. Sharing across threads still needs
// one external lock around the whole list.
unsafe impl<T: Send> Send for SinglyLinkedList<T> {}
unsafe impl<T: Sync> Sync for SinglyLinkedList<T> {}

impl<T> SinglyLinkedList<T> {
    /// Creates a new empty list
    pub fn new() -> Self {
        SinglyLinkedList {
            head: None,
            tail: None,
            length: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a list holding a single value, head and tail are the same node
    pub fn with_value(value: T) -> Self {
        let mut list = Self::new();
        list.append(value);
        list
    }

    /// Returns the length of the list
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the list is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Adds an element to the back of the list
    pub fn append(&mut self, value: T) {
        let new_node = Node::into_raw(value);

        match self.tail {
            // Empty list
            None => self.head = Some(new_node),
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(new_node) },
        }
        self.tail = Some(new_node);
        self.length += 1;
    }

    /// Adds an element to the front of the list
    pub fn prepend(&mut self, value: T) {
        let new_node = Node::into_raw(value);

        match self.head {
            // Empty list
            None => self.tail = Some(new_node),
            Some(head) => unsafe { (*new_node.as_ptr()).next = Some(head) },
        }
        self.head = Some(new_node);
        self.length += 1;
    }

    /// Removes and returns the element from the back of the list
    ///
    /// Runs in O(n): without a back link the node before the tail can only be
    /// found by walking from the head.
    pub fn pop(&mut self) -> Option<T> {
        let (Some(head), Some(old_tail)) = (self.head, self.tail) else {
            trace!(len = self.length, "pop on empty list");
            return None;
        };

        if head == old_tail {
            // This was the only node
            self.head = None;
            self.tail = None;
        } else {
            let steps = self.length - 2;
            let before = self.walk(steps);
            unsafe {
                debug_assert_eq!((*before.as_ptr()).next, Some(old_tail));
                (*before.as_ptr()).next = None;
            }
            trace!(steps, len = self.length, "pop walked to new tail");
            self.tail = Some(before);
        }

        self.length -= 1;
        Some(unsafe { Node::reclaim(old_tail) })
    }

    /// Removes and returns the element from the front of the list
    pub fn pop_first(&mut self) -> Option<T> {
        let Some(old_head) = self.head else {
            trace!(len = self.length, "pop_first on empty list");
            return None;
        };

        self.head = unsafe { (*old_head.as_ptr()).next };
        self.length -= 1;
        if self.length == 0 {
            self.tail = None;
        }

        Some(unsafe { Node::reclaim(old_head) })
    }

    /// Returns the node at `index`, counting from 0 at the head
    /// Returns None if `index >= len()`
    pub fn get(&self, index: usize) -> Option<&Node<T>> {
        self.node_at(index).map(|node| unsafe { &*node.as_ptr() })
    }

    /// Returns a mutable reference to the value at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.node_at(index).map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Overwrites the value at `index`
    /// Returns false and leaves the list untouched if `index >= len()`
    pub fn set(&mut self, index: usize, value: T) -> bool {
        match self.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Inserts a value so that it ends up at `index`
    ///
    /// Valid indices are `0..=len()`: inserting at `len()` appends. Returns false
    /// and leaves the list untouched for anything larger.
    pub fn insert(&mut self, index: usize, value: T) -> bool {
        if index > self.length {
            trace!(index, len = self.length, "insert out of range");
            return false;
        }
        if index == 0 {
            self.prepend(value);
            return true;
        }
        if index == self.length {
            self.append(value);
            return true;
        }

        let before = self.walk(index - 1);
        let new_node = Node::into_raw(value);
        unsafe {
            (*new_node.as_ptr()).next = (*before.as_ptr()).next;
            (*before.as_ptr()).next = Some(new_node);
        }
        self.length += 1;
        true
    }

    /// Removes and returns the value at `index`
    /// Valid indices are `0..len()`, returns None for anything else
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.length {
            trace!(index, len = self.length, "remove out of range");
            return None;
        }
        if index == 0 {
            return self.pop_first();
        }
        if index == self.length - 1 {
            return self.pop();
        }

        let before = self.walk(index - 1);
        let target = unsafe {
            let before = before.as_ptr();
            // index < len - 1, so the target has a predecessor and a successor
            let target = (*before).next.unwrap_unchecked();
            (*before).next = (*target.as_ptr()).next;
            target
        };
        self.length -= 1;
        Some(unsafe { Node::reclaim(target) })
    }

    /// Reverses the list in place, the old tail becomes the head
    pub fn reverse(&mut self) {
        let mut current = self.head;
        if current.is_none() {
            return;
        }
        mem::swap(&mut self.head, &mut self.tail);

        let mut before = None;
        for _ in 0..self.length {
            unsafe {
                let node = current.unwrap_unchecked();
                current = (*node.as_ptr()).next;
                (*node.as_ptr()).next = before;
                before = Some(node);
            }
        }
        debug_assert!(current.is_none());
    }

    /// Returns a reference to the front element without removing it
    pub fn front(&self) -> Option<&T> {
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns a mutable reference to the front element without removing it
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Returns a reference to the back element without removing it
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns a mutable reference to the back element without removing it
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Removes all elements from the list
    pub fn clear(&mut self) {
        let mut current = self.head.take();
        self.tail = None;
        self.length = 0;

        while let Some(node) = current {
            unsafe {
                current = (*node.as_ptr()).next;
                drop(Node::reclaim(node));
            }
        }
    }

    /// Returns an iterator over the list that borrows the list
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            current: self.head,
            remaining: self.length,
            _marker: PhantomData,
        }
    }

    /// Returns a mutable iterator over the list that borrows the list mutably
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            current: self.head,
            remaining: self.length,
            _marker: PhantomData,
        }
    }

    /// Looks up the node at `index`, None if out of range
    /// The last index resolves through the tail pointer without walking.
    fn node_at(&self, index: usize) -> Option<NonNull<Node<T>>> {
        if index >= self.length {
            trace!(index, len = self.length, "index out of range");
            return None;
        }
        if index == self.length - 1 {
            return self.tail;
        }
        Some(self.walk(index))
    }

    /// Follows `index` links from the head
    /// Callers check `index < len()` first.
    fn walk(&self, index: usize) -> NonNull<Node<T>> {
        debug_assert!(index < self.length, "walk past the tail");

        let mut current = self.head;
        for _ in 0..index {
            current = current.and_then(|node| unsafe { (*node.as_ptr()).next });
        }
        // Every link before position len - 1 is non-null
        unsafe { current.unwrap_unchecked() }
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for SinglyLinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for SinglyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SinglyLinkedList<T> {}

impl<T: fmt::Debug> fmt::Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the values head to tail, e.g. `10 -> 20 -> 30`
impl<T: fmt::Display> fmt::Display for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for SinglyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> From<Vec<T>> for SinglyLinkedList<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for SinglyLinkedList<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

/// An iterator over the list that consumes the list
pub struct IntoIter<T>(SinglyLinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            return None;
        }
        self.0.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// An iterator over the list that borrows the list
pub struct Iter<'a, T> {
    current: Option<NonNull<Node<T>>>,
    remaining: usize,
    _marker: PhantomData<&'a Node<T>>,
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| unsafe {
            let node = &*node.as_ptr();
            self.current = node.next;
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            current: self.current,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

/// A mutable iterator over the list that borrows the list mutably
pub struct IterMut<'a, T> {
    current: Option<NonNull<Node<T>>>,
    remaining: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| unsafe {
            let node = &mut *node.as_ptr();
            self.current = node.next;
            self.remaining -= 1;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> IntoIterator for SinglyLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SinglyLinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
