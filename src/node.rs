use std::fmt;
use std::ptr::NonNull;

/// A node in the singly linked list
///
/// Nodes are only ever created by the list that owns them. The value is public,
/// the link is not: a node can be read through [`Node::next`] but never relinked
/// from outside the list.
pub struct Node<T> {
    pub value: T,
    pub(crate) next: Option<NonNull<Node<T>>>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T) -> Box<Self> {
        Box::new(Node { value, next: None })
    }

    /// Allocates a node and hands its ownership over as a pointer
    /// The pointer must eventually be reclaimed with [`Node::reclaim`]
    pub(crate) fn into_raw(value: T) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Node::new(value)))
    }

    /// Takes ownership back and returns the stored value
    ///
    /// # Safety
    /// `node` must come from [`Node::into_raw`], must not be reachable from any
    /// list anymore and must not be reclaimed twice.
    pub(crate) unsafe fn reclaim(node: NonNull<Node<T>>) -> T {
        let boxed = unsafe { Box::from_raw(node.as_ptr()) };
        boxed.value
    }

    /// Returns the next node, or None if this is the last one
    pub fn next(&self) -> Option<&Node<T>> {
        self.next.map(|node| unsafe { &*node.as_ptr() })
    }

    /// Returns true if no node follows this one
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("is_last", &self.is_last())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_last() {
        let node = Node::new(7);
        assert_eq!(node.value, 7);
        assert!(node.is_last());
        assert!(node.next().is_none());
    }

    #[test]
    fn test_into_raw_and_reclaim() {
        let raw = Node::into_raw(String::from("a"));
        let value = unsafe { Node::reclaim(raw) };
        assert_eq!(value, "a");
    }

    #[test]
    fn test_next_follows_link() {
        let second = Node::into_raw(2);
        let mut first = Node::new(1);
        first.next = Some(second);

        assert!(!first.is_last());
        assert_eq!(first.next().map(|n| n.value), Some(2));

        first.next = None;
        assert_eq!(unsafe { Node::reclaim(second) }, 2);
    }

    #[test]
    fn test_debug() {
        let node = Node::new(3);
        assert_eq!(format!("{:?}", node), "Node { value: 3, is_last: true }");
    }
}
