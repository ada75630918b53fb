//! A single threaded singly linked list.
//!
//! [`SinglyLinkedList`] tracks its head, tail and length. Appending, prepending
//! and removing from the front are O(1); removing from the back walks the list
//! because nodes only link forward. Indexed access, splicing and in-place
//! reversal are O(n).
//!
//! Missing indices and empty lists are not errors: lookups and removals return
//! `None`, `insert` and `set` return `false`, and the list is left untouched.
//!
//! ```
//! use sll::SinglyLinkedList;
//!
//! let mut list = SinglyLinkedList::from([10, 20, 30, 40]);
//! assert!(list.insert(2, 25));
//! assert_eq!(list.to_string(), "10 -> 20 -> 25 -> 30 -> 40");
//! assert_eq!(list.remove(2), Some(25));
//!
//! list.reverse();
//! assert_eq!(list.front(), Some(&40));
//! assert_eq!(list.pop(), Some(10));
//! ```

pub mod list;
pub mod node;

pub use list::{IntoIter, Iter, IterMut, SinglyLinkedList};
pub use node::Node;
