use sll::SinglyLinkedList;
use std::io;
use std::sync::{Arc, Mutex};

/// Collects the values head to tail
#[allow(dead_code)]
pub fn values<T: Clone>(list: &SinglyLinkedList<T>) -> Vec<T> {
    list.iter().cloned().collect()
}

/// Checks head, tail and length against a walk of the links
#[allow(dead_code)]
pub fn assert_invariants<T: PartialEq + std::fmt::Debug>(list: &SinglyLinkedList<T>) {
    let len = list.len();
    assert_eq!(list.is_empty(), len == 0);
    assert_eq!(list.iter().count(), len);

    if len == 0 {
        assert!(list.front().is_none());
        assert!(list.back().is_none());
        assert!(list.get(0).is_none());
        return;
    }

    let head = list.get(0).expect("non-empty list has a head");
    assert_eq!(list.front(), Some(&head.value));

    // Walking the node links reaches the tail in exactly len - 1 steps
    let mut node = head;
    for _ in 1..len {
        node = node.next().expect("link ended before len");
    }
    assert!(node.is_last());
    assert_eq!(list.back(), Some(&node.value));
    assert!(list.get(len).is_none());
}

/// Shared buffer the fmt subscriber writes into
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a trace level subscriber and returns one line per event
#[allow(dead_code)]
pub fn capture_events(f: impl FnOnce()) -> Vec<String> {
    let output = CapturedOutput::default();
    let writer = output.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = output.0.lock().unwrap().clone();
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

/// Checks a captured line is a trace event with the given message and fields
#[allow(dead_code)]
pub fn assert_event(line: &str, message: &str, fields: &[&str]) {
    assert!(line.contains("TRACE"), "not a trace event: {}", line);
    assert!(line.contains(message), "expected {:?} in {}", message, line);
    for field in fields {
        assert!(line.contains(field), "expected {:?} in {}", field, line);
    }
}
