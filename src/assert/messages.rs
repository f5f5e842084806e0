//! Extra diagnostic text attached to the report of the running test.
//!
//! Messages are buffered per thread. The runner clears the buffer before each
//! test and drains it afterwards, printing `Always` messages unconditionally
//! and `OnFailure` messages only when the test failed.

use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Always,
    OnFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

thread_local! {
    static MESSAGES: RefCell<Vec<Message>> = const { RefCell::new(Vec::new()) };
}

fn push(kind: MessageKind, text: String) {
    MESSAGES.with(|messages| messages.borrow_mut().push(Message { kind, text }));
}

/// Queues text that is printed with the test's report whatever the outcome.
pub fn message_always(text: impl Into<String>) {
    push(MessageKind::Always, text.into());
}

/// Queues text that is printed only if the test ends up failing.
pub fn message_on_failure(text: impl Into<String>) {
    push(MessageKind::OnFailure, text.into());
}

/// Discards everything buffered on this thread.
pub fn reset_messages() {
    MESSAGES.with(|messages| messages.borrow_mut().clear());
}

/// Drains the buffer, keeping only what should be shown for the outcome.
pub fn take_messages(failed: bool) -> Vec<Message> {
    let drained = MESSAGES.with(|messages| std::mem::take(&mut *messages.borrow_mut()));
    drained
        .into_iter()
        .filter(|message| failed || message.kind == MessageKind::Always)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_keeps_only_always_messages_in_order() {
        reset_messages();
        message_on_failure("hidden");
        message_always("first");
        message_always("second");
        let texts: Vec<_> = take_messages(false).into_iter().map(|m| m.text).collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[test]
    fn test_failure_keeps_everything_and_drains() {
        reset_messages();
        message_always("a");
        message_on_failure("b");
        let kinds: Vec<_> = take_messages(true).into_iter().map(|m| m.kind).collect();
        assert_eq!(kinds, [MessageKind::Always, MessageKind::OnFailure]);
        assert!(take_messages(true).is_empty());
    }

    #[test]
    fn test_buffers_are_per_thread() {
        reset_messages();
        message_always("main");
        std::thread::spawn(|| {
            assert!(take_messages(true).is_empty());
            message_always("worker");
        })
        .join()
        .unwrap();
        let texts: Vec<_> = take_messages(true).into_iter().map(|m| m.text).collect();
        assert_eq!(texts, ["main"]);
    }
}
