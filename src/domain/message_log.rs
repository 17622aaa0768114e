use super::message::Message;

/// Append-only, ordered history of chat turns.
///
/// Entries are never removed, reordered or edited once appended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageLog {
    entries: Vec<Message>,
}

impl MessageLog {
    pub fn append(&mut self, message: Message) {
        self.entries.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.entries
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    /// Returns the entries appended at or after `offset`.
    pub fn since(&self, offset: usize) -> &[Message] {
        self.entries.get(offset..).unwrap_or(&[])
    }
}
