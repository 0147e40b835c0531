//! Module `framing`
//!
//! Newline-delimited framing. Outbound lines get a single `\n` appended;
//! inbound bytes are accumulated in a [`LineBuffer`] until a delimiter shows up,
//! since a transport read may hold part of a line, or several lines.

/// Frame delimiter on the wire.
pub const DELIMITER: u8 = b'\n';

/// Encodes `text` as one frame. Returns `None` if `text` already contains the
/// delimiter, which would split it into several frames.
pub fn encode_line(text: &str) -> Option<Vec<u8>> {
    if text.as_bytes().contains(&DELIMITER) {
        return None;
    }
    let mut frame = Vec::with_capacity(text.len() + 1);
    frame.extend_from_slice(text.as_bytes());
    frame.push(DELIMITER);
    Some(frame)
}

/// Bytes received from the peer that do not yet form a complete line.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
    /// Prefix of `pending` already known to hold no delimiter.
    scanned: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk read from the transport.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Removes and returns the next complete line, decoded as UTF-8 (invalid
    /// sequences replaced) with trailing whitespace trimmed.
    pub fn next_line(&mut self) -> Option<String> {
        let offset = self.pending[self.scanned..]
            .iter()
            .position(|&b| b == DELIMITER);

        match offset {
            Some(offset) => {
                let end = self.scanned + offset;
                let line: Vec<u8> = self.pending.drain(..=end).collect();
                self.scanned = 0;
                Some(String::from_utf8_lossy(&line).trim_end().to_string())
            }
            None => {
                self.scanned = self.pending.len();
                None
            }
        }
    }

    /// Number of buffered bytes not yet returned as a line.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.scanned = 0;
    }
}
