//! Line decoder for `text/event-stream` bodies.
//!
//! Bytes are buffered until a newline arrives, so a record split across
//! network chunks (including a split UTF-8 sequence) is reassembled before it
//! is inspected. Only `data:` lines carry frames; every other line is dropped.
//!
//! A line longer than the decoder's limit is discarded up to its newline.

use tracing::warn;

/// Prefix of a data record.
pub const DATA_PREFIX: &str = "data:";

/// Default cap on bytes buffered for one unfinished line.
pub const MAX_LINE_BYTES: usize = 1 << 20;

/// Incremental splitter from raw chunks to `data:` payloads.
#[derive(Debug)]
pub struct EventDecoder {
    buffer: Vec<u8>,
    max_line: usize,
    /// Inside an oversized line; bytes up to the next newline are ignored.
    discarding: bool,
    oversized: usize,
}

impl Default for EventDecoder {
    fn default() -> Self {
        Self::with_max_line(MAX_LINE_BYTES)
    }
}

impl EventDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_line(max_line: usize) -> Self {
        Self {
            buffer: Vec::new(),
            max_line,
            discarding: false,
            oversized: 0,
        }
    }

    /// Feed one chunk and return the payloads of every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        let mut start = 0;
        while let Some(pos) = self.buffer[start..].iter().position(|&b| b == b'\n') {
            if self.discarding {
                self.discarding = false;
            } else if let Some(payload) = data_payload(&self.buffer[start..start + pos]) {
                payloads.push(payload);
            }
            start += pos + 1;
        }
        self.buffer.drain(..start);

        if self.discarding {
            self.buffer.clear();
        } else if self.buffer.len() > self.max_line {
            warn!(
                pending = self.buffer.len(),
                limit = self.max_line,
                "dropping oversized line"
            );
            self.oversized += 1;
            self.discarding = true;
            self.buffer.clear();
        }
        payloads
    }

    /// Flush a trailing line that never got its newline.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        if std::mem::take(&mut self.discarding) {
            return None;
        }
        data_payload(&rest)
    }

    /// Bytes waiting for a newline.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Lines dropped for exceeding the limit.
    pub fn oversized(&self) -> usize {
        self.oversized
    }
}

fn data_payload(line: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(line);
    text.trim()
        .strip_prefix(DATA_PREFIX)
        .map(|rest| rest.trim().to_string())
        .filter(|payload| !payload.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BODY: &str = "data: {\"epoch\":1}\n\n: keep-alive\nevent: frame\ndata: {\"epoch\":2}\r\n\ndata: {\"q\":\"\u{00e9}\u{4e2d}\"}\n\n";

    fn decode_all(chunks: &[&[u8]]) -> Vec<String> {
        let mut decoder = EventDecoder::new();
        let mut out: Vec<String> = chunks.iter().flat_map(|c| decoder.push(c)).collect();
        out.extend(decoder.finish());
        out
    }

    #[test]
    fn test_single_chunk() {
        let payloads = decode_all(&[BODY.as_bytes()]);
        assert_eq!(
            payloads,
            vec![
                r#"{"epoch":1}"#.to_string(),
                r#"{"epoch":2}"#.to_string(),
                "{\"q\":\"\u{00e9}\u{4e2d}\"}".to_string(),
            ]
        );
    }

    #[test]
    fn test_record_split_across_chunks() {
        let mut decoder = EventDecoder::new();
        assert!(decoder.push(b"data: {\"epo").is_empty());
        assert_eq!(decoder.pending(), 11);
        assert_eq!(decoder.push(b"ch\":7}\n"), vec![r#"{"epoch":7}"#.to_string()]);
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn test_utf8_split_across_chunks() {
        let bytes = "data: \"\u{4e2d}\"\n".as_bytes();
        // The CJK character is three bytes starting at offset 7.
        let payloads = decode_all(&[&bytes[..8], &bytes[8..]]);
        assert_eq!(payloads, vec!["\"\u{4e2d}\"".to_string()]);
    }

    #[test]
    fn test_unterminated_last_line_flushed() {
        let payloads = decode_all(&[b"data: {\"epoch\":1}\ndata: {\"epoch\":2}"]);
        assert_eq!(payloads.len(), 2);
    }

    #[test]
    fn test_prefix_without_space_and_empty_data() {
        let payloads = decode_all(&[b"data:{\"a\":1}\ndata: \n  data: [1]  \n"]);
        assert_eq!(payloads, vec![r#"{"a":1}"#.to_string(), "[1]".to_string()]);
    }

    #[test]
    fn test_oversized_line_dropped() {
        let mut decoder = EventDecoder::with_max_line(16);
        assert!(decoder.push(b"data: {\"epoch\":1,\"circuit\"").is_empty());
        assert_eq!(decoder.pending(), 0);
        assert!(decoder.push(b":[[3,1,0,3]]}").is_empty());
        assert_eq!(decoder.pending(), 0);

        // The rest of the oversized line goes too, then decoding resumes.
        assert_eq!(decoder.push(b"}\ndata: [1]\n"), vec!["[1]".to_string()]);
        assert_eq!(decoder.oversized(), 1);
    }

    #[test]
    fn test_oversized_tail_not_flushed() {
        let mut decoder = EventDecoder::with_max_line(8);
        assert_eq!(decoder.push(b"data: [1]\ndata: [2, 3, 4]"), vec!["[1]".to_string()]);
        assert_eq!(decoder.finish(), None);
        assert_eq!(decoder.oversized(), 1);
    }

    #[test]
    fn test_short_lines_within_limit() {
        let mut decoder = EventDecoder::with_max_line(12);
        assert_eq!(decoder.push(b"data: [1, 2]\n"), vec!["[1, 2]".to_string()]);
        assert!(decoder.push(b"data: [3]").is_empty());
        assert_eq!(decoder.finish(), Some("[3]".to_string()));
        assert_eq!(decoder.oversized(), 0);
    }

    proptest! {
        #[test]
        fn prop_split_points_do_not_matter(cuts in prop::collection::vec(0_usize..=BODY.len(), 0..6)) {
            let bytes = BODY.as_bytes();
            let mut cuts = cuts;
            cuts.sort_unstable();
            let mut chunks: Vec<&[u8]> = Vec::new();
            let mut last = 0;
            for cut in cuts {
                chunks.push(&bytes[last..cut]);
                last = cut;
            }
            chunks.push(&bytes[last..]);

            prop_assert_eq!(decode_all(&chunks), decode_all(&[bytes]));
        }
    }
}
