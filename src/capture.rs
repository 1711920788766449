// src/capture.rs

//! The child's stderr, split into the lines the verdict is based on.

/// Non-empty stderr lines in the order the child wrote them.
///
/// Raw bytes are split on `\n` and never decoded, so replay reproduces
/// exactly what the child wrote, invalid UTF-8 and `\r` included.
/// Zero-length lines are dropped. A trailing fragment without a final `\n`
/// is kept as a line of its own when it is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedLines {
    lines: Vec<Vec<u8>>,
}

impl CapturedLines {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let lines = bytes
            .split(|b| *b == b'\n')
            .filter(|line| !line.is_empty())
            .map(<[u8]>::to_vec)
            .collect();
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.lines.iter().map(Vec::as_slice)
    }

    pub fn into_vec(self) -> Vec<Vec<u8>> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_captures_nothing() {
        assert!(CapturedLines::from_bytes(b"").is_empty());
    }

    #[test]
    fn blank_lines_are_not_output() {
        let captured = CapturedLines::from_bytes(b"\n\n\n");
        assert!(captured.is_empty());
    }

    #[test]
    fn unterminated_fragment_is_a_line() {
        let captured = CapturedLines::from_bytes(b"first\nsecond");
        assert_eq!(captured.into_vec(), vec![b"first".to_vec(), b"second".to_vec()]);
    }

    #[test]
    fn blank_lines_between_output_are_dropped_and_order_kept() {
        let captured = CapturedLines::from_bytes(b"a\n\nb\n\n\nc\n");
        assert_eq!(captured.len(), 3);
        assert_eq!(
            captured.iter().collect::<Vec<_>>(),
            vec![&b"a"[..], &b"b"[..], &b"c"[..]]
        );
    }

    #[test]
    fn whitespace_only_line_still_counts() {
        let captured = CapturedLines::from_bytes(b" \n");
        assert_eq!(captured.into_vec(), vec![b" ".to_vec()]);
    }

    #[test]
    fn non_utf8_bytes_are_kept_exactly() {
        let captured = CapturedLines::from_bytes(b"bad \xff byte\r\n\xc3\x28");
        assert_eq!(
            captured.into_vec(),
            vec![b"bad \xff byte\r".to_vec(), b"\xc3\x28".to_vec()]
        );
    }
}
