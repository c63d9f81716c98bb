//! Logical line splitting.
//!
//! A logical line ends at `\r\n`, a bare `\r`, or `\n`. Every terminator closes
//! exactly one line and a final line always follows the last terminator, so the
//! line count is `terminators + 1`, even when the content ends with a terminator
//! or is empty.
//!
//! ```text
//! "public class Foo {\r\n    \n}\r"
//!  └── line 1 ──────┘    └ 2 ┘  3 ┘ 4 = ""
//! ```

use crate::encoding::SourceEncoding;

/// Decode `bytes` and split the text into logical lines
#[must_use]
pub fn split_lines(bytes: &[u8], encoding: SourceEncoding) -> Vec<String> {
    let text = encoding.decode(bytes);
    split_text(&text).into_iter().map(String::from).collect()
}

/// Split already-decoded text into logical lines, borrowing from the input
#[must_use]
pub fn split_text(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }

    lines.push(&text[start..]);
    lines
}

/// Count logical lines without materializing them
#[must_use]
pub fn line_count(bytes: &[u8]) -> usize {
    let mut count = 1;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => count += 1,
            b'\r' => {
                count += 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    count
}
