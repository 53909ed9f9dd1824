use std::io::{self, BufRead};

/// Reads lines into an internal buffer, handing out `&str` slices instead of
/// a fresh allocation per line. Lines are numbered from 1 so parse errors
/// can name the offending line.
#[derive(Debug)]
pub struct StreamingLineReader<B> {
    current_line: String,
    line_number: u64,
    buf_read: B,
}

impl<B: BufRead> StreamingLineReader<B> {
    pub fn new(bf: B) -> StreamingLineReader<B> {
        StreamingLineReader {
            current_line: String::new(),
            line_number: 0,
            buf_read: bf,
        }
    }

    /// Returns the next line and its 1-based number, with the trailing
    /// newline trimmed, or `None` at end of input.
    pub fn read(&mut self) -> Option<io::Result<(u64, &'_ str)>> {
        self.current_line.clear();
        match self.buf_read.read_line(&mut self.current_line) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                Some(Ok((self.line_number, self.current_line.trim_end())))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_lines_and_numbers() {
        let input = Cursor::new("track type=wiggle_0\nfixedStep chrom=chrI start=1\n12\n");
        let mut slr = StreamingLineReader::new(input);
        assert_eq!((1, "track type=wiggle_0"), slr.read().unwrap().unwrap());
        assert_eq!((2, "fixedStep chrom=chrI start=1"), slr.read().unwrap().unwrap());
        assert_eq!((3, "12"), slr.read().unwrap().unwrap());
        assert!(slr.read().is_none());
    }

    #[test]
    fn test_no_trailing_newline() {
        let input = Cursor::new("10 2.5");
        let mut slr = StreamingLineReader::new(input);
        assert_eq!((1, "10 2.5"), slr.read().unwrap().unwrap());
        assert!(slr.read().is_none());
    }
}
