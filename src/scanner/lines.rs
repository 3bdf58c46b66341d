/// Iterates the physical lines of `text` together with each line's byte
/// offset in the original input. Terminators (`\r\n`, lone `\r`, lone
/// `\n`) are consumed at their actual length, so the yielded offsets
/// index the original text even when line endings are mixed.
pub(super) fn line_spans(text: &str) -> LineSpans<'_> {
    LineSpans {
        rest: text,
        offset: 0,
        done: false,
    }
}

pub(super) struct LineSpans<'a> {
    rest: &'a str,
    offset: usize,
    done: bool,
}

impl<'a> Iterator for LineSpans<'a> {
    type Item = (&'a str, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let start = self.offset;
        match self.rest.find(['\r', '\n']) {
            Some(index) => {
                let line = &self.rest[..index];
                let terminator_len = if self.rest[index..].starts_with("\r\n") {
                    2
                } else {
                    1
                };
                self.offset += index + terminator_len;
                self.rest = &self.rest[index + terminator_len..];
                Some((line, start))
            }
            None => {
                self.done = true;
                if self.rest.is_empty() {
                    None
                } else {
                    Some((self.rest, start))
                }
            }
        }
    }
}
