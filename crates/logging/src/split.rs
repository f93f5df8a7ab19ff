//! crates/logging/src/split.rs
//! Fixed-width chunking of oversized messages.
//!
//! Lengths are counted in `char`s, the unit a Rust string can be cut at
//! without producing invalid UTF-8. The split ignores word and grapheme
//! boundaries: a combining sequence or emoji cluster straddling the limit is
//! divided between two chunks.

use std::iter::FusedIterator;
use std::num::NonZeroUsize;

/// Largest chunk, in `char`s, handed to a sink in one record.
pub const MAX_CHUNK_CHARS: NonZeroUsize = match NonZeroUsize::new(3000) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Splits `message` into chunks of at most `limit` chars.
///
/// A message that fits yields itself once, including the empty message.
/// Concatenating the chunks reproduces the input.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use logging::split_message;
///
/// let limit = NonZeroUsize::new(4).unwrap();
/// let chunks: Vec<&str> = split_message("abcdefghij", limit).collect();
/// assert_eq!(chunks, ["abcd", "efgh", "ij"]);
/// ```
#[must_use]
pub fn split_message(message: &str, limit: NonZeroUsize) -> MessageChunks<'_> {
    MessageChunks {
        rest: Some(message),
        limit: limit.get(),
    }
}

/// Iterator returned by [`split_message`].
#[derive(Clone, Debug)]
pub struct MessageChunks<'a> {
    rest: Option<&'a str>,
    limit: usize,
}

impl<'a> Iterator for MessageChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match rest.char_indices().nth(self.limit) {
            Some((split, _)) => {
                self.rest = Some(&rest[split..]);
                Some(&rest[..split])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

impl FusedIterator for MessageChunks<'_> {}
