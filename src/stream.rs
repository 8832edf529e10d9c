//! # Stream
//!
//! In-memory source texts. A [`StringStream`] couples the text with the path
//! it came from, so that errors can always name their file. The whole text is
//! read up front; nothing is streamed.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::rc::Rc;


/// # Summary
///
/// A string considered as a file-like object. Thus, a `StringStream` object
/// requires an `origin`.
///
/// # Methods
///
/// `new`: build a `StringStream` from its origin and its content.
/// `from_file`: build a `StringStream` by reading a file.
/// `origin`: the path the content came from.
/// `as_str`/`as_bytes`: borrow the content.
#[derive(Clone)]
pub struct StringStream {
    origin: Rc<Path>,
    stream: Rc<str>,
}

impl StringStream {
    /// Build a new `StringStream`, based on its `origin` and on a given
    /// `string`.
    pub fn new(origin: impl Into<Rc<Path>>, string: impl Into<Rc<str>>) -> Self {
        Self {
            origin: origin.into(),
            stream: string.into(),
        }
    }

    /// Create a [`StringStream`] directly from a file. This reads the whole
    /// content of the file right away.
    pub fn from_file(file: impl Into<Rc<Path>>) -> Result<Self> {
        let file = file.into();
        let mut file_stream = File::open(file.as_ref())
            .map_err(|error| Error::with_file(error, file.as_ref()))?;
        let mut stream_buffer = String::new();
        file_stream
            .read_to_string(&mut stream_buffer)
            .map_err(|error| Error::with_file(error, file.as_ref()))?;
        Ok(StringStream::new(file, stream_buffer))
    }

    /// Return the origin file of the [`StringStream`].
    pub fn origin(&self) -> Rc<Path> {
        self.origin.clone()
    }

    /// Return the whole content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.stream
    }

    /// Return the whole content as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.stream.as_bytes()
    }

    /// Return the length of the content, in bytes.
    pub fn len(&self) -> usize {
        self.stream.len()
    }

    /// Return whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }
}

impl std::fmt::Debug for StringStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}
