//! Trait for parsing interchange documents from files, readers, or strings.

use std::{
    fs::File,
    io::{BufRead, Cursor, Read},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing one interchange document from various sources.
///
/// # Example
///
/// ```rust,no_run
/// use xliff_extract::traits::Parser;
/// let document = xliff_extract::xliff::Document::read_from("de.xliff")?;
/// Ok::<(), xliff_extract::Error>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from a file path, with BOM-aware decoding so UTF-16 documents
    /// exported by translation tools decode transparently.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}
