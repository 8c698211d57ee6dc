//! Streaming access to the records of a shapefile.
//!
//! [`ShapefileReader`] parses the main header up front and then decodes one
//! record per call, using the header's declared file length to know when
//! the record sequence ends.
//!
//! # Example
//! ```no_run
//! # use shapefile_reader::ShapefileReader;
//! # let file = std::fs::File::open("roads.shp").unwrap();
//! let reader = ShapefileReader::new(std::io::BufReader::new(file)).unwrap();
//! for result in reader {
//!     let record = result.unwrap();
//!     println!("{}: {}", record.record_number(), record.shape_type());
//! }
//! ```

use std::io::Read;
use log::{info, warn};

use super::format::{header, record};
use super::types::error::{Result, ShapefileError};
use super::types::models::{
    FileHeader, Record, ReaderOptions, FILE_HEADER_WORDS, RECORD_HEADER_WORDS,
};
use super::utils::ByteSource;

/// Decoding progress once the header has been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    /// Declared 16-bit words still expected after the records read so far.
    Reading { remaining_words: i64 },
    Done,
    Failed,
}

/// Forward-only record reader over any [`Read`] source.
///
/// Yields `Result<Record>` and stops for good after the first error, since
/// the next record boundary is unknown once a record fails to decode.
pub struct ShapefileReader<R> {
    source: ByteSource<R>,
    header: FileHeader,
    options: ReaderOptions,
    state: ReaderState,
    records_read: usize,
}

impl<R: Read> ShapefileReader<R> {
    /// Parses the main file header and prepares to read records.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The magic code is not 9994
    /// - The version is not 1000
    /// - The source ends before the 100-byte header is complete
    pub fn new(reader: R) -> Result<Self> {
        Self::with_options(reader, ReaderOptions::default())
    }

    /// Like [`new`](Self::new), with explicit reader options.
    pub fn with_options(reader: R, options: ReaderOptions) -> Result<Self> {
        let mut source = ByteSource::new(reader);
        let header = header::parse(&mut source)?;

        let remaining_words = i64::from(header.file_length) - FILE_HEADER_WORDS;
        if remaining_words < 0 {
            warn!(
                "Declared file length of {} words is shorter than the header itself",
                header.file_length
            );
        }

        Ok(Self {
            source,
            header,
            options,
            state: ReaderState::Reading { remaining_words },
            records_read: 0,
        })
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Number of records successfully decoded so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Whether the declared file length has been fully consumed.
    pub fn is_done(&self) -> bool {
        self.state == ReaderState::Done
    }

    /// Decodes the next record, or returns `Ok(None)` at the end of the dataset.
    ///
    /// After an error every further call returns `Ok(None)`.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        let remaining_words = match self.state {
            ReaderState::Reading { remaining_words } => remaining_words,
            ReaderState::Done | ReaderState::Failed => return Ok(None),
        };
        if remaining_words <= 0 {
            info!("Shapefile read: {} records", self.records_read);
            self.state = ReaderState::Done;
            return Ok(None);
        }

        match self.read_one() {
            Ok(record) => {
                self.records_read += 1;
                self.state = ReaderState::Reading {
                    remaining_words: remaining_words
                        - RECORD_HEADER_WORDS
                        - i64::from(record.header.content_length),
                };
                Ok(Some(record))
            }
            Err(e) => {
                self.state = ReaderState::Failed;
                Err(e)
            }
        }
    }

    fn read_one(&mut self) -> Result<Record> {
        let record = record::read_record(&mut self.source)?;
        if self.options.check_record_numbers {
            let expected = i32::try_from(self.records_read + 1).unwrap_or(i32::MAX);
            if record.header.record_number != expected {
                return Err(ShapefileError::RecordNumberMismatch {
                    expected,
                    found: record.header.record_number,
                });
            }
        }
        Ok(record)
    }
}

impl<R: Read> Iterator for ShapefileReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

impl<R: Read> std::iter::FusedIterator for ShapefileReader<R> {}
