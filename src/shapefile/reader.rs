use std::io::Read;
use std::slice::Iter;

use super::iter::ShapefileReader;
use super::types::error::Result;
use super::types::geometry::Geometry;
use super::types::models::{FileHeader, ReaderOptions, Record};

/// A fully decoded shapefile geometry stream.
///
/// Holds the main file header and every record in file order. Decoding is
/// all-or-nothing: if any record fails, no `Shapefile` is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Shapefile {
    header: FileHeader,
    records: Vec<Record>,
}

impl Shapefile {
    /// Decodes a complete geometry stream from `reader`.
    ///
    /// The source is read forward only and never past the declared file
    /// length. Wrap files in a `BufReader`; the decoder issues many small reads.
    ///
    /// # Errors
    /// Returns the first header or record error encountered.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ReaderOptions::default())
    }

    /// Like [`from_reader`](Self::from_reader), with explicit reader options.
    pub fn from_reader_with_options<R: Read>(reader: R, options: ReaderOptions) -> Result<Self> {
        let mut records_reader = ShapefileReader::with_options(reader, options)?;
        let mut records = Vec::new();
        while let Some(record) = records_reader.next_record()? {
            records.push(record);
        }
        Ok(Self {
            header: records_reader.header().clone(),
            records,
        })
    }

    /// Decodes a geometry stream held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(bytes)
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the record at `index` (0-based file order).
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Record> {
        self.records.iter()
    }

    /// Iterates over the geometries only, in file order.
    pub fn geometries(&self) -> impl Iterator<Item = &Geometry> {
        self.records.iter().map(|record| &record.geometry)
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Shapefile {
    type Item = &'a Record;
    type IntoIter = Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
