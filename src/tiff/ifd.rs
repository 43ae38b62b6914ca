//! Image File Directory assembly.
//!
//! Entries are kept sorted by tag. Values of four bytes or less are stored
//! left-justified in the entry; larger values go to an out-of-line area that
//! directly follows the directory, each value starting on a word boundary.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use super::tags::field_type;
use crate::error::BilevelError;

/// Typed value of a directory entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FieldValue {
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    /// Numerator / denominator pairs.
    Rationals(Vec<(u32, u32)>),
}

impl FieldValue {
    pub(crate) fn field_type(&self) -> u16 {
        match self {
            FieldValue::Shorts(_) => field_type::SHORT,
            FieldValue::Longs(_) => field_type::LONG,
            FieldValue::Rationals(_) => field_type::RATIONAL,
        }
    }

    pub(crate) fn count(&self) -> usize {
        match self {
            FieldValue::Shorts(v) => v.len(),
            FieldValue::Longs(v) => v.len(),
            FieldValue::Rationals(v) => v.len(),
        }
    }

    fn byte_size(&self) -> usize {
        field_type::size(self.field_type()) * self.count()
    }

    fn write_le(&self, out: &mut Vec<u8>) {
        match self {
            FieldValue::Shorts(v) => v.iter().for_each(|s| out.extend_from_slice(&s.to_le_bytes())),
            FieldValue::Longs(v) => v.iter().for_each(|l| out.extend_from_slice(&l.to_le_bytes())),
            FieldValue::Rationals(v) => v.iter().for_each(|(n, d)| {
                out.extend_from_slice(&n.to_le_bytes());
                out.extend_from_slice(&d.to_le_bytes());
            }),
        }
    }
}

/// One IFD entry before serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DirectoryEntry {
    pub tag: u16,
    pub value: FieldValue,
}

impl DirectoryEntry {
    pub(crate) fn short(tag: u16, value: u16) -> Self {
        Self {
            tag,
            value: FieldValue::Shorts(alloc::vec![value]),
        }
    }

    pub(crate) fn long(tag: u16, value: u32) -> Self {
        Self {
            tag,
            value: FieldValue::Longs(alloc::vec![value]),
        }
    }

    pub(crate) fn longs(tag: u16, values: Vec<u32>) -> Self {
        Self {
            tag,
            value: FieldValue::Longs(values),
        }
    }

    pub(crate) fn rational(tag: u16, (numerator, denominator): (u32, u32)) -> Self {
        Self {
            tag,
            value: FieldValue::Rationals(alloc::vec![(numerator, denominator)]),
        }
    }
}

/// Single image file directory.
#[derive(Clone, Debug, Default)]
pub(crate) struct Directory {
    entries: BTreeMap<u16, DirectoryEntry>,
}

impl Directory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous one with the same tag.
    pub(crate) fn add(&mut self, entry: DirectoryEntry) {
        self.entries.insert(entry.tag, entry);
    }

    #[cfg(test)]
    pub(crate) fn get(&self, tag: u16) -> Option<&DirectoryEntry> {
        self.entries.get(&tag)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Size of the entry table: count, entries, next-IFD offset.
    fn table_len(&self) -> usize {
        2 + 12 * self.len() + 4
    }

    /// Serialize for placement at absolute file offset `offset`, which must
    /// be even. Out-of-line values are appended after the entry table.
    pub(crate) fn serialize(&self, offset: u32) -> Result<Vec<u8>, BilevelError> {
        let table_len = self.table_len();
        let mut table = Vec::with_capacity(table_len);
        let mut overflow = Vec::new();

        table.extend_from_slice(&(self.len() as u16).to_le_bytes());
        for entry in self.entries.values() {
            let count = u32::try_from(entry.value.count())
                .map_err(|_| BilevelError::OutputTooLarge(entry.value.count() as u64))?;
            table.extend_from_slice(&entry.tag.to_le_bytes());
            table.extend_from_slice(&entry.value.field_type().to_le_bytes());
            table.extend_from_slice(&count.to_le_bytes());

            if entry.value.byte_size() <= 4 {
                let mut inline = Vec::with_capacity(4);
                entry.value.write_le(&mut inline);
                inline.resize(4, 0);
                table.extend_from_slice(&inline);
            } else {
                let value_offset = u64::from(offset) + (table_len + overflow.len()) as u64;
                let value_offset = u32::try_from(value_offset)
                    .map_err(|_| BilevelError::OutputTooLarge(value_offset))?;
                table.extend_from_slice(&value_offset.to_le_bytes());
                entry.value.write_le(&mut overflow);
                if overflow.len() % 2 == 1 {
                    overflow.push(0);
                }
            }
        }
        // Single-image file: no next directory.
        table.extend_from_slice(&0u32.to_le_bytes());

        let end = u64::from(offset) + (table.len() + overflow.len()) as u64;
        if end > u64::from(u32::MAX) {
            return Err(BilevelError::OutputTooLarge(end));
        }
        table.extend_from_slice(&overflow);
        Ok(table)
    }
}
