//! Id to name lookup tables

// standard library
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// crate modules
use crate::error::{Error, Result};

// external crates
use log::{debug, info};

/// Lookup from integer ids to names, in file order
///
/// Side files are headerless two column CSV, `id,name`:
///
/// ```text
/// 0,BAR
/// 1,GAL
/// ```
///
/// ```rust
/// # use tracktools_mixing::NameTable;
/// let table = NameTable::from_reader("0,BAR\n1,GAL\n".as_bytes()).unwrap();
/// assert_eq!(table.get(1), Some("GAL"));
/// assert_eq!(table.get(2), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTable {
    entries: Vec<(i64, String)>,
    index: HashMap<i64, usize>,
}

impl NameTable {
    /// Read a table from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Reading {:?}", path.as_ref());
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Read a table from any CSV stream
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut pairs = Vec::new();
        for row in reader.deserialize::<(i64, String)>() {
            pairs.push(row?);
        }

        debug!("Found {} names", pairs.len());
        Self::from_pairs(pairs)
    }

    /// Build a table from `(id, name)` pairs, rejecting duplicate ids
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (id, name) in pairs {
            if table.index.contains_key(&id) {
                return Err(Error::DuplicateId(id));
            }
            table.index.insert(id, table.entries.len());
            table.entries.push((id, name.into()));
        }
        Ok(table)
    }

    /// Name for an id
    pub fn get(&self, id: i64) -> Option<&str> {
        self.index.get(&id).map(|&i| self.entries[i].1.as_str())
    }

    /// Names in file order, possibly repeated
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, name)| name.as_str())
    }

    /// True if any entry has this name
    pub fn contains_name(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
