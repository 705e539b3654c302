//! Read operations for MODFLOW 6 cell-by-cell budget files
//!
//! The file is a sequence of unformatted stream records with little-endian
//! byte ordering. Every record starts with the same fixed header, and the
//! compact format (negative `ndim3`) adds a storage method and timing data.

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

// crate modules
use crate::budget::{BudgetRecord, CellBudget, ListData, ListEntry, RecordData, RecordHeader};
use crate::error::{Error, Result};

// tracktools modules
use tracktools_format::{f, label_from_bytes};

// external crates
use bincode::deserialize;
use log::{debug, info, trace};
use serde::Deserialize;

/// Width of every name written to the file
const NAME_LENGTH: usize = 16;

/// Fixed header at the start of every record
#[derive(Debug, Deserialize)]
struct RawHeader {
    kstp: i32,
    kper: i32,
    text: [u8; NAME_LENGTH],
    ndim1: i32,
    ndim2: i32,
    ndim3: i32,
}

/// Additional header of the compact format
#[derive(Debug, Deserialize)]
struct RawTimes {
    imeth: i32,
    delt: f64,
    pertim: f64,
    totim: f64,
}

/// Deserialise a cell-by-cell budget file
///
/// Returns a Result containing a [CellBudget] with every record in the file
/// at `path`, in file order.
///
/// ```rust, no_run
/// # use tracktools_budget::read_budget_file;
/// let budget = read_budget_file("./data/ml.cbc").unwrap();
/// println!("{budget}");
/// ```
pub fn read_budget_file<P: AsRef<Path>>(path: P) -> Result<CellBudget> {
    info!("Reading {:?}", path.as_ref());
    let mut reader = init_reader(path)?;
    read_budget(&mut reader)
}

/// Deserialise a cell-by-cell budget from any buffered byte stream
pub fn read_budget<R: BufRead>(reader: &mut R) -> Result<CellBudget> {
    let mut records = Vec::new();

    // a clean end of file can only happen between records
    while !reader.fill_buf()?.is_empty() {
        let header = parse_header(reader)?;
        let data = parse_data(reader, &header)?;
        trace!(
            "{} kstp={} kper={} imeth={}",
            header.text,
            header.kstp,
            header.kper,
            header.imeth
        );
        records.push(BudgetRecord { header, data });
    }

    debug!("Found {} budget records", records.len());
    Ok(CellBudget { records })
}

/// Initialise a reader from anything that can be turned into a path
fn init_reader(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Fixed header plus the compact header where present
fn parse_header<R: Read>(reader: &mut R) -> Result<RecordHeader> {
    let mut buffer = [0u8; 2 * 4 + NAME_LENGTH + 3 * 4];
    reader.read_exact(&mut buffer)?;
    let raw: RawHeader = deserialize(&buffer)?;

    let mut header = RecordHeader {
        kstp: raw.kstp,
        kper: raw.kper,
        text: label_from_bytes(&raw.text),
        ndim1: raw.ndim1,
        ndim2: raw.ndim2,
        ndim3: raw.ndim3,
        ..Default::default()
    };

    if raw.ndim3 < 0 {
        let mut buffer = [0u8; 4 + 3 * 8];
        reader.read_exact(&mut buffer)?;
        let times: RawTimes = deserialize(&buffer)?;
        header.imeth = times.imeth;
        header.delt = times.delt;
        header.pertim = times.pertim;
        header.totim = times.totim;
    }

    Ok(header)
}

/// Record values according to the storage method
fn parse_data<R: Read>(reader: &mut R, header: &RecordHeader) -> Result<RecordData> {
    match header.imeth {
        0 | 1 => {
            let n = header.array_length().ok_or_else(|| oversized(header))?;
            Ok(RecordData::Array(read_f64s(reader, n, header)?))
        }
        6 => Ok(RecordData::List(parse_list(reader, header)?)),
        imeth => Err(Error::UnsupportedMethod {
            text: header.text.clone(),
            imeth,
        }),
    }
}

/// Storage method 6, a list of node pairs with a flux and auxiliary values
fn parse_list<R: Read>(reader: &mut R, header: &RecordHeader) -> Result<ListData> {
    let model = read_name(reader)?;
    let package = read_name(reader)?;
    let model2 = read_name(reader)?;
    let package2 = read_name(reader)?;

    // the flux counts as the first of the values
    let ndat = read_i32(reader)?;
    if ndat < 1 {
        return Err(Error::UnexpectedLayout {
            text: header.text.clone(),
            expected: "at least one value per list entry".to_string(),
        });
    }
    let ndat = ndat as usize;

    let mut aux_names = Vec::new();
    for _ in 1..ndat {
        aux_names.push(read_name(reader)?);
    }

    let nlist = read_i32(reader)?.max(0) as usize;
    let mut entries = Vec::new();
    for _ in 0..nlist {
        let id1 = read_i32(reader)?;
        let id2 = read_i32(reader)?;
        let mut values = read_f64s(reader, ndat, header)?;
        let aux = values.split_off(1);
        entries.push(ListEntry {
            id1,
            id2,
            q: values[0],
            aux,
        });
    }

    Ok(ListData {
        model,
        package,
        model2,
        package2,
        aux_names,
        entries,
    })
}

fn read_name<R: Read>(reader: &mut R) -> Result<String> {
    let mut buffer = [0u8; NAME_LENGTH];
    reader.read_exact(&mut buffer)?;
    Ok(label_from_bytes(&buffer))
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    let mut buffer = [0u8; std::mem::size_of::<i32>()];
    reader.read_exact(&mut buffer)?;
    Ok(i32::from_le_bytes(buffer))
}

/// Read `n` values, growing the buffer only as data arrives
///
/// Counts come straight from the file, so nothing is allocated up front.
fn read_f64s<R: Read>(reader: &mut R, n: usize, header: &RecordHeader) -> Result<Vec<f64>> {
    let length = n
        .checked_mul(std::mem::size_of::<f64>())
        .ok_or_else(|| oversized(header))?;

    let mut buffer = Vec::new();
    reader.take(length as u64).read_to_end(&mut buffer)?;
    if buffer.len() < length {
        return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
    }

    Ok(buffer
        .chunks_exact(std::mem::size_of::<f64>())
        .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
        .collect())
}

fn oversized(header: &RecordHeader) -> Error {
    Error::UnexpectedLayout {
        text: header.text.clone(),
        expected: f!(
            "an array of {} x {} x {} values",
            header.ndim1,
            header.ndim2,
            header.ndim3.unsigned_abs()
        ),
    }
}
