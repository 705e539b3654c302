//! Read operations for MODFLOW 6 binary grid files
//!
//! The header is plain text in fixed-width lines, everything after it is
//! unformatted stream output with little-endian byte ordering.

// standard library
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::grid::{BinaryGrid, DataType, Definition, GridArray, GridType};
use crate::parsers;

// tracktools modules
use tracktools_format::{f, label_from_bytes};

// external crates
use log::{debug, info};

/// Length of each of the four leading header lines
const HEADER_LINE_LENGTH: usize = 50;

/// Deserialise a binary grid file
///
/// Returns a Result containing a [BinaryGrid] with every array defined in the
/// file at `path`.
///
/// ```rust, no_run
/// # use tracktools_grid::read_grid_file;
/// let grid = read_grid_file("./data/ml.disv.grb").unwrap();
/// println!("{grid}");
/// ```
pub fn read_grid_file<P: AsRef<Path>>(path: P) -> Result<BinaryGrid> {
    info!("Reading {:?}", path.as_ref());
    let mut reader = init_reader(path)?;
    read_grid(&mut reader)
}

/// Deserialise a binary grid from any byte stream
pub fn read_grid<R: Read>(reader: &mut R) -> Result<BinaryGrid> {
    let (grid_type, version, ntxt, lentxt) = parse_header(reader)?;
    let definitions = parse_definitions(reader, ntxt, lentxt)?;

    let mut arrays = BTreeMap::new();
    for definition in &definitions {
        let array = parse_array(reader, definition)?;
        arrays.insert(definition.name.clone(), array);
    }

    debug!(
        "Grid {:?} v{} with {} arrays",
        grid_type,
        version,
        definitions.len()
    );

    Ok(BinaryGrid {
        grid_type,
        version,
        definitions,
        arrays,
    })
}

/// Initialise a reader from anything that can be turned into a path
fn init_reader(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Read a fixed-width block of text
fn read_text<R: Read>(reader: &mut R, length: usize) -> Result<String> {
    Ok(label_from_bytes(&read_bytes(reader, length)?))
}

/// Read exactly `length` bytes
///
/// Lengths come from the file, so the buffer grows with the data actually
/// present rather than being allocated up front.
fn read_bytes<R: Read>(reader: &mut R, length: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader.take(length as u64).read_to_end(&mut buffer)?;
    if buffer.len() < length {
        return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buffer)
}

/// Grid type, version, number of definitions, and definition line length
fn parse_header<R: Read>(reader: &mut R) -> Result<(GridType, u32, usize, usize)> {
    let line = read_text(reader, HEADER_LINE_LENGTH)?;
    let (_, tag) = parsers::grid_type(&line).map_err(|_| Error::InvalidHeader {
        expected: "GRID <type>".to_string(),
        found: line.clone(),
    })?;
    let grid_type = GridType::try_from(tag)?;

    let version = header_value(reader, "VERSION")?;
    let ntxt = header_value(reader, "NTXT")?;
    let lentxt = header_value(reader, "LENTXT")?;

    Ok((grid_type, version, ntxt as usize, lentxt as usize))
}

/// Value of a single `<KEYWORD> <value>` header line
fn header_value<R: Read>(reader: &mut R, keyword: &'static str) -> Result<u32> {
    let line = read_text(reader, HEADER_LINE_LENGTH)?;
    let (_, value) = parsers::keyword_value(keyword)(&line).map_err(|_| Error::InvalidHeader {
        expected: f!("{keyword} <value>"),
        found: line.clone(),
    })?;
    Ok(value)
}

/// Array definitions, skipping any comment lines
fn parse_definitions<R: Read>(
    reader: &mut R,
    ntxt: usize,
    lentxt: usize,
) -> Result<Vec<Definition>> {
    let mut definitions = Vec::new();
    for _ in 0..ntxt {
        let line = read_text(reader, lentxt)?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (_, definition) =
            parsers::definition(&line).map_err(|_| Error::InvalidDefinition(line.clone()))?;
        definitions.push(definition);
    }
    Ok(definitions)
}

/// Values for a single definition
fn parse_array<R: Read>(reader: &mut R, definition: &Definition) -> Result<GridArray> {
    let length = definition
        .byte_length()
        .ok_or_else(|| Error::OversizedArray {
            name: definition.name.clone(),
            shape: definition.shape.clone(),
        })?;
    let buffer = read_bytes(reader, length)?;

    let array = match definition.data_type {
        DataType::Integer => GridArray::Integer(
            buffer
                .chunks_exact(std::mem::size_of::<i32>())
                .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect(),
        ),
        DataType::Single => GridArray::Single(
            buffer
                .chunks_exact(std::mem::size_of::<f32>())
                .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect(),
        ),
        DataType::Double => GridArray::Double(
            buffer
                .chunks_exact(std::mem::size_of::<f64>())
                .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
                .collect(),
        ),
    };

    Ok(array)
}
