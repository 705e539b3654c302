//! Integration tests for reading binary grid files

use std::io::Cursor;

use rstest::{fixture, rstest};
use tracktools_grid::{read_grid, BinaryGrid, DataType, Error, GridType};

/// Pad a line to a fixed width, terminated by a newline like MODFLOW does
fn text_line(text: &str, length: usize) -> Vec<u8> {
    let mut bytes = format!("{text:<width$}", width = length - 1).into_bytes();
    bytes.push(b'\n');
    bytes
}

/// Build a DISV grid file with three cells connected in a chain
///
/// ```text
///  0 -- 1 -- 2
/// ```
fn chain_grid_bytes(ia: &[i32], ja: &[i32]) -> Vec<u8> {
    let definitions = [
        "NCELLS INTEGER NDIM 0".to_string(),
        "NJA INTEGER NDIM 0".to_string(),
        "TOP DOUBLE NDIM 1 3".to_string(),
        format!("IA INTEGER NDIM 1 {}", ia.len()),
        format!("JA INTEGER NDIM 1 {}", ja.len()),
    ];

    let mut bytes = Vec::new();
    bytes.extend(text_line("GRID DISV", 50));
    bytes.extend(text_line("VERSION 1", 50));
    bytes.extend(text_line(&format!("NTXT {}", definitions.len()), 50));
    bytes.extend(text_line("LENTXT 100", 50));
    for definition in &definitions {
        bytes.extend(text_line(definition, 100));
    }

    bytes.extend(3i32.to_le_bytes());
    bytes.extend((ja.len() as i32).to_le_bytes());
    for top in [10.0f64, 9.5, 9.0] {
        bytes.extend(top.to_le_bytes());
    }
    for v in ia {
        bytes.extend(v.to_le_bytes());
    }
    for v in ja {
        bytes.extend(v.to_le_bytes());
    }
    bytes
}

#[fixture]
fn chain() -> BinaryGrid {
    let bytes = chain_grid_bytes(&[1, 3, 6, 8], &[1, 2, 2, 1, 3, 3, 2]);
    read_grid(&mut Cursor::new(bytes)).unwrap()
}

#[rstest]
fn header_and_definitions(chain: BinaryGrid) {
    assert_eq!(chain.grid_type, GridType::Disv);
    assert_eq!(chain.version, 1);
    assert_eq!(chain.array_names(), vec!["NCELLS", "NJA", "TOP", "IA", "JA"]);
    assert_eq!(chain.definitions[2].data_type, DataType::Double);
    assert_eq!(chain.ncells().unwrap(), 3);
    assert_eq!(chain.nja().unwrap(), 7);
    assert_eq!(chain.doubles("TOP").unwrap(), &[10.0, 9.5, 9.0]);
}

#[rstest]
fn ia_is_shifted_to_zero_based(chain: BinaryGrid) {
    // raw values on disk are [1, 3, 6, 8]
    assert_eq!(chain.integers("IA").unwrap(), &[1, 3, 6, 8]);
    assert_eq!(chain.ia().unwrap(), vec![0, 2, 5, 7]);
}

#[rstest]
fn ja_is_shifted_to_zero_based(chain: BinaryGrid) {
    assert_eq!(chain.ja().unwrap(), vec![0, 1, 1, 0, 2, 2, 1]);
}

#[rstest]
fn missing_and_mistyped_arrays(chain: BinaryGrid) {
    assert!(matches!(chain.array("IDOMAIN"), Err(Error::MissingArray(_))));
    assert!(matches!(
        chain.integers("TOP"),
        Err(Error::UnexpectedDataType { .. })
    ));
}

#[rstest]
#[case(&[0, 3, 6, 8])] // 0 is not a valid 1-based offset
#[case(&[1, 6, 3, 8])] // decreasing offsets
#[case(&[1, 3, 6, 7])] // does not end on NJA + 1
fn invalid_offsets(#[case] ia: &[i32]) {
    let bytes = chain_grid_bytes(ia, &[1, 2, 2, 1, 3, 3, 2]);
    let grid = read_grid(&mut Cursor::new(bytes)).unwrap();
    assert!(grid.ia().is_err());
}

#[test]
fn invalid_header() {
    let mut bytes = chain_grid_bytes(&[1, 3, 6, 8], &[1, 2, 2, 1, 3, 3, 2]);
    bytes[0..4].copy_from_slice(b"GIRD");
    let result = read_grid(&mut Cursor::new(bytes));
    assert!(matches!(result, Err(Error::InvalidHeader { .. })));
}

#[test]
fn truncated_data() {
    let mut bytes = chain_grid_bytes(&[1, 3, 6, 8], &[1, 2, 2, 1, 3, 3, 2]);
    bytes.truncate(bytes.len() - 6);
    let result = read_grid(&mut Cursor::new(bytes));
    assert!(matches!(result, Err(Error::IOError(_))));
}

/// Header and a single definition with no data behind it
fn declared_only(definition: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend(text_line("GRID DISV", 50));
    bytes.extend(text_line("VERSION 1", 50));
    bytes.extend(text_line("NTXT 1", 50));
    bytes.extend(text_line("LENTXT 100", 50));
    bytes.extend(text_line(definition, 100));
    bytes
}

#[test]
fn overflowing_dimensions() {
    let max = u32::MAX;
    let bytes = declared_only(&format!("JA INTEGER NDIM 3 {max} {max} {max}"));
    let result = read_grid(&mut Cursor::new(bytes));
    assert!(matches!(result, Err(Error::OversizedArray { .. })));
}

#[rstest]
#[case("JA INTEGER NDIM 1 4000000000")]
#[case("TOP DOUBLE NDIM 2 100000 100000")]
fn declared_size_beyond_the_data(#[case] definition: &str) {
    let result = read_grid(&mut Cursor::new(declared_only(definition)));
    assert!(matches!(result, Err(Error::IOError(_))));
}

#[test]
fn oversized_definition_lines() {
    let mut bytes = Vec::new();
    bytes.extend(text_line("GRID DISV", 50));
    bytes.extend(text_line("VERSION 1", 50));
    bytes.extend(text_line("NTXT 1", 50));
    bytes.extend(text_line("LENTXT 4000000000", 50));
    let result = read_grid(&mut Cursor::new(bytes));
    assert!(matches!(result, Err(Error::IOError(_))));
}
