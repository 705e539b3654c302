//! Synthetic case directories
//!
//! Three cells in a chain with river records in the first two:
//!
//! ```text
//!  cell     0 -- 1 -- 2
//!  river    1.0  2.0
//!  FID      1    2
//!  inflows  1.0  2.0  0.0
//! ```
//!
//! Both river cells have a mixing fraction of 0.5. Particles 1 and 2 (BAR)
//! end in cells 0 and 2 at speed 1.0, particle 3 (GAL) ends in cell 1 at
//! speed 2.0.

#![allow(dead_code)]

use std::fs::{create_dir_all, remove_dir_all, write};
use std::path::{Path, PathBuf};

/// Fresh directory under the system temp directory
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tracktools-{}-{name}", std::process::id()));
    if dir.exists() {
        remove_dir_all(&dir).unwrap();
    }
    create_dir_all(&dir).unwrap();
    dir
}

/// Write every input file of a case
pub fn write_case(dir: &Path) {
    create_dir_all(dir).unwrap();
    write(dir.join("ml.disv.grb"), grid_bytes()).unwrap();
    write(dir.join("ml.cbc"), budget_bytes()).unwrap();
    write(dir.join("mp.mpend"), ENDPOINTS).unwrap();
    write(dir.join("mp.mppth"), PATHLINES).unwrap();
    write(dir.join("pgroups.csv"), "0,BAR\n1,GAL\n").unwrap();
    write(dir.join("riv_ids.csv"), "1,north\n2,south\n").unwrap();
}

fn text_line(text: &str, length: usize) -> Vec<u8> {
    let mut bytes = format!("{text:<width$}", width = length - 1).into_bytes();
    bytes.push(b'\n');
    bytes
}

fn grid_bytes() -> Vec<u8> {
    let definitions = [
        "NCELLS INTEGER NDIM 0",
        "NJA INTEGER NDIM 0",
        "IA INTEGER NDIM 1 4",
        "JA INTEGER NDIM 1 7",
    ];

    let mut bytes = Vec::new();
    bytes.extend(text_line("GRID DISV", 50));
    bytes.extend(text_line("VERSION 1", 50));
    bytes.extend(text_line("NTXT 4", 50));
    bytes.extend(text_line("LENTXT 100", 50));
    for definition in definitions {
        bytes.extend(text_line(definition, 100));
    }
    for v in [3, 7, 1, 3, 6, 8, 1, 2, 2, 1, 3, 3, 2] {
        bytes.extend(i32::to_le_bytes(v));
    }
    bytes
}

fn name(text: &str) -> Vec<u8> {
    format!("{text:>16}").into_bytes()
}

fn header(bytes: &mut Vec<u8>, text: &str, ndim1: i32, imeth: i32) {
    for v in [1, 1] {
        bytes.extend(i32::to_le_bytes(v));
    }
    bytes.extend(name(text));
    for v in [ndim1, 1, -1, imeth] {
        bytes.extend(i32::to_le_bytes(v));
    }
    for v in [1.0, 1.0, 1.0] {
        bytes.extend(f64::to_le_bytes(v));
    }
}

fn budget_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();

    let flowja = [0.0, 1.0, 0.0, -1.0, 2.0, 0.0, -2.0];
    header(&mut bytes, "FLOW-JA-FACE", flowja.len() as i32, 1);
    for q in flowja {
        bytes.extend(f64::to_le_bytes(q));
    }

    header(&mut bytes, "RIV", 3, 6);
    for text in ["ML", "ML", "ML", "RIV"] {
        bytes.extend(name(text));
    }
    bytes.extend(i32::to_le_bytes(2));
    bytes.extend(name("FID"));
    bytes.extend(i32::to_le_bytes(2));
    for (id1, id2, q, fid) in [(1, 1, 1.0, 1.0), (2, 2, 2.0, 2.0)] {
        bytes.extend(i32::to_le_bytes(id1));
        bytes.extend(i32::to_le_bytes(id2));
        bytes.extend(f64::to_le_bytes(q));
        bytes.extend(f64::to_le_bytes(fid));
    }
    bytes
}

const ENDPOINTS: &str = "\
MODPATH_ENDPOINT_FILE 7 2
2 3 3 3 0.0 0.0 0.0 0.0
0 0 3 0 0 0 0 0 0 0
2
BAR
GAL
END HEADER
1 1 1 2 0.0 10.0 3 1 0.5 0.5 0.5 25.0 5.0 1.0 1 0 1 1 0.5 0.5 1.0 5.0 5.0 2.0 1 6
2 1 2 2 0.0 10.0 3 1 0.5 0.5 0.5 25.0 5.0 1.0 1 0 3 1 0.5 0.5 1.0 25.0 5.0 2.0 1 6
3 2 1 2 0.0 10.0 3 1 0.5 0.5 0.5 25.0 5.0 1.0 1 0 2 1 0.5 0.5 1.0 15.0 5.0 2.0 1 6
";

const PATHLINES: &str = "\
MODPATH_PATHLINE_FILE 7 2
2 0.0 0.0 0.0 0.0
END HEADER
1 1 1 3
3 25.0 5.0 1.0 0.0 0.5 0.5 0.5 1 1 1
3 24.0 5.0 1.0 1.0 0.4 0.5 0.5 1 1 1
2 23.0 5.0 1.0 2.0 0.3 0.5 0.5 1 1 1
2 1 2 3
3 25.0 5.0 1.0 0.0 0.5 0.5 0.5 1 1 1
3 25.0 6.0 1.0 1.0 0.5 0.6 0.5 1 1 1
3 25.0 7.0 1.0 2.0 0.5 0.7 0.5 1 1 1
3 2 1 3
3 25.0 5.0 1.0 0.0 0.5 0.5 0.5 1 1 1
3 23.0 5.0 1.0 1.0 0.3 0.5 0.5 1 1 1
2 21.0 5.0 1.0 2.0 0.1 0.5 0.5 1 1 1
";
