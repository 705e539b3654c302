// standard library
use std::collections::BTreeMap;
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::reader::read_grid_file;

// tracktools modules
use tracktools_format::f;

/// Discretisation type declared on the first header line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GridType {
    /// Structured layer/row/column grid
    Dis,
    /// Layered grid with vertices
    #[default]
    Disv,
    /// Unstructured grid
    Disu,
}

impl TryFrom<&str> for GridType {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "DIS" => Ok(Self::Dis),
            "DISV" => Ok(Self::Disv),
            "DISU" => Ok(Self::Disu),
            _ => Err(Error::UnknownGridType(s.to_string())),
        }
    }
}

/// Storage type of an array in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 4-byte signed integer
    Integer,
    /// 4-byte float
    Single,
    /// 8-byte float
    Double,
}

impl DataType {
    /// Number of bytes per value
    pub fn byte_size(&self) -> usize {
        match self {
            DataType::Integer => std::mem::size_of::<i32>(),
            DataType::Single => std::mem::size_of::<f32>(),
            DataType::Double => std::mem::size_of::<f64>(),
        }
    }
}

/// One line of the text definition block
///
/// For example `IA INTEGER NDIM 1 3473` defines an integer array named `IA`
/// with 3473 values, and `NCELLS INTEGER NDIM 0` defines a scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    /// Array name, e.g. `IA`
    pub name: String,
    /// Type of every value in the array
    pub data_type: DataType,
    /// Dimensions as written in the file, empty for scalars
    pub shape: Vec<usize>,
}

impl Definition {
    /// Total number of values, 1 for a scalar
    ///
    /// `None` if the dimensions overflow.
    pub fn number_of_values(&self) -> Option<usize> {
        self.shape
            .iter()
            .try_fold(1usize, |total, &n| total.checked_mul(n))
    }

    /// Number of bytes the array occupies in the data block
    pub fn byte_length(&self) -> Option<usize> {
        self.number_of_values()?
            .checked_mul(self.data_type.byte_size())
    }
}

/// Values of a single named array
#[derive(Debug, Clone, PartialEq)]
pub enum GridArray {
    /// Values of an `INTEGER` definition
    Integer(Vec<i32>),
    /// Values of a `SINGLE` definition
    Single(Vec<f32>),
    /// Values of a `DOUBLE` definition
    Double(Vec<f64>),
}

impl GridArray {
    /// Storage type of the values
    pub fn data_type(&self) -> DataType {
        match self {
            GridArray::Integer(_) => DataType::Integer,
            GridArray::Single(_) => DataType::Single,
            GridArray::Double(_) => DataType::Double,
        }
    }

    /// Number of values held
    pub fn len(&self) -> usize {
        match self {
            GridArray::Integer(v) => v.len(),
            GridArray::Single(v) => v.len(),
            GridArray::Double(v) => v.len(),
        }
    }

    /// True when no values are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Content of a MODFLOW 6 binary grid file
///
/// Arrays are kept exactly as they are found in the file and can be fetched
/// by name. The connectivity arrays get dedicated accessors because they are
/// 1-based on disk:
///
/// - [BinaryGrid::ia()] is the 0-based offset array of length `NCELLS + 1`,
///   where the connections of cell `n` are the half-open range
///   `ia[n]..ia[n + 1]`
/// - [BinaryGrid::ja()] is the 0-based list of connected cells of length
///   `NJA`, the first entry of every range being the cell itself
///
/// ```rust, no_run
/// # use tracktools_grid::BinaryGrid;
/// let grid = BinaryGrid::from_file("path/to/ml.disv.grb").unwrap();
/// let ia = grid.ia().unwrap();
/// println!("{} cells, {} connections", grid.ncells().unwrap(), ia[ia.len() - 1]);
/// ```
#[derive(Debug, Default)]
pub struct BinaryGrid {
    /// Discretisation type
    pub grid_type: GridType,
    /// File format version
    pub version: u32,
    /// Array definitions in file order
    pub definitions: Vec<Definition>,
    /// Array values by name
    pub(crate) arrays: BTreeMap<String, GridArray>,
}

impl BinaryGrid {
    /// Read a binary grid file
    ///
    /// Convenience for [read_grid_file()].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_grid_file(path)
    }

    /// Any array by name
    pub fn array(&self, name: &str) -> Result<&GridArray> {
        self.arrays
            .get(name)
            .ok_or_else(|| Error::MissingArray(name.to_string()))
    }

    /// Names of every array in file order
    pub fn array_names(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.name.as_str()).collect()
    }

    /// Integer array by name
    pub fn integers(&self, name: &str) -> Result<&[i32]> {
        match self.array(name)? {
            GridArray::Integer(values) => Ok(values),
            other => Err(Error::UnexpectedDataType {
                name: name.to_string(),
                expected: DataType::Integer,
                found: other.data_type(),
            }),
        }
    }

    /// Double precision array by name
    pub fn doubles(&self, name: &str) -> Result<&[f64]> {
        match self.array(name)? {
            GridArray::Double(values) => Ok(values),
            other => Err(Error::UnexpectedDataType {
                name: name.to_string(),
                expected: DataType::Double,
                found: other.data_type(),
            }),
        }
    }

    /// Scalar integer, such as `NCELLS` or `NJA`
    pub fn scalar_integer(&self, name: &str) -> Result<i32> {
        let values = self.integers(name)?;
        match values {
            [value] => Ok(*value),
            _ => Err(Error::UnexpectedLength {
                name: name.to_string(),
                expected: 1,
                found: values.len(),
            }),
        }
    }

    /// Number of cells in the model
    pub fn ncells(&self) -> Result<usize> {
        Ok(self.scalar_integer("NCELLS")?.max(0) as usize)
    }

    /// Number of entries in the connectivity arrays
    pub fn nja(&self) -> Result<usize> {
        Ok(self.scalar_integer("NJA")?.max(0) as usize)
    }

    /// 0-based `IA` offset array
    ///
    /// Every value is shifted down by one from the file. The result is checked
    /// to be non-decreasing, to have `NCELLS + 1` entries, and to end on `NJA`
    /// when those scalars are present.
    pub fn ia(&self) -> Result<Vec<usize>> {
        let ia = to_zero_based("IA", self.integers("IA")?)?;

        if let Some(position) = ia.windows(2).position(|w| w[1] < w[0]) {
            return Err(Error::NonMonotonicOffsets {
                name: "IA".to_string(),
                position: position + 1,
            });
        }

        if let Ok(ncells) = self.ncells() {
            if ia.len() != ncells + 1 {
                return Err(Error::UnexpectedLength {
                    name: "IA".to_string(),
                    expected: ncells + 1,
                    found: ia.len(),
                });
            }
        }

        if let Ok(nja) = self.nja() {
            let last = ia.last().copied().unwrap_or_default();
            if last != nja {
                return Err(Error::UnexpectedLength {
                    name: "IA".to_string(),
                    expected: nja,
                    found: last,
                });
            }
        }

        Ok(ia)
    }

    /// 0-based `JA` connection array
    pub fn ja(&self) -> Result<Vec<usize>> {
        to_zero_based("JA", self.integers("JA")?)
    }
}

impl std::fmt::Display for BinaryGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = f!("BinaryGrid {{\n    type: {:?}\n", self.grid_type);
        s += &f!("    version: {}\n", self.version);
        for definition in &self.definitions {
            s += &f!(
                "    {}: {:?} x {:?}\n",
                definition.name,
                definition.data_type,
                definition.shape
            );
        }
        s += "}";
        write!(f, "{}", s)
    }
}

/// Shift 1-based file indices to 0-based indices
fn to_zero_based(name: &str, values: &[i32]) -> Result<Vec<usize>> {
    values
        .iter()
        .enumerate()
        .map(|(position, &value)| {
            if value < 1 {
                Err(Error::InvalidIndex {
                    name: name.to_string(),
                    position,
                    value,
                })
            } else {
                Ok((value - 1) as usize)
            }
        })
        .collect()
}
