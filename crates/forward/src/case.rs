//! Case directories of a forward run

// standard library
use std::fs::read_dir;
use std::path::{Path, PathBuf};

// crate modules
use crate::error::{Error, Result};

// external crates
use log::debug;

/// Single model case, e.g. `ml_07`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Case {
    /// Numeric id from the directory name, used as the `time` column
    pub id: u32,
    /// Case directory
    pub dir: PathBuf,
}

impl Case {
    /// Case for a directory named `<prefix><id>`
    ///
    /// ```rust
    /// # use tracktools_forward::Case;
    /// let case = Case::from_dir("runs/ml_07", "ml_").unwrap();
    /// assert_eq!(case.id, 7);
    /// assert!(Case::from_dir("runs/ml_base", "ml_").is_err());
    /// ```
    pub fn from_dir<P: AsRef<Path>>(dir: P, prefix: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let id = dir
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_prefix(prefix))
            .and_then(|suffix| suffix.parse::<u32>().ok())
            .ok_or_else(|| Error::InvalidCaseName(dir.to_path_buf()))?;

        Ok(Self {
            id,
            dir: dir.to_path_buf(),
        })
    }

    /// Path of a file inside the case directory
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Path of an input file, failing if it does not exist
    pub fn input(&self, file: &str) -> Result<PathBuf> {
        let path = self.path(file);
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::MissingFile(path))
        }
    }
}

/// Every case directory directly under `root`, sorted by id
///
/// Directories starting with `prefix` must end in a numeric id; anything
/// else under `root` is ignored.
pub fn discover_cases<P: AsRef<Path>>(root: P, prefix: &str) -> Result<Vec<Case>> {
    let root = root.as_ref();
    let mut cases = Vec::new();

    for entry in read_dir(root)? {
        let path = entry?.path();
        let is_case = path.is_dir()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(prefix));

        if is_case {
            cases.push(Case::from_dir(&path, prefix)?);
        }
    }

    if cases.is_empty() {
        return Err(Error::NoCases {
            root: root.to_path_buf(),
            prefix: prefix.to_string(),
        });
    }

    cases.sort();
    debug!("Found {} cases in {:?}", cases.len(), root);
    Ok(cases)
}
