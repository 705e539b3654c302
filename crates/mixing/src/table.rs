//! Mixing ratio results and their CSV forms

// standard library
use std::fmt::Display;
use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::particle::OTHERS;

// tracktools modules
use tracktools_format::f;

// external crates
use log::info;
use serde::{Deserialize, Serialize};

/// Layout of the mixing ratio CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputShape {
    /// One row per group, header `time,group,<categories...>,OTHERS`
    ByGroup,
    /// A single row of one category, header `time,<groups...>`
    Transpose {
        /// Category reported for every group
        category: String,
    },
}

impl Default for OutputShape {
    fn default() -> Self {
        Self::Transpose {
            category: "river".to_string(),
        }
    }
}

/// Mixing ratio of every particle group to every category
///
/// Rows are particle groups and columns are categories, with OTHERS always
/// last. Every defined row sums to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct MixingTable {
    groups: Vec<String>,
    categories: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl MixingTable {
    pub(crate) fn new(groups: Vec<String>, categories: Vec<String>, values: Vec<Vec<f64>>) -> Self {
        Self {
            groups,
            categories,
            values,
        }
    }

    /// Group names in row order
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Category names in column order, ending with OTHERS
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Ratio of a group to a category
    pub fn get(&self, group: &str, category: &str) -> Option<f64> {
        let column = self.column_index(category)?;
        self.row(group).map(|row| row[column])
    }

    /// Every ratio of a group
    pub fn row(&self, group: &str) -> Option<&[f64]> {
        self.groups
            .iter()
            .position(|g| g == group)
            .map(|i| self.values[i].as_slice())
    }

    /// Ratios of every group to a category
    pub fn column(&self, category: &str) -> Option<Vec<f64>> {
        let column = self.column_index(category)?;
        Some(self.values.iter().map(|row| row[column]).collect())
    }

    /// Sum of each row, 1 for every defined group
    pub fn row_sums(&self) -> Vec<f64> {
        self.values.iter().map(|row| row.iter().sum()).collect()
    }

    /// Groups with no defined ratio
    pub fn undefined_groups(&self) -> Vec<&str> {
        self.groups
            .iter()
            .zip(&self.values)
            .filter(|(_, row)| row.iter().any(|v| v.is_nan()))
            .map(|(g, _)| g.as_str())
            .collect()
    }

    /// Patch groups with no defined ratio
    ///
    /// Every source category of those groups is set to `value`, and OTHERS
    /// becomes the residual again.
    pub fn fill_undefined(&mut self, value: f64) {
        for row in self.values.iter_mut() {
            if !row.iter().any(|v| v.is_nan()) {
                continue;
            }
            let n_sources = row.len() - 1;
            row.iter_mut().take(n_sources).for_each(|v| *v = value);
            row[n_sources] = 1.0 - value * n_sources as f64;
        }
    }

    /// Write the table as CSV
    ///
    /// The first column holds `time`, the case or survey identifier. NaN
    /// ratios are left as empty fields.
    pub fn write_csv<W: Write>(
        &self,
        writer: W,
        time: impl Display,
        shape: &OutputShape,
    ) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        let time = f!("{time}");

        match shape {
            OutputShape::ByGroup => {
                let mut header = vec!["time", "group"];
                header.extend(self.categories.iter().map(|c| c.as_str()));
                writer.write_record(&header)?;

                for (group, row) in self.groups.iter().zip(&self.values) {
                    let mut record = vec![time.clone(), group.clone()];
                    record.extend(row.iter().map(|v| csv_value(*v)));
                    writer.write_record(&record)?;
                }
            }
            OutputShape::Transpose { category } => {
                let column = self
                    .column(category)
                    .ok_or_else(|| Error::UnknownCategory(category.clone()))?;

                let mut header = vec!["time"];
                header.extend(self.groups.iter().map(|g| g.as_str()));
                writer.write_record(&header)?;

                let mut record = vec![time];
                record.extend(column.into_iter().map(csv_value));
                writer.write_record(&record)?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    /// Write the table as a CSV file, creating parent directories as needed
    pub fn write_csv_file<P: AsRef<Path>>(
        &self,
        path: P,
        time: impl Display,
        shape: &OutputShape,
    ) -> Result<()> {
        let path = path.as_ref();
        info!("Writing {:?}", path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        self.write_csv(File::create(path)?, time, shape)
    }

    fn column_index(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }
}

impl std::fmt::Display for MixingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let width = self
            .groups
            .iter()
            .chain(&self.categories)
            .map(|s| s.len())
            .max()
            .unwrap_or(0)
            .max(8);

        let mut s = f!("{:<width$}", "group");
        for category in &self.categories {
            s += &f!(" {:>width$}", category);
        }
        s += "\n";

        for (group, row) in self.groups.iter().zip(&self.values) {
            s += &f!("{:<width$}", group);
            for value in row {
                s += &f!(" {:>width$.5}", value);
            }
            s += "\n";
        }
        write!(f, "{}", s.trim_end())
    }
}

/// Shortest round-trip representation, empty for NaN
fn csv_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        f!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MixingTable {
        MixingTable::new(
            vec!["BAR".to_string(), "GAL".to_string()],
            vec!["river".to_string(), OTHERS.to_string()],
            vec![vec![0.25, 0.75], vec![f64::NAN, f64::NAN]],
        )
    }

    #[test]
    fn lookups() {
        let table = table();
        assert_eq!(table.get("BAR", "river"), Some(0.25));
        assert_eq!(table.get("BAR", "canal"), None);
        assert_eq!(table.get("FOO", "river"), None);
        assert_eq!(table.column(OTHERS).unwrap()[0], 0.75);
        assert_eq!(table.undefined_groups(), vec!["GAL"]);
    }

    #[test]
    fn fill_undefined_closes_rows() {
        let mut table = table();
        table.fill_undefined(0.0);
        assert_eq!(table.row("GAL").unwrap(), &[0.0, 1.0]);
        assert_eq!(table.row("BAR").unwrap(), &[0.25, 0.75]);
        assert!(table.undefined_groups().is_empty());
    }

    #[test]
    fn by_group_csv() {
        let mut buffer = Vec::new();
        table()
            .write_csv(&mut buffer, 3, &OutputShape::ByGroup)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "time,group,river,OTHERS\n3,BAR,0.25,0.75\n3,GAL,,\n");
    }

    #[test]
    fn transpose_csv() {
        let mut buffer = Vec::new();
        table()
            .write_csv(&mut buffer, 12, &OutputShape::default())
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "time,BAR,GAL\n12,0.25,\n");
    }

    #[test]
    fn transpose_unknown_category() {
        let shape = OutputShape::Transpose {
            category: "canal".to_string(),
        };
        let result = table().write_csv(Vec::new(), 1, &shape);
        assert!(matches!(result, Err(Error::UnknownCategory(_))));
    }
}
