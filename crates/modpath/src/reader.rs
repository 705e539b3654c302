//! Read operations for MODPATH 7 endpoint and pathline files
//!
//! Both files are plain text: a header closed by `END HEADER`, followed by
//! whitespace separated records. Everything 1-based in the file is made
//! 0-based here.

// standard library
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// crate modules
use crate::endpoint::{EndpointFile, EndpointHeader};
use crate::error::{Error, Result};
use crate::parsers;
use crate::pathline::{Pathline, PathlineFile, PathlineHeader};

// external crates
use log::{debug, info};

const ENDPOINT_TAG: &str = "MODPATH_ENDPOINT_FILE";
const PATHLINE_TAG: &str = "MODPATH_PATHLINE_FILE";
const SUPPORTED_VERSION: u32 = 7;

/// Numbered line of text, 1-based for error messages
type Line = (usize, String);

/// Read a MODPATH 7 endpoint file
///
/// ```rust
/// # use tracktools_modpath::read_endpoint_file;
/// let endpoints = read_endpoint_file("./data/example.mpend").unwrap();
/// assert_eq!(endpoints.header.groups, vec!["BAR", "GAL"]);
/// ```
pub fn read_endpoint_file<P: AsRef<Path>>(path: P) -> Result<EndpointFile> {
    info!("Reading {:?}", path.as_ref());
    let mut reader = init_reader(path)?;
    read_endpoints(&mut reader)
}

/// Read MODPATH 7 endpoints from any buffered text stream
pub fn read_endpoints<R: BufRead>(reader: &mut R) -> Result<EndpointFile> {
    let mut lines = numbered_lines(reader);
    let header = parse_endpoint_header(&read_header(&mut lines)?)?;

    let mut endpoints = Vec::new();
    for line in lines {
        let (number, content) = line?;
        if content.trim().is_empty() {
            continue;
        }
        let (_, endpoint) = parsers::endpoint_record(&content).map_err(|_| Error::InvalidRecord {
            line: number,
            content: content.clone(),
        })?;
        endpoints.push(endpoint);
    }

    // file order is not guaranteed for multi-group runs
    endpoints.sort_by_key(|e| e.particle_id);

    debug!("Found {} endpoints", endpoints.len());
    Ok(EndpointFile { header, endpoints })
}

/// Read a MODPATH 7 pathline file
///
/// ```rust
/// # use tracktools_modpath::read_pathline_file;
/// let pathlines = read_pathline_file("./data/example.mppth").unwrap();
/// assert_eq!(pathlines.pathlines.len(), 4);
/// ```
pub fn read_pathline_file<P: AsRef<Path>>(path: P) -> Result<PathlineFile> {
    info!("Reading {:?}", path.as_ref());
    let mut reader = init_reader(path)?;
    read_pathlines(&mut reader)
}

/// Read MODPATH 7 pathlines from any buffered text stream
pub fn read_pathlines<R: BufRead>(reader: &mut R) -> Result<PathlineFile> {
    let mut lines = numbered_lines(reader);
    let header = parse_pathline_header(&read_header(&mut lines)?)?;

    let mut pathlines: BTreeMap<usize, Pathline> = BTreeMap::new();
    while let Some(line) = lines.next() {
        let (number, content) = line?;
        if content.trim().is_empty() {
            continue;
        }

        let (_, (particle_id, group, local_id, n_points)) = parsers::pathline_particle(&content)
            .map_err(|_| Error::InvalidRecord {
                line: number,
                content: content.clone(),
            })?;

        let pathline = pathlines.entry(particle_id).or_insert_with(|| Pathline {
            particle_id,
            group,
            local_id,
            points: Vec::new(),
        });

        for read in 0..n_points {
            let (number, content) = lines.next().ok_or(Error::IncompletePathline {
                particle: particle_id,
                missing: n_points - read,
            })??;
            let (_, point) =
                parsers::pathline_point(&content).map_err(|_| Error::InvalidRecord {
                    line: number,
                    content: content.clone(),
                })?;
            pathline.points.push(point);
        }
    }

    let mut pathlines: Vec<Pathline> = pathlines.into_values().collect();
    pathlines.iter_mut().for_each(|p| p.sort_points());

    debug!("Found {} pathlines", pathlines.len());
    Ok(PathlineFile { header, pathlines })
}

/// Initialise a reader from anything that can be turned into a path
fn init_reader(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Lines paired with their 1-based line number
fn numbered_lines<R: BufRead>(reader: &mut R) -> impl Iterator<Item = Result<Line>> + '_ {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| -> Result<Line> { Ok((i + 1, line?)) })
}

/// Every line up to, but excluding, `END HEADER`
fn read_header<I: Iterator<Item = Result<Line>>>(lines: &mut I) -> Result<Vec<Line>> {
    let mut header = Vec::new();
    for line in lines.by_ref() {
        let line = line?;
        if line.1.trim().eq_ignore_ascii_case("END HEADER") {
            return Ok(header);
        }
        header.push(line);
    }
    Err(Error::MissingHeaderEnd)
}

/// Header line at a position, or an error naming what was expected there
fn header_line<'a>(header: &'a [Line], index: usize, name: &str) -> Result<&'a str> {
    header
        .get(index)
        .map(|(_, content)| content.as_str())
        .ok_or_else(|| Error::InvalidHeaderLine {
            name: name.to_string(),
            line: index + 1,
            content: String::new(),
        })
}

/// Build an error for a header line that failed to parse
fn invalid_header_line(header: &[Line], index: usize, name: &str) -> Error {
    Error::InvalidHeaderLine {
        name: name.to_string(),
        line: index + 1,
        content: header
            .get(index)
            .map(|(_, c)| c.clone())
            .unwrap_or_default(),
    }
}

/// Version and revision from the leading file tag
fn parse_version(header: &[Line], tag: &'static str) -> Result<(u32, u32)> {
    let line = header_line(header, 0, "file tag").map_err(|_| Error::InvalidHeader {
        expected: tag.to_string(),
        found: String::new(),
    })?;

    let (_, version) = parsers::file_tag(tag)(line).map_err(|_| Error::InvalidHeader {
        expected: tag.to_string(),
        found: line.to_string(),
    })?;

    if version.0 != SUPPORTED_VERSION {
        return Err(Error::UnsupportedVersion(version.0));
    }
    Ok(version)
}

fn parse_endpoint_header(header: &[Line]) -> Result<EndpointHeader> {
    let version = parse_version(header, ENDPOINT_TAG)?;

    let line = header_line(header, 1, "particle settings")?;
    let (_, settings) = parsers::endpoint_settings(line)
        .map_err(|_| invalid_header_line(header, 1, "particle settings"))?;

    let line = header_line(header, 2, "status counts")?;
    let (_, status_counts) =
        parsers::counts(line).map_err(|_| invalid_header_line(header, 2, "status counts"))?;

    let line = header_line(header, 3, "group count")?;
    let (_, n_groups) =
        parsers::count(line).map_err(|_| invalid_header_line(header, 3, "group count"))?;

    let groups = (0..n_groups)
        .map(|g| header_line(header, 4 + g, "group name").map(|name| name.trim().to_string()))
        .collect::<Result<Vec<String>>>()?;

    let (
        direction,
        total_count,
        release_count,
        max_id,
        reference_time,
        x_origin,
        y_origin,
        rotation,
    ) = settings;

    Ok(EndpointHeader {
        version,
        direction,
        total_count,
        release_count,
        max_id,
        reference_time,
        x_origin,
        y_origin,
        rotation,
        status_counts,
        groups,
    })
}

fn parse_pathline_header(header: &[Line]) -> Result<PathlineHeader> {
    let version = parse_version(header, PATHLINE_TAG)?;

    let line = header_line(header, 1, "particle settings")?;
    let (_, (direction, reference_time, x_origin, y_origin, rotation)) =
        parsers::pathline_settings(line)
            .map_err(|_| invalid_header_line(header, 1, "particle settings"))?;

    Ok(PathlineHeader {
        version,
        direction,
        reference_time,
        x_origin,
        y_origin,
        rotation,
    })
}
