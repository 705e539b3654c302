//! Parsers for the text header of a binary grid file

// crate modules
use crate::grid::{DataType, Definition};

// nom parser combinators
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{alphanumeric1, space0, space1, u32};
use nom::combinator::value;
use nom::multi::count;
use nom::sequence::{preceded, tuple};
use nom::IResult;

/// Grid type tag from the first header line, e.g. `GRID DISV`
pub(crate) fn grid_type(i: &str) -> IResult<&str, &str> {
    preceded(tuple((space0, tag("GRID"), space1)), alphanumeric1)(i)
}

/// Value following a keyword, e.g. `NTXT 16` or `LENTXT 100`
pub(crate) fn keyword_value<'a>(
    keyword: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, u32> {
    preceded(tuple((space0, tag(keyword), space1)), u32)
}

/// Full array definition line, e.g. `TOP DOUBLE NDIM 1 3472`
///
/// Anything after the dimensions (newer files append a comment) is left in
/// the remaining input.
pub(crate) fn definition(i: &str) -> IResult<&str, Definition> {
    let (i, name) = preceded(space0, take_while1(|c: char| !c.is_whitespace()))(i)?;
    let (i, data_type) = preceded(space1, data_type)(i)?;
    let (i, _) = tuple((space1, tag("NDIM"), space1))(i)?;
    let (i, ndim) = u32(i)?;
    let (i, shape) = count(preceded(space1, u32), ndim as usize)(i)?;

    Ok((
        i,
        Definition {
            name: name.to_string(),
            data_type,
            shape: shape.into_iter().map(|v| v as usize).collect(),
        },
    ))
}

/// Storage type keyword
fn data_type(i: &str) -> IResult<&str, DataType> {
    alt((
        value(DataType::Integer, tag("INTEGER")),
        value(DataType::Single, tag("SINGLE")),
        value(DataType::Double, tag("DOUBLE")),
    ))(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_type_tag() {
        assert_eq!(grid_type("GRID DISV"), Ok(("", "DISV")));
        assert_eq!(grid_type("GRID DIS"), Ok(("", "DIS")));
        assert!(grid_type("GIRD DISV").is_err());
    }

    #[test]
    fn keyword_values() {
        assert_eq!(keyword_value("VERSION")("VERSION 1"), Ok(("", 1)));
        assert_eq!(keyword_value("NTXT")("NTXT 16"), Ok(("", 16)));
        assert_eq!(keyword_value("LENTXT")("LENTXT 100"), Ok(("", 100)));
        assert!(keyword_value("NTXT")("LENTXT 100").is_err());
    }

    #[test]
    fn scalar_definition() {
        let (_, d) = definition("NCELLS INTEGER NDIM 0 # number of cells").unwrap();
        assert_eq!(d.name, "NCELLS");
        assert_eq!(d.data_type, DataType::Integer);
        assert!(d.shape.is_empty());
        assert_eq!(d.number_of_values(), Some(1));
    }

    #[test]
    fn array_definitions() {
        let (_, d) = definition("IA INTEGER NDIM 1 3473").unwrap();
        assert_eq!(d.shape, vec![3473]);
        assert_eq!(d.byte_length(), Some(3473 * 4));

        let (_, d) = definition("VERTICES DOUBLE NDIM 2 2 120").unwrap();
        assert_eq!(d.data_type, DataType::Double);
        assert_eq!(d.number_of_values(), Some(240));
    }

    #[test]
    fn broken_definitions() {
        assert!(definition("IA LOGICAL NDIM 1 10").is_err());
        assert!(definition("IA INTEGER NDIM 2 10").is_err());
        assert!(definition("IA INTEGER 1 10").is_err());
    }
}
