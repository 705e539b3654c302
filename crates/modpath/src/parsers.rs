//! Parsers for the text records of MODPATH 7 output

// crate modules
use crate::endpoint::Endpoint;
use crate::particle::{Location, Point, TrackingDirection};
use crate::pathline::PathlinePoint;

// nom parser combinators
use nom::bytes::complete::tag;
use nom::character::complete::{i32 as int32, i64 as int64, space0, space1, u32, u64};
use nom::combinator::{map, map_res};
use nom::multi::many1;
use nom::number::complete::double;
use nom::sequence::{preceded, tuple};
use nom::IResult;

/// Particle settings from the second line of the endpoint header
pub(crate) type EndpointSettings = (TrackingDirection, usize, usize, usize, f64, f64, f64, f64);

/// Particle settings from the second line of the pathline header
pub(crate) type PathlineSettings = (TrackingDirection, f64, f64, f64, f64);

/// Leading file tag with version and revision, e.g. `MODPATH_ENDPOINT_FILE 7 2`
pub(crate) fn file_tag<'a>(
    name: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, (u32, u32)> {
    map(
        tuple((space0, tag(name), space1, u32, space1, u32)),
        |(_, _, _, version, _, revision)| (version, revision),
    )
}

/// `direction total released max_id reference_time x_origin y_origin rotation`
pub(crate) fn endpoint_settings(i: &str) -> IResult<&str, EndpointSettings> {
    tuple((
        direction,
        count,
        count,
        count,
        preceded(space0, double),
        preceded(space0, double),
        preceded(space0, double),
        preceded(space0, double),
    ))(i)
}

/// `direction reference_time x_origin y_origin rotation`
pub(crate) fn pathline_settings(i: &str) -> IResult<&str, PathlineSettings> {
    tuple((
        direction,
        preceded(space0, double),
        preceded(space0, double),
        preceded(space0, double),
        preceded(space0, double),
    ))(i)
}

/// Any number of whitespace separated counts
pub(crate) fn counts(i: &str) -> IResult<&str, Vec<usize>> {
    many1(count)(i)
}

/// Single non-negative count
pub(crate) fn count(i: &str) -> IResult<&str, usize> {
    map_res(preceded(space0, u64), usize::try_from)(i)
}

/// 26 column endpoint record
pub(crate) fn endpoint_record(i: &str) -> IResult<&str, Endpoint> {
    let (i, (particle_id, group, local_id, status)) =
        tuple((index, index, count, preceded(space0, int32)))(i)?;
    let (i, (initial_time, final_time)) =
        tuple((preceded(space0, double), preceded(space0, double)))(i)?;
    let (i, initial) = location(i)?;
    let (i, terminal) = location(i)?;

    Ok((
        i,
        Endpoint {
            particle_id,
            group,
            local_id,
            status,
            initial_time,
            final_time,
            initial,
            terminal,
        },
    ))
}

/// Pathline particle line, `sequence group local_id number_of_points`
pub(crate) fn pathline_particle(i: &str) -> IResult<&str, (usize, usize, usize, usize)> {
    tuple((index, index, count, count))(i)
}

/// Pathline point, `cell x y z time x_local y_local z_local layer period step`
pub(crate) fn pathline_point(i: &str) -> IResult<&str, PathlinePoint> {
    let (i, node) = index(i)?;
    let (i, position) = point(i)?;
    let (i, time) = preceded(space0, double)(i)?;
    let (i, local) = point(i)?;
    let (i, (layer, stress_period, time_step)) =
        tuple((index, preceded(space0, int32), preceded(space0, int32)))(i)?;

    Ok((
        i,
        PathlinePoint {
            node,
            position,
            time,
            local,
            layer,
            stress_period,
            time_step,
        },
    ))
}

/// `cell layer x_local y_local z_local x y z zone face`
fn location(i: &str) -> IResult<&str, Location> {
    let (i, (node, layer, local, global)) = tuple((index, index, point, point))(i)?;
    let (i, (zone, face)) = tuple((preceded(space0, int32), preceded(space0, int32)))(i)?;

    Ok((
        i,
        Location {
            node,
            layer,
            local,
            global,
            zone,
            face,
        },
    ))
}

/// Three consecutive coordinates
fn point(i: &str) -> IResult<&str, Point> {
    let (i, (x, y, z)) = tuple((
        preceded(space0, double),
        preceded(space0, double),
        preceded(space0, double),
    ))(i)?;
    Ok((i, Point { x, y, z }))
}

/// 1-based number converted to a 0-based index
fn index(i: &str) -> IResult<&str, usize> {
    map_res(preceded(space0, int64), |v: i64| usize::try_from(v - 1))(i)
}

/// Tracking direction flag, 1 forward and 2 backward
fn direction(i: &str) -> IResult<&str, TrackingDirection> {
    map_res(preceded(space0, int64), |v: i64| TrackingDirection::try_from(v))(i)
}
