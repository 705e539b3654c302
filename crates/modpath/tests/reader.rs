//! Integration tests for reading MODPATH 7 output

use std::io::Cursor;

use rstest::{fixture, rstest};
use tracktools_modpath::{
    read_endpoint_file, read_endpoints, read_pathline_file, read_pathlines, EndpointFile, Error,
    PathlineFile, TrackingDirection, VelocitySampling,
};

#[fixture]
fn endpoints() -> EndpointFile {
    read_endpoint_file("./data/example.mpend").unwrap()
}

#[fixture]
fn pathlines() -> PathlineFile {
    read_pathline_file("./data/example.mppth").unwrap()
}

#[rstest]
fn endpoint_header(endpoints: EndpointFile) {
    let h = &endpoints.header;
    assert_eq!(h.version, (7, 2));
    assert_eq!(h.direction, TrackingDirection::Backward);
    assert_eq!(h.total_count, 4);
    assert_eq!(h.status_counts[2], 4);
    assert_eq!(h.groups, vec!["BAR", "GAL"]);
    assert_eq!(endpoints.group_name(1), Some("GAL"));
    assert_eq!(endpoints.group_name(2), None);
}

#[rstest]
fn endpoints_are_zero_based_and_sorted(endpoints: EndpointFile) {
    let ids: Vec<usize> = endpoints.endpoints.iter().map(|e| e.particle_id).collect();
    let groups: Vec<usize> = endpoints.endpoints.iter().map(|e| e.group).collect();
    let nodes: Vec<usize> = endpoints.endpoints.iter().map(|e| e.node()).collect();

    // particles 1-4 in the file, written out of order
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!(groups, vec![0, 0, 1, 1]);
    // final cells 2, 3, 2, 1 in the file
    assert_eq!(nodes, vec![1, 2, 1, 0]);
    assert_eq!(endpoints.groups(), vec![0, 1]);
    assert_eq!(endpoints.endpoints[1].travel_time(), 200.0);
}

#[rstest]
fn pathlines_are_sorted(pathlines: PathlineFile) {
    let ids: Vec<usize> = pathlines.pathlines.iter().map(|p| p.particle_id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);

    // particle 2 is written out of time order
    let p = pathlines.get(1).unwrap();
    let times: Vec<f64> = p.points.iter().map(|p| p.time).collect();
    assert_eq!(times, vec![0.0, 4.0, 20.0]);
    assert_eq!(p.points[2].node, 3);
    assert!(pathlines.get(9).is_none());
}

#[rstest]
#[case(VelocitySampling::Samples { first: 1 }, [Some(2.0), Some(0.5), None, Some(3.0)])]
#[case(VelocitySampling::Samples { first: 0 }, [Some(0.5), Some(1.0), Some(1.0), Some(1.0)])]
#[case(VelocitySampling::AfterTime { reference: 4.0 }, [Some(2.0), Some(0.5), None, None])]
fn velocity_sampling(
    pathlines: PathlineFile,
    #[case] sampling: VelocitySampling,
    #[case] expected: [Option<f64>; 4],
) {
    let velocities = pathlines.velocities(sampling);
    let found: Vec<Option<f64>> = velocities.values().copied().collect();
    assert_eq!(found, expected.to_vec());
}

#[test]
fn sampling_from_json() {
    let sampling: VelocitySampling =
        serde_json::from_str(r#"{"after_time": {"reference": 1.0}}"#).unwrap();
    assert_eq!(sampling, VelocitySampling::AfterTime { reference: 1.0 });
    assert_eq!(VelocitySampling::default(), VelocitySampling::Samples { first: 1 });
}

#[test]
fn segments_are_merged() {
    let text = "MODPATH_PATHLINE_FILE 7 2\n\
                1 0.0 0.0 0.0 0.0\n\
                END HEADER\n\
                1 1 1 1\n\
                1 0.0 0.0 0.0 0.0 0.5 0.5 0.5 1 1 1\n\
                1 1 1 1\n\
                2 3.0 4.0 0.0 1.0 0.5 0.5 0.5 1 1 1\n";
    let pathlines = read_pathlines(&mut Cursor::new(text)).unwrap();
    assert_eq!(pathlines.pathlines.len(), 1);
    assert_eq!(pathlines.pathlines[0].points.len(), 2);
    assert_eq!(
        pathlines.pathlines[0].velocity(VelocitySampling::Samples { first: 0 }),
        Some(5.0)
    );
}

#[test]
fn missing_header_end() {
    let text = "MODPATH_ENDPOINT_FILE 7 2\n1 0 0 0 0.0 0.0 0.0 0.0\n";
    let result = read_endpoints(&mut Cursor::new(text));
    assert!(matches!(result, Err(Error::MissingHeaderEnd)));
}

#[rstest]
#[case("MODPATH_PATHLINE_FILE 7 2\n")]
#[case("something else entirely\n")]
fn wrong_file_type(#[case] first_line: &str) {
    let text = format!("{first_line}END HEADER\n");
    let result = read_endpoints(&mut Cursor::new(text));
    assert!(matches!(result, Err(Error::InvalidHeader { .. })));
}

#[test]
fn unsupported_version() {
    let text = "MODPATH_ENDPOINT_FILE 6 0\nEND HEADER\n";
    let result = read_endpoints(&mut Cursor::new(text));
    assert!(matches!(result, Err(Error::UnsupportedVersion(6))));
}

#[test]
fn truncated_pathline() {
    let text = "MODPATH_PATHLINE_FILE 7 2\n\
                2 0.0 0.0 0.0 0.0\n\
                END HEADER\n\
                1 1 1 3\n\
                1 0.0 0.0 0.0 0.0 0.5 0.5 0.5 1 1 1\n";
    let result = read_pathlines(&mut Cursor::new(text));
    assert!(matches!(
        result,
        Err(Error::IncompletePathline {
            particle: 0,
            missing: 2
        })
    ));
}

#[test]
fn invalid_record_reports_line() {
    let text = "MODPATH_PATHLINE_FILE 7 2\n\
                2 0.0 0.0 0.0 0.0\n\
                END HEADER\n\
                1 1 1 1\n\
                not a point\n";
    let result = read_pathlines(&mut Cursor::new(text));
    assert!(matches!(result, Err(Error::InvalidRecord { line: 5, .. })));
}

#[test]
fn declared_counts_beyond_the_data() {
    let text = "MODPATH_ENDPOINT_FILE 7 2\n\
                2 1000000000000000 1 1 0.0 0.0 0.0 0.0\n\
                0 0 1 0 0 0 0 0 0 0\n\
                0\n\
                END HEADER\n";
    let endpoints = read_endpoints(&mut Cursor::new(text)).unwrap();
    assert_eq!(endpoints.header.total_count, 1_000_000_000_000_000);
    assert!(endpoints.is_empty());

    let text = "MODPATH_PATHLINE_FILE 7 2\n\
                2 0.0 0.0 0.0 0.0\n\
                END HEADER\n\
                1 1 1 1000000000000000\n\
                1 0.0 0.0 0.0 0.0 0.5 0.5 0.5 1 1 1\n";
    let result = read_pathlines(&mut Cursor::new(text));
    assert!(matches!(
        result,
        Err(Error::IncompletePathline {
            particle: 0,
            missing: 999_999_999_999_999
        })
    ));
}
