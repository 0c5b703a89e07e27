//! End to end reduction of the bundled 48" x 72" survey

use moody::{Line, LineKind, MoodyError, Report, Survey, SurfacePlateConfig};
use std::path::PathBuf;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn survey() -> Survey {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("union_jack_48x72.toml");
    Survey::load_from_file(path).unwrap()
}

fn report() -> Report {
    survey().report().unwrap()
}

#[test]
fn reference_plate_configuration() {
    let plate = survey().plate_config().unwrap();
    assert_eq!(plate.diagonal_inset(), 1.25);
    assert_eq!(plate.suggested_station_counts().diagonal, 21);
}

#[test]
fn top_starting_diagonal_end_stations() {
    let report = report();
    let top = report.table(Line::TopStartingDiagonal);

    assert_eq!(top.num_stations(), 21);
    for station in [0, 20] {
        assert_eq!(top.datum_displacement()[station], -3.6);
        assert_eq!(top.baseline_displacement()[station], 0.24);
        assert_eq!(top.baseline_linear_displacement()[station], 4.65e-6);
    }
    assert_eq!(top.baseline_displacement()[1], 1.64);
    assert_eq!(top.baseline_linear_displacement()[1], 3.18e-5);
}

#[test]
fn lowest_value_is_broadcast_to_every_table() {
    let report = report();
    assert_eq!(report.lowest_value_across_all_tables(), -3.84);
    for table in report.tables() {
        assert_eq!(table.lowest_value_across_all_tables(), -3.84);
    }
}

#[test]
fn baseline_puts_the_lowest_point_at_zero() {
    let report = report();
    let lowest = report.tables().iter()
        .flat_map(|t| t.baseline_displacement().iter().copied())
        .fold(f64::INFINITY, f64::min);
    assert_eq!(lowest, 0.);

    // The low spot is on the vertical center line
    assert_eq!(report.table(Line::VerticalCenter).baseline_displacement()[4], 0.);
}

#[test]
fn cumulative_displacement_sums_angular_displacement() {
    let report = report();
    for table in report.tables() {
        let sum: f64 = table.angular_displacement().iter().sum();
        let last = *table.cumulative_displacement().last().unwrap();
        assert!((last - sum).abs() < 1e-6, "{}", table.line());
    }
}

#[test]
fn diagonals_cross_at_the_datum() {
    let report = report();
    for line in [Line::TopStartingDiagonal, Line::BottomStartingDiagonal] {
        assert_eq!(report.table(line).datum_displacement()[10], 0.);
    }
}

#[test]
fn perimeters_agree_with_diagonals_at_the_corners() {
    let report = report();
    let top = report.table(Line::TopStartingDiagonal).datum_displacement();
    let bottom = report.table(Line::BottomStartingDiagonal).datum_displacement();
    let (northwest, southeast) = (top[0], top[20]);
    let (northeast, southwest) = (bottom[0], bottom[20]);

    for (line, start, end) in [
        (Line::NorthPerimeter, northwest, northeast),
        (Line::EastPerimeter, northeast, southeast),
        (Line::SouthPerimeter, southwest, southeast),
        (Line::WestPerimeter, northwest, southwest),
    ] {
        let table = report.table(line);
        assert_eq!(table.line().kind(), LineKind::Perimeter);

        let datum = table.datum_displacement();
        assert!(approx_eq(datum[0], start), "{line}");
        assert!(approx_eq(datum[datum.len() - 1], end), "{line}");

        // Intersections are spliced onto the display columns
        let spliced = table.spliced_datum_displacement();
        assert_eq!(spliced.len(), datum.len() + 2);
        assert_eq!(spliced[0], start);
        assert_eq!(spliced[spliced.len() - 1], end);
        assert_eq!(table.spliced_correction_factor().len(), datum.len() + 1);
        assert_eq!(table.spliced_correction_factor()[0], start);
    }
}

#[test]
fn center_lines_hang_off_perimeter_midpoints() {
    let report = report();

    let horizontal = report.table(Line::HorizontalCenter);
    assert_eq!(horizontal.datum_displacement()[0], -3.15);
    assert_eq!(horizontal.datum_displacement()[17], -2.99);
    assert_eq!(horizontal.spliced_datum_displacement()[0], -3.15);
    assert_eq!(horizontal.shifted_datum_displacement().unwrap()[0], 0.28);
    assert_eq!(horizontal.baseline_displacement()[0], 4.12);

    let vertical = report.table(Line::VerticalCenter);
    assert_eq!(vertical.datum_displacement()[0], -3.73);
    assert_eq!(vertical.datum_displacement()[11], -3.47);
    assert_eq!(vertical.shifted_datum_displacement().unwrap(),
        vertical.datum_displacement());
}

#[test]
fn flatness_and_vertices() {
    let report = report();
    assert!(approx_eq(report.flatness(), 8.494e-5));

    let vertices = report.vertices(1.);
    assert_eq!(vertices.len(), 2 * 21 + 3 * 18 + 3 * 12);

    let scaled = report.vertices(1e6);
    let peak = scaled.iter().map(|v| v.z).fold(f64::MIN, f64::max);
    assert!((peak - 84.94).abs() < 1e-6);

    // Vertices stay on the plate footprint
    for vertex in vertices {
        assert!((0. ..=72.).contains(&vertex.x));
        assert!((0. ..=48.).contains(&vertex.y));
    }
}

#[test]
fn cardinality_mismatch_is_rejected() {
    let survey = survey();
    let plate = survey.plate_config().unwrap();

    let mut readings = survey.readings.clone();
    readings.east_perimeter.pop();

    match Report::build(&plate, &readings) {
        Err(MoodyError::CardinalityMismatch { line, expected, actual }) => {
            assert_eq!(line, Line::EastPerimeter);
            assert_eq!(expected, 11);
            assert_eq!(actual, 10);
        }
        other => panic!("expected cardinality mismatch, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn readings_for_a_different_plate_are_rejected() {
    let survey = survey();
    let plate = SurfacePlateConfig::new(36., 48., 4.).unwrap();
    assert!(matches!(Report::build(&plate, &survey.readings),
        Err(MoodyError::CardinalityMismatch { .. })));
}

#[test]
fn report_serializes_to_json() {
    let report = report();
    let json = serde_json::to_value(&report).unwrap();
    let tables = json["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 8);
    assert_eq!(tables[0]["line"], "TopStartingDiagonal");
    assert_eq!(tables[0]["baseline_displacement"][0], 0.24);
}
