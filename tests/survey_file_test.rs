//! Survey file loading

use moody::{MoodyError, Survey};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn loads_survey_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[plate]
height_inches = 8.0
width_inches = 12.0
reflector_foot_spacing_inches = 4.0

[readings]
top_starting_diagonal = [1.0, 1.5]
bottom_starting_diagonal = [2.0, 2.5]
north_perimeter = [1.0, 1.2]
east_perimeter = [0.5]
south_perimeter = [1.1, 0.9]
west_perimeter = [0.7]
horizontal_center = [1.0, 1.0]
vertical_center = [0.4]

[uncertainty]
reading_arcsec = 0.05
trials = 10
seed = 3
"#
    )
    .unwrap();

    let survey = Survey::load_from_file(file.path()).unwrap();
    let uncertainty = survey.uncertainty.unwrap();
    assert_eq!(uncertainty.trials, 10);
    assert_eq!(uncertainty.seed, Some(3));

    let report = survey.report().unwrap();
    assert_eq!(report.plate().suggested_station_counts().diagonal, 3);
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    assert!(matches!(Survey::load_from_file(path),
        Err(MoodyError::ConfigInvalid { .. })));
}

#[test]
fn bad_plate_is_rejected_before_reduction() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[plate]
height_inches = -8.0
width_inches = 12.0
reflector_foot_spacing_inches = 4.0

[readings]
top_starting_diagonal = []
bottom_starting_diagonal = []
north_perimeter = []
east_perimeter = []
south_perimeter = []
west_perimeter = []
horizontal_center = []
vertical_center = []
"#
    )
    .unwrap();

    let survey = Survey::load_from_file(file.path()).unwrap();
    assert!(matches!(survey.report(),
        Err(MoodyError::InvalidDimension { name: "height_inches", .. })));
}
