use fitsweep_core::Metric;
use fitsweep_exp::{KeyValueExtractor, MetricExtractor, PatternExtractor};

const FULL_OUTPUT: &str = "\
Info: simulation started
TOTAL: RES_SUM: 1.23E+04
TOTAL: LAT_SUM: -2.5e-3
SPFM:  99.8765%
LFM:   .5%
Info: /OSCI/SystemC: Simulation stopped by user.
";

fn extractor() -> PatternExtractor {
    PatternExtractor::new().expect("patterns compile")
}

#[test]
fn extracts_all_four_metrics() {
    let metrics = extractor().extract(FULL_OUTPUT);
    assert_eq!(metrics.res, Some(12300.0));
    assert_eq!(metrics.lat, Some(-0.0025));
    assert_eq!(metrics.spfm, Some(99.8765));
    assert_eq!(metrics.lfm, Some(0.5));
    assert!(metrics.is_complete());
}

#[test]
fn missing_line_leaves_other_metrics() {
    let output = FULL_OUTPUT.replace("TOTAL: LAT_SUM: -2.5e-3\n", "");
    let metrics = extractor().extract(&output);
    assert_eq!(metrics.lat, None);
    assert_eq!(metrics.res, Some(12300.0));
    assert_eq!(metrics.spfm, Some(99.8765));
    assert_eq!(metrics.lfm, Some(0.5));
    assert_eq!(metrics.missing_metrics(), vec![Metric::Lat]);
}

#[test]
fn percent_suffix_is_required() {
    let metrics = extractor().extract("SPFM:  12.5\nLFM:   3%\n");
    assert_eq!(metrics.spfm, None);
    assert_eq!(metrics.lfm, Some(3.0));
}

#[test]
fn empty_output_is_all_missing() {
    let metrics = extractor().extract("");
    assert_eq!(metrics.missing_metrics(), Metric::ALL.to_vec());
}

#[test]
fn integer_and_trailing_dot_numbers() {
    let metrics = extractor().extract("TOTAL: RES_SUM: 100\nTOTAL: LAT_SUM: +7.\n");
    assert_eq!(metrics.res, Some(100.0));
    assert_eq!(metrics.lat, Some(7.0));
}

#[test]
fn key_value_contract() {
    let metrics = KeyValueExtractor.extract("res=100.0\nlat=2.5\nspfm=0.001%\nlfm=0.002\n");
    assert_eq!(metrics.res, Some(100.0));
    assert_eq!(metrics.lat, Some(2.5));
    assert_eq!(metrics.spfm, Some(0.001));
    assert_eq!(metrics.lfm, Some(0.002));
}

#[test]
fn extractors_are_interchangeable() {
    let extractors: Vec<Box<dyn MetricExtractor>> =
        vec![Box::new(extractor()), Box::new(KeyValueExtractor)];
    for extractor in &extractors {
        assert!(!extractor.extract("nothing to see").is_complete());
    }
}

#[test]
fn non_ascii_digits_do_not_shadow_later_lines() {
    let metrics = extractor().extract("TOTAL: RES_SUM: 5\u{0663}\nTOTAL: RES_SUM: 7.0\n");
    assert_eq!(metrics.res, Some(5.0));
    let metrics = extractor().extract("TOTAL: RES_SUM: \u{0663}\nTOTAL: RES_SUM: 7.0\n");
    assert_eq!(metrics.res, Some(7.0));
}
