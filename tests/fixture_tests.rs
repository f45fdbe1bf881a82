//! End-to-end fixture tests for fiducial strain analysis.
//!
//! Each fixture holds a reference marker set, a frame sequence and the
//! tensors and trend fits expected for it.
//!
//! Run with: cargo test fixture

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use fiducial_strain::{run_analysis, AnalysisConfig, AnalysisResults, Frame, PointSet, StrainComponent};

// ============================================================================
// Fixture JSON Schema
// ============================================================================

#[derive(Debug, Deserialize)]
struct Fixture {
    #[allow(dead_code)]
    description: String,
    config: AnalysisConfig,
    reference: Vec<[f64; 2]>,
    frames: Vec<FrameJson>,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
struct FrameJson {
    frame_index: usize,
    points: Vec<[f64; 2]>,
    deformation_distance: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Expected {
    tensors: Vec<TensorJson>,
    regressions: Vec<RegressionJson>,
}

#[derive(Debug, Deserialize)]
struct TensorJson {
    frame_index: usize,
    status: String,
    xx: Option<f64>,
    yy: Option<f64>,
    xy: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RegressionJson {
    component: StrainComponent,
    slope: f64,
    intercept: f64,
    r_squared: f64,
    p_value: Option<f64>,
    std_err: Option<f64>,
}

// ============================================================================
// Test Helpers
// ============================================================================

fn find_testdata_dir() -> PathBuf {
    // Try various locations relative to where tests run
    let candidates = [
        PathBuf::from("testdata/fixtures"),
        PathBuf::from("../testdata/fixtures"),
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/fixtures")),
    ];

    for candidate in &candidates {
        if candidate.exists() {
            return candidate.clone();
        }
    }
    panic!("Could not find testdata/fixtures directory");
}

fn load_fixture(scenario: &str) -> Fixture {
    let testdata_dir = find_testdata_dir();
    let path = testdata_dir.join(format!("fixture_{}.json", scenario));

    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));

    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

fn run_fixture(fixture: &Fixture) -> AnalysisResults {
    let reference = PointSet::new(&fixture.reference).expect("valid reference markers");
    let frames: Vec<Frame> = fixture
        .frames
        .iter()
        .map(|f| {
            let frame = Frame::new(f.frame_index, PointSet::new(&f.points).expect("valid frame markers"));
            match f.deformation_distance {
                Some(d) => frame.with_deformation_distance(d),
                None => frame,
            }
        })
        .collect();

    run_analysis(&fixture.config, &reference, &frames).expect("analysis should succeed")
}

fn check_value(label: &str, expected: f64, actual: f64, tolerance: f64) -> Result<(), String> {
    let scale = expected.abs().max(1.0);
    let diff = (expected - actual).abs();
    if diff.is_nan() || diff > tolerance * scale {
        return Err(format!("{}: expected {:e}, got {:e}", label, expected, actual));
    }
    Ok(())
}

fn compare_results(expected: &Expected, actual: &AnalysisResults, tolerance: f64) -> Result<(), String> {
    let frames = actual.sequence.frames();
    if expected.tensors.len() != frames.len() {
        return Err(format!(
            "Expected {} tensors, got {}",
            expected.tensors.len(),
            frames.len()
        ));
    }

    for (exp, act) in expected.tensors.iter().zip(frames) {
        if exp.frame_index != act.frame_index {
            return Err(format!(
                "Frame index mismatch: expected {}, got {}",
                exp.frame_index, act.frame_index
            ));
        }

        match (exp.status.as_str(), act.tensor()) {
            ("ok", Some(tensor)) => {
                let label = |c: &str| format!("frame {} {}", exp.frame_index, c);
                check_value(&label("xx"), exp.xx.unwrap_or(f64::NAN), tensor.xx, tolerance)?;
                check_value(&label("yy"), exp.yy.unwrap_or(f64::NAN), tensor.yy, tolerance)?;
                check_value(&label("xy"), exp.xy.unwrap_or(f64::NAN), tensor.xy, tolerance)?;
            }
            ("failed", None) => {}
            (status, tensor) => {
                return Err(format!(
                    "frame {}: expected status {}, got tensor {:?}",
                    exp.frame_index, status, tensor
                ));
            }
        }
    }

    for exp in &expected.regressions {
        let act = actual
            .regression(exp.component)
            .ok_or_else(|| format!("missing regression for {}", exp.component))?;
        let label = |f: &str| format!("{} {}", exp.component, f);

        check_value(&label("slope"), exp.slope, act.slope, tolerance)?;
        check_value(&label("intercept"), exp.intercept, act.intercept, tolerance)?;
        check_value(&label("r_squared"), exp.r_squared, act.r_squared, tolerance)?;
        if let Some(p) = exp.p_value {
            check_value(&label("p_value"), p, act.p_value, tolerance)?;
        }
        if let Some(se) = exp.std_err {
            check_value(&label("std_err"), se, act.std_err, tolerance)?;
        }
    }

    Ok(())
}

fn run_fixture_test(scenario: &str) {
    let fixture = load_fixture(scenario);
    let results = run_fixture(&fixture);

    if let Err(msg) = compare_results(&fixture.expected, &results, 1e-9) {
        panic!("Fixture '{}' mismatch:\n{}", scenario, msg);
    }
}

// ============================================================================
// Fixture Tests
// ============================================================================

#[test]
fn test_fixture_documented_example() {
    run_fixture_test("documented_example");
}

#[test]
fn test_fixture_documented_example_green() {
    run_fixture_test("documented_example_green");
}

#[test]
fn test_fixture_linear_trend_with_gap() {
    run_fixture_test("linear_trend_with_gap");

    let fixture = load_fixture("linear_trend_with_gap");
    let results = run_fixture(&fixture);
    assert_eq!(results.sequence.failed_indices(), vec![3]);
}

#[test]
fn test_fixture_noisy_stretch() {
    run_fixture_test("noisy_stretch");
}

#[test]
fn test_fixture_exports_parse_back() {
    for scenario in ["documented_example", "noisy_stretch"] {
        let fixture = load_fixture(scenario);
        let results = run_fixture(&fixture);
        let text = results.export().expect("export should succeed");

        match fixture.config.export_format {
            fiducial_strain::ExportFormat::Csv => {
                let records = fiducial_strain::export::parse_tensor_csv(&text).unwrap();
                assert_eq!(records.len(), fixture.frames.len());
            }
            fiducial_strain::ExportFormat::Json => {
                let document = fiducial_strain::export::parse_json(&text).unwrap();
                assert_eq!(document.tensors.len(), fixture.frames.len());
            }
        }
    }
}
