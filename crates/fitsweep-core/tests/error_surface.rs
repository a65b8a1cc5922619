use fitsweep_core::errors::{ErrorInfo, SweepError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("dram_fit", "0.01")
        .with_context("reason", "example")
}

#[test]
fn plan_error_surface() {
    let err = SweepError::Plan(sample_info("plan-points", "points must be positive"));
    assert_eq!(err.code(), "plan-points");
    assert!(!err.is_per_point());
}

#[test]
fn invocation_error_surface() {
    let err = SweepError::Invocation(sample_info("invoke-exit-status", "exit status 2"));
    assert_eq!(err.info().code, "invoke-exit-status");
    assert!(err.info().context.contains_key("dram_fit"));
    assert!(err.is_per_point());
}

#[test]
fn extraction_error_surface() {
    let err = SweepError::Extraction(sample_info("extract-missing", "lfm absent"));
    assert!(err.is_per_point());
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn persistence_error_surface() {
    let err = SweepError::Persistence(sample_info("persist-create", "permission denied"));
    assert_eq!(err.code(), "persist-create");
    assert!(!err.is_per_point());
}

#[test]
fn display_includes_context_and_hint() {
    let err = SweepError::Invocation(
        ErrorInfo::new("invoke-timeout", "program did not exit")
            .with_context("dram_fit", "10.0")
            .with_hint("raise timeout_secs"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("invocation error: program did not exit (code: invoke-timeout)"));
    assert!(rendered.contains("dram_fit=10.0"));
    assert!(rendered.ends_with("hint: raise timeout_secs"));
}
