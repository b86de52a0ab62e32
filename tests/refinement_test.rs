use dockgen::findings::{FindingsPatch, Language};
use dockgen::refine::{MockProvider, RefinementService};
use dockgen::Classifier;
use std::fs;
use tempfile::TempDir;

fn python_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("requirements.txt"), "requests\n").unwrap();
    fs::write(dir.path().join("main.py"), "").unwrap();
    dir
}

#[tokio::test]
async fn test_refinement_overrides_generic_classification() {
    let dir = python_fixture();
    let mut findings = Classifier::with_defaults().classify(dir.path()).unwrap();
    assert_eq!(findings.framework, "Python (Generic)");

    let service = RefinementService::new(vec![Box::new(MockProvider::with_patch(
        "mock-llm",
        FindingsPatch {
            framework: Some("FastAPI".to_string()),
            entry_point: Some("main.py".to_string()),
            confidence: Some(0.92),
            ..Default::default()
        },
    ))]);

    assert!(service.refine(&mut findings).await);
    assert_eq!(findings.language, Language::Python);
    assert_eq!(findings.framework, "FastAPI");
    assert_eq!(findings.confidence, 0.92);
    assert_eq!(findings.refined_by.as_deref(), Some("mock-llm"));
}

#[tokio::test]
async fn test_failed_refinement_keeps_detector_findings() {
    let dir = python_fixture();
    let mut findings = Classifier::with_defaults().classify(dir.path()).unwrap();
    let before = findings.to_report();

    let service = RefinementService::new(vec![
        Box::new(MockProvider::failing("broken")),
        Box::new(MockProvider::declining("unsure")),
    ]);

    assert!(!service.refine(&mut findings).await);
    let after = findings.to_report();
    assert_eq!(
        serde_json::to_string(&before).unwrap(),
        serde_json::to_string(&after).unwrap()
    );
}

#[tokio::test]
async fn test_refined_by_survives_serialization() {
    let dir = python_fixture();
    let mut findings = Classifier::with_defaults().classify(dir.path()).unwrap();

    let service = RefinementService::new(vec![Box::new(MockProvider::with_patch(
        "mock-llm",
        FindingsPatch {
            framework: Some("Flask".to_string()),
            ..Default::default()
        },
    ))]);
    service.refine(&mut findings).await;

    let text = serde_json::to_string(&findings.to_report()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["refined_by"], "mock-llm");
    assert_eq!(parsed["framework"], "Flask");
}
