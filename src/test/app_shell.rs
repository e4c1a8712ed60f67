use std::cell::{Cell, RefCell};

use serde::Serialize;
use serde_json::{Value, json};

use crate::api::{Analysis, ApiError, Backend, SuggestFixResult, ValidationResult};
use crate::app::{Action, App, Phase};
use crate::topo::{AllHostPairs, NodeKind, TopologyBuilder, TopologyPayload};

#[derive(Default)]
struct FakeBackend {
    fail_validate: bool,
    fail_analyze: bool,
    fail_suggest: bool,
    // 前 N 次分析成功，之后失败
    analyze_ok_budget: Option<usize>,
    suggest_ok_budget: Option<usize>,
    analyze_calls: Cell<usize>,
    suggest_calls: Cell<usize>,
    suggest_body: RefCell<Option<Value>>,
}

fn backend_error(endpoint: &str) -> ApiError {
    ApiError::Status {
        endpoint: endpoint.to_string(),
        status: 500,
        detail: "boom".to_string(),
    }
}

fn analysis_json() -> Value {
    json!({
        "simulation": { "avg_latency_ms": 20.0, "packet_loss_ratio": 0.1 },
        "global": { "anomaly_score": 0.2, "is_anomaly": false },
        "topology": { "nodes": [ { "id": "h1", "risk": 0.2 } ], "links": [] },
        "metrics": { "throughput_vs_time": { "x": [1], "y": [10.0] } }
    })
}

impl Backend for FakeBackend {
    async fn validate<P: Serialize + ?Sized>(
        &self,
        _payload: &P,
    ) -> Result<ValidationResult, ApiError> {
        if self.fail_validate {
            return Err(backend_error("/topology/validate"));
        }
        Ok(ValidationResult {
            valid: true,
            warnings: vec!["Low bandwidth on h1 → s1".to_string()],
        })
    }

    async fn analyze<P: Serialize + ?Sized>(&self, _payload: &P) -> Result<Analysis, ApiError> {
        let call = self.analyze_calls.get() + 1;
        self.analyze_calls.set(call);
        let over_budget = self.analyze_ok_budget.is_some_and(|ok| call > ok);
        if self.fail_analyze || over_budget {
            return Err(backend_error("/analyze"));
        }
        Ok(Analysis::from_value(analysis_json()).expect("analysis shape"))
    }

    async fn suggest_fix(&self, analysis: &Value) -> Result<SuggestFixResult, ApiError> {
        let call = self.suggest_calls.get() + 1;
        self.suggest_calls.set(call);
        *self.suggest_body.borrow_mut() = Some(analysis.clone());
        let over_budget = self.suggest_ok_budget.is_some_and(|ok| call > ok);
        if self.fail_suggest || over_budget {
            return Err(backend_error("/suggest-fix"));
        }
        Ok(SuggestFixResult::default())
    }
}

fn payload() -> TopologyPayload {
    let mut b = TopologyBuilder::new();
    let h1 = b.add_node(NodeKind::Host);
    let h2 = b.add_node(NodeKind::Host);
    let s1 = b.add_node(NodeKind::Switch);
    b.connect(h1, s1.clone());
    b.connect(h2, s1);
    b.payload(&AllHostPairs)
}

#[tokio::test]
async fn starts_idle_with_empty_view() {
    let app = App::new(FakeBackend::default());
    assert_eq!(app.phase(), Phase::Idle);
    let view = app.view();
    assert!(view.validation.is_none());
    assert!(view.analysis.is_none());
    assert!(view.suggestions.is_none());
    assert_eq!(view.to_string(), "");
}

#[tokio::test]
async fn validate_fills_validation_slot() {
    let mut app = App::new(FakeBackend::default());
    app.run(Action::Validate, &payload()).await.expect("validate");

    assert_eq!(app.phase(), Phase::Validated);
    let view = app.view();
    assert_eq!(view.validation.as_ref().map(|v| v.score), Some(85));
    assert!(view.analysis.is_none());
}

#[tokio::test]
async fn analyze_chains_into_suggestions_with_raw_analysis() {
    let mut app = App::new(FakeBackend::default());
    app.run(Action::Analyze, &payload()).await.expect("analyze");

    assert_eq!(app.phase(), Phase::Suggested);
    assert!(app.analysis().is_some());
    assert!(app.suggestion().is_some());
    assert_eq!(app.backend().suggest_calls.get(), 1);
    assert_eq!(
        app.backend().suggest_body.borrow().as_ref(),
        Some(&analysis_json())
    );

    let view = app.view();
    let analysis = view.analysis.as_ref().expect("analysis view");
    assert!((analysis.effective_throughput[0].y - 9.0).abs() < 1e-9);
    let text = view.to_string();
    assert!(text.contains("Analysis Results"));
    assert!(text.contains("No major issues detected"));
}

#[tokio::test]
async fn validate_after_analyze_clears_analysis_and_suggestions() {
    let mut app = App::new(FakeBackend::default());
    let p = payload();
    app.analyze(&p).await.expect("analyze");
    assert!(app.suggestion().is_some());

    app.validate(&p).await.expect("validate");

    let view = app.view();
    assert!(view.validation.is_some());
    assert!(view.analysis.is_none());
    assert!(view.suggestions.is_none());
}

#[tokio::test]
async fn failed_validate_still_clears_stale_analysis() {
    let mut app = App::new(FakeBackend {
        fail_validate: true,
        ..FakeBackend::default()
    });
    let p = payload();
    app.analyze(&p).await.expect("analyze");

    let err = app.validate(&p).await.unwrap_err();
    assert_eq!(err.endpoint(), Some("/topology/validate"));
    assert_eq!(app.phase(), Phase::Idle);
    assert!(app.analysis().is_none());
    assert!(app.suggestion().is_none());
}

#[tokio::test]
async fn analyze_keeps_prior_validation() {
    let mut app = App::new(FakeBackend::default());
    let p = payload();
    app.validate(&p).await.expect("validate");
    app.analyze(&p).await.expect("analyze");

    let view = app.view();
    assert!(view.validation.is_some());
    assert!(view.analysis.is_some());
}

#[tokio::test]
async fn suggest_failure_is_swallowed_and_analysis_stays() {
    let mut app = App::new(FakeBackend {
        fail_suggest: true,
        ..FakeBackend::default()
    });
    app.analyze(&payload())
        .await
        .expect("analyze succeeds even when suggest-fix fails");

    assert_eq!(app.phase(), Phase::Analyzed);
    assert!(app.analysis().is_some());
    assert!(app.suggestion().is_none());
    assert_eq!(app.backend().suggest_calls.get(), 1);
}

#[tokio::test]
async fn failed_analyze_propagates_and_skips_suggestions() {
    let mut app = App::new(FakeBackend {
        fail_analyze: true,
        ..FakeBackend::default()
    });
    let p = payload();
    app.validate(&p).await.expect("validate");

    let err = app.analyze(&p).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(app.phase(), Phase::Validated);
    assert!(app.validation().is_some());
    assert!(app.analysis().is_none());
    assert_eq!(app.backend().suggest_calls.get(), 0);
}

#[tokio::test]
async fn failed_reanalyze_keeps_previous_analysis() {
    let mut app = App::new(FakeBackend {
        analyze_ok_budget: Some(1),
        ..FakeBackend::default()
    });
    let p = payload();
    app.analyze(&p).await.expect("first analyze");
    assert_eq!(app.phase(), Phase::Suggested);

    let err = app.analyze(&p).await.unwrap_err();
    assert_eq!(err.endpoint(), Some("/analyze"));
    assert_eq!(app.backend().analyze_calls.get(), 2);
    assert_eq!(app.backend().suggest_calls.get(), 1);

    // 旧的分析和建议都还在，状态回到失败前
    assert_eq!(app.phase(), Phase::Suggested);
    let analysis = app.analysis().expect("previous analysis kept");
    assert_eq!(analysis.raw, analysis_json());
    assert!(app.suggestion().is_some());
    let view = app.view();
    assert!(view.analysis.is_some());
    assert!(view.suggestions.is_some());
}

#[tokio::test]
async fn reanalyze_drops_stale_suggestion_when_suggest_fails() {
    let mut app = App::new(FakeBackend {
        suggest_ok_budget: Some(1),
        ..FakeBackend::default()
    });
    let p = payload();
    app.analyze(&p).await.expect("first analyze");
    assert!(app.suggestion().is_some());

    app.analyze(&p).await.expect("second analyze");
    assert_eq!(app.backend().suggest_calls.get(), 2);
    assert_eq!(app.phase(), Phase::Analyzed);
    assert!(app.analysis().is_some());
    assert!(app.suggestion().is_none());
}

#[tokio::test]
async fn reanalyze_replaces_previous_results() {
    let mut app = App::new(FakeBackend::default());
    let p = payload();
    app.analyze(&p).await.expect("first analyze");
    app.analyze(&p).await.expect("second analyze");
    assert_eq!(app.backend().suggest_calls.get(), 2);
    assert_eq!(app.phase(), Phase::Suggested);
}

#[tokio::test]
async fn json_view_omits_empty_slots() {
    let mut app = App::new(FakeBackend::default());
    app.validate(&payload()).await.expect("validate");
    let v = serde_json::to_value(app.view()).expect("serialize view");
    assert_eq!(v["phase"], "validated");
    assert!(v.get("analysis").is_none());
    assert_eq!(v["validation"]["focus_area"], "Bandwidth Optimization");
}
