use std::fmt;

use serde::Serialize;
use tracing::{error, info};

use crate::api::{Analysis, ApiError, Backend, SuggestFixResult, ValidationResult};
use crate::render::{
    AnalysisView, SuggestionView, ValidationView, render_analysis, render_suggestions,
    render_validation,
};

/// 用户在外壳上可以触发的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Validate,
    Analyze,
}

/// 编排状态
///
/// `Idle → Validating → Validated`
/// `Idle → Analyzing → Analyzed [→ Suggesting → Suggested]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Validating,
    Validated,
    Analyzing,
    Analyzed,
    Suggesting,
    Suggested,
}

/// Result slots plus the backend they are filled from.
///
/// Actions take `&mut self`, so one shell never has two actions in flight.
pub struct App<B> {
    backend: B,
    phase: Phase,
    validation: Option<ValidationResult>,
    analysis: Option<Analysis>,
    suggestion: Option<SuggestFixResult>,
}

impl<B: Backend> App<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            phase: Phase::Idle,
            validation: None,
            analysis: None,
            suggestion: None,
        }
    }

    pub async fn run<P>(&mut self, action: Action, payload: &P) -> Result<(), ApiError>
    where
        P: Serialize + ?Sized,
    {
        match action {
            Action::Validate => self.validate(payload).await,
            Action::Analyze => self.analyze(payload).await,
        }
    }

    /// Validate the topology. Prior analysis and suggestions are dropped as
    /// soon as the action starts.
    #[tracing::instrument(skip_all)]
    pub async fn validate<P>(&mut self, payload: &P) -> Result<(), ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.analysis = None;
        self.suggestion = None;
        self.phase = Phase::Validating;

        match self.backend.validate(payload).await {
            Ok(result) => {
                info!(valid = result.valid, warnings = result.warnings.len(), "✅ 校验完成");
                self.validation = Some(result);
                self.phase = Phase::Validated;
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Idle;
                Err(e)
            }
        }
    }

    /// Analyze the topology, then ask for fix suggestions.
    ///
    /// The validation slot is left alone. Earlier analysis results stay in
    /// place until the new analysis arrives (a failure returns to the prior
    /// phase); the stale suggestion is dropped together with the old analysis.
    /// A failed suggestion call is logged and does not affect the
    /// analysis that was already stored.
    #[tracing::instrument(skip_all)]
    pub async fn analyze<P>(&mut self, payload: &P) -> Result<(), ApiError>
    where
        P: Serialize + ?Sized,
    {
        let previous = self.phase;
        self.phase = Phase::Analyzing;

        let analysis = match self.backend.analyze(payload).await {
            Ok(a) => a,
            Err(e) => {
                self.phase = previous;
                return Err(e);
            }
        };
        info!(
            anomaly = analysis.report.global.is_anomaly,
            score = analysis.report.global.anomaly_score,
            "🚀 分析完成"
        );
        self.suggestion = None;
        let analysis = self.analysis.insert(analysis);
        self.phase = Phase::Suggesting;

        match self.backend.suggest_fix(&analysis.raw).await {
            Ok(s) => {
                info!(recommendations = s.recommendations.len(), "建议获取完成");
                self.suggestion = Some(s);
                self.phase = Phase::Suggested;
            }
            Err(e) => {
                error!(error = %e, "Suggest-fix error");
                self.phase = Phase::Analyzed;
            }
        }
        Ok(())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn validation(&self) -> Option<&ValidationResult> {
        self.validation.as_ref()
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn suggestion(&self) -> Option<&SuggestFixResult> {
        self.suggestion.as_ref()
    }

    /// 根据当前状态渲染所有面板
    pub fn view(&self) -> AppView {
        AppView {
            phase: self.phase,
            validation: self.validation.as_ref().map(render_validation),
            analysis: self.analysis.as_ref().map(|a| render_analysis(&a.report)),
            suggestions: self.suggestion.as_ref().map(render_suggestions),
        }
    }
}

/// Everything currently rendered; empty slots are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppView {
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<SuggestionView>,
}

impl fmt::Display for AppView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let panels: [Option<&dyn fmt::Display>; 3] = [
            self.validation.as_ref().map(|v| v as &dyn fmt::Display),
            self.analysis.as_ref().map(|v| v as &dyn fmt::Display),
            self.suggestions.as_ref().map(|v| v as &dyn fmt::Display),
        ];
        for panel in panels.into_iter().flatten() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{panel}")?;
        }
        Ok(())
    }
}
