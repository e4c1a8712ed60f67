//! 校验结果面板

use std::fmt;

use serde::Serialize;

use crate::api::ValidationResult;

const SCORE_MAX: u32 = 100;
const PENALTY_PER_WARNING: u32 = 15;
/// 分数下限
pub const SCORE_FLOOR: u32 = 40;

pub const FOCUS_BANDWIDTH: &str = "Bandwidth Optimization";
pub const FOCUS_TOPOLOGY: &str = "Topology Structure";

/// 严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Invalid,
    Clean,
    Warning,
}

impl Severity {
    pub fn readiness(self) -> &'static str {
        match self {
            Severity::Invalid => "Invalid Design",
            Severity::Clean => "Ready for Simulation",
            Severity::Warning => "Needs Optimization",
        }
    }

    pub fn next_step(self) -> &'static str {
        match self {
            Severity::Clean => "Proceed to simulation and anomaly analysis.",
            _ => "Resolve warnings to improve network robustness.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationView {
    pub score: u32,
    pub warning_count: usize,
    pub severity: Severity,
    pub readiness: &'static str,
    pub focus_area: &'static str,
    pub warnings: Vec<String>,
    pub next_step: &'static str,
}

/// `100 - 15 * warnings`, floored at [`SCORE_FLOOR`].
pub fn validation_score(warning_count: usize) -> u32 {
    let count = u32::try_from(warning_count).unwrap_or(u32::MAX);
    SCORE_MAX
        .saturating_sub(count.saturating_mul(PENALTY_PER_WARNING))
        .max(SCORE_FLOOR)
}

pub fn severity(result: &ValidationResult) -> Severity {
    if !result.valid {
        Severity::Invalid
    } else if result.warnings.is_empty() {
        Severity::Clean
    } else {
        Severity::Warning
    }
}

/// 任一警告提到 bandwidth（不区分大小写）时优先优化带宽
pub fn focus_area(warnings: &[String]) -> &'static str {
    if warnings
        .iter()
        .any(|w| w.to_lowercase().contains("bandwidth"))
    {
        FOCUS_BANDWIDTH
    } else {
        FOCUS_TOPOLOGY
    }
}

pub fn render_validation(result: &ValidationResult) -> ValidationView {
    let severity = severity(result);
    ValidationView {
        score: validation_score(result.warnings.len()),
        warning_count: result.warnings.len(),
        severity,
        readiness: severity.readiness(),
        focus_area: focus_area(&result.warnings),
        warnings: result.warnings.clone(),
        next_step: severity.next_step(),
    }
}

impl fmt::Display for ValidationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Topology Validation Summary ==")?;
        writeln!(f, "Status:           {}", self.readiness)?;
        writeln!(f, "Validation Score: {}/100", self.score)?;
        writeln!(f, "Warnings:         {}", self.warning_count)?;
        writeln!(f, "Focus Area:       {}", self.focus_area)?;
        if !self.warnings.is_empty() {
            writeln!(f, "Design Warnings:")?;
            for w in &self.warnings {
                writeln!(f, "  - {w}")?;
            }
        }
        writeln!(f, "Next Step: {}", self.next_step)
    }
}
