//! 后端响应结构（只读取，不构造）
//!
//! 字段大多带 `#[serde(default)]`：后端缺字段时按零值渲染，而不是整体失败。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::topo::NodeId;

/// `/topology/validate` 的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// `/analyze` 响应的类型化视图
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub simulation: SimulationMetrics,
    #[serde(default)]
    pub global: GlobalVerdict,
    #[serde(default)]
    pub topology: AnnotatedTopology,
    #[serde(default)]
    pub metrics: AnalysisMetrics,
}

/// 仿真指标
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationMetrics {
    #[serde(default)]
    pub avg_latency_ms: f64,
    #[serde(default)]
    pub packet_loss_ratio: f64,
    #[serde(default)]
    pub avg_throughput_mbps: f64,
    /// 队列占用（百分比）
    #[serde(default)]
    pub queue_occupancy: f64,
    #[serde(default)]
    pub simulation_time_sec: f64,
}

/// 全局异常判定
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalVerdict {
    #[serde(default)]
    pub anomaly_score: f64,
    #[serde(default)]
    pub is_anomaly: bool,
}

/// 后端回显的拓扑，附带每个节点的风险和每条链路的利用率
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotatedTopology {
    #[serde(default)]
    pub nodes: Vec<AnnotatedNode>,
    #[serde(default)]
    pub links: Vec<AnnotatedLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedNode {
    pub id: NodeId,
    #[serde(default)]
    pub risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedLink {
    pub src: NodeId,
    pub dst: NodeId,
    #[serde(default)]
    pub bandwidth: f64,
    #[serde(default)]
    pub delay: String,
    #[serde(default)]
    pub utilization: f64,
    #[serde(default)]
    pub risk: f64,
}

/// 图表用指标
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisMetrics {
    #[serde(default)]
    pub throughput_vs_time: MetricSeries,
    #[serde(default)]
    pub latency_vs_flows: Option<MetricPoint>,
    #[serde(default)]
    pub loss_vs_flows: Option<MetricPoint>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSeries {
    #[serde(default)]
    pub x: Vec<f64>,
    #[serde(default)]
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub x: f64,
    pub y: f64,
}

/// An `/analyze` response: the body exactly as received, plus its typed view.
///
/// `/suggest-fix` must see the analysis unmodified, so the raw value is what
/// gets sent back; the report is only used for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub raw: Value,
    pub report: AnalysisReport,
}

impl Analysis {
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let report = serde_json::from_value(raw.clone())?;
        Ok(Self { raw, report })
    }
}

/// `/suggest-fix` 的响应
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuggestFixResult {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub target: String,
    pub suggestion: String,
}
