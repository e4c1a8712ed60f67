//! 结果渲染
//!
//! 每个面板都是纯函数：输入后端结果，输出可序列化的视图模型（JSON 输出）
//! 并实现 `Display`（终端输出）。渲染过程不修改任何应用状态。

mod analysis;
mod suggestion;
mod validation;

pub use analysis::{
    AnalysisView, AnomalyStatus, CONGESTION_REF, CurvePoint, DELAY_CURVE_BUCKETS, LATENCY_REF_MS,
    LOSS_REF, LinkCongestion, MAX_UTILIZATION, NodeStress, QUEUE_REF, RadarAxis,
    SeriesPoint, THROUGHPUT_REF_MBPS, average_link_utilization, congestion_index,
    delay_sensitivity_curve, effective_throughput, link_congestion, node_stress, radar,
    render_analysis,
};
pub use suggestion::{NO_ISSUES_MESSAGE, SuggestionItem, SuggestionView, render_suggestions};
pub use validation::{
    FOCUS_BANDWIDTH, FOCUS_TOPOLOGY, SCORE_FLOOR, Severity, ValidationView, focus_area,
    render_validation, severity, validation_score,
};
