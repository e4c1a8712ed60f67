//! 分析结果面板
//!
//! 除了原样展示仿真指标、异常判定、节点风险和链路信息外，
//! 还在客户端推导几组图表数据：
//!
//! - 有效吞吐：`throughput × (1 − packet_loss_ratio)`
//! - 链路拥塞指数：`utilization / (1 + bandwidth)`，仅用于排序展示
//! - 时延敏感度曲线：`avg_latency / (1 − u)`，u 取十档并封顶 [`MAX_UTILIZATION`]
//! - 节点压力：`risk × 平均链路利用率`
//! - 五轴雷达图：各指标除以固定参考最大值并截断到 [0, 1]

use std::fmt;

use serde::Serialize;

use crate::api::{AnalysisReport, AnnotatedLink, AnnotatedNode, MetricPoint, MetricSeries, SimulationMetrics};
use crate::topo::NodeId;

/// 时延曲线的利用率档数
pub const DELAY_CURVE_BUCKETS: usize = 10;
/// 利用率上限，避免 `1 / (1 − u)` 发散
pub const MAX_UTILIZATION: f64 = 0.95;

// 雷达图参考最大值
pub const LATENCY_REF_MS: f64 = 100.0;
pub const LOSS_REF: f64 = 1.0;
pub const THROUGHPUT_REF_MBPS: f64 = 100.0;
/// 队列占用以百分比给出
pub const QUEUE_REF: f64 = 100.0;
pub const CONGESTION_REF: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyStatus {
    Anomaly,
    Normal,
}

impl fmt::Display for AnomalyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyStatus::Anomaly => f.write_str("ANOMALY"),
            AnomalyStatus::Normal => f.write_str("NORMAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkCongestion {
    pub src: NodeId,
    pub dst: NodeId,
    pub bandwidth: f64,
    pub delay: String,
    pub utilization: f64,
    pub congestion_index: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub utilization: f64,
    pub delay_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStress {
    pub id: NodeId,
    pub risk: f64,
    pub stress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub axis: &'static str,
    pub value: f64,
    /// `value / reference`，截断到 [0, 1]
    pub normalized: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    pub simulation: SimulationMetrics,
    pub anomaly_score: f64,
    pub status: AnomalyStatus,
    pub effective_throughput: Vec<SeriesPoint>,
    /// 按拥塞指数从高到低排列
    pub link_congestion: Vec<LinkCongestion>,
    pub delay_curve: Vec<CurvePoint>,
    pub node_stress: Vec<NodeStress>,
    pub radar: Vec<RadarAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_vs_flows: Option<MetricPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_vs_flows: Option<MetricPoint>,
}

/// 每个时间点的有效吞吐；缺少 x 坐标的点按 1 起的序号补齐
pub fn effective_throughput(series: &MetricSeries, packet_loss_ratio: f64) -> Vec<SeriesPoint> {
    let keep = 1.0 - packet_loss_ratio;
    series
        .y
        .iter()
        .enumerate()
        .map(|(i, y)| SeriesPoint {
            x: series.x.get(i).copied().unwrap_or((i + 1) as f64),
            y: y * keep,
        })
        .collect()
}

pub fn congestion_index(utilization: f64, bandwidth: f64) -> f64 {
    utilization / (1.0 + bandwidth)
}

pub fn link_congestion(links: &[AnnotatedLink]) -> Vec<LinkCongestion> {
    let mut ranked: Vec<LinkCongestion> = links
        .iter()
        .map(|l| LinkCongestion {
            src: l.src.clone(),
            dst: l.dst.clone(),
            bandwidth: l.bandwidth,
            delay: l.delay.clone(),
            utilization: l.utilization,
            congestion_index: congestion_index(l.utilization, l.bandwidth),
        })
        .collect();
    ranked.sort_by(|a, b| b.congestion_index.total_cmp(&a.congestion_index));
    ranked
}

/// Synthetic M/M/1-style curve over utilizations `0.1, 0.2, …, 1.0`.
///
/// Buckets above [`MAX_UTILIZATION`] are evaluated at the cap, so the last
/// point is finite.
pub fn delay_sensitivity_curve(avg_latency_ms: f64) -> Vec<CurvePoint> {
    (1..=DELAY_CURVE_BUCKETS)
        .map(|i| {
            let utilization = (i as f64 / DELAY_CURVE_BUCKETS as f64).min(MAX_UTILIZATION);
            CurvePoint {
                utilization,
                delay_ms: avg_latency_ms / (1.0 - utilization),
            }
        })
        .collect()
}

/// 平均链路利用率；没有链路时为 0
pub fn average_link_utilization(links: &[AnnotatedLink]) -> f64 {
    if links.is_empty() {
        return 0.0;
    }
    links.iter().map(|l| l.utilization).sum::<f64>() / links.len() as f64
}

pub fn node_stress(nodes: &[AnnotatedNode], links: &[AnnotatedLink]) -> Vec<NodeStress> {
    let avg = average_link_utilization(links);
    nodes
        .iter()
        .map(|n| NodeStress {
            id: n.id.clone(),
            risk: n.risk,
            stress: n.risk * avg,
        })
        .collect()
}

/// 五轴雷达图；拥塞轴取所有链路中最高的拥塞指数
pub fn radar(report: &AnalysisReport) -> Vec<RadarAxis> {
    let sim = &report.simulation;
    let congestion = report
        .topology
        .links
        .iter()
        .map(|l| congestion_index(l.utilization, l.bandwidth))
        .reduce(f64::max)
        .unwrap_or(0.0);

    [
        ("latency", sim.avg_latency_ms, LATENCY_REF_MS),
        ("loss", sim.packet_loss_ratio, LOSS_REF),
        ("throughput", sim.avg_throughput_mbps, THROUGHPUT_REF_MBPS),
        ("queue_occupancy", sim.queue_occupancy, QUEUE_REF),
        ("congestion", congestion, CONGESTION_REF),
    ]
    .into_iter()
    .map(|(axis, value, reference)| RadarAxis {
        axis,
        value,
        normalized: normalize(value, reference),
    })
    .collect()
}

fn normalize(value: f64, reference: f64) -> f64 {
    let ratio = value / reference;
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

pub fn render_analysis(report: &AnalysisReport) -> AnalysisView {
    let sim = &report.simulation;
    let status = if report.global.is_anomaly {
        AnomalyStatus::Anomaly
    } else {
        AnomalyStatus::Normal
    };
    AnalysisView {
        simulation: sim.clone(),
        anomaly_score: report.global.anomaly_score,
        status,
        effective_throughput: effective_throughput(
            &report.metrics.throughput_vs_time,
            sim.packet_loss_ratio,
        ),
        link_congestion: link_congestion(&report.topology.links),
        delay_curve: delay_sensitivity_curve(sim.avg_latency_ms),
        node_stress: node_stress(&report.topology.nodes, &report.topology.links),
        radar: radar(report),
        latency_vs_flows: report.metrics.latency_vs_flows,
        loss_vs_flows: report.metrics.loss_vs_flows,
    }
}

impl fmt::Display for AnalysisView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sim = &self.simulation;
        writeln!(f, "== Analysis Results ==")?;
        writeln!(f, "Simulation Metrics:")?;
        writeln!(f, "  Avg Latency:     {:.2} ms", sim.avg_latency_ms)?;
        writeln!(f, "  Packet Loss:     {:.4}", sim.packet_loss_ratio)?;
        writeln!(f, "  Avg Throughput:  {:.2} Mbps", sim.avg_throughput_mbps)?;
        writeln!(f, "  Queue Occupancy: {:.1}%", sim.queue_occupancy)?;
        writeln!(f, "  Simulation Time: {}s", sim.simulation_time_sec)?;

        writeln!(f, "Global Anomaly Detection:")?;
        writeln!(f, "  Anomaly Score: {:.4}", self.anomaly_score)?;
        writeln!(f, "  Status:        {}", self.status)?;

        writeln!(f, "Effective Throughput:")?;
        for p in &self.effective_throughput {
            writeln!(f, "  t={}: {:.2} Mbps", p.x, p.y)?;
        }

        writeln!(f, "Node Risk Levels:")?;
        for n in &self.node_stress {
            writeln!(f, "  {} -> risk {:.3}, stress {:.3}", n.id, n.risk, n.stress)?;
        }

        writeln!(f, "Critical Links:")?;
        for l in &self.link_congestion {
            writeln!(
                f,
                "  {} -> {} | BW: {} | Utilization: {:.3} | Congestion: {:.4}",
                l.src, l.dst, l.bandwidth, l.utilization, l.congestion_index
            )?;
        }

        writeln!(f, "Delay Sensitivity:")?;
        for p in &self.delay_curve {
            writeln!(f, "  u={:.2}: {:.2} ms", p.utilization, p.delay_ms)?;
        }

        writeln!(f, "Radar:")?;
        for a in &self.radar {
            writeln!(f, "  {:<16} {:.3}", a.axis, a.normalized)?;
        }
        Ok(())
    }
}
