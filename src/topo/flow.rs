//! 流量配置与自动生成策略
//!
//! 用户可以显式给出一条流（src/dst/rate），也可以留空 src/dst，
//! 由 [`FlowPolicy`] 补全默认流量。

use serde::{Deserialize, Serialize};

use super::id::NodeId;

/// 默认流速率（Mbps）
pub const DEFAULT_FLOW_RATE_MBPS: f64 = 5.0;

/// 一条流量需求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub src: NodeId,
    pub dst: NodeId,
    /// 请求速率（Mbps）
    pub rate: f64,
}

/// 编辑器里的流量配置；src/dst 为空表示交给策略自动生成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub dst: String,
    pub rate: f64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            src: String::new(),
            dst: String::new(),
            rate: DEFAULT_FLOW_RATE_MBPS,
        }
    }
}

impl FlowConfig {
    /// src 和 dst 都已填写时返回显式流
    pub fn explicit_flow(&self) -> Option<Flow> {
        if self.src.is_empty() || self.dst.is_empty() {
            return None;
        }
        Some(Flow {
            src: NodeId(self.src.clone()),
            dst: NodeId(self.dst.clone()),
            rate: self.rate,
        })
    }

    /// 自动生成流时使用的基础速率；0 或非有限值退回默认值
    pub fn base_rate(&self) -> f64 {
        if self.rate.is_finite() && self.rate != 0.0 {
            self.rate
        } else {
            DEFAULT_FLOW_RATE_MBPS
        }
    }
}

/// Default-completion policy used when the user leaves src/dst empty.
///
/// Implementations only fill in traffic so the backend has something to
/// simulate; they make no claim that the generated demand is realistic.
pub trait FlowPolicy {
    fn generate(&self, hosts: &[NodeId], config: &FlowConfig) -> Vec<Flow>;
}

/// Every ordered pair of distinct hosts, each at the configured base rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllHostPairs;

impl FlowPolicy for AllHostPairs {
    fn generate(&self, hosts: &[NodeId], config: &FlowConfig) -> Vec<Flow> {
        let rate = config.base_rate();
        let mut flows = Vec::with_capacity(hosts.len() * hosts.len().saturating_sub(1));
        for (i, src) in hosts.iter().enumerate() {
            for (j, dst) in hosts.iter().enumerate() {
                if i != j {
                    flows.push(Flow {
                        src: src.clone(),
                        dst: dst.clone(),
                        rate,
                    });
                }
            }
        }
        flows
    }
}
