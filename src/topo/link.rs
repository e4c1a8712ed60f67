//! 链路类型
//!
//! 定义带宽/时延可编辑的链路。

use serde::{Deserialize, Serialize};

use super::id::{LinkId, NodeId};

/// 新建链路的默认带宽（Mbps）
pub const DEFAULT_LINK_BW_MBPS: f64 = 10.0;
/// 新建链路的默认时延
pub const DEFAULT_LINK_DELAY: &str = "10ms";

/// 拓扑链路
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub src: NodeId,
    pub dst: NodeId,
    /// 带宽（Mbps）
    pub bw: f64,
    /// 带单位后缀的时延，如 `"10ms"`
    pub delay: String,
    /// 画布上显示的标签
    pub label: String,
}

impl Link {
    /// 以默认带宽和时延创建新链路
    pub fn new(id: LinkId, src: NodeId, dst: NodeId) -> Self {
        Self {
            id,
            src,
            dst,
            bw: DEFAULT_LINK_BW_MBPS,
            delay: DEFAULT_LINK_DELAY.to_string(),
            label: bw_label(DEFAULT_LINK_BW_MBPS),
        }
    }

    pub(crate) fn set_bw(&mut self, bw: f64) {
        self.bw = bw;
        self.label = bw_label(bw);
    }
}

fn bw_label(bw: f64) -> String {
    format!("{bw} Mbps")
}
