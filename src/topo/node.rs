//! 节点类型
//!
//! 定义拓扑中的节点，包括节点种类（主机、交换机）和显示位置。

use serde::{Deserialize, Serialize};

use super::id::NodeId;

/// 节点种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Host,
    Switch,
}

impl NodeKind {
    /// 节点名前缀（与 Mininet 命名保持一致）
    pub fn prefix(self) -> char {
        match self {
            NodeKind::Host => 'h',
            NodeKind::Switch => 's',
        }
    }
}

/// 画布上的二维坐标，仅用于显示，对后端没有意义
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 拓扑节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Position,
}

impl Node {
    /// 创建新节点
    pub fn new(id: NodeId, kind: NodeKind, position: Position) -> Self {
        Self { id, kind, position }
    }
}
