//! 拓扑编辑器
//!
//! 编辑器状态只能通过 [`BuilderCommand`] 修改；每个用户操作对应一条命令。
//! 所有命令都不会失败，非法编辑（例如节点连向自己）原样接受，
//! 真正的校验交给后端。

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::flow::{FlowConfig, FlowPolicy};
use super::id::{LinkId, NodeId};
use super::link::Link;
use super::node::{Node, NodeKind, Position};
use super::payload::{TopologyPayload, build_payload};

/// 没有链路时用于限速提示的最小带宽（Mbps）
pub const NO_LINK_MIN_BW_MBPS: f64 = 10.0;

// 自动布局参数：主机一行，交换机一行
const LAYOUT_WIDTH: f64 = 400.0;
const LAYOUT_STEP: f64 = 80.0;
const HOST_ROW_Y: f64 = 60.0;
const SWITCH_ROW_Y: f64 = 220.0;

/// 编辑器命令
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuilderCommand {
    /// 添加节点，按种类分配下一个顺序编号
    AddNode { node_kind: NodeKind },
    /// 用默认带宽/时延连接两个节点
    Connect { src: NodeId, dst: NodeId },
    /// 选中一条链路，后续的带宽/时延编辑作用于它
    SelectLink { link: LinkId },
    SetBandwidth { mbps: f64 },
    SetDelay { delay: String },
    SetFlowSource { src: String },
    SetFlowDestination { dst: String },
    SetFlowRate { mbps: f64 },
    MoveNode { id: NodeId, position: Position },
    /// 删除节点及其所有相连链路
    RemoveNode { id: NodeId },
    RemoveLink { link: LinkId },
}

/// 拓扑编辑器状态（一次编辑会话）
#[derive(Debug, Clone, Default)]
pub struct TopologyBuilder {
    nodes: Vec<Node>,
    links: Vec<Link>,
    flow: FlowConfig,
    selected: Option<LinkId>,
    host_counter: usize,
    switch_counter: usize,
    next_link_id: usize,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 应用一条命令
    #[tracing::instrument(skip(self), fields(nodes = self.nodes.len(), links = self.links.len()))]
    pub fn apply(&mut self, cmd: BuilderCommand) {
        match cmd {
            BuilderCommand::AddNode { node_kind } => {
                self.add_node(node_kind);
            }
            BuilderCommand::Connect { src, dst } => {
                self.connect(src, dst);
            }
            BuilderCommand::SelectLink { link } => self.select_link(link),
            BuilderCommand::SetBandwidth { mbps } => self.set_bandwidth(mbps),
            BuilderCommand::SetDelay { delay } => self.set_delay(delay),
            BuilderCommand::SetFlowSource { src } => self.flow.src = src,
            BuilderCommand::SetFlowDestination { dst } => self.flow.dst = dst,
            BuilderCommand::SetFlowRate { mbps } => self.flow.rate = mbps,
            BuilderCommand::MoveNode { id, position } => self.move_node(&id, position),
            BuilderCommand::RemoveNode { id } => self.remove_node(&id),
            BuilderCommand::RemoveLink { link } => self.remove_link(link),
        }
    }

    /// 依次应用多条命令
    pub fn apply_all(&mut self, cmds: impl IntoIterator<Item = BuilderCommand>) {
        for cmd in cmds {
            self.apply(cmd);
        }
    }

    /// 添加节点，返回分配的标识符
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let seq = match kind {
            NodeKind::Host => {
                self.host_counter += 1;
                self.host_counter
            }
            NodeKind::Switch => {
                self.switch_counter += 1;
                self.switch_counter
            }
        };
        let id = NodeId(format!("{}{}", kind.prefix(), seq));
        let position = auto_position(kind, seq);
        debug!(node = %id, ?kind, "添加节点");
        self.nodes.push(Node::new(id.clone(), kind, position));
        id
    }

    /// 连接两个节点；相同 src/dst 的链路已存在时返回已有链路
    pub fn connect(&mut self, src: NodeId, dst: NodeId) -> LinkId {
        if let Some(existing) = self.links.iter().find(|l| l.src == src && l.dst == dst) {
            trace!(link = %existing.id, "链路已存在");
            return existing.id;
        }
        self.next_link_id += 1;
        let id = LinkId(self.next_link_id);
        debug!(link = %id, %src, %dst, "添加链路");
        self.links.push(Link::new(id, src, dst));
        id
    }

    pub fn select_link(&mut self, link: LinkId) {
        self.selected = Some(link);
    }

    /// 修改选中链路的带宽；没有选中链路时忽略
    pub fn set_bandwidth(&mut self, mbps: f64) {
        if let Some(link) = self.selected_link_mut() {
            debug!(link = %link.id, mbps, "修改链路带宽");
            link.set_bw(mbps);
        }
    }

    /// 修改选中链路的时延；没有选中链路时忽略
    pub fn set_delay(&mut self, delay: String) {
        if let Some(link) = self.selected_link_mut() {
            debug!(link = %link.id, %delay, "修改链路时延");
            link.delay = delay;
        }
    }

    pub fn move_node(&mut self, id: &NodeId, position: Position) {
        if let Some(node) = self.nodes.iter_mut().find(|n| &n.id == id) {
            node.position = position;
        }
    }

    pub fn remove_node(&mut self, id: &NodeId) {
        self.nodes.retain(|n| &n.id != id);
        let removed: Vec<LinkId> = self
            .links
            .iter()
            .filter(|l| &l.src == id || &l.dst == id)
            .map(|l| l.id)
            .collect();
        for link in removed {
            self.remove_link(link);
        }
    }

    pub fn remove_link(&mut self, link: LinkId) {
        self.links.retain(|l| l.id != link);
        if self.selected == Some(link) {
            self.selected = None;
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn flow_config(&self) -> &FlowConfig {
        &self.flow
    }

    pub fn selected_link(&self) -> Option<&Link> {
        let id = self.selected?;
        self.links.iter().find(|l| l.id == id)
    }

    fn selected_link_mut(&mut self) -> Option<&mut Link> {
        let id = self.selected?;
        self.links.iter_mut().find(|l| l.id == id)
    }

    /// 按命名约定（`h` 前缀）识别出的主机，保持插入顺序
    pub fn host_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.id.is_host_name())
            .map(|n| n.id.clone())
            .collect()
    }

    /// 所有链路中的最小带宽；没有链路时为 [`NO_LINK_MIN_BW_MBPS`]
    pub fn min_link_bw(&self) -> f64 {
        self.links
            .iter()
            .map(|l| l.bw)
            .reduce(f64::min)
            .unwrap_or(NO_LINK_MIN_BW_MBPS)
    }

    /// 显示给用户的速率：`min(配置速率, 最小链路带宽)`，只是提示，不影响请求体
    pub fn displayed_rate(&self) -> f64 {
        self.flow.rate.min(self.min_link_bw())
    }

    /// 配置速率是否超过最小链路带宽
    pub fn rate_capped(&self) -> bool {
        self.flow.rate > self.min_link_bw()
    }

    /// 序列化为后端请求体
    pub fn payload(&self, policy: &dyn FlowPolicy) -> TopologyPayload {
        build_payload(&self.nodes, &self.links, &self.flow, policy)
    }
}

fn auto_position(kind: NodeKind, seq: usize) -> Position {
    let per_row = (LAYOUT_WIDTH / LAYOUT_STEP) as usize;
    let idx = seq.saturating_sub(1);
    let x = LAYOUT_STEP / 2.0 + (idx % per_row) as f64 * LAYOUT_STEP;
    let row_offset = (idx / per_row) as f64 * LAYOUT_STEP / 2.0;
    let y = match kind {
        NodeKind::Host => HOST_ROW_Y,
        NodeKind::Switch => SWITCH_ROW_Y,
    } + row_offset;
    Position { x, y }
}
