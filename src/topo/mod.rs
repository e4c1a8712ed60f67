//! 拓扑构建模块
//!
//! 此模块包含交互式拓扑编辑器的核心组件：节点、链路、流量配置，
//! 以及把编辑器状态序列化为后端请求体的逻辑。

// 子模块声明
mod id;
mod node;
mod link;
mod flow;
mod builder;
mod payload;
mod script;
mod legacy;

// 重新导出公共接口
pub use id::{LinkId, NodeId};
pub use node::{Node, NodeKind, Position};
pub use link::{Link, DEFAULT_LINK_BW_MBPS, DEFAULT_LINK_DELAY};
pub use flow::{AllHostPairs, DEFAULT_FLOW_RATE_MBPS, Flow, FlowConfig, FlowPolicy};
pub use builder::{BuilderCommand, TopologyBuilder, NO_LINK_MIN_BW_MBPS};
pub use payload::{PayloadLink, TopologyPayload, build_payload};
pub use script::{ScriptError, parse_command, parse_script};
pub use legacy::{TOPOLOGY_KEYS, TopologyInputError, parse_topology_json};
