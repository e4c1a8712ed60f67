//! Wire shape shared with the backend: `{nodes, links, flows}`.

use serde::{Deserialize, Serialize};

use super::flow::{Flow, FlowConfig, FlowPolicy};
use super::id::NodeId;
use super::link::Link;
use super::node::Node;

/// Request body for `/topology/validate` and `/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyPayload {
    pub nodes: Vec<NodeId>,
    pub links: Vec<PayloadLink>,
    pub flows: Vec<Flow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadLink {
    pub src: NodeId,
    pub dst: NodeId,
    pub bw: f64,
    pub delay: String,
}

impl From<&Link> for PayloadLink {
    fn from(link: &Link) -> Self {
        Self {
            src: link.src.clone(),
            dst: link.dst.clone(),
            bw: link.bw,
            delay: link.delay.clone(),
        }
    }
}

/// Serialize builder state.
///
/// An explicit flow wins when both src and dst are set; otherwise `policy`
/// fills in flows over the host-prefixed node ids. Rates are sent exactly as
/// configured, the displayed clamp never applies here.
pub fn build_payload(
    nodes: &[Node],
    links: &[Link],
    flow: &FlowConfig,
    policy: &dyn FlowPolicy,
) -> TopologyPayload {
    let node_ids: Vec<NodeId> = nodes.iter().map(|n| n.id.clone()).collect();

    let flows = match flow.explicit_flow() {
        Some(f) => vec![f],
        None => {
            let hosts: Vec<NodeId> = node_ids
                .iter()
                .filter(|id| id.is_host_name())
                .cloned()
                .collect();
            policy.generate(&hosts, flow)
        }
    };

    TopologyPayload {
        nodes: node_ids,
        links: links.iter().map(PayloadLink::from).collect(),
        flows,
    }
}
