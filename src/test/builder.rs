use crate::topo::{
    BuilderCommand, DEFAULT_LINK_BW_MBPS, DEFAULT_LINK_DELAY, LinkId, NodeId, NodeKind, Position,
    TopologyBuilder,
};

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

#[test]
fn add_node_assigns_sequential_ids_per_kind() {
    let mut b = TopologyBuilder::new();
    assert_eq!(b.add_node(NodeKind::Host), id("h1"));
    assert_eq!(b.add_node(NodeKind::Switch), id("s1"));
    assert_eq!(b.add_node(NodeKind::Host), id("h2"));
    assert_eq!(b.add_node(NodeKind::Switch), id("s2"));

    let ids: Vec<&str> = b.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["h1", "s1", "h2", "s2"]);
    assert_eq!(b.nodes()[1].kind, NodeKind::Switch);
}

#[test]
fn counters_are_scoped_to_one_builder() {
    let mut first = TopologyBuilder::new();
    first.add_node(NodeKind::Host);
    first.add_node(NodeKind::Host);

    let mut second = TopologyBuilder::new();
    assert_eq!(second.add_node(NodeKind::Host), id("h1"));
}

#[test]
fn removed_node_ids_are_not_reused() {
    let mut b = TopologyBuilder::new();
    b.add_node(NodeKind::Host);
    b.remove_node(&id("h1"));
    assert_eq!(b.add_node(NodeKind::Host), id("h2"));
}

#[test]
fn connect_applies_default_bandwidth_and_delay() {
    let mut b = TopologyBuilder::new();
    let h1 = b.add_node(NodeKind::Host);
    let s1 = b.add_node(NodeKind::Switch);
    let link = b.connect(h1.clone(), s1.clone());

    let l = &b.links()[0];
    assert_eq!(l.id, link);
    assert_eq!(l.src, h1);
    assert_eq!(l.dst, s1);
    assert_eq!(l.bw, DEFAULT_LINK_BW_MBPS);
    assert_eq!(l.delay, DEFAULT_LINK_DELAY);
    assert_eq!(l.label, "10 Mbps");
}

#[test]
fn connect_same_pair_twice_keeps_one_link() {
    let mut b = TopologyBuilder::new();
    let a = b.connect(id("h1"), id("s1"));
    let again = b.connect(id("h1"), id("s1"));
    let reverse = b.connect(id("s1"), id("h1"));
    assert_eq!(a, again);
    assert_ne!(a, reverse);
    assert_eq!(b.links().len(), 2);
}

#[test]
fn malformed_edits_are_accepted() {
    let mut b = TopologyBuilder::new();
    b.add_node(NodeKind::Host);
    b.connect(id("h1"), id("h1"));
    b.connect(id("h1"), id("ghost"));
    assert_eq!(b.links().len(), 2);
}

#[test]
fn edits_apply_to_selected_link_only() {
    let mut b = TopologyBuilder::new();
    let first = b.connect(id("h1"), id("s1"));
    let second = b.connect(id("h2"), id("s1"));

    b.apply_all([
        BuilderCommand::SelectLink { link: second },
        BuilderCommand::SetBandwidth { mbps: 25.0 },
        BuilderCommand::SetDelay {
            delay: "3ms".to_string(),
        },
    ]);

    let l1 = b.links().iter().find(|l| l.id == first).expect("first link");
    let l2 = b.links().iter().find(|l| l.id == second).expect("second link");
    assert_eq!(l1.bw, 10.0);
    assert_eq!(l2.bw, 25.0);
    assert_eq!(l2.label, "25 Mbps");
    assert_eq!(l2.delay, "3ms");
    assert_eq!(b.selected_link().map(|l| l.id), Some(second));
}

#[test]
fn edits_without_selection_are_ignored() {
    let mut b = TopologyBuilder::new();
    b.connect(id("h1"), id("s1"));
    b.apply(BuilderCommand::SetBandwidth { mbps: 1.0 });
    b.apply(BuilderCommand::SelectLink { link: LinkId(99) });
    b.apply(BuilderCommand::SetDelay {
        delay: "1ms".to_string(),
    });
    assert_eq!(b.links()[0].bw, 10.0);
    assert_eq!(b.links()[0].delay, "10ms");
}

#[test]
fn remove_node_drops_incident_links_and_selection() {
    let mut b = TopologyBuilder::new();
    let h1 = b.add_node(NodeKind::Host);
    let h2 = b.add_node(NodeKind::Host);
    let s1 = b.add_node(NodeKind::Switch);
    let l1 = b.connect(h1.clone(), s1.clone());
    b.connect(h2.clone(), s1.clone());
    b.select_link(l1);

    b.apply(BuilderCommand::RemoveNode { id: h1 });

    assert_eq!(b.nodes().len(), 2);
    assert_eq!(b.links().len(), 1);
    assert_eq!(b.links()[0].src, h2);
    assert!(b.selected_link().is_none());
}

#[test]
fn move_node_updates_position() {
    let mut b = TopologyBuilder::new();
    let h1 = b.add_node(NodeKind::Host);
    let pos = Position { x: 12.0, y: 34.0 };
    b.apply(BuilderCommand::MoveNode { id: h1, position: pos });
    assert_eq!(b.nodes()[0].position, pos);
}

#[test]
fn auto_layout_separates_hosts_and_switches() {
    let mut b = TopologyBuilder::new();
    b.add_node(NodeKind::Host);
    b.add_node(NodeKind::Host);
    b.add_node(NodeKind::Switch);
    let n = b.nodes();
    assert_ne!(n[0].position, n[1].position);
    assert_ne!(n[0].position.y, n[2].position.y);
}

#[test]
fn displayed_rate_without_links_uses_sentinel_min() {
    let mut b = TopologyBuilder::new();
    b.add_node(NodeKind::Host);
    b.add_node(NodeKind::Host);
    assert_eq!(b.min_link_bw(), 10.0);
    assert_eq!(b.displayed_rate(), b.flow_config().rate);
    assert!(!b.rate_capped());

    b.apply(BuilderCommand::SetFlowRate { mbps: 7.0 });
    assert_eq!(b.displayed_rate(), 7.0);

    b.apply(BuilderCommand::SetFlowRate { mbps: 50.0 });
    assert_eq!(b.displayed_rate(), 10.0);
}

#[test]
fn displayed_rate_is_clamped_to_min_link_bandwidth() {
    let mut b = TopologyBuilder::new();
    let slow = b.connect(id("h1"), id("s1"));
    b.connect(id("h2"), id("s1"));
    b.select_link(slow);
    b.set_bandwidth(3.0);

    assert_eq!(b.min_link_bw(), 3.0);
    assert_eq!(b.flow_config().rate, 5.0);
    assert_eq!(b.displayed_rate(), 3.0);
    assert!(b.rate_capped());
}

#[test]
fn host_ids_follow_name_prefix() {
    let mut b = TopologyBuilder::new();
    b.add_node(NodeKind::Switch);
    b.add_node(NodeKind::Host);
    b.add_node(NodeKind::Host);
    assert_eq!(b.host_ids(), vec![id("h1"), id("h2")]);
}

#[test]
fn builder_command_serializes_with_kind_tag() {
    let cmd = BuilderCommand::Connect {
        src: id("h1"),
        dst: id("s1"),
    };
    let v = serde_json::to_value(&cmd).expect("serialize command");
    assert_eq!(v["kind"], "connect");
    assert_eq!(v["src"], "h1");

    let decoded: BuilderCommand =
        serde_json::from_str(r#"{"kind":"add_node","node_kind":"switch"}"#).expect("parse");
    assert_eq!(
        decoded,
        BuilderCommand::AddNode {
            node_kind: NodeKind::Switch
        }
    );
}
