// Network topology snapshot

#[derive(Debug, Clone, PartialEq)]
pub struct TopologyNode {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub status: String,
}

impl TopologyNode {
    /// Node colouring only distinguishes `active` from everything else.
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    pub fn label(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopologyLink {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    pub nodes: Vec<TopologyNode>,
    pub links: Vec<TopologyLink>,
}

impl Topology {
    pub fn new(nodes: Vec<TopologyNode>, links: Vec<TopologyLink>) -> Self {
        Self { nodes, links }
    }

    pub fn node(&self, id: &str) -> Option<&TopologyNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids of nodes linked to `id`, in link order. Links are undirected.
    pub fn neighbours(&self, id: &str) -> Vec<&str> {
        self.links
            .iter()
            .filter_map(|l| {
                if l.source == id {
                    Some(l.target.as_str())
                } else if l.target == id {
                    Some(l.source.as_str())
                } else {
                    None
                }
            })
            .collect()
    }

    /// Links whose endpoints are not in the node list. The graph renderer
    /// cannot place these.
    pub fn dangling_links(&self) -> Vec<&TopologyLink> {
        self.links
            .iter()
            .filter(|l| self.node(&l.source).is_none() || self.node(&l.target).is_none())
            .collect()
    }
}
