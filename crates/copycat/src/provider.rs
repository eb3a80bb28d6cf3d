use copycat_graph::{Graph, GraphId, Session};

/// Where a reconciliation finds its networks.
pub trait GraphProvider {
    /// Resolves a network view by display name.
    fn resolve_by_name(&self, name: &str) -> Option<GraphId>;

    fn graph(&self, id: GraphId) -> Option<&Graph>;

    /// Exclusive access to two distinct views, in argument order.
    fn graph_pair_mut(&mut self, a: GraphId, b: GraphId) -> Option<(&mut Graph, &mut Graph)>;

    /// Display names of every view, in the order a host should offer them.
    fn network_names(&self) -> Vec<String>;

    /// The view currently in focus, if the host tracks one.
    fn current(&self) -> Option<GraphId> {
        None
    }
}

impl GraphProvider for Session {
    fn resolve_by_name(&self, name: &str) -> Option<GraphId> {
        self.by_name(name).map(Graph::id)
    }

    fn graph(&self, id: GraphId) -> Option<&Graph> {
        self.get(id)
    }

    fn graph_pair_mut(&mut self, a: GraphId, b: GraphId) -> Option<(&mut Graph, &mut Graph)> {
        self.pair_mut(a, b)
    }

    fn network_names(&self) -> Vec<String> {
        self.names().map(str::to_string).collect()
    }

    fn current(&self) -> Option<GraphId> {
        Session::current(self).map(Graph::id)
    }
}
