use crate::error::{Error, Result};
use crate::graph::{Graph, GraphId};

/// In-memory registry of network views, addressed by display name.
///
/// Registration order is kept; it is the order hosts offer networks in.
#[derive(Debug, Clone, Default)]
pub struct Session {
    graphs: Vec<Graph>,
    current: Option<GraphId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, graph: Graph) -> Result<GraphId> {
        if self.by_name(graph.name()).is_some() {
            return Err(Error::DuplicateNetwork {
                name: graph.name().to_string(),
            });
        }
        let id = graph.id();
        self.graphs.push(graph);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.graphs.iter().map(Graph::name)
    }

    pub fn graphs(&self) -> impl Iterator<Item = &Graph> {
        self.graphs.iter()
    }

    pub fn by_name(&self, name: &str) -> Option<&Graph> {
        self.graphs.iter().find(|g| g.name() == name)
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut Graph> {
        self.graphs.iter_mut().find(|g| g.name() == name)
    }

    pub fn get(&self, id: GraphId) -> Option<&Graph> {
        self.graphs.iter().find(|g| g.id() == id)
    }

    fn position(&self, id: GraphId) -> Option<usize> {
        self.graphs.iter().position(|g| g.id() == id)
    }

    /// Mutable access to two distinct views at once; `None` if either is unknown or `a == b`.
    pub fn pair_mut(&mut self, a: GraphId, b: GraphId) -> Option<(&mut Graph, &mut Graph)> {
        let ia = self.position(a)?;
        let ib = self.position(b)?;
        if ia == ib {
            return None;
        }
        if ia < ib {
            let (lo, hi) = self.graphs.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.graphs.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }

    /// The view the user is looking at, if any.
    pub fn current(&self) -> Option<&Graph> {
        self.current.and_then(|id| self.get(id))
    }

    /// Marks `name` as the current view. Returns `false` if no such view is registered.
    pub fn set_current(&mut self, name: &str) -> bool {
        match self.by_name(name).map(Graph::id) {
            Some(id) => {
                self.current = Some(id);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_mut_keeps_argument_order() {
        let mut s = Session::new();
        let a = s.add(Graph::new("a")).unwrap();
        let b = s.add(Graph::new("b")).unwrap();

        let (x, y) = s.pair_mut(b, a).unwrap();
        assert_eq!((x.name(), y.name()), ("b", "a"));
        let (x, y) = s.pair_mut(a, b).unwrap();
        assert_eq!((x.name(), y.name()), ("a", "b"));
        assert!(s.pair_mut(a, a).is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut s = Session::new();
        s.add(Graph::new("a")).unwrap();
        assert!(matches!(
            s.add(Graph::new("a")),
            Err(Error::DuplicateNetwork { .. })
        ));
    }
}
