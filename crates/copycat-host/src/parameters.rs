use crate::columns::key_column_names;
use copycat::{GraphProvider, ReconcileOptions, Request};
use copycat_graph::NAME_COLUMN;

/// The choices a host offers before a run, with the defaults it starts from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    pub source_network: Option<String>,
    pub source_column: Option<String>,
    pub target_network: Option<String>,
    pub target_column: Option<String>,
    pub options: ReconcileOptions,
}

impl Parameters {
    /// Source is the current view (or the first one), target the first other view, and both key
    /// columns prefer `name`.
    pub fn defaults<P>(provider: &P) -> Self
    where
        P: GraphProvider + ?Sized,
    {
        let names = provider.network_names();
        let source = provider
            .current()
            .and_then(|id| provider.graph(id))
            .map(|g| g.name().to_string())
            .or_else(|| names.first().cloned());
        let target = names
            .iter()
            .find(|n| Some(n.as_str()) != source.as_deref())
            .or_else(|| names.first())
            .cloned();

        let mut params = Self::default();
        params.set_source_network(provider, source);
        params.set_target_network(provider, target);
        params
    }

    /// Picks the source network. A different network resets the source column.
    pub fn set_source_network<P>(&mut self, provider: &P, name: Option<String>)
    where
        P: GraphProvider + ?Sized,
    {
        if name.is_some() && name == self.source_network {
            return;
        }
        self.source_column = default_column(provider, name.as_deref());
        self.source_network = name;
    }

    /// Picks the target network. A different network resets the target column.
    pub fn set_target_network<P>(&mut self, provider: &P, name: Option<String>)
    where
        P: GraphProvider + ?Sized,
    {
        if name.is_some() && name == self.target_network {
            return;
        }
        self.target_column = default_column(provider, name.as_deref());
        self.target_network = name;
    }

    /// Key columns offered for the source network.
    pub fn source_columns<P>(&self, provider: &P) -> Vec<String>
    where
        P: GraphProvider + ?Sized,
    {
        columns_of(provider, self.source_network.as_deref())
    }

    /// Key columns offered for the target network.
    pub fn target_columns<P>(&self, provider: &P) -> Vec<String>
    where
        P: GraphProvider + ?Sized,
    {
        columns_of(provider, self.target_network.as_deref())
    }

    /// The request these choices describe. Unset choices become empty names, which the core
    /// reports as a missing network or column.
    pub fn request(&self) -> Request {
        let or_empty = |v: &Option<String>| v.clone().unwrap_or_default();
        Request {
            source_network: or_empty(&self.source_network),
            source_column: or_empty(&self.source_column),
            target_network: or_empty(&self.target_network),
            target_column: or_empty(&self.target_column),
            options: self.options,
        }
    }
}

fn columns_of<P>(provider: &P, network: Option<&str>) -> Vec<String>
where
    P: GraphProvider + ?Sized,
{
    let graph = network
        .and_then(|name| provider.resolve_by_name(name))
        .and_then(|id| provider.graph(id));
    key_column_names(graph)
}

fn default_column<P>(provider: &P, network: Option<&str>) -> Option<String>
where
    P: GraphProvider + ?Sized,
{
    let columns = columns_of(provider, network);
    if columns.iter().any(|c| c == NAME_COLUMN) {
        return Some(NAME_COLUMN.to_string());
    }
    columns.into_iter().next()
}
