use copycat::KeyType;
use copycat_graph::Graph;

/// Names of the columns of `graph` usable as a key, sorted. Empty for an absent graph.
pub fn key_column_names(graph: Option<&Graph>) -> Vec<String> {
    let Some(graph) = graph else {
        return Vec::new();
    };
    let mut names: Vec<String> = graph
        .table()
        .columns()
        .filter(|(_, ty)| KeyType::from_column_type(*ty).is_some())
        .map(|(name, _)| name.to_string())
        .collect();
    names.sort();
    names
}
