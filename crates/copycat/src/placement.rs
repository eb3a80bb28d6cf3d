use copycat_graph::{Graph, Node};

/// Copies the `{x, y, z}` view state of `source` onto `target`, bit for bit.
///
/// Non-finite coordinates are copied as they are.
pub fn copy_placement(source: &Node, target: &mut Node) {
    target.view = source.view;
}

/// Frames `target` like `source`: same viewport center and scale factor.
pub fn copy_viewport(source: &Graph, target: &mut Graph) {
    target.viewport = source.viewport;
}

#[cfg(test)]
mod tests {
    use super::*;
    use copycat_graph::ViewState;

    #[test]
    fn non_finite_coordinates_pass_through() {
        let mut g = Graph::new("g");
        let a = g.add_node("a").unwrap();
        let b = g.add_node("b").unwrap();
        g[a].view = ViewState::new(f64::NAN, f64::INFINITY, -0.0);

        let src = g[a].clone();
        copy_placement(&src, &mut g[b]);

        let v = g[b].view;
        assert!(v.x.is_nan());
        assert_eq!(v.y, f64::INFINITY);
        assert!(v.z == 0.0 && v.z.is_sign_negative());
    }
}
