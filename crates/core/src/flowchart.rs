//! The git recovery decision tree.
//!
//! Illustrative content only: nothing here looks at a real repository.

use crate::graph::{Edge, Graph, Node};

/// Name of the diagram. Also the stem of the rendered files.
pub const FLOWCHART_NAME: &str = "git_conflict_resolution_flowchart";

/// Graphviz `size` attribute (inches) applied to the diagram.
pub const FLOWCHART_SIZE: &str = "6";

const NODES: &[(&str, &str)] = &[
    ("Q", "❓ Wrong Commit / File Deleted"),
    ("PUSH", "✅ Was it pushed to remote?"),
    ("NOT_PUSHED", "Not pushed yet"),
    ("RESET", "Use git reset (soft/mixed/hard)"),
    ("PUSHED", "Already pushed"),
    ("REVERT", "Use git revert (safe for team)"),
    ("FILE", "File deleted by mistake"),
    (
        "RESTORE",
        "git checkout <commit> -- file\nor git restore --source=HEAD~1 file",
    ),
];

const EDGES: &[(&str, &str, Option<&str>)] = &[
    ("Q", "PUSH", None),
    ("PUSH", "NOT_PUSHED", Some("No")),
    ("NOT_PUSHED", "RESET", None),
    ("PUSH", "PUSHED", Some("Yes")),
    ("PUSHED", "REVERT", None),
    ("Q", "FILE", None),
    ("FILE", "RESTORE", None),
];

/// Build the fixed flowchart.
///
/// The node and edge tables are constants; [`Graph::validate`] holds for the
/// result, which the tests below pin down.
pub fn build_graph() -> Graph {
    let nodes = NODES
        .iter()
        .map(|&(id, label)| Node::new(id, label))
        .collect();
    let edges = EDGES
        .iter()
        .map(|&(source, target, label)| Edge {
            source: source.to_owned(),
            target: target.to_owned(),
            label: label.map(str::to_owned),
        })
        .collect();

    Graph::from_parts(FLOWCHART_NAME, nodes, edges).with_attr("size", FLOWCHART_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let g = build_graph();
        assert_eq!(g.name(), FLOWCHART_NAME);
        assert_eq!(g.nodes().len(), 8);
        assert_eq!(g.edges().len(), 7);
        assert_eq!(g.attrs(), &[("size".to_string(), "6".to_string())]);
    }

    #[test]
    fn test_structurally_valid() {
        let g = build_graph();
        g.validate().expect("flowchart must be valid");
        for edge in g.edges() {
            assert!(g.node(&edge.source).is_some(), "missing {}", edge.source);
            assert!(g.node(&edge.target).is_some(), "missing {}", edge.target);
        }
    }

    #[test]
    fn test_push_question_branches() {
        let g = build_graph();
        let branches: Vec<(&str, Option<&str>)> = g
            .edges_from("PUSH")
            .map(|e| (g.node(&e.target).unwrap().label.as_str(), e.label.as_deref()))
            .collect();
        assert_eq!(
            branches,
            vec![
                ("Not pushed yet", Some("No")),
                ("Already pushed", Some("Yes")),
            ]
        );
    }

    #[test]
    fn test_only_branch_edges_are_labelled() {
        let g = build_graph();
        let labelled: Vec<&str> = g.edges().iter().filter_map(|e| e.label.as_deref()).collect();
        assert_eq!(labelled, vec!["No", "Yes"]);
        assert!(g
            .edges()
            .iter()
            .filter(|e| e.label.is_some())
            .all(|e| e.source == "PUSH"));
    }

    #[test]
    fn test_remedies() {
        let g = build_graph();
        let follow = |id: &str| -> Vec<String> {
            g.edges_from(id)
                .map(|e| g.node(&e.target).unwrap().label.clone())
                .collect()
        };
        assert_eq!(follow("NOT_PUSHED"), vec!["Use git reset (soft/mixed/hard)"]);
        assert_eq!(follow("PUSHED"), vec!["Use git revert (safe for team)"]);
        assert_eq!(
            follow("Q"),
            vec!["✅ Was it pushed to remote?", "File deleted by mistake"]
        );

        let restore = follow("FILE").remove(0);
        let lines: Vec<&str> = restore.lines().collect();
        assert_eq!(
            lines,
            vec![
                "git checkout <commit> -- file",
                "or git restore --source=HEAD~1 file"
            ]
        );
    }

    #[test]
    fn test_dot_is_deterministic() {
        let first = build_graph().to_dot();
        let second = build_graph().to_dot();
        assert_eq!(first.as_bytes(), second.as_bytes());
        assert!(first.starts_with("digraph git_conflict_resolution_flowchart {\n"));
        assert!(first.contains("\tPUSH -> NOT_PUSHED [label=\"No\"]\n"));
        assert!(first.contains("\tPUSH -> PUSHED [label=\"Yes\"]\n"));
        assert!(first.contains(
            "\tRESTORE [label=\"git checkout <commit> -- file\\nor git restore --source=HEAD~1 file\"]\n"
        ));
    }
}
