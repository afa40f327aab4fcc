use lrpeg::{Match, Outcome};

/// A match-tree node rebuilt from the flat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    pub id: T,
    pub begin: usize,
    pub end: usize,
    pub children: Vec<Node<T>>,
}

/// Rebuilds the forest encoded in a match log: walking in append order, each
/// match claims the `child_count` most recently completed subtrees as its
/// children. Returns `None` when a match claims more subtrees than exist,
/// i.e. the log is not well nested.
pub fn build_forest<T: Clone>(matches: &[Match<T>]) -> Option<Vec<Node<T>>> {
    let mut stack: Vec<Node<T>> = Vec::new();
    for m in matches {
        if m.child_count > stack.len() {
            return None;
        }
        let children = stack.split_off(stack.len() - m.child_count);
        stack.push(Node {
            id: m.id.clone(),
            begin: m.begin.offset(),
            end: m.end.offset(),
            children,
        });
    }
    Some(stack)
}

/// The single root of an outcome's match forest; panics when the parse failed
/// or the forest does not have exactly one root.
#[allow(dead_code)]
pub fn single_root<T: Clone + std::fmt::Debug>(out: &Outcome<T>) -> Node<T> {
    assert!(out.ok, "parse failed at {}", out.furthest_failure);
    let forest = build_forest(&out.matches).expect("match log is not well nested");
    assert_eq!(forest.len(), 1, "expected one root, got {:?}", forest);
    forest.into_iter().next().unwrap()
}

/// Shorthand for asserting a node's tag and span.
#[allow(dead_code)]
pub fn assert_span<T: PartialEq + std::fmt::Debug>(
    node: &Node<T>,
    id: T,
    begin: usize,
    end: usize,
) {
    assert_eq!((&node.id, node.begin, node.end), (&id, begin, end));
}
