use tracing::debug;

use super::{CodeMatcher, Matcher};
use crate::types::{ClassificationNode, MatchMode, MatchSet};

/// Walk the taxonomy depth-first and record every node whose code matches `target`.
///
/// Children are searched before their parent. Matches are keyed by the
/// original dotted code and accumulate into `matches`, which is never cleared
/// here.
pub fn search_tree(
    tree: &[ClassificationNode],
    target: &str,
    mode: MatchMode,
    matches: &mut MatchSet,
) {
    let matcher = Matcher::for_mode(mode);
    search_nodes(tree, target, &matcher, matches);
}

fn search_nodes(
    nodes: &[ClassificationNode],
    target: &str,
    matcher: &Matcher,
    matches: &mut MatchSet,
) {
    for node in nodes {
        if !node.children.is_empty() {
            search_nodes(&node.children, target, matcher, matches);
        }

        if matcher.matches(&node.bare_code(), target) {
            debug!(code = %node.code, name = %node.name, "code matched");
            matches.insert(node.code.clone(), node.name.clone());
        }
    }
}
