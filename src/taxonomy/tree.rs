use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{ClassifierError, Result, TaxonomyErrorKind};
use crate::types::ClassificationNode;

/// Maximum nesting depth accepted in taxonomy data.
pub const MAX_TAXONOMY_DEPTH: usize = 32;

/// Parse taxonomy JSON (a top-level array of nodes) and check its invariants.
pub fn parse_taxonomy(json: &str) -> Result<Vec<ClassificationNode>> {
    let nodes: Vec<ClassificationNode> = serde_json::from_str(json).map_err(|e| {
        ClassifierError::taxonomy(
            TaxonomyErrorKind::InvalidData,
            format!("Failed to decode taxonomy JSON: {}", e),
        )
    })?;
    validate_taxonomy(&nodes)?;
    Ok(nodes)
}

/// Read and parse a taxonomy JSON file.
pub fn load_taxonomy_file(path: impl AsRef<Path>) -> Result<Vec<ClassificationNode>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        ClassifierError::taxonomy(
            TaxonomyErrorKind::FileError,
            format!("Failed to read taxonomy file '{}': {}", path.display(), e),
        )
    })?;
    parse_taxonomy(&text)
}

/// Check that every code is dotted digits and that nesting stays bounded.
///
/// A code reused with a different name is logged, not rejected.
pub fn validate_taxonomy(nodes: &[ClassificationNode]) -> Result<()> {
    let mut seen = HashMap::new();
    validate_nodes(nodes, 1, &mut seen)
}

fn validate_nodes<'a>(
    nodes: &'a [ClassificationNode],
    depth: usize,
    seen: &mut HashMap<&'a str, &'a str>,
) -> Result<()> {
    if depth > MAX_TAXONOMY_DEPTH {
        return Err(ClassifierError::taxonomy(
            TaxonomyErrorKind::InvalidData,
            format!("taxonomy nesting exceeds maximum depth ({MAX_TAXONOMY_DEPTH})"),
        ));
    }

    for node in nodes {
        let bare = node.bare_code();
        if bare.is_empty() || !bare.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ClassifierError::taxonomy(
                TaxonomyErrorKind::InvalidData,
                format!("invalid code {:?} for {:?}", node.code, node.name),
            ));
        }

        if let Some(previous) = seen.insert(node.code.as_str(), node.name.as_str()) {
            if previous != node.name {
                warn!(code = %node.code, first = previous, second = %node.name, "duplicate taxonomy code");
            }
        }

        validate_nodes(&node.children, depth + 1, seen)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_json() {
        let json = r#"[
            {"code": "01", "name": "Crops", "items": [
                {"code": "01.1", "name": "Annual", "items": [
                    {"code": "01.11", "name": "Grain"}
                ]}
            ]},
            {"code": "62", "name": "IT"}
        ]"#;
        let nodes = parse_taxonomy(json).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].children[0].children[0].code, "01.11");
        assert!(nodes[1].children.is_empty());
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_taxonomy("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_taxonomy("<html>rate limited</html>").unwrap_err();
        assert_eq!(err.taxonomy_kind(), Some(TaxonomyErrorKind::InvalidData));
    }

    #[test]
    fn test_rejects_non_digit_code() {
        let err = parse_taxonomy(r#"[{"code": "A", "name": "Section A"}]"#).unwrap_err();
        assert_eq!(err.taxonomy_kind(), Some(TaxonomyErrorKind::InvalidData));
    }

    #[test]
    fn test_rejects_separator_only_code() {
        let nodes = vec![ClassificationNode::new("..", "dots")];
        assert!(validate_taxonomy(&nodes).is_err());
    }

    #[test]
    fn test_rejects_excessive_depth() {
        let mut node = ClassificationNode::new("1", "leaf");
        for _ in 0..MAX_TAXONOMY_DEPTH {
            node = ClassificationNode::new("1", "inner").with_children(vec![node]);
        }
        assert!(validate_taxonomy(&[node]).is_err());
    }

    #[test]
    fn test_accepts_maximum_depth() {
        let mut node = ClassificationNode::new("1", "leaf");
        for _ in 1..MAX_TAXONOMY_DEPTH {
            node = ClassificationNode::new("1", "inner").with_children(vec![node]);
        }
        assert!(validate_taxonomy(&[node]).is_ok());
    }

    #[test]
    fn test_duplicate_code_is_not_fatal() {
        let nodes = vec![
            ClassificationNode::new("01", "Crops"),
            ClassificationNode::new("01", "Other crops"),
        ];
        assert!(validate_taxonomy(&nodes).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = load_taxonomy_file("/nonexistent/okved.json").unwrap_err();
        assert_eq!(err.taxonomy_kind(), Some(TaxonomyErrorKind::FileError));
    }
}
