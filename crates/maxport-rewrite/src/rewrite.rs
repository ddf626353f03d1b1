//! In-place mutation of located reference nodes.

use maxport_preset::PresetNode;

/// Rewrite the three path fields on every located `FileRef`.
///
/// Per node: `RelativePathType` is forced to `1` (relative mode), `Path` is
/// cleared, and `RelativePath` receives the computed value. Each field is
/// independently optional; a missing one never blocks the others.
///
/// `deep` controls where the fields are looked for: the modern container
/// shape keeps them as direct children of the `FileRef`, while the permissive
/// fallback shape tolerates them at any depth inside it, so fallback-located
/// nodes are rewritten with `deep` set.
///
/// Returns `true` iff at least one attribute value actually changed, so a
/// rerun against an already-rewritten preset reports no change.
pub fn apply_path_rewrite(refs: Vec<&mut PresetNode>, relative_path: &str, deep: bool) -> bool {
    let mut changed = false;

    for file_ref in refs {
        if deep {
            file_ref.visit_mut(&mut |node| changed |= rewrite_field(node, relative_path));
        } else {
            for child in &mut file_ref.children {
                changed |= rewrite_field(child, relative_path);
            }
        }
    }

    changed
}

fn rewrite_field(node: &mut PresetNode, relative_path: &str) -> bool {
    match node.tag.as_str() {
        "RelativePathType" => node.set_attribute("Value", "1"),
        "Path" => node.set_attribute("Value", ""),
        "RelativePath" => node.set_attribute("Value", relative_path),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_file_ref() -> PresetNode {
        PresetNode::new("FileRef")
            .child(PresetNode::new("RelativePathType").attr("Value", "0"))
            .child(PresetNode::new("Path").attr("Value", "/abs/device.amxd"))
            .child(PresetNode::new("RelativePath").attr("Value", ""))
    }

    #[test]
    fn test_rewrites_all_three_fields() {
        let mut node = full_file_ref();
        assert!(apply_path_rewrite(vec![&mut node], "../device.amxd", false));

        assert_eq!(node.children[0].attribute("Value"), Some("1"));
        assert_eq!(node.children[1].attribute("Value"), Some(""));
        assert_eq!(node.children[2].attribute("Value"), Some("../device.amxd"));
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        // Only RelativePath present; the other two are simply absent.
        let mut node =
            PresetNode::new("FileRef").child(PresetNode::new("RelativePath").attr("Value", "x"));

        assert!(apply_path_rewrite(vec![&mut node], "../device.amxd", false));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].attribute("Value"), Some("../device.amxd"));
    }

    #[test]
    fn test_second_run_reports_no_change() {
        let mut node = full_file_ref();
        assert!(apply_path_rewrite(vec![&mut node], "../device.amxd", false));
        assert!(!apply_path_rewrite(vec![&mut node], "../device.amxd", false));
    }

    #[test]
    fn test_unrelated_children_untouched() {
        let mut node = full_file_ref().child(PresetNode::new("SearchHint").attr("Value", "keep"));
        apply_path_rewrite(vec![&mut node], "../device.amxd", false);
        assert_eq!(node.children[3].attribute("Value"), Some("keep"));
    }

    #[test]
    fn test_shallow_mode_ignores_nested_fields() {
        let mut node = PresetNode::new("FileRef").child(
            PresetNode::new("Wrapper").child(PresetNode::new("Path").attr("Value", "/abs/d.amxd")),
        );

        assert!(!apply_path_rewrite(vec![&mut node], "../device.amxd", false));
        assert_eq!(
            node.children[0].children[0].attribute("Value"),
            Some("/abs/d.amxd")
        );
    }

    #[test]
    fn test_deep_mode_rewrites_nested_fields() {
        let mut node = PresetNode::new("FileRef")
            .child(PresetNode::new("RelativePathType").attr("Value", "0"))
            .child(
                PresetNode::new("Wrapper")
                    .child(PresetNode::new("Path").attr("Value", "/abs/d.amxd"))
                    .child(PresetNode::new("RelativePath").attr("Value", "")),
            );

        assert!(apply_path_rewrite(vec![&mut node], "../device.amxd", true));
        assert_eq!(node.children[0].attribute("Value"), Some("1"));
        let wrapper = &node.children[1];
        assert_eq!(wrapper.children[0].attribute("Value"), Some(""));
        assert_eq!(wrapper.children[1].attribute("Value"), Some("../device.amxd"));
    }

    #[test]
    fn test_no_file_refs_no_change() {
        assert!(!apply_path_rewrite(Vec::new(), "../device.amxd", false));
    }
}
