//! Tiered structural search for reference nodes.
//!
//! Different producer versions of Live nest the `FileRef` node at different
//! depths under different container types. The modern shape puts it directly
//! under `MxPatchRef`; older documents bury it somewhere below a `PatchSlot`.
//! The tiers are ordered fallbacks, never merged: mixing them would risk
//! double-processing or touching unrelated structures.

use maxport_preset::PresetNode;

const PATCH_REF_CONTAINER: &str = "MxPatchRef";
const PATCH_SLOT_CONTAINER: &str = "PatchSlot";
const FILE_REF: &str = "FileRef";

/// Which matcher strategy produced the located references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTier {
    /// `MxPatchRef` containers, direct `FileRef` children only.
    PatchRef,
    /// `PatchSlot` containers, any descendant `FileRef`.
    PatchSlot,
}

/// Matcher strategies in priority order; the first tier with any hit wins.
const TIERS: [SearchTier; 2] = [SearchTier::PatchRef, SearchTier::PatchSlot];

/// Locate every reference node in the document.
///
/// Returns the matched `FileRef` nodes and the tier that produced them, or
/// an empty vec and `None` when neither shape occurs. An empty result is a
/// legitimate "nothing to change" outcome, not an error.
pub fn locate_references(root: &mut PresetNode) -> (Vec<&mut PresetNode>, Option<SearchTier>) {
    let tier = TIERS.into_iter().find(|t| probe(root, *t, false));

    let mut refs = Vec::new();
    match tier {
        Some(SearchTier::PatchRef) => collect_patch_ref(root, &mut refs),
        Some(SearchTier::PatchSlot) => collect_patch_slot(root, false, &mut refs),
        None => {}
    }

    (refs, tier)
}

/// Whether a tier would match anything, without borrowing mutably.
fn probe(node: &PresetNode, tier: SearchTier, in_container: bool) -> bool {
    match tier {
        SearchTier::PatchRef => {
            if node.tag == PATCH_REF_CONTAINER
                && node.children.iter().any(|c| c.tag == FILE_REF)
            {
                return true;
            }
            node.children.iter().any(|c| probe(c, tier, false))
        }
        SearchTier::PatchSlot => {
            if in_container && node.tag == FILE_REF {
                return true;
            }
            let in_container = in_container || node.tag == PATCH_SLOT_CONTAINER;
            node.children.iter().any(|c| probe(c, tier, in_container))
        }
    }
}

/// Direct `FileRef` children of every `MxPatchRef` in the tree.
fn collect_patch_ref<'a>(node: &'a mut PresetNode, out: &mut Vec<&'a mut PresetNode>) {
    if node.tag == PATCH_REF_CONTAINER {
        for child in &mut node.children {
            if child.tag == FILE_REF {
                out.push(child);
            } else {
                collect_patch_ref(child, out);
            }
        }
    } else {
        for child in &mut node.children {
            collect_patch_ref(child, out);
        }
    }
}

/// Every `FileRef` descendant, at any depth, of every `PatchSlot`.
fn collect_patch_slot<'a>(
    node: &'a mut PresetNode,
    in_slot: bool,
    out: &mut Vec<&'a mut PresetNode>,
) {
    if in_slot && node.tag == FILE_REF {
        out.push(node);
        return;
    }
    let in_slot = in_slot || node.tag == PATCH_SLOT_CONTAINER;
    for child in &mut node.children {
        collect_patch_slot(child, in_slot, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_ref() -> PresetNode {
        PresetNode::new("FileRef")
            .child(PresetNode::new("Path").attr("Value", "/abs/device.amxd"))
    }

    #[test]
    fn test_tier_a_direct_children_only() {
        let mut root = PresetNode::new("Ableton").child(
            PresetNode::new("MxPatchRef")
                .child(file_ref())
                .child(PresetNode::new("Wrapper").child(file_ref())),
        );

        let (refs, tier) = locate_references(&mut root);
        assert_eq!(tier, Some(SearchTier::PatchRef));
        // The FileRef nested under Wrapper is not a direct child.
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_tier_a_wins_over_patch_slot_decoy() {
        let mut root = PresetNode::new("Ableton")
            .child(PresetNode::new("PatchSlot").child(file_ref()))
            .child(PresetNode::new("MxPatchRef").child(file_ref()));

        let (refs, tier) = locate_references(&mut root);
        assert_eq!(tier, Some(SearchTier::PatchRef));
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_tier_b_fallback_unbounded_depth() {
        let mut root = PresetNode::new("Ableton").child(
            PresetNode::new("PatchSlot")
                .child(PresetNode::new("Value").child(PresetNode::new("Inner").child(file_ref()))),
        );

        let (refs, tier) = locate_references(&mut root);
        assert_eq!(tier, Some(SearchTier::PatchSlot));
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_no_container_means_no_match() {
        // A bare FileRef outside both container types is left alone.
        let mut root = PresetNode::new("Ableton").child(file_ref());

        let (refs, tier) = locate_references(&mut root);
        assert!(refs.is_empty());
        assert_eq!(tier, None);
    }

    #[test]
    fn test_multiple_patch_refs_all_collected() {
        let mut root = PresetNode::new("Ableton")
            .child(PresetNode::new("MxPatchRef").child(file_ref()))
            .child(PresetNode::new("MxPatchRef").child(file_ref()).child(file_ref()));

        let (refs, tier) = locate_references(&mut root);
        assert_eq!(tier, Some(SearchTier::PatchRef));
        assert_eq!(refs.len(), 3);
    }
}
