//! Label-list rebuild for enumerated device parameters.

use maxport_preset::PresetNode;

const ENUM_PARAMETER: &str = "MxDEnumParameter";

/// The two shipped label reorderings, applied when a caller opts in to
/// label rearrangement.
pub fn builtin_label_sets() -> [(&'static str, &'static [&'static str]); 2] {
    [
        ("Env Trigger", &["LFO", "Legato", "Retrig"]),
        ("Sub Oct", &["-2 PWM", "-2", "-1"]),
    ]
}

/// Replace the label list of every enumerated parameter named
/// `parameter_name`.
///
/// The existing `Names` subtree is discarded wholesale and rebuilt with one
/// entry per label: a zero-based sequential `Id` and a nested display-value
/// `Name` child. Extra metadata on old label nodes does not survive; this is
/// a full replace, not a patch. Returns `true` iff some parameter's list
/// actually differed from the rebuilt one.
pub fn rewrite_label_set(root: &mut PresetNode, parameter_name: &str, labels: &[&str]) -> bool {
    let mut changed = false;

    root.visit_mut(&mut |node| {
        if node.tag != ENUM_PARAMETER {
            return;
        }
        let named_match = node
            .children_named("Name")
            .any(|c| c.attribute("Value") == Some(parameter_name));
        if !named_match {
            return;
        }

        let rebuilt = build_names(labels);
        match node.child_named_mut("Names") {
            Some(existing) if *existing == rebuilt => {}
            Some(existing) => {
                *existing = rebuilt;
                changed = true;
            }
            None => {
                node.children.push(rebuilt);
                changed = true;
            }
        }
    });

    changed
}

fn build_names(labels: &[&str]) -> PresetNode {
    let mut names = PresetNode::new("Names");
    for (id, label) in labels.iter().enumerate() {
        names.children.push(
            PresetNode::new("Name")
                .attr("Id", id.to_string())
                .child(PresetNode::new("Name").attr("Value", *label)),
        );
    }
    names
}
