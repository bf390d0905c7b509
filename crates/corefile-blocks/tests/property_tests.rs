use corefile_blocks::{
    Placement, Rule, Vocabulary, locate_region, merge, merge_with_report, render_rules,
};
use proptest::prelude::*;

const BEGIN: &str = "# BEGIN IngressReconciler managed rules";
const END: &str = "# END IngressReconciler managed rules";

/// Corefile-like lines that never contain a managed-region marker.
fn plain_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".:53 {".to_string()),
        Just("}".to_string()),
        Just("    errors".to_string()),
        Just("    kubernetes cluster.local in-addr.arpa ip6.arpa {".to_string()),
        Just("    kubernetes cluster.local".to_string()),
        Just("        pods insecure".to_string()),
        Just("    }".to_string()),
        Just("    forward . /etc/resolv.conf".to_string()),
        Just("    metadata".to_string()),
        Just("# comment with { brace".to_string()),
        Just("    rewrite name outside.example.com other.svc".to_string()),
        Just(String::new()),
        Just("   ".to_string()),
    ]
}

/// Plain lines mixed with stray, indented and same-line markers.
fn marker_line() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => plain_line(),
        1 => Just(BEGIN.to_string()),
        1 => Just(END.to_string()),
        1 => Just(format!("    {BEGIN}")),
        1 => Just(format!("{BEGIN}{END}")),
    ]
}

fn document(line: impl Strategy<Value = String>) -> impl Strategy<Value = String> {
    (prop::collection::vec(line, 0..24), any::<bool>()).prop_map(|(lines, newline)| {
        let mut text = lines.join("\n");
        if newline {
            text.push('\n');
        }
        text
    })
}

fn plain_corefile() -> impl Strategy<Value = String> {
    document(plain_line())
}

fn corefile() -> impl Strategy<Value = String> {
    document(marker_line())
}

fn rule_list() -> impl Strategy<Value = Vec<Rule>> {
    prop::collection::vec(
        ("[a-z]{1,8}\\.example\\.com", "[a-z]{1,8}\\.svc").prop_map(|(p, t)| Rule::new(p, t)),
        0..6,
    )
}

fn exclusions() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z-]{0,9}", 0..3)
}

/// Output with the managed region (and an injected auxiliary line) removed.
fn outside_region(text: &str, auxiliary_injected: bool) -> String {
    let vocabulary = Vocabulary::default();
    let lines: Vec<&str> = text.split('\n').collect();
    let region = locate_region(&lines, vocabulary.begin(), vocabulary.end()).unwrap();
    let from = if auxiliary_injected { region.begin - 1 } else { region.begin };

    let mut kept: Vec<&str> = lines[..from].to_vec();
    kept.extend_from_slice(&lines[region.end + 1..]);
    kept.join("\n").trim().to_string()
}

/// Input with the region a merge replaced removed.
fn input_outside(doc: &str, placement: Placement) -> String {
    let lines: Vec<&str> = doc.split('\n').collect();
    match placement {
        Placement::Replaced(region) => {
            let mut kept: Vec<&str> = lines[..region.begin].to_vec();
            kept.extend_from_slice(&lines[region.end + 1..]);
            kept.join("\n").trim().to_string()
        }
        _ => doc.trim().to_string(),
    }
}

proptest! {
    #[test]
    fn merge_is_idempotent(doc in corefile(), rules in rule_list(), excluded in exclusions()) {
        let vocabulary = Vocabulary::default();
        let once = merge(&doc, &rules, &excluded, &vocabulary);
        let twice = merge(&once, &rules, &excluded, &vocabulary);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn plain_input_gets_exactly_one_ordered_marker_pair(doc in plain_corefile(), rules in rule_list(), excluded in exclusions()) {
        let vocabulary = Vocabulary::default();
        let merged = merge(&doc, &rules, &excluded, &vocabulary);
        let lines: Vec<&str> = merged.lines().collect();

        let begins: Vec<usize> = (0..lines.len()).filter(|&i| lines[i].contains(vocabulary.begin())).collect();
        let ends: Vec<usize> = (0..lines.len()).filter(|&i| lines[i].contains(vocabulary.end())).collect();
        prop_assert_eq!(begins.len(), 1);
        prop_assert_eq!(ends.len(), 1);
        prop_assert!(begins[0] < ends[0]);
        prop_assert!(merged.ends_with('\n'));
        prop_assert!(!merged.ends_with("\n\n"));
    }

    #[test]
    fn located_region_holds_rendered_rules(doc in corefile(), rules in rule_list(), excluded in exclusions()) {
        let vocabulary = Vocabulary::default();
        let merged = merge(&doc, &rules, &excluded, &vocabulary);
        let lines: Vec<&str> = merged.split('\n').collect();

        let region = locate_region(&lines, vocabulary.begin(), vocabulary.end());
        prop_assert!(region.is_some());
        let region = region.unwrap();
        let expected = format!(
            "{BEGIN}\n{}{END}",
            render_rules(&rules, &excluded, &vocabulary).text
        );
        prop_assert_eq!(lines[region.lines()].join("\n"), expected);
    }

    #[test]
    fn rule_lines_keep_source_order(doc in corefile(), rules in rule_list(), excluded in exclusions()) {
        let vocabulary = Vocabulary::default();
        let merged = merge(&doc, &rules, &excluded, &vocabulary);
        let begin = merged.find(vocabulary.begin()).unwrap();

        let mut cursor = begin;
        for rule in &rules {
            let line = rule.line(&vocabulary);
            let found = merged[cursor..].find(&line);
            prop_assert!(found.is_some(), "missing {} after byte {}", line, cursor);
            cursor += found.unwrap() + line.len();
        }
    }

    #[test]
    fn content_outside_region_is_preserved(doc in corefile(), rules in rule_list(), excluded in exclusions()) {
        let merged = merge_with_report(&doc, &rules, &excluded, &Vocabulary::default());
        prop_assert_eq!(
            outside_region(&merged.text, merged.auxiliary_injected),
            input_outside(&doc, merged.placement)
        );
    }

    #[test]
    fn second_merge_rewrites_region_in_place(doc in corefile(), rules in rule_list(), excluded in exclusions()) {
        let vocabulary = Vocabulary::default();
        let once = merge_with_report(&doc, &rules, &excluded, &vocabulary);
        let twice = merge_with_report(&once.text, &rules, &excluded, &vocabulary);
        prop_assert!(matches!(twice.placement, Placement::Replaced(_)));
        prop_assert!(!twice.auxiliary_injected);
    }
}
