use lcp_patcher::{LifecycleConfigPatcher, CUSTOM_EXECUTOR_CLASS, DEFAULT_EXECUTOR_CLASS};
use lcp_test_utils::{all_entries, normalize, published_entries};
use proptest::prelude::*;

const EVENTS: [&str; 5] = ["Publish", "Re-Publish", "Block", "Deprecate", "Retire"];
const OTHER_EXECUTOR: &str = "com.example.AuditExecutor";
const STATES: [&str; 3] = ["Created", "Published", "Blocked"];

fn class_for(idx: usize) -> &'static str {
    match idx % 3 {
        0 => DEFAULT_EXECUTOR_CLASS,
        1 => CUSTOM_EXECUTOR_CLASS,
        _ => OTHER_EXECUTOR,
    }
}

fn render(states: &[Vec<(&str, &str)>]) -> String {
    let body: String = STATES
        .iter()
        .zip(states)
        .map(|(id, executions)| {
            let executions: String = executions
                .iter()
                .map(|(event, class)| format!(r#"<execution forEvent="{event}" class="{class}"/>"#))
                .collect();
            format!(r#"<state id="{id}"><datamodel><data name="transitionExecution">{executions}</data></datamodel></state>"#)
        })
        .collect();
    format!(r#"<scxml xmlns="http://www.w3.org/2005/07/scxml">{body}</scxml>"#)
}

fn arbitrary_lifecycle() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::collection::vec((0..EVENTS.len(), 0..3usize), 0..6), 3).prop_map(
        |states| {
            let states: Vec<Vec<(&str, &str)>> = states
                .into_iter()
                .map(|execs| execs.into_iter().map(|(e, c)| (EVENTS[e], class_for(c))).collect())
                .collect();
            render(&states)
        },
    )
}

/// No custom executor anywhere, patched events on the default class, no `Publish` in `Published`.
fn pristine_lifecycle() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::collection::vec((0..EVENTS.len(), any::<bool>()), 0..6), 3).prop_map(
        |states| {
            let states: Vec<Vec<(&str, &str)>> = states
                .into_iter()
                .enumerate()
                .map(|(state_idx, execs)| {
                    execs
                        .into_iter()
                        .map(|(e, other)| (EVENTS[e], other))
                        .filter(|(event, _)| !(STATES[state_idx] == "Published" && *event == "Publish"))
                        .map(|(event, other)| {
                            let patched = event == "Publish" || event == "Re-Publish";
                            let class = if other && !patched { OTHER_EXECUTOR } else { DEFAULT_EXECUTOR_CLASS };
                            (event, class)
                        })
                        .collect()
                })
                .collect();
            render(&states)
        },
    )
}

proptest! {
    #[test]
    fn prop_apply_installs_custom_on_patched_events(xml in arbitrary_lifecycle()) {
        let out = LifecycleConfigPatcher::new().apply_custom_executor(&xml).unwrap();
        for entry in all_entries(&out) {
            if entry.for_event == "Publish" || entry.for_event == "Re-Publish" {
                prop_assert_eq!(entry.class.as_str(), CUSTOM_EXECUTOR_CLASS);
            }
        }
        let inserted = published_entries(&out);
        prop_assert_eq!(inserted.last().map(|e| e.for_event.as_str()), Some("Publish"));
    }

    #[test]
    fn prop_revert_clears_custom_executor(xml in arbitrary_lifecycle()) {
        let out = LifecycleConfigPatcher::new().revert_custom_executor(&xml).unwrap();
        prop_assert!(all_entries(&out).iter().all(|e| e.class != CUSTOM_EXECUTOR_CLASS));
        prop_assert!(published_entries(&out).iter().all(|e| e.for_event != "Publish"));
    }

    #[test]
    fn prop_synchronize_is_idempotent(xml in arbitrary_lifecycle()) {
        let patcher = LifecycleConfigPatcher::new();
        let once = patcher.synchronize(&xml).unwrap();
        let twice = patcher.synchronize(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_revert_inverts_apply(xml in pristine_lifecycle()) {
        let patcher = LifecycleConfigPatcher::new();
        let applied = patcher.apply_custom_executor(&xml).unwrap();
        let reverted = patcher.revert_custom_executor(&applied).unwrap();
        prop_assert_eq!(reverted, normalize(&xml));
    }
}
