use lcp_document::ExecutionEntry;
use lcp_patcher::{LifecycleConfigPatcher, PatchError, PatchMode};
use lcp_test_utils::{
    all_entries, count_class, normalize, published_entries, published_with_duplicates,
    API_LIFECYCLE_XML, CUSTOM_EXECUTOR, DEFAULT_EXECUTOR, EMPTY_PUBLISHED_XML, FLAT_LIFECYCLE_XML,
    MALFORMED_XML,
};
use pretty_assertions::assert_eq;

#[test]
fn apply_on_registry_lifecycle() {
    let patcher = LifecycleConfigPatcher::new();
    let out = patcher.apply_custom_executor(API_LIFECYCLE_XML).unwrap();

    for entry in all_entries(&out) {
        if entry.for_event == "Publish" || entry.for_event == "Re-Publish" {
            assert_eq!(entry.class, CUSTOM_EXECUTOR, "{entry}");
        } else {
            assert_eq!(entry.class, DEFAULT_EXECUTOR, "{entry}");
        }
    }

    assert_eq!(
        published_entries(&out),
        vec![
            ExecutionEntry::new("Block", DEFAULT_EXECUTOR),
            ExecutionEntry::new("Deprecate", DEFAULT_EXECUTOR),
            ExecutionEntry::new("Re-Publish", CUSTOM_EXECUTOR),
            ExecutionEntry::new("Publish", CUSTOM_EXECUTOR),
        ]
    );
}

#[test]
fn output_never_declares_empty_namespace() {
    let patcher = LifecycleConfigPatcher::new();
    let applied = patcher.apply_custom_executor(API_LIFECYCLE_XML).unwrap();
    let reverted = patcher.revert_custom_executor(&applied).unwrap();
    assert!(!applied.contains("xmlns=\"\""));
    assert!(!reverted.contains("xmlns=\"\""));
    assert!(applied.contains("http://www.w3.org/2005/07/scxml"));
}

#[test]
fn empty_published_data_gains_single_entry() {
    let out = LifecycleConfigPatcher::new()
        .apply_custom_executor(EMPTY_PUBLISHED_XML)
        .unwrap();
    assert_eq!(
        published_entries(&out),
        vec![ExecutionEntry::new("Publish", CUSTOM_EXECUTOR)]
    );
}

#[test]
fn revert_removes_all_duplicate_inserts() {
    let xml = published_with_duplicates(3, CUSTOM_EXECUTOR);
    assert_eq!(published_entries(&xml).len(), 4);

    let out = LifecycleConfigPatcher::new()
        .revert_custom_executor(&xml)
        .unwrap();
    assert_eq!(
        published_entries(&out),
        vec![ExecutionEntry::new("Retire", DEFAULT_EXECUTOR)]
    );
}

#[test]
fn revert_leaves_no_custom_executor() {
    let patcher = LifecycleConfigPatcher::new();
    let applied = patcher.apply_custom_executor(API_LIFECYCLE_XML).unwrap();
    assert_eq!(count_class(&applied, CUSTOM_EXECUTOR), 5);

    let reverted = patcher.revert_custom_executor(&applied).unwrap();
    assert_eq!(count_class(&reverted, CUSTOM_EXECUTOR), 0);
}

#[test]
fn revert_after_apply_restores_document() {
    let patcher = LifecycleConfigPatcher::new();
    for fixture in [API_LIFECYCLE_XML, FLAT_LIFECYCLE_XML, EMPTY_PUBLISHED_XML] {
        let applied = patcher.apply_custom_executor(fixture).unwrap();
        let reverted = patcher.revert_custom_executor(&applied).unwrap();
        assert_eq!(reverted, normalize(fixture));
    }
}

#[test]
fn repeated_apply_appends_another_entry() {
    // Apply does not look for an earlier insertion; a second apply stacks a duplicate.
    let patcher = LifecycleConfigPatcher::new();
    let once = patcher.apply_custom_executor(EMPTY_PUBLISHED_XML).unwrap();
    let twice = patcher.apply_custom_executor(&once).unwrap();
    assert_eq!(published_entries(&once).len(), 1);
    assert_eq!(published_entries(&twice).len(), 2);
}

#[test]
fn synchronize_keeps_single_inserted_entry() {
    let patcher = LifecycleConfigPatcher::new();
    let once = patcher.apply_custom_executor(EMPTY_PUBLISHED_XML).unwrap();
    let synced = patcher.synchronize(&once).unwrap();
    let synced_again = patcher.synchronize(&synced).unwrap();

    assert_eq!(synced, once);
    assert_eq!(synced_again, synced);
}

#[test]
fn synchronize_collapses_duplicates() {
    let xml = published_with_duplicates(3, CUSTOM_EXECUTOR);
    let out = LifecycleConfigPatcher::new().synchronize(&xml).unwrap();
    assert_eq!(
        published_entries(&out),
        vec![
            ExecutionEntry::new("Retire", DEFAULT_EXECUTOR),
            ExecutionEntry::new("Publish", CUSTOM_EXECUTOR),
        ]
    );
}

#[test]
fn malformed_input_fails_every_mode() {
    let patcher = LifecycleConfigPatcher::new();
    for mode in [PatchMode::Apply, PatchMode::Revert, PatchMode::Synchronize] {
        let err = patcher.patch(mode, MALFORMED_XML).unwrap_err();
        assert!(matches!(err, PatchError::MalformedConfig(_)), "{mode}");
    }
}

#[test]
fn flat_layout_targets_direct_data() {
    let out = LifecycleConfigPatcher::new()
        .apply_custom_executor(FLAT_LIFECYCLE_XML)
        .unwrap();
    assert_eq!(
        published_entries(&out),
        vec![
            ExecutionEntry::new("Retire", DEFAULT_EXECUTOR),
            ExecutionEntry::new("Publish", CUSTOM_EXECUTOR),
        ]
    );
}

#[test]
fn non_ascii_text_survives_foreign_encoding_declaration() {
    let xml = r#"<?xml version="1.0" encoding="ISO-8859-1"?><lifecycle><state id="Published"><data><note>Café ✓</note></data></state></lifecycle>"#;
    let patcher = LifecycleConfigPatcher::new();

    let reverted = patcher.revert_custom_executor(xml).unwrap();
    assert!(reverted.contains("<note>Café ✓</note>"));

    let applied = patcher.apply_custom_executor(xml).unwrap();
    assert!(applied.contains("<note>Café ✓</note>"));
    assert_eq!(patcher.revert_custom_executor(&applied).unwrap(), reverted);
}

#[test]
fn license_comment_survives_every_mode() {
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- Copyright (c) Example Inc. All Rights Reserved. -->\n{FLAT_LIFECYCLE_XML}"
    );
    let patcher = LifecycleConfigPatcher::new();

    for mode in [PatchMode::Apply, PatchMode::Revert, PatchMode::Synchronize] {
        let outcome = patcher.patch(mode, &xml).unwrap();
        assert!(
            outcome.document.contains("<!-- Copyright (c) Example Inc. All Rights Reserved. -->"),
            "{mode} dropped the leading comment"
        );
    }

    let applied = patcher.apply_custom_executor(&xml).unwrap();
    assert_eq!(patcher.revert_custom_executor(&applied).unwrap(), normalize(&xml));
}
