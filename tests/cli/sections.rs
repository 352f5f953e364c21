//! Tests for `envop cp`, `envop mv` and `envop rm`.

use crate::support::*;
use envop::core::store::Memory;
use envop::Item;

/// Vault "ops" with items x (sections shared, temp) and y (section other).
fn seeded() -> (Test, Item, Item) {
    let store = Memory::new();
    let vault = store.add_vault("ops");
    let x = seed(
        &store,
        &vault,
        "x",
        &[
            ("shared", "B", "2"),
            ("shared", "A", "1"),
            ("temp", "T", "t"),
        ],
    );
    let y = seed(&store, &vault, "y", &[("other", "O", "o")]);
    (Test::with_store(store), x, y)
}

#[test]
fn test_cp_to_other_item() {
    let (t, x, y) = seeded();

    let output = t.run(&[
        "cp",
        "--source-vault",
        "ops",
        "--source-item",
        "x",
        "--source-section",
        "shared",
        "--destination-item",
        "y",
    ]);

    assert_success(&output);
    assert_stdout_contains(&output, "copied shared to y/shared");
    let y_after = t.server().store().item(&y.id).unwrap();
    assert_eq!(section_pairs(&y_after, "shared"), pairs(&[("A", "1"), ("B", "2")]));
    assert_eq!(section_pairs(&y_after, "other"), pairs(&[("O", "o")]));
    assert_eq!(t.server().store().item(&x.id).unwrap(), x);
}

#[test]
fn test_cp_to_other_section_same_item() {
    let (t, x, _) = seeded();

    let output = t.run(&[
        "cp",
        "--source-vault",
        "ops",
        "--source-item",
        "x",
        "--source-section",
        "shared",
        "--destination-section",
        "backup",
    ]);

    assert_success(&output);
    let x_after = t.server().store().item(&x.id).unwrap();
    assert_eq!(section_pairs(&x_after, "backup"), section_pairs(&x, "shared"));
    assert_eq!(section_pairs(&x_after, "shared"), section_pairs(&x, "shared"));
}

#[test]
fn test_cp_onto_itself_is_rejected() {
    let (t, _, _) = seeded();

    let output = t.run(&[
        "cp",
        "--source-vault",
        "ops",
        "--source-item",
        "x",
        "--source-section",
        "shared",
    ]);

    assert_failure(&output);
    assert_stderr_contains(&output, "cannot copy section 'shared' onto itself");
    assert_eq!(t.server().count("PUT"), 0);
}

#[test]
fn test_mv_between_items() {
    let (t, x, y) = seeded();

    let output = t.run(&[
        "mv",
        "--source-vault",
        "ops",
        "--source-item",
        "x",
        "--source-section",
        "temp",
        "--destination-vault",
        "ops",
        "--destination-item",
        "y",
    ]);

    assert_success(&output);
    assert_stdout_contains(&output, "moved temp from x to y/temp");
    let x_after = t.server().store().item(&x.id).unwrap();
    let y_after = t.server().store().item(&y.id).unwrap();
    assert!(x_after.sections.iter().all(|s| s.title != "temp"));
    assert_eq!(section_pairs(&x_after, "shared"), section_pairs(&x, "shared"));
    assert_eq!(section_pairs(&y_after, "temp"), pairs(&[("T", "t")]));
    assert_eq!(t.server().count("PUT"), 2);
}

#[test]
fn test_mv_unknown_source_section_writes_nothing() {
    let (t, _, _) = seeded();

    let output = t.run(&[
        "mv",
        "--source-vault",
        "ops",
        "--source-item",
        "x",
        "--source-section",
        "nope",
        "--destination-item",
        "y",
    ]);

    assert_failure(&output);
    assert_stderr_contains(&output, "section 'nope' not found");
    assert_eq!(t.server().count("PUT"), 0);
}

#[test]
fn test_mv_partial_failure_is_reported() {
    let (t, x, y) = seeded();
    t.server().store().reject_writes_to(&x.id);

    let output = t.run(&[
        "mv",
        "--source-vault",
        "ops",
        "--source-item",
        "x",
        "--source-section",
        "temp",
        "--destination-item",
        "y",
    ]);

    assert_failure(&output);
    assert_stderr_contains(&output, "section 'temp' was copied to the destination");
    assert_stderr_contains(&output, "re-run the move");
    let y_after = t.server().store().item(&y.id).unwrap();
    assert_eq!(section_pairs(&y_after, "temp"), pairs(&[("T", "t")]));
    assert_eq!(t.server().store().item(&x.id).unwrap(), x);
}

#[test]
fn test_rm_section() {
    let (t, x, _) = seeded();

    let output = t.run(&["rm", "--vault", "ops", "--item", "x", "--section", "temp"]);

    assert_success(&output);
    assert_stdout_contains(&output, "removed temp from x");
    let x_after = t.server().store().item(&x.id).unwrap();
    assert!(x_after.sections.iter().all(|s| s.title != "temp"));
    assert!(x_after.fields.iter().all(|f| f.title != "T"));
    assert_eq!(section_pairs(&x_after, "shared"), section_pairs(&x, "shared"));
}

#[test]
fn test_rm_unknown_section_writes_nothing() {
    let (t, x, _) = seeded();

    let output = t.run(&["rm", "--vault", "ops", "--item", "x", "--section", "nope"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "section 'nope' not found in item x");
    assert_eq!(t.server().count("PUT"), 0);
    assert_eq!(t.server().store().item(&x.id).unwrap(), x);
}

#[test]
fn test_cp_into_populated_section_warns() {
    let (t, _, y) = seeded();

    let output = t.run(&[
        "cp",
        "--source-vault",
        "ops",
        "--source-item",
        "x",
        "--source-section",
        "temp",
        "--destination-item",
        "y",
        "--destination-section",
        "other",
    ]);

    assert_success(&output);
    assert_stderr_contains(&output, "y already has section other, copied fields are appended");
    let y_after = t.server().store().item(&y.id).unwrap();
    assert_eq!(section_pairs(&y_after, "other"), pairs(&[("O", "o"), ("T", "t")]));
}

#[test]
fn test_cp_logs_stages_up_to_the_failure() {
    let (t, _, _) = seeded();

    let output = t
        .cmd()
        .env("ENVOP_LOG", "envop=debug")
        .args([
            "cp",
            "--source-vault",
            "ops",
            "--source-item",
            "x",
            "--source-section",
            "shared",
        ])
        .output()
        .unwrap();

    assert_failure(&output);
    let err = stderr(&output);
    assert!(err.contains("SOURCE_LOOKED_UP"), "stderr: {}", err);
    assert!(err.contains("FAILED"), "stderr: {}", err);
    assert!(!err.contains("DEST_PREPARED"), "stderr: {}", err);
}

#[test]
fn test_cp_logs_every_stage_in_order() {
    let (t, _, _) = seeded();

    let output = t
        .cmd()
        .env("ENVOP_LOG", "envop=debug")
        .args([
            "cp",
            "--source-vault",
            "ops",
            "--source-item",
            "x",
            "--source-section",
            "shared",
            "--destination-item",
            "y",
        ])
        .output()
        .unwrap();

    assert_success(&output);
    let err = stderr(&output);
    let positions: Vec<usize> = ["START", "SOURCE_LOOKED_UP", "DEST_PREPARED", "DEST_WRITTEN", "DONE"]
        .iter()
        .map(|stage| err.find(stage).unwrap_or_else(|| panic!("{} missing: {}", stage, err)))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "stderr: {}", err);
}
