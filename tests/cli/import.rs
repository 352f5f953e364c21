//! Tests for `envop import`.

use crate::support::*;
use envop::core::store::{ItemStore, Memory};

fn stored(t: &Test, title: &str) -> envop::Item {
    let store = t.server().store();
    let vault = store.find_vault_by_title("ops").unwrap();
    store
        .lookup_item(&vault.id, title)
        .unwrap()
        .expect("item should exist")
}

fn store_with_vault() -> Memory {
    let store = Memory::new();
    store.add_vault("ops");
    store
}

#[test]
fn test_import_creates_item() {
    let t = Test::with_store(store_with_vault());
    t.write(".env", "DB_PORT=5432\nDB_HOST=localhost\n");

    let output = t.import("ops", "api", &[]);

    assert_success(&output);
    assert_stdout_contains(&output, "imported 2 variables into api/dev");
    let item = stored(&t, "api");
    assert_eq!(item.category, "SERVER");
    assert_eq!(
        section_pairs(&item, "dev"),
        pairs(&[("DB_HOST", "localhost"), ("DB_PORT", "5432")])
    );
    assert_eq!(t.server().count("POST"), 1);
    assert_eq!(t.server().count("PUT"), 0);
}

#[test]
fn test_import_updates_existing_item() {
    let store = store_with_vault();
    let vault = store.find_vault_by_title("ops").unwrap();
    seed(
        &store,
        &vault,
        "api",
        &[("prod", "DB_HOST", "x"), ("dev", "DB_HOST", "y")],
    );
    let t = Test::with_store(store);
    t.write(".env.prod", "DB_HOST=z\nDB_PORT=5432\n");

    let output = t.import("ops", "api", &["--env", "prod"]);

    assert_success(&output);
    let item = stored(&t, "api");
    assert_eq!(
        section_pairs(&item, "prod"),
        pairs(&[("DB_HOST", "z"), ("DB_PORT", "5432")])
    );
    assert_eq!(section_pairs(&item, "dev"), pairs(&[("DB_HOST", "y")]));
    assert_eq!(t.server().count("POST"), 0);
    assert_eq!(t.server().count("PUT"), 1);
}

#[test]
fn test_import_layers_env_files() {
    let t = Test::with_store(store_with_vault());
    t.write(".env.local", "A=local\nB=local\n");
    t.write(".env", "A=base\n");
    t.write(".env.staging", "C=staging\n");
    t.write(".env.staging.local", "C=override\n");

    let output = t.import("ops", "api", &["--env", "staging", "--section", "stage"]);

    assert_success(&output);
    let item = stored(&t, "api");
    assert_eq!(
        section_pairs(&item, "stage"),
        pairs(&[("A", "base"), ("B", "local"), ("C", "override")])
    );
}

#[test]
fn test_import_drops_inline_comments_and_expands_references() {
    let t = Test::with_store(store_with_vault());
    t.write(".env", "DB_HOST=db.internal # primary\nDB_PORT=\"5432\" # default\n");
    t.write(".env.dev", "DB_URL=postgres://${DB_HOST}:$DB_PORT/app\n");

    let output = t.import("ops", "api", &[]);

    assert_success(&output);
    assert_eq!(
        section_pairs(&stored(&t, "api"), "dev"),
        pairs(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "5432"),
            ("DB_URL", "postgres://db.internal:5432/app"),
        ])
    );
}

#[test]
fn test_import_hcl() {
    let t = Test::with_store(store_with_vault());
    t.write("env.hcl", "PORT = 8080\nNAME = \"api\"\nDEBUG = true\n");

    let output = t.import("ops", "api", &["--format", "hcl", "--path", "env.hcl"]);

    assert_success(&output);
    assert_eq!(
        section_pairs(&stored(&t, "api"), "dev"),
        pairs(&[("DEBUG", "true"), ("NAME", "api"), ("PORT", "8080")])
    );
}

#[test]
fn test_import_json() {
    let t = Test::with_store(store_with_vault());
    t.write("env.json", r#"{"PORT": 8080, "FLAGS": {"beta": true}, "NAME": "api"}"#);

    let output = t.import("ops", "api", &["--format", "json", "--path", "env.json"]);

    assert_success(&output);
    let item = stored(&t, "api");
    assert_eq!(
        section_pairs(&item, "dev"),
        pairs(&[("FLAGS", r#"{"beta":true}"#), ("NAME", "api"), ("PORT", "8080")])
    );
}

#[test]
fn test_import_uses_default_vault_from_config() {
    let t = Test::with_store(store_with_vault());
    t.write_config("[defaults]\nvault = \"ops\"\n");
    t.write(".env", "A=1\n");

    let output = t.run(&["import", "--item", "api"]);

    assert_success(&output);
    assert_eq!(section_pairs(&stored(&t, "api"), "dev"), pairs(&[("A", "1")]));
}

#[test]
fn test_import_empty_input_never_contacts_store() {
    let t = Test::with_store(store_with_vault());
    t.write(".env", "# only a comment\n\n");

    let output = t.import("ops", "api", &[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "no environment variables found in .env");
    assert!(t.server().requests().is_empty());
}

#[test]
fn test_import_missing_files_is_empty_input() {
    let t = Test::with_store(store_with_vault());

    let output = t.import("ops", "api", &[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "no environment variables found");
}

#[test]
fn test_import_bad_json_names_file() {
    let t = Test::with_store(store_with_vault());
    t.write("env.json", "[1, 2]");

    let output = t.import("ops", "api", &["--format", "json", "--path", "env.json"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "env.json: expected a top-level object");
    assert!(t.server().requests().is_empty());
}

#[test]
fn test_import_rejected_write() {
    let store = store_with_vault();
    let vault = store.find_vault_by_title("ops").unwrap();
    let item = seed(&store, &vault, "api", &[("dev", "A", "1")]);
    store.reject_writes_to(&item.id);
    let t = Test::with_store(store);
    t.write(".env", "A=2\n");

    let output = t.import("ops", "api", &[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "store rejected replace (403)");
    assert_eq!(section_pairs(&stored(&t, "api"), "dev"), pairs(&[("A", "1")]));
}
