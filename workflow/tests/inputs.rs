//! Input and state lookups against a scripted environment.

use workflow::WorkflowError;
use workflow::io::env::{
    self, InputOptions, boolean_input, input, input_with, multiline_input, state,
};
use workflow::test_support::MapEnv;

fn sample_env() -> MapEnv {
    MapEnv::new([
        ("INPUT_INPUT", "val"),
        ("INPUT_SPECIAL_CHARS", "'\t\"\\ response"),
        ("INPUT_MULTIPLE_SPACE_VARIABLE", "I have multiple spaces"),
        ("INPUT_MULTIPLE_LINES", "val1\nval2\nval3"),
        ("INPUT_WHITESPACE", "  some val  "),
        ("INPUT_TRUE1", "true"),
        ("INPUT_TRUE2", "True"),
        ("INPUT_TRUE3", "TRUE"),
        ("INPUT_FALSE1", "false"),
        ("INPUT_FALSE2", "False"),
        ("INPUT_FALSE3", "FALSE"),
        ("INPUT_WRONG", "wrong"),
        ("STATE_TEST_1", "state_val"),
    ])
}

#[test]
fn input_returns_the_named_value() {
    assert_eq!(input(&sample_env(), "input").as_deref(), Some("val"));
}

#[test]
fn input_name_lookup_is_case_insensitive() {
    assert_eq!(input(&sample_env(), "InPuT").as_deref(), Some("val"));
}

#[test]
fn input_name_spaces_map_to_underscores() {
    assert_eq!(
        input(&sample_env(), "multiple space variable").as_deref(),
        Some("I have multiple spaces")
    );
}

#[test]
fn input_preserves_special_characters() {
    assert_eq!(
        input(&sample_env(), "special chars").as_deref(),
        Some("'\t\"\\ response")
    );
}

#[test]
fn missing_input_is_none() {
    assert_eq!(input(&sample_env(), "missing"), None);
}

#[test]
fn required_input_returns_the_value() {
    let options = InputOptions {
        required: true,
        ..InputOptions::default()
    };
    let value = input_with(&sample_env(), "input", &options).expect("present");
    assert_eq!(value.as_deref(), Some("val"));
}

#[test]
fn required_missing_input_is_an_error() {
    let options = InputOptions {
        required: true,
        ..InputOptions::default()
    };
    let err = input_with(&sample_env(), "missing", &options).expect_err("missing");
    assert!(matches!(err, WorkflowError::MissingRequiredInput(name) if name == "missing"));
}

#[test]
fn whitespace_is_trimmed_by_default() {
    assert_eq!(input(&sample_env(), "whitespace").as_deref(), Some("some val"));
}

#[test]
fn whitespace_survives_when_trimming_is_disabled() {
    let options = InputOptions {
        trim_whitespace: false,
        ..InputOptions::default()
    };
    let value = input_with(&sample_env(), "whitespace", &options).expect("present");
    assert_eq!(value.as_deref(), Some("  some val  "));
}

#[test]
fn multiline_input_splits_and_drops_empty_lines() {
    assert_eq!(
        multiline_input(&sample_env(), "multiple lines"),
        vec!["val1", "val2", "val3"]
    );
    assert!(multiline_input(&sample_env(), "missing").is_empty());
}

#[test]
fn boolean_input_parses_case_insensitively() {
    let env = sample_env();
    for name in ["true1", "true2", "true3"] {
        assert!(boolean_input(&env, name).expect("parse"), "{name}");
    }
    for name in ["false1", "false2", "false3"] {
        assert!(!boolean_input(&env, name).expect("parse"), "{name}");
    }
}

#[test]
fn missing_optional_boolean_reads_as_false() {
    assert!(!boolean_input(&sample_env(), "missing").expect("parse"));
}

#[test]
fn non_boolean_input_is_an_error() {
    let err = boolean_input(&sample_env(), "wrong").expect_err("not a boolean");
    assert!(matches!(err, WorkflowError::InvalidBooleanInput(name) if name == "wrong"));
}

#[test]
fn state_reads_the_name_verbatim() {
    assert_eq!(state(&sample_env(), "TEST_1").as_deref(), Some("state_val"));
    assert_eq!(state(&sample_env(), "test_1"), None);
}

#[test]
fn ci_context_snapshot_collects_repository_identity() {
    let env = MapEnv::new([
        ("CI", "true"),
        ("GITHUB_WORKSPACE", "/home/runner/work/repo"),
        ("GITHUB_REPOSITORY", "owner/repo"),
        ("GITHUB_SHA", "abc123"),
    ]);
    let context = env::ci_context(&env);
    assert!(context.ci);
    assert_eq!(context.workspace.as_deref(), Some("/home/runner/work/repo"));
    assert_eq!(context.permalink_base(), Some(("owner/repo", "abc123")));
    assert!(!context.debug);
}
