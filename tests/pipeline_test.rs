//! End-to-end pipeline tests: input -> sanitize -> classify -> style

use code_hook_notify::payload::resolve;
use code_hook_notify::{
    classify, contains_emoji, sanitize, style, Category, InputArgs, InputSource, Level,
    NotificationPayload,
};

fn emoji_count(s: &str) -> usize {
    s.chars().filter(|c| contains_emoji(&c.to_string())).count()
}

#[test]
fn test_well_formed_inputs_yield_single_leading_emoji() {
    let cases = [
        ("Build Complete", "Compilation successful"),
        ("Tests Passed", "All 25 tests completed successfully!"),
        ("Git Push Failed", "Permission denied to repository"),
        ("Hello", "World"),
    ];
    for (title, message) in cases {
        let payload = NotificationPayload::new(title, message, Level::Info);
        let category = classify(&payload.title, &payload.message);
        let styled = style(&payload, category);

        assert!(!styled.title.is_empty(), "{title}: styled title empty");
        let first = styled.title.chars().next().unwrap();
        assert!(
            contains_emoji(&first.to_string()),
            "{title}: no leading emoji in {:?}",
            styled.title
        );
        assert_eq!(
            emoji_count(&styled.title),
            1,
            "{title}: expected exactly one emoji in {:?}",
            styled.title
        );
    }
}

#[test]
fn test_classification_scenarios() {
    assert_eq!(
        classify("Build Complete", "Compilation successful"),
        Category::Success
    );
    assert_eq!(
        classify("Tests Passed", "All 25 tests completed successfully!"),
        Category::Success
    );
    assert_eq!(
        classify("Git Push Failed", "Permission denied to repository"),
        Category::Error
    );
    assert_eq!(classify("Hello", "World"), Category::Info);
}

#[test]
fn test_sanitize_properties() {
    let inputs = [
        "plain text",
        "with\x07bell\x1band escape",
        "newline\nand\ttab survive",
        "unicode: héllo wörld 你好",
        "",
    ];
    for input in inputs {
        let once = sanitize(input);
        // idempotent
        assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        // never lengthens
        assert!(once.chars().count() <= input.chars().count());
        // no raw control bytes outside newline/tab
        assert!(once
            .chars()
            .all(|c| !c.is_control() || c == '\n' || c == '\t'));
    }
}

#[test]
fn test_input_precedence_json_over_args_over_default() {
    let no_env = |_: &str| -> Option<String> { None };
    let args = InputArgs {
        title: Some("arg title".to_string()),
        message: None,
        level: None,
    };
    let default = NotificationPayload::new("Default", "Default message", Level::Info);

    // JSON stdin wins over args
    let (payload, source) = resolve(
        &args,
        Some(r#"{"title":"json title","message":"json body"}"#),
        default.clone(),
        &no_env,
    );
    assert_eq!(source, InputSource::JsonStdin);
    assert_eq!(payload.title, "json title");

    // args win over default
    let (payload, source) = resolve(&args, None, default.clone(), &no_env);
    assert_eq!(source, InputSource::Args);
    assert_eq!(payload.title, "arg title");

    // default as last resort
    let (payload, source) = resolve(&InputArgs::default(), None, default, &no_env);
    assert_eq!(source, InputSource::Default);
    assert_eq!(payload.title, "Default");
}

#[test]
fn test_control_characters_cannot_reach_delivery_text() {
    // payload text flows into shell arguments and script strings; after
    // construction no control bytes other than newline/tab may remain
    let payload = NotificationPayload::new(
        "title\x1b]9;injected\x07",
        "message\x00with\x1bjunk",
        Level::Info,
    );
    assert_eq!(payload.title, "title]9;injected");
    assert_eq!(payload.message, "messagewithjunk");
}
