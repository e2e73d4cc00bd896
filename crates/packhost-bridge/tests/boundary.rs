//! Integration tests for the host/engine boundary

use packhost_bridge::failure::is_engine_formatted;
use packhost_bridge::plugin::{no_emit_on_errors_plugin, to_raw_plugins};
use packhost_bridge::{
    as_array, concat_error_msg_and_stack, create, create_no_arg, serialize_object, to_buffer,
    to_object, unsupported, BridgeError, CanonicalError, EnginePlugin, Failure, HostValue,
    OneOrMany,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
struct LoaderOptions {
    #[serde(default)]
    include: Option<OneOrMany<String>>,
}

#[test]
fn test_loader_options_round_trip_through_boundary() {
    let options = json!({"include": "src", "sourceMap": true, "presets": ["env"]});
    let payload = serialize_object(Some(options.clone().into()))
        .unwrap()
        .expect("object payload is never absent");

    // The engine hands the same bytes back; the host parses them again.
    let parsed = to_object(payload.clone()).unwrap();
    assert_eq!(parsed, options);

    let typed: LoaderOptions = serde_json::from_value(parsed).unwrap();
    let include = typed.include.map(as_array).unwrap_or_default();
    assert_eq!(include, vec!["src".to_string()]);

    assert_eq!(to_buffer(payload.clone()).unwrap(), payload);
}

#[test]
fn test_source_text_crosses_as_utf8() {
    let source = "export const greeting = \"h\u{e9}llo\";\n";
    let bytes = serialize_object(Some(HostValue::from(source))).unwrap().unwrap();
    assert_eq!(bytes, source.as_bytes());
    assert_eq!(serialize_object(Some(HostValue::from(""))).unwrap(), None);
}

#[test]
fn test_engine_and_host_failures_share_one_surface() {
    let incoming = vec![
        json!("loader crashed"),
        json!({"name": "TypeError", "message": "x is undefined", "stack": "TypeError: x is undefined\n    at loader"}),
        json!({"message": "Module not found", "formatted": "ERROR in ./a.js\nModule not found"}),
    ];

    let messages: Vec<String> = incoming
        .into_iter()
        .map(|value| CanonicalError::from_value(value).message())
        .collect();

    assert_eq!(
        messages,
        vec![
            "loader crashed".to_string(),
            "TypeError: x is undefined\n    at loader".to_string(),
            "Module not found".to_string(),
        ]
    );
}

#[test]
fn test_stats_error_probe_matches_classification() {
    let stats_error: Value = json!({"message": "m", "formatted": "f"});
    assert!(is_engine_formatted(&stats_error));
    assert!(matches!(
        Failure::from_value(stats_error),
        Failure::Engine(_)
    ));
}

#[test]
fn test_normalization_errors_reach_host_as_canonical() {
    let err = to_buffer(HostValue::Null).unwrap_err();
    let unified: CanonicalError = err.into();
    assert!(unified.message().contains("expected byte sequence or text"));
    assert!(unified.message().contains("null"));

    let err = unsupported::<()>("experiments.lazyCompilation", Some("#42")).unwrap_err();
    assert!(matches!(err, BridgeError::NotSupported(_)));
    let unified = concat_error_msg_and_stack(Failure::Text(err.to_string()));
    assert!(unified.message().contains("experiments.lazyCompilation"));
}

#[test]
fn test_plugin_list_crosses_in_order() {
    let define = create("DefinePlugin", |defs: Value| Some(HostValue::from(defs)));
    let plugins = vec![
        create_no_arg("Foo").instantiate(),
        define.construct(json!({"DEBUG": "false"})),
        no_emit_on_errors_plugin().instantiate(),
    ];

    let raw = to_raw_plugins(OneOrMany::Many(plugins)).unwrap();
    let names: Vec<&str> = raw.iter().map(|p| p.name.as_ref()).collect();
    assert_eq!(names, vec!["Foo", "DefinePlugin", "NoEmitOnErrorsPlugin"]);
    assert_eq!(raw[0].options, None);
    assert_eq!(raw[1].options, Some(br#"{"DEBUG":"false"}"#.to_vec()));
    assert_eq!(raw[2].options, None);

    let foo = create_no_arg("Foo").instantiate();
    assert_eq!(foo.name(), "Foo");
}
