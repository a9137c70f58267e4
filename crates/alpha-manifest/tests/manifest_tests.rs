//! Integration tests for class manifests
//!
//! Loads realistic manifests, builds the registry and constructs instances
//! from JSON data.

use std::io::Write;

use alpha_core::{AlphaError, Value};
use alpha_manifest::{parse_data, ClassManifest, ManifestError};

const WIDGETS: &str = r#"
[[class]]
name = "UIElement"

[class.fields]
container = "body"
el = "none"

[[class]]
name = "AlphaSideBox"
strict = true
parents = ["UIElement"]

[class.fields]
title = "Title"
content = "Put your content here."
direction = "left"
is_shown = false

[[class]]
name = "Pair"
strict = true

[class.fields]
a = 0
b = 0
"#;

#[test]
fn test_load_builds_classes_in_order() {
    let registry = ClassManifest::from_str(WIDGETS).unwrap().load().unwrap();

    let names: Vec<&str> = registry.iter().map(|(_, c)| c.name()).collect();
    assert_eq!(names, vec!["UIElement", "AlphaSideBox", "Pair"]);

    let sidebox = registry.get_by_name("AlphaSideBox").unwrap();
    let element = registry.get_by_name("UIElement").unwrap();
    assert!(sidebox.is_strict());
    assert!(sidebox.composes(element));
}

#[test]
fn test_inherited_fields_come_first() {
    let registry = ClassManifest::from_str(WIDGETS).unwrap().load().unwrap();
    let sidebox = registry.get_by_name("AlphaSideBox").unwrap();

    let instance = sidebox.new_instance().unwrap();
    assert_eq!(
        instance.field_names(),
        vec!["container", "el", "title", "content", "direction", "is_shown"]
    );
    assert_eq!(instance.get("container").unwrap(), Value::from("body"));
}

#[test]
fn test_json_data_under_strict_class() {
    let registry = ClassManifest::from_str(WIDGETS).unwrap().load().unwrap();
    let pair = registry.get_by_name("Pair").unwrap();

    let data = parse_data(r#"{"a": 1, "b": 2}"#).unwrap();
    let p = pair.instantiate(Some(&data)).unwrap();
    assert_eq!(p.get("a").unwrap(), Value::from(1));
    assert_eq!(p.get("b").unwrap(), Value::from(2));

    let data = parse_data(r#"{"a": 1, "c": 3}"#).unwrap();
    let err = pair.instantiate(Some(&data)).unwrap_err();
    assert!(matches!(err, AlphaError::UndeclaredProperty { ref name, .. } if name == "c"));
}

#[test]
fn test_scalar_json_data_rejected() {
    let registry = ClassManifest::from_str(WIDGETS).unwrap().load().unwrap();
    let pair = registry.get_by_name("Pair").unwrap();

    let data = parse_data("7").unwrap();
    assert!(matches!(
        pair.instantiate(Some(&data)),
        Err(AlphaError::InvalidData { .. })
    ));
}

#[test]
fn test_bad_json() {
    assert!(matches!(parse_data("{nope"), Err(ManifestError::DataError(_))));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(WIDGETS.as_bytes()).unwrap();

    let manifest = ClassManifest::from_file(file.path()).unwrap();
    assert_eq!(manifest.classes.len(), 3);
    assert_eq!(manifest.classes[1].parents, vec!["UIElement"]);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ClassManifest::from_file(&dir.path().join("classes.toml")).unwrap_err();
    assert!(matches!(err, ManifestError::IoError(_)));
}

#[test]
fn test_nested_field_defaults_are_shared() {
    let manifest = ClassManifest::from_str(
        r#"
[[class]]
name = "AlphaSearchWidget"

[class.fields]
guests = []
"#,
    )
    .unwrap();
    let registry = manifest.load().unwrap();
    let widget = registry.get_by_name("AlphaSearchWidget").unwrap();

    let a = widget.new_instance().unwrap();
    let b = widget.new_instance().unwrap();
    assert!(a.get("guests").unwrap().ptr_eq(&b.get("guests").unwrap()));

    b.set("guests", Value::list(vec![])).unwrap();
    assert!(!a.get("guests").unwrap().ptr_eq(&b.get("guests").unwrap()));
}
