//! `alpha new`: construct an instance from a manifest class.

use std::path::PathBuf;

use alpha_core::{Instance, Value};
use alpha_manifest::{parse_data, ClassManifest, ManifestError};
use anyhow::Context;
use tracing::debug;

/// Options collected from the command line
pub struct NewOptions {
    pub manifest: PathBuf,
    pub class: String,
    pub data: Option<String>,
    pub data_file: Option<PathBuf>,
    pub assignments: Vec<String>,
}

pub fn execute(options: NewOptions) -> anyhow::Result<()> {
    let instance = construct(&options)?;

    for (name, value) in instance.fields() {
        println!("{} = {}", name, value);
    }

    Ok(())
}

fn construct(options: &NewOptions) -> anyhow::Result<Instance> {
    let registry = ClassManifest::from_file(&options.manifest)
        .with_context(|| format!("loading {}", options.manifest.display()))?
        .load()?;

    let class = registry
        .get_by_name(&options.class)
        .ok_or_else(|| ManifestError::UnknownClass(options.class.clone()))?;

    let data = read_data(options)?;

    let instance = class.instantiate(data.as_ref())?;
    debug!(class = class.name(), "constructed instance");

    for assignment in &options.assignments {
        let (name, value) = parse_assignment(assignment)?;
        instance.set(name, value)?;
    }

    Ok(instance)
}

/// Constructor data from `--data` or `--data-file`; must be a JSON object
fn read_data(options: &NewOptions) -> anyhow::Result<Option<Value>> {
    let text = match (&options.data, &options.data_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => return Ok(None),
    };

    let data = parse_data(&text)?;
    if data.as_map().is_none() {
        anyhow::bail!("data must be a JSON object, got {}", data.type_name());
    }
    Ok(Some(data))
}

/// Split `key=value`; the value is parsed as JSON, falling back to text
fn parse_assignment(assignment: &str) -> anyhow::Result<(&str, Value)> {
    let (name, raw) = assignment
        .split_once('=')
        .with_context(|| format!("expected KEY=VALUE, got {:?}", assignment))?;

    let value = parse_data(raw).unwrap_or_else(|_| Value::from(raw));
    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(data: Option<&str>) -> NewOptions {
        NewOptions {
            manifest: PathBuf::from("classes.toml"),
            class: "Pair".to_string(),
            data: data.map(str::to_string),
            data_file: None,
            assignments: Vec::new(),
        }
    }

    #[test]
    fn test_read_data_requires_object() {
        assert!(read_data(&options(None)).unwrap().is_none());

        let data = read_data(&options(Some(r#"{"a": 1}"#))).unwrap().unwrap();
        assert_eq!(data, Value::map_from([("a", 1)]));

        for text in ["null", "7", "[1]", "\"a\""] {
            let err = read_data(&options(Some(text))).unwrap_err();
            assert!(err.to_string().starts_with("data must be a JSON object"), "{}", err);
        }
    }

    #[test]
    fn test_parse_assignment() {
        let (name, value) = parse_assignment("age=20").unwrap();
        assert_eq!(name, "age");
        assert_eq!(value, Value::from(20));

        let (_, value) = parse_assignment("name=Bobby").unwrap();
        assert_eq!(value, Value::from("Bobby"));

        let (_, value) = parse_assignment("tags=[\"a\"]").unwrap();
        assert_eq!(value, Value::list(vec![Value::from("a")]));

        assert!(parse_assignment("novalue").is_err());
    }
}
