//! `alpha inspect`: list the classes declared in a manifest.

use std::path::Path;

use alpha_core::{protocol, Class};
use alpha_manifest::ClassManifest;

pub fn execute(manifest: &Path) -> anyhow::Result<()> {
    let registry = ClassManifest::from_file(manifest)?.load()?;

    if registry.is_empty() {
        println!("No classes declared in {}", manifest.display());
        return Ok(());
    }

    for (_, class) in registry.iter() {
        print!("{}", describe(class));
    }

    Ok(())
}

/// Human-readable summary of one class
fn describe(class: &Class) -> String {
    let mut out = String::new();

    out.push_str(class.name());
    if class.is_strict() {
        out.push_str(" (strict)");
    }
    out.push('\n');

    let parents: Vec<&str> = class.parents().iter().flatten().map(Class::name).collect();
    if !parents.is_empty() {
        out.push_str(&format!("  parents:   {}\n", parents.join(", ")));
    }

    for (name, default) in class.fields() {
        out.push_str(&format!("  field:     {} = {}\n", name, default));
    }

    let behaviors: Vec<String> = class
        .behavior_names()
        .into_iter()
        .filter(|n| ![protocol::GET, protocol::SET, protocol::CLONE].contains(&n.as_str()))
        .collect();
    if !behaviors.is_empty() {
        out.push_str(&format!("  behaviors: {}\n", behaviors.join(", ")));
    }

    out
}
