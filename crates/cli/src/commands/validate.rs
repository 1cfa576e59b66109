use anyhow::Context;
use elif_config_binder::{BuildOutput, BuiltinTypeResolver, ConfigRecorder, ContainerReady};
use std::collections::BTreeMap;
use std::path::Path;

pub fn run(
    build_output: &Path,
    properties: &Path,
    known_types: &[String],
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(build_output)
        .with_context(|| format!("Failed to read {}", build_output.display()))?;
    let output = BuildOutput::from_json(&content)?;
    let values = load_properties(properties)?;

    let registered = replay(&output, values, known_types)?;
    println!(
        "✓ {} properties valid, {} mappings registered",
        output.startup_plan.property_types.len(),
        registered
    );
    Ok(())
}

/// Replay the startup plan standalone, returning the registered mapping count.
///
/// Types backed by a synthetic provider are converted by the application from
/// their string form, so they resolve alongside the built-in ones.
fn replay(
    output: &BuildOutput,
    values: BTreeMap<String, String>,
    known_types: &[String],
) -> anyhow::Result<usize> {
    let resolver = BuiltinTypeResolver::new()
        .with_implicit_types(output.provided_types())
        .with_implicit_types(known_types.iter().cloned());
    tracing::debug!("Resolving startup types with {:?}", resolver);

    let mut recorder = ConfigRecorder::new(resolver, values);
    // running standalone, there is no container graph to wait for
    output
        .startup_plan
        .replay(&mut recorder, &ContainerReady::component_graph_validated())?;
    Ok(recorder.registered_mappings().len())
}

/// Read a flat YAML map, rendering scalars and sequences as raw strings
pub fn load_properties(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read properties {}", path.display()))?;
    parse_properties(&content)
}

fn parse_properties(content: &str) -> anyhow::Result<BTreeMap<String, String>> {
    let raw: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str(content)?;

    let mut values = BTreeMap::new();
    for (key, value) in raw {
        if let Some(rendered) = render(&value) {
            values.insert(key, rendered);
        }
    }
    Ok(values)
}

fn render(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Sequence(items) => {
            let items: Vec<String> = items.iter().filter_map(render).collect();
            Some(items.join(","))
        }
        serde_yaml::Value::Mapping(_) | serde_yaml::Value::Tagged(_) => None,
    }
}
