use crate::OutputFormat;
use anyhow::Context;
use elif_config_binder::{
    BinderConfig, BuildOutput, ConfigBuildStep, ManifestEmitter, MetadataSnapshot,
    SnapshotClassLoader,
};
use std::path::Path;

pub fn run(
    config: BinderConfig,
    snapshot_path: &Path,
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(snapshot_path)?;

    let loader = SnapshotClassLoader::new(&snapshot);
    let emitter = ManifestEmitter::new(&loader);
    let build_output = ConfigBuildStep::new(config)
        .run(&snapshot, &loader, &emitter)
        .with_context(|| format!("Config binding failed for {}", snapshot_path.display()))?;

    let rendered = match format {
        OutputFormat::Json => build_output.to_json()?,
        OutputFormat::Summary => summary(&build_output),
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Build output written to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

pub fn load_snapshot(path: &Path) -> anyhow::Result<MetadataSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;

    let snapshot = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => MetadataSnapshot::from_json(&content)?,
        _ => MetadataSnapshot::from_yaml(&content)?,
    };
    tracing::debug!(
        "Loaded snapshot {} with {} classes and {} injection points",
        path.display(),
        snapshot.classes.len(),
        snapshot.injection_points.len()
    );
    Ok(snapshot)
}

fn summary(output: &BuildOutput) -> String {
    let mut lines = vec![
        format!(
            "Synthetic components: {}",
            output.synthetic_components.len()
        ),
        format!("Generated classes:    {}", output.generated_classes.len()),
        format!("Reflective classes:   {}", output.reflective_classes.len()),
        format!(
            "Validated properties: {}",
            output.startup_plan.property_types.len()
        ),
    ];

    for (property, types) in output.startup_plan.property_types.iter() {
        let types: Vec<&str> = types.iter().map(String::as_str).collect();
        lines.push(format!("  {} -> {}", property, types.join(", ")));
    }
    for mapping in &output.startup_plan.mappings {
        lines.push(format!(
            "Mapping {} (prefix '{}')",
            mapping.interface, mapping.prefix
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_yaml_snapshot() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "config_roots:\n  - class: org.acme.HttpConfig\n    phase: RUNTIME").unwrap();

        let snapshot = load_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.config_roots.len(), 1);
    }

    #[test]
    fn test_summary_lists_properties() {
        let mut output = BuildOutput::default();
        output
            .startup_plan
            .property_types
            .insert("server.port", "int");

        let rendered = summary(&output);
        assert!(rendered.contains("server.port -> int"));
    }
}
