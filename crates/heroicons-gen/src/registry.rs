use std::fs;
use std::path::{Path, PathBuf};

use crate::category::COMPONENT_ROOT;
use crate::naming;
use crate::sync::SyncError;

/// Generated constants file, relative to the component root.
pub const NAME_CLASS_FILE: &str = "HeroiconName.cs";

/// Generated component lookup file, relative to the component root.
pub const REGISTRY_FILE: &str = "HeroiconRegistry.cs";

const GENERATED_HEADER: &str = "// <auto-generated>\n//     Regenerated by heroicons-gen on every icon set sync. Do not edit.\n// </auto-generated>\n";

/// One constant declaration in the generated name class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConstantEntry {
    /// Pascal-cased identifier, e.g. `ArrowDown`.
    pub identifier: String,
    /// Literal file stem the constant holds, e.g. `arrow-down`.
    pub stem: String,
}

/// The rendered components of one icon set, for the component registry.
#[derive(Debug, Clone)]
pub struct ComponentSet {
    /// Set label, which is also the C# sub-namespace, e.g. `Solid`.
    pub label: String,
    /// Component type names in the set, e.g. `ArrowDownIcon`.
    pub component_names: Vec<String>,
}

/// Build name-constant entries from SVG file paths, sorted ascending by
/// full path. Duplicate stems are not collapsed; upstream file names are
/// unique within a set.
pub fn constant_entries(svg_files: &[PathBuf]) -> Vec<NameConstantEntry> {
    let mut files: Vec<&PathBuf> = svg_files.iter().collect();
    files.sort();

    files
        .into_iter()
        .filter_map(|file| {
            let stem = file.file_stem()?.to_str()?;
            Some(NameConstantEntry {
                identifier: naming::to_constant_name(stem),
                stem: stem.to_owned(),
            })
        })
        .collect()
}

/// Full source text of the generated `HeroiconName` class.
pub fn name_class_source(entries: &[NameConstantEntry]) -> String {
    let mut source = String::from(GENERATED_HEADER);
    source.push_str("namespace Blazor.Heroicons;\n\n");
    source.push_str("/// <summary>\n");
    source.push_str("/// Name of every Heroicon in the set, keyed by Pascal-cased identifier.\n");
    source.push_str("/// </summary>\n");
    source.push_str("public static class HeroiconName\n{\n");

    for entry in entries {
        // `Equals` would hide object.Equals without the `new` modifier.
        let declaration = if entry.identifier == "Equals" {
            "public new const string"
        } else {
            "public const string"
        };
        source.push_str(&format!(
            "    {declaration} {} = \"{}\";\n",
            entry.identifier, entry.stem
        ));
    }

    source.push_str("}\n");
    source
}

/// Regenerate `HeroiconName.cs` from the given SVG files.
///
/// The previous file is copied to `HeroiconName.cs.bak` first — a
/// recovery aid for the operator, never restored automatically.
pub fn update_name_class(root: &Path, svg_files: &[PathBuf]) -> Result<PathBuf, SyncError> {
    let path = root.join(COMPONENT_ROOT).join(NAME_CLASS_FILE);

    if path.exists() {
        let backup = path.with_extension("cs.bak");
        fs::copy(&path, &backup).map_err(|e| SyncError::io("backing up", &path, e))?;
    }

    write_generated(&path, name_class_source(&constant_entries(svg_files)))?;
    Ok(path)
}

/// Full source text of the generated `HeroiconRegistry` class: a frozen
/// case-insensitive lookup of fully qualified component names to types,
/// plus per-set type lists.
pub fn component_registry_source(sets: &[ComponentSet]) -> String {
    let mut source = String::from(GENERATED_HEADER);
    source.push_str("using System.Collections.Frozen;\n\n");
    source.push_str("namespace Blazor.Heroicons;\n\n");
    source.push_str("/// <summary>\n");
    source.push_str("/// Lookup of generated icon components by fully qualified name and by set.\n");
    source.push_str("/// </summary>\n");
    source.push_str("internal static class HeroiconRegistry\n{\n");

    source.push_str("    private static readonly FrozenDictionary<string, Type> Components =\n");
    source.push_str("        new Dictionary<string, Type>(StringComparer.OrdinalIgnoreCase)\n");
    source.push_str("        {\n");
    for set in sets {
        for name in &set.component_names {
            source.push_str(&format!(
                "            {{ \"Blazor.Heroicons.{0}.{1}\", typeof({0}.{1}) }},\n",
                set.label, name
            ));
        }
    }
    source.push_str("        }.ToFrozenDictionary(StringComparer.OrdinalIgnoreCase);\n\n");

    source.push_str("    private static readonly FrozenDictionary<HeroiconType, Type[]> ComponentsByType =\n");
    source.push_str("        new Dictionary<HeroiconType, Type[]>\n");
    source.push_str("        {\n");
    for set in sets {
        source.push_str(&format!("            {{\n                HeroiconType.{},\n                [\n", set.label));
        for name in &set.component_names {
            source.push_str(&format!("                    typeof({}.{}),\n", set.label, name));
        }
        source.push_str("                ]\n            },\n");
    }
    source.push_str("        }.ToFrozenDictionary();\n\n");

    source.push_str("    public static Type Resolve(string key) =>\n");
    source.push_str("        Components.TryGetValue(key, out var component)\n");
    source.push_str("            ? component\n");
    source.push_str(
        "            : throw new KeyNotFoundException($\"No Heroicon component registered for '{key}'.\");\n\n",
    );
    source.push_str("    public static Type[] GetAll(HeroiconType type) => ComponentsByType[type];\n");
    source.push_str("}\n");
    source
}

/// Regenerate `HeroiconRegistry.cs` from the rendered component sets.
pub fn update_component_registry(root: &Path, sets: &[ComponentSet]) -> Result<PathBuf, SyncError> {
    let path = root.join(COMPONENT_ROOT).join(REGISTRY_FILE);
    write_generated(&path, component_registry_source(sets))?;
    Ok(path)
}

fn write_generated(path: &Path, source: String) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SyncError::io("creating", parent, e))?;
    }
    fs::write(path, source).map_err(|e| SyncError::io("writing", path, e))
}
