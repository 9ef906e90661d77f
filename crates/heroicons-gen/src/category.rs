/// Directory holding the component library sources, relative to the
/// repository root. Generated files all land underneath it.
pub const COMPONENT_ROOT: &str = "src/Blazor.Heroicons";

/// The set whose SVG files feed `HeroiconName.cs`. Icon names are shared
/// across sets, so one set is enough.
pub const NAME_CLASS_SOURCE_LABEL: &str = "Mini";

/// One (size, style) grouping of icons, mapped to its own output directory.
#[derive(Debug, Clone)]
pub struct IconCategory {
    /// Set name, e.g. `Outline`. Doubles as the output directory name and
    /// the generated C# sub-namespace.
    pub label: String,
    /// Glob for the set's SVGs, relative to the extracted optimized tree.
    pub source_glob: String,
    /// Output directory for rendered components, relative to the root.
    pub output_dir: String,
}

impl IconCategory {
    pub fn new(label: &str, source_glob: &str) -> Self {
        Self {
            label: label.to_owned(),
            source_glob: source_glob.to_owned(),
            output_dir: format!("{COMPONENT_ROOT}/{label}"),
        }
    }
}

/// The icon sets shipped by upstream, in regeneration order.
pub fn default_categories() -> Vec<IconCategory> {
    vec![
        IconCategory::new("Micro", "16/solid/*.svg"),
        IconCategory::new("Mini", "20/solid/*.svg"),
        IconCategory::new("Solid", "24/solid/*.svg"),
        IconCategory::new("Outline", "24/outline/*.svg"),
    ]
}
