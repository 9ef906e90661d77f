use crate::sync::SyncError;

/// First line of every generated component file.
pub const BASE_DECLARATION: &str = "@inherits HeroiconBase";

/// Attribute on the root `<svg>` tag marking it hidden from assistive
/// technology. Every optimized upstream SVG carries it; its absence means
/// the upstream format changed and the sync needs human review.
const ACCESSIBILITY_MARKER: &str = "aria-hidden=\"true\"";

/// Splat-attribute directive spliced in after the accessibility marker so
/// consumers can pass arbitrary attributes through to the `<svg>` element.
const ATTRIBUTE_PASSTHROUGH: &str = " @attributes=\"AdditionalAttributes\"";

/// Rewrite raw SVG text into a Razor component: the base declaration is
/// prepended and the attribute passthrough spliced in immediately after
/// the first accessibility marker. Every other byte is preserved.
pub fn render(raw_svg: &str) -> Result<String, SyncError> {
    let Some(index) = raw_svg.find(ACCESSIBILITY_MARKER) else {
        return Err(SyncError::MalformedAsset(format!(
            "no `{ACCESSIBILITY_MARKER}` marker in svg root tag"
        )));
    };
    let splice = index + ACCESSIBILITY_MARKER.len();

    let mut component = String::with_capacity(
        BASE_DECLARATION.len() + 1 + raw_svg.len() + ATTRIBUTE_PASSTHROUGH.len(),
    );
    component.push_str(BASE_DECLARATION);
    component.push('\n');
    component.push_str(&raw_svg[..splice]);
    component.push_str(ATTRIBUTE_PASSTHROUGH);
    component.push_str(&raw_svg[splice..]);

    Ok(component)
}
