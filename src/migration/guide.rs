//! Mapping-guide stage: renders the lookup tables as JSON and Markdown for
//! manual review and follow-up on unmapped terms.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::migration::MigrationError;
use crate::migration::backup::write_pretty_json;
use crate::migration::mapping::CategoryMappings;

pub const GUIDE_JSON_FILE: &str = "category-mapping-guide.json";
pub const GUIDE_MD_FILE: &str = "category-mapping-guide.md";

const INSTRUCTIONS: [&str; 4] = [
    "Subcategory mappings are authoritative and take priority over category mappings.",
    "Legacy categories without an entry keep their own name during resolution; \
     if that name does not exist in the new tree the relation is recorded as failed.",
    "Category-only matches fall back to the first subcategory of the target category.",
    "Review reassignment-failures.json after running the reassignment and relink \
     the listed prompts manually.",
];

#[derive(Serialize)]
struct MappingGuide<'a> {
    instructions: [&'a str; 4],
    #[serde(flatten)]
    mappings: &'a CategoryMappings,
}

/// Render the combined guide and write both artifacts to the backup
/// directory. This stage touches no database state.
pub fn write_mapping_guide(
    mappings: &CategoryMappings,
    backup_dir: &Path,
) -> Result<(), MigrationError> {
    fs::create_dir_all(backup_dir)?;

    let guide = MappingGuide {
        instructions: INSTRUCTIONS,
        mappings,
    };
    write_pretty_json(&backup_dir.join(GUIDE_JSON_FILE), &guide)?;
    fs::write(backup_dir.join(GUIDE_MD_FILE), render_markdown(mappings))?;

    log::info!("Wrote category mapping guide to {}", backup_dir.display());
    Ok(())
}

fn render_markdown(mappings: &CategoryMappings) -> String {
    let mut out = String::new();
    out.push_str("# Category Mapping Guide\n\n");

    out.push_str("## Category mappings\n\n");
    out.push_str("| Old category | New category |\n|---|---|\n");
    for (old, new) in &mappings.categories {
        let _ = writeln!(out, "| {old} | {new} |");
    }

    out.push_str("\n## Subcategory mappings\n\n");
    out.push_str("| Old subcategory | New category | New subcategory |\n|---|---|---|\n");
    for (old, (category, subcategory)) in &mappings.subcategories {
        let _ = writeln!(out, "| {old} | {category} | {subcategory} |");
    }

    out.push_str("\n## Manual overrides\n\n");
    for instruction in INSTRUCTIONS {
        let _ = writeln!(out, "- {instruction}");
    }

    out
}
