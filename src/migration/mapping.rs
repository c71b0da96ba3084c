//! Name-based lookup tables translating legacy taxonomy terms into the new
//! tree. The tables are versioned with the code and immutable at runtime;
//! they are passed into the reassignment stage explicitly so tests can run
//! against alternate tables.

use std::collections::BTreeMap;

use serde::Serialize;

/// The two lookup tables driving reassignment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryMappings {
    /// Legacy category name → new category name.
    pub categories: BTreeMap<String, String>,
    /// Legacy subcategory name → (new category name, new subcategory name).
    /// More specific than the category table, so it takes priority.
    pub subcategories: BTreeMap<String, (String, String)>,
}

impl CategoryMappings {
    /// Translate a legacy category name, falling back to the name itself
    /// when no entry exists; the category table is best-effort.
    pub fn map_category<'a>(&'a self, old_name: &'a str) -> &'a str {
        self.categories
            .get(old_name)
            .map(String::as_str)
            .unwrap_or(old_name)
    }

    /// Look up the authoritative mapping for a legacy subcategory name.
    pub fn map_subcategory(&self, old_name: &str) -> Option<(&str, &str)> {
        self.subcategories
            .get(old_name)
            .map(|(category, subcategory)| (category.as_str(), subcategory.as_str()))
    }

    /// The tables used for the 2026 taxonomy reorganization.
    pub fn legacy() -> Self {
        let categories = [
            ("Content Creation", "Writing"),
            ("Copywriting", "Writing"),
            ("Social Media", "Marketing"),
            ("Digital Marketing", "Marketing"),
            ("Programming", "Development"),
            ("Coding", "Development"),
            ("Graphics", "Design"),
            ("Art & Design", "Design"),
            ("Business Tools", "Business"),
            ("Entrepreneurship", "Business"),
            ("Learning", "Education"),
            ("Teaching", "Education"),
            ("Personal Assistant", "Productivity"),
            ("Time Management", "Productivity"),
        ]
        .into_iter()
        .map(|(old, new)| (old.to_string(), new.to_string()))
        .collect();

        let subcategories = [
            ("Blog Writing", ("Writing", "Blog & Articles")),
            ("Article Writing", ("Writing", "Blog & Articles")),
            ("Ad Copy", ("Writing", "Copywriting")),
            ("Storytelling", ("Writing", "Creative Writing")),
            ("Translation", ("Writing", "Translation & Localization")),
            ("Instagram Posts", ("Marketing", "Social Media")),
            ("Twitter Threads", ("Marketing", "Social Media")),
            ("Email Newsletters", ("Marketing", "Email Campaigns")),
            ("Cold Emails", ("Marketing", "Email Campaigns")),
            ("SEO Articles", ("Marketing", "SEO & Content Strategy")),
            ("Facebook Ads", ("Marketing", "Advertising")),
            ("Code Snippets", ("Development", "Code Generation")),
            ("Debugging Help", ("Development", "Code Review & Debugging")),
            ("SQL Queries", ("Development", "Data & Databases")),
            ("Midjourney Prompts", ("Design", "Image Generation")),
            ("Logo Ideas", ("Design", "General Design")),
            ("Business Plans", ("Business", "Strategy & Planning")),
            ("Pitch Decks", ("Business", "Strategy & Planning")),
            ("Sales Scripts", ("Business", "Sales & Outreach")),
            ("Resume Writing", ("Business", "Careers & Resumes")),
            ("Lesson Plans", ("Education", "Lesson Planning")),
            ("Homework Help", ("Education", "Study & Research")),
            ("Meeting Summaries", ("Productivity", "Summarization")),
            ("Idea Generation", ("Productivity", "Brainstorming")),
        ]
        .into_iter()
        .map(|(old, (category, subcategory))| {
            (
                old.to_string(),
                (category.to_string(), subcategory.to_string()),
            )
        })
        .collect();

        Self {
            categories,
            subcategories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_category_translates() {
        let mappings = CategoryMappings::legacy();
        assert_eq!(mappings.map_category("Content Creation"), "Writing");
    }

    #[test]
    fn unmapped_category_falls_back_to_itself() {
        let mappings = CategoryMappings::legacy();
        assert_eq!(
            mappings.map_category("Obscure Legacy Topic"),
            "Obscure Legacy Topic"
        );
    }

    #[test]
    fn subcategory_mapping_yields_category_and_subcategory() {
        let mappings = CategoryMappings::legacy();
        assert_eq!(
            mappings.map_subcategory("Blog Writing"),
            Some(("Writing", "Blog & Articles"))
        );
        assert_eq!(mappings.map_subcategory("Totally Unknown"), None);
    }
}
