//! The fixed two-level taxonomy definition seeded by the migration pipeline.
//!
//! Entries are plain data; constraints are checked by [`validate_taxonomy`]
//! before any row is written. Every top-level category leads with its
//! canonical general-purpose bucket so the reassignment fallback ("first
//! subcategory in creation order") lands somewhere deliberate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{CategorySlug, TypeConstraintError};

/// A subcategory entry in the taxonomy definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaxonomySubcategory {
    pub name_en: String,
    pub name_ar: String,
    pub slug: String,
    pub icon: String,
}

/// A top-level entry in the taxonomy definition with its ordered
/// subcategories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaxonomyCategory {
    pub name_en: String,
    pub name_ar: String,
    pub slug: String,
    pub icon: String,
    pub sort_order: i32,
    pub subcategories: Vec<TaxonomySubcategory>,
}

/// Row counts produced by the destructive reset.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct TaxonomyReset {
    pub links_deleted: usize,
    pub categories_deleted: usize,
}

/// Row counts produced by seeding the taxonomy.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct TaxonomySeed {
    pub categories_created: usize,
    pub subcategories_created: usize,
}

/// Combined outcome of an atomic reset-and-reseed.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct TaxonomyReplaceSummary {
    pub reset: TaxonomyReset,
    pub seeded: TaxonomySeed,
}

/// Errors raised when a taxonomy definition violates its invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("taxonomy definition is empty")]
    Empty,
    #[error("category '{0}' has no subcategories")]
    MissingSubcategories(String),
    #[error("duplicate slug '{0}' in taxonomy definition")]
    DuplicateSlug(String),
    #[error("duplicate English name '{0}' in taxonomy definition")]
    DuplicateName(String),
    #[error(transparent)]
    Constraint(#[from] TypeConstraintError),
}

/// Check the invariants of a taxonomy definition: at least one category,
/// at least one subcategory per category, well-formed unique slugs, and
/// names that are unique where the reassignment index requires it (top-level
/// names globally, subcategory names per parent).
pub fn validate_taxonomy(taxonomy: &[TaxonomyCategory]) -> Result<(), TaxonomyError> {
    use std::collections::HashSet;

    if taxonomy.is_empty() {
        return Err(TaxonomyError::Empty);
    }

    let mut slugs = HashSet::new();
    let mut names = HashSet::new();
    for category in taxonomy {
        if category.subcategories.is_empty() {
            return Err(TaxonomyError::MissingSubcategories(category.name_en.clone()));
        }
        CategorySlug::new(category.slug.as_str())?;
        if !slugs.insert(category.slug.as_str()) {
            return Err(TaxonomyError::DuplicateSlug(category.slug.clone()));
        }
        if !names.insert(category.name_en.as_str()) {
            return Err(TaxonomyError::DuplicateName(category.name_en.clone()));
        }

        let mut child_names = HashSet::new();
        for subcategory in &category.subcategories {
            CategorySlug::new(subcategory.slug.as_str())?;
            if !slugs.insert(subcategory.slug.as_str()) {
                return Err(TaxonomyError::DuplicateSlug(subcategory.slug.clone()));
            }
            if !child_names.insert(subcategory.name_en.as_str()) {
                return Err(TaxonomyError::DuplicateName(subcategory.name_en.clone()));
            }
        }
    }

    Ok(())
}

fn subcategory(name_en: &str, name_ar: &str, slug: &str, icon: &str) -> TaxonomySubcategory {
    TaxonomySubcategory {
        name_en: name_en.to_string(),
        name_ar: name_ar.to_string(),
        slug: slug.to_string(),
        icon: icon.to_string(),
    }
}

/// The canonical taxonomy seeded by the migration. The first subcategory of
/// every category is its default bucket for category-only reassignment.
pub fn default_taxonomy() -> Vec<TaxonomyCategory> {
    vec![
        TaxonomyCategory {
            name_en: "Writing".to_string(),
            name_ar: "الكتابة".to_string(),
            slug: "writing".to_string(),
            icon: "pen".to_string(),
            sort_order: 1,
            subcategories: vec![
                subcategory("General Writing", "كتابة عامة", "general-writing", "pen"),
                subcategory(
                    "Blog & Articles",
                    "المدونات والمقالات",
                    "blog-articles",
                    "newspaper",
                ),
                subcategory("Copywriting", "كتابة الإعلانات", "copywriting", "sparkles"),
                subcategory(
                    "Creative Writing",
                    "الكتابة الإبداعية",
                    "creative-writing",
                    "feather",
                ),
                subcategory(
                    "Translation & Localization",
                    "الترجمة والتعريب",
                    "translation-localization",
                    "languages",
                ),
            ],
        },
        TaxonomyCategory {
            name_en: "Marketing".to_string(),
            name_ar: "التسويق".to_string(),
            slug: "marketing".to_string(),
            icon: "megaphone".to_string(),
            sort_order: 2,
            subcategories: vec![
                subcategory(
                    "General Marketing",
                    "تسويق عام",
                    "general-marketing",
                    "megaphone",
                ),
                subcategory(
                    "Social Media",
                    "وسائل التواصل الاجتماعي",
                    "social-media",
                    "share",
                ),
                subcategory(
                    "Email Campaigns",
                    "حملات البريد الإلكتروني",
                    "email-campaigns",
                    "mail",
                ),
                subcategory(
                    "SEO & Content Strategy",
                    "تحسين محركات البحث واستراتيجية المحتوى",
                    "seo-content-strategy",
                    "trending-up",
                ),
                subcategory("Advertising", "الإعلانات", "advertising", "target"),
            ],
        },
        TaxonomyCategory {
            name_en: "Development".to_string(),
            name_ar: "التطوير".to_string(),
            slug: "development".to_string(),
            icon: "code".to_string(),
            sort_order: 3,
            subcategories: vec![
                subcategory(
                    "General Development",
                    "تطوير عام",
                    "general-development",
                    "code",
                ),
                subcategory(
                    "Code Generation",
                    "توليد الأكواد",
                    "code-generation",
                    "terminal",
                ),
                subcategory(
                    "Code Review & Debugging",
                    "مراجعة الأكواد وتصحيحها",
                    "code-review-debugging",
                    "bug",
                ),
                subcategory(
                    "Data & Databases",
                    "البيانات وقواعد البيانات",
                    "data-databases",
                    "database",
                ),
            ],
        },
        TaxonomyCategory {
            name_en: "Design".to_string(),
            name_ar: "التصميم".to_string(),
            slug: "design".to_string(),
            icon: "palette".to_string(),
            sort_order: 4,
            subcategories: vec![
                subcategory("General Design", "تصميم عام", "general-design", "palette"),
                subcategory(
                    "Image Generation",
                    "توليد الصور",
                    "image-generation",
                    "image",
                ),
                subcategory("UI & UX", "واجهات وتجربة المستخدم", "ui-ux", "layout"),
            ],
        },
        TaxonomyCategory {
            name_en: "Business".to_string(),
            name_ar: "الأعمال".to_string(),
            slug: "business".to_string(),
            icon: "briefcase".to_string(),
            sort_order: 5,
            subcategories: vec![
                subcategory(
                    "General Business",
                    "أعمال عامة",
                    "general-business",
                    "briefcase",
                ),
                subcategory(
                    "Strategy & Planning",
                    "الاستراتيجية والتخطيط",
                    "strategy-planning",
                    "map",
                ),
                subcategory(
                    "Sales & Outreach",
                    "المبيعات والتواصل",
                    "sales-outreach",
                    "handshake",
                ),
                subcategory(
                    "Careers & Resumes",
                    "الوظائف والسير الذاتية",
                    "careers-resumes",
                    "file-text",
                ),
            ],
        },
        TaxonomyCategory {
            name_en: "Education".to_string(),
            name_ar: "التعليم".to_string(),
            slug: "education".to_string(),
            icon: "book".to_string(),
            sort_order: 6,
            subcategories: vec![
                subcategory(
                    "General Education",
                    "تعليم عام",
                    "general-education",
                    "book",
                ),
                subcategory(
                    "Lesson Planning",
                    "تخطيط الدروس",
                    "lesson-planning",
                    "clipboard",
                ),
                subcategory(
                    "Study & Research",
                    "الدراسة والبحث",
                    "study-research",
                    "search",
                ),
            ],
        },
        TaxonomyCategory {
            name_en: "Productivity".to_string(),
            name_ar: "الإنتاجية".to_string(),
            slug: "productivity".to_string(),
            icon: "clock".to_string(),
            sort_order: 7,
            subcategories: vec![
                subcategory(
                    "General Productivity",
                    "إنتاجية عامة",
                    "general-productivity",
                    "clock",
                ),
                subcategory("Summarization", "التلخيص", "summarization", "list"),
                subcategory("Brainstorming", "العصف الذهني", "brainstorming", "zap"),
            ],
        },
    ]
}
