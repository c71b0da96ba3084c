use chrono::Utc;

use promptsouq::domain::category::{CategoryUpdate, NewCategory};
use promptsouq::domain::prompt::{NewPrompt, NewPromptCategoryLink};
use promptsouq::domain::taxonomy::default_taxonomy;
use promptsouq::domain::types::{
    CategoryId, CategoryName, CategorySlug, IconName, PromptTitle, SortOrder,
};
use promptsouq::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, DieselRepository, PromptListQuery,
    PromptReader, PromptWriter,
};

mod common;

fn new_category(name_en: &str, slug: &str, sort_order: i32, parent_id: Option<i32>) -> NewCategory {
    let now = Utc::now().naive_utc();
    NewCategory {
        name_en: CategoryName::new(name_en).expect("valid name"),
        name_ar: CategoryName::new(name_en).expect("valid name"),
        slug: CategorySlug::new(slug).expect("valid slug"),
        icon: IconName::new("pen").expect("valid icon"),
        sort_order: SortOrder::new(sort_order).expect("valid sort order"),
        parent_id: parent_id.map(|id| CategoryId::new(id).expect("valid id")),
        created_at: now,
        updated_at: now,
    }
}

fn new_prompt(title_en: &str) -> NewPrompt {
    let now = Utc::now().naive_utc();
    NewPrompt {
        title_en: PromptTitle::new(title_en).expect("valid title"),
        title_ar: PromptTitle::new("عنوان").expect("valid title"),
        description_en: "A description".to_string(),
        description_ar: "وصف".to_string(),
        instructions_en: "How to use".to_string(),
        instructions_ar: "طريقة الاستخدام".to_string(),
        content_en: "Prompt body".to_string(),
        content_ar: "نص الموجه".to_string(),
        is_pro: false,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn create_list_and_update_categories() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let second = repo
        .create_category(&new_category("Marketing", "marketing", 2, None))
        .expect("should create category");
    let first = repo
        .create_category(&new_category("Writing", "writing", 1, None))
        .expect("should create category");

    let (total, categories) = repo
        .list_categories(CategoryListQuery::new().top_level())
        .expect("should list categories");
    assert_eq!(total, 2);
    assert_eq!(categories[0].id, first.id);
    assert_eq!(categories[1].id, second.id);

    repo.update_category(
        first.id,
        &CategoryUpdate {
            name_en: CategoryName::new("Writing & Editing").unwrap(),
            name_ar: CategoryName::new("الكتابة والتحرير").unwrap(),
            icon: IconName::new("feather").unwrap(),
            sort_order: SortOrder::new(5).unwrap(),
        },
    )
    .expect("should update category");

    let updated = repo
        .get_category_by_id(first.id)
        .expect("should fetch category")
        .expect("category should exist");
    assert_eq!(updated.name_en.as_str(), "Writing & Editing");
    assert_eq!(updated.sort_order.get(), 5);
}

#[test]
fn rejects_grandchild_categories() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let parent = repo
        .create_category(&new_category("Writing", "writing", 1, None))
        .expect("should create parent");
    let child = repo
        .create_category(&new_category("Blog", "blog", 0, Some(parent.id.get())))
        .expect("should create child");

    let grandchild = repo.create_category(&new_category(
        "Nested",
        "nested",
        0,
        Some(child.id.get()),
    ));
    assert!(grandchild.is_err());
}

#[test]
fn reorder_changes_sibling_listing_order() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let a = repo
        .create_category(&new_category("Writing", "writing", 1, None))
        .expect("should create category");
    let b = repo
        .create_category(&new_category("Marketing", "marketing", 2, None))
        .expect("should create category");

    repo.reorder_categories(&[
        (a.id, SortOrder::new(2).unwrap()),
        (b.id, SortOrder::new(1).unwrap()),
    ])
    .expect("should reorder");

    let (_, categories) = repo
        .list_categories(CategoryListQuery::new().top_level())
        .expect("should list categories");
    assert_eq!(categories[0].id, b.id);
    assert_eq!(categories[1].id, a.id);
}

#[test]
fn duplicate_prompt_links_are_collapsed() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let parent = repo
        .create_category(&new_category("Writing", "writing", 1, None))
        .expect("should create parent");
    let child = repo
        .create_category(&new_category("Blog", "blog", 0, Some(parent.id.get())))
        .expect("should create child");
    let prompt = repo
        .create_prompt(&new_prompt("Blog post outline"))
        .expect("should create prompt");

    let link = NewPromptCategoryLink {
        prompt_id: prompt.id,
        category_id: parent.id,
        subcategory_id: child.id,
    };
    assert_eq!(repo.link_prompt_category(&link).unwrap(), 1);
    assert_eq!(repo.link_prompt_category(&link).unwrap(), 0);

    let entries = repo
        .list_prompts_with_categories()
        .expect("should load prompts with categories");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].categories.len(), 1);
    assert_eq!(entries[0].categories[0].category.name_en.as_str(), "Writing");
}

#[test]
fn list_prompts_filters_by_category_and_search() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let parent = repo
        .create_category(&new_category("Writing", "writing", 1, None))
        .expect("should create parent");
    let child = repo
        .create_category(&new_category("Blog", "blog", 0, Some(parent.id.get())))
        .expect("should create child");

    let linked = repo
        .create_prompt(&new_prompt("Blog post outline"))
        .expect("should create prompt");
    repo.create_prompt(&new_prompt("Workout plan"))
        .expect("should create prompt");
    repo.link_prompt_category(&NewPromptCategoryLink {
        prompt_id: linked.id,
        category_id: parent.id,
        subcategory_id: child.id,
    })
    .expect("should link prompt");

    let (total, prompts) = repo
        .list_prompts(PromptListQuery::new().category(parent.id))
        .expect("should list prompts");
    assert_eq!(total, 1);
    assert_eq!(prompts[0].id, linked.id);

    let (total, prompts) = repo
        .list_prompts(PromptListQuery::new().search("blog"))
        .expect("should search prompts");
    assert_eq!(total, 1);
    assert_eq!(prompts[0].title_en.as_str(), "Blog post outline");
}

#[test]
fn record_usage_increments_counter() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let prompt = repo
        .create_prompt(&new_prompt("Blog post outline"))
        .expect("should create prompt");
    assert_eq!(prompt.usage_count.get(), 0);

    repo.record_prompt_usage(prompt.id)
        .expect("should record usage");
    repo.record_prompt_usage(prompt.id)
        .expect("should record usage");

    let reloaded = repo
        .get_prompt_by_id(prompt.id)
        .expect("should fetch prompt")
        .expect("prompt should exist");
    assert_eq!(reloaded.usage_count.get(), 2);
}

#[test]
fn delete_category_removes_children_and_links() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let parent = repo
        .create_category(&new_category("Writing", "writing", 1, None))
        .expect("should create parent");
    let child = repo
        .create_category(&new_category("Blog", "blog", 0, Some(parent.id.get())))
        .expect("should create child");
    let prompt = repo
        .create_prompt(&new_prompt("Blog post outline"))
        .expect("should create prompt");
    repo.link_prompt_category(&NewPromptCategoryLink {
        prompt_id: prompt.id,
        category_id: parent.id,
        subcategory_id: child.id,
    })
    .expect("should link prompt");

    let deleted = repo
        .delete_category(parent.id)
        .expect("should delete category");
    assert_eq!(deleted, 2);

    assert_eq!(repo.count_categories().unwrap(), 0);
    let entries = repo
        .list_prompts_with_categories()
        .expect("should load prompts with categories");
    assert_eq!(entries.len(), 1);
    assert!(entries[0].categories.is_empty());
}

#[test]
fn seed_refuses_non_empty_taxonomy() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.create_category(&new_category("Writing", "writing", 1, None))
        .expect("should create category");

    let result = repo.seed_taxonomy(&default_taxonomy());
    assert!(result.is_err());
}

#[test]
fn seed_populates_the_defined_tree() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let taxonomy = default_taxonomy();
    let seeded = repo.seed_taxonomy(&taxonomy).expect("should seed taxonomy");

    assert_eq!(seeded.categories_created, taxonomy.len());
    let expected_subcategories: usize =
        taxonomy.iter().map(|c| c.subcategories.len()).sum();
    assert_eq!(seeded.subcategories_created, expected_subcategories);

    let tree = repo.category_tree().expect("should load tree");
    assert_eq!(tree.len(), taxonomy.len());
    for (node, definition) in tree.iter().zip(&taxonomy) {
        assert_eq!(node.category.name_en.as_str(), definition.name_en);
        assert_eq!(node.children.len(), definition.subcategories.len());
        for child in &node.children {
            assert_eq!(child.parent_id, Some(node.category.id));
        }
    }
}
