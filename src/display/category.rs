//! Category display formatting

use crate::models::Category;

/// Format the category list, defaults first, marking custom labels
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let mut output = String::from("Categories:\n");
    for category in categories {
        let marker = if category.is_income() {
            " (income)"
        } else if !category.is_default() {
            " (custom)"
        } else {
            ""
        };
        output.push_str(&format!("  {}{}\n", category, marker));
    }

    let custom = categories.iter().filter(|c| !c.is_default()).count();
    if custom == 0 {
        output.push_str("\nAdd your own with 'spendwise category add <NAME>'.\n");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_category_list() {
        let mut categories = Category::defaults();
        categories.push(Category::new("Pets"));

        let output = format_category_list(&categories);
        assert!(output.contains("  Food\n"));
        assert!(output.contains("Income (income)"));
        assert!(output.contains("Pets (custom)"));
        assert!(!output.contains("spendwise category add"));
    }

    #[test]
    fn test_hint_without_custom_categories() {
        let output = format_category_list(&Category::defaults());
        assert!(output.contains("spendwise category add"));
    }
}
