//! Catalog Grouping

use crate::catalog::Product;

/// Known categories in display-priority order; anything else sorts after
/// these, by label.
const PRIORITY: [&str; 4] = ["Strollers", "Sleeping Cot", "Car Seats", "High Chairs"];

/// Label used for products without a category.
const UNCATEGORISED: &str = "Other";

/// One category of products, ordered for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    /// Category label as it appears in the catalog.
    pub label: &'a str,

    /// Products in the category, ordered by case-insensitive name.
    pub products: Vec<&'a Product>,
}

fn rank(label: &str) -> usize {
    let label = label.trim();

    PRIORITY
        .iter()
        .position(|known| label.eq_ignore_ascii_case(known))
        .unwrap_or(PRIORITY.len())
}

/// Groups a catalog by category for display.
///
/// Products whose category is (case-insensitively) `delivery` are excluded;
/// delivery is billed as a fee, not a catalog line. Known categories come
/// first in a fixed priority order, unrecognised ones after them ordered by
/// case-insensitive label, and products within a category are ordered by
/// case-insensitive name. Grouping the same catalog twice yields the same
/// sequence.
#[must_use]
pub fn group_catalog(catalog: &[Product]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();

    for product in catalog {
        let raw = product.category.trim();

        if raw.eq_ignore_ascii_case("delivery") {
            continue;
        }

        let label = if raw.is_empty() {
            UNCATEGORISED
        } else {
            product.category.as_str()
        };

        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.products.push(product),
            None => groups.push(CategoryGroup {
                label,
                products: vec![product],
            }),
        }
    }

    for group in &mut groups {
        group.products.sort_by_key(|product| product.name.to_lowercase());
    }

    groups.sort_by(|a, b| {
        rank(a.label)
            .cmp(&rank(b.label))
            .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
    });

    groups
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::catalog::parse_catalog;

    use super::*;

    fn labels<'a>(groups: &[CategoryGroup<'a>]) -> Vec<&'a str> {
        groups.iter().map(|group| group.label).collect()
    }

    #[test]
    fn known_categories_come_first_in_priority_order() -> TestResult {
        let catalog = parse_catalog(
            r#"[
                {"id":"t1","name":"Toy Box","category":"Toys"},
                {"id":"c1","name":"Car Seat","category":"Car Seats"},
                {"id":"h1","name":"High Chair","category":"High Chairs"},
                {"id":"s1","name":"Stroller","category":"Strollers"},
                {"id":"b1","name":"Bath Seat","category":"Bath"}
            ]"#,
        )?;

        let groups = group_catalog(&catalog);

        assert_eq!(
            labels(&groups),
            vec!["Strollers", "Car Seats", "High Chairs", "Bath", "Toys"]
        );

        Ok(())
    }

    #[test]
    fn delivery_category_is_excluded() -> TestResult {
        let catalog = parse_catalog(
            r#"[
                {"id":"d1","name":"Zone 1","category":"Delivery"},
                {"id":"d2","name":"Zone 2","category":"delivery"},
                {"id":"s1","name":"Stroller","category":"Strollers"}
            ]"#,
        )?;

        let groups = group_catalog(&catalog);

        assert_eq!(labels(&groups), vec!["Strollers"]);

        Ok(())
    }

    #[test]
    fn products_sort_by_case_insensitive_name() -> TestResult {
        let catalog = parse_catalog(
            r#"[
                {"id":"s3","name":"yoyo","category":"Strollers"},
                {"id":"s1","name":"Bee","category":"Strollers"},
                {"id":"s2","name":"aero","category":"Strollers"}
            ]"#,
        )?;

        let groups = group_catalog(&catalog);

        let names: Vec<&str> = groups
            .iter()
            .flat_map(|group| group.products.iter().map(|p| p.name.as_str()))
            .collect();

        assert_eq!(names, vec!["aero", "Bee", "yoyo"]);

        Ok(())
    }

    #[test]
    fn missing_category_lands_in_other() -> TestResult {
        let catalog = parse_catalog(r#"[{"id":"m1","name":"Monitor"}]"#)?;

        let groups = group_catalog(&catalog);

        assert_eq!(labels(&groups), vec!["Other"]);

        Ok(())
    }

    #[test]
    fn grouping_is_deterministic_and_idempotent() -> TestResult {
        let catalog = parse_catalog(
            r#"[
                {"id":"a","name":"Cot","category":"Sleeping Cot"},
                {"id":"b","name":"Stroller B","category":"Strollers"},
                {"id":"c","name":"Stroller A","category":"Strollers"},
                {"id":"d","name":"Backpack","category":"Carriers"},
                {"id":"e","name":"Wrap","category":"carriers"}
            ]"#,
        )?;

        let first = group_catalog(&catalog);
        let second = group_catalog(&catalog);

        assert_eq!(first, second);

        let flattened: Vec<&str> = first
            .iter()
            .flat_map(|group| group.products.iter().map(|p| p.id.as_str()))
            .collect();

        assert_eq!(flattened, vec!["c", "b", "a", "d", "e"]);

        Ok(())
    }
}
