use crate::error::ValidationReport;
use crate::types::de::is_non_empty;
use crate::types::RecipeCardBlock;

/// Validates every recipe card in `recipeBlocks`.
///
/// Checks, per block:
/// - `title` and `servings` are non-blank
/// - `ingredients` is non-empty and each row has a `quantity` and an `item`
/// - `steps` is non-empty and each step has an `instruction`
pub fn validate_recipe_blocks(blocks: &[RecipeCardBlock]) -> ValidationReport {
    let mut report = ValidationReport::new();

    for (block_index, block) in blocks.iter().enumerate() {
        let base = format!("recipeBlocks.{block_index}");

        if !is_non_empty(block.title.as_deref()) {
            report.issue(format!("{base}.title"), "Recipe card title is required.");
        }

        if !is_non_empty(block.servings.as_deref()) {
            report.issue(format!("{base}.servings"), "Recipe servings are required.");
        }

        if block.ingredients.is_empty() {
            report.issue(format!("{base}.ingredients"), "Add at least one ingredient.");
        }

        for (i, ingredient) in block.ingredients.iter().enumerate() {
            if !is_non_empty(ingredient.quantity.as_deref()) {
                report.issue(
                    format!("{base}.ingredients.{i}.quantity"),
                    "Ingredient quantity is required.",
                );
            }
            if !is_non_empty(ingredient.item.as_deref()) {
                report.issue(
                    format!("{base}.ingredients.{i}.item"),
                    "Ingredient name is required.",
                );
            }
        }

        if block.steps.is_empty() {
            report.issue(format!("{base}.steps"), "Add at least one preparation step.");
        }

        for (i, step) in block.steps.iter().enumerate() {
            if !is_non_empty(step.instruction.as_deref()) {
                report.issue(
                    format!("{base}.steps.{i}.instruction"),
                    "Step instruction is required.",
                );
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Ingredient, RecipeStep};

    fn complete_card() -> RecipeCardBlock {
        RecipeCardBlock {
            title: Some("Brownies".into()),
            servings: Some("Serves 8".into()),
            ingredients: vec![Ingredient::new("200 g", "dark chocolate")],
            steps: vec![RecipeStep::new("Melt the chocolate.")],
            ..Default::default()
        }
    }

    #[test]
    fn complete_card_passes() {
        assert!(validate_recipe_blocks(&[complete_card()]).is_empty());
    }

    #[test]
    fn empty_lists_yield_exactly_two_issues() {
        let card = RecipeCardBlock {
            ingredients: vec![],
            steps: vec![],
            ..complete_card()
        };
        let report = validate_recipe_blocks(&[complete_card(), card]);
        assert_eq!(
            report.paths(),
            vec!["recipeBlocks.1.ingredients", "recipeBlocks.1.steps"]
        );
    }

    #[test]
    fn ingredient_rows_are_checked_individually() {
        let card = RecipeCardBlock {
            ingredients: vec![
                Ingredient::new("1 tsp", "salt"),
                Ingredient {
                    quantity: Some(" ".into()),
                    item: None,
                    notes: Some("optional".into()),
                },
            ],
            ..complete_card()
        };
        let report = validate_recipe_blocks(&[card]);
        assert_eq!(
            report.paths(),
            vec![
                "recipeBlocks.0.ingredients.1.quantity",
                "recipeBlocks.0.ingredients.1.item"
            ]
        );
        assert_eq!(report.issues[1].message, "Ingredient name is required.");
    }

    #[test]
    fn blank_title_servings_and_step() {
        let card = RecipeCardBlock {
            title: Some("".into()),
            servings: None,
            steps: vec![RecipeStep::default()],
            ..complete_card()
        };
        let report = validate_recipe_blocks(&[card]);
        assert_eq!(
            report.paths(),
            vec![
                "recipeBlocks.0.title",
                "recipeBlocks.0.servings",
                "recipeBlocks.0.steps.0.instruction"
            ]
        );
    }
}
