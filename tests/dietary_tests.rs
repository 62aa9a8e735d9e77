use grocery_list::dietary::{common_dietary_badges, detect_dietary_badges, recipe_badges};
use grocery_list::ingredient_model::{DietaryBadge, Ingredient};
use grocery_list::recipes::bundled_recipes;

fn find(id: &str) -> grocery_list::ingredient_model::Recipe {
    bundled_recipes()
        .into_iter()
        .find(|recipe| recipe.id == id)
        .unwrap_or_else(|| panic!("bundled recipe {} missing", id))
}

#[test]
fn test_vegan_implies_vegetarian_for_bundled_recipes() {
    for recipe in bundled_recipes() {
        let badges = recipe_badges(&recipe);
        if badges.contains(&DietaryBadge::Vegan) {
            assert!(badges.contains(&DietaryBadge::Vegetarian), "{} is vegan but not vegetarian", recipe.id);
        }
    }
}

#[test]
fn test_bundled_recipe_badges() {
    let tacos = recipe_badges(&find("black-bean-tacos"));
    assert_eq!(tacos, DietaryBadge::ALL.to_vec());

    let bolognese = recipe_badges(&find("spaghetti-bolognese"));
    assert!(!bolognese.contains(&DietaryBadge::Vegetarian));
    assert!(!bolognese.contains(&DietaryBadge::GlutenFree));
    assert!(!bolognese.contains(&DietaryBadge::DairyFree));

    let pancakes = recipe_badges(&find("banana-pancakes"));
    assert_eq!(pancakes, vec![DietaryBadge::Vegetarian, DietaryBadge::NutFree]);
}

#[test]
fn test_common_badges_across_plan() {
    let plan = vec![find("greek-salad"), find("vegetable-curry")];
    let common = common_dietary_badges(&plan);

    assert!(common.contains(&DietaryBadge::Vegetarian));
    assert!(!common.contains(&DietaryBadge::Vegan));
    assert!(!common.contains(&DietaryBadge::DairyFree));

    assert!(common_dietary_badges(&[]).is_empty());
}

#[test]
fn test_matching_ignores_case_and_padding() {
    let badges = detect_dietary_badges(&[Ingredient::new("  Fresh SALMON Fillet ", 1.0, "item")]);
    assert!(!badges.contains(&DietaryBadge::Vegetarian));
    assert!(badges.contains(&DietaryBadge::GlutenFree));
}
