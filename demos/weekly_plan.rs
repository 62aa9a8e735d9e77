//! Plan a week of dinners from the bundled recipes and print the list.
//!
//! Run with `cargo run --example weekly_plan`.

use grocery_list::config::AppConfig;
use grocery_list::dietary::{badge_info, common_dietary_badges};
use grocery_list::ingredient_parser::parse_ingredient_list;
use grocery_list::recipes::RecipeBook;
use grocery_list::session::Session;
use grocery_list::store_mode::StoreLayout;

fn main() {
    env_logger::init();

    let mut session = Session::new(AppConfig::default(), RecipeBook::with_bundled(Vec::new()));

    session.select_recipe("spaghetti-bolognese", Some(6));
    session.select_recipe("vegetable-curry", None);
    session.select_recipe("greek-salad", Some(4));

    let items = session.generate_list().len();
    println!("{} items for {} recipes\n", items, session.selected_recipes().len());

    let extras = parse_ingredient_list("1 loaf sourdough bread\n2 lbs apples\n1 bunch basil, torn");
    for ingredient in extras.ingredients {
        if let Err(e) = session.add_custom_item(ingredient) {
            eprintln!("Skipping extra: {}", e);
        }
    }

    session.set_store_mode(true);
    session.set_store_layout(StoreLayout::PerimeterFirst);
    println!("{}\n", session.export_text());

    let recipes: Vec<_> = session
        .selected_recipe_details()
        .into_iter()
        .map(|(recipe, _)| recipe.clone())
        .collect();
    for badge in common_dietary_badges(&recipes) {
        let info = badge_info(badge);
        println!("{} {}", info.icon, info.label);
    }

    println!("{}", session.share_title());
    println!("{}", session.share_url("https://grocery.example/list"));
}
