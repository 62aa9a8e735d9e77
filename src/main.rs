use anyhow::{bail, Context, Result};
use grocery_list::config::AppConfig;
use grocery_list::dietary::{badge_info, recipe_badges};
use grocery_list::ingredient_parser::parse_ingredient_line;
use grocery_list::session::Session;
use grocery_list::storage::JsonFileStore;
use log::info;

mod cli;

use cli::Command;

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    env_logger::init();

    let args = cli::parse_args();

    let mut config = AppConfig::from_env();
    if let Some(dir) = args.data_dir {
        config = config.with_data_dir(dir);
    }

    info!("Opening session in {}", config.data_dir.display());
    let mut store = JsonFileStore::open(&config.data_dir)?;
    let mut session = Session::load(config, &store);

    run(&mut session, args.command)?;

    session
        .save(&mut store)
        .context("Failed to save session")?;
    Ok(())
}

fn run(session: &mut Session, command: Command) -> Result<()> {
    match command {
        Command::Recipes => {
            for recipe in session.recipes().all() {
                let marker = if session.is_selected(&recipe.id) { "*" } else { " " };
                let icons: Vec<&str> = recipe_badges(recipe)
                    .into_iter()
                    .map(|badge| badge_info(badge).icon)
                    .collect();
                println!(
                    "{} {:<24} {} (serves {}) {}",
                    marker,
                    recipe.id,
                    recipe.name,
                    recipe.servings_base,
                    icons.join(" ")
                );
            }
        }
        Command::Select { recipe_id, servings } => {
            if !session.select_recipe(&recipe_id, servings) {
                bail!("Unknown recipe '{}'", recipe_id);
            }
            print_selection(session);
        }
        Command::Deselect { recipe_id } => {
            if !session.remove_recipe(&recipe_id) {
                bail!("Recipe '{}' is not selected", recipe_id);
            }
            print_selection(session);
        }
        Command::Generate => {
            let count = session.generate_list().len();
            println!("Generated {} items", count);
            println!("{}", session.export_text());
        }
        Command::Show { store_mode, layout } => {
            if store_mode {
                session.set_store_mode(true);
            }
            if let Some(layout) = layout {
                session.set_store_layout(layout);
            }
            print_list(session);
        }
        Command::Check { item_id } => {
            if !session.toggle_item(&item_id) {
                bail!("No item with id '{}'", item_id);
            }
            print_list(session);
        }
        Command::Add { line } => {
            let ingredient = parse_ingredient_line(&line)
                .with_context(|| format!("Could not parse '{}'", line))?;
            let id = session.add_custom_item(ingredient)?;
            println!("Added {}", id);
        }
        Command::ClearChecked => {
            println!("Removed {} checked items", session.clear_checked());
        }
        Command::Undo => {
            if !session.undo() {
                println!("Nothing to undo");
            }
            print_list(session);
        }
        Command::Redo => {
            if !session.redo() {
                println!("Nothing to redo");
            }
            print_list(session);
        }
        Command::Share { base_url } => {
            println!("{}", session.share_text());
            println!("{}", session.share_url(&base_url));
        }
        Command::Import { link } => {
            let count = session.import_share_link(&link)?;
            if count == 0 {
                println!("Shared list is empty, nothing imported");
            } else {
                println!("Imported {} items", count);
            }
        }
        Command::Reset => {
            session.reset();
            println!("Selection and list cleared");
        }
    }

    Ok(())
}

fn print_selection(session: &Session) {
    for (recipe, servings) in session.selected_recipe_details() {
        println!("{} x{}", recipe.name, servings);
    }
}

fn print_list(session: &Session) {
    if session.grocery_list().is_empty() {
        println!("Grocery list is empty");
        return;
    }

    println!("{}", session.export_text());
    println!();
    for item in session.grocery_list() {
        println!("{:<10} {}", item.id, item);
    }
}
