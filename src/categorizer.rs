//! # Category Classifier
//!
//! Assigns an ingredient name to one store category by keyword containment.
//!
//! Keyword lists overlap ("ice cream" contains "cream", "frozen peas"
//! contains "pea"), so the result depends on the order categories are
//! checked in. That order is fixed by [`CLASSIFICATION_ORDER`]:
//! Produce, Meat, Dairy, Pantry, Frozen, Spices. Anything unmatched is
//! [`Category::Other`].

use crate::ingredient_model::Category;
use crate::normalization::clean_name;
use log::trace;

/// Order in which categories are tested. The first category with a
/// matching keyword wins.
pub const CLASSIFICATION_ORDER: [Category; 6] = [
    Category::Produce,
    Category::Meat,
    Category::Dairy,
    Category::Pantry,
    Category::Frozen,
    Category::Spices,
];

const PRODUCE_KEYWORDS: &[&str] = &[
    "onion", "garlic", "tomato", "potato", "carrot", "celery", "lettuce",
    "spinach", "kale", "broccoli", "cauliflower", "pepper", "cucumber",
    "zucchini", "squash", "mushroom", "asparagus", "green bean", "pea",
    "corn", "cabbage", "brussels", "artichoke", "beet", "radish",
    "turnip", "parsnip", "leek", "shallot", "ginger", "lemon", "lime",
    "orange", "apple", "banana", "grape", "strawberry", "blueberry",
    "raspberry", "blackberry", "mango", "pineapple", "watermelon",
    "cantaloupe", "honeydew", "avocado", "cilantro", "parsley", "basil",
    "mint", "dill", "thyme", "rosemary", "sage", "oregano", "chive",
    "scallion", "green onion", "spring onion", "bean sprout", "bok choy",
    "eggplant", "fennel", "okra", "jalapeno", "serrano", "habanero",
    "poblano", "bell pepper", "romaine", "arugula", "watercress",
    "endive", "radicchio", "escarole", "collard", "swiss chard",
    "fresh", "lemon juice", "lime juice",
];

const MEAT_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "turkey", "duck", "goose",
    "venison", "bison", "rabbit", "veal", "bacon", "ham", "sausage",
    "salami", "pepperoni", "prosciutto", "pancetta", "chorizo",
    "ground beef", "ground pork", "ground turkey", "ground chicken",
    "steak", "roast", "chop", "rib", "loin", "tenderloin", "brisket",
    "shank", "shoulder", "breast", "thigh", "drumstick", "wing",
    "fish", "salmon", "tuna", "cod", "halibut", "tilapia", "trout",
    "bass", "snapper", "mahi", "swordfish", "shrimp", "prawn",
    "crab", "lobster", "scallop", "clam", "mussel", "oyster",
    "squid", "calamari", "octopus", "anchovy",
];

const DAIRY_KEYWORDS: &[&str] = &[
    "milk", "cream", "butter", "cheese", "yogurt", "sour cream",
    "cream cheese", "cottage cheese", "ricotta", "mozzarella",
    "parmesan", "cheddar", "feta", "gouda", "brie", "camembert",
    "gruyere", "swiss", "provolone", "monterey jack", "colby",
    "american cheese", "blue cheese", "gorgonzola", "mascarpone",
    "half and half", "heavy cream", "whipping cream", "buttermilk",
    "evaporated milk", "condensed milk", "egg", "eggs",
];

const PANTRY_KEYWORDS: &[&str] = &[
    "flour", "sugar", "salt", "oil", "vinegar", "soy sauce",
    "pasta", "spaghetti", "penne", "fettuccine", "linguine", "rigatoni",
    "rice", "quinoa", "couscous", "bulgur", "barley", "oats",
    "bread", "crouton", "breadcrumb", "tortilla", "pita", "naan",
    "bean", "lentil", "chickpea", "black bean", "kidney bean",
    "cannellini", "pinto", "navy bean", "split pea",
    "tomato paste", "tomato sauce", "crushed tomato", "diced tomato",
    "broth", "stock", "bouillon", "coconut milk", "coconut cream",
    "peanut butter", "almond butter", "tahini", "honey", "maple syrup",
    "molasses", "corn syrup", "agave", "jam", "jelly", "preserve",
    "mustard", "ketchup", "mayo", "mayonnaise", "relish", "pickle",
    "olive", "caper", "anchovy paste", "worcestershire", "hot sauce",
    "sriracha", "fish sauce", "oyster sauce", "hoisin", "teriyaki",
    "soy", "tamari", "miso", "sake", "mirin", "rice wine",
    "balsamic", "red wine vinegar", "white wine vinegar", "apple cider",
    "nut", "almond", "walnut", "pecan", "cashew", "peanut", "pistachio",
    "seed", "sesame", "sunflower", "pumpkin seed", "flax", "chia",
    "cornstarch", "baking powder", "baking soda", "yeast", "gelatin",
    "vanilla", "cocoa", "chocolate", "chip", "raisin", "dried fruit",
    "cereal", "granola", "cracker", "pretzel", "popcorn",
    "taco shell", "tortilla chip", "salsa", "guacamole",
    "brown sugar", "powdered sugar", "white sugar", "cane sugar",
    "vegetable oil", "canola oil", "olive oil", "sesame oil", "coconut oil",
    "peanut oil", "avocado oil", "grapeseed oil", "sunflower oil",
    "tamarind", "arborio", "jasmine rice", "basmati", "white wine",
    "red wine", "marsala", "sherry",
];

const FROZEN_KEYWORDS: &[&str] = &[
    "frozen", "ice cream", "sorbet", "gelato", "popsicle",
    "frozen vegetable", "frozen fruit", "frozen berry",
    "frozen pizza", "frozen dinner", "frozen meal",
    "frozen pea", "frozen corn", "frozen spinach",
    "ice", "frozen yogurt",
];

const SPICES_KEYWORDS: &[&str] = &[
    "cumin", "coriander", "paprika", "chili powder", "cayenne",
    "cinnamon", "nutmeg", "clove", "allspice", "cardamom", "ginger powder",
    "turmeric", "curry", "garam masala", "five spice", "za'atar",
    "oregano", "basil", "thyme", "rosemary", "sage", "marjoram",
    "tarragon", "dill", "bay leaf", "fennel seed", "caraway",
    "mustard seed", "celery seed", "poppy seed", "sesame seed",
    "black pepper", "white pepper", "pink pepper", "szechuan pepper",
    "red pepper flake", "crushed red pepper", "chili flake",
    "garlic powder", "onion powder", "smoked paprika", "ancho",
    "chipotle", "adobo", "jerk", "cajun", "creole", "old bay",
    "italian seasoning", "herbs de provence", "poultry seasoning",
    "pumpkin pie spice", "apple pie spice", "chai spice",
    "vanilla extract", "almond extract", "peppermint extract",
    "dried oregano", "dried basil", "dried thyme", "dried dill",
    "dried parsley", "dried rosemary", "dried sage", "dried mint",
    "saffron", "sumac", "fenugreek", "asafoetida", "nigella",
    "star anise", "juniper", "lavender", "lemongrass",
    "salt", "kosher salt", "sea salt", "flaky salt", "finishing salt",
    "msg", "seasoning", "spice blend", "rub", "marinade",
];

/// Keyword list for a category; `Other` has none
pub fn category_keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Produce => PRODUCE_KEYWORDS,
        Category::Meat => MEAT_KEYWORDS,
        Category::Dairy => DAIRY_KEYWORDS,
        Category::Pantry => PANTRY_KEYWORDS,
        Category::Frozen => FROZEN_KEYWORDS,
        Category::Spices => SPICES_KEYWORDS,
        Category::Other => &[],
    }
}

/// Detect the store category of an ingredient name
///
/// # Examples
///
/// ```rust
/// use grocery_list::categorizer::detect_category;
/// use grocery_list::ingredient_model::Category;
///
/// assert_eq!(detect_category("Ground Cumin"), Category::Spices);
/// assert_eq!(detect_category("mystery item"), Category::Other);
/// ```
pub fn detect_category(name: &str) -> Category {
    let cleaned = clean_name(name);

    for category in CLASSIFICATION_ORDER {
        if let Some(keyword) = category_keywords(category)
            .iter()
            .find(|keyword| cleaned.contains(*keyword))
        {
            trace!("Classified '{}' as {} via keyword '{}'", cleaned, category, keyword);
            return category;
        }
    }

    Category::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_categories() {
        assert_eq!(detect_category("yellow onion"), Category::Produce);
        assert_eq!(detect_category("chicken"), Category::Meat);
        assert_eq!(detect_category("cheddar cheese"), Category::Dairy);
        assert_eq!(detect_category("olive oil"), Category::Pantry);
        assert_eq!(detect_category("sorbet"), Category::Frozen);
        assert_eq!(detect_category("ground cumin"), Category::Spices);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(detect_category("  SPINACH "), Category::Produce);
        assert_eq!(detect_category("Salmon Fillet"), Category::Meat);
    }

    #[test]
    fn test_unmatched_is_other() {
        assert_eq!(detect_category("mystery item"), Category::Other);
        assert_eq!(detect_category(""), Category::Other);
    }

    #[test]
    fn test_classification_order_is_pinned() {
        assert_eq!(
            CLASSIFICATION_ORDER,
            [
                Category::Produce,
                Category::Meat,
                Category::Dairy,
                Category::Pantry,
                Category::Frozen,
                Category::Spices,
            ]
        );
    }

    #[test]
    fn test_overlapping_keywords_follow_order() {
        // "cream" (Dairy) is checked before "ice cream" (Frozen)
        assert_eq!(detect_category("vanilla ice cream"), Category::Dairy);
        // "pea" (Produce) is checked before "frozen pea" (Frozen)
        assert_eq!(detect_category("frozen peas"), Category::Produce);
        // "lemon" (Produce) wins over Pantry entries
        assert_eq!(detect_category("lemon juice"), Category::Produce);
        // "salt" is listed in both Pantry and Spices
        assert_eq!(detect_category("salt"), Category::Pantry);
        // "milk" (Dairy) is checked before "coconut milk" (Pantry)
        assert_eq!(detect_category("coconut milk"), Category::Dairy);
    }

    #[test]
    fn test_substring_matching_not_whole_word() {
        assert_eq!(detect_category("buttermilk"), Category::Dairy);
        assert_eq!(detect_category("sorbetto"), Category::Frozen);
    }

    #[test]
    fn test_other_has_no_keywords() {
        assert!(category_keywords(Category::Other).is_empty());
        for category in CLASSIFICATION_ORDER {
            assert!(!category_keywords(category).is_empty());
        }
    }
}
