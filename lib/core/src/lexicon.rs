//! Static reference tables: nationality adjectivals, the ingredient→cuisine
//! mapping used by the classifier, and the word lists consumed by the
//! ingredient-line parser.  All consumed read-only.

/// Nationality adjectives that double as cuisine names, in canonical
/// capitalization.  Title/description tokens are matched against these
/// case-insensitively.
pub const ADJECTIVALS: &[&str] = &[
    "American",
    "Brazilian",
    "Cajun",
    "Chinese",
    "Cuban",
    "Ethiopian",
    "Filipino",
    "French",
    "German",
    "Greek",
    "Hungarian",
    "Indian",
    "Indonesian",
    "Irish",
    "Italian",
    "Japanese",
    "Korean",
    "Lebanese",
    "Malaysian",
    "Mexican",
    "Moroccan",
    "Peruvian",
    "Polish",
    "Portuguese",
    "Russian",
    "Spanish",
    "Swedish",
    "Thai",
    "Turkish",
    "Vietnamese",
];

/// Ingredients strongly associated with particular cuisines.  Keys are
/// normalized ingredient names; an ingredient may map to several cuisines.
const INGREDIENT_CUISINES: &[(&str, &[&str])] = &[
    ("andouille sausage", &["Cajun"]),
    ("baguette", &["French"]),
    ("basil", &["Italian"]),
    ("brie", &["French"]),
    ("chorizo", &["Spanish", "Mexican"]),
    ("coconut milk", &["Thai", "Indian"]),
    ("couscous", &["Moroccan"]),
    ("curry powder", &["Indian"]),
    ("feta cheese", &["Greek"]),
    ("fish sauce", &["Thai", "Vietnamese"]),
    ("garam masala", &["Indian"]),
    ("gochujang", &["Korean"]),
    ("harissa", &["Moroccan"]),
    ("jalapeno", &["Mexican"]),
    ("kimchi", &["Korean"]),
    ("lemongrass", &["Thai", "Vietnamese"]),
    ("masa", &["Mexican"]),
    ("miso", &["Japanese"]),
    ("mozzarella", &["Italian"]),
    ("nori", &["Japanese"]),
    ("olive oil", &["Italian", "Greek"]),
    ("paneer", &["Indian"]),
    ("paprika", &["Hungarian"]),
    ("parmesan", &["Italian"]),
    ("prosciutto", &["Italian"]),
    ("rice vinegar", &["Japanese", "Chinese"]),
    ("saffron", &["Spanish"]),
    ("salsa", &["Mexican"]),
    ("sauerkraut", &["German"]),
    ("sesame oil", &["Chinese", "Korean"]),
    ("soy sauce", &["Chinese", "Japanese"]),
    ("sriracha", &["Thai"]),
    ("tahini", &["Lebanese"]),
    ("tortilla", &["Mexican"]),
    ("turmeric", &["Indian"]),
    ("wasabi", &["Japanese"]),
];

/// Units of measure recognized in ingredient lines, in singular form.
const UNITS_OF_MEASURE: &[&str] = &[
    "bag", "batch", "bottle", "box", "bunch", "can", "carton", "clove",
    "container", "cup", "dash", "envelope", "gallon", "gram", "head", "jar",
    "kilogram", "liter", "loaf", "lb", "milliliter", "ml", "ounce", "oz",
    "package", "piece", "pinch", "pint", "pound", "quart", "slice", "sprig",
    "stalk", "stick", "tablespoon", "tbsp", "teaspoon", "tsp",
];

/// Adjectives that modify ingredients rather than name them.
const FOOD_ADJECTIVES: &[&str] = &[
    "beaten", "boneless", "chilled", "chopped", "cold", "cooked", "cored",
    "crushed", "cubed", "diced", "dried", "firm", "fresh", "frozen", "grated",
    "ground", "halved", "hot", "large", "lean", "medium", "melted", "minced",
    "peeled", "pitted", "raw", "ripe", "roasted", "seeded", "shredded",
    "skinless", "sliced", "small", "softened", "thawed", "thick", "thin",
    "toasted", "uncooked", "warm", "whipped",
];

/// Look up the canonical cuisine name for a nationality-adjective token,
/// ignoring case.
pub fn adjectival_cuisine(token: &str) -> Option<&'static str> {
    ADJECTIVALS
        .iter()
        .find(|a| a.eq_ignore_ascii_case(token))
        .copied()
}

/// Cuisines strongly associated with a normalized ingredient name.
pub fn cuisines_for_ingredient(name: &str) -> &'static [&'static str] {
    INGREDIENT_CUISINES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, cuisines)| *cuisines)
        .unwrap_or(&[])
}

pub fn is_unit_of_measure(word: &str) -> bool {
    UNITS_OF_MEASURE.contains(&word)
}

pub fn is_food_adjective(word: &str) -> bool {
    FOOD_ADJECTIVES.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjectivals_match_case_insensitively() {
        assert_eq!(adjectival_cuisine("italian"), Some("Italian"));
        assert_eq!(adjectival_cuisine("THAI"), Some("Thai"));
        assert_eq!(adjectival_cuisine("delicious"), None);
    }

    #[test]
    fn ingredient_mapping_may_name_several_cuisines() {
        assert_eq!(cuisines_for_ingredient("prosciutto"), &["Italian"]);
        assert_eq!(cuisines_for_ingredient("soy sauce"), &["Chinese", "Japanese"]);
        assert!(cuisines_for_ingredient("water").is_empty());
    }

    #[test]
    fn word_lists_are_singular() {
        assert!(is_unit_of_measure("cup"));
        assert!(!is_unit_of_measure("cups"));
        assert!(is_food_adjective("chopped"));
        assert!(!is_food_adjective("banana"));
    }
}
