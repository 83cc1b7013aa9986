// Name normalization used for all equality comparisons in the knowledge base.

/// Irregular plurals the suffix rules would mangle.
const IRREGULARS: &[(&str, &str)] = &[
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("halves", "half"),
    ("knives", "knife"),
    ("molasses", "molasses"),
];

/// Reduce a single lowercase word to its singular form.
///
/// This is a heuristic, not a full lemmatizer; it covers the plural
/// forms that show up in recipe ingredient lists.
fn singularize(word: &str) -> String {
    for (plural, singular) in IRREGULARS {
        if word == *plural {
            return (*singular).to_string();
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    if word.len() > 4 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    for suffix in ["oes", "xes", "ches", "shes", "sses"] {
        if word.len() > suffix.len() + 1 && word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.len() > 2 && word.ends_with('s') {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Normalize a free-text name into the canonical form used for equality
/// comparisons: lowercase, singularized per word, single-space separated.
///
/// ```
/// use cookdex_core::normalize::normalize_name;
///
/// assert_eq!(normalize_name("Eggs"), "egg");
/// assert_eq!(normalize_name("bing cherries"), "bing cherry");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .map(singularize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a taxonomy entry name.  Taxonomy data files use underscores
/// for multi-word concepts ("root_vegetable"), which are folded to spaces
/// so they compare equal to ingredient names.
pub fn normalize_taxonomy_name(name: &str) -> String {
    normalize_name(&name.replace('_', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singularizes_common_plurals() {
        assert_eq!(normalize_name("eggs"), "egg");
        assert_eq!(normalize_name("tomatoes"), "tomato");
        assert_eq!(normalize_name("potatoes"), "potato");
        assert_eq!(normalize_name("cherries"), "cherry");
        assert_eq!(normalize_name("peaches"), "peach");
        assert_eq!(normalize_name("radishes"), "radish");
        assert_eq!(normalize_name("cloves"), "clove");
        assert_eq!(normalize_name("bay leaves"), "bay leaf");
    }

    #[test]
    fn leaves_non_plurals_alone() {
        assert_eq!(normalize_name("couscous"), "couscous");
        assert_eq!(normalize_name("asparagus"), "asparagus");
        assert_eq!(normalize_name("molasses"), "molasses");
        assert_eq!(normalize_name("swiss"), "swiss");
    }

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize_name("  Olive   Oil "), "olive oil");
        assert_eq!(normalize_name("Bing Cherries"), "bing cherry");
    }

    #[test]
    fn taxonomy_names_fold_underscores() {
        assert_eq!(normalize_taxonomy_name("root_vegetable"), "root vegetable");
        assert_eq!(normalize_taxonomy_name("Protein_Substitutes"), "protein substitute");
    }
}
