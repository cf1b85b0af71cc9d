//! Structured responses requested from the advice collaborator.

use serde::{Deserialize, Serialize};

use super::fallback;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub benefits: String,
    /// `data:` URL of a generated illustration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Article or guide: a title and markdown content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guide {
    pub title: String,
    pub content: String,
}

impl Guide {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Result of asking for a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealOutcome {
    Recipe(Recipe),
    /// The collaborator refused because its quota is exhausted.
    QuotaExceeded,
    /// Any other failure, including an unparseable answer.
    Unavailable,
}

impl MealOutcome {
    /// Text to show instead of a recipe, if the request failed.
    pub fn fallback_message(&self) -> Option<&'static str> {
        match self {
            MealOutcome::Recipe(_) => None,
            MealOutcome::QuotaExceeded => Some(fallback::MEAL_BUSY),
            MealOutcome::Unavailable => Some(fallback::MEAL_UNAVAILABLE),
        }
    }
}

fn recipe(title: &str, ingredients: &[&str], instructions: &[&str], benefits: &str) -> Recipe {
    Recipe {
        title: title.to_string(),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        instructions: instructions.iter().map(|s| s.to_string()).collect(),
        benefits: benefits.to_string(),
        image_url: None,
    }
}

/// Curated recipes served without calling the collaborator.
pub fn featured_recipe(query: &str) -> Option<Recipe> {
    match query {
        "Salmon Avocado Toast" => Some(recipe(
            "Salmon Avocado Toast",
            &[
                "2 slices Whole-grain bread",
                "1 ripe Avocado",
                "100g Smoked salmon",
                "1 tsp Lemon juice",
                "Fresh dill for garnish",
                "Pinch of black pepper",
            ],
            &[
                "Toast the whole-grain bread slices until golden brown.",
                "In a small bowl, mash the avocado with lemon juice and pepper.",
                "Spread the mashed avocado evenly over the warm toast.",
                "Top with generous layers of smoked salmon.",
                "Garnish with fresh dill and serve immediately.",
            ],
            "Rich in DHA and healthy fats crucial for child's brain development and your cardiovascular health.",
        )),
        "Indonesian Chicken Soup" => Some(recipe(
            "Indonesian Chicken Soup (Soto Ayam)",
            &[
                "500g Chicken breast",
                "2L Water",
                "Aromatic spices (Ginger, Turmeric, Galangal)",
                "Cabbage and bean sprouts",
                "Glass noodles",
                "Boiled eggs",
            ],
            &[
                "Boil chicken with salt and aromatic spices until tender.",
                "Shred the chicken and set aside.",
                "Strain the broth to get a clear, nutritious soup.",
                "Arrange noodles, cabbage, and shredded chicken in a bowl.",
                "Pour hot broth over the top and add a halved boiled egg.",
            ],
            "Warm, hydrating, and easy to digest protein, perfect for postpartum recovery and milk production.",
        )),
        "Spinach & Berry Smoothie" => Some(recipe(
            "Iron-Boost Spinach & Berry Smoothie",
            &[
                "1 cup Fresh baby spinach",
                "1/2 cup Mixed frozen berries",
                "1 cup Greek yogurt",
                "1/2 cup Almond milk",
                "1 tsp Chia seeds",
            ],
            &[
                "Wash the spinach thoroughly.",
                "Combine all ingredients in a high-speed blender.",
                "Blend until completely smooth and creamy.",
                "Pour into a chilled glass and enjoy fresh for maximum nutrient absorption.",
            ],
            "An iron-packed energy boost that fights pregnancy fatigue and provides essential folate.",
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_recipe_lookup() {
        let soup = featured_recipe("Indonesian Chicken Soup").unwrap();
        assert_eq!(soup.title, "Indonesian Chicken Soup (Soto Ayam)");
        assert!(featured_recipe("Pizza").is_none());
    }

    #[test]
    fn test_meal_outcome_fallbacks() {
        assert_eq!(MealOutcome::QuotaExceeded.fallback_message(), Some(fallback::MEAL_BUSY));
        assert_eq!(MealOutcome::Unavailable.fallback_message(), Some(fallback::MEAL_UNAVAILABLE));
    }
}
