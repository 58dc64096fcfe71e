#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Fitness,
    Nutrition,
    Wellness,
    Mixed,
}

const FITNESS_KEYWORDS: &[&str] = &["workout", "training", "exercise", "gym"];
const NUTRITION_KEYWORDS: &[&str] = &["calorie", "meal", "protein", "diet", "macro"];
const WELLNESS_KEYWORDS: &[&str] = &["sleep", "stress", "recovery", "hydrate", "fatigue"];

/// Picks the advisor(s) for a message by case-insensitive substring match.
///
/// Keyword sets are checked fitness, then nutrition, then wellness; the first hit wins.
pub fn route(message: &str) -> Route {
    let text = message.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    if matches(FITNESS_KEYWORDS) {
        Route::Fitness
    } else if matches(NUTRITION_KEYWORDS) {
        Route::Nutrition
    } else if matches(WELLNESS_KEYWORDS) {
        Route::Wellness
    } else {
        Route::Mixed
    }
}
