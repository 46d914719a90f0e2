//! Keyword-scored categorization of task text.

use super::Category;

/// Keyword lists for every category except [`Category::Other`], in
/// tie-break order.
const KEYWORDS: [(Category, &[&str]); 7] = [
    (
        Category::Work,
        &[
            "meeting",
            "call",
            "email",
            "project",
            "deadline",
            "presentation",
            "report",
            "client",
            "team",
            "office",
            "work",
            "business",
        ],
    ),
    (
        Category::Personal,
        // "personal" is listed twice so it weighs double.
        &["personal", "family", "friend", "home", "house", "personal"],
    ),
    (
        Category::Shopping,
        &[
            "buy", "purchase", "grocery", "shopping", "store", "market", "shop",
        ],
    ),
    (
        Category::Health,
        &[
            "exercise",
            "workout",
            "gym",
            "doctor",
            "appointment",
            "health",
            "fitness",
            "medication",
            "vitamin",
        ],
    ),
    (
        Category::Learning,
        &[
            "study",
            "learn",
            "course",
            "book",
            "reading",
            "tutorial",
            "education",
            "training",
        ],
    ),
    (
        Category::Travel,
        &[
            "travel",
            "trip",
            "flight",
            "hotel",
            "vacation",
            "journey",
            "destination",
        ],
    ),
    (
        Category::Finance,
        &[
            "bill", "payment", "invoice", "budget", "expense", "tax", "bank", "money", "finance",
        ],
    ),
];

/// Derives a category from a task's title and description.
///
/// Each keyword entry found anywhere in the lower-cased text scores one point
/// for its category, however often it occurs. The highest score wins and ties go
/// to the category declared first. Text with no keyword hits is
/// [`Category::Other`].
///
/// # Examples
///
/// ```
/// use taskdeck::task::domain::{Category, categorize};
///
/// assert_eq!(categorize("Reserve hotel for the trip", ""), Category::Travel);
/// assert_eq!(categorize("xyz", ""), Category::Other);
/// ```
#[must_use]
pub fn categorize(title: &str, description: &str) -> Category {
    let text = format!("{title} {description}").to_lowercase();

    let mut best = Category::Other;
    let mut best_score = 0_usize;
    for (category, keywords) in KEYWORDS {
        let score = keywords
            .iter()
            .filter(|keyword| text.contains(*keyword))
            .count();
        if score > best_score {
            best = category;
            best_score = score;
        }
    }
    best
}
