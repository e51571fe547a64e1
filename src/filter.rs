//! Client-side relevance re-check.
//!
//! The API already matched the query terms server-side, but its notion of
//! relevance is looser than literal containment, so every returned article is
//! re-checked here: an article survives only if some configured term appears
//! as a case-insensitive substring of its title or description. Running the
//! check with the same term set that built the query means this layer can
//! only narrow what the API returned, never widen it.

use crate::models::Article;

/// Keep the articles that mention at least one of `terms` in their title or
/// description. Order-preserving; articles with neither field populated are
/// dropped.
pub fn retain_relevant(terms: &[String], articles: Vec<Article>) -> Vec<Article> {
    let needles: Vec<String> = terms.iter().map(|term| term.to_lowercase()).collect();
    articles
        .into_iter()
        .filter(|article| mentions_any(&needles, article))
        .collect()
}

/// True if the title or description contains any of the lowercased needles.
/// A missing field compares as the empty string and never matches.
fn mentions_any(needles: &[String], article: &Article) -> bool {
    let title = article.title.as_deref().unwrap_or_default().to_lowercase();
    let description = article
        .description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    needles
        .iter()
        .any(|needle| title.contains(needle.as_str()) || description.contains(needle.as_str()))
}
