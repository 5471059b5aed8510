//! Free-text search and relevance ranking
//!
//! The query is split on whitespace into required tokens: a resource matches
//! only if every token appears somewhere in its searchable text. The whole
//! query (not the tokens) then scores each match for the auto-focus pick.

use crate::models::Resource;

/// Which fields participate in token matching. The page variants diverged
/// here, so it stays a per-deployment configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFields {
    /// name, city, province, category, address, phone, email, hours, description
    #[default]
    Full,
    /// name, description and phone (the online-card variant)
    Compact,
}

impl SearchFields {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "full" => Some(Self::Full),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Search result: the matching subset in input order, plus the best match
/// for auto-focus when one stands out.
#[derive(Debug)]
pub struct SearchOutcome<'a> {
    pub matches: Vec<&'a Resource>,
    pub best_match: Option<&'a Resource>,
}

fn searchable_text(resource: &Resource, fields: SearchFields) -> String {
    let parts: Vec<&str> = match fields {
        SearchFields::Full => vec![
            &resource.name,
            &resource.city,
            &resource.province,
            &resource.category,
            &resource.address,
            &resource.phone,
            &resource.email,
            &resource.hours,
            &resource.description,
        ],
        SearchFields::Compact => vec![&resource.name, &resource.description, &resource.phone],
    };
    parts.join(" ").to_lowercase()
}

/// Relevance of a resource for the whole query: +3 on a name match, +2 on an
/// address match, +1 on a description match.
#[must_use]
pub fn relevance_score(query: &str, resource: &Resource) -> u32 {
    let query = query.to_lowercase();
    let mut score = 0;
    if resource.name.to_lowercase().contains(&query) {
        score += 3;
    }
    if resource.address.to_lowercase().contains(&query) {
        score += 2;
    }
    if resource.description.to_lowercase().contains(&query) {
        score += 1;
    }
    score
}

/// Run a search over `candidates`.
///
/// A blank query returns the full candidate set with no best match. Zero
/// matches is a valid outcome, not an error. A single match is always the
/// best match; among several, the first maximal scorer wins, and only when
/// its score is positive.
#[must_use]
pub fn search_resources<'a>(
    query: &str,
    candidates: &[&'a Resource],
    fields: SearchFields,
) -> SearchOutcome<'a> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return SearchOutcome {
            matches: candidates.to_vec(),
            best_match: None,
        };
    }

    let tokens: Vec<&str> = query.split_whitespace().collect();

    let matches: Vec<&Resource> = candidates
        .iter()
        .copied()
        .filter(|resource| {
            let text = searchable_text(resource, fields);
            tokens.iter().all(|token| text.contains(token))
        })
        .collect();

    let best_match = match matches.as_slice() {
        [] => None,
        [only] => Some(*only),
        several => {
            let scored = several
                .iter()
                .map(|resource| (relevance_score(&query, resource), *resource))
                .collect::<Vec<_>>();
            let max_score = scored.iter().map(|(score, _)| *score).max().unwrap_or(0);
            if max_score > 0 {
                scored
                    .iter()
                    .find(|(score, _)| *score == max_score)
                    .map(|(_, resource)| *resource)
            } else {
                None
            }
        }
    };

    SearchOutcome {
        matches,
        best_match,
    }
}
