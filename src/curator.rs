//! Selection of the repositories shown on the portfolio.
//!
//! Two lists come out of one merged repository list: the plain popularity
//! ranking and the curated "featured projects" sequence built from pin rules.

use crate::config::CurationConfig;
use crate::types::{RepoId, RepositoryRecord};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurationResult {
    /// Most-starred repositories, at most `top_count`
    pub top_by_stars: Vec<RepositoryRecord>,
    /// Featured projects in pin-rule order
    pub curated: Vec<RepositoryRecord>,
}

/// Concatenate the primary listing with backfilled records. The first record
/// seen for an identifier wins.
pub fn merge_repositories(
    primary: Vec<RepositoryRecord>,
    extras: Vec<RepositoryRecord>,
) -> Vec<RepositoryRecord> {
    let mut seen = HashSet::new();
    primary
        .into_iter()
        .chain(extras)
        .filter(|r| seen.insert(r.id.clone()))
        .collect()
}

/// Stable sort, most stars first
fn sort_by_stars(repos: &mut [&RepositoryRecord]) {
    repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
}

/// Appends records while skipping identifiers already taken
struct OrderedSet<'a> {
    seen: HashSet<&'a RepoId>,
    items: Vec<&'a RepositoryRecord>,
}

impl<'a> OrderedSet<'a> {
    fn new() -> Self {
        OrderedSet { seen: HashSet::new(), items: Vec::new() }
    }

    fn push(&mut self, repo: &'a RepositoryRecord) {
        if self.seen.insert(&repo.id) {
            self.items.push(repo);
        }
    }
}

pub fn curate(repos: &[RepositoryRecord], config: &CurationConfig) -> CurationResult {
    let all: Vec<&RepositoryRecord> = repos.iter().filter(|r| !r.fork).collect();

    let mut by_stars = all.clone();
    sort_by_stars(&mut by_stars);

    let mut ordered = OrderedSet::new();

    for full_name in &config.manual_pins {
        let full_name = full_name.to_lowercase();
        if let Some(repo) = all.iter().find(|r| r.full_name.to_lowercase() == full_name) {
            ordered.push(*repo);
        }
    }

    for repo in all.iter().filter(|r| config.is_featured_name(&r.name)) {
        ordered.push(*repo);
    }

    let keywords: Vec<String> = config.keywords.iter().map(|k| k.to_lowercase()).collect();
    let mut keyword_matches: Vec<&RepositoryRecord> = all
        .iter()
        .copied()
        .filter(|r| {
            let text = r.search_text();
            keywords.iter().any(|k| text.contains(k.as_str()))
        })
        .collect();
    sort_by_stars(&mut keyword_matches);
    for repo in keyword_matches {
        ordered.push(repo);
    }

    for repo in &by_stars {
        ordered.push(*repo);
    }

    let mut curated: Vec<RepositoryRecord> = ordered.items.into_iter().cloned().collect();

    if !curated.iter().any(|r| config.is_featured_name(&r.name)) {
        curated.insert(0, config.live_project.to_record());
    }

    if let Some(max) = config.curated_cap() {
        curated.truncate(max);
    }

    let top_by_stars = by_stars
        .into_iter()
        .take(config.top_count)
        .cloned()
        .collect();

    CurationResult { top_by_stars, curated }
}
