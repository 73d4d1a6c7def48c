//! Keyword resolution against the remembered paths.
//!
//! Two forms exist. [`resolve`] scores a single keyword against every
//! segment prefix of every entry and returns the best path. [`shortlist`]
//! treats the keyword as ordered tokens and collects the paths that contain
//! them as successive segment prefixes, for the interactive picker.

use crate::core::similarity::similarity;
use crate::core::store::normalize;
use regex::Regex;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// How a candidate was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Keyword with a separator found inside a full entry.
    Literal,
    /// Segment similarity reached the threshold.
    Similar,
    /// Keyword is a substring of the segment, similarity below threshold.
    Substring,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub path: String,
    pub score: f64,
    pub kind: MatchKind,
    pub depth: usize,
}

impl Match {
    fn new(path: String, score: f64, kind: MatchKind) -> Self {
        let depth = path.split('/').count();
        Self {
            path,
            score,
            kind,
            depth,
        }
    }
}

/// One resolve request.
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    pub keyword: &'a str,
    /// Directory the user is in; never suggested when something else matches.
    pub cwd: &'a str,
    pub min_accuracy: f64,
}

/// Every accepted candidate, best first.
pub fn rank(entries: &[String], keyword: &str, min_accuracy: f64) -> Vec<Match> {
    let mut matches = Vec::new();
    if keyword.is_empty() {
        return matches;
    }
    let low_keyword = keyword.to_lowercase();
    let check_literal = keyword.contains('/');

    for entry in entries {
        if check_literal && entry.to_lowercase().contains(&low_keyword) {
            matches.push(Match::new(entry.clone(), 1.0, MatchKind::Literal));
        }

        let mut prefix = String::with_capacity(entry.len());
        for (i, segment) in entry.split('/').enumerate() {
            if i > 0 {
                prefix.push('/');
            }
            prefix.push_str(segment);

            let low_segment = segment.to_lowercase();
            let score = similarity(&low_segment, &low_keyword);
            let kind = if score >= min_accuracy {
                MatchKind::Similar
            } else if low_segment.contains(&low_keyword) {
                MatchKind::Substring
            } else {
                continue;
            };
            trace!(path = %prefix, score, ?kind, "candidate");
            matches.push(Match::new(prefix.clone(), score, kind));
        }
    }

    // stable: equal score and depth keep store order
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.depth.cmp(&b.depth))
    });
    matches
}

/// Resolve `query` to a single path, or `None` when nothing qualifies.
///
/// A keyword starting with `/` is an absolute path and is returned normalized
/// without consulting `entries`.
pub fn resolve(entries: &[String], query: &Query<'_>) -> Option<String> {
    let keyword = query.keyword;
    if keyword.is_empty() {
        return None;
    }
    if keyword.starts_with('/') {
        return Some(normalize(keyword));
    }

    let matches = rank(entries, keyword, query.min_accuracy);
    debug!(keyword, candidates = matches.len(), "ranked candidates");

    let cwd = normalize(query.cwd);
    let winner = matches
        .iter()
        .find(|m| m.path != cwd)
        .or_else(|| matches.first())?;
    Some(winner.path.clone())
}

/// Split a multi-keyword string into lowercased tokens.
pub fn tokenize(keywords: &str) -> Vec<String> {
    keywords
        .split(|c: char| c.is_whitespace() || c == '/')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Pattern requiring each token to start a segment, in order, with the last
/// token inside the final segment.
fn ordered_pattern(tokens: &[String]) -> Option<Regex> {
    let body = tokens
        .iter()
        .map(|t| format!("/{}[^/]*", regex::escape(t)))
        .collect::<Vec<_>>()
        .join("(?:/[^/]*)*");
    Regex::new(&format!("{}$", body)).ok()
}

/// Ordered candidate list for the interactive picker, at most `max_options`
/// long. With no tokens this is simply the most recent entries.
pub fn shortlist(entries: &[String], keywords: &str, max_options: usize) -> Vec<String> {
    let tokens = tokenize(keywords);
    if tokens.is_empty() {
        return entries.iter().take(max_options).cloned().collect();
    }
    let Some(pattern) = ordered_pattern(&tokens) else {
        return Vec::new();
    };

    let mut found: Vec<String> = Vec::new();
    for entry in entries {
        for token in &tokens {
            let mut prefix = String::with_capacity(entry.len());
            for (i, segment) in entry.split('/').enumerate() {
                if i > 0 {
                    prefix.push('/');
                }
                prefix.push_str(segment);

                if !segment.to_lowercase().starts_with(token.as_str()) {
                    continue;
                }
                if !pattern.is_match(&prefix.to_lowercase()) {
                    continue;
                }
                if found.iter().any(|f| f == &prefix) {
                    continue;
                }
                found.push(prefix.clone());
                if found.len() >= max_options {
                    return found;
                }
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn query(keyword: &str) -> Query<'_> {
        Query {
            keyword,
            cwd: "/nowhere",
            min_accuracy: 0.7,
        }
    }

    #[test]
    fn exact_segment_beats_similar_segment() {
        let entries = list(&["/home/u/music", "/home/u/movies", "/var/log"]);
        assert_eq!(
            resolve(&entries, &query("music")).as_deref(),
            Some("/home/u/music")
        );
    }

    #[test]
    fn match_returns_segment_prefix_not_full_entry() {
        let entries = list(&["/home/u/projects/rust/app"]);
        assert_eq!(
            resolve(&entries, &query("projects")).as_deref(),
            Some("/home/u/projects")
        );
    }

    #[test]
    fn case_insensitive() {
        let entries = list(&["/home/u/Documents"]);
        assert_eq!(
            resolve(&entries, &query("DOCUMENTS")).as_deref(),
            Some("/home/u/Documents")
        );
    }

    #[test]
    fn substring_match_below_threshold_is_accepted() {
        let entries = list(&["/srv/my-very-long-project-name"]);
        let ranked = rank(&entries, "long", 0.7);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].kind, MatchKind::Substring);
        assert!(ranked[0].score < 0.7);
    }

    #[test]
    fn shallower_path_wins_ties() {
        let entries = list(&["/a/work/b/work", "/c/work"]);
        let ranked = rank(&entries, "work", 0.7);
        assert_eq!(ranked[0].path, "/a/work");
        assert_eq!(ranked[0].depth, 3);
        assert_eq!(ranked[1].path, "/c/work");
        assert_eq!(ranked[2].path, "/a/work/b/work");
    }

    #[test]
    fn equal_rank_keeps_recency_order() {
        let entries = list(&["/x/notes", "/y/notes"]);
        assert_eq!(resolve(&entries, &query("notes")).as_deref(), Some("/x/notes"));
    }

    #[test]
    fn keyword_with_separator_matches_full_entries() {
        let entries = list(&["/home/u/src/app/web", "/home/u/web"]);
        let ranked = rank(&entries, "app/web", 0.7);
        assert_eq!(ranked[0].kind, MatchKind::Literal);
        assert_eq!(ranked[0].path, "/home/u/src/app/web");
        assert_eq!(
            resolve(&entries, &query("APP/WEB")).as_deref(),
            Some("/home/u/src/app/web")
        );
    }

    #[test]
    fn absolute_keyword_bypasses_store() {
        let entries = list(&["/home/u/music"]);
        assert_eq!(
            resolve(&entries, &query("/opt/tools/")).as_deref(),
            Some("/opt/tools")
        );
        assert_eq!(resolve(&[], &query("/")).as_deref(), Some("/"));
    }

    #[test]
    fn empty_keyword_and_no_match() {
        let entries = list(&["/home/u/music"]);
        assert_eq!(resolve(&entries, &query("")), None);
        assert_eq!(resolve(&entries, &query("zzzz")), None);
        assert_eq!(resolve(&[], &query("music")), None);
    }

    #[test]
    fn current_directory_is_skipped_when_alternative_exists() {
        let entries = list(&["/home/u/music", "/mnt/backup/music"]);
        let q = Query {
            keyword: "music",
            cwd: "/home/u/music/",
            min_accuracy: 0.7,
        };
        assert_eq!(resolve(&entries, &q).as_deref(), Some("/mnt/backup/music"));
    }

    #[test]
    fn current_directory_returned_when_it_is_the_only_match() {
        let entries = list(&["/home/u/music"]);
        let q = Query {
            keyword: "music",
            cwd: "/home/u/music",
            min_accuracy: 0.7,
        };
        assert_eq!(resolve(&entries, &q).as_deref(), Some("/home/u/music"));
    }

    #[test]
    fn tokenize_splits_on_space_and_separator() {
        assert_eq!(tokenize("  Pro  rust/App "), list(&["pro", "rust", "app"]));
        assert!(tokenize(" / ").is_empty());
    }

    #[test]
    fn shortlist_requires_ordered_segment_prefixes() {
        let entries = list(&[
            "/home/u/projects/rust/app",
            "/home/u/rust/projects",
            "/home/u/projects/go",
        ]);
        assert_eq!(
            shortlist(&entries, "pro rust", 10),
            list(&["/home/u/projects/rust"])
        );
        assert_eq!(
            shortlist(&entries, "rust pro", 10),
            list(&["/home/u/rust/projects"])
        );
    }

    #[test]
    fn shortlist_allows_gaps_between_tokens() {
        let entries = list(&["/home/u/code/client/web/src"]);
        assert_eq!(
            shortlist(&entries, "code src", 10),
            list(&["/home/u/code/client/web/src"])
        );
    }

    #[test]
    fn shortlist_single_token_lists_every_prefix_match() {
        let entries = list(&["/a/docs/docs-old", "/b/Docs"]);
        assert_eq!(
            shortlist(&entries, "doc", 10),
            list(&["/a/docs", "/a/docs/docs-old", "/b/Docs"])
        );
    }

    #[test]
    fn shortlist_is_capped() {
        let entries: Vec<String> = (0..30).map(|i| format!("/w/proj{}", i)).collect();
        let found = shortlist(&entries, "proj", 10);
        assert_eq!(found.len(), 10);
        assert_eq!(found[0], "/w/proj0");
    }

    #[test]
    fn shortlist_without_tokens_is_most_recent() {
        let entries = list(&["/a", "/b", "/c"]);
        assert_eq!(shortlist(&entries, "", 2), list(&["/a", "/b"]));
    }

    #[test]
    fn shortlist_escapes_regex_metacharacters() {
        let entries = list(&["/srv/c++", "/srv/cxx"]);
        assert_eq!(shortlist(&entries, "c++", 10), list(&["/srv/c++"]));
    }
}
