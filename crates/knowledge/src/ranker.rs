//! Keyword relevance ranking.
//!
//! A section's score is the number of times the query's keywords occur in its
//! title and content. Sorting is stable, so equal scores keep document order.

use helpdoc_core::section::DocumentSection;

/// Sections placed into context when the caller does not say otherwise.
pub const DEFAULT_LIMIT: usize = 3;

/// Tokens this short ("is", "a", "to") carry no signal.
const MIN_TOKEN_CHARS: usize = 3;

/// A section with its relevance score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSection {
    pub section: DocumentSection,
    pub score: usize,
}

/// Lower-cased keywords of a query.
///
/// Leading and trailing punctuation is stripped so `shipping?` matches `shipping`.
pub fn query_tokens(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Sum of non-overlapping occurrences of every token in the section text.
pub fn score_section(tokens: &[String], section: &DocumentSection) -> usize {
    let haystack = format!("{} {}", section.title, section.content).to_lowercase();
    tokens
        .iter()
        .map(|token| haystack.matches(token.as_str()).count())
        .sum()
}

/// Score every section and keep the best `limit`, highest first.
///
/// Zero scores are kept; callers decide what an all-zero ranking means.
pub fn rank_scored(query: &str, sections: &[DocumentSection], limit: usize) -> Vec<ScoredSection> {
    let tokens = query_tokens(query);

    let mut scored: Vec<ScoredSection> = sections
        .iter()
        .map(|section| ScoredSection {
            score: score_section(&tokens, section),
            section: section.clone(),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Like [`rank_scored`] with the scores stripped.
pub fn rank(query: &str, sections: &[DocumentSection], limit: usize) -> Vec<DocumentSection> {
    rank_scored(query, sections, limit)
        .into_iter()
        .map(|scored| scored.section)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_and_shipping() -> Vec<DocumentSection> {
        vec![
            DocumentSection::new("POLICY", "We refund within 30 days.", 0),
            DocumentSection::new("SHIPPING", "We ship in 2 days.", 1),
        ]
    }

    #[test]
    fn tokens_drop_short_words_and_punctuation() {
        assert_eq!(
            query_tokens("How fast is shipping?"),
            vec!["how", "fast", "shipping"]
        );
        assert!(query_tokens("a an to ??").is_empty());
        assert_eq!(query_tokens("  REFUND,  (policy) "), vec!["refund", "policy"]);
    }

    #[test]
    fn shipping_question_prefers_shipping_section() {
        let ranked = rank_scored("How fast is shipping?", &policy_and_shipping(), DEFAULT_LIMIT);
        assert_eq!(ranked[0].section.title, "SHIPPING");
        assert!(ranked[0].score >= 1);
        assert_eq!(ranked[1].section.title, "POLICY");
        assert_eq!(ranked[1].score, 0);
    }

    #[test]
    fn counts_every_occurrence_case_insensitively() {
        let section = DocumentSection::new("Refunds", "REFUND requests: refund within a week.", 0);
        let tokens = query_tokens("refund");
        // "Refunds", "REFUND", "refund"
        assert_eq!(score_section(&tokens, &section), 3);
    }

    #[test]
    fn occurrences_do_not_overlap() {
        let section = DocumentSection::new("T", "aaaa", 0);
        assert_eq!(score_section(&["aaa".to_string()], &section), 1);
    }

    #[test]
    fn scores_sum_across_tokens() {
        let section = DocumentSection::new("Returns", "Returns are free. Shipping is paid.", 0);
        let tokens = query_tokens("returns shipping");
        assert_eq!(score_section(&tokens, &section), 3);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        // "e.g" must not match "exg" the way an unescaped pattern would.
        let section = DocumentSection::new("Pricing", "Plans, e.g. monthly; exg yearly.", 0);
        assert_eq!(query_tokens("e.g."), vec!["e.g"]);
        assert_eq!(score_section(&query_tokens("e.g."), &section), 1);
        assert_eq!(score_section(&query_tokens("$100 (monthly)"), &section), 1);
    }

    #[test]
    fn equal_scores_keep_document_order() {
        let sections = vec![
            DocumentSection::new("A", "nothing here", 0),
            DocumentSection::new("B", "account help", 1),
            DocumentSection::new("C", "nothing either", 2),
            DocumentSection::new("D", "account setup", 3),
        ];
        let ranked = rank("account", &sections, 4);
        let order: Vec<usize> = ranked.iter().map(|s| s.section_index).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn higher_scores_rank_first() {
        let sections = vec![
            DocumentSection::new("One", "billing", 0),
            DocumentSection::new("Two", "billing billing billing", 1),
            DocumentSection::new("Three", "billing billing", 2),
        ];
        let ranked = rank_scored("billing", &sections, 3);
        let scores: Vec<usize> = ranked.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![3, 2, 1]);
        assert_eq!(ranked[0].section.section_index, 1);
    }

    #[test]
    fn never_returns_more_than_limit_or_input() {
        let sections = policy_and_shipping();
        for limit in 0..5 {
            let ranked = rank("refund shipping", &sections, limit);
            assert!(ranked.len() <= limit.min(sections.len()));
        }
        assert!(rank("anything", &[], 3).is_empty());
    }

    #[test]
    fn all_zero_scores_still_fill_the_limit() {
        let ranked = rank_scored("warranty", &policy_and_shipping(), 3);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|s| s.score == 0));
    }
}
