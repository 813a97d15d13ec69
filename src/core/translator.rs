// src/core/translator.rs
use crate::core::group::unique_teams;
use crate::core::types::KpiRecord;
use crate::error::TranslateError;
use regex::{NoExpand, RegexBuilder};
use serde::{Deserialize, Serialize};

pub const NO_EQUIVALENT: &str = "No equivalent found";

/// One vocabulary lookup resolved during translation, kept for display even
/// when the message text itself did not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermMatch {
    pub original_term: String,
    pub from_context: String,
    pub from_definition: String,
    pub to_context: String,
    pub to_term: String,
    pub to_definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_message: String,
    pub matched_terms: Vec<TermMatch>,
}

/// One team's vocabulary: lowercased metric name mapped to its definition,
/// in first-registration order. Re-registering a name keeps its position and
/// overwrites the definition, so the last write wins without reordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamGlossary {
    entries: Vec<(String, String)>,
}

impl TeamGlossary {
    fn insert(&mut self, term: String, definition: String) {
        match self.entries.iter_mut().find(|(t, _)| *t == term) {
            Some(slot) => slot.1 = definition,
            None => self.entries.push((term, definition)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, d)| (t.as_str(), d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds one glossary per team, teams in first-appearance order.
pub fn build_team_glossaries(records: &[KpiRecord]) -> Vec<(String, TeamGlossary)> {
    let mut glossaries: Vec<(String, TeamGlossary)> = unique_teams(records)
        .into_iter()
        .map(|team| (team, TeamGlossary::default()))
        .collect();

    for record in records {
        if let Some((_, glossary)) = glossaries.iter_mut().find(|(team, _)| *team == record.team) {
            glossary.insert(record.metric_name.to_lowercase(), record.definition.clone());
        }
    }

    glossaries
}

/// Rewrites a message from one team's vocabulary into another's.
///
/// Each whitespace token is scrubbed down to word characters and checked
/// against the source glossary by bidirectional substring match; the first
/// matching term claims the token. The matched term is then resolved against
/// the target glossary the same way, falling back to the source term with a
/// "No equivalent found" definition. Finally every resolved pair that
/// actually renames the term is substituted into the message, whole-word and
/// case-insensitive, with the source term kept in parentheses.
///
/// Unknown teams are treated as having empty vocabularies, which yields zero
/// matches rather than an error. Translating a team to itself returns the
/// message untouched.
pub fn translate(
    records: &[KpiRecord],
    message: &str,
    from_team: &str,
    to_team: &str,
) -> Result<Translation, TranslateError> {
    if message.is_empty() {
        return Err(TranslateError::EmptyMessage);
    }
    if from_team.is_empty() {
        return Err(TranslateError::EmptySourceTeam);
    }
    if to_team.is_empty() {
        return Err(TranslateError::EmptyTargetTeam);
    }

    if from_team == to_team {
        return Ok(Translation {
            translated_message: message.to_string(),
            matched_terms: Vec::new(),
        });
    }

    let glossaries = build_team_glossaries(records);
    let empty = TeamGlossary::default();
    let from_glossary = glossary_for(&glossaries, from_team).unwrap_or(&empty);

    // A source team with no vocabulary cannot match anything.
    if from_glossary.is_empty() {
        return Ok(Translation {
            translated_message: message.to_string(),
            matched_terms: Vec::new(),
        });
    }

    let to_glossary = glossary_for(&glossaries, to_team).unwrap_or(&empty);

    let mut matched_terms: Vec<TermMatch> = Vec::new();
    for word in message.split_whitespace() {
        let clean_word: String = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();

        for (term, definition) in from_glossary.iter() {
            if term.contains(&clean_word) || clean_word.contains(term) {
                let (to_term, to_definition) = to_glossary
                    .iter()
                    .find(|&(candidate, _)| candidate.contains(term) || term.contains(candidate))
                    .map(|(t, d)| (t.to_string(), d.to_string()))
                    .unwrap_or_else(|| (term.to_string(), NO_EQUIVALENT.to_string()));

                matched_terms.push(TermMatch {
                    original_term: term.to_string(),
                    from_context: from_team.to_string(),
                    from_definition: definition.to_string(),
                    to_context: to_team.to_string(),
                    to_term,
                    to_definition,
                });
                // The first matching term claims the token.
                break;
            }
        }
    }

    let mut translated = message.to_string();
    for term in &matched_terms {
        if term.original_term != term.to_term {
            let pattern = format!(r"\b{}\b", regex::escape(&term.original_term));
            // The pattern is fully escaped, so the build cannot fail.
            if let Ok(re) = RegexBuilder::new(&pattern).case_insensitive(true).build() {
                let replacement = format!(
                    "{} ({} in {} terms)",
                    term.to_term, term.original_term, from_team
                );
                translated = re
                    .replace_all(&translated, NoExpand(&replacement))
                    .into_owned();
            }
        }
    }

    Ok(Translation {
        translated_message: translated,
        matched_terms,
    })
}

fn glossary_for<'a>(
    glossaries: &'a [(String, TeamGlossary)],
    team: &str,
) -> Option<&'a TeamGlossary> {
    glossaries
        .iter()
        .find(|(name, _)| name == team)
        .map(|(_, glossary)| glossary)
}
