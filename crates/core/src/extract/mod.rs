//! Per-presentation extraction: vocabulary, goals, assessments, careers and
//! materials.

pub mod lists;
pub mod vocabulary;

pub use lists::{effective_list_style, ListKind, TriggeredList};
pub use vocabulary::{PlaceholderFilter, VocabularyEntry, VocabularyExtractor};

use crate::classify::StyleClassifier;
use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::items::{AssessmentItem, Career, ExtractionResult, MaterialItem, SessionGoal, Term};
use crate::naming::session_key;
use crate::normalize::term_key;
use crate::types::Presentation;
use std::collections::HashSet;

/// Runs every extractor over a presentation.
#[derive(Debug, Clone)]
pub struct Extractor {
    vocabulary: VocabularyExtractor,
    goals: TriggeredList,
    assessments: TriggeredList,
    careers: TriggeredList,
    materials: TriggeredList,
}

impl Extractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let triggers = &config.triggers;
        Ok(Self {
            vocabulary: VocabularyExtractor::new(
                StyleClassifier::new(config.classifier.clone()),
                PlaceholderFilter::new(&config.extra_excluded_terms),
            ),
            goals: TriggeredList::substring(&triggers.goals, ListKind::Bulleted),
            assessments: TriggeredList::substring(&triggers.assessments, ListKind::Numbered),
            careers: TriggeredList::whole_word(&triggers.careers, ListKind::Any)?.headings_only(),
            materials: TriggeredList::substring(&triggers.materials, ListKind::Any).headings_only(),
        })
    }

    /// Extract everything from one presentation.
    ///
    /// Goals, assessments and materials accumulate across slides without
    /// exact duplicates. Careers come from the last slide that lists any.
    pub fn extract(&self, presentation: &Presentation, debug: bool) -> ExtractionResult {
        let file = presentation.filename.as_str();
        let session = session_key(file);
        let mut result = ExtractionResult::new(file, session.clone());

        let mut term_keys = HashSet::new();
        let mut goals = Vec::new();
        let mut assessments = Vec::new();
        let mut careers = Vec::new();
        let mut materials = Vec::new();

        for slide in &presentation.slides {
            if debug {
                result
                    .diagnostics
                    .extend(self.vocabulary.diagnose_slide(slide, file));
            }

            let entries = self.vocabulary.extract_slide(slide);
            if !entries.is_empty() {
                log::debug!(
                    "Found {} vocabulary item(s) on slide {}",
                    entries.len(),
                    slide.number
                );
            }
            for entry in entries {
                if term_keys.insert(term_key(&entry.name)) {
                    result.terms.push(Term {
                        name: entry.name,
                        definition: entry.definition,
                        source_file: file.to_string(),
                    });
                }
            }

            let found = self.goals.collect(slide);
            if !found.is_empty() {
                log::debug!("Found {} session goal(s) on slide {}", found.len(), slide.number);
            }
            push_unique(&mut goals, found);

            let found = self.assessments.collect(slide);
            if !found.is_empty() {
                log::debug!(
                    "Found {} assessment item(s) on slide {}",
                    found.len(),
                    slide.number
                );
            }
            push_unique(&mut assessments, found);

            let found = self.careers.collect(slide);
            if !found.is_empty() {
                log::debug!("Found {} career(s) on slide {}", found.len(), slide.number);
                careers.clear();
                push_unique(&mut careers, found);
            }

            let found = self.materials.collect(slide);
            if !found.is_empty() {
                log::debug!("Found {} material item(s) on slide {}", found.len(), slide.number);
            }
            push_unique(&mut materials, found);
        }

        result.goals = goals
            .into_iter()
            .map(|text| SessionGoal {
                session: session.clone(),
                text,
            })
            .collect();
        result.assessments = assessments
            .into_iter()
            .map(|text| AssessmentItem {
                session: session.clone(),
                text,
            })
            .collect();
        result.careers = careers
            .into_iter()
            .map(|text| Career {
                text,
                source_file: file.to_string(),
            })
            .collect();
        result.materials = materials
            .into_iter()
            .map(|text| MaterialItem {
                text,
                source_file: file.to_string(),
            })
            .collect();

        result
    }
}

/// Append items that are not already present, keeping order.
fn push_unique(target: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}
