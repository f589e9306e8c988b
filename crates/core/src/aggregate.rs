//! Merging per-file extraction results into one document model.

use crate::items::{AssessmentItem, Career, ExtractionResult, MaterialItem, SessionGoal, SessionKey, Term};
use crate::normalize::term_key;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Everything one run found, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedDocument {
    /// Alphabetized by display name, no duplicate normalized names.
    pub terms: Vec<Term>,
    pub goals: BTreeMap<SessionKey, Vec<SessionGoal>>,
    pub assessments: BTreeMap<SessionKey, Vec<AssessmentItem>>,
    pub careers: BTreeMap<SessionKey, Vec<Career>>,
    pub materials: BTreeMap<SessionKey, Vec<MaterialItem>>,
}

impl AggregatedDocument {
    pub fn counts(&self) -> ContentCounts {
        ContentCounts {
            vocabulary: self.terms.len(),
            goals: self.goals.values().map(Vec::len).sum(),
            assessments: self.assessments.values().map(Vec::len).sum(),
            careers: self.careers.values().map(Vec::len).sum(),
            materials: self.materials.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts().total() == 0
    }
}

/// Item totals per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCounts {
    pub vocabulary: usize,
    pub goals: usize,
    pub assessments: usize,
    pub careers: usize,
    pub materials: usize,
}

impl ContentCounts {
    pub fn total(&self) -> usize {
        self.vocabulary + self.goals + self.assessments + self.careers + self.materials
    }
}

/// Accumulates extraction results for a run.
#[derive(Debug, Default)]
pub struct Aggregator {
    document: AggregatedDocument,
    term_keys: HashSet<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's result in. The result is consumed.
    pub fn merge(&mut self, result: ExtractionResult) {
        let ExtractionResult {
            source_file,
            session,
            terms,
            goals,
            assessments,
            careers,
            materials,
            ..
        } = result;

        for term in terms {
            if self.term_keys.insert(term_key(&term.name)) {
                self.document.terms.push(term);
            } else {
                log::debug!(
                    "Ignoring duplicate vocabulary term '{}' from {}",
                    term.name,
                    source_file
                );
            }
        }

        extend_session(&mut self.document.goals, &session, goals);
        extend_session(&mut self.document.assessments, &session, assessments);
        extend_session(&mut self.document.careers, &session, careers);
        extend_session(&mut self.document.materials, &session, materials);
    }

    /// Sort and hand over the document.
    pub fn finish(mut self) -> AggregatedDocument {
        self.document.terms.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        self.document
    }
}

fn extend_session<T>(map: &mut BTreeMap<SessionKey, Vec<T>>, session: &SessionKey, items: Vec<T>) {
    if items.is_empty() {
        return;
    }
    map.entry(session.clone()).or_default().extend(items);
}
