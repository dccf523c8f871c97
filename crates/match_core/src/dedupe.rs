use std::collections::HashSet;

use crate::record::CandidateRecord;

/// Drops repeated matches, first one wins. Order is otherwise preserved.
pub fn dedupe(candidates: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.identity_key()))
        .collect()
}
