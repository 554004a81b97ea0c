// 🏷️ Label Rules - Rules as Data
// Note cleanup and ordered label inference for recurring transactions

use tracing::debug;

use crate::transaction::CleanTransaction;

// ============================================================================
// NOTE REWRITES
// ============================================================================

/// Exact-match note replacements applied before any label rule
pub const NOTE_REWRITES: [(&str, &str); 1] = [("Giffgaff\n", "Giffgaff")];

/// Apply [`NOTE_REWRITES`] to a single transaction. Returns true if the note changed.
pub fn clean_note(tx: &mut CleanTransaction) -> bool {
    let replacement = tx.note.as_deref().and_then(|note| {
        NOTE_REWRITES
            .iter()
            .find(|(from, _)| *from == note)
            .map(|(_, to)| *to)
    });

    match replacement {
        Some(to) => {
            tx.note = Some(to.to_string());
            true
        }
        None => false,
    }
}

// ============================================================================
// RULE DEFINITION
// ============================================================================

/// What a rule looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Note equals the text exactly
    NoteEquals(String),

    /// Note contains the text (case-sensitive). Null notes never match.
    NoteContains(String),

    /// Category equals the text exactly
    CategoryEquals(String),
}

impl Condition {
    pub fn matches(&self, tx: &CleanTransaction) -> bool {
        match self {
            Condition::NoteEquals(text) => tx.note.as_deref() == Some(text.as_str()),
            Condition::NoteContains(text) => tx
                .note
                .as_deref()
                .is_some_and(|note| note.contains(text.as_str())),
            Condition::CategoryEquals(text) => tx.category.as_deref() == Some(text.as_str()),
        }
    }
}

/// How a rule treats a label that is already set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Replace whatever is there
    Overwrite,

    /// Only set the label when it is null
    FillEmpty,
}

#[derive(Debug, Clone)]
pub struct LabelRule {
    /// Rule ID for tracking
    pub id: String,

    pub condition: Condition,

    /// Label to assign
    pub label: String,

    pub mode: ApplyMode,
}

impl LabelRule {
    pub fn new(id: &str, condition: Condition, label: &str, mode: ApplyMode) -> Self {
        LabelRule {
            id: id.to_string(),
            condition,
            label: label.to_string(),
            mode,
        }
    }

    /// Apply the rule to one transaction. Returns true if the rule fired.
    pub fn apply(&self, tx: &mut CleanTransaction) -> bool {
        if !self.condition.matches(tx) {
            return false;
        }

        if self.mode == ApplyMode::FillEmpty && tx.labels.is_some() {
            return false;
        }

        tx.labels = Some(self.label.clone());
        true
    }
}

// ============================================================================
// LABEL RESULT
// ============================================================================

/// How many rows each step touched, in evaluation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSummary {
    pub notes_cleaned: usize,
    pub rule_hits: Vec<(String, usize)>,
}

impl LabelSummary {
    pub fn hits_for(&self, rule_id: &str) -> Option<usize> {
        self.rule_hits
            .iter()
            .find(|(id, _)| id == rule_id)
            .map(|(_, count)| *count)
    }
}

// ============================================================================
// LABEL ENGINE
// ============================================================================

/// Ordered label rules. Evaluation order is insertion order and later rules
/// win: an `Overwrite` rule replaces an earlier rule's label, a `FillEmpty`
/// rule never does.
pub struct LabelEngine {
    rules: Vec<LabelRule>,
}

impl LabelEngine {
    /// Create engine from a list of rules, keeping their order
    pub fn from_rules(rules: Vec<LabelRule>) -> Self {
        LabelEngine { rules }
    }

    /// Rules for Spendee exports: phone bill, rebates, eating out
    pub fn spendee_default() -> Self {
        LabelEngine::from_rules(vec![
            LabelRule::new(
                "giffgaff_monthly",
                Condition::NoteEquals("Giffgaff".to_string()),
                "monthly",
                ApplyMode::Overwrite,
            ),
            LabelRule::new(
                "rebate_time_to_time",
                Condition::NoteContains("rebate".to_string()),
                "time to time",
                ApplyMode::Overwrite,
            ),
            LabelRule::new(
                "eating_out_monthly",
                Condition::CategoryEquals("Eating out/take away".to_string()),
                "monthly",
                ApplyMode::FillEmpty,
            ),
        ])
    }

    /// Clean notes, then run each rule over every row before the next rule
    pub fn apply(&self, transactions: &mut [CleanTransaction]) -> LabelSummary {
        let mut summary = LabelSummary {
            notes_cleaned: transactions
                .iter_mut()
                .map(clean_note)
                .filter(|&changed| changed)
                .count(),
            rule_hits: Vec::with_capacity(self.rules.len()),
        };

        for rule in &self.rules {
            let hits = transactions
                .iter_mut()
                .map(|tx| rule.apply(tx))
                .filter(|&hit| hit)
                .count();
            debug!(rule = %rule.id, hits, "applied label rule");
            summary.rule_hits.push((rule.id.clone(), hits));
        }

        summary
    }
}

// ============================================================================
// TESTS
// ============================================================================
