//! The template anchor engine.
//!
//! An ordered list of `{anchor, action}` phases is consumed by one
//! top-to-bottom scan over the Makefile lines. The scan builds a fresh output
//! sequence, so inserted lines are never rescanned and no index arithmetic is
//! needed; the phase cursor only ever moves forward. Two phases may carry the
//! identical anchor (the compiler line appears twice) and are matched as
//! independent slots in document order.

#[derive(Debug, Clone)]
pub enum PatchAction {
    /// Drop the matched line and write one computed line in its place.
    Replace(String),
    /// Keep the matched line and write the block immediately below it.
    InsertBelow(Vec<String>),
    /// Keep the matched line with one token substituted.
    RewriteToken { from: String, to: String },
    /// Match only; the line passes through untouched.
    Keep,
}

#[derive(Debug, Clone)]
pub struct Phase {
    pub anchor: String,
    pub action: PatchAction,
}

impl Phase {
    pub fn replace(anchor: &str, line: String) -> Self {
        Self {
            anchor: anchor.to_string(),
            action: PatchAction::Replace(line),
        }
    }

    pub fn insert_below(anchor: &str, lines: Vec<String>) -> Self {
        Self {
            anchor: anchor.to_string(),
            action: PatchAction::InsertBelow(lines),
        }
    }

    pub fn rewrite(anchor: &str, from: &str, to: &str) -> Self {
        Self {
            anchor: anchor.to_string(),
            action: PatchAction::RewriteToken {
                from: from.to_string(),
                to: to.to_string(),
            },
        }
    }

    pub fn keep(anchor: &str) -> Self {
        Self {
            anchor: anchor.to_string(),
            action: PatchAction::Keep,
        }
    }
}

/// Terminal state of the phase cursor after one scan. `completed < total`
/// means the template ran out of lines before every anchor was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchReport {
    pub completed: usize,
    pub total: usize,
}

impl PatchReport {
    pub fn is_complete(self) -> bool {
        self.completed == self.total
    }
}

/// Run one scan, applying each phase at the first line (in document order)
/// that contains its anchor substring.
pub fn apply(lines: &[String], phases: &[Phase]) -> (Vec<String>, PatchReport) {
    let mut out = Vec::with_capacity(lines.len());
    let mut cursor = 0;

    for line in lines {
        match phases.get(cursor) {
            Some(phase) if line.contains(&phase.anchor) => {
                match &phase.action {
                    PatchAction::Replace(new) => out.push(new.clone()),
                    PatchAction::InsertBelow(block) => {
                        out.push(line.clone());
                        out.extend(block.iter().cloned());
                    }
                    PatchAction::RewriteToken { from, to } => {
                        out.push(line.replace(from.as_str(), to))
                    }
                    PatchAction::Keep => out.push(line.clone()),
                }
                cursor += 1;
            }
            _ => out.push(line.clone()),
        }
    }

    (
        out,
        PatchReport {
            completed: cursor,
            total: phases.len(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ordered_anchors_all_complete() {
        let input = lines(&["noise", "A = old", "more noise", "B = old", "x", "C = old"]);
        let phases = vec![
            Phase::replace("A", "A = 1".into()),
            Phase::replace("B", "B = 2".into()),
            Phase::replace("C", "C = 3".into()),
        ];

        let (out, report) = apply(&input, &phases);
        assert_eq!(report.completed, 3);
        assert!(report.is_complete());
        assert_eq!(out, lines(&["noise", "A = 1", "more noise", "B = 2", "x", "C = 3"]));
    }

    #[test]
    fn insert_below_preserves_order_and_following_content() {
        let input = lines(&["SOURCES =", "tail"]);
        let phases = vec![Phase::insert_below(
            "SOURCES",
            lines(&["one.c \\", "two.c \\"]),
        )];

        let (out, report) = apply(&input, &phases);
        assert!(report.is_complete());
        assert_eq!(out, lines(&["SOURCES =", "one.c \\", "two.c \\", "tail"]));
    }

    #[test]
    fn duplicate_anchors_are_independent_slots() {
        let input = lines(&["CC = gcc", "between", "CC = gcc"]);
        let phases = vec![
            Phase::rewrite("CC = ", "gcc", "g++"),
            Phase::rewrite("CC = ", "gcc", "g++"),
        ];

        let (out, report) = apply(&input, &phases);
        assert!(report.is_complete());
        assert_eq!(out, lines(&["CC = g++", "between", "CC = g++"]));
    }

    #[test]
    fn inserted_lines_are_never_rescanned() {
        // the inserted line carries the next phase's anchor; only the
        // original occurrence further down may satisfy it
        let input = lines(&["FIRST", "SECOND = old"]);
        let phases = vec![
            Phase::insert_below("FIRST", lines(&["SECOND decoy"])),
            Phase::replace("SECOND", "SECOND = new".into()),
        ];

        let (out, report) = apply(&input, &phases);
        assert!(report.is_complete());
        assert_eq!(out, lines(&["FIRST", "SECOND decoy", "SECOND = new"]));
    }

    #[test]
    fn missing_anchor_reports_partial_completion() {
        let input = lines(&["A here", "no more anchors"]);
        let phases = vec![Phase::keep("A"), Phase::keep("B"), Phase::keep("C")];

        let (out, report) = apply(&input, &phases);
        assert_eq!(report.completed, 1);
        assert_eq!(report.total, 3);
        assert!(!report.is_complete());
        // partial patch is still handed back, not rolled back
        assert_eq!(out, input);
    }

    #[test]
    fn out_of_order_anchor_is_not_matched_early() {
        let input = lines(&["B = old", "A = old"]);
        let phases = vec![
            Phase::replace("A", "A = new".into()),
            Phase::replace("B", "B = new".into()),
        ];

        let (out, report) = apply(&input, &phases);
        assert_eq!(report.completed, 1);
        assert_eq!(out, lines(&["B = old", "A = new"]));
    }
}
