//! Text and JSON typing reporters

use crate::errors::Result;
use crate::features::points_to::domain::{AnalysisStats, Conflict, TypingReport, VariableTyping};
use crate::features::points_to::ports::TypingReporter;
use serde::Serialize;

/// One line per variable, then conflicts, then statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReporter;

impl TypingReporter for TextReporter {
    fn report(
        &self,
        typing: &TypingReport,
        conflicts: &[Conflict],
        stats: &AnalysisStats,
    ) -> Result<String> {
        let width = typing
            .iter()
            .map(|t| t.variable.len())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for t in typing.iter() {
            out.push_str(&format!("{:<width$} : {}\n", t.variable, t.rendered, width = width));
        }

        if !conflicts.is_empty() {
            out.push_str(&format!("\nconflicts ({}):\n", conflicts.len()));
            for conflict in conflicts {
                out.push_str(&format!("  - {}\n", conflict));
            }
        }

        out.push_str(&format!(
            "\nstatements: {}, unions: {}, finds: {}, ecrs: {}, classes: {}, conflicts: {} ({:.3} ms)\n",
            stats.statements_processed,
            stats.union_operations,
            stats.find_operations,
            stats.ecr_count,
            stats.equivalence_classes,
            stats.conflicts,
            stats.duration_ms,
        ));
        Ok(out)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    variables: &'a [VariableTyping],
    conflicts: &'a [Conflict],
    stats: &'a AnalysisStats,
}

/// `serde_json` document with `variables`, `conflicts` and `stats`
#[derive(Debug, Clone, Copy)]
pub struct JsonReporter {
    pub pretty: bool,
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl TypingReporter for JsonReporter {
    fn report(
        &self,
        typing: &TypingReport,
        conflicts: &[Conflict],
        stats: &AnalysisStats,
    ) -> Result<String> {
        let doc = JsonReport {
            variables: &typing.variables,
            conflicts,
            stats,
        };
        let json = if self.pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::points_to::domain::{EcrId, TermShape};
    use pretty_assertions::assert_eq;

    fn sample() -> (TypingReport, Vec<Conflict>, AnalysisStats) {
        let typing = TypingReport::new(vec![
            VariableTyping {
                variable: "x".into(),
                ecr: EcrId(0),
                shape: TermShape::Unknown,
                conflicted: true,
                rendered: "#0:unknown!".into(),
            },
            VariableTyping {
                variable: "f.p".into(),
                ecr: EcrId(3),
                shape: TermShape::Base,
                conflicted: false,
                rendered: "#3:base".into(),
            },
        ]);
        let conflicts = vec![Conflict::TypeConflict {
            ecr: EcrId(0),
            names: vec!["x".into(), "y".into()],
            left: TermShape::Base,
            right: TermShape::Ref,
        }];
        let stats = AnalysisStats {
            statements_processed: 3,
            union_operations: 4,
            find_operations: 10,
            ecr_count: 6,
            equivalence_classes: 3,
            conflicts: 1,
            duration_ms: 0.5,
        };
        (typing, conflicts, stats)
    }

    #[test]
    fn test_text_report() {
        let (typing, conflicts, stats) = sample();
        let out = TextReporter.report(&typing, &conflicts, &stats).unwrap();
        assert_eq!(
            out,
            "f.p : #3:base\n\
             x   : #0:unknown!\n\
             \n\
             conflicts (1):\n  \
             - type conflict at #0 {x, y}: base vs ref\n\
             \n\
             statements: 3, unions: 4, finds: 10, ecrs: 6, classes: 3, conflicts: 1 (0.500 ms)\n"
        );
    }

    #[test]
    fn test_json_report() {
        let (typing, conflicts, stats) = sample();
        let out = JsonReporter { pretty: false }
            .report(&typing, &conflicts, &stats)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["variables"][0]["variable"], "f.p");
        assert_eq!(value["variables"][1]["rendered"], "#0:unknown!");
        assert_eq!(value["variables"][1]["conflicted"], true);
        assert_eq!(value["conflicts"][0]["kind"], "type_conflict");
        assert_eq!(value["stats"]["union_operations"], 4);
    }
}
