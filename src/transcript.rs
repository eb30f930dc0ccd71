//! Plain-text rendering of a finalized mock interview

use crate::api::MockInterview;

/// Speaker shown for turns without one
const UNKNOWN_SPEAKER: &str = "Speaker";

/// Shown in place of a transcript when finalize produced nothing to render
pub const NO_INTERVIEW_OUTPUT: &str = "No interview output.";

/// Render a mock interview as plain text
///
/// Produces a title line, a scenario line, a blank line, each turn as
/// `speaker: message` followed by a blank line, and finally numbered coach
/// notes. Returns an empty string when there is no interview or it has no
/// `turns` list.
///
/// # Examples
///
/// ```
/// use chartroom::api::{InterviewTurn, MockInterview};
/// use chartroom::transcript::render_mock_interview;
///
/// let interview = MockInterview {
///     interview_title: Some("T".to_string()),
///     scenario: Some("S".to_string()),
///     turns: Some(vec![InterviewTurn {
///         speaker: Some("A".to_string()),
///         message: Some("hi".to_string()),
///     }]),
///     coach_notes: Some(vec!["note1".to_string()]),
/// };
/// assert_eq!(
///     render_mock_interview(Some(&interview)),
///     "Interview: T\nScenario: S\n\nA: hi\n\nCoach Notes:\n1. note1"
/// );
/// assert_eq!(render_mock_interview(None), "");
/// ```
pub fn render_mock_interview(interview: Option<&MockInterview>) -> String {
    let Some(interview) = interview else {
        return String::new();
    };
    let Some(turns) = interview.turns.as_ref() else {
        return String::new();
    };

    let mut lines: Vec<String> = Vec::with_capacity(turns.len() * 2 + 4);
    if let Some(title) = non_empty(&interview.interview_title) {
        lines.push(format!("Interview: {}", title));
    }
    if let Some(scenario) = non_empty(&interview.scenario) {
        lines.push(format!("Scenario: {}", scenario));
    }
    lines.push(String::new());

    for turn in turns {
        let speaker = non_empty(&turn.speaker).unwrap_or(UNKNOWN_SPEAKER);
        let message = turn.message.as_deref().unwrap_or_default();
        lines.push(format!("{}: {}", speaker, message));
        lines.push(String::new());
    }

    let notes = interview.coach_notes.as_deref().unwrap_or_default();
    if !notes.is_empty() {
        lines.push("Coach Notes:".to_string());
        lines.extend(
            notes
                .iter()
                .enumerate()
                .map(|(idx, note)| format!("{}. {}", idx + 1, note)),
        );
    }

    lines.join("\n").trim().to_string()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
