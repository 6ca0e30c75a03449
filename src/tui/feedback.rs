//! Styled text for the clock, result feedback and statistics.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::{diff, DiffRendering, MarkedChar, RoundResult, SessionStats};

/// Shown before the first round finishes.
pub const THINK_FACE: &str = "🤔";
/// Shown after a correct recall.
pub const THUMB_UP: &str = "👍";
/// Shown after a wrong recall.
pub const THUMB_DOWN: &str = "👎";
/// Prefix of the clock line.
pub const CLOCK: &str = "🕑";

/// Formats milliseconds as seconds with one decimal.
pub fn format_seconds(ms: i64) -> String {
    format!("{:.1}", ms as f64 / 1000.0)
}

/// Clock line, negative while revealing.
pub fn clock_line(elapsed_ms: i64) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{} ", CLOCK)),
        Span::styled(
            format_seconds(elapsed_ms),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Feedback for the most recent round.
pub fn feedback_line(last: Option<&RoundResult>) -> Line<'static> {
    let Some(result) = last else {
        return Line::from(THINK_FACE);
    };

    let thumb = if *result.success() { THUMB_UP } else { THUMB_DOWN };
    let mut spans = vec![Span::raw(format!(
        "{} ({}s)",
        thumb,
        format_seconds(*result.duration_ms())
    ))];

    if !*result.success() {
        spans.push(Span::raw("  "));
        spans.extend(diff_spans(&diff(
            result.number_to_guess(),
            result.number_guessed(),
        )));
    }
    Line::from(spans)
}

/// Turns a diff into spans: mismatches in red, fallback target struck.
pub fn diff_spans(rendering: &DiffRendering) -> Vec<Span<'static>> {
    match rendering {
        DiffRendering::Aligned { target, guessed } => {
            let mut spans = marked_spans(target);
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            spans.extend(marked_spans(guessed));
            spans
        }
        DiffRendering::Fallback { struck, guessed } => vec![
            Span::styled(
                struck.clone(),
                Style::default().add_modifier(Modifier::CROSSED_OUT),
            ),
            Span::raw(" "),
            Span::raw(guessed.clone()),
        ],
    }
}

fn marked_spans(chars: &[MarkedChar]) -> Vec<Span<'static>> {
    chars
        .iter()
        .map(|c| {
            if c.mismatch {
                Span::styled(
                    c.ch.to_string(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(c.ch.to_string())
            }
        })
        .collect()
}

/// One-line session summary.
pub fn stats_line(stats: &SessionStats) -> Line<'static> {
    let longest = stats
        .longest_span()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    Line::from(format!(
        "Rounds: {}   Correct: {}   Rate: {:.0}%   Longest span: {}",
        stats.total(),
        stats.successes(),
        stats.success_rate(),
        longest
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DigitCount, SpanNumber};

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(-4000), "-4.0");
        assert_eq!(format_seconds(1500), "1.5");
        assert_eq!(format_seconds(0), "0.0");
    }

    #[test]
    fn test_feedback_before_first_round() {
        assert_eq!(text(&feedback_line(None)), THINK_FACE);
    }

    #[test]
    fn test_feedback_success_has_no_diff() {
        let result = RoundResult::new(
            DigitCount::new(3),
            SpanNumber::from(427),
            SpanNumber::from(427),
            true,
            2300,
        );
        assert_eq!(text(&feedback_line(Some(&result))), "👍 (2.3s)");
    }

    #[test]
    fn test_feedback_failure_marks_mismatches() {
        let result = RoundResult::new(
            DigitCount::new(3),
            SpanNumber::from(427),
            SpanNumber::from(418),
            false,
            1200,
        );
        let line = feedback_line(Some(&result));
        assert_eq!(text(&line), "👎 (1.2s)  427 │ 418");

        let red: Vec<&str> = line
            .spans
            .iter()
            .filter(|s| s.style.fg == Some(Color::Red))
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(red, vec!["2", "7", "1", "8"]);
    }

    #[test]
    fn test_fallback_strikes_target() {
        let spans = diff_spans(&diff(&SpanNumber::from(42), &SpanNumber::from(123)));
        assert_eq!(spans[0].content, "42");
        assert!(spans[0].style.add_modifier.contains(Modifier::CROSSED_OUT));
        assert_eq!(spans[2].content, "123");
    }
}
