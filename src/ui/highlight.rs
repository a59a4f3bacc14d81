use crate::ui::span::Span;
use crate::ui::style::Style;
use regex::RegexBuilder;

/// One piece of a candidate label, split on query occurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: false,
        }
    }

    pub fn highlighted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: true,
        }
    }
}

/// Splits `label` around every case-insensitive occurrence of `query`.
///
/// Occurrences are found left to right and never overlap; back-to-back
/// occurrences each produce their own highlighted segment. The query is
/// escaped before compilation, so metacharacters match literally. A blank
/// query returns the label as a single plain segment.
pub fn highlight_match(label: &str, query: &str) -> Vec<Segment> {
    if label.is_empty() {
        return Vec::new();
    }
    if query.trim().is_empty() {
        return vec![Segment::plain(label)];
    }

    let Ok(pattern) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return vec![Segment::plain(label)];
    };

    let mut segments = Vec::new();
    let mut cursor = 0usize;
    for found in pattern.find_iter(label) {
        if found.start() > cursor {
            segments.push(Segment::plain(&label[cursor..found.start()]));
        }
        segments.push(Segment::highlighted(found.as_str()));
        cursor = found.end();
    }
    if cursor < label.len() {
        segments.push(Segment::plain(&label[cursor..]));
    }

    segments
}

pub fn segments_to_spans(
    segments: &[Segment],
    base_style: Style,
    highlight_style: Style,
) -> Vec<Span> {
    segments
        .iter()
        .map(|segment| {
            let style = if segment.highlighted {
                base_style.merge(highlight_style)
            } else {
                base_style
            };
            Span::styled(segment.text.clone(), style)
        })
        .collect()
}
