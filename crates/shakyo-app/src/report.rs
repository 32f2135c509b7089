//! Plain-text document summaries for the command line.

use shakyo_core::document::NoteDocument;
use std::fmt::Write;

/// One line per document: id, title, stroke count, last update.
pub fn summary_line(document: &NoteDocument) -> String {
    format!(
        "{}\t{}\t{} strokes\t{}",
        document.id,
        document.title,
        document.stroke_count,
        document.updated_at.format("%Y-%m-%d %H:%M")
    )
}

/// Metadata followed by one line per stroke.
pub fn details(document: &NoteDocument) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id:       {}", document.id);
    let _ = writeln!(out, "title:    {}", document.title);
    let _ = writeln!(out, "group:    {}", document.group_id);
    let _ = writeln!(out, "created:  {}", document.created_at.to_rfc3339());
    let _ = writeln!(out, "updated:  {}", document.updated_at.to_rfc3339());
    let _ = writeln!(out, "strokes:  {}", document.stroke_count);

    for (index, stroke) in document.strokes.iter().enumerate() {
        let kind = if stroke.is_highlighter { "highlighter" } else { "pen" };
        let bounds = stroke.bounds();
        let _ = writeln!(
            out,
            "  #{:<3} {:<11} {} w={} points={} bounds=({:.0},{:.0})-({:.0},{:.0})",
            index,
            kind,
            stroke.color,
            stroke.width,
            stroke.len(),
            bounds.x0,
            bounds.y0,
            bounds.x1,
            bounds.y1
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use shakyo_core::color::HexColor;
    use shakyo_core::stroke::{Stroke, StrokeSet};

    fn document() -> NoteDocument {
        let stroke = Stroke::begin(Point::new(10.0, 20.0), HexColor::RED, 4.0, false)
            .with_point(Point::new(30.0, 40.0));
        let marker = Stroke::begin(Point::new(0.0, 0.0), HexColor::YELLOW, 12.0, true)
            .with_point(Point::new(5.0, 5.0));
        NoteDocument::with_id("doc-1", "Physics", "1-2", &StrokeSet::from_strokes(vec![stroke, marker]))
    }

    #[test]
    fn test_summary_line() {
        let line = summary_line(&document());
        assert!(line.starts_with("doc-1\tPhysics\t2 strokes\t"));
    }

    #[test]
    fn test_details_lists_strokes() {
        let text = details(&document());
        assert!(text.contains("group:    1-2"));
        assert!(text.contains("#0   pen         #ff0000 w=4 points=2 bounds=(10,20)-(30,40)"));
        assert!(text.contains("highlighter #ffff00 w=12"));
    }
}
