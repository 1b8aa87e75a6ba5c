//! Conversion of high-level page contents into a PDF content stream.

use crate::font::Font;
use crate::page::{PageContents, SpanFont, SpanLayout};
use crate::PDFError;
use id_arena::Arena;
use pdf_writer::{Content, Name, Str};

/// Renders page contents to an (uncompressed) PDF content stream, in order.
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, PDFError> {
    let mut stream: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                stream.extend(render_text_spans(spans, fonts)?);
            }
            PageContents::Image(image) => {
                let mut content = Content::new();
                content.save_state();
                content.transform([
                    image.position.width().0,
                    0.0,
                    0.0,
                    image.position.height().0,
                    image.position.x1.0,
                    image.position.y1.0,
                ]);
                content.x_object(Name(format!("I{}", image.image_id.index()).as_bytes()));
                content.restore_state();
                stream.extend(content.finish());
            }
            PageContents::RawContent(raw) => {
                stream.extend_from_slice(b"q\n");
                stream.extend_from_slice(raw);
                stream.extend_from_slice(b"\nQ\n");
            }
        }
    }

    Ok(stream)
}

fn render_text_spans(spans: &[SpanLayout], fonts: &Arena<Font>) -> Result<Vec<u8>, PDFError> {
    let mut content = Content::new();
    let Some(first) = spans.first() else {
        return Ok(Vec::default());
    };

    content.save_state();

    let mut current_colour = first.colour;
    current_colour.set_fill(&mut content);

    for span in spans.iter() {
        if fonts.get(span.font.id).is_none() {
            return Err(PDFError::MissingReference("font"));
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            current_colour.set_fill(&mut content);
        }

        let SpanFont { id, size } = span.font;
        content.begin_text();
        content.set_font(Name(format!("F{}", id.index()).as_bytes()), size.0);
        content.next_line(span.coords.0 .0, span.coords.1 .0);
        content.show(Str(&Font::encode(&span.text)));
        content.end_text();
    }

    content.restore_state();
    Ok(content.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::units::Pt;

    fn render(spans: Vec<SpanLayout>, fonts: &Arena<Font>) -> String {
        let bytes = render_contents(&[PageContents::Text(spans)], fonts).expect("renders");
        String::from_utf8(bytes).expect("ascii content")
    }

    #[test]
    fn text_is_positioned_and_encoded() {
        let mut fonts = Arena::new();
        let id = fonts.alloc(Font::Courier);
        let out = render(
            vec![SpanLayout {
                text: "a(b)中".into(),
                font: SpanFont { id, size: Pt(9.0) },
                colour: colours::BLACK,
                coords: (Pt(10.0), Pt(20.0)),
            }],
            &fonts,
        );
        assert!(out.contains("/F0 9 Tf"));
        assert!(out.contains("10 20 Td"));
        assert!(out.contains(r"(a\(b\)?) Tj"));
    }

    #[test]
    fn latin1_text_is_drawn_with_win_ansi_bytes() {
        let mut fonts = Arena::new();
        let id = fonts.alloc(Font::Helvetica);
        let bytes = render_contents(
            &[PageContents::Text(vec![SpanLayout {
                text: "Müller".into(),
                font: SpanFont { id, size: Pt(9.0) },
                colour: colours::BLACK,
                coords: (Pt(0.0), Pt(0.0)),
            }])],
            &fonts,
        )
        .expect("renders");
        // either a literal or a hex string, depending on how the operand is written
        let raw = bytes.windows(6).any(|w| w == b"M\xFCller");
        let hex = String::from_utf8_lossy(&bytes)
            .to_ascii_lowercase()
            .contains("<4dfc6c6c6572>");
        assert!(raw || hex);
        assert!(!String::from_utf8_lossy(&bytes).contains("M?ller"));
    }

    #[test]
    fn unknown_font_is_an_error() {
        let mut other: Arena<Font> = Arena::new();
        let id = other.alloc(Font::Helvetica);
        let fonts: Arena<Font> = Arena::new();
        let result = render_contents(
            &[PageContents::Text(vec![SpanLayout {
                text: "x".into(),
                font: SpanFont { id, size: Pt(9.0) },
                colour: colours::BLACK,
                coords: (Pt(0.0), Pt(0.0)),
            }])],
            &fonts,
        );
        assert!(matches!(result, Err(PDFError::MissingReference(_))));
    }
}
