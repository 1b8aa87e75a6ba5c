use crate::font::Font;
use crate::units::Pt;

/// Calculate the width of a given string of text given the font and font size
pub fn width_of_text(text: &str, font: &Font, size: Pt) -> Pt {
    font.width_of_text(text, size)
}

/// The x coordinate at which `text` must start to be centred on `centre_x`
pub fn centred_start(text: &str, font: &Font, size: Pt, centre_x: Pt) -> Pt {
    centre_x - width_of_text(text, font, size) / 2.0
}

/// Splits `text` into lines in a character-by-character manner, splitting words at
/// the exact point they would overflow and not adding anything to either side. i.e.
/// if the input were "asdf asdf" and the line only fit 6 characters wide, this will
/// split the text into `["asdf a", "sdf"]`.
///
/// Characters are accumulated greedily: a character joins the current line if the
/// line, including it, still measures no more than `max_width`; otherwise the line
/// is finished and the character starts the next one. A character that is wider
/// than `max_width` on its own still gets a line to itself, so no text is ever
/// dropped and joining the lines gives back `text`.
///
/// An empty `text` produces no lines.
pub fn wrap_chars(text: &str, font: &Font, size: Pt, max_width: Pt) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    // running width in font units; identical to re-measuring `current` every time
    let mut current_units: u32 = 0;

    for ch in text.chars() {
        let advance = font.glyph_advance(ch);
        if Font::units_to_pt(current_units + advance, size) <= max_width {
            current.push(ch);
            current_units += advance;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push(ch);
            current_units = advance;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
