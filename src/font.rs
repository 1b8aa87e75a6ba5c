use crate::{
    refs::{ObjectReferences, RefType},
    Pt,
};
use id_arena::Id;
use pdf_writer::{Name, Pdf};
use serde::Deserialize;

/// One of the PDF standard Type1 fonts. These fonts are never embedded: every
/// conforming viewer ships them, and their advance widths are fixed by the Adobe
/// font metrics, which is what lets text be measured here exactly as the viewer
/// will draw it.
///
/// Text is encoded with `WinAnsiEncoding`, which covers printable ASCII, Latin-1
/// and a handful of typographic extras such as `€` and curly quotes. Any other
/// character is both measured and drawn as `?`.
///
/// Typically, fonts are referred to throughout user applications by their id within
/// the document itself (see [`Document::add_font`](crate::Document::add_font))
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

/// Glyph drawn in place of characters the encoding can't represent
pub const REPLACEMENT_CHAR: char = '?';

const UNITS_PER_EM: f32 = 1000.0;
const FIRST_CHAR: u8 = b' ';

/// Advance widths for ' ' ..= 'ÿ' in WinAnsiEncoding. Codes the encoding leaves
/// unassigned are zero; `encode_char` never produces them.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 224] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 224] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

const COURIER_WIDTH: u16 = 600;

impl Font {
    /// The PostScript name of the font, as written to the `BaseFont` entry
    pub fn base_font_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
            Font::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Font::Courier => "Courier",
            Font::CourierBold => "Courier-Bold",
            Font::CourierOblique => "Courier-Oblique",
            Font::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    pub fn is_monospaced(&self) -> bool {
        matches!(
            self,
            Font::Courier | Font::CourierBold | Font::CourierOblique | Font::CourierBoldOblique
        )
    }

    fn is_bold(&self) -> bool {
        matches!(
            self,
            Font::HelveticaBold
                | Font::HelveticaBoldOblique
                | Font::CourierBold
                | Font::CourierBoldOblique
        )
    }

    /// Map a character onto the byte the font will draw
    pub fn encode_char(ch: char) -> u8 {
        match ch {
            ' '..='~' | '\u{A0}'..='\u{FF}' => ch as u8,
            _ => win_ansi_extra(ch).unwrap_or(REPLACEMENT_CHAR as u8),
        }
    }

    /// Encode a string for a `Tj` operator
    pub fn encode(text: &str) -> Vec<u8> {
        text.chars().map(Font::encode_char).collect()
    }

    /// Advance width of a single character, in font units (1/1000 em)
    pub fn glyph_advance(&self, ch: char) -> u32 {
        if self.is_monospaced() {
            return COURIER_WIDTH as u32;
        }
        let table = if self.is_bold() {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        };
        table[(Font::encode_char(ch) - FIRST_CHAR) as usize] as u32
    }

    /// Sum of advance widths in font units. Integer sums keep measurement exact, so
    /// measuring a string piecewise gives the same answer as measuring it whole
    pub fn advance_units(&self, text: &str) -> u32 {
        text.chars().map(|ch| self.glyph_advance(ch)).sum()
    }

    /// Convert font units to a length at the given font size
    pub fn units_to_pt(units: u32, size: Pt) -> Pt {
        Pt(size.0 * units as f32 / UNITS_PER_EM)
    }

    /// Calculate the width of a string of text for the given font size
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        Font::units_to_pt(self.advance_units(text), size)
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_id = refs.allocate(RefType::Font(id.index()));
        writer
            .type1_font(font_id)
            .base_font(Name(self.base_font_name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

/// WinAnsi codes 0x80 ..= 0x9F, which differ from Latin-1
fn win_ansi_extra(ch: char) -> Option<u8> {
    let code = match ch {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn courier_is_fixed_pitch() {
        let font = Font::Courier;
        assert_eq!(font.width_of_text("a", Pt(10.0)), Pt(6.0));
        assert_eq!(font.width_of_text("iiii", Pt(10.0)), font.width_of_text("WWWW", Pt(10.0)));
        assert_eq!(font.width_of_text("", Pt(10.0)), Pt(0.0));
    }

    #[test]
    fn helvetica_uses_proportional_metrics() {
        assert_eq!(Font::Helvetica.advance_units("i"), 222);
        assert_eq!(Font::Helvetica.advance_units("W"), 944);
        assert_eq!(Font::HelveticaBold.advance_units("i"), 278);
        assert_eq!(Font::Helvetica.advance_units("Project"), 667 + 333 + 556 + 222 + 556 + 500 + 278);
        assert_eq!(Font::Helvetica.advance_units("@"), 1015);
        assert_eq!(Font::Helvetica.advance_units("~"), 584);
    }

    #[test]
    fn unsupported_characters_measure_as_replacement() {
        for font in [Font::Helvetica, Font::HelveticaBold, Font::Courier] {
            assert_eq!(font.advance_units("中"), font.advance_units("?"));
            assert_eq!(font.advance_units("Ā"), font.advance_units("?"));
            assert_eq!(font.advance_units("\t"), font.advance_units("?"));
        }
        assert_eq!(Font::encode("n中"), b"n?".to_vec());
    }

    #[test]
    fn latin1_names_keep_their_accents() {
        assert_eq!(Font::encode("Müller"), b"M\xFCller".to_vec());
        assert_eq!(Font::encode("Niccolò"), b"Niccol\xF2".to_vec());
        assert_eq!(Font::Helvetica.advance_units("ü"), 556);
        assert_eq!(Font::HelveticaBold.advance_units("ü"), 611);
        assert_eq!(
            Font::Helvetica.advance_units("Müller"),
            Font::Helvetica.advance_units("Mller") + 556
        );
        assert_eq!(Font::Helvetica.advance_units("Ä"), 667);
        assert_eq!(Font::Courier.advance_units("Müller"), 6 * 600);
    }

    #[test]
    fn typographic_extras_use_win_ansi_codes() {
        assert_eq!(Font::encode("€ – “ok”"), b"\x80 \x96 \x93ok\x94".to_vec());
        assert_eq!(Font::Helvetica.advance_units("€"), 556);
        assert_eq!(Font::Helvetica.advance_units("—"), 1000);
        assert_eq!(Font::HelveticaBold.advance_units("\u{201C}"), 500);
        assert_eq!(Font::encode("\u{81}"), b"?".to_vec());
    }

    #[test]
    fn measurement_is_additive() {
        let text = "C=US/O=DigiCert, Inc./CN=DigiCert SHA256 RSA4096";
        let (head, tail) = text.split_at(17);
        assert_eq!(
            Font::Helvetica.advance_units(text),
            Font::Helvetica.advance_units(head) + Font::Helvetica.advance_units(tail)
        );
    }
}
