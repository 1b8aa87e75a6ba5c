//! Drawing of the individual parts of a certificate onto a single page.
//!
//! A [`Composer`] owns the document being built. Its drawing methods that flow
//! down the page take the current baseline `y` and return where the next element
//! should start, so the vertical cursor is only ever a plain [`Pt`] threaded
//! through the calls.

use super::config::CertificateConfig;
use super::record::{CertificateRecord, FieldKey};
use super::scan_code::encode_scan_code;
use super::{CertificateError, Warning};
use crate::colour::Colour;
use crate::document::Document;
use crate::font::Font;
use crate::image::Image;
use crate::layout::{centred_start, wrap_chars, HexTiling};
use crate::page::{ImageLayout, Page, SpanFont, SpanLayout};
use crate::rect::Rect;
use crate::units::Pt;
use id_arena::Id;
use pdf_writer::Content;
use std::path::Path;
use tracing::{debug, warn};

/// Font, size and colour of a piece of text
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TextStyle {
    pub font: Id<Font>,
    pub size: Pt,
    pub colour: Colour,
}

/// How one field's value was laid out
#[derive(Clone, PartialEq, Debug)]
pub struct FieldLayout {
    pub label: String,
    /// Value lines from top to bottom. A single line for values that fit,
    /// including empty values.
    pub lines: Vec<String>,
    /// Baseline of the label and the first value line
    pub top: Pt,
}

/// The finished document and what happened while drawing it
pub struct Composition {
    pub document: Document,
    pub warnings: Vec<Warning>,
    pub fields: Vec<FieldLayout>,
    pub logo_placed: bool,
    pub scan_code_placed: bool,
}

pub struct Composer<'c> {
    config: &'c CertificateConfig,
    document: Document,
    page: Page,
    regular: Id<Font>,
    bold: Id<Font>,
    mono: Id<Font>,
    warnings: Vec<Warning>,
    fields: Vec<FieldLayout>,
    logo_placed: bool,
    scan_code_placed: bool,
}

impl<'c> Composer<'c> {
    /// Start a blank page using the configured geometry and fonts. The
    /// configuration is expected to have been validated already.
    pub fn new(config: &'c CertificateConfig) -> Composer<'c> {
        let mut document = Document::default();
        let regular = document.add_font(config.fonts.regular);
        let bold = document.add_font(config.fonts.bold);
        let mono = document.add_font(config.fonts.mono);
        let page = Page::new(config.page.size(), Some(config.page.margin()));

        Composer {
            config,
            document,
            page,
            regular,
            bold,
            mono,
            warnings: Vec::new(),
            fields: Vec::new(),
            logo_placed: false,
            scan_code_placed: false,
        }
    }

    /// The page as drawn so far
    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn fields(&self) -> &[FieldLayout] {
        &self.fields
    }

    fn style(&self, font: Id<Font>, size: Pt, colour: Colour) -> TextStyle {
        TextStyle { font, size, colour }
    }

    /// Width of `text` when drawn in `style`
    pub fn measure(&self, text: &str, style: &TextStyle) -> Pt {
        self.document.fonts[style.font].width_of_text(text, style.size)
    }

    /// Draw `text` with its baseline starting at `(x, y)`
    pub fn draw_text(&mut self, text: &str, style: TextStyle, x: Pt, y: Pt) {
        self.page.add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                id: style.font,
                size: style.size,
            },
            colour: style.colour,
            coords: (x, y),
        });
    }

    /// Draw `text` centred on the page, returning its width
    pub fn draw_centred(&mut self, text: &str, style: TextStyle, y: Pt) -> Pt {
        let font = &self.document.fonts[style.font];
        let x = centred_start(text, font, style.size, self.config.page.centre_x());
        let width = font.width_of_text(text, style.size);
        self.draw_text(text, style, x, y);
        width
    }

    fn stroke_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), colour: Colour, width: Pt) {
        let mut content = Content::new();
        colour.set_stroke(&mut content);
        content.set_line_width(width.0);
        content.move_to(from.0 .0, from.1 .0);
        content.line_to(to.0 .0, to.1 .0);
        content.stroke();
        self.page.add_content(content);
    }

    /// Honeycomb pattern over the whole page, under everything else
    pub fn draw_background(&mut self) {
        let config = self.config;
        let background = &config.background;
        let tiling = HexTiling::covering(self.page.width(), self.page.height(), background.hex_size);
        debug!(
            rows = tiling.rows(),
            cols = tiling.cols(),
            size = %background.hex_size,
            "tiling background"
        );

        let mut content = Content::new();
        tiling.draw(&mut content, config.palette.background, background.line_width);
        self.page.add_content(content);
    }

    /// Filled banner across the top of the content area, carrying the title and
    /// the certificate id
    pub fn draw_header(&mut self, certificate_id: &str) {
        let config = self.config;
        let spacing = &config.spacing;
        let margin = config.page.margin();
        let bottom = config.page.height() - margin - spacing.header_height;

        let mut content = Content::new();
        config.palette.banner.set_fill(&mut content);
        content.rect(
            margin.0,
            bottom.0,
            config.page.content_width().0,
            spacing.header_height.0,
        );
        content.fill_nonzero();
        self.page.add_content(content);

        let title = self.style(self.regular, config.fonts.title_size, config.palette.banner_text);
        self.draw_centred(&config.text.title, title, bottom + spacing.title_offset);

        let subtitle = self.style(
            self.regular,
            config.fonts.subtitle_size,
            config.palette.banner_text,
        );
        self.draw_centred(certificate_id, subtitle, bottom + spacing.subtitle_offset);
    }

    /// Centred introduction, one line every `intro_line_gap` starting at `y`
    pub fn draw_intro(&mut self, y: Pt) -> Pt {
        let config = self.config;
        let style = self.style(self.regular, config.fonts.intro_size, config.palette.intro);

        let mut line_y = y;
        for line in config.text.intro.iter() {
            self.draw_centred(line, style, line_y);
            line_y -= config.spacing.intro_line_gap;
        }

        y - config.spacing.intro_gap
    }

    /// Centred heading with an `accent` underline exactly as wide as the heading
    pub fn draw_section(&mut self, title: &str, y: Pt, accent: Colour) -> Pt {
        let config = self.config;
        let spacing = &config.spacing;
        let style = self.style(self.bold, config.fonts.section_size, config.palette.heading);

        let width = self.draw_centred(title, style, y);
        let centre = config.page.centre_x();
        let underline_y = y - spacing.underline_drop;
        self.stroke_line(
            (centre - width / 2.0, underline_y),
            (centre + width / 2.0, underline_y),
            accent,
            spacing.underline_width,
        );

        y - spacing.section_header_gap
    }

    /// Draw a label and its value, wrapping the value character by character
    /// when it is wider than the value column
    pub fn wrap_field(&mut self, label: &str, value: &str, x: Pt, y: Pt) -> Pt {
        let config = self.config;
        let spacing = &config.spacing;
        let label_style = self.style(self.bold, config.fonts.label_size, config.palette.label);
        let value_style = self.style(self.mono, config.fonts.value_size, config.palette.value);

        self.draw_text(label, label_style, x, y);

        let value_x = x + spacing.label_width;
        let max_width = config.field_max_width();

        let (lines, next_y) = if self.measure(value, &value_style) <= max_width {
            self.draw_text(value, value_style, value_x, y);
            (vec![value.to_string()], y - spacing.single_line_step)
        } else {
            let font = self.document.fonts[self.mono];
            let lines = wrap_chars(value, &font, value_style.size, max_width);
            let mut line_y = y;
            for line in lines.iter() {
                self.draw_text(line, value_style, value_x, line_y);
                line_y -= spacing.line_step;
            }
            let next_y = y - spacing.line_step * lines.len() as f32 - spacing.trailing_gap;
            (lines, next_y)
        };

        debug!(label, lines = lines.len(), "laid out field");
        self.fields.push(FieldLayout {
            label: label.to_string(),
            lines,
            top: y,
        });
        next_y
    }

    /// One [`Composer::wrap_field`] per key, in order, using each key's label
    pub fn draw_fields(
        &mut self,
        record: &CertificateRecord,
        keys: &[FieldKey],
        y: Pt,
    ) -> Result<Pt, CertificateError> {
        let x = self.config.page.margin() + self.config.spacing.field_indent;
        keys.iter().try_fold(y, |y, key| {
            let value = record.require(*key)?;
            Ok::<_, CertificateError>(self.wrap_field(key.label(), value, x, y))
        })
    }

    /// Short centred rule between sections
    pub fn draw_separator(&mut self, y: Pt) -> Pt {
        let config = self.config;
        let spacing = &config.spacing;
        let y = y - spacing.separator_before;
        let centre = config.page.centre_x();
        let half = spacing.separator_length / 2.0;
        self.stroke_line(
            (centre - half, y),
            (centre + half, y),
            config.palette.separator,
            spacing.separator_width,
        );
        y - spacing.separator_after
    }

    fn warn(&mut self, warning: Warning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    /// The wordmark, with the logo fitted into its box above it when one is
    /// given and can be loaded. Logo problems are recorded as warnings.
    pub fn draw_footer(&mut self, logo_path: Option<&Path>) {
        let config = self.config;
        let style = self.style(self.bold, config.fonts.wordmark_size, config.palette.wordmark);
        self.draw_centred(&config.text.wordmark, style, config.spacing.wordmark_baseline);

        let Some(path) = logo_path else {
            return;
        };
        if !path.exists() {
            self.warn(Warning::LogoMissing(path.to_path_buf()));
            return;
        }

        match Image::new_from_disk(path) {
            Ok(logo) => {
                let logo_box = Rect::from_origin(
                    config.page.centre_x() - config.logo.width / 2.0,
                    config.logo.bottom,
                    config.logo.width,
                    config.logo.height,
                );
                let position = logo_box.fit_aspect(logo.aspect_ratio());
                debug!(path = %path.display(), width = logo.width, height = logo.height, "placing logo");
                let image_id = self.document.add_image(logo);
                self.page.add_image(ImageLayout { image_id, position });
                self.logo_placed = true;
            }
            Err(e) => self.warn(Warning::LogoLoadFailure {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }

    /// Place a scan code encoding `url` with its bottom-left corner at `(x, y)`.
    /// Returns whether a code was placed; an empty url places nothing.
    pub fn embed_scan_code(&mut self, url: &str, x: Pt, y: Pt, size: Pt) -> bool {
        if url.is_empty() {
            return false;
        }

        let raster = match encode_scan_code(url, &self.config.scan_code) {
            Ok(raster) => raster,
            Err(e) => {
                self.warn(Warning::CodeEncodingFailure(e.to_string()));
                return false;
            }
        };
        let image = match Image::new_raster(raster) {
            Ok(image) => image,
            Err(e) => {
                self.warn(Warning::CodeEncodingFailure(e.to_string()));
                return false;
            }
        };
        debug!(url, modules = image.width, "placing scan code");

        let image_id = self.document.add_image(image);
        self.page.add_image(ImageLayout {
            image_id,
            position: Rect::from_origin(x, y, size, size),
        });
        self.scan_code_placed = true;
        true
    }

    /// Frame around the content area, drawn over everything else
    pub fn draw_border(&mut self) {
        let config = self.config;
        let frame = config.page.content_box();
        let mut content = Content::new();
        config.palette.border.set_stroke(&mut content);
        content.set_line_width(config.spacing.border_width.0);
        content.rect(frame.x1.0, frame.y1.0, frame.width().0, frame.height().0);
        content.stroke();
        self.page.add_content(content);
    }

    /// Put the page into the document and hand everything back
    pub fn finish(self) -> Composition {
        let Composer {
            mut document,
            page,
            warnings,
            fields,
            logo_placed,
            scan_code_placed,
            ..
        } = self;
        document.add_page(page);
        Composition {
            document,
            warnings,
            fields,
            logo_placed,
            scan_code_placed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageGeometry;
    use crate::page::PageContents;
    use crate::units::Mm;

    fn value_texts(composer: &Composer, x: Pt) -> Vec<String> {
        composer
            .page()
            .spans()
            .filter(|s| s.coords.0 == x)
            .map(|s| s.text.clone())
            .collect()
    }

    #[test]
    fn fitting_value_is_one_line_and_steps_once() {
        let mut config = CertificateConfig::default();
        config.spacing.single_line_step = Pt(7.0);
        let mut composer = Composer::new(&config);

        let next = composer.wrap_field("Status:", "abc", Pt(100.0), Pt(100.0));
        assert_eq!(next, Pt(93.0));

        let value_x = Pt(100.0) + config.spacing.label_width;
        assert_eq!(value_texts(&composer, value_x), vec!["abc"]);
        assert_eq!(composer.fields()[0].lines, vec!["abc"]);
    }

    #[test]
    fn overflowing_value_wraps_below_the_label() {
        // 108pt value column: exactly 20 Courier characters at 9pt
        let mut config = CertificateConfig::default();
        config.spacing.label_width = Pt(100.0);
        config.spacing.right_gutter = Pt(42.0);
        config.page = PageGeometry::new(Pt(300.0), Pt(400.0), Pt(25.0)).expect("valid");
        assert_eq!(config.field_max_width(), Pt(108.0));
        let mut composer = Composer::new(&config);

        let value = "a".repeat(60);
        let y = Pt(300.0);
        let next = composer.wrap_field("Fingerprint:", &value, Pt(40.0), y);

        let lines = &composer.fields()[0].lines;
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.len() == 20));

        let step = config.spacing.line_step;
        let expected = y - step * 3.0 - config.spacing.trailing_gap;
        assert!((next - expected).0.abs() < 1e-3);

        let value_spans: Vec<_> = composer
            .page()
            .spans()
            .filter(|s| s.coords.0 == Pt(140.0))
            .collect();
        assert_eq!(value_spans.len(), 3);
        assert_eq!(value_spans[1].coords.1, y - step);
    }

    #[test]
    fn empty_value_takes_a_single_line_step() {
        let config = CertificateConfig::default();
        let mut composer = Composer::new(&config);
        let next = composer.wrap_field("Policy:", "", Pt(50.0), Pt(200.0));
        assert_eq!(next, Pt(200.0) - config.spacing.single_line_step);
        assert_eq!(composer.fields()[0].lines, vec![String::new()]);
    }

    #[test]
    fn section_underline_matches_heading_width() {
        let config = CertificateConfig::default();
        let mut composer = Composer::new(&config);
        let next = composer.draw_section("Project Data", Pt(500.0), crate::colours::ORANGE);
        assert_eq!(next, Pt(500.0) - Pt::from(Mm(12.0)));

        let heading = composer.page().spans().next().expect("heading drawn");
        let width = Font::HelveticaBold.width_of_text("Project Data", Pt(20.0));
        assert!((heading.coords.0 - (config.page.centre_x() - width / 2.0)).0.abs() < 1e-3);

        let underline = composer
            .page()
            .contents
            .iter()
            .find_map(|c| match c {
                PageContents::RawContent(raw) => Some(String::from_utf8_lossy(raw).into_owned()),
                _ => None,
            })
            .expect("underline drawn");
        assert!(underline.contains("3 w"));
        assert!(underline.contains(" m\n") && underline.contains(" l\n"));
    }

    #[test]
    fn separator_moves_cursor_fifteen_mm() {
        let config = CertificateConfig::default();
        let mut composer = Composer::new(&config);
        let next = composer.draw_separator(Pt(400.0));
        assert!((Mm::from(Pt(400.0) - next).0 - 15.0).abs() < 1e-3);
    }

    #[test]
    fn intro_lines_are_centred_and_spaced() {
        let config = CertificateConfig::default();
        let mut composer = Composer::new(&config);
        let next = composer.draw_intro(Pt(600.0));
        let spans: Vec<_> = composer.page().spans().collect();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].coords.1, Pt(600.0));
        assert_eq!(spans[1].coords.1, Pt(600.0) - config.spacing.intro_line_gap);
        assert_eq!(next, Pt(600.0) - config.spacing.intro_gap);
    }

    #[test]
    fn missing_logo_only_warns() {
        let config = CertificateConfig::default();
        let mut composer = Composer::new(&config);
        composer.draw_footer(Some(Path::new("/definitely/not/here/logo.png")));
        assert!(matches!(composer.warnings(), [Warning::LogoMissing(_)]));
        assert_eq!(composer.page().images().count(), 0);
        assert!(composer.page().spans().any(|s| s.text == "CPF3.org"));
    }

    #[test]
    fn empty_url_places_no_scan_code() {
        let config = CertificateConfig::default();
        let mut composer = Composer::new(&config);
        assert!(!composer.embed_scan_code("", Pt(10.0), Pt(10.0), Pt(50.0)));
        assert!(composer.warnings().is_empty());
        assert_eq!(composer.page().images().count(), 0);
    }

    #[test]
    fn scan_code_fills_its_square() {
        let config = CertificateConfig::default();
        let mut composer = Composer::new(&config);
        assert!(composer.embed_scan_code("https://cpf3.org", Pt(10.0), Pt(20.0), Pt(50.0)));
        let placed = composer.page().images().next().expect("placed");
        assert_eq!(placed.position, Rect::from_origin(Pt(10.0), Pt(20.0), Pt(50.0), Pt(50.0)));
    }

    #[test]
    fn unencodable_url_warns_and_is_skipped() {
        let config = CertificateConfig::default();
        let mut composer = Composer::new(&config);
        let url = "x".repeat(5000);
        assert!(!composer.embed_scan_code(&url, Pt(10.0), Pt(10.0), Pt(50.0)));
        assert!(matches!(composer.warnings(), [Warning::CodeEncodingFailure(_)]));
    }

    #[test]
    fn oversized_scan_raster_warns_instead_of_panicking() {
        let mut config = CertificateConfig::default();
        config.scan_code.quiet_zone = 3_000_000_000;
        let mut composer = Composer::new(&config);
        assert!(!composer.embed_scan_code("https://cpf3.org", Pt(10.0), Pt(10.0), Pt(50.0)));
        assert!(matches!(composer.warnings(), [Warning::CodeEncodingFailure(_)]));
        assert_eq!(composer.page().images().count(), 0);
    }

    #[test]
    fn accented_values_are_drawn_as_written() {
        let config = CertificateConfig::default();
        let mut composer = Composer::new(&config);
        composer.wrap_field("Submitted By:", "Niccolò Müller", Pt(40.0), Pt(300.0));

        let value_x = Pt(40.0) + config.spacing.label_width;
        let drawn = value_texts(&composer, value_x).concat();
        assert_eq!(drawn, "Niccolò Müller");
        assert!(!Font::encode(&drawn).contains(&b'?'));
    }
}
