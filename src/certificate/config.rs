//! Everything about the certificate's look that isn't the record itself.
//!
//! Every setting has a default, so a TOML file only needs the values it wants to
//! change. Lengths are given in points and colours as `#RRGGBB` strings:
//!
//! ```
//! use cert_gen::certificate::CertificateConfig;
//! use cert_gen::Pt;
//!
//! let config = CertificateConfig::from_toml_str(r##"
//!     [palette]
//!     accent = "#1E90FF"
//!
//!     [spacing]
//!     single_line_step = 18.0
//! "##).expect("valid config");
//!
//! assert_eq!(config.spacing.single_line_step, Pt(18.0));
//! assert_eq!(config.text.wordmark, "CPF3.org");
//! ```

use super::CertificateError;
use crate::colour::{colours, Colour};
use crate::font::Font;
use crate::layout::PageGeometry;
use crate::pagesize::A4;
use crate::units::{Mm, Pt};
use serde::Deserialize;

pub const DEFAULT_MARGIN: Mm = Mm(15.0);

pub const DEFAULT_HEX_SIZE: Pt = Pt(15.0);
pub const DEFAULT_HEX_LINE_WIDTH: Pt = Pt(0.5);

pub const DEFAULT_TITLE: &str = "CPF3 PVMS CERTIFICATE";
pub const DEFAULT_INTRO: [&str; 2] = [
    "The Authority referred hereunder hereby certifies that files and data in the Project",
    "below existed at the Registration Date.",
];
pub const DEFAULT_PROJECT_SECTION: &str = "Project Data";
pub const DEFAULT_TIMESTAMPING_SECTION: &str = "Timestamping Data";
pub const DEFAULT_WORDMARK: &str = "CPF3.org";

pub const DEFAULT_TITLE_SIZE: Pt = Pt(32.0);
pub const DEFAULT_SUBTITLE_SIZE: Pt = Pt(14.0);
pub const DEFAULT_INTRO_SIZE: Pt = Pt(11.0);
pub const DEFAULT_SECTION_SIZE: Pt = Pt(20.0);
pub const DEFAULT_LABEL_SIZE: Pt = Pt(10.0);
pub const DEFAULT_VALUE_SIZE: Pt = Pt(9.0);
pub const DEFAULT_WORDMARK_SIZE: Pt = Pt(22.0);

pub const DEFAULT_HEADER_HEIGHT: Mm = Mm(50.0);
/// Baseline of the banner title, above the bottom of the banner
pub const DEFAULT_TITLE_OFFSET: Mm = Mm(30.0);
/// Baseline of the certificate id, above the bottom of the banner
pub const DEFAULT_SUBTITLE_OFFSET: Mm = Mm(15.0);
/// First intro line, below the top margin
pub const DEFAULT_INTRO_TOP: Mm = Mm(65.0);
pub const DEFAULT_INTRO_LINE_GAP: Mm = Mm(5.0);
pub const DEFAULT_INTRO_GAP: Mm = Mm(15.0);
pub const DEFAULT_UNDERLINE_DROP: Mm = Mm(2.0);
pub const DEFAULT_UNDERLINE_WIDTH: Pt = Pt(3.0);
pub const DEFAULT_SECTION_HEADER_GAP: Mm = Mm(12.0);
pub const DEFAULT_FIELD_INDENT: Mm = Mm(15.0);
pub const DEFAULT_LABEL_WIDTH: Mm = Mm(40.0);
pub const DEFAULT_RIGHT_GUTTER: Mm = Mm(15.0);
pub const DEFAULT_SINGLE_LINE_STEP: Mm = Mm(7.0);
pub const DEFAULT_LINE_STEP: Mm = Mm(4.0);
pub const DEFAULT_TRAILING_GAP: Mm = Mm(3.0);
pub const DEFAULT_SEPARATOR_BEFORE: Mm = Mm(5.0);
pub const DEFAULT_SEPARATOR_AFTER: Mm = Mm(10.0);
pub const DEFAULT_SEPARATOR_LENGTH: Mm = Mm(100.0);
pub const DEFAULT_SEPARATOR_WIDTH: Pt = Pt(1.0);
pub const DEFAULT_BORDER_WIDTH: Pt = Pt(2.0);
pub const DEFAULT_WORDMARK_BASELINE: Mm = Mm(30.0);

pub const DEFAULT_LOGO_WIDTH: Mm = Mm(45.0);
pub const DEFAULT_LOGO_HEIGHT: Mm = Mm(22.0);
pub const DEFAULT_LOGO_BOTTOM: Mm = Mm(38.0);

pub const DEFAULT_SCAN_CODE_SIZE: Mm = Mm(25.0);
/// Left edge of the scan code, measured from the right margin
pub const DEFAULT_SCAN_CODE_RIGHT_INSET: Mm = Mm(30.0);
pub const DEFAULT_SCAN_CODE_BOTTOM: Mm = Mm(25.0);
pub const DEFAULT_MODULE_PIXELS: u32 = 10;
pub const DEFAULT_QUIET_ZONE: u32 = 1;
pub const MAX_MODULE_PIXELS: u32 = 32;
pub const MAX_QUIET_ZONE: u32 = 16;

/// Complete description of a certificate's appearance
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CertificateConfig {
    pub page: PageGeometry,
    pub text: TextConfig,
    pub fonts: FontConfig,
    pub palette: Palette,
    pub spacing: Spacing,
    pub background: BackgroundConfig,
    pub logo: LogoConfig,
    pub scan_code: ScanCodeConfig,
}

/// The fixed wording printed on every certificate
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    pub title: String,
    pub intro: Vec<String>,
    pub project_section: String,
    pub timestamping_section: String,
    pub wordmark: String,
}

/// Font roles and their sizes
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Banner, subtitle and introduction
    pub regular: Font,
    /// Headings, labels and the wordmark
    pub bold: Font,
    /// Field values
    pub mono: Font,
    pub title_size: Pt,
    pub subtitle_size: Pt,
    pub intro_size: Pt,
    pub section_size: Pt,
    pub label_size: Pt,
    pub value_size: Pt,
    pub wordmark_size: Pt,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub banner: Colour,
    pub banner_text: Colour,
    pub intro: Colour,
    pub heading: Colour,
    pub accent: Colour,
    pub label: Colour,
    pub value: Colour,
    pub separator: Colour,
    pub background: Colour,
    pub wordmark: Colour,
    pub border: Colour,
}

/// Vertical rhythm and horizontal layout of the page
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Spacing {
    pub header_height: Pt,
    pub title_offset: Pt,
    pub subtitle_offset: Pt,
    pub intro_top: Pt,
    pub intro_line_gap: Pt,
    pub intro_gap: Pt,
    pub underline_drop: Pt,
    pub underline_width: Pt,
    pub section_header_gap: Pt,
    pub field_indent: Pt,
    pub label_width: Pt,
    pub right_gutter: Pt,
    pub single_line_step: Pt,
    pub line_step: Pt,
    pub trailing_gap: Pt,
    pub separator_before: Pt,
    pub separator_after: Pt,
    pub separator_length: Pt,
    pub separator_width: Pt,
    pub border_width: Pt,
    pub wordmark_baseline: Pt,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    /// Hexagon radius
    pub hex_size: Pt,
    pub line_width: Pt,
}

/// The box the logo is fitted into, centred on the page
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoConfig {
    pub width: Pt,
    pub height: Pt,
    pub bottom: Pt,
}

/// How much damage a scan code can recover from
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
pub enum ErrorCorrection {
    /// About 7%
    #[default]
    L,
    /// About 15%
    M,
    /// About 25%
    Q,
    /// About 30%
    H,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanCodeConfig {
    pub size: Pt,
    pub right_inset: Pt,
    pub bottom: Pt,
    pub error_correction: ErrorCorrection,
    /// Raster pixels per module
    pub module_pixels: u32,
    /// Light border around the code, in modules
    pub quiet_zone: u32,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        CertificateConfig {
            page: PageGeometry::new_unchecked(A4.0, A4.1, DEFAULT_MARGIN.into()),
            text: TextConfig::default(),
            fonts: FontConfig::default(),
            palette: Palette::default(),
            spacing: Spacing::default(),
            background: BackgroundConfig::default(),
            logo: LogoConfig::default(),
            scan_code: ScanCodeConfig::default(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        TextConfig {
            title: DEFAULT_TITLE.to_string(),
            intro: DEFAULT_INTRO.iter().map(|l| l.to_string()).collect(),
            project_section: DEFAULT_PROJECT_SECTION.to_string(),
            timestamping_section: DEFAULT_TIMESTAMPING_SECTION.to_string(),
            wordmark: DEFAULT_WORDMARK.to_string(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            regular: Font::Helvetica,
            bold: Font::HelveticaBold,
            mono: Font::Courier,
            title_size: DEFAULT_TITLE_SIZE,
            subtitle_size: DEFAULT_SUBTITLE_SIZE,
            intro_size: DEFAULT_INTRO_SIZE,
            section_size: DEFAULT_SECTION_SIZE,
            label_size: DEFAULT_LABEL_SIZE,
            value_size: DEFAULT_VALUE_SIZE,
            wordmark_size: DEFAULT_WORDMARK_SIZE,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            banner: colours::SLATE,
            banner_text: colours::WHITE,
            intro: colours::CHARCOAL,
            heading: colours::BLACK,
            accent: colours::ORANGE,
            label: colours::BLACK,
            value: colours::CHARCOAL,
            separator: colours::SILVER,
            background: colours::MIST,
            wordmark: colours::SLATE,
            border: colours::BLACK,
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing {
            header_height: DEFAULT_HEADER_HEIGHT.into(),
            title_offset: DEFAULT_TITLE_OFFSET.into(),
            subtitle_offset: DEFAULT_SUBTITLE_OFFSET.into(),
            intro_top: DEFAULT_INTRO_TOP.into(),
            intro_line_gap: DEFAULT_INTRO_LINE_GAP.into(),
            intro_gap: DEFAULT_INTRO_GAP.into(),
            underline_drop: DEFAULT_UNDERLINE_DROP.into(),
            underline_width: DEFAULT_UNDERLINE_WIDTH,
            section_header_gap: DEFAULT_SECTION_HEADER_GAP.into(),
            field_indent: DEFAULT_FIELD_INDENT.into(),
            label_width: DEFAULT_LABEL_WIDTH.into(),
            right_gutter: DEFAULT_RIGHT_GUTTER.into(),
            single_line_step: DEFAULT_SINGLE_LINE_STEP.into(),
            line_step: DEFAULT_LINE_STEP.into(),
            trailing_gap: DEFAULT_TRAILING_GAP.into(),
            separator_before: DEFAULT_SEPARATOR_BEFORE.into(),
            separator_after: DEFAULT_SEPARATOR_AFTER.into(),
            separator_length: DEFAULT_SEPARATOR_LENGTH.into(),
            separator_width: DEFAULT_SEPARATOR_WIDTH,
            border_width: DEFAULT_BORDER_WIDTH,
            wordmark_baseline: DEFAULT_WORDMARK_BASELINE.into(),
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig {
            hex_size: DEFAULT_HEX_SIZE,
            line_width: DEFAULT_HEX_LINE_WIDTH,
        }
    }
}

impl Default for LogoConfig {
    fn default() -> Self {
        LogoConfig {
            width: DEFAULT_LOGO_WIDTH.into(),
            height: DEFAULT_LOGO_HEIGHT.into(),
            bottom: DEFAULT_LOGO_BOTTOM.into(),
        }
    }
}

impl Default for ScanCodeConfig {
    fn default() -> Self {
        ScanCodeConfig {
            size: DEFAULT_SCAN_CODE_SIZE.into(),
            right_inset: DEFAULT_SCAN_CODE_RIGHT_INSET.into(),
            bottom: DEFAULT_SCAN_CODE_BOTTOM.into(),
            error_correction: ErrorCorrection::default(),
            module_pixels: DEFAULT_MODULE_PIXELS,
            quiet_zone: DEFAULT_QUIET_ZONE,
        }
    }
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}

fn require_positive(name: &str, value: Pt) -> Result<(), CertificateError> {
    if value.0 > 0.0 {
        Ok(())
    } else {
        Err(CertificateError::InvalidConfig(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

fn require_non_negative(name: &str, value: Pt) -> Result<(), CertificateError> {
    if value.0 >= 0.0 {
        Ok(())
    } else {
        Err(CertificateError::InvalidConfig(format!(
            "{name} must not be negative, got {value}"
        )))
    }
}

impl CertificateConfig {
    pub fn from_toml_str(s: &str) -> Result<CertificateConfig, CertificateError> {
        let config: CertificateConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Width available to field values, right of the label column
    pub fn field_max_width(&self) -> Pt {
        self.page.content_width() - self.spacing.label_width - self.spacing.right_gutter
    }

    /// Reject configurations that can't produce a sensible page. Page geometry is
    /// already checked when it is constructed.
    pub fn validate(&self) -> Result<(), CertificateError> {
        let fonts = &self.fonts;
        for (name, size) in [
            ("fonts.title_size", fonts.title_size),
            ("fonts.subtitle_size", fonts.subtitle_size),
            ("fonts.intro_size", fonts.intro_size),
            ("fonts.section_size", fonts.section_size),
            ("fonts.label_size", fonts.label_size),
            ("fonts.value_size", fonts.value_size),
            ("fonts.wordmark_size", fonts.wordmark_size),
        ] {
            require_positive(name, size)?;
        }

        let spacing = &self.spacing;
        for (name, length) in [
            ("spacing.header_height", spacing.header_height),
            ("spacing.single_line_step", spacing.single_line_step),
            ("spacing.line_step", spacing.line_step),
            ("spacing.trailing_gap", spacing.trailing_gap),
            ("spacing.label_width", spacing.label_width),
            ("spacing.right_gutter", spacing.right_gutter),
            ("spacing.intro_gap", spacing.intro_gap),
            ("spacing.section_header_gap", spacing.section_header_gap),
            ("spacing.separator_before", spacing.separator_before),
            ("spacing.separator_after", spacing.separator_after),
        ] {
            require_non_negative(name, length)?;
        }
        require_positive("field value column", self.field_max_width())?;

        require_positive("background.hex_size", self.background.hex_size)?;
        require_positive("logo.width", self.logo.width)?;
        require_positive("logo.height", self.logo.height)?;
        require_positive("scan_code.size", self.scan_code.size)?;
        if !(1..=MAX_MODULE_PIXELS).contains(&self.scan_code.module_pixels) {
            return Err(CertificateError::InvalidConfig(format!(
                "scan_code.module_pixels must be between 1 and {MAX_MODULE_PIXELS}"
            )));
        }
        if self.scan_code.quiet_zone > MAX_QUIET_ZONE {
            return Err(CertificateError::InvalidConfig(format!(
                "scan_code.quiet_zone must be at most {MAX_QUIET_ZONE}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CertificateConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page.margin(), Pt::from(Mm(15.0)));
        assert_eq!(config.scan_code.error_correction, ErrorCorrection::L);
        assert_eq!(config.text.intro.len(), 2);
    }

    #[test]
    fn default_value_column_is_125_mm() {
        // 210 - 30 - 40 - 15
        let width = Mm::from(CertificateConfig::default().field_max_width());
        assert!((width.0 - 125.0).abs() < 1e-2);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = CertificateConfig::from_toml_str("").expect("valid");
        assert_eq!(config, CertificateConfig::default());
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = CertificateConfig::from_toml_str(
            r##"
            [fonts]
            mono = "courier-bold"

            [scan_code]
            error_correction = "H"

            [palette]
            accent = "#1E90FF"
            "##,
        )
        .expect("valid");
        assert_eq!(config.fonts.mono, Font::CourierBold);
        assert_eq!(config.fonts.value_size, DEFAULT_VALUE_SIZE);
        assert_eq!(config.scan_code.error_correction, ErrorCorrection::H);
        assert_eq!(config.palette.accent, Colour::new_rgb_bytes(0x1E, 0x90, 0xFF));
        assert_eq!(config.palette.separator, colours::SILVER);
    }

    #[test]
    fn page_geometry_is_validated_when_read() {
        let result = CertificateConfig::from_toml_str(
            r#"
            [page]
            width = 100.0
            height = 100.0
            margin = 60.0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_hex_size() {
        let result = CertificateConfig::from_toml_str(
            r#"
            [background]
            hex_size = 0.0
            "#,
        );
        assert!(matches!(result, Err(CertificateError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_label_column_wider_than_page() {
        let mut config = CertificateConfig::default();
        config.spacing.label_width = Pt(2000.0);
        assert!(matches!(
            config.validate(),
            Err(CertificateError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_bad_colours_and_unknown_keys() {
        assert!(CertificateConfig::from_toml_str("[palette]\naccent = \"orange\"").is_err());
        assert!(CertificateConfig::from_toml_str("[spacing]\nkerning = 1.0").is_err());
    }

    #[test]
    fn scan_code_raster_settings_are_bounded() {
        for toml in [
            "[scan_code]\nquiet_zone = 3000000000",
            "[scan_code]\nquiet_zone = 17",
            "[scan_code]\nmodule_pixels = 0",
            "[scan_code]\nmodule_pixels = 1000",
        ] {
            assert!(
                matches!(
                    CertificateConfig::from_toml_str(toml),
                    Err(CertificateError::InvalidConfig(_))
                ),
                "{toml} should be rejected"
            );
        }

        let config = CertificateConfig::from_toml_str(
            "[scan_code]\nquiet_zone = 16\nmodule_pixels = 32",
        )
        .expect("largest settings are valid");
        assert_eq!(config.scan_code.quiet_zone, MAX_QUIET_ZONE);
        assert_eq!(config.scan_code.module_pixels, MAX_MODULE_PIXELS);
    }
}
