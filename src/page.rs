use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::image::Image;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::{Content, Finish, Name, Pdf};

/// A font face and size used by a span of text
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single run of text drawn from a baseline origin
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    /// Baseline origin of the first glyph
    pub coords: (Pt, Pt),
}

/// Placement of a document image on a page
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
    RawContent(Vec<u8>),
}

/// A page of the document. Contents are drawn in insertion order, so later
/// items overlay earlier ones
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// The laid out contents
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize, margin: Option<Pt>) -> Page {
        let media_box = Rect::from_origin(Pt::ZERO, Pt::ZERO, size.0, size.1);
        Page {
            media_box,
            content_box: media_box.inset(margin.unwrap_or(Pt::ZERO)),
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    /// Add a span of text to the page
    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    /// Add an image to the page
    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    /// Add arbitrary pdf_writer::Content (paths, fills, ...) to the page
    pub fn add_content(&mut self, content: Content) {
        self.contents.push(PageContents::RawContent(content.finish()));
    }

    /// Iterate over every span of text on the page, in drawing order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().flat_map(|c| match c {
            PageContents::Text(spans) => spans.as_slice(),
            _ => &[][..],
        })
    }

    /// Iterate over every image placement on the page, in drawing order
    pub fn images(&self) -> impl Iterator<Item = &ImageLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Image(layout) => Some(layout),
            _ => None,
        })
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(PDFError::MissingReference("page"))?;
        let parent = refs
            .get(RefType::PageTree)
            .ok_or(PDFError::MissingReference("page tree"))?;
        let font_refs = fonts
            .iter()
            .map(|(font_id, _)| {
                refs.get(RefType::Font(font_id.index()))
                    .map(|r| (format!("F{}", font_id.index()), r))
                    .ok_or(PDFError::MissingReference("font"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let image_refs = images
            .iter()
            .map(|(image_id, _)| {
                refs.get(RefType::Image(image_id.index()))
                    .map(|r| (format!("I{}", image_id.index()), r))
                    .ok_or(PDFError::MissingReference("image"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rendered = render_contents(&self.contents, fonts)?;
        let content_id = refs.allocate(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (name, font_ref) in font_refs.iter() {
            resource_fonts.pair(Name(name.as_bytes()), *font_ref);
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (name, image_ref) in image_refs.iter() {
            resource_xobjects.pair(Name(name.as_bytes()), *image_ref);
        }
        resource_xobjects.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(content_id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);

        Ok(())
    }
}
