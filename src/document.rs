use crate::{
    font::Font,
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Add a font to the document structure. Fonts are stored "globally" within the
    /// document, such that any page can refer to it by the returned id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document structure. Images are stored "globally" within
    /// the document, such that any page can access and re-use images by referring
    /// to the returned id.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Render the entire document into memory, returning the bytes of the PDF.
    ///
    /// Object numbers are allocated in a fixed order and no timestamps are taken
    /// from the clock, so the same document always renders to the same bytes.
    pub fn render(self) -> Result<Vec<u8>, PDFError> {
        let Document {
            info,
            pages,
            fonts,
            images,
        } = self;

        if pages.is_empty() {
            return Err(PDFError::NoPages);
        }

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.allocate(RefType::Catalog);
        let page_tree_id = refs.allocate(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.allocate(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, page) in pages.iter().enumerate() {
            page.write(&mut refs, page_index, &fonts, &images, &mut writer)?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        Ok(writer.finish())
    }

    /// Write the entire document to the writer. The document is rendered in memory
    /// first (see [Document::render]), so nothing is written if rendering fails.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let bytes = self.render()?;
        w.write_all(bytes.as_slice()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;

    #[test]
    fn empty_document_is_rejected() {
        assert!(matches!(Document::default().render(), Err(PDFError::NoPages)));
    }

    #[test]
    fn single_page_renders_a_pdf() {
        let mut doc = Document::default();
        doc.add_font(Font::Helvetica);
        doc.add_page(Page::new(pagesize::A4, None));
        let bytes = doc.render().expect("renders");
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/BaseFont /Helvetica"));
        assert!(text.contains("/Encoding /WinAnsiEncoding"));
    }

    #[test]
    fn rendering_is_reproducible() {
        let build = || {
            let mut doc = Document::default();
            doc.set_info(Info::new().title("Same").clone());
            doc.add_font(Font::Courier);
            doc.add_page(Page::new(pagesize::A4, None));
            doc.render().expect("renders")
        };
        assert_eq!(build(), build());
    }
}
