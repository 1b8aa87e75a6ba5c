use crate::refs::{ObjectReferences, RefType};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("image has no pixels")]
    Empty,
}

pub enum RasterImageType {
    /// JPEG bytes that can be embedded as-is with the DCT filter
    DirectlyEmbeddableJpeg(Vec<u8>),
    Image(DynamicImage),
}

/// A raster image stored in the document and placed on pages through
/// [`ImageLayout`](crate::ImageLayout)s
pub struct Image {
    pub image: RasterImageType,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    grey: bool,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load a PNG, JPEG, or any other raster format the `image` crate can guess
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, ImageError> {
        let data = std::fs::read(path.as_ref())?;
        Self::new_from_bytes(data)
    }

    pub fn new_from_bytes(data: Vec<u8>) -> Result<Image, ImageError> {
        let format = image::guess_format(&data)?;
        let image = image::load_from_memory_with_format(&data, format)?;

        match (format, image.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => {
                // we can embed it directly!
                let (width, height) = image.dimensions();
                Self::check_size(width, height)?;
                Ok(Image {
                    image: RasterImageType::DirectlyEmbeddableJpeg(data),
                    width,
                    height,
                })
            }
            _ => Self::new_raster(image),
        }
    }

    pub fn new_raster(image: DynamicImage) -> Result<Image, ImageError> {
        let (width, height) = image.dimensions();
        Self::check_size(width, height)?;
        Ok(Image {
            image: RasterImageType::Image(image),
            width,
            height,
        })
    }

    fn check_size(width: u32, height: u32) -> Result<(), ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::Empty);
        }
        Ok(())
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    fn encode(&self) -> EncodeOutput {
        match &self.image {
            RasterImageType::DirectlyEmbeddableJpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                grey: false,
                mask: None,
            },
            RasterImageType::Image(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<_> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                // single channel rasters (scan codes) stay single channel
                let grey = matches!(image.color(), ColorType::L8 | ColorType::L16);
                let bytes = if grey {
                    compress_to_vec_zlib(image.to_luma8().as_raw(), level)
                } else {
                    compress_to_vec_zlib(image.to_rgb8().as_raw(), level)
                };

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    grey,
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.allocate(RefType::Image(image_index));
        let encoded = self.encode();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.allocate(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        if encoded.grey {
            image.color_space().device_gray();
        } else {
            image.color_space().device_rgb();
        }
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}
