use std::path::Path;

use crate::error::IoError;
use crate::image::{ImageSize, RgbImage};

/// Reads an RGB image from the given file path.
///
/// The method tries to read from any image format supported by the image
/// crate. Grayscale and RGBA inputs are converted to RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB image containing the decoded data.
pub fn read_image_rgb8(file_path: impl AsRef<Path>) -> Result<RgbImage, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    // decode the data directly from memory
    let img = image::ImageReader::new(std::io::Cursor::new(&mmap))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let image = match img.color() {
        image::ColorType::L8
        | image::ColorType::La8
        | image::ColorType::Rgb8
        | image::ColorType::Rgba8 => RgbImage::new(size, img.into_rgb8().into_raw())?,
        color => return Err(IoError::UnsupportedColorType(color)),
    };

    Ok(image)
}
