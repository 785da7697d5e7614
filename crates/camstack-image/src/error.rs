/// An error type for image container operations.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// The pixel buffer length does not match the image dimensions.
    #[error("Invalid pixel data length {0}, expected {1} ({2}x{3}x{4})")]
    InvalidPixelDataLength(usize, usize, usize, usize, usize),

    /// The requested image size is not valid.
    #[error("Invalid image size {0}x{1}")]
    InvalidImageSize(usize, usize),
}

/// An error type for image file reading.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open or map the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error to create the image container.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] ImageError),

    /// The decoded image has a color type the pipeline cannot consume.
    #[error("Unsupported image color type: {0:?}")]
    UnsupportedColorType(image::ColorType),
}
