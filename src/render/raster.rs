use image::imageops::{self, FilterType};
use image::GrayImage;

use super::{Grid, check_border, output_size, transform_rows};
use crate::error::UpnError;

/// Flat row-major pixel buffer, 0 = black and 1 = white
pub fn to_pixels<G: Grid + ?Sized>(grid: &G, border: i32) -> Result<Vec<u8>, UpnError> {
    let border = check_border(border)?;
    let to_pixel = |_: i32, _: i32, module: bool| if module { 0u8 } else { 1u8 };
    Ok(transform_rows(grid, border, to_pixel).flatten().collect())
}

/// Render a grid as a grayscale image with one pixel per module
///
/// Use [`to_image_scaled`] or resize with nearest-neighbour filtering for a
/// larger image; any smoothing filter blurs the module edges.
pub fn to_image<G: Grid + ?Sized>(grid: &G, border: i32) -> Result<GrayImage, UpnError> {
    let side = output_size(grid, check_border(border)?);
    let too_large = UpnError::ImageTooLarge { side };
    let size = u32::try_from(side).map_err(|_| too_large.clone())?;
    let luma = to_pixels(grid, border)?.into_iter().map(|bit| bit * 255).collect();
    GrayImage::from_raw(size, size, luma).ok_or(too_large)
}

/// Render a grid with `scale` pixels per module
pub fn to_image_scaled<G: Grid + ?Sized>(
    grid: &G,
    border: i32,
    scale: u32,
) -> Result<GrayImage, UpnError> {
    let image = to_image(grid, border)?;
    let scale = scale.max(1);
    if scale == 1 {
        return Ok(image);
    }
    let (width, height) = image.dimensions();
    Ok(imageops::resize(
        &image,
        width * scale,
        height * scale,
        FilterType::Nearest,
    ))
}
