use super::{Grid, check_border, output_size, transform_rows};
use crate::error::UpnError;

/// Render a grid as a standalone SVG document
///
/// Every black module becomes a unit square in a single path; the view box is
/// one unit per module, so the document scales without blurring.
pub fn to_svg<G: Grid + ?Sized>(grid: &G, border: i32) -> Result<String, UpnError> {
    let offset = border;
    let border = check_border(border)?;
    let to_paths = |x: i32, y: i32, module: bool| {
        module.then(|| format!("M{},{}h1v1h-1z", x + offset, y + offset))
    };
    let parts: Vec<String> = transform_rows(grid, border, to_paths)
        .flatten()
        .flatten()
        .collect();
    let box_size = output_size(grid, border);

    tracing::trace!(box_size, squares = parts.len(), "rendered SVG");

    Ok(format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg" version="1.1" viewBox="0 0 {box_size} {box_size}" stroke="none">
	<rect width="100%" height="100%" fill="#FFFFFF"/>
	<path d="{path}" fill="#000000"/>
</svg>
"##,
        box_size = box_size,
        path = parts.join(" ")
    ))
}
