use {
    base::Rect,
    crates_image::{GrayImage, Luma},
    imageproc::drawing::draw_hollow_rect_mut,
};

// boxes are drawn this far inside the detected region
const REGION_INSET: u32 = 5;

const MARK: Luma<u8> = Luma([255]);

/// Copy of `gray` with a two pixel wide box around every region.
pub fn annotate(gray: &GrayImage, regions: &[Rect]) -> GrayImage {
    let mut canvas = gray.clone();
    for region in regions {
        for inset in [REGION_INSET, REGION_INSET + 1] {
            if let Some(r) = region.inset(inset) {
                let outline = imageproc::rect::Rect::at(r.x as i32, r.y as i32).of_size(r.width, r.height);
                draw_hollow_rect_mut(&mut canvas, outline, MARK);
            }
        }
    }
    canvas
}
