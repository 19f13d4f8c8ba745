//! Rounded-rectangle path construction

use tiny_skia::{Path, PathBuilder};

/// Build a closed square contour of side `total_size - 2 * inset`, offset by
/// `inset` from the surface origin, with quadratic corners of `radius`.
///
/// A zero radius yields degenerate corner curves, which renders the same as
/// a plain rectangle. Returns `None` when the geometry is not finite.
pub fn rounded_rect_path(total_size: f32, radius: f32, inset: f32) -> Option<Path> {
    let size = total_size - inset * 2.0;
    let (near, far) = (inset, inset + size);

    let mut pb = PathBuilder::new();
    pb.move_to(near + radius, near);
    pb.line_to(far - radius, near);
    pb.quad_to(far, near, far, near + radius);
    pb.line_to(far, far - radius);
    pb.quad_to(far, far, far - radius, far);
    pb.line_to(near + radius, far);
    pb.quad_to(near, far, near, far - radius);
    pb.line_to(near, near + radius);
    pb.quad_to(near, near, near + radius, near);
    pb.close();
    pb.finish()
}
