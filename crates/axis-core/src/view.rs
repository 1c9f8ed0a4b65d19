// File: crates/axis-core/src/view.rs
// Summary: Host input snapshot and the pan/zoom handlers that move axis ranges through their guarded setters.

use crate::axis::Axis;
use crate::geometry::PixelPoint;
use crate::scale::AxisTransform;

/// Input for one frame as seen by the plot canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    /// Cursor position; `None` when the cursor is outside the host window.
    pub mouse: Option<PixelPoint>,
    /// Drag movement this frame while the pan button is held.
    pub drag_delta: Option<PixelPoint>,
    /// Wheel movement; positive zooms in.
    pub scroll: f32,
    pub double_clicked: bool,
}

impl InputState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn hover(at: PixelPoint) -> Self {
        Self { mouse: Some(at), ..Self::default() }
    }

    pub fn drag(at: PixelPoint, dx: f32, dy: f32) -> Self {
        Self { mouse: Some(at), drag_delta: Some(PixelPoint::new(dx, dy)), ..Self::default() }
    }

    pub fn scroll(at: PixelPoint, steps: f32) -> Self {
        Self { mouse: Some(at), scroll: steps, ..Self::default() }
    }

    pub fn double_click(at: PixelPoint) -> Self {
        Self { mouse: Some(at), double_clicked: true, ..Self::default() }
    }
}

/// Move `axis` so its content follows a drag of `delta_px` pixels along the
/// axis' own pixel direction. Locked bounds stay put.
pub fn pan_axis(axis: &mut Axis, transform: &AxisTransform, delta_px: f32) -> bool {
    if delta_px == 0.0 || (axis.flags.lock_min && axis.flags.lock_max) {
        return false;
    }
    let r = axis.range();
    let new_min = transform.to_plot(transform.to_pixel(r.min) - delta_px);
    let new_max = transform.to_plot(transform.to_pixel(r.max) - delta_px);
    let min = if axis.flags.lock_min { r.min } else { new_min };
    let max = if axis.flags.lock_max { r.max } else { new_max };
    axis.set_range(min, max)
}

/// Zoom `axis` about the pixel `cursor_px`. The point under the cursor keeps
/// its pixel position; zooming out by one step undoes zooming in by one.
pub fn zoom_axis(axis: &mut Axis, transform: &AxisTransform, cursor_px: f32, scroll: f32, rate: f32) -> bool {
    if scroll == 0.0 || !(rate > 0.0 && rate < 1.0) || (axis.flags.lock_min && axis.flags.lock_max) {
        return false;
    }
    let r = axis.range();
    let p0 = transform.to_pixel(r.min);
    let p1 = transform.to_pixel(r.max);
    let size = p1 - p0;
    if size == 0.0 {
        return false;
    }
    let t = ((cursor_px - p0) / size).clamp(0.0, 1.0);
    let z = if scroll > 0.0 { rate } else { -rate / (1.0 - rate) };
    let new_min = transform.to_plot(p0 + size * t * z);
    let new_max = transform.to_plot(p1 - size * (1.0 - t) * z);
    let min = if axis.flags.lock_min { r.min } else { new_min };
    let max = if axis.flags.lock_max { r.max } else { new_max };
    axis.set_range(min, max)
}
