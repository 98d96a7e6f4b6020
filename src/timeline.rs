//! Fill level of the scroll-driven timeline bars.
//!
//! Positions are in CSS pixels; `top` values are viewport relative unless
//! stated otherwise.

/// Fraction of the events timeline that is filled.
///
/// Filling starts when the container's top reaches 70% of the viewport and
/// completes when its bottom reaches 30%.
#[must_use]
pub fn timeline_progress(
    container_top: f64,
    container_height: f64,
    viewport_height: f64,
    scroll_y: f64,
) -> f64 {
    let start = container_top - viewport_height * 0.70;
    let end = container_top + container_height - viewport_height * 0.30;

    if end <= start {
        return 1.0;
    }

    ((scroll_y - start) / (end - start)).clamp(0.0, 1.0)
}

/// Filled height in pixels for [`timeline_progress`].
#[must_use]
pub fn timeline_fill(
    container_top: f64,
    container_height: f64,
    viewport_height: f64,
    scroll_y: f64,
) -> f64 {
    timeline_progress(container_top, container_height, viewport_height, scroll_y) * container_height
}

/// Viewport-relative box of one step marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepMarker {
    pub top: f64,
    pub height: f64,
}

impl StepMarker {
    #[must_use]
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Span of the line joining the first and last step, relative to the
/// container's top. `None` when there is nothing to join.
#[must_use]
pub fn steps_line(container_top: f64, markers: &[StepMarker]) -> Option<(f64, f64)> {
    let (first, last) = match markers {
        [first, .., last] => (first, last),
        _ => return None,
    };

    let top = first.center() - container_top;
    let height = last.center() - first.center();

    (height > 0.0).then_some((top, height))
}

/// Fraction of the steps line that is filled.
///
/// Full once the last step's center reaches 35% of the viewport (or has
/// scrolled off), empty while the first step sits below 115%.
#[must_use]
pub fn steps_progress(first: StepMarker, last: StepMarker, viewport_height: f64, reduced_motion: bool) -> f64 {
    if reduced_motion {
        return 1.0;
    }

    let start = viewport_height * 1.15;
    let end = viewport_height * 0.35;

    if last.bottom() <= 0.0 || last.center() <= end {
        1.0
    } else if first.center() >= start {
        0.0
    } else if start - end <= 0.0 {
        1.0
    } else {
        ((start - last.center()) / (start - end)).clamp(0.0, 1.0)
    }
}
