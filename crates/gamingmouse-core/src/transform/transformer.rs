// GamingMouse Transform - Event Transformers
// Scroll rewriting steps that make up a transformer chain

use std::fmt;

use crate::config::{Bidirectional, Distance};
use crate::input::{InputEvent, InputEventKind, ScrollEvent, PIXELS_PER_LINE};

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    fn delta_mut(self, scroll: &mut ScrollEvent) -> &mut f64 {
        match self {
            Axis::Vertical => &mut scroll.delta_y,
            Axis::Horizontal => &mut scroll.delta_x,
        }
    }
}

/// Negates scroll deltas on the selected axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverseScrolling {
    pub vertical: bool,
    pub horizontal: bool,
}

impl ReverseScrolling {
    fn apply(&self, scroll: &mut ScrollEvent) {
        if self.vertical {
            scroll.delta_y = -scroll.delta_y;
        }
        if self.horizontal {
            scroll.delta_x = -scroll.delta_x;
        }
    }
}

/// Replaces the magnitude of one axis with a fixed distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScrolling {
    pub axis: Axis,
    pub distance: Distance,
}

impl LinearScrolling {
    fn apply(&self, scroll: &mut ScrollEvent) {
        let continuous = scroll.continuous;
        let delta = self.axis.delta_mut(scroll);
        if *delta == 0.0 {
            return;
        }

        let sign = delta.signum();
        match self.distance {
            Distance::Auto => {}
            Distance::Line(lines) => {
                let lines = f64::from(lines);
                *delta = sign * if continuous { lines * PIXELS_PER_LINE } else { lines };
            }
            Distance::Pixel(pixels) => {
                *delta = sign * if continuous { pixels } else { pixels / PIXELS_PER_LINE };
            }
        }
    }
}

/// Scales scroll deltas and adds a constant speed per axis.
///
/// Discrete (line) scrolling only emits whole lines; the fractional part is
/// carried over to the next event on the same axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AccelerationSpeed {
    pub acceleration: Bidirectional<f64>,
    pub speed: Bidirectional<f64>,
    remainder_x: f64,
    remainder_y: f64,
}

impl AccelerationSpeed {
    pub fn new(acceleration: Bidirectional<f64>, speed: Bidirectional<f64>) -> Self {
        Self {
            acceleration,
            speed,
            remainder_x: 0.0,
            remainder_y: 0.0,
        }
    }

    /// Pending fractional lines per axis (horizontal, vertical)
    pub fn remainder(&self) -> (f64, f64) {
        (self.remainder_x, self.remainder_y)
    }

    fn adjust(value: f64, acceleration: Option<f64>, speed: Option<f64>) -> f64 {
        if value == 0.0 {
            return 0.0;
        }
        value * acceleration.unwrap_or(1.0) + value.signum() * speed.unwrap_or(0.0)
    }

    fn quantize(value: f64, remainder: &mut f64) -> f64 {
        let total = value + *remainder;
        let whole = total.trunc();
        *remainder = total - whole;
        whole
    }

    /// Returns false when the event should be dropped
    fn apply(&mut self, scroll: &mut ScrollEvent) -> bool {
        if scroll.is_zero() {
            return true;
        }

        let dx = Self::adjust(scroll.delta_x, self.acceleration.horizontal, self.speed.horizontal);
        let dy = Self::adjust(scroll.delta_y, self.acceleration.vertical, self.speed.vertical);

        if scroll.continuous {
            scroll.delta_x = dx;
            scroll.delta_y = dy;
            return true;
        }

        scroll.delta_x = Self::quantize(dx, &mut self.remainder_x);
        scroll.delta_y = Self::quantize(dy, &mut self.remainder_y);
        !scroll.is_zero()
    }

    fn reset(&mut self) {
        self.remainder_x = 0.0;
        self.remainder_y = 0.0;
    }
}

/// One step of a transformer chain
#[derive(Debug, Clone, PartialEq)]
pub enum EventTransformer {
    ReverseScrolling(ReverseScrolling),
    LinearScrolling(LinearScrolling),
    AccelerationSpeed(AccelerationSpeed),
}

impl EventTransformer {
    pub fn reverse(vertical: bool, horizontal: bool) -> Self {
        Self::ReverseScrolling(ReverseScrolling {
            vertical,
            horizontal,
        })
    }

    pub fn linear(axis: Axis, distance: Distance) -> Self {
        Self::LinearScrolling(LinearScrolling { axis, distance })
    }

    pub fn acceleration_speed(acceleration: Bidirectional<f64>, speed: Bidirectional<f64>) -> Self {
        Self::AccelerationSpeed(AccelerationSpeed::new(acceleration, speed))
    }

    /// Transform one event. `None` means the event is consumed.
    ///
    /// Events other than scrolling pass through untouched.
    pub fn transform(&mut self, event: InputEvent) -> Option<InputEvent> {
        let InputEventKind::Scroll(mut scroll) = event.kind else {
            return Some(event);
        };

        match self {
            Self::ReverseScrolling(reverse) => reverse.apply(&mut scroll),
            Self::LinearScrolling(linear) => linear.apply(&mut scroll),
            Self::AccelerationSpeed(adjust) => {
                if !adjust.apply(&mut scroll) {
                    return None;
                }
            }
        }

        Some(InputEvent::scroll(scroll, event.source))
    }

    /// Resume after the owning chain becomes active again
    pub fn activate(&mut self) {}

    /// Suspend while another chain is active; drops carried state
    pub fn deactivate(&mut self) {
        if let Self::AccelerationSpeed(adjust) = self {
            adjust.reset();
        }
    }

    /// Whether this transformer carries state across events
    pub fn is_stateful(&self) -> bool {
        matches!(self, Self::AccelerationSpeed(_))
    }
}

impl fmt::Display for EventTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReverseScrolling(r) => write!(
                f,
                "ReverseScrolling(vertical={}, horizontal={})",
                r.vertical, r.horizontal
            ),
            Self::LinearScrolling(l) => write!(f, "LinearScrolling({}, {})", l.axis, l.distance),
            Self::AccelerationSpeed(a) => write!(
                f,
                "AccelerationSpeed(acceleration={:?}/{:?}, speed={:?}/{:?})",
                a.acceleration.vertical, a.acceleration.horizontal, a.speed.vertical, a.speed.horizontal
            ),
        }
    }
}
