// GamingMouse Config Model - Scrolling
// Scrolling settings group and the scroll distance value type

use std::fmt;
use std::str::FromStr;

use super::field::{Bidirectional, Field, Merge};

/// Scroll distance override for one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    /// Keep the natural distance
    Auto,
    /// Fixed number of lines per event
    Line(u32),
    /// Fixed number of pixels per event
    Pixel(f64),
}

/// Error parsing a distance string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid scroll distance: {0}")]
pub struct DistanceParseError(pub String);

impl FromStr for Distance {
    type Err = DistanceParseError;

    /// Accepts `auto`, a line count (`3`) or a pixel count (`36px`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Distance::Auto);
        }

        if let Some(pixels) = trimmed.strip_suffix("px") {
            return match pixels.trim().parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => Ok(Distance::Pixel(value)),
                _ => Err(DistanceParseError(s.to_string())),
            };
        }

        trimmed
            .parse::<u32>()
            .map(Distance::Line)
            .map_err(|_| DistanceParseError(s.to_string()))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Auto => write!(f, "auto"),
            Distance::Line(lines) => write!(f, "{}", lines),
            Distance::Pixel(pixels) => write!(f, "{}px", pixels),
        }
    }
}

/// Scrolling settings group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scrolling {
    /// Reverse scrolling per axis
    pub reverse: Field<Bidirectional<bool>>,
    /// Fixed scroll distance per axis
    pub distance: Field<Bidirectional<Distance>>,
    /// Scroll acceleration multiplier per axis
    pub acceleration: Field<Bidirectional<f64>>,
    /// Additive scroll speed adjustment per axis
    pub speed: Field<Bidirectional<f64>>,
}

impl Scrolling {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reverse(mut self, reverse: Bidirectional<bool>) -> Self {
        self.reverse = Some(reverse).into();
        self
    }

    pub fn with_distance(mut self, distance: Bidirectional<Distance>) -> Self {
        self.distance = Some(distance).into();
        self
    }

    pub fn with_acceleration(mut self, acceleration: Bidirectional<f64>) -> Self {
        self.acceleration = Some(acceleration).into();
        self
    }

    pub fn with_speed(mut self, speed: Bidirectional<f64>) -> Self {
        self.speed = Some(speed).into();
        self
    }

    /// Whether no field appeared at all
    pub fn is_unset(&self) -> bool {
        !(self.reverse.is_present()
            || self.distance.is_present()
            || self.acceleration.is_present()
            || self.speed.is_present())
    }
}

impl Merge for Scrolling {
    fn merge_into(&self, target: &mut Self) {
        self.reverse.merge_into(&mut target.reverse);
        self.distance.merge_into(&mut target.distance);
        self.acceleration.merge_into(&mut target.acceleration);
        self.speed.merge_into(&mut target.speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_parse() {
        assert_eq!("auto".parse::<Distance>().unwrap(), Distance::Auto);
        assert_eq!("AUTO".parse::<Distance>().unwrap(), Distance::Auto);
        assert_eq!("3".parse::<Distance>().unwrap(), Distance::Line(3));
        assert_eq!("36px".parse::<Distance>().unwrap(), Distance::Pixel(36.0));
        assert_eq!("12.5 px".parse::<Distance>().unwrap(), Distance::Pixel(12.5));
    }

    #[test]
    fn test_distance_parse_errors() {
        assert!("".parse::<Distance>().is_err());
        assert!("-2".parse::<Distance>().is_err());
        assert!("fastpx".parse::<Distance>().is_err());
        assert!("-4px".parse::<Distance>().is_err());
        assert!("lines".parse::<Distance>().is_err());
    }

    #[test]
    fn test_distance_display() {
        assert_eq!(Distance::Auto.to_string(), "auto");
        assert_eq!(Distance::Line(3).to_string(), "3");
        assert_eq!(Distance::Pixel(40.0).to_string(), "40px");
    }

    #[test]
    fn test_merge_fields_independently() {
        let mut base = Scrolling::new()
            .with_reverse(Bidirectional::vertical(true))
            .with_acceleration(Bidirectional::vertical(2.0));
        let overlay = Scrolling::new()
            .with_distance(Bidirectional::horizontal(Distance::Line(2)))
            .with_acceleration(Bidirectional::horizontal(0.5));

        overlay.merge_into(&mut base);

        assert_eq!(base.reverse, Field::Value(Bidirectional::vertical(true)));
        assert_eq!(
            base.distance,
            Field::Value(Bidirectional::horizontal(Distance::Line(2)))
        );
        assert_eq!(base.acceleration, Field::Value(Bidirectional::both(2.0, 0.5)));
        assert_eq!(base.speed, Field::Unset);
    }

    #[test]
    fn test_later_overrides_earlier() {
        let mut base = Scrolling::new().with_distance(Bidirectional::horizontal(Distance::Line(1)));
        Scrolling::new()
            .with_distance(Bidirectional::horizontal(Distance::Pixel(20.0)))
            .merge_into(&mut base);

        assert_eq!(
            base.distance.value().unwrap().horizontal,
            Some(Distance::Pixel(20.0))
        );
    }

    #[test]
    fn test_is_unset() {
        assert!(Scrolling::new().is_unset());
        let mut scrolling = Scrolling::new();
        scrolling.speed = Field::Empty;
        assert!(!scrolling.is_unset());
    }
}
