// GamingMouse Transform - Transformer Chain
// Ordered transformers built from an effective scheme

use std::fmt;

use smallvec::SmallVec;

use super::transformer::{Axis, EventTransformer};
use crate::config::Scheme;
use crate::input::InputEvent;

/// Ordered list of transformers applied to each event.
///
/// An empty chain is the identity pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformerChain {
    transformers: SmallVec<[EventTransformer; 4]>,
    active: bool,
}

impl Default for TransformerChain {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformerChain {
    pub fn new() -> Self {
        Self {
            transformers: SmallVec::new(),
            active: true,
        }
    }

    /// Build the chain for an effective scheme.
    ///
    /// Order: reverse, horizontal distance, vertical distance, then
    /// acceleration/speed. Steps whose settings are neutral are left out.
    pub fn from_scheme(scheme: &Scheme) -> Self {
        let scrolling = scheme.scrolling();
        let mut chain = Self::new();

        if let Some(reverse) = scrolling.reverse.value() {
            let vertical = reverse.vertical.unwrap_or(false);
            let horizontal = reverse.horizontal.unwrap_or(false);
            if vertical || horizontal {
                chain.push(EventTransformer::reverse(vertical, horizontal));
            }
        }

        let distance = scrolling.distance.resolved();
        if let Some(horizontal) = distance.horizontal {
            chain.push(EventTransformer::linear(Axis::Horizontal, horizontal));
        }
        if let Some(vertical) = distance.vertical {
            chain.push(EventTransformer::linear(Axis::Vertical, vertical));
        }

        let acceleration = scrolling.acceleration.resolved();
        let speed = scrolling.speed.resolved();
        let accelerated = acceleration.vertical.unwrap_or(1.0) != 1.0
            || acceleration.horizontal.unwrap_or(1.0) != 1.0;
        let sped = speed.vertical.unwrap_or(0.0) != 0.0 || speed.horizontal.unwrap_or(0.0) != 0.0;
        if accelerated || sped {
            chain.push(EventTransformer::acceleration_speed(acceleration, speed));
        }

        chain
    }

    pub fn push(&mut self, transformer: EventTransformer) {
        self.transformers.push(transformer);
    }

    /// Run an event through every transformer in order.
    ///
    /// Stops early when a transformer consumes the event.
    pub fn transform(&mut self, event: InputEvent) -> Option<InputEvent> {
        self.transformers
            .iter_mut()
            .try_fold(event, |event, transformer| transformer.transform(event))
    }

    pub fn activate(&mut self) {
        self.active = true;
        for transformer in &mut self.transformers {
            transformer.activate();
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        for transformer in &mut self.transformers {
            transformer.deactivate();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    pub fn transformers(&self) -> &[EventTransformer] {
        &self.transformers
    }
}

impl fmt::Display for TransformerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, transformer) in self.transformers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", transformer)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Bidirectional, Distance, Scrolling};
    use crate::input::{InputEventKind, ScrollEvent};

    fn scheme(scrolling: Scrolling) -> Scheme {
        Scheme::new().with_scrolling(scrolling)
    }

    #[test]
    fn test_empty_scheme_builds_identity() {
        let mut chain = TransformerChain::from_scheme(&Scheme::new());
        assert!(chain.is_empty());

        let event = InputEvent::scroll(ScrollEvent::lines(1.0, 2.0), None);
        assert_eq!(chain.transform(event), Some(event));
    }

    #[test]
    fn test_reverse_false_is_omitted() {
        let chain = TransformerChain::from_scheme(&scheme(
            Scrolling::new().with_reverse(Bidirectional::both(false, false)),
        ));
        assert!(chain.is_empty());
    }

    #[test]
    fn test_full_chain_order() {
        let chain = TransformerChain::from_scheme(&scheme(
            Scrolling::new()
                .with_reverse(Bidirectional::horizontal(true))
                .with_distance(Bidirectional::both(Distance::Line(3), Distance::Auto))
                .with_speed(Bidirectional::vertical(1.0)),
        ));

        assert_eq!(
            chain.transformers(),
            &[
                EventTransformer::reverse(false, true),
                EventTransformer::linear(Axis::Horizontal, Distance::Auto),
                EventTransformer::linear(Axis::Vertical, Distance::Line(3)),
                EventTransformer::acceleration_speed(
                    Bidirectional::default(),
                    Bidirectional::vertical(1.0)
                ),
            ]
        );
    }

    #[test]
    fn test_neutral_acceleration_is_omitted() {
        let chain = TransformerChain::from_scheme(&scheme(
            Scrolling::new()
                .with_acceleration(Bidirectional::both(1.0, 1.0))
                .with_speed(Bidirectional::vertical(0.0)),
        ));
        assert!(chain.is_empty());
    }

    #[test]
    fn test_chain_applies_in_order() {
        let mut chain = TransformerChain::from_scheme(&scheme(
            Scrolling::new()
                .with_reverse(Bidirectional::vertical(true))
                .with_distance(Bidirectional::vertical(Distance::Line(3))),
        ));
        let out = chain
            .transform(InputEvent::scroll(ScrollEvent::lines(0.0, 1.0), None))
            .unwrap();
        assert_eq!(out.as_scroll().unwrap().delta_y, -3.0);
    }

    #[test]
    fn test_consumed_event_stops_chain() {
        let mut chain = TransformerChain::from_scheme(&scheme(
            Scrolling::new().with_acceleration(Bidirectional::vertical(0.25)),
        ));
        assert_eq!(
            chain.transform(InputEvent::scroll(ScrollEvent::lines(0.0, 1.0), None)),
            None
        );

        let click = InputEvent::new(InputEventKind::Button { button: 0, pressed: true }, None);
        assert_eq!(chain.transform(click), Some(click));
    }

    #[test]
    fn test_lifecycle_flag() {
        let mut chain = TransformerChain::new();
        assert!(chain.is_active());
        chain.deactivate();
        assert!(!chain.is_active());
        chain.activate();
        assert!(chain.is_active());
    }

    #[test]
    fn test_display() {
        let chain = TransformerChain::from_scheme(&scheme(
            Scrolling::new().with_reverse(Bidirectional::vertical(true)),
        ));
        assert_eq!(
            chain.to_string(),
            "[ReverseScrolling(vertical=true, horizontal=false)]"
        );
    }
}
