// GamingMouse Config Model - Mergeable Fields
// Three-state optional settings and per-axis value pairs

/// Types that can be layered: `self` is merged on top of `target`.
pub trait Merge {
    fn merge_into(&self, target: &mut Self);
}

/// A mergeable settings field.
///
/// Distinguishes a field that never appeared (`Unset`) from one that appeared
/// without any values (`Empty`) and one that carries values (`Value`).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field<T> {
    #[default]
    Unset,
    Empty,
    Value(T),
}

impl<T> Field<T> {
    /// Whether the field appeared at all
    pub fn is_present(&self) -> bool {
        !matches!(self, Field::Unset)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Default + Clone> Field<T> {
    /// The carried value, or the default for `Unset`/`Empty`
    pub fn resolved(&self) -> T {
        self.value().cloned().unwrap_or_default()
    }
}

impl<T: Merge + Default> Merge for Field<T> {
    /// Layer `self` over `target`.
    ///
    /// `Unset` leaves the target untouched. `Empty` marks the target present
    /// without erasing anything. `Value` merges into the target's value.
    fn merge_into(&self, target: &mut Self) {
        match self {
            Field::Unset => {}
            Field::Empty => {
                if let Field::Unset = target {
                    *target = Field::Empty;
                }
            }
            Field::Value(value) => match target {
                Field::Value(existing) => value.merge_into(existing),
                _ => {
                    let mut merged = T::default();
                    value.merge_into(&mut merged);
                    *target = Field::Value(merged);
                }
            },
        }
    }
}

/// A value per scroll axis, each independently optional
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bidirectional<T> {
    pub vertical: Option<T>,
    pub horizontal: Option<T>,
}

impl<T> Default for Bidirectional<T> {
    fn default() -> Self {
        Self {
            vertical: None,
            horizontal: None,
        }
    }
}

impl<T> Bidirectional<T> {
    pub fn new(vertical: Option<T>, horizontal: Option<T>) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    pub fn vertical(value: T) -> Self {
        Self::new(Some(value), None)
    }

    pub fn horizontal(value: T) -> Self {
        Self::new(None, Some(value))
    }

    pub fn both(vertical: T, horizontal: T) -> Self {
        Self::new(Some(vertical), Some(horizontal))
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }
}

impl<T: Clone> Merge for Bidirectional<T> {
    fn merge_into(&self, target: &mut Self) {
        if let Some(vertical) = &self.vertical {
            target.vertical = Some(vertical.clone());
        }
        if let Some(horizontal) = &self.horizontal {
            target.horizontal = Some(horizontal.clone());
        }
    }
}

impl<T> From<Option<Bidirectional<T>>> for Field<Bidirectional<T>> {
    fn from(value: Option<Bidirectional<T>>) -> Self {
        match value {
            None => Field::Unset,
            Some(pair) if pair.is_empty() => Field::Empty,
            Some(pair) => Field::Value(pair),
        }
    }
}
