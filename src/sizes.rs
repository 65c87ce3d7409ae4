//! Sizes
//!
//! The four pizza sizes are a closed set. Anything arriving as a string (menu
//! files, UI events) is converted at the boundary; past that point an invalid
//! size is unrepresentable.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// A size name outside the enumerated set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown pizza size: {0}")]
pub struct UnknownSizeError(pub String);

/// The four pizza sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    /// 10" pizza.
    Small,

    /// 12" pizza.
    Medium,

    /// 14" pizza.
    Large,

    /// 16" pizza.
    ExtraLarge,
}

impl Size {
    /// All sizes, in menu order.
    pub const ALL: [Size; 4] = [Size::Small, Size::Medium, Size::Large, Size::ExtraLarge];

    /// Human-readable label for display output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
            Size::ExtraLarge => "Extra large",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
            Size::ExtraLarge => "extra_large",
        };

        write!(f, "{name}")
    }
}

impl FromStr for Size {
    type Err = UnknownSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(Size::Small),
            "medium" => Ok(Size::Medium),
            "large" => Ok(Size::Large),
            "extra_large" | "extra-large" => Ok(Size::ExtraLarge),
            other => Err(UnknownSizeError(other.to_string())),
        }
    }
}

/// A total per-size mapping: one value for every [`Size`], no missing entries
/// by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeTable<T> {
    small: T,
    medium: T,
    large: T,
    extra_large: T,
}

impl<T> SizeTable<T> {
    /// Build a table from one value per size.
    pub fn new(small: T, medium: T, large: T, extra_large: T) -> Self {
        Self {
            small,
            medium,
            large,
            extra_large,
        }
    }

    /// Build a table by calling `f` once per size.
    pub fn from_fn(mut f: impl FnMut(Size) -> T) -> Self {
        Self {
            small: f(Size::Small),
            medium: f(Size::Medium),
            large: f(Size::Large),
            extra_large: f(Size::ExtraLarge),
        }
    }

    /// The entry for `size`.
    pub fn get(&self, size: Size) -> &T {
        match size {
            Size::Small => &self.small,
            Size::Medium => &self.medium,
            Size::Large => &self.large,
            Size::ExtraLarge => &self.extra_large,
        }
    }

    /// The entry for `size`, mutably.
    pub fn get_mut(&mut self, size: Size) -> &mut T {
        match size {
            Size::Small => &mut self.small,
            Size::Medium => &mut self.medium,
            Size::Large => &mut self.large,
            Size::ExtraLarge => &mut self.extra_large,
        }
    }

    /// Replace the entry for `size`, returning the previous value.
    pub fn set(&mut self, size: Size, value: T) -> T {
        std::mem::replace(self.get_mut(size), value)
    }

    /// Iterate over `(size, value)` pairs in menu order.
    pub fn iter(&self) -> impl Iterator<Item = (Size, &T)> {
        [
            (Size::Small, &self.small),
            (Size::Medium, &self.medium),
            (Size::Large, &self.large),
            (Size::ExtraLarge, &self.extra_large),
        ]
        .into_iter()
    }
}

impl<T: Clone> SizeTable<T> {
    /// Build a table with the same value for every size.
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}
