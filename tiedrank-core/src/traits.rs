//! Core trait definitions shared across the tiedrank crates.

/// A type that carries a numeric score (classifier output, posterior, etc.).
pub trait Scored {
    /// The score value.
    fn score(&self) -> f64;
}

impl Scored for f64 {
    fn score(&self) -> f64 {
        *self
    }
}

impl<L> Scored for (L, f64) {
    fn score(&self) -> f64 {
        self.1
    }
}

impl<T: Scored + ?Sized> Scored for &T {
    fn score(&self) -> f64 {
        (**self).score()
    }
}

/// A type that can produce a summary of its contents.
pub trait Summarizable {
    /// A one-line summary suitable for display.
    fn summary(&self) -> String;
}
