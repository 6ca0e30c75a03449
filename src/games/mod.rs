//! Game implementations.

pub(crate) mod digit_span;
