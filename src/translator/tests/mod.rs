//! Translator tests, grouped by query feature.

mod combine;
mod statement;
mod subquery;
mod support;
