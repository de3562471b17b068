//! Read client facade over Liquity protocol state.
//!
//! Keep the public surface small and predictable: one query method per state
//! facet on [`Liquity`], configured through [`LiquityBuilder`].

pub mod builder;
pub mod core;
mod troves;

pub use builder::LiquityBuilder;
pub use core::Liquity;
