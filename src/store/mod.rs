//! Observable state containers.
//!
//! A [`Store`] holds one value, hands out snapshots, and notifies its
//! subscribers synchronously after every mutation.

mod store;

pub use store::{Store, Subscription};
