//! Contains the building blocks the scheduler is assembled from.
//!
//! This module provides the rotation rule (which session follows which) and
//! the single-slot observer container used for the tick and completion hooks.
//! The `SessionScheduler` owns one of each and drives them from its clock.

pub mod observer;
pub mod rotation;
