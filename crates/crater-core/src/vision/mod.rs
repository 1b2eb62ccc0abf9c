//! Low-level vision primitives shared by the detector strategies.

pub mod canny;
pub mod components;
pub mod contours;
pub mod correlation;
pub mod enclosing;
pub mod gradient;
pub mod morphology;
