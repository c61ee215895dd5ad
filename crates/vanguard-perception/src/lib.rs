//! Perception primitives: binary line of sight, range bands, and short-term
//! memory of the last confirmed hostile contact.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod contact;
pub mod los;

pub use contact::ContactMemory;
pub use los::{line_of_sight, RangeBand, LOS_SAMPLES};
