//! Arbor Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Arbor hierarchy
//! reconstruction engine. It includes:
//!
//! - **Geometry**: Points, sizes and bounding boxes ([`geometry`] module)
//! - **Descriptors**: Deduplicated nodes and connector endpoints ([`descriptor`] module)
//! - **Orientation**: Which canvas axis encodes hierarchy depth ([`orientation`] module)

pub mod descriptor;
pub mod geometry;
pub mod orientation;
