//! CPU section mesher: cuboid elements with AO, liquids, and the up-face greedy pass.
#![forbid(unsafe_code)]

mod build;
mod element;
pub mod error;
pub mod face_table;
pub mod greedy;
pub mod liquid;
pub mod mesh_build;
pub mod shading;
pub mod view;

pub use build::{MeshOptions, build_section};
pub use error::{MeshError, Result};
pub use greedy::merge_up_faces;
pub use mesh_build::{BuildStats, FLIPPED_WINDING, MeshBuffers, MeshBuild, STANDARD_WINDING, SectionGeometry};
pub use shading::{ao_brightness, corner_ao, light_curve, tint};
pub use view::{BlockView, Fluid, Sample};
