mod classify;
pub mod constants;
mod geometry;
pub mod layout;
mod options;
pub mod pipeline;
pub mod render;
mod sections;
pub mod tools;
mod types;

pub use classify::classify;
pub use geometry::{CropGeometry, resolve_geometry};
pub use layout::{AnnotationPlan, LabelRegion, LinkRegion, NavigationDirective, OutlineEntry, plan_annotations};
pub use options::*;
pub use pipeline::{ChangeReport, Outcome, analyze, annotate, load_pdf};
pub use sections::{ChangedPages, Navigation, Section, build_sections};
pub use tools::{MarginMeasurer, Rasterizer, Toolchain};
pub use types::*;
