//! Report assembly, rendering and persistence.

mod assembler;
pub mod render;
mod store;

pub use assembler::ReportAssembler;
pub use render::{render_csv, render_text};
pub use store::ReportStore;
