// Configuration domain: records, presets, assembly, merging, matching
pub mod assembler;
pub mod assets;
pub mod merge;
pub mod models;
pub mod preset;
pub mod rules;

pub use assembler::*;
pub use assets::*;
pub use merge::*;
pub use models::*;
pub use preset::*;
pub use rules::*;
