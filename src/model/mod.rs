pub use boxes::PackedBox;
pub use individual::{Individual, Objectives, Population};

pub mod boxes;
pub mod individual;
