pub mod extract;
pub mod generator;
pub mod lint;
pub mod metadata;
pub mod pipeline;
pub mod template;
