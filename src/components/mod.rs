pub mod help;
pub mod scene;
