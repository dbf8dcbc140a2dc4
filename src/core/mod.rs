pub mod editor;
pub mod report;
