pub mod anthropic;
pub mod gh;
