pub mod condition;
pub mod draft;
pub mod input;
pub mod result;
