// Listing pipeline, one stage per module
pub mod aggregate;
pub mod batch;
pub mod carry;
pub mod detect;
pub mod extract;
pub mod fetch;
pub mod walk;
