//! Record intake: form fields in, validated records out.

mod builder;
mod fields;

pub use builder::*;
pub use fields::*;
