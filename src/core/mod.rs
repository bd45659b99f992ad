// Core primitives for delimited-field scanning

pub mod classify;
pub(crate) mod source;
pub mod transform;

pub use classify::CharClasses;
pub use transform::{FieldTransform, TransformError, Transforms};
