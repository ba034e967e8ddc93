//! # Attribute Sets
//!
//! The value bag that flows through every pipeline stage, dispatcher and
//! component in this crate:
//!
//! - **Values**: [`AttrValue`], the default value type (JSON-shaped)
//! - **Sets**: [`AttrSet`], a key-unique mapping generic over its value type
//! - **Schemas**: [`Schema`], the allow-list a component declares
//! - **Merging**: [`merge`], the only order-sensitive operation (the
//!   override operand wins on key collisions)
//!
//! ## Usage
//!
//! ```
//! use propflow::attributes::{merge, AttrSet, AttrValue};
//!
//! let base: AttrSet = AttrSet::new().with("heading", "a").with("count", 1);
//! let extra: AttrSet = AttrSet::new().with("count", 2);
//!
//! let merged = merge(&base, &extra);
//! assert_eq!(merged.get("count"), Some(&AttrValue::Int(2)));
//! ```

mod schema;
mod set;
mod value;

pub use schema::{AttributeKind, AttributeSpec, Schema};
pub use set::{merge, AttrSet};
pub use value::AttrValue;
