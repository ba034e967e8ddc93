//! # Attribute Pipelines
//!
//! Pure `AttrSet -> AttrSet` stages and the ways to build and chain them:
//!
//! | Operation | Free function | Stage constructor |
//! |-----------|---------------|-------------------|
//! | Allow-list | [`filter`] | [`Stage::pick`], [`Stage::pick_schema`] |
//! | Derive and merge | [`compute`] | [`Stage::computed`], [`Stage::assign`] |
//! | Per-key rewrite | [`evolve`] | [`Stage::evolve`] |
//! | Chain | [`compose`] | [`Pipeline::to_stage`] |
//!
//! Stages never mutate their input. Composition always runs the last
//! declared stage first (see [`compose`]).
//!
//! ```
//! use propflow::attributes::{AttrSet, AttrValue};
//! use propflow::pipeline::{compose, Stage, Transforms};
//!
//! let shout = Transforms::new().on("heading", |v: &AttrValue| {
//!     AttrValue::Text(v.to_string().to_uppercase())
//! });
//! // pick runs first, then evolve
//! let stage = compose(vec![Stage::evolve(shout), Stage::pick(["heading"])]);
//!
//! let attrs: AttrSet = AttrSet::new().with("heading", "hi").with("noise", 1);
//! let out = stage.apply(&attrs).unwrap();
//! assert_eq!(out.get("heading"), Some(&AttrValue::Text("HI".into())));
//! assert!(!out.contains_key("noise"));
//! ```

mod compose;
mod compute;
mod evolve;
mod filter;
mod stage;

pub use compose::{compose, Pipeline};
pub use compute::compute;
pub use evolve::{evolve, TransformFn, Transforms};
pub use filter::filter;
pub use stage::{Stage, StageFn};
