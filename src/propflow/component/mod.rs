//! # Components
//!
//! A [`Component`] is an immutable descriptor for something a host can
//! render. There are three kinds:
//!
//! - **Leaf**: rendered directly by the host
//! - **Wrapper**: `Component::wrap(target, stage)` runs `stage` over the
//!   incoming attributes, then constructs `target` with the result
//! - **Branch**: `Component::branch(name, routes)` picks a component with a
//!   [`Dispatcher`](crate::dispatch::Dispatcher) and constructs it
//!
//! Rendering itself is never done here. The host supplies the
//! construct-element primitive through [`ElementHost`]; [`TreeHost`] is a
//! reference host that just records an [`Element`] chain.
//!
//! ```
//! use propflow::attributes::AttrSet;
//! use propflow::component::{Component, TreeHost};
//! use propflow::pipeline::Stage;
//!
//! let heading: Component = Component::leaf("Heading");
//! let clean = Component::wrap(&heading, Stage::pick(["text"]));
//!
//! let el = clean
//!     .render(AttrSet::new().with("text", "hi").with("junk", 1), &TreeHost)
//!     .unwrap();
//! assert_eq!(el.path(), vec!["pick(Heading)", "Heading"]);
//! assert_eq!(el.leaf().attrs.len(), 1);
//! ```

mod descriptor;
mod element;

pub use descriptor::{Component, ComponentKind, ElementHost};
pub use element::{Element, TreeHost};
