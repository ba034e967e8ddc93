//! # Propflow Architecture
//!
//! Propflow is a library for **declarative attribute pipelines**: small,
//! pure stages that filter, derive and rewrite a component's attributes,
//! dispatchers that choose what to render from those attributes, and
//! table-built reducers that choose the next state from an action. The
//! `propflow` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Loads the manifest, parses JSON inputs                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) + TemplateHost (host.rs)     │
//! │  - Render, check, reduce, list, config, init                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Definitions (manifest/)                                    │
//! │  - JSON manifests resolved into components and reducers     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (attributes, pipeline, component, dispatch, reducer)  │
//! │  - Pure functions over attribute sets, no I/O at all        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: The Host Renders
//!
//! Nothing in the core knows how to draw anything. A component only ever
//! decides *which* component gets constructed and *with what attributes*;
//! the construct-element primitive comes from an [`component::ElementHost`].
//! [`component::TreeHost`] records element chains (handy in tests) and
//! [`host::TemplateHost`] renders markup templates for the CLI.
//!
//! ## Composition Order
//!
//! Every composition in this crate runs right-to-left: the last stage
//! listed is applied first, as in `f(g(h(x)))`. This holds for
//! [`pipeline::compose`], [`pipeline::Pipeline`] and manifest stage lists.
//!
//! ## Module Overview
//!
//! - [`attributes`]: `AttrValue`, `AttrSet`, schemas and `merge`
//! - [`pipeline`]: stages and `filter` / `compute` / `evolve` / `compose`
//! - [`component`]: component descriptors, wrappers and element hosts
//! - [`dispatch`]: predicate dispatchers and tag-keyed dispatch tables
//! - [`reducer`]: table-built reducers, `combine` and `replay`
//! - [`manifest`]: JSON definitions and their validation
//! - [`host`]: the template-backed host
//! - [`api`] / [`commands`]: the facade and command layer used by the CLI
//! - [`config`]: project configuration
//! - [`error`]: error types

pub mod api;
pub mod attributes;
pub mod commands;
pub mod component;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod manifest;
pub mod pipeline;
pub mod reducer;

#[cfg(test)]
mod properties;
