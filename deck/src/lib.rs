//! Ferry deck visualization and interaction engine.
//!
//! Draws a top-down plan of a ferry's cargo deck from the load optimizer's
//! snapshot, and turns pointer input over that plan into hover feedback and
//! delete requests. The crate builds for WebAssembly (browser host, via
//! [`view::DeckView`]) and natively (tests, SVG export). It performs no I/O of
//! its own: hosts fetch snapshots, feed them in with a [`engine::LoadTicket`],
//! and act on the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`model`] | Snapshot, deck, and item wire types |
//! | [`layout`] | Meters ↔ surface pixels ↔ device pixels |
//! | [`render`] | Grid, labels, items, and in-surface messages |
//! | [`surface`] | Drawing-surface trait and the recording display list |
//! | [`hit`] | Hit-testing against rendered item bounds |
//! | [`input`] | Pointer events, hover state, tooltip overlay seam |
//! | [`placement`] | Next-item position heuristic |
//! | [`stats`] | Load summary figures |
//! | [`color`] | Color parsing, shading, and the palette |
//! | [`svg`] | SVG export surface |
//! | [`view`] | `wasm-bindgen` entry point for the page |
//! | [`web`] | Canvas surface and DOM tooltip |
//! | [`consts`] | Shared numeric constants (scale, margins, sizes) |
//! | [`error`] | Engine errors |

pub mod color;
pub mod consts;
pub mod engine;
pub mod error;
pub mod hit;
pub mod input;
pub mod layout;
pub mod model;
pub mod placement;
pub mod render;
pub mod stats;
pub mod surface;
pub mod svg;
pub mod view;
pub mod web;
