//! User interface rendering layer with component-based architecture.
//!
//! This module turns the list view's state into plain-text pages through
//! composable rendering components. A rendered page knows where every record
//! starts, which is what the scroll anchor looks records up by.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → RenderedPage (Viewport)
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator and [`RenderedPage`]
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (match ranges, highlighting, layout)

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel, RenderedPage};
pub use viewmodel::{
    ChipInfo, DisplayItem, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, ListBody,
    SearchBarInfo, UIViewModel,
};
