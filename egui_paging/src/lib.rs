//! Paging menu and content widgets for egui.
//!
//! A horizontally scrollable tab strip ([`PagingMenuView`]) synchronized
//! with a swipeable page area ([`PagingContentView`]). The menu owns an
//! underline indicator whose width is driven by the host application, so
//! hosts can blend it between adjacent cells while the user drags.
//!
//! The widgets only report events; wiring the menu and content together
//! (selection flags, viewport commands, indicator width) is left to the
//! host so neither side can re-trigger the other.

mod content;
mod geometry;
mod menu;

pub use content::{ContentEvent, ContentState, PagingContentView};
pub use menu::{CellLayout, FocusIndicator, MenuEvent, MenuState, MenuStyle, PagingMenuView};
