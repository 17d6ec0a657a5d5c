//! The page enhancement routines. Each one reads and mutates the shared
//! document of a [`Page`](crate::page::Page) and registers its click
//! listeners there.

pub mod copy_button;
pub mod highlight;
pub mod smooth_scroll;
pub mod theme;
pub mod toc;
