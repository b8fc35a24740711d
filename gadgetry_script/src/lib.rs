// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=gadgetry_script --heading-base-level=0

//! Gadgetry Script: builds window trees from layout scripts.
//!
//! A layout script is a plain-text description of one screen. It names the layout's lifecycle
//! callbacks, sets default fonts and colors, and declares `WINDOW ... END` blocks whose
//! `CHILD ... ENDALLCHILDREN` sections nest further windows.
//!
//! ```text
//! FILE_VERSION = 2;
//! STARTLAYOUTBLOCK
//!   LAYOUTINIT = MenuInit;
//! ENDLAYOUTBLOCK
//! WINDOW
//!   WINDOWTYPE = USER;
//!   SCREENRECT = UPPERLEFT: 0 0, BOTTOMRIGHT: 800 600, CREATIONRESOLUTION: 800 600;
//!   NAME = "Menu.wnd:Parent";
//!   STATUS = ENABLED;
//!   CHILD
//!   WINDOW
//!     WINDOWTYPE = PUSHBUTTON;
//!     SCREENRECT = UPPERLEFT: 10 10, BOTTOMRIGHT: 110 40, CREATIONRESOLUTION: 800 600;
//!     NAME = "Menu.wnd:ButtonOk";
//!     STATUS = ENABLED+TABSTOP;
//!     TEXT = "Ok";
//!   END
//!   ENDALLCHILDREN
//! END
//! ```
//!
//! Separators are spaces, tabs, commas, colons and line breaks. Keywords, labels and flag
//! names ignore case.
//!
//! - Screen rectangles are authored against a `CREATIONRESOLUTION` and rescaled per axis to the
//!   live display size, truncating toward zero.
//! - `FONT`, `TEXTCOLOR`, the `*COLOR` and `*TEXTCOLOR` fields may appear outside a window;
//!   they become defaults for every later window, which may still override them.
//! - Callback fields name entries of a [`CallbackRegistry`]. `[None]` and unknown names leave
//!   the window's default handler in place.
//! - Gadget windows get their stock behavior and a payload built from their `*DATA` field.
//!
//! [`load_layout`] returns a [`WindowLayout`](gadgetry_tree::WindowLayout) holding every window
//! of the script, parents ahead of their children. A malformed script aborts the load with a
//! [`LoadError`]; windows created before the error are left alive and the top-level ones are
//! listed in [`LoadError::partial`].
//!
//! ## Example
//!
//! ```
//! use kurbo::Size;
//! use gadgetry_script::{CallbackRegistry, LoadOptions, load_layout};
//! use gadgetry_tree::WindowManager;
//!
//! let mut wm = WindowManager::new(Size::new(1600.0, 1200.0));
//! let script = r#"
//!     WINDOW
//!       WINDOWTYPE = CHECKBOX;
//!       SCREENRECT = UPPERLEFT: 10 10, BOTTOMRIGHT: 110 30, CREATIONRESOLUTION: 800 600;
//!       NAME = "Options.wnd:Sound";
//!       STATUS = ENABLED;
//!     END
//! "#;
//! let layout = load_layout(
//!     &mut wm,
//!     &CallbackRegistry::new(),
//!     script,
//!     "Options.wnd",
//!     &LoadOptions::default(),
//! )
//! .unwrap();
//!
//! let check = layout.first_window(&wm).unwrap();
//! assert_eq!(wm.screen_region(check).unwrap(), kurbo::Rect::new(20.0, 20.0, 220.0, 60.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`. The `std` feature adds [`load_layout_file`].

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod error;
mod lexer;
mod loader;
mod names;
mod parser;
mod registry;

pub use error::{LoadError, LoadErrorKind};
#[cfg(feature = "std")]
pub use loader::load_layout_file;
pub use loader::{LoadOptions, MAX_DEPTH, load_layout};
pub use registry::CallbackRegistry;
