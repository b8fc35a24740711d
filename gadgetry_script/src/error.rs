// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Load errors.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use gadgetry_tree::WindowId;

/// What went wrong while loading a layout script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// A string literal runs to the end of the input.
    UnterminatedString,
    /// The input ended inside a statement or an open `WINDOW` block.
    UnexpectedEof,
    /// A token other than the one described was found.
    Expected(&'static str),
    /// Unknown statement or field keyword.
    UnknownKeyword(String),
    /// Unknown label inside a field value.
    UnknownLabel(String),
    /// Unknown status or style flag name.
    UnknownFlag(String),
    /// Unknown `WINDOWTYPE`.
    UnknownWindowType(String),
    /// A number was malformed or out of range.
    BadNumber(String),
    /// `FILE_VERSION` names a version this loader does not read.
    UnsupportedVersion(i32),
    /// A statement appeared where it is not allowed.
    Misplaced(&'static str),
    /// A list box declares more columns than the loader accepts.
    TooManyColumns(usize),
    /// `CHILD` blocks nest deeper than the parent stack.
    NestingTooDeep,
    /// The window manager refused to create a window.
    CreateFailed,
    /// The layout file could not be read.
    #[cfg(feature = "std")]
    Io(std::io::ErrorKind),
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => f.write_str("unterminated string"),
            Self::UnexpectedEof => f.write_str("unexpected end of input"),
            Self::Expected(what) => write!(f, "expected {what}"),
            Self::UnknownKeyword(k) => write!(f, "unknown keyword `{k}`"),
            Self::UnknownLabel(l) => write!(f, "unknown label `{l}`"),
            Self::UnknownFlag(n) => write!(f, "unknown flag `{n}`"),
            Self::UnknownWindowType(t) => write!(f, "unknown window type `{t}`"),
            Self::BadNumber(n) => write!(f, "bad number `{n}`"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported file version {v}"),
            Self::Misplaced(what) => write!(f, "misplaced {what}"),
            Self::TooManyColumns(n) => write!(f, "{n} list box columns is too many"),
            Self::NestingTooDeep => f.write_str("child blocks nest too deep"),
            Self::CreateFailed => f.write_str("window creation failed"),
            #[cfg(feature = "std")]
            Self::Io(kind) => write!(f, "cannot read layout file: {kind}"),
        }
    }
}

/// Error returned by the loader.
///
/// Windows created before the failure are not destroyed; `partial` lists the top-level ones so
/// the caller can clean up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadError {
    /// 1-based line of the offending token, `0` when no input was read.
    pub line: usize,
    /// What went wrong.
    pub kind: LoadErrorKind,
    /// Top-level windows created before the failure.
    pub partial: Vec<WindowId>,
}

impl LoadError {
    pub(crate) fn new(line: usize, kind: LoadErrorKind) -> Self {
        Self {
            line,
            kind,
            partial: Vec::new(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl core::error::Error for LoadError {}
