// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output writer capability for CLI-style code under test.
//!
//! Code that prints through [`Writer`] can be handed an
//! [`OutputBuffer`](crate::OutputBuffer) in tests and a real writer in
//! production. The [`printf!`](crate::printf) and [`errorf!`](crate::errorf)
//! macros are the usual way to call it.

use std::error::Error;
use std::fmt;

/// Writer for standard and error output with quiet and verbosity gating
pub trait Writer: Send + Sync {
    /// Write formatted text to the standard channel
    fn printf(&self, args: fmt::Arguments<'_>);

    /// Write formatted text to the error channel
    fn errorf(&self, args: fmt::Arguments<'_>);

    /// Writer that ignores the quiet setting
    fn loud(&self) -> Box<dyn Writer>;

    /// Writer whose standard output requires verbosity 2
    fn v2(&self) -> Box<dyn Writer>;

    /// Writer whose standard output requires verbosity 3
    fn v3(&self) -> Box<dyn Writer>;
}

/// Render an error's text on one line, joining its lines with `"; "`.
pub fn flatten_error<E: Error + ?Sized>(err: &E) -> String {
    err.to_string().replace('\n', "; ")
}

/// Display adapter that renders an error on a single line
pub struct Flattened<'a, E: ?Sized>(&'a E);

impl<'a, E: Error + ?Sized> Flattened<'a, E> {
    pub fn new(err: &'a E) -> Self {
        Self(err)
    }
}

impl<E: Error + ?Sized> fmt::Display for Flattened<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&flatten_error(self.0))
    }
}

impl<E: Error + ?Sized> fmt::Debug for Flattened<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&flatten_error(self.0), f)
    }
}

/// Owned error handles that do not implement `Error` themselves.
pub trait BoxedError {
    fn as_dyn_error(&self) -> &(dyn Error + 'static);
}

impl BoxedError for Box<dyn Error> {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        &**self
    }
}

impl BoxedError for Box<dyn Error + Send + Sync> {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        &**self
    }
}

/// Argument wrapper used by [`errorf!`](crate::errorf) to pick a rendering
/// by autoref specialization.
///
/// The macro calls `(&&ErrorProbe(&arg)).error_arg()`. Method lookup tries
/// [`FlattenError`] first, then [`FlattenBoxedError`], then falls back to
/// [`PassThrough`], which hands the argument back untouched.
pub struct ErrorProbe<'a, T: ?Sized>(pub &'a T);

pub trait FlattenError<'a, T: ?Sized> {
    fn error_arg(&self) -> Flattened<'a, T>;
}

impl<'a, T: Error + ?Sized> FlattenError<'a, T> for &ErrorProbe<'a, T> {
    fn error_arg(&self) -> Flattened<'a, T> {
        Flattened(self.0)
    }
}

pub trait FlattenBoxedError<'a> {
    fn error_arg(&self) -> Flattened<'a, dyn Error + 'static>;
}

impl<'a, T: BoxedError + ?Sized> FlattenBoxedError<'a> for &&ErrorProbe<'a, T> {
    fn error_arg(&self) -> Flattened<'a, dyn Error + 'static> {
        let probe: &ErrorProbe<'a, T> = self;
        Flattened(probe.0.as_dyn_error())
    }
}

pub trait PassThrough<'a, T: ?Sized> {
    fn error_arg(&self) -> &'a T;
}

impl<'a, T: ?Sized> PassThrough<'a, T> for ErrorProbe<'a, T> {
    fn error_arg(&self) -> &'a T {
        self.0
    }
}

/// Write formatted text to a [`Writer`]'s standard channel.
///
/// ```
/// use capture_testutil::{printf, OutputBuffer};
///
/// let out = OutputBuffer::new();
/// printf!(out, "{} files\n", 3);
/// assert_eq!(out.stdout(), "3 files\n");
/// ```
#[macro_export]
macro_rules! printf {
    ($writer:expr, $($arg:tt)*) => {{
        use $crate::Writer as _;
        ($writer).printf(::std::format_args!($($arg)*))
    }};
}

/// Write formatted text to a [`Writer`]'s error channel.
///
/// Positional and named arguments that are errors (anything implementing
/// `std::error::Error`, or a boxed `dyn Error`) are rendered on one line,
/// with each newline in their text replaced by `"; "`. Other arguments are
/// formatted as usual.
///
/// Inline captures such as `"{err}"` are resolved by `format_args!` itself
/// and never pass through this macro, so they are NOT flattened. Pass the
/// error as an argument instead, or capture a [`Flattened`] wrapper.
///
/// ```
/// use capture_testutil::{errorf, OutputBuffer};
///
/// let out = OutputBuffer::new();
/// let err = std::io::Error::other("disk full\nretry later");
/// errorf!(out, "error: {}\n", err);
/// errorf!(out, "again: {e}\n", e = err);
/// assert_eq!(
///     out.stderr_lines(),
///     vec!["error: disk full; retry later", "again: disk full; retry later"]
/// );
/// ```
#[macro_export]
macro_rules! errorf {
    (@args ($writer:expr) ($fmt:literal) [$($done:tt)*] $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::__private::{FlattenBoxedError as _, FlattenError as _, PassThrough as _};
        use $crate::Writer as _;
        ($writer).errorf(::std::format_args!($fmt $($done)*))
    }};
    (@args ($writer:expr) ($fmt:literal) [$($done:tt)*], $name:ident = $val:expr $(, $($rest:tt)*)?) => {
        $crate::errorf!(@args ($writer) ($fmt) [
            $($done)*, $name = (&&$crate::__private::ErrorProbe(&$val)).error_arg()
        ] $(, $($rest)*)?)
    };
    (@args ($writer:expr) ($fmt:literal) [$($done:tt)*], $arg:expr $(, $($rest:tt)*)?) => {
        $crate::errorf!(@args ($writer) ($fmt) [
            $($done)*, (&&$crate::__private::ErrorProbe(&$arg)).error_arg()
        ] $(, $($rest)*)?)
    };
    ($writer:expr, $fmt:literal $($rest:tt)*) => {
        $crate::errorf!(@args ($writer) ($fmt) [] $($rest)*)
    };
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
