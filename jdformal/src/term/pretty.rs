//! RcDoc-based pretty-printer with termcolor annotations for terms.
//!
//! Role
//! - Convert a [`Term`] into an annotated document suitable for width-aware rendering.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs/tests.
//!
//! Performance
//! - Building the doc is O(n) in term size; rendering respects line widths with
//!   linear-time layout in the size of the resulting document.

use std::io::{self, Write};

use pretty::{FmtWrite, RcDoc, RenderAnnotated};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::term::{Term, TermView};
use crate::variable::{Symbol, Variable};

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Punct, // commas, dots, backslashes
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Keyword,     // by, rule
    Ident,       // variables
    Constructor, // constants and application heads
    Rule,        // rule names in rendered derivations
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Paren(depth) => {
                // Rotate through a palette for nested parentheses.
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    5 => Color::Magenta,
                    _ => unreachable!(),
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Keyword => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Ident => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Constructor => {
                s.set_fg(Some(Color::Magenta));
            }
            Style::Rule => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
        }
        s
    }
}

/// Annotated text fragment.
pub fn styled<S: Into<String>>(style: Style, s: S) -> RcDoc<'static, Style> {
    RcDoc::text(s.into()).annotate(style)
}

fn punct(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Punct, s)
}

/// Keyword fragment, e.g. `by`.
pub fn kw(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Keyword, s)
}

#[inline]
fn lparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string(")").annotate(Style::Paren(depth))
}

fn ident(v: &Variable) -> RcDoc<'static, Style> {
    RcDoc::as_string(v).annotate(Style::Ident)
}

fn constructor(s: &Symbol) -> RcDoc<'static, Style> {
    RcDoc::as_string(s).annotate(Style::Constructor)
}

/// Depth-aware variant that colors parentheses by nesting level.
fn to_doc_with_depth(t: &Term, depth: u8) -> RcDoc<'static, Style> {
    match t.view() {
        TermView::Var(v) => ident(v),
        TermView::Const(c) => constructor(c),
        TermView::App { head, args } => {
            let inner = RcDoc::intersperse(
                args.iter()
                    .map(|arg| to_doc_with_depth(arg, depth.wrapping_add(1))),
                punct(",").append(RcDoc::line()),
            );
            constructor(head)
                .append(lparen(depth))
                .append(inner.nest(2).group())
                .append(rparen(depth))
                .group()
        }
        TermView::Abs { binder, body } => punct("\\")
            .append(ident(binder))
            .append(punct("."))
            .append(RcDoc::line())
            .append(to_doc_with_depth(body, depth))
            .nest(2)
            .group(),
    }
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

/// Render a document to a `termcolor::WriteColor` with width-aware layout.
pub fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Format a document to a plain string without colors.
pub fn to_plain_string(doc: &RcDoc<'_, Style>, width: usize) -> String {
    let mut buf = String::new();
    let _ = doc.render_fmt(width, &mut buf);
    buf
}

/// Retrieve the width of the terminal, or 80 if it cannot be determined.
pub fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for terms and everything printed as a term.
pub trait PrettyTerm {
    /// Build an RcDoc representation with style annotations.
    /// Useful for composing or rendering manually.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(), width, out)
    }

    /// Print to stdout with colors (TTY-aware), at auto-detected width (or 80 if not a TTY).
    fn pretty_print(&self) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        self.pretty_render_to(terminal_width(), &mut stdout)
    }

    /// Format into a plain string (no colors).
    fn pretty_string(&self) -> String {
        to_plain_string(&self.pretty_doc(), 80)
    }
}

impl PrettyTerm for Term {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc_with_depth(self, 0)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut w = FmtWrite::new(f);
        self.pretty_doc().render_raw(80, &mut w)
    }
}

#[cfg(test)]
mod tests {
    use termcolor::NoColor;

    use super::*;
    use crate::term::func::*;

    #[test]
    fn plain_rendering_of_nested_terms() {
        let t = app("plus", [cnst("z"), app("s", [var("n")]), abs("x", var("x"))]);
        assert_eq!(t.pretty_string(), "plus(z, s(n), \\x. x)");
    }

    #[test]
    fn colored_writer_without_color_matches_plain() {
        let t = app("s", [app("s", [cnst("z")])]);
        let mut out = NoColor::new(Vec::new());
        t.pretty_render_to(80, &mut out).unwrap();
        assert_eq!(String::from_utf8(out.into_inner()).unwrap(), "s(s(z))");
    }

    #[test]
    fn renamed_variables_keep_their_stamp() {
        let t = abs(Variable::with_stamp("x", 1), var(Variable::with_stamp("x", 1)));
        assert_eq!(t.to_string(), "\\x#1. x#1");
    }
}
