//! Iterative walkers over terms.
//!
//! This module provides two traversal helpers:
//! - [`walk`]: pass an initial input of any type to your visitor; each visit decides whether the
//!   children are scheduled and with which input.
//! - [`subterms`]: a pre-order iterator over every subterm, the root included.
//!
//! Traversal strategy
//! - Explicit stack (no recursion), depth-first, leftmost child first.
//! - Binders are not interpreted: the body of `\x. t` is visited like any other child.
//!
//! Example: count nodes in a term
//! ```
//! use jdformal::term::func::*;
//! use jdformal::walker::subterms;
//!
//! let t = app("s", [app("s", [cnst("z")])]);
//! assert_eq!(subterms(&t).count(), 3);
//! ```
use crate::term::{Term, TermView};

/// Decision returned by a [`walk`] visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit<I> {
    /// Visit every child with the given input.
    Children(I),
    /// Do not descend into this node.
    Skip,
    /// Stop the whole traversal.
    Stop,
}

fn children(term: &Term) -> &[Term] {
    match term.view() {
        TermView::App { args, .. } => args,
        TermView::Abs { body, .. } => std::slice::from_ref(body),
        TermView::Var(_) | TermView::Const(_) => &[],
    }
}

/// Walk `root` depth-first in pre-order, threading `input` from parents to children.
pub fn walk<I: Clone, F>(root: &Term, input: I, mut visitor: F)
where
    F: FnMut(&Term, &I) -> Visit<I>,
{
    let mut stack: Vec<(&Term, I)> = vec![(root, input)];

    while let Some((node, input)) = stack.pop() {
        match visitor(node, &input) {
            Visit::Children(next) => {
                // Reverse so that the leftmost child is popped first.
                for child in children(node).iter().rev() {
                    stack.push((child, next.clone()));
                }
            }
            Visit::Skip => {}
            Visit::Stop => return,
        }
    }
}

/// Pre-order iterator over the subterms of a term.
pub struct Subterms<'a> {
    stack: Vec<&'a Term>,
}

impl<'a> Iterator for Subterms<'a> {
    type Item = &'a Term;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(children(node).iter().rev());
        Some(node)
    }
}

/// Iterate over every subterm of `root` in pre-order.
pub fn subterms(root: &Term) -> Subterms<'_> {
    Subterms { stack: vec![root] }
}
