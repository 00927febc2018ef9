use std::fmt;

use super::graph::Payload;

/// An abstract domain for a dataflow analysis.
///
/// [`Lattice::meet`] must be monotonic and the lattice of finite height for
/// [`analyze`](super::analyze) to terminate.
pub trait Lattice {
    type Element: Clone + fmt::Debug + PartialEq;

    /// The element of operations nothing has flowed into yet. Meeting with it
    /// changes nothing.
    fn identity(&self) -> Self::Element;

    /// The element flowing into the entry of the graph.
    fn entry(&self) -> Self::Element;

    fn meet(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// The element after `payload`, given the element before it.
    fn transfer(&self, payload: &Payload<'_>, input: &Self::Element) -> Self::Element;
}

/// What an analysis knows before and after one operation.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowInfo<E> {
    pub input: E,
    pub output: E,

    /// Whether this operation changed during the last pass.
    pub dirty: bool,
}

impl<E: Clone> FlowInfo<E> {
    pub fn new(identity: E) -> Self {
        Self { input: identity.clone(), output: identity, dirty: false }
    }
}
