use std::fmt;

use super::{Data, Node};

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Data::Token(token) => write!(f, "{:?}{:?}", self.kind, token.text),
            Data::Tree(tree) => {
                write!(f, "({:?}", self.kind)?;

                for child in tree.children.iter() {
                    write!(f, " {child:?}")?;
                }

                write!(f, ")")
            }
        }
    }
}
