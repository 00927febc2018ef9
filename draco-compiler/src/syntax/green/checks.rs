use super::{Data, Node, Token};

impl Node {
    /// Concatenate all of the tokens in this tree, trivia included.
    pub fn write(&self) -> String {
        let mut result = String::with_capacity(self.width);
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            match &node.data {
                Data::Tree(tree) => stack.extend(tree.children.iter().rev()),
                Data::Token(token) => token.write_into(&mut result),
            }
        }

        result
    }

    pub fn check_invariants(&self) {
        assert_eq!(self.width, self.data.width());

        match &self.data {
            Data::Tree(tree) => {
                assert!(!self.kind.is_token(), "{:?} holds children", self.kind);
                for child in tree.children.iter() {
                    child.check_invariants();
                }
            }

            Data::Token(_) => assert!(self.kind.is_token(), "{:?} holds a token", self.kind),
        }

        for message in self.messages() {
            assert!(message.offset + message.width <= self.width, "message outside of its node");
        }
    }
}

impl Data {
    /// Get the width of this node data in bytes.
    pub fn width(&self) -> usize {
        match self {
            Self::Tree(tree) => tree.children.iter().map(|node| node.width).sum(),
            Self::Token(token) => token.full_width(),
        }
    }
}

impl Token {
    pub(crate) fn write_into(&self, result: &mut String) {
        for trivia in self.leading.iter() {
            result.push_str(&trivia.text);
        }

        result.push_str(&self.text);

        for trivia in self.trailing.iter() {
            result.push_str(&trivia.text);
        }
    }
}
