use super::{Container, Leaf, Node};
use crate::error::{Result, TreemapError};

/// Deepest parenthesis nesting `parse_nested` accepts.
pub const MAX_NESTING: usize = 256;

/// Parse the textual form produced by `Display`: `(1, (2, 3), 4.5)`.
///
/// A bare number parses to a single leaf. Whitespace is free-form and a
/// trailing comma inside parentheses is accepted. Nesting deeper than
/// [`MAX_NESTING`] is rejected as invalid data.
pub fn parse_nested(input: &str) -> Result<Node> {
    let mut parser = Parser {
        src: input,
        pos: 0,
        depth: 0,
    };
    let node = parser.node()?;
    parser.skip_ws();
    if parser.pos != input.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(node)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn node(&mut self) -> Result<Node> {
        self.skip_ws();
        match self.peek() {
            Some('(') => {
                if self.depth == MAX_NESTING {
                    return Err(self.error("nesting too deep"));
                }
                self.pos += 1;
                self.depth += 1;
                let container = self.sequence()?;
                self.depth -= 1;
                Ok(Node::Container(container))
            }
            Some(c) if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' => {
                self.number().map(Node::Leaf)
            }
            Some(_) => Err(self.error("expected a size or '('")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn sequence(&mut self) -> Result<Container> {
        let mut container = Container::default();
        loop {
            self.skip_ws();
            if self.peek() == Some(')') {
                self.pos += 1;
                return Ok(container);
            }
            container.add_child(self.node()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(')') => {}
                Some(_) => return Err(self.error("expected ',' or ')'")),
                None => return Err(self.error("unclosed '('")),
            }
        }
    }

    fn number(&mut self) -> Result<Leaf> {
        let start = self.pos;
        let len = self.src[start..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+')))
            .unwrap_or(self.src.len() - start);
        let text = &self.src[start..start + len];
        let size: f64 = text.parse().map_err(|_| TreemapError::InvalidNestedData {
            position: start,
            reason: format!("'{}' is neither a size nor a sequence", text),
        })?;
        self.pos += len;
        Leaf::new(size)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        let rest = &self.src[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn error(&self, reason: &str) -> TreemapError {
        TreemapError::InvalidNestedData {
            position: self.pos,
            reason: reason.to_string(),
        }
    }
}
