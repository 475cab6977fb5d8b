use super::primitive::Primitive;
use std::fmt;

/// A program tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<P> {
    Terminal(P),
    Function(P, Vec<Node<P>>),
}

impl<P: Primitive> Node<P> {
    /// A function node; fails if the child count does not match the arity.
    pub fn function(primitive: P, children: Vec<Node<P>>) -> crate::error::Result<Self> {
        if primitive.arity() != children.len() {
            return Err(crate::error::GpError::Configuration(format!(
                "{} takes {} arguments, got {}",
                primitive.alias(),
                primitive.arity(),
                children.len()
            )));
        }
        Ok(Node::Function(primitive, children))
    }

    pub fn primitive(&self) -> &P {
        match self {
            Node::Terminal(p) | Node::Function(p, _) => p,
        }
    }

    pub fn children(&self) -> &[Node<P>] {
        match self {
            Node::Terminal(_) => &[],
            Node::Function(_, children) => children,
        }
    }

    /// Edges on the longest root-to-leaf path; a lone terminal has depth 0.
    pub fn depth(&self) -> usize {
        self.children()
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Node::size).sum::<usize>()
    }

    pub fn evaluate(&self, context: &P::Context) -> anyhow::Result<P::Value> {
        let args = self
            .children()
            .iter()
            .map(|child| child.evaluate(context))
            .collect::<anyhow::Result<Vec<_>>>()?;
        self.primitive().evaluate(&args, context)
    }

    /// Subtree at pre-order position `index` (the root is 0).
    pub fn subtree(&self, index: usize) -> Option<&Node<P>> {
        self.locate(index).map(|(node, _)| node)
    }

    /// Depth at which the node at pre-order position `index` sits.
    pub fn depth_of(&self, index: usize) -> Option<usize> {
        self.locate(index).map(|(_, depth)| depth)
    }

    fn locate(&self, index: usize) -> Option<(&Node<P>, usize)> {
        let mut remaining = index;
        let mut node = self;
        let mut depth = 0;
        'descend: loop {
            if remaining == 0 {
                return Some((node, depth));
            }
            remaining -= 1;
            for child in node.children() {
                let size = child.size();
                if remaining < size {
                    node = child;
                    depth += 1;
                    continue 'descend;
                }
                remaining -= size;
            }
            return None;
        }
    }

    /// Replaces the subtree at pre-order position `index`, returning the old one.
    pub fn replace_subtree(&mut self, index: usize, replacement: Node<P>) -> Option<Node<P>> {
        if index == 0 {
            return Some(std::mem::replace(self, replacement));
        }
        let mut remaining = index - 1;
        if let Node::Function(_, children) = self {
            for child in children.iter_mut() {
                let size = child.size();
                if remaining < size {
                    return child.replace_subtree(remaining, replacement);
                }
                remaining -= size;
            }
        }
        None
    }
}

impl<P: Primitive> fmt::Display for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Terminal(p) => write!(f, "{}", p.alias()),
            Node::Function(p, children) => {
                write!(f, "{}(", p.alias())?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
