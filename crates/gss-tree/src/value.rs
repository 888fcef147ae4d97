//! Node types and the address resolver for GSS property trees.
//!
//! A tree is a [`PropertyClass`] owning named children, each either a
//! leaf [`Property`] (one raw text value) or a nested class. Rebinding a
//! name drops the previously owned node; no node is ever shared between
//! two classes.

use std::collections::BTreeMap;

/// Errors raised by queries and by the loading entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A numeric getter addressed a token that is not a valid decimal
    /// representation of the requested type.
    WrongType {
        /// The offending token.
        token: String,
        /// What the token was supposed to be.
        wanted: &'static str,
    },
    /// The request does not address a valid point in the tree, or the
    /// input could not be read at all.
    InvalidRequest {
        /// What went wrong.
        reason: String,
    },
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidRequest {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::WrongType { token, wanted } => {
                write!(f, "token {:?} is not {}", token, wanted)
            }
            Error::InvalidRequest { reason } => write!(f, "invalid request: {}", reason),
        }
    }
}

impl std::error::Error for Error {}

/// A leaf node: one immutable text value.
///
/// The text is semantically a whitespace-delimited sequence of tokens.
/// Tokenization happens on each query; nothing is pre-split or cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    text: String,
}

impl Property {
    /// Create a property holding the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The raw stored text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get a token by selector.
    ///
    /// The empty selector means token 1; `#N` means the N-th
    /// whitespace-delimited token, 1-based.
    pub fn get_string(&self, request: &str) -> Result<&str, Error> {
        let index = parse_selector(request)?;
        self.text
            .split_whitespace()
            .nth(index - 1)
            .ok_or_else(|| Error::invalid(format!("token #{} is out of range", index)))
    }

    /// Get a token and parse it as an integer.
    ///
    /// The whole token must be a decimal integer; trailing garbage fails.
    pub fn get_int(&self, request: &str) -> Result<i64, Error> {
        let token = self.get_string(request)?;
        token.parse().map_err(|_| Error::WrongType {
            token: token.to_string(),
            wanted: "an integer",
        })
    }

    /// Get a token and parse it as a floating point number.
    pub fn get_double(&self, request: &str) -> Result<f64, Error> {
        let token = self.get_string(request)?;
        token.parse().map_err(|_| Error::WrongType {
            token: token.to_string(),
            wanted: "a floating point number",
        })
    }
}

/// Parse a token selector: empty selects token 1, `#N` selects token N.
fn parse_selector(request: &str) -> Result<usize, Error> {
    if request.is_empty() {
        return Ok(1);
    }
    let Some(digits) = request.strip_prefix('#') else {
        return Err(Error::invalid(format!(
            "selector {:?} must be empty or of the form `#N`",
            request
        )));
    };
    let index: usize = digits
        .parse()
        .map_err(|_| Error::invalid(format!("token index {:?} is not an integer", digits)))?;
    if index == 0 {
        return Err(Error::invalid("token indices are 1-based"));
    }
    Ok(index)
}

/// A named child of a [`PropertyClass`]: either a leaf or a nested class.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A leaf property.
    Property(Property),
    /// A nested property class.
    Class(PropertyClass),
}

impl Node {
    /// Get as a property, if this is a leaf.
    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Node::Property(property) => Some(property),
            Node::Class(_) => None,
        }
    }

    /// Get as a class, if this is one.
    pub fn as_class(&self) -> Option<&PropertyClass> {
        match self {
            Node::Class(class) => Some(class),
            Node::Property(_) => None,
        }
    }
}

/// A composite node: a mapping from name to exclusively owned child.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyClass {
    children: BTreeMap<String, Node>,
}

impl PropertyClass {
    /// Create an empty class.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a direct child by name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    /// Bind `name` to `node`, returning the displaced node if the name
    /// was already bound. Dropping the return value destroys the old
    /// subtree.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) -> Option<Node> {
        self.children.insert(name.into(), node)
    }

    /// Check if a direct child exists.
    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterate over direct children in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children
            .iter()
            .map(|(name, node)| (name.as_str(), node))
    }

    /// Resolve a `::`-separated path of class names.
    ///
    /// The empty request addresses this class itself. Every segment must
    /// name a nested class; a property anywhere in the path fails.
    pub fn get_property_class(&self, request: &str) -> Result<&PropertyClass, Error> {
        let mut current = self;
        let mut rest = request;
        while !rest.is_empty() {
            let (segment, next) = split_segment(rest);
            current = match current.get(segment) {
                Some(Node::Class(class)) => class,
                Some(Node::Property(_)) => {
                    return Err(Error::invalid(format!(
                        "`{}` is a property, not a property class",
                        segment
                    )));
                }
                None => return Err(Error::invalid(format!("no node named `{}`", segment))),
            };
            rest = next.unwrap_or("");
        }
        Ok(current)
    }

    /// Resolve a `::`-separated path whose final segment names a property.
    ///
    /// Non-final segments must name classes. The empty request fails.
    pub fn get_property(&self, request: &str) -> Result<&Property, Error> {
        if request.is_empty() {
            return Err(Error::invalid("empty property path"));
        }
        let mut current = self;
        let mut rest = request;
        loop {
            let (segment, next) = split_segment(rest);
            match (current.get(segment), next) {
                (Some(Node::Class(class)), Some(remainder)) => {
                    current = class;
                    rest = remainder;
                }
                (Some(Node::Class(_)), None) => {
                    return Err(Error::invalid(format!(
                        "`{}` is a property class, not a property",
                        segment
                    )));
                }
                (Some(Node::Property(property)), None) => return Ok(property),
                (Some(Node::Property(_)), Some(_)) => {
                    return Err(Error::invalid(format!(
                        "`{}` is a property, not a property class",
                        segment
                    )));
                }
                (None, _) => {
                    return Err(Error::invalid(format!("no node named `{}`", segment)));
                }
            }
        }
    }

    /// Get a leaf token as a string.
    ///
    /// The request is a property path, optionally ending in a `:` path
    /// terminator or a `:#N` token selector: `"A::x"` and `"A::x:"`
    /// select token 1 of `A::x`, `"A::x:#3"` selects token 3.
    pub fn get_string(&self, request: &str) -> Result<&str, Error> {
        let (path, selector) = split_request(request);
        self.get_property(path)?.get_string(selector)
    }

    /// Get a leaf token as an integer. Requests as in
    /// [`PropertyClass::get_string`].
    pub fn get_int(&self, request: &str) -> Result<i64, Error> {
        let (path, selector) = split_request(request);
        self.get_property(path)?.get_int(selector)
    }

    /// Get a leaf token as a floating point number. Requests as in
    /// [`PropertyClass::get_string`].
    pub fn get_double(&self, request: &str) -> Result<f64, Error> {
        let (path, selector) = split_request(request);
        self.get_property(path)?.get_double(selector)
    }
}

/// Split off the first `::`-separated segment of a path.
///
/// Returns the segment and the remainder, `None` when the segment was
/// the last.
fn split_segment(path: &str) -> (&str, Option<&str>) {
    match path.find("::") {
        Some(i) => (&path[..i], Some(&path[i + 2..])),
        None => (path, None),
    }
}

/// Split a typed-getter request into property path and token selector.
///
/// The split point is the last `:` or `#` in the request. A trailing `:`
/// is a path terminator selecting token 1; a trailing `#N` is a token
/// selector, separated from the path by `:` and optional whitespace. A
/// request with neither is a bare path.
fn split_request(request: &str) -> (&str, &str) {
    match request.rfind([':', '#']) {
        Some(i) if request.as_bytes()[i] == b'#' => {
            let path = request[..i].trim_end();
            let path = path.strip_suffix(':').unwrap_or(path);
            (path.trim_end(), &request[i..])
        }
        Some(_) => (request.strip_suffix(':').unwrap_or(request), ""),
        None => (request, ""),
    }
}
