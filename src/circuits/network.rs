use std::fmt;
use std::ops::{Add, BitOr};
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, trace};

use crate::errors::{ImpedanceError, Result};

use super::component::{Element, Subscript};

/// Prefix shown for labeled composite impedances.
pub const COMPOSITE_PREFIX: &str = "Z";

/// Connection topology for a collection of impedances.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// Series connection (impedances add linearly).
    Series,
    /// Parallel connection (admittances add linearly).
    Parallel,
}

impl ConnectionKind {
    /// Separator placed between children in the display form.
    #[must_use]
    pub const fn separator(self) -> &'static str {
        match self {
            Self::Series => " + ",
            Self::Parallel => " || ",
        }
    }
}

/// Internal tree node joining two or more impedances with one connection kind.
#[derive(Debug)]
pub struct Composite {
    connection: ConnectionKind,
    children: Vec<Impedance>,
    subscript: RwLock<Option<Subscript>>,
}

impl Composite {
    /// Returns the connection topology.
    #[must_use]
    pub const fn connection_kind(&self) -> ConnectionKind {
        self.connection
    }

    /// Children in construction order.
    #[must_use]
    pub fn children(&self) -> &[Impedance] {
        &self.children
    }

    /// Returns the number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always false; a composite holds at least two children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Assigned subscript, if any.
    #[must_use]
    pub fn subscript(&self) -> Option<Subscript> {
        self.subscript
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `Z` followed by the assigned subscript; `None` while unlabeled.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.subscript()
            .map(|subscript| format!("{COMPOSITE_PREFIX}{subscript}"))
    }

    fn is_labeled(&self) -> bool {
        self.subscript
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn set_subscript(&self, subscript: Subscript) -> Option<Subscript> {
        self.subscript
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(subscript)
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = self.label() {
            write!(f, "{label}:")?;
        }
        f.write_str("(")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(self.connection.separator())?;
            }
            write!(f, "{child}")?;
        }
        f.write_str(")")
    }
}

/// Shared handle to a node of an impedance tree.
///
/// Cloning is cheap and yields another handle to the same node, so a label
/// assigned through one handle is visible through all of them.
#[derive(Debug, Clone)]
pub enum Impedance {
    /// Lumped R, L or C leaf.
    Element(Arc<Element>),
    /// Series or parallel combination.
    Composite(Arc<Composite>),
}

impl Impedance {
    /// Connects `other` in series with this impedance.
    #[must_use]
    pub fn series(&self, other: impl Into<Self>) -> Self {
        combine(ConnectionKind::Series, self, &other.into())
    }

    /// Connects `other` in parallel with this impedance.
    #[must_use]
    pub fn parallel(&self, other: impl Into<Self>) -> Self {
        combine(ConnectionKind::Parallel, self, &other.into())
    }

    /// Builds one series node from `children` as given, without flattening.
    pub fn series_of<I, T>(children: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::composite_of(ConnectionKind::Series, children)
    }

    /// Builds one parallel node from `children` as given, without flattening.
    pub fn parallel_of<I, T>(children: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::composite_of(ConnectionKind::Parallel, children)
    }

    fn composite_of<I, T>(connection: ConnectionKind, children: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        let children: Vec<Self> = children.into_iter().map(Into::into).collect();
        if children.len() < 2 {
            return Err(ImpedanceError::Configuration(format!(
                "two or more child impedances are required to construct a {connection:?} impedance, {} given",
                children.len()
            )));
        }
        Ok(new_composite(connection, children))
    }

    /// Assigns `subscript` to this composite in place and returns a handle to the same node.
    ///
    /// Element subscripts are fixed at construction, so relabeling an element
    /// is rejected.
    pub fn assign_label(&self, subscript: impl Into<Subscript>) -> Result<Self> {
        match self {
            Self::Element(element) => Err(ImpedanceError::Configuration(format!(
                "element '{}' cannot be relabeled",
                element.label()
            ))),
            Self::Composite(node) => {
                let subscript = subscript.into();
                if let Some(previous) = node.set_subscript(subscript.clone()) {
                    debug!("relabeled {COMPOSITE_PREFIX}{previous} as {COMPOSITE_PREFIX}{subscript}");
                }
                Ok(self.clone())
            }
        }
    }

    /// Reference designator prefix: the element prefix or `Z`.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Element(element) => element.kind().prefix(),
            Self::Composite(_) => COMPOSITE_PREFIX,
        }
    }

    /// Subscript of the node, if any.
    #[must_use]
    pub fn subscript(&self) -> Option<Subscript> {
        match self {
            Self::Element(element) => element.subscript().cloned(),
            Self::Composite(node) => node.subscript(),
        }
    }

    /// Lookup label; unlabeled composites have none.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Element(element) => Some(element.label().to_owned()),
            Self::Composite(node) => node.label(),
        }
    }

    /// Returns the element behind this handle, if it is a leaf.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element.as_ref()),
            Self::Composite(_) => None,
        }
    }

    /// Returns the composite behind this handle, if it is an internal node.
    #[must_use]
    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Self::Element(_) => None,
            Self::Composite(node) => Some(node.as_ref()),
        }
    }

    /// Returns true when both handles refer to the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Element(a), Self::Element(b)) => Arc::ptr_eq(a, b),
            (Self::Composite(a), Self::Composite(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Finds the first node labeled `query` in pre-order (self, then children left to right).
    ///
    /// When several nodes share a label the first one visited wins.
    pub fn find(&self, query: &str) -> Result<Self> {
        self.find_node(query).ok_or_else(|| {
            trace!("no node labeled '{query}'");
            ImpedanceError::Lookup {
                label: query.to_owned(),
                within: self.to_string(),
            }
        })
    }

    fn find_node(&self, query: &str) -> Option<Self> {
        let matches = match self {
            Self::Element(element) => element.label() == query,
            Self::Composite(node) => node.label().is_some_and(|label| label == query),
        };
        if matches {
            return Some(self.clone());
        }
        match self {
            Self::Element(_) => None,
            Self::Composite(node) => node.children.iter().find_map(|child| child.find_node(query)),
        }
    }
}

/// Joins `lhs` and `rhs` with `connection` into a new node.
///
/// An operand that is an unlabeled composite of the same connection kind
/// contributes its children instead of itself, so `a + b + c` yields one
/// three-child node. Labeled composites and composites of the other kind are
/// kept as single children.
#[must_use]
pub fn combine(connection: ConnectionKind, lhs: &Impedance, rhs: &Impedance) -> Impedance {
    let mut children = Vec::new();
    for operand in [lhs, rhs] {
        match operand {
            Impedance::Composite(node) if node.connection == connection && !node.is_labeled() => {
                children.extend(node.children.iter().cloned());
            }
            _ => children.push(operand.clone()),
        }
    }
    trace!("{connection:?} node with {} children", children.len());
    new_composite(connection, children)
}

fn new_composite(connection: ConnectionKind, children: Vec<Impedance>) -> Impedance {
    Impedance::Composite(Arc::new(Composite {
        connection,
        children,
        subscript: RwLock::new(None),
    }))
}

impl fmt::Display for Impedance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => write!(f, "{element}"),
            Self::Composite(node) => write!(f, "{node}"),
        }
    }
}

impl From<Element> for Impedance {
    fn from(element: Element) -> Self {
        Self::Element(Arc::new(element))
    }
}

impl From<&Impedance> for Impedance {
    fn from(handle: &Impedance) -> Self {
        handle.clone()
    }
}

impl<T: Into<Impedance>> Add<T> for Impedance {
    type Output = Impedance;

    fn add(self, rhs: T) -> Impedance {
        self.series(rhs)
    }
}

impl<T: Into<Impedance>> Add<T> for &Impedance {
    type Output = Impedance;

    fn add(self, rhs: T) -> Impedance {
        self.series(rhs)
    }
}

impl<T: Into<Impedance>> Add<T> for Element {
    type Output = Impedance;

    fn add(self, rhs: T) -> Impedance {
        Impedance::from(self).series(rhs)
    }
}

impl<T: Into<Impedance>> BitOr<T> for Impedance {
    type Output = Impedance;

    fn bitor(self, rhs: T) -> Impedance {
        self.parallel(rhs)
    }
}

impl<T: Into<Impedance>> BitOr<T> for &Impedance {
    type Output = Impedance;

    fn bitor(self, rhs: T) -> Impedance {
        self.parallel(rhs)
    }
}

impl<T: Into<Impedance>> BitOr<T> for Element {
    type Output = Impedance;

    fn bitor(self, rhs: T) -> Impedance {
        Impedance::from(self).parallel(rhs)
    }
}
