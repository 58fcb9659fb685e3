//! The host-document seam.
//!
//! The embed layer never owns a document; the host hands it one through
//! [`HostDocument`]. Browser hosts back it with the real DOM
//! (`cactus-web-bootstrap`), tests with an in-memory fake.

/// A marker element: the script-like element whose `data-*` attributes
/// declaratively configure the widget. The element itself becomes the mount
/// target.
#[derive(Debug, Clone)]
pub struct Marker<N> {
    pub node: N,
    /// `data-*` attributes, names given with or without the `data-` prefix.
    pub attributes: Vec<(String, String)>,
}

/// Read-only view of the host page's document.
///
/// `Node` is whatever the host uses to reference an element; the embed layer
/// only moves such references around, it never creates, removes, or mutates
/// host elements.
pub trait HostDocument {
    type Node;

    /// Resolves a selector to the **first matching element in document
    /// order**, or `None` when nothing matches. An unparseable selector
    /// counts as no match.
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    /// The marker element the widget was loaded from, if the host exposes
    /// one. Hosts without a declarative path keep the default.
    fn marker(&self) -> Option<Marker<Self::Node>> {
        None
    }
}
