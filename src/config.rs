//! Configuration passed into [`HeadingSchema`](crate::heading::HeadingSchema).

use crate::doc::Block;
use crate::dom::DomAttrs;
use crate::heading::default_heading_id;
use std::fmt;
use std::sync::Arc;

/// Produces an id for a heading whose `id` attribute is empty.
pub type IdGenerator = Arc<dyn Fn(&Block) -> String + Send + Sync>;

/// Produces extra element attributes for a rendered heading.
pub type AttrDecorator = Arc<dyn Fn(&Block) -> DomAttrs + Send + Sync>;

#[derive(Clone)]
pub struct HeadingConfig {
    /// Defaults to [`default_heading_id`].
    pub id_generator: IdGenerator,
    /// Defaults to an empty attribute bag. Its `id` entry, if any, is always
    /// overridden by the resolved heading id.
    pub attr_decorator: AttrDecorator,
}

impl HeadingConfig {
    pub fn with_id_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn(&Block) -> String + Send + Sync + 'static,
    {
        self.id_generator = Arc::new(generator);
        self
    }

    pub fn with_attr_decorator<F>(mut self, decorator: F) -> Self
    where
        F: Fn(&Block) -> DomAttrs + Send + Sync + 'static,
    {
        self.attr_decorator = Arc::new(decorator);
        self
    }
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            id_generator: Arc::new(default_heading_id),
            attr_decorator: Arc::new(|_: &Block| DomAttrs::new()),
        }
    }
}

impl fmt::Debug for HeadingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadingConfig").finish_non_exhaustive()
    }
}
