use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::media::MediaType;

static NEXT_RESOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a display resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "res#{}", self.0)
    }
}

/// Encoded bytes of the image currently shown to the user.
///
/// Not `Clone`: there is exactly one owner, and dropping it releases the
/// resource. Readers borrow a [`ResourceView`] instead.
pub struct DisplayResource {
    id: ResourceId,
    media_type: MediaType,
    bytes: Arc<[u8]>,
}

impl DisplayResource {
    pub fn new(media_type: MediaType, bytes: impl Into<Arc<[u8]>>) -> Self {
        let id = ResourceId(NEXT_RESOURCE_ID.fetch_add(1, Ordering::Relaxed));
        let bytes = bytes.into();
        debug!(%id, %media_type, len = bytes.len(), "display resource acquired");
        Self {
            id,
            media_type,
            bytes,
        }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read-only handle for decoders running elsewhere.
    pub fn view(&self) -> ResourceView {
        ResourceView {
            id: self.id,
            media_type: self.media_type,
            bytes: Arc::clone(&self.bytes),
        }
    }
}

impl fmt::Debug for DisplayResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayResource")
            .field("id", &self.id)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Drop for DisplayResource {
    fn drop(&mut self) {
        debug!(id = %self.id, "display resource released");
    }
}

/// Shared, read-only view of a [`DisplayResource`]. Cannot release it.
#[derive(Clone)]
pub struct ResourceView {
    id: ResourceId,
    media_type: MediaType,
    bytes: Arc<[u8]>,
}

impl ResourceView {
    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for ResourceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceView")
            .field("id", &self.id)
            .field("media_type", &self.media_type)
            .finish()
    }
}

/// Holder of the single active display resource.
///
/// Every replace/clear path releases the previous resource and reports which
/// one was released, so callers can verify each is released exactly once.
#[derive(Debug, Default)]
pub struct ResourceSlot {
    active: Option<DisplayResource>,
}

impl ResourceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `resource`, releasing whatever was active before.
    pub fn replace(&mut self, resource: DisplayResource) -> Option<ResourceId> {
        let previous = self.active.replace(resource);
        previous.map(|old| old.id())
    }

    /// Release the active resource, if any.
    pub fn release(&mut self) -> Option<ResourceId> {
        self.active.take().map(|old| old.id())
    }

    pub fn active(&self) -> Option<&DisplayResource> {
        self.active.as_ref()
    }

    pub fn active_id(&self) -> Option<ResourceId> {
        self.active.as_ref().map(DisplayResource::id)
    }
}
