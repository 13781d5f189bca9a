// Fri Feb 13 2026 - Alex

use crate::buffer::{BufferUtils, ByteBuffer};
use crate::info::StructureInfo;
use crate::structure::{StructureError, StructureRoot};
use std::any::Any;
use std::rc::Rc;
use std::sync::Arc;

/// Binding state of one structure node.
///
/// A node starts unbound, may carry a resolved layout before any buffer
/// exists, and ends up either as the root of a tree (fresh or adopted buffer)
/// or as a child view into an ancestor's buffer.
#[derive(Debug, Default)]
pub struct Binding {
    pub(crate) root: Option<Rc<StructureRoot>>,
    pub(crate) offset: usize,
    pub(crate) info: Option<Arc<StructureInfo>>,
    pub(crate) is_root: bool,
}

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_info(info: Arc<StructureInfo>) -> Self {
        Self {
            info: Some(info),
            ..Self::default()
        }
    }

    pub fn is_bound(&self) -> bool {
        self.root.is_some()
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn info(&self) -> Option<&Arc<StructureInfo>> {
        self.info.as_ref()
    }

    pub fn set_info(&mut self, info: Arc<StructureInfo>) {
        self.info = Some(info);
    }

    pub fn require_info(&self) -> Result<&Arc<StructureInfo>, StructureError> {
        self.info.as_ref().ok_or(StructureError::InfoUnresolved)
    }

    pub fn require_bound(&self) -> Result<(&Rc<StructureRoot>, usize), StructureError> {
        match &self.root {
            Some(root) => Ok((root, self.offset)),
            None => Err(StructureError::NotBound),
        }
    }

    pub fn root(&self) -> Option<&Rc<StructureRoot>> {
        self.root.as_ref()
    }
}

/// A runtime node bound (or bindable) onto a shared byte buffer.
///
/// The provided operations implement the binding state machine; implementors
/// supply the two accessors and, for composites, override `bind_children` to
/// place their members.
pub trait Structure {
    fn binding(&self) -> &Binding;

    fn binding_mut(&mut self) -> &mut Binding;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Re-binds composite members after this node's own binding changed.
    fn bind_children(&mut self) -> Result<(), StructureError> {
        Ok(())
    }

    fn info(&self) -> Result<&Arc<StructureInfo>, StructureError> {
        self.binding().require_info()
    }

    /// Allocates a fresh aligned buffer sized to the resolved layout and
    /// becomes the root of a new tree.
    fn allocate(&mut self) -> Result<(), StructureError> {
        if self.binding().is_bound() {
            return Err(StructureError::AlreadyBound);
        }
        let info = self.binding().require_info()?.clone();
        let buffer = BufferUtils::create_aligned(info.required_size(), info.alignment().as_usize())?;
        self.adopt_root(buffer)
    }

    /// Adopts a caller-supplied buffer verbatim (no copy) and becomes root.
    fn claim_buffer(&mut self, buffer: ByteBuffer) -> Result<(), StructureError> {
        if self.binding().is_bound() {
            return Err(StructureError::AlreadyBound);
        }
        let required = self.binding().require_info()?.required_size();
        if buffer.capacity() < required {
            return Err(StructureError::BufferTooSmall {
                expected: required,
                actual: buffer.capacity(),
            });
        }
        self.adopt_root(buffer)
    }

    #[doc(hidden)]
    fn adopt_root(&mut self, buffer: ByteBuffer) -> Result<(), StructureError> {
        let root = Rc::new(StructureRoot::new(buffer));
        {
            let binding = self.binding_mut();
            binding.root = Some(root);
            binding.offset = 0;
            binding.is_root = true;
        }
        self.bind_children()
    }

    /// Binds this node as a child view `[offset, offset + size)` of `root`'s
    /// buffer. Re-binding an already-bound node is allowed; parents use this
    /// on every child when their own binding changes.
    fn use_buffer(
        &mut self,
        root: Rc<StructureRoot>,
        offset: usize,
        info: Arc<StructureInfo>,
    ) -> Result<(), StructureError> {
        let size = info.required_size();
        if offset + size > root.capacity() {
            return Err(StructureError::OutOfBounds {
                offset,
                len: size,
                capacity: root.capacity(),
            });
        }
        {
            let binding = self.binding_mut();
            binding.root = Some(root);
            binding.offset = offset;
            binding.info = Some(info);
            binding.is_root = false;
        }
        self.bind_children()
    }

    /// Re-binds this unbound node onto `other`'s buffer region at the same
    /// offset: a read/write alias sharing the root and its modified flag.
    fn union_with(&mut self, other: &dyn Structure) -> Result<(), StructureError> {
        if self.binding().is_bound() {
            return Err(StructureError::AlreadyBound);
        }
        let (root, offset) = {
            let (root, offset) = other.binding().require_bound()?;
            (root.clone(), offset)
        };
        let info = match self.binding().info() {
            Some(info) => info.clone(),
            None => other.binding().require_info()?.clone(),
        };
        self.use_buffer(root, offset, info)
    }

    /// Marks the owning tree modified. A no-op on unbound nodes.
    fn mark_modified(&self) {
        if let Some(root) = self.binding().root() {
            root.mark_modified();
        }
    }

    /// Clears the tree's modified flag. Authoritative only on the root.
    fn clear_modified(&self) {
        if let Some(root) = self.binding().root() {
            root.clear_modified();
        }
    }

    fn is_modified(&self) -> bool {
        self.binding().root().map_or(false, |r| r.is_modified())
    }

    /// Reads bytes relative to this node's own offset, clamped to its layout.
    fn read_bytes(&self, rel: usize, out: &mut [u8]) -> Result<(), StructureError> {
        let size = self.binding().require_info()?.required_size();
        let (root, offset) = self.binding().require_bound()?;
        if rel.checked_add(out.len()).map_or(true, |end| end > size) {
            return Err(StructureError::OutOfBounds {
                offset: rel,
                len: out.len(),
                capacity: size,
            });
        }
        root.read(offset + rel, out)
    }

    /// Writes bytes relative to this node's own offset and marks the tree
    /// modified.
    fn write_bytes(&mut self, rel: usize, src: &[u8]) -> Result<(), StructureError> {
        let size = self.binding().require_info()?.required_size();
        let (root, offset) = self.binding().require_bound()?;
        if rel.checked_add(src.len()).map_or(true, |end| end > size) {
            return Err(StructureError::OutOfBounds {
                offset: rel,
                len: src.len(),
                capacity: size,
            });
        }
        root.write(offset + rel, src)
    }
}

/// Constructor used to materialize runtime children for a resolved layout.
pub type StructureFactory = fn(Arc<StructureInfo>) -> Box<dyn Structure>;
