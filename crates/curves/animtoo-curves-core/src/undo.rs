//! Scoped undo chunks.

use std::ops::{Deref, DerefMut};

use crate::host::UndoHost;

/// Open undo chunk on a host; closed when dropped, including during unwinding.
pub struct UndoChunk<'a, H: UndoHost + ?Sized> {
    host: &'a mut H,
}

impl<'a, H: UndoHost + ?Sized> UndoChunk<'a, H> {
    pub fn open(host: &'a mut H) -> Self {
        host.open_chunk();
        Self { host }
    }
}

impl<H: UndoHost + ?Sized> Deref for UndoChunk<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: UndoHost + ?Sized> DerefMut for UndoChunk<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: UndoHost + ?Sized> Drop for UndoChunk<'_, H> {
    fn drop(&mut self) {
        self.host.close_chunk();
    }
}

/// Run `f` inside one undo chunk so the whole edit undoes as a single step.
pub fn undoable<H, R, F>(host: &mut H, f: F) -> R
where
    H: UndoHost + ?Sized,
    F: FnOnce(&mut H) -> R,
{
    let mut chunk = UndoChunk::open(host);
    f(&mut *chunk)
}
