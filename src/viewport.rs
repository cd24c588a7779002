//! Viewport width provider and the width -> scale policy
//!
//! The session never measures the screen itself. A provider reports the
//! current width and pushes changes to subscribers; a `ScalePolicy` turns a
//! width into the layout scale factor for a shape family.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::shape::PlacementFamily;

/// Width assumed when nothing better is known
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1024.0;

/// Source of the viewport width
pub trait ViewportSizeProvider {
    fn current_width(&self) -> f32;

    /// Call `listener` with the new width on every change until the returned
    /// subscription is dropped.
    fn subscribe(&self, listener: Box<dyn FnMut(f32)>) -> Subscription;
}

/// Live subscription; dropping it unsubscribes
#[must_use = "dropping a subscription immediately unsubscribes"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release (provider had no event source)
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Release now instead of at drop
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Maps a viewport width to a layout scale factor
pub trait ScalePolicy {
    fn scale_for(&self, family: PlacementFamily, width: f32) -> f32;
}

/// Width breakpoint: widths up to `max_width` use `scale`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub max_width: f32,
    pub scale: f32,
}

/// Breakpoint table per family; widths past every breakpoint use 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdScalePolicy {
    /// Sorted by ascending `max_width`
    pub radial: Vec<Breakpoint>,
    /// Sorted by ascending `max_width`
    pub grid: Vec<Breakpoint>,
}

impl Default for ThresholdScalePolicy {
    fn default() -> Self {
        Self {
            radial: vec![Breakpoint {
                max_width: 351.0,
                scale: 0.75,
            }],
            grid: vec![
                Breakpoint {
                    max_width: 356.0,
                    scale: 0.5,
                },
                Breakpoint {
                    max_width: 411.0,
                    scale: 0.75,
                },
            ],
        }
    }
}

impl ScalePolicy for ThresholdScalePolicy {
    fn scale_for(&self, family: PlacementFamily, width: f32) -> f32 {
        let table = match family {
            PlacementFamily::Radial => &self.radial,
            PlacementFamily::Grid => &self.grid,
        };
        table
            .iter()
            .find(|bp| width <= bp.max_width)
            .map(|bp| bp.scale)
            .unwrap_or(1.0)
    }
}

struct ListenerSet {
    width: f32,
    next_id: u64,
    listeners: Vec<(u64, Box<dyn FnMut(f32)>)>,
    /// Set while `set_width` runs the listeners outside the borrow
    notifying: bool,
    /// Ids unsubscribed while `notifying`
    released: Vec<u64>,
}

impl ListenerSet {
    fn release(&mut self, id: u64) {
        if self.notifying {
            self.released.push(id);
        } else {
            self.listeners.retain(|(lid, _)| *lid != id);
        }
    }
}

/// In-process viewport whose width is set by the host (native, tests)
#[derive(Clone)]
pub struct SharedViewport {
    inner: Rc<RefCell<ListenerSet>>,
}

impl SharedViewport {
    pub fn new(width: f32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListenerSet {
                width,
                next_id: 0,
                listeners: Vec::new(),
                notifying: false,
                released: Vec::new(),
            })),
        }
    }

    /// Change the width and notify subscribers.
    ///
    /// Listeners run with no borrow held, so they may read the width,
    /// subscribe or unsubscribe. A nested `set_width` only updates the width.
    pub fn set_width(&self, width: f32) {
        let mut listeners = {
            let mut inner = self.inner.borrow_mut();
            if inner.width == width {
                return;
            }
            inner.width = width;
            if inner.notifying {
                return;
            }
            inner.notifying = true;
            std::mem::take(&mut inner.listeners)
        };

        for (_, listener) in listeners.iter_mut() {
            listener(width);
        }

        let mut inner = self.inner.borrow_mut();
        let released = std::mem::take(&mut inner.released);
        listeners.append(&mut inner.listeners);
        listeners.retain(|(id, _)| !released.contains(id));
        inner.listeners = listeners;
        inner.notifying = false;
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl ViewportSizeProvider for SharedViewport {
    fn current_width(&self) -> f32 {
        self.inner.borrow().width
    }

    fn subscribe(&self, listener: Box<dyn FnMut(f32)>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, listener));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().release(id);
            }
        })
    }
}
