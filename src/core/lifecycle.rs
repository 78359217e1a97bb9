//! # View Lifecycle
//!
//! Owns the single "current view" slot and the `ControlMapping` derived from
//! it. Nothing else installs views or dispatch tables.
//!
//! ```text
//! update(new)
//!   1. old.release()          ─► surface.teardown(old kind)
//!   2. current = new
//!   3. surface.show_main(new.output())
//!   4. mapping = build(new.bindings(), defaults)
//!                             ─► surface.show_controls(listing)
//!   5. surface.request_redraw()
//! ```
//!
//! The outgoing view is fully released before any part of the incoming one
//! reaches the surface, so there is never a frame with two views.

use log::debug;

use crate::core::controls::{ControlBinding, ControlEntry, ControlMapping};
use crate::core::view::{View, ViewKind, ViewOutput};

/// Whatever paints the explorer. The lifecycle pushes content into it; it
/// never reads anything back.
pub trait DisplaySurface {
    /// Replace the main content area.
    fn show_main(&mut self, output: ViewOutput);

    /// The view of the given kind was released; drop anything held for it.
    fn teardown(&mut self, kind: ViewKind);

    /// Replace the controls panel.
    fn show_controls(&mut self, controls: &[ControlEntry]);

    fn request_redraw(&mut self);
}

pub struct ViewLifecycle<S: DisplaySurface> {
    surface: S,
    current: Option<View>,
    mapping: ControlMapping,
    defaults: Vec<ControlBinding>,
}

impl<S: DisplaySurface> ViewLifecycle<S> {
    /// Starts with no view; the mapping holds only the defaults.
    pub fn new(mut surface: S, defaults: Vec<ControlBinding>) -> Self {
        let mapping = ControlMapping::build(&[], &defaults);
        surface.show_controls(mapping.listing());
        Self {
            surface,
            current: None,
            mapping,
            defaults,
        }
    }

    pub fn update(&mut self, view: View) {
        if let Some(old) = self.current.take() {
            let kind = old.kind();
            old.release();
            self.surface.teardown(kind);
        }

        let view = self.current.insert(view);
        debug!("Installing {:?} view", view.kind());
        self.surface.show_main(view.output());
        self.mapping = ControlMapping::build(&view.bindings(), &self.defaults);
        self.surface.show_controls(self.mapping.listing());
        self.surface.request_redraw();
    }

    /// Republish the current view's output after it changed in place.
    /// Bindings are left alone.
    pub fn refresh(&mut self) {
        if let Some(view) = &self.current {
            self.surface.show_main(view.output());
            self.surface.request_redraw();
        }
    }

    pub fn current(&self) -> Option<&View> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut View> {
        self.current.as_mut()
    }

    pub fn mapping(&self) -> &ControlMapping {
        &self.mapping
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
