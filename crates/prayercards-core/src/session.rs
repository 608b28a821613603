//! UI-agnostic session state
//!
//! A [`Session`] is the explicit object a front-end holds for the lifetime of
//! one user session: the catalog with its favorites, and the composer with
//! its live draft. Front-ends that share a session between several surfaces
//! wrap it in a [`SharedSession`].

use crate::catalog::Catalog;
use crate::draft::Composer;
use crate::error::Result;
use crate::export::{ExportReceipt, ExportSink, ImageLoader};
use crate::render::RenderedCard;
use crate::style::StyleOptions;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
pub struct Session {
    pub catalog: Catalog,
    pub composer: Composer,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: StyleOptions) -> Self {
        Self {
            catalog: Catalog::new(),
            composer: Composer::with_style(style),
        }
    }

    /// Seed the draft from a catalog verse. Returns `false` and leaves the
    /// draft alone if no verse has that id.
    pub fn pick_verse(&mut self, id: &str) -> bool {
        match self.catalog.verse(id) {
            Some(verse) => {
                self.composer.seed_from_verse(verse);
                true
            }
            None => false,
        }
    }

    /// Use a catalog background. Returns `false` and leaves the draft alone
    /// if no background has that id.
    pub fn pick_background(&mut self, id: &str) -> bool {
        match self.catalog.background(id) {
            Some(image) => {
                self.composer.select_background(image);
                true
            }
            None => false,
        }
    }

    pub fn render(&self) -> RenderedCard {
        self.composer.render()
    }

    /// Render through `loader` and hand the result to `sink`
    pub fn export(
        &self,
        loader: &dyn ImageLoader,
        placeholder_url: &str,
        sink: &mut dyn ExportSink,
    ) -> Result<ExportReceipt> {
        let card = RenderedCard::render_with(self.composer.draft(), loader, placeholder_url)?;
        sink.export(&card)
    }
}

/// A session shared between callers; every call through [`SharedSession::with`]
/// sees and leaves a whole draft.
#[derive(Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.lock();
        f(&mut *session)
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // Mutations are single assignments, so a poisoned lock still holds a whole draft
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
