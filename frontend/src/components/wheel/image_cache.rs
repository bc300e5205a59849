use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

/// Load state of one cached image URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Failed URLs are never retried for the lifetime of the cache.
    Failed,
}

struct Entry {
    element: HtmlImageElement,
    state: Rc<Cell<LoadState>>,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl Drop for Entry {
    fn drop(&mut self) {
        // Detach handlers so an in-flight load from a torn-down instance
        // cannot call into dropped closures.
        self.element.set_onload(None);
        self.element.set_onerror(None);
    }
}

/// Per-instance async image cache keyed by URL. Each component owns its
/// own cache; dropping it invalidates every in-flight load.
#[derive(Default)]
pub struct ImageCache {
    entries: HashMap<String, Entry>,
}

/// Outcome of resolving a primary URL with an optional fallback.
pub enum Resolved<'a> {
    Ready(&'a HtmlImageElement),
    /// Something is still loading; draw the neutral placeholder.
    Pending,
    /// Every candidate failed; draw the procedural alternative.
    Exhausted,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_of(&mut self, url: &str) -> LoadState {
        self.ensure(url);
        self.entries
            .get(url)
            .map(|entry| entry.state.get())
            .unwrap_or(LoadState::Failed)
    }

    /// Resolves `primary`, falling back to `fallback` once the primary
    /// has definitively failed.
    pub fn resolve<'a>(&'a mut self, primary: &str, fallback: Option<&str>) -> Resolved<'a> {
        let chosen = match self.state_of(primary) {
            LoadState::Ready => Some(primary.to_string()),
            LoadState::Loading => return Resolved::Pending,
            LoadState::Failed => match fallback {
                Some(fallback_url) => match self.state_of(fallback_url) {
                    LoadState::Ready => Some(fallback_url.to_string()),
                    LoadState::Loading => return Resolved::Pending,
                    LoadState::Failed => None,
                },
                None => None,
            },
        };
        match chosen {
            Some(url) => Resolved::Ready(&self.entries[&url].element),
            None => Resolved::Exhausted,
        }
    }

    fn ensure(&mut self, url: &str) {
        if url.is_empty() || self.entries.contains_key(url) {
            return;
        }
        let Ok(element) = HtmlImageElement::new() else {
            return;
        };
        let state = Rc::new(Cell::new(LoadState::Loading));

        let onload = {
            let state = state.clone();
            Closure::wrap(Box::new(move || {
                state.set(LoadState::Ready);
            }) as Box<dyn FnMut()>)
        };
        let onerror = {
            let state = state.clone();
            let url = url.to_string();
            Closure::wrap(Box::new(move || {
                log::warn!("image failed to load, falling back: {url}");
                state.set(LoadState::Failed);
            }) as Box<dyn FnMut()>)
        };
        element.set_onload(Some(onload.as_ref().unchecked_ref()));
        element.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        element.set_cross_origin(Some("anonymous"));
        element.set_src(url);

        self.entries.insert(
            url.to_string(),
            Entry {
                element,
                state,
                _onload: onload,
                _onerror: onerror,
            },
        );
    }
}
