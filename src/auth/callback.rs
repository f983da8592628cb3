//! Opener-side token callback.
//!
//! The registry is an explicit object shared by reference between the
//! component that starts sign-in and whatever delivers the token.  It holds a
//! single handler; registering returns a guard, and dropping the guard
//! removes the handler so a torn-down component is never called back.
//!
//! The popup is a separate browsing context and can only reach the opener
//! through `window.opener`, so [`WindowBridge`] publishes the registry under
//! the well-known function name for as long as the bridge lives.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::constants::OPENER_CALLBACK_NAME;

type TokenHandler = Rc<dyn Fn(&str)>;

#[derive(Clone, Default)]
pub struct CallbackRegistry {
    slot: Rc<RefCell<Option<(u64, TokenHandler)>>>,
    generation: Rc<Cell<u64>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `handler`, replacing any previous one.
    #[must_use = "dropping the guard deregisters the handler immediately"]
    pub fn register(&self, handler: impl Fn(&str) + 'static) -> CallbackGuard {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        *self.slot.borrow_mut() = Some((generation, Rc::new(handler)));
        CallbackGuard {
            registry: self.clone(),
            generation,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Deliver a token.  Returns `false` when nothing is registered.
    pub fn invoke(&self, token: &str) -> bool {
        // Clone out so the handler may register or drop guards itself.
        let handler = self.slot.borrow().as_ref().map(|(_, h)| Rc::clone(h));
        match handler {
            Some(handler) => {
                handler(token);
                true
            }
            None => false,
        }
    }
}

/// Keeps a handler registered.  A newer registration is left alone when an
/// older guard drops.
pub struct CallbackGuard {
    registry: CallbackRegistry,
    generation: u64,
}

impl Drop for CallbackGuard {
    fn drop(&mut self) {
        let mut slot = self.registry.slot.borrow_mut();
        if matches!(slot.as_ref(), Some((g, _)) if *g == self.generation) {
            *slot = None;
        }
    }
}

/// `window.handleGoogleCallback`, forwarding to a registry.
pub struct WindowBridge {
    window: web_sys::Window,
    _closure: Closure<dyn Fn(String)>,
}

impl WindowBridge {
    pub fn install(registry: &CallbackRegistry) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;

        let registry = registry.clone();
        let closure = Closure::wrap(Box::new(move |token: String| {
            if !registry.invoke(&token) {
                tracing::warn!("token delivered but no sign-in handler is registered");
            }
        }) as Box<dyn Fn(String)>);

        js_sys::Reflect::set(
            &window,
            &JsValue::from_str(OPENER_CALLBACK_NAME),
            closure.as_ref(),
        )?;

        Ok(Self {
            window,
            _closure: closure,
        })
    }
}

impl Drop for WindowBridge {
    fn drop(&mut self) {
        // Remove the property before the closure is freed.
        let _ = js_sys::Reflect::delete_property(
            &self.window,
            &JsValue::from_str(OPENER_CALLBACK_NAME),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoke_without_handler_reports_false() {
        let registry = CallbackRegistry::new();
        assert!(!registry.invoke("tok"));
    }

    #[test]
    fn guard_drop_deregisters() {
        let registry = CallbackRegistry::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let guard = registry.register(move |t| sink.borrow_mut().push(t.to_string()));
        assert!(registry.invoke("abc123"));
        drop(guard);

        assert!(!registry.is_registered());
        assert!(!registry.invoke("late"));
        assert_eq!(*seen.borrow(), vec!["abc123".to_string()]);
    }

    #[test]
    fn stale_guard_keeps_newer_handler() {
        let registry = CallbackRegistry::new();
        let hits = Rc::new(Cell::new(0));

        let old = registry.register(|_| {});
        let counter = Rc::clone(&hits);
        let _current = registry.register(move |_| counter.set(counter.get() + 1));
        drop(old);

        assert!(registry.invoke("tok"));
        assert_eq!(hits.get(), 1);
    }
}
