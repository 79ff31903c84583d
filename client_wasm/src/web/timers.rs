//! Browser timing sources as owned handles
//!
//! Each handle keeps its JS closure alive and cancels the browser timer when
//! dropped. A handle must not be dropped from inside its own callback; call
//! `cancel` there and let the owner drop it later.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Per-frame callback driven by `requestAnimationFrame`
pub struct AnimationLoop {
    running: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    closure: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl AnimationLoop {
    pub fn start<F>(mut frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) + 'static,
    {
        let running = Rc::new(Cell::new(true));
        let handle = Rc::new(Cell::new(None));
        let closure: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

        let slot = Rc::downgrade(&closure);
        let still_running = running.clone();
        let next_handle = handle.clone();
        *closure.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            next_handle.set(None);
            if !still_running.get() {
                return;
            }
            frame(timestamp);
            // The frame may have cancelled the loop
            if !still_running.get() {
                return;
            }
            if let Some(slot) = slot.upgrade() {
                if let Some(callback) = slot.borrow().as_ref() {
                    match request_frame(callback) {
                        Ok(id) => next_handle.set(Some(id)),
                        Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
                    }
                }
            }
        }));

        if let Some(callback) = closure.borrow().as_ref() {
            handle.set(Some(request_frame(callback)?));
        }

        Ok(Self {
            running,
            handle,
            closure,
        })
    }

    pub fn cancel(&self) {
        self.running.set(false);
        if let Some(id) = self.handle.take() {
            if let Ok(window) = window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.cancel();
        self.closure.borrow_mut().take();
    }
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Repeating `setInterval` timer
pub struct Interval {
    handle: Cell<Option<i32>>,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start<F>(period_ms: u32, tick: F) -> Result<Self, JsValue>
    where
        F: FnMut() + 'static,
    {
        let closure = Closure::<dyn FnMut()>::new(tick);
        let id = window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms as i32,
        )?;
        Ok(Self {
            handle: Cell::new(Some(id)),
            _closure: closure,
        })
    }

    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Ok(window) = window() {
                window.clear_interval_with_handle(id);
            }
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// One-shot `setTimeout` timer
pub struct Timeout {
    handle: Cell<Option<i32>>,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn start<F>(delay_ms: u32, fire: F) -> Result<Self, JsValue>
    where
        F: FnOnce() + 'static,
    {
        let mut fire = Some(fire);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(fire) = fire.take() {
                fire();
            }
        });
        let id = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms as i32,
        )?;
        Ok(Self {
            handle: Cell::new(Some(id)),
            _closure: closure,
        })
    }

    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Ok(window) = window() {
                window.clear_timeout_with_handle(id);
            }
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}
