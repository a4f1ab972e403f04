//! [`Scheduler`] over `setTimeout`.

use std::cell::RefCell;
use std::rc::Weak;
use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::transition::{
    Navigator, Scheduler, TransitionController, Trigger,
};
use crate::view::ContentView;

/// Receiver of fired timer triggers.
pub trait TriggerSink {
    /// Handle a fired trigger.
    fn deliver(&self, trigger: Trigger);
}

impl<V, N, S> TriggerSink for TransitionController<V, N, S>
where
    V: ContentView,
    N: Navigator,
    S: Scheduler,
{
    fn deliver(&self, trigger: Trigger) {
        self.handle(trigger);
    }
}

/// Delivers triggers through browser timeouts.
///
/// The controller owns its scheduler, so the sink is attached after the
/// controller is placed in an `Rc`; triggers fired before that, or after
/// the controller is dropped, are discarded.
pub struct WebScheduler {
    window: Window,
    sink: RefCell<Option<Weak<dyn TriggerSink>>>,
}

impl WebScheduler {
    /// Timers on `window`.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self {
            window,
            sink: RefCell::new(None),
        }
    }

    /// Route fired triggers to `sink`.
    pub fn connect(&self, sink: Weak<dyn TriggerSink>) {
        *self.sink.borrow_mut() = Some(sink);
    }
}

impl Scheduler for WebScheduler {
    fn schedule(&self, delay: Duration, trigger: Trigger) {
        let sink = self.sink.borrow().clone();
        let callback = Closure::once_into_js(move || {
            match sink.as_ref().and_then(Weak::upgrade) {
                Some(sink) => sink.deliver(trigger),
                None => log::debug!("dropping {trigger:?}, no controller"),
            }
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis,
            )
        {
            log::error!("failed to schedule timer: {e:?}");
        }
    }
}
