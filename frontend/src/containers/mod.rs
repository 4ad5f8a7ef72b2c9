//! Controllers behind the employee pages.
//!
//! They own no DOM: views pass in what the user did and render what the
//! controllers report through callbacks. Store calls are handed to a
//! [`Spawner`] instead of being awaited, so a controller never blocks a view.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

pub mod bills;
pub mod new_bill;

#[cfg(test)]
pub(crate) mod test_support;

pub type Task = Pin<Box<dyn Future<Output = ()>>>;

/// Runs fire-and-forget store calls on the UI thread
#[derive(Clone)]
pub struct Spawner(Rc<dyn Fn(Task)>);

impl Spawner {
    pub fn new(spawn: impl Fn(Task) + 'static) -> Self {
        Self(Rc::new(spawn))
    }

    /// Spawner backed by the browser microtask queue
    pub fn local() -> Self {
        Self::new(|task| wasm_bindgen_futures::spawn_local(task))
    }

    pub fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        (self.0)(Box::pin(task))
    }
}
