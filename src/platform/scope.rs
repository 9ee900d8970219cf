use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{trace, warn};

use crate::api::ScriptReply;

use super::EngineFactory;

/// A module-registration global (AMD `define`, CommonJS `module`, ...)
/// lifted off the page while the engine script evaluates.
pub struct ModuleBinding {
    pub name: String,
    pub value: Box<dyn Any>,
}

impl ModuleBinding {
    #[must_use]
    pub fn new(name: impl Into<String>, value: Box<dyn Any>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl fmt::Debug for ModuleBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleBinding")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The page's global namespace as seen by the engine loader.
pub trait GlobalScope {
    /// Removes every binding that would make a UMD bundle register itself
    /// as a module instead of exposing a global.
    fn take_module_bindings(&mut self) -> Vec<ModuleBinding>;

    fn restore_module_bindings(&mut self, bindings: Vec<ModuleBinding>);

    /// The sliding-engine constructor, once the library has exposed it.
    fn engine_capability(&self) -> Option<Rc<dyn EngineFactory>>;
}

/// Fetches and evaluates the engine script.
///
/// Implementations resolve `reply` exactly once.
pub trait ScriptFetcher {
    fn load_script(&mut self, url: &str, reply: ScriptReply);
}

/// Scoped suppression of module-registration globals.
///
/// Bindings are restored when the guard drops, whichever path drops it.
pub struct ModuleSuppression {
    scope: Rc<RefCell<dyn GlobalScope>>,
    saved: Option<Vec<ModuleBinding>>,
}

impl ModuleSuppression {
    #[must_use]
    pub fn acquire(scope: Rc<RefCell<dyn GlobalScope>>) -> Self {
        let saved = scope.borrow_mut().take_module_bindings();
        trace!(count = saved.len(), "suppressed module bindings");
        Self {
            scope,
            saved: Some(saved),
        }
    }

    #[must_use]
    pub fn suppressed_count(&self) -> usize {
        self.saved.as_ref().map_or(0, Vec::len)
    }
}

impl Drop for ModuleSuppression {
    fn drop(&mut self) {
        let Some(saved) = self.saved.take() else {
            return;
        };
        match self.scope.try_borrow_mut() {
            Ok(mut scope) => {
                trace!(count = saved.len(), "restored module bindings");
                scope.restore_module_bindings(saved);
            }
            Err(_) => warn!(
                count = saved.len(),
                "global scope busy; module bindings could not be restored"
            ),
        }
    }
}

impl fmt::Debug for ModuleSuppression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleSuppression")
            .field("suppressed", &self.suppressed_count())
            .finish_non_exhaustive()
    }
}
