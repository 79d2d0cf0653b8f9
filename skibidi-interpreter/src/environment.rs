use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
struct EnvironmentCore {
    store: HashMap<Rc<str>, Rc<Object>>,
    outer: Option<Environment>,
}

/// Shared handle to one scope of bindings.
///
/// Cloning the handle does not copy the bindings; closures keep their
/// defining scope alive by holding a clone.
#[derive(Clone, Default)]
pub struct Environment {
    environment: Rc<RefCell<EnvironmentCore>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_enclosed(outer: Environment) -> Environment {
        Environment {
            environment: Rc::new(RefCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: Some(outer),
            })),
        }
    }

    pub fn get(&self, key: &str) -> Option<Rc<Object>> {
        let env = self.environment.borrow();
        match env.store.get(key) {
            Some(value) => Some(value.clone()),
            None => env.outer.as_ref().and_then(|outer| outer.get(key)),
        }
    }

    /// Binds in this scope only, shadowing any outer binding of `key`.
    pub fn set(&self, key: Rc<str>, value: Rc<Object>) -> Rc<Object> {
        self.environment
            .borrow_mut()
            .store
            .insert(key, value.clone());
        value
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.environment, &other.environment)
    }
}
