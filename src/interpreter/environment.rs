//! The environment chain: nested scopes with shared ownership so closures
//! can outlive the block that created them.

use super::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One frame of the environment chain. Wrapped in `Rc<RefCell<_>>` so that a
/// closure capturing `enclosing` and a later-created sibling scope can both
/// observe writes to shared bindings (required for nested closures that
/// mutate a captured variable).
#[derive(Debug)]
pub struct Environment {
    values: RefCell<HashMap<String, Value>>,
    enclosing: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new_global() -> Rc<Environment> {
        Rc::new(Environment {
            values: RefCell::new(HashMap::new()),
            enclosing: None,
        })
    }

    pub fn new_enclosed(enclosing: &Rc<Environment>) -> Rc<Environment> {
        Rc::new(Environment {
            values: RefCell::new(HashMap::new()),
            enclosing: Some(Rc::clone(enclosing)),
        })
    }

    /// Introduces `name` in this frame, overwriting any existing binding at
    /// this level (redeclaration at the same scope is allowed).
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.values.borrow_mut().insert(name.into(), value);
    }

    /// Reads `name` by walking exactly `depth` frames up, as resolved by the
    /// resolver's side-table.
    pub fn get_at(self: &Rc<Self>, depth: usize, name: &str) -> Option<Value> {
        self.ancestor(depth).values.borrow().get(name).cloned()
    }

    /// Writes `name` at exactly `depth` frames up. Returns `false` if the
    /// binding doesn't actually exist there (shouldn't happen if the
    /// resolver's side-table is consistent with the environment shape it
    /// describes, but checked rather than assumed).
    pub fn assign_at(self: &Rc<Self>, depth: usize, name: &str, value: Value) -> bool {
        let target = self.ancestor(depth);
        let mut values = target.values.borrow_mut();
        if values.contains_key(name) {
            values.insert(name.to_owned(), value);
            true
        } else {
            false
        }
    }

    /// Searches this frame and every ancestor for `name`, used for globals
    /// (the resolver leaves unresolved accesses to be looked up dynamically).
    pub fn get_global(self: &Rc<Self>, name: &str) -> Option<Value> {
        if let Some(value) = self.values.borrow().get(name).cloned() {
            return Some(value);
        }
        match &self.enclosing {
            Some(parent) => parent.get_global(name),
            None => None,
        }
    }

    pub fn assign_global(self: &Rc<Self>, name: &str, value: Value) -> bool {
        if self.values.borrow().contains_key(name) {
            self.values.borrow_mut().insert(name.to_owned(), value);
            return true;
        }
        match &self.enclosing {
            Some(parent) => parent.assign_global(name, value),
            None => false,
        }
    }

    fn ancestor(self: &Rc<Self>, depth: usize) -> Rc<Environment> {
        let mut env = Rc::clone(self);
        for _ in 0..depth {
            let next = env
                .enclosing
                .clone()
                .expect("resolver depth exceeds the live environment chain");
            env = next;
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_reads_through_to_parent_definitions() {
        let global = Environment::new_global();
        global.define("a", Value::Number(1.0));
        let child = Environment::new_enclosed(&global);
        assert_eq!(child.get_at(1, "a").unwrap().to_string(), "1");
    }

    #[test]
    fn writes_through_a_shared_environment_are_visible_to_every_holder() {
        let global = Environment::new_global();
        global.define("counter", Value::Number(0.0));
        let child = Environment::new_enclosed(&global);
        child.assign_at(1, "counter", Value::Number(1.0));
        assert_eq!(global.get_at(0, "counter").unwrap().to_string(), "1");
    }

    #[test]
    fn get_global_walks_the_whole_chain() {
        let global = Environment::new_global();
        global.define("a", Value::Bool(true));
        let child = Environment::new_enclosed(&global);
        let grandchild = Environment::new_enclosed(&child);
        assert!(grandchild.get_global("a").is_some());
        assert!(grandchild.get_global("missing").is_none());
    }
}
