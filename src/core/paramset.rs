//! Bundle up parameters and their values in a generic way.
//!
//! Hosts fill a **ParamSet** (from a command line, a scene file, ...)
//! and components look up the values they understand, falling back
//! to defaults for anything missing.

// std
use std::cell::Cell;
// pbrt
use crate::core::error::{BvhError, Result};

// see paramset.h

#[derive(Debug, Clone)]
pub struct ParamSetItem<T> {
    pub name: String,
    pub values: Vec<T>,
    pub n_values: usize,
    pub looked_up: Cell<bool>,
}

impl<T> ParamSetItem<T> {
    fn new(name: String, values: Vec<T>) -> Self {
        let n_values: usize = values.len();
        ParamSetItem {
            name,
            values,
            n_values,
            looked_up: Cell::new(false),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ParamSet {
    pub ints: Vec<ParamSetItem<i32>>,
    pub strings: Vec<ParamSetItem<String>>,
}

impl ParamSet {
    pub fn add_int(&mut self, name: String, value: i32) {
        self.erase(&name);
        self.ints.push(ParamSetItem::new(name, vec![value]));
    }
    pub fn add_string(&mut self, name: String, value: String) {
        self.erase(&name);
        self.strings.push(ParamSetItem::new(name, vec![value]));
    }
    /// Remove a parameter of any type. Returns true if something was
    /// removed.
    pub fn erase(&mut self, name: &str) -> bool {
        let before: usize = self.len();
        self.ints.retain(|item| item.name != name);
        self.strings.retain(|item| item.name != name);
        before != self.len()
    }
    pub fn len(&self) -> usize {
        self.ints.len() + self.strings.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn find_one_int(&self, name: &str, d: i32) -> i32 {
        lookup_one(&self.ints, name, d)
    }
    pub fn find_one_string(&self, name: &str, d: String) -> String {
        lookup_one(&self.strings, name, d)
    }
    /// Like **find_one_int()**, but a parameter with the same name and
    /// a different type is an error instead of being ignored.
    pub fn find_one_int_checked(&self, name: &str, d: i32) -> Result<i32> {
        if self.strings.iter().any(|item| item.name == name) {
            return Err(BvhError::ParamType {
                name: name.to_string(),
                expected: "integer",
            });
        }
        Ok(self.find_one_int(name, d))
    }
    /// Names of all parameters nobody asked for.
    pub fn unused(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        collect_unused(&self.ints, &mut names);
        collect_unused(&self.strings, &mut names);
        names
    }
    pub fn report_unused(&self) {
        for name in self.unused() {
            log::warn!("Parameter \"{}\" not used", name);
        }
    }
}

/// Replaces a macro on the C++ side.
pub fn lookup_one<T>(vec: &[ParamSetItem<T>], name: &str, d: T) -> T
where
    T: Clone,
{
    for v in vec {
        if v.name == name && v.n_values == 1_usize {
            v.looked_up.set(true);
            return v.values[0].clone();
        }
    }
    d
}

fn collect_unused<T>(vec: &[ParamSetItem<T>], names: &mut Vec<String>) {
    for v in vec {
        if !v.looked_up.get() {
            names.push(v.name.clone());
        }
    }
}
