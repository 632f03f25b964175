use std::collections::HashMap;

use bigdecimal::BigDecimal;

/// Name-to-value bindings visible to identifier lookups.
///
/// An unbound name yields `None`, which is distinct from a binding to zero.
///
/// # Example
/// ```
/// use bigdecimal::BigDecimal;
/// use calkit::interpreter::evaluator::environment::Environment;
///
/// let mut env = Environment::default();
/// let previous = env.get("i").cloned();
///
/// env.set("i", BigDecimal::from(3));
/// assert_eq!(env.get("i"), Some(&BigDecimal::from(3)));
///
/// env.restore("i", previous);
/// assert_eq!(env.get("i"), None);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Environment {
    variables: HashMap<String, BigDecimal>,
}

impl Environment {
    /// Looks up the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BigDecimal> {
        self.variables.get(name)
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn set(&mut self, name: &str, value: BigDecimal) {
        self.variables.insert(name.to_owned(), value);
    }

    /// Puts back a binding saved earlier with [`Environment::get`].
    ///
    /// `None` removes the name entirely, so a variable that was unbound before
    /// stays unbound afterwards.
    pub fn restore(&mut self, name: &str, previous: Option<BigDecimal>) {
        match previous {
            Some(value) => self.set(name, value),
            None => {
                self.variables.remove(name);
            },
        }
    }
}
