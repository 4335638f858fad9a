//! Recoverable problems noticed during a conversion.
//!
//! An unknown element symbol or residue code does not abort a conversion:
//! the value is kept (or replaced by a sentinel) and a message is pushed
//! here. Every pushed message is also emitted through `log::warn!`.

/// Ordered list of warning messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Warnings {
    messages: Vec<String>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a warning.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        self.messages.push(message);
    }

    /// Append already-logged warnings from another collector.
    pub fn append(&mut self, other: &mut Warnings) {
        self.messages.append(&mut other.messages);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.messages.iter()
    }

    /// Whether any message contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }

    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_query() {
        let mut w = Warnings::new();
        assert!(w.is_empty());
        w.push("unknown element symbol 'Xx'");
        w.push(String::from("skipped short ATOM line 4"));
        assert_eq!(w.len(), 2);
        assert!(w.mentions("Xx"));
        assert!(!w.mentions("HETATM"));
    }

    #[test]
    fn append_moves_messages() {
        let mut a = Warnings::new();
        let mut b = Warnings::new();
        b.push("one");
        a.append(&mut b);
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
        assert_eq!(a.into_vec(), vec!["one".to_string()]);
    }
}
