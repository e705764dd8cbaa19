use std::sync::LazyLock;

use regex::Regex;

static FRAGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#/(\d+)/?$").expect("fragment pattern is valid"));

/// Format the deep-link fragment for a 1-based slide index.
pub fn fragment_for(index: usize) -> String {
    format!("#/{index}")
}

/// Parse `#/<N>` into `N`. Anything else, including `#/0`, is `None`.
pub fn parse_fragment(hash: &str) -> Option<usize> {
    let caps = FRAGMENT_RE.captures(hash.trim())?;
    caps[1].parse::<usize>().ok().filter(|&n| n >= 1)
}

/// The deck's address bar: the current fragment plus a history stack.
///
/// `replace` rewrites the current entry silently (used after every
/// navigation). `assign`, `back` and `forward` are external moves that the
/// navigator treats as fragment changes.
#[derive(Debug, Clone)]
pub struct Location {
    entries: Vec<String>,
    cursor: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self::new("")
    }
}

impl Location {
    pub fn new(hash: &str) -> Self {
        Self {
            entries: vec![hash.to_string()],
            cursor: 0,
        }
    }

    pub fn hash(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn slide(&self) -> Option<usize> {
        parse_fragment(self.hash())
    }

    /// Rewrite the current entry without creating a history entry.
    pub fn replace(&mut self, hash: &str) {
        self.entries[self.cursor] = hash.to_string();
    }

    /// Push a new entry, dropping any forward history. Returns whether the
    /// fragment actually changed.
    pub fn assign(&mut self, hash: &str) -> bool {
        if self.hash() == hash {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(hash.to_string());
        self.cursor += 1;
        true
    }

    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    #[cfg(test)]
    pub fn history_len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment() {
        assert_eq!(parse_fragment("#/3"), Some(3));
        assert_eq!(parse_fragment("#/12/"), Some(12));
        assert_eq!(parse_fragment(" #/2 "), Some(2));
        assert_eq!(parse_fragment("#/0"), None);
        assert_eq!(parse_fragment("#3"), None);
        assert_eq!(parse_fragment("#/three"), None);
        assert_eq!(parse_fragment("#/3/notes"), None);
        assert_eq!(parse_fragment(""), None);
        assert_eq!(parse_fragment("#/99999999999999999999999"), None);
    }

    #[test]
    fn test_replace_keeps_history_length() {
        let mut loc = Location::new("#/1");
        loc.replace("#/2");
        loc.replace("#/3");
        assert_eq!(loc.hash(), "#/3");
        assert_eq!(loc.history_len(), 1);
        assert!(!loc.back());
    }

    #[test]
    fn test_assign_back_forward() {
        let mut loc = Location::new("#/1");
        assert!(loc.assign("#/4"));
        assert!(!loc.assign("#/4"));
        assert_eq!(loc.slide(), Some(4));
        assert!(loc.back());
        assert_eq!(loc.slide(), Some(1));
        assert!(loc.forward());
        assert_eq!(loc.slide(), Some(4));
        assert!(!loc.forward());
    }

    #[test]
    fn test_assign_drops_forward_entries() {
        let mut loc = Location::new("#/1");
        loc.assign("#/2");
        loc.assign("#/3");
        loc.back();
        loc.back();
        loc.assign("#/5");
        assert_eq!(loc.history_len(), 2);
        assert!(!loc.forward());
    }

    #[test]
    fn test_fragment_for() {
        assert_eq!(fragment_for(7), "#/7");
        assert_eq!(parse_fragment(&fragment_for(7)), Some(7));
    }
}
