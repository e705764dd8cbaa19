use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_DECK: &str = include_str!("../decks/closing.yaml");

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read deck {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("deck is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("deck has no slides")]
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
    pub slides: Vec<Slide>,
    /// Directory relative asset paths resolve against.
    #[serde(skip)]
    pub base_path: PathBuf,
}

/// What a slide does beyond showing its content groups. Each role owns one
/// lazily initialised widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideRole {
    #[default]
    Content,
    Hero,
    Engine,
    Intake,
    Proof,
    Roi,
    Objections,
    Team,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub role: SlideRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kicker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ContentGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub counters: Vec<CounterSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parallax: Vec<ParallaxLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reel: Vec<ReelSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intake_options: Vec<IntakeOptionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    /// Starting preset for the ad engine, e.g. `storm`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_theme: Option<String>,
}

/// Entrance animation family for a content group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKind {
    Chips,
    Stagger,
    Stack,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animate: Option<GroupKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterSpec {
    pub label: String,
    pub to: f64,
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallaxLine {
    pub text: String,
    #[serde(default = "default_parallax_factor")]
    pub factor: f32,
}

fn default_parallax_factor() -> f32 {
    0.3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelSpec {
    pub label: String,
    /// Path under the media base, or a local file when no base is set.
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeOptionSpec {
    pub label: String,
    pub weight: i32,
    #[serde(default)]
    pub checked: bool,
}

impl Deck {
    pub fn from_yaml(contents: &str) -> Result<Self, DeckError> {
        let deck: Deck = serde_yaml::from_str(contents)?;
        if deck.slides.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(deck)
    }

    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut deck = Self::from_yaml(&contents)?;
        deck.base_path = path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();
        Ok(deck)
    }

    /// The closing deck shipped with the binary.
    pub fn builtin() -> Result<Self, DeckError> {
        let mut deck = Self::from_yaml(BUILTIN_DECK)?;
        deck.base_path = PathBuf::from(".");
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// 1-based slide lookup.
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index.checked_sub(1)?)
    }

    pub fn titles(&self) -> Vec<String> {
        self.slides.iter().map(|s| s.title.clone()).collect()
    }

    pub fn display_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| "pitchdeck".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_deck_parses() {
        let deck = Deck::builtin().unwrap();
        assert!(deck.len() >= 9, "expected at least 9 slides, got {}", deck.len());
        assert_eq!(deck.slide(1).unwrap().role, SlideRole::Hero);
        for role in [
            SlideRole::Engine,
            SlideRole::Intake,
            SlideRole::Proof,
            SlideRole::Roi,
            SlideRole::Objections,
            SlideRole::Team,
        ] {
            assert!(
                deck.slides.iter().any(|s| s.role == role),
                "built-in deck has no {role:?} slide"
            );
        }
        assert!(deck.slides.iter().all(|s| !s.title.is_empty()));
    }

    #[test]
    fn test_minimal_deck() {
        let deck = Deck::from_yaml("slides:\n  - title: Only\n").unwrap();
        assert_eq!(deck.len(), 1);
        let slide = deck.slide(1).unwrap();
        assert_eq!(slide.role, SlideRole::Content);
        assert!(slide.groups.is_empty());
        assert!(deck.slide(0).is_none());
        assert!(deck.slide(2).is_none());
    }

    #[test]
    fn test_group_kinds_and_defaults() {
        let yaml = r#"
slides:
  - title: Plan
    groups:
      - animate: chips
        items: [a, b]
      - animate: stack
        items: [c]
      - items: [d]
  - title: Hero
    role: hero
    parallax:
      - text: Own your market
"#;
        let deck = Deck::from_yaml(yaml).unwrap();
        let groups = &deck.slides[0].groups;
        assert_eq!(groups[0].animate, Some(GroupKind::Chips));
        assert_eq!(groups[1].animate, Some(GroupKind::Stack));
        assert_eq!(groups[2].animate, None);
        assert_eq!(deck.slides[1].parallax[0].factor, 0.3);
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        assert!(matches!(
            Deck::from_yaml("slides: []"),
            Err(DeckError::Empty)
        ));
        assert!(matches!(
            Deck::from_yaml("slides: [title"),
            Err(DeckError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_sets_base_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.yaml");
        std::fs::write(&path, "slides:\n  - title: A\n    screenshot: shots/results.png\n").unwrap();
        let deck = Deck::load(&path).unwrap();
        assert_eq!(deck.base_path, dir.path());
        assert_eq!(deck.slides[0].screenshot.as_deref(), Some("shots/results.png"));
    }

    #[test]
    fn test_missing_file() {
        let err = Deck::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, DeckError::Io { .. }));
    }
}
