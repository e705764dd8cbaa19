use std::path::Path;

use crate::deck::ReelSpec;

/// Ad-engine presets. Each one fixes the budget split and the three
/// creative, search and retargeting lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdTheme {
    #[default]
    Balanced,
    Storm,
    Metal,
    Finance,
    Insurance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePlan {
    pub split: &'static str,
    pub creative: [&'static str; 3],
    pub search: [&'static str; 3],
    pub retarget: [&'static str; 3],
}

impl AdTheme {
    pub const ALL: [AdTheme; 5] = [
        AdTheme::Balanced,
        AdTheme::Storm,
        AdTheme::Metal,
        AdTheme::Finance,
        AdTheme::Insurance,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AdTheme::Balanced => "balanced",
            AdTheme::Storm => "storm",
            AdTheme::Metal => "metal",
            AdTheme::Finance => "finance",
            AdTheme::Insurance => "insurance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdTheme::Balanced => "Balanced",
            AdTheme::Storm => "Storm",
            AdTheme::Metal => "Metal",
            AdTheme::Finance => "Financing",
            AdTheme::Insurance => "Insurance",
        }
    }

    /// Unknown keys fall back to the balanced preset.
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == key.trim())
            .unwrap_or_default()
    }

    pub fn plan(self) -> ThemePlan {
        match self {
            AdTheme::Balanced => ThemePlan {
                split: "Search 40% \u{2022} FB/IG 35% \u{2022} Retarget 20% \u{2022} LSA 5%",
                creative: [
                    "Drone flyovers & before/after",
                    "Neighborhood geo\u{2011}targeting",
                    "Storm damage / financing hooks",
                ],
                search: [
                    "High\u{2011}intent keywords only",
                    "Deep negatives & extensions",
                    "LSA + branded defense",
                ],
                retarget: [
                    "Recent installs & crew intros",
                    "Map/review proof & deadlines",
                    "Everywhere they scroll",
                ],
            },
            AdTheme::Storm => ThemePlan {
                split: "Search 45% \u{2022} FB/IG 30% \u{2022} Retarget 20% \u{2022} LSA 5%",
                creative: [
                    "Before/after hail & wind damage",
                    "Zip\u{2011}code storm clusters",
                    "Emergency tarp / quick response",
                ],
                search: [
                    "\u{201c}roof replacement\u{201d} + \u{201c}storm damage\u{201d} sets",
                    "Exclude DIY/\u{201c}jobs\u{201d}/training",
                    "LSA urgency ad copy",
                ],
                retarget: [
                    "Damaged shingles proof reels",
                    "Insurance help explainer",
                    "Deadline: filing window",
                ],
            },
            AdTheme::Metal => ThemePlan {
                split: "FB/IG 40% \u{2022} Search 35% \u{2022} Retarget 20% \u{2022} LSA 5%",
                creative: [
                    "Cinematic metal installs",
                    "Benefits: longevity, energy, look",
                    "Financing spotlight",
                ],
                search: [
                    "\u{201c}metal roof\u{201d} + brand terms",
                    "Exclude repair kits & panels",
                    "Branded defense on your name",
                ],
                retarget: [
                    "Home tours with metal roofs",
                    "Noise & lightning FAQs",
                    "Book design consult",
                ],
            },
            AdTheme::Finance => ThemePlan {
                split: "Search 38% \u{2022} FB/IG 32% \u{2022} Retarget 25% \u{2022} LSA 5%",
                creative: [
                    "$0 down / low APR hooks",
                    "Before/after + payment overlay",
                    "Neighborhood geo\u{2011}targeting",
                ],
                search: [
                    "\u{201c}roof financing\u{201d} variants",
                    "Exclude low\u{2011}intent queries",
                    "Extensions: sitelinks & callouts",
                ],
                retarget: [
                    "Calculator demo videos",
                    "Approval timeline explainer",
                    "Retarget until they apply",
                ],
            },
            AdTheme::Insurance => ThemePlan {
                split: "Search 40% \u{2022} Retarget 25% \u{2022} FB/IG 30% \u{2022} LSA 5%",
                creative: [
                    "\u{201c}We handle the claim\u{201d} creative",
                    "Estimator walk\u{2011}throughs",
                    "Local storm credibility",
                ],
                search: [
                    "Insurance/adjuster terms (exact)",
                    "Negatives to cut DIY & info",
                    "Competitor conquest",
                ],
                retarget: [
                    "Claim checklist carousel",
                    "Reviews about claim help",
                    "CTA: inspection + guidance",
                ],
            },
        }
    }
}

/// Join a clip path onto the media base: `<base>/<path without leading slashes>`.
pub fn resolve_media(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReelClip {
    pub label: String,
    /// URL or file path handed to the system player.
    pub source: String,
    pub blocked: bool,
}

#[derive(Debug, Clone)]
pub struct EngineWidget {
    theme: AdTheme,
    clips: Vec<ReelClip>,
}

impl EngineWidget {
    /// Clip sources are rewritten against `media_base` when one is set, and
    /// resolved against the deck directory otherwise. Reel paths are always
    /// deck-relative, leading slash or not.
    pub fn new(reel: &[ReelSpec], media_base: Option<&str>, asset_dir: &Path) -> Self {
        let clips = reel
            .iter()
            .map(|spec| {
                let source = match media_base.filter(|b| !b.trim().is_empty()) {
                    Some(base) => resolve_media(base, &spec.path),
                    None => asset_dir
                        .join(spec.path.trim_start_matches('/'))
                        .display()
                        .to_string(),
                };
                ReelClip {
                    label: spec.label.clone(),
                    source,
                    blocked: false,
                }
            })
            .collect();
        Self {
            theme: AdTheme::default(),
            clips,
        }
    }

    pub fn theme(&self) -> AdTheme {
        self.theme
    }

    pub fn plan(&self) -> ThemePlan {
        self.theme.plan()
    }

    pub fn set_theme(&mut self, theme: AdTheme) {
        self.theme = theme;
    }

    pub fn set_theme_key(&mut self, key: &str) {
        self.theme = AdTheme::from_key(key);
    }

    pub fn clips(&self) -> &[ReelClip] {
        &self.clips
    }

    /// Hand a clip to the system player.
    pub fn open_clip(&mut self, index: usize) {
        self.open_clip_with(index, |source| open::that(source));
    }

    pub fn open_clip_with(
        &mut self,
        index: usize,
        opener: impl FnOnce(&str) -> std::io::Result<()>,
    ) {
        let Some(clip) = self.clips.get_mut(index) else {
            return;
        };
        match opener(&clip.source) {
            Ok(()) => {
                tracing::debug!(source = %clip.source, "opened reel clip");
                clip.blocked = false;
            }
            Err(e) => {
                tracing::warn!(source = %clip.source, error = %e, "clip playback refused");
                clip.blocked = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn reel() -> Vec<ReelSpec> {
        vec![
            ReelSpec {
                label: "Drone".into(),
                path: "/reel/drone.mp4".into(),
            },
            ReelSpec {
                label: "Storm".into(),
                path: "reel/storm.mp4".into(),
            },
        ]
    }

    #[test]
    fn test_theme_lookup() {
        assert_eq!(AdTheme::from_key("storm"), AdTheme::Storm);
        assert_eq!(AdTheme::from_key("insurance"), AdTheme::Insurance);
        assert_eq!(AdTheme::from_key("nope"), AdTheme::Balanced);
        assert_eq!(AdTheme::from_key(""), AdTheme::Balanced);
        for theme in AdTheme::ALL {
            assert_eq!(AdTheme::from_key(theme.key()), theme);
        }
    }

    #[test]
    fn test_theme_plans() {
        assert_eq!(
            AdTheme::Balanced.plan().split,
            "Search 40% \u{2022} FB/IG 35% \u{2022} Retarget 20% \u{2022} LSA 5%"
        );
        assert!(AdTheme::Metal.plan().split.starts_with("FB/IG 40%"));
        assert_eq!(AdTheme::Insurance.plan().search[2], "Competitor conquest");
    }

    #[test]
    fn test_set_theme_key() {
        let mut widget = EngineWidget::new(&[], None, Path::new("."));
        assert_eq!(widget.theme(), AdTheme::Balanced);
        widget.set_theme_key("finance");
        assert_eq!(widget.plan().creative[0], "$0 down / low APR hooks");
        widget.set_theme_key("unknown");
        assert_eq!(widget.theme(), AdTheme::Balanced);
    }

    #[test]
    fn test_resolve_media() {
        assert_eq!(
            resolve_media("https://cdn.example.com/media", "/reel/a.mp4"),
            "https://cdn.example.com/media/reel/a.mp4"
        );
        assert_eq!(
            resolve_media("https://cdn.example.com/media/", "//reel/a.mp4"),
            "https://cdn.example.com/media/reel/a.mp4"
        );
    }

    #[test]
    fn test_clip_sources() {
        let remote = EngineWidget::new(&reel(), Some("https://cdn.example.com/m"), Path::new("/decks"));
        assert_eq!(remote.clips()[0].source, "https://cdn.example.com/m/reel/drone.mp4");
        assert_eq!(remote.clips()[1].source, "https://cdn.example.com/m/reel/storm.mp4");

        let local = EngineWidget::new(&reel(), None, Path::new("/decks"));
        assert_eq!(
            PathBuf::from(&local.clips()[1].source),
            PathBuf::from("/decks/reel/storm.mp4")
        );
    }

    #[test]
    fn test_rooted_clip_stays_in_deck_dir() {
        let local = EngineWidget::new(&reel(), None, Path::new("/decks"));
        assert_eq!(
            PathBuf::from(&local.clips()[0].source),
            PathBuf::from("/decks/reel/drone.mp4")
        );
        let blank_base = EngineWidget::new(&reel(), Some("  "), Path::new("talk"));
        assert_eq!(
            PathBuf::from(&blank_base.clips()[0].source),
            Path::new("talk").join("reel").join("drone.mp4")
        );
    }

    #[test]
    fn test_refused_clip_is_blocked() {
        let mut widget = EngineWidget::new(&reel(), Some("https://cdn.example.com"), Path::new("."));
        widget.open_clip_with(0, |_| Err(std::io::Error::other("no player")));
        assert!(widget.clips()[0].blocked);

        let mut opened = None;
        widget.open_clip_with(0, |src| {
            opened = Some(src.to_string());
            Ok(())
        });
        assert!(!widget.clips()[0].blocked);
        assert_eq!(opened.as_deref(), Some("https://cdn.example.com/reel/drone.mp4"));

        widget.open_clip_with(7, |_| panic!("no clip at 7"));
    }
}
