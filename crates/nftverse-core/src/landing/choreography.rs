use std::time::Instant;

use super::content::BENEFITS;
use super::reveal::{Pose, RevealSpec, RevealState, RevealTrigger, Tween};
use crate::config::LandingConfig;

/// Animated regions of the landing view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    Stats,
    Featured,
    BenefitsHeading,
    /// Benefit card by position
    BenefitCard(usize),
}

/// Intersection capability supplied by whoever lays the sections out
pub trait Viewport {
    /// Visible height in layout units
    fn height(&self) -> i32;

    /// Top edge of `section` relative to the top of the viewport, `None` if
    /// the section is not laid out
    fn top_of(&self, section: SectionId) -> Option<i32>;
}

/// Entrance and scroll-linked reveals for one landing view
///
/// Triggers live only between [`Choreography::mount`] and
/// [`Choreography::teardown`]; dropping the choreography tears it down.
#[derive(Debug)]
pub struct Choreography {
    enabled: bool,
    trigger_ratio: f64,
    hero: Option<Tween>,
    triggers: Vec<RevealTrigger>,
}

impl Choreography {
    pub fn new(config: &LandingConfig) -> Self {
        Self {
            enabled: config.animations,
            trigger_ratio: config.trigger_ratio.clamp(0.0, 1.0),
            hero: None,
            triggers: Vec::new(),
        }
    }

    /// Play the hero entrance and register the scroll-linked triggers
    ///
    /// Re-mounting first drops whatever a previous mount registered.
    pub fn mount(&mut self, now: Instant) {
        self.teardown();

        let mut hero = Tween::new(RevealSpec::hero(), 1);
        self.triggers = vec![
            RevealTrigger::new(
                SectionId::BenefitsHeading,
                Tween::new(RevealSpec::benefits_heading(), 1),
            ),
            RevealTrigger::new(
                SectionId::BenefitCard(0),
                Tween::new(RevealSpec::benefit_cards(), BENEFITS.len()),
            ),
            RevealTrigger::new(SectionId::Stats, Tween::new(RevealSpec::stats(), 1)),
            RevealTrigger::new(SectionId::Featured, Tween::new(RevealSpec::featured(), 1)),
        ];

        if self.enabled {
            hero.play(now);
        } else {
            hero.finish();
            for trigger in &mut self.triggers {
                trigger.reveal_instantly();
            }
        }
        self.hero = Some(hero);

        tracing::debug!(
            triggers = self.triggers.len(),
            animated = self.enabled,
            "Landing choreography mounted"
        );
    }

    /// Evaluate every trigger against the current layout. Returns true if any
    /// trigger changed state.
    pub fn update(&mut self, viewport: &dyn Viewport, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        let threshold = f64::from(viewport.height()) * self.trigger_ratio;
        let mut changed = false;
        for trigger in &mut self.triggers {
            let Some(top) = viewport.top_of(trigger.anchor()) else {
                continue;
            };
            if let Some(state) = trigger.evaluate(top, threshold, now) {
                tracing::trace!(section = ?trigger.anchor(), ?state, top, "Reveal trigger fired");
                changed = true;
            }
        }
        changed
    }

    fn trigger_for(&self, section: SectionId) -> Option<(&RevealTrigger, usize)> {
        let (anchor, index) = match section {
            SectionId::BenefitCard(n) => (SectionId::BenefitCard(0), n),
            other => (other, 0),
        };
        self.triggers
            .iter()
            .find(|trigger| trigger.anchor() == anchor)
            .map(|trigger| (trigger, index))
    }

    /// Current pose of `section`; rest when nothing animates it
    pub fn pose(&self, section: SectionId, now: Instant) -> Pose {
        if section == SectionId::Hero {
            return self
                .hero
                .as_ref()
                .map(|tween| tween.pose(0, now))
                .unwrap_or(Pose::REST);
        }
        self.trigger_for(section)
            .map(|(trigger, index)| trigger.tween().pose(index, now))
            .unwrap_or(Pose::REST)
    }

    /// Reveal state of a scroll-linked section
    pub fn state(&self, section: SectionId) -> Option<RevealState> {
        self.trigger_for(section).map(|(trigger, _)| trigger.state())
    }

    /// Whether any tween is still moving, so the caller can keep a high frame rate
    pub fn is_animating(&self, now: Instant) -> bool {
        self.hero.as_ref().is_some_and(|tween| tween.is_active(now))
            || self.triggers.iter().any(|trigger| trigger.tween().is_active(now))
    }

    pub fn is_mounted(&self) -> bool {
        self.hero.is_some()
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Drop every trigger and the hero tween
    pub fn teardown(&mut self) {
        if self.hero.is_none() && self.triggers.is_empty() {
            return;
        }
        let removed = self.triggers.len();
        self.triggers.clear();
        self.hero = None;
        tracing::debug!(removed, "Landing choreography torn down");
    }
}

impl Drop for Choreography {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Sections stacked at fixed document offsets, scrolled by `scroll`
    struct Page {
        height: i32,
        scroll: i32,
        offsets: HashMap<SectionId, i32>,
    }

    impl Page {
        fn new() -> Self {
            let offsets = HashMap::from([
                (SectionId::Hero, 0),
                (SectionId::Stats, 100),
                (SectionId::Featured, 200),
                (SectionId::BenefitsHeading, 300),
                (SectionId::BenefitCard(0), 320),
            ]);
            Self {
                height: 100,
                scroll: 0,
                offsets,
            }
        }
    }

    impl Viewport for Page {
        fn height(&self) -> i32 {
            self.height
        }

        fn top_of(&self, section: SectionId) -> Option<i32> {
            self.offsets.get(&section).map(|offset| offset - self.scroll)
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_mount_plays_hero_and_registers_four_triggers() {
        let t0 = Instant::now();
        let mut choreo = Choreography::new(&LandingConfig::default());
        assert_eq!(choreo.trigger_count(), 0);

        choreo.mount(t0);
        assert!(choreo.is_mounted());
        assert_eq!(choreo.trigger_count(), 4);
        assert!(choreo.is_animating(t0 + ms(10)));
        assert!(choreo.pose(SectionId::Hero, t0 + ms(1000)).is_rest());
        assert_eq!(choreo.state(SectionId::Stats), Some(RevealState::Hidden));
        assert_eq!(choreo.state(SectionId::Hero), None);
    }

    #[test]
    fn test_scrolling_reveals_then_reverses() {
        let t0 = Instant::now();
        let mut choreo = Choreography::new(&LandingConfig::default());
        choreo.mount(t0);
        let mut page = Page::new();

        // Stats top at 100, line at 80: still hidden
        assert!(!choreo.update(&page, t0));
        assert_eq!(choreo.state(SectionId::Stats), Some(RevealState::Hidden));

        page.scroll = 20;
        assert!(choreo.update(&page, t0 + ms(100)));
        assert_eq!(choreo.state(SectionId::Stats), Some(RevealState::Revealed));
        assert_eq!(choreo.state(SectionId::Featured), Some(RevealState::Hidden));
        assert!(choreo.pose(SectionId::Stats, t0 + ms(900)).is_rest());

        page.scroll = 0;
        assert!(choreo.update(&page, t0 + ms(1000)));
        assert_eq!(choreo.state(SectionId::Stats), Some(RevealState::Hidden));
        let back = choreo.pose(SectionId::Stats, t0 + ms(1800));
        assert!((back.scale - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_cards_share_one_staggered_trigger() {
        let t0 = Instant::now();
        let mut choreo = Choreography::new(&LandingConfig::default());
        choreo.mount(t0);
        let mut page = Page::new();
        page.scroll = 250;
        choreo.update(&page, t0);

        assert_eq!(choreo.state(SectionId::BenefitCard(3)), Some(RevealState::Revealed));
        let first = choreo.pose(SectionId::BenefitCard(0), t0 + ms(400));
        let last = choreo.pose(SectionId::BenefitCard(3), t0 + ms(400));
        assert!(first.opacity > last.opacity);
        assert!((last.offset_y - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_unlaid_sections_are_skipped() {
        struct Empty;
        impl Viewport for Empty {
            fn height(&self) -> i32 {
                40
            }
            fn top_of(&self, _section: SectionId) -> Option<i32> {
                None
            }
        }

        let mut choreo = Choreography::new(&LandingConfig::default());
        choreo.mount(Instant::now());
        assert!(!choreo.update(&Empty, Instant::now()));
    }

    #[test]
    fn test_teardown_removes_triggers() {
        let mut choreo = Choreography::new(&LandingConfig::default());
        choreo.mount(Instant::now());
        choreo.teardown();
        assert_eq!(choreo.trigger_count(), 0);
        assert!(!choreo.is_mounted());
        assert!(choreo.pose(SectionId::Featured, Instant::now()).is_rest());
    }

    #[test]
    fn test_remount_does_not_duplicate_triggers() {
        let mut choreo = Choreography::new(&LandingConfig::default());
        choreo.mount(Instant::now());
        choreo.mount(Instant::now());
        assert_eq!(choreo.trigger_count(), 4);
    }

    #[test]
    fn test_disabled_animations_start_revealed() {
        let config = LandingConfig {
            animations: false,
            ..Default::default()
        };
        let t0 = Instant::now();
        let mut choreo = Choreography::new(&config);
        choreo.mount(t0);

        assert!(!choreo.is_animating(t0));
        assert!(choreo.pose(SectionId::Hero, t0).is_rest());
        assert!(choreo.pose(SectionId::BenefitCard(2), t0).is_rest());
        assert!(!choreo.update(&Page::new(), t0));
    }
}
