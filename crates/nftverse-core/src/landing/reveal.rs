//! Tweens and the two-state reveal trigger

use std::time::{Duration, Instant};

use super::easing::Easing;
use super::timing::lerp;
use super::SectionId;

/// Visual state of an animated target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// 0.0 (invisible) to 1.0
    pub opacity: f64,
    /// Downward displacement in layout units
    pub offset_y: f64,
    pub scale: f64,
}

impl Pose {
    /// Final resting pose of every reveal
    pub const REST: Pose = Pose {
        opacity: 1.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    pub fn interpolate(from: Pose, to: Pose, t: f64) -> Pose {
        Pose {
            opacity: lerp(from.opacity, to.opacity, t),
            offset_y: lerp(from.offset_y, to.offset_y, t),
            scale: lerp(from.scale, to.scale, t),
        }
    }

    pub fn is_rest(&self) -> bool {
        const EPS: f64 = 1e-6;
        (self.opacity - 1.0).abs() < EPS
            && self.offset_y.abs() < EPS
            && (self.scale - 1.0).abs() < EPS
    }
}

/// Starting pose and timing of a reveal; every reveal ends at [`Pose::REST`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSpec {
    pub from: Pose,
    pub duration: Duration,
    pub easing: Easing,
    /// Delay between consecutive targets
    pub stagger: Duration,
}

impl RevealSpec {
    fn slide_up(offset_y: f64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from: Pose {
                opacity: 0.0,
                offset_y,
                scale: 1.0,
            },
            duration: Duration::from_millis(duration_ms),
            easing,
            stagger: Duration::ZERO,
        }
    }

    /// Page-load entrance: fade in while rising 100 units
    pub fn hero() -> Self {
        Self::slide_up(100.0, 1000, Easing::Cubic)
    }

    pub fn benefits_heading() -> Self {
        Self::slide_up(50.0, 1000, Easing::Quad)
    }

    /// One tween drives all cards, each 0.2 s behind the previous
    pub fn benefit_cards() -> Self {
        Self {
            stagger: Duration::from_millis(200),
            ..Self::slide_up(50.0, 800, Easing::Quad)
        }
    }

    /// Fade in while growing from 90%
    pub fn stats() -> Self {
        Self {
            from: Pose {
                opacity: 0.0,
                offset_y: 0.0,
                scale: 0.9,
            },
            duration: Duration::from_millis(800),
            easing: Easing::Quad,
            stagger: Duration::ZERO,
        }
    }

    pub fn featured() -> Self {
        Self::slide_up(30.0, 800, Easing::Quad)
    }

    /// Run time of the whole tween across `targets`
    pub fn total_duration(&self, targets: usize) -> Duration {
        let extra = targets.saturating_sub(1) as u32;
        self.duration + self.stagger * extra
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenDirection {
    Forward,
    Reverse,
}

/// A reversible timeline over one or more staggered targets
///
/// The playhead is measured in seconds. Reversing mid-flight runs back from
/// the current playhead rather than jumping.
#[derive(Debug, Clone)]
pub struct Tween {
    spec: RevealSpec,
    targets: usize,
    direction: TweenDirection,
    /// When the current direction started, `None` while parked
    anchor: Option<Instant>,
    /// Playhead at `anchor`
    anchor_pos: f64,
}

impl Tween {
    /// A tween parked at its start pose
    pub fn new(spec: RevealSpec, targets: usize) -> Self {
        Self {
            spec,
            targets: targets.max(1),
            direction: TweenDirection::Reverse,
            anchor: None,
            anchor_pos: 0.0,
        }
    }

    pub fn spec(&self) -> &RevealSpec {
        &self.spec
    }

    pub fn direction(&self) -> TweenDirection {
        self.direction
    }

    fn total_secs(&self) -> f64 {
        self.spec.total_duration(self.targets).as_secs_f64()
    }

    /// Playhead in seconds as of `now`
    pub fn position(&self, now: Instant) -> f64 {
        let Some(at) = self.anchor else {
            return self.anchor_pos;
        };
        let dt = now.saturating_duration_since(at).as_secs_f64();
        match self.direction {
            TweenDirection::Forward => (self.anchor_pos + dt).min(self.total_secs()),
            TweenDirection::Reverse => (self.anchor_pos - dt).max(0.0),
        }
    }

    pub fn play(&mut self, now: Instant) {
        self.anchor_pos = self.position(now);
        self.anchor = Some(now);
        self.direction = TweenDirection::Forward;
    }

    pub fn reverse(&mut self, now: Instant) {
        self.anchor_pos = self.position(now);
        self.anchor = Some(now);
        self.direction = TweenDirection::Reverse;
    }

    /// Park at the end pose
    pub fn finish(&mut self) {
        self.anchor = None;
        self.anchor_pos = self.total_secs();
        self.direction = TweenDirection::Forward;
    }

    /// Linear progress of target `index`, before easing
    pub fn target_progress(&self, index: usize, now: Instant) -> f64 {
        let index = index.min(self.targets - 1);
        let local = self.position(now) - self.spec.stagger.as_secs_f64() * index as f64;
        let duration = self.spec.duration.as_secs_f64();
        if duration <= 0.0 {
            return if local >= 0.0 && self.position(now) > 0.0 { 1.0 } else { 0.0 };
        }
        (local / duration).clamp(0.0, 1.0)
    }

    /// Interpolated pose of target `index`
    pub fn pose(&self, index: usize, now: Instant) -> Pose {
        let t = self.spec.easing.apply(self.target_progress(index, now));
        Pose::interpolate(self.spec.from, Pose::REST, t)
    }

    /// Still moving toward its current end
    pub fn is_active(&self, now: Instant) -> bool {
        if self.anchor.is_none() {
            return false;
        }
        let pos = self.position(now);
        match self.direction {
            TweenDirection::Forward => pos < self.total_secs(),
            TweenDirection::Reverse => pos > 0.0,
        }
    }
}

/// Two-state reveal machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Revealed,
}

/// Plays its tween when the anchor's top edge rises past the threshold line and
/// reverses it when the edge drops back below
#[derive(Debug, Clone)]
pub struct RevealTrigger {
    anchor: SectionId,
    state: RevealState,
    tween: Tween,
}

impl RevealTrigger {
    pub fn new(anchor: SectionId, tween: Tween) -> Self {
        Self {
            anchor,
            state: RevealState::Hidden,
            tween,
        }
    }

    pub fn anchor(&self) -> SectionId {
        self.anchor
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    /// Compare the anchor's top edge with the threshold line (both measured
    /// from the top of the viewport). Returns the new state on a transition.
    pub fn evaluate(&mut self, top: i32, threshold: f64, now: Instant) -> Option<RevealState> {
        let past_line = f64::from(top) <= threshold;
        match (self.state, past_line) {
            (RevealState::Hidden, true) => {
                self.tween.play(now);
                self.state = RevealState::Revealed;
                Some(self.state)
            }
            (RevealState::Revealed, false) => {
                self.tween.reverse(now);
                self.state = RevealState::Hidden;
                Some(self.state)
            }
            _ => None,
        }
    }

    /// Jump straight to the revealed end pose
    pub fn reveal_instantly(&mut self) {
        self.tween.finish();
        self.state = RevealState::Revealed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_new_tween_rests_at_start_pose() {
        let tween = Tween::new(RevealSpec::hero(), 1);
        let now = Instant::now();
        let pose = tween.pose(0, now);
        assert!(close(pose.opacity, 0.0));
        assert!(close(pose.offset_y, 100.0));
        assert!(!tween.is_active(now));
    }

    #[test]
    fn test_play_reaches_rest() {
        let t0 = Instant::now();
        let mut tween = Tween::new(RevealSpec::hero(), 1);
        tween.play(t0);

        let mid = tween.pose(0, t0 + ms(500));
        assert!(mid.opacity > 0.5, "power3.out is past halfway at t=0.5");
        assert!(mid.offset_y < 50.0);
        assert!(tween.is_active(t0 + ms(500)));

        assert!(tween.pose(0, t0 + ms(1000)).is_rest());
        assert!(!tween.is_active(t0 + ms(1000)));
    }

    #[test]
    fn test_stats_scale_from_ninety_percent() {
        let t0 = Instant::now();
        let mut tween = Tween::new(RevealSpec::stats(), 1);
        assert!(close(tween.pose(0, t0).scale, 0.9));
        tween.play(t0);
        assert!(close(tween.pose(0, t0 + ms(800)).scale, 1.0));
    }

    #[test]
    fn test_stagger_offsets_each_card() {
        let spec = RevealSpec::benefit_cards();
        assert_eq!(spec.total_duration(4), ms(1400));

        let t0 = Instant::now();
        let mut tween = Tween::new(spec, 4);
        tween.play(t0);

        let at = t0 + ms(200);
        assert!(close(tween.target_progress(0, at), 0.25));
        assert!(close(tween.target_progress(1, at), 0.0));
        assert!(close(tween.target_progress(3, t0 + ms(1000)), 0.5));
        assert!(tween.is_active(t0 + ms(1300)));
        assert!(tween.pose(3, t0 + ms(1400)).is_rest());
    }

    #[test]
    fn test_reverse_mid_flight_runs_back_from_playhead() {
        let t0 = Instant::now();
        let mut tween = Tween::new(RevealSpec::featured(), 1);
        tween.play(t0);
        tween.reverse(t0 + ms(400));

        assert!(close(tween.position(t0 + ms(400)), 0.4));
        assert!(close(tween.position(t0 + ms(600)), 0.2));
        assert!(close(tween.position(t0 + ms(2000)), 0.0));
        assert!(close(tween.pose(0, t0 + ms(2000)).offset_y, 30.0));
    }

    #[test]
    fn test_trigger_toggles_on_threshold() {
        let t0 = Instant::now();
        let mut trigger = RevealTrigger::new(SectionId::Stats, Tween::new(RevealSpec::stats(), 1));
        let line = 80.0;

        assert_eq!(trigger.evaluate(120, line, t0), None);
        assert_eq!(trigger.evaluate(80, line, t0), Some(RevealState::Revealed));
        assert_eq!(trigger.evaluate(10, line, t0), None);
        assert_eq!(trigger.tween().direction(), TweenDirection::Forward);

        assert_eq!(trigger.evaluate(81, line, t0 + ms(300)), Some(RevealState::Hidden));
        assert_eq!(trigger.tween().direction(), TweenDirection::Reverse);

        // toggles again, not one-shot
        assert_eq!(trigger.evaluate(0, line, t0 + ms(400)), Some(RevealState::Revealed));
    }

    #[test]
    fn test_reveal_instantly() {
        let mut trigger =
            RevealTrigger::new(SectionId::Featured, Tween::new(RevealSpec::featured(), 1));
        trigger.reveal_instantly();
        assert_eq!(trigger.state(), RevealState::Revealed);
        assert!(trigger.tween().pose(0, Instant::now()).is_rest());
    }
}
