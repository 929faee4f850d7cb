//! Landing view choreography
//!
//! The hero entrance plays once on mount. Four further sections reveal when
//! their top edge rises past a line at a fixed fraction of the viewport height
//! and hide again when it drops back, each as an explicit two-state machine.
//! Layout is injected through [`Viewport`].

mod choreography;
pub mod content;
mod easing;
mod reveal;
pub mod timing;

pub use choreography::{Choreography, SectionId, Viewport};
pub use easing::Easing;
pub use reveal::{Pose, RevealSpec, RevealState, RevealTrigger, Tween, TweenDirection};
