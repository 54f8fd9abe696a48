//! Global scroll gestures and their intended direction

/// Gesture event families the guard listens for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Standard `wheel`
    Wheel,
    /// Legacy `mousewheel`
    MouseWheel,
    /// Legacy Firefox `DOMMouseScroll`
    DomMouseScroll,
    /// `touchstart`, seeds the finger position
    TouchStart,
    /// `touchmove`
    TouchMove,
    /// `touchend`, ends or re-seeds the sequence
    TouchEnd,
}

impl GestureKind {
    /// DOM event name
    pub fn event_name(self) -> &'static str {
        match self {
            GestureKind::Wheel => "wheel",
            GestureKind::MouseWheel => "mousewheel",
            GestureKind::DomMouseScroll => "DOMMouseScroll",
            GestureKind::TouchStart => "touchstart",
            GestureKind::TouchMove => "touchmove",
            GestureKind::TouchEnd => "touchend",
        }
    }

    /// Check if events of this kind only track the finger and never scroll
    pub fn is_tracking_only(self) -> bool {
        matches!(self, GestureKind::TouchStart | GestureKind::TouchEnd)
    }
}

/// Where a global listener is attached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Window,
    Document,
}

/// Listeners held while the pointer is over a guarded element.
///
/// Legacy `mousewheel` is registered on both window and document because
/// some engines only deliver it to one of them. `touchstart` and `touchend`
/// bound each touch sequence for [`TouchTracker`].
pub const CONTAINMENT_LISTENERS: [(ListenerTarget, GestureKind); 7] = [
    (ListenerTarget::Window, GestureKind::DomMouseScroll),
    (ListenerTarget::Window, GestureKind::Wheel),
    (ListenerTarget::Window, GestureKind::MouseWheel),
    (ListenerTarget::Window, GestureKind::TouchStart),
    (ListenerTarget::Window, GestureKind::TouchMove),
    (ListenerTarget::Window, GestureKind::TouchEnd),
    (ListenerTarget::Document, GestureKind::MouseWheel),
];

/// A scroll gesture as reported by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollGesture {
    /// `wheel` with its `deltaY`
    Wheel { delta_y: f32 },
    /// `mousewheel` with its `wheelDelta` (positive means up)
    MouseWheel { wheel_delta: f32 },
    /// `DOMMouseScroll` with its `detail` (positive means down)
    DomMouseScroll { detail: f32 },
    /// `touchmove` between two finger positions
    TouchMove { previous_y: f32, current_y: f32 },
}

impl ScrollGesture {
    /// Family this gesture belongs to
    pub fn kind(&self) -> GestureKind {
        match self {
            ScrollGesture::Wheel { .. } => GestureKind::Wheel,
            ScrollGesture::MouseWheel { .. } => GestureKind::MouseWheel,
            ScrollGesture::DomMouseScroll { .. } => GestureKind::DomMouseScroll,
            ScrollGesture::TouchMove { .. } => GestureKind::TouchMove,
        }
    }

    /// Vertical scroll the gesture asks for; negative is up, positive is down
    pub fn intended_delta(&self) -> f32 {
        match *self {
            ScrollGesture::Wheel { delta_y } => delta_y,
            ScrollGesture::MouseWheel { wheel_delta } => -wheel_delta,
            ScrollGesture::DomMouseScroll { detail } => detail,
            // Dragging the finger up scrolls content down
            ScrollGesture::TouchMove {
                previous_y,
                current_y,
            } => previous_y - current_y,
        }
    }
}

/// Finger position within one touch sequence.
///
/// A `touchmove` is measured against the previous position of the same
/// sequence only; a move with no known start seeds the position and yields
/// no gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchTracker {
    last_y: Option<f32>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A finger went down at `y`
    pub fn start(&mut self, y: f32) {
        self.last_y = Some(y);
    }

    /// The finger moved to `y`
    pub fn move_to(&mut self, y: f32) -> Option<ScrollGesture> {
        self.last_y
            .replace(y)
            .map(|previous_y| ScrollGesture::TouchMove {
                previous_y,
                current_y: y,
            })
    }

    /// A finger lifted; `remaining_y` is the first finger still down, if any
    pub fn end(&mut self, remaining_y: Option<f32>) {
        self.last_y = remaining_y;
    }

    /// Forget the sequence
    pub fn reset(&mut self) {
        self.last_y = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.last_y.is_some()
    }
}

/// What to do with a gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureDecision {
    /// Let native scrolling handle it
    PassThrough,
    /// Suppress the default action so no container scrolls
    Contain,
}

impl GestureDecision {
    /// Check if the host must call `preventDefault`
    pub fn is_contained(self) -> bool {
        matches!(self, GestureDecision::Contain)
    }
}
