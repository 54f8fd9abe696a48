//! Scroll isolation guard
//!
//! While the pointer is over a scrollable element, global gesture listeners
//! are held that cancel any gesture which would push the element past its
//! top or bottom edge. Such a gesture would otherwise chain to the page or
//! an outer container. Inside the bounds gestures pass through untouched.
//!
//! Listener ownership is scoped: they are acquired on enter and released on
//! leave, on [`ScrollGuard::teardown`], or when the guard is dropped.

use tracing::{debug, trace};

use super::gesture::{
    GestureDecision, GestureKind, ListenerTarget, ScrollGesture, CONTAINMENT_LISTENERS,
};

/// Scroll geometry of the guarded element
pub trait ScrollMetrics {
    fn scroll_top(&self) -> f32;
    fn scroll_height(&self) -> f32;
    fn offset_height(&self) -> f32;
}

/// Boundary test captured at pointer-enter time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Containment {
    /// Maximum scroll offset (`scrollHeight - offsetHeight`)
    pub content_height: f32,
}

impl Containment {
    /// Measure an element once
    pub fn measure(metrics: &impl ScrollMetrics) -> Self {
        Self {
            content_height: (metrics.scroll_height() - metrics.offset_height()).max(0.0),
        }
    }

    /// Decide a gesture against the element's current offset
    pub fn decide(&self, scroll_top: f32, gesture: &ScrollGesture) -> GestureDecision {
        let delta = gesture.intended_delta();
        let at_top = scroll_top <= 0.0 && delta < 0.0;
        let at_bottom = scroll_top >= self.content_height && delta > 0.0;
        if at_top || at_bottom {
            GestureDecision::Contain
        } else {
            GestureDecision::PassThrough
        }
    }
}

/// Installs and removes global gesture listeners.
///
/// The DOM implementation attaches `window`/`document` handlers that consult
/// the given [`Containment`] and call `preventDefault` on `Contain`.
pub trait GestureHost {
    fn add_listener(&mut self, target: ListenerTarget, kind: GestureKind, containment: Containment);
    fn remove_listener(&mut self, target: ListenerTarget, kind: GestureKind);
}

/// Per-element guard state
#[derive(Debug)]
pub struct ScrollGuard<H: GestureHost> {
    host: H,
    active: Option<Containment>,
}

impl<H: GestureHost> ScrollGuard<H> {
    /// Create an inactive guard
    pub fn new(host: H) -> Self {
        Self { host, active: None }
    }

    /// Pointer entered the element: cache its content height and acquire listeners
    pub fn pointer_enter(&mut self, metrics: &impl ScrollMetrics) {
        if self.active.is_some() {
            self.release();
        }
        let containment = Containment::measure(metrics);
        for (target, kind) in CONTAINMENT_LISTENERS {
            self.host.add_listener(target, kind, containment);
        }
        debug!(content_height = containment.content_height, "scroll containment active");
        self.active = Some(containment);
    }

    /// Pointer left the element: release every listener
    pub fn pointer_leave(&mut self) {
        self.release();
    }

    /// Decide a gesture; inactive guards never contain
    pub fn decide(&self, scroll_top: f32, gesture: &ScrollGesture) -> GestureDecision {
        match &self.active {
            Some(containment) => {
                let decision = containment.decide(scroll_top, gesture);
                if decision.is_contained() {
                    trace!(scroll_top, kind = gesture.kind().event_name(), "gesture contained");
                }
                decision
            }
            None => GestureDecision::PassThrough,
        }
    }

    /// Check if listeners are held
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Content height cached on the last enter
    pub fn content_height(&self) -> Option<f32> {
        self.active.map(|c| c.content_height)
    }

    /// Release everything and dispose of the guard
    pub fn teardown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.active.take().is_some() {
            for (target, kind) in CONTAINMENT_LISTENERS {
                self.host.remove_listener(target, kind);
            }
            debug!("scroll containment released");
        }
    }
}

impl<H: GestureHost> Drop for ScrollGuard<H> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingHost {
        installed: Rc<RefCell<Vec<(ListenerTarget, GestureKind)>>>,
    }

    impl GestureHost for RecordingHost {
        fn add_listener(&mut self, target: ListenerTarget, kind: GestureKind, _: Containment) {
            self.installed.borrow_mut().push((target, kind));
        }

        fn remove_listener(&mut self, target: ListenerTarget, kind: GestureKind) {
            self.installed.borrow_mut().retain(|l| *l != (target, kind));
        }
    }

    struct Element {
        scroll_top: f32,
        scroll_height: f32,
        offset_height: f32,
    }

    impl ScrollMetrics for Element {
        fn scroll_top(&self) -> f32 {
            self.scroll_top
        }
        fn scroll_height(&self) -> f32 {
            self.scroll_height
        }
        fn offset_height(&self) -> f32 {
            self.offset_height
        }
    }

    fn element() -> Element {
        Element {
            scroll_top: 0.0,
            scroll_height: 500.0,
            offset_height: 200.0,
        }
    }

    const UP: ScrollGesture = ScrollGesture::Wheel { delta_y: -10.0 };
    const DOWN: ScrollGesture = ScrollGesture::Wheel { delta_y: 10.0 };

    #[test]
    fn test_enter_and_leave_scope_listeners() {
        let installed = Rc::new(RefCell::new(Vec::new()));
        let mut guard = ScrollGuard::new(RecordingHost {
            installed: installed.clone(),
        });

        guard.pointer_enter(&element());
        assert!(guard.is_active());
        assert_eq!(guard.content_height(), Some(300.0));
        assert_eq!(installed.borrow().len(), CONTAINMENT_LISTENERS.len());

        guard.pointer_leave();
        assert!(!guard.is_active());
        assert!(installed.borrow().is_empty());
    }

    #[test]
    fn test_reenter_does_not_duplicate_listeners() {
        let installed = Rc::new(RefCell::new(Vec::new()));
        let mut guard = ScrollGuard::new(RecordingHost {
            installed: installed.clone(),
        });
        guard.pointer_enter(&element());
        guard.pointer_enter(&element());
        assert_eq!(installed.borrow().len(), CONTAINMENT_LISTENERS.len());
    }

    #[test]
    fn test_drop_releases_listeners() {
        let installed = Rc::new(RefCell::new(Vec::new()));
        {
            let mut guard = ScrollGuard::new(RecordingHost {
                installed: installed.clone(),
            });
            guard.pointer_enter(&element());
        }
        assert!(installed.borrow().is_empty());

        let mut guard = ScrollGuard::new(RecordingHost {
            installed: installed.clone(),
        });
        guard.pointer_enter(&element());
        guard.teardown();
        assert!(installed.borrow().is_empty());
    }

    #[test]
    fn test_boundaries() {
        let mut guard = ScrollGuard::new(RecordingHost::default());
        guard.pointer_enter(&element());

        assert_eq!(guard.decide(0.0, &UP), GestureDecision::Contain);
        assert_eq!(guard.decide(0.0, &DOWN), GestureDecision::PassThrough);
        assert_eq!(guard.decide(150.0, &UP), GestureDecision::PassThrough);
        assert_eq!(guard.decide(150.0, &DOWN), GestureDecision::PassThrough);
        assert_eq!(guard.decide(300.0, &DOWN), GestureDecision::Contain);
        assert_eq!(guard.decide(300.0, &UP), GestureDecision::PassThrough);

        let legacy_up = ScrollGesture::MouseWheel { wheel_delta: 120.0 };
        assert_eq!(guard.decide(0.0, &legacy_up), GestureDecision::Contain);
    }

    #[test]
    fn test_inactive_guard_passes_everything() {
        let guard = ScrollGuard::new(RecordingHost::default());
        assert_eq!(guard.decide(0.0, &UP), GestureDecision::PassThrough);
    }

    #[test]
    fn test_element_shorter_than_viewport() {
        let short = Element {
            scroll_top: 0.0,
            scroll_height: 100.0,
            offset_height: 200.0,
        };
        let containment = Containment::measure(&short);
        assert_eq!(containment.content_height, 0.0);
        assert_eq!(containment.decide(0.0, &DOWN), GestureDecision::Contain);
        assert_eq!(containment.decide(0.0, &UP), GestureDecision::Contain);
    }
}
