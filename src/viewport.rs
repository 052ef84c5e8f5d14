use tracing::warn;

use crate::{
    core::{ElementId, Viewport},
    page::Page,
    registry::BindingHandle,
};

#[derive(Debug)]
struct Watch {
    element: ElementId,
    /// Trigger line as a percentage of viewport height measured from the
    /// viewport top ("top 80%" in the reference markup is 80.0).
    threshold_pct: f64,
    handle: BindingHandle,
    in_zone: bool,
}

/// Watches element positions against the scroll offset and reports trigger-
/// zone entries. Holds no actions itself; it only maps crossings to binding
/// handles for the registry to resolve.
#[derive(Debug, Default)]
pub struct ViewportObserver {
    watches: Vec<Watch>,
}

impl ViewportObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a watch. An id outside the page is logged and skipped rather
    /// than poisoning later scans. New watches start outside the zone, so an
    /// element already past its threshold fires on the first scan: elements
    /// loaded mid-page must not stay permanently invisible.
    pub fn watch(&mut self, page: &Page, element: ElementId, threshold_pct: f64, handle: BindingHandle) {
        if element.0 >= page.len() {
            warn!(element = element.0, "watch for unknown element, skipping");
            return;
        }
        self.watches.push(Watch {
            element,
            threshold_pct,
            handle,
            in_zone: false,
        });
    }

    /// Report every watch whose element crossed into its trigger zone since
    /// the previous scan, in registration order. Exits re-arm the watch, so
    /// a later re-entry reports again; whether that replays is the replay
    /// policy's call, not the observer's.
    pub fn scan(&mut self, page: &Page, viewport: &Viewport) -> Vec<BindingHandle> {
        let mut entered = Vec::new();
        for watch in &mut self.watches {
            let now_in = in_zone(page, viewport, watch.element, watch.threshold_pct);
            if now_in && !watch.in_zone {
                entered.push(watch.handle);
            }
            watch.in_zone = now_in;
        }
        entered
    }

    pub fn watch_count(&self) -> usize {
        self.watches.len()
    }
}

/// An element is in its trigger zone when its top edge, in viewport
/// coordinates, is at or above the threshold line. The test is symmetric in
/// scroll direction; crossing while scrolling up counts the same as down.
fn in_zone(page: &Page, viewport: &Viewport, element: ElementId, threshold_pct: f64) -> bool {
    let top = page.element(element).top - viewport.scroll_y;
    top <= viewport.height * threshold_pct / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Dataset, PageElement, Role};

    fn page() -> Page {
        Page {
            viewport_height: 1000.0,
            elements: vec![PageElement {
                id: "section".to_string(),
                role: Role::Section,
                top: 2000.0,
                height: 600.0,
                dataset: Dataset::default(),
            }],
        }
    }

    fn viewport(scroll_y: f64) -> Viewport {
        Viewport {
            height: 1000.0,
            scroll_y,
        }
    }

    #[test]
    fn entry_reported_once_per_crossing() {
        let page = page();
        let mut obs = ViewportObserver::new();
        obs.watch(&page, ElementId(0), 80.0, BindingHandle(0));

        // Above the zone: top at 2000, line at 800.
        assert!(obs.scan(&page, &viewport(0.0)).is_empty());
        // Crossed: top-in-viewport = 2000-1300 = 700 <= 800.
        assert_eq!(obs.scan(&page, &viewport(1300.0)), vec![BindingHandle(0)]);
        // Still inside: no repeat.
        assert!(obs.scan(&page, &viewport(1400.0)).is_empty());
    }

    #[test]
    fn exit_rearms_for_reentry() {
        let page = page();
        let mut obs = ViewportObserver::new();
        obs.watch(&page, ElementId(0), 80.0, BindingHandle(7));

        assert_eq!(obs.scan(&page, &viewport(1300.0)), vec![BindingHandle(7)]);
        assert!(obs.scan(&page, &viewport(0.0)).is_empty());
        assert_eq!(obs.scan(&page, &viewport(1300.0)), vec![BindingHandle(7)]);
    }

    #[test]
    fn already_visible_at_registration_fires_on_first_scan() {
        let page = page();
        let mut obs = ViewportObserver::new();
        obs.watch(&page, ElementId(0), 80.0, BindingHandle(1));

        assert_eq!(obs.scan(&page, &viewport(5000.0)), vec![BindingHandle(1)]);
    }

    #[test]
    fn watch_for_unknown_element_is_skipped() {
        let page = page();
        let mut obs = ViewportObserver::new();
        obs.watch(&page, ElementId(99), 80.0, BindingHandle(0));

        assert_eq!(obs.watch_count(), 0);
        assert!(obs.scan(&page, &viewport(5000.0)).is_empty());
    }

    #[test]
    fn scan_preserves_registration_order() {
        let page = Page {
            viewport_height: 1000.0,
            elements: vec![
                PageElement {
                    id: "a".to_string(),
                    role: Role::Section,
                    top: 100.0,
                    height: 10.0,
                    dataset: Dataset::default(),
                },
                PageElement {
                    id: "b".to_string(),
                    role: Role::Section,
                    top: 50.0,
                    height: 10.0,
                    dataset: Dataset::default(),
                },
            ],
        };
        let mut obs = ViewportObserver::new();
        obs.watch(&page, ElementId(0), 80.0, BindingHandle(0));
        obs.watch(&page, ElementId(1), 80.0, BindingHandle(1));

        assert_eq!(
            obs.scan(&page, &viewport(0.0)),
            vec![BindingHandle(0), BindingHandle(1)]
        );
    }
}
