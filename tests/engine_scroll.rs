use scrollwire::{Engine, Event, FormPhase, Page, Role};

fn fixture_page() -> Page {
    let s = include_str!("data/portfolio_page.json");
    serde_json::from_str(s).unwrap()
}

fn engine() -> Engine {
    Engine::new(fixture_page(), 7).unwrap()
}

/// Settle time that outlasts the hero timeline and every reveal.
const SETTLE_MS: u64 = 4000;

#[test]
fn hero_items_rest_after_load_timeline() {
    let mut engine = engine();
    engine.advance(SETTLE_MS);

    for id in ["hero-greeting", "hero-title", "hero-role", "hero-buttons"] {
        let state = engine.style(id).unwrap();
        assert_eq!(state.opacity, 1.0, "{id}");
        assert_eq!(state.translate_y, 0.0, "{id}");
    }
    for id in ["float-profile", "float-stack"] {
        assert_eq!(engine.style(id).unwrap().scale, 1.0, "{id}");
    }
    assert_eq!(engine.active_tweens(), 0);
}

#[test]
fn progress_bars_fill_to_declared_targets_and_never_restart() {
    let mut engine = engine();
    engine.advance(SETTLE_MS);

    engine.handle(Event::Scroll { y: 2300.0 });
    engine.advance(1500);
    assert_eq!(engine.style("skill-rust").unwrap().width_pct, 75.0);
    assert_eq!(engine.style("skill-ts").unwrap().width_pct, 90.0);

    // Scroll back out and in again: the ONCE binding must not re-fire.
    engine.handle(Event::Scroll { y: 0.0 });
    engine.handle(Event::Scroll { y: 2300.0 });
    engine.advance(200);
    assert_eq!(engine.style("skill-rust").unwrap().width_pct, 75.0);
    assert_eq!(engine.active_tweens(), 0);
}

#[test]
fn counters_ramp_to_terminal_suffix() {
    let mut engine = engine();
    engine.handle(Event::Scroll { y: 1500.0 });

    // Midway the display must stay strictly below the target.
    engine.advance(750);
    let mid = engine.style("stat-projects").unwrap().text.clone().unwrap();
    let shown: i64 = mid.parse().unwrap();
    assert!(shown < 50, "displayed {shown} before terminal tick");

    engine.advance(3000);
    assert_eq!(
        engine.style("stat-projects").unwrap().text.as_deref(),
        Some("50+")
    );
    assert_eq!(
        engine.style("stat-years").unwrap().text.as_deref(),
        Some("3+")
    );
}

#[test]
fn scroll_jitter_fires_counters_once() {
    let mut engine = engine();
    for _ in 0..5 {
        engine.handle(Event::Scroll { y: 1500.0 });
        engine.handle(Event::Scroll { y: 0.0 });
    }
    engine.handle(Event::Scroll { y: 1500.0 });
    engine.advance(3000);
    assert_eq!(
        engine.style("stat-projects").unwrap().text.as_deref(),
        Some("50+")
    );

    // Re-entering after completion must not restart the ramp.
    engine.handle(Event::Scroll { y: 0.0 });
    engine.handle(Event::Scroll { y: 1500.0 });
    engine.advance(90);
    assert_eq!(
        engine.style("stat-projects").unwrap().text.as_deref(),
        Some("50+")
    );
}

#[test]
fn filter_click_shows_matches_and_hides_rest() {
    let mut engine = engine();
    engine.handle(Event::Click {
        id: "filter-web".to_string(),
    });
    engine.advance(500);

    assert!(engine.style("proj-dashboard").unwrap().visible);
    assert!(engine.style("proj-store").unwrap().visible);
    assert!(!engine.style("proj-tracker").unwrap().visible);
    assert_eq!(engine.style("proj-tracker").unwrap().opacity, 0.0);

    let page = engine.page().clone();
    let active: Vec<&str> = page
        .by_role(Role::FilterButton)
        .filter(|&b| {
            engine
                .style(&page.element(b).id)
                .is_some_and(|s| s.has_class("active"))
        })
        .map(|b| page.element(b).id.as_str())
        .collect();
    assert_eq!(active, vec!["filter-web"]);
}

#[test]
fn timeline_items_slide_in_from_their_side() {
    let mut engine = engine();
    engine.handle(Event::Scroll { y: 2800.0 });
    engine.advance(0);

    // The left item starts pushed left, the right one pushed right, and the
    // icons pop from scale zero.
    assert_eq!(engine.style("exp-item-1").unwrap().translate_x, -100.0);
    assert_eq!(engine.style("exp-item-2").unwrap().translate_x, 100.0);
    assert_eq!(engine.style("exp-icon-1").unwrap().scale, 0.0);

    engine.advance(2000);
    for id in ["exp-item-1", "exp-item-2"] {
        let state = engine.style(id).unwrap();
        assert_eq!(state.translate_x, 0.0, "{id}");
        assert_eq!(state.opacity, 1.0, "{id}");
    }
    assert_eq!(engine.style("exp-icon-1").unwrap().scale, 1.0);
    assert_eq!(engine.style("exp-icon-2").unwrap().scale, 1.0);
}

#[test]
fn about_and_contact_blocks_slide_in_horizontally() {
    let mut engine = engine();
    engine.handle(Event::Scroll { y: 1200.0 });
    engine.advance(0);
    assert_eq!(engine.style("about-image").unwrap().translate_x, -100.0);
    assert_eq!(engine.style("about-bio").unwrap().translate_x, 100.0);

    engine.handle(Event::Scroll { y: 4600.0 });
    engine.advance(0);
    assert_eq!(engine.style("contact-info").unwrap().translate_x, -50.0);
    assert_eq!(engine.style("contact-form").unwrap().translate_x, 50.0);
    assert_eq!(engine.style("method-email").unwrap().translate_x, -30.0);
    // Form groups rise; they never move horizontally.
    assert_eq!(engine.style("form-name").unwrap().translate_y, 30.0);
    assert_eq!(engine.style("form-name").unwrap().translate_x, 0.0);

    engine.advance(3000);
    for id in [
        "about-image",
        "about-bio",
        "about-quote",
        "contact-info",
        "method-phone",
        "form-message",
    ] {
        let state = engine.style(id).unwrap();
        assert_eq!(state.translate_x, 0.0, "{id}");
        assert_eq!(state.translate_y, 0.0, "{id}");
        assert_eq!(state.opacity, 1.0, "{id}");
    }
}

#[test]
fn form_submission_cycles_through_phases() {
    let mut engine = engine();
    engine.handle(Event::Submit);
    assert_eq!(*engine.form_phase(), FormPhase::Sending);
    assert!(engine.style("send-btn").unwrap().disabled);
    assert_eq!(
        engine.style("send-btn").unwrap().text.as_deref(),
        Some("Sending...")
    );

    // A second submit while in flight is ignored.
    engine.handle(Event::Submit);

    engine.advance(2000);
    assert_eq!(*engine.form_phase(), FormPhase::Sent);
    assert_eq!(
        engine.style("send-btn").unwrap().text.as_deref(),
        Some("Message Sent!")
    );

    engine.advance(3000);
    assert_eq!(*engine.form_phase(), FormPhase::Idle);
    assert!(!engine.style("send-btn").unwrap().disabled);
}

#[test]
fn nav_link_glides_to_section_with_header_offset() {
    let mut engine = engine();
    engine.handle(Event::Click {
        id: "nav-projects".to_string(),
    });
    engine.advance(600);
    assert_eq!(engine.viewport().scroll_y, 3700.0 - 80.0);
    assert!(engine.style("navbar").unwrap().has_class("scrolled"));
    assert!(!engine.style("nav-menu").unwrap().has_class("active"));
}

#[test]
fn social_links_reveal_as_a_staggered_group() {
    let mut engine = engine();
    engine.handle(Event::Scroll { y: 4800.0 });
    engine.advance(2000);
    for id in ["social-github", "social-linkedin"] {
        let state = engine.style(id).unwrap();
        assert_eq!(state.opacity, 1.0, "{id}");
        assert_eq!(state.scale, 1.0, "{id}");
    }
}

#[test]
fn pointer_follower_chases_raw_position() {
    let mut engine = engine();
    engine.handle(Event::PointerMove { x: 640.0, y: 360.0 });
    for _ in 0..120 {
        engine.handle(Event::Frame);
    }
    let follower = engine.pointer().follower();
    assert!((follower.x - 640.0).abs() < 1.0);
    assert!((follower.y - 360.0).abs() < 1.0);

    engine.handle(Event::HoverEnter {
        id: "proj-dashboard".to_string(),
    });
    assert_eq!(engine.pointer().scale(), 1.5);
    engine.handle(Event::HoverLeave {
        id: "proj-dashboard".to_string(),
    });
    assert_eq!(engine.pointer().scale(), 1.0);
}

#[test]
fn parallax_tracks_scroll_position_exactly() {
    let mut engine = engine();
    engine.handle(Event::Scroll { y: 400.0 });
    assert_eq!(engine.style("float-profile").unwrap().translate_y, 20.0);
    assert_eq!(engine.style("float-stack").unwrap().translate_y, 40.0);

    engine.handle(Event::Scroll { y: 1200.0 });
    engine.handle(Event::Scroll { y: 400.0 });
    assert_eq!(engine.style("float-profile").unwrap().translate_y, 20.0);
    assert_eq!(engine.style("float-stack").unwrap().translate_y, 40.0);
}

#[test]
fn unknown_event_targets_are_skipped() {
    let mut engine = engine();
    engine.handle(Event::Click {
        id: "does-not-exist".to_string(),
    });
    engine.handle(Event::HoverEnter {
        id: "also-missing".to_string(),
    });
    assert_eq!(engine.pointer().scale(), 1.0);
}
