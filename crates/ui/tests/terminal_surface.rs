use services::{NavCommand, NavigatorConfig, SlideController};
use ui::{SlideContent, TerminalSurface};

fn deck() -> Vec<SlideContent> {
    vec![
        SlideContent::new("Welcome", "What this unit covers."),
        SlideContent::new("Habits", ""),
        SlideContent::new("Wrap-up", "Review and finish."),
    ]
}

fn output(nav: SlideController<TerminalSurface<Vec<u8>>>) -> String {
    let bytes = nav.into_surface().into_inner();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn paints_first_slide_once() {
    let mut nav =
        SlideController::new(TerminalSurface::new(Vec::new(), deck()), NavigatorConfig::default())
            .unwrap();
    nav.surface_mut().paint().unwrap();
    nav.surface_mut().paint().unwrap();

    let text = output(nav);
    assert_eq!(text.matches("== Welcome ==").count(), 1);
    assert!(text.contains("What this unit covers."));
    assert!(text.contains("[###-------] 1 / 3    Prev | Next >"));
}

#[test]
fn tracks_animation_until_settled() {
    let mut nav =
        SlideController::new(TerminalSurface::new(Vec::new(), deck()), NavigatorConfig::default())
            .unwrap();
    let _ = nav.handle(NavCommand::Advance);
    assert_eq!(nav.surface().visible_slide(), Some(1));
    assert!(nav.surface().is_animating());

    nav.settle();
    assert!(!nav.surface().is_animating());
}

#[test]
fn last_slide_shows_finish_caption() {
    let mut nav =
        SlideController::new(TerminalSurface::new(Vec::new(), deck()), NavigatorConfig::default())
            .unwrap();
    let _ = nav.go_to(2);
    nav.surface_mut().paint().unwrap();

    let text = output(nav);
    assert!(text.contains("== Wrap-up =="));
    assert!(text.contains("[##########] 3 / 3  < Prev | Complete >"));
    assert!(!text.contains("== Habits =="));
}

#[test]
fn manifest_slides_default_body() {
    let slide: SlideContent = serde_json::from_str(r#"{"title":"Only a title"}"#).unwrap();
    assert_eq!(slide, SlideContent::new("Only a title", ""));
}
