use std::time::{Duration, Instant};

use everybar_core::controller::{Effect, Key, Phase, Placeholder, SearchController};

const WINDOW: Duration = Duration::from_millis(300);

fn at(start: Instant, ms: u64) -> Instant {
    start + Duration::from_millis(ms)
}

fn paths(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn rendered_controller(rows: &[&str]) -> SearchController {
    let start = Instant::now();
    let mut controller = SearchController::new(WINDOW);
    controller.input_changed("query", start);
    let effects = controller.tick(at(start, 300));
    assert!(effects.contains(&Effect::BeginSearch("query".to_string())));
    controller.search_completed(Ok(paths(rows)));
    controller
}

#[test]
fn rapid_edits_coalesce_into_one_trailing_search() {
    let start = Instant::now();
    let mut controller = SearchController::new(WINDOW);

    controller.input_changed("n", start);
    controller.input_changed("no", at(start, 50));
    controller.input_changed("not", at(start, 100));

    assert_eq!(controller.tick(at(start, 350)), Vec::new());
    let effects = controller.tick(at(start, 400));
    assert_eq!(
        effects,
        vec![
            Effect::AdjustHeight(1),
            Effect::BeginSearch("not".to_string()),
        ]
    );
    assert_eq!(controller.tick(at(start, 700)), Vec::new());
}

#[test]
fn firing_shows_the_loading_placeholder() {
    let start = Instant::now();
    let mut controller = SearchController::new(WINDOW);

    controller.input_changed("query", start);
    controller.tick(at(start, 300));

    assert_eq!(controller.phase(), Phase::Searching);
    assert_eq!(controller.placeholder(), Some(Placeholder::Loading));
    assert_eq!(controller.item_count(), 1);
    assert!(controller.list_visible());
}

#[test]
fn blank_input_at_fire_time_returns_to_idle() {
    let start = Instant::now();
    let mut controller = SearchController::new(WINDOW);

    controller.input_changed("   ", start);
    let effects = controller.tick(at(start, 300));

    assert_eq!(controller.phase(), Phase::Idle);
    assert!(!controller.list_visible());
    assert_eq!(effects, vec![Effect::AdjustHeight(0)]);
}

#[test]
fn results_render_with_selection_reset_to_none() {
    let start = Instant::now();
    let mut controller = SearchController::new(WINDOW);
    controller.input_changed("query", start);
    controller.tick(at(start, 300));

    let effects =
        controller.search_completed(Ok(paths(&["C:\\docs\\a.txt", "C:\\docs\\b.txt"])));

    assert_eq!(controller.phase(), Phase::Rendered);
    assert_eq!(controller.selected_index(), -1);
    assert_eq!(controller.rows().len(), 2);
    assert_eq!(controller.rows()[0].title, "a.txt");
    assert_eq!(controller.rows()[0].path, "C:\\docs\\a.txt");
    assert_eq!(effects, vec![Effect::AdjustHeight(2)]);
}

#[test]
fn zero_results_show_the_no_results_placeholder() {
    let start = Instant::now();
    let mut controller = SearchController::new(WINDOW);
    controller.input_changed("query", start);
    controller.tick(at(start, 300));

    let effects = controller.search_completed(Ok(Vec::new()));

    assert_eq!(controller.phase(), Phase::Empty);
    assert_eq!(controller.placeholder(), Some(Placeholder::NoResults));
    assert_eq!(effects, vec![Effect::AdjustHeight(1)]);
}

#[test]
fn failure_shows_the_failed_placeholder_and_keeps_the_message() {
    let start = Instant::now();
    let mut controller = SearchController::new(WINDOW);
    controller.input_changed("query", start);
    controller.tick(at(start, 300));

    let effects = controller.search_completed(Err("exited with code 2".to_string()));

    assert_eq!(controller.phase(), Phase::Failed);
    assert_eq!(controller.placeholder(), Some(Placeholder::Failed));
    assert_eq!(controller.failure_message(), Some("exited with code 2"));
    assert_eq!(effects, vec![Effect::AdjustHeight(1)]);
}

#[test]
fn late_completion_after_escape_is_dropped() {
    let start = Instant::now();
    let mut controller = SearchController::new(WINDOW);
    controller.input_changed("query", start);
    controller.tick(at(start, 300));
    controller.key_pressed(Key::Escape);

    let effects = controller.search_completed(Ok(paths(&["C:\\late.txt"])));

    assert_eq!(effects, Vec::new());
    assert_eq!(controller.phase(), Phase::Idle);
    assert!(controller.rows().is_empty());
}

#[test]
fn down_and_up_wrap_around_the_row_count() {
    let mut controller = rendered_controller(&["C:\\a.txt", "C:\\b.txt", "C:\\c.txt"]);

    controller.key_pressed(Key::Down);
    assert_eq!(controller.selected_index(), 0);
    controller.key_pressed(Key::Down);
    controller.key_pressed(Key::Down);
    assert_eq!(controller.selected_index(), 2);
    controller.key_pressed(Key::Down);
    assert_eq!(controller.selected_index(), 0);

    controller.key_pressed(Key::Up);
    assert_eq!(controller.selected_index(), 2);
}

#[test]
fn up_from_no_selection_follows_modulo_arithmetic() {
    let mut controller = rendered_controller(&["C:\\a.txt", "C:\\b.txt", "C:\\c.txt"]);

    assert_eq!(controller.selected_index(), -1);
    controller.key_pressed(Key::Up);
    assert_eq!(controller.selected_index(), 1);
}

#[test]
fn navigation_is_inert_without_rendered_rows() {
    let start = Instant::now();
    let mut controller = SearchController::new(WINDOW);

    controller.key_pressed(Key::Down);
    assert_eq!(controller.selected_index(), -1);

    controller.input_changed("query", start);
    controller.tick(at(start, 300));
    controller.key_pressed(Key::Down);
    assert_eq!(controller.selected_index(), -1);

    controller.search_completed(Ok(Vec::new()));
    controller.key_pressed(Key::Up);
    assert_eq!(controller.selected_index(), -1);
}

#[test]
fn enter_opens_the_selected_row() {
    let mut controller = rendered_controller(&["C:\\a.txt", "C:\\b.txt"]);

    controller.key_pressed(Key::Down);
    let effects = controller.key_pressed(Key::Enter);

    assert_eq!(effects, vec![Effect::OpenPath("C:\\a.txt".to_string())]);
    assert_eq!(controller.phase(), Phase::Rendered);
    assert_eq!(controller.rows().len(), 2);
}

#[test]
fn enter_without_selection_does_nothing() {
    let mut controller = rendered_controller(&["C:\\a.txt", "C:\\b.txt"]);

    let effects = controller.key_pressed(Key::Enter);
    assert_eq!(effects, Vec::new());
}

#[test]
fn escape_clears_input_rows_and_selection_and_hides_the_list() {
    let mut controller = rendered_controller(&["C:\\a.txt", "C:\\b.txt"]);
    controller.key_pressed(Key::Down);

    let effects = controller.key_pressed(Key::Escape);

    assert_eq!(controller.phase(), Phase::Idle);
    assert_eq!(controller.input(), "");
    assert!(controller.rows().is_empty());
    assert_eq!(controller.selected_index(), -1);
    assert!(!controller.list_visible());
    assert_eq!(effects, vec![Effect::ClearInput, Effect::AdjustHeight(0)]);
}

#[test]
fn escape_from_a_failed_search_returns_to_idle() {
    let start = Instant::now();
    let mut controller = SearchController::new(WINDOW);
    controller.input_changed("query", start);
    controller.tick(at(start, 300));
    controller.search_completed(Err("exited with code 9".to_string()));

    let effects = controller.key_pressed(Key::Escape);

    assert_eq!(controller.phase(), Phase::Idle);
    assert_eq!(controller.failure_message(), None);
    assert_eq!(effects, vec![Effect::ClearInput, Effect::AdjustHeight(0)]);
}

#[test]
fn escape_cancels_a_pending_debounced_query() {
    let start = Instant::now();
    let mut controller = SearchController::new(WINDOW);

    controller.input_changed("que", start);
    controller.key_pressed(Key::Escape);

    assert_eq!(controller.tick(at(start, 500)), Vec::new());
    assert_eq!(controller.phase(), Phase::Idle);
}

#[test]
fn click_selects_the_row_and_requests_open() {
    let mut controller = rendered_controller(&["C:\\a.txt", "C:\\b.txt"]);

    let effects = controller.row_clicked(1);

    assert_eq!(controller.selected_index(), 1);
    assert_eq!(effects, vec![Effect::OpenPath("C:\\b.txt".to_string())]);
}

#[test]
fn click_outside_the_row_range_is_ignored() {
    let mut controller = rendered_controller(&["C:\\a.txt"]);

    let effects = controller.row_clicked(5);

    assert_eq!(effects, Vec::new());
    assert_eq!(controller.selected_index(), -1);
}

#[test]
fn open_failure_leaves_the_rendered_list_in_place() {
    let mut controller = rendered_controller(&["C:\\a.txt"]);

    controller.open_completed(Err("association missing".to_string()));

    assert_eq!(controller.phase(), Phase::Rendered);
    assert_eq!(controller.rows().len(), 1);
}

#[test]
fn a_new_search_replaces_rendered_rows_with_the_loading_placeholder() {
    let start = Instant::now();
    let mut controller = rendered_controller(&["C:\\a.txt", "C:\\b.txt"]);

    controller.input_changed("other", at(start, 1000));
    controller.tick(at(start, 1300));

    assert_eq!(controller.phase(), Phase::Searching);
    assert!(controller.rows().is_empty());
    assert_eq!(controller.item_count(), 1);
}
