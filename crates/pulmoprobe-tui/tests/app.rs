use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde_json::Value;

use pulmoprobe_client::Predictor;
use pulmoprobe_core::dashboard::DashboardOptions;
use pulmoprobe_core::PredictionResult;
use pulmoprobe_schema::{IntakeSchema, PayloadFormat};
use pulmoprobe_tui::app::{App, Screen};
use pulmoprobe_tui::session::Session;

struct AlwaysHigh;

impl Predictor for AlwaysHigh {
    fn predict(&self, _payload: &Value) -> PredictionResult {
        PredictionResult::new("High Risk", 91.2)
    }
}

fn app() -> App {
    let session = Session::new(
        IntakeSchema::canonical().clone(),
        PayloadFormat::OneHot,
        Arc::new(AlwaysHigh),
        DashboardOptions::default(),
    );
    App::new(session, "http://127.0.0.1:5000")
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn ctrl(app: &mut App, c: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

fn screen_text(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(140, 50)).unwrap();
    terminal.draw(|f| app.draw(f)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn wait_for_result(app: &mut App) {
    for _ in 0..500 {
        app.tick();
        if !app.session().form().is_busy() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("submission did not finish");
}

#[test]
fn function_keys_switch_screens() {
    let mut app = app();
    assert_eq!(app.screen(), Screen::Home);

    press(&mut app, KeyCode::F(2));
    assert_eq!(app.screen(), Screen::Dashboard);
    press(&mut app, KeyCode::F(3));
    assert_eq!(app.screen(), Screen::About);
    press(&mut app, KeyCode::F(4));
    assert_eq!(app.screen(), Screen::Contact);
    press(&mut app, KeyCode::F(1));
    assert_eq!(app.screen(), Screen::Home);
    press(&mut app, KeyCode::F(9));
    assert_eq!(app.screen(), Screen::Home);
}

#[test]
fn q_types_on_the_form_but_quits_elsewhere() {
    let mut app = app();
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit());

    press(&mut app, KeyCode::F(3));
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());
}

#[test]
fn ctrl_q_quits_from_the_form() {
    let mut app = app();
    ctrl(&mut app, 'q');
    assert!(app.should_quit());
}

#[test]
fn empty_dashboard_shows_prompt() {
    let mut app = app();
    press(&mut app, KeyCode::F(2));

    let text = screen_text(&mut app);
    assert!(text.contains("No Prediction Data Yet"));
    assert!(!text.contains("Total Predictions"));
}

#[test]
fn enter_submits_and_dashboard_reflects_the_record() {
    let mut app = app();
    ctrl(&mut app, 's');
    press(&mut app, KeyCode::Enter);
    wait_for_result(&mut app);

    let home = screen_text(&mut app);
    assert!(home.contains("High Risk"));
    assert!(home.contains("91.2%"));

    press(&mut app, KeyCode::F(2));
    let dashboard = screen_text(&mut app);
    assert!(dashboard.contains("Total Predictions"));
    assert!(dashboard.contains("Countries Analyzed"));
    assert!(dashboard.contains("Stage II"));

    let record = app.session().history().latest().unwrap();
    assert!(dashboard.contains(&record.short_id()));
}

#[test]
fn invalid_form_shows_inline_errors() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);

    assert!(app.session().form().has_errors());
    assert!(app.session().history().is_empty());
    let text = screen_text(&mut app);
    assert!(text.contains("Please fix the highlighted fields"));
}

#[test]
fn ctrl_r_starts_a_new_assessment() {
    let mut app = app();
    ctrl(&mut app, 's');
    press(&mut app, KeyCode::Enter);
    wait_for_result(&mut app);
    assert!(app.session().form().result().is_some());

    ctrl(&mut app, 'r');

    assert!(app.session().form().result().is_none());
    assert_eq!(app.session().form().input().value("age"), "");
    assert_eq!(app.session().history().len(), 1);
}

#[test]
fn about_lists_endpoint_and_schema() {
    let mut app = app();
    press(&mut app, KeyCode::F(3));

    let text = screen_text(&mut app);
    assert!(text.contains("http://127.0.0.1:5000"));
    assert!(text.contains("pulmoprobe-survival-v1"));
}
