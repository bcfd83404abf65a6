use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, View};
use crate::poller::scenario_for_key;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::Char('1') => app.set_view(View::Live),
        KeyCode::Char('2') => app.set_view(View::Trends),

        // Manual refresh
        KeyCode::Char('r') => app.refresh_now(),

        // Export
        KeyCode::Char('e') => app.export(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Scenarios
        KeyCode::Char(c) => {
            if let Some(name) = scenario_for_key(c) {
                app.trigger_scenario(name);
            }
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::fake::ScriptedApi;
    use crate::poller::Pollers;
    use crate::ui::Theme;
    use std::sync::Arc;
    use tokio::runtime::Handle;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[tokio::test]
    async fn test_navigation_keys() {
        let api = Arc::new(ScriptedApi::default());
        let mut app = App::new(Pollers::new(api), Handle::current(), "scripted", Theme::dark());

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.current_view, View::Trends);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_view, View::Live);

        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        // any key closes help without acting
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(app.running);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_scenario_keys() {
        let api = Arc::new(ScriptedApi::default());
        let mut app =
            App::new(Pollers::new(api.clone()), Handle::current(), "scripted", Theme::dark());

        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('x'));
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(api.scenarios(), vec!["icu_surge".to_string()]);
    }
}
