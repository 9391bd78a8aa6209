// SPDX-License-Identifier: MPL-2.0
//! Application root state and wiring between the event bus, the toast
//! manager and the shared value.
//!
//! The `App` owns one [`EventBus`] and passes it by reference to the
//! notification manager, which subscribes once at boot. The button publishes
//! on that bus; the manager is the only subscriber. The shared value is
//! independent of the bus.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod view;

pub use message::{Flags, Message};

use self::config::ThemeMode;
use crate::clock::{Clock, SystemClock};
use crate::event_bus::EventBus;
use crate::ui::notifications::{self, NOTIFICATION_EVENT};
use crate::ui::shared_value::{Provider, Reader, Writer};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

pub const WINDOW_DEFAULT_HEIGHT: u32 = 480;
pub const WINDOW_DEFAULT_WIDTH: u32 = 640;

const APP_NAME: &str = "IcedToasts";

/// Root Iced application state.
pub struct App {
    // Field order matters: the manager drops (and unsubscribes) before the bus.
    notifications: notifications::Manager,
    bus: EventBus<String>,
    shared_value: Provider<String>,
    reader: Reader<String>,
    writer: Writer<String>,
    /// Contents of the shared value editor.
    draft: String,
    click_message: String,
    theme_mode: ThemeMode,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("shared_value", &self.shared_value)
            .field("notifications", &self.notifications)
            .field("bus", &self.bus)
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        (Self::with_clock(flags, Rc::new(SystemClock)), Task::none())
    }

    /// Builds the application state. Settings problems are reported as toasts.
    fn with_clock(flags: Flags, clock: Rc<dyn Clock>) -> Self {
        let (config, config_warning) =
            config::load_with_override(flags.config_dir.map(PathBuf::from));

        let bus = EventBus::with_policy(config.notifications.dispatch_policy);
        let mut notifications = notifications::Manager::with_clock(
            config.notifications.display_duration(),
            clock,
        );
        if let Err(err) = notifications.activate(&bus) {
            log::error!("notification manager could not subscribe: {err}");
        }

        let initial = flags
            .initial_value
            .unwrap_or_else(|| config.general.initial_value.clone());
        let shared_value = Provider::create(initial);
        let (reader, writer) = shared_value.accessors();

        if let Some(warning) = config_warning {
            if let Err(err) = notifications.push(warning) {
                log::warn!("could not show config warning: {err}");
            }
        }

        Self {
            notifications,
            bus,
            draft: reader.get(),
            shared_value,
            reader,
            writer,
            click_message: config.notifications.click_message,
            theme_mode: config.general.theme_mode,
        }
    }

    fn title(&self) -> String {
        let value = self.reader.get();
        if value.is_empty() {
            APP_NAME.to_string()
        } else {
            format!("{value} - {APP_NAME}")
        }
    }

    fn theme(&self) -> Theme {
        match self.theme_mode {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_tick_subscription(self.notifications.pending_timers() > 0)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ButtonClicked => {
                if let Err(err) = self.bus.publish(NOTIFICATION_EVENT, &self.click_message) {
                    log::warn!("click notification not fully delivered: {err}");
                }
            }
            Message::DraftChanged(draft) => {
                self.draft = draft;
            }
            Message::ApplyDraft => {
                self.writer.set(self.draft.clone());
            }
            Message::Tick(_instant) => {
                self.notifications.tick();
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            shared_value: self.reader.get(),
            draft: &self.draft,
            notifications: &self.notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::{
        Config, CONFIG_LOAD_WARNING, DEFAULT_CLICK_MESSAGE, DEFAULT_INITIAL_VALUE,
    };
    use crate::clock::ManualClock;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn app_in(dir: &std::path::Path) -> (App, ManualClock) {
        let clock = ManualClock::new();
        let app = App::with_clock(
            Flags {
                config_dir: Some(dir.to_string_lossy().into_owned()),
                initial_value: None,
            },
            Rc::new(clock.clone()),
        );
        (app, clock)
    }

    #[test]
    fn new_starts_with_default_value_and_one_subscription() {
        let temp_dir = tempdir().expect("temp dir");
        let (app, _clock) = app_in(temp_dir.path());

        assert_eq!(app.reader.get(), DEFAULT_INITIAL_VALUE);
        assert_eq!(app.draft, DEFAULT_INITIAL_VALUE);
        assert_eq!(app.bus.subscriber_count(NOTIFICATION_EVENT), 1);
        assert!(!app.notifications.has_notifications());
    }

    #[test]
    fn button_click_shows_toast_until_it_expires() {
        let temp_dir = tempdir().expect("temp dir");
        let (mut app, clock) = app_in(temp_dir.path());

        let _ = app.update(Message::ButtonClicked);
        assert_eq!(app.notifications.messages(), vec![DEFAULT_CLICK_MESSAGE]);

        clock.advance(Duration::from_millis(2999));
        let _ = app.update(Message::Tick(clock.now()));
        assert_eq!(app.notifications.visible_count(), 1);

        clock.advance(Duration::from_millis(1));
        let _ = app.update(Message::Tick(clock.now()));
        assert_eq!(app.notifications.visible_count(), 0);
    }

    #[test]
    fn apply_draft_updates_shared_value_and_title() {
        let temp_dir = tempdir().expect("temp dir");
        let (mut app, _clock) = app_in(temp_dir.path());

        let _ = app.update(Message::DraftChanged("Hello".to_string()));
        assert_eq!(app.reader.get(), DEFAULT_INITIAL_VALUE);

        let _ = app.update(Message::ApplyDraft);
        assert_eq!(app.shared_value.get(), "Hello");
        assert_eq!(app.title(), format!("Hello - {APP_NAME}"));
    }

    #[test]
    fn flags_override_initial_value() {
        let temp_dir = tempdir().expect("temp dir");
        let app = App::with_clock(
            Flags {
                config_dir: Some(temp_dir.path().to_string_lossy().into_owned()),
                initial_value: Some("From CLI".to_string()),
            },
            Rc::new(ManualClock::new()),
        );
        assert_eq!(app.reader.get(), "From CLI");
    }

    #[test]
    fn settings_drive_click_message_and_duration() {
        let temp_dir = tempdir().expect("temp dir");
        let mut config = Config::default();
        config.notifications.click_message = "Saved".to_string();
        config.notifications.display_duration_ms = 1000;
        config.general.theme_mode = ThemeMode::Light;
        config::save_with_override(&config, Some(temp_dir.path().to_path_buf()))
            .expect("save settings");

        let (mut app, clock) = app_in(temp_dir.path());
        assert!(matches!(app.theme(), Theme::Light));

        let _ = app.update(Message::ButtonClicked);
        assert_eq!(app.notifications.messages(), vec!["Saved"]);

        clock.advance(Duration::from_millis(1000));
        let _ = app.update(Message::Tick(clock.now()));
        assert!(!app.notifications.has_notifications());
    }

    #[test]
    fn broken_settings_show_warning_toast() {
        let temp_dir = tempdir().expect("temp dir");
        fs::write(temp_dir.path().join("settings.toml"), "[general\n").expect("write");

        let (app, _clock) = app_in(temp_dir.path());
        assert_eq!(app.notifications.messages(), vec![CONFIG_LOAD_WARNING]);
    }

    #[test]
    fn view_renders_with_toasts() {
        let temp_dir = tempdir().expect("temp dir");
        let (mut app, _clock) = app_in(temp_dir.path());
        let _ = app.update(Message::ButtonClicked);
        let _element = app.view();
    }
}
