//! The macOS desktop shell.
//!
//! Wires the platform-neutral pieces (popover controller, lifecycle, action
//! bus, notification center) to Tauri: a status item with a popover window
//! in menu bar mode, or an ordinary window otherwise.

mod content;
mod event_tap;
mod menu;
mod notifications;
mod popover_window;
mod status_item;

use std::sync::Arc;

use tauri::{App, AppHandle, Manager, RunEvent, Window, WindowEvent};

use self::content::POPOVER_WINDOW_LABEL;
use self::event_tap::EventTapMonitor;
use self::notifications::{MacNotificationCenter, MacNotificationSink, TauriShellHost};
use self::popover_window::{PopoverWindow, window_frame};
use self::status_item::TrayAnchor;
use crate::bridge::ActionBus;
use crate::config::Settings;
use crate::error::WebShellError;
use crate::lifecycle::{AppMode, Lifecycle, ShellHost};
use crate::notifications::NotificationCenter;
use crate::popover::{self, Point, SharedPopover};

/// The status item popover managed as app state.
pub(crate) type MacPopover = SharedPopover<PopoverWindow, TrayAnchor, EventTapMonitor>;

/// The lifecycle handler managed as app state.
pub(crate) type MacLifecycle = Lifecycle<TauriShellHost>;

/// Runs the desktop shell until the app quits.
///
/// # Errors
///
/// Returns an error if Tauri fails to initialize.
pub fn run(settings: Settings) -> Result<(), WebShellError> {
    let bus = Arc::new(ActionBus::new());
    let menu_bus = Arc::clone(&bus);

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| on_second_instance(app)))
        .invoke_handler(tauri::generate_handler![notifications::deliver_web_notification])
        .on_menu_event(move |app, event| menu::handle_menu_event(app, event.id.as_ref(), &menu_bus))
        .on_window_event(on_window_event)
        .setup(move |app| {
            setup(app, &settings, &bus)?;
            Ok(())
        })
        .build(tauri::generate_context!())?;

    app.run(on_run_event);
    Ok(())
}

fn setup(app: &mut App, settings: &Settings, bus: &ActionBus) -> Result<(), WebShellError> {
    let handle = app.handle().clone();
    let mode = AppMode::from_settings(settings);

    notifications::init(&app.config().identifier);
    app.manage::<MacNotificationCenter>(NotificationCenter::new(
        MacNotificationSink::new(handle.clone()),
        settings.show_notifications,
    ));
    app.manage::<MacLifecycle>(Lifecycle::new(mode, TauriShellHost::new(handle.clone())));

    app.set_menu(menu::build_app_menu(&handle, &settings.title)?)?;

    match mode {
        AppMode::MenuBar => setup_menu_bar(app, settings, bus)?,
        AppMode::Windowed => setup_window(app, settings, bus)?,
    }

    tracing::info!(?mode, url = %settings.url, "webshell started");
    Ok(())
}

fn setup_window(app: &mut App, settings: &Settings, bus: &ActionBus) -> Result<(), WebShellError> {
    // The status item is declared in the app config; window mode has none.
    if app.remove_tray_by_id(status_item::TRAY_ID).is_some() {
        tracing::debug!("status item removed in window mode");
    }

    let window = content::build_main_window(app.handle(), settings)?;
    content::attach_page_actions(&window, bus, &settings.url);
    Ok(())
}

fn setup_menu_bar(app: &mut App, settings: &Settings, bus: &ActionBus) -> Result<(), WebShellError> {
    let handle = app.handle().clone();

    // Keep the app out of the dock and the app switcher
    if let Err(err) = handle.set_activation_policy(tauri::ActivationPolicy::Accessory) {
        tracing::warn!(error = %err, "failed to set activation policy");
    }

    let window = content::build_popover_window(&handle, settings)?;
    content::attach_page_actions(&window, bus, &settings.url);

    let size = settings.content_size();
    let anchor = TrayAnchor::new(handle.clone(), window.clone());
    let surface = PopoverWindow::new(window, size);
    let tap_handle = handle.clone();

    let popover: MacPopover = popover::shared(surface, anchor, size, move |on_outside_click| {
        EventTapMonitor::new(Arc::new(move |location| {
            let app = tap_handle.clone();
            let on_outside_click = Arc::clone(&on_outside_click);
            let dispatched = tap_handle.run_on_main_thread(move || {
                if is_outside_click(&app, location) {
                    on_outside_click();
                }
            });

            if let Err(err) = dispatched {
                tracing::warn!(error = %err, "failed to dispatch outside click");
            }
        }))
    });

    // The monitor runs from setup on; the controller ignores clicks while hidden.
    popover.lock().start_monitor();
    app.manage(popover);

    status_item::attach(&handle, settings)?;
    Ok(())
}

/// Whether a pointer-down missed both the visible popover and the status button.
fn is_outside_click(app: &AppHandle, location: Point) -> bool {
    let Some(window) = app.get_webview_window(POPOVER_WINDOW_LABEL) else {
        return true;
    };

    let popover_frame = window.is_visible().unwrap_or(false).then(|| window_frame(&window));
    let scale_factor = window.scale_factor().unwrap_or(1.0);
    let button = status_item::button_bounds(app, scale_factor);

    popover::is_outside(location, popover_frame, button)
}

fn on_second_instance(app: &AppHandle) {
    let Some(lifecycle) = app.try_state::<MacLifecycle>() else {
        return;
    };
    tracing::debug!(mode = ?lifecycle.mode(), "second instance launched, activating");

    match lifecycle.mode() {
        AppMode::MenuBar => {
            if let Some(popover) = app.try_state::<MacPopover>() {
                popover.lock().show();
            }
        }
        AppMode::Windowed => lifecycle.host().bring_main_window_to_front(),
    }
}

fn on_window_event(window: &Window, event: &WindowEvent) {
    if let WindowEvent::CloseRequested { api, .. } = event
        && window.label() == POPOVER_WINDOW_LABEL
    {
        api.prevent_close();
        if let Some(popover) = window.app_handle().try_state::<MacPopover>() {
            popover.lock().hide();
        }
    }
}

fn on_run_event(app: &AppHandle, event: RunEvent) {
    match event {
        RunEvent::ExitRequested { code, api, .. } => {
            let keep_running = app
                .try_state::<MacLifecycle>()
                .is_some_and(|lifecycle| !lifecycle.should_terminate_after_last_window_closed());

            // `code` is only set for explicit exits such as the Quit item.
            if code.is_none() && keep_running {
                api.prevent_exit();
            }
        }
        RunEvent::Reopen { has_visible_windows, .. } => {
            if let Some(lifecycle) = app.try_state::<MacLifecycle>() {
                lifecycle.handle_reopen(has_visible_windows);
            }
        }
        RunEvent::Exit => {
            if let Some(popover) = app.try_state::<MacPopover>() {
                popover.lock().hide();
            }
            tracing::info!("webshell exiting");
        }
        _ => {}
    }
}
