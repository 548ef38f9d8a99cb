//! Application and status item menus.
//!
//! Page items use the [`PageAction`] name as their menu id, so a menu event
//! maps straight back to an action published on the [`ActionBus`].

use tauri::menu::{IsMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu};
use tauri::{AppHandle, Wry};

use crate::bridge::{ActionBus, PageAction};

/// Menu item ID for the quit action.
const QUIT_ID: &str = "quit";

fn page_items(app: &AppHandle, with_accelerators: bool) -> tauri::Result<Vec<MenuItem<Wry>>> {
    PageAction::ALL
        .iter()
        .map(|action| {
            let accelerator = with_accelerators.then(|| action.accelerator());
            MenuItem::with_id(app, action.name(), action.label(), true, accelerator)
        })
        .collect()
}

/// Builds the menu bar: app, Edit and Page submenus.
///
/// # Errors
///
/// Returns an error if a menu item cannot be created.
pub fn build_app_menu(app: &AppHandle, title: &str) -> tauri::Result<Menu<Wry>> {
    let app_menu = Submenu::with_items(
        app,
        title,
        true,
        &[
            &PredefinedMenuItem::about(app, None, None)?,
            &PredefinedMenuItem::separator(app)?,
            &PredefinedMenuItem::hide(app, None)?,
            &PredefinedMenuItem::hide_others(app, None)?,
            &PredefinedMenuItem::separator(app)?,
            &PredefinedMenuItem::quit(app, None)?,
        ],
    )?;

    // Without these the webview gets no copy/paste shortcuts.
    let edit_menu = Submenu::with_items(
        app,
        "Edit",
        true,
        &[
            &PredefinedMenuItem::undo(app, None)?,
            &PredefinedMenuItem::redo(app, None)?,
            &PredefinedMenuItem::separator(app)?,
            &PredefinedMenuItem::cut(app, None)?,
            &PredefinedMenuItem::copy(app, None)?,
            &PredefinedMenuItem::paste(app, None)?,
            &PredefinedMenuItem::select_all(app, None)?,
        ],
    )?;

    let items = page_items(app, true)?;
    let refs: Vec<&dyn IsMenuItem<Wry>> = items.iter().map(|item| item as &dyn IsMenuItem<Wry>).collect();
    let page_menu = Submenu::with_items(app, "Page", true, &refs)?;

    Menu::with_items(app, &[&app_menu, &edit_menu, &page_menu])
}

/// Builds the status item menu: the page actions followed by Quit.
///
/// # Errors
///
/// Returns an error if a menu item cannot be created.
pub fn build_status_menu(app: &AppHandle) -> tauri::Result<Menu<Wry>> {
    let items = page_items(app, false)?;
    let separator = PredefinedMenuItem::separator(app)?;
    let quit_item = MenuItem::with_id(app, QUIT_ID, "Quit", true, None::<&str>)?;

    let mut refs: Vec<&dyn IsMenuItem<Wry>> = items.iter().map(|item| item as &dyn IsMenuItem<Wry>).collect();
    refs.push(&separator);
    refs.push(&quit_item);

    Menu::with_items(app, &refs)
}

/// Dispatches a menu event from either menu.
pub fn handle_menu_event(app: &AppHandle, id: &str, bus: &ActionBus) {
    if let Some(action) = PageAction::from_name(id) {
        tracing::debug!(%action, "page action requested from menu");
        bus.publish(action);
        return;
    }

    if id == QUIT_ID {
        tracing::info!("quit requested via status item");
        app.exit(0);
    }
}
