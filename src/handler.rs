use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use wrap_context::arg_context;

use crate::app::App;

#[rustfmt::skip]
/// Handles the key events and updates the state of [`App`].
/// Returns whether a redraw is needed.
pub fn handle_key_events(key_event: KeyEvent, app: &mut App) -> anyhow::Result<bool> {
    match key_event.code {
        // Exit application on `ESC` or `q`
        KeyCode::Esc | KeyCode::Char('q') => {
            app.quit();
        }
        // Exit application on `Ctrl-C`
        KeyCode::Char('c') | KeyCode::Char('C') if key_event.modifiers == KeyModifiers::CONTROL => {
            app.quit();
        }
        KeyCode::Tab => {
            arg_context!(app.focus_next())?;
        }
        KeyCode::Char('a') => {
            arg_context!(app.attach_focused())?;
        }
        KeyCode::Char('d') => {
            arg_context!(app.invoke_focused("destroy"))?;
        }
        KeyCode::Char('r') => {
            arg_context!(app.invoke_focused("reset"))?;
        }
        KeyCode::Char('n') => {
            arg_context!(app.add_item_to_focused())?;
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            arg_context!(app.remove_checked_from_focused())?;
        }
        KeyCode::Char('c') => {
            arg_context!(app.check_all_focused())?;
        }
        _ => return anyhow::Ok(false),
    }

    anyhow::Ok(true)
}

/// Translates pointer motion and releases into checklist events.
/// Returns whether a redraw is needed.
pub fn handle_mouse_events(mouse_event: MouseEvent, app: &mut App) -> anyhow::Result<bool> {
    let (column, row) = (mouse_event.column, mouse_event.row);

    match mouse_event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            arg_context!(app.pointer_move(column, row))
        }
        MouseEventKind::Up(MouseButton::Left) => {
            arg_context!(app.pointer_release(column, row))
        }
        _ => anyhow::Ok(false),
    }
}
