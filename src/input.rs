// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal mouse events to selection pointer events.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::model::ScreenPoint;
use crate::selection::{PointerButton, PointerEvent};

/// Maps a crossterm mouse event to a [`PointerEvent`].
///
/// Cells are used as screen units. Middle-button and scroll events have no meaning for
/// selection and map to `None`.
pub fn pointer_event(event: &MouseEvent) -> Option<PointerEvent> {
    let at = ScreenPoint::new(f64::from(event.column), f64::from(event.row));
    match event.kind {
        MouseEventKind::Down(button) => pointer_button(button).map(|b| PointerEvent::Down(b, at)),
        MouseEventKind::Up(button) => pointer_button(button).map(|b| PointerEvent::Up(b, at)),
        MouseEventKind::Drag(button) => pointer_button(button).map(|_| PointerEvent::Move(at)),
        MouseEventKind::Moved => Some(PointerEvent::Move(at)),
        _ => None,
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use rstest::rstest;

    use super::pointer_event;
    use crate::model::ScreenPoint;
    use crate::selection::{PointerButton, PointerEvent};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
    }

    #[rstest]
    #[case::left_down(
        MouseEventKind::Down(MouseButton::Left),
        Some(PointerEvent::Down(PointerButton::Primary, ScreenPoint::new(4.0, 7.0)))
    )]
    #[case::right_down(
        MouseEventKind::Down(MouseButton::Right),
        Some(PointerEvent::Down(PointerButton::Secondary, ScreenPoint::new(4.0, 7.0)))
    )]
    #[case::right_up(
        MouseEventKind::Up(MouseButton::Right),
        Some(PointerEvent::Up(PointerButton::Secondary, ScreenPoint::new(4.0, 7.0)))
    )]
    #[case::right_drag(
        MouseEventKind::Drag(MouseButton::Right),
        Some(PointerEvent::Move(ScreenPoint::new(4.0, 7.0)))
    )]
    #[case::moved(MouseEventKind::Moved, Some(PointerEvent::Move(ScreenPoint::new(4.0, 7.0))))]
    #[case::middle_down(MouseEventKind::Down(MouseButton::Middle), None)]
    #[case::middle_drag(MouseEventKind::Drag(MouseButton::Middle), None)]
    #[case::scroll(MouseEventKind::ScrollDown, None)]
    fn maps_mouse_events(#[case] kind: MouseEventKind, #[case] expected: Option<PointerEvent>) {
        assert_eq!(pointer_event(&mouse(kind, 4, 7)), expected);
    }
}
