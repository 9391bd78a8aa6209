// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual notifications.
//!
//! Toasts are the visual representation of notifications, appearing as
//! small cards with an accent border. They carry no controls: expiry is the
//! only way a toast goes away.

use super::manager::Manager;
use super::notification::Notification;
use crate::ui::design_tokens::{border, palette, radius, shadow, sizing, spacing, typography};
use iced::widget::{container, text, Column, Container, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Renders a single toast notification.
    pub fn view<'a, Message: 'a>(notification: &Notification) -> Element<'a, Message> {
        let message_widget = Text::new(notification.message().to_owned())
            .size(typography::BODY)
            .style(|theme: &Theme| text::Style {
                color: Some(theme.palette().text),
            });

        Container::new(message_widget)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(|theme: &Theme| toast_container_style(theme, palette::INFO_500))
            .into()
    }

    /// Renders the toast overlay with all visible notifications.
    ///
    /// Positions toasts in the bottom-right corner, stacked vertically in
    /// arrival order (oldest on top).
    pub fn view_overlay<'a, Message: 'a>(manager: &Manager) -> Element<'a, Message> {
        let toasts: Vec<Element<'a, Message>> =
            manager.visible().iter().map(Self::view).collect();

        if toasts.is_empty() {
            // Return an empty container that takes no space
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            let toast_column = Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Right);

            Container::new(toast_column)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Right)
                .align_y(alignment::Vertical::Bottom)
                .padding(spacing::MD)
                .into()
        }
    }
}

/// Style function for the toast container.
fn toast_container_style(theme: &Theme, accent_color: Color) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: accent_color,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_container_style_uses_accent_color() {
        let theme = Theme::Dark;
        let style = toast_container_style(&theme, palette::INFO_500);

        assert_eq!(style.border.color, palette::INFO_500);
        assert!(style.background.is_some());
    }

    #[test]
    fn overlay_renders_with_and_without_notifications() {
        let manager = Manager::new(std::time::Duration::from_secs(3));
        let _empty: Element<'_, ()> = Toast::view_overlay(&manager);

        manager.push("Button clicked!").unwrap();
        let _filled: Element<'_, ()> = Toast::view_overlay(&manager);
    }
}
