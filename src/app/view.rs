// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The main column shows the shared value as a title, the button that
//! publishes a notification and an editor for the shared value. Toasts are
//! stacked on top.

use super::Message;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::{self, Toast};
use iced::widget::{button, text, text_input, Column, Container, Row, Stack, Text};
use iced::{alignment, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub shared_value: String,
    pub draft: &'a str,
    pub notifications: &'a notifications::Manager,
}

/// Renders the whole window.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let title = Text::new(ctx.shared_value).size(typography::TITLE_LG);

    let click_button = button(text("Click me").size(typography::BODY))
        .on_press(Message::ButtonClicked)
        .padding(spacing::XS);

    let editor = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(
            text_input("New shared value", ctx.draft)
                .on_input(Message::DraftChanged)
                .on_submit(Message::ApplyDraft)
                .size(typography::BODY)
                .width(Length::Fixed(sizing::INPUT_WIDTH)),
        )
        .push(
            button(text("Update").size(typography::BODY))
                .on_press(Message::ApplyDraft)
                .padding(spacing::XS),
        );

    let content = Column::new()
        .spacing(spacing::LG)
        .align_x(alignment::Horizontal::Center)
        .push(title)
        .push(click_button)
        .push(editor);

    let main = Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .padding(spacing::MD);

    Stack::new()
        .push(main)
        .push(Toast::view_overlay(ctx.notifications))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
