use crate::app::CropApp;
use crate::message::Message;
use iced::widget::{button, column, container, mouse_area, row, scrollable, text, Space};
use iced::{Element, Length};
use pdfcrop::geometry::ScreenRect;
use pdfcrop::selection::Selection;

fn toolbar(app: &CropApp) -> Element<'_, Message> {
    let can_start = app.source.is_some() && !app.selection.is_active();
    let can_apply = app.selection.confirmed_rect().is_some() && !app.crop_in_flight;
    let can_cancel = app.selection.is_active();
    let can_download = app.artifact.is_some();
    let has_doc = app.source.is_some();

    row![
        button("Open").on_press(Message::OpenDocument),
        button("Close").on_press_maybe(has_doc.then_some(Message::CloseDocument)),
        Space::new().width(Length::Fixed(10.0)),
        button("Start Crop").on_press_maybe(can_start.then_some(Message::StartCrop)),
        button("Apply Crop").on_press_maybe(can_apply.then_some(Message::ConfirmCrop)),
        button("Cancel").on_press_maybe(can_cancel.then_some(Message::CancelCrop)),
        button("Download").on_press_maybe(can_download.then_some(Message::SaveArtifact)),
        Space::new().width(Length::Fill),
        button("-").on_press_maybe(has_doc.then_some(Message::ZoomOut)),
        text(format!("{}%", (app.zoom * 100.0) as u32)),
        button("+").on_press_maybe(has_doc.then_some(Message::ZoomIn)),
    ]
    .spacing(5)
    .align_y(iced::Alignment::Center)
    .padding(10)
    .into()
}

fn status_line(app: &CropApp) -> Element<'_, Message> {
    let hint = match app.selection {
        Selection::Armed => Some("Drag a rectangle over the page"),
        Selection::Dragging { .. } => Some("Release to finish the selection"),
        Selection::Selected { .. } => Some("Apply Crop to keep it, or drag again"),
        Selection::Idle => None,
    };

    let name = app
        .source
        .as_ref()
        .map(|s| s.name.as_str())
        .unwrap_or_default();

    let status = if let Some(ref msg) = app.status_message {
        row![
            Space::new().width(Length::Fill),
            text(msg.clone()).size(12),
            button("×").on_press(Message::ClearStatus).padding(2),
        ]
    } else if let Some(hint) = hint {
        row![Space::new().width(Length::Fill), text(hint).size(12)]
    } else {
        row![]
    };

    row![text(name).size(12), status].padding(5).into()
}

fn selection_overlay(rect: ScreenRect) -> Element<'static, Message> {
    let marquee = container(
        Space::new()
            .width(Length::Fixed(rect.width))
            .height(Length::Fixed(rect.height)),
    )
    .style(move |_| iced::widget::container::Style {
        background: Some(iced::Background::Color(iced::Color::from_rgba(
            0.23, 0.51, 0.96, 0.15,
        ))),
        border: iced::Border {
            color: iced::Color::from_rgb(0.23, 0.51, 0.96),
            width: 2.0,
            radius: iced::border::Radius::from(0.0),
        },
        ..Default::default()
    });

    container(marquee)
        .padding(iced::Padding {
            top: rect.y,
            right: 0.0,
            bottom: 0.0,
            left: rect.x,
        })
        .into()
}

fn page_view(app: &CropApp) -> Element<'_, Message> {
    let Some(preview) = &app.preview else {
        return container(text("Rendering..."))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    };

    let img = iced::widget::Image::new(preview.handle.clone())
        .width(Length::Fixed(preview.width as f32))
        .height(Length::Fixed(preview.height as f32));

    let mut page_stack = iced::widget::Stack::new().push(img);
    if let Some(rect) = app.selection.rect() {
        page_stack = page_stack.push(selection_overlay(rect));
    }

    // Pointer coordinates arrive viewer-local because the area wraps
    // exactly the rendered page.
    let area = mouse_area(page_stack)
        .on_press(Message::PointerPressed)
        .on_release(Message::PointerReleased)
        .on_move(Message::PointerMoved)
        .on_exit(Message::PointerLeft);

    scrollable(
        container(area)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding(10),
    )
    .height(Length::Fill)
    .into()
}

pub fn viewer_view(app: &CropApp) -> Element<'_, Message> {
    column![toolbar(app), status_line(app), page_view(app)].into()
}
