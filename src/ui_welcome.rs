use crate::message::Message;
use iced::widget::{button, column, text, Space};
use iced::{Alignment, Element, Length};

pub fn welcome_view() -> Element<'static, Message> {
    column![
        text("pdfcrop").size(32),
        Space::new().height(Length::Fixed(10.0)),
        text("Pick a PDF, drag a rectangle over the first page, download the cropped copy.").size(16),
        Space::new().height(Length::Fixed(20.0)),
        button("Open PDF")
            .on_press(Message::OpenDocument)
            .padding(10),
    ]
    .align_x(Alignment::Center)
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(40)
    .into()
}
