use crate::app::CropApp;
use crate::message::Message;
use crate::ui_viewer::viewer_view;
use crate::ui_welcome::welcome_view;
use iced::Element;

pub fn view(app: &CropApp) -> Element<'_, Message> {
    if app.source.is_none() {
        return welcome_view();
    }

    viewer_view(app)
}
