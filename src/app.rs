use crate::commands::{DocumentInfo, PdfCommand};
use crate::engine::EngineState;
use crate::message::Message;
use crate::ui;
use crate::update::handle_message;
use bytes::Bytes;
use iced::widget::image as iced_image;
use iced::{Element, Task};
use pdfcrop::geometry::ScreenPoint;
use pdfcrop::selection::Selection;
use tokio::sync::mpsc;

pub const MIN_ZOOM: f32 = 0.1;
pub const ZOOM_STEP: f32 = 1.25;

/// The loaded source file. The serial distinguishes files across the
/// session's lifetime so results from a superseded file can be discarded.
pub struct SourceDocument {
    pub serial: u64,
    pub name: String,
    pub bytes: Bytes,
    pub info: DocumentInfo,
}

/// The currently displayed render of page 1. Its pixel width is the
/// viewport width the geometry math uses.
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub handle: iced_image::Handle,
}

pub struct CropApp {
    pub source: Option<SourceDocument>,
    pub selection: Selection,
    pub zoom: f32,
    pub preview: Option<Preview>,
    /// Last pointer position over the page, viewer-local. `None` until the
    /// pointer has actually moved over the render.
    pub cursor: Option<ScreenPoint>,
    pub artifact: Option<Bytes>,
    pub crop_in_flight: bool,
    pub status_message: Option<String>,
    pub engine: Option<EngineState>,
    pub next_serial: u64,
}

impl Default for CropApp {
    fn default() -> Self {
        Self {
            source: None,
            selection: Selection::Idle,
            zoom: 1.0,
            preview: None,
            cursor: None,
            artifact: None,
            crop_in_flight: false,
            status_message: None,
            engine: None,
            next_serial: 1,
        }
    }
}

impl CropApp {
    /// Asks the engine to rasterize page 1 at the current zoom. The reply is
    /// tagged with the source serial so a render of a replaced file is
    /// ignored.
    pub fn request_preview(&self) -> Task<Message> {
        let (Some(source), Some(engine)) = (&self.source, &self.engine) else {
            return Task::none();
        };

        let serial = source.serial;
        let scale = self.zoom;
        let cmd_tx = engine.cmd_tx.clone();

        Task::perform(
            async move {
                let (resp_tx, mut resp_rx) = mpsc::channel(1);
                let _ = cmd_tx.send(PdfCommand::Render(scale, resp_tx)).await;
                resp_rx.recv().await.unwrap_or(Err("Channel closed".into()))
            },
            move |result| Message::PreviewRendered(serial, result),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        handle_message(self, message)
    }

    pub fn view(&self) -> Element<'_, Message> {
        ui::view(self)
    }
}
