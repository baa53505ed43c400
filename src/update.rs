use crate::app::{CropApp, Preview, SourceDocument, MIN_ZOOM, ZOOM_STEP};
use crate::commands::PdfCommand;
use crate::engine::spawn_engine_thread;
use crate::message::{Message, OpenedDocument};
use bytes::Bytes;
use iced::widget::image as iced_image;
use iced::Task;
use pdfcrop::error::CropError;
use pdfcrop::geometry::{to_document_space, ScreenPoint};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub fn handle_message(app: &mut CropApp, message: Message) -> Task<Message> {
    match message {
        Message::OpenDocument => {
            let engine = app.engine.get_or_insert_with(spawn_engine_thread).clone();
            let cmd_tx = engine.cmd_tx;

            Task::perform(
                async move {
                    let file = rfd::AsyncFileDialog::new()
                        .add_filter("PDF", &["pdf"])
                        .pick_file()
                        .await
                        .ok_or_else(|| "Cancelled".to_string())?;

                    let name = file.file_name();
                    let bytes = Bytes::from(file.read().await);

                    let (resp_tx, mut resp_rx) = mpsc::channel(1);
                    let _ = cmd_tx.send(PdfCommand::Open(bytes.clone(), resp_tx)).await;
                    match resp_rx.recv().await {
                        Some(Ok(info)) => Ok(OpenedDocument { name, bytes, info }),
                        Some(Err(e)) => Err(e),
                        None => Err("Engine died".to_string()),
                    }
                },
                Message::DocumentOpened,
            )
        }
        Message::DocumentOpened(result) => match result {
            Ok(doc) => {
                let serial = app.next_serial;
                app.next_serial += 1;
                info!(name = %doc.name, serial, pages = doc.info.page_count, "document loaded");

                // A new file supersedes the whole prior session: selection,
                // artifact, preview, and any in-flight crop result.
                app.source = Some(SourceDocument {
                    serial,
                    name: doc.name,
                    bytes: doc.bytes,
                    info: doc.info,
                });
                app.selection.reset();
                app.artifact = None;
                app.preview = None;
                app.zoom = 1.0;
                app.crop_in_flight = false;
                app.status_message = None;

                app.request_preview()
            }
            Err(e) if e == "Cancelled" => Task::none(),
            Err(e) => surface_error(app, &e),
        },
        Message::CloseDocument => {
            if let Some(source) = app.source.take() {
                info!(name = %source.name, "document closed");
            }
            app.selection.reset();
            app.preview = None;
            app.artifact = None;
            app.zoom = 1.0;
            app.cursor = None;
            app.crop_in_flight = false;
            app.status_message = None;

            if let Some(engine) = &app.engine {
                let _ = engine.cmd_tx.try_send(PdfCommand::Close);
            }
            Task::none()
        }
        Message::PreviewRendered(serial, result) => {
            if app.source.as_ref().map(|s| s.serial) != Some(serial) {
                debug!(serial, "dropping preview for replaced document");
                return Task::none();
            }
            match result {
                Ok((width, height, data)) => {
                    // A selection is held in the old render's pixel space;
                    // carry it into the new one so confirm always pairs the
                    // rect with the viewport it is shown against.
                    if let Some(old) = &app.preview {
                        if old.width != width {
                            app.selection.rescale(width as f32 / old.width as f32);
                        }
                    }
                    app.preview = Some(Preview {
                        width,
                        height,
                        handle: iced_image::Handle::from_rgba(
                            width,
                            height,
                            data.as_ref().clone(),
                        ),
                    });
                    Task::none()
                }
                Err(e) => surface_error(app, &e),
            }
        }
        Message::StartCrop => {
            if app.source.is_some() && !app.selection.is_active() {
                app.artifact = None;
                app.status_message = None;
                app.selection.arm();
            }
            Task::none()
        }
        Message::CancelCrop => {
            app.selection.reset();
            app.artifact = None;
            app.status_message = None;
            Task::none()
        }
        Message::ConfirmCrop => {
            if app.crop_in_flight {
                return Task::none();
            }

            let Some(rect) = app.selection.confirmed_rect() else {
                return surface_error(app, &CropError::NoSelection.to_string());
            };
            let (Some(source), Some(preview), Some(engine)) =
                (&app.source, &app.preview, &app.engine)
            else {
                return Task::none();
            };

            let crop = to_document_space(rect, preview.width as f32, source.info.page);
            debug!(?rect, ?crop, "applying crop");

            // Leave crop mode synchronously; the in-flight flag blocks
            // re-entry until the engine answers.
            app.selection.reset();
            app.crop_in_flight = true;

            let serial = source.serial;
            let bytes = source.bytes.clone();
            let cmd_tx = engine.cmd_tx.clone();

            Task::perform(
                async move {
                    let (resp_tx, mut resp_rx) = mpsc::channel(1);
                    let _ = cmd_tx
                        .send(PdfCommand::ApplyCrop(bytes, crop, resp_tx))
                        .await;
                    resp_rx.recv().await.unwrap_or(Err("Channel closed".into()))
                },
                move |result| Message::CropApplied(serial, result),
            )
        }
        Message::CropApplied(serial, result) => {
            if app.source.as_ref().map(|s| s.serial) != Some(serial) {
                // Superseded by a file switch, not a failure.
                debug!(serial, "discarding crop result for replaced document");
                return Task::none();
            }

            app.crop_in_flight = false;
            match result {
                Ok(bytes) => {
                    info!(len = bytes.len(), "crop applied");
                    app.artifact = Some(bytes);
                    app.status_message = Some("Crop applied, ready to download".to_string());
                    Task::none()
                }
                Err(e) => surface_error(app, &e),
            }
        }
        Message::SaveArtifact => {
            let Some(bytes) = app.artifact.clone() else {
                return surface_error(app, &CropError::NoArtifact.to_string());
            };

            Task::perform(
                async move {
                    let file = rfd::AsyncFileDialog::new()
                        .add_filter("PDF", &["pdf"])
                        .set_file_name("cropped-pdf.pdf")
                        .save_file()
                        .await
                        .ok_or_else(|| "Cancelled".to_string())?;

                    let path = file.path().to_path_buf();
                    tokio::fs::write(&path, &bytes)
                        .await
                        .map_err(|e| e.to_string())?;
                    Ok(path.display().to_string())
                },
                Message::ArtifactSaved,
            )
        }
        Message::ArtifactSaved(result) => match result {
            Ok(path) => {
                info!(%path, "cropped document saved");
                app.status_message = Some(format!("Saved to {path}"));
                Task::none()
            }
            Err(e) if e == "Cancelled" => Task::none(),
            Err(e) => surface_error(app, &e),
        },
        Message::PointerPressed => {
            // A press with no observed position yet (touch, synthetic input)
            // has nowhere to anchor; wait for a move.
            if let Some(cursor) = app.cursor {
                app.selection.pointer_down(cursor);
            }
            Task::none()
        }
        Message::PointerMoved(point) => {
            let cursor = ScreenPoint::new(point.x, point.y);
            app.cursor = Some(cursor);
            app.selection.pointer_move(cursor);
            Task::none()
        }
        Message::PointerReleased => {
            app.selection.pointer_up();
            Task::none()
        }
        Message::PointerLeft => {
            app.cursor = None;
            app.selection.pointer_up();
            Task::none()
        }
        Message::ZoomIn => {
            if app.source.is_none() {
                return Task::none();
            }
            app.zoom *= ZOOM_STEP;
            app.request_preview()
        }
        Message::ZoomOut => {
            if app.source.is_none() {
                return Task::none();
            }
            app.zoom = (app.zoom / ZOOM_STEP).max(MIN_ZOOM);
            app.request_preview()
        }
        Message::ClearStatus => {
            app.status_message = None;
            Task::none()
        }
        Message::AlertClosed => Task::none(),
    }
}

/// Blocking notification plus the in-app status line. The dialog runs on a
/// blocking task so the update loop itself never stalls.
fn surface_error(app: &mut CropApp, message: &str) -> Task<Message> {
    warn!("{message}");
    app.status_message = Some(message.to_string());
    app.crop_in_flight = false;

    let text = message.to_string();
    Task::perform(
        async move {
            let _ = tokio::task::spawn_blocking(move || {
                native_dialog::MessageDialog::new()
                    .set_title("pdfcrop")
                    .set_type(native_dialog::MessageType::Error)
                    .set_text(&text)
                    .show_alert()
            })
            .await;
        },
        |()| Message::AlertClosed,
    )
}
