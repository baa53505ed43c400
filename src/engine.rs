use crate::commands::{DocumentInfo, PdfCommand};
use crate::preview::PreviewRenderer;
use bytes::Bytes;
use pdfcrop::crop;
use tokio::sync::mpsc;
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub struct EngineState {
    pub cmd_tx: mpsc::Sender<PdfCommand>,
}

/// Spawns the worker thread that owns the Pdfium binding and the currently
/// open document. Commands arrive over an mpsc channel and each carries its
/// own response sender; the thread exits when the channel closes.
pub fn spawn_engine_thread() -> EngineState {
    let (cmd_tx, mut cmd_rx) = mpsc::channel(32);

    std::thread::spawn(move || {
        let pdfium = match PreviewRenderer::init_pdfium() {
            Ok(p) => p,
            Err(e) => {
                error!("engine init failed: {e}");
                return;
            }
        };
        let mut renderer = PreviewRenderer::new(&pdfium);

        while let Some(cmd) = cmd_rx.blocking_recv() {
            match cmd {
                PdfCommand::Open(bytes, resp) => {
                    let res = open_document(&mut renderer, &bytes);
                    let _ = resp.blocking_send(res);
                }
                PdfCommand::Render(scale, resp) => {
                    let _ = resp.blocking_send(renderer.render_page(scale));
                }
                PdfCommand::ApplyCrop(bytes, crop_box, resp) => {
                    let res = crop::apply_crop(&bytes, crop_box)
                        .map(Bytes::from)
                        .map_err(|e| e.to_string());
                    let _ = resp.blocking_send(res);
                }
                PdfCommand::Close => {
                    renderer.close_document();
                    debug!("document closed");
                }
            }
        }
        debug!("engine thread shutting down");
    });

    EngineState { cmd_tx }
}

/// Loads the bytes into both backends: lopdf for structural metadata (the
/// same capability the applier uses) and Pdfium for preview rasterization.
/// Zero-page documents are rejected here so the UI never arms crop mode for
/// them.
fn open_document(renderer: &mut PreviewRenderer<'_>, bytes: &Bytes) -> Result<DocumentInfo, String> {
    let page_count = crop::page_count(bytes).map_err(|e| e.to_string())?;
    let page = crop::page_geometry(bytes).map_err(|e| e.to_string())?;

    renderer.open_document(bytes.to_vec())?;

    debug!(page_count, ?page, "document opened");
    Ok(DocumentInfo { page_count, page })
}
