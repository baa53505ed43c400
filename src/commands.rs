use bytes::Bytes;
use pdfcrop::geometry::{CropBox, PageGeometry};
use std::sync::Arc;
use tokio::sync::mpsc;

/// What the engine reports about a freshly opened document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentInfo {
    pub page_count: usize,
    pub page: PageGeometry,
}

#[derive(Debug, Clone)]
pub enum PdfCommand {
    Open(Bytes, mpsc::Sender<Result<DocumentInfo, String>>),
    Render(f32, mpsc::Sender<Result<(u32, u32, Arc<Vec<u8>>), String>>),
    ApplyCrop(Bytes, CropBox, mpsc::Sender<Result<Bytes, String>>),
    Close,
}
