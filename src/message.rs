use crate::commands::DocumentInfo;
use bytes::Bytes;
use std::sync::Arc;

/// A successfully picked and engine-loaded source file.
#[derive(Debug, Clone)]
pub struct OpenedDocument {
    pub name: String,
    pub bytes: Bytes,
    pub info: DocumentInfo,
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenDocument,
    DocumentOpened(Result<OpenedDocument, String>),
    CloseDocument,
    PreviewRendered(u64, Result<(u32, u32, Arc<Vec<u8>>), String>),
    StartCrop,
    CancelCrop,
    ConfirmCrop,
    CropApplied(u64, Result<Bytes, String>),
    SaveArtifact,
    ArtifactSaved(Result<String, String>),
    PointerPressed,
    PointerMoved(iced::Point),
    PointerReleased,
    PointerLeft,
    ZoomIn,
    ZoomOut,
    ClearStatus,
    AlertClosed,
}
