use pdfium_render::prelude::*;
use quick_cache::sync::Cache;
use std::sync::Arc;

/// Renders first-page previews through Pdfium, caching bitmaps by scale so
/// zoom toggling back and forth does not re-rasterize.
pub struct PreviewRenderer<'a> {
    pdfium: &'a Pdfium,
    active_doc: Option<PdfDocument<'a>>,
    // Scale stored as u32 (scale * 10000) to be hashable and precise
    page_cache: Cache<u32, (u32, u32, Arc<Vec<u8>>)>,
}

impl<'a> PreviewRenderer<'a> {
    pub fn init_pdfium() -> Result<Pdfium, String> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name()))
            .map_err(|e| format!("Failed to bind to Pdfium library: {e}"))?;

        Ok(Pdfium::new(bindings))
    }

    pub fn new(pdfium: &'a Pdfium) -> Self {
        Self {
            pdfium,
            active_doc: None,
            page_cache: Cache::new(16),
        }
    }

    pub fn open_document(&mut self, bytes: Vec<u8>) -> Result<(), String> {
        self.page_cache.clear();

        let doc = self
            .pdfium
            .load_pdf_from_byte_vec(bytes, None)
            .map_err(|e| e.to_string())?;

        self.active_doc = Some(doc);
        Ok(())
    }

    /// Drops the open document and every cached bitmap of it.
    pub fn close_document(&mut self) {
        self.active_doc = None;
        self.page_cache.clear();
    }

    /// Rasterizes page 1 at `scale` (1.0 = one pixel per PDF point) and
    /// returns `(width, height, rgba)`.
    pub fn render_page(&self, scale: f32) -> Result<(u32, u32, Arc<Vec<u8>>), String> {
        let cache_key = (scale * 10000.0) as u32;
        if let Some(cached) = self.page_cache.get(&cache_key) {
            return Ok(cached);
        }

        let doc = self.active_doc.as_ref().ok_or("No active document")?;
        let page = doc.pages().get(0).map_err(|e| e.to_string())?;

        let render_config = PdfRenderConfig::new()
            .set_target_width((page.width().value * scale) as i32)
            .set_maximum_height((page.height().value * scale) as i32);

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| e.to_string())?;

        let w = bitmap.width() as u32;
        let h = bitmap.height() as u32;
        let result = (w, h, Arc::new(bitmap.as_rgba_bytes().to_vec()));

        self.page_cache.insert(cache_key, result.clone());

        Ok(result)
    }
}
