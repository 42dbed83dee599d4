use crate::error::BidspecError;
use crate::extraction::{PdfDecoder, PositionedDocument};
use crate::model::TextFragment;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;

/// PDF decoding backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox-layout`, which reports every text line with its
/// bounding box. Each line becomes one [`TextFragment`].
pub struct PdftotextDecoder;

impl PdftotextDecoder {
    pub fn new() -> Self {
        PdftotextDecoder
    }
}

impl Default for PdftotextDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDecoder for PdftotextDecoder {
    fn open(&self, pdf_bytes: &[u8]) -> Result<Box<dyn PositionedDocument>, BidspecError> {
        if pdf_bytes.is_empty() {
            return Err(BidspecError::EmptyDocument);
        }

        // Write PDF bytes to a temp file
        let mut tmpfile = tempfile::NamedTempFile::new()
            .map_err(|e| BidspecError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| BidspecError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox-layout")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BidspecError::PdftotextNotFound
                } else {
                    BidspecError::Extraction(format!("pdftotext -bbox-layout failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(BidspecError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        let document = parse_bbox_layout(&xml)?;
        if document.num_pages() == 0 {
            return Err(BidspecError::EmptyDocument);
        }

        log::debug!(
            "pdftotext decoded {} page(s) from {} bytes",
            document.num_pages(),
            pdf_bytes.len()
        );
        Ok(Box::new(document))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Pages decoded from `pdftotext -bbox-layout` output.
///
/// A page whose geometry could not be read keeps its failure reason, so that
/// only that page is lost.
#[derive(Debug, Clone)]
pub struct PdftotextDocument {
    pages: Vec<Result<Vec<TextFragment>, String>>,
}

impl PositionedDocument for PdftotextDocument {
    fn num_pages(&self) -> usize {
        self.pages.len()
    }

    fn text_content(&self, page_number: usize) -> Result<Vec<TextFragment>, BidspecError> {
        let page = page_number
            .checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .ok_or_else(|| BidspecError::PageText {
                page: page_number,
                reason: "page out of range".into(),
            })?;

        page.clone().map_err(|reason| BidspecError::PageText {
            page: page_number,
            reason,
        })
    }
}

#[derive(Default)]
struct PageBuilder {
    height: Option<f32>,
    fragments: Vec<TextFragment>,
    error: Option<String>,
}

struct LineBuilder {
    x_min: Option<f32>,
    y_max: Option<f32>,
    words: Vec<String>,
}

impl PageBuilder {
    fn finish_line(&mut self, line: LineBuilder) {
        let text = line.words.join(" ");
        if text.is_empty() {
            return;
        }

        match (self.height, line.x_min, line.y_max) {
            (Some(height), Some(x), Some(y_max)) => {
                // pdftotext measures from the top edge; flip to bottom-left origin.
                self.fragments.push(TextFragment::new(text, x, height - y_max));
            }
            (None, _, _) => {
                self.error
                    .get_or_insert_with(|| "page has no height attribute".into());
            }
            _ => {
                self.error
                    .get_or_insert_with(|| format!("line '{}' has no bounding box", text));
            }
        }
    }

    fn finish(self) -> Result<Vec<TextFragment>, String> {
        match self.error {
            Some(reason) => Err(reason),
            None => Ok(self.fragments),
        }
    }
}

fn parse_bbox_layout(xml: &str) -> Result<PdftotextDocument, BidspecError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages = Vec::new();
    let mut page: Option<PageBuilder> = None;
    let mut line: Option<LineBuilder> = None;
    let mut in_word = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"page" => {
                    page = Some(PageBuilder {
                        height: attr_f32(&tag, "height"),
                        ..Default::default()
                    });
                }
                b"line" => {
                    line = Some(LineBuilder {
                        x_min: attr_f32(&tag, "xMin"),
                        y_max: attr_f32(&tag, "yMax"),
                        words: Vec::new(),
                    });
                }
                b"word" => in_word = true,
                _ => {}
            },
            Ok(Event::Text(text)) if in_word => {
                let word = match text.unescape() {
                    Ok(s) => s.into_owned(),
                    Err(_) => String::from_utf8_lossy(&text).into_owned(),
                };
                let word = word.trim();
                if let Some(line) = line.as_mut() {
                    if !word.is_empty() {
                        line.words.push(word.to_string());
                    }
                }
            }
            Ok(Event::End(tag)) => match tag.name().as_ref() {
                b"word" => in_word = false,
                b"line" => {
                    if let (Some(page), Some(finished)) = (page.as_mut(), line.take()) {
                        page.finish_line(finished);
                    }
                }
                b"page" => {
                    if let Some(finished) = page.take() {
                        pages.push(finished.finish());
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(BidspecError::Extraction(format!(
                    "malformed pdftotext output at byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(PdftotextDocument { pages })
}

fn attr_f32(tag: &BytesStart, name: &str) -> Option<f32> {
    let attr = tag.try_get_attribute(name).ok()??;
    std::str::from_utf8(&attr.value).ok()?.trim().parse().ok()
}
