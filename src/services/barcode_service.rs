// src/services/barcode_service.rs

use image::Luma;
use qrcode::QrCode;
use sqlx::{Acquire, Postgres};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::{
    common::error::{AppError, EntityKind},
    db::PurchaseRepository,
    models::purchase::ItemInstanceLabel,
};

const ESC: u8 = 0x1b;
const GS: u8 = 0x1d;

// GS k 73 frames the barcode with a single length byte; 255 minus the two
// code-set selector bytes leaves this much room for the barcode text itself.
const MAX_BARCODE_BYTES: usize = 253;

#[derive(Clone)]
pub struct BarcodeService {
    purchase_repo: PurchaseRepository,
}

impl BarcodeService {
    pub fn new(purchase_repo: PurchaseRepository) -> Self {
        Self { purchase_repo }
    }

    // --- QR PNG ---
    // Thin wrapper over qrcode + image; size is a lower bound, the encoder
    // picks the nearest module grid.
    pub fn qr_png(&self, text: &str, width: u32, height: u32) -> Result<Vec<u8>, AppError> {
        let code = QrCode::new(text.as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().min_dimensions(width, height).build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let mut buffer = Vec::new();
        dynamic_image
            .write_to(&mut buffer, image::ImageOutputFormat::Png)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        Ok(buffer)
    }

    // --- Printable PDF label sheet ---
    pub async fn labels_pdf<'e, E>(
        &self,
        executor: E,
        instance_ids: &[i64],
    ) -> Result<Vec<u8>, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let labels = self.fetch_labels(executor, instance_ids).await?;
        self.render_labels_pdf(&labels)
    }

    fn render_labels_pdf(&self, labels: &[ItemInstanceLabel]) -> Result<Vec<u8>, AppError> {
        use genpdf::{elements, style, Element};

        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("./fonts (Roboto)".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title("Barcode labels");
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        for (idx, label) in labels.iter().enumerate() {
            if idx > 0 {
                doc.push(elements::PageBreak::new());
            }

            doc.push(
                elements::Paragraph::new(label.item_name.clone())
                    .aligned(genpdf::Alignment::Center)
                    .styled(style::Style::new().bold().with_font_size(16)),
            );
            doc.push(
                elements::Paragraph::new(label.office_name.clone())
                    .aligned(genpdf::Alignment::Center)
                    .styled(style::Style::new().with_font_size(11)),
            );
            doc.push(
                elements::Paragraph::new(format!(
                    "Purchased: {}",
                    label.purchase_date.format("%d/%m/%Y")
                ))
                .aligned(genpdf::Alignment::Center)
                .styled(style::Style::new().with_font_size(9)),
            );
            doc.push(elements::Break::new(1));

            // A scanner-friendly QR carrying the barcode text, with the
            // human-readable code printed underneath.
            let qr = QrCode::new(label.barcode.as_bytes())
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
            let image_buffer = qr.render::<Luma<u8>>().build();
            let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

            let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
                .with_alignment(genpdf::Alignment::Center)
                .with_scale(genpdf::Scale::new(0.5, 0.5));
            doc.push(pdf_image);

            doc.push(
                elements::Paragraph::new(label.barcode.clone())
                    .aligned(genpdf::Alignment::Center)
                    .styled(style::Style::new().bold().with_font_size(12)),
            );
        }

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        Ok(buffer)
    }

    // --- ESC/POS ---

    pub async fn escpos_for_instances<'e, E>(
        &self,
        executor: E,
        instance_ids: &[i64],
    ) -> Result<Vec<u8>, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let labels = self.fetch_labels(executor, instance_ids).await?;
        let mut commands = Vec::new();
        for label in &labels {
            commands.extend_from_slice(&escpos_label(label));
        }
        Ok(commands)
    }

    // --- Raw socket printing ---
    // One-shot: connect, write, flush, close. No retries; transient printer
    // trouble is the caller's problem.
    pub async fn print_to_network_printer(
        &self,
        printer_ip: &str,
        printer_port: u16,
        data: &[u8],
    ) -> Result<(), AppError> {
        let target = format!("{printer_ip}:{printer_port}");

        let mut stream = TcpStream::connect((printer_ip, printer_port))
            .await
            .map_err(|e| AppError::PrinterUnreachable(target.clone(), e))?;
        stream
            .write_all(data)
            .await
            .map_err(|e| AppError::PrinterUnreachable(target.clone(), e))?;
        stream
            .flush()
            .await
            .map_err(|e| AppError::PrinterUnreachable(target.clone(), e))?;
        stream
            .shutdown()
            .await
            .map_err(|e| AppError::PrinterUnreachable(target, e))?;

        tracing::info!("Print job sent to {}:{}", printer_ip, printer_port);
        Ok(())
    }

    async fn fetch_labels<'e, E>(
        &self,
        executor: E,
        instance_ids: &[i64],
    ) -> Result<Vec<ItemInstanceLabel>, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;
        let mut labels = Vec::with_capacity(instance_ids.len());
        for &id in instance_ids {
            let label = self
                .purchase_repo
                .find_instance_label(&mut *conn, id)
                .await?
                .ok_or(AppError::NotFound(EntityKind::ItemInstance, id))?;
            labels.push(label);
        }
        Ok(labels)
    }
}

/// One thermal label as an ESC/POS command stream: init, centered header
/// lines, a CODE128 barcode (code set B) with the text below, feed and cut.
/// The printer does the barcode rendering; we only frame the bytes.
pub(crate) fn escpos_label(label: &ItemInstanceLabel) -> Vec<u8> {
    let mut buf = Vec::new();

    buf.extend_from_slice(&[ESC, b'@']); // initialize
    buf.extend_from_slice(&[ESC, b'a', 1]); // center alignment

    buf.extend_from_slice(&[ESC, b'E', 1]); // bold on
    buf.extend_from_slice(label.item_name.as_bytes());
    buf.push(b'\n');
    buf.extend_from_slice(&[ESC, b'E', 0]); // bold off

    buf.extend_from_slice(label.office_name.as_bytes());
    buf.push(b'\n');
    buf.extend_from_slice(label.purchase_date.format("%d/%m/%Y").to_string().as_bytes());
    buf.push(b'\n');

    buf.extend_from_slice(&[GS, b'H', 2]); // HRI below the barcode
    buf.extend_from_slice(&[GS, b'h', 80]); // barcode height in dots
    buf.extend_from_slice(&[GS, b'w', 2]); // module width

    // GS k 73: CODE128, length-prefixed, "{B" selects code set B. The length
    // byte caps the payload at 253 bytes after the code-set selector; longer
    // barcode text is cut at a char boundary rather than corrupting the frame.
    let mut data = label.barcode.as_str();
    if data.len() > MAX_BARCODE_BYTES {
        let mut end = MAX_BARCODE_BYTES;
        while !data.is_char_boundary(end) {
            end -= 1;
        }
        data = &data[..end];
    }
    buf.extend_from_slice(&[GS, b'k', 73, (data.len() + 2) as u8]);
    buf.extend_from_slice(b"{B");
    buf.extend_from_slice(data.as_bytes());

    buf.extend_from_slice(b"\n\n\n");
    buf.extend_from_slice(&[GS, b'V', 66, 0]); // feed and partial cut

    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_label() -> ItemInstanceLabel {
        ItemInstanceLabel {
            id: 1,
            barcode: "NOT-HQ1-1700000000000-0".into(),
            item_name: "Notebook".into(),
            office_name: "Head Office".into(),
            purchase_date: Utc::now(),
        }
    }

    #[test]
    fn escpos_stream_starts_with_initialize() {
        let bytes = escpos_label(&sample_label());
        assert_eq!(&bytes[..2], &[ESC, b'@']);
    }

    #[test]
    fn escpos_stream_carries_the_barcode_in_code_set_b() {
        let label = sample_label();
        let bytes = escpos_label(&label);

        let mut expected = vec![GS, b'k', 73, (label.barcode.len() + 2) as u8];
        expected.extend_from_slice(b"{B");
        expected.extend_from_slice(label.barcode.as_bytes());

        assert!(bytes.windows(expected.len()).any(|w| w == expected.as_slice()));
    }

    #[test]
    fn escpos_stream_ends_with_a_cut() {
        let bytes = escpos_label(&sample_label());
        assert_eq!(&bytes[bytes.len() - 4..], &[GS, b'V', 66, 0]);
    }

    #[test]
    fn escpos_barcode_longer_than_the_length_byte_is_clamped() {
        let mut label = sample_label();
        label.barcode = "X".repeat(300);
        let bytes = escpos_label(&label);

        let frame_start = bytes
            .windows(3)
            .position(|w| w == [GS, b'k', 73])
            .expect("barcode frame present");
        let length_byte = bytes[frame_start + 3] as usize;

        assert_eq!(length_byte, 255);
        assert_eq!(&bytes[frame_start + 4..frame_start + 6], b"{B");
        // The frame holds exactly length_byte bytes of payload, then the
        // label continues with the trailing feeds.
        let payload = &bytes[frame_start + 6..frame_start + 4 + length_byte];
        assert!(payload.iter().all(|&b| b == b'X'));
        assert_eq!(payload.len(), 253);
    }

    #[test]
    fn escpos_barcode_clamp_respects_char_boundaries() {
        let mut label = sample_label();
        // Three-byte code points; 253 is not a multiple of three, so a byte
        // cut would split one.
        label.barcode = "ক".repeat(100);
        let bytes = escpos_label(&label);

        let frame_start = bytes
            .windows(3)
            .position(|w| w == [GS, b'k', 73])
            .expect("barcode frame present");
        let length_byte = bytes[frame_start + 3] as usize;
        let payload = &bytes[frame_start + 6..frame_start + 4 + length_byte];

        assert!(payload.len() <= 253);
        assert!(std::str::from_utf8(payload).is_ok());
    }

    #[test]
    fn qr_png_output_is_a_png() {
        let service = BarcodeService::new(PurchaseRepository::new());
        let png = service.qr_png("NOT-HQ1-1700000000000-0", 200, 200).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
