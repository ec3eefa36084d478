//! QR symbol construction
//!
//! Symbol construction (error correction, placement, masking) is delegated to
//! an encoder behind [`QrEncoder`]. The default implementation wraps
//! `qrcodegen`, pinned to a single version so a UPN symbol always has the same
//! physical size.

use qrcodegen::{DataTooLong, Mask, QrCode, QrCodeEcc, QrSegment};

use super::config::{ECI_ISO_8859_2, forced_mask};
use crate::error::UpnError;
use crate::models::{ECLevel, MaskPattern, ModuleGrid, QrSymbol, Version};

/// Character-set indicator written in front of the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingMode {
    /// Extended Channel Interpretation assignment number
    Eci(u32),
}

impl EncodingMode {
    /// ISO-8859-2, the UPN character set
    pub const LATIN2: EncodingMode = EncodingMode::Eci(ECI_ISO_8859_2);
}

/// Fixed symbol parameters
///
/// The version is always [`Version::UPN`]; data that does not fit is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolOptions {
    version: Version,
    /// Error correction level
    pub error_correction: ECLevel,
    /// Mask to apply, or `None` to pick the lowest-penalty mask
    pub mask: Option<MaskPattern>,
}

impl SymbolOptions {
    /// Default options with the `UPNQR_MASK` override applied
    pub fn from_env() -> Self {
        Self {
            mask: forced_mask(),
            ..Self::default()
        }
    }

    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Force a specific mask pattern
    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }
}

impl Default for SymbolOptions {
    fn default() -> Self {
        Self {
            version: Version::UPN,
            error_correction: ECLevel::M,
            mask: None,
        }
    }
}

/// Builds a module grid from an encoded byte payload
pub trait QrEncoder {
    /// Encode `data` as a byte segment preceded by `mode`
    fn encode(&self, mode: EncodingMode, data: &[u8]) -> Result<QrSymbol, UpnError>;
}

/// [`QrEncoder`] backed by the `qrcodegen` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodegenEncoder {
    options: SymbolOptions,
}

impl QrcodegenEncoder {
    /// Create an encoder with the given symbol options
    pub fn new(options: SymbolOptions) -> Self {
        Self { options }
    }
}

impl QrEncoder for QrcodegenEncoder {
    fn encode(&self, mode: EncodingMode, data: &[u8]) -> Result<QrSymbol, UpnError> {
        let version = self.options.version();

        let EncodingMode::Eci(assignment) = mode;
        let segments = [QrSegment::make_eci(assignment), QrSegment::make_bytes(data)];
        let qr_version = qrcodegen::Version::new(version.number());
        let mask = self.options.mask.map(|m| Mask::new(m.bits()));

        let qr = QrCode::encode_segments_advanced(
            &segments,
            to_qrcodegen_ecc(self.options.error_correction),
            qr_version,
            qr_version,
            mask,
            false,
        )
        .map_err(|err: DataTooLong| {
            tracing::debug!(error = %err, len = data.len(), "payload does not fit symbol");
            UpnError::CapacityExceeded {
                len: data.len(),
                version: version.number(),
            }
        })?;
        debug_assert_eq!(qr.size() as usize, version.size());

        let mask_pattern = MaskPattern::from_bits(qr.mask().value()).unwrap_or(MaskPattern::Pattern0);
        let modules = grid_from_qrcode(&qr);
        tracing::debug!(
            version = version.number(),
            mask = mask_pattern.bits(),
            size = qr.size(),
            dark = modules.count_black(),
            "built QR symbol"
        );

        Ok(QrSymbol {
            version,
            error_correction: self.options.error_correction,
            mask_pattern,
            modules,
        })
    }
}

fn to_qrcodegen_ecc(level: ECLevel) -> QrCodeEcc {
    match level {
        ECLevel::L => QrCodeEcc::Low,
        ECLevel::M => QrCodeEcc::Medium,
        ECLevel::Q => QrCodeEcc::Quartile,
        ECLevel::H => QrCodeEcc::High,
    }
}

fn grid_from_qrcode(qr: &QrCode) -> ModuleGrid {
    let size = qr.size().max(0) as usize;
    ModuleGrid::from_fn(size, |x, y| qr.get_module(x as i32, y as i32))
}
