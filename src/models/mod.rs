pub mod matrix;
pub mod payment;
pub mod qr_code;

pub use matrix::ModuleGrid;
pub use payment::{PaymentRecord, Person, Recipient};
pub use qr_code::{ECLevel, MaskPattern, QrSymbol, Version};
